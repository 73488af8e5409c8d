//! Looks up a handful of JSON Pointers against a parsed document, some of
//! which exist and some of which don't.

use flashjson_core::pointer::{JsonPointer, PointerSegment};
use flashjson_core::Document;

fn main() {
    let json = r#"
    {
      "a":1,
      "b":[
        {"a":1},
        {"b":2}
      ]
    }
    "#;

    let doc = Document::parse(json.as_bytes()).expect("valid json");

    let a = JsonPointer::parse("/a").unwrap();
    match doc.at_pointer(&a) {
        Some(_) => println!("/a exists!"),
        None => println!("/a doesn't exist!"),
    }

    let b1a = JsonPointer::from_segments(vec![
        PointerSegment::Key("b".into()),
        PointerSegment::Index(1),
        PointerSegment::Key("a".into()),
    ]);
    match doc.at_pointer(&b1a) {
        Some(_) => println!("/b/1/a exists!"),
        None => println!("/b/1/a doesn't exist!"),
    }

    let b1b = JsonPointer::parse("/b/1/b").unwrap();
    match doc.at_pointer(&b1b) {
        Some(_) => println!("/b/1/b exists!"),
        None => println!("/b/1/b doesn't exist!"),
    }
}
