//! Walks a JSON Pointer against raw bytes without materializing a DOM, once
//! for a pointer that resolves and once for a pointer that doesn't.

use flashjson_core::pointer::{JsonPointer, PointerSegment};
use flashjson_core::Document;

const JSON: &str = r#"
{
    "a": {
    "a0":[0,1,2,3,4,5,6,7,8,9],
    "a1": "hi"
    },
    "b":[
    {"b0":1},
    {"b1":2}
    ]
}
"#;

fn main() {
    // The target exists in the document.
    let hit = JsonPointer::from_segments(vec![
        PointerSegment::Key("a".into()),
        PointerSegment::Key("a0".into()),
        PointerSegment::Index(8),
    ]);
    match Document::parse_on_demand(JSON.as_bytes(), &hit) {
        Ok(bytes) => println!("Parse ondemand result is {}", String::from_utf8_lossy(bytes)),
        Err(err) => println!("Parse error: {err}"),
    }

    // The target doesn't exist: "a1" is a string, not an object to key into.
    let miss = JsonPointer::from_segments(vec![
        PointerSegment::Key("a".into()),
        PointerSegment::Key("a1".into()),
        PointerSegment::Key("unknown".into()),
    ]);
    match Document::parse_on_demand(JSON.as_bytes(), &miss) {
        Ok(bytes) => println!("Parse ondemand result is {}", String::from_utf8_lossy(bytes)),
        Err(err) => println!("Parse error: {err}. Error position at {}", err.offset()),
    }
}
