//! The simplest possible parse: check whether it succeeded.

use flashjson_core::Document;

fn main() {
    let json = r#"
    {
      "a": 1,
      "b": 2
    }
    "#;

    match Document::parse(json.as_bytes()) {
        Ok(_) => println!("Parse successful!"),
        Err(_) => println!("Parse failed!"),
    }
}
