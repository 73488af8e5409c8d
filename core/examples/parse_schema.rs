//! Parses a document through a schema guide that prunes object members the
//! schema's shape doesn't mention, then dumps the pruned result.

use flashjson_core::Document;

fn main() {
    let json_schema = r#"{"obj":1}"#;
    let json = r#"{"it":1, "obj":{"a":{"b":1}, "b":[1]}}"#;

    let schema = match Document::parse(json_schema.as_bytes()) {
        Ok(doc) => doc,
        Err(_) => {
            println!("error");
            return;
        }
    };

    match Document::parse_schema(&schema, json.as_bytes()) {
        Ok(doc) => println!("schema : {}", doc.dump().expect("serializable document")),
        Err(err) => println!("json: {}", &json[err.offset()..]),
    }
}
