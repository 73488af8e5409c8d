//! Parses three malformed documents and reports the failing offset for
//! each: truncated input, a trailing sibling value, and a missing `:`
//! between key and value.

use flashjson_core::Document;

fn parse_json(data: &str) {
    match Document::parse(data.as_bytes()) {
        Ok(_) => println!("Parsed json:\n{data}\nsuccessfully"),
        Err(err) => {
            println!("{err}\nJson:\n{data}\nError offset is: {}", err.offset());
        }
    }
}

fn main() {
    parse_json(r#"{"a":"b","#);
    parse_json(r#"[1,2,3],[1,2,3]"#);
    parse_json(r#"{"a","b"}"#);
}
