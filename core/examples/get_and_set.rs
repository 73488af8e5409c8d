//! Finds an object member by key, prints it, then overwrites its value in
//! place and prints it again.

use flashjson_core::dom::Value;
use flashjson_core::Document;

fn print_member(key: &str, value: &Value<'_>) {
    match value.as_i64() {
        Some(v) => println!("Key is: {key}, value is {v}"),
        None => println!("Incorrect value type!"),
    }
}

fn main() {
    let json = r#"
    {
      "a": 1,
      "b": 2
    }
    "#;

    let doc = Document::parse(json.as_bytes()).expect("valid json");
    if !doc.root().is_object() {
        println!("Incorrect doc type!");
        return;
    }

    match doc.root().find_member("a") {
        Some(value) => {
            println!("Before setting new value:");
            print_member("a", &value);
            value.set(2i64);
            println!("After setting value:");
            print_member("a", &value);
        }
        None => println!("Find key doesn't exist!"),
    }
}
