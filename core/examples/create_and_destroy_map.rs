//! Builds the key index for one object node, queries through it, then tears
//! it back down.

use flashjson_core::pointer::JsonPointer;
use flashjson_core::Document;

fn get_json_string() -> &'static str {
    r#"
    {
      "a":[
        {"b":1, "c":2, "d":3, "e":4}
      ]
    }
    "#
}

fn main() {
    let json = get_json_string();
    let doc = match Document::parse(json.as_bytes()) {
        Ok(doc) => doc,
        Err(_) => {
            println!("Parse failed!");
            return;
        }
    };

    let pointer = JsonPointer::parse("/a/0").unwrap();
    let node = match doc.at_pointer(&pointer) {
        Some(node) if node.is_object() => node,
        _ => {
            println!("/a/0 doesn't exist or isn't an object!");
            return;
        }
    };

    if !node.has_member("e") {
        println!("/a/0/e doesn't exist!");
    }

    // Build the key index. If the node already has one, this is a no-op.
    node.create_map();
    // Queries through the index now instead of a linear scan.
    if !node.has_member("e") {
        println!("/a/0/e doesn't exist!");
    }

    // Not needed anymore.
    node.destroy_map();

    println!("Querying finished!");
}
