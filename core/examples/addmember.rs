//! Builds an object node from scratch and appends one member to it.

use flashjson_core::Document;

fn main() {
    let doc = Document::new_object();
    doc.root().add_member("Key", "Value", true).expect("root is an object");
    println!("Add member successfully!");
}
