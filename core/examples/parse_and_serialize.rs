//! Parses a small object and serializes it straight back out.

use flashjson_core::{Document, SerializeFlags};

fn main() {
    let json = r#"
    {
      "a": 1,
      "b": 2
    }
    "#;

    let doc = Document::parse(json.as_bytes()).expect("valid json");
    let mut buf = flashjson_core::buffer::WriteBuffer::new();
    doc.serialize(&mut buf, SerializeFlags::default()).expect("serializable document");
    println!("{}", buf.to_string_lossy());
}
