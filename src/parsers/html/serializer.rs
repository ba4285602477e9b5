use encoding_rs::Encoding;
use html5ever::serialize::{serialize, SerializeOpts};
use markup5ever_rcdom::{RcDom, SerializableHandle};
use regex::Regex;

use super::utils::BOOLEAN_ATTRIBUTES;

/// 序列化文档
///
/// html5ever 会把无值属性序列化为 `attr=""`；布尔属性必须以裸形式
/// 回写，因此在序列化后的缓冲区上做一次还原。
pub fn serialize_document(dom: RcDom, document_encoding: String) -> Vec<u8> {
    let mut buf: Vec<u8> = Vec::new();

    let serializable: SerializableHandle = dom.document.into();
    serialize(&mut buf, &serializable, SerializeOpts::default())
        .expect("Unable to serialize DOM into buffer");

    // Restore bare boolean attributes (readonly="" => readonly)
    {
        let s: &str = &String::from_utf8_lossy(&buf);
        let boolean_attr_re =
            Regex::new(&format!(r#" (?P<a>{})="""#, BOOLEAN_ATTRIBUTES.join("|"))).unwrap();
        buf = boolean_attr_re.replace_all(s, " $a").as_bytes().to_vec();
    }

    if !document_encoding.is_empty() {
        if let Some(encoding) = Encoding::for_label(document_encoding.as_bytes()) {
            let s: &str = &String::from_utf8_lossy(&buf);
            let (data, _, _) = encoding.encode(s);
            buf = data.to_vec();
        }
    }

    buf
}
