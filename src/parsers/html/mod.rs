//! HTML解析和处理模块
//!
//! 这个模块被拆分为多个子模块，提供更好的组织结构和可维护性：
//!
//! - `utils`: 基础工具函数和常量
//! - `dom`: 基础DOM操作
//! - `metadata`: 文档元数据处理
//! - `serializer`: 序列化功能

pub mod dom;
pub mod metadata;
pub mod serializer;
pub mod utils;

// 重新导出主要的公共 API
pub use dom::{
    create_html_element, create_text_node, find_nodes, get_node_attr, html_to_dom, set_node_attr,
};
pub use metadata::{create_metadata_comment, get_charset, get_title, set_charset};
pub use serializer::serialize_document;
pub use utils::{attr_is_boolean, BOOLEAN_ATTRIBUTES, WHITESPACES};
