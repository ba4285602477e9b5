//! 标记文档解析器模块
//!
//! 提供 HTML 文档的解析、DOM 操作和序列化功能。

pub mod html;

pub use html::*;
