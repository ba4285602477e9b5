//! # Sheetloc Library
//!
//! 一个用于本地化准备的工具库：扫描人物卡（character sheet）HTML 文档，
//! 识别可翻译的文本片段和属性值，为 DOM 树添加稳定的查找键标注，
//! 并导出键→原文的映射文件。
//!
//! ## 模块组织
//!
//! - `core` - 核心功能和主要处理流程
//! - `parsers` - HTML 解析、DOM 操作和序列化
//! - `localize` - 文本分类、键注册和标注流程

pub mod core;
pub mod localize;
pub mod parsers;

// Re-export commonly used items for convenience
pub use core::*;
pub use parsers::*;
