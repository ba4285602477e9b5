//! 本地化标注模块
//!
//! 提供完整的文本发现与标注功能，采用清晰的模块化架构：
//! - **config**: 类型化配置与默认常量
//! - **filters**: 文本分类器（纯函数）
//! - **registry**: 翻译键注册表
//! - **annotator**: DOM 标注写入
//! - **walker**: 文档树遍历
//! - **error**: 错误处理
//!
//! # 基本用法
//!
//! ```rust,no_run
//! use markup5ever_rcdom::RcDom;
//! use sheetloc::localize::{annotate_dom, LocalizeConfig};
//! use sheetloc::parsers::html::html_to_dom;
//!
//! let dom: RcDom = html_to_dom(b"<div><span>Damage</span></div>", "utf-8".to_string());
//! let (registry, stats) = annotate_dom(&dom, LocalizeConfig::default());
//! assert_eq!(registry.get("damage"), Some("Damage"));
//! assert_eq!(stats.total_annotated(), 1);
//! ```

/// 配置管理模块 - 跳过/保留标签集合与标注选项
pub mod config;

/// 标注器模块 - 把翻译键写入 DOM
pub mod annotator;

/// 错误处理模块 - 统一的错误类型
pub mod error;

/// 文本分类器模块 - 判断文本是否可翻译
pub mod filters;

/// 键注册表模块 - 稳定键的分配与导出
pub mod registry;

/// 遍历器模块 - 驱动整个标注流程
pub mod walker;

pub use annotator::{AnnotationOutcome, AnnotationSlot, Annotator};
pub use config::{constants, LocalizeConfig};
pub use error::{LocalizeError, LocalizeResult};
pub use filters::{is_translatable, Classification, FilterReason, TextFilter};
pub use registry::KeyRegistry;
pub use walker::{SheetWalker, WalkStats};

use markup5ever_rcdom::RcDom;

/// 便利函数：标注整棵 DOM 树
///
/// 遍历 `dom` 并原地写入标注，返回键注册表和遍历统计。
pub fn annotate_dom(dom: &RcDom, config: LocalizeConfig) -> (KeyRegistry, WalkStats) {
    let mut walker = SheetWalker::new(config);
    walker.walk(dom, &dom.document);
    let stats = walker.stats().clone();

    (walker.into_registry(), stats)
}
