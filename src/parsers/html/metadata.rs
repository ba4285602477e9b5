//! HTML 文档元数据处理模块
//!
//! 此模块提供对 HTML 文档元数据的处理功能，包括：
//! - 处理字符编码声明
//! - 提取文档标题
//! - 生成本地化处理的元数据注释
//!
//! 这些功能用于在标注 HTML 文档时保持正确的元数据信息，
//! 确保输出文档能以原有的字符集正确显示。

use chrono::{SecondsFormat, Utc};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::core::parse_content_type;

use super::dom::{create_html_element, find_nodes, get_node_attr, set_node_attr};

/// 获取文档字符编码
///
/// 从 HTML 文档的 meta 标签中提取字符编码信息。支持两种格式：
/// 1. HTML5 格式：`<meta charset="utf-8">`
/// 2. HTML4 格式：`<meta http-equiv="content-type" content="text/html; charset=utf-8">`
pub fn get_charset(node: &Handle) -> Option<String> {
    for meta_node in find_nodes(node, vec!["html", "head", "meta"]).iter() {
        if let Some(meta_charset_node_attr_value) = get_node_attr(meta_node, "charset") {
            // 处理 <meta charset="..." /> 格式
            return Some(meta_charset_node_attr_value);
        }

        if get_node_attr(meta_node, "http-equiv")
            .unwrap_or_default()
            .eq_ignore_ascii_case("content-type")
        {
            if let Some(meta_content_type_node_attr_value) = get_node_attr(meta_node, "content") {
                // 处理 <meta http-equiv="content-type" content="text/html; charset=..." /> 格式
                let (_media_type, charset, _is_base64) =
                    parse_content_type(&meta_content_type_node_attr_value);
                return Some(charset);
            }
        }
    }

    None
}

/// 获取文档标题
pub fn get_title(node: &Handle) -> Option<String> {
    for title_node in find_nodes(node, vec!["html", "head", "title"]).iter() {
        for child_node in title_node.children.borrow().iter() {
            if let NodeData::Text { ref contents } = child_node.data {
                return Some(contents.borrow().to_string());
            }
        }
    }

    None
}

/// 设置文档字符编码
///
/// 更新现有的 charset 声明；如果文档没有声明，则在 HEAD 中插入一个。
pub fn set_charset(dom: RcDom, charset: String) -> RcDom {
    for meta_node in find_nodes(&dom.document, vec!["html", "head", "meta"]).iter() {
        // 检查是否有 HTML5 格式的 charset 属性
        if get_node_attr(meta_node, "charset").is_some() {
            set_node_attr(meta_node, "charset", Some(charset));
            return dom;
        }

        // 检查是否有 HTML4 格式的 http-equiv content-type 标签
        if get_node_attr(meta_node, "http-equiv")
            .unwrap_or_default()
            .eq_ignore_ascii_case("content-type")
            && get_node_attr(meta_node, "content").is_some()
        {
            set_node_attr(
                meta_node,
                "content",
                Some(format!("text/html;charset={charset}")),
            );
            return dom;
        }
    }

    // 手动在 HEAD 中添加 charset META 节点
    {
        let meta_charset_node: Handle =
            create_html_element(&dom, "meta", vec![("charset", charset.as_str())]);

        // 将新创建的 META charset 节点插入到 HEAD 中
        if let Some(head_node) = find_nodes(&dom.document, vec!["html", "head"]).first() {
            head_node
                .children
                .borrow_mut()
                .push(meta_charset_node.clone());
        }
    }

    dom
}

/// 生成本地化处理的元数据注释
///
/// 输出类似：`<!-- Localized from Earthdawn.html at 2026-08-06T10:30:45Z using sheetloc v1.2.0 -->`
pub fn create_metadata_comment(source_name: Option<&str>) -> String {
    let datetime: &str = &Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

    format!(
        "<!-- Localized from {} at {} using {} v{} -->",
        source_name.filter(|name| !name.is_empty()).unwrap_or("local source"),
        datetime,
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
    )
}
