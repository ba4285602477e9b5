//! 标注器模块
//!
//! 负责把翻译键写进 DOM：属性槽位在属主元素上获得 `i18n-<slot>`
//! 属性；内容槽位优先标注父元素本身，无法安全标注时为单个文本
//! 片段包裹一个最小的行内元素，并原样保留片段前后的空白。

use markup5ever_rcdom::{Handle, RcDom};
use tracing::debug;

use crate::localize::config::{constants, LocalizeConfig};
use crate::localize::filters::{FilterReason, TextFilter};
use crate::localize::registry::KeyRegistry;
use crate::parsers::html::dom::{
    create_html_element, create_text_node, get_node_attr, set_node_attr,
};
use crate::parsers::html::utils::{attr_is_boolean, WHITESPACES};

/// 可标注的槽位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationSlot {
    /// 元素的直接文本内容
    Content,
    Title,
    Placeholder,
    Alt,
    AriaLabel,
    AriaDescription,
    /// 按钮类元素的 value 属性
    Value,
}

impl AnnotationSlot {
    /// 所有属性槽位（Content 与 Value 由遍历器按元素类型单独驱动）
    pub const ATTRIBUTE_SLOTS: &'static [AnnotationSlot] = &[
        AnnotationSlot::Title,
        AnnotationSlot::Placeholder,
        AnnotationSlot::Alt,
        AnnotationSlot::AriaLabel,
        AnnotationSlot::AriaDescription,
    ];

    /// 槽位对应的原始属性名（Content 没有）
    pub fn source_attr(&self) -> Option<&'static str> {
        match self {
            AnnotationSlot::Content => None,
            AnnotationSlot::Title => Some("title"),
            AnnotationSlot::Placeholder => Some("placeholder"),
            AnnotationSlot::Alt => Some("alt"),
            AnnotationSlot::AriaLabel => Some("aria-label"),
            AnnotationSlot::AriaDescription => Some("aria-description"),
            AnnotationSlot::Value => Some("value"),
        }
    }

    /// 槽位写入的标注属性名
    pub fn annotation_attr(&self) -> &'static str {
        match self {
            AnnotationSlot::Content => constants::CONTENT_ANNOTATION_ATTR,
            AnnotationSlot::Title => "i18n-title",
            AnnotationSlot::Placeholder => "i18n-placeholder",
            AnnotationSlot::Alt => "i18n-alt",
            AnnotationSlot::AriaLabel => "i18n-aria-label",
            AnnotationSlot::AriaDescription => "i18n-aria-description",
            AnnotationSlot::Value => "i18n-value",
        }
    }
}

/// 单次标注的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationOutcome {
    /// 成功写入标注
    Annotated,
    /// 该槽位已有标注，跳过（幂等）
    AlreadyAnnotated,
    /// 分类器拒绝了文本
    Rejected(FilterReason),
    /// 槽位对该元素不适用（属性缺失、空值或布尔属性）
    NotApplicable,
}

/// 标注器
///
/// 持有本次运行的键注册表；所有对 DOM 的修改都经过这里。
pub struct Annotator {
    config: LocalizeConfig,
    filter: TextFilter,
    registry: KeyRegistry,
}

impl Annotator {
    /// 创建新的标注器
    pub fn new(config: LocalizeConfig) -> Self {
        Self {
            config,
            filter: TextFilter::new(),
            registry: KeyRegistry::new(),
        }
    }

    /// 访问键注册表
    pub fn registry(&self) -> &KeyRegistry {
        &self.registry
    }

    /// 取出键注册表（运行结束时导出映射用）
    pub fn into_registry(self) -> KeyRegistry {
        self.registry
    }

    /// 标注一个属性槽位
    ///
    /// 读取原始属性值，分类通过后写入 `i18n-<slot>` 属性；除非配置
    /// 要求保留，原始属性在取值后被移除。
    pub fn annotate_attribute(&mut self, node: &Handle, slot: AnnotationSlot) -> AnnotationOutcome {
        let source_attr = match slot.source_attr() {
            Some(name) => name,
            // Content 槽位走 annotate_parent_content / wrap_text_run
            None => return AnnotationOutcome::NotApplicable,
        };

        // 布尔属性没有可翻译的文本值
        if attr_is_boolean(source_attr) {
            return AnnotationOutcome::NotApplicable;
        }

        if get_node_attr(node, slot.annotation_attr()).is_some() {
            return AnnotationOutcome::AlreadyAnnotated;
        }

        let value = match get_node_attr(node, source_attr) {
            Some(value) if !value.is_empty() => value,
            _ => return AnnotationOutcome::NotApplicable,
        };

        let classification = self.filter.classify(&value);
        if let Some(reason) = classification.reason {
            return AnnotationOutcome::Rejected(reason);
        }

        let key = self.registry.intern(&value);
        set_node_attr(node, slot.annotation_attr(), Some(key.clone()));

        if !self.config.keep_original_attributes {
            set_node_attr(node, source_attr, None);
        }

        debug!(attr = source_attr, key = %key, "属性槽位已标注");
        AnnotationOutcome::Annotated
    }

    /// 把内容标注直接写在父元素上
    ///
    /// 仅当父元素是叶子候选（遍历器判定）时调用；文本节点本身
    /// 原封不动，空白逐字节保留。
    pub fn annotate_parent_content(&mut self, node: &Handle, raw_text: &str) -> AnnotationOutcome {
        if get_node_attr(node, constants::CONTENT_ANNOTATION_ATTR).is_some() {
            return AnnotationOutcome::AlreadyAnnotated;
        }

        let classification = self.filter.classify(raw_text);
        if let Some(reason) = classification.reason {
            return AnnotationOutcome::Rejected(reason);
        }

        let key = self.registry.intern(raw_text);
        set_node_attr(
            node,
            constants::CONTENT_ANNOTATION_ATTR,
            Some(key.clone()),
        );

        debug!(key = %key, "内容已标注到父元素");
        AnnotationOutcome::Annotated
    }

    /// 为父元素第 `child_index` 个子节点（文本）包裹标注元素
    ///
    /// 文本被拆为「前导空白、核心、尾随空白」三段：核心移入新的
    /// `<span i18n="...">`，前后空白作为兄弟文本节点原样回填。
    pub fn wrap_text_run(
        &mut self,
        dom: &RcDom,
        parent: &Handle,
        child_index: usize,
        raw_text: &str,
    ) -> AnnotationOutcome {
        let (leading, core, trailing) = split_outer_whitespace(raw_text);

        let classification = self.filter.classify(core);
        if let Some(reason) = classification.reason {
            return AnnotationOutcome::Rejected(reason);
        }

        let key = self.registry.intern(core);

        let wrapper = create_html_element(
            dom,
            constants::WRAPPER_ELEMENT,
            vec![(constants::CONTENT_ANNOTATION_ATTR, key.as_str())],
        );
        wrapper.children.borrow_mut().push(create_text_node(core));

        let mut replacement: Vec<Handle> = Vec::with_capacity(3);
        if !leading.is_empty() {
            replacement.push(create_text_node(leading));
        }
        replacement.push(wrapper);
        if !trailing.is_empty() {
            replacement.push(create_text_node(trailing));
        }

        parent
            .children
            .borrow_mut()
            .splice(child_index..child_index + 1, replacement);

        debug!(key = %key, "文本片段已包裹标注");
        AnnotationOutcome::Annotated
    }
}

/// 把文本拆为前导空白、核心和尾随空白三段
fn split_outer_whitespace(text: &str) -> (&str, &str, &str) {
    let start = match text.find(|c: char| !WHITESPACES.contains(&c)) {
        Some(index) => index,
        None => return (text, "", ""),
    };
    let last = match text.rfind(|c: char| !WHITESPACES.contains(&c)) {
        Some(index) => index,
        None => return (text, "", ""),
    };
    let end = last + text[last..].chars().next().map_or(1, char::len_utf8);

    (&text[..start], &text[start..end], &text[end..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_outer_whitespace() {
        assert_eq!(
            split_outer_whitespace("  Health   Rating \n"),
            ("  ", "Health   Rating", " \n")
        );
        assert_eq!(split_outer_whitespace("Damage"), ("", "Damage", ""));
        assert_eq!(split_outer_whitespace("   "), ("   ", "", ""));
        assert_eq!(split_outer_whitespace(" Zażółć "), (" ", "Zażółć", " "));
    }

    #[test]
    fn test_slot_attribute_names() {
        assert_eq!(AnnotationSlot::Content.annotation_attr(), "i18n");
        assert_eq!(AnnotationSlot::Title.annotation_attr(), "i18n-title");
        assert_eq!(
            AnnotationSlot::AriaLabel.annotation_attr(),
            "i18n-aria-label"
        );
        assert_eq!(AnnotationSlot::Content.source_attr(), None);
        assert_eq!(AnnotationSlot::Value.source_attr(), Some("value"));
    }

    #[test]
    fn test_attribute_slots_all_have_prefix() {
        for slot in AnnotationSlot::ATTRIBUTE_SLOTS {
            assert!(slot
                .annotation_attr()
                .starts_with(constants::ANNOTATION_ATTR_PREFIX));
        }
    }
}
