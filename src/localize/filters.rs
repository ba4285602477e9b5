//! 文本分类器模块
//!
//! 判断一段候选文本是否为可翻译的语言内容。分类是纯函数：
//! 相同输入永远得到相同结果，没有任何状态。

use crate::localize::config::constants;
use crate::parsers::html::utils::WHITESPACES;

/// 拒绝原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterReason {
    /// 空或纯空白
    Empty,
    /// trim 后不足两个字符
    TooShort,
    /// 含有模板替换标记（{{、@{ 等），由宿主平台在运行时展开
    TemplateSyntax,
}

/// 分类结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// 是否可翻译
    pub translatable: bool,
    /// 拒绝原因（可翻译时为 None）
    pub reason: Option<FilterReason>,
}

impl Classification {
    fn accept() -> Self {
        Self {
            translatable: true,
            reason: None,
        }
    }

    fn reject(reason: FilterReason) -> Self {
        Self {
            translatable: false,
            reason: Some(reason),
        }
    }
}

/// 文本分类器
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFilter;

impl TextFilter {
    /// 创建新的文本分类器
    pub fn new() -> Self {
        Self
    }

    /// 对候选文本分类
    pub fn classify(&self, text: &str) -> Classification {
        let trimmed = text.trim_matches(WHITESPACES);

        if trimmed.is_empty() {
            return Classification::reject(FilterReason::Empty);
        }

        if trimmed.chars().count() < constants::MIN_TEXT_CHARS {
            return Classification::reject(FilterReason::TooShort);
        }

        if constants::TEMPLATE_MARKERS
            .iter()
            .any(|marker| text.contains(marker))
        {
            return Classification::reject(FilterReason::TemplateSyntax);
        }

        Classification::accept()
    }

    /// 判断文本是否可翻译
    pub fn is_translatable(&self, text: &str) -> bool {
        self.classify(text).translatable
    }
}

/// 便利函数：判断文本是否可翻译
pub fn is_translatable(text: &str) -> bool {
    TextFilter::new().is_translatable(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_and_whitespace() {
        let filter = TextFilter::new();
        assert_eq!(
            filter.classify("").reason,
            Some(FilterReason::Empty)
        );
        assert_eq!(
            filter.classify(" ").reason,
            Some(FilterReason::Empty)
        );
        assert_eq!(
            filter.classify("\n\t  ").reason,
            Some(FilterReason::Empty)
        );
    }

    #[test]
    fn test_rejects_single_character() {
        let filter = TextFilter::new();
        assert_eq!(filter.classify("a").reason, Some(FilterReason::TooShort));
        assert_eq!(
            filter.classify("  x  ").reason,
            Some(FilterReason::TooShort)
        );
    }

    #[test]
    fn test_rejects_template_syntax() {
        let filter = TextFilter::new();
        assert_eq!(
            filter.classify("@{strength}").reason,
            Some(FilterReason::TemplateSyntax)
        );
        assert_eq!(
            filter.classify("Roll {{d6}}").reason,
            Some(FilterReason::TemplateSyntax)
        );
        assert_eq!(
            filter.classify("%{charisma}").reason,
            Some(FilterReason::TemplateSyntax)
        );
        assert_eq!(
            filter.classify("${dex}").reason,
            Some(FilterReason::TemplateSyntax)
        );
        assert_eq!(
            filter.classify("#{will}").reason,
            Some(FilterReason::TemplateSyntax)
        );
    }

    #[test]
    fn test_accepts_language_content() {
        let filter = TextFilter::new();
        assert!(filter.is_translatable("Hi"));
        assert!(filter.is_translatable("Health   Rating"));
        assert!(filter.is_translatable("Wytrzymałość"));
    }

    #[test]
    fn test_classify_is_pure() {
        let filter = TextFilter::new();
        assert_eq!(filter.classify("Damage"), filter.classify("Damage"));
    }
}
