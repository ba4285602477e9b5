//! 本地化配置管理模块
//!
//! 提供标注流程的类型化配置：跳过标签集合、保留格式标签集合、
//! 属性保留开关，以及启动时的一次性校验。

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::localize::error::{LocalizeError, LocalizeResult};

/// 本地化配置常量
pub mod constants {
    /// 不进入、不提取的标签
    pub const SKIP_TAGS: &[&str] = &["script", "style", "br", "hr", "meta", "link"];

    /// 不影响父元素叶子判定的格式化标签
    pub const PRESERVE_TAGS: &[&str] = &[
        "b", "i", "em", "strong", "u", "sub", "sup", "br", "hr", "wbr",
    ];

    /// 可翻译的属性槽位（value 单独处理）
    pub const TRANSLATABLE_ATTRS: &[&str] = &[
        "title",
        "placeholder",
        "alt",
        "aria-label",
        "aria-description",
    ];

    /// value 属性参与翻译的 input 类型
    pub const VALUE_TAKING_INPUT_TYPES: &[&str] = &["button", "submit", "reset"];

    /// 宿主平台的模板替换标记，含有这些子串的文本不参与翻译
    pub const TEMPLATE_MARKERS: &[&str] = &["{{", "@{", "%{", "${", "#{"];

    /// 参与翻译的最小字符数（trim 之后）
    pub const MIN_TEXT_CHARS: usize = 2;

    /// 内容标注使用的属性名
    pub const CONTENT_ANNOTATION_ATTR: &str = "i18n";

    /// 属性槽位标注的前缀（i18n-title、i18n-alt 等）
    pub const ANNOTATION_ATTR_PREFIX: &str = "i18n-";

    /// 包裹文本片段时使用的行内元素
    pub const WRAPPER_ELEMENT: &str = "span";

    /// slug 为空时的后备键干
    pub const FALLBACK_KEY_STEM: &str = "entry";
}

/// 本地化配置
///
/// 每次运行构造一次，运行期间只读。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalizeConfig {
    /// 跳过的标签集合
    pub skip_tags: HashSet<String>,
    /// 保留格式的标签集合
    pub preserve_tags: HashSet<String>,
    /// 标注后保留原始属性
    pub keep_original_attributes: bool,
}

impl Default for LocalizeConfig {
    fn default() -> Self {
        Self {
            skip_tags: constants::SKIP_TAGS.iter().map(|s| s.to_string()).collect(),
            preserve_tags: constants::PRESERVE_TAGS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            keep_original_attributes: false,
        }
    }
}

impl LocalizeConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 在默认集合之外追加跳过标签
    pub fn add_skip_tags<I>(&mut self, tags: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.skip_tags
            .extend(tags.into_iter().map(|tag| tag.to_lowercase()));
    }

    /// 在默认集合之外追加保留格式标签
    pub fn add_preserve_tags<I>(&mut self, tags: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.preserve_tags
            .extend(tags.into_iter().map(|tag| tag.to_lowercase()));
    }

    /// 检查标签是否应整体跳过
    pub fn is_skipped(&self, tag_name: &str) -> bool {
        self.skip_tags.contains(&tag_name.to_lowercase())
    }

    /// 检查标签是否为保留格式标签
    pub fn is_preserved(&self, tag_name: &str) -> bool {
        self.preserve_tags.contains(&tag_name.to_lowercase())
    }

    /// 校验配置（启动时调用一次）
    pub fn validate(&self) -> LocalizeResult<()> {
        for tag in self.skip_tags.iter().chain(self.preserve_tags.iter()) {
            if tag.is_empty() {
                return Err(LocalizeError::InvalidConfig(
                    "tag names must not be empty".to_string(),
                ));
            }
            if !tag
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
            {
                return Err(LocalizeError::InvalidConfig(format!(
                    "invalid tag name \"{tag}\""
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(LocalizeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_tag_lookup_is_case_insensitive() {
        let config = LocalizeConfig::default();
        assert!(config.is_skipped("SCRIPT"));
        assert!(config.is_preserved("Strong"));
        assert!(!config.is_skipped("div"));
    }

    #[test]
    fn test_extra_tags_are_lowercased() {
        let mut config = LocalizeConfig::default();
        config.add_skip_tags(vec!["TEXTAREA".to_string()]);
        assert!(config.is_skipped("textarea"));
    }

    #[test]
    fn test_invalid_tag_name_rejected() {
        let mut config = LocalizeConfig::default();
        config.skip_tags.insert("not a tag".to_string());
        assert!(config.validate().is_err());
    }
}
