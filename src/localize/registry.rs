//! 翻译键注册表模块
//!
//! 为每段去重后的原文分配稳定的查找键。同一段文本在一次运行内
//! 永远得到同一个键；不同文本之间的键冲突通过数字后缀消解。
//! 注册表按首次出现顺序导出为键→原文的 JSON 映射。

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::localize::config::constants;
use crate::localize::error::LocalizeResult;

/// 翻译键注册表
///
/// 每次运行构造一个实例并传入标注器，不使用进程级全局状态。
#[derive(Debug, Clone, Default)]
pub struct KeyRegistry {
    /// 归一化文本 → 已分配的键
    by_text: HashMap<String, String>,
    /// 键 → 原文，保持插入顺序（serde_json 的 preserve_order）
    entries: Map<String, Value>,
}

impl KeyRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 折叠文本内部空白并去掉首尾空白
    pub fn normalize_text(text: &str) -> String {
        text.split_whitespace().collect::<Vec<&str>>().join(" ")
    }

    /// 为文本分配或复用翻译键
    ///
    /// 输入先做空白归一化；逐字节相同的文本必然得到同一个键。
    pub fn intern(&mut self, text: &str) -> String {
        let normalized = Self::normalize_text(text);

        if let Some(existing) = self.by_text.get(&normalized) {
            return existing.clone();
        }

        let stem = Self::derive_key(&normalized);
        let mut key = stem.clone();
        let mut suffix: usize = 2;

        // 同一个 slug 已被其他文本占用时追加数字后缀
        while self.entries.contains_key(&key) {
            key = format!("{stem}-{suffix}");
            suffix += 1;
        }

        self.by_text.insert(normalized.clone(), key.clone());
        self.entries.insert(key.clone(), Value::String(normalized));

        key
    }

    /// 从归一化文本推导候选键（小写 slug）
    fn derive_key(normalized: &str) -> String {
        let mut key = String::with_capacity(normalized.len());
        let mut at_boundary = true;

        for c in normalized.to_lowercase().chars() {
            if c.is_alphanumeric() {
                key.push(c);
                at_boundary = false;
            } else if !at_boundary {
                key.push('-');
                at_boundary = true;
            }
        }

        while key.ends_with('-') {
            key.pop();
        }

        if key.is_empty() {
            constants::FALLBACK_KEY_STEM.to_string()
        } else {
            key
        }
    }

    /// 查询键对应的原文
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    /// 注册表条目数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 注册表是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按首次出现顺序导出为 JSON 对象
    pub fn to_json(&self) -> Value {
        Value::Object(self.entries.clone())
    }

    /// 序列化为带缩进的 JSON 文本（UTF-8，不转义非 ASCII）
    pub fn to_json_string(&self) -> LocalizeResult<String> {
        Ok(serde_json::to_string_pretty(&self.to_json())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_text_reuses_key() {
        let mut registry = KeyRegistry::new();
        let first = registry.intern("Damage");
        let second = registry.intern("Damage");
        assert_eq!(first, "damage");
        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_distinct_texts_never_share_a_key() {
        let mut registry = KeyRegistry::new();
        let a = registry.intern("Damage");
        let b = registry.intern("damage!");
        assert_eq!(a, "damage");
        assert_eq!(b, "damage-2");
        assert_eq!(registry.get("damage"), Some("Damage"));
        assert_eq!(registry.get("damage-2"), Some("damage!"));
    }

    #[test]
    fn test_collision_suffix_keeps_climbing() {
        let mut registry = KeyRegistry::new();
        registry.intern("Spell Name");
        registry.intern("Spell name");
        let third = registry.intern("spell NAME");
        assert_eq!(third, "spell-name-3");
    }

    #[test]
    fn test_interior_whitespace_is_normalized() {
        let mut registry = KeyRegistry::new();
        let key = registry.intern("Health   Rating");
        assert_eq!(key, "health-rating");
        assert_eq!(registry.get(&key), Some("Health Rating"));
    }

    #[test]
    fn test_non_ascii_letters_survive_slugging() {
        let mut registry = KeyRegistry::new();
        let key = registry.intern("Wytrzymałość");
        assert_eq!(key, "wytrzymałość");
    }

    #[test]
    fn test_symbol_only_text_falls_back() {
        let mut registry = KeyRegistry::new();
        let key = registry.intern("++");
        assert_eq!(key, "entry");
        let next = registry.intern("--");
        assert_eq!(next, "entry-2");
    }

    #[test]
    fn test_export_preserves_insertion_order() {
        let mut registry = KeyRegistry::new();
        registry.intern("Zeta");
        registry.intern("Alpha");
        registry.intern("Middle");

        let json = registry.to_json();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "middle"]);
    }
}
