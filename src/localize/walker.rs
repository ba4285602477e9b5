//! DOM遍历器模块
//!
//! 深度优先、先序遍历整棵文档树，对每个元素节点决定跳过、提取
//! 属性还是提取直接文本，并把候选文本交给分类器和标注器处理。
//! 遍历器自身不做任何 DOM 修改，所有写操作都委托给标注器。

use markup5ever_rcdom::{Handle, NodeData, RcDom};
use tracing::debug;

use crate::localize::annotator::{AnnotationOutcome, AnnotationSlot, Annotator};
use crate::localize::config::{constants, LocalizeConfig};
use crate::localize::registry::KeyRegistry;
use crate::parsers::html::dom::get_node_attr;
use crate::parsers::html::utils::WHITESPACES;

/// 遍历统计信息
#[derive(Debug, Clone, Default)]
pub struct WalkStats {
    /// 访问过的元素数
    pub elements_visited: usize,
    /// 因跳过集合而剪掉的子树数
    pub subtrees_skipped: usize,
    /// 发现的非空直接文本片段数
    pub text_runs_seen: usize,
    /// 内容标注写在父元素上的次数
    pub parents_annotated: usize,
    /// 文本片段被包裹的次数
    pub runs_wrapped: usize,
    /// 成功标注的属性槽位数
    pub attributes_annotated: usize,
    /// 被分类器拒绝的候选数
    pub candidates_rejected: usize,
}

impl WalkStats {
    /// 本次遍历写入的标注总数
    pub fn total_annotated(&self) -> usize {
        self.parents_annotated + self.runs_wrapped + self.attributes_annotated
    }

    /// 重置统计
    pub fn reset(&mut self) {
        *self = Default::default();
    }
}

/// 文档树遍历器
///
/// 每次运行构造一个实例；持有配置和标注器（标注器内部持有
/// 分类器和键注册表）。不是线程安全的，也不需要是。
pub struct SheetWalker {
    config: LocalizeConfig,
    annotator: Annotator,
    stats: WalkStats,
}

impl SheetWalker {
    /// 创建新的遍历器
    pub fn new(config: LocalizeConfig) -> Self {
        let annotator = Annotator::new(config.clone());

        Self {
            config,
            annotator,
            stats: WalkStats::default(),
        }
    }

    /// 遍历并标注以 `node` 为根的子树
    pub fn walk(&mut self, dom: &RcDom, node: &Handle) {
        match node.data {
            NodeData::Document => {
                // 文档节点：直接遍历所有子节点
                self.walk_children(dom, node);
            }
            NodeData::Element { ref name, .. } => {
                let tag_name = name.local.as_ref().to_lowercase();
                self.stats.elements_visited += 1;

                if self.config.is_skipped(&tag_name) {
                    self.stats.subtrees_skipped += 1;
                    debug!(tag = %tag_name, "跳过子树");
                    return;
                }

                // 本工具自己产出的包裹元素不再二次处理
                if tag_name == constants::WRAPPER_ELEMENT
                    && get_node_attr(node, constants::CONTENT_ANNOTATION_ATTR).is_some()
                {
                    return;
                }

                self.annotate_attributes(node, &tag_name);
                self.annotate_content(dom, node);
                self.walk_children(dom, node);
            }
            // 注释、doctype 和文本节点不含需要独立处理的内容；
            // 文本由其父元素在 annotate_content 中处理
            _ => {}
        }
    }

    /// 访问遍历统计
    pub fn stats(&self) -> &WalkStats {
        &self.stats
    }

    /// 访问键注册表
    pub fn registry(&self) -> &KeyRegistry {
        self.annotator.registry()
    }

    /// 取出键注册表
    pub fn into_registry(self) -> KeyRegistry {
        self.annotator.into_registry()
    }

    /// 遍历所有元素子节点
    fn walk_children(&mut self, dom: &RcDom, node: &Handle) {
        // 先快照：annotate_content 可能已经改写过子节点列表
        let children: Vec<Handle> = node.children.borrow().iter().cloned().collect();

        for child_node in children {
            if matches!(child_node.data, NodeData::Element { .. }) {
                self.walk(dom, &child_node);
            }
        }
    }

    /// 检查元素的属性槽位
    fn annotate_attributes(&mut self, node: &Handle, tag_name: &str) {
        for slot in AnnotationSlot::ATTRIBUTE_SLOTS {
            let outcome = self.annotator.annotate_attribute(node, *slot);
            self.record(outcome, AnnotationTarget::Attribute);
        }

        // value 只在按钮类元素上承载人类可读文本
        if element_takes_value_slot(node, tag_name) {
            let outcome = self
                .annotator
                .annotate_attribute(node, AnnotationSlot::Value);
            self.record(outcome, AnnotationTarget::Attribute);
        }
    }

    /// 检查元素的直接文本内容
    ///
    /// 恰好一段有效文本且其余子元素都属于保留格式集合时，标注
    /// 写在父元素上；否则逐段包裹可翻译的文本片段。
    fn annotate_content(&mut self, dom: &RcDom, node: &Handle) {
        let mut significant_runs: Vec<(usize, String)> = Vec::new();
        let mut has_blocking_child = false;

        for (index, child_node) in node.children.borrow().iter().enumerate() {
            match child_node.data {
                NodeData::Text { ref contents } => {
                    let text = contents.borrow().to_string();
                    if !text.trim_matches(WHITESPACES).is_empty() {
                        significant_runs.push((index, text));
                    }
                }
                NodeData::Element { ref name, .. } => {
                    if !self.config.is_preserved(name.local.as_ref()) {
                        has_blocking_child = true;
                    }
                }
                _ => {}
            }
        }

        if significant_runs.is_empty() {
            return;
        }
        self.stats.text_runs_seen += significant_runs.len();

        if significant_runs.len() == 1 && !has_blocking_child {
            let (_, raw_text) = &significant_runs[0];
            let outcome = self.annotator.annotate_parent_content(node, raw_text);
            self.record(outcome, AnnotationTarget::Parent);
        } else {
            // 从后往前包裹，避免 splice 之后索引失效
            for (index, raw_text) in significant_runs.iter().rev() {
                let outcome = self.annotator.wrap_text_run(dom, node, *index, raw_text);
                self.record(outcome, AnnotationTarget::Wrapper);
            }
        }
    }

    /// 记录一次标注结果
    fn record(&mut self, outcome: AnnotationOutcome, target: AnnotationTarget) {
        match outcome {
            AnnotationOutcome::Annotated => match target {
                AnnotationTarget::Attribute => self.stats.attributes_annotated += 1,
                AnnotationTarget::Parent => self.stats.parents_annotated += 1,
                AnnotationTarget::Wrapper => self.stats.runs_wrapped += 1,
            },
            AnnotationOutcome::Rejected(_) => self.stats.candidates_rejected += 1,
            AnnotationOutcome::AlreadyAnnotated | AnnotationOutcome::NotApplicable => {}
        }
    }
}

/// 标注写入的位置
#[derive(Debug, Clone, Copy)]
enum AnnotationTarget {
    Attribute,
    Parent,
    Wrapper,
}

/// 判断元素的 value 属性是否承载可翻译文本
fn element_takes_value_slot(node: &Handle, tag_name: &str) -> bool {
    match tag_name {
        "button" => true,
        "input" => get_node_attr(node, "type")
            .map(|input_type| {
                constants::VALUE_TAKING_INPUT_TYPES.contains(&input_type.to_lowercase().as_str())
            })
            .unwrap_or(false),
        _ => false,
    }
}
