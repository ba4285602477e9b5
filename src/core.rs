use std::error::Error;
use std::fmt;

use encoding_rs::Encoding;
use markup5ever_rcdom::RcDom;
use tracing::{debug, info};

use crate::localize::error::LocalizeError;
use crate::localize::walker::WalkStats;
use crate::localize::{annotate_dom, LocalizeConfig};
use crate::parsers::html::{
    create_metadata_comment, get_charset, get_title, html_to_dom, serialize_document, set_charset,
};

/// Represents errors that can occur during sheetloc processing
///
/// This error type encapsulates all possible errors that can occur
/// when annotating a document with the sheetloc library.
#[derive(Debug)]
pub struct SheetlocError {
    details: String,
}

impl SheetlocError {
    /// Creates a new SheetlocError with the given message
    pub fn new(msg: &str) -> SheetlocError {
        SheetlocError {
            details: msg.to_string(),
        }
    }
}

impl fmt::Display for SheetlocError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.details)
    }
}

impl Error for SheetlocError {
    fn description(&self) -> &str {
        &self.details
    }
}

impl From<LocalizeError> for SheetlocError {
    fn from(err: LocalizeError) -> Self {
        SheetlocError::new(&err.to_string())
    }
}

/// Configuration options for sheetloc processing
///
/// This struct contains all the configuration options that control
/// how a document is annotated and serialized.
#[derive(Debug, Default, Clone)]
pub struct SheetlocOptions {
    pub encoding: Option<String>,
    pub keep_original_attributes: bool,
    pub no_metadata: bool,
    pub preserve_tags: Vec<String>,
    pub silent: bool,
    pub skip_tags: Vec<String>,
}

/// 一次完整标注运行的产出
#[derive(Debug)]
pub struct LocalizedDocument {
    /// 标注后的文档字节
    pub html: Vec<u8>,
    /// 键→原文映射（JSON 文本，按首次出现顺序）
    pub mapping_json: String,
    /// 注册的翻译键数量
    pub key_count: usize,
    /// 文档标题（若有）
    pub title: Option<String>,
    /// 遍历统计
    pub stats: WalkStats,
}

const ANSI_COLOR_RED: &str = "\x1b[31m";
const ANSI_COLOR_RESET: &str = "\x1b[0m";

/// Annotates a character-sheet document from raw data
///
/// # Arguments
///
/// * `options` - Processing options
/// * `input_data` - Raw HTML data as bytes
/// * `input_encoding` - Optional character encoding (defaults to UTF-8)
/// * `input_name` - Optional source name used in the metadata comment
///
/// # Returns
///
/// Returns the annotated document, the key/text mapping and run statistics,
/// or an error if processing fails.
pub fn localize_document_from_data(
    options: &SheetlocOptions,
    input_data: Vec<u8>,
    input_encoding: Option<String>,
    input_name: Option<String>,
) -> Result<LocalizedDocument, SheetlocError> {
    let processor = DocumentProcessor::new(options.clone());
    processor.process_document(input_data, input_encoding, input_name)
}

/// Parses Content-Type header value
pub fn parse_content_type(content_type: &str) -> (String, String, bool) {
    let mut media_type = String::new();
    let mut charset = String::new();
    let mut is_base64 = false;

    let parts: Vec<&str> = content_type.split(';').collect();

    if !parts.is_empty() {
        media_type = parts[0].trim().to_lowercase();
    }

    for part in parts.iter().skip(1) {
        let part = part.trim();
        if part.starts_with("charset=") {
            charset = part[8..].trim_matches('"').to_string();
        } else if part == "base64" {
            is_base64 = true;
        }
    }

    (media_type, charset, is_base64)
}

/// Prints an error message to stderr
pub fn print_error_message(msg: &str) {
    eprintln!("{ANSI_COLOR_RED}{msg}{ANSI_COLOR_RESET}");
}

/// Prints an info message to stdout
pub fn print_info_message(msg: &str) {
    println!("{msg}");
}

/// 文档处理器，负责协调整个标注流程
pub struct DocumentProcessor {
    options: SheetlocOptions,
}

impl DocumentProcessor {
    pub fn new(options: SheetlocOptions) -> Self {
        Self { options }
    }

    /// 处理文档数据并返回最终结果
    pub fn process_document(
        self,
        input_data: Vec<u8>,
        input_encoding: Option<String>,
        input_name: Option<String>,
    ) -> Result<LocalizedDocument, SheetlocError> {
        // 1. 验证配置
        let encoding_validator = EncodingValidator::new();
        encoding_validator.validate_options(&self.options)?;

        let localize_config = self.build_localize_config()?;

        // 2. 解析文档并确定编码
        let encoding_processor = EncodingProcessor::new();
        let (dom, document_encoding) =
            encoding_processor.process_encoding(&input_data, input_encoding)?;

        let document_title = get_title(&dom.document);

        // 3. 遍历DOM并写入标注
        let (registry, stats) = annotate_dom(&dom, localize_config);
        info!(
            keys = registry.len(),
            annotations = stats.total_annotated(),
            "annotation pass complete"
        );

        // 4. 处理自定义编码
        let (dom, final_encoding) = self.process_custom_encoding(dom, document_encoding)?;

        // 5. 导出键映射
        let mapping_json = registry.to_json_string().map_err(SheetlocError::from)?;

        // 6. 序列化并格式化输出
        let output_formatter = OutputFormatter::new(&self.options, &input_name);
        let html = output_formatter.format_output(dom, final_encoding);

        Ok(LocalizedDocument {
            html,
            mapping_json,
            key_count: registry.len(),
            title: document_title,
            stats,
        })
    }

    /// 由处理选项构造本地化配置
    fn build_localize_config(&self) -> Result<LocalizeConfig, SheetlocError> {
        let mut config = LocalizeConfig {
            keep_original_attributes: self.options.keep_original_attributes,
            ..Default::default()
        };
        config.add_skip_tags(self.options.skip_tags.iter().cloned());
        config.add_preserve_tags(self.options.preserve_tags.iter().cloned());
        config.validate()?;

        Ok(config)
    }

    fn process_custom_encoding(
        &self,
        dom: RcDom,
        document_encoding: String,
    ) -> Result<(RcDom, String), SheetlocError> {
        if let Some(custom_encoding) = self.options.encoding.clone() {
            let new_dom = set_charset(dom, custom_encoding.clone());
            Ok((new_dom, custom_encoding))
        } else {
            Ok((dom, document_encoding))
        }
    }
}

/// 编码验证器
pub struct EncodingValidator;

impl EncodingValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate_options(&self, options: &SheetlocOptions) -> Result<(), SheetlocError> {
        if let Some(custom_output_encoding) = &options.encoding {
            if Encoding::for_label_no_replacement(custom_output_encoding.as_bytes()).is_none() {
                return Err(SheetlocError::new(&format!(
                    "unknown encoding \"{}\"",
                    custom_output_encoding
                )));
            }
        }
        Ok(())
    }
}

impl Default for EncodingValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// 编码处理器
pub struct EncodingProcessor;

impl EncodingProcessor {
    pub fn new() -> Self {
        Self
    }

    pub fn process_encoding(
        &self,
        input_data: &[u8],
        input_encoding: Option<String>,
    ) -> Result<(RcDom, String), SheetlocError> {
        let mut document_encoding = input_encoding.unwrap_or_else(|| "utf-8".to_string());

        // 初始解析
        let mut dom = html_to_dom(input_data, document_encoding.clone());

        // 尝试确定文档自己声明的编码
        if let Some(html_charset) = get_charset(&dom.document) {
            if !html_charset.is_empty() {
                // 检查HTML内部指定的字符集是否有效
                if let Some(document_charset) =
                    Encoding::for_label_no_replacement(html_charset.as_bytes())
                {
                    debug!(charset = %html_charset, "re-parsing with declared charset");
                    document_encoding = html_charset;
                    dom = html_to_dom(input_data, document_charset.name().to_string());
                }
            }
        }

        Ok((dom, document_encoding))
    }
}

impl Default for EncodingProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// 输出格式化器
pub struct OutputFormatter<'a> {
    options: &'a SheetlocOptions,
    input_name: &'a Option<String>,
}

impl<'a> OutputFormatter<'a> {
    pub fn new(options: &'a SheetlocOptions, input_name: &'a Option<String>) -> Self {
        Self {
            options,
            input_name,
        }
    }

    pub fn format_output(&self, dom: RcDom, document_encoding: String) -> Vec<u8> {
        let mut result = serialize_document(dom, document_encoding);

        self.prepend_metadata_if_needed(&mut result);
        self.ensure_trailing_newline(&mut result);

        result
    }

    fn prepend_metadata_if_needed(&self, result: &mut Vec<u8>) {
        if !self.options.no_metadata {
            let mut metadata_comment = create_metadata_comment(self.input_name.as_deref());
            metadata_comment.push('\n');
            result.splice(0..0, metadata_comment.as_bytes().to_vec());
        }
    }

    fn ensure_trailing_newline(&self, result: &mut Vec<u8>) {
        if result.last() != Some(&b'\n') {
            result.extend_from_slice(b"\n");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheetloc_error_new() {
        let error = SheetlocError::new("test error");
        assert_eq!(error.details, "test error");
    }

    #[test]
    fn test_sheetloc_error_display() {
        let error = SheetlocError::new("test error");
        assert_eq!(format!("{}", error), "test error");
    }

    #[test]
    fn test_parse_content_type_basic() {
        let (media_type, charset, is_base64) = parse_content_type("text/html");
        assert_eq!(media_type, "text/html");
        assert_eq!(charset, "");
        assert!(!is_base64);
    }

    #[test]
    fn test_parse_content_type_with_charset() {
        let (media_type, charset, is_base64) = parse_content_type("text/html; charset=utf-8");
        assert_eq!(media_type, "text/html");
        assert_eq!(charset, "utf-8");
        assert!(!is_base64);
    }

    #[test]
    fn test_parse_content_type_complex() {
        let (media_type, charset, is_base64) =
            parse_content_type("text/html; charset=\"utf-8\"; boundary=something");
        assert_eq!(media_type, "text/html");
        assert_eq!(charset, "utf-8");
        assert!(!is_base64);
    }

    #[test]
    fn test_unknown_encoding_rejected() {
        let options = SheetlocOptions {
            encoding: Some("definitely-not-an-encoding".to_string()),
            ..Default::default()
        };
        let result = localize_document_from_data(&options, b"<html></html>".to_vec(), None, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_minimal_document_round_trip() {
        let options = SheetlocOptions {
            no_metadata: true,
            ..Default::default()
        };
        let result = localize_document_from_data(
            &options,
            b"<html><body><span>Damage</span></body></html>".to_vec(),
            None,
            None,
        )
        .unwrap();

        let html = String::from_utf8(result.html).unwrap();
        assert!(html.contains("i18n=\"damage\""));
        assert_eq!(result.key_count, 1);
    }
}
