//! 本地化模块统一错误处理
//!
//! 提供结构化错误类型和错误处理机制

use thiserror::Error;

/// 本地化错误类型
#[derive(Error, Debug)]
pub enum LocalizeError {
    /// 配置错误
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// 未知编码
    #[error("unknown encoding \"{0}\"")]
    UnknownEncoding(String),

    /// 映射文件序列化错误
    #[error("failed to serialize key mapping: {0}")]
    MappingSerialization(#[from] serde_json::Error),
}

/// 本地化操作结果类型
pub type LocalizeResult<T> = Result<T, LocalizeError>;
