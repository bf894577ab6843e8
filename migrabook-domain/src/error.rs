//! 统一错误类型定义

use serde::Serialize;
use thiserror::Error;

/// Errors raised below the verifier boundary.
///
/// [`DomainVerifier`](crate::DomainVerifier) never returns these to its caller;
/// they are absorbed into the verification results. They surface directly from
/// the DoH client, the NS walk and configuration loading.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum DomainError {
    /// 输入校验错误
    #[error("Validation error: {0}")]
    Validation(String),

    /// 配置错误
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection refused, TLS failure, resolver host unreachable, etc.
    #[error("Network error: {0}")]
    Network(String),

    /// The DoH request exceeded the configured timeout.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The DoH endpoint answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Http {
        /// Status code returned by the resolver.
        status: u16,
        /// Response body, truncated for logging.
        body: String,
    },

    /// 响应解析错误
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Whether the error came from the transport rather than from the caller's input.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Timeout(_) | Self::Http { .. } | Self::Parse(_)
        )
    }
}

/// Result 类型别名
pub type DomainResult<T> = std::result::Result<T, DomainError>;
