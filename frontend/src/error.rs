//! 应用层错误模块
//!
//! 把传输层错误与 HTTP 状态语义统一为一个错误枚举，
//! 每个变体对应一类用户可见的处理方式：
//! 校验错误内联在表单、NotFound/Gone 有专属文案、其余走通用提示。

use crate::web::http::HttpError;
use snaplink_shared::ValidationErrors;
use std::fmt;

/// API 调用错误
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 网络或传输失败
    Network(String),
    /// 响应体解析失败
    Parse(String),
    /// 422: 按字段组织的校验错误
    Validation(ValidationErrors),
    /// 404: 资源不存在
    NotFound,
    /// 410: 资源已过期
    Gone,
    /// 其他非 2xx 响应
    Server { status: u16 },
    /// 本次调用已被更新的调用取代，结果被丢弃
    Superseded,
}

impl ApiError {
    /// 对应的 HTTP 状态码（传输层失败没有状态码）
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Validation(_) => Some(422),
            ApiError::NotFound => Some(404),
            ApiError::Gone => Some(410),
            ApiError::Server { status } => Some(*status),
            _ => None,
        }
    }

    /// 校验类错误的结构化内容（表单据此内联展示）
    pub fn validation(&self) -> Option<&ValidationErrors> {
        match self {
            ApiError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Parse(msg) => write!(f, "Invalid response: {}", msg),
            ApiError::Validation(errors) => write!(f, "{}", errors.joined()),
            ApiError::NotFound => write!(f, "Resource not found"),
            ApiError::Gone => write!(f, "Resource expired"),
            ApiError::Server { status } => write!(f, "Request failed with status {}", status),
            ApiError::Superseded => write!(f, "Request superseded by a newer call"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<HttpError> for ApiError {
    fn from(e: HttpError) -> Self {
        ApiError::Network(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::NotFound.status(), Some(404));
        assert_eq!(ApiError::Gone.status(), Some(410));
        assert_eq!(ApiError::Server { status: 503 }.status(), Some(503));
        assert_eq!(ApiError::Validation(ValidationErrors::default()).status(), Some(422));
        assert_eq!(ApiError::Network("refused".to_string()).status(), None);
        assert_eq!(ApiError::Superseded.status(), None);
    }

    #[test]
    fn test_validation_display_joins_field_messages() {
        let mut errors = BTreeMap::new();
        errors.insert(
            "url".to_string(),
            vec!["The url field is required.".to_string()],
        );
        let err = ApiError::Validation(ValidationErrors {
            message: None,
            errors,
        });
        assert_eq!(err.to_string(), "The url field is required.");
        assert!(err.validation().is_some());
        assert!(ApiError::NotFound.validation().is_none());
    }

    #[test]
    fn test_transport_errors_become_network_class() {
        let err = ApiError::from(HttpError::NetworkError("connection refused".to_string()));
        assert_eq!(
            err,
            ApiError::Network("network error: connection refused".to_string())
        );
    }
}
