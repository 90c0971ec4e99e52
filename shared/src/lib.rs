//! snaplink 共享数据模型
//!
//! 定义前端与短链后端 API 之间的领域模型与传输结构：
//! - 领域模型：`ShortUrl` 及其派生的过期判断
//! - 传输结构：请求体与各端点的响应信封
//! - `protocol`: 类型化的端点定义
//! - `date`: 过期预设与时间工具
//!
//! 纯数据层，不依赖 DOM 或任何网络实现。

pub mod date;
pub mod protocol;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 一条短链记录，由后端返回
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortUrl {
    /// 后端分配的唯一标识
    pub id: String,
    /// 原始长链接
    pub original_url: String,
    /// 完整的跳转地址（含域名）
    pub short_url: String,
    /// 唯一标识该短链的路径段
    pub short_code: String,
    /// 点击计数，仅由后端累加
    pub clicks: u64,
    pub created_at: DateTime<Utc>,
    /// `None` 表示永不过期
    pub expires_at: Option<DateTime<Utc>>,
}

impl ShortUrl {
    /// 判断该短链在 `now` 时刻是否已过期
    ///
    /// 派生值：每次渲染时重新计算，从不持久化。
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        date::is_expired(self.expires_at, now)
    }
}

/// 创建短链的请求体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateUrlRequest {
    pub url: String,
    /// `None` 序列化为 null，表示永不过期
    pub expires_at: Option<DateTime<Utc>>,
}

// =========================================================
// 响应信封 (Response Envelopes)
// =========================================================

/// `GET /urls` 的响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListUrlsResponse {
    pub data: Vec<ShortUrl>,
}

/// `GET /urls/{id}` 的响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowUrlResponse {
    pub success: bool,
    pub data: ShortUrl,
}

/// `GET /{code}` 的响应
///
/// `original_url` 允许缺失（按空字符串处理），
/// 由调用方决定空目标如何呈现。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolveCodeResponse {
    pub success: bool,
    #[serde(default)]
    pub original_url: String,
}

// =========================================================
// 校验错误 (Validation Errors)
// =========================================================

/// 422 响应体：按字段组织的校验错误
///
/// 使用 `BTreeMap` 保证字段遍历顺序稳定。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidationErrors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// 将所有字段的错误消息拼接为一条展示用字符串
    ///
    /// 字段内消息保持后端给出的顺序；字段间按字段名排序。
    /// 没有任何字段消息时退回整体 message。
    pub fn joined(&self) -> String {
        let msgs: Vec<&str> = self
            .errors
            .values()
            .flatten()
            .map(String::as_str)
            .collect();
        if msgs.is_empty() {
            self.message.clone().unwrap_or_else(|| "Validation failed".to_string())
        } else {
            msgs.join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_url() -> ShortUrl {
        ShortUrl {
            id: "7".to_string(),
            original_url: "https://example.com/very/long/path".to_string(),
            short_url: "https://sho.rt/Ab3xYz".to_string(),
            short_code: "Ab3xYz".to_string(),
            clicks: 42,
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
            expires_at: None,
        }
    }

    #[test]
    fn test_short_url_roundtrip() {
        let url = sample_url();
        let json = serde_json::to_string(&url).unwrap();
        let back: ShortUrl = serde_json::from_str(&json).unwrap();
        assert_eq!(back, url);
    }

    #[test]
    fn test_short_url_parses_wire_format() {
        // 后端的典型输出：RFC 3339 时间戳，expires_at 可为 null
        let json = r#"{
            "id": "12",
            "original_url": "https://example.com",
            "short_url": "https://sho.rt/xK9mQ2",
            "short_code": "xK9mQ2",
            "clicks": 0,
            "created_at": "2025-06-01T12:00:00.000000Z",
            "expires_at": null
        }"#;
        let url: ShortUrl = serde_json::from_str(json).unwrap();
        assert_eq!(url.short_code, "xK9mQ2");
        assert!(url.expires_at.is_none());
    }

    #[test]
    fn test_create_request_serializes_null_expiry() {
        let req = CreateUrlRequest {
            url: "https://example.com".to_string(),
            expires_at: None,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains(r#""expires_at":null"#));
    }

    #[test]
    fn test_resolve_response_tolerates_missing_target() {
        let resp: ResolveCodeResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(resp.original_url.is_empty());
    }

    #[test]
    fn test_validation_errors_joined() {
        let json = r#"{
            "message": "The given data was invalid.",
            "errors": {
                "url": ["The url field is required.", "The url must be a valid URL."],
                "expires_at": ["The expires at must be a date after now."]
            }
        }"#;
        let errors: ValidationErrors = serde_json::from_str(json).unwrap();
        // BTreeMap: expires_at 在 url 之前
        assert_eq!(
            errors.joined(),
            "The expires at must be a date after now., The url field is required., The url must be a valid URL."
        );
    }

    #[test]
    fn test_validation_errors_fall_back_to_message() {
        let errors: ValidationErrors =
            serde_json::from_str(r#"{"message":"The given data was invalid."}"#).unwrap();
        assert_eq!(errors.joined(), "The given data was invalid.");
    }
}
