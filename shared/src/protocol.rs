//! API 端点协议定义
//!
//! 每个后端端点对应一个实现了 [`ApiRequest`] 的请求类型，
//! 把方法、路径、请求体与响应类型绑定在一起，
//! 供前端客户端按类型发起请求。

use crate::{CreateUrlRequest, ListUrlsResponse, ResolveCodeResponse, ShortUrl, ShowUrlResponse};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP 请求方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// 是否为只读请求（决定资源 hook 是否允许自动触发）
    pub fn is_read(&self) -> bool {
        matches!(self, HttpMethod::Get)
    }

    /// 该方法是否携带请求体
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post)
    }
}

/// 定义请求-响应关系与端点元数据的 trait
///
/// 路径是方法而不是常量：本服务的多数端点在路径中携带 id 或短码。
pub trait ApiRequest: Serialize {
    /// 该请求的响应类型
    type Response: DeserializeOwned;
    /// HTTP 方法
    const METHOD: HttpMethod;
    /// 相对 base URL 的请求路径
    fn path(&self) -> String;
    /// JSON 请求体；只读方法默认不携带
    fn body(&self) -> Option<String> {
        if Self::METHOD.has_body() {
            serde_json::to_string(self).ok()
        } else {
            None
        }
    }
}

// =========================================================
// Request Definitions
// =========================================================

/// 列出全部短链
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListUrls;

impl ApiRequest for ListUrls {
    type Response = ListUrlsResponse;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/urls".to_string()
    }
}

/// 创建短链（请求体类型定义在 lib.rs）
impl ApiRequest for CreateUrlRequest {
    type Response = ShortUrl;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/urls".to_string()
    }
}

/// 按 id 查询单条短链
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUrl {
    pub id: String,
}

impl ApiRequest for GetUrl {
    type Response = ShowUrlResponse;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/urls/{}", self.id)
    }
}

/// 按 id 删除短链；成功响应为空体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteUrl {
    pub id: String,
}

impl ApiRequest for DeleteUrl {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/urls/{}", self.id)
    }
}

/// 按短码解析原始地址
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveCode {
    pub code: String,
}

impl ApiRequest for ResolveCode {
    type Response = ResolveCodeResponse;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/{}", self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(ListUrls.path(), "/urls");
        assert_eq!(GetUrl { id: "9".to_string() }.path(), "/urls/9");
        assert_eq!(DeleteUrl { id: "9".to_string() }.path(), "/urls/9");
        assert_eq!(ResolveCode { code: "xK9mQ2".to_string() }.path(), "/xK9mQ2");
    }

    #[test]
    fn test_read_endpoints_have_no_body() {
        assert_eq!(ListUrls.body(), None);
        assert_eq!(ResolveCode { code: "a1b2c3".to_string() }.body(), None);
        assert_eq!(DeleteUrl { id: "9".to_string() }.body(), None);
    }

    #[test]
    fn test_create_body_is_json() {
        let req = CreateUrlRequest {
            url: "https://example.com".to_string(),
            expires_at: None,
        };
        let body = req.body().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed["url"], "https://example.com");
        assert!(parsed["expires_at"].is_null());
    }

    #[test]
    fn test_method_semantics() {
        assert!(HttpMethod::Get.is_read());
        assert!(!HttpMethod::Post.is_read());
        assert!(!HttpMethod::Delete.is_read());
        assert!(HttpMethod::Post.has_body());
        assert!(!HttpMethod::Delete.has_body());
    }
}
