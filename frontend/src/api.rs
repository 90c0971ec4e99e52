//! API 客户端模块
//!
//! 持有固定 base URL 与 JSON 协商头的共享客户端，出入站各有一个拦截点：
//! - 出站：目前透传，预留附加认证头之类横切关注点的扩展位
//! - 入站：把状态码映射为 [`ApiError`] 的语义分类，
//!   422 解包为结构化校验错误而不是笼统的传输错误

use crate::error::ApiError;
use crate::web::http::{FetchTransport, HttpRequest, HttpResponse, HttpTransport};
use serde::de::DeserializeOwned;
use snaplink_shared::ValidationErrors;
use snaplink_shared::protocol::{ApiRequest, HttpMethod};

/// 编译期未注入 API_URL 时的本地默认后端
const DEFAULT_API_URL: &str = "http://localhost:8000";

/// 环境提供的 API base URL（构建时注入）
pub fn api_base_url() -> String {
    option_env!("API_URL").unwrap_or(DEFAULT_API_URL).to_string()
}

/// 共享 API 客户端
#[derive(Debug, Clone)]
pub struct ApiClient<C: HttpTransport = FetchTransport> {
    base_url: String,
    transport: C,
}

impl ApiClient {
    /// 使用环境配置的 base URL 与浏览器 fetch 传输
    pub fn from_env() -> Self {
        Self::with_transport(api_base_url(), FetchTransport)
    }
}

impl<C: HttpTransport> ApiClient<C> {
    pub fn with_transport(base_url: impl Into<String>, transport: C) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, transport }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 出站拦截点：目前透传
    fn before_send(&self, req: HttpRequest) -> HttpRequest {
        req
    }

    /// 入站拦截点：把状态码映射为语义化错误
    fn intercept(&self, resp: HttpResponse) -> Result<String, ApiError> {
        if resp.ok() {
            return Ok(resp.body);
        }
        let err = match resp.status {
            422 => match serde_json::from_str::<ValidationErrors>(&resp.body) {
                Ok(errors) => ApiError::Validation(errors),
                Err(e) => ApiError::Parse(e.to_string()),
            },
            404 => ApiError::NotFound,
            410 => ApiError::Gone,
            status => ApiError::Server { status },
        };
        log_error(&err);
        Err(err)
    }

    /// 发起一次原始调用，成功时返回原始响应体
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&str>,
    ) -> Result<String, ApiError> {
        let mut req = HttpRequest::new(self.url(path), method)
            .with_header("Content-Type", "application/json")
            .with_header("Accept", "application/json");
        if let Some(body) = body {
            req = req.with_body(body);
        }

        let req = self.before_send(req);
        let resp = self.transport.send(req).await.map_err(|e| {
            let err = ApiError::from(e);
            log_error(&err);
            err
        })?;
        self.intercept(resp)
    }

    /// 按类型化端点发起调用
    pub async fn send<R: ApiRequest>(&self, request: &R) -> Result<R::Response, ApiError> {
        let body = request.body();
        let text = self
            .request(R::METHOD, &request.path(), body.as_deref())
            .await?;
        decode_payload(&text)
    }
}

/// 解析响应体；空体按 JSON null 处理（覆盖删除成功的空响应）
pub fn decode_payload<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    let text = text.trim();
    let text = if text.is_empty() { "null" } else { text };
    serde_json::from_str(text).map_err(|e| ApiError::Parse(e.to_string()))
}

/// 错误统一打到浏览器控制台；非 wasm 环境（测试）下静默
fn log_error(err: &ApiError) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&format!("[Api] {}", err).into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = err;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::http::MockTransport;
    use snaplink_shared::protocol::{DeleteUrl, ListUrls};
    use std::rc::Rc;

    fn client_with(transport: &Rc<MockTransport>) -> ApiClient<Rc<MockTransport>> {
        ApiClient::with_transport("http://api.test/", Rc::clone(transport))
    }

    #[tokio::test]
    async fn test_request_joins_base_url_and_sets_json_headers() {
        let transport = Rc::new(MockTransport::new());
        transport.push_response(200, "{}");
        let client = client_with(&transport);

        client.request(HttpMethod::Get, "/urls", None).await.unwrap();

        let requests = transport.requests.borrow();
        assert_eq!(requests.len(), 1);
        // base URL 的尾部斜杠在构造时被归一化
        assert_eq!(requests[0].url, "http://api.test/urls");
        assert!(requests[0]
            .headers
            .contains(&("Content-Type".to_string(), "application/json".to_string())));
        assert!(requests[0]
            .headers
            .contains(&("Accept".to_string(), "application/json".to_string())));
    }

    #[tokio::test]
    async fn test_unprocessable_unwraps_validation_payload() {
        let transport = Rc::new(MockTransport::new());
        transport.push_response(
            422,
            r#"{"message":"The given data was invalid.","errors":{"url":["The url field is required."]}}"#,
        );
        let client = client_with(&transport);

        let err = client
            .request(HttpMethod::Post, "/urls", Some("{}"))
            .await
            .unwrap_err();

        let errors = err.validation().expect("校验错误应携带结构化内容");
        assert_eq!(errors.errors["url"], vec!["The url field is required."]);
        assert_eq!(err.to_string(), "The url field is required.");
    }

    #[tokio::test]
    async fn test_status_classes_map_to_semantic_errors() {
        let transport = Rc::new(MockTransport::new());
        transport.push_response(404, "");
        transport.push_response(410, "");
        transport.push_response(500, "boom");
        let client = client_with(&transport);

        let not_found = client.request(HttpMethod::Get, "/missing", None).await;
        let gone = client.request(HttpMethod::Get, "/expired", None).await;
        let server = client.request(HttpMethod::Get, "/urls", None).await;

        assert_eq!(not_found.unwrap_err(), ApiError::NotFound);
        assert_eq!(gone.unwrap_err(), ApiError::Gone);
        assert_eq!(server.unwrap_err(), ApiError::Server { status: 500 });
    }

    #[tokio::test]
    async fn test_typed_send_decodes_envelope() {
        let transport = Rc::new(MockTransport::new());
        transport.push_response(200, r#"{"data":[]}"#);
        let client = client_with(&transport);

        let resp = client.send(&ListUrls).await.unwrap();
        assert!(resp.data.is_empty());
    }

    #[tokio::test]
    async fn test_empty_success_body_decodes_as_unit() {
        let transport = Rc::new(MockTransport::new());
        transport.push_response(204, "");
        let client = client_with(&transport);

        client.send(&DeleteUrl { id: "3".to_string() }).await.unwrap();
    }

    #[test]
    fn test_decode_payload_treats_blank_as_null() {
        decode_payload::<()>("").unwrap();
        decode_payload::<()>("  \n").unwrap();
        assert_eq!(decode_payload::<Option<u32>>("").unwrap(), None);
        assert_eq!(decode_payload::<u32>("7").unwrap(), 7);
    }
}
