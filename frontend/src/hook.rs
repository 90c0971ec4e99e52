//! 通用资源 hook 模块
//!
//! 把一次 HTTP 调用包装为统一的状态容器 (`data` / `loading` / `error`)，
//! 暴露 `execute` / `refetch` / `reset` 三个操作；
//! 只读请求可在首次挂载时自动触发，变更类请求只能由用户动作显式触发。
//!
//! 并发约定：每次 `execute` 带有单调递增的序号，只有仍是最新序号的
//! 完成结果才会写入状态（last write wins）；过期结果不触碰状态与回调，
//! 以 [`ApiError::Superseded`] 返回。视图卸载后信号写入是 no-op，
//! 因此迟到的响应不会污染已离开的视图。

use crate::api::{ApiClient, decode_payload};
use crate::error::ApiError;
use crate::web::http::{FetchTransport, HttpTransport};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;
use snaplink_shared::protocol::{ApiRequest, HttpMethod};

// =========================================================
// 构造配置 (Options)
// =========================================================

/// hook 的构造配置
pub struct UseApiOptions<T: Send + Sync + 'static> {
    method: HttpMethod,
    path: String,
    body: Option<String>,
    auto_fire: bool,
    on_success: Option<Callback<T>>,
    on_error: Option<Callback<ApiError>>,
}

impl<T: Send + Sync + 'static> UseApiOptions<T> {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            auto_fire: true,
            on_success: None,
            on_error: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// 从类型化端点构造：方法、路径、请求体一次取齐
    pub fn for_request<R>(request: &R) -> Self
    where
        R: ApiRequest<Response = T>,
    {
        let mut options = Self::new(R::METHOD, request.path());
        options.body = request.body();
        options
    }

    /// 设置默认请求体
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// 是否在首次挂载时自动触发（仅对只读方法生效）
    pub fn auto_fire(mut self, auto_fire: bool) -> Self {
        self.auto_fire = auto_fire;
        self
    }

    pub fn on_success(mut self, callback: Callback<T>) -> Self {
        self.on_success = Some(callback);
        self
    }

    pub fn on_error(mut self, callback: Callback<ApiError>) -> Self {
        self.on_error = Some(callback);
        self
    }

    /// 变更类方法从不自动触发，无论 auto_fire 如何设置
    pub fn should_auto_fire(&self) -> bool {
        self.auto_fire && self.method.is_read()
    }
}

// =========================================================
// 资源 hook (UseApi)
// =========================================================

/// 通用资源 hook
///
/// 状态容器约定：任一已完成调用之后，`data` 与 `error` 恰有一个非空，
/// 且 `loading` 为 false。
#[derive(Clone)]
pub struct UseApi<T, C = FetchTransport>
where
    T: Clone + Send + Sync + 'static,
    C: HttpTransport + Clone,
{
    pub data: RwSignal<Option<T>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    /// 最新一次 execute 的序号；结果落地前比对
    seq: RwSignal<u64>,
    client: ApiClient<C>,
    method: HttpMethod,
    path: String,
    body: Option<String>,
    on_success: Option<Callback<T>>,
    on_error: Option<Callback<ApiError>>,
}

impl<T, C> UseApi<T, C>
where
    T: Clone + DeserializeOwned + Send + Sync + 'static,
    C: HttpTransport + Clone + 'static,
{
    /// 以显式客户端构造；不注册任何副作用（也是测试入口）
    pub fn with_client(client: ApiClient<C>, options: UseApiOptions<T>) -> Self {
        Self {
            data: RwSignal::new(None),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
            seq: RwSignal::new(0),
            client,
            method: options.method,
            path: options.path,
            body: options.body,
            on_success: options.on_success,
            on_error: options.on_error,
        }
    }

    /// 发起一次调用
    ///
    /// 给出的 `body` / `path` 覆盖构造时的默认值，否则使用默认值。
    /// 调用前置 `loading=true` 并清空 `error`；成功时写入 `data` 并
    /// 触发 `on_success`，失败时记录消息、触发 `on_error` 并原样上抛，
    /// 让调用方自行决定呈现方式。
    pub async fn execute(
        &self,
        body: Option<String>,
        path: Option<String>,
    ) -> Result<T, ApiError> {
        let seq = self.seq.get_untracked() + 1;
        self.seq.set(seq);
        self.loading.set(true);
        self.error.set(None);

        let path = path.unwrap_or_else(|| self.path.clone());
        let body = body.or_else(|| self.body.clone());

        let result = match self.client.request(self.method, &path, body.as_deref()).await {
            Ok(text) => decode_payload::<T>(&text),
            Err(err) => Err(err),
        };

        // 序号已不是最新：结果作废，不触碰状态与回调
        if self.seq.get_untracked() != seq {
            return Err(ApiError::Superseded);
        }

        match result {
            Ok(payload) => {
                self.data.set(Some(payload.clone()));
                self.error.set(None);
                self.loading.set(false);
                if let Some(callback) = &self.on_success {
                    callback.run(payload.clone());
                }
                Ok(payload)
            }
            Err(err) => {
                self.data.set(None);
                self.error.set(Some(err.to_string()));
                self.loading.set(false);
                if let Some(callback) = &self.on_error {
                    callback.run(err.clone());
                }
                Err(err)
            }
        }
    }

    /// 以构造时的 path/body 重新发起（错误重试、刷新列表）
    pub async fn refetch(&self) -> Result<T, ApiError> {
        self.execute(None, None).await
    }

    /// 清回初始状态，不发起调用；同时作废仍在途的调用
    pub fn reset(&self) {
        self.seq.update(|s| *s += 1);
        self.data.set(None);
        self.loading.set(false);
        self.error.set(None);
    }
}

/// 组件入口：构造 hook 并按需注册首次自动触发
///
/// 只读请求在首次激活时触发一次（"挂载即加载"的列表/详情场景）；
/// 自动触发没有调用方，错误只落在状态容器里。
pub fn use_api<T>(options: UseApiOptions<T>) -> UseApi<T>
where
    T: Clone + DeserializeOwned + Send + Sync + 'static,
{
    let auto_fire = options.should_auto_fire();
    let hook = UseApi::with_client(ApiClient::from_env(), options);

    if auto_fire {
        let auto_hook = hook.clone();
        Effect::new(move |_| {
            let hook = auto_hook.clone();
            spawn_local(async move {
                let _ = hook.refetch().await;
            });
        });
    }

    hook
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::http::MockTransport;
    use snaplink_shared::{ListUrlsResponse, ShortUrl};
    use std::rc::Rc;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    // =========================================================
    // 辅助函数
    // =========================================================

    fn make_hook<T>(
        transport: &Rc<MockTransport>,
        options: UseApiOptions<T>,
    ) -> UseApi<T, Rc<MockTransport>>
    where
        T: Clone + DeserializeOwned + Send + Sync + 'static,
    {
        UseApi::with_client(
            ApiClient::with_transport("http://api.test", Rc::clone(transport)),
            options,
        )
    }

    fn list_body(codes: &[&str]) -> String {
        let items: Vec<String> = codes
            .iter()
            .map(|code| {
                format!(
                    r#"{{"id":"{code}","original_url":"https://example.com","short_url":"https://sho.rt/{code}","short_code":"{code}","clicks":0,"created_at":"2025-06-01T12:00:00Z","expires_at":null}}"#
                )
            })
            .collect();
        format!(r#"{{"data":[{}]}}"#, items.join(","))
    }

    // =========================================================
    // 状态容器约定
    // =========================================================

    #[tokio::test]
    async fn test_success_settles_with_data_only() {
        let transport = Rc::new(MockTransport::new());
        transport.push_response(200, list_body(&["abc123"]));
        let hook = make_hook::<ListUrlsResponse>(&transport, UseApiOptions::get("/urls"));

        let payload = hook.execute(None, None).await.unwrap();

        assert_eq!(payload.data.len(), 1);
        assert_eq!(
            hook.data.get_untracked().unwrap().data[0].short_code,
            "abc123"
        );
        assert_eq!(hook.error.get_untracked(), None);
        assert!(!hook.loading.get_untracked());
    }

    #[tokio::test]
    async fn test_failure_settles_with_error_only() {
        let transport = Rc::new(MockTransport::new());
        transport.push_response(500, "");
        let hook = make_hook::<ListUrlsResponse>(&transport, UseApiOptions::get("/urls"));

        let err = hook.execute(None, None).await.unwrap_err();

        assert_eq!(err, ApiError::Server { status: 500 });
        assert!(hook.data.get_untracked().is_none());
        assert_eq!(
            hook.error.get_untracked().as_deref(),
            Some("Request failed with status 500")
        );
        assert!(!hook.loading.get_untracked());
    }

    #[tokio::test]
    async fn test_reset_restores_initial_state() {
        let transport = Rc::new(MockTransport::new());
        transport.push_response(200, list_body(&["abc123"]));
        let hook = make_hook::<ListUrlsResponse>(&transport, UseApiOptions::get("/urls"));

        hook.execute(None, None).await.unwrap();
        hook.reset();

        assert!(hook.data.get_untracked().is_none());
        assert!(!hook.loading.get_untracked());
        assert!(hook.error.get_untracked().is_none());

        // 错误状态同样被清空
        transport.push_response(500, "");
        let _ = hook.execute(None, None).await;
        hook.reset();
        assert!(hook.error.get_untracked().is_none());
        assert!(hook.data.get_untracked().is_none());
    }

    #[tokio::test]
    async fn test_refetch_reuses_configured_path() {
        let transport = Rc::new(MockTransport::new());
        transport.push_response(200, list_body(&[]));
        transport.push_response(200, list_body(&[]));
        let hook = make_hook::<ListUrlsResponse>(&transport, UseApiOptions::get("/urls"));

        hook.execute(None, Some("/urls/9".to_string())).await.ok();
        hook.refetch().await.unwrap();

        let requests = transport.requests.borrow();
        assert_eq!(requests[0].url, "http://api.test/urls/9");
        assert_eq!(requests[1].url, "http://api.test/urls");
    }

    #[tokio::test]
    async fn test_override_body_beats_configured_body() {
        let transport = Rc::new(MockTransport::new());
        transport.push_response(200, "null");
        transport.push_response(200, "null");
        let options = UseApiOptions::<Option<u32>>::post("/urls").body(r#"{"configured":true}"#);
        let hook = make_hook::<Option<u32>>(&transport, options);

        hook.execute(None, None).await.unwrap();
        hook.execute(Some(r#"{"override":true}"#.to_string()), None)
            .await
            .unwrap();

        let requests = transport.requests.borrow();
        assert_eq!(requests[0].body.as_deref(), Some(r#"{"configured":true}"#));
        assert_eq!(requests[1].body.as_deref(), Some(r#"{"override":true}"#));
    }

    // =========================================================
    // 并发约定：last write wins
    // =========================================================

    #[tokio::test]
    async fn test_last_execute_wins_and_stale_result_is_discarded() {
        let transport = Rc::new(MockTransport::new());
        let (release_first, first_gate) = futures::channel::oneshot::channel::<()>();
        let (release_second, second_gate) = futures::channel::oneshot::channel::<()>();
        transport.push_gate(first_gate);
        transport.push_gate(second_gate);
        transport.push_response(200, list_body(&["first0"]));
        transport.push_response(200, list_body(&["second"]));

        let fired = Arc::new(AtomicU32::new(0));
        let fired_counter = Arc::clone(&fired);
        let options = UseApiOptions::<ListUrlsResponse>::get("/urls").on_success(Callback::new(
            move |_: ListUrlsResponse| {
                fired_counter.fetch_add(1, Ordering::SeqCst);
            },
        ));
        let hook = make_hook::<ListUrlsResponse>(&transport, options);

        let first = hook.execute(None, None);
        let second = hook.execute(None, None);
        let driver = async move {
            // 两个调用都已在途，先放行第一个，再放行第二个：
            // 完成顺序与发起顺序一致，但旧序号的结果仍须被丢弃
            let _ = release_first.send(());
            let _ = release_second.send(());
        };

        let (first_result, second_result, _) = futures::join!(first, second, driver);

        assert_eq!(first_result.unwrap_err(), ApiError::Superseded);
        let winner = second_result.unwrap();
        assert_eq!(winner.data[0].short_code, "second");
        assert_eq!(
            hook.data.get_untracked().unwrap().data[0].short_code,
            "second"
        );
        assert!(!hook.loading.get_untracked());
        assert!(hook.error.get_untracked().is_none());
        // 两次调用都确实到达了传输层；只有胜出的调用触发回调
        assert_eq!(transport.request_count(), 2);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_reset_invalidates_in_flight_call() {
        let transport = Rc::new(MockTransport::new());
        let (release, gate) = futures::channel::oneshot::channel::<()>();
        transport.push_gate(gate);
        transport.push_response(200, list_body(&["late00"]));
        let hook = make_hook::<ListUrlsResponse>(&transport, UseApiOptions::get("/urls"));

        // clone 共享同一组信号与序号，reset 可作废另一份克隆的在途调用
        let resetter = hook.clone();
        let call = hook.execute(None, None);
        let driver = async move {
            resetter.reset();
            let _ = release.send(());
        };

        let (result, _) = futures::join!(call, driver);

        assert_eq!(result.unwrap_err(), ApiError::Superseded);
        assert!(hook.data.get_untracked().is_none());
        assert!(!hook.loading.get_untracked());
        assert!(hook.error.get_untracked().is_none());
    }

    // =========================================================
    // 自动触发约定
    // =========================================================

    #[test]
    fn test_mutations_never_auto_fire() {
        assert!(UseApiOptions::<ListUrlsResponse>::get("/urls").should_auto_fire());
        assert!(!UseApiOptions::<ShortUrl>::post("/urls").should_auto_fire());
        assert!(!UseApiOptions::<()>::delete("/urls/1").should_auto_fire());
        // 即便显式要求自动触发，变更类方法也不会生效
        assert!(!UseApiOptions::<ShortUrl>::post("/urls")
            .auto_fire(true)
            .should_auto_fire());
        // 只读方法可以显式关闭
        assert!(!UseApiOptions::<ListUrlsResponse>::get("/urls")
            .auto_fire(false)
            .should_auto_fire());
    }
}
