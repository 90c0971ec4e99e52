//! snaplink 前端应用
//!
//! 短链服务的单页客户端，采用高内聚低耦合的模块划分：
//! - `web::route` / `web::router`: 路由定义（领域模型）与路由服务（核心引擎）
//! - `api`: 共享 API 客户端（base URL、协商头、出入站拦截点）
//! - `hook`: 通用资源 hook，所有网络交互的统一状态容器
//! - `components`: 视图层

mod api;
mod error;
mod hook;
mod components {
    pub mod create_url;
    pub mod error_boundary;
    pub mod header;
    pub mod redirect;
    pub mod url_detail;
    pub mod url_list;
}

use leptos::prelude::*;

// 原生 Web API 封装模块
// 对浏览器原生 API 的轻量封装，集中 window / history / fetch 的使用点。
pub(crate) mod web {
    pub mod clipboard;
    pub mod http;
    pub mod route;
    pub mod router;
}

use components::create_url::CreateUrlPage;
use components::error_boundary::AppErrorBoundary;
use components::header::Header;
use components::redirect::RedirectPage;
use components::url_detail::UrlDetailPage;
use components::url_list::UrlListPage;
use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::UrlList => view! { <UrlListPage /> }.into_any(),
        AppRoute::UrlDetail(id) => view! { <UrlDetailPage id=id /> }.into_any(),
        AppRoute::CreateUrl => view! { <CreateUrlPage /> }.into_any(),
        AppRoute::Redirect(code) => view! { <RedirectPage code=code /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    view! {
        <AppErrorBoundary>
            <Router>
                <div class="min-h-screen bg-base-200">
                    <Header />
                    <RouterOutlet matcher=route_matcher />
                </div>
            </Router>
        </AppErrorBoundary>
    }
}
