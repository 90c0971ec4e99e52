//! 顶层错误监督组件
//!
//! 包裹整棵视图树，拦截渲染期间抛出的错误，显示回退界面并提供整页重载。
//! panic 由 main 里注册的 panic hook 打到浏览器控制台。

use leptos::prelude::*;

/// 整页重载（回退界面的恢复出口）
fn reload_page() {
    if let Some(window) = web_sys::window() {
        let _ = window.location().reload();
    }
}

#[component]
pub fn AppErrorBoundary(children: Children) -> impl IntoView {
    view! {
        <ErrorBoundary fallback=|errors| {
            view! {
                <div class="flex min-h-screen items-center justify-center bg-base-200">
                    <div class="card bg-base-100 shadow-xl max-w-md w-full">
                        <div class="card-body text-center">
                            <h2 class="card-title justify-center text-error">
                                "Sorry! Something went wrong"
                            </h2>
                            <p class="text-base-content/70">
                                "An unexpected error occurred in the application."
                            </p>
                            <ul class="text-left text-xs font-mono text-error/80">
                                {move || {
                                    errors
                                        .get()
                                        .into_iter()
                                        .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                                        .collect_view()
                                }}
                            </ul>
                            <div class="card-actions justify-center mt-4">
                                <button class="btn btn-primary" on:click=|_| reload_page()>
                                    "Reload the page"
                                </button>
                            </div>
                        </div>
                    </div>
                </div>
            }
        }>{children()}</ErrorBoundary>
    }
}
