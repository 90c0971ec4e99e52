//! 短码解析页
//!
//! 激活时驱动状态机：idle → redirecting，发出按短码的查询；
//! 成功后展示确认态并在固定延迟后整页跳转到目标地址，
//! 失败进入终态错误并提供返回列表的出口。

pub mod machine;

use crate::error::ApiError;
use crate::hook::{UseApiOptions, use_api};
use crate::web::router::{external_redirect, use_navigate};
use leptos::prelude::*;
use leptos::task::spawn_local;
use machine::{REDIRECT_DELAY_MS, RedirectPhase};
use snaplink_shared::ResolveCodeResponse;
use snaplink_shared::protocol::ResolveCode;
use std::time::Duration;

#[component]
pub fn RedirectPage(code: String) -> impl IntoView {
    let navigate = use_navigate();
    let phase = RwSignal::new(RedirectPhase::Idle);

    let resolver = use_api::<ResolveCodeResponse>(
        UseApiOptions::for_request(&ResolveCode { code }).auto_fire(false),
    );

    // 激活即启动状态机；路由变化会挂载新的组件实例，从 idle 重新开始
    Effect::new(move |_| {
        if phase.get_untracked() != RedirectPhase::Idle {
            return;
        }
        phase.set(RedirectPhase::Redirecting);

        let resolver = resolver.clone();
        spawn_local(async move {
            let result = resolver.refetch().await;
            if result == Err(ApiError::Superseded) {
                // 被更新的调用取代，终态由后者决定
                return;
            }

            let next = RedirectPhase::settle(result);
            if let RedirectPhase::Success { target } = &next {
                let target = target.clone();
                // 恰好一次的最终一跳，留出确认态的展示时间
                set_timeout(
                    move || external_redirect(&target),
                    Duration::from_millis(REDIRECT_DELAY_MS),
                );
            }
            phase.set(next);
        });
    });

    let go_back = move |_| navigate("/urls");

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content w-full max-w-md">
                <div class="card bg-base-100 shadow-xl w-full">
                    <div class="card-body items-center text-center">
                        {move || match phase.get() {
                            RedirectPhase::Idle | RedirectPhase::Redirecting => view! {
                                <span class="loading loading-spinner loading-lg text-primary"></span>
                                <h2 class="card-title mt-4">"Redirecting..."</h2>
                                <p class="text-base-content/70">
                                    "We are taking you to your destination"
                                </p>
                            }
                            .into_any(),
                            RedirectPhase::Success { .. } => view! {
                                <div class="text-success text-5xl">"✓"</div>
                                <h2 class="card-title mt-4">"Redirect Success!"</h2>
                                <p class="text-base-content/70">
                                    "You will be redirected in a few seconds..."
                                </p>
                            }
                            .into_any(),
                            RedirectPhase::Error { message } => view! {
                                <div class="text-error text-5xl">"!"</div>
                                <h2 class="card-title mt-4">"Redirect Error"</h2>
                                <p class="text-base-content/70">{message}</p>
                                <div class="card-actions mt-4 w-full">
                                    <button on:click=go_back.clone() class="btn btn-primary w-full">
                                        "Back to URLs"
                                    </button>
                                </div>
                            }
                            .into_any(),
                        }}
                    </div>
                </div>
            </div>
        </div>
    }
}
