//! 短链详情页
//!
//! 按 id 拉取单条短链，展示点击数、创建/过期时间与派生的状态徽章；
//! 支持复制短链/原始链接，删除成功后回到列表。

use crate::hook::{UseApiOptions, use_api};
use crate::web::clipboard::copy_to_clipboard;
use crate::web::router::use_navigate;
use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;
use snaplink_shared::protocol::{DeleteUrl, GetUrl};
use snaplink_shared::{ShortUrl, ShowUrlResponse, date};

#[component]
pub fn UrlDetailPage(id: String) -> impl IntoView {
    let navigate = use_navigate();

    let detail = use_api::<ShowUrlResponse>(UseApiOptions::for_request(&GetUrl { id: id.clone() }));
    let remover = use_api::<()>(UseApiOptions::for_request(&DeleteUrl { id }).auto_fire(false));
    let loading = detail.loading;
    let data = detail.data;

    let (notification, set_notification) = signal(Option::<(String, bool)>::None);

    // 3秒后清除通知
    Effect::new(move |_| {
        if notification.get().is_some() {
            set_timeout(
                move || set_notification.set(None),
                std::time::Duration::from_secs(3),
            );
        }
    });

    let handle_copy = move |text: String| {
        spawn_local(async move {
            let copied = copy_to_clipboard(&text).await;
            let message = if copied { "URL copied!" } else { "Error copying URL" };
            set_notification.set(Some((message.to_string(), !copied)));
        });
    };

    let handle_delete = {
        let remover = remover.clone();
        let navigate = navigate.clone();
        move |_| {
            let remover = remover.clone();
            let navigate = navigate.clone();
            spawn_local(async move {
                match remover.refetch().await {
                    Ok(_) => navigate("/urls"),
                    Err(e) => {
                        set_notification.set(Some((format!("Error deleting URL: {}", e), true)));
                    }
                }
            });
        }
    };

    let back_to_list = {
        let navigate = navigate.clone();
        move |_| navigate("/urls")
    };

    view! {
        <main class="container mx-auto px-4 py-8">
            <div class="max-w-4xl mx-auto space-y-4">
                <Show when=move || notification.get().is_some()>
                    <div class="toast toast-top toast-end z-50">
                        <div class=move || {
                            let (_, is_err) = notification.get().unwrap_or_default();
                            if is_err {
                                "alert alert-error shadow-lg"
                            } else {
                                "alert alert-success shadow-lg"
                            }
                        }>
                            <span>{move || notification.get().unwrap_or_default().0}</span>
                        </div>
                    </div>
                </Show>

                <button on:click=back_to_list class="btn btn-ghost btn-sm gap-2">
                    "← URLs Shortened List"
                </button>

                {move || {
                    if loading.get() {
                        return view! {
                            <div class="text-center py-16">
                                <span class="loading loading-spinner loading-lg text-primary"></span>
                            </div>
                        }
                            .into_any();
                    }
                    match data.get() {
                        Some(resp) => {
                            let handle_copy = handle_copy.clone();
                            let handle_delete = handle_delete.clone();
                            url_card(resp.data, handle_copy, handle_delete).into_any()
                        }
                        None => view! {
                            <div class="card bg-base-100 shadow-xl">
                                <div class="card-body items-center text-center">
                                    <h2 class="card-title">"URL not found"</h2>
                                    <p class="text-base-content/70">
                                        "The URL you are looking for does not exist or has been deleted."
                                    </p>
                                </div>
                            </div>
                        }
                            .into_any(),
                    }
                }}
            </div>
        </main>
    }
}

/// 详情卡片：元数据、复制按钮与删除入口
fn url_card(
    url: ShortUrl,
    handle_copy: impl Fn(String) + Clone + 'static,
    handle_delete: impl Fn(()) + Clone + 'static,
) -> impl IntoView {
    let expired = url.is_expired_at(Utc::now());
    let copy_short = {
        let handle_copy = handle_copy.clone();
        let text = url.short_url.clone();
        move |_| handle_copy(text.clone())
    };
    let copy_original = {
        let text = url.original_url.clone();
        move |_| handle_copy(text.clone())
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body space-y-4">
                <div class="flex items-center justify-between">
                    <h2 class="card-title">"Shorten URL"</h2>
                    <button
                        on:click=move |_| handle_delete(())
                        class="btn btn-ghost btn-sm text-error gap-2"
                    >
                        "Delete URL"
                    </button>
                </div>

                <div class="flex items-center gap-6">
                    <div class="flex items-center gap-2">
                        <span class="text-sm font-medium opacity-70">"ID:"</span>
                        <span class="font-mono">"#" {url.id.clone()}</span>
                    </div>
                    <div class="flex items-center gap-2">
                        <span class="text-sm font-medium opacity-70">"Status:"</span>
                        {if expired {
                            view! { <span class="badge badge-error">"Expired"</span> }.into_any()
                        } else {
                            view! { <span class="badge badge-success">"Active"</span> }.into_any()
                        }}
                    </div>
                </div>

                <div>
                    <span class="label-text opacity-70">"Short URL:"</span>
                    <div class="flex items-center gap-2 mt-1">
                        <code class="flex-1 px-3 py-2 bg-base-200 rounded-md text-sm font-mono">
                            {url.short_url.clone()}
                        </code>
                        <button on:click=copy_short class="btn btn-ghost btn-sm" title="Copy Short URL">
                            "Copy"
                        </button>
                        <a
                            href=url.short_url.clone()
                            target="_blank"
                            rel="noopener noreferrer"
                            class="btn btn-ghost btn-sm"
                            title="Open Short URL"
                        >
                            "Open"
                        </a>
                    </div>
                </div>

                <div>
                    <span class="label-text opacity-70">"Original URL:"</span>
                    <div class="flex items-center gap-2 mt-1">
                        <code class="flex-1 px-3 py-2 bg-base-200 rounded-md text-sm break-all">
                            {url.original_url.clone()}
                        </code>
                        <button on:click=copy_original class="btn btn-ghost btn-sm" title="Copy Original URL">
                            "Copy"
                        </button>
                    </div>
                </div>

                <div>
                    <span class="label-text opacity-70">"Short Code:"</span>
                    <code class="ml-2 px-3 py-1 bg-base-200 rounded-md text-sm font-mono">
                        {url.short_code.clone()}
                    </code>
                </div>

                <div class="stats stats-vertical md:stats-horizontal shadow w-full">
                    <div class="stat">
                        <div class="stat-title">"Clicks"</div>
                        <div class="stat-value text-primary text-2xl">{url.clicks}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"Created"</div>
                        <div class="stat-value text-2xl">{date::format_date(url.created_at)}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"Expires"</div>
                        <div class=move || {
                            if expired { "stat-value text-error text-2xl" } else { "stat-value text-2xl" }
                        }>
                            {date::format_expiry(url.expires_at)}
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
