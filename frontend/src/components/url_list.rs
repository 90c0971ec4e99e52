//! 短链列表页
//!
//! 激活时拉取全量列表；删除在服务端确认后就地过滤本地副本，
//! 不等整页重新拉取。空列表与拉取失败都有显式出口（创建入口 / 重试）。

use crate::hook::{UseApiOptions, use_api};
use crate::web::router::use_navigate;
use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;
use snaplink_shared::protocol::ListUrls;
use snaplink_shared::{ListUrlsResponse, ShortUrl, date};

/// 删除确认后的本地过滤：只移除匹配 id 的那一条，其余保持原有顺序
fn remove_url_by_id(urls: &mut Vec<ShortUrl>, id: &str) {
    urls.retain(|u| u.id != id);
}

#[component]
pub fn UrlListPage() -> impl IntoView {
    let navigate = use_navigate();

    let list = use_api::<ListUrlsResponse>(UseApiOptions::for_request(&ListUrls));
    let remover = use_api::<()>(UseApiOptions::delete("/urls").auto_fire(false));
    let loading = list.loading;
    let fetch_error = list.error;

    // 列表的本地可变副本：删除成功后按 id 过滤，其余顺序不变
    let (urls, set_urls) = signal(Vec::<ShortUrl>::new());
    {
        let data = list.data;
        Effect::new(move |_| {
            if let Some(resp) = data.get() {
                set_urls.set(resp.data);
            }
        });
    }

    let (notification, set_notification) = signal(Option::<(String, bool)>::None); // 消息内容, 是否出错

    // 3秒后清除通知
    Effect::new(move |_| {
        if notification.get().is_some() {
            set_timeout(
                move || set_notification.set(None),
                std::time::Duration::from_secs(3),
            );
        }
    });

    let handle_delete = {
        let remover = remover.clone();
        move |id: String| {
            let remover = remover.clone();
            spawn_local(async move {
                match remover.execute(None, Some(format!("/urls/{}", id))).await {
                    Ok(_) => {
                        set_notification.set(Some(("URL deleted successfully".to_string(), false)));
                        set_urls.update(|list| remove_url_by_id(list, &id));
                    }
                    Err(e) => {
                        set_notification.set(Some((format!("Error deleting URL: {}", e), true)));
                    }
                }
            });
        }
    };

    let handle_retry = {
        let list = list.clone();
        move |_| {
            let list = list.clone();
            spawn_local(async move {
                let _ = list.refetch().await;
            });
        }
    };

    let total = move || urls.with(|u| u.len());

    view! {
        <main class="container mx-auto px-4 py-8">
            <div class="max-w-4xl mx-auto space-y-4">
                // 通知提示框
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

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="flex items-center justify-between p-6 pb-2">
                            <h2 class="card-title">"Shortened URLs"</h2>
                            <button
                                on:click={
                                    let navigate = navigate.clone();
                                    move |_| navigate("/create")
                                }
                                class="btn btn-primary btn-sm gap-2"
                            >
                                "+ Shorten URL"
                            </button>
                        </div>

                        {move || {
                            if let Some(message) = fetch_error.get() {
                                view! {
                                    <div class="text-center py-8 px-4">
                                        <p class="text-error break-words">{message}</p>
                                        <button
                                            on:click=handle_retry.clone()
                                            class="btn btn-ghost btn-sm mt-4"
                                        >
                                            "Retry"
                                        </button>
                                    </div>
                                }
                                    .into_any()
                            } else {
                                let handle_delete = handle_delete.clone();
                                let navigate = navigate.clone();
                                view! {
                                    <div class="overflow-x-auto w-full">
                                        <table class="table table-zebra w-full">
                                            <thead>
                                                <tr>
                                                    <th>"Short Code"</th>
                                                    <th>"Original URL"</th>
                                                    <th class="hidden md:table-cell">"Clicks"</th>
                                                    <th class="hidden md:table-cell">"Expires"</th>
                                                    <th></th>
                                                </tr>
                                            </thead>
                                            <tbody>
                                                <Show when=move || total() == 0 && !loading.get()>
                                                    <tr>
                                                        <td colspan="5" class="text-center py-8 text-base-content/50">
                                                            "No shortened URLs yet. Create one to get started."
                                                        </td>
                                                    </tr>
                                                </Show>
                                                <Show when=move || loading.get() && total() == 0>
                                                    <tr>
                                                        <td colspan="5" class="text-center py-8 text-base-content/50">
                                                            <span class="loading loading-spinner loading-md"></span>
                                                            " Loading..."
                                                        </td>
                                                    </tr>
                                                </Show>
                                                <For
                                                    each=move || urls.get()
                                                    key=|u| u.id.clone()
                                                    children=move |url| {
                                                        let detail_path = format!("/urls/{}", url.id);
                                                        let delete_id = url.id.clone();
                                                        let navigate = navigate.clone();
                                                        let handle_delete = handle_delete.clone();
                                                        let expired = url.is_expired_at(Utc::now());
                                                        view! {
                                                            <tr>
                                                                <td>
                                                                    <a
                                                                        on:click=move |_| navigate(&detail_path)
                                                                        class="link link-primary font-mono"
                                                                    >
                                                                        {url.short_code.clone()}
                                                                    </a>
                                                                </td>
                                                                <td class="max-w-xs truncate font-mono text-sm opacity-70">
                                                                    {url.original_url.clone()}
                                                                </td>
                                                                <td class="hidden md:table-cell">{url.clicks}</td>
                                                                <td class="hidden md:table-cell">
                                                                    {if expired {
                                                                        view! {
                                                                            <span class="badge badge-error badge-outline">
                                                                                "Expired"
                                                                            </span>
                                                                        }
                                                                            .into_any()
                                                                    } else {
                                                                        date::format_expiry(url.expires_at).into_any()
                                                                    }}
                                                                </td>
                                                                <td>
                                                                    <button
                                                                        on:click=move |_| handle_delete(delete_id.clone())
                                                                        class="btn btn-ghost btn-sm text-error"
                                                                    >
                                                                        "Delete"
                                                                    </button>
                                                                </td>
                                                            </tr>
                                                        }
                                                    }
                                                />
                                            </tbody>
                                        </table>
                                    </div>
                                }
                                    .into_any()
                            }
                        }}
                    </div>
                </div>
            </div>
        </main>
    }
}
