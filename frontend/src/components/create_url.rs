//! 创建短链页
//!
//! 收集长链接与过期预设，提交成功后清空表单并回到列表。
//! 服务端 422 的字段错误拼成一条内联消息；其余失败走通用文案。

pub mod form_state;

use crate::error::ApiError;
use crate::hook::{UseApiOptions, use_api};
use crate::web::router::use_navigate;
use chrono::Utc;
use form_state::FormState;
use leptos::prelude::*;
use leptos::task::spawn_local;
use snaplink_shared::ShortUrl;
use snaplink_shared::date::ExpirationPreset;
use snaplink_shared::protocol::ApiRequest;

#[component]
pub fn CreateUrlPage() -> impl IntoView {
    let navigate = use_navigate();
    let form = FormState::new();
    let (form_error, set_form_error) = signal(Option::<String>::None);

    let creator = use_api::<ShortUrl>(UseApiOptions::post("/urls").auto_fire(false));
    // loading 信号是 Copy，单独取出便于在多个闭包里使用
    let creating = creator.loading;

    let on_submit = {
        let navigate = navigate.clone();
        let creator = creator.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();

            // 客户端校验失败：不发起网络调用
            if let Err(message) = form.validate() {
                set_form_error.set(Some(message));
                return;
            }
            set_form_error.set(None);
            creator.reset();

            // 预设在提交时刻换算为绝对过期时间
            let request = form.to_request(Utc::now());

            let creator = creator.clone();
            let navigate = navigate.clone();
            spawn_local(async move {
                match creator.execute(request.body(), None).await {
                    Ok(_) => {
                        form.reset();
                        navigate("/urls");
                    }
                    Err(ApiError::Validation(errors)) => {
                        set_form_error.set(Some(errors.joined()));
                    }
                    Err(ApiError::Superseded) => {}
                    Err(_) => {
                        set_form_error.set(Some(
                            "Error shortening the URL. Please try again.".to_string(),
                        ));
                    }
                }
            });
        }
    };

    view! {
        <main class="container mx-auto px-4 py-8">
            <div class="max-w-xl mx-auto">
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h2 class="card-title">"Shorten URL"</h2>
                        <p class="text-base-content/70 text-sm">
                            "Paste a long URL and pick how long the short link should live."
                        </p>

                        <Show when=move || form_error.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || form_error.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <form on:submit=on_submit class="space-y-4">
                            <div class="form-control">
                                <label for="url" class="label">
                                    <span class="label-text">"Original URL"</span>
                                </label>
                                <input
                                    id="url"
                                    type="url"
                                    placeholder="https://example.com/very-long-url"
                                    on:input=move |ev| form.url.set(event_target_value(&ev))
                                    prop:value=form.url
                                    disabled=move || creating.get()
                                    class="input input-bordered w-full"
                                />
                            </div>

                            <div class="form-control">
                                <label for="expiration" class="label">
                                    <span class="label-text">"Expiration Time (Optional)"</span>
                                </label>
                                <select
                                    id="expiration"
                                    class="select select-bordered w-full"
                                    disabled=move || creating.get()
                                    on:change=move |ev| {
                                        if let Some(preset) = ExpirationPreset::from_value(
                                            &event_target_value(&ev),
                                        ) {
                                            form.preset.set(preset);
                                        }
                                    }
                                >
                                    {ExpirationPreset::ALL
                                        .into_iter()
                                        .map(|preset| {
                                            view! {
                                                <option
                                                    value=preset.value()
                                                    selected=move || form.preset.get() == preset
                                                >
                                                    {preset.label()}
                                                </option>
                                            }
                                        })
                                        .collect_view()}
                                </select>
                            </div>

                            <div class="form-control mt-6">
                                <button
                                    type="submit"
                                    disabled=move || creating.get()
                                    class="btn btn-primary w-full"
                                >
                                    {move || {
                                        if creating.get() {
                                            view! {
                                                <span class="loading loading-spinner"></span>
                                                "Shortening..."
                                            }
                                                .into_any()
                                        } else {
                                            "Shorten URL".into_any()
                                        }
                                    }}
                                </button>
                            </div>
                        </form>
                    </div>
                </div>
            </div>
        </main>
    }
}
