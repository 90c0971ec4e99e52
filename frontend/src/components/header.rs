//! 顶部导航

use crate::web::router::use_navigate;
use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    let navigate = use_navigate();
    let go_home = {
        let navigate = navigate.clone();
        move |_| navigate("/urls")
    };
    let go_list = {
        let navigate = navigate.clone();
        move |_| navigate("/urls")
    };
    let go_create = move |_| navigate("/create");

    view! {
        <div class="navbar bg-base-100 shadow-md">
            <div class="flex-1">
                <a on:click=go_home class="btn btn-ghost text-xl font-bold">
                    "snaplink"
                </a>
            </div>
            <div class="flex-none gap-2">
                <button on:click=go_list class="btn btn-ghost btn-sm">
                    "My URLs"
                </button>
                <button on:click=go_create class="btn btn-primary btn-sm">
                    "Shorten URL"
                </button>
            </div>
        </div>
    }
}
