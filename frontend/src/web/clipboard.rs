//! 剪贴板封装模块
//!
//! 封装 `navigator.clipboard.writeText`，返回是否写入成功。

use wasm_bindgen_futures::JsFuture;

/// 将文本写入剪贴板
pub async fn copy_to_clipboard(text: &str) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let clipboard = window.navigator().clipboard();
    JsFuture::from(clipboard.write_text(text)).await.is_ok()
}
