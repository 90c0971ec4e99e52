//! 创建表单状态管理模块
//!
//! 将零散的 signal 整合为 `FormState` 结构体，负责：
//! - 数据的持有与重置
//! - 提交前校验（校验失败时不应发起任何网络调用）
//! - 数据到请求对象的转换（过期预设 → 绝对时间戳）

use chrono::{DateTime, Utc};
use leptos::prelude::*;
use snaplink_shared::CreateUrlRequest;
use snaplink_shared::date::ExpirationPreset;

/// 表单状态结构体
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，适合在组件与闭包间传递。
#[derive(Clone, Copy)]
pub struct FormState {
    pub url: RwSignal<String>,
    pub preset: RwSignal<ExpirationPreset>,
}

impl FormState {
    /// 创建新的表单状态，所有字段使用默认值
    pub fn new() -> Self {
        Self {
            url: RwSignal::new(String::new()),
            preset: RwSignal::new(ExpirationPreset::Never),
        }
    }

    /// 重置表单到初始状态
    pub fn reset(&self) {
        self.url.set(String::new());
        self.preset.set(ExpirationPreset::Never);
    }

    /// 提交前校验：URL 去除空白后必须非空
    pub fn validate(&self) -> Result<(), String> {
        if self.url.get().trim().is_empty() {
            Err("Please enter a valid URL".to_string())
        } else {
            Ok(())
        }
    }

    /// 将表单状态转换为 API 请求对象；提交时刻 `now` 由调用方传入
    pub fn to_request(&self, now: DateTime<Utc>) -> CreateUrlRequest {
        CreateUrlRequest {
            url: self.url.get().trim().to_string(),
            expires_at: self.preset.get().expires_at(now),
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_blank_url_fails_validation() {
        let form = FormState::new();
        assert!(form.validate().is_err());

        form.url.set("   \t".to_string());
        assert_eq!(form.validate(), Err("Please enter a valid URL".to_string()));

        form.url.set("https://example.com".to_string());
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_to_request_trims_url_and_translates_preset() {
        let form = FormState::new();
        form.url.set("  https://example.com/long  ".to_string());
        form.preset.set(ExpirationPreset::OneHour);

        let req = form.to_request(t0());

        assert_eq!(req.url, "https://example.com/long");
        assert_eq!(req.expires_at, Some(t0() + Duration::hours(1)));
    }

    #[test]
    fn test_never_preset_submits_null_expiry() {
        let form = FormState::new();
        form.url.set("https://example.com".to_string());

        let req = form.to_request(t0());
        assert_eq!(req.expires_at, None);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let form = FormState::new();
        form.url.set("https://example.com".to_string());
        form.preset.set(ExpirationPreset::OneWeek);

        form.reset();

        assert_eq!(form.url.get(), "");
        assert_eq!(form.preset.get(), ExpirationPreset::Never);
    }
}
