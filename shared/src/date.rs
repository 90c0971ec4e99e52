//! 时间与过期语义模块
//!
//! 提供两类能力：
//! - `ExpirationPreset`: 创建表单的过期预设（封闭集合），负责换算为绝对时间
//! - `is_expired` / 显示格式化：过期判断是派生值，总是基于调用方传入的 `now`
//!
//! 不在此处读取系统时钟，便于在任何平台上做确定性测试。

use chrono::{DateTime, Duration, Local, Utc};
use serde::{Deserialize, Serialize};

// =========================================================
// 过期预设 (Expiration Presets)
// =========================================================

/// 过期时间预设（封闭集合）
///
/// 与创建表单的下拉选项一一对应；`Never` 提交 null。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpirationPreset {
    FiveMinutes,
    ThirtyMinutes,
    OneHour,
    SixHours,
    OneDay,
    OneWeek,
    #[default]
    Never,
}

impl ExpirationPreset {
    /// 全部预设，按下拉框展示顺序排列
    pub const ALL: [ExpirationPreset; 7] = [
        ExpirationPreset::FiveMinutes,
        ExpirationPreset::ThirtyMinutes,
        ExpirationPreset::OneHour,
        ExpirationPreset::SixHours,
        ExpirationPreset::OneDay,
        ExpirationPreset::OneWeek,
        ExpirationPreset::Never,
    ];

    /// `<select>` 选项的 value
    pub fn value(&self) -> &'static str {
        match self {
            ExpirationPreset::FiveMinutes => "5m",
            ExpirationPreset::ThirtyMinutes => "30m",
            ExpirationPreset::OneHour => "1h",
            ExpirationPreset::SixHours => "6h",
            ExpirationPreset::OneDay => "1d",
            ExpirationPreset::OneWeek => "1w",
            ExpirationPreset::Never => "never",
        }
    }

    /// 从 `<select>` 选项的 value 还原预设
    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.value() == value)
    }

    /// 展示用标签
    pub fn label(&self) -> &'static str {
        match self {
            ExpirationPreset::FiveMinutes => "5 minutes",
            ExpirationPreset::ThirtyMinutes => "30 minutes",
            ExpirationPreset::OneHour => "1 hour",
            ExpirationPreset::SixHours => "6 hours",
            ExpirationPreset::OneDay => "1 day",
            ExpirationPreset::OneWeek => "1 week",
            ExpirationPreset::Never => "Never",
        }
    }

    /// 预设对应的时长；`Never` 返回 None
    pub fn duration(&self) -> Option<Duration> {
        match self {
            ExpirationPreset::FiveMinutes => Some(Duration::minutes(5)),
            ExpirationPreset::ThirtyMinutes => Some(Duration::minutes(30)),
            ExpirationPreset::OneHour => Some(Duration::hours(1)),
            ExpirationPreset::SixHours => Some(Duration::hours(6)),
            ExpirationPreset::OneDay => Some(Duration::days(1)),
            ExpirationPreset::OneWeek => Some(Duration::weeks(1)),
            ExpirationPreset::Never => None,
        }
    }

    /// 以 `now` 为基准换算出绝对过期时间
    pub fn expires_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.duration().map(|d| now + d)
    }
}

// =========================================================
// 过期判断与显示 (Expiry & Formatting)
// =========================================================

/// 过期判断：无过期时间恒为 false；严格早于 `now` 才算过期
pub fn is_expired(expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match expires_at {
        None => false,
        Some(t) => t < now,
    }
}

/// 按本地时区格式化时间戳
pub fn format_date(t: DateTime<Utc>) -> String {
    t.with_timezone(&Local).format("%d/%m/%Y, %H:%M:%S").to_string()
}

/// 格式化可选的过期时间；`None` 显示 "Never"
pub fn format_expiry(t: Option<DateTime<Utc>>) -> String {
    match t {
        None => "Never".to_string(),
        Some(t) => format_date(t),
    }
}
