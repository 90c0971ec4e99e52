//! 短码解析状态机
//!
//! 纯领域逻辑，不依赖 DOM：`idle → redirecting → (success | error)`。
//! success / error 是本次激活的终态；新的短码（路由变化）会以
//! 新的状态机实例重新从 idle 开始。

use crate::error::ApiError;
use snaplink_shared::ResolveCodeResponse;

/// 固定的确认延迟：解析成功后先展示确认态，再整页跳转
pub const REDIRECT_DELAY_MS: u64 = 1500;

/// 状态机状态
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RedirectPhase {
    /// 尚未发起解析
    #[default]
    Idle,
    /// 解析请求已在途
    Redirecting,
    /// 解析成功，等待延迟后的整页跳转
    Success { target: String },
    /// 终态错误
    Error { message: String },
}

impl RedirectPhase {
    /// 是否为本次激活的终态
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success { .. } | Self::Error { .. })
    }

    /// 解析结果落地后的终态
    ///
    /// 错误文案按状态语义区分：不存在、已过期、其余一律按网络错误处理；
    /// 成功但载荷里没有可跳转目标同样是错误。
    pub fn settle(result: Result<ResolveCodeResponse, ApiError>) -> Self {
        match result {
            Ok(resp) if !resp.original_url.is_empty() => Self::Success {
                target: resp.original_url,
            },
            Ok(_) => Self::Error {
                message: "Redirect URL not found in response".to_string(),
            },
            Err(ApiError::NotFound) => Self::Error {
                message: "URL not found".to_string(),
            },
            Err(ApiError::Gone) => Self::Error {
                message: "URL expired".to_string(),
            },
            Err(_) => Self::Error {
                message: "Network error during redirect".to_string(),
            },
        }
    }
}
