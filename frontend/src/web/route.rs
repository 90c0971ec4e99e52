//! 路由定义模块 - 领域模型
//!
//! 纯业务逻辑层，不依赖 DOM 或 web_sys。
//! 定义应用的所有路由、路径解析与未知路径的回退规则。

use std::fmt::Display;

/// 短码形态约束：生成器输出为字母数字，长度落在该区间。
/// 只有符合形态的单段路径才进入解析路由，其余回退到列表。
const CODE_MIN_LENGTH: usize = 4;
const CODE_MAX_LENGTH: usize = 10;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 短链列表（默认路由，也是所有未知路径的回退目标）
    #[default]
    UrlList,
    /// 单条短链详情
    UrlDetail(String),
    /// 创建表单
    CreateUrl,
    /// 短码解析页
    Redirect(String),
}

impl AppRoute {
    /// 将 URL path 解析为路由
    ///
    /// 规则：
    /// - `/` 与所有不认识的路径回退到列表
    /// - 保留段 `urls` / `create` 优先于短码解析
    /// - 其余单段路径只有符合短码形态时才进入解析路由
    pub fn from_path(path: &str) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Self::UrlList,
            ["urls"] => Self::UrlList,
            ["urls", id] => Self::UrlDetail((*id).to_string()),
            ["create"] => Self::CreateUrl,
            [code] if looks_like_short_code(code) => Self::Redirect((*code).to_string()),
            _ => Self::UrlList,
        }
    }

    /// 路由对应的规范 path
    pub fn to_path(&self) -> String {
        match self {
            Self::UrlList => "/urls".to_string(),
            Self::UrlDetail(id) => format!("/urls/{}", id),
            Self::CreateUrl => "/create".to_string(),
            Self::Redirect(code) => format!("/{}", code),
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 短码形态检查
fn looks_like_short_code(segment: &str) -> bool {
    (CODE_MIN_LENGTH..=CODE_MAX_LENGTH).contains(&segment.len())
        && segment.chars().all(|c| c.is_ascii_alphanumeric())
}
