//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、每个路由的认证/角色要求，
//! 以及导航守卫的完整判定逻辑。

use std::fmt::Display;

use ringside_shared::UserRole;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 产品落地页 (默认路由)
    #[default]
    Landing,
    /// 登录页面
    Login,
    /// 注册页面
    Register,
    /// 拳手控制面板 (需要 fighter 角色)
    FighterDashboard,
    /// 拳手的约战与报价页面 (需要 fighter 角色)
    FighterFights,
    /// PLO 控制面板 (需要 plo 角色)
    PloDashboard,
    /// 观众赛事列表 (需要 spectator 角色)
    SpectatorEvents,
    /// 管理员控制面板 (需要 admin 角色)
    AdminDashboard,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" => Self::Landing,
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/fighter" | "/fighter/dashboard" => Self::FighterDashboard,
            "/fighter/fights" => Self::FighterFights,
            "/plo" | "/plo/dashboard" => Self::PloDashboard,
            "/spectator" | "/spectator/events" => Self::SpectatorEvents,
            "/admin" | "/admin/dashboard" => Self::AdminDashboard,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::FighterDashboard => "/fighter/dashboard",
            Self::FighterFights => "/fighter/fights",
            Self::PloDashboard => "/plo/dashboard",
            Self::SpectatorEvents => "/spectator/events",
            Self::AdminDashboard => "/admin/dashboard",
            Self::NotFound => "/404",
        }
    }

    /// 该路由是否需要认证
    pub fn requires_auth(&self) -> bool {
        self.required_role().is_some()
    }

    /// 该路由要求的角色
    pub fn required_role(&self) -> Option<UserRole> {
        match self {
            Self::FighterDashboard | Self::FighterFights => Some(UserRole::Fighter),
            Self::PloDashboard => Some(UserRole::Plo),
            Self::SpectatorEvents => Some(UserRole::Spectator),
            Self::AdminDashboard => Some(UserRole::Admin),
            _ => None,
        }
    }

    /// 已认证用户是否应该离开此路由（登录/注册入口页）
    pub fn is_auth_entry(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// 角色对应的控制面板路由；无角色时回到登录页
    pub fn dashboard_for(role: Option<UserRole>) -> Self {
        match role {
            Some(UserRole::Fighter) => Self::FighterDashboard,
            Some(UserRole::Plo) => Self::PloDashboard,
            Some(UserRole::Spectator) => Self::SpectatorEvents,
            Some(UserRole::Admin) => Self::AdminDashboard,
            None => Self::Login,
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

// =========================================================
// 导航守卫 (Guard)
// =========================================================

/// 守卫判定结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// 放行
    Allow,
    /// 重定向到登录页，保留原始目标供登录后跳回
    RedirectToLogin { redirect: String },
    /// 重定向到其它路由（角色不匹配或已认证访问入口页）
    Redirect(AppRoute),
}

/// **核心守卫逻辑：对每次导航做一次判定**
///
/// - 目标需要认证但未认证 → 带 redirect 参数去登录页
/// - 目标需要认证、已认证但角色不符 → 去当前角色的控制面板
/// - 已认证访问登录/注册页 → 去当前角色的控制面板
/// - 其余情况放行
pub fn check_navigation(
    target: &AppRoute,
    is_authenticated: bool,
    role: Option<UserRole>,
) -> GuardOutcome {
    if target.requires_auth() {
        if !is_authenticated {
            return GuardOutcome::RedirectToLogin {
                redirect: login_redirect_path(target),
            };
        }

        if target.required_role() != role {
            return GuardOutcome::Redirect(AppRoute::dashboard_for(role));
        }

        return GuardOutcome::Allow;
    }

    if target.is_auth_entry() && is_authenticated {
        return GuardOutcome::Redirect(AppRoute::dashboard_for(role));
    }

    GuardOutcome::Allow
}

/// 构造带原始目标的登录页路径
pub fn login_redirect_path(target: &AppRoute) -> String {
    format!("{}?redirect={}", AppRoute::Login.to_path(), target.to_path())
}

/// 从查询串中提取登录后的跳回目标
///
/// 只接受站内绝对路径，拒绝任何跳出站外的值。
pub fn redirect_param(search: &str) -> Option<String> {
    let query = search.strip_prefix('?').unwrap_or(search);

    for pair in query.split('&') {
        if let Some(value) = pair.strip_prefix("redirect=") {
            if value.starts_with('/') && !value.starts_with("//") {
                return Some(value.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_round_trip() {
        let routes = [
            AppRoute::Landing,
            AppRoute::Login,
            AppRoute::Register,
            AppRoute::FighterDashboard,
            AppRoute::FighterFights,
            AppRoute::PloDashboard,
            AppRoute::SpectatorEvents,
            AppRoute::AdminDashboard,
        ];
        for route in routes {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
        assert_eq!(AppRoute::from_path("/no/such/page"), AppRoute::NotFound);
    }

    #[test]
    fn short_dashboard_paths_resolve() {
        assert_eq!(AppRoute::from_path("/fighter"), AppRoute::FighterDashboard);
        assert_eq!(AppRoute::from_path("/plo"), AppRoute::PloDashboard);
        assert_eq!(AppRoute::from_path("/spectator"), AppRoute::SpectatorEvents);
    }

    #[test]
    fn unauthenticated_is_sent_to_login_with_redirect() {
        let outcome = check_navigation(&AppRoute::PloDashboard, false, None);
        assert_eq!(
            outcome,
            GuardOutcome::RedirectToLogin {
                redirect: "/login?redirect=/plo/dashboard".to_string()
            }
        );
    }

    #[test]
    fn wrong_role_is_sent_to_own_dashboard() {
        let outcome = check_navigation(&AppRoute::PloDashboard, true, Some(UserRole::Fighter));
        assert_eq!(outcome, GuardOutcome::Redirect(AppRoute::FighterDashboard));

        let outcome = check_navigation(&AppRoute::AdminDashboard, true, Some(UserRole::Spectator));
        assert_eq!(outcome, GuardOutcome::Redirect(AppRoute::SpectatorEvents));
    }

    #[test]
    fn matching_role_is_allowed() {
        for (route, role) in [
            (AppRoute::FighterDashboard, UserRole::Fighter),
            (AppRoute::FighterFights, UserRole::Fighter),
            (AppRoute::PloDashboard, UserRole::Plo),
            (AppRoute::SpectatorEvents, UserRole::Spectator),
            (AppRoute::AdminDashboard, UserRole::Admin),
        ] {
            assert_eq!(
                check_navigation(&route, true, Some(role)),
                GuardOutcome::Allow
            );
        }
    }

    #[test]
    fn authenticated_cannot_revisit_auth_entries() {
        let outcome = check_navigation(&AppRoute::Login, true, Some(UserRole::Plo));
        assert_eq!(outcome, GuardOutcome::Redirect(AppRoute::PloDashboard));

        let outcome = check_navigation(&AppRoute::Register, true, Some(UserRole::Admin));
        assert_eq!(outcome, GuardOutcome::Redirect(AppRoute::AdminDashboard));
    }

    #[test]
    fn public_routes_are_always_allowed() {
        assert_eq!(check_navigation(&AppRoute::Landing, false, None), GuardOutcome::Allow);
        assert_eq!(check_navigation(&AppRoute::Login, false, None), GuardOutcome::Allow);
        // 落地页不是认证入口页，已认证也放行
        assert_eq!(
            check_navigation(&AppRoute::Landing, true, Some(UserRole::Fighter)),
            GuardOutcome::Allow
        );
    }

    #[test]
    fn dashboard_for_unknown_role_is_login() {
        assert_eq!(AppRoute::dashboard_for(None), AppRoute::Login);
    }

    #[test]
    fn redirect_param_extraction() {
        assert_eq!(
            redirect_param("?redirect=/plo/events"),
            Some("/plo/events".to_string())
        );
        assert_eq!(
            redirect_param("?foo=1&redirect=/fighter/fights"),
            Some("/fighter/fights".to_string())
        );
        assert_eq!(redirect_param(""), None);
        assert_eq!(redirect_param("?foo=1"), None);
        // 站外跳转被拒绝
        assert_eq!(redirect_param("?redirect=https://evil.example"), None);
        assert_eq!(redirect_param("?redirect=//evil.example"), None);
    }
}
