//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 每次导航都经过 `route::check_navigation` 守卫判定，
//! 认证状态与角色信号由外部注入，与认证系统解耦。

use leptos::prelude::*;
use ringside_shared::UserRole;
use wasm_bindgen::prelude::*;

use super::route::{AppRoute, GuardOutcome, check_navigation};

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 获取当前浏览器查询串（含 "?" 前缀）
pub fn current_search() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 认证状态检查（注入的信号，实现解耦）
    is_authenticated: Signal<bool>,
    /// 当前角色（注入的信号，供角色守卫使用）
    user_role: Signal<Option<UserRole>>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>, user_role: Signal<Option<UserRole>>) -> Self {
        // 初始路由从当前 URL 解析
        let path = current_path();
        let initial_route = AppRoute::from_path(&path);
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            is_authenticated,
            user_role,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 导航到控制面板（当前角色对应的那个）
    pub fn navigate_to_dashboard(&self) {
        let role = self.user_role.get_untracked();
        self.navigate(AppRoute::dashboard_for(role).to_path());
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 验证(Guard) -> 处理 -> 加载
    pub fn navigate(&self, path: &str) {
        let target_route = AppRoute::from_path(path);
        self.navigate_to_route(target_route, true);
    }

    /// 导航到指定路由
    ///
    /// # Arguments
    /// * `target_route` - 目标路由
    /// * `use_push` - true 使用 pushState, false 使用 replaceState
    fn navigate_to_route(&self, target_route: AppRoute, use_push: bool) {
        let is_auth = self.is_authenticated.get_untracked();
        let role = self.user_role.get_untracked();

        let (final_route, final_path) = match check_navigation(&target_route, is_auth, role) {
            GuardOutcome::Allow => {
                let path = target_route.to_path().to_string();
                (target_route, path)
            }
            GuardOutcome::RedirectToLogin { redirect } => {
                web_sys::console::log_1(
                    &format!("[Router] Access denied, redirecting to {}", redirect).into(),
                );
                (AppRoute::Login, redirect)
            }
            GuardOutcome::Redirect(route) => {
                web_sys::console::log_1(
                    &format!("[Router] Redirecting to {}", route.to_path()).into(),
                );
                let path = route.to_path().to_string();
                (route, path)
            }
        };

        if use_push {
            push_history_state(&final_path);
        } else {
            replace_history_state(&final_path);
        }
        self.set_route.set(final_route);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let service = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            let path = current_path();
            let target_route = AppRoute::from_path(&path);
            // popstate 时也执行守卫逻辑，重定向用 replaceState 以免污染历史栈
            service.navigate_to_route(target_route, false);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 设置认证状态变化时的自动重定向
    fn setup_auth_redirect(&self) {
        let service = *self;

        Effect::new(move |_| {
            let is_auth = service.is_authenticated.get();
            let route = service.current_route.get_untracked();

            if is_auth {
                // 用户刚登录，如果还停在登录/注册页则送往对应面板
                if route.is_auth_entry() {
                    service.navigate_to_dashboard();
                }
            } else {
                // 用户登出，如果在受保护页面则送回登录页
                if route.requires_auth() {
                    web_sys::console::log_1(
                        &"[Router] Auth state changed: logged out, redirecting to login.".into(),
                    );
                    service.navigate_to_route(AppRoute::Login, true);
                }
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(
    is_authenticated: Signal<bool>,
    user_role: Signal<Option<UserRole>>,
) -> RouterService {
    let router = RouterService::new(is_authenticated, user_role);

    // 初始路由同样要过守卫（直接输入 URL 打开受保护页面的场景）
    router.navigate_to_route(AppRoute::from_path(&current_path()), false);

    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 认证状态信号
    is_authenticated: Signal<bool>,
    /// 当前角色信号
    user_role: Signal<Option<UserRole>>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(is_authenticated, user_role);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}
