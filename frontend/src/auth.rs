//! 认证模块
//!
//! 管理会话状态的响应式外壳，与路由系统解耦：
//! 路由服务通过注入的认证/角色信号来检查导航权限。
//! 实际的状态机在 `crate::session`，这里只负责
//! 把浏览器适配器接上并通过 Signal 发布结果。

use leptos::prelude::*;
use ringside_shared::{
    API_BASE_URL, LoginResponse, MessageResponse, RegisterRequest, RegisterResponse, UserRole,
};

use crate::api::{ApiClient, ApiError};
use crate::services::auth::AuthHttpApi;
use crate::session::{AuthError, AuthState, SessionLogic};
use crate::web::LocalStorage;

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 会话状态（只读）
    pub state: ReadSignal<AuthState>,
    /// 设置会话状态（写入）
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    /// 创建新的认证上下文
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState::default());
        Self { state, set_state }
    }

    /// 认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_authenticated())
    }

    /// 当前角色信号（用于路由服务注入）
    pub fn user_role_signal(&self) -> Signal<Option<UserRole>> {
        let state = self.state;
        Signal::derive(move || state.get().user_role())
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 用当前会话的 token 构造 API 客户端
pub fn api_client(state: &AuthState) -> ApiClient {
    ApiClient::new(API_BASE_URL).with_token(state.token.clone())
}

/// 生产环境的会话逻辑：LocalStorage + HTTP 认证服务
fn browser_logic() -> SessionLogic<LocalStorage, AuthHttpApi> {
    SessionLogic::new(LocalStorage, AuthHttpApi::new())
}

/// 初始化认证状态（应用启动时调用一次，幂等）
///
/// 从 LocalStorage 恢复上次的会话；没有或已损坏则保持未认证。
pub fn init_auth(ctx: &AuthContext) {
    let logic = browser_logic();
    ctx.set_state.update(|state| {
        logic.restore(state);
        state.loading = false;
    });
}

/// 多角色登录
///
/// 并发尝试所有支持的角色，成功后激活固定顺序中最靠前的会话。
pub async fn login(
    ctx: &AuthContext,
    email: String,
    password: String,
) -> Result<LoginResponse, AuthError> {
    let logic = browser_logic();
    ctx.set_state.update(|state| {
        state.loading = true;
        state.error = None;
    });

    let mut state = ctx.state.get_untracked();
    let result = logic.login(&mut state, &email, &password).await;
    state.loading = false;
    ctx.set_state.set(state);

    result
}

/// 切换到另一个已认证的角色（纯本地操作）
///
/// 角色不可用时静默忽略，只在控制台留痕。
// TODO: 评估让不可用角色返回显式错误而不是静默忽略
pub fn switch_role(ctx: &AuthContext, role: UserRole) -> bool {
    let logic = browser_logic();
    let mut switched = false;
    ctx.set_state.update(|state| {
        switched = logic.switch_role(state, role);
    });

    if !switched {
        web_sys::console::warn_1(
            &format!("[Auth] switch_role: {} not in available sessions, ignored", role).into(),
        );
    }
    switched
}

/// 注销并清除状态
///
/// 导航将由路由服务的认证状态监听自动处理。
pub fn logout(ctx: &AuthContext) {
    let logic = browser_logic();
    ctx.set_state.update(|state| {
        logic.logout(state);
    });
}

/// 注册新账号（不建立会话）
pub async fn register(ctx: &AuthContext, req: RegisterRequest) -> Result<RegisterResponse, ApiError> {
    let logic = browser_logic();
    ctx.set_state.update(|state| {
        state.loading = true;
        state.error = None;
    });

    let mut state = ctx.state.get_untracked();
    let result = logic.register(&mut state, &req).await;
    state.loading = false;
    ctx.set_state.set(state);

    result
}

/// 重发验证邮件
pub async fn resend_verification_email(
    ctx: &AuthContext,
    email: String,
    role: UserRole,
) -> Result<MessageResponse, ApiError> {
    let logic = browser_logic();
    ctx.set_state.update(|state| {
        state.loading = true;
        state.error = None;
    });

    let mut state = ctx.state.get_untracked();
    let result = logic.resend_verification_email(&mut state, &email, role).await;
    state.loading = false;
    ctx.set_state.set(state);

    result
}
