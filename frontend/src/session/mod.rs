//! 会话核心模块
//!
//! 多角色认证的状态机，与 UI 框架和浏览器完全解耦：
//! - `AuthState`: 纯数据的会话状态（当前会话 + 可用角色集合）
//! - `SessionLogic`: 登录编排、角色切换、持久化的业务逻辑层
//! - `persist`: LocalStorage 三键布局的编码/解码
//!
//! 存储与认证 API 通过适配器 trait 注入，
//! 测试中用内存实现替换，生产中由 `web::LocalStorage` 和
//! `services::auth::AuthHttpApi` 提供。

pub mod persist;

#[cfg(test)]
mod tests;

use async_trait::async_trait;
use ringside_shared::{
    ERROR_EMAIL_NOT_VERIFIED, ERROR_UNAUTHORIZED, LOGIN_ROLE_ORDER, LoginRequest, LoginResponse,
    MessageResponse, RegisterRequest, RegisterResponse, ResendVerificationRequest, RoleSession,
    User, UserRole,
};

use crate::api::ApiError;

// =========================================================
// 适配器接口 (Adapters)
// =========================================================

/// 键值存储适配器
///
/// 会话相关的键由本模块独占：其它组件不得直接读写这些键。
pub trait SessionStorageAdapter {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn delete(&self, key: &str) -> bool;
}

/// 认证服务适配器
#[async_trait(?Send)]
pub trait AuthApiAdapter {
    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, ApiError>;
    async fn register(&self, req: &RegisterRequest) -> Result<RegisterResponse, ApiError>;
    async fn resend_verification_email(
        &self,
        req: &ResendVerificationRequest,
    ) -> Result<MessageResponse, ApiError>;
}

// =========================================================
// 会话状态 (AuthState)
// =========================================================

/// 会话状态
///
/// 不变量：
/// - `is_authenticated` ⇔ `user` 与 `token` 同时存在
/// - 已认证时 `available_roles` 至少包含当前角色的条目
///   （旧版单角色存储恢复时为尽力保证，见 `persist`）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    /// 当前激活的身份
    pub user: Option<User>,
    /// 当前激活的 Bearer Token
    pub token: Option<String>,
    /// 最近一次登录中认证成功的所有角色会话，按固定角色顺序排列
    pub available_roles: Vec<(UserRole, RoleSession)>,
    /// 登录/注册/重发请求是否在途
    pub loading: bool,
    /// 最近一次向 UI 暴露的错误（代码或透传消息）
    pub error: Option<String>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    pub fn user_role(&self) -> Option<UserRole> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn has_multiple_roles(&self) -> bool {
        self.available_roles.len() > 1
    }
}

// =========================================================
// 登录错误
// =========================================================

/// 多角色登录的聚合失败
///
/// 单个角色的失败在扇出内部被吞掉，只有"零角色成功"才会浮出。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// 没有角色成功，且至少一个角色因邮箱未验证被拒
    EmailNotVerified,
    /// 没有角色接受该凭据
    Unauthorized,
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::EmailNotVerified => ERROR_EMAIL_NOT_VERIFIED,
            AuthError::Unauthorized => ERROR_UNAUTHORIZED,
        }
    }
}

impl core::fmt::Display for AuthError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::error::Error for AuthError {}

// =========================================================
// 业务逻辑层 (Logic)
// =========================================================

pub struct SessionLogic<S, A> {
    storage: S,
    api: A,
}

impl<S, A> SessionLogic<S, A>
where
    S: SessionStorageAdapter,
    A: AuthApiAdapter,
{
    pub fn new(storage: S, api: A) -> Self {
        Self { storage, api }
    }

    /// 从持久化存储恢复会话（幂等）
    ///
    /// - 已认证时直接返回
    /// - 无持久化数据时保持未认证
    /// - 用户记录损坏时由 `persist::load` 清空全部键（fail-closed）
    pub fn restore(&self, state: &mut AuthState) {
        if state.is_authenticated() {
            return;
        }

        if let Some(restored) = persist::load(&self.storage) {
            state.user = Some(restored.user);
            state.token = Some(restored.token);
            state.available_roles = restored.roles;
        }
    }

    /// 多角色并发登录
    ///
    /// 对固定顺序中的每个角色独立发起一次登录（扇出/扇入，
    /// 互不取消，全部结束后才聚合）。单个角色的失败被视为
    /// "该角色不适用"并静默忽略，仅"邮箱未验证"被单独标记。
    ///
    /// - 至少一个角色成功：`available_roles` 整体替换为成功集合，
    ///   激活固定顺序中最靠前的会话并持久化
    /// - 零角色成功：记录聚合错误代码并返回 Err
    pub async fn login(
        &self,
        state: &mut AuthState,
        email: &str,
        password: &str,
    ) -> Result<LoginResponse, AuthError> {
        let attempts = LOGIN_ROLE_ORDER.iter().map(|role| {
            let req = LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
                role: *role,
            };
            let api = &self.api;
            async move { api.login(&req).await }
        });

        let results = futures::future::join_all(attempts).await;

        let mut pending_verification = false;
        let mut sessions: Vec<(UserRole, RoleSession)> = Vec::new();

        for (role, result) in LOGIN_ROLE_ORDER.iter().zip(results) {
            match result {
                Ok(res) => sessions.push((
                    *role,
                    RoleSession {
                        user: res.user,
                        token: res.token,
                    },
                )),
                Err(e) if e.is_email_not_verified() => pending_verification = true,
                // 该角色不适用（密码错误、角色不存在、网络失败），静默忽略
                Err(_) => {}
            }
        }

        if sessions.is_empty() {
            let err = if pending_verification {
                AuthError::EmailNotVerified
            } else {
                AuthError::Unauthorized
            };
            state.error = Some(err.code().to_string());
            return Err(err);
        }

        // 固定顺序下的第一个成功角色即为激活会话（确定性的平局裁决）
        let active = sessions[0].1.clone();
        state.user = Some(active.user.clone());
        state.token = Some(active.token.clone());
        state.available_roles = sessions;
        state.error = None;

        persist::save(&self.storage, state);

        Ok(LoginResponse {
            user: active.user,
            token: active.token,
        })
    }

    /// 切换到另一个已认证的角色会话（纯本地，不发网络请求）
    ///
    /// 角色存在时激活对应会话并重新持久化，原角色保留在集合中。
    /// 角色不存在时不做任何修改并返回 false，由调用方决定是否记录。
    pub fn switch_role(&self, state: &mut AuthState, role: UserRole) -> bool {
        let session = state
            .available_roles
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, s)| s.clone());

        let Some(session) = session else {
            return false;
        };

        state.user = Some(session.user);
        state.token = Some(session.token);
        persist::save(&self.storage, state);
        true
    }

    /// 注销：清空内存状态与全部持久化键，不可逆。
    pub fn logout(&self, state: &mut AuthState) {
        state.user = None;
        state.token = None;
        state.available_roles.clear();
        state.error = None;
        persist::clear(&self.storage);
    }

    /// 注册（透传，不修改会话字段）
    pub async fn register(
        &self,
        state: &mut AuthState,
        req: &RegisterRequest,
    ) -> Result<RegisterResponse, ApiError> {
        match self.api.register(req).await {
            Ok(res) => Ok(res),
            Err(e) => {
                state.error = Some(e.surface_message("Registration failed"));
                Err(e)
            }
        }
    }

    /// 重发验证邮件（透传，不修改会话字段）
    pub async fn resend_verification_email(
        &self,
        state: &mut AuthState,
        email: &str,
        role: UserRole,
    ) -> Result<MessageResponse, ApiError> {
        let req = ResendVerificationRequest {
            email: email.to_string(),
            role,
        };

        match self.api.resend_verification_email(&req).await {
            Ok(res) => Ok(res),
            Err(e) => {
                state.error = Some(e.surface_message("Failed to resend verification email"));
                Err(e)
            }
        }
    }
}
