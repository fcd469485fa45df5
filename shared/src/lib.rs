use std::fmt::Display;

use serde::{Deserialize, Serialize};

pub mod models;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const API_BASE_URL: &str = "http://localhost:3000/api";

/// LocalStorage 中的会话持久化键
pub const STORAGE_TOKEN_KEY: &str = "auth_token";
pub const STORAGE_USER_KEY: &str = "auth_user";
pub const STORAGE_ROLES_KEY: &str = "auth_available_roles";

/// 机器可读的认证错误代码
pub const ERROR_EMAIL_NOT_VERIFIED: &str = "email_not_verified";
pub const ERROR_UNAUTHORIZED: &str = "unauthorized";

// =========================================================
// 角色与用户 (Roles & Users)
// =========================================================

/// 账号角色
///
/// 决定会话允许使用的控制面板和 API 范围。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Fighter,
    /// Promotion League Owner/Organizer
    Plo,
    Spectator,
    Admin,
}

/// 并发登录时探测的角色，顺序固定。
///
/// 多个角色同时登录成功时，激活此顺序中最靠前的一个。
/// admin 不参与自动探测，管理员会话由服务端显式签发。
pub const LOGIN_ROLE_ORDER: [UserRole; 3] =
    [UserRole::Fighter, UserRole::Plo, UserRole::Spectator];

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Fighter => "fighter",
            UserRole::Plo => "plo",
            UserRole::Spectator => "spectator",
            UserRole::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "fighter" => Some(UserRole::Fighter),
            "plo" => Some(UserRole::Plo),
            "spectator" => Some(UserRole::Spectator),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 身份记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// 单个角色的已认证会话：(user, token) 对，仅对一个角色有效。
///
/// 不变量：`user.role` 始终等于获取该会话时使用的角色。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleSession {
    pub user: User,
    pub token: String,
}

// =========================================================
// 认证请求/响应 (Auth DTOs)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub id: String,
    pub email: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResendVerificationRequest {
    pub email: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// 服务端错误响应体
///
/// `error` 字段是机器可读的原因字符串，
/// 前端据此区分 `email_not_verified` 与其它失败。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
