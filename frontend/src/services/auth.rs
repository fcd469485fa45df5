//! 认证服务
//!
//! 会话模块 `AuthApiAdapter` 的生产实现：
//! 把登录/注册/重发验证邮件映射到远端认证端点。
//! 登录/注册不携带 token，客户端以匿名身份构造。

use async_trait::async_trait;
use ringside_shared::{
    API_BASE_URL, LoginRequest, LoginResponse, MessageResponse, RegisterRequest, RegisterResponse,
    ResendVerificationRequest,
};

use crate::api::{ApiClient, ApiError};
use crate::session::AuthApiAdapter;

pub struct AuthHttpApi {
    client: ApiClient,
}

impl AuthHttpApi {
    pub fn new() -> Self {
        Self {
            client: ApiClient::new(API_BASE_URL),
        }
    }
}

impl Default for AuthHttpApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl AuthApiAdapter for AuthHttpApi {
    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.client.post("/auth/login", req).await
    }

    async fn register(&self, req: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        self.client.post("/auth/register", req).await
    }

    async fn resend_verification_email(
        &self,
        req: &ResendVerificationRequest,
    ) -> Result<MessageResponse, ApiError> {
        self.client.post("/auth/resend-verification", req).await
    }
}
