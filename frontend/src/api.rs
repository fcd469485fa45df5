//! HTTP 客户端封装
//!
//! 基于 `gloo-net` 的类型化 JSON 客户端：
//! 自动附加 Bearer Token，解析 2xx 响应体，
//! 并把非 2xx 响应体按 `ErrorBody` 信封还原为结构化错误。

use gloo_net::http::{Request, RequestBuilder, Response};
use ringside_shared::{ERROR_EMAIL_NOT_VERIFIED, ErrorBody};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// API 调用错误
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 网络请求失败（无响应）
    Network(String),
    /// 响应解析失败
    Decode(String),
    /// 服务端返回的业务错误（携带机器可读的 error 代码）
    Api { status: u16, error: String },
}

impl ApiError {
    /// 该错误是否为"邮箱未验证"拒绝
    ///
    /// 多角色登录的扇出聚合依赖这个判断：
    /// 它必须与其它登录失败（密码错误、角色不存在）可区分。
    pub fn is_email_not_verified(&self) -> bool {
        matches!(self, ApiError::Api { error, .. } if error == ERROR_EMAIL_NOT_VERIFIED)
    }

    /// 提取可展示给用户的消息；非业务错误时退回 `fallback`。
    pub fn surface_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Api { error, .. } => error.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "网络错误: {}", msg),
            ApiError::Decode(msg) => write!(f, "响应解析失败: {}", msg),
            ApiError::Api { status, error } => write!(f, "[{}] {}", status, error),
        }
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = Result<T, ApiError>;

/// 类型化 JSON API 客户端
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ApiClient {
    pub base_url: String,
    pub token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token: None,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    // 认证头（仅在已持有 token 时附加）
    fn with_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    /// 统一处理响应：2xx 解析为 T，其它状态按 ErrorBody 信封还原。
    async fn decode<T: DeserializeOwned>(res: Response) -> ApiResult<T> {
        if !res.ok() {
            let status = res.status();
            let error = match res.json::<ErrorBody>().await {
                Ok(body) => body.error,
                // 服务端没有返回标准信封时退化为状态码描述
                Err(_) => format!("http_{}", status),
            };
            return Err(ApiError::Api { status, error });
        }

        res.json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let res = self
            .with_auth(Request::get(&self.url(path)))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::decode(res).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let res = self
            .with_auth(Request::post(&self.url(path)))
            .json(body)
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::decode(res).await
    }

    pub async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let res = self
            .with_auth(Request::patch(&self.url(path)))
            .json(body)
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::decode(res).await
    }
}
