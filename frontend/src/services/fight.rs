//! 比赛资源服务

use ringside_shared::models::FightRequest;

use crate::api::{ApiClient, ApiResult};

/// 与当前拳手相关的约战请求
pub async fn requested_fights(api: &ApiClient) -> ApiResult<Vec<FightRequest>> {
    api.get("/fights/requests").await
}
