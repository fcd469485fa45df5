//! 拳手资源服务

use ringside_shared::models::{Fighter, FighterVerification};

use crate::api::{ApiClient, ApiResult};

/// 可以约战的对手列表（服务端按体重级别与状态筛选）
pub async fn possible_opponents(api: &ApiClient) -> ApiResult<Vec<Fighter>> {
    api.get("/fighters/possible-opponents").await
}

/// 当前拳手的档案
pub async fn profile(api: &ApiClient) -> ApiResult<Fighter> {
    api.get("/fighters/profile").await
}

/// 当前拳手提交过的身份核验申请
pub async fn verifications(api: &ApiClient) -> ApiResult<Vec<FighterVerification>> {
    api.get("/fighters/verifications").await
}
