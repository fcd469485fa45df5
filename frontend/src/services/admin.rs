//! 管理员资源服务

use ringside_shared::models::{FighterVerification, VerificationStatus};
use serde::Serialize;

use crate::api::{ApiClient, ApiResult};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReviewVerificationBody<'a> {
    status: VerificationStatus,
    admin_note: Option<&'a str>,
}

/// 等待审核的身份核验申请
pub async fn pending_verifications(api: &ApiClient) -> ApiResult<Vec<FighterVerification>> {
    api.get("/fighters/verifications/pending").await
}

/// 审核一条核验申请
pub async fn review_verification(
    api: &ApiClient,
    verification_id: &str,
    status: VerificationStatus,
    admin_note: Option<&str>,
) -> ApiResult<FighterVerification> {
    api.patch(
        &format!("/fighters/verifications/{}/status", verification_id),
        &ReviewVerificationBody { status, admin_note },
    )
    .await
}
