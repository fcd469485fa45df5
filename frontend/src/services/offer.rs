//! 报价资源服务

use ringside_shared::models::Offer;

use crate::api::{ApiClient, ApiResult};

/// 某场比赛收到的全部可用报价
pub async fn available_offers_for_fight(api: &ApiClient, fight_id: &str) -> ApiResult<Vec<Offer>> {
    api.get(&format!("/offers/available-offers/fight/{}", fight_id))
        .await
}
