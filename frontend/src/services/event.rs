//! 赛事资源服务

use ringside_shared::models::{CreateEventRequest, Event, EventSlot};

use crate::api::{ApiClient, ApiResult};

/// 当前 PLO 名下的赛事
pub async fn owned_events(api: &ApiClient) -> ApiResult<Vec<Event>> {
    api.get("/events/owned-events").await
}

/// 面向观众公开的已发布赛事
pub async fn upcoming_events(api: &ApiClient) -> ApiResult<Vec<Event>> {
    api.get("/events/upcoming").await
}

/// 赛事中尚未占用的比赛档位
pub async fn available_slots(api: &ApiClient, event_id: &str) -> ApiResult<Vec<EventSlot>> {
    api.get(&format!("/events/{}/available-slots", event_id)).await
}

pub async fn create_event(api: &ApiClient, payload: &CreateEventRequest) -> ApiResult<Event> {
    api.post("/events", payload).await
}
