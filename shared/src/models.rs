//! 业务领域模型
//!
//! 这些实体由服务端拥有，前端只是透传展示。
//! 字段按 REST API 的 camelCase 线上格式命名。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =========================================================
// 拳手 (Fighter)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fighter {
    pub id: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_class: Option<String>,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub draws: u32,
    pub verification_status: VerificationStatus,
}

impl Fighter {
    /// 战绩的 "W-L-D" 展示形式
    pub fn record(&self) -> String {
        format!("{}-{}-{}", self.wins, self.losses, self.draws)
    }
}

/// 拳手提交的身份核验申请，由管理员审核。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FighterVerification {
    pub id: String,
    pub fighter_id: String,
    pub status: VerificationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_note: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

// =========================================================
// 赛事 (Event)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Draft,
    Published,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub plo_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub status: EventStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
}

impl CreateEventRequest {
    /// 从表单字段构造请求
    ///
    /// `starts_at_local` 是 `<input type="datetime-local">` 的值
    /// （形如 "2026-09-01T20:00"），按 UTC 解释；格式非法返回 None。
    pub fn from_form(name: String, location: Option<String>, starts_at_local: &str) -> Option<Self> {
        let naive =
            chrono::NaiveDateTime::parse_from_str(starts_at_local, "%Y-%m-%dT%H:%M").ok()?;
        Some(Self {
            name,
            location,
            starts_at: naive.and_utc(),
        })
    }
}

/// 赛事中的一个比赛档位
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSlot {
    pub id: String,
    pub event_id: String,
    pub position: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_class: Option<String>,
    #[serde(default)]
    pub taken: bool,
}

// =========================================================
// 比赛与报价 (Fights & Offers)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FightRequestStatus {
    Pending,
    Accepted,
    Rejected,
}

/// 拳手之间的约战请求，双方接受后成为可排期的比赛。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FightRequest {
    pub id: String,
    pub challenger_id: String,
    pub opponent_id: String,
    pub status: FightRequestStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    Pending,
    Accepted,
    Rejected,
    Withdrawn,
}

/// PLO 向一场比赛发出的出场报价
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: String,
    pub fight_id: String,
    pub event_id: String,
    pub plo_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purse_amount: Option<f64>,
    pub status: OfferStatus,
    pub created_at: DateTime<Utc>,
}
