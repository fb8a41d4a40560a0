//! DTOs for contest endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::domain::entities::{Contest, ContestPatch, NewContest};

/// Keys that storage owns and a client cannot set through `extra`.
const RESERVED_KEYS: [&str; 6] = [
    "_id",
    "status",
    "participateCount",
    "creatorEmail",
    "createdAt",
    "updatedAt",
];

fn strip_reserved(extra: &mut Map<String, Value>) {
    for key in RESERVED_KEYS {
        extra.remove(key);
    }
}

/// Request body for `POST /contests`.
///
/// Fields not listed here are kept verbatim and echoed back on reads.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateContestRequest {
    #[validate(length(min = 1, max = 200))]
    pub contest_name: String,

    #[validate(length(min = 1, max = 100))]
    pub contest_type: String,

    pub image: Option<String>,
    pub description: Option<String>,
    pub task: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub price: f64,

    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub prize_money: f64,

    pub deadline: Option<DateTime<Utc>>,
    pub creator_name: Option<String>,
    pub creator_image: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CreateContestRequest {
    /// Builds the domain input; the creator email comes from the credential.
    pub fn into_new_contest(mut self, creator_email: String) -> NewContest {
        strip_reserved(&mut self.extra);
        NewContest {
            creator_email,
            creator_name: self.creator_name,
            creator_image: self.creator_image,
            name: self.contest_name,
            contest_type: self.contest_type,
            image: self.image,
            description: self.description,
            task: self.task,
            price: self.price,
            prize_money: self.prize_money,
            deadline: self.deadline,
            extra: self.extra,
        }
    }
}

/// Request body for `PATCH /contests/{id}`. Absent fields stay unchanged.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContestRequest {
    #[validate(length(min = 1, max = 200))]
    pub contest_name: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub contest_type: Option<String>,

    pub image: Option<String>,
    pub description: Option<String>,
    pub task: Option<String>,

    #[validate(range(min = 0.0))]
    pub price: Option<f64>,

    #[validate(range(min = 0.0))]
    pub prize_money: Option<f64>,

    pub deadline: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<UpdateContestRequest> for ContestPatch {
    fn from(mut r: UpdateContestRequest) -> Self {
        strip_reserved(&mut r.extra);
        // Creator identity is fixed at creation.
        r.extra.remove("creatorName");
        r.extra.remove("creatorImage");
        ContestPatch {
            name: r.contest_name,
            contest_type: r.contest_type,
            image: r.image,
            description: r.description,
            task: r.task,
            price: r.price,
            prize_money: r.prize_money,
            deadline: r.deadline,
            extra: r.extra,
        }
    }
}

/// Request body for `PATCH /admin/contests/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

/// Query for `GET /contests`.
#[derive(Debug, Deserialize)]
pub struct ContestListQuery {
    pub status: Option<String>,
}

/// Query for `GET /popularContests`.
#[derive(Debug, Deserialize)]
pub struct PopularQuery {
    pub search: Option<String>,
}

/// Stored contest as returned by the API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestItem {
    #[serde(rename = "_id")]
    pub id: i64,
    pub creator_email: String,
    pub creator_name: Option<String>,
    pub creator_image: Option<String>,
    pub contest_name: String,
    pub contest_type: String,
    pub image: Option<String>,
    pub description: Option<String>,
    pub task: Option<String>,
    pub price: f64,
    pub prize_money: f64,
    pub deadline: Option<DateTime<Utc>>,
    pub status: String,
    pub participate_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Contest> for ContestItem {
    fn from(c: Contest) -> Self {
        Self {
            id: c.id,
            creator_email: c.creator_email,
            creator_name: c.creator_name,
            creator_image: c.creator_image,
            contest_name: c.name,
            contest_type: c.contest_type,
            image: c.image,
            description: c.description,
            task: c.task,
            price: c.price,
            prize_money: c.prize_money,
            deadline: c.deadline,
            status: c.status.as_str().to_string(),
            participate_count: c.participate_count,
            created_at: c.created_at,
            updated_at: c.updated_at,
            extra: c.extra,
        }
    }
}

pub fn contest_items(contests: Vec<Contest>) -> Vec<ContestItem> {
    contests.into_iter().map(ContestItem::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_request_keeps_unknown_fields() {
        let request: CreateContestRequest = serde_json::from_value(json!({
            "contestName": "Logo",
            "contestType": "Design",
            "price": 10,
            "tags": ["brand"],
            "status": "approved",
            "participateCount": 99
        }))
        .unwrap();

        let new_contest = request.into_new_contest("c@x.io".to_string());

        assert_eq!(new_contest.creator_email, "c@x.io");
        assert_eq!(new_contest.extra.get("tags"), Some(&json!(["brand"])));
        assert!(!new_contest.extra.contains_key("status"));
        assert!(!new_contest.extra.contains_key("participateCount"));
    }

    #[test]
    fn test_update_request_cannot_move_ownership() {
        let request: UpdateContestRequest = serde_json::from_value(json!({
            "creatorEmail": "thief@x.io",
            "creatorName": "Thief",
            "prizeMoney": 500
        }))
        .unwrap();

        let patch = ContestPatch::from(request);

        assert_eq!(patch.prize_money, Some(500.0));
        assert!(patch.extra.is_empty());
    }
}
