//! Contest entity and its lifecycle status.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value, json};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Review status of a contest.
///
/// Contests start as [`ContestStatus::Pending`]. Once an admin approves a
/// contest its creator can no longer edit or delete it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ContestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContestStatus::Pending => "pending",
            ContestStatus::Approved => "approved",
            ContestStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ContestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContestStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ContestStatus::Pending),
            "approved" => Ok(ContestStatus::Approved),
            "rejected" => Ok(ContestStatus::Rejected),
            other => Err(AppError::bad_request(
                "Unknown contest status",
                json!({ "status": other, "allowed": ["pending", "approved", "rejected"] }),
            )),
        }
    }
}

/// A creator-authored competition.
///
/// `extra` holds descriptive fields submitted by the client that have no
/// dedicated column; they are stored and returned untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Contest {
    pub id: i64,
    pub creator_email: String,
    pub creator_name: Option<String>,
    pub creator_image: Option<String>,
    pub name: String,
    pub contest_type: String,
    pub image: Option<String>,
    pub description: Option<String>,
    pub task: Option<String>,
    pub price: f64,
    pub prize_money: f64,
    pub deadline: Option<DateTime<Utc>>,
    pub status: ContestStatus,
    pub participate_count: i64,
    pub extra: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contest {
    pub fn is_approved(&self) -> bool {
        self.status == ContestStatus::Approved
    }
}

/// Input data for creating a contest. Status and counter are assigned by storage.
#[derive(Debug, Clone, PartialEq)]
pub struct NewContest {
    pub creator_email: String,
    pub creator_name: Option<String>,
    pub creator_image: Option<String>,
    pub name: String,
    pub contest_type: String,
    pub image: Option<String>,
    pub description: Option<String>,
    pub task: Option<String>,
    pub price: f64,
    pub prize_money: f64,
    pub deadline: Option<DateTime<Utc>>,
    pub extra: Map<String, Value>,
}

/// Partial update submitted by a creator.
///
/// `None` fields are unchanged; `extra` keys are merged over the stored ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContestPatch {
    pub name: Option<String>,
    pub contest_type: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub task: Option<String>,
    pub price: Option<f64>,
    pub prize_money: Option<f64>,
    pub deadline: Option<DateTime<Utc>>,
    pub extra: Map<String, Value>,
}

impl ContestPatch {
    /// Applies the patch to a contest in place.
    pub fn apply(&self, contest: &mut Contest) {
        if let Some(v) = &self.name {
            contest.name = v.clone();
        }
        if let Some(v) = &self.contest_type {
            contest.contest_type = v.clone();
        }
        if let Some(v) = &self.image {
            contest.image = Some(v.clone());
        }
        if let Some(v) = &self.description {
            contest.description = Some(v.clone());
        }
        if let Some(v) = &self.task {
            contest.task = Some(v.clone());
        }
        if let Some(v) = self.price {
            contest.price = v;
        }
        if let Some(v) = self.prize_money {
            contest.prize_money = v;
        }
        if let Some(v) = self.deadline {
            contest.deadline = Some(v);
        }
        for (k, v) in &self.extra {
            contest.extra.insert(k.clone(), v.clone());
        }
    }
}
