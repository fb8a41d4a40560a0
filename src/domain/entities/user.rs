//! User entity and platform roles.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value, json};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Platform role of a user.
///
/// Stored as lowercase text. Parsing rejects anything outside the closed set so
/// free-text roles never reach the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    #[default]
    Participant,
    Creator,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Participant, Role::Creator, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Participant => "participant",
            Role::Creator => "creator",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "participant" => Ok(Role::Participant),
            "creator" => Ok(Role::Creator),
            "admin" => Ok(Role::Admin),
            other => Err(AppError::bad_request(
                "Unknown role",
                json!({ "role": other, "allowed": ["participant", "creator", "admin"] }),
            )),
        }
    }
}

/// A registered platform user, keyed by email.
///
/// `extra` holds the remaining profile fields submitted at registration.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub photo_url: Option<String>,
    pub role: Role,
    pub extra: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for registering a user.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub name: Option<String>,
    pub photo_url: Option<String>,
    pub role: Role,
    pub extra: Map<String, Value>,
}

/// Self-service profile changes. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub photo_url: Option<String>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.photo_url.is_none()
    }
}
