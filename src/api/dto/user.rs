//! DTOs for user registration, management and profiles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::domain::entities::{NewUser, Role, User};

/// Keys that storage owns and a client cannot set through `extra`.
const RESERVED_KEYS: [&str; 3] = ["_id", "createdAt", "updatedAt"];

/// Request body for `POST /users`.
///
/// Other profile fields are kept verbatim and echoed back on reads.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(max = 200))]
    pub name: Option<String>,

    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,

    /// `participant` (default) or `creator`.
    pub role: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RegisterRequest {
    pub fn into_new_user(mut self, role: Role) -> NewUser {
        for key in RESERVED_KEYS {
            self.extra.remove(key);
        }
        NewUser {
            email: self.email,
            name: self.name,
            photo_url: self.photo_url,
            role,
            extra: self.extra,
        }
    }
}

/// Request body for `PATCH /users/{id}`.
#[derive(Debug, Deserialize)]
pub struct RoleRequest {
    pub role: String,
}

/// Request body for `PATCH /profile`.
#[derive(Debug, Deserialize, Validate)]
pub struct ProfileRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
}

/// Response for `GET /userRole/{email}`. `role` is omitted for unknown users.
#[derive(Debug, Serialize)]
pub struct RoleResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Stored user as returned by the API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserItem {
    #[serde(rename = "_id")]
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<User> for UserItem {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            photo_url: u.photo_url,
            role: u.role.as_str().to_string(),
            created_at: u.created_at,
            updated_at: u.updated_at,
            extra: u.extra,
        }
    }
}
