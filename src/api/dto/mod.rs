//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Field names are camelCase and record ids are `_id`.

pub mod auth;
pub mod contest;
pub mod health;
pub mod leaderboard;
pub mod participation;
pub mod payment;
pub mod results;
pub mod user;
