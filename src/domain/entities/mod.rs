//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures; serialization shapes live in
//! [`crate::api::dto`].
//!
//! # Entity Types
//!
//! - [`User`] / [`Role`] - Registered accounts and their platform role
//! - [`Contest`] / [`ContestStatus`] - Creator-authored competitions
//! - [`Participation`] - A paid contest entry, later annotated with win status
//! - [`LeaderboardEntry`] - Wins aggregated per participant
//!
//! Creation and partial-update inputs use separate structs
//! (`NewUser`, `NewContest`, `NewParticipation`, `ContestPatch`, `ProfilePatch`).

pub mod contest;
pub mod participation;
pub mod user;

pub use contest::{Contest, ContestPatch, ContestStatus, NewContest};
pub use participation::{LeaderboardEntry, NewParticipation, Participation, WinnerSelection};
pub use user::{NewUser, ProfilePatch, Role, User};
