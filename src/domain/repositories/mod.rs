//! Repository trait definitions for the domain layer.
//!
//! These traits abstract the document collections the service works with
//! (users, contests, payments). Implementations live in
//! `crate::infrastructure::persistence`; mock implementations are generated via
//! `mockall` for testing.
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - Accounts and roles
//! - [`ContestRepository`] - Contests and their review status
//! - [`ParticipationRepository`] - Paid entries, winners and the leaderboard
//!
//! # Testing
//!
//! See `tests/repository_*.rs` for the PostgreSQL implementations and
//! `tests/handler_*.rs` for end-to-end behavior over the in-memory store.

pub mod contest_repository;
pub mod participation_repository;
pub mod user_repository;

pub use contest_repository::ContestRepository;
pub use participation_repository::ParticipationRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use contest_repository::MockContestRepository;
#[cfg(test)]
pub use participation_repository::MockParticipationRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
