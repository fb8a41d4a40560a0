//! Repository implementations.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - Users table
//! - [`PgContestRepository`] - Contests table with JSONB extras
//! - [`PgParticipationRepository`] - Payments table, winners, leaderboard
//! - [`MemoryStore`] - Volatile store implementing all three traits

pub mod memory_store;
pub mod pg_contest_repository;
pub mod pg_participation_repository;
pub mod pg_user_repository;

pub use memory_store::MemoryStore;
pub use pg_contest_repository::PgContestRepository;
pub use pg_participation_repository::PgParticipationRepository;
pub use pg_user_repository::PgUserRepository;
