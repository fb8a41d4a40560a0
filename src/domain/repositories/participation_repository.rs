//! Repository trait for participation (payment) records.

use crate::domain::entities::{Contest, LeaderboardEntry, NewParticipation, Participation};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for paid contest entries and their win status.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgParticipationRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryStore`] - in-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParticipationRepository: Send + Sync {
    /// Stores a participation record and increments the contest's
    /// participant count by one, as one atomic unit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the contest does not exist; nothing is stored.
    /// Returns [`AppError::Internal`] on database errors.
    async fn record(&self, new_participation: NewParticipation) -> Result<Participation, AppError>;

    /// Lists the participation records of a contest in payment order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_contest(&self, contest_id: i64) -> Result<Vec<Participation>, AppError>;

    /// Contests the given email has paid for; with `won_only`, only those it won.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn contests_entered_by(
        &self,
        email: &str,
        won_only: bool,
    ) -> Result<Vec<Contest>, AppError>;

    /// Returns `true` if the contest already has a winner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn has_winner(&self, contest_id: i64) -> Result<bool, AppError>;

    /// Marks a participation record as the contest winner, only if the record
    /// belongs to the contest and the contest has no winner yet.
    ///
    /// # Returns
    ///
    /// The winning record, or `None` when the condition did not hold.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn declare_winner(
        &self,
        contest_id: i64,
        participation_id: i64,
        draw_index: Option<i32>,
        won_at: DateTime<Utc>,
    ) -> Result<Option<Participation>, AppError>;

    /// Winning records, for one contest or platform-wide when `contest_id` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn winners(&self, contest_id: Option<i64>) -> Result<Vec<Participation>, AppError>;

    /// Groups winning records by email, ordered by win count descending.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, AppError>;
}
