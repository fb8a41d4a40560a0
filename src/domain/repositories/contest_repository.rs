//! Repository trait for contests.

use crate::domain::entities::{Contest, ContestPatch, ContestStatus, NewContest};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for contests.
///
/// The `*_unless_approved` operations are conditional single-statement writes:
/// the status check and the mutation cannot interleave with an admin approval.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgContestRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryStore`] - in-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContestRepository: Send + Sync {
    /// Stores a new contest with status `pending` and a zero participant count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_contest: NewContest) -> Result<Contest, AppError>;

    /// Finds a contest by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Contest>, AppError>;

    /// Lists contests, newest first, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, status: Option<ContestStatus>) -> Result<Vec<Contest>, AppError>;

    /// Lists contests authored by the given creator email.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_creator(&self, creator_email: &str) -> Result<Vec<Contest>, AppError>;

    /// Applies a patch unless the contest is approved.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Contest))` with the updated contest
    /// - `Ok(None)` if the contest does not exist or is approved
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn update_unless_approved(
        &self,
        id: i64,
        patch: ContestPatch,
    ) -> Result<Option<Contest>, AppError>;

    /// Sets the review status. Returns `true` if the contest exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn set_status(&self, id: i64, status: ContestStatus) -> Result<bool, AppError>;

    /// Deletes the contest unless it is approved. Returns `true` if removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete_unless_approved(&self, id: i64) -> Result<bool, AppError>;

    /// Deletes the contest regardless of status. Returns `true` if removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Returns up to `limit` contests ordered by participant count, highest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn top_by_participation(&self, limit: i64) -> Result<Vec<Contest>, AppError>;

    /// Case-insensitive substring search over the contest type.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn search_by_type(&self, query: &str) -> Result<Vec<Contest>, AppError>;
}
