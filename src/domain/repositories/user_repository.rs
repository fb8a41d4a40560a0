//! Repository trait for user accounts.

use crate::domain::entities::{NewUser, ProfilePatch, Role, User};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for user accounts.
///
/// Email is the natural key; the numeric id is what admin endpoints address.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryStore`] - in-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts the user unless one with the same email exists.
    ///
    /// The existence check and the insert are a single operation, so two
    /// concurrent registrations of one email store exactly one record.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(User))` when a record was created
    /// - `Ok(None)` when the email was already registered
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create_if_absent(&self, new_user: NewUser) -> Result<Option<User>, AppError>;

    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Lists all users, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<User>, AppError>;

    /// Deletes a user by id. Returns `true` if a record was removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Sets the role of a user. Returns `true` if the user exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn update_role(&self, id: i64, role: Role) -> Result<bool, AppError>;

    /// Applies a profile patch to the user with the given email.
    ///
    /// Returns the updated user, or `None` if no such user exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn update_profile(
        &self,
        email: &str,
        patch: ProfilePatch,
    ) -> Result<Option<User>, AppError>;

    /// Verifies the storage backend answers.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the backend is unreachable.
    async fn ping(&self) -> Result<(), AppError>;
}
