//! User account management service.

use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{NewUser, ProfilePatch, Role, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// Service for registration, admin user management and self-service profiles.
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Registers a user unless the email is already known.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(User))` for a new registration
    /// - `Ok(None)` if the email already exists (nothing is written)
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when a new email self-registers as admin.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn register(&self, new_user: NewUser) -> Result<Option<User>, AppError> {
        // Known emails get the already-exists answer whatever role they ask for.
        if new_user.role == Role::Admin {
            if self.repository.find_by_email(&new_user.email).await?.is_some() {
                tracing::debug!("Registration skipped, email already exists");
                return Ok(None);
            }
            return Err(AppError::bad_request(
                "Cannot self-register as admin",
                json!({ "allowed": ["participant", "creator"] }),
            ));
        }

        let created = self.repository.create_if_absent(new_user).await?;
        match &created {
            Some(user) => tracing::info!(user_id = user.id, role = %user.role, "User registered"),
            None => tracing::debug!("Registration skipped, email already exists"),
        }

        Ok(created)
    }

    /// Lists all users.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.repository.list().await
    }

    /// Deletes a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn delete_user(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(AppError::not_found("User not found", json!({ "id": id })));
        }
        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }

    /// Sets a user's role.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn set_role(&self, id: i64, role: Role) -> Result<(), AppError> {
        if !self.repository.update_role(id, role).await? {
            return Err(AppError::not_found("User not found", json!({ "id": id })));
        }
        tracing::info!(user_id = id, role = %role, "User role changed");
        Ok(())
    }

    /// Returns the stored role for an email, or `None` for unknown users.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn role_of(&self, email: &str) -> Result<Option<Role>, AppError> {
        Ok(self.repository.find_by_email(email).await?.map(|u| u.role))
    }

    /// Returns the user record for an email.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn profile(&self, email: &str) -> Result<User, AppError> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "email": email })))
    }

    /// Applies a self-service profile update.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the patch changes nothing.
    /// Returns [`AppError::NotFound`] if the user does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn update_profile(&self, email: &str, patch: ProfilePatch) -> Result<User, AppError> {
        if patch.is_empty() {
            return Err(AppError::bad_request(
                "Nothing to update",
                json!({ "fields": ["name", "photoURL"] }),
            ));
        }

        self.repository
            .update_profile(email, patch)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "email": email })))
    }

    /// Checks storage connectivity.
    pub async fn storage_health(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;
    use chrono::Utc;
    use serde_json::Map;

    fn new_user(email: &str, role: Role) -> NewUser {
        NewUser {
            email: email.to_string(),
            name: Some("Ann".to_string()),
            photo_url: None,
            role,
            extra: Map::new(),
        }
    }

    fn stored(id: i64, new_user: NewUser) -> User {
        User {
            id,
            email: new_user.email,
            name: new_user.name,
            photo_url: new_user.photo_url,
            role: new_user.role,
            extra: new_user.extra,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_new_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_create_if_absent()
            .times(1)
            .returning(|u| Ok(Some(stored(1, u))));

        let service = UserService::new(Arc::new(repo));

        let created = service
            .register(new_user("a@x.io", Role::Participant))
            .await
            .unwrap();

        assert_eq!(created.unwrap().email, "a@x.io");
    }

    #[tokio::test]
    async fn test_register_existing_email_returns_none() {
        let mut repo = MockUserRepository::new();
        repo.expect_create_if_absent()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repo));

        let created = service
            .register(new_user("a@x.io", Role::Creator))
            .await
            .unwrap();

        assert!(created.is_none());
    }

    #[tokio::test]
    async fn test_register_as_admin_rejected() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().times(1).returning(|_| Ok(None));
        repo.expect_create_if_absent().times(0);

        let service = UserService::new(Arc::new(repo));

        let err = service
            .register(new_user("a@x.io", Role::Admin))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_register_existing_email_as_admin_returns_none() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .times(1)
            .returning(|email| Ok(Some(stored(1, new_user(email, Role::Admin)))));
        repo.expect_create_if_absent().times(0);

        let service = UserService::new(Arc::new(repo));

        let created = service
            .register(new_user("a@x.io", Role::Admin))
            .await
            .unwrap();

        assert!(created.is_none());
    }

    #[tokio::test]
    async fn test_set_role_unknown_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_update_role()
            .withf(|id, role| *id == 9 && *role == Role::Creator)
            .times(1)
            .returning(|_, _| Ok(false));

        let service = UserService::new(Arc::new(repo));

        let err = service.set_role(9, Role::Creator).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_role_of_unknown_is_none() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().times(1).returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repo));

        assert_eq!(service.role_of("ghost@x.io").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_profile_empty_patch_rejected() {
        let repo = MockUserRepository::new();
        let service = UserService::new(Arc::new(repo));

        let err = service
            .update_profile("a@x.io", ProfilePatch::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_delete_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete().times(1).returning(|_| Ok(false));

        let service = UserService::new(Arc::new(repo));

        let err = service.delete_user(3).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }
}
