//! User service - Handles user-related business logic.
//!
//! Checks run in a fixed order: structural validation, then conflicts with
//! stored state, then existence of the referenced record.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use common::{AppError, AppResult, OptionExt};
use domain::{CreateUser, UpdateUser, UserView};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Validate and store a new user
    async fn create_user(&self, request: CreateUser) -> AppResult<UserView>;

    /// Get user by ID
    async fn get_user(&self, id: i32) -> AppResult<UserView>;

    /// List all users in insertion order
    async fn list_users(&self) -> AppResult<Vec<UserView>>;

    /// Merge the non-blank fields of `request` into an existing user
    async fn update_user(&self, id: i32, request: UpdateUser) -> AppResult<UserView>;

    /// Delete an existing user
    async fn delete_user(&self, id: i32) -> AppResult<()>;

    /// Check that storage is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, request: CreateUser) -> AppResult<UserView> {
        let new_user = request.into_new_user(Utc::now())?;

        // Best-effort pre-check; the unique index is the real guarantee
        if self.repo.exists_by_email(&new_user.email).await? {
            tracing::warn!(email = %new_user.email, "Rejected duplicate email");
            return Err(AppError::conflict(new_user.email));
        }

        let user = self.repo.save(new_user).await?;
        tracing::info!(id = user.id, "User created");
        Ok(UserView::from(user))
    }

    async fn get_user(&self, id: i32) -> AppResult<UserView> {
        self.repo
            .find_by_id(id)
            .await?
            .map(UserView::from)
            .ok_or_not_found(id)
    }

    async fn list_users(&self) -> AppResult<Vec<UserView>> {
        let users = self.repo.find_all().await?;
        Ok(users.into_iter().map(UserView::from).collect())
    }

    async fn update_user(&self, id: i32, request: UpdateUser) -> AppResult<UserView> {
        let changes = request.into_changes()?;

        let mut user = self.repo.find_by_id(id).await?.ok_or_not_found(id)?;
        if changes.is_empty() {
            tracing::debug!(id, "Update carried no changes");
            return Ok(UserView::from(user));
        }

        user.apply(changes);
        let user = self.repo.update(user).await?;
        tracing::info!(id, "User updated");
        Ok(UserView::from(user))
    }

    async fn delete_user(&self, id: i32) -> AppResult<()> {
        let user = self.repo.find_by_id(id).await?.ok_or_not_found(id)?;
        self.repo.delete(user).await?;
        tracing::info!(id, "User deleted");
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        self.repo.ping().await
    }
}
