//! User repository - the persistence gateway.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::{NewUser, User};

#[cfg(test)]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Any method may fail with `AppError::Storage`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user; the store assigns the id
    async fn save(&self, user: NewUser) -> AppResult<User>;

    /// Find user by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// All users in insertion order
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Overwrite name, email and age of an existing user
    async fn update(&self, user: User) -> AppResult<User>;

    /// Remove an existing user
    async fn delete(&self, user: User) -> AppResult<()>;

    /// Remove by key; returns whether a row was removed
    async fn delete_by_id(&self, id: i32) -> AppResult<bool>;

    /// Check if a user with this exact email exists
    async fn exists_by_email(&self, email: &str) -> AppResult<bool>;

    /// Check that the store is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Concrete implementation of UserRepository over SeaORM
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn save(&self, user: NewUser) -> AppResult<User> {
        let model = ActiveModel::from(user)
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(User::from(model))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn update(&self, user: User) -> AppResult<User> {
        let id = user.id;
        let active = ActiveModel {
            id: Unchanged(user.id),
            name: Set(user.name),
            email: Set(user.email),
            age: Set(user.age),
            // Write-once column
            created_at: Unchanged(user.created_at),
        };

        match active.update(&self.db).await {
            Ok(model) => Ok(User::from(model)),
            // Row vanished between lookup and write
            Err(DbErr::RecordNotUpdated) => Err(AppError::NotFound(id)),
            Err(e) => Err(AppError::from(e)),
        }
    }

    async fn delete(&self, user: User) -> AppResult<()> {
        if self.delete_by_id(user.id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound(user.id))
        }
    }

    async fn delete_by_id(&self, id: i32) -> AppResult<bool> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        let count = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }

    async fn ping(&self) -> AppResult<()> {
        self.db.ping().await.map_err(AppError::from)
    }
}
