//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub age: i32,
    /// Set once when the user is created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Merge a normalized update into this user.
    ///
    /// `id` and `created_at` are never touched.
    pub fn apply(&mut self, changes: UserChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(age) = changes.age {
            self.age = age;
        }
    }
}

/// A user that has not been stored yet and so has no id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub age: i32,
    pub created_at: DateTime<Utc>,
}

/// User creation data transfer object
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    /// Display name
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "Ann"))]
    pub name: String,
    /// Email address, unique across users
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "ann@x.com"))]
    pub email: String,
    /// Age in years
    #[cfg_attr(feature = "openapi", schema(example = 30))]
    pub age: Option<i32>,
    /// Creation timestamp (`yyyy-MM-dd HH:mm:ss`, UTC); the service uses the
    /// current time when absent
    #[serde(default, with = "crate::timestamp::option")]
    #[cfg_attr(
        feature = "openapi",
        schema(value_type = Option<String>, example = "2024-01-01 10:00:00")
    )]
    pub created_at: Option<DateTime<Utc>>,
}

/// User update data transfer object.
///
/// Absent and blank fields leave the stored value unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    /// New display name
    #[cfg_attr(feature = "openapi", schema(example = "Bob"))]
    pub name: Option<String>,
    /// New email address
    #[cfg_attr(feature = "openapi", schema(example = "bob@x.com"))]
    pub email: Option<String>,
    /// New age
    pub age: Option<i32>,
}

/// Validated update with blanks already folded into `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.age.is_none()
    }
}

/// User view returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    /// Identifier assigned on creation
    #[cfg_attr(feature = "openapi", schema(example = 1))]
    pub id: i32,
    #[cfg_attr(feature = "openapi", schema(example = "Ann"))]
    pub name: String,
    #[cfg_attr(feature = "openapi", schema(example = "ann@x.com"))]
    pub email: String,
    #[cfg_attr(feature = "openapi", schema(example = 30))]
    pub age: i32,
    #[serde(with = "crate::timestamp")]
    #[cfg_attr(
        feature = "openapi",
        schema(value_type = String, example = "2024-01-01 10:00:00")
    )]
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            age: user.age,
            created_at: user.created_at,
        }
    }
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            age: user.age,
            created_at: user.created_at,
        }
    }
}

impl std::fmt::Display for UserView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "User {{ id: {}, name: {}, email: {}, age: {}, created: {} }}",
            self.id,
            self.name,
            self.email,
            self.age,
            crate::timestamp::format(&self.created_at)
        )
    }
}
