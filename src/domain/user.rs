//! User domain entity and related types.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::id::UserId;
use super::password::Password;
use crate::config::{USER_TYPE_BUYER, USER_TYPE_SELLER};
use crate::errors::{AppError, AppResult};

/// Role tag of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Seller,
    Buyer,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Seller => USER_TYPE_SELLER,
            UserType::Buyer => USER_TYPE_BUYER,
        }
    }
}

impl std::str::FromStr for UserType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            USER_TYPE_SELLER => Ok(UserType::Seller),
            USER_TYPE_BUYER => Ok(UserType::Buyer),
            other => Err(AppError::validation(format!(
                "Invalid user type '{}'. Must be 'seller' or 'buyer'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical form used for uniqueness checks and storage.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// User domain entity, owned by the store.
///
/// Not `Serialize`: callers reach clients through [`UserResponse`] only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password: Password,
    pub user_type: UserType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a freshly created user; both timestamps are `now`.
    pub fn new(
        id: UserId,
        name: String,
        email: String,
        password: Password,
        user_type: UserType,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            email,
            password,
            user_type,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the mutable fields. A `None` password keeps the current one.
    pub fn apply_update(
        &mut self,
        name: String,
        email: String,
        user_type: UserType,
        password: Option<Password>,
    ) {
        self.name = name;
        self.email = email;
        self.user_type = user_type;
        if let Some(password) = password {
            self.password = password;
        }
        self.touch();
    }

    /// Advance `updated_at`, strictly past its previous value.
    fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::microseconds(1)
        };
    }
}

/// Fields accepted by create and update.
///
/// On update an empty `password` means "keep the current credential".
#[derive(Clone, PartialEq, Eq)]
pub struct UserInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub user_type: UserType,
}

// Keep the plaintext secret out of logs
impl std::fmt::Debug for UserInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserInput")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("user_type", &self.user_type)
            .finish()
    }
}

impl UserInput {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        user_type: UserType,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            user_type,
        }
    }

    /// Trim the name and normalize the email.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: normalize_email(&self.email),
            ..self
        }
    }

    /// Coarse shape check shared by create and update.
    pub fn check_required(&self, require_password: bool) -> AppResult<()> {
        if self.name.is_empty() {
            return Err(AppError::validation("Name is required"));
        }
        if self.email.is_empty() {
            return Err(AppError::validation("Email is required"));
        }
        if require_password && self.password.is_empty() {
            return Err(AppError::validation("Password is required"));
        }
        Ok(())
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: String,
    /// User display name
    #[schema(example = "Ana")]
    pub name: String,
    /// User email address
    #[schema(example = "a@x.com")]
    pub email: String,
    /// User role tag
    #[serde(rename = "type")]
    pub user_type: UserType,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.into(),
            name: user.name,
            email: user.email,
            user_type: user.user_type,
            created_at: user.created_at,
        }
    }
}
