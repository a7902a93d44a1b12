//! Driving port for user lookups and listings.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Resolve a session user id. `None` when the user no longer exists.
    async fn find_user(&self, id: UserId) -> Result<Option<User>, Error>;

    /// Every user, ordered by username.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// Every user except `viewer`, ordered by username.
    async fn list_other_users(&self, viewer: UserId) -> Result<Vec<User>, Error>;
}
