//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Return the user named `username`, inserting it stamped with
    /// `created_at` when absent.
    async fn insert_if_absent(
        &self,
        username: &Username,
        created_at: DateTime<Utc>,
    ) -> Result<User, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// All users ordered by username.
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// All users except `excluded`, ordered by username.
    async fn list_except(&self, excluded: UserId) -> Result<Vec<User>, UserPersistenceError>;
}
