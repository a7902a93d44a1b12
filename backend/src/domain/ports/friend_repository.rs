//! Port for symmetric friend link persistence.

use async_trait::async_trait;

use crate::domain::{NewFriendLink, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by friend repository adapters.
    pub enum FriendRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "friend repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "friend repository query failed: {message}",
    }
}

/// Port for friend links. Every method treats a pair as unordered.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FriendRepository: Send + Sync {
    /// Whether a link joins `a` and `b` in either direction.
    async fn linked(&self, a: UserId, b: UserId) -> Result<bool, FriendRepositoryError>;

    /// Insert a link. Returns `false` when the pair is already linked.
    async fn insert(&self, link: &NewFriendLink) -> Result<bool, FriendRepositoryError>;

    /// Remove the link joining `a` and `b`. Returns the number of rows removed.
    async fn delete_pair(&self, a: UserId, b: UserId) -> Result<usize, FriendRepositoryError>;

    /// Users linked to `user`, ordered by username.
    async fn friends_of(&self, user: UserId) -> Result<Vec<User>, FriendRepositoryError>;
}
