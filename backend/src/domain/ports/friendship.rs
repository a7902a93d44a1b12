//! Driving ports for friend links.

use async_trait::async_trait;

use crate::domain::{ConnectOutcome, Error, User, UserId};

/// Friend link mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FriendshipCommand: Send + Sync {
    /// Link `user` with the user whose id is given as raw form text.
    ///
    /// Expected refusals are reported through [`ConnectOutcome`]; errors are
    /// reserved for store failures.
    async fn connect(&self, user: UserId, target: &str) -> Result<ConnectOutcome, Error>;

    /// Remove the link between `user` and `other`, if any.
    async fn disconnect(&self, user: UserId, other: UserId) -> Result<(), Error>;
}

/// Friend link reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FriendshipQuery: Send + Sync {
    /// Users linked to `user`, ordered by username.
    async fn list_friends(&self, user: UserId) -> Result<Vec<User>, Error>;
}
