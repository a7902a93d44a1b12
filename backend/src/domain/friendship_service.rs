//! Friendship service: symmetric connect and disconnect.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    FriendRepository, FriendRepositoryError, FriendshipCommand, FriendshipQuery,
    UserPersistenceError, UserRepository,
};
use crate::domain::{ConnectOutcome, Error, NewFriendLink, User, UserId};

fn map_friend_error(error: FriendRepositoryError) -> Error {
    match error {
        FriendRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("friend repository unavailable: {message}"))
        }
        FriendRepositoryError::Query { message } => {
            Error::internal(format!("friend repository error: {message}"))
        }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

/// Service implementing the friendship driving ports.
#[derive(Clone)]
pub struct FriendshipService<F, U> {
    friend_repo: Arc<F>,
    user_repo: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<F, U> FriendshipService<F, U> {
    pub fn new(friend_repo: Arc<F>, user_repo: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            friend_repo,
            user_repo,
            clock,
        }
    }
}

#[async_trait]
impl<F, U> FriendshipCommand for FriendshipService<F, U>
where
    F: FriendRepository,
    U: UserRepository,
{
    async fn connect(&self, user: UserId, target: &str) -> Result<ConnectOutcome, Error> {
        let target = target.trim();
        if target.is_empty() {
            return Ok(ConnectOutcome::NothingSelected);
        }
        let Ok(other_id) = target.parse::<UserId>() else {
            return Ok(ConnectOutcome::UnknownUser);
        };
        let Some(other) = self
            .user_repo
            .find_by_id(other_id)
            .await
            .map_err(map_user_error)?
        else {
            return Ok(ConnectOutcome::UnknownUser);
        };
        if other_id == user {
            return Ok(ConnectOutcome::SelfLink);
        }
        if self
            .friend_repo
            .linked(user, other_id)
            .await
            .map_err(map_friend_error)?
        {
            return Ok(ConnectOutcome::AlreadyConnected);
        }

        let link = NewFriendLink {
            user_id: user,
            friend_id: other_id,
            created_at: self.clock.utc(),
        };
        let inserted = self
            .friend_repo
            .insert(&link)
            .await
            .map_err(map_friend_error)?;
        if !inserted {
            debug!(%user, friend = %other_id, "lost insert race for friend link");
            return Ok(ConnectOutcome::AlreadyConnected);
        }

        info!(%user, friend = %other_id, "friend link created");
        Ok(ConnectOutcome::Connected {
            friend: other.username().clone(),
        })
    }

    async fn disconnect(&self, user: UserId, other: UserId) -> Result<(), Error> {
        let removed = self
            .friend_repo
            .delete_pair(user, other)
            .await
            .map_err(map_friend_error)?;
        debug!(%user, %other, removed, "friend link removed");
        Ok(())
    }
}

#[async_trait]
impl<F, U> FriendshipQuery for FriendshipService<F, U>
where
    F: FriendRepository,
    U: UserRepository,
{
    async fn list_friends(&self, user: UserId) -> Result<Vec<User>, Error> {
        self.friend_repo
            .friends_of(user)
            .await
            .map_err(map_friend_error)
    }
}

#[cfg(test)]
#[path = "friendship_service_tests.rs"]
mod tests;
