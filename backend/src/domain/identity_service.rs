//! Identity services: username-only sign in and user listings.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{LoginService, UserPersistenceError, UserRepository, UsersQuery};
use crate::domain::{Error, User, UserId, Username};

fn map_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

/// Service implementing [`LoginService`] and [`UsersQuery`].
#[derive(Clone)]
pub struct IdentityService<R> {
    user_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> IdentityService<R> {
    /// Create a new identity service over the user repository.
    pub fn new(user_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { user_repo, clock }
    }
}

#[async_trait]
impl<R> LoginService for IdentityService<R>
where
    R: UserRepository,
{
    async fn login(&self, username: &str) -> Result<User, Error> {
        let username =
            Username::new(username).map_err(|err| Error::invalid_request(err.to_string()))?;
        let user = self
            .user_repo
            .insert_if_absent(&username, self.clock.utc())
            .await
            .map_err(map_repository_error)?;
        info!(user_id = %user.id(), "user signed in");
        Ok(user)
    }
}

#[async_trait]
impl<R> UsersQuery for IdentityService<R>
where
    R: UserRepository,
{
    async fn find_user(&self, id: UserId) -> Result<Option<User>, Error> {
        self.user_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)
    }

    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.user_repo.list_all().await.map_err(map_repository_error)
    }

    async fn list_other_users(&self, viewer: UserId) -> Result<Vec<User>, Error> {
        self.user_repo
            .list_except(viewer)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "identity_service_tests.rs"]
mod tests;
