//! Driving port for username-only sign in.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! resolve a submitted username to a user without knowing the backing store.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Domain use-case port for signing in.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate `username` and return its user, registering it on first use.
    ///
    /// A blank or overlong username yields an `invalid_request` error whose
    /// message is shown to the user.
    async fn login(&self, username: &str) -> Result<User, Error>;
}
