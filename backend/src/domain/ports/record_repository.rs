//! Port for activity record persistence.

use async_trait::async_trait;

use crate::domain::{ActivityRecord, NewPost, NewRecord, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by record repository adapters.
    pub enum RecordRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "record repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "record repository query failed: {message}",
    }
}

/// Port for appending and reading activity records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Insert `record` and, when given, `post` in one transaction.
    async fn insert_with_post(
        &self,
        record: &NewRecord,
        post: Option<NewPost>,
    ) -> Result<ActivityRecord, RecordRepositoryError>;

    /// Up to `limit` records for `owner`, newest date first.
    async fn recent_for_owner(
        &self,
        owner: UserId,
        limit: i64,
    ) -> Result<Vec<ActivityRecord>, RecordRepositoryError>;

    /// Every record for `owner`, oldest date first.
    async fn chronological_for_owner(
        &self,
        owner: UserId,
    ) -> Result<Vec<ActivityRecord>, RecordRepositoryError>;
}
