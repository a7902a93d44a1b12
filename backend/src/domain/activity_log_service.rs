//! Activity log service: record logging, auto-posting and chart data.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    ActivityLogCommand, ActivityLogQuery, LogRecordRequest, RecordRepository,
    RecordRepositoryError,
};
use crate::domain::{
    ActivityRecord, ChartData, Error, RECENT_RECORDS_LIMIT, RecordDraft, UserId,
    aggregate_by_activity,
};

fn map_repository_error(error: RecordRepositoryError) -> Error {
    match error {
        RecordRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("record repository unavailable: {message}"))
        }
        RecordRepositoryError::Query { message } => {
            Error::internal(format!("record repository error: {message}"))
        }
    }
}

/// Service implementing the activity log driving ports.
#[derive(Clone)]
pub struct ActivityLogService<R> {
    record_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ActivityLogService<R> {
    pub fn new(record_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { record_repo, clock }
    }
}

#[async_trait]
impl<R> ActivityLogCommand for ActivityLogService<R>
where
    R: RecordRepository,
{
    async fn log_record(&self, request: LogRecordRequest) -> Result<ActivityRecord, Error> {
        let now = self.clock.utc();
        let draft = RecordDraft::try_from_form(
            request.date.as_deref(),
            request.activity.as_deref(),
            request.value.as_deref(),
            request.share.as_deref(),
            now.date_naive(),
        )
        .map_err(|err| Error::invalid_request(err.to_string()))?;

        let record = draft.into_new_record(request.author.id(), now);
        let post = record.auto_post(request.author.username());
        let shared = post.is_some();
        let stored = self
            .record_repo
            .insert_with_post(&record, post)
            .await
            .map_err(map_repository_error)?;

        info!(
            user_id = %request.author.id(),
            record_id = stored.id.get(),
            shared,
            "activity recorded"
        );
        Ok(stored)
    }
}

#[async_trait]
impl<R> ActivityLogQuery for ActivityLogService<R>
where
    R: RecordRepository,
{
    async fn recent_records(&self, owner: UserId) -> Result<Vec<ActivityRecord>, Error> {
        self.record_repo
            .recent_for_owner(owner, RECENT_RECORDS_LIMIT)
            .await
            .map_err(map_repository_error)
    }

    async fn chart_data(&self, owner: UserId) -> Result<ChartData, Error> {
        let records = self
            .record_repo
            .chronological_for_owner(owner)
            .await
            .map_err(map_repository_error)?;
        Ok(aggregate_by_activity(&records))
    }
}

#[cfg(test)]
#[path = "activity_log_service_tests.rs"]
mod tests;
