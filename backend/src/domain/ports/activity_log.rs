//! Driving ports for activity records and chart data.

use async_trait::async_trait;

use crate::domain::{ActivityRecord, ChartData, Error, User, UserId};

/// Raw record form submitted by `author`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecordRequest {
    pub author: User,
    pub date: Option<String>,
    pub activity: Option<String>,
    pub value: Option<String>,
    pub share: Option<String>,
}

/// Record mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityLogCommand: Send + Sync {
    /// Validate and store a record, publishing an auto-post when shared.
    async fn log_record(&self, request: LogRecordRequest) -> Result<ActivityRecord, Error>;
}

/// Record reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityLogQuery: Send + Sync {
    /// The owner's most recent records, newest date first.
    async fn recent_records(&self, owner: UserId) -> Result<Vec<ActivityRecord>, Error>;

    /// The owner's records grouped into per-activity series.
    async fn chart_data(&self, owner: UserId) -> Result<ChartData, Error>;
}
