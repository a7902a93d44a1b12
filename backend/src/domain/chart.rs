//! Per-activity time series for the records chart.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use super::ActivityRecord;

/// One plotted measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChartPoint {
    #[schema(value_type = String, format = Date, example = "2024-01-01")]
    pub date: NaiveDate,
    #[schema(example = 5.0)]
    pub value: f64,
}

/// Activity label to its date-ascending series.
pub type ChartData = BTreeMap<String, Vec<ChartPoint>>;

/// Group records by activity.
///
/// Each series is sorted by date ascending; records sharing a date keep
/// their input order. Rows whose stored value does not parse are skipped.
///
/// # Examples
/// ```
/// use backend::domain::aggregate_by_activity;
///
/// assert!(aggregate_by_activity(&[]).is_empty());
/// ```
pub fn aggregate_by_activity(records: &[ActivityRecord]) -> ChartData {
    let mut out = ChartData::new();
    for record in records {
        let Some(value) = record.numeric_value() else {
            warn!(
                record_id = record.id.get(),
                value = %record.value,
                "skipping record with non-numeric value"
            );
            continue;
        };
        out.entry(record.activity.clone())
            .or_default()
            .push(ChartPoint {
                date: record.date,
                value,
            });
    }
    for series in out.values_mut() {
        series.sort_by_key(|point| point.date);
    }
    out
}
