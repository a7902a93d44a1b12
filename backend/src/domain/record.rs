//! Activity records and the auto-post they may trigger.
//!
//! A record is one measurement (`value`) of an activity on a calendar date.
//! Records are immutable once written. The value is persisted as text but is
//! validated as a finite float before it reaches the store.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::{NewPost, ShareScope, UserId, Username};

/// Calendar date format accepted from forms and used in post content.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Maximum number of records shown on the records page.
pub const RECENT_RECORDS_LIMIT: i64 = 100;

/// Validation errors returned by [`RecordDraft::try_from_form`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    MissingActivity,
    MissingValue,
    InvalidValue { value: String },
    InvalidDate { value: String },
    UnknownShareScope { value: String },
}

impl fmt::Display for RecordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingActivity => write!(f, "Please enter an activity."),
            Self::MissingValue => write!(f, "Please enter a value."),
            Self::InvalidValue { value } => write!(f, "\"{value}\" is not a number."),
            Self::InvalidDate { value } => {
                write!(f, "\"{value}\" is not a date; use YYYY-MM-DD.")
            }
            Self::UnknownShareScope { value } => {
                write!(f, "\"{value}\" is not a sharing option.")
            }
        }
    }
}

impl std::error::Error for RecordValidationError {}

/// Store-assigned record identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(i32);

impl RecordId {
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

/// A measurement that parses as a finite float.
///
/// The submitted text (trimmed) is retained so the stored value and the
/// auto-post read exactly as the user typed them.
///
/// # Examples
/// ```
/// use backend::domain::RecordValue;
///
/// let value = RecordValue::parse("5.0").unwrap();
/// assert_eq!(value.as_str(), "5.0");
/// assert_eq!(value.as_f64(), 5.0);
/// assert!(RecordValue::parse("NaN").is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RecordValue {
    text: String,
    number: f64,
}

impl RecordValue {
    /// Parse text into a value, rejecting non-numeric and non-finite input.
    pub fn parse(raw: &str) -> Option<Self> {
        let text = raw.trim();
        let number = text.parse::<f64>().ok().filter(|n| n.is_finite())?;
        Some(Self {
            text: text.to_owned(),
            number,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn as_f64(&self) -> f64 {
        self.number
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    // `%m`/`%d` tolerate single digits, so pin the width as well.
    if raw.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

/// Validated form input for a new record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDraft {
    date: NaiveDate,
    activity: String,
    value: RecordValue,
    share: ShareScope,
}

impl RecordDraft {
    /// Validate raw form fields. A blank date falls back to `today`.
    pub fn try_from_form(
        date: Option<&str>,
        activity: Option<&str>,
        value: Option<&str>,
        share: Option<&str>,
        today: NaiveDate,
    ) -> Result<Self, RecordValidationError> {
        let activity = activity
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .ok_or(RecordValidationError::MissingActivity)?;

        let raw_value = value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(RecordValidationError::MissingValue)?;
        let value = RecordValue::parse(raw_value).ok_or_else(|| {
            RecordValidationError::InvalidValue {
                value: raw_value.to_owned(),
            }
        })?;

        let date = match date.map(str::trim).filter(|d| !d.is_empty()) {
            None => today,
            Some(raw) => parse_date(raw).ok_or_else(|| RecordValidationError::InvalidDate {
                value: raw.to_owned(),
            })?,
        };

        let share = ShareScope::from_form(share).map_err(|_| {
            RecordValidationError::UnknownShareScope {
                value: share.unwrap_or_default().trim().to_owned(),
            }
        })?;

        Ok(Self {
            date,
            activity: activity.to_owned(),
            value,
            share,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn activity(&self) -> &str {
        &self.activity
    }

    pub fn value(&self) -> &RecordValue {
        &self.value
    }

    pub fn share(&self) -> ShareScope {
        self.share
    }

    /// Stamp the draft with its owner and creation time.
    pub fn into_new_record(self, owner: UserId, created_at: DateTime<Utc>) -> NewRecord {
        NewRecord {
            user_id: owner,
            date: self.date,
            activity: self.activity,
            value: self.value,
            shared: self.share,
            created_at,
        }
    }
}

/// Record ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub user_id: UserId,
    pub date: NaiveDate,
    pub activity: String,
    pub value: RecordValue,
    pub shared: ShareScope,
    pub created_at: DateTime<Utc>,
}

impl NewRecord {
    /// Text of the post published when the record is shared.
    pub fn auto_post_content(&self, author: &Username) -> String {
        format!(
            "{author} logged {activity}: {value} on {date}",
            activity = self.activity,
            value = self.value.as_str(),
            date = self.date.format(DATE_FORMAT),
        )
    }

    /// Post to publish alongside the record, if it is shared.
    pub fn auto_post(&self, author: &Username) -> Option<NewPost> {
        self.shared.post_visibility().map(|visibility| NewPost {
            user_id: self.user_id,
            content: self.auto_post_content(author),
            visibility,
            created_at: self.created_at,
        })
    }
}

/// Persisted record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityRecord {
    pub id: RecordId,
    pub user_id: UserId,
    pub date: NaiveDate,
    pub activity: String,
    /// Stored text. Rows written by this application always parse.
    pub value: String,
    pub shared: ShareScope,
    pub created_at: DateTime<Utc>,
}

impl ActivityRecord {
    /// Stored value as a finite float, if it parses.
    pub fn numeric_value(&self) -> Option<f64> {
        RecordValue::parse(&self.value).map(|value| value.as_f64())
    }
}
