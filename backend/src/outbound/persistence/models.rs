//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types live here so
//! each repository maps rows the same way.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;
use tracing::warn;

use crate::domain::{
    ActivityRecord, Goal, GoalId, Post, PostId, RecordId, ShareScope, User, UserId, Username,
    Visibility,
};

use super::schema::{friends, goals, posts, records, users};

/// Stored timestamps are naive UTC.
pub(crate) fn to_utc(value: NaiveDateTime) -> DateTime<Utc> {
    value.and_utc()
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct UserRow {
    pub id: i32,
    pub username: String,
    pub created_at: NaiveDateTime,
}

impl UserRow {
    /// Convert into a domain user, rejecting names the domain would refuse.
    pub fn into_domain(self) -> Result<User, String> {
        let username = Username::new(&self.username)
            .map_err(|err| format!("stored username for user {} is invalid: {err}", self.id))?;
        Ok(User::new(
            UserId::new(self.id),
            username,
            to_utc(self.created_at),
        ))
    }
}

/// Insertable struct for registering a user.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub created_at: NaiveDateTime,
}

// ---------------------------------------------------------------------------
// Goals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct GoalRow {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub target: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<GoalRow> for Goal {
    fn from(row: GoalRow) -> Self {
        Self {
            id: GoalId::new(row.id),
            user_id: UserId::new(row.user_id),
            name: row.name,
            target: row.target,
            notes: row.notes,
            created_at: to_utc(row.created_at),
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = goals)]
pub(crate) struct NewGoalRow<'a> {
    pub user_id: i32,
    pub name: &'a str,
    pub target: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub created_at: NaiveDateTime,
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct RecordRow {
    pub id: i32,
    pub user_id: i32,
    pub date: NaiveDate,
    pub activity: String,
    pub value: String,
    pub created_at: NaiveDateTime,
    pub shared: String,
}

impl From<RecordRow> for ActivityRecord {
    fn from(row: RecordRow) -> Self {
        let shared = row.shared.parse().unwrap_or_else(|_| {
            warn!(
                record_id = row.id,
                value = %row.shared,
                "unknown share scope stored; treating as none"
            );
            ShareScope::None
        });
        Self {
            id: RecordId::new(row.id),
            user_id: UserId::new(row.user_id),
            date: row.date,
            activity: row.activity,
            value: row.value,
            shared,
            created_at: to_utc(row.created_at),
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = records)]
pub(crate) struct NewRecordRow<'a> {
    pub user_id: i32,
    pub date: NaiveDate,
    pub activity: &'a str,
    pub value: &'a str,
    pub created_at: NaiveDateTime,
    pub shared: &'a str,
}

// ---------------------------------------------------------------------------
// Friends
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = friends)]
pub(crate) struct NewFriendRow {
    pub user_id: i32,
    pub friend_id: i32,
    pub created_at: NaiveDateTime,
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct PostRow {
    pub id: i32,
    pub user_id: i32,
    pub content: String,
    pub visibility: String,
    pub created_at: NaiveDateTime,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        let visibility = row.visibility.parse().unwrap_or_else(|_| {
            warn!(
                post_id = row.id,
                value = %row.visibility,
                "unknown visibility stored; treating as friends"
            );
            Visibility::Friends
        });
        Self {
            id: PostId::new(row.id),
            user_id: UserId::new(row.user_id),
            content: row.content,
            visibility,
            created_at: to_utc(row.created_at),
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
pub(crate) struct NewPostRow<'a> {
    pub user_id: i32,
    pub content: &'a str,
    pub visibility: &'a str,
    pub created_at: NaiveDateTime,
}
