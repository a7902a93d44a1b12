//! Tests for the activity log service.

use std::sync::Arc;

use chrono::NaiveDate;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockRecordRepository;
use crate::domain::{
    ErrorCode, NewRecord, RecordId, ShareScope, User, Username, Visibility,
};
use crate::test_support::{FixtureClock, fixture_timestamp};

#[fixture]
fn alice() -> User {
    User::new(
        UserId::new(1),
        Username::new("alice").expect("fixture username"),
        fixture_timestamp(),
    )
}

fn service(repo: MockRecordRepository) -> ActivityLogService<MockRecordRepository> {
    ActivityLogService::new(Arc::new(repo), Arc::new(FixtureClock::default()))
}

fn request(author: User, date: Option<&str>, share: Option<&str>) -> LogRecordRequest {
    LogRecordRequest {
        author,
        date: date.map(str::to_owned),
        activity: Some("running".to_owned()),
        value: Some("5.0".to_owned()),
        share: share.map(str::to_owned),
    }
}

fn stored(record: &NewRecord, id: i32) -> ActivityRecord {
    ActivityRecord {
        id: RecordId::new(id),
        user_id: record.user_id,
        date: record.date,
        activity: record.activity.clone(),
        value: record.value.as_str().to_owned(),
        shared: record.shared,
        created_at: record.created_at,
    }
}

#[rstest]
#[tokio::test]
async fn community_share_writes_record_and_post_together(alice: User) {
    let mut repo = MockRecordRepository::new();
    repo.expect_insert_with_post()
        .withf(|record, post| {
            let Some(post) = post else { return false };
            record.shared == ShareScope::Community
                && post.content == "alice logged running: 5.0 on 2024-01-01"
                && post.visibility == Visibility::Community
                && post.user_id == UserId::new(1)
        })
        .times(1)
        .return_once(|record, _| Ok(stored(record, 1)));

    let record = service(repo)
        .log_record(request(alice, Some("2024-01-01"), Some("community")))
        .await
        .expect("record logged");
    assert_eq!(record.value, "5.0");
}

#[rstest]
#[tokio::test]
async fn unshared_record_has_no_post_and_defaults_date_to_today(alice: User) {
    let today = fixture_timestamp().date_naive();
    let mut repo = MockRecordRepository::new();
    repo.expect_insert_with_post()
        .withf(move |record, post| post.is_none() && record.date == today)
        .times(1)
        .return_once(|record, _| Ok(stored(record, 2)));

    service(repo)
        .log_record(request(alice, None, None))
        .await
        .expect("record logged");
}

#[rstest]
#[tokio::test]
async fn non_numeric_value_is_rejected_before_writing(alice: User) {
    let mut repo = MockRecordRepository::new();
    repo.expect_insert_with_post().times(0);
    let mut bad = request(alice, None, Some("friends"));
    bad.value = Some("five".to_owned());

    let error = service(repo).log_record(bad).await.expect_err("invalid value");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn recent_records_are_capped() {
    let mut repo = MockRecordRepository::new();
    repo.expect_recent_for_owner()
        .withf(|_, limit| *limit == RECENT_RECORDS_LIMIT)
        .times(1)
        .return_once(|_, _| Ok(Vec::new()));

    let records = service(repo)
        .recent_records(UserId::new(1))
        .await
        .expect("listing succeeds");
    assert!(records.is_empty());
}

#[rstest]
#[tokio::test]
async fn chart_data_groups_chronological_records() {
    let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).expect("valid date");
    let rows = vec![
        ActivityRecord {
            id: RecordId::new(1),
            user_id: UserId::new(1),
            date: day(1),
            activity: "running".to_owned(),
            value: "5".to_owned(),
            shared: ShareScope::None,
            created_at: fixture_timestamp(),
        },
        ActivityRecord {
            id: RecordId::new(2),
            user_id: UserId::new(1),
            date: day(2),
            activity: "rowing".to_owned(),
            value: "2.5".to_owned(),
            shared: ShareScope::None,
            created_at: fixture_timestamp(),
        },
    ];
    let mut repo = MockRecordRepository::new();
    repo.expect_chronological_for_owner()
        .return_once(move |_| Ok(rows));

    let chart = service(repo)
        .chart_data(UserId::new(1))
        .await
        .expect("chart built");
    assert_eq!(chart.keys().collect::<Vec<_>>(), vec!["rowing", "running"]);
    assert_eq!(chart["rowing"][0].value, 2.5);
}

#[rstest]
#[tokio::test]
async fn query_failures_map_to_internal_errors() {
    let mut repo = MockRecordRepository::new();
    repo.expect_chronological_for_owner()
        .return_once(|_| Err(RecordRepositoryError::query("no such table")));

    let error = service(repo)
        .chart_data(UserId::new(1))
        .await
        .expect_err("store failure");
    assert_eq!(error.code(), ErrorCode::InternalError);
}
