//! Tests for user identity types.

use super::*;
use chrono::TimeZone;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case("alice", "alice")]
#[case("  bob\t", "bob")]
#[case("Carol", "Carol")]
fn username_is_trimmed(#[case] raw: &str, #[case] expected: &str) {
    let name = Username::new(raw).expect("valid username");
    assert_eq!(name.as_ref(), expected);
}

#[rstest]
#[case("")]
#[case("   ")]
fn blank_username_is_rejected(#[case] raw: &str) {
    assert_eq!(Username::new(raw), Err(UserValidationError::EmptyUsername));
}

#[rstest]
fn overlong_username_is_rejected() {
    let raw = "x".repeat(USERNAME_MAX + 1);
    assert_eq!(
        Username::new(raw),
        Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX })
    );
}

#[rstest]
fn username_at_limit_is_accepted() {
    let raw = "é".repeat(USERNAME_MAX);
    assert!(Username::new(raw).is_ok());
}

#[rstest]
fn empty_username_message_matches_notice() {
    assert_eq!(
        UserValidationError::EmptyUsername.to_string(),
        "Please enter a username."
    );
}

#[rstest]
#[case("7", Some(7))]
#[case(" 12 ", Some(12))]
#[case("abc", None)]
#[case("", None)]
fn user_id_parses_form_values(#[case] raw: &str, #[case] expected: Option<i32>) {
    assert_eq!(raw.parse::<UserId>().ok().map(UserId::get), expected);
}

#[rstest]
fn summary_serialises_id_and_username() {
    let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("timestamp");
    let user = User::new(
        UserId::new(3),
        Username::new("carol").expect("username"),
        created,
    );
    let value = serde_json::to_value(UserSummary::from(&user)).expect("serialise");
    assert_eq!(value, json!({ "id": 3, "username": "carol" }));
}
