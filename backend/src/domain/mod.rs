//! Domain primitives, services and ports.
//!
//! Purpose: define strongly typed entities used by the HTTP and persistence
//! adapters, plus the services that implement the driving ports. Keep types
//! immutable and document invariants in each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, Goal, ActivityRecord, Post, FeedEntry: persisted entities.
//! - GoalDraft, RecordDraft, PostDraft: validated form input.
//! - aggregate_by_activity: chart series builder.
//! - IdentityService, GoalService, ActivityLogService, FriendshipService,
//!   FeedService: implementations of the driving ports in [`ports`].

mod activity_log_service;
pub mod chart;
pub mod error;
mod feed_service;
pub mod friend;
mod friendship_service;
pub mod goal;
mod goal_service;
mod identity_service;
pub mod ports;
pub mod post;
pub mod record;
pub mod trace_id;
pub mod user;
pub mod visibility;

pub use self::activity_log_service::ActivityLogService;
pub use self::chart::{ChartData, ChartPoint, aggregate_by_activity};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::feed_service::FeedService;
pub use self::friend::{ConnectOutcome, NewFriendLink};
pub use self::friendship_service::FriendshipService;
pub use self::goal::{Goal, GoalDraft, GoalId, GoalValidationError, NewGoal};
pub use self::goal_service::GoalService;
pub use self::identity_service::IdentityService;
pub use self::post::{
    DASHBOARD_POST_LIMIT, FEED_LIMIT, FeedEntry, NewPost, Post, PostDraft, PostId,
    PostValidationError,
};
pub use self::record::{
    ActivityRecord, DATE_FORMAT, NewRecord, RECENT_RECORDS_LIMIT, RecordDraft, RecordId,
    RecordValidationError, RecordValue,
};
pub use self::trace_id::TraceId;
pub use self::user::{USERNAME_MAX, User, UserId, UserSummary, UserValidationError, Username};
pub use self::visibility::{ShareScope, UnknownAudience, Visibility};

/// Header carrying the per-request [`TraceId`].
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
