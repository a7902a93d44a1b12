//! Domain ports defining the edges of the hexagon.
//!
//! Driving ports (`*Command`, `*Query`, [`LoginService`]) are called by the
//! HTTP adapter. Driven ports (`*Repository`) are implemented by the
//! persistence adapter and expose typed errors so services can map store
//! failures predictably.

mod macros;
pub(crate) use macros::define_port_error;

mod activity_log;
mod feed;
mod friend_repository;
mod friendship;
mod goal_book;
mod goal_repository;
mod login_service;
mod post_repository;
mod record_repository;
mod user_repository;
mod users_query;

pub use activity_log::{ActivityLogCommand, ActivityLogQuery, LogRecordRequest};
#[cfg(test)]
pub use activity_log::{MockActivityLogCommand, MockActivityLogQuery};
pub use feed::{CreatePostRequest, FeedQuery, PostCommand};
#[cfg(test)]
pub use feed::{MockFeedQuery, MockPostCommand};
#[cfg(test)]
pub use friend_repository::MockFriendRepository;
pub use friend_repository::{FriendRepository, FriendRepositoryError};
pub use friendship::{FriendshipCommand, FriendshipQuery};
#[cfg(test)]
pub use friendship::{MockFriendshipCommand, MockFriendshipQuery};
pub use goal_book::{CreateGoalRequest, GoalCommand, GoalQuery};
#[cfg(test)]
pub use goal_book::{MockGoalCommand, MockGoalQuery};
#[cfg(test)]
pub use goal_repository::MockGoalRepository;
pub use goal_repository::{GoalRepository, GoalRepositoryError};
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::{PostRepository, PostRepositoryError};
#[cfg(test)]
pub use record_repository::MockRecordRepository;
pub use record_repository::{RecordRepository, RecordRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
