//! Wire the Diesel adapters into the domain services behind [`HttpState`].

use std::sync::Arc;

use mockable::Clock;

use backend::domain::{
    ActivityLogService, FeedService, FriendshipService, GoalService, IdentityService,
};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{
    DbPool, DieselFriendRepository, DieselGoalRepository, DieselPostRepository,
    DieselRecordRepository, DieselUserRepository,
};

/// Build the handler state over a migrated database.
///
/// Each service implements both halves of its command/query pair, so one
/// instance backs both fields.
pub fn build_http_state(pool: &DbPool, clock: Arc<dyn Clock>) -> HttpState {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let identity = Arc::new(IdentityService::new(users.clone(), clock.clone()));
    let goals = Arc::new(GoalService::new(
        Arc::new(DieselGoalRepository::new(pool.clone())),
        clock.clone(),
    ));
    let records = Arc::new(ActivityLogService::new(
        Arc::new(DieselRecordRepository::new(pool.clone())),
        clock.clone(),
    ));
    let friendships = Arc::new(FriendshipService::new(
        Arc::new(DieselFriendRepository::new(pool.clone())),
        users,
        clock.clone(),
    ));
    let feed = Arc::new(FeedService::new(
        Arc::new(DieselPostRepository::new(pool.clone())),
        clock,
    ));

    HttpState {
        login: identity.clone(),
        users: identity,
        goals: goals.clone(),
        goals_query: goals,
        records: records.clone(),
        records_query: records,
        friendships: friendships.clone(),
        friendships_query: friendships,
        posts: feed.clone(),
        feed,
    }
}
