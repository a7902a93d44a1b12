//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    ActivityLogCommand, ActivityLogQuery, FeedQuery, FriendshipCommand, FriendshipQuery,
    GoalCommand, GoalQuery, LoginService, PostCommand, UsersQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub users: Arc<dyn UsersQuery>,
    pub goals: Arc<dyn GoalCommand>,
    pub goals_query: Arc<dyn GoalQuery>,
    pub records: Arc<dyn ActivityLogCommand>,
    pub records_query: Arc<dyn ActivityLogQuery>,
    pub friendships: Arc<dyn FriendshipCommand>,
    pub friendships_query: Arc<dyn FriendshipQuery>,
    pub posts: Arc<dyn PostCommand>,
    pub feed: Arc<dyn FeedQuery>,
}
