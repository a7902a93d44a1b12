//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_http::Request;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{HttpResponse, test, web};
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    MockActivityLogCommand, MockActivityLogQuery, MockFeedQuery, MockFriendshipCommand,
    MockFriendshipQuery, MockGoalCommand, MockGoalQuery, MockLoginService, MockPostCommand,
    MockUsersQuery,
};
use crate::domain::{Error, User, UserId, Username};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::test_support::fixture_timestamp;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Session cookie set by `response`, if any.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

/// Location header of a redirect.
pub fn location<B>(response: &ServiceResponse<B>) -> Option<String> {
    response
        .headers()
        .get(actix_web::http::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// User fixture created at [`fixture_timestamp`].
pub fn user(id: i32, name: &str) -> User {
    user_at(id, name, fixture_timestamp())
}

pub fn user_at(id: i32, name: &str, created_at: DateTime<Utc>) -> User {
    User::new(
        UserId::new(id),
        Username::new(name).expect("fixture username"),
        created_at,
    )
}

/// One mock per driving port. Tests set expectations on the ports they
/// exercise; an unexpected call fails the test.
#[derive(Default)]
pub struct MockPorts {
    pub login: MockLoginService,
    pub users: MockUsersQuery,
    pub goals: MockGoalCommand,
    pub goals_query: MockGoalQuery,
    pub records: MockActivityLogCommand,
    pub records_query: MockActivityLogQuery,
    pub friendships: MockFriendshipCommand,
    pub friendships_query: MockFriendshipQuery,
    pub posts: MockPostCommand,
    pub feed: MockFeedQuery,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState {
            login: Arc::new(self.login),
            users: Arc::new(self.users),
            goals: Arc::new(self.goals),
            goals_query: Arc::new(self.goals_query),
            records: Arc::new(self.records),
            records_query: Arc::new(self.records_query),
            friendships: Arc::new(self.friendships),
            friendships_query: Arc::new(self.friendships_query),
            posts: Arc::new(self.posts),
            feed: Arc::new(self.feed),
        }
    }
}

/// Route path that signs the caller in as the given user id.
pub const SIGN_IN_PATH: &str = "/test/sign-in/{id}";

/// Handler for [`SIGN_IN_PATH`]; stores the id the way `POST /` does.
pub async fn sign_in_handler(
    session: SessionContext,
    id: web::Path<i32>,
) -> Result<HttpResponse, Error> {
    session.persist_user(UserId::new(id.into_inner()))?;
    Ok(HttpResponse::Ok().finish())
}

/// Sign in as `id` through [`sign_in_handler`] and return the session cookie.
pub async fn sign_in_cookie<S>(app: &S, id: i32) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::get()
            .uri(&format!("/test/sign-in/{id}"))
            .to_request(),
    )
    .await;
    session_cookie(&res).expect("session cookie")
}

/// Ports whose user lookup resolves `id` to `name`.
pub fn signed_in_ports(id: i32, name: &'static str) -> MockPorts {
    let mut ports = MockPorts::default();
    ports
        .users
        .expect_find_user()
        .returning(move |lookup| Ok((lookup == UserId::new(id)).then(|| user(id, name))));
    ports
}

/// Read a response body as UTF-8 text.
pub async fn body_text(response: ServiceResponse) -> String {
    let body = test::read_body(response).await;
    String::from_utf8_lossy(&body).into_owned()
}
