//! End-to-end page and JSON flows over a real SQLite database.

use std::sync::Arc;

use actix_http::Request;
use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test as actix_test, web};
use mockable::Clock;
use rstest::rstest;
use serde_json::Value;

use backend::Trace;
use backend::domain::TRACE_ID_HEADER;
use backend::inbound::http::configure;
use backend::inbound::http::views::Views;
use backend::test_support::FixtureClock;
use backend::test_support::sqlite::TempDatabase;

#[path = "../src/server/state_builders.rs"]
mod state_builders;

/// Browser stand-in that keeps the latest session cookie.
#[derive(Default)]
struct Browser {
    cookie: Option<Cookie<'static>>,
}

impl Browser {
    async fn send<S>(&mut self, app: &S, request: actix_test::TestRequest) -> ServiceResponse
    where
        S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        let request = match &self.cookie {
            Some(cookie) => request.cookie(cookie.clone()),
            None => request,
        };
        let response = actix_test::call_service(app, request.to_request()).await;
        if let Some(cookie) = response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
        {
            self.cookie = Some(cookie.into_owned());
        }
        response
    }

    async fn get<S>(&mut self, app: &S, path: &str) -> ServiceResponse
    where
        S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        self.send(app, actix_test::TestRequest::get().uri(path)).await
    }

    async fn post<S>(&mut self, app: &S, path: &str, form: &[(&str, &str)]) -> ServiceResponse
    where
        S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        self.send(app, actix_test::TestRequest::post().uri(path).set_form(form))
            .await
    }

    async fn page<S>(&mut self, app: &S, path: &str) -> String
    where
        S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        let response = self.get(app, path).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {path}");
        let body = actix_test::read_body(response).await;
        String::from_utf8_lossy(&body).into_owned()
    }
}

fn location(response: &ServiceResponse) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

fn assert_redirect(response: ServiceResponse, target: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some(target));
}

fn user_id_of(users: &Value, name: &str) -> String {
    users
        .as_array()
        .expect("user array")
        .iter()
        .find(|user| user["username"] == name)
        .map(|user| user["id"].to_string())
        .expect("user listed")
}

macro_rules! fitness_app {
    ($db:expr) => {{
        let clock: Arc<dyn Clock> = Arc::new(FixtureClock::default());
        let state = web::Data::new(state_builders::build_http_state(&$db.pool(), clock));
        let views = web::Data::new(Views::new().expect("templates compile"));
        let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
            .cookie_name("session".to_owned())
            .cookie_secure(false)
            .build();
        actix_test::init_service(
            App::new()
                .app_data(state)
                .app_data(views)
                .wrap(Trace)
                .service(web::scope("").wrap(session).configure(configure)),
        )
        .await
    }};
}

#[rstest]
#[actix_web::test]
async fn directory_lists_seeded_users() {
    let db = TempDatabase::new().await;
    let app = fitness_app!(db);
    let mut anonymous = Browser::default();

    let response = anonymous.get(&app, "/api/users").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(TRACE_ID_HEADER));
    let users: Value = actix_test::read_body_json(response).await;
    let names: Vec<&str> = users
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|user| user["username"].as_str())
        .collect();
    assert_eq!(names, vec!["alice", "bob", "carol"]);

    let index = anonymous.page(&app, "/").await;
    assert!(index.contains("carol"));
}

#[rstest]
#[actix_web::test]
async fn anonymous_visitors_are_turned_away() {
    let db = TempDatabase::new().await;
    let app = fitness_app!(db);
    let mut anonymous = Browser::default();

    for path in ["/dashboard", "/goals", "/records", "/friends", "/feed"] {
        assert_redirect(anonymous.get(&app, path).await, "/");
    }
    let chart = anonymous.get(&app, "/api/chart_data").await;
    assert_eq!(chart.status(), StatusCode::FORBIDDEN);
}

#[rstest]
#[actix_web::test]
async fn blank_login_shows_notice() {
    let db = TempDatabase::new().await;
    let app = fitness_app!(db);
    let mut browser = Browser::default();

    assert_redirect(browser.post(&app, "/", &[("username", "  ")]).await, "/");
    let index = browser.page(&app, "/").await;
    assert!(index.contains("Please enter a username."));
}

#[rstest]
#[actix_web::test]
async fn goals_are_created_and_deleted() {
    let db = TempDatabase::new().await;
    let app = fitness_app!(db);
    let mut alice = Browser::default();

    assert_redirect(alice.post(&app, "/", &[("username", "alice")]).await, "/dashboard");
    assert_redirect(
        alice
            .post(&app, "/goals", &[("name", "Run 5k"), ("target", "5"), ("notes", "")])
            .await,
        "/goals",
    );

    let goals = alice.page(&app, "/goals").await;
    assert!(goals.contains("Run 5k"));
    let dashboard = alice.page(&app, "/dashboard").await;
    assert!(dashboard.contains("Run 5k"));

    assert_redirect(alice.post(&app, "/goals/delete/1", &[]).await, "/goals");
    let goals = alice.page(&app, "/goals").await;
    assert!(!goals.contains("Run 5k"));
}

#[rstest]
#[actix_web::test]
async fn shared_record_reaches_friend_feed_and_chart() {
    let db = TempDatabase::new().await;
    let app = fitness_app!(db);
    let mut alice = Browser::default();
    let mut bob = Browser::default();

    assert_redirect(alice.post(&app, "/", &[("username", "alice")]).await, "/dashboard");
    assert_redirect(bob.post(&app, "/", &[("username", "bob")]).await, "/dashboard");

    let users: Value = actix_test::read_body_json(bob.get(&app, "/api/users").await).await;
    let alice_id = user_id_of(&users, "alice");

    assert_redirect(
        bob.post(&app, "/friends", &[("other", alice_id.as_str())]).await,
        "/friends",
    );
    let friends = bob.page(&app, "/friends").await;
    assert!(friends.contains("Connected with alice."));

    assert_redirect(
        alice
            .post(
                &app,
                "/records",
                &[
                    ("date", "2024-01-01"),
                    ("activity", "Running"),
                    ("value", "5"),
                    ("share", "friends"),
                ],
            )
            .await,
        "/records",
    );

    let feed = bob.page(&app, "/feed").await;
    assert!(feed.contains("alice logged Running: 5 on 2024-01-01"));

    let chart = alice.get(&app, "/api/chart_data").await;
    assert_eq!(chart.status(), StatusCode::OK);
    let chart: Value = actix_test::read_body_json(chart).await;
    assert_eq!(chart["Running"][0]["date"], "2024-01-01");
    assert_eq!(chart["Running"][0]["value"], 5.0);

    // Bob has no records of his own.
    let bob_chart: Value = actix_test::read_body_json(bob.get(&app, "/api/chart_data").await).await;
    assert_eq!(bob_chart, serde_json::json!({}));
}

#[rstest]
#[actix_web::test]
async fn friends_only_posts_stay_private_until_connected() {
    let db = TempDatabase::new().await;
    let app = fitness_app!(db);
    let mut carol = Browser::default();
    let mut bob = Browser::default();

    assert_redirect(carol.post(&app, "/", &[("username", "carol")]).await, "/dashboard");
    assert_redirect(bob.post(&app, "/", &[("username", "bob")]).await, "/dashboard");

    assert_redirect(
        carol
            .post(&app, "/post", &[("content", "hello friends"), ("visibility", "friends")])
            .await,
        "/dashboard",
    );
    assert_redirect(
        carol
            .post(&app, "/post", &[("content", "hello world"), ("visibility", "community")])
            .await,
        "/dashboard",
    );

    let feed = bob.page(&app, "/feed").await;
    assert!(feed.contains("hello world"));
    assert!(!feed.contains("hello friends"));

    let users: Value = actix_test::read_body_json(bob.get(&app, "/api/users").await).await;
    let carol_id = user_id_of(&users, "carol");
    bob.post(&app, "/friends", &[("other", carol_id.as_str())]).await;
    let feed = bob.page(&app, "/feed").await;
    assert!(feed.contains("hello friends"));

    assert_redirect(
        bob.post(&app, &format!("/unfriend/{carol_id}"), &[]).await,
        "/friends",
    );
    let feed = bob.page(&app, "/feed").await;
    assert!(!feed.contains("hello friends"));
}

#[rstest]
#[actix_web::test]
async fn logout_clears_the_session() {
    let db = TempDatabase::new().await;
    let app = fitness_app!(db);
    let mut alice = Browser::default();

    assert_redirect(alice.post(&app, "/", &[("username", "alice")]).await, "/dashboard");
    assert_eq!(alice.get(&app, "/dashboard").await.status(), StatusCode::OK);
    assert_redirect(alice.get(&app, "/logout").await, "/");
    assert_redirect(alice.get(&app, "/dashboard").await, "/");
}
