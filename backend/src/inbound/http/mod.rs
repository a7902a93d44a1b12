//! HTTP inbound adapter: server-rendered pages and JSON endpoints.

pub mod auth;
pub mod dashboard;
pub mod error;
pub mod feed;
pub mod friends;
pub mod goals;
pub mod health;
pub mod records;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod views;

pub use error::ApiResult;

use actix_web::web;

/// Register every page and JSON endpoint.
///
/// Health probes are registered separately so they stay outside the session
/// middleware.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::inbound::http::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(users::index)
        .service(users::login)
        .service(users::logout)
        .service(users::list_users)
        .service(dashboard::dashboard)
        .service(goals::goals_page)
        .service(goals::create_goal)
        .service(goals::delete_goal)
        .service(records::records_page)
        .service(records::log_record)
        .service(records::chart_data)
        .service(friends::friends_page)
        .service(friends::connect)
        .service(friends::unfriend)
        .service(feed::feed_page)
        .service(feed::create_post);
}
