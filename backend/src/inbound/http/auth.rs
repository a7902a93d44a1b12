//! Sign-in helpers used by page handlers.
//!
//! Keep the HTTP modules focused on request/response mapping by concentrating
//! current-user resolution and the redirect conventions here.

use actix_web::HttpResponse;
use actix_web::http::header;
use tracing::warn;

use crate::domain::{Error, ErrorCode, User};

use super::session::SessionContext;
use super::state::HttpState;

/// Resolve the signed-in user, if any.
///
/// A session naming a user that no longer exists is cleared and treated as
/// anonymous.
pub async fn current_user(
    state: &HttpState,
    session: &SessionContext,
) -> Result<Option<User>, Error> {
    let Some(id) = session.user_id() else {
        return Ok(None);
    };
    let user = state.users.find_user(id).await?;
    if user.is_none() {
        warn!(user_id = %id, "session names an unknown user; treating as anonymous");
        session.forget_user();
    }
    Ok(user)
}

/// `303 See Other` to `location`.
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Turn a validation failure into a notice for the next page.
///
/// Returns `Ok(None)` once the notice is queued. Any other failure is passed
/// through for the error responder.
pub fn notice_on_invalid<T>(
    session: &SessionContext,
    result: Result<T, Error>,
) -> Result<Option<T>, Error> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.code() == ErrorCode::InvalidRequest => {
            session.push_notice(err.message())?;
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use rstest::rstest;

    #[rstest]
    fn see_other_sets_location() {
        let response = see_other("/dashboard");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|value| value.to_str().ok()),
            Some("/dashboard")
        );
    }

    async fn probe(outcome: Result<u8, Error>) -> (StatusCode, String) {
        let app = actix_test::init_service(
            App::new()
                .wrap(crate::inbound::http::test_utils::test_session_middleware())
                .route(
                    "/",
                    web::get().to(move |session: SessionContext| {
                        let outcome = outcome.clone();
                        async move {
                            let kept = notice_on_invalid(&session, outcome)?;
                            let notices = session.take_notices().join("|");
                            Ok::<_, Error>(
                                HttpResponse::Ok().body(format!("{kept:?}:{notices}")),
                            )
                        }
                    }),
                ),
        )
        .await;
        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request())
                .await;
        let status = res.status();
        let body = actix_test::read_body(res).await;
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    #[actix_web::test]
    async fn success_passes_through() {
        assert_eq!(probe(Ok(1)).await, (StatusCode::OK, "Some(1):".to_owned()));
    }

    #[actix_web::test]
    async fn validation_failure_becomes_notice() {
        let (status, body) = probe(Err(Error::invalid_request("Please enter a username."))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "None:Please enter a username.");
    }

    #[actix_web::test]
    async fn other_failures_propagate() {
        let (status, _) = probe(Err(Error::service_unavailable("database is locked"))).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
