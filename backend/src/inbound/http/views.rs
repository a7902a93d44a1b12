//! Server-rendered pages.
//!
//! Templates are compiled into the binary and registered once at startup.
//! Every page extends the `layout` partial, which shows the signed-in user,
//! the navigation bar and any queued notices.

use actix_web::HttpResponse;
use actix_web::http::header::ContentType;
use handlebars::{Handlebars, TemplateError};
use serde::Serialize;

use crate::domain::Error;

const TEMPLATES: &[(&str, &str)] = &[
    ("index", include_str!("../../../templates/index.hbs")),
    ("dashboard", include_str!("../../../templates/dashboard.hbs")),
    ("goals", include_str!("../../../templates/goals.hbs")),
    ("records", include_str!("../../../templates/records.hbs")),
    ("friends", include_str!("../../../templates/friends.hbs")),
    ("feed", include_str!("../../../templates/feed.hbs")),
];

const PARTIALS: &[(&str, &str)] = &[
    ("layout", include_str!("../../../templates/layout.hbs")),
    ("posts", include_str!("../../../templates/posts.hbs")),
];

/// Display format for stored timestamps.
pub const TIMESTAMP_DISPLAY: &str = "%Y-%m-%d %H:%M";

/// Common page frame wrapped around each template's own context.
#[derive(Debug, Serialize)]
pub struct Page<'a, T> {
    pub title: &'a str,
    pub viewer: Option<&'a str>,
    pub notices: Vec<String>,
    #[serde(flatten)]
    pub body: T,
}

/// Registry of page templates.
pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    /// Compile all templates.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] when a template fails to parse.
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        for (name, source) in PARTIALS {
            registry.register_partial(name, *source)?;
        }
        for (name, source) in TEMPLATES {
            registry.register_template_string(name, *source)?;
        }
        Ok(Self { registry })
    }

    /// Render `name` with `page` into an HTML response.
    pub fn render<T: Serialize>(&self, name: &str, page: &Page<'_, T>) -> Result<HttpResponse, Error> {
        let html = self
            .registry
            .render(name, page)
            .map_err(|err| Error::internal(format!("failed to render {name}: {err}")))?;
        Ok(HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(html))
    }
}

/// Serialise `value` as JSON safe to embed inside a `<script>` element.
///
/// `<` is escaped so stored text such as `</script>` cannot end the element.
pub fn script_json<T: Serialize>(value: &T) -> Result<String, Error> {
    let json = serde_json::to_string(value)
        .map_err(|err| Error::internal(format!("failed to encode page data: {err}")))?;
    Ok(json.replace('<', "\\u003c"))
}
