//! Audience enumerations for posts and shared records.
//!
//! Both types are parsed from form fields at the HTTP boundary and persisted
//! as lowercase text. A blank field selects the default variant; any other
//! unrecognised value is rejected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error returned when an audience string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown visibility \"{value}\".")]
pub struct UnknownAudience {
    value: String,
}

impl UnknownAudience {
    fn new(value: &str) -> Self {
        Self {
            value: value.to_owned(),
        }
    }
}

/// Who may see a post.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Author and their friends.
    #[default]
    Friends,
    /// Every user.
    Community,
}

impl Visibility {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Friends => "friends",
            Self::Community => "community",
        }
    }

    /// Parse an optional form field, falling back to [`Visibility::Friends`].
    pub fn from_form(raw: Option<&str>) -> Result<Self, UnknownAudience> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(value) => value.parse(),
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = UnknownAudience;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "friends" => Ok(Self::Friends),
            "community" => Ok(Self::Community),
            other => Err(UnknownAudience::new(other)),
        }
    }
}

/// Whether logging a record also publishes a post, and to whom.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ShareScope {
    #[default]
    None,
    Friends,
    Community,
}

impl ShareScope {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Friends => "friends",
            Self::Community => "community",
        }
    }

    /// Visibility of the auto-post, or `None` when nothing is shared.
    pub const fn post_visibility(self) -> Option<Visibility> {
        match self {
            Self::None => None,
            Self::Friends => Some(Visibility::Friends),
            Self::Community => Some(Visibility::Community),
        }
    }

    /// Parse an optional form field, falling back to [`ShareScope::None`].
    pub fn from_form(raw: Option<&str>) -> Result<Self, UnknownAudience> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(value) => value.parse(),
        }
    }
}

impl fmt::Display for ShareScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShareScope {
    type Err = UnknownAudience;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "friends" => Ok(Self::Friends),
            "community" => Ok(Self::Community),
            other => Err(UnknownAudience::new(other)),
        }
    }
}
