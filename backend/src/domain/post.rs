//! Posts and feed entries.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{UserId, Visibility};

/// Maximum number of entries in a computed feed.
pub const FEED_LIMIT: i64 = 100;

/// Number of global posts shown on the dashboard.
pub const DASHBOARD_POST_LIMIT: i64 = 20;

/// Validation errors returned by [`PostDraft::try_from_form`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostValidationError {
    MissingContent,
    UnknownVisibility { value: String },
}

impl fmt::Display for PostValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingContent => write!(f, "Please write something to post."),
            Self::UnknownVisibility { value } => {
                write!(f, "\"{value}\" is not a visibility option.")
            }
        }
    }
}

impl std::error::Error for PostValidationError {}

/// Store-assigned post identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PostId(i32);

impl PostId {
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

/// Validated form input for an explicit post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    content: String,
    visibility: Visibility,
}

impl PostDraft {
    /// Validate raw form fields; visibility defaults to friends.
    pub fn try_from_form(
        content: Option<&str>,
        visibility: Option<&str>,
    ) -> Result<Self, PostValidationError> {
        let content = content
            .filter(|c| !c.trim().is_empty())
            .ok_or(PostValidationError::MissingContent)?;
        let visibility = Visibility::from_form(visibility).map_err(|_| {
            PostValidationError::UnknownVisibility {
                value: visibility.unwrap_or_default().trim().to_owned(),
            }
        })?;
        Ok(Self {
            content: content.trim().to_owned(),
            visibility,
        })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn into_new_post(self, author: UserId, created_at: DateTime<Utc>) -> NewPost {
        NewPost {
            user_id: author,
            content: self.content,
            visibility: self.visibility,
            created_at,
        }
    }
}

/// Post ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub user_id: UserId,
    pub content: String,
    pub visibility: Visibility,
    pub created_at: DateTime<Utc>,
}

/// Persisted post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub id: PostId,
    pub user_id: UserId,
    pub content: String,
    pub visibility: Visibility,
    pub created_at: DateTime<Utc>,
}

/// A post joined with its author's username, as listed on feed pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedEntry {
    #[serde(flatten)]
    pub post: Post,
    pub author: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn visibility_defaults_to_friends() {
        let draft = PostDraft::try_from_form(Some("hello"), None).expect("valid draft");
        assert_eq!(draft.visibility(), Visibility::Friends);
        assert_eq!(draft.content(), "hello");
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some(" \n "))]
    fn content_is_required(#[case] content: Option<&str>) {
        assert_eq!(
            PostDraft::try_from_form(content, Some("community")),
            Err(PostValidationError::MissingContent)
        );
    }

    #[rstest]
    fn unknown_visibility_is_rejected() {
        assert_eq!(
            PostDraft::try_from_form(Some("hi"), Some("everyone")),
            Err(PostValidationError::UnknownVisibility {
                value: "everyone".into()
            })
        );
    }
}
