//! Symmetric friend links.
//!
//! A link joins an unordered pair of distinct users. `(a, b)` and `(b, a)`
//! name the same link, and at most one link exists per pair.

use chrono::{DateTime, Utc};

use super::{UserId, Username};

/// Friend link ready to be inserted, stored in the direction it was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewFriendLink {
    pub user_id: UserId,
    pub friend_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Result of a connect request, surfaced to the user as a notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// No user was selected.
    NothingSelected,
    /// The selection does not name an existing user.
    UnknownUser,
    /// The user selected themselves.
    SelfLink,
    /// A link already exists in either direction.
    AlreadyConnected,
    /// A new link was created.
    Connected { friend: Username },
}

impl ConnectOutcome {
    /// Notice text shown on the next page.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{ConnectOutcome, Username};
    ///
    /// let outcome = ConnectOutcome::Connected { friend: Username::new("bob").unwrap() };
    /// assert_eq!(outcome.notice(), "Connected with bob.");
    /// ```
    pub fn notice(&self) -> String {
        match self {
            Self::NothingSelected => "Please select a user to connect.".to_owned(),
            Self::UnknownUser => "User not found.".to_owned(),
            Self::SelfLink => "You cannot connect with yourself.".to_owned(),
            Self::AlreadyConnected => "Already connected.".to_owned(),
            Self::Connected { friend } => format!("Connected with {friend}."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ConnectOutcome::NothingSelected, "Please select a user to connect.")]
    #[case(ConnectOutcome::UnknownUser, "User not found.")]
    #[case(ConnectOutcome::SelfLink, "You cannot connect with yourself.")]
    #[case(ConnectOutcome::AlreadyConnected, "Already connected.")]
    fn notices_match_user_facing_copy(#[case] outcome: ConnectOutcome, #[case] expected: &str) {
        assert_eq!(outcome.notice(), expected);
    }
}
