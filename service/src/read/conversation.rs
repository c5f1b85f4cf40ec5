//! [`Conversation`]-related read definitions.

use derive_more::{Deref, From, Into};

#[cfg(doc)]
use crate::domain::Conversation;

/// Indicator whether a [`Conversation`] has messages its reader has not
/// seen yet.
#[derive(Clone, Copy, Debug, Deref, Eq, Hash, PartialEq)]
pub struct IsUnread(pub bool);

impl PartialEq<bool> for IsUnread {
    fn eq(&self, other: &bool) -> bool {
        self.0 == *other
    }
}

/// Number of unread [`Conversation`]s of a user.
#[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
pub struct UnreadCount(usize);
