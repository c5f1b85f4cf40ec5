//! [`Message`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{conversation, user};
#[cfg(doc)]
use crate::domain::Conversation;

/// Single message sent in a [`Conversation`].
#[derive(Clone, Debug)]
pub struct Message {
    /// ID of this [`Message`].
    pub id: Id,

    /// ID of the [`Conversation`] this [`Message`] belongs to.
    pub conversation_id: conversation::Id,

    /// ID of the participant who sent this [`Message`].
    pub sender_id: user::Id,

    /// [`Text`] of this [`Message`].
    pub text: Text,

    /// [`DateTime`] when this [`Message`] was sent.
    pub created_at: CreationDateTime,
}

/// ID of a [`Message`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Text of a [`Message`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct Text(String);

impl Text {
    /// Creates a new [`Text`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `text` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Creates a new [`Text`] out of the given `text`, trimming its
    /// surrounding whitespace.
    ///
    /// [`None`] is returned if nothing but whitespace remains, or the `text`
    /// is too long.
    #[must_use]
    pub fn new(text: impl AsRef<str>) -> Option<Self> {
        let text = text.as_ref().trim();
        Self::check(text).then(|| Self(text.to_owned()))
    }

    /// Checks whether the given `text` is a valid [`Text`].
    fn check(text: impl AsRef<str>) -> bool {
        let text = text.as_ref();
        !text.is_empty() && text.len() <= 4096
    }
}

impl FromStr for Text {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Text`")
    }
}

/// [`DateTime`] when a [`Message`] was sent.
pub type CreationDateTime = DateTimeOf<(Message, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::Text;

    #[test]
    fn text_is_trimmed() {
        assert_eq!(
            AsRef::<str>::as_ref(
                &Text::new("  Ist das noch verfügbar?  ").unwrap(),
            ),
            "Ist das noch verfügbar?",
        );
    }

    #[test]
    fn whitespace_only_text_is_rejected() {
        assert!(Text::new("   ").is_none());
        assert!(Text::new("").is_none());
        assert!(Text::new("\n\t").is_none());
    }
}
