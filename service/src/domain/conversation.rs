//! [`Conversation`] definitions.

use std::collections::HashMap;

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use xxhash_rust::xxh3;

use crate::domain::{listing, message, user};
#[cfg(doc)]
use crate::domain::{Listing, Message};

/// Conversation between a buyer and a seller about a single [`Listing`].
#[derive(Clone, Debug)]
pub struct Conversation {
    /// ID of this [`Conversation`].
    pub id: Id,

    /// ID of the [`Listing`] this [`Conversation`] is about.
    pub listing_id: listing::Id,

    /// [`Participants`] of this [`Conversation`].
    pub participants: Participants,

    /// Text of the last [`Message`] sent in this [`Conversation`], if any.
    ///
    /// Cache for list previews only. The canonical source of truth for what
    /// messages exist is always the message log itself.
    pub last_message: Option<message::Text>,

    /// [`DateTime`] when the last [`Message`] was sent in this
    /// [`Conversation`], if any.
    pub last_message_at: Option<LastMessageDateTime>,

    /// Per-participant [`ReadMarks`] of this [`Conversation`].
    pub last_read: ReadMarks,

    /// [`DateTime`] when this [`Conversation`] was created.
    pub created_at: CreationDateTime,
}

impl Conversation {
    /// Indicates whether this [`Conversation`] has messages the provided
    /// user has not seen yet.
    ///
    /// A [`Conversation`] without messages is never unread. Otherwise, it is
    /// unread whenever the user has no read mark at all, or their mark is
    /// older than [`Conversation::last_message_at`].
    #[must_use]
    pub fn is_unread_by(&self, user_id: user::Id) -> bool {
        let Some(last_message_at) = self.last_message_at else {
            return false;
        };
        self.last_read
            .of(user_id)
            .map_or(true, |mark| mark.coerce() < last_message_at.coerce::<()>())
    }
}

/// ID of a [`Conversation`].
///
/// Derived deterministically from the [`Listing`] and the participant pair,
/// so contacting the same seller about the same [`Listing`] twice always
/// resolves to the same [`Conversation`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Calculates the [`Id`] of the [`Conversation`] between the provided
    /// [`Participants`] about the provided [`Listing`].
    #[must_use]
    pub fn of(listing_id: listing::Id, participants: Participants) -> Self {
        use std::hash::Hash as _;

        // WARNING: Avoid changing the order of the fields in the hasher,
        //          because it will be a breaking change requiring to migrate
        //          all existing conversations to the new format.
        let mut hasher = xxh3::Xxh3Builder::new().build();
        listing_id.hash(&mut hasher);
        for participant in participants.as_slice() {
            participant.hash(&mut hasher);
        }

        Self(Uuid::from_u128(hasher.digest128()))
    }
}

/// Pair of users participating in a [`Conversation`].
///
/// Stored in a canonical order, so the same two users always form the same
/// [`Participants`] regardless of who contacted whom.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Participants([user::Id; 2]);

impl Participants {
    /// Creates new [`Participants`] of the provided two users.
    ///
    /// [`None`] is returned if both IDs refer to the same user.
    #[must_use]
    pub fn new(a: user::Id, b: user::Id) -> Option<Self> {
        (a != b).then(|| if a <= b { Self([a, b]) } else { Self([b, a]) })
    }

    /// Indicates whether the provided user is one of these [`Participants`].
    #[must_use]
    pub fn contains(&self, user_id: user::Id) -> bool {
        self.0.contains(&user_id)
    }

    /// Returns the counterpart of the provided user, if they participate.
    #[must_use]
    pub fn other(&self, user_id: user::Id) -> Option<user::Id> {
        let [a, b] = self.0;
        (user_id == a)
            .then_some(b)
            .or_else(|| (user_id == b).then_some(a))
    }

    /// Returns these [`Participants`] as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[user::Id] {
        &self.0
    }
}

/// Per-participant read watermarks of a [`Conversation`].
#[derive(Clone, Debug, Default)]
pub struct ReadMarks(HashMap<user::Id, ReadMarkDateTime>);

impl ReadMarks {
    /// Returns the read watermark of the provided user, if any.
    #[must_use]
    pub fn of(&self, user_id: user::Id) -> Option<ReadMarkDateTime> {
        self.0.get(&user_id).copied()
    }

    /// Advances the read watermark of the provided user.
    ///
    /// A watermark never moves backwards.
    pub fn advance(&mut self, user_id: user::Id, at: ReadMarkDateTime) {
        let mark = self.0.entry(user_id).or_insert(at);
        if *mark < at {
            *mark = at;
        }
    }
}

/// Atomic advancement of a single participant's read watermark in a
/// [`Conversation`].
#[derive(Clone, Copy, Debug)]
pub struct ReadMark {
    /// ID of the [`Conversation`] to advance the watermark in.
    pub conversation_id: Id,

    /// ID of the participant whose watermark is advanced.
    pub user_id: user::Id,

    /// [`DateTime`] to advance the watermark to.
    pub at: ReadMarkDateTime,
}

/// Atomic refresh of a [`Conversation`]'s summary fields after a [`Message`]
/// send.
///
/// Along with the preview fields it advances the sender's own read
/// watermark, so senders never see their own messages as unread.
#[derive(Clone, Debug)]
pub struct Summary {
    /// ID of the [`Conversation`] to refresh.
    pub conversation_id: Id,

    /// Text of the sent [`Message`].
    pub last_message: message::Text,

    /// [`DateTime`] when the [`Message`] was sent.
    pub at: LastMessageDateTime,

    /// ID of the participant who sent the [`Message`].
    pub sender_id: user::Id,
}

/// [`DateTime`] when a [`Conversation`] was created.
pub type CreationDateTime = DateTimeOf<(Conversation, unit::Creation)>;

/// [`DateTime`] when the last [`Message`] was sent in a [`Conversation`].
pub type LastMessageDateTime = DateTimeOf<(Conversation, unit::LastMessage)>;

/// [`DateTime`] a participant has seen a [`Conversation`] up to.
pub type ReadMarkDateTime = DateTimeOf<(Conversation, unit::ReadMark)>;

#[cfg(test)]
mod spec {
    use common::DateTime;

    use crate::domain::{listing, user};

    use super::{Id, Participants, ReadMarks};

    #[test]
    fn participants_order_is_canonical() {
        let a = user::Id::new();
        let b = user::Id::new();

        assert_eq!(
            Participants::new(a, b).unwrap(),
            Participants::new(b, a).unwrap(),
        );
    }

    #[test]
    fn participants_reject_self_pair() {
        let a = user::Id::new();

        assert!(Participants::new(a, a).is_none());
    }

    #[test]
    fn id_is_deterministic() {
        let listing_id = listing::Id::new();
        let a = user::Id::new();
        let b = user::Id::new();

        assert_eq!(
            Id::of(listing_id, Participants::new(a, b).unwrap()),
            Id::of(listing_id, Participants::new(b, a).unwrap()),
        );
        assert_ne!(
            Id::of(listing_id, Participants::new(a, b).unwrap()),
            Id::of(listing::Id::new(), Participants::new(a, b).unwrap()),
        );
    }

    #[test]
    fn read_mark_never_moves_backwards() {
        let user_id = user::Id::new();
        let early = DateTime::from_unix_timestamp(1_000).unwrap().coerce();
        let late = DateTime::from_unix_timestamp(2_000).unwrap().coerce();

        let mut marks = ReadMarks::default();
        marks.advance(user_id, late);
        marks.advance(user_id, early);

        assert_eq!(marks.of(user_id), Some(late));
    }
}
