//! [`Query`] collection related to the [`Message`] log.

use common::operations::By;

use crate::domain::{conversation, Message};
#[cfg(doc)]
use crate::Query;

use super::{StoreQuery, StoreWatch};

/// Queries the whole [`Message`] log of a [`Conversation`] in send order.
///
/// [`Conversation`]: crate::domain::Conversation
pub type ByConversation = StoreQuery<By<Vec<Message>, conversation::Id>>;

/// Subscribes to live updates of a [`Conversation`]'s [`Message`] log.
///
/// [`Conversation`]: crate::domain::Conversation
pub type Watched = StoreWatch<By<Vec<Message>, conversation::Id>>;
