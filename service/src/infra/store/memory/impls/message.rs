//! [`Message`]-related [`Store`] implementations.

use common::operations::{By, Insert, Select, Watch};
use futures::stream::BoxStream;
use tracerr::Traced;

use crate::{
    domain::{conversation, Message},
    infra::store::{
        self,
        memory::{Change, Collections},
        Memory, Store,
    },
};

impl Store<Insert<Message>> for Memory {
    type Ok = ();
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Insert(message): Insert<Message>,
    ) -> Result<Self::Ok, Self::Err> {
        self.with_collections(|c| {
            _ = c.messages.insert(message.id, message);
        })?;
        self.notify(Change::Messages);
        Ok(())
    }
}

impl Store<Select<By<Vec<Message>, conversation::Id>>> for Memory {
    type Ok = Vec<Message>;
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Message>, conversation::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let conversation_id = by.into_inner();
        self.with_collections(|c| log_of(c, conversation_id))
    }
}

impl Store<Watch<By<Vec<Message>, conversation::Id>>> for Memory {
    type Ok = BoxStream<'static, Vec<Message>>;
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Watch(by): Watch<By<Vec<Message>, conversation::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let conversation_id = by.into_inner();
        self.watch(Change::Messages, move |c| log_of(c, conversation_id))
    }
}

/// Returns the whole message log of the provided [`Conversation`] in send
/// order.
///
/// Ties on the send time are broken by the message ID, to keep the order
/// total.
///
/// [`Conversation`]: crate::domain::Conversation
fn log_of(c: &Collections, conversation_id: conversation::Id) -> Vec<Message> {
    let mut log: Vec<_> = c
        .messages
        .values()
        .filter(|m| m.conversation_id == conversation_id)
        .cloned()
        .collect();
    log.sort_unstable_by(|a, b| {
        a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id))
    });
    log
}
