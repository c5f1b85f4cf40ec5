//! [`Conversation`]-related [`Store`] implementations.

use common::operations::{By, Insert, Select, Update, Watch};
use futures::stream::BoxStream;
use tracerr::Traced;

use crate::{
    domain::{conversation, user, Conversation},
    infra::store::{
        self,
        memory::{Change, Collections},
        Memory, Store,
    },
};

impl Store<Insert<Conversation>> for Memory {
    type Ok = ();
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Insert(conversation): Insert<Conversation>,
    ) -> Result<Self::Ok, Self::Err> {
        self.with_collections(|c| {
            // First write wins: the ID is deterministic, so a concurrent
            // creation refers to the very same conversation.
            _ = c
                .conversations
                .entry(conversation.id)
                .or_insert(conversation);
        })?;
        self.notify(Change::Conversations);
        Ok(())
    }
}

impl Store<Select<By<Option<Conversation>, conversation::Id>>> for Memory {
    type Ok = Option<Conversation>;
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Conversation>, conversation::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.with_collections(|c| c.conversations.get(&id).cloned())
    }
}

impl Store<Select<By<Vec<Conversation>, user::Id>>> for Memory {
    type Ok = Vec<Conversation>;
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Conversation>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let user_id = by.into_inner();
        self.with_collections(|c| list_of(c, user_id))
    }
}

impl Store<Watch<By<Vec<Conversation>, user::Id>>> for Memory {
    type Ok = BoxStream<'static, Vec<Conversation>>;
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Watch(by): Watch<By<Vec<Conversation>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let user_id = by.into_inner();
        self.watch(Change::Conversations, move |c| list_of(c, user_id))
    }
}

impl Store<Update<conversation::Summary>> for Memory {
    type Ok = ();
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Update(summary): Update<conversation::Summary>,
    ) -> Result<Self::Ok, Self::Err> {
        let conversation::Summary {
            conversation_id,
            last_message,
            at,
            sender_id,
        } = summary;

        self.with_collections(|c| {
            if let Some(conversation) =
                c.conversations.get_mut(&conversation_id)
            {
                conversation.last_message = Some(last_message);
                conversation.last_message_at = Some(at);
                conversation.last_read.advance(sender_id, at.coerce());
            }
        })?;
        self.notify(Change::Conversations);
        Ok(())
    }
}

impl Store<Update<conversation::ReadMark>> for Memory {
    type Ok = ();
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Update(mark): Update<conversation::ReadMark>,
    ) -> Result<Self::Ok, Self::Err> {
        let conversation::ReadMark {
            conversation_id,
            user_id,
            at,
        } = mark;

        self.with_collections(|c| {
            if let Some(conversation) =
                c.conversations.get_mut(&conversation_id)
            {
                conversation.last_read.advance(user_id, at);
            }
        })?;
        self.notify(Change::Conversations);
        Ok(())
    }
}

/// Returns all the [`Conversation`]s the provided user participates in,
/// most recently active first.
fn list_of(c: &Collections, user_id: user::Id) -> Vec<Conversation> {
    let mut conversations: Vec<_> = c
        .conversations
        .values()
        .filter(|conversation| conversation.participants.contains(user_id))
        .cloned()
        .collect();
    conversations.sort_unstable_by(|a, b| {
        let activity = |conversation: &Conversation| {
            conversation
                .last_message_at
                .map_or_else(|| conversation.created_at.coerce(), |at| {
                    at.coerce::<()>()
                })
        };
        activity(b).cmp(&activity(a))
    });
    conversations
}
