//! [`Command`] for marking a [`Conversation`] as read.

use common::{
    operations::{By, Select, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{conversation, user, Conversation},
    infra::{store, Store},
    Service,
};

use super::Command;

/// [`Command`] for marking a [`Conversation`] as read by one of its
/// participants.
///
/// Advances the participant's read watermark to the current moment. The
/// watermark never moves backwards, so marking an already read
/// [`Conversation`] again is a no-op.
#[derive(Clone, Copy, Debug)]
pub struct MarkConversationRead {
    /// ID of the [`Conversation`] to mark as read.
    pub conversation_id: conversation::Id,

    /// ID of the participant who has read the [`Conversation`].
    pub user_id: user::Id,
}

impl<Db> Command<MarkConversationRead> for Service<Db>
where
    Db: Store<
            Select<By<Option<Conversation>, conversation::Id>>,
            Ok = Option<Conversation>,
            Err = Traced<store::Error>,
        > + Store<Update<conversation::ReadMark>, Err = Traced<store::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: MarkConversationRead,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let MarkConversationRead {
            conversation_id,
            user_id,
        } = cmd;

        let conversation = self
            .store()
            .execute(Select(By::<Option<Conversation>, _>::new(
                conversation_id,
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ConversationNotExists(conversation_id))
            .map_err(tracerr::wrap!())?;

        if !conversation.participants.contains(user_id) {
            return Err(tracerr::new!(E::NotParticipant(user_id)));
        }

        self.store()
            .execute(Update(conversation::ReadMark {
                conversation_id,
                user_id,
                at: DateTime::now().coerce(),
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)
    }
}

/// Error of [`MarkConversationRead`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Conversation`] with the provided ID does not exist.
    #[display("`Conversation(id: {_0})` does not exist")]
    ConversationNotExists(#[error(not(source))] conversation::Id),

    /// User does not participate in the [`Conversation`].
    #[display("`User(id: {_0})` does not participate in the conversation")]
    NotParticipant(#[error(not(source))] user::Id),

    /// [`Store`] error.
    #[display("`Store` operation failed: {_0}")]
    #[from]
    Store(store::Error),
}
