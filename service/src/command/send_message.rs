//! [`Command`] for sending a [`Message`] in a [`Conversation`].

use common::{
    operations::{By, Insert, Select, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{conversation, message, user, Conversation, Message},
    infra::{store, Store},
    Service,
};

use super::Command;

/// [`Command`] for sending a [`Message`] in a [`Conversation`].
///
/// Along with appending to the message log, it refreshes the
/// [`Conversation`]'s summary fields and advances the sender's own read
/// watermark, so senders never see their own messages as unread.
#[derive(Clone, Debug)]
pub struct SendMessage {
    /// ID of the [`Conversation`] to send the [`Message`] in.
    pub conversation_id: conversation::Id,

    /// ID of the participant sending the [`Message`].
    pub sender_id: user::Id,

    /// Raw text of the [`Message`].
    ///
    /// Surrounding whitespace is trimmed before sending.
    pub text: String,
}

impl<Db> Command<SendMessage> for Service<Db>
where
    Db: Store<
            Select<By<Option<Conversation>, conversation::Id>>,
            Ok = Option<Conversation>,
            Err = Traced<store::Error>,
        > + Store<Insert<Message>, Err = Traced<store::Error>>
        + Store<Update<conversation::Summary>, Err = Traced<store::Error>>,
{
    type Ok = Message;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: SendMessage) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SendMessage {
            conversation_id,
            sender_id,
            text,
        } = cmd;

        let text = message::Text::new(&text)
            .ok_or(E::InvalidText)
            .map_err(tracerr::wrap!())?;

        let conversation = self
            .store()
            .execute(Select(By::<Option<Conversation>, _>::new(
                conversation_id,
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ConversationNotExists(conversation_id))
            .map_err(tracerr::wrap!())?;

        if !conversation.participants.contains(sender_id) {
            return Err(tracerr::new!(E::NotParticipant(sender_id)));
        }

        let message = Message {
            id: message::Id::new(),
            conversation_id,
            sender_id,
            text: text.clone(),
            created_at: DateTime::now().coerce(),
        };

        self.store()
            .execute(Insert(message.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        self.store()
            .execute(Update(conversation::Summary {
                conversation_id,
                last_message: text,
                at: message.created_at.coerce(),
                sender_id,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(message)
    }
}

/// Error of [`SendMessage`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Conversation`] with the provided ID does not exist.
    #[display("`Conversation(id: {_0})` does not exist")]
    ConversationNotExists(#[error(not(source))] conversation::Id),

    /// [`Message`] text is empty after trimming, or too long.
    #[display("message text is invalid")]
    InvalidText,

    /// Sender does not participate in the [`Conversation`].
    #[display("`User(id: {_0})` does not participate in the conversation")]
    NotParticipant(#[error(not(source))] user::Id),

    /// [`Store`] error.
    #[display("`Store` operation failed: {_0}")]
    #[from]
    Store(store::Error),
}
