//! [`Message`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::{api, api::scalar, Context};

/// Single message sent in a `Conversation`.
#[derive(Clone, Debug, From)]
pub struct Message(domain::Message);

/// Single message sent in a `Conversation`.
#[graphql_object(context = Context)]
impl Message {
    /// Unique identifier of this `Message`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Message.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// ID of the `Conversation` this `Message` belongs to.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Message.conversationId",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn conversation_id(&self) -> api::conversation::Id {
        self.0.conversation_id.into()
    }

    /// ID of the participant who sent this `Message`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Message.senderId",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn sender_id(&self) -> api::user::Id {
        self.0.sender_id.into()
    }

    /// Text of this `Message`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Message.text",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn text(&self) -> Text {
        self.0.text.clone().into()
    }

    /// `DateTime` when this `Message` was sent.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Message.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of a `Message`.
#[derive(Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[from(Uuid, domain::message::Id)]
#[into(domain::message::Id)]
#[graphql(name = "MessageId", transparent)]
pub struct Id(Uuid);

/// Text of a `Message`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "MessageText",
    with = scalar::Via::<domain::message::Text>,
)]
pub struct Text(domain::message::Text);
