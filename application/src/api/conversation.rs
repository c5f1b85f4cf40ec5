//! [`Conversation`]-related definitions.

use std::future;

use common::{DateTime, DateTimeOf};
use derive_more::{Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, query, Query as _};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{api, AsError, Context, Error};

/// Conversation between a buyer and a seller about a single `Listing`.
#[derive(Clone, Debug, From)]
pub struct Conversation {
    /// ID of this [`Conversation`].
    id: Id,

    /// Underlying [`domain::Conversation`].
    conversation: OnceCell<domain::Conversation>,
}

impl From<domain::Conversation> for Conversation {
    fn from(conversation: domain::Conversation) -> Self {
        Self {
            id: conversation.id.into(),
            conversation: OnceCell::new_with(Some(conversation)),
        }
    }
}

impl Conversation {
    /// Returns the underlying [`domain::Conversation`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Conversation`] doesn't exist.
    async fn conversation(
        &self,
        ctx: &Context,
    ) -> Result<&domain::Conversation, Error> {
        let id = self.id.into();
        self.conversation
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::conversation::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|c| {
                        future::ready(c.ok_or_else(|| {
                            api::query::ConversationError::NotExists.into()
                        }))
                    })
            })
            .await
    }
}

/// Conversation between a buyer and a seller about a single `Listing`.
#[graphql_object(context = Context)]
impl Conversation {
    /// Unique identifier of this `Conversation`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Conversation.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// `Listing` this `Conversation` is about.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Conversation.listing",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn listing(&self, ctx: &Context) -> Result<api::Listing, Error> {
        let listing_id = self.conversation(ctx).await?.listing_id;
        #[expect(
            unsafe_code,
            reason = "`Conversation` loaded from repository guarantees \
                      `Listing` existence"
        )]
        let listing = unsafe { api::Listing::new_unchecked(listing_id) };
        Ok(listing)
    }

    /// IDs of the two participants of this `Conversation`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Conversation.participants",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn participants(
        &self,
        ctx: &Context,
    ) -> Result<Vec<api::user::Id>, Error> {
        Ok(self
            .conversation(ctx)
            .await?
            .participants
            .as_slice()
            .iter()
            .copied()
            .map(Into::into)
            .collect())
    }

    /// Text of the last `Message` sent in this `Conversation`, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Conversation.lastMessage",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn last_message(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::message::Text>, Error> {
        Ok(self
            .conversation(ctx)
            .await?
            .last_message
            .clone()
            .map(Into::into))
    }

    /// `DateTime` when the last `Message` was sent in this `Conversation`,
    /// if any.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Conversation.lastMessageAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn last_message_at(
        &self,
        ctx: &Context,
    ) -> Result<Option<DateTime>, Error> {
        Ok(self
            .conversation(ctx)
            .await?
            .last_message_at
            .map(DateTimeOf::coerce))
    }

    /// Indicator whether this `Conversation` has `Message`s the current
    /// `User` has not seen yet.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Conversation.isUnread",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn is_unread(&self, ctx: &Context) -> Result<bool, Error> {
        let identity = ctx.current_identity().await?;
        Ok(self
            .conversation(ctx)
            .await?
            .is_unread_by(identity.user_id.into()))
    }

    /// `DateTime` when this `Conversation` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Conversation.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.conversation(ctx).await?.created_at.coerce())
    }
}

/// Unique identifier of a `Conversation`.
#[derive(Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[from(Uuid, domain::conversation::Id)]
#[into(domain::conversation::Id)]
#[graphql(name = "ConversationId", transparent)]
pub struct Id(Uuid);
