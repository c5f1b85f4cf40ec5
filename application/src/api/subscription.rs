//! GraphQL [`Subscription`]s definitions.

use futures::{stream::BoxStream, StreamExt as _};
use juniper::graphql_subscription;
use service::{query, Query as _};

use crate::{api, AsError, Context, Error};

/// Root of all GraphQL subscriptions.
#[derive(Clone, Copy, Debug)]
pub struct Subscription;

impl Subscription {
    /// Name of the [`tracing::Span`] for the subscriptions.
    const SPAN_NAME: &'static str = "GraphQL subscription";
}

#[graphql_subscription(context = Context)]
impl Subscription {
    /// Subscribes to the `Conversation` list of the current `User`.
    ///
    /// Yields the current list immediately and a fresh one after every
    /// change of any `Conversation` the current `User` participates in.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myConversations",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_conversations(
        &self,
        ctx: &Context,
    ) -> Result<BoxStream<'static, Result<Vec<api::Conversation>, Error>>, Error>
    {
        let identity = ctx.current_identity().await?;

        ctx.service()
            .execute(query::conversations::Watched::by(
                identity.user_id.into(),
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|updates| {
                updates
                    .map(|convs| {
                        Ok(convs.into_iter().map(Into::into).collect())
                    })
                    .boxed()
            })
    }

    /// Subscribes to the `Message` log of a `Conversation`.
    ///
    /// Yields the whole log immediately and again after every new `Message`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `CONVERSATION_NOT_EXISTS` - the `Conversation` with the specified
    ///                               ID does not exist;
    /// - `NOT_PARTICIPANT` - the current `User` is not a participant of the
    ///                       `Conversation`.
    #[tracing::instrument(
        skip_all,
        fields(
            conversation_id = %conversation_id,
            gql.name = "messages",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn messages(
        &self,
        conversation_id: api::conversation::Id,
        ctx: &Context,
    ) -> Result<BoxStream<'static, Result<Vec<api::Message>, Error>>, Error>
    {
        // Resolving the `Conversation` also performs the participant check.
        _ = api::Query::conversation(conversation_id, ctx).await?;

        ctx.service()
            .execute(query::messages::Watched::by(conversation_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|updates| {
                updates
                    .map(|msgs| {
                        Ok(msgs.into_iter().map(Into::into).collect())
                    })
                    .boxed()
            })
    }

    /// Subscribes to the number of unread `Conversation`s of the current
    /// `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myUnreadCount",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_unread_count(
        &self,
        ctx: &Context,
    ) -> Result<BoxStream<'static, Result<i32, Error>>, Error> {
        let identity = ctx.current_identity().await?;
        let user_id = identity.user_id.into();

        ctx.service()
            .execute(query::conversations::Watched::by(user_id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|updates| {
                updates
                    .map(move |convs| {
                        let count = convs
                            .iter()
                            .filter(|c| c.is_unread_by(user_id))
                            .count();
                        Ok(count.try_into().unwrap_or(i32::MAX))
                    })
                    .boxed()
            })
    }

    /// Subscribes to live updates of a single `Listing`.
    ///
    /// Yields the current state immediately and again after every change.
    /// `null` is yielded once the `Listing` stops being visible to the
    /// current `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "listing",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn listing(
        &self,
        id: api::listing::Id,
        ctx: &Context,
    ) -> Result<BoxStream<'static, Result<Option<api::Listing>, Error>>, Error>
    {
        let viewer = ctx
            .try_current_identity()
            .await?
            .map(|identity| identity.actor());

        ctx.service()
            .execute(query::listing::Watched::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|updates| {
                updates
                    .map(move |listing| {
                        Ok(listing
                            .filter(|l| l.is_visible_to(viewer.as_ref()))
                            .map(Into::into))
                    })
                    .boxed()
            })
    }
}
