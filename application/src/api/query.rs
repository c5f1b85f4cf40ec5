//! GraphQL [`Query`]s definitions.

use juniper::graphql_object;
use service::{domain, query, read, Query as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns the `Listing` with the specified ID.
    ///
    /// Deleted `Listing`s are returned to their seller and to administrators
    /// only.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LISTING_NOT_EXISTS` - the `Listing` with the specified ID does not
    ///                          exist (or is not visible to the current
    ///                          `User`).
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "listing",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn listing(
        id: api::listing::Id,
        ctx: &Context,
    ) -> Result<api::Listing, Error> {
        let viewer = ctx
            .try_current_identity()
            .await?
            .map(|identity| identity.actor());

        ctx.service()
            .execute(query::listing::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .filter(|l| l.is_visible_to(viewer.as_ref()))
            .ok_or_else(|| ListingError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Lists `Listing`s matching the provided filters.
    ///
    /// When no `status` is provided, only active `Listing`s are listed. The
    /// list is ordered by boost score descending, then by creation time
    /// descending.
    #[tracing::instrument(
        skip_all,
        fields(
            canton = ?canton,
            category = ?category,
            gql.name = "listings",
            otel.name = Self::SPAN_NAME,
            search = ?search,
            status = ?status,
        ),
    )]
    pub async fn listings(
        status: Option<api::listing::Status>,
        category: Option<api::listing::Category>,
        canton: Option<api::listing::Canton>,
        search: Option<String>,
        ctx: &Context,
    ) -> Result<Vec<api::Listing>, Error> {
        let viewer = ctx
            .try_current_identity()
            .await?
            .map(|identity| identity.actor());

        ctx.service()
            .execute(query::listings::List {
                filter: read::listing::list::Filter {
                    seller_id: None,
                    status: Some(
                        status
                            .map_or(domain::listing::Status::Active, Into::into),
                    ),
                    category: category.map(Into::into),
                    canton: canton.map(Into::into),
                    search,
                },
                viewer,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|listings| listings.into_iter().map(Into::into).collect())
    }

    /// Lists the `Listing`s offered by the current `User`, in any status.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myListings",
            otel.name = Self::SPAN_NAME,
            status = ?status,
        ),
    )]
    pub async fn my_listings(
        status: Option<api::listing::Status>,
        ctx: &Context,
    ) -> Result<Vec<api::Listing>, Error> {
        let identity = ctx.current_identity().await?;

        ctx.service()
            .execute(query::listings::List {
                filter: read::listing::list::Filter {
                    seller_id: Some(identity.user_id.into()),
                    status: status.map(Into::into),
                    ..read::listing::list::Filter::default()
                },
                viewer: Some(identity.actor()),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|listings| listings.into_iter().map(Into::into).collect())
    }

    /// Lists the `Listing`s the current `User` has marked as favorite, most
    /// recently marked first.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myFavorites",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_favorites(
        ctx: &Context,
    ) -> Result<Vec<api::Listing>, Error> {
        let identity = ctx.current_identity().await?;

        let favorites = ctx
            .service()
            .execute(query::favorites::ByUser::by(identity.user_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        #[expect(
            unsafe_code,
            reason = "`Favorite` loaded from repository guarantees `Listing` \
                      existence"
        )]
        let listings = favorites
            .into_iter()
            .map(|f| unsafe { api::Listing::new_unchecked(f.listing_id) })
            .collect();
        Ok(listings)
    }

    /// Returns the `Conversation` with the specified ID.
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
            gql.name = "conversation",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn conversation(
        id: api::conversation::Id,
        ctx: &Context,
    ) -> Result<api::Conversation, Error> {
        let identity = ctx.current_identity().await?;

        let conversation = ctx
            .service()
            .execute(query::conversation::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| ConversationError::NotExists.into())
            .map_err(ctx.error())?;
        if !conversation.participants.contains(identity.user_id.into()) {
            return Err(ctx.error()(
                api::ParticipationError::NotParticipant.into(),
            ));
        }

        Ok(conversation.into())
    }

    /// Lists the `Conversation`s the current `User` participates in, most
    /// recently active first.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myConversations",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_conversations(
        ctx: &Context,
    ) -> Result<Vec<api::Conversation>, Error> {
        let identity = ctx.current_identity().await?;

        ctx.service()
            .execute(query::conversations::ByParticipant::by(
                identity.user_id.into(),
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|convs| convs.into_iter().map(Into::into).collect())
    }

    /// Lists the `Message`s of a `Conversation` in send order.
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
        conversation_id: api::conversation::Id,
        ctx: &Context,
    ) -> Result<Vec<api::Message>, Error> {
        // Resolving the `Conversation` also performs the participant check.
        _ = Self::conversation(conversation_id, ctx).await?;

        ctx.service()
            .execute(query::messages::ByConversation::by(
                conversation_id.into(),
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|msgs| msgs.into_iter().map(Into::into).collect())
    }

    /// Returns the number of `Conversation`s with `Message`s the current
    /// `User` has not seen yet.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myUnreadCount",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_unread_count(ctx: &Context) -> Result<i32, Error> {
        let identity = ctx.current_identity().await?;

        let count = ctx
            .service()
            .execute(query::conversations::UnreadCount {
                user_id: identity.user_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        usize::from(count).try_into().map_err(AsError::into_error)
    }
}

define_error! {
    enum ConversationError {
        #[code = "CONVERSATION_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Conversation` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum ListingError {
        #[code = "LISTING_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Listing` with the specified ID does not exist"]
        NotExists,
    }
}
