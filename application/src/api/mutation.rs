//! GraphQL [`Mutation`]s definitions.

use common::Money;
use juniper::graphql_object;
use service::{command, Command as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Creates a new `Listing` offered by the current `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            canton = ?canton,
            category = ?category,
            condition = ?condition,
            gql.name = "createListing",
            otel.name = Self::SPAN_NAME,
            price = %price,
            title = %title,
            zip_code = ?zip_code.as_ref().map(ToString::to_string),
        ),
    )]
    #[expect(clippy::too_many_arguments, reason = "still readable")]
    pub async fn create_listing(
        title: api::listing::Title,
        description: api::listing::Description,
        price: Money,
        category: api::listing::Category,
        condition: api::listing::Condition,
        canton: api::listing::Canton,
        zip_code: Option<api::listing::ZipCode>,
        show_phone: Option<bool>,
        images: Option<Vec<api::listing::ImageUrl>>,
        ctx: &Context,
    ) -> Result<api::Listing, Error> {
        let identity = ctx.current_identity().await?;

        ctx.service()
            .execute(command::CreateListing {
                seller_id: identity.user_id.into(),
                title: title.into(),
                description: description.into(),
                price,
                category: category.into(),
                condition: condition.into(),
                canton: canton.into(),
                zip_code: zip_code.map(Into::into),
                show_phone: show_phone.unwrap_or_default(),
                images: images
                    .unwrap_or_default()
                    .into_iter()
                    .map(Into::into)
                    .collect(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Edits an existing `Listing`.
    ///
    /// Omitted arguments leave the corresponding fields unchanged.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LISTING_NOT_EXISTS` - the `Listing` with the provided ID does not
    ///                          exist;
    /// - `LISTING_DELETED` - the `Listing` is deleted and cannot be edited;
    /// - `NOT_ALLOWED` - the current `User` is neither the seller nor an
    ///                   administrator.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateListing",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    #[expect(clippy::too_many_arguments, reason = "still readable")]
    pub async fn update_listing(
        id: api::listing::Id,
        title: Option<api::listing::Title>,
        description: Option<api::listing::Description>,
        price: Option<Money>,
        category: Option<api::listing::Category>,
        condition: Option<api::listing::Condition>,
        canton: Option<api::listing::Canton>,
        zip_code: Option<api::listing::ZipCode>,
        show_phone: Option<bool>,
        images: Option<Vec<api::listing::ImageUrl>>,
        ctx: &Context,
    ) -> Result<api::Listing, Error> {
        let identity = ctx.current_identity().await?;

        ctx.service()
            .execute(command::UpdateListing {
                listing_id: id.into(),
                initiator: identity.actor(),
                title: title.map(Into::into),
                description: description.map(Into::into),
                price,
                category: category.map(Into::into),
                condition: condition.map(Into::into),
                canton: canton.map(Into::into),
                zip_code: zip_code.map(Into::into),
                show_phone,
                images: images
                    .map(|urls| urls.into_iter().map(Into::into).collect()),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Marks a `Listing` of the current `User` as sold.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LISTING_NOT_EXISTS` - the `Listing` with the provided ID does not
    ///                          exist;
    /// - `NOT_LISTING_SELLER` - the current `User` is not the seller;
    /// - `ILLEGAL_STATUS_TRANSITION` - the `Listing` cannot be sold in its
    ///                                 present status.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "markListingSold",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn mark_listing_sold(
        id: api::listing::Id,
        ctx: &Context,
    ) -> Result<api::Listing, Error> {
        let identity = ctx.current_identity().await?;

        ctx.service()
            .execute(command::MarkListingSold {
                listing_id: id.into(),
                initiator_id: identity.user_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Puts a sold `Listing` of the current `User` back on offer.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LISTING_NOT_EXISTS` - the `Listing` with the provided ID does not
    ///                          exist;
    /// - `NOT_LISTING_SELLER` - the current `User` is not the seller;
    /// - `ILLEGAL_STATUS_TRANSITION` - the `Listing` cannot be reactivated
    ///                                 from its present status.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "reactivateListing",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn reactivate_listing(
        id: api::listing::Id,
        ctx: &Context,
    ) -> Result<api::Listing, Error> {
        let identity = ctx.current_identity().await?;

        ctx.service()
            .execute(command::ReactivateListing {
                listing_id: id.into(),
                initiator_id: identity.user_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Soft-deletes a `Listing`.
    ///
    /// Allowed to the seller of the `Listing` and to administrators. The
    /// deletion is terminal.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LISTING_NOT_EXISTS` - the `Listing` with the provided ID does not
    ///                          exist;
    /// - `LISTING_DELETED` - the `Listing` is already deleted;
    /// - `NOT_ALLOWED` - the current `User` is neither the seller nor an
    ///                   administrator.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteListing",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_listing(
        id: api::listing::Id,
        ctx: &Context,
    ) -> Result<api::Listing, Error> {
        let identity = ctx.current_identity().await?;

        ctx.service()
            .execute(command::DeleteListing {
                listing_id: id.into(),
                initiator: identity.actor(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Increases the promotion score of a `Listing` by one.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LISTING_NOT_EXISTS` - the `Listing` with the provided ID does not
    ///                          exist;
    /// - `NOT_ADMIN` - the current `User` is not an administrator.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "boostListing",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn boost_listing(
        id: api::listing::Id,
        ctx: &Context,
    ) -> Result<i32, Error> {
        let identity = ctx.current_identity().await?;

        let score = ctx
            .service()
            .execute(command::BoostListing {
                listing_id: id.into(),
                initiator: identity.actor(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        u64::from(score).try_into().map_err(AsError::into_error)
    }

    /// Toggles the visual highlighting of a `Listing`.
    ///
    /// Returns the new value of the indicator.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LISTING_NOT_EXISTS` - the `Listing` with the provided ID does not
    ///                          exist;
    /// - `NOT_ADMIN` - the current `User` is not an administrator.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "toggleListingFeature",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn toggle_listing_feature(
        id: api::listing::Id,
        ctx: &Context,
    ) -> Result<bool, Error> {
        let identity = ctx.current_identity().await?;

        ctx.service()
            .execute(command::ToggleListingFeature {
                listing_id: id.into(),
                initiator: identity.actor(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|featured| *featured)
    }

    /// Toggles a `Listing` in the current `User`'s favorites.
    ///
    /// Returns `true` if the `Listing` is a favorite afterwards.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LISTING_NOT_EXISTS` - the `Listing` with the provided ID does not
    ///                          exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "toggleFavorite",
            listing_id = %listing_id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn toggle_favorite(
        listing_id: api::listing::Id,
        ctx: &Context,
    ) -> Result<bool, Error> {
        let identity = ctx.current_identity().await?;

        ctx.service()
            .execute(command::ToggleFavorite {
                user_id: identity.user_id.into(),
                listing_id: listing_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|favorite| *favorite)
    }

    /// Records a view of a `Listing` from this client.
    ///
    /// Returns `true` if the view was counted. A throttled or otherwise
    /// dropped view returns `false`, never an error.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "recordListingView",
            listing_id = %listing_id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn record_listing_view(
        listing_id: api::listing::Id,
        ctx: &Context,
    ) -> Result<bool, Error> {
        let viewer_id =
            ctx.try_current_identity().await?.map(|i| i.user_id.into());

        let outcome = ctx
            .service()
            .execute(command::RecordListingView {
                listing_id: listing_id.into(),
                viewer_id,
            })
            .await;

        Ok(match outcome {
            Ok(command::record_listing_view::Outcome::Counted(_)) => true,
            Ok(command::record_listing_view::Outcome::Throttled) => false,
            Err(e) => {
                tracing::warn!("failed to record `Listing` view: {e}");
                false
            }
        })
    }

    /// Opens (or returns the existing) `Conversation` between the current
    /// `User` and the seller of the provided `Listing`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LISTING_NOT_EXISTS` - the `Listing` with the provided ID does not
    ///                          exist;
    /// - `LISTING_NOT_AVAILABLE` - the `Listing` is not active;
    /// - `SELF_CONTACT` - the current `User` is the seller of the `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "contactSeller",
            listing_id = %listing_id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn contact_seller(
        listing_id: api::listing::Id,
        ctx: &Context,
    ) -> Result<api::Conversation, Error> {
        let identity = ctx.current_identity().await?;

        ctx.service()
            .execute(command::ContactSeller {
                listing_id: listing_id.into(),
                buyer_id: identity.user_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Sends a `Message` into a `Conversation` of the current `User`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `CONVERSATION_NOT_EXISTS` - the `Conversation` with the provided ID
    ///                               does not exist;
    /// - `NOT_PARTICIPANT` - the current `User` is not a participant of the
    ///                       `Conversation`;
    /// - `INVALID_MESSAGE_TEXT` - the text is empty or too long.
    #[tracing::instrument(
        skip_all,
        fields(
            conversation_id = %conversation_id,
            gql.name = "sendMessage",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn send_message(
        conversation_id: api::conversation::Id,
        text: String,
        ctx: &Context,
    ) -> Result<api::Message, Error> {
        let identity = ctx.current_identity().await?;

        ctx.service()
            .execute(command::SendMessage {
                conversation_id: conversation_id.into(),
                sender_id: identity.user_id.into(),
                text,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Marks a `Conversation` as read by the current `User` up to now.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `CONVERSATION_NOT_EXISTS` - the `Conversation` with the provided ID
    ///                               does not exist;
    /// - `NOT_PARTICIPANT` - the current `User` is not a participant of the
    ///                       `Conversation`.
    #[tracing::instrument(
        skip_all,
        fields(
            conversation_id = %conversation_id,
            gql.name = "markConversationRead",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn mark_conversation_read(
        conversation_id: api::conversation::Id,
        ctx: &Context,
    ) -> Result<bool, Error> {
        let identity = ctx.current_identity().await?;

        ctx.service()
            .execute(command::MarkConversationRead {
                conversation_id: conversation_id.into(),
                user_id: identity.user_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| true)
    }
}

impl AsError for command::update_listing::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "LISTING_DELETED"]
                #[status = CONFLICT]
                #[message = "`Listing` is deleted and cannot be edited"]
                ListingDeleted,

                #[code = "LISTING_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Listing` with the provided ID does not exist"]
                ListingNotExists,

                #[code = "NOT_ALLOWED"]
                #[status = FORBIDDEN]
                #[message = "Current `User` is not allowed to edit the \
                             `Listing`"]
                NotAllowed,
            }
        }

        match self {
            Self::ListingDeleted(_) => Some(Error::ListingDeleted.into()),
            Self::ListingNotExists(_) => Some(Error::ListingNotExists.into()),
            Self::NotAllowed(_) => Some(Error::NotAllowed.into()),
            Self::Store(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::mark_listing_sold::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "ILLEGAL_STATUS_TRANSITION"]
                #[status = CONFLICT]
                #[message = "`Listing` cannot be sold in its present status"]
                CannotSell,

                #[code = "LISTING_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Listing` with the provided ID does not exist"]
                ListingNotExists,

                #[code = "NOT_LISTING_SELLER"]
                #[status = FORBIDDEN]
                #[message = "Current `User` is not the seller of the \
                             `Listing`"]
                NotSeller,
            }
        }

        match self {
            Self::CannotSell(_) => Some(Error::CannotSell.into()),
            Self::ListingNotExists(_) => Some(Error::ListingNotExists.into()),
            Self::NotSeller(_) => Some(Error::NotSeller.into()),
            Self::Store(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::reactivate_listing::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "ILLEGAL_STATUS_TRANSITION"]
                #[status = CONFLICT]
                #[message = "`Listing` cannot be reactivated from its \
                             present status"]
                CannotReactivate,

                #[code = "LISTING_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Listing` with the provided ID does not exist"]
                ListingNotExists,

                #[code = "NOT_LISTING_SELLER"]
                #[status = FORBIDDEN]
                #[message = "Current `User` is not the seller of the \
                             `Listing`"]
                NotSeller,
            }
        }

        match self {
            Self::CannotReactivate(_) => {
                Some(Error::CannotReactivate.into())
            }
            Self::ListingNotExists(_) => Some(Error::ListingNotExists.into()),
            Self::NotSeller(_) => Some(Error::NotSeller.into()),
            Self::Store(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::delete_listing::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "LISTING_DELETED"]
                #[status = CONFLICT]
                #[message = "`Listing` is already deleted"]
                AlreadyDeleted,

                #[code = "LISTING_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Listing` with the provided ID does not exist"]
                ListingNotExists,

                #[code = "NOT_ALLOWED"]
                #[status = FORBIDDEN]
                #[message = "Current `User` is not allowed to delete the \
                             `Listing`"]
                NotAllowed,
            }
        }

        match self {
            Self::AlreadyDeleted(_) => Some(Error::AlreadyDeleted.into()),
            Self::ListingNotExists(_) => Some(Error::ListingNotExists.into()),
            Self::NotAllowed(_) => Some(Error::NotAllowed.into()),
            Self::Store(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::boost_listing::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "LISTING_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Listing` with the provided ID does not exist"]
                ListingNotExists,
            }
        }

        match self {
            Self::ListingNotExists(_) => Some(Error::ListingNotExists.into()),
            Self::NotAdmin(_) => Some(api::PrivilegeError::Admin.into()),
            Self::Store(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::toggle_listing_feature::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "LISTING_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Listing` with the provided ID does not exist"]
                ListingNotExists,
            }
        }

        match self {
            Self::ListingNotExists(_) => Some(Error::ListingNotExists.into()),
            Self::NotAdmin(_) => Some(api::PrivilegeError::Admin.into()),
            Self::Store(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::toggle_favorite::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "LISTING_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Listing` with the provided ID does not exist"]
                ListingNotExists,
            }
        }

        match self {
            Self::ListingNotExists(_) => Some(Error::ListingNotExists.into()),
            Self::Store(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::contact_seller::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "LISTING_NOT_AVAILABLE"]
                #[status = CONFLICT]
                #[message = "`Listing` is not available for contact"]
                ListingNotAvailable,

                #[code = "LISTING_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Listing` with the provided ID does not exist"]
                ListingNotExists,

                #[code = "SELF_CONTACT"]
                #[status = BAD_REQUEST]
                #[message = "`User` cannot contact themselves about their \
                             own `Listing`"]
                SelfContact,
            }
        }

        match self {
            Self::ListingNotAvailable(_) => {
                Some(Error::ListingNotAvailable.into())
            }
            Self::ListingNotExists(_) => Some(Error::ListingNotExists.into()),
            Self::SelfContact(_) => Some(Error::SelfContact.into()),
            Self::Store(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::send_message::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "CONVERSATION_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Conversation` with the provided ID does not \
                             exist"]
                ConversationNotExists,

                #[code = "INVALID_MESSAGE_TEXT"]
                #[status = BAD_REQUEST]
                #[message = "`Message` text is empty or too long"]
                InvalidText,
            }
        }

        match self {
            Self::ConversationNotExists(_) => {
                Some(Error::ConversationNotExists.into())
            }
            Self::InvalidText => Some(Error::InvalidText.into()),
            Self::NotParticipant(_) => {
                Some(api::ParticipationError::NotParticipant.into())
            }
            Self::Store(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::mark_conversation_read::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "CONVERSATION_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Conversation` with the provided ID does not \
                             exist"]
                ConversationNotExists,
            }
        }

        match self {
            Self::ConversationNotExists(_) => {
                Some(Error::ConversationNotExists.into())
            }
            Self::NotParticipant(_) => {
                Some(api::ParticipationError::NotParticipant.into())
            }
            Self::Store(e) => e.try_as_error(),
        }
    }
}
