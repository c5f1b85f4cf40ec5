//! [`Command`] for starting a [`Conversation`] with a seller.

use common::{
    operations::{By, Insert, Select},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{conversation, listing, user, Conversation, Listing},
    infra::{store, Store},
    Service,
};

use super::Command;

/// [`Command`] for starting a [`Conversation`] with the seller of a
/// [`Listing`].
///
/// Idempotent: contacting the same seller about the same [`Listing`] again
/// resolves to the already existing [`Conversation`].
#[derive(Clone, Copy, Debug)]
pub struct ContactSeller {
    /// ID of the [`Listing`] to contact the seller of.
    pub listing_id: listing::Id,

    /// ID of the buyer contacting the seller.
    pub buyer_id: user::Id,
}

impl<Db> Command<ContactSeller> for Service<Db>
where
    Db: Store<
            Select<By<Option<Listing>, listing::Id>>,
            Ok = Option<Listing>,
            Err = Traced<store::Error>,
        > + Store<
            Select<By<Option<Conversation>, conversation::Id>>,
            Ok = Option<Conversation>,
            Err = Traced<store::Error>,
        > + Store<Insert<Conversation>, Err = Traced<store::Error>>,
{
    type Ok = Conversation;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ContactSeller,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ContactSeller {
            listing_id,
            buyer_id,
        } = cmd;

        let listing = self
            .store()
            .execute(Select(By::<Option<Listing>, _>::new(listing_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ListingNotExists(listing_id))
            .map_err(tracerr::wrap!())?;

        if !listing.is_active() {
            return Err(tracerr::new!(E::ListingNotAvailable(listing_id)));
        }

        let participants =
            conversation::Participants::new(buyer_id, listing.seller_id)
                .ok_or(E::SelfContact(buyer_id))
                .map_err(tracerr::wrap!())?;
        let id = conversation::Id::of(listing_id, participants);

        let existing = self
            .store()
            .execute(Select(By::<Option<Conversation>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if let Some(conversation) = existing {
            // The pair already talks about this listing.
            return Ok(conversation);
        }

        let conversation = Conversation {
            id,
            listing_id,
            participants,
            last_message: None,
            last_message_at: None,
            last_read: conversation::ReadMarks::default(),
            created_at: DateTime::now().coerce(),
        };

        self.store()
            .execute(Insert(conversation.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(conversation)
    }
}

/// Error of [`ContactSeller`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Listing`] is not offered anymore.
    #[display("`Listing(id: {_0})` is not available")]
    ListingNotAvailable(#[error(not(source))] listing::Id),

    /// [`Listing`] with the provided ID does not exist.
    #[display("`Listing(id: {_0})` does not exist")]
    ListingNotExists(#[error(not(source))] listing::Id),

    /// Buyer tried to contact themselves.
    #[display("`User(id: {_0})` cannot contact themselves")]
    SelfContact(#[error(not(source))] user::Id),

    /// [`Store`] error.
    #[display("`Store` operation failed: {_0}")]
    #[from]
    Store(store::Error),
}
