//! [`Command`] for putting a sold [`Listing`] back on offer.

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{listing, user, Listing},
    infra::{store, Store},
    Service,
};

use super::Command;

/// [`Command`] for putting a sold [`Listing`] back on offer.
#[derive(Clone, Copy, Debug)]
pub struct ReactivateListing {
    /// ID of the [`Listing`] to reactivate.
    pub listing_id: listing::Id,

    /// ID of the user reactivating the [`Listing`].
    pub initiator_id: user::Id,
}

impl<Db> Command<ReactivateListing> for Service<Db>
where
    Db: Store<
            Select<By<Option<Listing>, listing::Id>>,
            Ok = Option<Listing>,
            Err = Traced<store::Error>,
        > + Store<Update<Listing>, Err = Traced<store::Error>>,
{
    type Ok = Listing;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ReactivateListing,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ReactivateListing {
            listing_id,
            initiator_id,
        } = cmd;

        let mut listing = self
            .store()
            .execute(Select(By::<Option<Listing>, _>::new(listing_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ListingNotExists(listing_id))
            .map_err(tracerr::wrap!())?;

        if listing.seller_id != initiator_id {
            return Err(tracerr::new!(E::NotSeller(initiator_id)));
        }
        if !listing.status.allows(listing::Status::Active) {
            return Err(tracerr::new!(E::CannotReactivate(listing_id)));
        }

        listing.status = listing::Status::Active;

        self.store()
            .execute(Update(listing.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(listing)
    }
}

/// Error of [`ReactivateListing`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Listing`] cannot become active from its current status.
    #[display("`Listing(id: {_0})` cannot be reactivated")]
    CannotReactivate(#[error(not(source))] listing::Id),

    /// [`Listing`] with the provided ID does not exist.
    #[display("`Listing(id: {_0})` does not exist")]
    ListingNotExists(#[error(not(source))] listing::Id),

    /// Initiator is not the seller of the [`Listing`].
    #[display("`User(id: {_0})` is not the seller of the listing")]
    NotSeller(#[error(not(source))] user::Id),

    /// [`Store`] error.
    #[display("`Store` operation failed: {_0}")]
    #[from]
    Store(store::Error),
}
