//! [`Command`] for soft-deleting a [`Listing`].

use common::{
    operations::{By, Select, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{listing, user, Listing},
    infra::{store, Store},
    Service,
};

use super::Command;

/// [`Command`] for soft-deleting a [`Listing`].
///
/// The [`Listing`] is never physically erased, it only becomes hidden from
/// non-owner, non-admin views.
#[derive(Clone, Copy, Debug)]
pub struct DeleteListing {
    /// ID of the [`Listing`] to delete.
    pub listing_id: listing::Id,

    /// [`user::Actor`] deleting the [`Listing`].
    pub initiator: user::Actor,
}

impl<Db> Command<DeleteListing> for Service<Db>
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
        cmd: DeleteListing,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteListing {
            listing_id,
            initiator,
        } = cmd;

        let mut listing = self
            .store()
            .execute(Select(By::<Option<Listing>, _>::new(listing_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ListingNotExists(listing_id))
            .map_err(tracerr::wrap!())?;

        let deleted_by = if initiator.id == listing.seller_id {
            listing::DeletedBy::Seller
        } else if initiator.is_admin() {
            listing::DeletedBy::Admin
        } else {
            return Err(tracerr::new!(E::NotAllowed(initiator.id)));
        };

        if listing.is_deleted() {
            return Err(tracerr::new!(E::AlreadyDeleted(listing_id)));
        }

        listing.status = listing::Status::Deleted;
        _ = listing.deleted_at.replace(DateTime::now().coerce());
        _ = listing.deleted_by.replace(deleted_by);

        self.store()
            .execute(Update(listing.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(listing)
    }
}

/// Error of [`DeleteListing`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Listing`] is already deleted.
    #[display("`Listing(id: {_0})` is already deleted")]
    AlreadyDeleted(#[error(not(source))] listing::Id),

    /// [`Listing`] with the provided ID does not exist.
    #[display("`Listing(id: {_0})` does not exist")]
    ListingNotExists(#[error(not(source))] listing::Id),

    /// Initiator is neither the seller nor an administrator.
    #[display("`User(id: {_0})` is not allowed to delete the listing")]
    NotAllowed(#[error(not(source))] user::Id),

    /// [`Store`] error.
    #[display("`Store` operation failed: {_0}")]
    #[from]
    Store(store::Error),
}
