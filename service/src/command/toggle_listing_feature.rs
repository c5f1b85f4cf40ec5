//! [`Command`] for toggling the featured flag of a [`Listing`].

use common::operations::{By, Toggle};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{listing, user, Listing},
    infra::{store, Store},
    read, Service,
};

use super::Command;

/// [`Command`] for toggling the featured flag of a [`Listing`].
///
/// Is its own inverse: executing it twice restores the original flag.
#[derive(Clone, Copy, Debug)]
pub struct ToggleListingFeature {
    /// ID of the [`Listing`] to toggle the flag of.
    pub listing_id: listing::Id,

    /// [`user::Actor`] toggling the flag.
    pub initiator: user::Actor,
}

impl<Db> Command<ToggleListingFeature> for Service<Db>
where
    Db: Store<
        Toggle<By<Listing, listing::Id>>,
        Ok = Option<read::listing::IsFeatured>,
        Err = Traced<store::Error>,
    >,
{
    type Ok = read::listing::IsFeatured;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ToggleListingFeature,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ToggleListingFeature {
            listing_id,
            initiator,
        } = cmd;

        if !initiator.is_admin() {
            return Err(tracerr::new!(E::NotAdmin(initiator.id)));
        }

        self.store()
            .execute(Toggle(By::new(listing_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ListingNotExists(listing_id))
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`ToggleListingFeature`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Listing`] with the provided ID does not exist.
    #[display("`Listing(id: {_0})` does not exist")]
    ListingNotExists(#[error(not(source))] listing::Id),

    /// Initiator is not an administrator.
    #[display("`User(id: {_0})` is not an administrator")]
    NotAdmin(#[error(not(source))] user::Id),

    /// [`Store`] error.
    #[display("`Store` operation failed: {_0}")]
    #[from]
    Store(store::Error),
}
