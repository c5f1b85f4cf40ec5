//! [`Command`] for boosting a [`Listing`] in the default ordering.

use common::operations::{By, Increment};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Listing;
use crate::{
    domain::{listing, user},
    infra::{store, Store},
    Service,
};

use super::Command;

/// [`Command`] for boosting a [`Listing`] in the default ordering.
///
/// Every execution increments the [`listing::BoostScore`] by exactly 1,
/// atomically, so concurrent administrators never lose each other's boosts.
#[derive(Clone, Copy, Debug)]
pub struct BoostListing {
    /// ID of the [`Listing`] to boost.
    pub listing_id: listing::Id,

    /// [`user::Actor`] boosting the [`Listing`].
    pub initiator: user::Actor,
}

impl<Db> Command<BoostListing> for Service<Db>
where
    Db: Store<
        Increment<By<listing::BoostScore, listing::Id>>,
        Ok = Option<listing::BoostScore>,
        Err = Traced<store::Error>,
    >,
{
    type Ok = listing::BoostScore;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: BoostListing,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let BoostListing {
            listing_id,
            initiator,
        } = cmd;

        if !initiator.is_admin() {
            return Err(tracerr::new!(E::NotAdmin(initiator.id)));
        }

        self.store()
            .execute(Increment(By::new(listing_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ListingNotExists(listing_id))
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`BoostListing`] [`Command`] execution.
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
