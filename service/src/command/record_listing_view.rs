//! [`Command`] for recording a view of a [`Listing`].

use common::{
    operations::{By, Increment, Select},
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

/// [`Command`] for recording a view of a [`Listing`].
///
/// The view is counted at most once per throttle window per device, and a
/// seller viewing their own [`Listing`] is never counted. A throttled view
/// is a normal no-op [`Outcome`], not an error.
#[derive(Clone, Copy, Debug)]
pub struct RecordListingView {
    /// ID of the viewed [`Listing`].
    pub listing_id: listing::Id,

    /// ID of the viewing user, if authenticated.
    pub viewer_id: Option<user::Id>,
}

/// Outcome of a [`RecordListingView`] [`Command`] execution.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// View was counted, yielding the new [`listing::ViewCount`].
    Counted(listing::ViewCount),

    /// View was throttled and not counted.
    Throttled,
}

impl<Db> Command<RecordListingView> for Service<Db>
where
    Db: Store<
            Select<By<Option<Listing>, listing::Id>>,
            Ok = Option<Listing>,
            Err = Traced<store::Error>,
        > + Store<
            Increment<By<listing::ViewCount, listing::Id>>,
            Ok = Option<listing::ViewCount>,
            Err = Traced<store::Error>,
        >,
{
    type Ok = Outcome;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: RecordListingView,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RecordListingView {
            listing_id,
            viewer_id,
        } = cmd;

        let listing = self
            .store()
            .execute(Select(By::<Option<Listing>, _>::new(listing_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ListingNotExists(listing_id))
            .map_err(tracerr::wrap!())?;

        if viewer_id == Some(listing.seller_id) {
            return Ok(Outcome::Throttled);
        }
        if !self.view_log().passes(listing_id, DateTime::now()) {
            return Ok(Outcome::Throttled);
        }

        self.store()
            .execute(Increment(By::new(listing_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ListingNotExists(listing_id))
            .map_err(tracerr::wrap!())
            .map(Outcome::Counted)
    }
}

/// Error of [`RecordListingView`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Listing`] with the provided ID does not exist.
    #[display("`Listing(id: {_0})` does not exist")]
    ListingNotExists(#[error(not(source))] listing::Id),

    /// [`Store`] error.
    #[display("`Store` operation failed: {_0}")]
    #[from]
    Store(store::Error),
}
