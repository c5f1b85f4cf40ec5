//! [`Command`] for toggling a [`Favorite`] of a [`Listing`].

use common::{
    operations::{By, Select, Toggle},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{favorite, listing, user, Favorite, Listing},
    infra::{store, Store},
    read, Service,
};

use super::Command;

/// [`Command`] for toggling a [`Favorite`] of a [`Listing`].
///
/// Bookmarks the [`Listing`] if it is not bookmarked yet, and removes the
/// bookmark otherwise.
#[derive(Clone, Copy, Debug)]
pub struct ToggleFavorite {
    /// ID of the user toggling the [`Favorite`].
    pub user_id: user::Id,

    /// ID of the [`Listing`] to toggle the [`Favorite`] of.
    pub listing_id: listing::Id,
}

impl<Db> Command<ToggleFavorite> for Service<Db>
where
    Db: Store<
            Select<By<Option<Listing>, listing::Id>>,
            Ok = Option<Listing>,
            Err = Traced<store::Error>,
        > + Store<
            Toggle<Favorite>,
            Ok = read::favorite::IsFavorite,
            Err = Traced<store::Error>,
        >,
{
    type Ok = read::favorite::IsFavorite;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ToggleFavorite,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ToggleFavorite {
            user_id,
            listing_id,
        } = cmd;

        self.store()
            .execute(Select(By::<Option<Listing>, _>::new(listing_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ListingNotExists(listing_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        self.store()
            .execute(Toggle(Favorite {
                id: favorite::Id::of(user_id, listing_id),
                user_id,
                listing_id,
                created_at: DateTime::now().coerce(),
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`ToggleFavorite`] [`Command`] execution.
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
