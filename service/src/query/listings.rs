//! [`Query`] collection related to the multiple [`Listing`]s.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{user, Listing},
    infra::{store, Store},
    read, Service,
};

use super::Query;

/// Queries a list of [`Listing`]s visible to a viewer, in the default
/// order: boost score descending, then creation time descending.
#[derive(Clone, Debug, Default)]
pub struct List {
    /// Filter of the list.
    pub filter: read::listing::list::Filter,

    /// [`user::Actor`] viewing the list, if authenticated.
    ///
    /// Deleted [`Listing`]s are hidden unless the viewer is their seller or
    /// an administrator.
    pub viewer: Option<user::Actor>,
}

impl<Db> Query<List> for Service<Db>
where
    Db: Store<
        Select<By<Vec<Listing>, read::listing::list::Filter>>,
        Ok = Vec<Listing>,
        Err = Traced<store::Error>,
    >,
{
    type Ok = Vec<Listing>;
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        List { filter, viewer }: List,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self
            .store()
            .execute(Select(By::new(filter)))
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .filter(|l| l.is_visible_to(viewer.as_ref()))
            .collect())
    }
}
