//! [`Query`] definition.

pub mod conversation;
pub mod conversations;
pub mod favorites;
pub mod listing;
pub mod listings;
pub mod messages;

use common::operations::{By, Select, Watch};
use tracerr::Traced;

use crate::{
    infra::{store, Store},
    Service,
};

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

/// [`Query`] [`Select`]ing a `T`ype from a [`Store`].
#[derive(Clone, Copy, Debug)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct StoreQuery<T>(T);

impl<W, B> StoreQuery<By<W, B>> {
    /// Creates a new [`StoreQuery`] selecting a `W` by the provided `B`.
    #[must_use]
    pub fn by(by: B) -> Self {
        Self(By::new(by))
    }
}

impl<Db, W, B> Query<StoreQuery<By<W, B>>> for Service<Db>
where
    Db: Store<Select<By<W, B>>, Ok = W, Err = Traced<store::Error>>,
{
    type Ok = W;
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        StoreQuery(by): StoreQuery<By<W, B>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.store()
            .execute(Select(by))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// [`Query`] subscribing to live updates of a `T`ype in a [`Store`].
///
/// Resolves to a stream yielding the current snapshot immediately and a
/// fresh one after every relevant change. Dropping the stream releases the
/// subscription.
#[derive(Clone, Copy, Debug)]
pub struct StoreWatch<T>(T);

impl<W, B> StoreWatch<By<W, B>> {
    /// Creates a new [`StoreWatch`] following a `W` by the provided `B`.
    #[must_use]
    pub fn by(by: B) -> Self {
        Self(By::new(by))
    }
}

impl<Db, W, B> Query<StoreWatch<By<W, B>>> for Service<Db>
where
    Db: Store<Watch<By<W, B>>, Err = Traced<store::Error>>,
{
    type Ok = <Db as Store<Watch<By<W, B>>>>::Ok;
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        StoreWatch(by): StoreWatch<By<W, B>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.store()
            .execute(Watch(by))
            .await
            .map_err(tracerr::wrap!())
    }
}
