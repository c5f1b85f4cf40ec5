//! [`Query`] collection related to the multiple [`Conversation`]s.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{user, Conversation},
    infra::{store, Store},
    read, Service,
};

use super::{Query, StoreQuery, StoreWatch};

/// Queries all the [`Conversation`]s of a participant, most recently active
/// first.
pub type ByParticipant = StoreQuery<By<Vec<Conversation>, user::Id>>;

/// Subscribes to live updates of a participant's [`Conversation`] list.
pub type Watched = StoreWatch<By<Vec<Conversation>, user::Id>>;

/// Queries the number of unread [`Conversation`]s of a user.
#[derive(Clone, Copy, Debug)]
pub struct UnreadCount {
    /// ID of the user to count unread [`Conversation`]s of.
    pub user_id: user::Id,
}

impl<Db> Query<UnreadCount> for Service<Db>
where
    Db: Store<
        Select<By<Vec<Conversation>, user::Id>>,
        Ok = Vec<Conversation>,
        Err = Traced<store::Error>,
    >,
{
    type Ok = read::conversation::UnreadCount;
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        UnreadCount { user_id }: UnreadCount,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self
            .store()
            .execute(Select(By::new(user_id)))
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .filter(|c| c.is_unread_by(user_id))
            .count()
            .into())
    }
}
