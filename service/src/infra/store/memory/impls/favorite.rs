//! [`Favorite`]-related [`Store`] implementations.

use common::operations::{By, Select, Toggle};
use tracerr::Traced;

use crate::{
    domain::{favorite, user, Favorite},
    infra::store::{self, memory::Change, Memory, Store},
    read,
};

impl Store<Toggle<Favorite>> for Memory {
    type Ok = read::favorite::IsFavorite;
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Toggle(favorite): Toggle<Favorite>,
    ) -> Result<Self::Ok, Self::Err> {
        let is_favorite = self.with_collections(|c| {
            if c.favorites.remove(&favorite.id).is_some() {
                read::favorite::IsFavorite(false)
            } else {
                _ = c.favorites.insert(favorite.id, favorite);
                read::favorite::IsFavorite(true)
            }
        })?;
        self.notify(Change::Favorites);
        Ok(is_favorite)
    }
}

impl Store<Select<By<Option<Favorite>, favorite::Id>>> for Memory {
    type Ok = Option<Favorite>;
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Favorite>, favorite::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.with_collections(|c| c.favorites.get(&id).copied())
    }
}

impl Store<Select<By<Vec<Favorite>, user::Id>>> for Memory {
    type Ok = Vec<Favorite>;
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Favorite>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let user_id = by.into_inner();
        self.with_collections(|c| {
            let mut favorites: Vec<_> = c
                .favorites
                .values()
                .filter(|f| f.user_id == user_id)
                .copied()
                .collect();
            favorites
                .sort_unstable_by(|a, b| b.created_at.cmp(&a.created_at));
            favorites
        })
    }
}
