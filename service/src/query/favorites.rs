//! [`Query`] collection related to [`Favorite`]s.

use common::operations::By;

use crate::domain::{favorite, user, Favorite};
#[cfg(doc)]
use crate::Query;

use super::StoreQuery;

/// Queries all the [`Favorite`]s of a user, most recent first.
pub type ByUser = StoreQuery<By<Vec<Favorite>, user::Id>>;

/// Queries a single [`Favorite`] by its [`favorite::Id`].
pub type ById = StoreQuery<By<Option<Favorite>, favorite::Id>>;
