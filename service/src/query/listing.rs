//! [`Query`] collection related to a single [`Listing`].

use common::operations::By;

use crate::domain::{listing, Listing};
#[cfg(doc)]
use crate::Query;

use super::{StoreQuery, StoreWatch};

/// Queries a [`Listing`] by its [`listing::Id`].
pub type ById = StoreQuery<By<Option<Listing>, listing::Id>>;

/// Subscribes to live updates of a [`Listing`].
pub type Watched = StoreWatch<By<Option<Listing>, listing::Id>>;
