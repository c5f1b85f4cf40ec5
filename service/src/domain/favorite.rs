//! [`Favorite`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use xxhash_rust::xxh3;

use crate::domain::{listing, user};
#[cfg(doc)]
use crate::domain::Listing;

/// Bookmark of a [`Listing`] by a user.
#[derive(Clone, Copy, Debug)]
pub struct Favorite {
    /// ID of this [`Favorite`].
    pub id: Id,

    /// ID of the user who bookmarked the [`Listing`].
    pub user_id: user::Id,

    /// ID of the bookmarked [`Listing`].
    pub listing_id: listing::Id,

    /// [`DateTime`] when this [`Favorite`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`Favorite`].
///
/// Derived deterministically from the user and the [`Listing`], so a user
/// may hold at most one [`Favorite`] per [`Listing`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Calculates the [`Id`] of the provided user's [`Favorite`] of the
    /// provided [`Listing`].
    #[must_use]
    pub fn of(user_id: user::Id, listing_id: listing::Id) -> Self {
        use std::hash::Hash as _;

        // WARNING: Avoid changing the order of the fields in the hasher,
        //          because it will be a breaking change requiring to migrate
        //          all existing favorites to the new format.
        let mut hasher = xxh3::Xxh3Builder::new().build();
        user_id.hash(&mut hasher);
        listing_id.hash(&mut hasher);

        Self(Uuid::from_u128(hasher.digest128()))
    }
}

/// [`DateTime`] when a [`Favorite`] was created.
pub type CreationDateTime = DateTimeOf<(Favorite, unit::Creation)>;
