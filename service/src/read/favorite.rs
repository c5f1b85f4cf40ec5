//! [`Favorite`]-related read definitions.

use derive_more::Deref;

#[cfg(doc)]
use crate::domain::{Favorite, Listing};

/// Indicator whether a [`Listing`] is bookmarked as a [`Favorite`].
#[derive(Clone, Copy, Debug, Deref, Eq, Hash, PartialEq)]
pub struct IsFavorite(pub bool);

impl PartialEq<bool> for IsFavorite {
    fn eq(&self, other: &bool) -> bool {
        self.0 == *other
    }
}
