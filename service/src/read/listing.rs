//! [`Listing`]-related read definitions.

use derive_more::Deref;

#[cfg(doc)]
use crate::domain::Listing;

/// Indicator whether a [`Listing`] is still available for contact and
/// purchase.
#[derive(Clone, Copy, Debug, Deref, Eq, Hash, PartialEq)]
pub struct IsAvailable(pub bool);

impl PartialEq<bool> for IsAvailable {
    fn eq(&self, other: &bool) -> bool {
        self.0 == *other
    }
}

/// Indicator whether a [`Listing`] is visually highlighted.
#[derive(Clone, Copy, Debug, Deref, Eq, Hash, PartialEq)]
pub struct IsFeatured(pub bool);

impl PartialEq<bool> for IsFeatured {
    fn eq(&self, other: &bool) -> bool {
        self.0 == *other
    }
}

pub mod list {
    //! [`Listing`] list definitions.

    use crate::domain::{listing, user};
    #[cfg(doc)]
    use crate::domain::Listing;

    /// Filter of a [`Listing`] list.
    ///
    /// Unset fields do not constrain the list.
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// ID of the seller to list [`Listing`]s of.
        pub seller_id: Option<user::Id>,

        /// [`listing::Status`] to list [`Listing`]s with.
        pub status: Option<listing::Status>,

        /// [`listing::Category`] to list [`Listing`]s of.
        pub category: Option<listing::Category>,

        /// [`listing::Canton`] to list [`Listing`]s from.
        pub canton: Option<listing::Canton>,

        /// Phrase to fuzzy search [`Listing`] titles and descriptions for.
        ///
        /// Matched case-insensitively as a substring.
        pub search: Option<String>,
    }
}
