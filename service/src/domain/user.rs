//! User identity definitions.

use common::define_kind;
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ID of a user.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

define_kind! {
    #[doc = "Role of a user."]
    enum Role {
        #[doc = "Regular marketplace member."]
        Member = 1,

        #[doc = "Administrator with moderation privileges."]
        Admin = 2,
    }
}

/// User performing an operation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Actor {
    /// ID of this [`Actor`].
    pub id: Id,

    /// [`Role`] of this [`Actor`].
    pub role: Role,
}

impl Actor {
    /// Indicates whether this [`Actor`] is an [`Role::Admin`].
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
