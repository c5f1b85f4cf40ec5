//! [`Listing`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user;

/// Classified listing put up by a seller.
#[derive(Clone, Debug)]
pub struct Listing {
    /// ID of this [`Listing`].
    pub id: Id,

    /// ID of the seller who created this [`Listing`].
    pub seller_id: user::Id,

    /// [`Title`] of this [`Listing`].
    pub title: Title,

    /// [`Description`] of this [`Listing`].
    pub description: Description,

    /// Price of this [`Listing`].
    pub price: Money,

    /// [`Category`] of this [`Listing`].
    pub category: Category,

    /// [`Condition`] of the item offered by this [`Listing`].
    pub condition: Condition,

    /// [`Canton`] this [`Listing`] is offered in.
    pub canton: Canton,

    /// [`ZipCode`] of this [`Listing`]'s location, if provided.
    pub zip_code: Option<ZipCode>,

    /// Indicator whether the seller's phone number may be shown on this
    /// [`Listing`].
    pub show_phone: bool,

    /// [`ImageUrl`]s of the photos attached to this [`Listing`].
    pub images: Vec<ImageUrl>,

    /// [`Status`] of this [`Listing`].
    pub status: Status,

    /// Number of counted views of this [`Listing`].
    ///
    /// Only ever increases.
    pub view_count: ViewCount,

    /// Promotion score of this [`Listing`].
    ///
    /// Primary sort key of the default listing order. Only ever increases.
    pub boost_score: BoostScore,

    /// Indicator whether this [`Listing`] is visually highlighted.
    pub is_featured: bool,

    /// [`DateTime`] until which this [`Listing`] is highlighted, if ever set.
    pub featured_until: Option<FeaturedDateTime>,

    /// [`DateTime`] when this [`Listing`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Listing`] was edited the last time, if ever.
    pub updated_at: Option<UpdateDateTime>,

    /// [`DateTime`] when this [`Listing`] was deleted, if it was.
    ///
    /// Deletion is a soft status, the [`Listing`] is never physically erased.
    pub deleted_at: Option<DeletionDateTime>,

    /// Who deleted this [`Listing`], if anyone.
    pub deleted_by: Option<DeletedBy>,
}

impl Listing {
    /// Indicates whether this [`Listing`] is still offered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }

    /// Indicates whether this [`Listing`] is soft-deleted.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.status == Status::Deleted
    }

    /// Indicates whether this [`Listing`] may be shown to the provided
    /// viewer.
    ///
    /// A deleted [`Listing`] is hidden from everyone except its own seller
    /// and administrators, regardless of other fields.
    #[must_use]
    pub fn is_visible_to(&self, viewer: Option<&user::Actor>) -> bool {
        !self.is_deleted()
            || viewer
                .is_some_and(|v| v.is_admin() || v.id == self.seller_id)
    }
}

/// ID of a [`Listing`].
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
    PartialEq,
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

/// Title of a [`Listing`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct Title(String);

impl Title {
    /// Creates a new [`Title`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `title` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    /// Creates a new [`Title`] if the given `title` is valid.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        Self::check(&title).then_some(Self(title))
    }

    /// Checks whether the given `title` is a valid [`Title`].
    fn check(title: impl AsRef<str>) -> bool {
        let title = title.as_ref();
        title.trim() == title && !title.is_empty() && title.len() <= 256
    }
}

impl FromStr for Title {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Title`")
    }
}

/// Description of a [`Listing`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct Description(String);

impl Description {
    /// Creates a new [`Description`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `description` matches the
    /// format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(description: impl Into<String>) -> Self {
        Self(description.into())
    }

    /// Creates a new [`Description`] if the given `description` is valid.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Option<Self> {
        let description = description.into();
        Self::check(&description).then_some(Self(description))
    }

    /// Checks whether the given `description` is a valid [`Description`].
    fn check(description: impl AsRef<str>) -> bool {
        let description = description.as_ref();
        description.trim() == description
            && !description.is_empty()
            && description.len() <= 8192
    }
}

impl FromStr for Description {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Description`")
    }
}

/// Swiss postal code of a [`Listing`]'s location.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct ZipCode(String);

impl ZipCode {
    /// Creates a new [`ZipCode`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `code` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Creates a new [`ZipCode`] if the given `code` is valid.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Option<Self> {
        let code = code.into();
        Self::check(&code).then_some(Self(code))
    }

    /// Checks whether the given `code` is a valid [`ZipCode`].
    fn check(code: impl AsRef<str>) -> bool {
        let code = code.as_ref();
        code.len() == 4 && code.bytes().all(|b| b.is_ascii_digit())
    }
}

impl FromStr for ZipCode {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `ZipCode`")
    }
}

/// URL of a photo attached to a [`Listing`].
///
/// Refers to an externally hosted image, this core never stores the bytes.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct ImageUrl(String);

impl ImageUrl {
    /// Creates a new [`ImageUrl`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `url` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Creates a new [`ImageUrl`] if the given `url` is valid.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        Self::check(&url).then_some(Self(url))
    }

    /// Checks whether the given `url` is a valid [`ImageUrl`].
    fn check(url: impl AsRef<str>) -> bool {
        let url = url.as_ref();
        (url.starts_with("http://") || url.starts_with("https://"))
            && url.len() <= 2048
    }
}

impl FromStr for ImageUrl {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `ImageUrl`")
    }
}

/// Number of counted views of a [`Listing`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
pub struct ViewCount(u64);

impl ViewCount {
    /// Returns this [`ViewCount`] increased by exactly 1.
    #[must_use]
    pub fn incremented(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Promotion score of a [`Listing`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
pub struct BoostScore(u64);

impl BoostScore {
    /// Returns this [`BoostScore`] increased by exactly 1.
    #[must_use]
    pub fn incremented(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

define_kind! {
    #[doc = "Status of a [`Listing`]."]
    enum Status {
        #[doc = "Offered for sale."]
        Active = 1,

        #[doc = "Put aside for a specific buyer."]
        Reserved = 2,

        #[doc = "Sold to a buyer."]
        Sold = 3,

        #[doc = "No longer offered because its term has passed."]
        Expired = 4,

        #[doc = "Soft-deleted, hidden from non-owner, non-admin views."]
        Deleted = 5,
    }
}

impl Status {
    /// Checks whether this [`Status`] is allowed to become the `next` one.
    ///
    /// [`Status::Deleted`] is terminal, and the only cycle is
    /// [`Status::Sold`] back to [`Status::Active`] (reactivation).
    #[must_use]
    pub fn allows(self, next: Self) -> bool {
        use Status as S;

        match (self, next) {
            (S::Active, S::Reserved | S::Sold | S::Expired | S::Deleted)
            | (S::Reserved, S::Active | S::Sold | S::Deleted)
            | (S::Sold, S::Active | S::Deleted)
            | (S::Expired, S::Deleted) => true,
            (
                S::Deleted,
                S::Active | S::Reserved | S::Sold | S::Expired | S::Deleted,
            )
            | (S::Active, S::Active)
            | (S::Reserved, S::Reserved | S::Expired)
            | (S::Sold, S::Reserved | S::Sold | S::Expired)
            | (S::Expired, S::Active | S::Reserved | S::Sold | S::Expired) => {
                false
            }
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Active
    }
}

define_kind! {
    #[doc = "Who deleted a [`Listing`]."]
    enum DeletedBy {
        #[doc = "The seller themselves."]
        Seller = 1,

        #[doc = "An administrator."]
        Admin = 2,
    }
}

define_kind! {
    #[doc = "Category of a [`Listing`]."]
    enum Category {
        #[doc = "Fishing rods."]
        Rods = 1,

        #[doc = "Fishing reels."]
        Reels = 2,

        #[doc = "Lures and baits."]
        Lures = 3,

        #[doc = "Accessories and tackle."]
        Accessories = 4,

        #[doc = "Clothing."]
        Clothing = 5,

        #[doc = "Boats."]
        Boats = 6,

        #[doc = "Everything else."]
        Other = 7,
    }
}

define_kind! {
    #[doc = "Condition of the item offered by a [`Listing`]."]
    enum Condition {
        #[doc = "Brand new."]
        New = 1,

        #[doc = "Used."]
        Used = 2,

        #[doc = "Defective, for parts or repair."]
        Defective = 3,

        #[doc = "Self-made."]
        Handmade = 4,
    }
}

define_kind! {
    #[doc = "Swiss canton a [`Listing`] is offered in."]
    enum Canton {
        #[doc = "Aargau."]
        Ag = 1,

        #[doc = "Appenzell Innerrhoden."]
        Ai = 2,

        #[doc = "Appenzell Ausserrhoden."]
        Ar = 3,

        #[doc = "Bern."]
        Be = 4,

        #[doc = "Basel-Landschaft."]
        Bl = 5,

        #[doc = "Basel-Stadt."]
        Bs = 6,

        #[doc = "Fribourg."]
        Fr = 7,

        #[doc = "Geneva."]
        Ge = 8,

        #[doc = "Glarus."]
        Gl = 9,

        #[doc = "Graubünden."]
        Gr = 10,

        #[doc = "Jura."]
        Ju = 11,

        #[doc = "Lucerne."]
        Lu = 12,

        #[doc = "Neuchâtel."]
        Ne = 13,

        #[doc = "Nidwalden."]
        Nw = 14,

        #[doc = "Obwalden."]
        Ow = 15,

        #[doc = "St. Gallen."]
        Sg = 16,

        #[doc = "Schaffhausen."]
        Sh = 17,

        #[doc = "Solothurn."]
        So = 18,

        #[doc = "Schwyz."]
        Sz = 19,

        #[doc = "Thurgau."]
        Tg = 20,

        #[doc = "Ticino."]
        Ti = 21,

        #[doc = "Uri."]
        Ur = 22,

        #[doc = "Vaud."]
        Vd = 23,

        #[doc = "Valais."]
        Vs = 24,

        #[doc = "Zug."]
        Zg = 25,

        #[doc = "Zürich."]
        Zh = 26,
    }
}

/// [`DateTime`] when a [`Listing`] was created.
pub type CreationDateTime = DateTimeOf<(Listing, unit::Creation)>;

/// [`DateTime`] when a [`Listing`] was edited the last time.
pub type UpdateDateTime = DateTimeOf<(Listing, unit::Update)>;

/// [`DateTime`] when a [`Listing`] was deleted.
pub type DeletionDateTime = DateTimeOf<(Listing, unit::Deletion)>;

/// [`DateTime`] until which a [`Listing`] is highlighted.
pub type FeaturedDateTime = DateTimeOf<(Listing, unit::Featuring)>;

#[cfg(test)]
mod spec {
    use super::{ImageUrl, Status, ZipCode};

    #[test]
    fn deleted_is_terminal() {
        for next in [
            Status::Active,
            Status::Reserved,
            Status::Sold,
            Status::Expired,
            Status::Deleted,
        ] {
            assert!(!Status::Deleted.allows(next));
        }
    }

    #[test]
    fn sold_reactivates() {
        assert!(Status::Active.allows(Status::Sold));
        assert!(Status::Sold.allows(Status::Active));
        assert!(!Status::Expired.allows(Status::Active));
    }

    #[test]
    fn any_live_status_deletes() {
        for status in [
            Status::Active,
            Status::Reserved,
            Status::Sold,
            Status::Expired,
        ] {
            assert!(status.allows(Status::Deleted));
        }
    }

    #[test]
    fn zip_code_is_four_digits() {
        assert!(ZipCode::new("8001").is_some());
        assert!(ZipCode::new("801").is_none());
        assert!(ZipCode::new("80011").is_none());
        assert!(ZipCode::new("8o01").is_none());
    }

    #[test]
    fn image_url_requires_http_scheme() {
        assert!(ImageUrl::new("https://img.example.com/rod.jpg").is_some());
        assert!(ImageUrl::new("http://img.example.com/rod.jpg").is_some());
        assert!(ImageUrl::new("ftp://img.example.com/rod.jpg").is_none());
        assert!(ImageUrl::new("img.example.com/rod.jpg").is_none());
    }
}
