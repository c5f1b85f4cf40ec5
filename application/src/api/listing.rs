//! [`Listing`]-related definitions.

use std::future;

use common::{DateTime, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::{domain, query, Query as _};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{api, api::scalar, AsError, Context, Error};

/// A classified listing put up by a seller.
#[derive(Clone, Debug, From)]
pub struct Listing {
    /// ID of this [`Listing`].
    id: Id,

    /// Underlying [`domain::Listing`].
    listing: OnceCell<domain::Listing>,
}

impl From<domain::Listing> for Listing {
    fn from(listing: domain::Listing) -> Self {
        Self {
            id: listing.id.into(),
            listing: OnceCell::new_with(Some(listing)),
        }
    }
}

impl Listing {
    /// Creates a new [`Listing`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Listing`] with the provided ID exists,
    /// otherwise accessing this [`Listing`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            listing: OnceCell::new(),
        }
    }

    /// Returns the underlying [`domain::Listing`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Listing`] doesn't exist.
    async fn listing(&self, ctx: &Context) -> Result<&domain::Listing, Error> {
        let id = self.id.into();
        self.listing
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::listing::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|l| {
                        future::ready(l.ok_or_else(|| {
                            api::query::ListingError::NotExists.into()
                        }))
                    })
            })
            .await
    }
}

/// A classified listing put up by a seller.
#[graphql_object(context = Context)]
impl Listing {
    /// Unique identifier of this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// ID of the seller who created this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.sellerId",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn seller_id(&self, ctx: &Context) -> Result<api::user::Id, Error> {
        Ok(self.listing(ctx).await?.seller_id.into())
    }

    /// Title of this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.title",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn title(&self, ctx: &Context) -> Result<Title, Error> {
        Ok(self.listing(ctx).await?.title.clone().into())
    }

    /// Description of this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.description",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn description(
        &self,
        ctx: &Context,
    ) -> Result<Description, Error> {
        Ok(self.listing(ctx).await?.description.clone().into())
    }

    /// Price of this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.price",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn price(&self, ctx: &Context) -> Result<Money, Error> {
        Ok(self.listing(ctx).await?.price)
    }

    /// Category of this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.category",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn category(&self, ctx: &Context) -> Result<Category, Error> {
        Ok(self.listing(ctx).await?.category.into())
    }

    /// Condition of the item offered by this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.condition",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn condition(&self, ctx: &Context) -> Result<Condition, Error> {
        Ok(self.listing(ctx).await?.condition.into())
    }

    /// Swiss canton this `Listing` is offered in.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.canton",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn canton(&self, ctx: &Context) -> Result<Canton, Error> {
        Ok(self.listing(ctx).await?.canton.into())
    }

    /// Zip code of this `Listing`'s location, if provided.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.zipCode",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn zip_code(
        &self,
        ctx: &Context,
    ) -> Result<Option<ZipCode>, Error> {
        Ok(self.listing(ctx).await?.zip_code.clone().map(Into::into))
    }

    /// Indicator whether the seller's phone number may be shown on this
    /// `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.showPhone",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn show_phone(&self, ctx: &Context) -> Result<bool, Error> {
        Ok(self.listing(ctx).await?.show_phone)
    }

    /// URLs of the photos attached to this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.images",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn images(&self, ctx: &Context) -> Result<Vec<ImageUrl>, Error> {
        Ok(self
            .listing(ctx)
            .await?
            .images
            .iter()
            .cloned()
            .map(Into::into)
            .collect())
    }

    /// Status of this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.status",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn status(&self, ctx: &Context) -> Result<Status, Error> {
        Ok(self.listing(ctx).await?.status.into())
    }

    /// Number of counted views of this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.viewCount",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn view_count(&self, ctx: &Context) -> Result<i32, Error> {
        u64::from(self.listing(ctx).await?.view_count)
            .try_into()
            .map_err(AsError::into_error)
    }

    /// Promotion score of this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.boostScore",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn boost_score(&self, ctx: &Context) -> Result<i32, Error> {
        u64::from(self.listing(ctx).await?.boost_score)
            .try_into()
            .map_err(AsError::into_error)
    }

    /// Indicator whether this `Listing` is visually highlighted.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.isFeatured",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn is_featured(&self, ctx: &Context) -> Result<bool, Error> {
        Ok(self.listing(ctx).await?.is_featured)
    }

    /// `DateTime` until which this `Listing` is highlighted, if ever set.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.featuredUntil",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn featured_until(
        &self,
        ctx: &Context,
    ) -> Result<Option<DateTime>, Error> {
        Ok(self.listing(ctx).await?.featured_until.map(DateTimeOf::coerce))
    }

    /// Indicator whether the current `User` has bookmarked this `Listing`.
    ///
    /// Always `false` for anonymous requests.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.isFavorite",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn is_favorite(&self, ctx: &Context) -> Result<bool, Error> {
        let Some(identity) = ctx.try_current_identity().await? else {
            return Ok(false);
        };

        let id = domain::favorite::Id::of(
            identity.user_id.into(),
            self.id.into(),
        );
        ctx.service()
            .execute(query::favorites::ById::by(id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|f| f.is_some())
    }

    /// `DateTime` when this `Listing` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.listing(ctx).await?.created_at.coerce())
    }

    /// `DateTime` when this `Listing` was edited the last time, if ever.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.updatedAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn updated_at(
        &self,
        ctx: &Context,
    ) -> Result<Option<DateTime>, Error> {
        Ok(self.listing(ctx).await?.updated_at.map(DateTimeOf::coerce))
    }
}

/// Unique identifier of a `Listing`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(Uuid, domain::listing::Id)]
#[into(domain::listing::Id)]
#[graphql(name = "ListingId", transparent)]
pub struct Id(Uuid);

/// Title of a `Listing`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ListingTitle",
    with = scalar::Via::<domain::listing::Title>,
)]
pub struct Title(domain::listing::Title);

/// Description of a `Listing`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ListingDescription",
    with = scalar::Via::<domain::listing::Description>,
)]
pub struct Description(domain::listing::Description);

/// Zip code of a `Listing`'s location.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ListingZipCode",
    with = scalar::Via::<domain::listing::ZipCode>,
)]
pub struct ZipCode(domain::listing::ZipCode);

/// URL of a photo attached to a `Listing`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ListingImageUrl",
    with = scalar::Via::<domain::listing::ImageUrl>,
)]
pub struct ImageUrl(domain::listing::ImageUrl);

/// Status of a `Listing`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "ListingStatus")]
pub enum Status {
    /// Offered for sale.
    Active,

    /// Put aside for a specific buyer.
    Reserved,

    /// Sold to a buyer.
    Sold,

    /// No longer offered because its term has passed.
    Expired,

    /// Soft-deleted, hidden from non-owner, non-admin views.
    Deleted,
}

impl From<domain::listing::Status> for Status {
    fn from(status: domain::listing::Status) -> Self {
        use domain::listing::Status as S;

        match status {
            S::Active => Self::Active,
            S::Reserved => Self::Reserved,
            S::Sold => Self::Sold,
            S::Expired => Self::Expired,
            S::Deleted => Self::Deleted,
        }
    }
}

impl From<Status> for domain::listing::Status {
    fn from(status: Status) -> Self {
        match status {
            Status::Active => Self::Active,
            Status::Reserved => Self::Reserved,
            Status::Sold => Self::Sold,
            Status::Expired => Self::Expired,
            Status::Deleted => Self::Deleted,
        }
    }
}

/// Category of a `Listing`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "ListingCategory")]
pub enum Category {
    /// Fishing rods.
    Rods,

    /// Fishing reels.
    Reels,

    /// Lures and baits.
    Lures,

    /// Accessories and tackle.
    Accessories,

    /// Clothing.
    Clothing,

    /// Boats.
    Boats,

    /// Everything else.
    Other,
}

impl From<domain::listing::Category> for Category {
    fn from(category: domain::listing::Category) -> Self {
        use domain::listing::Category as C;

        match category {
            C::Rods => Self::Rods,
            C::Reels => Self::Reels,
            C::Lures => Self::Lures,
            C::Accessories => Self::Accessories,
            C::Clothing => Self::Clothing,
            C::Boats => Self::Boats,
            C::Other => Self::Other,
        }
    }
}

impl From<Category> for domain::listing::Category {
    fn from(category: Category) -> Self {
        match category {
            Category::Rods => Self::Rods,
            Category::Reels => Self::Reels,
            Category::Lures => Self::Lures,
            Category::Accessories => Self::Accessories,
            Category::Clothing => Self::Clothing,
            Category::Boats => Self::Boats,
            Category::Other => Self::Other,
        }
    }
}

/// Condition of the item offered by a `Listing`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "ListingCondition")]
pub enum Condition {
    /// Brand new.
    New,

    /// Used.
    Used,

    /// Defective, for parts or repair.
    Defective,

    /// Self-made.
    Handmade,
}

impl From<domain::listing::Condition> for Condition {
    fn from(condition: domain::listing::Condition) -> Self {
        use domain::listing::Condition as C;

        match condition {
            C::New => Self::New,
            C::Used => Self::Used,
            C::Defective => Self::Defective,
            C::Handmade => Self::Handmade,
        }
    }
}

impl From<Condition> for domain::listing::Condition {
    fn from(condition: Condition) -> Self {
        match condition {
            Condition::New => Self::New,
            Condition::Used => Self::Used,
            Condition::Defective => Self::Defective,
            Condition::Handmade => Self::Handmade,
        }
    }
}

/// Swiss canton a `Listing` is offered in.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "ListingCanton")]
pub enum Canton {
    /// Aargau.
    Ag,

    /// Appenzell Innerrhoden.
    Ai,

    /// Appenzell Ausserrhoden.
    Ar,

    /// Bern.
    Be,

    /// Basel-Landschaft.
    Bl,

    /// Basel-Stadt.
    Bs,

    /// Fribourg.
    Fr,

    /// Geneva.
    Ge,

    /// Glarus.
    Gl,

    /// Graubünden.
    Gr,

    /// Jura.
    Ju,

    /// Lucerne.
    Lu,

    /// Neuchâtel.
    Ne,

    /// Nidwalden.
    Nw,

    /// Obwalden.
    Ow,

    /// St. Gallen.
    Sg,

    /// Schaffhausen.
    Sh,

    /// Solothurn.
    So,

    /// Schwyz.
    Sz,

    /// Thurgau.
    Tg,

    /// Ticino.
    Ti,

    /// Uri.
    Ur,

    /// Vaud.
    Vd,

    /// Valais.
    Vs,

    /// Zug.
    Zg,

    /// Zürich.
    Zh,
}

impl From<domain::listing::Canton> for Canton {
    fn from(canton: domain::listing::Canton) -> Self {
        use domain::listing::Canton as C;

        match canton {
            C::Ag => Self::Ag,
            C::Ai => Self::Ai,
            C::Ar => Self::Ar,
            C::Be => Self::Be,
            C::Bl => Self::Bl,
            C::Bs => Self::Bs,
            C::Fr => Self::Fr,
            C::Ge => Self::Ge,
            C::Gl => Self::Gl,
            C::Gr => Self::Gr,
            C::Ju => Self::Ju,
            C::Lu => Self::Lu,
            C::Ne => Self::Ne,
            C::Nw => Self::Nw,
            C::Ow => Self::Ow,
            C::Sg => Self::Sg,
            C::Sh => Self::Sh,
            C::So => Self::So,
            C::Sz => Self::Sz,
            C::Tg => Self::Tg,
            C::Ti => Self::Ti,
            C::Ur => Self::Ur,
            C::Vd => Self::Vd,
            C::Vs => Self::Vs,
            C::Zg => Self::Zg,
            C::Zh => Self::Zh,
        }
    }
}

impl From<Canton> for domain::listing::Canton {
    fn from(canton: Canton) -> Self {
        match canton {
            Canton::Ag => Self::Ag,
            Canton::Ai => Self::Ai,
            Canton::Ar => Self::Ar,
            Canton::Be => Self::Be,
            Canton::Bl => Self::Bl,
            Canton::Bs => Self::Bs,
            Canton::Fr => Self::Fr,
            Canton::Ge => Self::Ge,
            Canton::Gl => Self::Gl,
            Canton::Gr => Self::Gr,
            Canton::Ju => Self::Ju,
            Canton::Lu => Self::Lu,
            Canton::Ne => Self::Ne,
            Canton::Nw => Self::Nw,
            Canton::Ow => Self::Ow,
            Canton::Sg => Self::Sg,
            Canton::Sh => Self::Sh,
            Canton::So => Self::So,
            Canton::Sz => Self::Sz,
            Canton::Tg => Self::Tg,
            Canton::Ti => Self::Ti,
            Canton::Ur => Self::Ur,
            Canton::Vd => Self::Vd,
            Canton::Vs => Self::Vs,
            Canton::Zg => Self::Zg,
            Canton::Zh => Self::Zh,
        }
    }
}
