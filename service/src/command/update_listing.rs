//! [`Command`] for editing an existing [`Listing`].

use common::{
    operations::{By, Select, Update},
    DateTime, Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::listing::{
    Canton, Category, Condition, Description, Title, ZipCode,
};
use crate::{
    domain::{listing, user, Listing},
    infra::{store, Store},
    Service,
};

use super::Command;

/// [`Command`] for editing an existing [`Listing`].
///
/// Unset fields are left unchanged. Allowed to the seller of the [`Listing`]
/// and to administrators.
#[derive(Clone, Debug)]
pub struct UpdateListing {
    /// ID of the [`Listing`] to edit.
    pub listing_id: listing::Id,

    /// [`user::Actor`] editing the [`Listing`].
    pub initiator: user::Actor,

    /// New [`Title`] of the [`Listing`].
    pub title: Option<listing::Title>,

    /// New [`Description`] of the [`Listing`].
    pub description: Option<listing::Description>,

    /// New price of the [`Listing`].
    pub price: Option<Money>,

    /// New [`Category`] of the [`Listing`].
    pub category: Option<listing::Category>,

    /// New [`Condition`] of the offered item.
    pub condition: Option<listing::Condition>,

    /// New [`Canton`] the [`Listing`] is offered in.
    pub canton: Option<listing::Canton>,

    /// New [`ZipCode`] of the [`Listing`]'s location.
    pub zip_code: Option<listing::ZipCode>,

    /// New indicator whether the seller's phone number may be shown.
    pub show_phone: Option<bool>,

    /// New full set of [`ImageUrl`]s of the [`Listing`]'s photos.
    ///
    /// [`ImageUrl`]: listing::ImageUrl
    pub images: Option<Vec<listing::ImageUrl>>,
}

impl<Db> Command<UpdateListing> for Service<Db>
where
    Db: Store<
            Select<By<Option<Listing>, listing::Id>>,
            Ok = Option<Listing>,
            Err = Traced<store::Error>,
        > + Store<Update<Listing>, Err = Traced<store::Error>>,
{
    type Ok = Listing;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateListing,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateListing {
            listing_id,
            initiator,
            title,
            description,
            price,
            category,
            condition,
            canton,
            zip_code,
            show_phone,
            images,
        } = cmd;

        let mut listing = self
            .store()
            .execute(Select(By::<Option<Listing>, _>::new(listing_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ListingNotExists(listing_id))
            .map_err(tracerr::wrap!())?;

        if listing.seller_id != initiator.id && !initiator.is_admin() {
            return Err(tracerr::new!(E::NotAllowed(initiator.id)));
        }
        if listing.is_deleted() {
            return Err(tracerr::new!(E::ListingDeleted(listing_id)));
        }

        if let Some(title) = title {
            listing.title = title;
        }
        if let Some(description) = description {
            listing.description = description;
        }
        if let Some(price) = price {
            listing.price = price;
        }
        if let Some(category) = category {
            listing.category = category;
        }
        if let Some(condition) = condition {
            listing.condition = condition;
        }
        if let Some(canton) = canton {
            listing.canton = canton;
        }
        if let Some(zip_code) = zip_code {
            listing.zip_code = Some(zip_code);
        }
        if let Some(show_phone) = show_phone {
            listing.show_phone = show_phone;
        }
        if let Some(images) = images {
            listing.images = images;
        }
        _ = listing.updated_at.replace(DateTime::now().coerce());

        self.store()
            .execute(Update(listing.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(listing)
    }
}

/// Error of [`UpdateListing`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Listing`] is deleted and cannot be edited.
    #[display("`Listing(id: {_0})` is deleted")]
    ListingDeleted(#[error(not(source))] listing::Id),

    /// [`Listing`] with the provided ID does not exist.
    #[display("`Listing(id: {_0})` does not exist")]
    ListingNotExists(#[error(not(source))] listing::Id),

    /// Initiator is neither the seller nor an administrator.
    #[display("`User(id: {_0})` is not allowed to edit the listing")]
    NotAllowed(#[error(not(source))] user::Id),

    /// [`Store`] error.
    #[display("`Store` operation failed: {_0}")]
    #[from]
    Store(store::Error),
}
