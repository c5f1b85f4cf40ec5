//! [`Command`] for creating a new [`Listing`].

use common::{
    operations::Insert,
    DateTime, Money,
};
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

/// [`Command`] for creating a new [`Listing`].
#[derive(Clone, Debug)]
pub struct CreateListing {
    /// ID of the seller creating the [`Listing`].
    pub seller_id: user::Id,

    /// [`Title`] of the new [`Listing`].
    pub title: listing::Title,

    /// [`Description`] of the new [`Listing`].
    pub description: listing::Description,

    /// Price of the new [`Listing`].
    pub price: Money,

    /// [`Category`] of the new [`Listing`].
    pub category: listing::Category,

    /// [`Condition`] of the offered item.
    pub condition: listing::Condition,

    /// [`Canton`] the new [`Listing`] is offered in.
    pub canton: listing::Canton,

    /// [`ZipCode`] of the new [`Listing`]'s location.
    pub zip_code: Option<listing::ZipCode>,

    /// Indicator whether the seller's phone number may be shown.
    pub show_phone: bool,

    /// [`ImageUrl`]s of the photos attached to the new [`Listing`].
    ///
    /// [`ImageUrl`]: listing::ImageUrl
    pub images: Vec<listing::ImageUrl>,
}

impl<Db> Command<CreateListing> for Service<Db>
where
    Db: Store<Insert<Listing>, Err = Traced<store::Error>>,
{
    type Ok = Listing;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateListing,
    ) -> Result<Self::Ok, Self::Err> {
        let CreateListing {
            seller_id,
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

        let listing = Listing {
            id: listing::Id::new(),
            seller_id,
            title,
            description,
            price,
            category,
            condition,
            canton,
            zip_code,
            show_phone,
            images,
            status: listing::Status::default(),
            view_count: listing::ViewCount::default(),
            boost_score: listing::BoostScore::default(),
            is_featured: false,
            featured_until: None,
            created_at: DateTime::now().coerce(),
            updated_at: None,
            deleted_at: None,
            deleted_by: None,
        };

        self.store()
            .execute(Insert(listing.clone()))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        Ok(listing)
    }
}

/// Error of [`CreateListing`] [`Command`] execution.
pub type ExecutionError = store::Error;
