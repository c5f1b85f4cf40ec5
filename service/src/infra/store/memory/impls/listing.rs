//! [`Listing`]-related [`Store`] implementations.

use common::operations::{By, Increment, Insert, Select, Toggle, Update, Watch};
use futures::stream::BoxStream;
use tracerr::Traced;

use crate::{
    domain::{listing, Listing},
    infra::store::{
        self,
        memory::{Change, Collections},
        Memory, Store,
    },
    read,
};

impl Store<Insert<Listing>> for Memory {
    type Ok = ();
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Insert(listing): Insert<Listing>,
    ) -> Result<Self::Ok, Self::Err> {
        self.with_collections(|c| {
            _ = c.listings.insert(listing.id, listing);
        })?;
        self.notify(Change::Listings);
        Ok(())
    }
}

impl Store<Update<Listing>> for Memory {
    type Ok = ();
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Update(listing): Update<Listing>,
    ) -> Result<Self::Ok, Self::Err> {
        self.with_collections(|c| {
            _ = c.listings.insert(listing.id, listing);
        })?;
        self.notify(Change::Listings);
        Ok(())
    }
}

impl Store<Select<By<Option<Listing>, listing::Id>>> for Memory {
    type Ok = Option<Listing>;
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Listing>, listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.with_collections(|c| c.listings.get(&id).cloned())
    }
}

impl Store<Select<By<Vec<Listing>, read::listing::list::Filter>>> for Memory {
    type Ok = Vec<Listing>;
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Listing>, read::listing::list::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();
        self.with_collections(|c| list(c, &filter))
    }
}

impl Store<Watch<By<Option<Listing>, listing::Id>>> for Memory {
    type Ok = BoxStream<'static, Option<Listing>>;
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Watch(by): Watch<By<Option<Listing>, listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.watch(Change::Listings, move |c| c.listings.get(&id).cloned())
    }
}

impl Store<Increment<By<listing::ViewCount, listing::Id>>> for Memory {
    type Ok = Option<listing::ViewCount>;
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Increment(by): Increment<By<listing::ViewCount, listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let count = self.with_collections(|c| {
            c.listings.get_mut(&id).map(|listing| {
                listing.view_count = listing.view_count.incremented();
                listing.view_count
            })
        })?;
        if count.is_some() {
            self.notify(Change::Listings);
        }
        Ok(count)
    }
}

impl Store<Increment<By<listing::BoostScore, listing::Id>>> for Memory {
    type Ok = Option<listing::BoostScore>;
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Increment(by): Increment<By<listing::BoostScore, listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let score = self.with_collections(|c| {
            c.listings.get_mut(&id).map(|listing| {
                listing.boost_score = listing.boost_score.incremented();
                listing.boost_score
            })
        })?;
        if score.is_some() {
            self.notify(Change::Listings);
        }
        Ok(score)
    }
}

impl Store<Toggle<By<Listing, listing::Id>>> for Memory {
    type Ok = Option<read::listing::IsFeatured>;
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Toggle(by): Toggle<By<Listing, listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let flag = self.with_collections(|c| {
            c.listings.get_mut(&id).map(|listing| {
                listing.is_featured = !listing.is_featured;
                read::listing::IsFeatured(listing.is_featured)
            })
        })?;
        if flag.is_some() {
            self.notify(Change::Listings);
        }
        Ok(flag)
    }
}

/// Returns all the [`Listing`]s matching the provided `filter` in the
/// default order: [`listing::BoostScore`] descending, then creation time
/// descending.
fn list(
    c: &Collections,
    filter: &read::listing::list::Filter,
) -> Vec<Listing> {
    let mut listings: Vec<_> = c
        .listings
        .values()
        .filter(|l| matches(l, filter))
        .cloned()
        .collect();
    listings.sort_unstable_by(|a, b| {
        b.boost_score
            .cmp(&a.boost_score)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    listings
}

/// Checks whether the provided [`Listing`] matches the provided `filter`.
fn matches(l: &Listing, filter: &read::listing::list::Filter) -> bool {
    filter.seller_id.map_or(true, |id| l.seller_id == id)
        && filter.status.map_or(true, |s| l.status == s)
        && filter.category.map_or(true, |c| l.category == c)
        && filter.canton.map_or(true, |c| l.canton == c)
        && filter.search.as_ref().map_or(true, |phrase| {
            let phrase = phrase.to_lowercase();
            AsRef::<str>::as_ref(&l.title).to_lowercase().contains(&phrase)
                || AsRef::<str>::as_ref(&l.description)
                    .to_lowercase()
                    .contains(&phrase)
        })
}
