//! Listing lifecycle, moderation, favorites and view counting behavior.

use std::time::Duration;

use common::Money;
use futures::future;
use rust_decimal::Decimal;
use service::{
    command::{
        boost_listing, delete_listing, mark_listing_sold, reactivate_listing,
        record_listing_view, BoostListing, CreateListing, DeleteListing,
        MarkListingSold, ReactivateListing, RecordListingView, ToggleFavorite,
        ToggleListingFeature, UpdateListing,
    },
    domain::{listing, user, Listing},
    infra::Memory,
    query, read, Command as _, Config, Query as _, Service,
};

fn service() -> Service<Memory> {
    Service::new(Config::default(), Memory::default())
}

fn admin() -> user::Actor {
    user::Actor {
        id: user::Id::new(),
        role: user::Role::Admin,
    }
}

fn member(id: user::Id) -> user::Actor {
    user::Actor {
        id,
        role: user::Role::Member,
    }
}

async fn create_listing(
    svc: &Service<Memory>,
    seller_id: user::Id,
    title: &str,
) -> Listing {
    svc.execute(CreateListing {
        seller_id,
        title: listing::Title::new(title).unwrap(),
        description: listing::Description::new("Guter Zustand.").unwrap(),
        price: Money::chf(Decimal::from(50)),
        category: listing::Category::Rods,
        condition: listing::Condition::Used,
        canton: listing::Canton::Zh,
        zip_code: listing::ZipCode::new("8001"),
        show_phone: true,
        images: vec![
            listing::ImageUrl::new("https://img.example.com/rod.jpg").unwrap(),
        ],
    })
    .await
    .unwrap()
}

#[tokio::test]
async fn sold_listing_reactivates() {
    let svc = service();
    let seller_id = user::Id::new();
    let listing = create_listing(&svc, seller_id, "Daiwa Ninja X").await;

    let sold = svc
        .execute(MarkListingSold {
            listing_id: listing.id,
            initiator_id: seller_id,
        })
        .await
        .unwrap();
    assert_eq!(sold.status, listing::Status::Sold);

    let active = svc
        .execute(ReactivateListing {
            listing_id: listing.id,
            initiator_id: seller_id,
        })
        .await
        .unwrap();
    assert_eq!(active.status, listing::Status::Active);
}

#[tokio::test]
async fn deletion_is_terminal() {
    let svc = service();
    let seller_id = user::Id::new();
    let listing = create_listing(&svc, seller_id, "Okuma Ceymar").await;

    let deleted = svc
        .execute(DeleteListing {
            listing_id: listing.id,
            initiator: member(seller_id),
        })
        .await
        .unwrap();
    assert_eq!(deleted.status, listing::Status::Deleted);
    assert_eq!(deleted.deleted_by, Some(listing::DeletedBy::Seller));
    assert!(deleted.deleted_at.is_some());

    let err = svc
        .execute(DeleteListing {
            listing_id: listing.id,
            initiator: member(seller_id),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_ref(),
        delete_listing::ExecutionError::AlreadyDeleted(_),
    ));

    let err = svc
        .execute(MarkListingSold {
            listing_id: listing.id,
            initiator_id: seller_id,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_ref(),
        mark_listing_sold::ExecutionError::CannotSell(_),
    ));

    let err = svc
        .execute(ReactivateListing {
            listing_id: listing.id,
            initiator_id: seller_id,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_ref(),
        reactivate_listing::ExecutionError::CannotReactivate(_),
    ));
}

#[tokio::test]
async fn only_the_seller_changes_status() {
    let svc = service();
    let seller_id = user::Id::new();
    let listing = create_listing(&svc, seller_id, "Abu Garcia Ambassadeur")
        .await;

    let err = svc
        .execute(MarkListingSold {
            listing_id: listing.id,
            initiator_id: user::Id::new(),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_ref(),
        mark_listing_sold::ExecutionError::NotSeller(_),
    ));
}

#[tokio::test]
async fn admin_deletes_a_foreign_listing() {
    let svc = service();
    let seller_id = user::Id::new();
    let listing = create_listing(&svc, seller_id, "Sportex Kescher").await;

    let err = svc
        .execute(DeleteListing {
            listing_id: listing.id,
            initiator: member(user::Id::new()),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_ref(),
        delete_listing::ExecutionError::NotAllowed(_),
    ));

    let deleted = svc
        .execute(DeleteListing {
            listing_id: listing.id,
            initiator: admin(),
        })
        .await
        .unwrap();
    assert_eq!(deleted.deleted_by, Some(listing::DeletedBy::Admin));
}

#[tokio::test]
async fn deleted_listing_is_hidden_from_strangers_only() {
    let svc = service();
    let seller_id = user::Id::new();
    let listing = create_listing(&svc, seller_id, "Balzer Feederrute").await;

    _ = svc
        .execute(DeleteListing {
            listing_id: listing.id,
            initiator: member(seller_id),
        })
        .await
        .unwrap();

    let as_stranger = svc
        .execute(query::listings::List {
            filter: read::listing::list::Filter::default(),
            viewer: Some(member(user::Id::new())),
        })
        .await
        .unwrap();
    assert!(as_stranger.is_empty());

    let anonymously = svc
        .execute(query::listings::List::default())
        .await
        .unwrap();
    assert!(anonymously.is_empty());

    let as_seller = svc
        .execute(query::listings::List {
            filter: read::listing::list::Filter::default(),
            viewer: Some(member(seller_id)),
        })
        .await
        .unwrap();
    assert_eq!(as_seller.len(), 1);

    let as_admin = svc
        .execute(query::listings::List {
            filter: read::listing::list::Filter::default(),
            viewer: Some(admin()),
        })
        .await
        .unwrap();
    assert_eq!(as_admin.len(), 1);
}

#[tokio::test]
async fn editing_updates_only_the_provided_fields() {
    let svc = service();
    let seller_id = user::Id::new();
    let listing = create_listing(&svc, seller_id, "Penn Slammer").await;
    assert!(listing.updated_at.is_none());

    let updated = svc
        .execute(UpdateListing {
            listing_id: listing.id,
            initiator: member(seller_id),
            title: None,
            description: None,
            price: Some(Money::chf(Decimal::from(35))),
            category: None,
            condition: None,
            canton: None,
            zip_code: None,
            show_phone: None,
            images: None,
        })
        .await
        .unwrap();

    assert_eq!(AsRef::<str>::as_ref(&updated.title), "Penn Slammer");
    assert_eq!(updated.price, Money::chf(Decimal::from(35)));
    assert!(updated.updated_at.is_some());
}

#[tokio::test]
async fn concurrent_boosts_lose_no_updates() {
    let svc = service();
    let seller_id = user::Id::new();
    let listing = create_listing(&svc, seller_id, "Rapala Wobbler Set").await;
    let moderator = admin();

    let boosts = (0..10).map(|_| {
        let svc = svc.clone();
        async move {
            svc.execute(BoostListing {
                listing_id: listing.id,
                initiator: moderator,
            })
            .await
        }
    });
    for result in future::join_all(boosts).await {
        result.unwrap();
    }

    let boosted = svc
        .execute(query::listing::ById::by(listing.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(boosted.boost_score, listing::BoostScore::from(10));
}

#[tokio::test]
async fn boosting_requires_an_administrator() {
    let svc = service();
    let seller_id = user::Id::new();
    let listing = create_listing(&svc, seller_id, "Spro Trout Master").await;

    let err = svc
        .execute(BoostListing {
            listing_id: listing.id,
            initiator: member(seller_id),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_ref(),
        boost_listing::ExecutionError::NotAdmin(_),
    ));
}

#[tokio::test]
async fn feature_toggle_is_its_own_inverse() {
    let svc = service();
    let seller_id = user::Id::new();
    let listing = create_listing(&svc, seller_id, "Westin Jigkopf Box").await;
    let moderator = admin();

    let featured = svc
        .execute(ToggleListingFeature {
            listing_id: listing.id,
            initiator: moderator,
        })
        .await
        .unwrap();
    assert_eq!(featured, true);

    let unfeatured = svc
        .execute(ToggleListingFeature {
            listing_id: listing.id,
            initiator: moderator,
        })
        .await
        .unwrap();
    assert_eq!(unfeatured, false);
}

#[tokio::test]
async fn default_order_puts_boosted_listings_first() {
    let svc = service();
    let seller_id = user::Id::new();
    let older = create_listing(&svc, seller_id, "Alte Teleskoprute").await;
    let newer = create_listing(&svc, seller_id, "Neue Spinnrute").await;

    _ = svc
        .execute(BoostListing {
            listing_id: older.id,
            initiator: admin(),
        })
        .await
        .unwrap();

    let listed = svc
        .execute(query::listings::List::default())
        .await
        .unwrap();
    let ids: Vec<_> = listed.iter().map(|l| l.id).collect();

    assert_eq!(ids, [older.id, newer.id]);
}

#[tokio::test]
async fn search_filters_titles_and_descriptions() {
    let svc = service();
    let seller_id = user::Id::new();
    _ = create_listing(&svc, seller_id, "Shimano Stradic").await;
    let rod = create_listing(&svc, seller_id, "Steckrute 2.70m").await;

    let found = svc
        .execute(query::listings::List {
            filter: read::listing::list::Filter {
                search: Some("steckrute".to_owned()),
                ..read::listing::list::Filter::default()
            },
            viewer: None,
        })
        .await
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, rod.id);
}

#[tokio::test]
async fn favorite_toggles_back_and_forth() {
    let svc = service();
    let seller_id = user::Id::new();
    let user_id = user::Id::new();
    let listing = create_listing(&svc, seller_id, "Köderbox").await;

    let bookmarked = svc
        .execute(ToggleFavorite {
            user_id,
            listing_id: listing.id,
        })
        .await
        .unwrap();
    assert_eq!(bookmarked, true);
    assert_eq!(
        svc.execute(query::favorites::ByUser::by(user_id))
            .await
            .unwrap()
            .len(),
        1,
    );

    let removed = svc
        .execute(ToggleFavorite {
            user_id,
            listing_id: listing.id,
        })
        .await
        .unwrap();
    assert_eq!(removed, false);
    assert!(svc
        .execute(query::favorites::ByUser::by(user_id))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn views_are_throttled_per_window() {
    let svc = Service::new(
        Config {
            view_throttle: Duration::from_millis(50),
        },
        Memory::default(),
    );
    let seller_id = user::Id::new();
    let viewer_id = user::Id::new();
    let listing = create_listing(&svc, seller_id, "Futterkorb Set").await;

    let first = svc
        .execute(RecordListingView {
            listing_id: listing.id,
            viewer_id: Some(viewer_id),
        })
        .await
        .unwrap();
    assert_eq!(
        first,
        record_listing_view::Outcome::Counted(listing::ViewCount::from(1)),
    );

    let repeat = svc
        .execute(RecordListingView {
            listing_id: listing.id,
            viewer_id: Some(viewer_id),
        })
        .await
        .unwrap();
    assert_eq!(repeat, record_listing_view::Outcome::Throttled);

    tokio::time::sleep(Duration::from_millis(60)).await;

    let after_window = svc
        .execute(RecordListingView {
            listing_id: listing.id,
            viewer_id: Some(viewer_id),
        })
        .await
        .unwrap();
    assert_eq!(
        after_window,
        record_listing_view::Outcome::Counted(listing::ViewCount::from(2)),
    );
}

#[tokio::test]
async fn sellers_own_views_are_never_counted() {
    let svc = service();
    let seller_id = user::Id::new();
    let listing = create_listing(&svc, seller_id, "Eigenbau Blinker").await;

    let outcome = svc
        .execute(RecordListingView {
            listing_id: listing.id,
            viewer_id: Some(seller_id),
        })
        .await
        .unwrap();
    assert_eq!(outcome, record_listing_view::Outcome::Throttled);

    let unchanged = svc
        .execute(query::listing::ById::by(listing.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.view_count, listing::ViewCount::default());
}
