//! Conversation registry, message log and read-state behavior.

use common::Money;
use futures::StreamExt as _;
use rust_decimal::Decimal;
use service::{
    command::{
        contact_seller, send_message, ContactSeller, CreateListing,
        MarkConversationRead, MarkListingSold, SendMessage,
    },
    domain::{listing, user, Listing},
    infra::Memory,
    query, read, Command as _, Config, Query as _, Service,
};

fn service() -> Service<Memory> {
    Service::new(Config::default(), Memory::default())
}

async fn create_listing(
    svc: &Service<Memory>,
    seller_id: user::Id,
) -> Listing {
    svc.execute(CreateListing {
        seller_id,
        title: listing::Title::new("Shimano Stradic 3000").unwrap(),
        description: listing::Description::new(
            "Kaum gebraucht, inklusive Ersatzspule.",
        )
        .unwrap(),
        price: Money::chf(Decimal::from(50)),
        category: listing::Category::Reels,
        condition: listing::Condition::Used,
        canton: listing::Canton::Be,
        zip_code: listing::ZipCode::new("3000"),
        show_phone: false,
        images: Vec::new(),
    })
    .await
    .unwrap()
}

#[tokio::test]
async fn contacting_twice_resolves_to_the_same_conversation() {
    let svc = service();
    let seller_id = user::Id::new();
    let buyer_id = user::Id::new();
    let listing = create_listing(&svc, seller_id).await;

    let first = svc
        .execute(ContactSeller {
            listing_id: listing.id,
            buyer_id,
        })
        .await
        .unwrap();
    let second = svc
        .execute(ContactSeller {
            listing_id: listing.id,
            buyer_id,
        })
        .await
        .unwrap();

    assert_eq!(first.id, second.id);

    let of_buyer = svc
        .execute(query::conversations::ByParticipant::by(buyer_id))
        .await
        .unwrap();
    assert_eq!(of_buyer.len(), 1);
}

#[tokio::test]
async fn contacting_own_listing_is_rejected() {
    let svc = service();
    let seller_id = user::Id::new();
    let listing = create_listing(&svc, seller_id).await;

    let err = svc
        .execute(ContactSeller {
            listing_id: listing.id,
            buyer_id: seller_id,
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_ref(),
        contact_seller::ExecutionError::SelfContact(_),
    ));
}

#[tokio::test]
async fn contacting_about_a_sold_listing_is_rejected() {
    let svc = service();
    let seller_id = user::Id::new();
    let listing = create_listing(&svc, seller_id).await;

    _ = svc
        .execute(MarkListingSold {
            listing_id: listing.id,
            initiator_id: seller_id,
        })
        .await
        .unwrap();

    let err = svc
        .execute(ContactSeller {
            listing_id: listing.id,
            buyer_id: user::Id::new(),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_ref(),
        contact_seller::ExecutionError::ListingNotAvailable(_),
    ));
}

#[tokio::test]
async fn message_log_keeps_send_order() {
    let svc = service();
    let seller_id = user::Id::new();
    let buyer_id = user::Id::new();
    let listing = create_listing(&svc, seller_id).await;

    let conversation = svc
        .execute(ContactSeller {
            listing_id: listing.id,
            buyer_id,
        })
        .await
        .unwrap();

    for text in ["Hallo!", "Ist das noch verfügbar?", "Preis verhandelbar?"]
    {
        _ = svc
            .execute(SendMessage {
                conversation_id: conversation.id,
                sender_id: buyer_id,
                text: text.to_owned(),
            })
            .await
            .unwrap();
    }

    let log = svc
        .execute(query::messages::ByConversation::by(conversation.id))
        .await
        .unwrap();
    let texts: Vec<_> =
        log.iter().map(|m| AsRef::<str>::as_ref(&m.text).to_owned()).collect();

    assert_eq!(
        texts,
        ["Hallo!", "Ist das noch verfügbar?", "Preis verhandelbar?"],
    );

    let conversation = svc
        .execute(query::conversation::ById::by(conversation.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        AsRef::<str>::as_ref(&conversation.last_message.unwrap()),
        "Preis verhandelbar?",
    );
}

#[tokio::test]
async fn sender_never_sees_their_own_message_as_unread() {
    let svc = service();
    let seller_id = user::Id::new();
    let buyer_id = user::Id::new();
    let listing = create_listing(&svc, seller_id).await;

    let conversation = svc
        .execute(ContactSeller {
            listing_id: listing.id,
            buyer_id,
        })
        .await
        .unwrap();
    _ = svc
        .execute(SendMessage {
            conversation_id: conversation.id,
            sender_id: buyer_id,
            text: "Ist das noch verfügbar?".to_owned(),
        })
        .await
        .unwrap();

    let conversation = svc
        .execute(query::conversation::ById::by(conversation.id))
        .await
        .unwrap()
        .unwrap();

    assert!(conversation.is_unread_by(seller_id));
    assert!(!conversation.is_unread_by(buyer_id));
}

#[tokio::test]
async fn marking_read_clears_unread_until_the_next_message() {
    let svc = service();
    let seller_id = user::Id::new();
    let buyer_id = user::Id::new();
    let listing = create_listing(&svc, seller_id).await;

    let conversation = svc
        .execute(ContactSeller {
            listing_id: listing.id,
            buyer_id,
        })
        .await
        .unwrap();

    // Freshly created conversation has no messages, so nothing is unread.
    let count = svc
        .execute(query::conversations::UnreadCount { user_id: seller_id })
        .await
        .unwrap();
    assert_eq!(usize::from(count), 0);

    _ = svc
        .execute(SendMessage {
            conversation_id: conversation.id,
            sender_id: buyer_id,
            text: "Hallo!".to_owned(),
        })
        .await
        .unwrap();
    let count = svc
        .execute(query::conversations::UnreadCount { user_id: seller_id })
        .await
        .unwrap();
    assert_eq!(usize::from(count), 1);

    svc.execute(MarkConversationRead {
        conversation_id: conversation.id,
        user_id: seller_id,
    })
    .await
    .unwrap();
    let count = svc
        .execute(query::conversations::UnreadCount { user_id: seller_id })
        .await
        .unwrap();
    assert_eq!(usize::from(count), 0);

    _ = svc
        .execute(SendMessage {
            conversation_id: conversation.id,
            sender_id: buyer_id,
            text: "Noch da?".to_owned(),
        })
        .await
        .unwrap();
    let count = svc
        .execute(query::conversations::UnreadCount { user_id: seller_id })
        .await
        .unwrap();
    assert_eq!(usize::from(count), 1);
}

#[tokio::test]
async fn outsider_cannot_send_into_a_conversation() {
    let svc = service();
    let seller_id = user::Id::new();
    let buyer_id = user::Id::new();
    let listing = create_listing(&svc, seller_id).await;

    let conversation = svc
        .execute(ContactSeller {
            listing_id: listing.id,
            buyer_id,
        })
        .await
        .unwrap();

    let err = svc
        .execute(SendMessage {
            conversation_id: conversation.id,
            sender_id: user::Id::new(),
            text: "Hallo!".to_owned(),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_ref(),
        send_message::ExecutionError::NotParticipant(_),
    ));
}

#[tokio::test]
async fn whitespace_only_message_is_rejected() {
    let svc = service();
    let seller_id = user::Id::new();
    let buyer_id = user::Id::new();
    let listing = create_listing(&svc, seller_id).await;

    let conversation = svc
        .execute(ContactSeller {
            listing_id: listing.id,
            buyer_id,
        })
        .await
        .unwrap();

    let err = svc
        .execute(SendMessage {
            conversation_id: conversation.id,
            sender_id: buyer_id,
            text: "   \n\t".to_owned(),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_ref(),
        send_message::ExecutionError::InvalidText,
    ));
}

#[tokio::test]
async fn watching_conversations_pushes_updates() {
    let svc = service();
    let seller_id = user::Id::new();
    let buyer_id = user::Id::new();
    let listing = create_listing(&svc, seller_id).await;

    let mut stream = svc
        .execute(query::conversations::Watched::by(seller_id))
        .await
        .unwrap();

    let initial = stream.next().await.unwrap();
    assert!(initial.is_empty());

    let conversation = svc
        .execute(ContactSeller {
            listing_id: listing.id,
            buyer_id,
        })
        .await
        .unwrap();

    let updated = stream.next().await.unwrap();
    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0].id, conversation.id);
}

#[tokio::test]
async fn watching_the_message_log_pushes_sends() {
    let svc = service();
    let seller_id = user::Id::new();
    let buyer_id = user::Id::new();
    let listing = create_listing(&svc, seller_id).await;

    let conversation = svc
        .execute(ContactSeller {
            listing_id: listing.id,
            buyer_id,
        })
        .await
        .unwrap();

    let mut stream = svc
        .execute(query::messages::Watched::by(conversation.id))
        .await
        .unwrap();
    assert!(stream.next().await.unwrap().is_empty());

    _ = svc
        .execute(SendMessage {
            conversation_id: conversation.id,
            sender_id: buyer_id,
            text: "Hallo!".to_owned(),
        })
        .await
        .unwrap();

    let log = stream.next().await.unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(AsRef::<str>::as_ref(&log[0].text), "Hallo!");
}

#[tokio::test]
async fn buyer_contacts_seller_end_to_end() {
    let svc = service();
    let seller_id = user::Id::new();
    let buyer_id = user::Id::new();
    let listing = create_listing(&svc, seller_id).await;
    assert!(listing.is_active());

    let conversation = svc
        .execute(ContactSeller {
            listing_id: listing.id,
            buyer_id,
        })
        .await
        .unwrap();
    assert!(conversation.last_message.is_none());

    _ = svc
        .execute(SendMessage {
            conversation_id: conversation.id,
            sender_id: buyer_id,
            text: "Ist das noch verfügbar?".to_owned(),
        })
        .await
        .unwrap();

    let conversation = svc
        .execute(query::conversation::ById::by(conversation.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        AsRef::<str>::as_ref(conversation.last_message.as_ref().unwrap()),
        "Ist das noch verfügbar?",
    );
    assert!(conversation.is_unread_by(seller_id));
    assert!(!conversation.is_unread_by(buyer_id));

    svc.execute(MarkConversationRead {
        conversation_id: conversation.id,
        user_id: seller_id,
    })
    .await
    .unwrap();
    let conversation = svc
        .execute(query::conversation::ById::by(conversation.id))
        .await
        .unwrap()
        .unwrap();
    assert!(!conversation.is_unread_by(seller_id));

    let sold = svc
        .execute(MarkListingSold {
            listing_id: listing.id,
            initiator_id: seller_id,
        })
        .await
        .unwrap();
    assert_eq!(read::listing::IsAvailable(sold.is_active()), false);
}
