//! [`Command`] definition.

pub mod boost_listing;
pub mod contact_seller;
pub mod create_listing;
pub mod delete_listing;
pub mod mark_conversation_read;
pub mod mark_listing_sold;
pub mod reactivate_listing;
pub mod record_listing_view;
pub mod send_message;
pub mod toggle_favorite;
pub mod toggle_listing_feature;
pub mod update_listing;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    boost_listing::BoostListing, contact_seller::ContactSeller,
    create_listing::CreateListing, delete_listing::DeleteListing,
    mark_conversation_read::MarkConversationRead,
    mark_listing_sold::MarkListingSold,
    reactivate_listing::ReactivateListing,
    record_listing_view::RecordListingView, send_message::SendMessage,
    toggle_favorite::ToggleFavorite,
    toggle_listing_feature::ToggleListingFeature,
    update_listing::UpdateListing,
};
