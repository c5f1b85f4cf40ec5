//! Domain definitions.

pub mod conversation;
pub mod favorite;
pub mod listing;
pub mod message;
pub mod user;

pub use self::{
    conversation::Conversation, favorite::Favorite, listing::Listing,
    message::Message,
};
