//! Read models of the domain.

pub mod conversation;
pub mod favorite;
pub mod listing;
