//! [`Store`] operation implementations of a [`Memory`] store.
//!
//! [`Store`]: crate::infra::Store

mod conversation;
mod favorite;
mod listing;
mod message;
