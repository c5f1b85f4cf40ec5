//! GraphQL API definitions.

pub mod conversation;
pub mod listing;
pub mod message;
mod mutation;
mod query;
pub mod scalar;
mod subscription;
pub mod user;

use crate::define_error;

pub use self::{
    conversation::Conversation, listing::Listing, message::Message,
    mutation::Mutation, query::Query, subscription::Subscription,
};

/// GraphQL schema.
pub type Schema = juniper::RootNode<'static, Query, Mutation, Subscription>;

define_error! {
    enum PrivilegeError {
        #[code = "NOT_ADMIN"]
        #[status = FORBIDDEN]
        #[message = "Authenticated `User` must be an administrator"]
        Admin,
    }
}

define_error! {
    enum ParticipationError {
        #[code = "NOT_PARTICIPANT"]
        #[status = FORBIDDEN]
        #[message = "Authenticated `User` is not a participant of the \
                     `Conversation`"]
        NotParticipant,
    }
}
