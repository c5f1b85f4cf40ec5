//! Service contains the business logic of the application.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;

use std::time::Duration;

use smart_default::SmartDefault;

use crate::infra::ViewLog;
#[cfg(doc)]
use crate::{domain::Listing, infra::Store};

pub use self::{command::Command, query::Query};

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// Minimum interval between two counted views of the same [`Listing`]
    /// from this device.
    #[default(Duration::from_secs(60 * 60))]
    pub view_throttle: Duration,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Db> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Store`] of this [`Service`].
    store: Db,

    /// Device-local [`ViewLog`] of this [`Service`].
    view_log: ViewLog,
}

impl<Db> Service<Db> {
    /// Creates a new [`Service`] with the provided parameters.
    pub fn new(config: Config, store: Db) -> Self {
        Self {
            view_log: ViewLog::new(config.view_throttle),
            config,
            store,
        }
    }

    /// Returns [`Config`] of this [`Service`].
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Store`] of this [`Service`].
    #[must_use]
    pub fn store(&self) -> &Db {
        &self.store
    }

    /// Returns the device-local [`ViewLog`] of this [`Service`].
    pub(crate) fn view_log(&self) -> &ViewLog {
        &self.view_log
    }
}
