//! Document [`Store`]-related implementations.

#[cfg(feature = "memory")]
pub mod memory;

use derive_more::{Display, Error as StdError, From};

#[cfg(feature = "memory")]
pub use self::memory::Memory;

/// Document store operation.
pub use common::Handler as Store;

/// [`Store`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "memory")]
    /// [`Memory`] store error.
    Memory(memory::Error),
}
