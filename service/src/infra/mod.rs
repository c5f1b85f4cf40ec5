//! Infrastructure layer.

pub mod store;
pub mod view_log;

pub use self::store::Store;
#[cfg(feature = "memory")]
pub use self::store::{memory, Memory};
pub use self::view_log::ViewLog;
