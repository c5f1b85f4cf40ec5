//! Device-local [`ViewLog`] implementation.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use common::DateTime;

use crate::domain::listing;
#[cfg(doc)]
use crate::domain::Listing;

/// Device-local log of the last counted [`Listing`] views.
///
/// The throttle it backs is advisory and per-device, not per-account. It is
/// not a strong anti-fraud mechanism.
#[derive(Clone, Debug)]
pub struct ViewLog {
    /// Minimum interval between two counted views of the same [`Listing`].
    window: Duration,

    /// [`DateTime`] of the last counted view, per [`Listing`].
    seen: Arc<Mutex<HashMap<listing::Id, DateTime>>>,
}

impl ViewLog {
    /// Creates a new empty [`ViewLog`] with the provided throttle `window`.
    pub(crate) fn new(window: Duration) -> Self {
        Self {
            window,
            seen: Arc::default(),
        }
    }

    /// Checks whether a view of the provided [`Listing`] may be counted at
    /// the `now` moment, stamping this [`ViewLog`] if so.
    pub(crate) fn passes(&self, id: listing::Id, now: DateTime) -> bool {
        let mut seen =
            self.seen.lock().unwrap_or_else(PoisonError::into_inner);
        match seen.get(&id) {
            Some(last) if now - *last < self.window => false,
            Some(_) | None => {
                _ = seen.insert(id, now);
                true
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::DateTime;

    use crate::domain::listing;

    use super::ViewLog;

    #[test]
    fn passes_once_per_window() {
        let log = ViewLog::new(Duration::from_secs(60 * 60));
        let id = listing::Id::new();
        let start = DateTime::from_unix_timestamp(1_000_000).unwrap();

        assert!(log.passes(id, start));
        assert!(!log.passes(id, start + Duration::from_secs(10)));
        assert!(!log.passes(id, start + Duration::from_secs(3_599)));
        assert!(log.passes(id, start + Duration::from_secs(3_600)));
    }

    #[test]
    fn listings_are_throttled_independently() {
        let log = ViewLog::new(Duration::from_secs(60 * 60));
        let now = DateTime::from_unix_timestamp(1_000_000).unwrap();

        assert!(log.passes(listing::Id::new(), now));
        assert!(log.passes(listing::Id::new(), now));
    }
}
