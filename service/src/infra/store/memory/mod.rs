//! In-memory document [`Store`] implementation.

mod impls;

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use derive_more::{Display, Error as StdError};
use futures::{
    stream::{self, BoxStream},
    StreamExt as _,
};
use tokio::sync::broadcast;
use tracerr::Traced;

use crate::{
    domain::{
        conversation, favorite, listing, message, Conversation, Favorite,
        Listing, Message,
    },
    infra::store,
};
#[cfg(doc)]
use crate::infra::Store;

/// Capacity of the [`Memory`] store's change feed.
///
/// A watcher falling this far behind re-snapshots instead of replaying.
const CHANGES_CAPACITY: usize = 64;

/// In-memory document [`Store`] with realtime change feeds.
///
/// All the operations synchronize on a single lock, so every individual
/// operation is atomic with respect to the others.
#[derive(Clone, Debug, Default)]
pub struct Memory(Arc<State>);

/// Inner state of a [`Memory`] store.
#[derive(Debug)]
struct State {
    /// Document [`Collections`] of the [`Memory`] store.
    collections: Mutex<Collections>,

    /// Feed of completed writes, notifying active watchers.
    changes: broadcast::Sender<Change>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            collections: Mutex::default(),
            changes: broadcast::channel(CHANGES_CAPACITY).0,
        }
    }
}

/// Document collections of a [`Memory`] store.
#[derive(Debug, Default)]
struct Collections {
    /// All the [`Conversation`]s, keyed by their ID.
    conversations: HashMap<conversation::Id, Conversation>,

    /// All the [`Favorite`]s, keyed by their ID.
    favorites: HashMap<favorite::Id, Favorite>,

    /// All the [`Listing`]s, keyed by their ID.
    listings: HashMap<listing::Id, Listing>,

    /// All the [`Message`]s, keyed by their ID.
    messages: HashMap<message::Id, Message>,
}

/// Collection affected by a completed write in a [`Memory`] store.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Change {
    /// [`Conversation`]s collection changed.
    Conversations,

    /// [`Favorite`]s collection changed.
    Favorites,

    /// [`Listing`]s collection changed.
    Listings,

    /// [`Message`]s collection changed.
    Messages,
}

impl Memory {
    /// Runs the provided function over the [`Collections`] of this
    /// [`Memory`] store, under its lock.
    fn with_collections<R>(
        &self,
        f: impl FnOnce(&mut Collections) -> R,
    ) -> Result<R, Traced<store::Error>> {
        let mut guard = self
            .0
            .collections
            .lock()
            .map_err(|_| tracerr::new!(store::Error::from(Error::Poisoned)))?;
        Ok(f(&mut guard))
    }

    /// Notifies active watchers about a completed write.
    fn notify(&self, change: Change) {
        // No active watchers is fine.
        _ = self.0.changes.send(change);
    }

    /// Builds a stream of `snapshot`s, yielding the current one immediately
    /// and then a fresh one after every write to the watched collection.
    ///
    /// Dropping the stream releases the subscription.
    fn watch<W>(
        &self,
        change: Change,
        snapshot: impl Fn(&Collections) -> W + Send + Sync + 'static,
    ) -> Result<BoxStream<'static, W>, Traced<store::Error>>
    where
        W: Send + 'static,
    {
        let initial = self.with_collections(|c| snapshot(c))?;
        let state = Arc::clone(&self.0);
        let rx = self.0.changes.subscribe();

        Ok(stream::unfold(
            (state, rx, snapshot, Some(initial)),
            move |(state, mut rx, snapshot, pending)| async move {
                if let Some(item) = pending {
                    return Some((item, (state, rx, snapshot, None)));
                }
                loop {
                    match rx.recv().await {
                        Ok(c) if c == change => {}
                        Ok(_) => continue,
                        Err(broadcast::error::RecvError::Lagged(missed)) => {
                            tracing::warn!(
                                missed,
                                "change feed lagged, re-snapshotting",
                            );
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            return None;
                        }
                    }
                    let item = {
                        let Ok(guard) = state.collections.lock() else {
                            return None;
                        };
                        snapshot(&guard)
                    };
                    return Some((item, (state, rx, snapshot, None)));
                }
            },
        )
        .boxed())
    }
}

/// [`Memory`] store error.
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {
    /// Shared state lock is poisoned.
    #[display("shared state lock is poisoned")]
    Poisoned,
}
