//! Abstract operations.

use std::marker::PhantomData;

/// Operation to insert a value.
#[derive(Clone, Copy, Debug)]
pub struct Insert<T>(pub T);

/// Operation to update a value.
#[derive(Clone, Copy, Debug)]
pub struct Update<T>(pub T);

/// Operation to select a value.
#[derive(Clone, Copy, Debug)]
pub struct Select<T>(pub T);

/// Operation to atomically increment a value by one.
///
/// The increment must be a read-modify-write under the store's own
/// synchronization, so concurrent [`Increment`]s never lose updates.
#[derive(Clone, Copy, Debug)]
pub struct Increment<T>(pub T);

/// Operation to atomically flip a boolean value, returning the new one.
#[derive(Clone, Copy, Debug)]
pub struct Toggle<T>(pub T);

/// Operation to subscribe to live updates of a value.
///
/// Resolves to a stream yielding a fresh snapshot on every relevant
/// change. Dropping the stream releases the subscription.
#[derive(Clone, Copy, Debug)]
pub struct Watch<T>(pub T);

/// Selector of `W` by `B`.
#[derive(Clone, Copy, Debug)]
pub struct By<W, B> {
    /// Type of the value to select.
    _what: PhantomData<W>,

    /// Value to select by.
    by: B,
}

impl<W, B> By<W, B> {
    /// Creates a new [`By`] with the given value.
    #[must_use]
    pub fn new(by: B) -> Self {
        Self {
            _what: PhantomData,
            by,
        }
    }

    /// Consumes this [`By`] and returns the inner value.
    #[must_use]
    pub fn into_inner(self) -> B {
        self.by
    }
}
