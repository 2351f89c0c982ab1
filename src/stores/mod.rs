// Application state
// Each store wraps the API client and caches the last fetched result.
// Stores never call each other; the app context owns one of each.

pub mod articles;
pub mod assistant;
pub mod auth_store;
pub mod common;
pub mod wallet;

use std::cell::Cell;

pub use articles::ContentStore;
pub use assistant::AssistantStore;
pub use auth_store::SessionStore;
pub use common::ReferenceStore;
pub use wallet::WalletStore;

/// Outcome of a best-effort refresh.
///
/// Refreshes never fail from the caller's point of view: errors are logged
/// and the cached state is left as it was.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Refresh {
    /// Cached state replaced with the response
    Updated,
    /// Request failed, cached state untouched
    Kept,
    /// A newer request of the same kind was issued, response discarded
    Superseded,
}

impl Refresh {
    pub fn is_updated(&self) -> bool {
        matches!(self, Self::Updated)
    }
}

/// Counts in-flight requests for a store's loading flag.
/// Decrements on drop, so dropped futures do not leave the flag stuck.
pub(crate) struct LoadingGuard<'a>(&'a Cell<u32>);

impl<'a> LoadingGuard<'a> {
    pub(crate) fn new(counter: &'a Cell<u32>) -> Self {
        counter.set(counter.get() + 1);
        Self(counter)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get().saturating_sub(1));
    }
}

/// Starts a new request generation and returns its number
pub(crate) fn next_generation(counter: &Cell<u64>) -> u64 {
    let generation = counter.get().wrapping_add(1);
    counter.set(generation);
    generation
}
