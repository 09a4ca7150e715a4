//! Active location plumbing.
//!
//! [`LocationCell`] plays the part of the address bar: a single observable
//! value that the input writes and the viewer reads. [`LocationInput`] holds
//! the text the user is typing until it is submitted.

use tokio::sync::watch;
use tracing::debug;

use crate::model::LocationQuery;

#[derive(Debug)]
pub struct LocationCell {
    tx: watch::Sender<LocationQuery>,
}

impl Default for LocationCell {
    fn default() -> Self {
        Self::new(LocationQuery::default())
    }
}

impl LocationCell {
    pub fn new(initial: LocationQuery) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Replace the active location.
    ///
    /// Subscribers are notified even when the value did not change, so
    /// searching the same place again starts a fresh fetch.
    pub fn navigate(&self, query: LocationQuery) {
        debug!(%query, "navigate");
        self.tx.send_replace(query);
    }

    pub fn current(&self) -> LocationQuery {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<LocationQuery> {
        self.tx.subscribe()
    }
}

/// Uncommitted search text.
#[derive(Debug, Clone, Default)]
pub struct LocationInput {
    text: String,
}

impl LocationInput {
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Publish the current text as the active location.
    ///
    /// Empty text is a no-op. Returns whether anything was published.
    pub fn submit(&self, cell: &LocationCell) -> bool {
        if self.text.is_empty() {
            return false;
        }

        cell.navigate(LocationQuery::new(self.text.clone()));
        true
    }
}
