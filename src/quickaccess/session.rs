//! Scoped ownership of a provider's subscriptions.

use tracing::debug;

use crate::events::Subscription;

/// The subscriptions a provider holds while it drives a picker.
///
/// All of them are released together when the session is closed or dropped,
/// whichever way the picker session ended.
#[derive(Debug)]
pub struct Session {
    /// Prefix of the provider that owns this session, for diagnostics.
    prefix: String,
    subscriptions: Vec<Subscription>,
}

impl Session {
    /// Start an empty session for the provider with `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            subscriptions: Vec::new(),
        }
    }

    /// Take ownership of a subscription.
    pub fn add(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    /// Prefix of the owning provider.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Number of held subscriptions.
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// Whether the session holds nothing.
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// End the session now, releasing every subscription.
    pub fn close(self) {}
}

impl Drop for Session {
    fn drop(&mut self) {
        debug!(
            prefix = %self.prefix,
            released = self.subscriptions.len(),
            "Quick access session closed"
        );
        // Release in reverse acquisition order
        while let Some(subscription) = self.subscriptions.pop() {
            subscription.unsubscribe();
        }
    }
}
