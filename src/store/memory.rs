//! In-process subscription store.

use crate::error::StoreError;
use crate::types::{Subscription, SubscriptionId};
use parking_lot::RwLock;
use tracing::debug;

use super::{StoreResult, SubscriptionIndex, SubscriptionStore};

/// Subscription store held entirely in memory.
#[derive(Default)]
pub struct MemoryStore {
    index: RwLock<SubscriptionIndex>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored subscriptions.
    pub fn len(&self) -> usize {
        self.index.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.read().is_empty()
    }
}

impl SubscriptionStore for MemoryStore {
    index_reads!();

    fn create_subscription(&self, subscription: Subscription) -> StoreResult<SubscriptionId> {
        let id = self.index.write().insert(subscription)?;
        debug!(%id, "stored subscription");
        Ok(id)
    }

    fn replace_subscription(&self, subscription: Subscription) -> StoreResult<()> {
        let slug = subscription.slug.clone();
        self.index.write().replace(subscription)?;
        debug!(slug, "replaced subscription");
        Ok(())
    }

    fn delete_subscription_by_slug(&self, slug: &str) -> StoreResult<()> {
        self.index.write().remove(slug)?;
        debug!(slug, "removed subscription");
        Ok(())
    }
}
