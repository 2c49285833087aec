//! In-memory subscription index shared by the bundled stores.

use crate::error::StoreError;
use crate::types::{Subscription, SubscriptionId, Timestamp};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

use super::StoreResult;

/// Length of a generated id in hex characters.
const ID_HEX_LEN: usize = 32;

/// Subscription records keyed by slug, with an id lookup and listing order.
///
/// Category and label lookups: a record matches a dimension when its set
/// contains any of the requested tokens. Combined lookups require a match in
/// both dimensions.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SubscriptionIndex {
    /// Records by slug.
    by_slug: HashMap<String, Subscription>,

    /// Id to slug mapping.
    id_to_slug: HashMap<SubscriptionId, String>,

    /// Slugs in creation order.
    order: Vec<String>,

    /// Counter mixed into generated ids.
    next_seq: u64,
}

impl SubscriptionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.by_slug.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_slug.is_empty()
    }

    /// All records in creation order.
    pub fn list(&self) -> Vec<Subscription> {
        self.filter(|_| true)
    }

    pub fn get_by_slug(&self, slug: &str) -> Option<&Subscription> {
        self.by_slug.get(slug)
    }

    pub fn get_by_id(&self, id: &SubscriptionId) -> Option<&Subscription> {
        self.id_to_slug
            .get(id)
            .and_then(|slug| self.by_slug.get(slug))
    }

    pub fn by_categories(&self, categories: &[String]) -> Vec<Subscription> {
        self.filter(|s| s.has_any_category(categories))
    }

    pub fn by_labels(&self, labels: &[String]) -> Vec<Subscription> {
        self.filter(|s| s.has_any_label(labels))
    }

    pub fn by_categories_and_labels(
        &self,
        categories: &[String],
        labels: &[String],
    ) -> Vec<Subscription> {
        self.filter(|s| s.has_any_category(categories) && s.has_any_label(labels))
    }

    pub fn by_receiver(&self, receiver: &str) -> Vec<Subscription> {
        self.filter(|s| s.receiver == receiver)
    }

    /// Insert a new record, assigning its id and timestamps.
    pub fn insert(&mut self, mut subscription: Subscription) -> StoreResult<SubscriptionId> {
        if self.by_slug.contains_key(&subscription.slug) {
            return Err(StoreError::DuplicateSlug(subscription.slug));
        }

        let now = Timestamp::now();
        let id = self.generate_id(&subscription.slug, now);

        subscription.id = Some(id.clone());
        subscription.created = now;
        subscription.modified = now;

        self.id_to_slug.insert(id.clone(), subscription.slug.clone());
        self.order.push(subscription.slug.clone());
        self.by_slug.insert(subscription.slug.clone(), subscription);

        Ok(id)
    }

    /// Replace the record under `subscription.slug` wholesale.
    ///
    /// Only the store-owned `id` and `created` carry over from the old record.
    pub fn replace(&mut self, mut subscription: Subscription) -> StoreResult<()> {
        let existing = self
            .by_slug
            .get_mut(&subscription.slug)
            .ok_or_else(|| StoreError::NotFound(subscription.slug.clone()))?;

        subscription.id = existing.id.clone();
        subscription.created = existing.created;
        subscription.modified = Timestamp::now();

        *existing = subscription;
        Ok(())
    }

    pub fn remove(&mut self, slug: &str) -> StoreResult<Subscription> {
        let removed = self
            .by_slug
            .remove(slug)
            .ok_or_else(|| StoreError::NotFound(slug.to_string()))?;

        if let Some(ref id) = removed.id {
            self.id_to_slug.remove(id);
        }
        self.order.retain(|s| s != slug);

        Ok(removed)
    }

    fn filter<F>(&self, predicate: F) -> Vec<Subscription>
    where
        F: Fn(&Subscription) -> bool,
    {
        self.order
            .iter()
            .filter_map(|slug| self.by_slug.get(slug))
            .filter(|s| predicate(s))
            .cloned()
            .collect()
    }

    fn generate_id(&mut self, slug: &str, now: Timestamp) -> SubscriptionId {
        loop {
            let seq = self.next_seq;
            self.next_seq += 1;

            let mut hasher = Sha256::new();
            hasher.update(slug.as_bytes());
            hasher.update(now.0.to_le_bytes());
            hasher.update(seq.to_le_bytes());
            let digest = hex::encode(hasher.finalize());

            let id = SubscriptionId(digest[..ID_HEX_LEN].to_string());
            if !self.id_to_slug.contains_key(&id) {
                return id;
            }
        }
    }
}
