//! Subscription registry: maps caller operations onto the store.
//!
//! Every operation is a single store round trip (two for update and delete,
//! which look the record up first). Nothing is cached or retried; store
//! failures are classified and returned as-is.

use crate::config::RegistryConfig;
use crate::error::{RegistryError, Result};
use crate::selector::split_selector;
use crate::store::SubscriptionStore;
use crate::types::{Created, Subscription, SubscriptionId};
use crate::validator::{check_result_size, require_exists, validate_candidate};
use tracing::{error, info};

/// Log a failure on its way to the caller.
fn logged<T>(op: &'static str, result: Result<T>) -> Result<T> {
    if let Err(ref e) = result {
        error!(op, kind = ?e.kind(), "{}", e);
    }
    result
}

/// Decode a JSON payload into a subscription candidate.
pub fn decode_subscription(payload: &[u8]) -> Result<Subscription> {
    serde_json::from_slice(payload)
        .map_err(|e| RegistryError::Malformed(format!("Error decoding subscription: {}", e)))
}

/// Orchestrates subscription queries and mutations over a store.
pub struct SubscriptionRegistry<S> {
    store: S,
    config: RegistryConfig,
}

impl<S: SubscriptionStore> SubscriptionRegistry<S> {
    pub fn new(store: S, config: RegistryConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // --- Queries ---

    /// All subscriptions, in store order.
    ///
    /// Fails with `ResultTooLarge` rather than truncating when the store holds
    /// more than `read_max_limit` records.
    pub fn list_all(&self) -> Result<Vec<Subscription>> {
        logged("list_all", self.try_list_all())
    }

    pub fn get_by_id(&self, id: &SubscriptionId) -> Result<Subscription> {
        logged(
            "get_by_id",
            require_exists(self.store.subscription_by_id(id), id.as_str()),
        )
    }

    pub fn get_by_slug(&self, slug: &str) -> Result<Subscription> {
        logged(
            "get_by_slug",
            require_exists(self.store.subscription_by_slug(slug), slug),
        )
    }

    pub fn get_by_categories(&self, categories: &[String]) -> Result<Vec<Subscription>> {
        logged(
            "get_by_categories",
            self.store
                .subscriptions_by_categories(categories)
                .map_err(Into::into),
        )
    }

    pub fn get_by_labels(&self, labels: &[String]) -> Result<Vec<Subscription>> {
        logged(
            "get_by_labels",
            self.store.subscriptions_by_labels(labels).map_err(Into::into),
        )
    }

    /// Subscriptions matching both the category and the label dimension.
    pub fn get_by_categories_and_labels(
        &self,
        categories: &[String],
        labels: &[String],
    ) -> Result<Vec<Subscription>> {
        logged(
            "get_by_categories_and_labels",
            self.store
                .subscriptions_by_categories_and_labels(categories, labels)
                .map_err(Into::into),
        )
    }

    pub fn get_by_receiver(&self, receiver: &str) -> Result<Vec<Subscription>> {
        logged(
            "get_by_receiver",
            self.store
                .subscriptions_by_receiver(receiver)
                .map_err(Into::into),
        )
    }

    /// Like [`get_by_categories`](Self::get_by_categories), taking a
    /// comma-delimited selector.
    pub fn get_by_categories_selector(&self, selector: &str) -> Result<Vec<Subscription>> {
        self.get_by_categories(&split_selector(selector))
    }

    pub fn get_by_labels_selector(&self, selector: &str) -> Result<Vec<Subscription>> {
        self.get_by_labels(&split_selector(selector))
    }

    pub fn get_by_categories_and_labels_selector(
        &self,
        categories: &str,
        labels: &str,
    ) -> Result<Vec<Subscription>> {
        self.get_by_categories_and_labels(&split_selector(categories), &split_selector(labels))
    }

    // --- Mutations ---

    /// Create a subscription. The slug is caller-chosen and must be unused.
    pub fn create(&self, candidate: Subscription) -> Result<Created> {
        logged("create", self.try_create(candidate))
    }

    /// Create from a JSON payload; undecodable input is `Malformed`.
    pub fn create_json(&self, payload: &[u8]) -> Result<Created> {
        self.create(logged("create", decode_subscription(payload))?)
    }

    /// Replace the subscription stored under `candidate.slug`.
    ///
    /// This is a full replace, not a merge: fields absent from the candidate
    /// are cleared on the stored record. Fails with `NotFound` if no
    /// subscription has that slug.
    pub fn update(&self, candidate: Subscription) -> Result<()> {
        logged("update", self.try_update(candidate))
    }

    /// Update from a JSON payload; undecodable input is `Malformed`.
    pub fn update_json(&self, payload: &[u8]) -> Result<()> {
        self.update(logged("update", decode_subscription(payload))?)
    }

    /// Delete the subscription with `slug`. Fails with `NotFound` if absent.
    pub fn delete_by_slug(&self, slug: &str) -> Result<()> {
        logged("delete_by_slug", self.try_delete_by_slug(slug))
    }

    fn try_list_all(&self) -> Result<Vec<Subscription>> {
        let subscriptions = self.store.list_subscriptions()?;
        check_result_size(subscriptions.len(), self.config.read_max_limit)?;
        Ok(subscriptions)
    }

    fn try_create(&self, candidate: Subscription) -> Result<Created> {
        validate_candidate(&candidate)?;
        info!(slug = %candidate.slug, "creating subscription");

        let slug = candidate.slug.clone();
        let id = self.store.create_subscription(candidate)?;
        Ok(Created { id, slug })
    }

    fn try_update(&self, candidate: Subscription) -> Result<()> {
        validate_candidate(&candidate)?;

        // Existence check only; the stored fields are not merged in.
        require_exists(
            self.store.subscription_by_slug(&candidate.slug),
            &candidate.slug,
        )?;

        info!(slug = %candidate.slug, "updating subscription");
        self.store.replace_subscription(candidate)?;
        Ok(())
    }

    fn try_delete_by_slug(&self, slug: &str) -> Result<()> {
        require_exists(self.store.subscription_by_slug(slug), slug)?;

        info!(slug, "deleting subscription");
        self.store.delete_subscription_by_slug(slug)?;
        Ok(())
    }
}
