//! Subscription store contract and bundled backends.
//!
//! The registry reaches persistence only through [`SubscriptionStore`]. Two
//! backends ship with the crate:
//! - [`MemoryStore`]: in-process, for tests and embedding
//! - [`FileStore`]: durable single-file snapshot with an exclusive lock
//!
//! Both share [`SubscriptionIndex`] for keyed and set-membership lookups.

/// Read-path `SubscriptionStore` methods for stores that keep an
/// `index: RwLock<SubscriptionIndex>` field.
macro_rules! index_reads {
    () => {
        fn list_subscriptions(&self) -> StoreResult<Vec<Subscription>> {
            Ok(self.index.read().list())
        }

        fn subscription_by_id(&self, id: &SubscriptionId) -> StoreResult<Subscription> {
            self.index
                .read()
                .get_by_id(id)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(id.to_string()))
        }

        fn subscription_by_slug(&self, slug: &str) -> StoreResult<Subscription> {
            self.index
                .read()
                .get_by_slug(slug)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(slug.to_string()))
        }

        fn subscriptions_by_categories(
            &self,
            categories: &[String],
        ) -> StoreResult<Vec<Subscription>> {
            Ok(self.index.read().by_categories(categories))
        }

        fn subscriptions_by_labels(&self, labels: &[String]) -> StoreResult<Vec<Subscription>> {
            Ok(self.index.read().by_labels(labels))
        }

        fn subscriptions_by_categories_and_labels(
            &self,
            categories: &[String],
            labels: &[String],
        ) -> StoreResult<Vec<Subscription>> {
            Ok(self.index.read().by_categories_and_labels(categories, labels))
        }

        fn subscriptions_by_receiver(&self, receiver: &str) -> StoreResult<Vec<Subscription>> {
            Ok(self.index.read().by_receiver(receiver))
        }
    };
}

mod file;
mod index;
mod memory;

pub use file::FileStore;
pub use index::SubscriptionIndex;
pub use memory::MemoryStore;

use crate::error::StoreError;
use crate::types::{Subscription, SubscriptionId};
use std::sync::Arc;

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Durable keyed storage for subscription records.
///
/// Implementations own slug uniqueness and the atomicity of each call.
/// Keyed lookups report absence as [`StoreError::NotFound`].
pub trait SubscriptionStore: Send + Sync {
    fn list_subscriptions(&self) -> StoreResult<Vec<Subscription>>;

    fn subscription_by_id(&self, id: &SubscriptionId) -> StoreResult<Subscription>;

    fn subscription_by_slug(&self, slug: &str) -> StoreResult<Subscription>;

    fn subscriptions_by_categories(&self, categories: &[String]) -> StoreResult<Vec<Subscription>>;

    fn subscriptions_by_labels(&self, labels: &[String]) -> StoreResult<Vec<Subscription>>;

    fn subscriptions_by_categories_and_labels(
        &self,
        categories: &[String],
        labels: &[String],
    ) -> StoreResult<Vec<Subscription>>;

    fn subscriptions_by_receiver(&self, receiver: &str) -> StoreResult<Vec<Subscription>>;

    /// Insert a new record. Fails with [`StoreError::DuplicateSlug`] if the
    /// slug is taken.
    fn create_subscription(&self, subscription: Subscription) -> StoreResult<SubscriptionId>;

    /// Replace the whole record stored under `subscription.slug`.
    fn replace_subscription(&self, subscription: Subscription) -> StoreResult<()>;

    fn delete_subscription_by_slug(&self, slug: &str) -> StoreResult<()>;
}

macro_rules! forward_store {
    ($ty:ty) => {
        impl<S: SubscriptionStore + ?Sized> SubscriptionStore for $ty {
            fn list_subscriptions(&self) -> StoreResult<Vec<Subscription>> {
                (**self).list_subscriptions()
            }

            fn subscription_by_id(&self, id: &SubscriptionId) -> StoreResult<Subscription> {
                (**self).subscription_by_id(id)
            }

            fn subscription_by_slug(&self, slug: &str) -> StoreResult<Subscription> {
                (**self).subscription_by_slug(slug)
            }

            fn subscriptions_by_categories(
                &self,
                categories: &[String],
            ) -> StoreResult<Vec<Subscription>> {
                (**self).subscriptions_by_categories(categories)
            }

            fn subscriptions_by_labels(&self, labels: &[String]) -> StoreResult<Vec<Subscription>> {
                (**self).subscriptions_by_labels(labels)
            }

            fn subscriptions_by_categories_and_labels(
                &self,
                categories: &[String],
                labels: &[String],
            ) -> StoreResult<Vec<Subscription>> {
                (**self).subscriptions_by_categories_and_labels(categories, labels)
            }

            fn subscriptions_by_receiver(&self, receiver: &str) -> StoreResult<Vec<Subscription>> {
                (**self).subscriptions_by_receiver(receiver)
            }

            fn create_subscription(&self, subscription: Subscription) -> StoreResult<SubscriptionId> {
                (**self).create_subscription(subscription)
            }

            fn replace_subscription(&self, subscription: Subscription) -> StoreResult<()> {
                (**self).replace_subscription(subscription)
            }

            fn delete_subscription_by_slug(&self, slug: &str) -> StoreResult<()> {
                (**self).delete_subscription_by_slug(slug)
            }
        }
    };
}

forward_store!(Arc<S>);
forward_store!(&S);
forward_store!(Box<S>);
