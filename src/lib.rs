//! # Subscription Registry
//!
//! Registration and lookup of notification subscriptions: who receives
//! notifications, and for which categories and labels.
//!
//! ## Core Concepts
//!
//! - **Subscriptions**: records keyed by a caller-chosen unique slug, with a
//!   store-assigned id
//! - **Stores**: persistence behind the [`SubscriptionStore`] contract
//! - **Registry**: validates requests, delegates to the store and classifies
//!   every outcome into one of five [`ErrorKind`]s
//!
//! ## Example
//!
//! ```ignore
//! use subscription_registry::{MemoryStore, RegistryConfig, Subscription, SubscriptionRegistry};
//!
//! let registry = SubscriptionRegistry::new(MemoryStore::new(), RegistryConfig::default());
//!
//! let created = registry.create(
//!     Subscription::new("temp-alerts", "ops-team")
//!         .with_categories(["temp"])
//!         .with_labels(["critical"]),
//! )?;
//!
//! let matching = registry.get_by_categories_and_labels_selector("temp,power", "critical")?;
//! ```

pub mod config;
pub mod error;
pub mod registry;
pub mod selector;
pub mod store;
pub mod types;
pub mod validator;

// Re-exports
pub use config::{FileStoreConfig, RegistryConfig, DEFAULT_READ_MAX_LIMIT};
pub use error::{ErrorKind, RegistryError, Result, StoreError};
pub use registry::{decode_subscription, SubscriptionRegistry};
pub use selector::{split_selector, SELECTOR_SEPARATOR};
pub use store::{FileStore, MemoryStore, StoreResult, SubscriptionIndex, SubscriptionStore};
pub use types::*;
