//! Durability tests for the file-backed store.

use subscription_registry::{
    Channel, ErrorKind, FileStore, FileStoreConfig, RegistryConfig, Subscription,
    SubscriptionRegistry,
};
use tempfile::TempDir;

fn test_config(dir: &TempDir) -> FileStoreConfig {
    FileStoreConfig {
        path: dir.path().join("subscriptions"),
        create_if_missing: true,
    }
}

fn open_registry(dir: &TempDir) -> SubscriptionRegistry<FileStore> {
    let store = FileStore::open_or_create(test_config(dir)).unwrap();
    SubscriptionRegistry::new(store, RegistryConfig::default())
}

#[test]
fn test_records_survive_reopen() {
    let dir = TempDir::new().unwrap();

    let created = {
        let registry = open_registry(&dir);
        registry
            .create(
                Subscription::new("temp-alerts", "ops")
                    .with_categories(["temp"])
                    .with_labels(["critical"])
                    .with_channel(Channel::email(vec!["ops@example.com".into()])),
            )
            .unwrap()
    };

    let registry = open_registry(&dir);
    let fetched = registry.get_by_id(&created.id).unwrap();
    assert_eq!(fetched.slug, "temp-alerts");
    assert_eq!(fetched.subscribed_categories, vec!["temp"]);
    assert_eq!(fetched.channels[0].mail_addresses, vec!["ops@example.com"]);

    let found = registry
        .get_by_categories_and_labels_selector("temp", "critical")
        .unwrap();
    assert_eq!(found.len(), 1);
}

#[test]
fn test_update_and_delete_survive_reopen() {
    let dir = TempDir::new().unwrap();

    {
        let registry = open_registry(&dir);
        registry.create(Subscription::new("keep", "ops")).unwrap();
        registry.create(Subscription::new("drop", "ops")).unwrap();

        registry
            .update(Subscription::new("keep", "facilities").with_labels(["info"]))
            .unwrap();
        registry.delete_by_slug("drop").unwrap();
    }

    let registry = open_registry(&dir);
    let all = registry.list_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].slug, "keep");
    assert_eq!(all[0].receiver, "facilities");
    assert_eq!(all[0].subscribed_labels, vec!["info"]);

    assert_eq!(
        registry.get_by_slug("drop").unwrap_err().kind(),
        ErrorKind::NotFound
    );
}

#[test]
fn test_slug_uniqueness_after_reopen() {
    let dir = TempDir::new().unwrap();

    {
        let registry = open_registry(&dir);
        registry.create(Subscription::new("alpha", "ops")).unwrap();
    }

    let registry = open_registry(&dir);
    let err = registry
        .create(Subscription::new("alpha", "ops"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[test]
fn test_open_held_store_is_internal_error() {
    let dir = TempDir::new().unwrap();
    let _held = FileStore::create(test_config(&dir)).unwrap();

    let result = FileStore::open(test_config(&dir));
    let err = subscription_registry::RegistryError::from(result.err().unwrap());
    assert_eq!(err.kind(), ErrorKind::Internal);
}
