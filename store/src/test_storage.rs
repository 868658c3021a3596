use std::fs;

use crate::errors::StoreError;
use crate::storage::{FileStorage, MemoryStorage, Storage, StorageKey};

#[test]
fn storage_keys_map_to_the_flat_namespace() {
    assert_eq!(StorageKey::Donations.as_str(), "donations");
    assert_eq!(StorageKey::VolunteerHours.as_str(), "volunteer_hours");
    assert_eq!(StorageKey::Causes.as_str(), "causes");
    assert_eq!(StorageKey::Activities.as_str(), "activities");
    assert_eq!(StorageKey::Events.as_str(), "events");
    assert_eq!(StorageKey::AllDonations.as_str(), "all_donations");
    assert_eq!(StorageKey::AuthUser.as_str(), "auth_user");

    // The admin ledger and the profile are not user collections.
    assert_eq!(StorageKey::USER_KEYS.len(), 5);
    assert!(!StorageKey::USER_KEYS.contains(&StorageKey::AllDonations));
    assert!(!StorageKey::USER_KEYS.contains(&StorageKey::AuthUser));
}

#[test]
fn memory_storage_get_set_remove_clear() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.get("a"), None);

    storage.set("a", "1").unwrap();
    storage.set("b", "2").unwrap();
    assert_eq!(storage.get("a").as_deref(), Some("1"));

    storage.remove("a");
    assert_eq!(storage.get("a"), None);
    assert_eq!(storage.get("b").as_deref(), Some("2"));

    storage.clear();
    assert_eq!(storage.get("b"), None);
}

#[test]
fn memory_quota_rejects_oversized_writes_and_keeps_committed_keys() {
    let storage = MemoryStorage::with_quota(20);
    storage.set("a", "12345").unwrap();

    let err = storage.set("b", &"x".repeat(30)).unwrap_err();
    assert!(matches!(err, StoreError::QuotaExceeded { .. }));
    assert_eq!(storage.get("a").as_deref(), Some("12345"));
    assert_eq!(storage.get("b"), None);

    // Overwriting an existing key counts the replaced bytes as freed.
    storage.set("a", "1234567890").unwrap();
}

#[test]
fn memory_set_many_is_all_or_nothing() {
    let storage = MemoryStorage::with_quota(20);
    let err = storage
        .set_many(&[
            ("a", "123".to_string()),
            ("b", "x".repeat(40)),
        ])
        .unwrap_err();

    assert!(matches!(err, StoreError::QuotaExceeded { .. }));
    assert_eq!(storage.get("a"), None);
    assert_eq!(storage.get("b"), None);
}

#[test]
fn file_storage_round_trips_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("portal.json");

    {
        let storage = FileStorage::open(&path).unwrap();
        storage.set("donations", "[]").unwrap();
        storage
            .set_many(&[
                ("causes", "[]".to_string()),
                ("events", "[1,2]".to_string()),
            ])
            .unwrap();
    }

    let reopened = FileStorage::open(&path).unwrap();
    assert_eq!(reopened.get("donations").as_deref(), Some("[]"));
    assert_eq!(reopened.get("causes").as_deref(), Some("[]"));
    assert_eq!(reopened.get("events").as_deref(), Some("[1,2]"));
}

#[test]
fn file_storage_opens_empty_when_the_file_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::open(dir.path().join("absent.json")).unwrap();
    assert_eq!(storage.get("donations"), None);
}

#[test]
fn file_storage_starts_empty_on_a_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("portal.json");
    fs::write(&path, "not json at all").unwrap();

    let storage = FileStorage::open(&path).unwrap();
    assert_eq!(storage.get("donations"), None);

    // And recovers into a usable substrate.
    storage.set("donations", "[]").unwrap();
    let reopened = FileStorage::open(&path).unwrap();
    assert_eq!(reopened.get("donations").as_deref(), Some("[]"));
}

#[test]
fn file_storage_enforces_its_quota() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("portal.json");
    let storage = FileStorage::open_with_quota(&path, 16).unwrap();

    storage.set("a", "1").unwrap();
    let err = storage.set("big", &"x".repeat(64)).unwrap_err();
    assert!(matches!(err, StoreError::QuotaExceeded { .. }));

    let reopened = FileStorage::open(&path).unwrap();
    assert_eq!(reopened.get("a").as_deref(), Some("1"));
    assert_eq!(reopened.get("big"), None);
}

#[test]
fn file_storage_persists_removals() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("portal.json");

    {
        let storage = FileStorage::open(&path).unwrap();
        storage.set("a", "1").unwrap();
        storage.set("b", "2").unwrap();
        storage.remove("a");
    }

    let reopened = FileStorage::open(&path).unwrap();
    assert_eq!(reopened.get("a"), None);
    assert_eq!(reopened.get("b").as_deref(), Some("2"));
}
