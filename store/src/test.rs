use std::rc::Rc;

use crate::errors::StoreError;
use crate::invariants;
use crate::storage::{MemoryStorage, Storage, StorageKey};
use crate::store::{
    ActivityInput, DonationInput, EventInput, UserStore, VolunteerInput, ACTIVITY_CAP,
};
use crate::types::{ActivityKind, Donation, VolunteerLedger};

fn setup() -> (Rc<MemoryStorage>, UserStore) {
    let storage = Rc::new(MemoryStorage::new());
    let store = UserStore::new(storage.clone());
    store.init().unwrap();
    (storage, store)
}

fn donate(store: &UserStore, amount: f64, cause: &str) -> Donation {
    store
        .add_donation(DonationInput {
            amount,
            cause: Some(cause.to_string()),
            ..Default::default()
        })
        .unwrap()
}

#[test]
fn init_is_idempotent() {
    let (storage, store) = setup();
    let before: Vec<Option<String>> = StorageKey::USER_KEYS
        .iter()
        .map(|k| storage.get(k.as_str()))
        .collect();

    store.init().unwrap();

    let after: Vec<Option<String>> = StorageKey::USER_KEYS
        .iter()
        .map(|k| storage.get(k.as_str()))
        .collect();
    assert_eq!(before, after);
    assert_eq!(storage.get("donations").as_deref(), Some("[]"));
}

#[test]
fn init_never_overwrites_existing_data() {
    let (_, store) = setup();
    donate(&store, 100.0, "Education");

    store.init().unwrap();

    assert_eq!(store.get_donation_count(), 1);
    assert_eq!(store.get_causes_count(), 1);
}

#[test]
fn donation_defaults_applied() {
    let (_, store) = setup();
    let donation = store
        .add_donation(DonationInput {
            amount: 750.0,
            ..Default::default()
        })
        .unwrap();

    assert_eq!(donation.cause, "General Fund");
    assert_eq!(donation.payment_method, "Card");
    assert_eq!(donation.status, "Completed");
    assert_eq!(store.get_donation_count(), 1);
    assert_eq!(store.get_total_donations(), 750.0);
}

#[test]
fn repeat_donations_to_one_cause_roll_up() {
    let (_, store) = setup();
    donate(&store, 5000.0, "Education");
    donate(&store, 2500.0, "Education");

    let causes = store.get_causes();
    assert_eq!(causes.len(), 1);
    assert_eq!(causes[0].total_donated, 7500.0);
    assert_eq!(causes[0].donation_count, 2);
    assert_eq!(store.get_total_donations(), 7500.0);

    let recent = store.get_activities(2);
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].title, "Donated ₹2,500");
    assert_eq!(recent[1].title, "Donated ₹5,000");
    assert_eq!(recent[0].kind, ActivityKind::Donation);
    assert_eq!(recent[0].description, "to Education");
}

#[test]
fn non_finite_amount_kept_on_record_but_ignored_in_sums() {
    let (_, store) = setup();
    donate(&store, f64::NAN, "Education");
    donate(&store, 100.0, "Education");

    assert_eq!(store.get_donation_count(), 2);
    assert!(store.get_donations()[0].amount.is_nan());
    assert_eq!(store.get_total_donations(), 100.0);

    let causes = store.get_causes();
    assert_eq!(causes[0].total_donated, 100.0);
    assert_eq!(causes[0].donation_count, 2);
}

#[test]
fn volunteer_total_tracks_sessions() {
    let (_, store) = setup();
    store
        .add_volunteer_hours(VolunteerInput {
            hours: 4.0,
            ..Default::default()
        })
        .unwrap();
    store
        .add_volunteer_hours(VolunteerInput {
            hours: 2.5,
            event: Some("Food Drive".to_string()),
            ..Default::default()
        })
        .unwrap();

    let ledger = store.get_volunteer_data();
    invariants::assert_ledger_total_consistent(&ledger);
    assert_eq!(ledger.total, 6.5);
    assert_eq!(ledger.sessions.len(), 2);
    assert_eq!(ledger.sessions[0].event, "General Volunteering");

    let recent = store.get_activities(1);
    assert_eq!(recent[0].kind, ActivityKind::Volunteer);
    assert_eq!(recent[0].title, "Volunteered 2.5 hours");
    assert_eq!(recent[0].description, "at Food Drive");
}

#[test]
fn non_finite_hours_coerce_to_zero() {
    let (_, store) = setup();
    let session = store
        .add_volunteer_hours(VolunteerInput {
            hours: f64::NAN,
            ..Default::default()
        })
        .unwrap();

    assert_eq!(session.hours, 0.0);
    assert_eq!(store.get_total_volunteer_hours(), 0.0);
    assert_eq!(store.get_activities(1)[0].title, "Volunteered 0 hours");
}

#[test]
fn activity_feed_keeps_newest_fifty() {
    let (_, store) = setup();
    for i in 1..=51 {
        store
            .add_activity(ActivityInput {
                title: format!("activity {i}"),
                ..Default::default()
            })
            .unwrap();
    }

    let feed = store.get_activities(ACTIVITY_CAP);
    assert_eq!(feed.len(), ACTIVITY_CAP);
    assert_eq!(feed[0].title, "activity 51");
    assert_eq!(feed.last().unwrap().title, "activity 2");
    assert!(feed.iter().all(|a| a.title != "activity 1"));
    invariants::assert_activity_feed_sound(&store);
}

#[test]
fn activities_limit_zero_returns_nothing() {
    let (_, store) = setup();
    store
        .add_activity(ActivityInput {
            title: "something".to_string(),
            ..Default::default()
        })
        .unwrap();

    assert!(store.get_activities(0).is_empty());
}

#[test]
fn activity_defaults_applied() {
    let (_, store) = setup();
    let activity = store
        .add_activity(ActivityInput {
            title: "untyped".to_string(),
            ..Default::default()
        })
        .unwrap();

    assert_eq!(activity.kind, ActivityKind::General);
    assert_eq!(activity.description, "");
}

#[test]
fn event_registration_appends_without_dedup() {
    let (_, store) = setup();
    let input = EventInput {
        name: "Run for Hope 5K".to_string(),
        date: "2026-04-28".to_string(),
        location: "Central Park, NYC".to_string(),
    };
    let first = store.register_event(input.clone()).unwrap();
    store.register_event(input).unwrap();

    let events = store.get_events();
    assert_eq!(events.len(), 2);
    assert_eq!(first.status, "Registered");

    let recent = store.get_activities(1);
    assert_eq!(recent[0].kind, ActivityKind::Event);
    assert_eq!(recent[0].title, "Registered for Run for Hope 5K");
    assert_eq!(recent[0].description, "Central Park, NYC");
}

#[test]
fn dashboard_stats_cover_every_collection() {
    let (_, store) = setup();
    donate(&store, 300.0, "Education");
    donate(&store, 200.0, "Water");
    store
        .add_volunteer_hours(VolunteerInput {
            hours: 3.0,
            ..Default::default()
        })
        .unwrap();
    store
        .register_event(EventInput {
            name: "Health Fair".to_string(),
            date: "2026-03-22".to_string(),
            location: "Mumbai, India".to_string(),
        })
        .unwrap();

    let stats = store.get_dashboard_stats();
    assert_eq!(stats.total_donated, 500.0);
    assert_eq!(stats.donation_count, 2);
    assert_eq!(stats.volunteer_hours, 3.0);
    assert_eq!(stats.causes_supported, 2);
    assert_eq!(stats.events_registered, 1);
}

#[test]
fn clear_all_data_resets_to_defaults() {
    let (storage, store) = setup();
    donate(&store, 500.0, "Education");
    store
        .add_volunteer_hours(VolunteerInput {
            hours: 2.0,
            ..Default::default()
        })
        .unwrap();

    store.clear_all_data().unwrap();

    assert!(store.get_donations().is_empty());
    assert_eq!(store.get_volunteer_data(), VolunteerLedger::default());
    assert!(store.get_causes().is_empty());
    assert!(store.get_activities(10).is_empty());
    assert!(store.get_events().is_empty());
    // The keys are re-initialised, not just removed.
    assert_eq!(storage.get("donations").as_deref(), Some("[]"));
}

#[test]
fn corrupt_collection_reads_as_default_and_is_counted() {
    let (storage, store) = setup();
    storage
        .set(StorageKey::Donations.as_str(), "{definitely not json")
        .unwrap();

    assert!(store.get_donations().is_empty());
    assert_eq!(store.get_donation_count(), 0);
    assert!(store.degraded_read_count() >= 1);
}

#[test]
fn record_ids_are_strictly_increasing() {
    let (_, store) = setup();
    let first = donate(&store, 10.0, "A");
    let second = donate(&store, 20.0, "B");
    let third = donate(&store, 30.0, "C");

    assert!(second.id > first.id);
    assert!(third.id > second.id);
}

#[test]
fn quota_failure_leaves_committed_records_intact() {
    let storage = Rc::new(MemoryStorage::with_quota(3_000));
    let store = UserStore::new(storage.clone());
    store.init().unwrap();
    donate(&store, 50.0, "Education");

    let donations_before = store.get_donations();
    let causes_before = store.get_causes();
    let activities_before = store.get_activities(ACTIVITY_CAP);

    let err = store
        .add_donation(DonationInput {
            amount: 1.0,
            cause: Some("x".repeat(2_000)),
            ..Default::default()
        })
        .unwrap_err();

    assert!(matches!(err, StoreError::QuotaExceeded { .. }));
    // The batched write is all-or-nothing: none of the three dependent
    // keys moved.
    assert_eq!(store.get_donations(), donations_before);
    assert_eq!(store.get_causes(), causes_before);
    assert_eq!(store.get_activities(ACTIVITY_CAP), activities_before);
}

#[test]
fn sample_data_seeds_only_when_empty() {
    let (_, store) = setup();
    store.add_sample_data().unwrap();
    assert_eq!(store.get_donation_count(), 3);
    assert_eq!(store.get_total_volunteer_hours(), 7.0);

    store.add_sample_data().unwrap();
    assert_eq!(store.get_donation_count(), 3);
    assert_eq!(store.get_volunteer_data().sessions.len(), 2);
}

#[test]
fn mixed_sequence_preserves_invariants() {
    let (_, store) = setup();
    for i in 0..20 {
        match i % 4 {
            0 => {
                donate(&store, (i * 10) as f64, "Education");
            }
            1 => {
                store
                    .add_volunteer_hours(VolunteerInput {
                        hours: 1.5,
                        ..Default::default()
                    })
                    .unwrap();
            }
            2 => {
                store
                    .register_event(EventInput {
                        name: format!("event {i}"),
                        date: "2026-05-01".to_string(),
                        location: "Virtual Event".to_string(),
                    })
                    .unwrap();
            }
            _ => {
                donate(&store, 5.0, "Water");
            }
        }
    }

    invariants::assert_ledger_total_consistent(&store.get_volunteer_data());
    invariants::assert_activity_feed_sound(&store);
    invariants::assert_cause_names_unique(&store.get_causes());

    let stats = store.get_dashboard_stats();
    assert_eq!(stats.donation_count, store.get_donations().len());
    assert_eq!(stats.events_registered, store.get_events().len());
}
