use std::rc::Rc;

use crate::invariants;
use crate::storage::MemoryStorage;
use crate::store::{DonationInput, UserStore};

fn setup() -> UserStore {
    let storage = Rc::new(MemoryStorage::new());
    let store = UserStore::new(storage);
    store.init().unwrap();
    store
}

fn donate(store: &UserStore, amount: f64, cause: &str) {
    store
        .add_donation(DonationInput {
            amount,
            cause: Some(cause.to_string()),
            ..Default::default()
        })
        .unwrap();
}

#[test]
fn first_donation_creates_cause_with_count_one() {
    let store = setup();
    donate(&store, 500.0, "Education");

    let causes = store.get_causes();
    assert_eq!(causes.len(), 1);
    assert_eq!(causes[0].name, "Education");
    assert_eq!(causes[0].total_donated, 500.0);
    assert_eq!(causes[0].donation_count, 1);
}

#[test]
fn repeat_cause_updates_in_place() {
    let store = setup();
    donate(&store, 500.0, "Education");
    let id_before = store.get_causes()[0].id;
    donate(&store, 250.0, "Education");

    let causes = store.get_causes();
    assert_eq!(causes.len(), 1);
    assert_eq!(causes[0].id, id_before);
    assert_eq!(causes[0].total_donated, 750.0);
    assert_eq!(causes[0].donation_count, 2);
}

#[test]
fn distinct_causes_get_distinct_records() {
    let store = setup();
    donate(&store, 100.0, "Education");
    donate(&store, 200.0, "Clean Water");
    donate(&store, 300.0, "Education");

    let causes = store.get_causes();
    assert_eq!(causes.len(), 2);
    invariants::assert_cause_names_unique(&causes);
    assert_eq!(store.get_causes_count(), 2);

    let education = causes.iter().find(|c| c.name == "Education").unwrap();
    assert_eq!(education.total_donated, 400.0);
    assert_eq!(education.donation_count, 2);
}

#[test]
fn cause_names_match_exactly() {
    let store = setup();
    donate(&store, 100.0, "Education");
    donate(&store, 100.0, "education");

    // Case-sensitive keying: two records, not one.
    assert_eq!(store.get_causes_count(), 2);
}

#[test]
fn add_cause_is_callable_directly() {
    let store = setup();
    store.add_cause("Education", 100.0).unwrap();
    store.add_cause("Education", 50.0).unwrap();

    let causes = store.get_causes();
    assert_eq!(causes.len(), 1);
    assert_eq!(causes[0].total_donated, 150.0);
    assert_eq!(causes[0].donation_count, 2);
    // The direct path touches no donation records.
    assert_eq!(store.get_donation_count(), 0);
}

#[test]
fn default_cause_is_general_fund() {
    let store = setup();
    store
        .add_donation(DonationInput {
            amount: 75.0,
            ..Default::default()
        })
        .unwrap();

    assert_eq!(store.get_causes()[0].name, "General Fund");
}

#[test]
fn counters_never_decrease_across_a_sequence() {
    let store = setup();
    let mut snapshot = store.get_causes();
    for (amount, cause) in [
        (100.0, "Education"),
        (f64::NAN, "Education"),
        (50.0, "Water"),
        (25.0, "Education"),
        (0.0, "Water"),
    ] {
        donate(&store, amount, cause);
        let current = store.get_causes();
        invariants::assert_cause_counters_monotonic(&snapshot, &current);
        snapshot = current;
    }
}

#[test]
fn non_finite_amount_counts_but_adds_zero() {
    let store = setup();
    donate(&store, f64::NAN, "Education");

    let causes = store.get_causes();
    assert_eq!(causes[0].total_donated, 0.0);
    assert_eq!(causes[0].donation_count, 1);
}
