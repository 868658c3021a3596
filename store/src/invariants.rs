#![allow(dead_code)]

use crate::store::{UserStore, ACTIVITY_CAP};
use crate::types::{Cause, VolunteerLedger};

/// INV: the running total equals the sum of session hours at all times.
pub fn assert_ledger_total_consistent(ledger: &VolunteerLedger) {
    let sum: f64 = ledger.sessions.iter().map(|s| s.hours).sum();
    assert!(
        (ledger.total - sum).abs() < 1e-9,
        "ledger total {} diverged from session sum {}",
        ledger.total,
        sum
    );
}

/// INV: the activity feed never exceeds its cap and stays newest-first
/// by insertion order.
pub fn assert_activity_feed_sound(store: &UserStore) {
    let feed = store.get_activities(usize::MAX);
    assert!(
        feed.len() <= ACTIVITY_CAP,
        "feed holds {} entries, cap is {}",
        feed.len(),
        ACTIVITY_CAP
    );
    assert!(
        feed.windows(2).all(|w| w[0].id > w[1].id),
        "feed is not newest-first by insertion"
    );
}

/// INV: each cause name appears in at most one record.
pub fn assert_cause_names_unique(causes: &[Cause]) {
    for (i, cause) in causes.iter().enumerate() {
        assert!(
            !causes[..i].iter().any(|c| c.name == cause.name),
            "duplicate cause record for `{}`",
            cause.name
        );
    }
}

/// INV: cause counters only move up between two snapshots.
pub fn assert_cause_counters_monotonic(before: &[Cause], after: &[Cause]) {
    for prev in before {
        let Some(cur) = after.iter().find(|c| c.name == prev.name) else {
            panic!("cause `{}` disappeared between snapshots", prev.name);
        };
        assert!(
            cur.total_donated >= prev.total_donated,
            "cause `{}` totalDonated decreased from {} to {}",
            prev.name,
            prev.total_donated,
            cur.total_donated
        );
        assert!(
            cur.donation_count >= prev.donation_count,
            "cause `{}` donationCount decreased from {} to {}",
            prev.name,
            prev.donation_count,
            cur.donation_count
        );
    }
}
