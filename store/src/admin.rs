//! # Admin aggregate view
//!
//! Merges the current session's donations with the ledger-wide
//! collection into one sorted listing and derives the global roll-up.
//! Stateless: everything is recomputed from the substrate per call.

use std::collections::HashSet;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::auth::AuthStore;
use crate::errors::Result;
use crate::storage::{Storage, StorageKey};
use crate::store::UserStore;
use crate::types::{GlobalDonation, GlobalStats, Trends};

/// Placeholder donor names from an early seeded ledger; their presence
/// marks legacy data that gets purged once.
const LEGACY_MARKERS: [&str; 2] = ["Rahul Sharma", "Priya Menon"];

pub struct AdminStore {
    storage: Rc<dyn Storage>,
    users: UserStore,
    auth: AuthStore,
}

impl AdminStore {
    pub fn new(storage: Rc<dyn Storage>) -> Self {
        Self {
            users: UserStore::new(storage.clone()),
            auth: AuthStore::new(storage.clone()),
            storage,
        }
    }

    /// One-time migration guard: a ledger still carrying the legacy
    /// placeholder donors is reset to empty; an absent ledger is
    /// initialised. Real data is never touched.
    pub fn init(&self) -> Result<()> {
        match self.storage.get(StorageKey::AllDonations.as_str()) {
            Some(raw) if LEGACY_MARKERS.iter().any(|m| raw.contains(m)) => {
                info!("purging legacy seeded donation ledger");
                self.storage.set(StorageKey::AllDonations.as_str(), "[]")
            }
            Some(_) => Ok(()),
            None => self.storage.set(StorageKey::AllDonations.as_str(), "[]"),
        }
    }

    /// Ledger-wide donations merged with the current session's, newest
    /// first. The session's records are mapped into the ledger shape
    /// with the signed-in identity, or guest placeholders. A `limit` of
    /// 0 means "all" (unlike the activity feed's prefix semantics).
    pub fn get_all_donations(&self, limit: usize) -> Vec<GlobalDonation> {
        let (donor_name, email, avatar) = match self.auth.get_user() {
            Some(user) => (
                format!("{} {}", user.first_name, user.last_name),
                user.email,
                self.auth.get_initials(),
            ),
            None => (
                "Guest User".to_string(),
                "guest@example.com".to_string(),
                "G".to_string(),
            ),
        };

        let mut combined: Vec<GlobalDonation> = self
            .users
            .get_donations()
            .into_iter()
            .map(|d| GlobalDonation {
                id: d.id,
                donor_name: donor_name.clone(),
                email: email.clone(),
                amount: d.amount,
                cause: d.cause,
                status: d.status,
                date: d.date,
                donor_avatar: avatar.clone(),
            })
            .collect();
        combined.extend(self.ledger());

        // Stable sort: same-date entries keep session-before-ledger order.
        combined.sort_by_key(|d| std::cmp::Reverse(sort_stamp(&d.date)));

        if limit > 0 {
            combined.truncate(limit);
        }
        combined
    }

    /// Global roll-up for the admin dashboard. The volunteer figure can
    /// only see the current profile, so it is 0 or 1.
    pub fn get_global_stats(&self) -> GlobalStats {
        let all = self.get_all_donations(0);
        let total_donations = all
            .iter()
            .map(|d| if d.amount.is_finite() { d.amount } else { 0.0 })
            .sum();
        let total_donors = all
            .iter()
            .map(|d| d.email.as_str())
            .collect::<HashSet<_>>()
            .len();
        let active_volunteers = if self.users.get_total_volunteer_hours() > 0.0 {
            1
        } else {
            0
        };

        GlobalStats {
            total_donations,
            total_donors,
            active_volunteers,
            active_campaigns: self.users.get_causes_count(),
            trends: Trends {
                donations: "0%".to_string(),
                donors: "0".to_string(),
                volunteers: "0".to_string(),
            },
        }
    }

    /// Fail-open read of the ledger-wide collection.
    fn ledger(&self) -> Vec<GlobalDonation> {
        let Some(raw) = self.storage.get(StorageKey::AllDonations.as_str()) else {
            return Vec::new();
        };
        serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!(key = StorageKey::AllDonations.as_str(), %err, "corrupt ledger, using empty");
            Vec::new()
        })
    }
}

/// Millisecond sort key for a donation date; anything unparseable sorts
/// as the epoch, i.e. oldest.
fn sort_stamp(date: &str) -> i64 {
    DateTime::parse_from_rfc3339(date)
        .map(|d| d.with_timezone(&Utc).timestamp_millis())
        .unwrap_or(0)
}
