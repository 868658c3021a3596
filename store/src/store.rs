//! # User record store
//!
//! CRUD over the five user collections, with derived-write side effects:
//! a donation also feeds the activity stream and the per-cause counters,
//! volunteering and event registrations feed the activity stream.
//!
//! Every mutation is write-through. The dependent keys touched by one
//! logical action go through [`Storage::set_many`] so substrates that
//! can batch commit them together; reads are fail-open and never raise.

use std::cell::Cell;
use std::rc::Rc;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::errors::Result;
use crate::format;
use crate::storage::{Storage, StorageKey};
use crate::types::{
    Activity, ActivityKind, Cause, DashboardStats, Donation, EventRegistration, VolunteerLedger,
    VolunteerSession,
};

/// The activity feed keeps only this many of the most recent entries.
pub const ACTIVITY_CAP: usize = 50;

// ── Inputs ───────────────────────────────────────────────────────────

/// Fields of [`UserStore::add_donation`]; omitted options take the
/// documented defaults.
#[derive(Clone, Debug, Default)]
pub struct DonationInput {
    pub amount: f64,
    pub cause: Option<String>,
    pub date: Option<String>,
    pub payment_method: Option<String>,
}

/// Fields of [`UserStore::add_volunteer_hours`].
#[derive(Clone, Debug, Default)]
pub struct VolunteerInput {
    pub hours: f64,
    pub event: Option<String>,
    pub date: Option<String>,
}

/// Fields of [`UserStore::add_activity`].
#[derive(Clone, Debug, Default)]
pub struct ActivityInput {
    pub kind: Option<ActivityKind>,
    pub title: String,
    pub description: Option<String>,
    pub date: Option<String>,
}

/// Fields of [`UserStore::register_event`].
#[derive(Clone, Debug, Default)]
pub struct EventInput {
    pub name: String,
    pub date: String,
    pub location: String,
}

// ── Store ────────────────────────────────────────────────────────────

pub struct UserStore {
    storage: Rc<dyn Storage>,
    last_id: Cell<i64>,
    degraded_reads: Cell<u64>,
}

impl UserStore {
    pub fn new(storage: Rc<dyn Storage>) -> Self {
        Self {
            storage,
            last_id: Cell::new(0),
            degraded_reads: Cell::new(0),
        }
    }

    /// Idempotent: writes the empty default for any absent collection,
    /// never overwrites existing data.
    pub fn init(&self) -> Result<()> {
        self.init_absent(StorageKey::Donations, &Vec::<Donation>::new())?;
        self.init_absent(StorageKey::VolunteerHours, &VolunteerLedger::default())?;
        self.init_absent(StorageKey::Causes, &Vec::<Cause>::new())?;
        self.init_absent(StorageKey::Activities, &Vec::<Activity>::new())?;
        self.init_absent(StorageKey::Events, &Vec::<EventRegistration>::new())?;
        Ok(())
    }

    fn init_absent<T: Serialize>(&self, key: StorageKey, default: &T) -> Result<()> {
        if self.storage.get(key.as_str()).is_none() {
            self.write(key, default)?;
        }
        Ok(())
    }

    /// Millisecond-timestamp id, bumped past the previous one so records
    /// created within the same millisecond stay distinct and ordered.
    fn next_id(&self) -> i64 {
        let id = Utc::now().timestamp_millis().max(self.last_id.get() + 1);
        self.last_id.set(id);
        id
    }

    /// Fail-open read: an absent or corrupt stored value degrades to the
    /// default. Corruption is logged and counted so instrumentation and
    /// tests can observe the recovery.
    fn read_or_default<T: DeserializeOwned + Default>(&self, key: StorageKey) -> T {
        match self.storage.get(key.as_str()) {
            None => T::default(),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(err) => {
                    warn!(key = key.as_str(), %err, "corrupt stored value, using default");
                    self.degraded_reads.set(self.degraded_reads.get() + 1);
                    T::default()
                }
            },
        }
    }

    fn write<T: Serialize>(&self, key: StorageKey, value: &T) -> Result<()> {
        self.storage.set(key.as_str(), &serde_json::to_string(value)?)
    }

    /// Number of reads that fell back to a default because the stored
    /// value failed to deserialise.
    pub fn degraded_read_count(&self) -> u64 {
        self.degraded_reads.get()
    }

    // ── Donations ────────────────────────────────────────────────

    /// Append a donation, then derive its activity entry and the cause
    /// upsert; all three keys commit in one batched write.
    pub fn add_donation(&self, input: DonationInput) -> Result<Donation> {
        let mut donations = self.get_donations();
        let donation = Donation {
            id: self.next_id(),
            amount: input.amount,
            cause: input.cause.unwrap_or_else(|| "General Fund".to_string()),
            date: input.date.unwrap_or_else(format::now_iso),
            payment_method: input.payment_method.unwrap_or_else(|| "Card".to_string()),
            status: "Completed".to_string(),
        };
        donations.push(donation.clone());

        let activities = self.pushed_activity(Activity {
            id: self.next_id(),
            kind: ActivityKind::Donation,
            title: format!("Donated {}", format::format_inr(donation.amount)),
            description: format!("to {}", donation.cause),
            date: donation.date.clone(),
        });
        let causes = self.upserted_cause(&donation.cause, donation.amount);

        self.storage.set_many(&[
            (
                StorageKey::Donations.as_str(),
                serde_json::to_string(&donations)?,
            ),
            (
                StorageKey::Activities.as_str(),
                serde_json::to_string(&activities)?,
            ),
            (StorageKey::Causes.as_str(), serde_json::to_string(&causes)?),
        ])?;

        Ok(donation)
    }

    /// Full donation history in insertion order. Corrupt data reads as
    /// empty.
    pub fn get_donations(&self) -> Vec<Donation> {
        self.read_or_default(StorageKey::Donations)
    }

    /// Sum of donation amounts; non-finite amounts count as zero.
    pub fn get_total_donations(&self) -> f64 {
        self.get_donations()
            .iter()
            .map(|d| if d.amount.is_finite() { d.amount } else { 0.0 })
            .sum()
    }

    pub fn get_donation_count(&self) -> usize {
        self.get_donations().len()
    }

    // ── Volunteer hours ──────────────────────────────────────────

    /// Append a session and bump the running total incrementally.
    /// Non-finite hours are coerced to zero at creation.
    pub fn add_volunteer_hours(&self, input: VolunteerInput) -> Result<VolunteerSession> {
        let mut ledger = self.get_volunteer_data();
        let session = VolunteerSession {
            id: self.next_id(),
            hours: if input.hours.is_finite() { input.hours } else { 0.0 },
            event: input
                .event
                .unwrap_or_else(|| "General Volunteering".to_string()),
            date: input.date.unwrap_or_else(format::now_iso),
        };
        ledger.total += session.hours;
        ledger.sessions.push(session.clone());

        let activities = self.pushed_activity(Activity {
            id: self.next_id(),
            kind: ActivityKind::Volunteer,
            title: format!("Volunteered {} hours", session.hours),
            description: format!("at {}", session.event),
            date: session.date.clone(),
        });

        self.storage.set_many(&[
            (
                StorageKey::VolunteerHours.as_str(),
                serde_json::to_string(&ledger)?,
            ),
            (
                StorageKey::Activities.as_str(),
                serde_json::to_string(&activities)?,
            ),
        ])?;

        Ok(session)
    }

    pub fn get_volunteer_data(&self) -> VolunteerLedger {
        self.read_or_default(StorageKey::VolunteerHours)
    }

    pub fn get_total_volunteer_hours(&self) -> f64 {
        self.get_volunteer_data().total
    }

    // ── Causes ───────────────────────────────────────────────────

    /// Upsert the cause record for `name`: a repeat name bumps its
    /// counters in place, a new name appends a record. Also runs as a
    /// side effect of every donation.
    pub fn add_cause(&self, name: &str, amount: f64) -> Result<()> {
        let causes = self.upserted_cause(name, amount);
        self.write(StorageKey::Causes, &causes)
    }

    fn upserted_cause(&self, name: &str, amount: f64) -> Vec<Cause> {
        let added = if amount.is_finite() { amount } else { 0.0 };
        let mut causes = self.get_causes();
        match causes.iter_mut().find(|c| c.name == name) {
            Some(cause) => {
                cause.total_donated += added;
                cause.donation_count += 1;
            }
            None => causes.push(Cause {
                id: self.next_id(),
                name: name.to_string(),
                total_donated: added,
                donation_count: 1,
                date_joined: format::now_iso(),
            }),
        }
        causes
    }

    pub fn get_causes(&self) -> Vec<Cause> {
        self.read_or_default(StorageKey::Causes)
    }

    pub fn get_causes_count(&self) -> usize {
        self.get_causes().len()
    }

    // ── Activities ───────────────────────────────────────────────

    /// Prepend an entry to the feed, dropping overflow past
    /// [`ACTIVITY_CAP`].
    pub fn add_activity(&self, input: ActivityInput) -> Result<Activity> {
        let activity = Activity {
            id: self.next_id(),
            kind: input.kind.unwrap_or(ActivityKind::General),
            title: input.title,
            description: input.description.unwrap_or_default(),
            date: input.date.unwrap_or_else(format::now_iso),
        };
        let activities = self.pushed_activity(activity.clone());
        self.write(StorageKey::Activities, &activities)?;
        Ok(activity)
    }

    fn pushed_activity(&self, activity: Activity) -> Vec<Activity> {
        let mut activities: Vec<Activity> = self.read_or_default(StorageKey::Activities);
        activities.insert(0, activity);
        activities.truncate(ACTIVITY_CAP);
        activities
    }

    /// The `limit` most recent entries. The feed is stored most recent
    /// first, so this is a plain prefix; a limit of 0 yields nothing
    /// (the admin view's donation listing treats 0 differently).
    pub fn get_activities(&self, limit: usize) -> Vec<Activity> {
        let mut activities: Vec<Activity> = self.read_or_default(StorageKey::Activities);
        activities.truncate(limit);
        activities
    }

    // ── Events ───────────────────────────────────────────────────

    /// Append a registration; repeat registrations against the same
    /// event are kept as separate records.
    pub fn register_event(&self, input: EventInput) -> Result<EventRegistration> {
        let mut events = self.get_events();
        let registration = EventRegistration {
            id: self.next_id(),
            name: input.name,
            date: input.date,
            location: input.location,
            registered_at: format::now_iso(),
            status: "Registered".to_string(),
        };
        events.push(registration.clone());

        let activities = self.pushed_activity(Activity {
            id: self.next_id(),
            kind: ActivityKind::Event,
            title: format!("Registered for {}", registration.name),
            description: registration.location.clone(),
            date: registration.registered_at.clone(),
        });

        self.storage.set_many(&[
            (StorageKey::Events.as_str(), serde_json::to_string(&events)?),
            (
                StorageKey::Activities.as_str(),
                serde_json::to_string(&activities)?,
            ),
        ])?;

        Ok(registration)
    }

    pub fn get_events(&self) -> Vec<EventRegistration> {
        self.read_or_default(StorageKey::Events)
    }

    // ── Summary ──────────────────────────────────────────────────

    /// Dashboard counters, recomputed from the collections on every
    /// call.
    pub fn get_dashboard_stats(&self) -> DashboardStats {
        DashboardStats {
            total_donated: self.get_total_donations(),
            donation_count: self.get_donation_count(),
            volunteer_hours: self.get_total_volunteer_hours(),
            causes_supported: self.get_causes_count(),
            events_registered: self.get_events().len(),
        }
    }

    /// Remove every user collection, then re-initialise the empty
    /// defaults. Irreversible.
    pub fn clear_all_data(&self) -> Result<()> {
        for key in StorageKey::USER_KEYS {
            self.storage.remove(key.as_str());
        }
        self.init()
    }

    /// Seed a handful of demo records, only where the store is empty.
    pub fn add_sample_data(&self) -> Result<()> {
        if self.get_donation_count() == 0 {
            self.add_donation(DonationInput {
                amount: 5000.0,
                cause: Some("Education for All".to_string()),
                ..Default::default()
            })?;
            self.add_donation(DonationInput {
                amount: 2500.0,
                cause: Some("Clean Water Initiative".to_string()),
                ..Default::default()
            })?;
            self.add_donation(DonationInput {
                amount: 1000.0,
                cause: Some("Healthcare Access".to_string()),
                ..Default::default()
            })?;
        }
        if self.get_total_volunteer_hours() == 0.0 {
            self.add_volunteer_hours(VolunteerInput {
                hours: 4.0,
                event: Some("Teaching at Community Center".to_string()),
                ..Default::default()
            })?;
            self.add_volunteer_hours(VolunteerInput {
                hours: 3.0,
                event: Some("Food Distribution Drive".to_string()),
                ..Default::default()
            })?;
        }
        Ok(())
    }
}
