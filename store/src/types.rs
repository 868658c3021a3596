//! # Types
//!
//! Record shapes persisted by the stores.
//!
//! Persisted JSON keeps the original camelCase field names so an
//! existing data file stays readable; the Rust side is snake_case
//! throughout. Donation amounts are the one lossy spot: JSON has no
//! NaN, so a non-finite amount is stored as `null` and read back as
//! NaN — aggregates treat it as zero, but the record keeps it.

use serde::{Deserialize, Deserializer, Serialize};

fn nan_when_null<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(d)?.unwrap_or(f64::NAN))
}

/// Kind tag on an activity-feed entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Donation,
    Volunteer,
    Event,
    General,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Donation => "donation",
            Self::Volunteer => "volunteer",
            Self::Event => "event",
            Self::General => "general",
        }
    }
}

/// A single donation. Immutable once created, apart from `status`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: i64,
    #[serde(deserialize_with = "nan_when_null")]
    pub amount: f64,
    pub cause: String,
    pub date: String,
    pub payment_method: String,
    pub status: String,
}

/// One logged volunteering session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerSession {
    pub id: i64,
    pub hours: f64,
    pub event: String,
    pub date: String,
}

/// Running volunteer ledger: `total` always equals the sum of session
/// hours and is maintained incrementally, never recomputed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VolunteerLedger {
    pub total: f64,
    pub sessions: Vec<VolunteerSession>,
}

/// Per-cause donation counters, keyed by exact cause name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cause {
    pub id: i64,
    pub name: String,
    pub total_donated: f64,
    pub donation_count: u32,
    pub date_joined: String,
}

/// An activity-feed entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub title: String,
    pub description: String,
    pub date: String,
}

/// A registration against an upcoming event. Registrations are not
/// de-duplicated by event name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRegistration {
    pub id: i64,
    pub name: String,
    pub date: String,
    pub location: String,
    pub registered_at: String,
    pub status: String,
}

/// A donation in the ledger-wide shape: the base record plus the donor
/// identity columns the admin view renders.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalDonation {
    pub id: i64,
    pub donor_name: String,
    pub email: String,
    #[serde(deserialize_with = "nan_when_null")]
    pub amount: f64,
    pub cause: String,
    pub status: String,
    pub date: String,
    pub donor_avatar: String,
}

/// Profile ids are numeric for self-service accounts and a fixed string
/// for the built-in admin.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileId {
    Number(i64),
    Text(String),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Donor,
}

/// The current profile, persisted under `auth_user`. A cosmetic state
/// flag, not an access-control boundary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: ProfileId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub role: Role,
    pub created_at: String,
    pub is_authenticated: bool,
}

/// Summary counters for the user dashboard.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_donated: f64,
    pub donation_count: usize,
    pub volunteer_hours: f64,
    pub causes_supported: usize,
    pub events_registered: usize,
}

/// Static trend placeholders carried alongside the global stats.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Trends {
    pub donations: String,
    pub donors: String,
    pub volunteers: String,
}

/// Roll-up for the admin dashboard.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStats {
    pub total_donations: f64,
    pub total_donors: usize,
    pub active_volunteers: u32,
    pub active_campaigns: usize,
    pub trends: Trends,
}
