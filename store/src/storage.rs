//! # Storage
//!
//! The substrate port shared by every store, plus its two implementations.
//!
//! The substrate is a flat, string-keyed, string-valued namespace with
//! synchronous access and a byte capacity that rejects writes past the
//! limit. Keys in use:
//!
//! | Key               | Value shape                               |
//! |-------------------|-------------------------------------------|
//! | `donations`       | array of donation records                 |
//! | `volunteer_hours` | `{ total, sessions }` ledger              |
//! | `causes`          | array of cause records                    |
//! | `activities`      | array of feed entries, most recent first  |
//! | `events`          | array of event registrations              |
//! | `all_donations`   | ledger-wide donation records              |
//! | `auth_user`       | the current profile, or absent            |
//!
//! Implementations are single-threaded and use interior mutability, so a
//! handle can be shared between stores as `Rc<dyn Storage>`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use tracing::warn;

use crate::errors::{Result, StoreError};

/// Conventional capacity of the backing store, matching the usual
/// browser-profile allowance.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

// ── Storage Keys ─────────────────────────────────────────────────────

/// All substrate keys used by the stores.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StorageKey {
    /// Donation history (user store).
    Donations,
    /// Volunteer ledger: running total plus sessions (user store).
    VolunteerHours,
    /// Cause records keyed by name (user store).
    Causes,
    /// Bounded most-recent-first activity feed (user store).
    Activities,
    /// Event registrations (user store).
    Events,
    /// Ledger-wide donation records (admin view).
    AllDonations,
    /// Current profile (auth store).
    AuthUser,
}

impl StorageKey {
    /// The five collections owned by the user record store.
    pub const USER_KEYS: [StorageKey; 5] = [
        StorageKey::Donations,
        StorageKey::VolunteerHours,
        StorageKey::Causes,
        StorageKey::Activities,
        StorageKey::Events,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Donations => "donations",
            StorageKey::VolunteerHours => "volunteer_hours",
            StorageKey::Causes => "causes",
            StorageKey::Activities => "activities",
            StorageKey::Events => "events",
            StorageKey::AllDonations => "all_donations",
            StorageKey::AuthUser => "auth_user",
        }
    }
}

// ── Port ─────────────────────────────────────────────────────────────

/// Synchronous string-keyed substrate the stores read and write through.
///
/// `get` and `remove` never fail; `set` fails only when the write would
/// exceed the substrate's capacity, and must leave committed state
/// untouched when it does.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str);
    fn clear(&self);

    /// Write several keys in one logical step.
    ///
    /// Substrates that can batch override this with an all-or-nothing
    /// implementation; the default falls back to sequential writes, where
    /// a mid-batch failure leaves earlier entries committed.
    fn set_many(&self, entries: &[(&str, String)]) -> Result<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

/// Projected namespace size after applying `changes` on top of `map`.
fn projected_size(map: &HashMap<String, String>, changes: &[(&str, &str)]) -> usize {
    let mut projected: usize = map.iter().map(|(k, v)| k.len() + v.len()).sum();
    for (key, value) in changes {
        match map.get(*key) {
            Some(old) => projected -= old.len(),
            None => projected += key.len(),
        }
        projected += value.len();
    }
    projected
}

fn check_quota(
    map: &HashMap<String, String>,
    changes: &[(&str, &str)],
    quota: usize,
) -> Result<()> {
    let needed = projected_size(map, changes);
    if needed > quota {
        return Err(StoreError::QuotaExceeded {
            key: changes.first().map(|(k, _)| *k).unwrap_or_default().to_string(),
            needed,
            capacity: quota,
        });
    }
    Ok(())
}

// ── In-memory substrate ──────────────────────────────────────────────

/// `HashMap`-backed substrate, the in-memory fake for tests and demos.
#[derive(Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A substrate that rejects writes once the namespace would exceed
    /// `quota` bytes (keys plus values).
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
            quota: Some(quota),
        }
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.entries.borrow_mut();
        if let Some(quota) = self.quota {
            check_quota(&map, &[(key, value)], quota)?;
        }
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }

    fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    fn set_many(&self, entries: &[(&str, String)]) -> Result<()> {
        let mut map = self.entries.borrow_mut();
        if let Some(quota) = self.quota {
            let changes: Vec<(&str, &str)> =
                entries.iter().map(|(k, v)| (*k, v.as_str())).collect();
            check_quota(&map, &changes, quota)?;
        }
        for (key, value) in entries {
            map.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }
}

// ── File-backed substrate ────────────────────────────────────────────

/// File-backed substrate: the whole namespace is one JSON object on
/// disk, loaded at open and rewritten through a temp-file rename on
/// every mutation, so a batched write lands atomically or not at all.
pub struct FileStorage {
    path: PathBuf,
    entries: RefCell<HashMap<String, String>>,
    quota: usize,
}

impl FileStorage {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with_quota(path, DEFAULT_QUOTA_BYTES)
    }

    pub fn open_with_quota(path: impl Into<PathBuf>, quota: usize) -> Result<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!(path = %path.display(), %err, "corrupt substrate file, starting empty");
                HashMap::new()
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            path,
            entries: RefCell::new(entries),
            quota,
        })
    }

    fn flush(&self) -> Result<()> {
        let raw = serde_json::to_string(&*self.entries.borrow())?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Flush for the infallible trait methods; a failure here only costs
    /// durability of the removal, so it is logged and swallowed.
    fn flush_lossy(&self) {
        if let Err(err) = self.flush() {
            warn!(path = %self.path.display(), %err, "substrate flush failed");
        }
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        {
            let mut map = self.entries.borrow_mut();
            check_quota(&map, &[(key, value)], self.quota)?;
            map.insert(key.to_string(), value.to_string());
        }
        self.flush()
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
        self.flush_lossy();
    }

    fn clear(&self) {
        self.entries.borrow_mut().clear();
        self.flush_lossy();
    }

    fn set_many(&self, entries: &[(&str, String)]) -> Result<()> {
        {
            let mut map = self.entries.borrow_mut();
            let changes: Vec<(&str, &str)> =
                entries.iter().map(|(k, v)| (*k, v.as_str())).collect();
            check_quota(&map, &changes, self.quota)?;
            for (key, value) in entries {
                map.insert((*key).to_string(), value.clone());
            }
        }
        self.flush()
    }
}
