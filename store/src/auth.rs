//! Simulated authentication — a profile flag in the substrate, not an
//! access-control boundary. The only credential actually checked is the
//! fixed admin pair; any other login fabricates or reuses a donor
//! profile for the given email.

use std::rc::Rc;

use chrono::Utc;
use tracing::warn;

use crate::errors::{Result, StoreError};
use crate::format;
use crate::storage::{Storage, StorageKey};
use crate::types::{ProfileId, Role, UserProfile};

const ADMIN_EMAIL: &str = "admin@gmail.com";
const ADMIN_PASSWORD: &str = "admin123";

/// Fields of [`AuthStore::signup`].
#[derive(Clone, Debug, Default)]
pub struct SignupInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
}

pub struct AuthStore {
    storage: Rc<dyn Storage>,
}

impl AuthStore {
    pub fn new(storage: Rc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// The current profile, or `None` when signed out. A corrupt stored
    /// profile reads as signed out.
    pub fn get_user(&self) -> Option<UserProfile> {
        let raw = self.storage.get(StorageKey::AuthUser.as_str())?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                warn!(%err, "corrupt auth profile, treating as signed out");
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.get_user().is_some_and(|u| u.is_authenticated)
    }

    /// Admin means the fixed admin email carrying the admin role.
    pub fn is_admin(&self) -> bool {
        self.get_user()
            .is_some_and(|u| u.is_authenticated && u.role == Role::Admin && u.email == ADMIN_EMAIL)
    }

    /// Create a donor profile and sign it in. The admin email is
    /// reserved and rejected.
    pub fn signup(&self, input: SignupInput) -> Result<UserProfile> {
        if input.email == ADMIN_EMAIL {
            return Err(StoreError::ReservedEmail(input.email));
        }
        let user = UserProfile {
            id: ProfileId::Number(Utc::now().timestamp_millis()),
            first_name: input.first_name.unwrap_or_else(|| "User".to_string()),
            last_name: input.last_name.unwrap_or_default(),
            email: input.email,
            phone: input.phone.unwrap_or_default(),
            role: Role::Donor,
            created_at: format::now_iso(),
            is_authenticated: true,
        };
        self.save(&user)?;
        Ok(user)
    }

    /// Fixed-credential check for the admin profile; everything else is
    /// demo logic that reuses the stored profile when the email matches
    /// and otherwise fabricates a donor profile from the email's local
    /// part. The admin email with a wrong password falls through to the
    /// donor path.
    pub fn login(&self, email: &str, password: &str) -> Result<UserProfile> {
        if email == ADMIN_EMAIL && password == ADMIN_PASSWORD {
            let user = UserProfile {
                id: ProfileId::Text("admin_001".to_string()),
                first_name: "Admin".to_string(),
                last_name: "User".to_string(),
                email: email.to_string(),
                phone: String::new(),
                role: Role::Admin,
                created_at: format::now_iso(),
                is_authenticated: true,
            };
            self.save(&user)?;
            return Ok(user);
        }

        let user = match self.get_user() {
            Some(mut existing) if existing.email == email => {
                existing.is_authenticated = true;
                existing
            }
            _ => UserProfile {
                id: ProfileId::Number(Utc::now().timestamp_millis()),
                first_name: email.split('@').next().unwrap_or(email).to_string(),
                last_name: String::new(),
                email: email.to_string(),
                phone: String::new(),
                role: Role::Donor,
                created_at: format::now_iso(),
                is_authenticated: true,
            },
        };
        self.save(&user)?;
        Ok(user)
    }

    pub fn logout(&self) {
        self.storage.remove(StorageKey::AuthUser.as_str());
    }

    /// Avatar initials: "G" when signed out, the first letters of the
    /// name fields, "U" when both are empty.
    pub fn get_initials(&self) -> String {
        let Some(user) = self.get_user() else {
            return "G".to_string();
        };
        let mut initials = String::new();
        initials.extend(user.first_name.chars().next());
        initials.extend(user.last_name.chars().next());
        if initials.is_empty() {
            "U".to_string()
        } else {
            initials.to_uppercase()
        }
    }

    /// First name when present, otherwise the email's local part;
    /// "Guest" when signed out.
    pub fn get_display_name(&self) -> String {
        match self.get_user() {
            None => "Guest".to_string(),
            Some(user) if !user.first_name.is_empty() => user.first_name,
            Some(user) => user
                .email
                .split('@')
                .next()
                .unwrap_or_default()
                .to_string(),
        }
    }

    fn save(&self, user: &UserProfile) -> Result<()> {
        self.storage
            .set(StorageKey::AuthUser.as_str(), &serde_json::to_string(user)?)
    }
}
