use std::rc::Rc;

use crate::auth::{AuthStore, SignupInput};
use crate::errors::StoreError;
use crate::storage::{MemoryStorage, Storage, StorageKey};
use crate::types::{ProfileId, Role};

fn setup() -> (Rc<MemoryStorage>, AuthStore) {
    let storage = Rc::new(MemoryStorage::new());
    let auth = AuthStore::new(storage.clone());
    (storage, auth)
}

fn signup(auth: &AuthStore, first: &str, last: &str, email: &str) {
    auth.signup(SignupInput {
        first_name: Some(first.to_string()),
        last_name: Some(last.to_string()),
        email: email.to_string(),
        ..Default::default()
    })
    .unwrap();
}

#[test]
fn default_state_is_signed_out() {
    let (_, auth) = setup();
    assert!(auth.get_user().is_none());
    assert!(!auth.is_authenticated());
    assert!(!auth.is_admin());
    assert_eq!(auth.get_initials(), "G");
    assert_eq!(auth.get_display_name(), "Guest");
}

#[test]
fn signup_creates_an_authenticated_donor() {
    let (_, auth) = setup();
    signup(&auth, "Asha", "Rao", "asha@example.com");

    let user = auth.get_user().unwrap();
    assert_eq!(user.role, Role::Donor);
    assert!(user.is_authenticated);
    assert!(auth.is_authenticated());
    assert!(!auth.is_admin());
}

#[test]
fn signup_defaults_first_name() {
    let (_, auth) = setup();
    auth.signup(SignupInput {
        email: "someone@example.com".to_string(),
        ..Default::default()
    })
    .unwrap();

    let user = auth.get_user().unwrap();
    assert_eq!(user.first_name, "User");
    assert_eq!(user.last_name, "");
}

#[test]
fn signup_rejects_the_reserved_admin_email() {
    let (_, auth) = setup();
    let err = auth
        .signup(SignupInput {
            email: "admin@gmail.com".to_string(),
            ..Default::default()
        })
        .unwrap_err();

    assert!(matches!(err, StoreError::ReservedEmail(_)));
    assert!(auth.get_user().is_none());
}

#[test]
fn admin_login_requires_the_fixed_credential_pair() {
    let (_, auth) = setup();
    let user = auth.login("admin@gmail.com", "admin123").unwrap();

    assert_eq!(user.role, Role::Admin);
    assert_eq!(user.id, ProfileId::Text("admin_001".to_string()));
    assert!(auth.is_admin());
    assert_eq!(auth.get_initials(), "AU");
}

#[test]
fn admin_email_with_wrong_password_falls_back_to_donor() {
    let (_, auth) = setup();
    let user = auth.login("admin@gmail.com", "nope").unwrap();

    assert_eq!(user.role, Role::Donor);
    assert!(!auth.is_admin());
}

#[test]
fn login_reuses_the_stored_profile_for_a_matching_email() {
    let (_, auth) = setup();
    signup(&auth, "Asha", "Rao", "asha@example.com");

    let user = auth.login("asha@example.com", "whatever").unwrap();
    assert_eq!(user.first_name, "Asha");
    assert_eq!(user.last_name, "Rao");
}

#[test]
fn login_fabricates_a_donor_profile_from_the_email() {
    let (_, auth) = setup();
    let user = auth.login("ravi@example.com", "whatever").unwrap();

    assert_eq!(user.first_name, "ravi");
    assert_eq!(user.last_name, "");
    assert_eq!(user.role, Role::Donor);
    assert_eq!(auth.get_display_name(), "ravi");
}

#[test]
fn logout_clears_the_profile() {
    let (_, auth) = setup();
    signup(&auth, "Asha", "Rao", "asha@example.com");

    auth.logout();

    assert!(auth.get_user().is_none());
    assert!(!auth.is_authenticated());
    assert_eq!(auth.get_initials(), "G");
}

#[test]
fn initials_fall_back_to_u_when_both_names_are_empty() {
    let (storage, auth) = setup();
    storage
        .set(
            StorageKey::AuthUser.as_str(),
            r#"{"id":1,"firstName":"","lastName":"","email":"x@example.com","role":"donor","createdAt":"2026-01-01T00:00:00.000Z","isAuthenticated":true}"#,
        )
        .unwrap();

    assert_eq!(auth.get_initials(), "U");
    assert_eq!(auth.get_display_name(), "x");
}

#[test]
fn corrupt_profile_reads_as_signed_out() {
    let (storage, auth) = setup();
    storage
        .set(StorageKey::AuthUser.as_str(), "not a profile")
        .unwrap();

    assert!(auth.get_user().is_none());
    assert!(!auth.is_authenticated());
    assert_eq!(auth.get_initials(), "G");
}
