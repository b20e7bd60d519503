use super::*;
use crate::session::{FileStore, MemoryStore};
use crate::test_support::{MockBackend, anonymous_client, owner_session};
use serde_json::json;

fn credentials() -> Credentials {
    Credentials::new("owner@shop.test", "hunter2")
}

#[test]
fn restore_picks_up_persisted_session() {
    let holder = AuthHolder::restore(MemoryStore::seeded(owner_session())).unwrap();
    assert_eq!(holder.current(), Some(&owner_session()));
    assert!(holder.is_shop_owner());
    assert!(holder.require_shop_owner().is_ok());
}

#[test]
fn empty_store_restores_nothing() {
    let holder = AuthHolder::restore(MemoryStore::default()).unwrap();
    assert!(holder.current().is_none());
    assert!(matches!(holder.require_shop_owner(), Err(DashboardError::NotLoggedIn)));
}

#[test]
fn restored_non_owner_is_refused() {
    let session = Session { role: "CUSTOMER".into(), ..owner_session() };
    let holder = AuthHolder::restore(MemoryStore::seeded(session)).unwrap();
    assert!(!holder.is_shop_owner());
    assert!(matches!(holder.require_shop_owner(), Err(DashboardError::NotShopOwner { .. })));
}

#[tokio::test]
async fn login_persists_shop_owner_session() {
    let backend = MockBackend::new();
    backend.on("POST", "/login", 200, json!({"access_token": "tok-9", "user_id": 9, "role": "SHOP_OWNER"}));
    let url = backend.start().await;

    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("session.json"));
    let mut holder = AuthHolder::restore(store.clone()).unwrap();

    let session = holder.login(&anonymous_client(&url), &credentials()).await.unwrap();
    assert_eq!(session, Session { token: "tok-9".into(), id: "9".into(), role: "SHOP_OWNER".into() });
    assert_eq!(holder.current(), Some(&session));
    assert_eq!(store.load().unwrap(), Some(session));
}

#[tokio::test]
async fn login_with_other_role_stores_nothing() {
    let backend = MockBackend::new();
    backend.on("POST", "/login", 200, json!({"access_token": "tok-c", "user_id": 3, "role": "CUSTOMER"}));
    let url = backend.start().await;

    let store = MemoryStore::default();
    let mut holder = AuthHolder::restore(store.clone()).unwrap();

    let err = holder.login(&anonymous_client(&url), &credentials()).await.unwrap_err();
    match err {
        DashboardError::NotShopOwner { role } => assert_eq!(role, "CUSTOMER"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(holder.current().is_none());
    assert_eq!(store.load().unwrap(), None);
}

#[tokio::test]
async fn login_without_role_is_not_shop_owner() {
    let backend = MockBackend::new();
    backend.on("POST", "/login", 200, json!({"access_token": "tok", "user_id": "u-1"}));
    let url = backend.start().await;

    let mut holder = AuthHolder::restore(MemoryStore::default()).unwrap();
    let err = holder.login(&anonymous_client(&url), &credentials()).await.unwrap_err();
    assert!(matches!(err, DashboardError::NotShopOwner { .. }));
}

#[tokio::test]
async fn failed_login_keeps_previous_session() {
    let backend = MockBackend::new();
    backend.on("POST", "/login", 401, json!({"detail": "Incorrect username or password"}));
    let url = backend.start().await;

    let store = MemoryStore::seeded(owner_session());
    let mut holder = AuthHolder::restore(store.clone()).unwrap();
    let err = holder.login(&anonymous_client(&url), &credentials()).await.unwrap_err();

    assert!(matches!(err, DashboardError::InvalidCredentials { .. }));
    assert_eq!(holder.current(), Some(&owner_session()));
    assert_eq!(store.load().unwrap(), Some(owner_session()));
}

#[test]
fn logout_clears_memory_and_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("session.json"));
    store.save(&owner_session()).unwrap();

    let mut holder = AuthHolder::restore(store.clone()).unwrap();
    holder.logout().unwrap();

    assert!(holder.current().is_none());
    assert_eq!(store.load().unwrap(), None);
    assert!(!store.path().exists());
}

#[test]
fn session_from_login_maps_fields() {
    let response = LoginResponse { access_token: "t".into(), user_id: "1".into(), role: Some("SHOP_OWNER".into()) };
    let session = session_from_login(response).unwrap();
    assert_eq!(session.token, "t");
    assert!(session.is_shop_owner());
}

#[test]
fn credentials_debug_hides_password() {
    let debug = format!("{:?}", credentials());
    assert!(!debug.contains("hunter2"));
}
