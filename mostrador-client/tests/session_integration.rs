//! Session lifecycle against a mock backend

mod common;

use std::sync::Arc;

use common::{MockBackend, EMAIL, PASSWORD};
use mostrador_client::{
    AuthApi, CatalogApi, ClientConfig, ClientError, FileTokenStore, HttpClient, MemoryTokenStore,
    RegisterRequest, SessionStore, TokenStore,
};
use serde_json::json;
use tempfile::TempDir;

fn http(base_url: &str, store: Arc<dyn TokenStore>) -> HttpClient {
    HttpClient::new(&ClientConfig::new(base_url).with_timeout(5), store)
}

#[tokio::test]
async fn test_restore_with_valid_token() {
    let backend = MockBackend::spawn().await;
    let dir = TempDir::new().unwrap();
    let store = FileTokenStore::new(dir.path().join("token"));
    store.save(&backend.valid_token()).unwrap();

    let session = SessionStore::new(http(&backend.base_url, Arc::new(store)));
    session.restore().await;

    assert!(session.is_authenticated());
    assert_eq!(session.user().unwrap().email, EMAIL);
    assert_eq!(session.token().unwrap(), backend.valid_token());
    // default fixture profile is a seller
    assert!(!session.is_admin());
}

#[tokio::test]
async fn test_restore_with_expired_token_clears_it() {
    let backend = MockBackend::spawn().await;
    let dir = TempDir::new().unwrap();
    let store = FileTokenStore::new(dir.path().join("token"));
    store.save("stale-token").unwrap();

    let session = SessionStore::new(http(&backend.base_url, Arc::new(store.clone())));
    session.restore().await;

    assert!(!session.is_authenticated());
    assert!(session.user().is_none());
    // the persisted token was cleared, not just ignored
    assert!(store.load().is_none());
}

#[tokio::test]
async fn test_restore_without_token_is_silent() {
    let backend = MockBackend::spawn().await;
    let dir = TempDir::new().unwrap();
    let store = FileTokenStore::new(dir.path().join("token"));

    let session = SessionStore::new(http(&backend.base_url, Arc::new(store)));
    session.restore().await;

    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_sign_in_persists_token_once() {
    let backend = MockBackend::spawn().await;
    let store = Arc::new(MemoryTokenStore::new());
    let session = SessionStore::new(http(&backend.base_url, Arc::clone(&store) as Arc<dyn TokenStore>));

    let user = session.sign_in(EMAIL, PASSWORD).await.unwrap();
    assert_eq!(user.email, EMAIL);
    assert!(session.is_authenticated());
    assert_eq!(store.load().unwrap(), backend.valid_token());
    assert!(session.logged_in_at().is_some());
}

#[tokio::test]
async fn test_sign_in_bad_credentials() {
    let backend = MockBackend::spawn().await;
    let store = Arc::new(MemoryTokenStore::new());
    let session = SessionStore::new(http(&backend.base_url, Arc::clone(&store) as Arc<dyn TokenStore>));

    let err = session.sign_in(EMAIL, "wrong-password").await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));
    assert!(!session.is_authenticated());
    assert!(store.load().is_none());
}

#[tokio::test]
async fn test_login_failure_leaves_prior_session_untouched() {
    let backend = MockBackend::spawn().await;
    let store = Arc::new(MemoryTokenStore::new());
    let session = SessionStore::new(http(&backend.base_url, Arc::clone(&store) as Arc<dyn TokenStore>));

    session.sign_in(EMAIL, PASSWORD).await.unwrap();
    let token_before = session.token().unwrap();

    // a bad candidate token must not clobber the live session
    let err = session.login("bogus-token").await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));
    assert!(session.is_authenticated());
    assert_eq!(session.token().unwrap(), token_before);
    assert_eq!(store.load().unwrap(), token_before);
}

#[tokio::test]
async fn test_is_admin_for_admin_profile() {
    let backend = MockBackend::spawn().await;
    backend.set_profile(json!({
        "id": "u2",
        "name": "Root",
        "email": "root@example.com",
        "role": "admin",
    }));

    let store = Arc::new(MemoryTokenStore::new());
    let session = SessionStore::new(http(&backend.base_url, store));
    session.sign_in(EMAIL, PASSWORD).await.unwrap();

    assert!(session.is_admin());
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let backend = MockBackend::spawn().await;
    let store = Arc::new(MemoryTokenStore::new());
    let session = SessionStore::new(http(&backend.base_url, Arc::clone(&store) as Arc<dyn TokenStore>));

    session.sign_in(EMAIL, PASSWORD).await.unwrap();
    assert!(session.is_authenticated());

    session.logout();
    assert!(!session.is_authenticated());
    assert!(session.token().is_none());
    assert!(store.load().is_none());

    session.logout();
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_register_validation_fails_before_the_wire() {
    let backend = MockBackend::spawn().await;
    let auth = AuthApi::new(http(&backend.base_url, Arc::new(MemoryTokenStore::new())));

    // the mock has no register route, so a request that reached it
    // would come back as a 404 backend error instead
    let err = auth
        .register(&RegisterRequest {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "secret123".to_string(),
            confirm_password: "different".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
}

#[tokio::test]
async fn test_401_anywhere_invalidates_session() {
    let backend = MockBackend::spawn().await;
    let store = Arc::new(MemoryTokenStore::new());
    let client = http(&backend.base_url, Arc::clone(&store) as Arc<dyn TokenStore>);
    let session = SessionStore::new(client.clone());
    let catalog = CatalogApi::new(client);

    session.sign_in(EMAIL, PASSWORD).await.unwrap();
    assert!(session.is_authenticated());

    // backend stops accepting the session's token (expiry/revocation)
    backend.rotate_token("rotated-token");

    let err = catalog.products().await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));

    // any 401 invalidates the whole local session
    assert!(!session.is_authenticated());
    assert!(session.token().is_none());
    assert!(store.load().is_none());
}
