use std::path::PathBuf;
use std::sync::Arc;

use authkit::auth::{LoginRequest, ProfileUpdate, RegisterRequest};
use authkit::config::{AppConfig, DemoConfig, LatencyConfig};
use authkit::storage::{CredentialStore, FileStore};
use authkit::{AppState, AuthError};

fn test_config() -> Arc<AppConfig> {
    Arc::new(AppConfig {
        store_path: None,
        demo: DemoConfig {
            email: "demo@example.com".into(),
            password: "password123".into(),
        },
        latency: LatencyConfig {
            auth_ms: 0,
            logout_ms: 0,
        },
    })
}

fn temp_store_path(test: &str) -> PathBuf {
    std::env::temp_dir().join(format!("authkit-flow-{}-{}.json", test, std::process::id()))
}

#[tokio::test]
async fn full_account_lifecycle() {
    let state = AppState::fake();

    let registered = state
        .auth
        .register(RegisterRequest {
            name: "Ada Lovelace".into(),
            email: "Ada@Example.com".into(),
            password: "Analytic4l".into(),
        })
        .await
        .expect("register");
    assert_eq!(registered.email, "ada@example.com");
    assert!(!registered.email_verified);

    let logged_in = state
        .auth
        .login(LoginRequest {
            email: "ada@example.com".into(),
            password: "Analytic4l".into(),
        })
        .await
        .expect("login");
    assert_eq!(logged_in, registered);

    let updated = state
        .auth
        .update_profile(
            "ada@example.com",
            ProfileUpdate {
                name: Some("Countess Lovelace".into()),
                avatar: None,
            },
        )
        .await
        .expect("update profile");
    assert_eq!(updated.name, "Countess Lovelace");
    assert!(updated.updated_at > logged_in.updated_at);

    state.auth.logout().await.expect("logout");
    assert!(state.auth.get_current_user().await.unwrap().is_none());

    // A fresh login after logout still reaches the stored record.
    let again = state
        .auth
        .login(LoginRequest {
            email: "ada@example.com".into(),
            password: "Analytic4l".into(),
        })
        .await
        .expect("login after logout");
    assert_eq!(again.name, "Countess Lovelace");
}

#[tokio::test]
async fn accounts_survive_a_file_backed_restart() {
    let path = temp_store_path("restart");
    let _ = tokio::fs::remove_file(&path).await;

    {
        let store: Arc<dyn CredentialStore> =
            Arc::new(FileStore::open(&path).await.expect("open store"));
        let state = AppState::from_parts(test_config(), store).expect("state");
        state
            .auth
            .register(RegisterRequest {
                name: "Grace Hopper".into(),
                email: "grace@example.com".into(),
                password: "C0mpilers!".into(),
            })
            .await
            .expect("register");
    }

    // Reopen the same file, as a process restart would.
    let store: Arc<dyn CredentialStore> =
        Arc::new(FileStore::open(&path).await.expect("reopen store"));
    let state = AppState::from_parts(test_config(), store).expect("state");

    let user = state
        .auth
        .login(LoginRequest {
            email: "grace@example.com".into(),
            password: "C0mpilers!".into(),
        })
        .await
        .expect("login after restart");
    assert_eq!(user.name, "Grace Hopper");

    let err = state
        .auth
        .login(LoginRequest {
            email: "grace@example.com".into(),
            password: "wrong-password".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));

    tokio::fs::remove_file(&path).await.unwrap();
}

#[tokio::test]
async fn store_clear_removes_registered_accounts() {
    let state = AppState::fake();

    state
        .auth
        .register(RegisterRequest {
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            password: "Abcdef12".into(),
        })
        .await
        .expect("register");

    state.store.clear().await.expect("clear");

    let err = state
        .auth
        .login(LoginRequest {
            email: "jane@example.com".into(),
            password: "Abcdef12".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));

    // The seed account is independent of the persistent store.
    state
        .auth
        .login(LoginRequest {
            email: "demo@example.com".into(),
            password: "password123".into(),
        })
        .await
        .expect("demo login after clear");
}
