use authkit::auth::LoginRequest;
use authkit::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "authkit=debug".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let state = AppState::init().await?;
    tracing::info!(
        demo_email = %state.config.demo.email,
        file_backed = state.config.store_path.is_some(),
        "auth core ready"
    );

    // Walk the mock flow once as a smoke check.
    let user = state
        .auth
        .login(LoginRequest {
            email: state.config.demo.email.clone(),
            password: state.config.demo.password.clone(),
        })
        .await?;
    tracing::info!(user_id = %user.id, name = %user.name, "demo login succeeded");

    let session = state.auth.get_current_user().await?;
    tracing::info!(persistent_session = session.is_some(), "current user probed");

    state.auth.logout().await?;
    tracing::info!("demo logout complete");

    Ok(())
}
