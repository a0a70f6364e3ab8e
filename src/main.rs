use std::future::IntoFuture;
use std::sync::Arc;

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tokio::sync::Notify;
use tracing::{error, info, warn};

use gatehouse::logging::init_tracing;
use gatehouse::metrics::{init_metrics, metrics_router};
use gatehouse::modules::users::service::UserService;
use gatehouse::router::init_router;
use gatehouse::state::AppState;
use gatehouse_auth::{KeyMaterial, TokenService};
use gatehouse_config::{AdminConfig, AuthConfig, DatabaseConfig, ServerConfig};
use gatehouse_db::{MemoryUserRepository, PgUserRepository, UserRepository, init_db_pool};

#[derive(Parser)]
#[command(name = "gatehouse")]
#[command(about = "Gatehouse - token-authenticated HTTP API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve,
    /// Print a fresh base64 Ed25519 keypair for JWT_PUBLIC_KEY / JWT_PRIVATE_KEY
    GenerateKeys,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    match Cli::parse().command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve().await,
        Commands::GenerateKeys => generate_keys(),
    }
}

fn generate_keys() -> anyhow::Result<()> {
    let keys = KeyMaterial::generate().context("failed to generate keypair")?;
    println!("JWT_PUBLIC_KEY={}", keys.public_key);
    println!("JWT_PRIVATE_KEY={}", keys.private_key);
    Ok(())
}

async fn serve() -> anyhow::Result<()> {
    init_tracing();

    let server_config = ServerConfig::from_env();
    let auth_config = AuthConfig::from_env();
    let admin_config = AdminConfig::from_env();
    let database_config = DatabaseConfig::from_env();

    let keys = KeyMaterial::from_config(&auth_config).map_err(|e| {
        error!(error = %e, "invalid JWT key material");
        anyhow!(e).context("invalid JWT key material")
    })?;
    let tokens = TokenService::new(keys, &auth_config);

    let users = init_user_store(&database_config).await?;

    UserService::init_admin(users.as_ref(), &admin_config)
        .await
        .map_err(|e| anyhow!("admin bootstrap failed: {}", e))?;

    let state = AppState::new(
        users,
        tokens,
        auth_config.identity_lookup_timeout(),
        &server_config.facility,
    );
    let mut app = init_router(state);
    if server_config.metrics_enabled {
        let handle = init_metrics()?;
        app = app.merge(metrics_router(handle));
        info!("metrics available on /metrics");
    }

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;
    info!(address = %address, facility = %server_config.facility, "server listening");

    let shutdown = Arc::new(Notify::new());
    let trigger = shutdown.clone();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        trigger.notify_one();
    })
    .into_future();

    let grace = server_config.shutdown_grace();
    tokio::select! {
        result = server => result.context("server error")?,
        _ = async {
            shutdown.notified().await;
            tokio::time::sleep(grace).await;
        } => warn!(grace_secs = grace.as_secs(), "shutdown grace period elapsed, dropping connections"),
    }

    info!("server stopped");
    Ok(())
}

async fn init_user_store(config: &DatabaseConfig) -> anyhow::Result<Arc<dyn UserRepository>> {
    match &config.url {
        Some(url) => {
            let pool = init_db_pool(url, config.max_connections)
                .await
                .context("failed to connect to database")?;
            let repository = PgUserRepository::new(pool);
            repository
                .migrate()
                .await
                .context("failed to run migrations")?;
            info!("using postgres user store");
            Ok(Arc::new(repository))
        }
        None => {
            warn!("DATABASE_URL not set, using in-memory user store");
            Ok(Arc::new(MemoryUserRepository::new()))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received, draining in-flight requests");
}
