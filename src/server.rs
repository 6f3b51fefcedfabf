//! Server runtime
//!
//! [`ServerHandle`] owns the full lifecycle: metrics recorder, database and
//! migrations, service wiring, the REST API listener and graceful shutdown.

use std::sync::{Arc, OnceLock};
use std::time::Instant;

use chrono::Duration;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use mockable::{Clock, DefaultClock};
use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};

use crate::application::{BarbershopService, BookingService, CatalogService, UserService};
use crate::config::AppConfig;
use crate::domain::{Mailer, ObjectStore, RepositoryProvider};
use crate::infrastructure::{
    init_database, run_migrations, LoggingMailer, LoggingObjectStore, SeaOrmRepositoryProvider,
};
use crate::interfaces::http::middleware::AuthState;
use crate::interfaces::{create_api_router, AppState};
use crate::shared::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
        }
    }
}

/// Outbound adapters the services are built on
#[derive(Clone)]
pub struct Adapters {
    pub objects: Arc<dyn ObjectStore>,
    pub mailer: Arc<dyn Mailer>,
    pub clock: Arc<dyn Clock + Send + Sync>,
}

impl Adapters {
    /// Logging adapters and the system clock, with the configured upload prefix
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            objects: Arc::new(LoggingObjectStore::new(
                config.storage.public_base_url.clone(),
            )),
            mailer: Arc::new(LoggingMailer),
            clock: Arc::new(DefaultClock),
        }
    }
}

/// Process-wide Prometheus handle.
///
/// The global recorder can be installed once per process; later calls reuse
/// it. If another recorder already owns the slot, a detached one is used so
/// `/metrics` still renders.
pub fn prometheus_handle() -> PrometheusHandle {
    static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
    HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                info!("Prometheus metrics recorder installed");
                handle
            }
            Err(e) => {
                warn!("Prometheus recorder not installed: {}", e);
                PrometheusBuilder::new().build_recorder().handle()
            }
        })
        .clone()
}

/// Wire repositories and services over an open, migrated connection.
pub fn build_app_state(
    db: DatabaseConnection,
    config: &AppConfig,
    adapters: Adapters,
    prometheus: PrometheusHandle,
) -> AppState {
    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
    let jwt_config = config.jwt_config();

    let user_service = UserService::new(
        repos.clone(),
        adapters.objects.clone(),
        adapters.mailer.clone(),
        adapters.clock.clone(),
        jwt_config.clone(),
    )
    .with_reset_ttl(Duration::minutes(config.security.password_reset_ttl_minutes));

    AppState {
        auth: AuthState { jwt_config },
        user_service: Arc::new(user_service),
        barbershop_service: Arc::new(BarbershopService::new(
            repos.clone(),
            adapters.objects.clone(),
        )),
        catalog_service: Arc::new(CatalogService::new(repos.clone(), adapters.objects)),
        booking_service: Arc::new(BookingService::new(repos, adapters.clock)),
        db,
        started_at: Arc::new(Instant::now()),
        prometheus,
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

pub struct ServerHandle {
    pub config: AppConfig,
    /// Port actually bound (differs from the config when it asked for 0).
    pub api_port: u16,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let adapters = Adapters::from_config(&opts.config);
        Self::start_with(opts, adapters).await
    }

    pub async fn start_with(
        opts: ServerOptions,
        adapters: Adapters,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        app_cfg.validate()?;

        info!("Starting barbershop booking service...");
        let prometheus = prometheus_handle();

        let db = init_database(&app_cfg.database_config()).await?;
        if opts.auto_migrate {
            run_migrations(&db).await?;
        }

        info!(
            "JWT configured with {}h token expiration",
            app_cfg.security.jwt_expiration_hours
        );
        let router = create_api_router(build_app_state(
            db.clone(),
            &app_cfg,
            adapters,
            prometheus,
        ));

        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let listener = tokio::net::TcpListener::bind(app_cfg.api_address()).await?;
        let local = listener.local_addr()?;
        info!("REST API listening on http://{}", local);
        info!("Swagger UI available at http://{}/docs/", local);

        let api_shutdown = shutdown.signal();
        let api_task = tokio::spawn(async move {
            let served = axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    api_shutdown.wait().await;
                    info!("REST API received shutdown signal");
                })
                .await;
            if let Err(e) = served {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            config: app_cfg,
            api_port: local.port(),
            db,
            shutdown,
            api_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the listener to drain, bounded by the shutdown timeout, then
    /// close the database.
    pub async fn wait(self) {
        let timeout = std::time::Duration::from_secs(self.shutdown.timeout_secs());
        match tokio::time::timeout(timeout, self.api_task).await {
            Ok(Ok(())) => info!("REST API server stopped"),
            Ok(Err(e)) => error!("REST API task panicked: {}", e),
            Err(_) => warn!("REST API did not stop within {:?}", timeout),
        }

        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }
        info!("Shutdown complete");
    }

    pub async fn shutdown(self) {
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// Initialize tracing from the logging section; `RUST_LOG` wins over the
/// configured level.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    let registry = tracing_subscriber::registry().with(env_filter);
    let installed = match config.logging.format.to_lowercase().as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        _ => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    };
    if installed.is_err() {
        warn!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starts_on_ephemeral_port_and_shuts_down() {
        let mut config = AppConfig::default();
        config.server.api_host = "127.0.0.1".to_string();
        config.server.api_port = 0;
        config.server.shutdown_timeout = 5;
        config.database.url = "sqlite::memory:".to_string();
        config.database.max_connections = 1;

        let handle = ServerHandle::start(ServerOptions {
            config,
            auto_migrate: true,
        })
        .await
        .unwrap();
        assert_ne!(handle.api_port, 0);
        assert!(handle.is_running());

        handle.shutdown().await;
    }
}
