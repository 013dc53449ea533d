use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use axum::Router;
use rental_service::access::guard::AccessGuard;
use rental_service::config::AdminConfig;
use rental_service::config::Config;
use rental_service::config::StorageBackend;
use rental_service::identity::errors::IdentityError;
use rental_service::identity::models::CreateAdminCommand;
use rental_service::identity::ports::AuthServicePort;
use rental_service::identity::ports::CredentialStore;
use rental_service::identity::service::AuthService;
use rental_service::inbound::http::router::access_policies;
use rental_service::inbound::http::router::create_router;
use rental_service::inbound::http::router::AppState;
use rental_service::repositories::identity::PostgresCredentialStore;
use rental_service::repositories::memory::InMemoryCredentialStore;
use rental_service::repositories::memory::InMemoryRoomRepository;
use rental_service::repositories::room::PostgresRoomRepository;
use rental_service::room::ports::RoomRepository;
use rental_service::room::service::RoomService;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rental_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "rental-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        storage = ?config.database.backend,
        http_port = config.server.http_port,
        token_validity_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let hasher = PasswordHasher::with_cost(config.password.into())?;
    let authenticator = Arc::new(Authenticator::new(
        hasher,
        config.jwt.secret.as_bytes(),
        config.jwt.validity()?,
    ));

    let application = match config.database.backend {
        StorageBackend::Postgres => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&config.database.url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            build_application(
                &config,
                authenticator,
                Arc::new(PostgresCredentialStore::new(pg_pool.clone())),
                Arc::new(PostgresRoomRepository::new(pg_pool)),
            )
            .await?
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on shutdown");

            build_application(
                &config,
                authenticator,
                Arc::new(InMemoryCredentialStore::new()),
                Arc::new(InMemoryRoomRepository::new()),
            )
            .await?
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, application).await?;

    Ok(())
}

async fn build_application<CS, R>(
    config: &Config,
    authenticator: Arc<Authenticator>,
    store: Arc<CS>,
    rooms: Arc<R>,
) -> Result<Router, anyhow::Error>
where
    CS: CredentialStore,
    R: RoomRepository,
{
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&store),
        Arc::clone(&authenticator),
        config.registration.clone().into(),
    ));
    let room_service = Arc::new(RoomService::new(rooms));
    let access_guard = Arc::new(AccessGuard::new(store, authenticator, access_policies()));

    if let Some(admin) = &config.admin {
        seed_admin(auth_service.as_ref(), admin).await?;
    }

    Ok(create_router(AppState {
        auth_service,
        room_service,
        access_guard,
    }))
}

async fn seed_admin(
    auth_service: &dyn AuthServicePort,
    admin: &AdminConfig,
) -> Result<(), anyhow::Error> {
    let command = CreateAdminCommand {
        full_name: admin.full_name.clone(),
        email: admin.email.clone(),
        password: admin.password.clone(),
    };

    match auth_service.create_admin(command).await {
        Ok(profile) => {
            tracing::info!(identity_id = %profile.id, "Seed admin created");
            Ok(())
        }
        Err(IdentityError::EmailTaken) => {
            tracing::debug!("Seed admin already present");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
