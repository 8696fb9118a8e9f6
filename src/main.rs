//! Evently HTTP server
//!
//! Reads configuration from environment variables (optionally via `.env`),
//! connects to the database, runs migrations and serves the REST API.

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use evently::infrastructure::database::migrator::Migrator;
use evently::notifications::mailer::{Mailer, SmtpMailer};
use evently::{create_api_router, init_database, AppConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    info!("Starting Evently event-management service...");

    let db = match init_database(&config.database).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // Seed an admin account if the user table is empty
    create_default_admin(&db).await;

    let mailer: Arc<dyn Mailer> = Arc::new(SmtpMailer::new(config.email.clone()));
    let router = create_api_router(db.clone(), config.jwt.clone(), mailer);

    let listener = tokio::net::TcpListener::bind(config.address()).await?;
    info!("REST API server listening on http://{}", config.address());
    info!("Swagger UI available at http://{}/docs/", config.address());

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("Evently shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}

/// Create a default admin user when the store is empty and credentials are
/// configured. Without one the admin surface would be unreachable, since
/// signup only issues `user` roles.
async fn create_default_admin(db: &sea_orm::DatabaseConnection) {
    use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};

    use evently::auth::password::hash_password;
    use evently::infrastructure::database::entities::user::{self, UserRole};

    let users_count = user::Entity::find().count(db).await.unwrap_or(0);
    if users_count > 0 {
        return;
    }

    let (Ok(email), Ok(password)) = (
        std::env::var("ADMIN_EMAIL"),
        std::env::var("ADMIN_PASSWORD"),
    ) else {
        warn!("No users exist and ADMIN_EMAIL/ADMIN_PASSWORD are not set; admin routes will be unreachable");
        return;
    };

    info!("Creating default admin user...");
    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Failed to hash admin password: {}", e);
            return;
        }
    };

    let admin = user::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        name: Set(std::env::var("ADMIN_NAME").unwrap_or_else(|_| "Administrator".to_string())),
        email: Set(email.trim().to_lowercase()),
        password_hash: Set(password_hash),
        role: Set(UserRole::Admin),
        created_at: Set(chrono::Utc::now()),
    };

    match admin.insert(db).await {
        Ok(admin) => {
            info!("Default admin created: {}", admin.email);
            info!("Please change the admin password immediately!");
        }
        Err(e) => {
            error!("Failed to create admin user: {}", e);
        }
    }
}
