//! Appointment server
//!
//! Loads `AGENDA_CONFIG` (a YAML file) when set, applies `HOST`, `PORT` and
//! `MONGODB_URI` from the environment, then serves the appointment API.
//!
//! ```bash
//! cargo run --example server
//! AGENDA_CONFIG=agenda.yaml cargo run --example server --features mongodb_backend
//! ```

use agenda::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = match std::env::var("AGENDA_CONFIG") {
        Ok(path) => AppConfig::from_yaml_file(&path)?,
        Err(_) => AppConfig::default(),
    }
    .with_env_overrides()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let builder = match config.storage.backend {
        StorageBackend::InMemory => {
            tracing::info!("Using in-memory storage");
            ServerBuilder::new().with_data_service(InMemoryDataService::<Appointment>::new())
        }
        StorageBackend::Mongodb => mongo_builder(&config.storage).await?,
    };

    let addr = config.bind_address();
    println!("\n🚀 Agendamento Identidade API on http://{}", addr);
    println!("\n  📋 Appointment routes:");
    println!("    POST   /api/appointments                  - Book an appointment");
    println!("    GET    /api/appointments                  - List (search, status, page, limit)");
    println!("    GET    /api/appointments/upcoming         - Next `days` days (default 7)");
    println!("    GET    /api/appointments/{{id}}             - Get one appointment");
    println!("    PATCH  /api/appointments/{{id}}/confirm     - Confirm");
    println!("    PATCH  /api/appointments/{{id}}/cancel      - Cancel (optional reason)");
    println!("    PATCH  /api/appointments/{{id}}/complete    - Mark as completed");
    println!("\n  💚 GET /health\n");

    builder.with_config(config).serve(&addr).await
}

#[cfg(feature = "mongodb_backend")]
async fn mongo_builder(storage: &StorageConfig) -> Result<ServerBuilder> {
    let service = MongoDataService::<Appointment>::connect(&storage.uri, &storage.database).await?;
    service.ensure_indexes().await?;

    tracing::info!(database = %storage.database, "Using MongoDB storage");
    Ok(ServerBuilder::new().with_data_service(service))
}

#[cfg(not(feature = "mongodb_backend"))]
async fn mongo_builder(_storage: &StorageConfig) -> Result<ServerBuilder> {
    anyhow::bail!("MongoDB storage requires the `mongodb_backend` feature")
}
