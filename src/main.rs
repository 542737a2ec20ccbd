use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use std::sync::Arc;
use tinysteps::config::{LoggingSettings, Settings};
use tinysteps::core::{Catalog, DraftStore};
use tinysteps::routes::{self, AppState, handle_path_error, handle_query_payload_error};
use tinysteps::services::PostgresClient;
use tracing::{info, error, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "compact" => subscriber.compact().init(),
        _ => subscriber.json().init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    init_logging(&settings.logging);

    info!("Starting TinySteps booking service...");

    // A partially loaded catalog must never serve traffic
    let catalog = Catalog::load(&settings.data.goals_path, &settings.data.tutors_path)
        .map_err(|e| {
            error!("Failed to load catalog: {}", e);
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
    let catalog = Arc::new(catalog);

    let drafts = Arc::new(DraftStore::new(&settings.data.draft_path));
    info!("Booking draft stored at {}", settings.data.draft_path);

    // PostgreSQL is optional: without it bookings live only in the draft file
    let ledger = match &settings.database.url {
        Some(url) => {
            let postgres = PostgresClient::from_settings(
                url,
                settings.database.max_connections,
                settings.database.min_connections,
                settings.database.acquire_timeout_secs,
            )
            .await
            .map_err(|e| {
                error!("Failed to connect to PostgreSQL: {}", e);
                std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
            })?;

            if let Err(e) = postgres.mirror_catalog(&catalog).await {
                warn!("Catalog mirror failed, continuing with file catalog: {}", e);
            }

            Some(Arc::new(postgres))
        }
        None => {
            info!("No database configured, booking ledger disabled");
            None
        }
    };

    let app_state = AppState {
        catalog,
        drafts,
        ledger,
        sample_size: settings.landing.sample_size,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .app_data(web::PathConfig::default().error_handler(handle_path_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
