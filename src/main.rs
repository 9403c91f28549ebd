use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use suin_recommender::config::Settings;
use suin_recommender::routes::{self, AppState};
use suin_recommender::{ModelRegistry, Recommender};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    // Initialize logging; LOG_LEVEL and LOG_FORMAT override the config file
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting SUIN recommendation service...");

    let registry = ModelRegistry::with_defaults();
    info!("Scoring models available: {:?}", registry.names());

    let recommender = Recommender::new(registry, &settings.ranking);

    info!(
        "Recommender initialized (top {}, failure policy {:?}, user location {:?})",
        settings.ranking.top_n,
        settings.ranking.failure_policy,
        settings.ranking.user_location
    );

    let app_state = AppState { recommender };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);
    let json_limit = settings.server.json_limit;

    info!("Starting HTTP server on {}:{} (JSON body limit {} bytes)", host, port, json_limit);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config(json_limit))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
