use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use bg3_connector::config::Settings;
use bg3_connector::core::Matcher;
use bg3_connector::routes::{self, AppState};
use bg3_connector::{services, telemetry};
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load()?;

    telemetry::init_tracing(&settings.logging)
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    info!("Starting BG3 Connector matchmaking service...");

    let store = services::connect_store(&settings.storage).await?;

    info!("Preference store initialized ({} backend)", store.backend_name());

    let weights = settings.scoring_weights();
    let matcher = Matcher::new(weights);

    info!("Matcher initialized with weights: {:?}", weights);

    let app_state = AppState {
        store,
        matcher,
        matching: settings.matching.clone(),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .configure(routes::configure_extractors)
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await?;

    Ok(())
}
