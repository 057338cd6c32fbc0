use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{http::header, web, App, HttpServer};
use dotenvy::dotenv;
use std::io;
use tracing::{error, info};
use tracing_actix_web::TracingLogger;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use pefi::config::ApiConfig;
use pefi::{db, openapi, routes};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();

    // Initialize tracing subscriber for structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ApiConfig::from_env().map_err(|e| {
        error!("Invalid configuration: {e}");
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let pool = db::connect(&config.database_url).await.map_err(|e| {
        error!("Failed to open database: {e}");
        io::Error::other(e.to_string())
    })?;

    // ~1 request per second sustained with a burst of 60
    let governor_config = GovernorConfigBuilder::default()
        .seconds_per_request(1)
        .burst_size(60)
        .finish()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "invalid rate limit"))?;

    info!("Starting API server at http://{}:{}", config.host, config.port);

    let bind_addr = (config.host.clone(), config.port);
    let allowed_origins = config.allowed_origins.clone();
    let api_key = config.api_key.clone();

    HttpServer::new(move || {
        let allowed_origins = allowed_origins.clone();

        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _req_head| {
                let origin_str = origin.to_str().unwrap_or("");
                allowed_origins.iter().any(|allowed| allowed == origin_str)
            })
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
            .supports_credentials()
            .max_age(600);

        App::new()
            // Middleware (order matters: outer to inner)
            .wrap(TracingLogger::default())
            .wrap(cors)
            // Shared state
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(api_key.clone()))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
            )
            .service(routes::health_check)
            // API endpoints with rate limiting (must be last to avoid catching all routes)
            .service(
                web::scope("")
                    .wrap(Governor::new(&governor_config))
                    .configure(routes::configure_api),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
