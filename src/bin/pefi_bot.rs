use actix_web::{web, App, HttpServer};
use dotenvy::dotenv;
use std::io;
use tracing::{error, info};
use tracing_actix_web::TracingLogger;

use pefi::config::BotConfig;
use pefi::relay::{self, Relay};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = BotConfig::from_env().map_err(|e| {
        error!("Invalid configuration: {e}");
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let bind_addr = (config.host.clone(), config.port);
    info!("Starting Telegram relay at http://{}:{}", bind_addr.0, bind_addr.1);

    let relay = web::Data::new(Relay::new(&config));
    let config = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(relay.clone())
            .app_data(config.clone())
            .configure(relay::configure_relay)
    })
    .bind(bind_addr)?
    .run()
    .await
}
