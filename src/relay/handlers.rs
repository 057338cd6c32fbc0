use actix_web::{get, post, web, HttpRequest, HttpResponse};
use secrecy::ExposeSecret;
use serde_json::json;
use tracing::{error, info};

use super::models::Update;
use super::Relay;
use crate::config::BotConfig;
use crate::errors::AppError;

/// Telegram webhook. The bot token in the path is the shared secret.
#[post("/telegram/{token}")]
pub async fn telegram_webhook(
    relay: web::Data<Relay>,
    config: web::Data<BotConfig>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    if path.as_str() != config.telegram_bot_token.expose_secret().as_str() {
        return Err(AppError::Unauthorized("Invalid webhook token".to_string()));
    }

    let update: Update = serde_json::from_slice(&body)
        .map_err(|e| AppError::ValidationError(format!("Invalid update: {e}")))?;

    relay.handle_update(update).await;

    Ok(HttpResponse::Ok().json(json!({ "status": "success" })))
}

#[get("/")]
pub async fn index(req: HttpRequest, config: web::Data<BotConfig>) -> HttpResponse {
    let conn = req.connection_info();

    HttpResponse::Ok().json(json!({
        "message": "PeFi Telegram relay is running",
        "status": "ok",
        "config": {
            "telegramApiUrl": config.telegram_api_url,
            "host": config.public_host,
            "serverUrl": format!("{}://{}", conn.scheme(), conn.host()),
        }
    }))
}

/// Point the bot's webhook at this server.
#[get("/setup-webhook")]
pub async fn setup_webhook(
    req: HttpRequest,
    relay: web::Data<Relay>,
    config: web::Data<BotConfig>,
) -> Result<HttpResponse, AppError> {
    let base = match &config.public_host {
        Some(host) => format!("https://{host}"),
        None => {
            let conn = req.connection_info();
            format!("{}://{}", conn.scheme(), conn.host())
        }
    };

    info!("Registering webhook at {base}/telegram/<token>");

    let webhook_url = format!(
        "{base}/telegram/{}",
        config.telegram_bot_token.expose_secret()
    );

    match relay.telegram().set_webhook(&webhook_url).await {
        Ok(result) => Ok(HttpResponse::Ok().json(result)),
        Err(e) => {
            error!("Failed to set webhook: {e}");
            Err(AppError::InternalError(e.to_string()))
        }
    }
}

async fn not_found() -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound("Not Found".to_string()))
}

pub fn configure_relay(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(setup_webhook)
        .service(telegram_webhook)
        .default_service(web::to(not_found));
}
