use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures::future::{err, ok, Ready};
use secrecy::ExposeSecret;

use crate::config::ApiKey;
use crate::errors::AppError;

/// Extractor that rejects requests not carrying the configured bearer key.
pub struct ApiKeyAuth;

impl FromRequest for ApiKeyAuth {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let api_key = match req.app_data::<web::Data<ApiKey>>() {
            Some(key) => key,
            None => {
                return err(AppError::InternalError(
                    "API key not configured".to_string(),
                ))
            }
        };

        let token = match req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
        {
            Some(t) => t,
            None => {
                return err(AppError::Unauthorized(
                    "Missing or invalid Authorization header".to_string(),
                ))
            }
        };

        if token == api_key.0.expose_secret().as_str() {
            ok(ApiKeyAuth)
        } else {
            err(AppError::Unauthorized("Invalid API key".to_string()))
        }
    }
}
