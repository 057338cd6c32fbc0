use actix_web::{get, HttpResponse};

use crate::errors::{AppError, ErrorResponse};
use crate::extractors::ApiKeyAuth;

use super::models::PaymentMethod;

/// GET /api/methods - List the fixed payment method labels
#[utoipa::path(
    get,
    path = "/api/methods",
    tag = "Methods",
    responses(
        (status = 200, description = "Payment method labels", body = Vec<String>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[get("/api/methods")]
pub async fn list_methods(_auth: ApiKeyAuth) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(PaymentMethod::labels()))
}
