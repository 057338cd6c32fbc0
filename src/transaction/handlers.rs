use actix_web::{delete, get, post, put, web, HttpResponse};
use sqlx::SqlitePool;
use validator::Validate;

use crate::errors::{AppError, ErrorResponse};
use crate::extractors::ApiKeyAuth;
use crate::models::MessageResponse;
use crate::pagination::{PageQuery, Paginated, Pagination};

use super::models::{
    CreateTransactionDto, TransactionIdPath, TransactionResponse, UpdateTransactionDto,
};
use super::service::TransactionService;

/// GET /api/transactions - List transactions, newest first
#[utoipa::path(
    get,
    path = "/api/transactions",
    tag = "Transactions",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of transactions", body = Paginated<TransactionResponse>),
        (status = 400, description = "Invalid page or pageSize", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[get("/api/transactions")]
pub async fn list_transactions(
    pool: web::Data<SqlitePool>,
    _auth: ApiKeyAuth,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let pagination = Pagination::try_from(&*query)?;
    let page = TransactionService::get_all(pool.get_ref(), &pagination).await?;

    Ok(HttpResponse::Ok().json(page.map(TransactionResponse::from)))
}

/// GET /api/transactions/{id} - Get a specific transaction by ID
#[utoipa::path(
    get,
    path = "/api/transactions/{id}",
    tag = "Transactions",
    params(TransactionIdPath),
    responses(
        (status = 200, description = "Transaction details", body = TransactionResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[get("/api/transactions/{id}")]
pub async fn get_transaction(
    pool: web::Data<SqlitePool>,
    _auth: ApiKeyAuth,
    path: web::Path<TransactionIdPath>,
) -> Result<HttpResponse, AppError> {
    let transaction = TransactionService::get_by_id(pool.get_ref(), &path.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Transaction not found".to_string()))?;

    Ok(HttpResponse::Ok().json(TransactionResponse::from(transaction)))
}

/// POST /api/transactions - Create a new transaction
#[utoipa::path(
    post,
    path = "/api/transactions",
    tag = "Transactions",
    request_body = CreateTransactionDto,
    responses(
        (status = 201, description = "Transaction created", body = TransactionResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[post("/api/transactions")]
pub async fn create_transaction(
    pool: web::Data<SqlitePool>,
    _auth: ApiKeyAuth,
    body: web::Json<CreateTransactionDto>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let transaction = TransactionService::create(pool.get_ref(), body.into_inner()).await?;

    Ok(HttpResponse::Created().json(TransactionResponse::from(transaction)))
}

/// PUT /api/transactions/{id} - Partially update a transaction
#[utoipa::path(
    put,
    path = "/api/transactions/{id}",
    tag = "Transactions",
    params(TransactionIdPath),
    request_body = UpdateTransactionDto,
    responses(
        (status = 200, description = "Transaction updated", body = TransactionResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[put("/api/transactions/{id}")]
pub async fn update_transaction(
    pool: web::Data<SqlitePool>,
    _auth: ApiKeyAuth,
    path: web::Path<TransactionIdPath>,
    body: web::Json<UpdateTransactionDto>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let transaction =
        TransactionService::update(pool.get_ref(), &path.id, body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(TransactionResponse::from(transaction)))
}

/// DELETE /api/transactions/{id} - Delete a transaction
#[utoipa::path(
    delete,
    path = "/api/transactions/{id}",
    tag = "Transactions",
    params(TransactionIdPath),
    responses(
        (status = 200, description = "Transaction deleted", body = MessageResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[delete("/api/transactions/{id}")]
pub async fn delete_transaction(
    pool: web::Data<SqlitePool>,
    _auth: ApiKeyAuth,
    path: web::Path<TransactionIdPath>,
) -> Result<HttpResponse, AppError> {
    TransactionService::delete(pool.get_ref(), &path.id).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::deleted("Transaction")))
}
