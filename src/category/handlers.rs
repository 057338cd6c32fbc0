use actix_web::{delete, get, post, put, web, HttpResponse};
use sqlx::SqlitePool;
use validator::Validate;

use crate::errors::{AppError, ErrorResponse};
use crate::extractors::ApiKeyAuth;
use crate::models::MessageResponse;
use crate::pagination::{PageQuery, Paginated, Pagination};

use super::models::{
    CategoryNamePath, CategoryResponse, CategoryType, CategoryTypePath, CreateCategoryDto,
    UpdateCategoryDto,
};
use super::service::CategoryService;

/// GET /api/categories - List categories, name ascending
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "Categories",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of categories", body = Paginated<CategoryResponse>),
        (status = 400, description = "Invalid page or pageSize", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[get("/api/categories")]
pub async fn list_categories(
    pool: web::Data<SqlitePool>,
    _auth: ApiKeyAuth,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let pagination = Pagination::try_from(&*query)?;
    let page = CategoryService::get_all(pool.get_ref(), &pagination).await?;

    Ok(HttpResponse::Ok().json(page.map(CategoryResponse::from)))
}

/// GET /api/categories/type/{type} - All categories of one type
#[utoipa::path(
    get,
    path = "/api/categories/type/{type}",
    tag = "Categories",
    params(CategoryTypePath),
    responses(
        (status = 200, description = "Categories of the given type", body = Vec<CategoryResponse>),
        (status = 400, description = "Invalid type parameter", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[get("/api/categories/type/{type}")]
pub async fn get_categories_by_type(
    pool: web::Data<SqlitePool>,
    _auth: ApiKeyAuth,
    path: web::Path<CategoryTypePath>,
) -> Result<HttpResponse, AppError> {
    let category_type = CategoryType::parse(&path.category_type)
        .ok_or_else(|| AppError::ValidationError("Invalid type parameter".to_string()))?;

    let categories = CategoryService::get_by_type(pool.get_ref(), category_type).await?;

    let response: Vec<CategoryResponse> = categories.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/categories/{name} - Get a category by name
#[utoipa::path(
    get,
    path = "/api/categories/{name}",
    tag = "Categories",
    params(CategoryNamePath),
    responses(
        (status = 200, description = "Category details", body = CategoryResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[get("/api/categories/{name}")]
pub async fn get_category(
    pool: web::Data<SqlitePool>,
    _auth: ApiKeyAuth,
    path: web::Path<CategoryNamePath>,
) -> Result<HttpResponse, AppError> {
    let category = CategoryService::get_by_name(pool.get_ref(), &path.name)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

    Ok(HttpResponse::Ok().json(CategoryResponse::from(category)))
}

/// POST /api/categories - Create a category
#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "Categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "Category already exists", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[post("/api/categories")]
pub async fn create_category(
    pool: web::Data<SqlitePool>,
    _auth: ApiKeyAuth,
    body: web::Json<CreateCategoryDto>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let category = CategoryService::create(pool.get_ref(), &body).await?;

    Ok(HttpResponse::Created().json(CategoryResponse::from(category)))
}

/// PUT /api/categories/{name} - Partially update or rename a category
#[utoipa::path(
    put,
    path = "/api/categories/{name}",
    tag = "Categories",
    params(CategoryNamePath),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 409, description = "New name already taken", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[put("/api/categories/{name}")]
pub async fn update_category(
    pool: web::Data<SqlitePool>,
    _auth: ApiKeyAuth,
    path: web::Path<CategoryNamePath>,
    body: web::Json<UpdateCategoryDto>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let category = CategoryService::update(pool.get_ref(), &path.name, &body).await?;

    Ok(HttpResponse::Ok().json(CategoryResponse::from(category)))
}

/// DELETE /api/categories/{name} - Delete a category
#[utoipa::path(
    delete,
    path = "/api/categories/{name}",
    tag = "Categories",
    params(CategoryNamePath),
    responses(
        (status = 200, description = "Category deleted", body = MessageResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[delete("/api/categories/{name}")]
pub async fn delete_category(
    pool: web::Data<SqlitePool>,
    _auth: ApiKeyAuth,
    path: web::Path<CategoryNamePath>,
) -> Result<HttpResponse, AppError> {
    CategoryService::delete(pool.get_ref(), &path.name).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::deleted("Category")))
}
