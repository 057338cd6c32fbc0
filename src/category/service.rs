use sqlx::SqlitePool;

use super::models::{Category, CategoryType, CreateCategoryDto, UpdateCategoryDto};
use crate::errors::AppError;
use crate::pagination::{Paginated, Pagination};

/// Service layer for categories, keyed by name.
pub struct CategoryService;

impl CategoryService {
    pub async fn get_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Category>, AppError> {
        sqlx::query_as::<_, Category>("SELECT name, type FROM categories WHERE name = ?")
            .bind(name)
            .fetch_optional(pool)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))
    }

    /// Get a page of categories ordered by name.
    pub async fn get_all(
        pool: &SqlitePool,
        pagination: &Pagination,
    ) -> Result<Paginated<Category>, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories")
            .fetch_one(pool)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT name, type FROM categories
            ORDER BY name ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

        Ok(Paginated::new(categories, total, pagination))
    }

    /// All categories of one type, unpaginated.
    pub async fn get_by_type(
        pool: &SqlitePool,
        category_type: CategoryType,
    ) -> Result<Vec<Category>, AppError> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT name, type FROM categories
            WHERE type = ?
            ORDER BY name ASC
            "#,
        )
        .bind(category_type.as_str())
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))
    }

    pub async fn create(pool: &SqlitePool, dto: &CreateCategoryDto) -> Result<Category, AppError> {
        if Self::get_by_name(pool, &dto.name).await?.is_some() {
            return Err(AppError::Conflict("Category already exists".to_string()));
        }

        sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, type)
            VALUES (?, ?)
            RETURNING name, type
            "#,
        )
        .bind(&dto.name)
        .bind(dto.category_type.as_str())
        .fetch_one(pool)
        .await
        .map_err(AppError::from)
    }

    /// Update a category; a new `name` renames the row in place.
    ///
    /// Transactions and budgets that reference the old name are left as they are.
    pub async fn update(
        pool: &SqlitePool,
        name: &str,
        dto: &UpdateCategoryDto,
    ) -> Result<Category, AppError> {
        let existing = Self::get_by_name(pool, name)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

        if dto.is_empty() {
            return Ok(existing);
        }

        if let Some(new_name) = dto.name.as_deref().filter(|n| *n != name) {
            if Self::get_by_name(pool, new_name).await?.is_some() {
                return Err(AppError::Conflict(
                    "Category with new name already exists".to_string(),
                ));
            }
        }

        let new_name = dto.name.as_deref().unwrap_or(existing.name.as_str());
        let new_type = dto
            .category_type
            .map(|t| t.as_str())
            .unwrap_or(existing.category_type.as_str());

        sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = ?, type = ?
            WHERE name = ?
            RETURNING name, type
            "#,
        )
        .bind(new_name)
        .bind(new_type)
        .bind(name)
        .fetch_optional(pool)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))
    }

    pub async fn delete(pool: &SqlitePool, name: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM categories WHERE name = ?")
            .bind(name)
            .execute(pool)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Category not found".to_string()));
        }

        Ok(())
    }
}
