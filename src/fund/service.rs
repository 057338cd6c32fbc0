use sqlx::SqlitePool;

use super::models::{CreateFundDto, Fund, UpdateFundDto};
use crate::errors::AppError;
use crate::pagination::{Paginated, Pagination};

/// Service layer for funds, keyed by name.
pub struct FundService;

impl FundService {
    pub async fn get_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Fund>, AppError> {
        sqlx::query_as::<_, Fund>("SELECT name, description FROM funds WHERE name = ?")
            .bind(name)
            .fetch_optional(pool)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))
    }

    /// Get a page of funds ordered by name.
    pub async fn get_all(
        pool: &SqlitePool,
        pagination: &Pagination,
    ) -> Result<Paginated<Fund>, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM funds")
            .fetch_one(pool)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let funds = sqlx::query_as::<_, Fund>(
            r#"
            SELECT name, description FROM funds
            ORDER BY name ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

        Ok(Paginated::new(funds, total, pagination))
    }

    pub async fn create(pool: &SqlitePool, dto: &CreateFundDto) -> Result<Fund, AppError> {
        if Self::get_by_name(pool, &dto.name).await?.is_some() {
            return Err(AppError::Conflict(
                "Fund with this name already exists".to_string(),
            ));
        }

        sqlx::query_as::<_, Fund>(
            r#"
            INSERT INTO funds (name, description)
            VALUES (?, ?)
            RETURNING name, description
            "#,
        )
        .bind(&dto.name)
        .bind(&dto.description)
        .fetch_one(pool)
        .await
        .map_err(AppError::from)
    }

    /// Update a fund; a new `name` renames the row in place without touching
    /// transactions that reference the old name.
    pub async fn update(
        pool: &SqlitePool,
        name: &str,
        dto: &UpdateFundDto,
    ) -> Result<Fund, AppError> {
        let existing = Self::get_by_name(pool, name)
            .await?
            .ok_or_else(|| AppError::NotFound("Fund not found".to_string()))?;

        if dto.is_empty() {
            return Ok(existing);
        }

        if let Some(new_name) = dto.name.as_deref().filter(|n| *n != name) {
            if Self::get_by_name(pool, new_name).await?.is_some() {
                return Err(AppError::Conflict(
                    "Fund with new name already exists".to_string(),
                ));
            }
        }

        let new_name = dto.name.as_deref().unwrap_or(existing.name.as_str());
        let new_description = dto.description.as_ref().or(existing.description.as_ref());

        sqlx::query_as::<_, Fund>(
            r#"
            UPDATE funds
            SET name = ?, description = ?
            WHERE name = ?
            RETURNING name, description
            "#,
        )
        .bind(new_name)
        .bind(new_description)
        .bind(name)
        .fetch_optional(pool)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("Fund not found".to_string()))
    }

    pub async fn delete(pool: &SqlitePool, name: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM funds WHERE name = ?")
            .bind(name)
            .execute(pool)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Fund not found".to_string()));
        }

        Ok(())
    }
}
