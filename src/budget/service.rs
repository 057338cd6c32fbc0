use sqlx::SqlitePool;
use uuid::Uuid;

use super::models::{validate_period, Budget, CreateBudgetDto, UpdateBudgetDto};
use crate::errors::AppError;
use crate::pagination::{Paginated, Pagination};

const COLUMNS: &str =
    "id, name, amount, spent, start_date, end_date, status, note, category, fund";

/// Service layer for budget records.
pub struct BudgetService;

impl BudgetService {
    /// Get a page of budgets, latest start date first.
    pub async fn get_all(
        pool: &SqlitePool,
        pagination: &Pagination,
    ) -> Result<Paginated<Budget>, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM budgets")
            .fetch_one(pool)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let budgets = sqlx::query_as::<_, Budget>(&format!(
            r#"
            SELECT {COLUMNS} FROM budgets
            ORDER BY start_date DESC, rowid DESC
            LIMIT ? OFFSET ?
            "#
        ))
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

        Ok(Paginated::new(budgets, total, pagination))
    }

    pub async fn get_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Budget>, AppError> {
        sqlx::query_as::<_, Budget>(&format!("SELECT {COLUMNS} FROM budgets WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))
    }

    pub async fn create(pool: &SqlitePool, dto: CreateBudgetDto) -> Result<Budget, AppError> {
        let id = Uuid::new_v4().to_string();

        sqlx::query_as::<_, Budget>(&format!(
            r#"
            INSERT INTO budgets
                (id, name, amount, spent, start_date, end_date, status, note, category, fund)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&id)
        .bind(dto.name)
        .bind(dto.amount)
        .bind(dto.spent)
        .bind(dto.start_date)
        .bind(dto.end_date)
        .bind(dto.status.as_str())
        .bind(dto.note)
        .bind(dto.category)
        .bind(dto.fund)
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))
    }

    /// Apply the fields present in `dto`. An empty update returns the current row untouched.
    pub async fn update(
        pool: &SqlitePool,
        id: &str,
        dto: UpdateBudgetDto,
    ) -> Result<Budget, AppError> {
        let current = Self::get_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Budget not found".to_string()))?;

        if dto.is_empty() {
            return Ok(current);
        }

        let start_date = dto.start_date.unwrap_or(current.start_date);
        let end_date = dto.end_date.unwrap_or(current.end_date);
        validate_period(start_date, end_date).map_err(|_| {
            AppError::ValidationError("end_date must not be before start_date".to_string())
        })?;

        let status = dto
            .status
            .map(|s| s.as_str().to_string())
            .unwrap_or(current.status);

        sqlx::query_as::<_, Budget>(&format!(
            r#"
            UPDATE budgets
            SET name = ?, amount = ?, spent = ?, start_date = ?, end_date = ?,
                status = ?, note = ?, category = ?, fund = ?
            WHERE id = ?
            RETURNING {COLUMNS}
            "#
        ))
        .bind(dto.name.unwrap_or(current.name))
        .bind(dto.amount.unwrap_or(current.amount))
        .bind(dto.spent.unwrap_or(current.spent))
        .bind(start_date)
        .bind(end_date)
        .bind(status)
        .bind(dto.note.or(current.note))
        .bind(dto.category.or(current.category))
        .bind(dto.fund.or(current.fund))
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Budget not found".to_string()))
    }

    pub async fn delete(pool: &SqlitePool, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM budgets WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Budget not found".to_string()));
        }

        Ok(())
    }
}
