use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::models::{CreateTransactionDto, Transaction, UpdateTransactionDto};
use crate::errors::AppError;
use crate::method::PaymentMethod;
use crate::pagination::{Paginated, Pagination};

const COLUMNS: &str = "id, type, date, description, amount, note, category, method, fund, to_fund";

/// Service layer for transactions.
pub struct TransactionService;

impl TransactionService {
    pub async fn create(
        pool: &SqlitePool,
        dto: CreateTransactionDto,
    ) -> Result<Transaction, AppError> {
        let id = Uuid::new_v4().to_string();
        let date = dto.date.unwrap_or_else(|| Utc::now().date_naive());
        let method = dto
            .method
            .unwrap_or_else(|| PaymentMethod::default().label().to_string());

        sqlx::query_as::<_, Transaction>(&format!(
            r#"
            INSERT INTO transactions
                (id, type, date, description, amount, note, category, method, fund, to_fund)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&id)
        .bind(dto.transaction_type.as_str())
        .bind(date)
        .bind(dto.description.unwrap_or_default())
        .bind(dto.amount)
        .bind(dto.note.unwrap_or_default())
        .bind(dto.category.unwrap_or_default())
        .bind(method)
        .bind(dto.fund.unwrap_or_default())
        .bind(dto.to_fund)
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))
    }

    /// Get a page of transactions, newest first.
    pub async fn get_all(
        pool: &SqlitePool,
        pagination: &Pagination,
    ) -> Result<Paginated<Transaction>, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM transactions")
            .fetch_one(pool)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let transactions = sqlx::query_as::<_, Transaction>(&format!(
            r#"
            SELECT {COLUMNS} FROM transactions
            ORDER BY date DESC, rowid DESC
            LIMIT ? OFFSET ?
            "#
        ))
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

        Ok(Paginated::new(transactions, total, pagination))
    }

    pub async fn get_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Transaction>, AppError> {
        sqlx::query_as::<_, Transaction>(&format!(
            "SELECT {COLUMNS} FROM transactions WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))
    }

    /// Apply the fields present in `dto`. An empty update returns the current row untouched.
    pub async fn update(
        pool: &SqlitePool,
        id: &str,
        dto: UpdateTransactionDto,
    ) -> Result<Transaction, AppError> {
        let current = Self::get_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Transaction not found".to_string()))?;

        if dto.is_empty() {
            return Ok(current);
        }

        let transaction_type = dto
            .transaction_type
            .map(|t| t.as_str().to_string())
            .unwrap_or(current.transaction_type);

        sqlx::query_as::<_, Transaction>(&format!(
            r#"
            UPDATE transactions
            SET type = ?, date = ?, description = ?, amount = ?, note = ?,
                category = ?, method = ?, fund = ?, to_fund = ?
            WHERE id = ?
            RETURNING {COLUMNS}
            "#
        ))
        .bind(transaction_type)
        .bind(dto.date.unwrap_or(current.date))
        .bind(dto.description.unwrap_or(current.description))
        .bind(dto.amount.unwrap_or(current.amount))
        .bind(dto.note.unwrap_or(current.note))
        .bind(dto.category.unwrap_or(current.category))
        .bind(dto.method.unwrap_or(current.method))
        .bind(dto.fund.unwrap_or(current.fund))
        .bind(dto.to_fund.or(current.to_fund))
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Transaction not found".to_string()))
    }

    pub async fn delete(pool: &SqlitePool, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Transaction not found".to_string()));
        }

        Ok(())
    }
}
