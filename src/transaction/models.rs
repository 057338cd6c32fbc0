use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Transaction type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    /// Default when the client does not say otherwise
    #[default]
    Expense,
    /// Money moved from `fund` to `toFund`
    Transfer,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
            TransactionType::Transfer => "transfer",
        }
    }
}

/// Database model for transactions
#[derive(Debug, Clone, FromRow)]
pub struct Transaction {
    pub id: String,
    #[sqlx(rename = "type")]
    pub transaction_type: String,
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub note: String,
    pub category: String,
    pub method: String,
    pub fund: String,
    pub to_fund: Option<String>,
}

/// Transaction information returned in responses
#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionResponse {
    /// Generated identifier
    pub id: String,
    /// income, expense or transfer
    #[serde(rename = "type")]
    #[schema(example = "expense")]
    pub transaction_type: String,
    /// Transaction date (YYYY-MM-DD)
    pub date: NaiveDate,
    #[schema(example = "Lunch")]
    pub description: String,
    /// Always positive
    #[schema(example = 45000.0)]
    pub amount: f64,
    pub note: String,
    /// Category name, matched loosely against the category list
    #[schema(example = "Food")]
    pub category: String,
    /// Payment method label
    pub method: String,
    /// Source fund name
    pub fund: String,
    /// Destination fund for transfers
    #[serde(rename = "toFund", skip_serializing_if = "Option::is_none")]
    pub to_fund: Option<String>,
}

impl From<Transaction> for TransactionResponse {
    fn from(t: Transaction) -> Self {
        Self {
            id: t.id,
            transaction_type: t.transaction_type,
            date: t.date,
            description: t.description,
            amount: t.amount,
            note: t.note,
            category: t.category,
            method: t.method,
            fund: t.fund,
            to_fund: t.to_fund,
        }
    }
}

/// Request body for creating a transaction. Only `amount` is required.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTransactionDto {
    /// Defaults to expense
    #[serde(rename = "type", default)]
    pub transaction_type: TransactionType,

    /// Defaults to today
    pub date: Option<NaiveDate>,

    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    #[schema(example = "Lunch")]
    pub description: Option<String>,

    #[validate(range(exclusive_min = 0.0, message = "Amount must be positive"))]
    #[schema(example = 45000.0)]
    pub amount: f64,

    pub note: Option<String>,
    pub category: Option<String>,
    /// Defaults to the transfer method label
    pub method: Option<String>,
    pub fund: Option<String>,

    #[serde(rename = "toFund")]
    pub to_fund: Option<String>,
}

/// Request body for updating a transaction (all fields optional)
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTransactionDto {
    #[serde(rename = "type", default, deserialize_with = "crate::models::non_null")]
    pub transaction_type: Option<TransactionType>,

    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub date: Option<NaiveDate>,

    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub description: Option<String>,

    #[validate(range(exclusive_min = 0.0, message = "Amount must be positive"))]
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub amount: Option<f64>,

    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub note: Option<String>,
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub method: Option<String>,
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub fund: Option<String>,

    #[serde(rename = "toFund", default, deserialize_with = "crate::models::non_null")]
    pub to_fund: Option<String>,
}

impl UpdateTransactionDto {
    pub fn is_empty(&self) -> bool {
        self.transaction_type.is_none()
            && self.date.is_none()
            && self.description.is_none()
            && self.amount.is_none()
            && self.note.is_none()
            && self.category.is_none()
            && self.method.is_none()
            && self.fund.is_none()
            && self.to_fund.is_none()
    }
}

/// Path parameters for transaction ID
#[derive(Debug, Deserialize, IntoParams)]
pub struct TransactionIdPath {
    /// Transaction identifier
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_dto_applies_serde_defaults() {
        let dto: CreateTransactionDto = serde_json::from_value(json!({"amount": 12.5})).unwrap();
        assert_eq!(dto.transaction_type, TransactionType::Expense);
        assert!(dto.date.is_none());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn non_positive_amount_fails_validation() {
        let dto: CreateTransactionDto = serde_json::from_value(json!({"amount": 0})).unwrap();
        assert!(dto.validate().is_err());

        let dto: UpdateTransactionDto = serde_json::from_value(json!({"amount": -3})).unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn malformed_date_is_rejected() {
        let result: Result<CreateTransactionDto, _> =
            serde_json::from_value(json!({"amount": 1, "date": "15/03/2025"}));
        assert!(result.is_err());
    }

    #[test]
    fn update_dto_reads_to_fund_key() {
        let dto: UpdateTransactionDto =
            serde_json::from_value(json!({"type": "transfer", "toFund": "Savings"})).unwrap();
        assert_eq!(dto.transaction_type, Some(TransactionType::Transfer));
        assert_eq!(dto.to_fund.as_deref(), Some("Savings"));
        assert!(!dto.is_empty());
        assert!(UpdateTransactionDto::default().is_empty());
    }

    #[test]
    fn update_dto_rejects_explicit_null() {
        let result: Result<UpdateTransactionDto, _> =
            serde_json::from_value(json!({"toFund": null}));
        assert!(result.is_err());

        let result: Result<UpdateTransactionDto, _> = serde_json::from_value(json!({"note": null}));
        assert!(result.is_err());
    }
}
