use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Lifecycle state of a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ToSchema)]
pub enum BudgetStatus {
    #[default]
    Active,
    Inactive,
    Completed,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetStatus::Active => "Active",
            BudgetStatus::Inactive => "Inactive",
            BudgetStatus::Completed => "Completed",
        }
    }
}

/// Reject a period that ends before it starts
pub fn validate_period(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if end < start {
        return Err(ValidationError::new("end_date_before_start_date"));
    }
    Ok(())
}

/// Database entity for budgets. `spent` is maintained by hand, never derived
/// from transactions.
#[derive(Debug, Clone, FromRow)]
pub struct Budget {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub spent: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
    pub note: Option<String>,
    pub category: Option<String>,
    pub fund: Option<String>,
}

/// Budget information returned in responses
#[derive(Debug, Serialize, ToSchema)]
pub struct BudgetResponse {
    pub id: String,
    #[schema(example = "Groceries March")]
    pub name: String,
    #[schema(example = 3000000.0)]
    pub amount: f64,
    #[schema(example = 1250000.0)]
    pub spent: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Active, Inactive or Completed
    #[schema(example = "Active")]
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fund: Option<String>,
}

impl From<Budget> for BudgetResponse {
    fn from(b: Budget) -> Self {
        Self {
            id: b.id,
            name: b.name,
            amount: b.amount,
            spent: b.spent,
            start_date: b.start_date,
            end_date: b.end_date,
            status: b.status,
            note: b.note,
            category: b.category,
            fund: b.fund,
        }
    }
}

/// DTO for creating a new budget
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBudgetDto {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: String,

    #[validate(range(exclusive_min = 0.0, message = "Amount must be positive"))]
    pub amount: f64,

    #[serde(default)]
    pub spent: f64,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    #[serde(default)]
    pub status: BudgetStatus,

    pub note: Option<String>,
    pub category: Option<String>,
    pub fund: Option<String>,
}

impl CreateBudgetDto {
    /// Cross-field check the derive macro can't express
    pub fn validate_dates(&self) -> Result<(), ValidationError> {
        validate_period(self.start_date, self.end_date)
    }
}

/// DTO for updating a budget (all fields optional)
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBudgetDto {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub name: Option<String>,

    #[validate(range(exclusive_min = 0.0, message = "Amount must be positive"))]
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub amount: Option<f64>,

    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub spent: Option<f64>,
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub status: Option<BudgetStatus>,
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub note: Option<String>,
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub fund: Option<String>,
}

impl UpdateBudgetDto {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.amount.is_none()
            && self.spent.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.status.is_none()
            && self.note.is_none()
            && self.category.is_none()
            && self.fund.is_none()
    }
}

/// Path parameters for budget ID
#[derive(Debug, Deserialize, IntoParams)]
pub struct BudgetIdPath {
    /// Budget identifier
    pub id: String,
}
