use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Database entity for funds. `name` is the natural key.
#[derive(Debug, Clone, FromRow)]
pub struct Fund {
    pub name: String,
    pub description: Option<String>,
}

/// Fund information returned in responses
#[derive(Debug, Serialize, ToSchema)]
pub struct FundResponse {
    /// Fund name (unique)
    #[schema(example = "Emergency")]
    pub name: String,
    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Six months of expenses")]
    pub description: Option<String>,
}

impl From<Fund> for FundResponse {
    fn from(f: Fund) -> Self {
        Self {
            name: f.name,
            description: f.description,
        }
    }
}

/// Request body for creating a fund
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFundDto {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    #[schema(example = "Emergency")]
    pub name: String,

    #[schema(example = "Six months of expenses")]
    pub description: Option<String>,
}

/// Request body for updating a fund. Setting `name` renames it.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateFundDto {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub description: Option<String>,
}

impl UpdateFundDto {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

/// Path parameters for fund name
#[derive(Debug, Deserialize, IntoParams)]
pub struct FundNamePath {
    /// Fund name
    pub name: String,
}
