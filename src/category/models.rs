use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Whether a category groups income or expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Income,
    Expense,
}

impl CategoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryType::Income => "income",
            CategoryType::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "income" => Some(CategoryType::Income),
            "expense" => Some(CategoryType::Expense),
            _ => None,
        }
    }
}

/// Database entity for categories. `name` is the natural key.
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub name: String,
    #[sqlx(rename = "type")]
    pub category_type: String,
}

/// Category information returned in responses
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    /// Category name (unique)
    #[schema(example = "Food")]
    pub name: String,
    /// income or expense
    #[serde(rename = "type")]
    #[schema(example = "expense")]
    pub category_type: String,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        Self {
            name: c.name,
            category_type: c.category_type,
        }
    }
}

/// Request body for creating a category
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    #[schema(example = "Food")]
    pub name: String,

    #[serde(rename = "type")]
    pub category_type: CategoryType,
}

/// Request body for updating a category. Setting `name` renames it.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    #[schema(example = "Groceries")]
    #[serde(default, deserialize_with = "crate::models::non_null")]
    pub name: Option<String>,

    #[serde(rename = "type", default, deserialize_with = "crate::models::non_null")]
    pub category_type: Option<CategoryType>,
}

impl UpdateCategoryDto {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.category_type.is_none()
    }
}

/// Path parameters for category name
#[derive(Debug, Deserialize, IntoParams)]
pub struct CategoryNamePath {
    /// Category name
    pub name: String,
}

/// Path parameters for category type
#[derive(Debug, Deserialize, IntoParams)]
pub struct CategoryTypePath {
    /// income or expense
    #[serde(rename = "type")]
    pub category_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_dto_reads_type_field() {
        let dto: CreateCategoryDto =
            serde_json::from_value(json!({"name": "Food", "type": "expense"})).unwrap();
        assert_eq!(dto.category_type, CategoryType::Expense);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn create_dto_rejects_unknown_type() {
        let result: Result<CreateCategoryDto, _> =
            serde_json::from_value(json!({"name": "Food", "type": "savings"}));
        assert!(result.is_err());
    }

    #[test]
    fn empty_update_is_detected() {
        let dto: UpdateCategoryDto = serde_json::from_value(json!({})).unwrap();
        assert!(dto.is_empty());

        let dto: UpdateCategoryDto = serde_json::from_value(json!({"type": "income"})).unwrap();
        assert!(!dto.is_empty());
    }

    #[test]
    fn response_serializes_type_key() {
        let response = CategoryResponse::from(Category {
            name: "Salary".to_string(),
            category_type: "income".to_string(),
        });
        assert_eq!(
            serde_json::to_value(response).unwrap(),
            json!({"name": "Salary", "type": "income"})
        );
    }
}
