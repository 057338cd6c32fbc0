//! Page/pageSize handling shared by every list endpoint.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::errors::AppError;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Raw pagination query parameters. Kept as strings so that garbage such as
/// `?page=abc` is reported through [`AppError`] rather than actix's default.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Page number, starting at 1
    #[param(example = "1")]
    pub page: Option<String>,
    /// Items per page (1-100)
    #[param(example = "10")]
    pub page_size: Option<String>,
}

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Validate)]
pub struct Pagination {
    #[validate(range(min = 1, message = "Invalid page parameter"))]
    pub page: i64,
    #[validate(range(min = 1, max = 100, message = "Invalid pageSize parameter"))]
    pub page_size: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

impl TryFrom<&PageQuery> for Pagination {
    type Error = AppError;

    fn try_from(query: &PageQuery) -> Result<Self, Self::Error> {
        let page = parse_param(query.page.as_deref(), DEFAULT_PAGE, "page")?;
        let page_size = parse_param(query.page_size.as_deref(), DEFAULT_PAGE_SIZE, "pageSize")?;

        let pagination = Pagination { page, page_size };
        pagination
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        // The row offset must fit in an i64 for LIMIT/OFFSET.
        (pagination.page - 1)
            .checked_mul(pagination.page_size)
            .ok_or_else(|| AppError::ValidationError("Invalid page parameter".to_string()))?;

        Ok(pagination)
    }
}

fn parse_param(raw: Option<&str>, default: i64, name: &str) -> Result<i64, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| AppError::ValidationError(format!("Invalid {name} parameter"))),
    }
}

/// Pagination metadata returned beside every page of results
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Total number of records
    #[schema(example = 42)]
    pub total: i64,
    /// Current page
    #[schema(example = 1)]
    pub page: i64,
    /// Page size used
    #[schema(example = 10)]
    pub page_size: i64,
    /// ceil(total / pageSize)
    #[schema(example = 5)]
    pub total_pages: i64,
}

impl PageMeta {
    pub fn new(total: i64, pagination: &Pagination) -> Self {
        let total_pages = (total + pagination.page_size - 1) / pagination.page_size;

        Self {
            total,
            page: pagination.page,
            page_size: pagination.page_size,
            total_pages,
        }
    }
}

/// A page of records plus its metadata
#[derive(Debug, Serialize, ToSchema)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: PageMeta,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, total: i64, pagination: &Pagination) -> Self {
        Self {
            data,
            pagination: PageMeta::new(total, pagination),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}
