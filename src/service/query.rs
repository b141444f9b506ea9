//! List query-parameter validation and response-shape selection.

use crate::error::ValidationError;
use crate::sql::{Order, SortKey};
use std::collections::HashMap;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PER_PAGE: i64 = 10;
pub const MAX_PER_PAGE: i64 = 100;

/// Validated list parameters. `bare` records whether the request carried
/// zero query parameters: the legacy bare-array response. Any parameter at
/// all, recognized or not, selects the pagination envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub completed: Option<bool>,
    pub search: Option<String>,
    pub sort: SortKey,
    pub order: Order,
    pub page: i64,
    pub per_page: i64,
    pub bare: bool,
}

impl ListQuery {
    /// Validate raw query parameters. Checks run in a fixed order so the
    /// first offender wins: completed, sort, order, page, per_page.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, ValidationError> {
        let completed = match params.get("completed").map(String::as_str) {
            None => None,
            Some("true") => Some(true),
            Some("false") => Some(false),
            Some(_) => return Err(ValidationError::BadCompletedParam),
        };
        let sort = match params.get("sort").map(String::as_str) {
            None | Some("id") => SortKey::Id,
            Some("title") => SortKey::Title,
            Some(_) => return Err(ValidationError::BadSortParam),
        };
        let order = match params.get("order").map(String::as_str) {
            None | Some("desc") => Order::Desc,
            Some("asc") => Order::Asc,
            Some(_) => return Err(ValidationError::BadOrderParam),
        };
        let page = match params.get("page") {
            None => DEFAULT_PAGE,
            Some(raw) => match raw.parse::<i64>() {
                Ok(n) if n >= 1 => n,
                _ => return Err(ValidationError::BadPageParam),
            },
        };
        let per_page = match params.get("per_page") {
            None => DEFAULT_PER_PAGE,
            Some(raw) => match raw.parse::<i64>() {
                Ok(n) if (1..=MAX_PER_PAGE).contains(&n) => n,
                _ => return Err(ValidationError::BadPerPageParam),
            },
        };
        // An empty search string is a no-op filter, but its presence still
        // selects the envelope.
        let search = params.get("search").cloned().filter(|s| !s.is_empty());
        Ok(ListQuery {
            completed,
            search,
            sort,
            order,
            page,
            per_page,
            bare: params.is_empty(),
        })
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }
}
