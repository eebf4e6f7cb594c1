use serde::Deserialize;
use std::collections::HashMap;

use crate::config::ApiConfig;
use crate::error::ApiError;

/// `?skip=&limit=` as sent by the client
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

/// Validated offset and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: i64,
    pub limit: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_limit: i64,
    pub max_limit: i64,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_limit: 100,
            max_limit: 1000,
        }
    }
}

impl From<&ApiConfig> for PageLimits {
    fn from(api: &ApiConfig) -> Self {
        Self {
            default_limit: api.default_limit,
            max_limit: api.max_limit,
        }
    }
}

impl PageLimits {
    /// Apply defaults, then reject `skip < 0` and `limit` outside `1..=max_limit`
    pub fn resolve(&self, skip: Option<i64>, limit: Option<i64>) -> Result<Page, ApiError> {
        let page = Page {
            skip: skip.unwrap_or(0),
            limit: limit.unwrap_or(self.default_limit),
        };

        let mut field_errors = HashMap::new();
        if page.skip < 0 {
            field_errors.insert("skip".to_string(), "must be greater than or equal to 0".to_string());
        }
        if page.limit < 1 || page.limit > self.max_limit {
            field_errors.insert(
                "limit".to_string(),
                format!("must be between 1 and {}", self.max_limit),
            );
        }

        if field_errors.is_empty() {
            Ok(page)
        } else {
            Err(ApiError::unprocessable_entity("Invalid pagination parameters", field_errors))
        }
    }

    pub fn resolve_query(&self, query: PageQuery) -> Result<Page, ApiError> {
        self.resolve(query.skip, query.limit)
    }
}
