//! Listing pagination configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Defaults and bounds applied to `offset`/`limit` query parameters.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Limit used when the request omits one
    #[serde(default = "default_limit")]
    pub default_limit: u64,

    /// Larger requested limits are clamped to this value
    #[serde(default = "default_max_limit")]
    pub max_limit: u64,
}

impl PaginationConfig {
    /// Validate pagination bounds
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_limit == 0 || self.default_limit > self.max_limit {
            return Err(ValidationError::InvalidPagination);
        }
        Ok(())
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_limit() -> u64 {
    50
}

fn default_max_limit() -> u64 {
    500
}
