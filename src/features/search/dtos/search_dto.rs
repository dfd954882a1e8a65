use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::search::models::SearchDocument;
use crate::shared::constants::MAX_SEARCH_RESULTS;

/// Query params for search
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
pub struct SearchQuery {
    /// Search terms
    #[validate(length(min = 1, max = 100, message = "Query must be 1-100 characters"))]
    pub q: String,

    /// Maximum number of hits (default 20)
    #[serde(default = "default_limit")]
    #[param(minimum = 1, maximum = 50)]
    pub limit: i64,
}

fn default_limit() -> i64 {
    20
}

impl SearchQuery {
    pub fn clamped_limit(&self) -> i64 {
        self.limit.clamp(1, MAX_SEARCH_RESULTS)
    }
}

/// A single search hit
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchHitDto {
    pub entity_type: String,
    pub entity_id: Uuid,
    pub language: String,
    pub title: String,
}

impl From<SearchDocument> for SearchHitDto {
    fn from(d: SearchDocument) -> Self {
        Self {
            entity_type: d.entity_type,
            entity_id: d.entity_id,
            language: d.language,
            title: d.title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_is_clamped() {
        let q = SearchQuery {
            q: "news".to_string(),
            limit: 500,
        };
        assert_eq!(q.clamped_limit(), MAX_SEARCH_RESULTS);

        let q = SearchQuery {
            q: "news".to_string(),
            limit: 0,
        };
        assert_eq!(q.clamped_limit(), 1);
    }
}
