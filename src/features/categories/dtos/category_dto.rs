use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::models::{Category, CategoryKind, CategoryStatistics};

/// Request DTO for creating a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryDto {
    #[validate(regex(
        path = *crate::shared::validation::SLUG_REGEX,
        message = "Slug must be lowercase alphanumeric with hyphens"
    ))]
    pub slug: String,

    /// Localized names, e.g. `{"en": "News", "fr": "Actualités"}`
    #[validate(custom(function = crate::shared::validation::localized_map))]
    pub name: serde_json::Value,

    #[validate(custom(function = crate::shared::validation::localized_map))]
    pub description: Option<serde_json::Value>,

    pub kind: CategoryKind,

    pub parent_id: Option<Uuid>,

    #[serde(default = "default_visible")]
    pub is_visible: bool,

    #[serde(default)]
    pub sort_order: i32,
}

fn default_visible() -> bool {
    true
}

/// Request DTO for updating a category; omitted fields stay unchanged
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryDto {
    #[validate(regex(
        path = *crate::shared::validation::SLUG_REGEX,
        message = "Slug must be lowercase alphanumeric with hyphens"
    ))]
    pub slug: Option<String>,

    #[validate(custom(function = crate::shared::validation::localized_map))]
    pub name: Option<serde_json::Value>,

    #[validate(custom(function = crate::shared::validation::localized_map))]
    pub description: Option<serde_json::Value>,

    pub kind: Option<CategoryKind>,

    pub parent_id: Option<Uuid>,

    pub is_visible: Option<bool>,

    pub is_active: Option<bool>,

    pub sort_order: Option<i32>,
}

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub slug: String,
    pub name: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<serde_json::Value>,
    pub kind: CategoryKind,
    pub is_visible: bool,
    pub is_active: bool,
    pub sort_order: i32,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            parent_id: c.parent_id,
            slug: c.slug,
            name: c.name,
            description: c.description,
            kind: c.kind,
            is_visible: c.is_visible,
            is_active: c.is_active,
            sort_order: c.sort_order,
        }
    }
}

/// Response DTO for category tree (hierarchical structure)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(no_recursion)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTreeDto {
    pub id: Uuid,
    pub slug: String,
    pub name: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<serde_json::Value>,
    pub kind: CategoryKind,
    pub sort_order: i32,
    pub children: Vec<CategoryTreeDto>,
}

impl CategoryTreeDto {
    /// Build tree from flat list of categories. Input order (sort_order,
    /// slug) is preserved among siblings.
    pub fn build_tree(categories: Vec<Category>) -> Vec<CategoryTreeDto> {
        let roots: Vec<&Category> = categories
            .iter()
            .filter(|c| c.parent_id.is_none())
            .collect();

        roots
            .into_iter()
            .map(|root| Self::build_node(root, &categories))
            .collect()
    }

    fn build_node(category: &Category, all_categories: &[Category]) -> CategoryTreeDto {
        let children: Vec<CategoryTreeDto> = all_categories
            .iter()
            .filter(|c| c.parent_id == Some(category.id))
            .map(|child| Self::build_node(child, all_categories))
            .collect();

        CategoryTreeDto {
            id: category.id,
            slug: category.slug.clone(),
            name: category.name.clone(),
            description: category.description.clone(),
            kind: category.kind,
            sort_order: category.sort_order,
            children,
        }
    }
}

/// Response DTO for the derived per-category counters
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStatisticsDto {
    pub category_id: Uuid,
    pub content_count: i64,
    pub subcategory_count: i64,
    pub total_content_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl From<CategoryStatistics> for CategoryStatisticsDto {
    fn from(s: CategoryStatistics) -> Self {
        Self {
            category_id: s.category_id,
            content_count: s.content_count,
            subcategory_count: s.subcategory_count,
            total_content_count: s.total_content_count,
            refreshed_at: Some(s.refreshed_at),
        }
    }
}

impl CategoryStatisticsDto {
    /// Zeroed counters for a category whose row has not been refreshed yet
    pub fn empty(category_id: Uuid) -> Self {
        Self {
            category_id,
            content_count: 0,
            subcategory_count: 0,
            total_content_count: 0,
            refreshed_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn category(id: Uuid, parent_id: Option<Uuid>, slug: &str, sort_order: i32) -> Category {
        Category {
            id,
            parent_id,
            slug: slug.to_string(),
            name: json!({"en": slug}),
            description: None,
            kind: CategoryKind::Topic,
            is_visible: true,
            is_active: true,
            sort_order,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_build_tree_groups_children_under_parents() {
        let root_a = Uuid::new_v4();
        let root_b = Uuid::new_v4();
        let child = Uuid::new_v4();
        let grandchild = Uuid::new_v4();

        // Flat list in (sort_order, slug) order, as the repository returns it
        let flat = vec![
            category(root_a, None, "news", 0),
            category(root_b, None, "tutorials", 1),
            category(child, Some(root_a), "world", 0),
            category(grandchild, Some(child), "europe", 0),
        ];

        let tree = CategoryTreeDto::build_tree(flat);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].slug, "news");
        assert_eq!(tree[1].slug, "tutorials");
        assert_eq!(tree[0].children.len(), 1);
        assert_eq!(tree[0].children[0].slug, "world");
        assert_eq!(tree[0].children[0].children[0].slug, "europe");
        assert!(tree[1].children.is_empty());
    }

    #[test]
    fn test_build_tree_preserves_sibling_order() {
        let root = Uuid::new_v4();
        let flat = vec![
            category(root, None, "root", 0),
            category(Uuid::new_v4(), Some(root), "first", 0),
            category(Uuid::new_v4(), Some(root), "second", 1),
            category(Uuid::new_v4(), Some(root), "third", 2),
        ];

        let tree = CategoryTreeDto::build_tree(flat);

        let slugs: Vec<&str> = tree[0].children.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_build_tree_empty_input() {
        assert!(CategoryTreeDto::build_tree(Vec::new()).is_empty());
    }
}
