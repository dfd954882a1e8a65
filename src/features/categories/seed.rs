use serde_json::json;
use sqlx::PgPool;

use crate::core::error::Result;
use crate::features::categories::models::{CategoryKind, NewCategory};
use crate::features::categories::repositories::category_repository;

/// The fixed multilingual seed set: topic categories for editorial
/// classification, format categories for the shape of the content.
pub fn default_categories() -> Vec<NewCategory> {
    fn seed(
        slug: &str,
        kind: CategoryKind,
        sort_order: i32,
        name: serde_json::Value,
        description: serde_json::Value,
    ) -> NewCategory {
        NewCategory {
            parent_id: None,
            slug: slug.to_string(),
            name,
            description: Some(description),
            kind,
            is_visible: true,
            sort_order,
        }
    }

    vec![
        seed(
            "news",
            CategoryKind::Topic,
            0,
            json!({"en": "News", "es": "Noticias", "fr": "Actualités"}),
            json!({"en": "Current events and announcements", "es": "Eventos actuales y anuncios", "fr": "Événements actuels et annonces"}),
        ),
        seed(
            "tutorials",
            CategoryKind::Topic,
            1,
            json!({"en": "Tutorials", "es": "Tutoriales", "fr": "Tutoriels"}),
            json!({"en": "Step-by-step guides", "es": "Guías paso a paso", "fr": "Guides pas à pas"}),
        ),
        seed(
            "opinion",
            CategoryKind::Topic,
            2,
            json!({"en": "Opinion", "es": "Opinión", "fr": "Opinion"}),
            json!({"en": "Editorials and commentary", "es": "Editoriales y comentarios", "fr": "Éditoriaux et commentaires"}),
        ),
        seed(
            "culture",
            CategoryKind::Topic,
            3,
            json!({"en": "Culture", "es": "Cultura", "fr": "Culture"}),
            json!({"en": "Arts, media and society", "es": "Arte, medios y sociedad", "fr": "Arts, médias et société"}),
        ),
        seed(
            "article",
            CategoryKind::Format,
            0,
            json!({"en": "Article", "es": "Artículo", "fr": "Article"}),
            json!({"en": "Written long-form pieces", "es": "Piezas escritas de formato largo", "fr": "Textes de fond"}),
        ),
        seed(
            "video",
            CategoryKind::Format,
            1,
            json!({"en": "Video", "es": "Vídeo", "fr": "Vidéo"}),
            json!({"en": "Video publications", "es": "Publicaciones en vídeo", "fr": "Publications vidéo"}),
        ),
        seed(
            "podcast",
            CategoryKind::Format,
            2,
            json!({"en": "Podcast", "es": "Pódcast", "fr": "Podcast"}),
            json!({"en": "Audio episodes", "es": "Episodios de audio", "fr": "Épisodes audio"}),
        ),
    ]
}

/// Insert the default category set on first startup. Idempotent: any
/// existing category row makes this a no-op. Returns whether seeding ran.
pub async fn ensure_default_categories(pool: &PgPool) -> Result<bool> {
    let mut tx = pool.begin().await?;

    if category_repository::count(&mut tx).await? > 0 {
        return Ok(false);
    }

    let defaults = default_categories();
    for category in &defaults {
        category_repository::insert(&mut tx, category).await?;
    }

    tx.commit().await?;

    tracing::info!("Seeded {} default categories", defaults.len());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_slugs_are_unique_and_well_formed() {
        let defaults = default_categories();
        let slugs: HashSet<&str> = defaults.iter().map(|c| c.slug.as_str()).collect();

        assert_eq!(slugs.len(), defaults.len());
        for category in &defaults {
            assert!(crate::shared::validation::SLUG_REGEX.is_match(&category.slug));
        }
    }

    #[test]
    fn test_seed_covers_both_kinds_as_roots() {
        let defaults = default_categories();

        assert!(defaults.iter().all(|c| c.parent_id.is_none()));
        assert!(defaults.iter().any(|c| c.kind == CategoryKind::Topic));
        assert!(defaults.iter().any(|c| c.kind == CategoryKind::Format));
    }

    #[test]
    fn test_seed_localizations_are_complete() {
        for category in default_categories() {
            for lang in ["en", "es", "fr"] {
                assert!(
                    category.name.get(lang).and_then(|v| v.as_str()).is_some(),
                    "category '{}' is missing a '{}' name",
                    category.slug,
                    lang
                );
            }
            assert!(crate::shared::validation::localized_map(&category.name).is_ok());
        }
    }
}
