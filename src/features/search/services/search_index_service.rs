use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::search::dtos::SearchHitDto;
use crate::features::search::models::SearchDocument;

/// Service owning the denormalized search documents.
///
/// Documents carry one row per entity and language, flattened out of the
/// localized JSON columns. Rebuilds run from the `search_reindex` task and
/// are scoped to a category subtree when the payload names a root.
pub struct SearchIndexService {
    pool: PgPool,
}

impl SearchIndexService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Trigram and unaccent backed lookup over the documents
    pub async fn search(&self, query: &str, limit: i64) -> Result<Vec<SearchHitDto>> {
        let hits = sqlx::query_as::<_, SearchDocument>(
            r#"
            SELECT id, entity_type, entity_id, language, title, body, updated_at
            FROM search_documents
            WHERE unaccent(title) ILIKE '%' || unaccent($1) || '%'
               OR unaccent(title) % unaccent($1)
            ORDER BY similarity(unaccent(title), unaccent($1)) DESC
            LIMIT $2
            "#,
        )
        .bind(query)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(hits.into_iter().map(|d| d.into()).collect())
    }

    /// Rebuild documents for a category subtree, or everything when no root
    /// is given. Stale rows for vanished entities are removed first.
    pub async fn rebuild(&self, root_category_id: Option<Uuid>) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        match root_category_id {
            Some(root) => self.rebuild_subtree(&mut tx, root).await?,
            None => self.rebuild_all(&mut tx).await?,
        }

        tx.commit().await?;

        tracing::debug!(
            "Search index rebuilt (root: {:?})",
            root_category_id
        );
        Ok(())
    }

    async fn rebuild_all(&self, conn: &mut PgConnection) -> Result<()> {
        sqlx::query("DELETE FROM search_documents")
            .execute(&mut *conn)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO search_documents (entity_type, entity_id, language, title, body)
            SELECT 'category', c.id, kv.key, kv.value,
                   c.description ->> kv.key
            FROM categories c, jsonb_each_text(c.name) kv
            WHERE c.is_active = TRUE
            "#,
        )
        .execute(&mut *conn)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO search_documents (entity_type, entity_id, language, title, body)
            SELECT 'content', ct.id, kv.key, kv.value,
                   ct.body ->> kv.key
            FROM content ct, jsonb_each_text(ct.title) kv
            WHERE ct.status = 'published'
            "#,
        )
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    async fn rebuild_subtree(&self, conn: &mut PgConnection, root: Uuid) -> Result<()> {
        // Drop rows for entities that no longer exist anywhere, then
        // re-derive the subtree's rows from the source tables
        sqlx::query(
            r#"
            DELETE FROM search_documents sd
            WHERE (sd.entity_type = 'category'
                   AND NOT EXISTS (SELECT 1 FROM categories c WHERE c.id = sd.entity_id))
               OR (sd.entity_type = 'content'
                   AND NOT EXISTS (SELECT 1 FROM content ct WHERE ct.id = sd.entity_id))
            "#,
        )
        .execute(&mut *conn)
        .await?;

        sqlx::query(
            r#"
            WITH RECURSIVE subtree AS (
                SELECT id FROM categories WHERE id = $1
                UNION ALL
                SELECT c.id FROM categories c
                JOIN subtree s ON c.parent_id = s.id
            )
            DELETE FROM search_documents sd
            WHERE (sd.entity_type = 'category' AND sd.entity_id IN (SELECT id FROM subtree))
               OR (sd.entity_type = 'content' AND sd.entity_id IN (
                       SELECT ct.id FROM content ct
                       WHERE ct.category_id IN (SELECT id FROM subtree)))
            "#,
        )
        .bind(root)
        .execute(&mut *conn)
        .await?;

        sqlx::query(
            r#"
            WITH RECURSIVE subtree AS (
                SELECT id FROM categories WHERE id = $1
                UNION ALL
                SELECT c.id FROM categories c
                JOIN subtree s ON c.parent_id = s.id
            )
            INSERT INTO search_documents (entity_type, entity_id, language, title, body)
            SELECT 'category', c.id, kv.key, kv.value,
                   c.description ->> kv.key
            FROM categories c, jsonb_each_text(c.name) kv
            WHERE c.is_active = TRUE AND c.id IN (SELECT id FROM subtree)
            "#,
        )
        .bind(root)
        .execute(&mut *conn)
        .await?;

        sqlx::query(
            r#"
            WITH RECURSIVE subtree AS (
                SELECT id FROM categories WHERE id = $1
                UNION ALL
                SELECT c.id FROM categories c
                JOIN subtree s ON c.parent_id = s.id
            )
            INSERT INTO search_documents (entity_type, entity_id, language, title, body)
            SELECT 'content', ct.id, kv.key, kv.value,
                   ct.body ->> kv.key
            FROM content ct, jsonb_each_text(ct.title) kv
            WHERE ct.status = 'published'
              AND ct.category_id IN (SELECT id FROM subtree)
            "#,
        )
        .bind(root)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Remove documents whose owning entity no longer exists; used by the
    /// `orphan_cleanup` task
    pub async fn prune_orphans(&self) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM search_documents sd
            WHERE (sd.entity_type = 'category'
                   AND NOT EXISTS (SELECT 1 FROM categories c WHERE c.id = sd.entity_id))
               OR (sd.entity_type = 'content'
                   AND NOT EXISTS (SELECT 1 FROM content ct WHERE ct.id = sd.entity_id))
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
