//! Repository for the `tags` and `product_tags` tables.

use std::collections::HashMap;

use catalog_core::admin::{clamp_limit, clamp_offset, TAG_ADMIN};
use catalog_core::search::{contains_pattern, Selector};
use catalog_core::types::DbId;
use sqlx::{SqliteConnection, SqlitePool};

use super::{placeholders, search_fields_condition, NOW_SQL};
use crate::models::list::AdminListParams;
use crate::models::tag::{CreateTag, ProductTagRow, Tag, TagInfo, UpdateTag};

/// Column list for `tags` queries.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Product ids per `IN (...)` batch when loading tags for many products.
const PRODUCT_BATCH_SIZE: usize = 500;

/// Provides CRUD operations for tags and product-tag associations.
pub struct TagRepo;

impl TagRepo {
    // -----------------------------------------------------------------------
    // Tag CRUD
    // -----------------------------------------------------------------------

    pub async fn create(pool: &SqlitePool, input: &CreateTag) -> Result<Tag, sqlx::Error> {
        let query = format!("INSERT INTO tags (name) VALUES (?) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Tag>(&query)
            .bind(input.name.trim())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags WHERE id = ?");
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a search-page selector to a tag id. Names match case-insensitively.
    pub async fn resolve(
        pool: &SqlitePool,
        selector: &Selector,
    ) -> Result<Option<DbId>, sqlx::Error> {
        let row: Option<(DbId,)> = match selector {
            Selector::Id(id) => {
                sqlx::query_as("SELECT id FROM tags WHERE id = ?")
                    .bind(id)
                    .fetch_optional(pool)
                    .await?
            }
            Selector::Name(name) => {
                sqlx::query_as("SELECT id FROM tags WHERE name = ?")
                    .bind(name)
                    .fetch_optional(pool)
                    .await?
            }
        };
        Ok(row.map(|(id,)| id))
    }

    /// Every tag, ordered by name. Feeds the search form's checkboxes.
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags ORDER BY name, id");
        sqlx::query_as::<_, Tag>(&query).fetch_all(pool).await
    }

    /// Admin list: optional `?q=` over the descriptor's search fields, paginated.
    pub async fn list(pool: &SqlitePool, params: &AdminListParams) -> Result<Vec<Tag>, sqlx::Error> {
        let q = params.q.as_deref().map(str::trim).filter(|q| !q.is_empty());
        let where_clause = match q {
            Some(_) => format!("WHERE {}", search_fields_condition(TAG_ADMIN.search_fields, "")),
            None => String::new(),
        };
        let query = format!(
            "SELECT {COLUMNS} FROM tags {where_clause} \
             ORDER BY {ordering}, id LIMIT ? OFFSET ?",
            ordering = TAG_ADMIN.ordering,
        );

        let mut query = sqlx::query_as::<_, Tag>(&query);
        if let Some(q) = q {
            let pattern = contains_pattern(q);
            for _ in TAG_ADMIN.search_fields {
                query = query.bind(pattern.clone());
            }
        }
        query
            .bind(clamp_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// Rename a tag. Returns `None` if no tag with the given ID exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateTag,
    ) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!(
            "UPDATE tags SET
                name = COALESCE(?, name),
                updated_at = {NOW_SQL}
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(input.name.as_deref().map(str::trim))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a tag and, via cascade, all its product associations.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tags WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Product-tag associations
    // -----------------------------------------------------------------------

    /// Return the subset of `ids` that do not name an existing tag.
    pub async fn find_missing(pool: &SqlitePool, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT id FROM tags WHERE id IN ({})",
            placeholders(ids.len())
        );
        let mut q = sqlx::query_as::<_, (DbId,)>(&query);
        for id in ids {
            q = q.bind(id);
        }
        let found: Vec<DbId> = q.fetch_all(pool).await?.into_iter().map(|(id,)| id).collect();

        let mut missing: Vec<DbId> = Vec::new();
        for id in ids {
            if !found.contains(id) && !missing.contains(id) {
                missing.push(*id);
            }
        }
        Ok(missing)
    }

    /// Replace the full tag set of a product inside the caller's transaction.
    pub async fn set_product_tags(
        conn: &mut SqliteConnection,
        product_id: DbId,
        tag_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM product_tags WHERE product_id = ?")
            .bind(product_id)
            .execute(&mut *conn)
            .await?;

        for tag_id in tag_ids {
            sqlx::query(
                "INSERT INTO product_tags (product_id, tag_id) VALUES (?, ?) \
                 ON CONFLICT (product_id, tag_id) DO NOTHING",
            )
            .bind(product_id)
            .bind(tag_id)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    /// Tags of a single product, ordered by name.
    pub async fn for_product(pool: &SqlitePool, product_id: DbId) -> Result<Vec<TagInfo>, sqlx::Error> {
        sqlx::query_as::<_, TagInfo>(
            "SELECT t.id, t.name FROM tags t \
             JOIN product_tags pt ON pt.tag_id = t.id \
             WHERE pt.product_id = ? \
             ORDER BY t.name, t.id",
        )
        .bind(product_id)
        .fetch_all(pool)
        .await
    }

    /// Tags of many products at once, grouped by product id.
    ///
    /// Issues one query per [`PRODUCT_BATCH_SIZE`] products instead of one per
    /// product. Products without tags are absent from the map.
    pub async fn for_products(
        pool: &SqlitePool,
        product_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<TagInfo>>, sqlx::Error> {
        let mut by_product: HashMap<DbId, Vec<TagInfo>> = HashMap::new();

        for batch in product_ids.chunks(PRODUCT_BATCH_SIZE) {
            let query = format!(
                "SELECT pt.product_id, t.id, t.name FROM product_tags pt \
                 JOIN tags t ON t.id = pt.tag_id \
                 WHERE pt.product_id IN ({}) \
                 ORDER BY t.name, t.id",
                placeholders(batch.len())
            );
            let mut q = sqlx::query_as::<_, ProductTagRow>(&query);
            for id in batch {
                q = q.bind(id);
            }
            for row in q.fetch_all(pool).await? {
                by_product.entry(row.product_id).or_default().push(TagInfo {
                    id: row.id,
                    name: row.name,
                });
            }
        }

        Ok(by_product)
    }
}
