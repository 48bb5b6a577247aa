//! Repository for the `categories` table.

use catalog_core::admin::{clamp_limit, clamp_offset, CATEGORY_ADMIN};
use catalog_core::search::{contains_pattern, Selector};
use catalog_core::types::DbId;
use sqlx::SqlitePool;

use super::{search_fields_condition, NOW_SQL};
use crate::models::category::{Category, CreateCategory, UpdateCategory};
use crate::models::list::AdminListParams;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, description, created_at, updated_at";

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category. The caller resolves the slug beforehand.
    pub async fn create(
        pool: &SqlitePool,
        input: &CreateCategory,
        slug: &str,
    ) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (name, slug, description)
             VALUES (?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(input.name.trim())
            .bind(slug)
            .bind(input.description.as_deref().unwrap_or(""))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = ?");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a search-page selector to a category id.
    ///
    /// Names match case-insensitively against either the name or the slug.
    pub async fn resolve(
        pool: &SqlitePool,
        selector: &Selector,
    ) -> Result<Option<DbId>, sqlx::Error> {
        let row: Option<(DbId,)> = match selector {
            Selector::Id(id) => {
                sqlx::query_as("SELECT id FROM categories WHERE id = ?")
                    .bind(id)
                    .fetch_optional(pool)
                    .await?
            }
            Selector::Name(name) => {
                sqlx::query_as(
                    "SELECT id FROM categories WHERE name = ? OR slug = lower(?) ORDER BY id LIMIT 1",
                )
                .bind(name)
                .bind(name)
                .fetch_optional(pool)
                .await?
            }
        };
        Ok(row.map(|(id,)| id))
    }

    /// Every category, ordered by name. Feeds the search form's select box.
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY name, id");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// Admin list: optional `?q=` over the descriptor's search fields, paginated.
    pub async fn list(
        pool: &SqlitePool,
        params: &AdminListParams,
    ) -> Result<Vec<Category>, sqlx::Error> {
        let q = params.q.as_deref().map(str::trim).filter(|q| !q.is_empty());
        let where_clause = match q {
            Some(_) => format!(
                "WHERE {}",
                search_fields_condition(CATEGORY_ADMIN.search_fields, "")
            ),
            None => String::new(),
        };
        let query = format!(
            "SELECT {COLUMNS} FROM categories {where_clause} \
             ORDER BY {ordering}, id LIMIT ? OFFSET ?",
            ordering = CATEGORY_ADMIN.ordering,
        );

        let mut query = sqlx::query_as::<_, Category>(&query);
        if let Some(q) = q {
            let pattern = contains_pattern(q);
            for _ in CATEGORY_ADMIN.search_fields {
                query = query.bind(pattern.clone());
            }
        }
        query
            .bind(clamp_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// Number of products owned by a category.
    pub async fn count_products(pool: &SqlitePool, id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products WHERE category_id = ?")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Update a category. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET
                name = COALESCE(?, name),
                slug = COALESCE(?, slug),
                description = COALESCE(?, description),
                updated_at = {NOW_SQL}
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.slug.as_deref())
            .bind(input.description.as_deref())
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category. Returns `true` if a row was removed.
    ///
    /// Fails with a foreign-key violation while products still reference it.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
