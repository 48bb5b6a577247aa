//! Repository for the `products` table, including catalog search.

use catalog_core::admin::{clamp_limit, clamp_offset, display_list, PRODUCT_ADMIN};
use catalog_core::price::format_price;
use catalog_core::search::{contains_pattern, ProductFilter, TagMatch};
use catalog_core::types::DbId;
use sqlx::SqlitePool;

use super::{placeholders, search_fields_condition, CategoryRepo, TagRepo, NOW_SQL};
use crate::models::list::ProductAdminListParams;
use crate::models::product::{
    CatalogProduct, CreateProduct, Product, ProductAdminRow, ProductListing, UpdateProduct,
};

/// Column list for plain `products` queries.
const COLUMNS: &str = "id, title, slug, description, price_cents, inventory, is_active, \
                       category_id, created_at, updated_at";

/// Column list for queries joining `products p` with `categories c`.
const LISTING_COLUMNS: &str = "p.id, p.title, p.slug, p.description, p.price_cents, \
                               p.inventory, p.is_active, p.category_id, p.created_at, \
                               p.updated_at, c.name AS category_name";

/// Provides CRUD and search operations for products.
pub struct ProductRepo;

impl ProductRepo {
    // -----------------------------------------------------------------------
    // CRUD
    // -----------------------------------------------------------------------

    /// Insert a product and its tag associations in one transaction.
    pub async fn create(pool: &SqlitePool, input: &CreateProduct) -> Result<Product, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO products \
                (title, slug, description, price_cents, inventory, is_active, category_id) \
             VALUES (?, ?, ?, ?, ?, ?, ?) \
             RETURNING {COLUMNS}"
        );
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(input.title.trim())
            .bind(&input.slug)
            .bind(&input.description)
            .bind(input.price_cents)
            .bind(input.inventory)
            .bind(input.is_active)
            .bind(input.category_id)
            .fetch_one(&mut *tx)
            .await?;

        TagRepo::set_product_tags(&mut *tx, product.id, &input.tag_ids).await?;
        tx.commit().await?;

        Ok(product)
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = ?");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// A product with its category name and tags.
    pub async fn find_catalog_product(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<CatalogProduct>, sqlx::Error> {
        let query = format!(
            "SELECT {LISTING_COLUMNS} FROM products p \
             JOIN categories c ON c.id = p.category_id \
             WHERE p.id = ?"
        );
        let listing = sqlx::query_as::<_, ProductListing>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        match listing {
            Some(listing) => {
                let tags = TagRepo::for_product(pool, id).await?;
                Ok(Some(CatalogProduct::new(listing, tags)))
            }
            None => Ok(None),
        }
    }

    /// Update a product. Only `Some` fields are applied; `tag_ids` replaces
    /// the tag set when present.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE products SET
                title = COALESCE(?, title),
                slug = COALESCE(?, slug),
                description = COALESCE(?, description),
                price_cents = COALESCE(?, price_cents),
                inventory = COALESCE(?, inventory),
                is_active = COALESCE(?, is_active),
                category_id = COALESCE(?, category_id),
                updated_at = {NOW_SQL}
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(input.title.as_deref().map(str::trim))
            .bind(input.slug.as_deref())
            .bind(input.description.as_deref())
            .bind(input.price_cents)
            .bind(input.inventory)
            .bind(input.is_active)
            .bind(input.category_id)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(product) = product else {
            return Ok(None);
        };

        if let Some(tag_ids) = &input.tag_ids {
            TagRepo::set_product_tags(&mut *tx, id, tag_ids).await?;
        }
        tx.commit().await?;

        Ok(Some(product))
    }

    /// Delete a product and, via cascade, its tag associations.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Catalog search
    // -----------------------------------------------------------------------

    /// Run the search page filter against the catalog.
    ///
    /// Every present predicate narrows the result:
    /// - each search term must occur in the description (case-insensitive);
    /// - the product must belong to the selected category;
    /// - the product must carry any (or, with [`TagMatch::All`], every)
    ///   selected tag.
    ///
    /// An empty filter returns the whole catalog, and a filter over
    /// [`ProductFilter::exceeds_limits`] returns nothing. Results are ordered
    /// by title.
    ///
    /// Case folding is SQLite's `LIKE`: ASCII letters only, so `"CRÈME"` does
    /// not find `"crème"`.
    pub async fn search(
        pool: &SqlitePool,
        filter: &ProductFilter,
    ) -> Result<Vec<CatalogProduct>, sqlx::Error> {
        if filter.exceeds_limits() {
            tracing::debug!(
                terms = filter.search_terms.len(),
                tags = filter.tags.len(),
                "Catalog search over filter limits, matching nothing",
            );
            return Ok(Vec::new());
        }

        let category_id = match &filter.category {
            Some(selector) => match CategoryRepo::resolve(pool, selector).await? {
                Some(id) => Some(id),
                None => return Ok(Vec::new()),
            },
            None => None,
        };

        let tag_ids = if filter.tags.is_empty() {
            Vec::new()
        } else {
            let mut resolved = Vec::with_capacity(filter.tags.len());
            for selector in &filter.tags {
                resolved.push(TagRepo::resolve(pool, selector).await?);
            }
            match filter.tag_match.reduce(&resolved) {
                Some(ids) => ids,
                None => return Ok(Vec::new()),
            }
        };

        // Build dynamic WHERE clauses; binds follow the same order below.
        let mut conditions: Vec<String> = Vec::new();
        for _ in &filter.search_terms {
            conditions.push("p.description LIKE ? ESCAPE '\\'".to_string());
        }
        if category_id.is_some() {
            conditions.push("p.category_id = ?".to_string());
        }
        if !tag_ids.is_empty() {
            let list = placeholders(tag_ids.len());
            conditions.push(match filter.tag_match {
                TagMatch::Any => format!(
                    "p.id IN (SELECT product_id FROM product_tags WHERE tag_id IN ({list}))"
                ),
                TagMatch::All => format!(
                    "p.id IN (SELECT product_id FROM product_tags WHERE tag_id IN ({list}) \
                     GROUP BY product_id HAVING COUNT(DISTINCT tag_id) = ?)"
                ),
            });
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {LISTING_COLUMNS} FROM products p \
             JOIN categories c ON c.id = p.category_id \
             {where_clause} \
             ORDER BY p.title, p.id"
        );

        let mut q = sqlx::query_as::<_, ProductListing>(&query);
        for term in &filter.search_terms {
            q = q.bind(contains_pattern(term));
        }
        if let Some(id) = category_id {
            q = q.bind(id);
        }
        for id in &tag_ids {
            q = q.bind(*id);
        }
        if !tag_ids.is_empty() && filter.tag_match == TagMatch::All {
            q = q.bind(tag_ids.len() as i64);
        }

        let listings = q.fetch_all(pool).await?;
        tracing::debug!(
            terms = filter.search_terms.len(),
            category_id,
            tags = tag_ids.len(),
            tag_match = filter.tag_match.as_str(),
            results = listings.len(),
            "Catalog search executed",
        );

        Self::attach_tags(pool, listings).await
    }

    // -----------------------------------------------------------------------
    // Admin list
    // -----------------------------------------------------------------------

    /// Admin product list shaped by [`PRODUCT_ADMIN`]: `?q=` over its
    /// search fields, its `category` list filter, ordering and pagination.
    pub async fn admin_list(
        pool: &SqlitePool,
        params: &ProductAdminListParams,
    ) -> Result<Vec<ProductAdminRow>, sqlx::Error> {
        let q = params.q.as_deref().map(str::trim).filter(|q| !q.is_empty());

        let mut conditions: Vec<String> = Vec::new();
        if q.is_some() {
            conditions.push(search_fields_condition(PRODUCT_ADMIN.search_fields, "p."));
        }
        if params.category.is_some() {
            conditions.push("p.category_id = ?".to_string());
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {LISTING_COLUMNS} FROM products p \
             JOIN categories c ON c.id = p.category_id \
             {where_clause} \
             ORDER BY p.{ordering}, p.id LIMIT ? OFFSET ?",
            ordering = PRODUCT_ADMIN.ordering,
        );

        let mut query = sqlx::query_as::<_, ProductListing>(&query);
        if let Some(q) = q {
            let pattern = contains_pattern(q);
            for _ in PRODUCT_ADMIN.search_fields {
                query = query.bind(pattern.clone());
            }
        }
        if let Some(category_id) = params.category {
            query = query.bind(category_id);
        }
        let listings = query
            .bind(clamp_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await?;

        let products = Self::attach_tags(pool, listings).await?;
        Ok(products
            .into_iter()
            .map(|p| ProductAdminRow {
                display_tags: display_list(p.tags.iter().map(|t| t.name.as_str())),
                id: p.product.id,
                title: p.product.title,
                description: p.product.description,
                price: format_price(p.product.price_cents),
                category: p.category_name,
                inventory: p.product.inventory,
                is_active: p.product.is_active,
            })
            .collect())
    }

    /// Total number of products in the catalog.
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Load the tags of all listed products in one batch and combine them.
    async fn attach_tags(
        pool: &SqlitePool,
        listings: Vec<ProductListing>,
    ) -> Result<Vec<CatalogProduct>, sqlx::Error> {
        let ids: Vec<DbId> = listings.iter().map(|l| l.product.id).collect();
        let mut tags = TagRepo::for_products(pool, &ids).await?;

        Ok(listings
            .into_iter()
            .map(|listing| {
                let product_tags = tags.remove(&listing.product.id).unwrap_or_default();
                CatalogProduct::new(listing, product_tags)
            })
            .collect())
    }
}
