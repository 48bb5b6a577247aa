//! Catalog search against the demo seed.
//!
//! Every filter combination must return exactly the intersection of the
//! per-filter matches, and an empty filter the whole catalog.

use std::collections::BTreeSet;

use catalog_core::search::{ProductFilter, SearchParams, Selector, TagMatch};
use catalog_core::types::DbId;
use catalog_db::models::product::CatalogProduct;
use catalog_db::repositories::ProductRepo;
use sqlx::SqlitePool;

// Ids from db/seeds/demo.sql.
const ELECTRONICS: DbId = 1;
const KITCHEN: DbId = 2;
const ECO_FRIENDLY: DbId = 1;
const BEST_SELLER: DbId = 2;
const ON_SALE: DbId = 4;

async fn seeded(pool: &SqlitePool) {
    assert!(catalog_db::seed_demo_data(pool).await.unwrap());
}

async fn search(pool: &SqlitePool, filter: &ProductFilter) -> Vec<CatalogProduct> {
    ProductRepo::search(pool, filter).await.unwrap()
}

async fn ids(pool: &SqlitePool, filter: &ProductFilter) -> BTreeSet<DbId> {
    search(pool, filter).await.iter().map(|p| p.product.id).collect()
}

fn set<const N: usize>(ids: [DbId; N]) -> BTreeSet<DbId> {
    ids.into_iter().collect()
}

fn params(pairs: &[(&str, &str)]) -> ProductFilter {
    SearchParams::from_pairs(pairs.iter().copied()).to_filter()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_filter_returns_catalog_by_title(pool: SqlitePool) {
    seeded(&pool).await;

    let products = search(&pool, &ProductFilter::default()).await;
    let titles: Vec<_> = products.iter().map(|p| p.product.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Bamboo Cutting Board",
            "Bluetooth Speaker",
            "Cast Iron Skillet",
            "Insulated Water Bottle",
            "USB-C Charger",
            "Ultralight Tent",
            "Wireless Earbuds",
        ]
    );

    let earbuds = products.last().unwrap();
    assert_eq!(earbuds.category_name, "Electronics");
    assert_eq!(earbuds.price, "99.99");
    assert!(earbuds.has_tag(ECO_FRIENDLY));
    assert!(earbuds.has_tag(BEST_SELLER));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_description_search_is_case_insensitive(pool: SqlitePool) {
    seeded(&pool).await;

    assert_eq!(ids(&pool, &params(&[("search", "WIRELESS")])).await, set([1]));
    assert_eq!(ids(&pool, &params(&[("search", "bamboo knives")])).await, set([5]));
    assert!(ids(&pool, &params(&[("search", "bamboo tent")])).await.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_filters_intersect(pool: SqlitePool) {
    seeded(&pool).await;
    let catalog = ids(&pool, &ProductFilter::default()).await;

    let triples = [
        ("steel", "3", "2"),
        ("with", "Electronics", "Eco-Friendly"),
        ("bamboo", "kitchen", "On Sale"),
        ("skillet", "1", "3"),
    ];
    for (text, category, tag) in triples {
        let singles = [
            ids(&pool, &params(&[("search", text)])).await,
            ids(&pool, &params(&[("category", category)])).await,
            ids(&pool, &params(&[("tags", tag)])).await,
        ];
        let pairs = [("search", text), ("category", category), ("tags", tag)];

        // Every present/absent combination of the three filters.
        for mask in 0..8u8 {
            let present: Vec<usize> = (0..3).filter(|&i| mask & (1u8 << i) != 0).collect();
            let query: Vec<(&str, &str)> = present.iter().map(|&i| pairs[i]).collect();

            let mut expected = catalog.clone();
            for &i in &present {
                expected = expected.intersection(&singles[i]).copied().collect();
            }

            assert_eq!(
                ids(&pool, &params(&query)).await,
                expected,
                "filters {query:?}"
            );
        }
    }

    let combined = params(&[("search", "steel"), ("category", "3"), ("tags", "2")]);
    assert_eq!(ids(&pool, &combined).await, set([6]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_repeated_search_words_keep_every_distinct_word(pool: SqlitePool) {
    seeded(&pool).await;

    let text = format!("{}zzzznotthere", "wireless ".repeat(16));
    assert!(ids(&pool, &params(&[("search", text.as_str())])).await.is_empty());

    let text = format!("{}earbuds", "wireless ".repeat(16));
    assert_eq!(ids(&pool, &params(&[("search", text.as_str())])).await, set([1]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_repeated_tags_do_not_hide_later_tags(pool: SqlitePool) {
    seeded(&pool).await;

    let mut pairs = vec![("tags", "1"); 32];
    pairs.push(("tags", "4"));
    pairs.push(("tag_match", "all"));
    let found = search(&pool, &params(&pairs)).await;
    let titles: Vec<_> = found.iter().map(|p| p.product.title.as_str()).collect();
    assert_eq!(titles, vec!["Bamboo Cutting Board"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_filters_over_limits_match_nothing(pool: SqlitePool) {
    seeded(&pool).await;

    // 17 distinct words, each of which occurs in the earbuds description.
    let words = [
        "h", "i", "g", "q", "u", "a", "l", "t", "y", "w", "r", "e", "s", "b", "d", "n", "o",
    ];
    let text = words.join(" ");
    let filter = params(&[("search", text.as_str())]);
    assert_eq!(filter.search_terms.len(), 17);
    assert!(filter.exceeds_limits());
    assert!(ids(&pool, &filter).await.is_empty());

    let names: Vec<String> = (0..33).map(|i| format!("tag-{i}")).collect();
    let mut pairs: Vec<(&str, &str)> = names.iter().map(|n| ("tags", n.as_str())).collect();
    pairs.push(("tags", "Eco-Friendly"));
    let filter = params(&pairs);
    assert!(filter.exceeds_limits());
    assert!(ids(&pool, &filter).await.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_case_folding_is_ascii_only(pool: SqlitePool) {
    seeded(&pool).await;
    sqlx::query("UPDATE products SET description = 'Torch for crème brûlée' WHERE id = 3")
        .execute(&pool)
        .await
        .unwrap();

    assert_eq!(ids(&pool, &params(&[("search", "TORCH crème")])).await, set([3]));
    assert!(ids(&pool, &params(&[("search", "CRÈME")])).await.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_category_filter(pool: SqlitePool) {
    seeded(&pool).await;

    let filter = ProductFilter {
        category: Some(Selector::Id(KITCHEN)),
        ..Default::default()
    };
    assert_eq!(ids(&pool, &filter).await, set([4, 5]));

    let filter = ProductFilter {
        category: Some(Selector::Name("Electronics".into())),
        ..Default::default()
    };
    assert_eq!(ids(&pool, &filter).await, set([1, 2, 3]));

    let filter = ProductFilter {
        category: Some(Selector::Id(ELECTRONICS + 100)),
        ..Default::default()
    };
    assert!(ids(&pool, &filter).await.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tag_match_any_and_all(pool: SqlitePool) {
    seeded(&pool).await;

    let any = ProductFilter {
        tags: vec![Selector::Id(BEST_SELLER), Selector::Id(ON_SALE)],
        tag_match: TagMatch::Any,
        ..Default::default()
    };
    assert_eq!(ids(&pool, &any).await, set([1, 4, 5, 6, 7]));

    let all = ProductFilter {
        tags: vec![Selector::Id(ECO_FRIENDLY), Selector::Id(BEST_SELLER)],
        tag_match: TagMatch::All,
        ..Default::default()
    };
    assert_eq!(ids(&pool, &all).await, set([1, 6]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unresolved_tags(pool: SqlitePool) {
    seeded(&pool).await;

    // `any` drops selectors that match nothing.
    let any = params(&[("tags", "On Sale"), ("tags", "No Such Tag")]);
    assert_eq!(ids(&pool, &any).await, set([5, 7]));

    let none = params(&[("tags", "No Such Tag")]);
    assert!(ids(&pool, &none).await.is_empty());

    // `all` cannot be satisfied by a tag that does not exist.
    let all = params(&[("tags", "On Sale"), ("tags", "999"), ("tag_match", "all")]);
    assert!(ids(&pool, &all).await.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_includes_inactive_products(pool: SqlitePool) {
    seeded(&pool).await;
    sqlx::query("UPDATE products SET is_active = 0 WHERE id = 2")
        .execute(&pool)
        .await
        .unwrap();

    let found = search(&pool, &params(&[("search", "bass")])).await;
    assert_eq!(found.len(), 1);
    assert!(!found[0].product.is_active);
}
