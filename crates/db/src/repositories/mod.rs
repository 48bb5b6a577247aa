//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that take
//! `&SqlitePool` (or a connection, when they must join a caller's
//! transaction) as the first argument.

pub mod category_repo;
pub mod product_repo;
pub mod tag_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use product_repo::ProductRepo;
pub use tag_repo::TagRepo;
pub use user_repo::UserRepo;

/// Current time in the same RFC 3339 form the schema defaults produce.
pub(crate) const NOW_SQL: &str = "strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";

/// Build `(f1 LIKE ? ESCAPE '\' OR f2 LIKE ? ESCAPE '\' ...)` over admin
/// search fields. `prefix` qualifies columns (e.g. `"p."`); pass `""` for none.
///
/// Bind `catalog_core::search::contains_pattern(q)` once per field.
pub(crate) fn search_fields_condition(fields: &[&str], prefix: &str) -> String {
    let parts: Vec<String> = fields
        .iter()
        .map(|f| format!("{prefix}{f} LIKE ? ESCAPE '\\'"))
        .collect();
    format!("({})", parts.join(" OR "))
}

/// Comma-separated `?` placeholders for an `IN (...)` list of `n` values.
pub(crate) fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}
