//! Query-string extraction for the catalog search endpoints.
//!
//! `axum::extract::Query` cannot collect a repeated key (`?tags=1&tags=2`)
//! into a list, so the raw query string is decoded pair by pair instead.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, RawQuery};
use axum::http::request::Parts;
use catalog_core::search::SearchParams;

/// Search parameters taken from the request's query string.
///
/// Never rejects: malformed input yields fewer filters.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery(pub SearchParams);

impl SearchQuery {
    /// Decode a raw (still percent-encoded) query string.
    pub fn parse(raw: &str) -> Self {
        SearchQuery(SearchParams::from_pairs(url::form_urlencoded::parse(
            raw.as_bytes(),
        )))
    }
}

impl<S> FromRequestParts<S> for SearchQuery
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RawQuery(raw) = RawQuery::from_request_parts(parts, state).await?;
        Ok(raw.as_deref().map(SearchQuery::parse).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use catalog_core::search::TagMatch;

    use super::*;

    #[test]
    fn repeated_tags_are_collected() {
        let SearchQuery(params) =
            SearchQuery::parse("search=noise+cancelling&tags=1&tags=Best%20Seller&tag_match=all");
        assert_eq!(params.search, "noise cancelling");
        assert_eq!(params.tags, vec!["1", "Best Seller"]);
        assert_eq!(params.tag_match, TagMatch::All);
    }

    #[test]
    fn bracketed_tag_keys_are_accepted() {
        let SearchQuery(params) = SearchQuery::parse("tags%5B%5D=2&tags[]=3");
        assert_eq!(params.tags, vec!["2", "3"]);
    }

    #[test]
    fn empty_query_is_the_full_catalog() {
        let SearchQuery(params) = SearchQuery::parse("");
        assert!(params.to_filter().is_empty());
    }
}
