//! Product search parameters and the pure parts of filter construction.
//!
//! The public search page and the JSON search endpoint both accept the same
//! query string:
//!
//! ```text
//! ?search=wireless noise&category=electronics&tags=1&tags=best seller&tag_match=all
//! ```
//!
//! Parsing is lenient: blank or malformed values impose no restriction
//! instead of failing the request.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Most distinct words a search may require. A longer search matches nothing.
pub const MAX_SEARCH_TERMS: usize = 16;

/// Most distinct tag selectors a search may carry. More match nothing.
pub const MAX_TAG_SELECTORS: usize = 32;

/// Query-string key for the free-text description search.
pub const PARAM_SEARCH: &str = "search";
/// Query-string key for the category selector.
pub const PARAM_CATEGORY: &str = "category";
/// Query-string key for a tag selector (repeatable).
pub const PARAM_TAGS: &str = "tags";
/// Query-string key for the tag matching mode.
pub const PARAM_TAG_MATCH: &str = "tag_match";

// ---------------------------------------------------------------------------
// Selectors
// ---------------------------------------------------------------------------

/// A filter value naming a category or tag, either by id or by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    Id(DbId),
    Name(String),
}

impl Selector {
    /// Parse a raw query value. Integers are ids, anything else is a name.
    ///
    /// Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.parse::<DbId>() {
            Ok(id) => Some(Selector::Id(id)),
            Err(_) => Some(Selector::Name(trimmed.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tag matching
// ---------------------------------------------------------------------------

/// How multiple selected tags combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagMatch {
    /// A product matches if it carries at least one selected tag.
    #[default]
    Any,
    /// A product matches only if it carries every selected tag.
    All,
}

impl TagMatch {
    /// Lenient parse: anything other than `all` means [`TagMatch::Any`].
    pub fn from_param(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("all") {
            TagMatch::All
        } else {
            TagMatch::Any
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TagMatch::Any => "any",
            TagMatch::All => "all",
        }
    }

    /// Reduce resolved tag selectors to the tag ids the query must use.
    ///
    /// `resolved` holds one entry per selector: the tag id it resolved to, or
    /// `None` when no tag matched. Returns `None` when no product can match.
    pub fn reduce(self, resolved: &[Option<DbId>]) -> Option<Vec<DbId>> {
        let mut ids: Vec<DbId> = Vec::with_capacity(resolved.len());
        for entry in resolved {
            match entry {
                Some(id) => {
                    if !ids.contains(id) {
                        ids.push(*id);
                    }
                }
                None if self == TagMatch::All => return None,
                None => {}
            }
        }
        if ids.is_empty() && !resolved.is_empty() {
            return None;
        }
        Some(ids)
    }
}

// ---------------------------------------------------------------------------
// Raw parameters (echoed back into the search form)
// ---------------------------------------------------------------------------

/// Search parameters exactly as the user submitted them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchParams {
    pub search: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub tag_match: TagMatch,
}

impl SearchParams {
    /// Build from decoded `(key, value)` query pairs. Unknown keys are ignored;
    /// for single-valued keys the last occurrence wins. Repeated tag values
    /// are kept once.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = SearchParams::default();
        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                PARAM_SEARCH => params.search = value.to_string(),
                PARAM_CATEGORY => {
                    params.category = Some(value.trim().to_string()).filter(|v| !v.is_empty())
                }
                PARAM_TAGS | "tags[]" => {
                    let value = value.trim();
                    if !value.is_empty() && !params.has_tag(value) {
                        params.tags.push(value.to_string());
                    }
                }
                PARAM_TAG_MATCH => params.tag_match = TagMatch::from_param(value),
                _ => {}
            }
        }
        params
    }

    /// Whether the given tag value was among the submitted selections.
    pub fn has_tag(&self, value: &str) -> bool {
        self.tags.iter().any(|t| t == value)
    }

    /// Convert to the structured filter the repository executes.
    pub fn to_filter(&self) -> ProductFilter {
        let mut tags: Vec<Selector> = Vec::new();
        for selector in self.tags.iter().filter_map(|t| Selector::parse(t)) {
            if !tags.contains(&selector) {
                tags.push(selector);
            }
        }

        ProductFilter {
            search_terms: split_search_terms(&self.search),
            category: self.category.as_deref().and_then(Selector::parse),
            tags,
            tag_match: self.tag_match,
        }
    }
}

// ---------------------------------------------------------------------------
// Structured filter
// ---------------------------------------------------------------------------

/// The set of predicates applied to the catalog. Every present field narrows
/// the result; an empty filter selects the whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Every term must occur in the description (case-insensitive).
    pub search_terms: Vec<String>,
    pub category: Option<Selector>,
    pub tags: Vec<Selector>,
    pub tag_match: TagMatch,
}

impl ProductFilter {
    pub fn is_empty(&self) -> bool {
        self.search_terms.is_empty() && self.category.is_none() && self.tags.is_empty()
    }

    /// Whether the filter carries more distinct terms or tags than a query
    /// may bind. Such a filter matches no product.
    pub fn exceeds_limits(&self) -> bool {
        self.search_terms.len() > MAX_SEARCH_TERMS || self.tags.len() > MAX_TAG_SELECTORS
    }
}

/// Split free text into distinct search words, in order of first occurrence.
pub fn split_search_terms(query: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for word in query.split_whitespace() {
        if !terms.iter().any(|t| t == word) {
            terms.push(word.to_string());
        }
    }
    terms
}

/// Escape `LIKE` wildcards so user input matches literally.
///
/// Pair with `ESCAPE '\'` in the SQL.
pub fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// A `LIKE` pattern matching any value that contains `term`.
pub fn contains_pattern(term: &str) -> String {
    format!("%{}%", escape_like(term))
}
