//! Slug generation and name validation shared by categories, tags and products.

use crate::error::CoreError;

/// Maximum length of a name, title or slug column.
pub const MAX_NAME_LENGTH: usize = 255;

/// Derive a URL-safe slug from a human-readable name.
///
/// Lowercases ASCII, turns every run of non-alphanumeric characters into a
/// single hyphen and drops hyphens at either end. Non-ASCII letters are
/// treated as separators, so `"Café Crème"` becomes `"caf-cr-me"`.
pub fn generate_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug.truncate(MAX_NAME_LENGTH);
    slug.trim_end_matches('-').to_string()
}

/// Validate a slug: non-empty, bounded, lowercase alphanumerics and hyphens.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("Slug must not be empty".into()));
    }
    if slug.len() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Slug must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(CoreError::Validation(
            "Slug must contain only lowercase alphanumeric characters and hyphens".into(),
        ));
    }
    Ok(())
}

/// Validate a display name (category name, tag name, product title).
///
/// `field` names the offending field in the error message.
pub fn validate_name(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Use the explicit slug when one was supplied, otherwise derive it from `source`.
///
/// The result is validated either way, so a name made entirely of
/// punctuation is rejected rather than stored with an empty slug.
pub fn resolve_slug(explicit: Option<&str>, source: &str) -> Result<String, CoreError> {
    let slug = match explicit.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s.to_string(),
        None => generate_slug(source),
    };
    validate_slug(&slug)?;
    Ok(slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn slug_from_plain_title() {
        assert_eq!(generate_slug("Wireless Earbuds"), "wireless-earbuds");
    }

    #[test]
    fn slug_collapses_punctuation_runs() {
        assert_eq!(generate_slug("Eco -- Friendly!!"), "eco-friendly");
        assert_eq!(generate_slug("  (Best) Seller  "), "best-seller");
    }

    #[test]
    fn slug_treats_non_ascii_as_separator() {
        assert_eq!(generate_slug("Café Crème"), "caf-cr-me");
    }

    #[test]
    fn slug_of_only_punctuation_is_empty() {
        assert_eq!(generate_slug("!!!"), "");
    }

    #[test]
    fn slug_validation() {
        assert!(validate_slug("bluetooth-speaker-2").is_ok());
        assert_matches!(validate_slug(""), Err(CoreError::Validation(_)));
        assert_matches!(validate_slug("Upper-Case"), Err(CoreError::Validation(_)));
        assert_matches!(validate_slug("with space"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn name_validation() {
        assert!(validate_name("Title", "Speaker").is_ok());
        assert_matches!(validate_name("Title", "   "), Err(CoreError::Validation(msg)) if msg.contains("Title"));
        let long = "x".repeat(MAX_NAME_LENGTH + 1);
        assert!(validate_name("Name", &long).is_err());
    }

    #[test]
    fn resolve_prefers_explicit_slug() {
        assert_eq!(resolve_slug(Some("custom"), "Ignored Title").unwrap(), "custom");
        assert_eq!(resolve_slug(Some("  "), "Fallback Title").unwrap(), "fallback-title");
        assert_eq!(resolve_slug(None, "Fallback Title").unwrap(), "fallback-title");
    }

    #[test]
    fn resolve_rejects_unsluggable_source() {
        assert!(resolve_slug(None, "???").is_err());
        assert!(resolve_slug(Some("Bad Slug"), "ok").is_err());
    }
}
