//! URL-based section classification.
//!
//! Thairath article URLs embed their topical section in the path
//! (`/news/politic/2756499`, `/money/investment/...`). A [`SectionRule`]
//! pairs a path prefix with an optional sub-filter predicate; the prefix
//! decides whether the rule is in play at all, while the sub-filter can
//! narrow a broad prefix to a slice of it. For the built-in rules the two
//! currently coincide, but they stay separate concerns so a future rule can
//! match a prefix while filtering to a sub-path.

use once_cell::sync::Lazy;

/// A single section's matching rule.
pub struct SectionRule {
    /// Section name, as requested on the command line.
    pub name: &'static str,
    /// URL substring that puts this rule in play.
    pub path_prefix: &'static str,
    /// Optional narrowing predicate over the full URL.
    pub sub_filter: Option<fn(&str) -> bool>,
}

/// The fixed rule table for the Thairath site.
static BUILTIN_RULES: Lazy<Vec<SectionRule>> = Lazy::new(|| {
    vec![
        SectionRule {
            name: "economics",
            path_prefix: "/money/economics",
            sub_filter: Some(|url| url.contains("/money/economics/thai_economics/")),
        },
        SectionRule {
            name: "investment",
            path_prefix: "/money/investment",
            sub_filter: Some(|url| url.contains("/money/investment/")),
        },
        SectionRule {
            name: "tech_innovation",
            path_prefix: "/money/tech_innovation",
            sub_filter: Some(|url| url.contains("/money/tech_innovation/")),
        },
        SectionRule {
            name: "politic",
            path_prefix: "/news/politic",
            sub_filter: Some(|url| url.contains("/news/politic/")),
        },
        SectionRule {
            name: "personal_finance",
            path_prefix: "/money/personal_finance",
            sub_filter: Some(|url| url.contains("/money/personal_finance/")),
        },
        SectionRule {
            name: "business_marketing",
            path_prefix: "/money/business_marketing",
            sub_filter: Some(|url| url.contains("/money/business_marketing/")),
        },
    ]
});

/// The built-in rule table.
pub fn builtin_rules() -> &'static [SectionRule] {
    BUILTIN_RULES.as_slice()
}

/// Classify a URL into at most one of the requested sections.
///
/// Iterates `requested` in caller order, so when prefixes could overlap the
/// first requested match wins. A section matches iff its rule's
/// `path_prefix` occurs in the URL and its sub-filter (when present) accepts
/// the URL. Pure function: same inputs, same answer.
///
/// # Returns
///
/// The first matching section name, or `None` when no requested section
/// matches.
pub fn classify(url: &str, requested: &[String], rules: &[SectionRule]) -> Option<&'static str> {
    for name in requested {
        let rule = match rules.iter().find(|rule| rule.name == name.as_str()) {
            Some(rule) => rule,
            None => continue,
        };
        if url.contains(rule.path_prefix) && rule.sub_filter.is_none_or(|filter| filter(url)) {
            return Some(rule.name);
        }
    }
    None
}
