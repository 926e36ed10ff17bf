//! The decision logic of the pipeline: inclusion gate, identity and topic
//! classifiers, paywall detection, and the legacy category projection.
//!
//! All functions here are pure over normalized text and the static
//! registry; same inputs always yield the same outputs.

use crate::registry;
use crate::taxonomy::{
    IdentityTag, Topic, INCLUSION_KEYWORDS, LGBTQ_TERMS, PAYWALL_SIGNAL_PHRASES, WOMEN_TERMS,
};

/// Summaries shorter than this (but non-empty) from keyword-filtered
/// sources are treated as a paywall teaser signal.
pub const SHORT_SUMMARY_THRESHOLD: usize = 120;

/// Maximum number of topic tags per article.
pub const MAX_TOPICS: usize = 3;

/// Inclusion gate. Always-include sources bypass the keyword test
/// entirely; everyone else must contain at least one inclusion keyword.
pub fn admit(source: &str, title: &str, summary: &str) -> bool {
    if registry::is_always_include(source) {
        return true;
    }
    let combined = format!("{} {}", title, summary).to_lowercase();
    INCLUSION_KEYWORDS.iter().any(|kw| combined.contains(kw))
}

/// Identity tags from source membership plus term presence. Both checks
/// are independent; output is sorted alphabetically by label and never
/// contains duplicates. An empty result means neither identity fired —
/// the "general" placeholder is a persistence concern, not emitted here.
pub fn identity_tags(text: &str, source: &str) -> Vec<IdentityTag> {
    let text_lower = text.to_lowercase();
    let mut tags = Vec::new();

    if registry::LGBTQIA_SOURCES.contains(source)
        || LGBTQ_TERMS.iter().any(|t| text_lower.contains(t))
    {
        tags.push(IdentityTag::Lgbtqia);
    }
    if registry::FEMINIST_SOURCES.contains(source)
        || WOMEN_TERMS.iter().any(|t| text_lower.contains(t))
    {
        tags.push(IdentityTag::Women);
    }

    tags.sort();
    tags
}

/// Topic classifier: categories are evaluated in table registration order,
/// matches collected in that order and truncated to the first three. No
/// scoring, no weighting. If nothing matched and the source has a
/// configured default, the result is exactly that default.
pub fn system_topics(text: &str, source: &str) -> Vec<Topic> {
    let text_lower = text.to_lowercase();

    let mut matched: Vec<Topic> = Topic::ALL
        .iter()
        .copied()
        .filter(|topic| topic.keywords().iter().any(|kw| text_lower.contains(kw)))
        .collect();
    matched.truncate(MAX_TOPICS);

    if matched.is_empty() {
        if let Some(default) = registry::default_topic(source) {
            return vec![default];
        }
    }
    matched
}

/// Paywall heuristic. Advisory only — never drops an article.
pub fn detect_paywall(title: &str, summary: &str, source: &str) -> bool {
    if registry::PAYWALLED_SOURCES.contains(source) {
        return true;
    }
    let combined = format!("{} {}", title.to_lowercase(), summary.to_lowercase());
    if PAYWALL_SIGNAL_PHRASES.iter().any(|p| combined.contains(p)) {
        return true;
    }
    // Publishers truncating summaries to a teaser is itself a signal, but a
    // missing summary is not.
    let summary_len = summary.trim().chars().count();
    !registry::is_always_include(source) && summary_len > 0 && summary_len < SHORT_SUMMARY_THRESHOLD
}

/// Legacy single-valued category, kept for backward compatibility with the
/// original schema: "lgbtqia+" if that identity tag fired, else literally
/// "women" — even when neither tag matched. Known quirk, preserved on
/// purpose; see DESIGN.md.
pub fn legacy_category(tags: &[IdentityTag]) -> &'static str {
    if tags.contains(&IdentityTag::Lgbtqia) {
        "lgbtqia+"
    } else {
        "women"
    }
}
