//! Static source registry: feed locations, countries, and the per-source
//! classification sets. Loaded once at process start; never mutated.

use crate::taxonomy::Topic;
use crate::types::{Result, RightsfeedError, Source};
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// All configured sources, in processing order.
pub static SOURCES: &[Source] = &[
    // General / world news (keyword-filtered)
    Source { name: "BBC News", url: "https://feeds.bbci.co.uk/news/rss.xml", country: "UK" },
    Source { name: "BBC News World", url: "https://feeds.bbci.co.uk/news/world/rss.xml", country: "UK" },
    Source { name: "The Guardian", url: "https://www.theguardian.com/world/rss", country: "UK" },
    Source { name: "Reuters", url: "https://feeds.reuters.com/reuters/topNews", country: "US" },
    Source { name: "Reuters World", url: "https://feeds.reuters.com/Reuters/worldNews", country: "US" },
    Source { name: "Al Jazeera", url: "https://www.aljazeera.com/xml/rss/all.xml", country: "Qatar" },
    Source { name: "NPR News", url: "https://feeds.npr.org/1001/rss.xml", country: "US" },
    Source { name: "The Independent", url: "https://www.independent.co.uk/news/rss", country: "UK" },
    Source { name: "HuffPost", url: "https://www.huffpost.com/section/women/feed", country: "US" },
    Source { name: "New York Times", url: "https://rss.nytimes.com/services/xml/rss/nyt/HomePage.xml", country: "US" },
    Source { name: "Associated Press", url: "https://apnews.com/rss", country: "US" },
    Source { name: "CNN World", url: "http://rss.cnn.com/rss/edition_world.rss", country: "US" },
    Source { name: "Washington Post", url: "https://feeds.washingtonpost.com/rss/world", country: "US" },
    Source { name: "Financial Times", url: "https://www.ft.com/world?format=rss", country: "UK" },
    Source { name: "CBC News World", url: "https://www.cbc.ca/cmlink/rss-world", country: "Canada" },
    Source { name: "ABC News", url: "https://abcnews.go.com/rss/headlines", country: "US" },
    Source { name: "SBS News World", url: "https://www.sbs.com.au/news/topic/world/rss.xml", country: "Australia" },
    Source { name: "Le Monde", url: "https://www.lemonde.fr/international/rss.xml", country: "France" },
    Source { name: "IPS News Agency", url: "https://ipsnews.net/news/regional-categories/rss.xml", country: "International" },
    Source { name: "The Conversation", url: "https://theconversation.com/topics/world-news/rss", country: "International" },
    Source { name: "Global Voices", url: "https://globalvoices.org/feeds/", country: "International" },
    Source { name: "Fair Observer", url: "https://www.fairobserver.com/category/world/feed", country: "US" },
    // Women & feminist publications (always included)
    Source { name: "The Guardian Women", url: "https://www.theguardian.com/lifeandstyle/women/rss", country: "UK" },
    Source { name: "Ms. Magazine", url: "https://msmagazine.com/feed/", country: "US" },
    Source { name: "Feministing", url: "https://feministing.com/feed/", country: "US" },
    Source { name: "Jezebel", url: "https://jezebel.com/rss", country: "US" },
    Source { name: "Refinery29 Feminism", url: "https://www.refinery29.com/en-us/feminism/rss.xml", country: "US" },
    Source { name: "The Funambulist", url: "https://thefunambulist.net/feed", country: "France" },
    // LGBTQIA+ publications (always included)
    Source { name: "Gay Times", url: "https://www.gaytimes.co.uk/feed/", country: "UK" },
    Source { name: "PinkNews", url: "https://www.pinknews.co.uk/feed/", country: "UK" },
    Source { name: "Out Magazine", url: "https://www.out.com/rss.xml", country: "US" },
    Source { name: "LGBTQ Nation", url: "https://www.lgbtqnation.com/feed/", country: "US" },
    Source { name: "Advocate", url: "https://www.advocate.com/rss.xml", country: "US" },
    Source { name: "Autostraddle", url: "https://www.autostraddle.com/feed/", country: "US" },
    Source { name: "Them", url: "https://www.them.us/feed/rss", country: "US" },
    Source { name: "Queerty", url: "https://www.queerty.com/feed", country: "US" },
    Source { name: "Xtra Magazine", url: "https://xtramagazine.com/feed/", country: "Canada" },
    // Progressive & investigative (keyword-filtered)
    Source { name: "AlterNet", url: "https://www.alternet.org/feeds/feed.rss", country: "US" },
    Source { name: "Democracy Now", url: "https://www.democracynow.org/podcast.xml", country: "US" },
    Source { name: "FSRN", url: "https://fsrn.org/feed", country: "US" },
    Source { name: "Jewish Voice for Peace", url: "https://jewishvoiceforpeace.org/feed/", country: "US" },
    Source { name: "Le Monde Diplomatique", url: "https://mondediplo.com/rss/", country: "France" },
    Source { name: "The Progressive", url: "https://progressive.org/feed/", country: "US" },
    Source { name: "Reveal News", url: "https://revealnews.org/feed/", country: "US" },
    Source { name: "Accuracy in Media", url: "https://www.aim.org/feed/", country: "US" },
    Source { name: "Media Matters", url: "https://www.mediamatters.org/rss/latest", country: "US" },
];

/// Sources whose every entry bypasses the inclusion gate.
pub static ALWAYS_INCLUDE_SOURCES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "The Guardian Women", "Ms. Magazine", "Feministing", "Jezebel",
        "Refinery29 Feminism", "The Funambulist",
        "Gay Times", "PinkNews", "Out Magazine", "LGBTQ Nation", "Advocate",
        "Autostraddle", "Them", "Queerty", "Xtra Magazine",
    ]
    .into_iter()
    .collect()
});

/// Sources pre-classified as LGBTQIA+ identity.
pub static LGBTQIA_SOURCES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "Gay Times", "PinkNews", "Out Magazine", "LGBTQ Nation", "Advocate",
        "Autostraddle", "Them", "Queerty", "Xtra Magazine",
    ]
    .into_iter()
    .collect()
});

/// Sources pre-classified as feminist identity.
pub static FEMINIST_SOURCES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "Ms. Magazine", "Feministing", "Jezebel", "Refinery29 Feminism",
        "The Guardian Women", "The Funambulist",
    ]
    .into_iter()
    .collect()
});

/// Sources paywalled at the source level.
pub static PAYWALLED_SOURCES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["New York Times", "Financial Times", "Washington Post"]
        .into_iter()
        .collect()
});

/// Fallback topic per source, so always-include sources whose content
/// matches no topic keyword still get at least one tag.
pub static SOURCE_DEFAULT_TOPIC: Lazy<HashMap<&'static str, Topic>> = Lazy::new(|| {
    [
        ("Gay Times", Topic::CultureMedia),
        ("PinkNews", Topic::CultureMedia),
        ("Out Magazine", Topic::CultureMedia),
        ("LGBTQ Nation", Topic::CultureMedia),
        ("Advocate", Topic::CultureMedia),
        ("Autostraddle", Topic::CultureMedia),
        ("Them", Topic::CultureMedia),
        ("Queerty", Topic::CultureMedia),
        ("Xtra Magazine", Topic::CultureMedia),
        ("Ms. Magazine", Topic::BodilyAutonomy),
        ("Feministing", Topic::BodilyAutonomy),
        ("Jezebel", Topic::BodilyAutonomy),
        ("Refinery29 Feminism", Topic::BodilyAutonomy),
        ("The Guardian Women", Topic::BodilyAutonomy),
        ("The Funambulist", Topic::StatePower),
    ]
    .into_iter()
    .collect()
});

pub fn find(name: &str) -> Option<&'static Source> {
    SOURCES.iter().find(|s| s.name == name)
}

pub fn is_always_include(name: &str) -> bool {
    ALWAYS_INCLUDE_SOURCES.contains(name)
}

pub fn default_topic(name: &str) -> Option<Topic> {
    SOURCE_DEFAULT_TOPIC.get(name).copied()
}

/// A name appearing in a classification set but absent from the registry is
/// a configuration error. Checked once at startup.
pub fn validate() -> Result<()> {
    let known: HashSet<&str> = SOURCES.iter().map(|s| s.name).collect();
    let sets: [(&str, Vec<&str>); 5] = [
        ("always-include", ALWAYS_INCLUDE_SOURCES.iter().copied().collect()),
        ("lgbtqia", LGBTQIA_SOURCES.iter().copied().collect()),
        ("feminist", FEMINIST_SOURCES.iter().copied().collect()),
        ("paywalled", PAYWALLED_SOURCES.iter().copied().collect()),
        ("default-topic", SOURCE_DEFAULT_TOPIC.keys().copied().collect()),
    ];
    for (set_name, members) in sets {
        for member in members {
            if !known.contains(member) {
                return Err(RightsfeedError::Config(format!(
                    "source \"{member}\" in {set_name} set is not in the registry"
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_consistent() {
        validate().expect("classification sets reference unknown sources");
    }

    #[test]
    fn source_names_are_unique() {
        let names: HashSet<&str> = SOURCES.iter().map(|s| s.name).collect();
        assert_eq!(names.len(), SOURCES.len());
    }

    #[test]
    fn identity_source_sets_are_always_included() {
        for name in LGBTQIA_SOURCES.iter().chain(FEMINIST_SOURCES.iter()) {
            assert!(
                is_always_include(name),
                "{name} is identity-classified but keyword-filtered"
            );
        }
    }

    #[test]
    fn every_always_include_source_has_a_default_topic() {
        for name in ALWAYS_INCLUDE_SOURCES.iter() {
            assert!(
                default_topic(name).is_some(),
                "{name} bypasses the gate but has no fallback topic"
            );
        }
    }
}
