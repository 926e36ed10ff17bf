//! The systems-of-power taxonomy and its keyword tables.
//!
//! Categories are a closed enumeration so a typo cannot mint a phantom
//! category; display labels are looked up, never typed inline. Keyword
//! tables are immutable module-level data, initialized once and never
//! mutated.

use serde::Serializer;
use std::fmt;

/// Broad demographic identity labels. Ordering of the variants is the
/// alphabetical ordering of their labels ("lgbtqia+" < "women"), which is
/// the serialization order the store relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IdentityTag {
    Lgbtqia,
    Women,
}

impl IdentityTag {
    pub fn label(self) -> &'static str {
        match self {
            IdentityTag::Lgbtqia => "lgbtqia+",
            IdentityTag::Women => "women",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "lgbtqia+" => Some(IdentityTag::Lgbtqia),
            "women" => Some(IdentityTag::Women),
            _ => None,
        }
    }
}

impl fmt::Display for IdentityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl serde::Serialize for IdentityTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// The nine primary system-of-power categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    AntiRights,
    BodilyAutonomy,
    ViolenceSafety,
    StatePower,
    EconomicLabour,
    MigrationBorders,
    ClimateJustice,
    TechnologyPower,
    CultureMedia,
}

impl Topic {
    /// Registration order of the category table. The topic classifier
    /// collects matches in exactly this order.
    pub const ALL: [Topic; 9] = [
        Topic::AntiRights,
        Topic::BodilyAutonomy,
        Topic::ViolenceSafety,
        Topic::StatePower,
        Topic::EconomicLabour,
        Topic::MigrationBorders,
        Topic::ClimateJustice,
        Topic::TechnologyPower,
        Topic::CultureMedia,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Topic::AntiRights => "Anti-Rights & Backlash Movements",
            Topic::BodilyAutonomy => "Bodily Autonomy & Reproductive Justice",
            Topic::ViolenceSafety => "Violence, Safety & Criminal Justice",
            Topic::StatePower => "State Power, Law & Governance",
            Topic::EconomicLabour => "Economic & Labour Justice",
            Topic::MigrationBorders => "Migration, Borders & Citizenship",
            Topic::ClimateJustice => "Climate & Environmental Justice",
            Topic::TechnologyPower => "Technology & Digital Power",
            Topic::CultureMedia => "Culture, Media & Narrative Power",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Topic::ALL.iter().copied().find(|t| t.label() == label)
    }

    /// Keywords whose presence (case-insensitive substring) marks an
    /// article as belonging to this category.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Topic::AntiRights => &[
                "gender ideology", "traditional values", "family values",
                "anti-trans", "anti-lgbtq", "anti-lgbtqia",
                "book ban", "banned books", "curriculum ban", "curriculum removal",
                "don't say gay", "bathroom bill", "bathroom law",
                "anti-abortion movement", "pro-life movement", "fetal personhood",
                "rollback", "rights rollback",
                "conversion therapy", "reparative therapy",
                "religious freedom exemption", "religious liberty exemption",
                "parents rights", "parental rights", "parental override",
                "alliance defending freedom", " adf ", "heritage foundation",
                "agenda europe", "fidesz", "orban",
                "anti-homosexuality act", "same-sex ban", "criminalise homosexuality",
                "criminalizes homosexuality", "gay propaganda law",
                "russia gay propaganda", "section 28",
                "far-right", "ultra-conservative", "hard right",
                "backlash", "culture war",
            ],
            Topic::BodilyAutonomy => &[
                "reproductive rights", "reproductive justice", "reproductive health",
                "abortion", "pro-choice", "planned parenthood",
                "birth control", "contraception", "contraceptive",
                "fertility", "ivf", "pregnancy", "pregnant",
                "miscarriage", "stillbirth", "maternal mortality", "maternal health",
                "midwife", "midwifery", "gynecolog", "obstetric", "prenatal", "postnatal",
                "surrogacy", "bodily autonomy",
                "menstrual", "period poverty", "menstruation",
                "fgm", "female genital mutilation", "forced sterilisation",
                "forced sterilization", "obstetric violence",
                "gender affirming care", "gender affirming", "puberty blocker",
                "hormone therapy", "hrt",
                "mental health", "eating disorder", "body image",
                "hiv", "aids", "sexual health", "healthcare access",
                "breast cancer", "cervical cancer", "health inequality",
            ],
            Topic::ViolenceSafety => &[
                "femicide", "domestic violence", "gender-based violence", "gbv",
                "sexual violence", "sexual assault", "rape", "sexual harassment",
                "honour killing", "forced marriage", "dowry violence",
                "trafficking", "human trafficking", "sex trafficking",
                "forced labour", "forced labor", "modern slavery",
                "police brutality", "police violence", "extrajudicial killing",
                "forced disappearance", "torture", "arbitrary detention",
                "political prisoner",
                "hate crime", "attack on", "assault", "murder",
                "stalking", "threat", "intimidation",
                "protection order", "restraining order", "shelter",
                "survivor", "impunity", "accountability", "prosecution",
                "prison conditions", "incarceration", "criminal justice",
            ],
            Topic::StatePower => &[
                "supreme court", "constitutional court", "high court", "federal court",
                "ruling", "landmark ruling", "landmark decision",
                "legislation", "law passed", "signed into law", "executive order",
                "amendment", "constitution", "criminalised", "decriminalised",
                "anti-discrimination law", "equality act", "hate crime law",
                "civil rights act", "human rights act",
                "ban", "repeal", "overturn", "reform", "policy change",
                "treaty", "ratification", "un resolution", "international law",
                "un human rights", "special rapporteur", "universal periodic review",
                "election", "vote", "ballot", "campaign",
                "parliament", "senate", "congress", "minister",
                "government policy", "administration", "cabinet",
                "appointment", "nomination",
            ],
            Topic::EconomicLabour => &[
                "pay gap", "gender pay gap", "wage gap", "equal pay", "pay equity",
                "pay disparity", "income inequality", "wealth gap",
                "care economy", "unpaid care", "care work", "care workers",
                "domestic workers", "childcare", "eldercare",
                "labour rights", "labor rights", "workers rights",
                "union", "collective bargaining", "strike",
                "garment workers", "gig economy", "gig workers",
                "minimum wage", "wage theft", "forced labour",
                "maternity leave", "paternity leave", "parental leave",
                "pension", "retirement", "workplace discrimination",
                "motherhood penalty", "glass ceiling",
                "women in leadership", "women on boards", "corporate diversity",
                "poverty", "welfare", "food security", "food insecurity",
                "debt", "economic inequality", "land rights",
            ],
            Topic::MigrationBorders => &[
                "refugee", "asylum", "asylum seeker", "stateless", "statelessness",
                "undocumented", "displaced", "displacement",
                "citizenship", "citizenship revoked", "naturalisation",
                "visa", "residency",
                "deportation", "deportee", "detention centre", "immigration detention",
                "border violence", "border control", "migration policy",
                "forced return", "pushback",
                "rohingya", "mediterranean crossing", "channel crossing",
                "kafala", "kafala system",
                "diaspora", "exile", "resettlement", "integration",
                "xenophobia", "anti-immigration",
                "sanctuary city", "dreamers", "daca",
                "migrant worker", "seasonal worker",
            ],
            Topic::ClimateJustice => &[
                "climate displacement", "climate refugee", "climate migrant",
                "climate migration", "climate-displaced",
                "land dispossession", "land grab", "indigenous land",
                "land rights", "water rights", "resource extraction",
                "deforestation", "dam construction", "mining community",
                "environmental racism", "sacrifice zone", "pollution community",
                "environmental justice", "climate justice", "just transition",
                "climate finance", "loss and damage",
                "climate change", "global warming", "sea level",
                "flood", "drought", "wildfire", "extreme heat",
                "environmental health",
            ],
            Topic::TechnologyPower => &[
                "facial recognition", "mass surveillance", "surveillance technology",
                "biometric", "predictive policing", "spyware", "pegasus",
                "internet shutdown", "social media ban", "content moderation",
                "platform ban", "vpn ban", "censorship online",
                "encrypted", "encryption ban",
                "algorithmic discrimination", "algorithmic bias", "ai bias",
                "automated decision", "discriminatory algorithm",
                "deepfake", "non-consensual imagery", "revenge porn",
                "cyber harassment", "online abuse", "digital violence",
                "doxing",
                "digital rights", "data privacy", "data protection",
                "tech worker", "gig platform",
                "artificial intelligence", "ai regulation",
            ],
            Topic::CultureMedia => &[
                "press freedom", "journalist arrested", "media freedom",
                "reporter imprisoned", "journalist killed",
                "book ban", "banned book", "curriculum", "academic freedom",
                "education rights", "school policy",
                "representation", "visibility", "storytelling", "narrative",
                "indigenous media", "language rights", "cultural rights",
                "film", "documentary", "book", "novel", "author",
                "art", "artist", "museum", "performance", "theatre", "theater",
                "drag", "drag queen", "drag king", "drag race",
                "music", "singer", "award", "oscar", "emmy", "grammy",
                "icon", "podcast", "interview",
                "censorship", "banned film", "cancelled",
                "social media", "influencer", "content creator",
                "platform", "algorithm",
            ],
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl serde::Serialize for Topic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Inclusion-gate keywords. Articles from keyword-filtered sources must
/// contain at least one of these to be retained. Covers both direct
/// identity signals and structural system signals; no precedence between
/// the two is observable, so the list is flat.
pub static INCLUSION_KEYWORDS: &[&str] = &[
    // Women / gender
    "women", "woman", "girl", "girls", "female", "feminine", "feminism",
    "feminist", "gender equality", "gender gap", "gender pay gap",
    "reproductive rights", "abortion", "maternity", "maternal",
    "women's rights", "sexism", "misogyny", "patriarchy", "period poverty",
    "menstrual", "women's health", "domestic violence", "gender violence",
    "sexual harassment", "metoo", "me too", "#metoo", "femicide",
    "gender-based violence", "women in leadership",
    // LGBTQIA+
    "lgbt", "lgbtq", "lgbtqia", "queer", "gay", "lesbian", "bisexual",
    "transgender", "trans ", "nonbinary", "non-binary", "intersex",
    "asexual", "pansexual", "pride", "drag", "same-sex", "gay rights",
    "trans rights", "coming out", "homophobia", "transphobia",
    "biphobia", "conversion therapy", "gender affirming", "gender identity",
    "pronouns", "deadnaming", "two-spirit", "marriage equality",
    // Migration / displacement
    "refugee", "asylum", "migrant", "migration", "deportation",
    "undocumented", "detention", "displacement", "diaspora",
    "stateless", "asylum seeker", "forced displacement",
    // Rights / justice
    "human rights", "civil rights", "civil liberties", "discrimination",
    "minority rights", "indigenous", "racial justice", "racism",
    // Bodily autonomy
    "bodily autonomy", "fgm", "female genital mutilation",
    "forced sterilisation", "forced sterilization", "obstetric violence",
    // Economic structure
    "care economy", "unpaid care", "domestic workers", "garment workers",
    "labour rights", "labor rights", "workers rights", "pay equity",
    // Climate / land
    "land dispossession", "climate displacement", "environmental racism",
    "climate justice", "environmental justice", "indigenous land",
    // Technology
    "surveillance", "facial recognition", "algorithmic discrimination",
    "internet shutdown", "digital rights", "spyware", "deepfake",
    // Anti-rights
    "gender ideology", "anti-trans", "book ban", "don't say gay",
    "bathroom bill", "parents rights", "anti-lgbtq",
    // Violence / accountability
    "trafficking", "forced marriage", "honour killing",
    "extrajudicial killing", "forced disappearance", "impunity",
    // Media / narrative
    "press freedom", "journalist arrested", "media freedom",
    "censorship", "academic freedom",
];

/// Terms that mark text as women-related for the identity classifier.
pub static WOMEN_TERMS: &[&str] = &[
    "women", "woman", "girl", "girls", "female", "feminine", "feminism",
    "feminist", "gender", "reproductive", "abortion", "maternity",
    "maternal", "sexism", "misogyny", "patriarchy", "period poverty",
    "menstrual", "domestic violence", "sexual harassment", "metoo",
    "me too", "femicide",
];

/// Terms that mark text as LGBTQIA+-related for the identity classifier.
pub static LGBTQ_TERMS: &[&str] = &[
    "lgbt", "lgbtq", "lgbtqia", "queer", "gay", "lesbian", "bisexual",
    "transgender", "trans ", "nonbinary", "non-binary", "intersex",
    "asexual", "pansexual", "pride", "drag", "same-sex", "homophobia",
    "transphobia", "biphobia", "conversion therapy", "gender affirming",
    "pronouns", "two-spirit", "marriage equality",
];

/// Phrases that signal a paywalled article in feed content.
pub static PAYWALL_SIGNAL_PHRASES: &[&str] = &[
    "subscribe to read", "subscription required", "subscribers only",
    "sign in to read", "create a free account", "this article is for subscribers",
    "exclusive to subscribers", "premium content", "member exclusive",
    "for full access", "to continue reading", "read more with a subscription",
    "register to read", "already a subscriber", "become a member",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_labels_round_trip() {
        for topic in Topic::ALL {
            assert_eq!(Topic::from_label(topic.label()), Some(topic));
        }
        assert_eq!(Topic::from_label("Not A Category"), None);
    }

    #[test]
    fn identity_tag_labels_round_trip() {
        assert_eq!(IdentityTag::from_label("women"), Some(IdentityTag::Women));
        assert_eq!(IdentityTag::from_label("lgbtqia+"), Some(IdentityTag::Lgbtqia));
        assert_eq!(IdentityTag::from_label("general"), None);
    }

    #[test]
    fn identity_tag_ordering_is_alphabetical_by_label() {
        let mut tags = vec![IdentityTag::Women, IdentityTag::Lgbtqia];
        tags.sort();
        let labels: Vec<_> = tags.iter().map(|t| t.label()).collect();
        assert_eq!(labels, vec!["lgbtqia+", "women"]);
    }

    #[test]
    fn every_topic_has_keywords() {
        for topic in Topic::ALL {
            assert!(!topic.keywords().is_empty(), "{} has no keywords", topic);
        }
    }
}
