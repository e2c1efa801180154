//! Domain synonym glossary used by the similarity synonym boost.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One concept: a canonical term and the wordings that mean the same thing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymGroup {
    canonical: String,
    variants: Vec<String>,
}

impl SynonymGroup {
    fn new<I, S>(canonical: &str, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut variants: Vec<String> = variants
            .into_iter()
            .map(|v| v.as_ref().trim().to_lowercase())
            .filter(|v| !v.is_empty())
            .collect();
        variants.sort();
        variants.dedup();

        Self {
            canonical: canonical.trim().to_lowercase(),
            variants,
        }
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    /// The canonical term followed by all variants.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.canonical.as_str()).chain(self.variants.iter().map(String::as_str))
    }

    /// True if `text` (already lowercased) contains any term of this group.
    pub fn mentioned_in(&self, text: &str) -> bool {
        self.terms().any(|term| text.contains(term))
    }
}

/// Read-only mapping of canonical terms to their variants.
///
/// Terms are stored lowercased and matched as substrings of lowercased text.
/// Build one per process and share it; scoring never mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Vec<String>>", into = "BTreeMap<String, Vec<String>>")]
pub struct SynonymGlossary {
    groups: Vec<SynonymGroup>,
}

impl SynonymGlossary {
    /// Create an empty glossary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group. A group with the same canonical term is replaced.
    pub fn with_group<I, S>(mut self, canonical: &str, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let group = SynonymGroup::new(canonical, variants);
        if group.canonical.is_empty() {
            return self;
        }
        self.groups.retain(|g| g.canonical != group.canonical);
        self.groups.push(group);
        self
    }

    /// Construction-trade vocabulary, English with the German wording used
    /// on templates.
    pub fn construction() -> Self {
        Self::new()
            .with_group(
                "earthworks",
                [
                    "excavation",
                    "ground-moving",
                    "soil-excavation",
                    "erdarbeiten",
                    "aushub",
                    "erdbewegung",
                    "bodenaushub",
                ],
            )
            .with_group(
                "concrete works",
                ["concreting", "concrete pouring", "betonarbeiten", "betonieren"],
            )
            .with_group(
                "masonry",
                ["brickwork", "bricklaying", "mauerwerk", "maurerarbeiten"],
            )
            .with_group(
                "demolition",
                ["tear-down", "dismantling", "abbruch", "rückbau", "abriss"],
            )
            .with_group("plastering", ["rendering", "putzarbeiten", "verputzen"])
            .with_group("drywall", ["plasterboard", "gypsum board", "trockenbau"])
            .with_group(
                "painting",
                ["coating", "decorating", "malerarbeiten", "anstrich"],
            )
            .with_group("tiling", ["tile laying", "fliesenarbeiten", "fliesenlegen"])
            .with_group("roofing", ["roof covering", "dacharbeiten", "dachdeckung"])
            .with_group(
                "insulation",
                ["thermal insulation", "dämmung", "wärmedämmung"],
            )
            .with_group(
                "disposal",
                ["waste removal", "debris removal", "entsorgung", "abfuhr"],
            )
            .with_group("scaffolding", ["scaffold", "gerüst", "gerüstbau"])
            .with_group(
                "site setup",
                ["site installation", "baustelleneinrichtung"],
            )
            .with_group("flat rate", ["lump sum", "flat-rate", "pauschal", "psch"])
    }

    pub fn groups(&self) -> &[SynonymGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The first group mentioned in both lowercased texts, if any.
    pub fn shared_group(&self, a: &str, b: &str) -> Option<&SynonymGroup> {
        self.groups
            .iter()
            .find(|g| g.mentioned_in(a) && g.mentioned_in(b))
    }
}

impl From<BTreeMap<String, Vec<String>>> for SynonymGlossary {
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        map.into_iter()
            .fold(Self::new(), |glossary, (canonical, variants)| {
                glossary.with_group(&canonical, variants)
            })
    }
}

impl From<SynonymGlossary> for BTreeMap<String, Vec<String>> {
    fn from(glossary: SynonymGlossary) -> Self {
        glossary
            .groups
            .into_iter()
            .map(|g| (g.canonical, g.variants))
            .collect()
    }
}
