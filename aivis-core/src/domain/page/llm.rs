// aivis-core/src/domain/page/llm.rs

// Typed view of the judgments produced by the external LLM analysis
// adapter. Each dimension has its own slot; absence is an explicit
// `NotAvailable` so rules never probe loose keys.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Availability<T> {
    Available(T),
    #[default]
    NotAvailable,
}

impl<T> Availability<T> {
    pub fn available(&self) -> Option<&T> {
        match self {
            Self::Available(value) => Some(value),
            Self::NotAvailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

impl<T> From<Option<T>> for Availability<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Available(v),
            None => Self::NotAvailable,
        }
    }
}

// Serialized as an optional value: absent or null means not available.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Availability<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Availability::from)
    }
}

impl<T: Serialize> Serialize for Availability<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Available(value) => serializer.serialize_some(value),
            Self::NotAvailable => serializer.serialize_none(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AuthorityAnalysis {
    pub has_author: bool,
    pub author_has_credentials: bool,
    pub citation_count: u32,
    pub cites_primary_sources: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FreshnessAnalysis {
    pub references_current_events: bool,
    pub outdated_claims: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GuideDepth {
    #[default]
    Shallow,
    Moderate,
    Comprehensive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StructureAnalysis {
    pub guide_depth: GuideDepth,
    pub answers_query_directly: bool,
    pub has_summary: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TechnicalAnalysis {
    pub title_matches_content: bool,
    pub description_matches_content: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LlmSignals {
    pub authority: Availability<AuthorityAnalysis>,
    pub freshness: Availability<FreshnessAnalysis>,
    pub structure: Availability<StructureAnalysis>,
    pub technical: Availability<TechnicalAnalysis>,
}

impl LlmSignals {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_complete(&self) -> bool {
        self.authority.is_available()
            && self.freshness.is_available()
            && self.structure.is_available()
            && self.technical.is_available()
    }

    pub fn available_count(&self) -> usize {
        [
            self.authority.is_available(),
            self.freshness.is_available(),
            self.structure.is_available(),
            self.technical.is_available(),
        ]
        .into_iter()
        .filter(|available| *available)
        .count()
    }

    /// Fills `NotAvailable` slots from `other`. Present slots are kept.
    pub fn fill_missing(&mut self, other: LlmSignals) {
        fn fill<T>(slot: &mut Availability<T>, incoming: Availability<T>) {
            if !slot.is_available() {
                *slot = incoming;
            }
        }
        fill(&mut self.authority, other.authority);
        fill(&mut self.freshness, other.freshness);
        fill(&mut self.structure, other.structure);
        fill(&mut self.technical, other.technical);
    }
}
