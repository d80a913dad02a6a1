use crate::catalog::{InputOverrides, RuntimeInput};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Book,
    Wait,
    Switch,
    Discard,
}

impl Outcome {
    pub const fn ordered() -> [Self; 4] {
        [Self::Book, Self::Wait, Self::Switch, Self::Discard]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Book => "Book",
            Self::Wait => "Wait",
            Self::Switch => "Switch",
            Self::Discard => "Discard",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelerSegment {
    FirstTime,
    Solo,
    Families,
    BudgetConscious,
    Luxury,
    Repeat,
}

impl TravelerSegment {
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstTime => "first-time travelers",
            Self::Solo => "solo travelers",
            Self::Families => "families",
            Self::BudgetConscious => "budget-conscious travelers",
            Self::Luxury => "luxury travelers",
            Self::Repeat => "repeat visitors",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Dry,
    Green,
    Calving,
}

impl Season {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dry => "dry season",
            Self::Green => "green season",
            Self::Calving => "calving season",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<Season>,
}

impl TimeContext {
    pub fn is_empty(&self) -> bool {
        self.month.is_none() && self.season.is_none()
    }

    pub fn label(&self) -> Option<String> {
        match (&self.month, self.season) {
            (Some(month), Some(season)) => Some(format!("{month} ({})", season.label())),
            (Some(month), None) => Some(month.clone()),
            (None, Some(season)) => Some(season.label().to_string()),
            (None, None) => None,
        }
    }
}

/// Classification of how many factors a topic's answer hinges on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionComplexity {
    Binary,
    Conditional,
    MultiFactor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tradeoff {
    pub gain: String,
    pub loss: String,
}

/// Reference to a catalog entry from an authored topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSpec {
    pub key: String,
    #[serde(flatten)]
    pub overrides: InputOverrides,
}

impl InputSpec {
    pub fn catalog(key: &str) -> Self {
        Self {
            key: key.to_string(),
            overrides: InputOverrides::default(),
        }
    }
}

/// Author-set tags. Any field left empty is backfilled by inference at compile time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destinations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_context: Option<TimeContext>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traveler_segments: Option<Vec<TravelerSegment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<DecisionComplexity>,
}

/// Authoring-time description of one decision question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicDefinition {
    pub id: String,
    pub question: String,
    #[serde(default = "published_by_default")]
    pub published: bool,
    pub required_inputs: Vec<InputSpec>,
    #[serde(default)]
    pub optional_inputs: Vec<InputSpec>,
    #[serde(default)]
    pub assumptions: Vec<String>,
    #[serde(default)]
    pub tradeoffs: Vec<Tradeoff>,
    #[serde(default)]
    pub change_conditions: Vec<String>,
    #[serde(default)]
    pub refusal_triggers: Vec<String>,
    #[serde(default)]
    pub metadata: TopicMetadata,
}

fn published_by_default() -> bool {
    true
}

/// Compiled, render-ready topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicRecord {
    pub id: String,
    pub slug: String,
    pub question: String,
    pub published: bool,
    pub required_inputs: Vec<RuntimeInput>,
    pub optional_inputs: Vec<RuntimeInput>,
    pub assumptions: Vec<String>,
    pub tradeoffs: Vec<Tradeoff>,
    pub change_conditions: Vec<String>,
    pub refusal_triggers: Vec<String>,
    pub destinations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_context: Option<TimeContext>,
    pub traveler_segments: Vec<TravelerSegment>,
    pub eligible_outcomes: Vec<Outcome>,
    pub default_outcome: Outcome,
    pub confidence_range: [f64; 2],
    pub context_line: String,
}

impl TopicRecord {
    /// Looks up one of the topic's declared inputs (required first).
    pub fn declared_input(&self, key: &str) -> Option<&RuntimeInput> {
        self.required_inputs
            .iter()
            .chain(self.optional_inputs.iter())
            .find(|input| input.key == key)
    }
}

/// Non-fatal finding raised while compiling a definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompileWarning {
    UnknownCatalogKey { key: String },
    DestinationsDefaulted,
    TravelerSegmentsDefaulted,
    ComplexityUnknown,
    DefaultOutcomeAdjusted { requested: Outcome, applied: Outcome },
}

impl fmt::Display for CompileWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileWarning::UnknownCatalogKey { key } => {
                write!(f, "input '{}' is not in the catalog", key)
            }
            CompileWarning::DestinationsDefaulted => {
                write!(f, "no destination matched; using the default destination set")
            }
            CompileWarning::TravelerSegmentsDefaulted => {
                write!(f, "no traveler segment matched; defaulting to first-time")
            }
            CompileWarning::ComplexityUnknown => {
                write!(f, "decision complexity unknown; using the default confidence range")
            }
            CompileWarning::DefaultOutcomeAdjusted { requested, applied } => write!(
                f,
                "default outcome {} is not eligible; using {}",
                requested, applied
            ),
        }
    }
}
