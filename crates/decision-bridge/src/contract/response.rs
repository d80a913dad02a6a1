use crate::topics::Outcome;
use serde::{Deserialize, Serialize};

/// Envelope returned by the decision engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionResponse {
    pub output: DecisionOutput,
}

impl DecisionResponse {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DecisionOutput {
    Decision(Decision),
    Refusal(Refusal),
}

impl DecisionOutput {
    pub fn as_decision(&self) -> Option<&Decision> {
        match self {
            Self::Decision(decision) => Some(decision),
            Self::Refusal(_) => None,
        }
    }

    pub fn as_refusal(&self) -> Option<&Refusal> {
        match self {
            Self::Decision(_) => None,
            Self::Refusal(refusal) => Some(refusal),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionTradeoffs {
    #[serde(default)]
    pub gains: Vec<String>,
    #[serde(default)]
    pub losses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub outcome: Outcome,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub assumptions: Vec<String>,
    #[serde(default)]
    pub tradeoffs: DecisionTradeoffs,
    #[serde(default)]
    pub change_conditions: Vec<String>,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refusal {
    pub reason: String,
    #[serde(default)]
    pub missing_or_conflicting_inputs: Vec<String>,
    #[serde(default)]
    pub safe_next_step: String,
}
