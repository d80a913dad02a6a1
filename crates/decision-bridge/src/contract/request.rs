use crate::topics::{Outcome, Season, TopicRecord, Tradeoff, TravelerSegment};
use serde::{Deserialize, Serialize};

const MUST_REFUSE_IF: &[&str] = &[
    "material inputs needed to answer the question are missing",
    "inputs conflict and no bounded answer exists",
    "the traveler asks for a guarantee about wildlife, weather, or prices",
    "the question is outside travel planning",
];

const FORBIDDEN_PHRASES: &[&str] = &[
    "guaranteed",
    "100% certain",
    "you will definitely see",
    "risk-free",
    "never crowded",
    "once in a lifetime deal",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractTask {
    #[serde(rename = "DECISION")]
    Decision,
}

/// Caller-supplied identifiers echoed back for attribution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingContext {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub traveler_id: Option<String>,
    #[serde(default)]
    pub lead_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetBand {
    Budget,
    FairValue,
    Premium,
}

impl BudgetBand {
    pub fn for_segments(segments: &[TravelerSegment]) -> Self {
        if segments.contains(&TravelerSegment::BudgetConscious) {
            Self::Budget
        } else if segments.contains(&TravelerSegment::Luxury) {
            Self::Premium
        } else {
            Self::FairValue
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateContext {
    pub month: Option<String>,
    pub season: Option<Season>,
    pub flexible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserContext {
    pub budget_band: BudgetBand,
    pub dates: DateContext,
    pub traveler_segments: Vec<TravelerSegment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestScope {
    pub topic_id: String,
    pub slug: String,
    pub eligible_outcomes: Vec<Outcome>,
    pub default_outcome: Outcome,
    pub confidence_bounds: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestConstraints {
    pub required_inputs: Vec<String>,
    pub optional_inputs: Vec<String>,
    pub refusal_triggers: Vec<String>,
    pub change_conditions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionRequest {
    pub question: String,
    pub scope: RequestScope,
    pub destinations_considered: Vec<String>,
    pub constraints: RequestConstraints,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KnownFacts {
    pub known_constraints: Vec<String>,
    pub known_tradeoffs: Vec<Tradeoff>,
    pub destination_notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyDirectives {
    pub must_refuse_if: Vec<String>,
    pub forbidden_phrases: Vec<String>,
}

impl PolicyDirectives {
    /// The topic-independent policy every request carries.
    pub fn standard() -> Self {
        Self {
            must_refuse_if: MUST_REFUSE_IF.iter().map(|rule| rule.to_string()).collect(),
            forbidden_phrases: FORBIDDEN_PHRASES
                .iter()
                .map(|phrase| phrase.to_string())
                .collect(),
        }
    }
}

/// Request body for the external decision engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestContract {
    pub task: ContractTask,
    pub tracking: TrackingContext,
    pub user_context: UserContext,
    pub request: DecisionRequest,
    pub facts: KnownFacts,
    pub policy: PolicyDirectives,
}

fn input_keys<'a>(inputs: impl Iterator<Item = &'a crate::catalog::RuntimeInput>) -> Vec<String> {
    inputs.map(|input| input.key.clone()).collect()
}

pub fn build_request_contract(record: &TopicRecord, tracking: TrackingContext) -> RequestContract {
    let dates = match &record.time_context {
        Some(time) => DateContext {
            month: time.month.clone(),
            season: time.season,
            flexible: false,
        },
        None => DateContext {
            month: None,
            season: None,
            flexible: true,
        },
    };

    RequestContract {
        task: ContractTask::Decision,
        tracking,
        user_context: UserContext {
            budget_band: BudgetBand::for_segments(&record.traveler_segments),
            dates,
            traveler_segments: record.traveler_segments.clone(),
        },
        request: DecisionRequest {
            question: record.question.clone(),
            scope: RequestScope {
                topic_id: record.id.clone(),
                slug: record.slug.clone(),
                eligible_outcomes: record.eligible_outcomes.clone(),
                default_outcome: record.default_outcome,
                confidence_bounds: record.confidence_range,
            },
            destinations_considered: record.destinations.clone(),
            constraints: RequestConstraints {
                required_inputs: input_keys(record.required_inputs.iter()),
                optional_inputs: input_keys(record.optional_inputs.iter()),
                refusal_triggers: record.refusal_triggers.clone(),
                change_conditions: record.change_conditions.clone(),
            },
        },
        facts: KnownFacts {
            known_constraints: record.assumptions.clone(),
            known_tradeoffs: record.tradeoffs.clone(),
            destination_notes: vec![record.context_line.clone()],
        },
        policy: PolicyDirectives::standard(),
    }
}
