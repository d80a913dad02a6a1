//! UI-facing models derived from a decision-engine response.

mod fit;
mod recovery;
mod snippet;

pub use fit::{derive_fit_misfit, FitMisfit, MAX_FIT_ITEMS, MIN_FIT_ITEMS};
pub use recovery::{
    keys_for_reason, match_reason, missing_inputs, RecoveryModel, MAX_RECOVERY_INPUTS,
    MIN_RECOVERY_INPUTS,
};
pub use snippet::{build_example_snippet, example_payload, sniff_example};

use crate::catalog::InputCatalog;
use crate::contract::{Decision, DecisionOutput, Refusal};
use crate::topics::TopicRecord;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderModel {
    Decision {
        decision: Decision,
        fit: FitMisfit,
    },
    Refusal {
        refusal: Refusal,
        recovery: RecoveryModel,
    },
}

pub fn render_output(
    catalog: &InputCatalog,
    topic: &TopicRecord,
    output: &DecisionOutput,
) -> RenderModel {
    match output {
        DecisionOutput::Decision(decision) => RenderModel::Decision {
            fit: derive_fit_misfit(topic, decision),
            decision: decision.clone(),
        },
        DecisionOutput::Refusal(refusal) => RenderModel::Refusal {
            recovery: RecoveryModel::from_refusal(catalog, topic, refusal),
            refusal: refusal.clone(),
        },
    }
}
