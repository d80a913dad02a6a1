//! Structural comparison of two decision results.

use crate::contract::{Decision, DecisionOutput};
use crate::render::derive_fit_misfit;
use crate::topics::{Outcome, TopicRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueDiff<T> {
    pub label: String,
    pub value_a: T,
    pub value_b: T,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SetDiff {
    pub only_in_a: Vec<String>,
    pub only_in_b: Vec<String>,
}

impl SetDiff {
    pub fn between(a: &[String], b: &[String]) -> Self {
        Self {
            only_in_a: only_in(a, b),
            only_in_b: only_in(b, a),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.only_in_a.is_empty() && self.only_in_b.is_empty()
    }
}

// Keeps first-appearance order and collapses repeats.
fn only_in(left: &[String], right: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in left {
        if !right.contains(item) && !out.contains(item) {
            out.push(item.clone());
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffModel {
    pub label_a: String,
    pub label_b: String,
    pub has_differences: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<ValueDiff<Outcome>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<ValueDiff<f64>>,
    pub gains: SetDiff,
    pub losses: SetDiff,
    pub assumptions: SetDiff,
    pub change_conditions: SetDiff,
    pub fit: SetDiff,
    pub misfit: SetDiff,
}

pub fn diff_decisions(
    topic: &TopicRecord,
    (label_a, a): (&str, &Decision),
    (label_b, b): (&str, &Decision),
) -> DiffModel {
    let outcome = (a.outcome != b.outcome).then(|| ValueDiff {
        label: "Outcome".to_string(),
        value_a: a.outcome,
        value_b: b.outcome,
    });
    let confidence = (a.confidence != b.confidence).then(|| ValueDiff {
        label: "Confidence".to_string(),
        value_a: a.confidence,
        value_b: b.confidence,
    });

    let fit_a = derive_fit_misfit(topic, a);
    let fit_b = derive_fit_misfit(topic, b);

    let gains = SetDiff::between(&a.tradeoffs.gains, &b.tradeoffs.gains);
    let losses = SetDiff::between(&a.tradeoffs.losses, &b.tradeoffs.losses);
    let assumptions = SetDiff::between(&a.assumptions, &b.assumptions);
    let change_conditions = SetDiff::between(&a.change_conditions, &b.change_conditions);
    let fit = SetDiff::between(&fit_a.right_for, &fit_b.right_for);
    let misfit = SetDiff::between(&fit_a.not_ideal_for, &fit_b.not_ideal_for);

    let has_differences = outcome.is_some()
        || confidence.is_some()
        || [&gains, &losses, &assumptions, &change_conditions, &fit, &misfit]
            .iter()
            .any(|set| !set.is_empty());

    DiffModel {
        label_a: label_a.to_string(),
        label_b: label_b.to_string(),
        has_differences,
        outcome,
        confidence,
        gains,
        losses,
        assumptions,
        change_conditions,
        fit,
        misfit,
    }
}

/// One side of a comparison as submitted by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledOutput {
    pub label: String,
    pub output: DecisionOutput,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Comparison {
    Compared(DiffModel),
    /// At least one side is a refusal, so no diff was attempted.
    Skipped {
        reason: String,
        refused: Vec<String>,
    },
}

impl Comparison {
    pub fn diff(&self) -> Option<&DiffModel> {
        match self {
            Self::Compared(diff) => Some(diff),
            Self::Skipped { .. } => None,
        }
    }
}

pub fn compare(topic: &TopicRecord, a: &LabeledOutput, b: &LabeledOutput) -> Comparison {
    match (&a.output, &b.output) {
        (DecisionOutput::Decision(left), DecisionOutput::Decision(right)) => Comparison::Compared(
            diff_decisions(topic, (a.label.as_str(), left), (b.label.as_str(), right)),
        ),
        _ => {
            let refused: Vec<String> = [a, b]
                .iter()
                .filter(|side| side.output.as_refusal().is_some())
                .map(|side| side.label.clone())
                .collect();
            Comparison::Skipped {
                reason: format!("{} returned a refusal", refused.join(" and ")),
                refused,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{DecisionTradeoffs, Refusal};
    use crate::topics::TravelerSegment;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    fn topic() -> TopicRecord {
        TopicRecord {
            id: "kenya_vs_tanzania_first_safari".to_string(),
            slug: "kenya-vs-tanzania-first-safari".to_string(),
            question: "Kenya or Tanzania for a first safari?".to_string(),
            published: true,
            required_inputs: Vec::new(),
            optional_inputs: Vec::new(),
            assumptions: Vec::new(),
            tradeoffs: Vec::new(),
            change_conditions: Vec::new(),
            refusal_triggers: Vec::new(),
            destinations: strings(&["Kenya", "Tanzania"]),
            time_context: None,
            traveler_segments: vec![TravelerSegment::FirstTime],
            eligible_outcomes: vec![Outcome::Book, Outcome::Switch],
            default_outcome: Outcome::Book,
            confidence_range: [0.6, 0.85],
            context_line: "Kenya & Tanzania · first-time travelers".to_string(),
        }
    }

    fn decision(outcome: Outcome, confidence: f64, gains: &[&str]) -> Decision {
        Decision {
            outcome,
            headline: "Headline".to_string(),
            summary: "Summary".to_string(),
            assumptions: strings(&["Seven days", "July travel"]),
            tradeoffs: DecisionTradeoffs {
                gains: strings(gains),
                losses: strings(&["Higher prices"]),
            },
            change_conditions: strings(&["Budget changes"]),
            confidence,
        }
    }

    #[test]
    fn identical_decisions_have_no_differences() {
        let a = decision(Outcome::Book, 0.8, &["Short transfers"]);
        let diff = diff_decisions(&topic(), ("Kenya", &a), ("Kenya again", &a));

        assert!(!diff.has_differences);
        assert!(diff.outcome.is_none());
        assert!(diff.confidence.is_none());
        assert!(diff.gains.is_empty());
        assert!(diff.fit.is_empty());
    }

    #[test]
    fn set_order_and_duplicates_are_ignored() {
        let a = decision(Outcome::Book, 0.8, &["Short transfers", "Big herds"]);
        let b = decision(Outcome::Book, 0.8, &["Big herds", "Short transfers", "Big herds"]);
        let diff = diff_decisions(&topic(), ("A", &a), ("B", &b));
        assert!(!diff.has_differences);
    }

    #[test]
    fn differences_are_symmetric() {
        let a = decision(Outcome::Book, 0.8, &["Short transfers", "Short transfers", "Big herds"]);
        let b = decision(Outcome::Switch, 0.7, &["Big herds", "Remote camps"]);

        let ab = diff_decisions(&topic(), ("Kenya", &a), ("Tanzania", &b));
        let ba = diff_decisions(&topic(), ("Tanzania", &b), ("Kenya", &a));

        assert!(ab.has_differences);
        assert_eq!(ab.gains.only_in_a, strings(&["Short transfers"]));
        assert_eq!(ab.gains.only_in_b, strings(&["Remote camps"]));
        assert_eq!(ab.gains.only_in_a, ba.gains.only_in_b);
        assert_eq!(ab.gains.only_in_b, ba.gains.only_in_a);
        assert_eq!(ab.fit.only_in_a, ba.fit.only_in_b);
        assert_eq!(ab.misfit.only_in_b, ba.misfit.only_in_a);

        let outcome = ab.outcome.expect("outcome differs");
        assert_eq!((outcome.value_a, outcome.value_b), (Outcome::Book, Outcome::Switch));
        let confidence = ab.confidence.expect("confidence differs");
        assert_eq!((confidence.value_a, confidence.value_b), (0.8, 0.7));
    }

    #[test]
    fn refusals_skip_the_comparison() {
        let decided = LabeledOutput {
            label: "Kenya".to_string(),
            output: DecisionOutput::Decision(decision(Outcome::Book, 0.8, &[])),
        };
        let refused = LabeledOutput {
            label: "Tanzania".to_string(),
            output: DecisionOutput::Refusal(Refusal {
                reason: "Missing budget".to_string(),
                ..Refusal::default()
            }),
        };

        let comparison = compare(&topic(), &decided, &refused);
        assert!(comparison.diff().is_none());
        match comparison {
            Comparison::Skipped { refused, reason } => {
                assert_eq!(refused, strings(&["Tanzania"]));
                assert_eq!(reason, "Tanzania returned a refusal");
            }
            other => panic!("expected skip, got {:?}", other),
        }

        let same = compare(&topic(), &decided, &decided);
        assert!(same.diff().is_some_and(|diff| !diff.has_differences));
    }
}
