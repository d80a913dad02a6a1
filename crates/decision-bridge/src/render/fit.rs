use crate::contract::Decision;
use crate::topics::{Outcome, TopicRecord, TravelerSegment};
use serde::Serialize;

pub const MIN_FIT_ITEMS: usize = 2;
pub const MAX_FIT_ITEMS: usize = 4;
const MAX_INVALIDATING_CONDITIONS: usize = 3;
const RISK_COUNT: usize = 2;

const RIGHT_FOR_FILLERS: &[&str] = &[
    "Travelers whose priorities match the assumptions above",
    "Travelers comfortable with the stated trade-offs",
];

const NOT_IDEAL_FILLERS: &[&str] = &[
    "Travelers whose circumstances differ from the stated assumptions",
    "Travelers who need certainty the decision can't provide",
];

fn segment_fit(segment: TravelerSegment) -> (&'static str, &'static str) {
    match segment {
        TravelerSegment::FirstTime => (
            "First-time visitors who want a well-trodden plan",
            "Travelers looking for an off-the-beaten-path itinerary",
        ),
        TravelerSegment::Solo => (
            "Solo travelers comfortable joining shared activities",
            "Travelers who want a fully private experience",
        ),
        TravelerSegment::Families => (
            "Families who can plan around children's ages",
            "Families needing guaranteed child-friendly pacing",
        ),
        TravelerSegment::BudgetConscious => (
            "Budget-conscious travelers prioritizing value",
            "Travelers expecting premium inclusions at budget prices",
        ),
        TravelerSegment::Luxury => (
            "Travelers prioritizing comfort and exclusive access",
            "Travelers trying to minimize total cost",
        ),
        TravelerSegment::Repeat => (
            "Repeat visitors looking beyond the classic circuit",
            "First-time visitors who want the classic highlights",
        ),
    }
}

fn outcome_fit(outcome: Outcome) -> (&'static str, &'static str) {
    match outcome {
        Outcome::Book => (
            "Travelers ready to commit to dates now",
            "Travelers who need maximum flexibility on dates",
        ),
        Outcome::Wait => (
            "Travelers with flexible timing who can watch for changes",
            "Travelers who must lock in plans soon",
        ),
        Outcome::Switch => (
            "Travelers open to an alternative destination or timing",
            "Travelers set on their original choice",
        ),
        Outcome::Discard => (
            "Travelers willing to rethink the trip entirely",
            "Travelers committed to this trip as planned",
        ),
    }
}

/// "Right for" / "not ideal for" framing shown beside a decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FitMisfit {
    pub right_for: Vec<String>,
    pub not_ideal_for: Vec<String>,
    pub primary_condition: Option<String>,
    pub invalidating_conditions: Vec<String>,
}

pub fn derive_fit_misfit(topic: &TopicRecord, decision: &Decision) -> FitMisfit {
    let (outcome_right, outcome_misfit) = outcome_fit(decision.outcome);

    let mut right_for: Vec<String> = topic
        .traveler_segments
        .iter()
        .map(|segment| segment_fit(*segment).0.to_string())
        .collect();
    right_for.push(outcome_right.to_string());

    let mut not_ideal_for: Vec<String> = topic
        .tradeoffs
        .iter()
        .take(RISK_COUNT)
        .map(|tradeoff| format!("Travelers who can't accept {}", tradeoff.loss.to_lowercase()))
        .collect();
    not_ideal_for.extend(
        topic
            .traveler_segments
            .iter()
            .map(|segment| segment_fit(*segment).1.to_string()),
    );
    not_ideal_for.push(outcome_misfit.to_string());

    FitMisfit {
        right_for: bounded(right_for, RIGHT_FOR_FILLERS),
        not_ideal_for: bounded(not_ideal_for, NOT_IDEAL_FILLERS),
        primary_condition: decision.assumptions.first().cloned(),
        invalidating_conditions: decision
            .change_conditions
            .iter()
            .take(MAX_INVALIDATING_CONDITIONS)
            .cloned()
            .collect(),
    }
}

/// Dedupes, pads up to the floor from `fillers`, and truncates to the ceiling.
fn bounded(items: Vec<String>, fillers: &[&str]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(MAX_FIT_ITEMS);
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }

    for filler in fillers {
        if unique.len() >= MIN_FIT_ITEMS {
            break;
        }
        if !unique.iter().any(|item| item == filler) {
            unique.push(filler.to_string());
        }
    }

    unique.truncate(MAX_FIT_ITEMS);
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::DecisionTradeoffs;
    use crate::topics::Tradeoff;

    fn topic(segments: Vec<TravelerSegment>, losses: &[&str]) -> TopicRecord {
        TopicRecord {
            id: "tz_july_safari".to_string(),
            slug: "tanzania-safari-in-july".to_string(),
            question: "Is July a good month for a safari in Tanzania?".to_string(),
            published: true,
            required_inputs: Vec::new(),
            optional_inputs: Vec::new(),
            assumptions: Vec::new(),
            tradeoffs: losses
                .iter()
                .map(|loss| Tradeoff {
                    gain: "Something good".to_string(),
                    loss: loss.to_string(),
                })
                .collect(),
            change_conditions: Vec::new(),
            refusal_triggers: Vec::new(),
            destinations: vec!["Tanzania".to_string()],
            time_context: None,
            traveler_segments: segments,
            eligible_outcomes: Outcome::ordered().to_vec(),
            default_outcome: Outcome::Book,
            confidence_range: [0.7, 0.9],
            context_line: "Tanzania · first-time travelers".to_string(),
        }
    }

    fn decision(outcome: Outcome) -> Decision {
        Decision {
            outcome,
            headline: "Go in July".to_string(),
            summary: "Peak game viewing.".to_string(),
            assumptions: vec!["Travel in July".to_string(), "Budget fits".to_string()],
            tradeoffs: DecisionTradeoffs::default(),
            change_conditions: vec![
                "Dates move".to_string(),
                "Budget drops".to_string(),
                "Parks close".to_string(),
                "Flights cancelled".to_string(),
            ],
            confidence: 0.8,
        }
    }

    #[test]
    fn risks_are_templated_from_the_first_two_losses() {
        let fit = derive_fit_misfit(
            &topic(
                vec![TravelerSegment::FirstTime],
                &["Peak-season pricing", "Busy sightings", "Long drives"],
            ),
            &decision(Outcome::Book),
        );

        assert_eq!(
            &fit.not_ideal_for[..2],
            &[
                "Travelers who can't accept peak-season pricing".to_string(),
                "Travelers who can't accept busy sightings".to_string(),
            ]
        );
        assert!(!fit
            .not_ideal_for
            .iter()
            .any(|item| item.contains("long drives")));
    }

    #[test]
    fn lists_stay_within_bounds() {
        let many = derive_fit_misfit(
            &topic(
                vec![
                    TravelerSegment::FirstTime,
                    TravelerSegment::Solo,
                    TravelerSegment::Families,
                    TravelerSegment::Luxury,
                ],
                &["Cost", "Crowds"],
            ),
            &decision(Outcome::Wait),
        );
        assert_eq!(many.right_for.len(), MAX_FIT_ITEMS);
        assert_eq!(many.not_ideal_for.len(), MAX_FIT_ITEMS);

        let few = derive_fit_misfit(&topic(Vec::new(), &[]), &decision(Outcome::Switch));
        assert_eq!(
            few.right_for,
            vec![
                "Travelers open to an alternative destination or timing".to_string(),
                RIGHT_FOR_FILLERS[0].to_string(),
            ]
        );
        assert_eq!(few.not_ideal_for.len(), MIN_FIT_ITEMS);
    }

    #[test]
    fn duplicate_risks_collapse() {
        let fit = derive_fit_misfit(
            &topic(Vec::new(), &["Peak pricing", "PEAK PRICING"]),
            &decision(Outcome::Book),
        );
        let risk_count = fit
            .not_ideal_for
            .iter()
            .filter(|item| item.as_str() == "Travelers who can't accept peak pricing")
            .count();
        assert_eq!(risk_count, 1);
    }

    #[test]
    fn conditions_come_from_the_decision() {
        let fit = derive_fit_misfit(
            &topic(vec![TravelerSegment::Repeat], &["Cost"]),
            &decision(Outcome::Book),
        );
        assert_eq!(fit.primary_condition.as_deref(), Some("Travel in July"));
        assert_eq!(
            fit.invalidating_conditions,
            vec!["Dates move", "Budget drops", "Parks close"]
        );
    }
}
