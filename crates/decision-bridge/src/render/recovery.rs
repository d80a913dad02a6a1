use super::snippet::build_example_snippet;
use crate::catalog::{
    InputCatalog, RuntimeInput, BUDGET_BAND, COMFORT_LEVEL, DATES_FLEXIBILITY, DATES_MONTH,
    DATES_YEAR, FIRST_SAFARI, MIN_CATALOG_ENTRIES, PARTY_ADULTS, PARTY_CHILDREN_AGES,
    RISK_TOLERANCE, TRIP_LENGTH_DAYS,
};
use crate::contract::Refusal;
use crate::topics::TopicRecord;
use serde::Serialize;
use tracing::debug;

pub const MIN_RECOVERY_INPUTS: usize = MIN_CATALOG_ENTRIES;
pub const MAX_RECOVERY_INPUTS: usize = 7;

const DEFAULT_NEXT_STEP: &str =
    "Share the details below and ask again for a decision that fits your trip.";

const REASON_INPUTS: &[(&str, &[&str])] = &[
    (
        "missing_material_inputs",
        &[DATES_MONTH, DATES_YEAR, BUDGET_BAND, PARTY_ADULTS],
    ),
    ("inputs_conflict_unbounded", &[BUDGET_BAND, COMFORT_LEVEL]),
    ("guarantee_requested", &[RISK_TOLERANCE, DATES_FLEXIBILITY]),
    (
        "Missing travel dates",
        &[DATES_MONTH, DATES_YEAR, DATES_FLEXIBILITY],
    ),
    ("Missing budget", &[BUDGET_BAND, TRIP_LENGTH_DAYS]),
    (
        "Missing traveler details",
        &[PARTY_ADULTS, PARTY_CHILDREN_AGES, FIRST_SAFARI],
    ),
];

// Checked in order once exact and substring matching fail.
const REASON_KEYWORDS: &[(&str, &str)] = &[
    ("conflict", "inputs_conflict_unbounded"),
    ("guarantee", "guarantee_requested"),
    ("date", "Missing travel dates"),
    ("budget", "Missing budget"),
    ("traveler", "Missing traveler details"),
    ("material", "missing_material_inputs"),
];

const FALLBACK_KEYS: &[&str] = &[
    DATES_MONTH,
    DATES_YEAR,
    BUDGET_BAND,
    PARTY_ADULTS,
    TRIP_LENGTH_DAYS,
    DATES_FLEXIBILITY,
    COMFORT_LEVEL,
];

/// Maps a free-form refusal reason onto one of the known reasons.
pub fn match_reason(reason: &str) -> Option<&'static str> {
    let trimmed = reason.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some((known, _)) = REASON_INPUTS.iter().find(|(known, _)| *known == trimmed) {
        return Some(*known);
    }

    let lowered = trimmed.to_lowercase();
    if let Some((known, _)) = REASON_INPUTS
        .iter()
        .find(|(known, _)| lowered.contains(&known.to_lowercase()))
    {
        return Some(*known);
    }

    REASON_KEYWORDS
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, known)| *known)
}

/// Catalog keys a known reason points at, before any padding.
pub fn keys_for_reason(reason: &str) -> Option<&'static [&'static str]> {
    let known = match_reason(reason)?;
    REASON_INPUTS
        .iter()
        .find(|(candidate, _)| *candidate == known)
        .map(|(_, keys)| *keys)
}

/// Inputs to ask the traveler for after a refusal, always 3 to 7 entries.
pub fn missing_inputs(
    catalog: &InputCatalog,
    topic: &TopicRecord,
    reason: Option<&str>,
) -> Vec<RuntimeInput> {
    let mut selected = InputSelection::default();

    match reason.and_then(keys_for_reason) {
        Some(keys) => {
            for key in keys {
                selected.push(resolve_input(catalog, topic, key));
            }
        }
        None => {
            for input in &topic.required_inputs {
                selected.push(Some(input.clone()));
            }
        }
    }

    for input in topic.optional_inputs.iter().chain(topic.required_inputs.iter()) {
        if selected.is_full() {
            break;
        }
        selected.push(Some(input.clone()));
    }

    for key in FALLBACK_KEYS {
        if selected.is_full() {
            break;
        }
        selected.push(resolve_input(catalog, topic, key));
    }

    // Injected catalogs may not carry the fallback keys.
    for entry in catalog.iter() {
        if selected.is_full() {
            break;
        }
        selected.push(resolve_input(catalog, topic, &entry.key));
    }

    let mut inputs = selected.inputs;
    inputs.truncate(MAX_RECOVERY_INPUTS);
    inputs
}

fn resolve_input(catalog: &InputCatalog, topic: &TopicRecord, key: &str) -> Option<RuntimeInput> {
    topic
        .declared_input(key)
        .cloned()
        .or_else(|| catalog.runtime_input(key, None))
}

#[derive(Default)]
struct InputSelection {
    inputs: Vec<RuntimeInput>,
}

impl InputSelection {
    fn push(&mut self, input: Option<RuntimeInput>) {
        if let Some(input) = input {
            if !self.inputs.iter().any(|existing| existing.key == input.key) {
                self.inputs.push(input);
            }
        }
    }

    fn is_full(&self) -> bool {
        self.inputs.len() >= MIN_RECOVERY_INPUTS
    }
}

/// Guidance shown in place of a decision when the engine refuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecoveryModel {
    pub reason: Option<String>,
    pub matched_reason: Option<String>,
    pub safe_next_step: String,
    pub missing_inputs: Vec<RuntimeInput>,
    pub example_snippet: String,
}

impl RecoveryModel {
    pub fn derive(
        catalog: &InputCatalog,
        topic: &TopicRecord,
        reason: Option<&str>,
        safe_next_step: Option<&str>,
    ) -> Self {
        let reason = reason
            .map(str::trim)
            .filter(|reason| !reason.is_empty());
        let matched_reason = reason.and_then(match_reason);
        let missing_inputs = missing_inputs(catalog, topic, reason);

        debug!(
            topic = %topic.id,
            reason = reason.unwrap_or("none"),
            matched = matched_reason.unwrap_or("none"),
            inputs = missing_inputs.len(),
            "derived refusal recovery"
        );

        Self {
            reason: reason.map(str::to_string),
            matched_reason: matched_reason.map(str::to_string),
            safe_next_step: safe_next_step
                .map(str::trim)
                .filter(|step| !step.is_empty())
                .unwrap_or(DEFAULT_NEXT_STEP)
                .to_string(),
            example_snippet: build_example_snippet(&missing_inputs),
            missing_inputs,
        }
    }

    pub fn from_refusal(catalog: &InputCatalog, topic: &TopicRecord, refusal: &Refusal) -> Self {
        Self::derive(
            catalog,
            topic,
            Some(refusal.reason.as_str()),
            Some(refusal.safe_next_step.as_str()),
        )
    }
}
