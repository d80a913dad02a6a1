//! Offline consistency check run before content is released.

use crate::catalog::{InputCatalog, RuntimeInput};
use crate::topics::{TopicCompiler, TopicDefinitionSet, TopicWarning};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use tracing::{info, warn};

const REQUIRED_RANGE: (usize, usize) = (2, 4);
const MAX_OPTIONAL: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    Key,
    Label,
    Description,
    Example,
}

impl InputField {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Key => "key",
            Self::Label => "label",
            Self::Description => "description",
            Self::Example => "example",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CoverageIssue {
    DuplicateTopicId { topic_id: String, count: usize },
    DuplicateSlug { slug: String, topic_ids: Vec<String> },
    RequiredInputCount { topic_id: String, count: usize },
    OptionalInputCount { topic_id: String, count: usize },
    DuplicateInputKey { topic_id: String, key: String },
    EmptyInputField { topic_id: String, key: String, field: InputField },
    UnknownCatalogKey { topic_id: String, key: String },
    IneligibleDefaultOutcome { topic_id: String },
    InvalidConfidenceRange { topic_id: String, range: [f64; 2] },
}

impl fmt::Display for CoverageIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoverageIssue::DuplicateTopicId { topic_id, count } => {
                write!(f, "{topic_id}: id is defined {count} times")
            }
            CoverageIssue::DuplicateSlug { slug, topic_ids } => {
                write!(f, "slug '{}' is shared by {}", slug, topic_ids.join(", "))
            }
            CoverageIssue::RequiredInputCount { topic_id, count } => write!(
                f,
                "{topic_id}: {count} required inputs (expected {}-{})",
                REQUIRED_RANGE.0, REQUIRED_RANGE.1
            ),
            CoverageIssue::OptionalInputCount { topic_id, count } => write!(
                f,
                "{topic_id}: {count} optional inputs (at most {MAX_OPTIONAL})"
            ),
            CoverageIssue::DuplicateInputKey { topic_id, key } => {
                write!(f, "{topic_id}: input '{key}' is declared twice")
            }
            CoverageIssue::EmptyInputField {
                topic_id,
                key,
                field,
            } => write!(f, "{topic_id}: input '{key}' has an empty {}", field.label()),
            CoverageIssue::UnknownCatalogKey { topic_id, key } => {
                write!(f, "{topic_id}: input '{key}' is not in the catalog")
            }
            CoverageIssue::IneligibleDefaultOutcome { topic_id } => {
                write!(f, "{topic_id}: default outcome is not eligible")
            }
            CoverageIssue::InvalidConfidenceRange { topic_id, range } => write!(
                f,
                "{topic_id}: confidence range [{}, {}] is not within [0, 1]",
                range[0], range[1]
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CoverageReport {
    pub definitions: usize,
    pub published: usize,
    pub issues: Vec<CoverageIssue>,
    pub warnings: Vec<TopicWarning>,
}

impl CoverageReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

impl fmt::Display for CoverageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "checked {} definitions ({} published): {} issue(s), {} warning(s)",
            self.definitions,
            self.published,
            self.issues.len(),
            self.warnings.len()
        )?;
        for issue in &self.issues {
            writeln!(f, "  error: {issue}")?;
        }
        for warning in &self.warnings {
            writeln!(f, "  warning: {}: {}", warning.topic_id, warning.warning)?;
        }
        Ok(())
    }
}

/// Compiles every definition and collects all content defects in one pass.
pub fn verify_coverage(catalog: &InputCatalog, definitions: &TopicDefinitionSet) -> CoverageReport {
    let compiled = TopicCompiler::new(catalog).compile_set(definitions);
    let mut issues = Vec::new();

    // Each definition compiles to one record, so a repeated id is the only way to get two.
    let mut id_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for definition in definitions.iter() {
        *id_counts.entry(definition.id.as_str()).or_default() += 1;
    }
    for (topic_id, count) in &id_counts {
        if *count > 1 {
            issues.push(CoverageIssue::DuplicateTopicId {
                topic_id: topic_id.to_string(),
                count: *count,
            });
        }
    }

    for collision in compiled.slug_collisions() {
        issues.push(CoverageIssue::DuplicateSlug {
            slug: collision.slug,
            topic_ids: collision.topic_ids,
        });
    }

    for definition in definitions.iter() {
        let topic_id = &definition.id;
        let required = definition.required_inputs.len();
        if !(REQUIRED_RANGE.0..=REQUIRED_RANGE.1).contains(&required) {
            issues.push(CoverageIssue::RequiredInputCount {
                topic_id: topic_id.clone(),
                count: required,
            });
        }
        if definition.optional_inputs.len() > MAX_OPTIONAL {
            issues.push(CoverageIssue::OptionalInputCount {
                topic_id: topic_id.clone(),
                count: definition.optional_inputs.len(),
            });
        }

        let mut seen = HashSet::new();
        for spec in definition
            .required_inputs
            .iter()
            .chain(definition.optional_inputs.iter())
        {
            if !seen.insert(spec.key.as_str()) {
                issues.push(CoverageIssue::DuplicateInputKey {
                    topic_id: topic_id.clone(),
                    key: spec.key.clone(),
                });
            }
            if catalog.resolve(&spec.key).is_none() {
                issues.push(CoverageIssue::UnknownCatalogKey {
                    topic_id: topic_id.clone(),
                    key: spec.key.clone(),
                });
            }
        }
    }

    for record in compiled.records() {
        for input in record.required_inputs.iter().chain(record.optional_inputs.iter()) {
            for field in empty_fields(input) {
                issues.push(CoverageIssue::EmptyInputField {
                    topic_id: record.id.clone(),
                    key: input.key.clone(),
                    field,
                });
            }
        }

        if !record.eligible_outcomes.contains(&record.default_outcome) {
            issues.push(CoverageIssue::IneligibleDefaultOutcome {
                topic_id: record.id.clone(),
            });
        }

        let [min, max] = record.confidence_range;
        if !(0.0 <= min && min <= max && max <= 1.0) {
            issues.push(CoverageIssue::InvalidConfidenceRange {
                topic_id: record.id.clone(),
                range: record.confidence_range,
            });
        }
    }

    for issue in &issues {
        warn!(%issue, "topic coverage issue");
    }

    let report = CoverageReport {
        definitions: definitions.len(),
        published: definitions.published().count(),
        issues,
        warnings: compiled.warnings().to_vec(),
    };
    info!(
        definitions = report.definitions,
        published = report.published,
        issues = report.issues.len(),
        "verified topic coverage"
    );
    report
}

fn empty_fields(input: &RuntimeInput) -> Vec<InputField> {
    [
        (InputField::Key, &input.key),
        (InputField::Label, &input.label),
        (InputField::Description, &input.description),
        (InputField::Example, &input.example),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BUDGET_BAND, DATES_MONTH};
    use crate::topics::{InputSpec, TopicDefinition, TopicMetadata};

    fn definition(id: &str, required: &[&str]) -> TopicDefinition {
        TopicDefinition {
            id: id.to_string(),
            question: "Is July a good month for a safari in Tanzania?".to_string(),
            published: true,
            required_inputs: required.iter().map(|key| InputSpec::catalog(key)).collect(),
            optional_inputs: Vec::new(),
            assumptions: Vec::new(),
            tradeoffs: Vec::new(),
            change_conditions: Vec::new(),
            refusal_triggers: Vec::new(),
            metadata: TopicMetadata::default(),
        }
    }

    #[test]
    fn standard_content_is_clean() {
        let report = verify_coverage(&InputCatalog::standard(), &TopicDefinitionSet::standard());
        assert!(report.is_clean(), "{report}");
        assert!(report.published < report.definitions);
    }

    #[test]
    fn every_defect_is_reported() {
        let definitions = TopicDefinitionSet::from_definitions(vec![
            definition("tz_july_safari", &[DATES_MONTH]),
            definition("tz_july_safari", &[DATES_MONTH, BUDGET_BAND]),
            definition("solo_safari", &[BUDGET_BAND, BUDGET_BAND]),
            definition("solo-safari", &[BUDGET_BAND, "user_context.pet_count"]),
        ]);

        let report = verify_coverage(&InputCatalog::standard(), &definitions);
        let issues = &report.issues;

        assert!(issues.contains(&CoverageIssue::DuplicateTopicId {
            topic_id: "tz_july_safari".to_string(),
            count: 2,
        }));
        assert!(issues.contains(&CoverageIssue::RequiredInputCount {
            topic_id: "tz_july_safari".to_string(),
            count: 1,
        }));
        assert!(issues.contains(&CoverageIssue::DuplicateInputKey {
            topic_id: "solo_safari".to_string(),
            key: BUDGET_BAND.to_string(),
        }));
        assert!(issues.contains(&CoverageIssue::UnknownCatalogKey {
            topic_id: "solo-safari".to_string(),
            key: "user_context.pet_count".to_string(),
        }));
        assert!(issues.contains(&CoverageIssue::EmptyInputField {
            topic_id: "solo-safari".to_string(),
            key: "user_context.pet_count".to_string(),
            field: InputField::Label,
        }));
        assert!(issues.iter().any(|issue| matches!(
            issue,
            CoverageIssue::DuplicateSlug { slug, .. } if slug == "solo-safari"
        )));
        assert!(!report.is_clean());
    }

    #[test]
    fn report_lists_every_issue_line() {
        let definitions = TopicDefinitionSet::from_definitions(vec![definition(
            "tz_july_safari",
            &[DATES_MONTH],
        )]);
        let rendered = verify_coverage(&InputCatalog::standard(), &definitions).to_string();
        assert!(rendered.starts_with("checked 1 definitions (1 published): 1 issue(s)"));
        assert!(rendered.contains("error: tz_july_safari: 1 required inputs (expected 2-4)"));
    }

    #[test]
    fn a_draft_sharing_a_published_id_is_reported_once() {
        let mut draft = definition("tz_july_safari", &[DATES_MONTH, BUDGET_BAND]);
        draft.published = false;
        let definitions = TopicDefinitionSet::from_definitions(vec![
            definition("tz_july_safari", &[DATES_MONTH, BUDGET_BAND]),
            draft,
        ]);

        let report = verify_coverage(&InputCatalog::standard(), &definitions);

        assert_eq!(report.published, 1);
        let duplicates: Vec<_> = report
            .issues
            .iter()
            .filter(|issue| matches!(issue, CoverageIssue::DuplicateTopicId { .. }))
            .collect();
        assert_eq!(
            duplicates,
            vec![&CoverageIssue::DuplicateTopicId {
                topic_id: "tz_july_safari".to_string(),
                count: 2,
            }]
        );
    }
}
