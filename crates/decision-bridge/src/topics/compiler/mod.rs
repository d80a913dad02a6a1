mod confidence;
mod rules;
mod slug;

pub use confidence::{confidence_range, DEFAULT_CONFIDENCE_RANGE};
pub use slug::slug_for;

use super::definitions::TopicDefinitionSet;
use super::domain::{
    CompileWarning, InputSpec, TimeContext, TopicDefinition, TopicMetadata, TopicRecord,
    TravelerSegment,
};
use crate::catalog::{InputCatalog, RuntimeInput};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Compiled record plus every fallback the compiler had to take.
#[derive(Debug, Clone)]
pub struct CompiledTopic {
    pub record: TopicRecord,
    pub warnings: Vec<CompileWarning>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicWarning {
    pub topic_id: String,
    pub warning: CompileWarning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlugCollision {
    pub slug: String,
    pub topic_ids: Vec<String>,
}

/// Turns authored definitions into runtime topic records.
///
/// Every derivation has a total fallback, so compilation itself never fails;
/// ambiguity is reported through [`CompileWarning`]s instead.
pub struct TopicCompiler<'a> {
    catalog: &'a InputCatalog,
}

impl<'a> TopicCompiler<'a> {
    pub fn new(catalog: &'a InputCatalog) -> Self {
        Self { catalog }
    }

    pub fn compile(&self, definition: &TopicDefinition) -> CompiledTopic {
        let mut warnings = Vec::new();
        let id = definition.id.as_str();
        let question = definition.question.as_str();

        let required_inputs = self.resolve_inputs(&definition.required_inputs, &mut warnings);
        let optional_inputs = self.resolve_inputs(&definition.optional_inputs, &mut warnings);

        let metadata = &definition.metadata;

        let destinations = match metadata
            .destinations
            .as_ref()
            .filter(|destinations| !destinations.is_empty())
        {
            Some(destinations) => destinations.clone(),
            None => rules::infer_destinations(id, question).unwrap_or_else(|| {
                warnings.push(CompileWarning::DestinationsDefaulted);
                rules::default_destinations()
            }),
        };

        let time_context = match &metadata.time_context {
            Some(authored) => normalize_time_context(authored),
            None => rules::infer_time_context(id, question),
        };

        let mut traveler_segments = match metadata
            .traveler_segments
            .as_ref()
            .filter(|segments| !segments.is_empty())
        {
            Some(segments) => dedupe_segments(segments),
            None => rules::infer_segments(id, question),
        };
        if traveler_segments.is_empty() {
            warnings.push(CompileWarning::TravelerSegmentsDefaulted);
            traveler_segments.push(TravelerSegment::FirstTime);
        }

        let complexity = metadata
            .complexity
            .or_else(|| confidence::classified_complexity(id));
        if complexity.is_none() {
            warnings.push(CompileWarning::ComplexityUnknown);
        }

        let eligible_outcomes = rules::infer_eligible_outcomes(id, question);
        let requested = rules::rule_default_outcome(id);
        let default_outcome = if eligible_outcomes.contains(&requested) {
            requested
        } else {
            let applied = eligible_outcomes.first().copied().unwrap_or(requested);
            warnings.push(CompileWarning::DefaultOutcomeAdjusted { requested, applied });
            applied
        };

        let context_line = context_line(&destinations, time_context.as_ref(), &traveler_segments);

        let record = TopicRecord {
            id: definition.id.clone(),
            slug: slug_for(id),
            question: definition.question.clone(),
            published: definition.published,
            required_inputs,
            optional_inputs,
            assumptions: definition.assumptions.clone(),
            tradeoffs: definition.tradeoffs.clone(),
            change_conditions: definition.change_conditions.clone(),
            refusal_triggers: definition.refusal_triggers.clone(),
            destinations,
            time_context,
            traveler_segments,
            eligible_outcomes,
            default_outcome,
            confidence_range: confidence_range(complexity),
            context_line,
        };

        CompiledTopic { record, warnings }
    }

    pub fn compile_set(&self, definitions: &TopicDefinitionSet) -> CompiledTopicSet {
        let mut records = Vec::with_capacity(definitions.len());
        let mut warnings = Vec::new();

        for definition in definitions.iter() {
            let CompiledTopic {
                record,
                warnings: topic_warnings,
            } = self.compile(definition);

            for warning in topic_warnings {
                warn!(topic = %record.id, %warning, "topic compiled with fallback");
                warnings.push(TopicWarning {
                    topic_id: record.id.clone(),
                    warning,
                });
            }
            records.push(record);
        }

        debug!(
            topics = records.len(),
            warnings = warnings.len(),
            "compiled topic definitions"
        );

        CompiledTopicSet { records, warnings }
    }

    fn resolve_inputs(
        &self,
        specs: &[InputSpec],
        warnings: &mut Vec<CompileWarning>,
    ) -> Vec<RuntimeInput> {
        specs
            .iter()
            .map(|spec| {
                self.catalog
                    .runtime_input(&spec.key, Some(&spec.overrides))
                    .unwrap_or_else(|| {
                        warnings.push(CompileWarning::UnknownCatalogKey {
                            key: spec.key.clone(),
                        });
                        RuntimeInput {
                            key: spec.key.clone(),
                            label: spec.overrides.label.clone().unwrap_or_default(),
                            description: spec.overrides.description.clone().unwrap_or_default(),
                            example: spec.overrides.example.clone().unwrap_or_default(),
                        }
                    })
            })
            .collect()
    }
}

/// Runs the text heuristics only, filling every field the compiler would fill.
///
/// Used to backfill explicit metadata onto definitions that predate it.
pub fn infer_metadata(id: &str, question: &str) -> TopicMetadata {
    let segments = rules::infer_segments(id, question);
    TopicMetadata {
        destinations: Some(
            rules::infer_destinations(id, question).unwrap_or_else(rules::default_destinations),
        ),
        time_context: rules::infer_time_context(id, question),
        traveler_segments: Some(if segments.is_empty() {
            vec![TravelerSegment::FirstTime]
        } else {
            segments
        }),
        complexity: confidence::classified_complexity(id),
    }
}

fn normalize_time_context(authored: &TimeContext) -> Option<TimeContext> {
    let normalized = TimeContext {
        month: authored
            .month
            .as_deref()
            .filter(|month| !month.trim().is_empty())
            .map(rules::normalize_month),
        season: authored.season,
    };
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

fn dedupe_segments(segments: &[TravelerSegment]) -> Vec<TravelerSegment> {
    let mut unique = Vec::with_capacity(segments.len());
    for segment in segments {
        if !unique.contains(segment) {
            unique.push(*segment);
        }
    }
    unique
}

fn context_line(
    destinations: &[String],
    time_context: Option<&TimeContext>,
    segments: &[TravelerSegment],
) -> String {
    let mut parts = vec![destinations.join(" & ")];
    if let Some(label) = time_context.and_then(TimeContext::label) {
        parts.push(label);
    }
    parts.push(
        segments
            .iter()
            .map(|segment| segment.label())
            .collect::<Vec<_>>()
            .join(", "),
    );
    parts.join(" · ")
}

/// Output of compiling a whole definition set.
#[derive(Debug, Clone, Default)]
pub struct CompiledTopicSet {
    records: Vec<TopicRecord>,
    warnings: Vec<TopicWarning>,
}

impl CompiledTopicSet {
    pub fn records(&self) -> &[TopicRecord] {
        &self.records
    }

    pub fn warnings(&self) -> &[TopicWarning] {
        &self.warnings
    }

    pub fn into_records(self) -> Vec<TopicRecord> {
        self.records
    }

    /// Every slug produced by more than one record, in slug order.
    pub fn slug_collisions(&self) -> Vec<SlugCollision> {
        let mut by_slug: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for record in &self.records {
            by_slug
                .entry(record.slug.as_str())
                .or_default()
                .push(record.id.clone());
        }

        by_slug
            .into_iter()
            .filter(|(_, ids)| ids.len() > 1)
            .map(|(slug, topic_ids)| SlugCollision {
                slug: slug.to_string(),
                topic_ids,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{InputOverrides, BUDGET_BAND, COMFORT_LEVEL, DATES_MONTH};
    use crate::topics::domain::{DecisionComplexity, Outcome, Season};

    fn definition(id: &str, question: &str) -> TopicDefinition {
        TopicDefinition {
            id: id.to_string(),
            question: question.to_string(),
            published: true,
            required_inputs: vec![InputSpec::catalog(DATES_MONTH), InputSpec::catalog(BUDGET_BAND)],
            optional_inputs: vec![InputSpec::catalog(COMFORT_LEVEL)],
            assumptions: vec!["Dates are fixed".to_string()],
            tradeoffs: Vec::new(),
            change_conditions: Vec::new(),
            refusal_triggers: Vec::new(),
            metadata: TopicMetadata::default(),
        }
    }

    #[test]
    fn compile_derives_every_field() {
        let catalog = InputCatalog::standard();
        let compiler = TopicCompiler::new(&catalog);

        let compiled = compiler.compile(&definition(
            "tz_july_safari",
            "Is July a good month for a first safari in Tanzania?",
        ));
        let record = compiled.record;

        assert_eq!(record.slug, "tanzania-safari-in-july");
        assert_eq!(record.destinations, vec!["Tanzania".to_string()]);
        let time = record.time_context.as_ref().expect("month-specific topic");
        assert_eq!(time.month.as_deref(), Some("July"));
        assert_eq!(time.season, Some(Season::Dry));
        assert_eq!(record.traveler_segments, vec![TravelerSegment::FirstTime]);
        assert_eq!(
            record.eligible_outcomes,
            vec![Outcome::Book, Outcome::Wait, Outcome::Switch]
        );
        assert_eq!(record.default_outcome, Outcome::Book);
        assert_eq!(record.confidence_range, [0.7, 0.9]);
        assert_eq!(
            record.context_line,
            "Tanzania · July (dry season) · first-time travelers"
        );
        assert_eq!(record.required_inputs[0].key, DATES_MONTH);
        assert!(compiled.warnings.is_empty(), "{:?}", compiled.warnings);
    }

    #[test]
    fn comparison_questions_only_allow_book_or_switch() {
        let catalog = InputCatalog::standard();
        let compiler = TopicCompiler::new(&catalog);

        let record = compiler
            .compile(&definition(
                "kenya_vs_tanzania_first_safari",
                "Kenya or Tanzania for a first safari?",
            ))
            .record;

        assert_eq!(record.destinations.len(), 2);
        assert_eq!(record.eligible_outcomes, vec![Outcome::Book, Outcome::Switch]);
        assert!(record.eligible_outcomes.contains(&record.default_outcome));
    }

    #[test]
    fn fallbacks_are_reported_as_warnings() {
        let catalog = InputCatalog::standard();
        let compiler = TopicCompiler::new(&catalog);

        let compiled = compiler.compile(&definition("mystery_topic", "Is it worth going?"));

        assert_eq!(
            compiled.record.destinations,
            vec!["Tanzania".to_string(), "Kenya".to_string()]
        );
        assert_eq!(
            compiled.record.traveler_segments,
            vec![TravelerSegment::FirstTime]
        );
        assert_eq!(compiled.record.confidence_range, DEFAULT_CONFIDENCE_RANGE);
        assert!(compiled
            .warnings
            .contains(&CompileWarning::DestinationsDefaulted));
        assert!(compiled
            .warnings
            .contains(&CompileWarning::TravelerSegmentsDefaulted));
        assert!(compiled.warnings.contains(&CompileWarning::ComplexityUnknown));
    }

    #[test]
    fn ineligible_caution_default_is_adjusted() {
        let catalog = InputCatalog::standard();
        let compiler = TopicCompiler::new(&catalog);

        let compiled = compiler.compile(&definition(
            "tz_dry_season_crowds",
            "Dry season crowds or quieter shoulder months in Tanzania?",
        ));

        assert_eq!(compiled.record.default_outcome, Outcome::Book);
        assert!(compiled
            .warnings
            .contains(&CompileWarning::DefaultOutcomeAdjusted {
                requested: Outcome::Wait,
                applied: Outcome::Book,
            }));
    }

    #[test]
    fn authored_metadata_overrides_inference() {
        let catalog = InputCatalog::standard();
        let compiler = TopicCompiler::new(&catalog);
        let mut topic = definition("tz_july_safari", "Is July good for a Tanzania safari?");
        topic.metadata = TopicMetadata {
            destinations: Some(vec!["Zambia".to_string()]),
            time_context: Some(TimeContext {
                month: Some("sep".to_string()),
                season: None,
            }),
            traveler_segments: Some(vec![
                TravelerSegment::Luxury,
                TravelerSegment::Luxury,
                TravelerSegment::Solo,
            ]),
            complexity: Some(DecisionComplexity::MultiFactor),
        };

        let record = compiler.compile(&topic).record;

        assert_eq!(record.destinations, vec!["Zambia".to_string()]);
        assert_eq!(
            record.time_context,
            Some(TimeContext {
                month: Some("September".to_string()),
                season: None,
            })
        );
        assert_eq!(
            record.traveler_segments,
            vec![TravelerSegment::Luxury, TravelerSegment::Solo]
        );
        assert_eq!(record.confidence_range, [0.45, 0.75]);
    }

    #[test]
    fn unknown_catalog_keys_keep_authored_fields() {
        let catalog = InputCatalog::standard();
        let compiler = TopicCompiler::new(&catalog);
        let mut topic = definition("tz_july_safari", "Is July good?");
        topic.optional_inputs.push(InputSpec {
            key: "user_context.pet_sitter".to_string(),
            overrides: InputOverrides {
                label: Some("Pet sitter".to_string()),
                description: None,
                example: Some("booked".to_string()),
            },
        });

        let compiled = compiler.compile(&topic);
        let input = compiled
            .record
            .declared_input("user_context.pet_sitter")
            .expect("input kept");

        assert_eq!(input.label, "Pet sitter");
        assert!(input.description.is_empty());
        assert!(compiled.warnings.contains(&CompileWarning::UnknownCatalogKey {
            key: "user_context.pet_sitter".to_string()
        }));
    }

    #[test]
    fn slug_collisions_are_grouped_by_slug() {
        let catalog = InputCatalog::standard();
        let compiler = TopicCompiler::new(&catalog);
        let definitions = TopicDefinitionSet::from_definitions(vec![
            definition("solo_safari", "Solo?"),
            definition("solo-safari", "Solo again?"),
            definition("tz_july_safari", "July?"),
        ]);

        let compiled = compiler.compile_set(&definitions);
        let collisions = compiled.slug_collisions();

        assert_eq!(
            collisions,
            vec![SlugCollision {
                slug: "solo-safari".to_string(),
                topic_ids: vec!["solo_safari".to_string(), "solo-safari".to_string()],
            }]
        );
    }

    #[test]
    fn infer_metadata_matches_compiled_fields() {
        let metadata = infer_metadata(
            "serengeti_calving_february",
            "Is the Serengeti calving season in February worth planning around?",
        );
        assert_eq!(metadata.destinations, Some(vec!["Tanzania".to_string()]));
        assert_eq!(
            metadata.time_context.and_then(|time| time.season),
            Some(Season::Calving)
        );
        assert_eq!(
            metadata.complexity,
            Some(DecisionComplexity::Conditional)
        );
    }
}
