//! The assembled pipeline: catalog, definitions and the compiled index.

use crate::catalog::InputCatalog;
use crate::config::ContentConfig;
use crate::contract::{build_request_contract, DecisionOutput, RequestContract, TrackingContext};
use crate::diff::{compare, Comparison, LabeledOutput};
use crate::error::AppError;
use crate::render::{render_output, RecoveryModel, RenderModel};
use crate::topics::{
    ContentLoadError, SlugCollisionError, TopicCompiler, TopicDefinitionLoader,
    TopicDefinitionSet, TopicIndex, TopicRecord, TopicWarning,
};
use crate::verify::{verify_coverage, CoverageReport};
use tracing::info;

pub const SITEMAP_PREFIX: &str = "/decisions";

/// Immutable after construction; the service shares one behind an `Arc`.
#[derive(Debug, Clone)]
pub struct DecisionBridge {
    catalog: InputCatalog,
    definitions: TopicDefinitionSet,
    index: TopicIndex,
    warnings: Vec<TopicWarning>,
}

impl DecisionBridge {
    pub fn standard() -> Result<Self, SlugCollisionError> {
        Self::new(InputCatalog::standard(), TopicDefinitionSet::standard())
    }

    pub fn new(
        catalog: InputCatalog,
        definitions: TopicDefinitionSet,
    ) -> Result<Self, SlugCollisionError> {
        let compiled = TopicCompiler::new(&catalog).compile_set(&definitions);
        let warnings = compiled.warnings().to_vec();
        let index = TopicIndex::build(compiled)?;

        info!(
            topics = index.len(),
            warnings = warnings.len(),
            "topic index ready"
        );

        Ok(Self {
            catalog,
            definitions,
            index,
            warnings,
        })
    }

    /// Built-in definitions unless the config points at a definitions file.
    pub fn load(config: &ContentConfig) -> Result<Self, AppError> {
        let definitions = load_definitions(config)?;
        Ok(Self::new(InputCatalog::standard(), definitions)?)
    }

    pub fn catalog(&self) -> &InputCatalog {
        &self.catalog
    }

    pub fn definitions(&self) -> &TopicDefinitionSet {
        &self.definitions
    }

    pub fn index(&self) -> &TopicIndex {
        &self.index
    }

    pub fn warnings(&self) -> &[TopicWarning] {
        &self.warnings
    }

    pub fn topic(&self, slug: &str) -> Result<&TopicRecord, AppError> {
        self.index
            .by_slug(slug)
            .ok_or_else(|| AppError::TopicNotFound(slug.to_string()))
    }

    /// Unpublished topics stay addressable internally but not through the public surface.
    pub fn published_topic(&self, slug: &str) -> Result<&TopicRecord, AppError> {
        self.topic(slug)
            .ok()
            .filter(|record| record.published)
            .ok_or_else(|| AppError::TopicNotFound(slug.to_string()))
    }

    pub fn contract(
        &self,
        slug: &str,
        tracking: TrackingContext,
    ) -> Result<RequestContract, AppError> {
        Ok(build_request_contract(self.published_topic(slug)?, tracking))
    }

    pub fn render(&self, slug: &str, output: &DecisionOutput) -> Result<RenderModel, AppError> {
        let topic = self.published_topic(slug)?;
        Ok(render_output(&self.catalog, topic, output))
    }

    pub fn recovery(&self, slug: &str, reason: Option<&str>) -> Result<RecoveryModel, AppError> {
        let topic = self.topic(slug)?;
        Ok(RecoveryModel::derive(&self.catalog, topic, reason, None))
    }

    pub fn compare(
        &self,
        slug: &str,
        a: &LabeledOutput,
        b: &LabeledOutput,
    ) -> Result<Comparison, AppError> {
        let topic = self.published_topic(slug)?;
        Ok(compare(topic, a, b))
    }

    pub fn verify(&self) -> CoverageReport {
        verify_coverage(&self.catalog, &self.definitions)
    }

    pub fn sitemap(&self) -> Vec<String> {
        self.index.sitemap_paths(SITEMAP_PREFIX)
    }
}

/// Checks content straight from its source. No index is built, so slug
/// collisions land in the report instead of aborting the load.
pub fn verify_content(config: &ContentConfig) -> Result<CoverageReport, ContentLoadError> {
    let definitions = load_definitions(config)?;
    Ok(verify_coverage(&InputCatalog::standard(), &definitions))
}

pub fn load_definitions(config: &ContentConfig) -> Result<TopicDefinitionSet, ContentLoadError> {
    match &config.topics_path {
        Some(path) => {
            let definitions = TopicDefinitionLoader::from_path(path)?;
            info!(
                path = %path.display(),
                definitions = definitions.len(),
                "loaded topic definitions"
            );
            Ok(definitions)
        }
        None => Ok(TopicDefinitionSet::standard()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::CoverageIssue;

    #[test]
    fn standard_bridge_serves_published_topics_only() {
        let bridge = DecisionBridge::standard().expect("standard slugs are unique");

        let walking = bridge
            .index()
            .by_id("zm_walking_safari")
            .expect("draft is indexed");
        assert!(bridge.topic(&walking.slug).is_ok());
        assert!(matches!(
            bridge.published_topic(&walking.slug),
            Err(AppError::TopicNotFound(_))
        ));
        assert!(!bridge
            .sitemap()
            .iter()
            .any(|path| path.ends_with(&walking.slug)));
        assert!(bridge
            .sitemap()
            .iter()
            .all(|path| path.starts_with("/decisions/")));
    }

    #[test]
    fn unknown_slugs_are_not_found() {
        let bridge = DecisionBridge::standard().expect("bridge");
        let err = bridge
            .contract("no-such-topic", TrackingContext::default())
            .expect_err("unknown slug");
        assert!(matches!(err, AppError::TopicNotFound(slug) if slug == "no-such-topic"));
    }

    #[test]
    fn missing_definitions_file_is_a_content_error() {
        let config = ContentConfig {
            topics_path: Some("/nonexistent/topics.json".into()),
        };
        assert!(matches!(
            DecisionBridge::load(&config),
            Err(AppError::Content(ContentLoadError::Io(_)))
        ));
    }

    #[test]
    fn colliding_definitions_file_still_yields_a_full_report() {
        let path = std::env::temp_dir().join(format!(
            "decision-bridge-collision-{}.json",
            std::process::id()
        ));
        let json = r#"[
            {
                "id": "solo_safari",
                "question": "Is a solo safari in Kenya worth it?",
                "required_inputs": [{ "key": "user_context.budget_band" }]
            },
            {
                "id": "solo-safari",
                "question": "Is a solo safari in Kenya worth it?",
                "required_inputs": [
                    { "key": "user_context.budget_band" },
                    { "key": "user_context.party.adults" }
                ]
            }
        ]"#;
        std::fs::write(&path, json).expect("write definitions");
        let config = ContentConfig {
            topics_path: Some(path.clone()),
        };

        let load = DecisionBridge::load(&config);
        let report = verify_content(&config);
        std::fs::remove_file(&path).ok();

        assert!(matches!(load, Err(AppError::Index(_))));
        let report = report.expect("definitions load");
        assert_eq!(report.definitions, 2);
        assert_eq!(
            report.issues,
            vec![
                CoverageIssue::DuplicateSlug {
                    slug: "solo-safari".to_string(),
                    topic_ids: vec!["solo_safari".to_string(), "solo-safari".to_string()],
                },
                CoverageIssue::RequiredInputCount {
                    topic_id: "solo_safari".to_string(),
                    count: 1,
                },
            ]
        );
    }
}
