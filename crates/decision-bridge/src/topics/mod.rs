//! Authoring-time topic definitions and their compilation into runtime records.

pub mod compiler;
mod definitions;
pub mod domain;
mod index;
mod loader;

pub use compiler::{
    infer_metadata, slug_for, CompiledTopic, CompiledTopicSet, SlugCollision, TopicCompiler,
    TopicWarning,
};
pub use definitions::TopicDefinitionSet;
pub use domain::{
    CompileWarning, DecisionComplexity, InputSpec, Outcome, Season, TimeContext, TopicDefinition,
    TopicMetadata, TopicRecord, Tradeoff, TravelerSegment,
};
pub use index::{SlugCollisionError, TopicIndex};
pub use loader::{ContentLoadError, TopicDefinitionLoader};
