use super::definitions::TopicDefinitionSet;
use super::domain::TopicDefinition;
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ContentLoadError {
    #[error("failed to read topic definitions: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid topic definition JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("topic definition file contains no topics")]
    Empty,
}

/// Loads authored definitions from a JSON array, replacing the built-in set.
pub struct TopicDefinitionLoader;

impl TopicDefinitionLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<TopicDefinitionSet, ContentLoadError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<TopicDefinitionSet, ContentLoadError> {
        let definitions: Vec<TopicDefinition> = serde_json::from_reader(reader)?;
        if definitions.is_empty() {
            return Err(ContentLoadError::Empty);
        }
        Ok(TopicDefinitionSet::from_definitions(definitions))
    }
}
