use super::compiler::{CompiledTopicSet, SlugCollision};
use super::domain::TopicRecord;
use std::collections::HashMap;
use tracing::error;

#[derive(Debug, thiserror::Error)]
#[error("{} slug(s) shared by more than one topic: {}", .0.len(), describe(.0))]
pub struct SlugCollisionError(pub Vec<SlugCollision>);

fn describe(collisions: &[SlugCollision]) -> String {
    collisions
        .iter()
        .map(|collision| format!("{} <- [{}]", collision.slug, collision.topic_ids.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Read-only slug/id lookup over compiled records.
///
/// Building the index is where slug uniqueness is enforced at process start.
#[derive(Debug, Clone)]
pub struct TopicIndex {
    records: Vec<TopicRecord>,
    by_slug: HashMap<String, usize>,
    by_id: HashMap<String, usize>,
}

impl TopicIndex {
    pub fn build(compiled: CompiledTopicSet) -> Result<Self, SlugCollisionError> {
        let collisions = compiled.slug_collisions();
        if !collisions.is_empty() {
            error!(collisions = collisions.len(), "refusing to index colliding slugs");
            return Err(SlugCollisionError(collisions));
        }

        let records = compiled.into_records();
        let by_slug = records
            .iter()
            .enumerate()
            .map(|(position, record)| (record.slug.clone(), position))
            .collect();
        let by_id = records
            .iter()
            .enumerate()
            .map(|(position, record)| (record.id.clone(), position))
            .collect();

        Ok(Self {
            records,
            by_slug,
            by_id,
        })
    }

    pub fn by_slug(&self, slug: &str) -> Option<&TopicRecord> {
        self.by_slug
            .get(slug)
            .and_then(|position| self.records.get(*position))
    }

    pub fn by_id(&self, id: &str) -> Option<&TopicRecord> {
        self.by_id
            .get(id)
            .and_then(|position| self.records.get(*position))
    }

    /// Published records in authoring order.
    pub fn published(&self) -> impl Iterator<Item = &TopicRecord> {
        self.records.iter().filter(|record| record.published)
    }

    /// Public page paths for the published subset.
    pub fn sitemap_paths(&self, prefix: &str) -> Vec<String> {
        let prefix = prefix.trim_end_matches('/');
        self.published()
            .map(|record| format!("{}/{}", prefix, record.slug))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
