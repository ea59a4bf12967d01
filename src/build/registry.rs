//! The run's collection of parsed posts, keyed by timestamp.
//!
//! Filled during traversal by `ContentParser::parse_post`, then handed to the
//! front index. Keys are unique: a post landing on an occupied timestamp
//! replaces the one already there.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::{DateTime, Utc};

use super::document::Post;

#[derive(Debug, Default)]
pub struct ContentRegistry {
    posts: BTreeMap<DateTime<Utc>, Post>,
}

impl ContentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a post under its timestamp and return the stored value.
    pub fn insert(&mut self, post: Post) -> &Post {
        match self.posts.entry(post.timestamp) {
            Entry::Occupied(mut slot) => {
                tracing::warn!(
                    timestamp = %post.timestamp,
                    replaced = %slot.get().unit.source_path.display(),
                    by = %post.unit.source_path.display(),
                    "two posts share a timestamp, keeping the later one"
                );
                slot.insert(post);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(post),
        }
    }

    /// The `count` most recent posts, newest first.
    pub fn latest(&self, count: usize) -> impl Iterator<Item = &Post> {
        self.posts.values().rev().take(count)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::TimeZone;

    use super::*;
    use crate::build::document::ContentUnit;

    fn post(source: &str, hour: u32) -> Post {
        Post {
            unit: ContentUnit {
                source_path: PathBuf::from(source),
                output_path: PathBuf::from(source).with_extension("html"),
                title: Some(source.to_string()),
                body_raw: String::new(),
                body_html: String::new(),
            },
            timestamp: Utc.with_ymd_and_hms(2020, 1, 1, hour, 0, 0).unwrap(),
            latitude: None,
            longitude: None,
            link: String::new(),
        }
    }

    #[test]
    fn test_latest_is_newest_first() {
        let mut registry = ContentRegistry::new();
        for (source, hour) in [("b", 9), ("a", 14), ("c", 3)] {
            registry.insert(post(source, hour));
        }

        let titles: Vec<_> = registry
            .latest(10)
            .map(|p| p.unit.title.as_deref().unwrap())
            .collect();
        assert_eq!(titles, ["a", "b", "c"]);
    }

    #[test]
    fn test_latest_takes_min_of_count_and_size() {
        let mut registry = ContentRegistry::new();
        assert_eq!(registry.latest(3).count(), 0);

        for hour in 0..5 {
            registry.insert(post("p", hour));
        }
        for count in 0..8 {
            assert_eq!(registry.latest(count).count(), count.min(5));
        }
    }

    #[test]
    fn test_collision_keeps_later_post() {
        let mut registry = ContentRegistry::new();
        registry.insert(post("first", 9));
        let stored = registry.insert(post("second", 9));
        assert_eq!(stored.unit.title.as_deref(), Some("second"));

        assert_eq!(registry.len(), 1);
        let kept = registry.latest(1).next().unwrap();
        assert_eq!(kept.unit.source_path, PathBuf::from("second"));
    }

    #[test]
    fn test_empty_registry() {
        let registry = ContentRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }
}
