// ── Category domain types ──

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// The four top-level categories anchoring catalog navigation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TopicRoot {
    Cars,
    Parts,
    Tools,
    Custom,
}

impl TopicRoot {
    pub fn from_slug(slug: &str) -> Option<Self> {
        slug.parse().ok()
    }

    pub fn slug(self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<i64>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub position: Option<i64>,
    pub active: bool,
}

impl Category {
    /// Topic this category *is*, if it is one of the four roots.
    pub fn topic(&self) -> Option<TopicRoot> {
        TopicRoot::from_slug(&self.slug)
    }

    pub fn is_topic_root(&self) -> bool {
        self.parent_id.is_none() && self.topic().is_some()
    }
}

/// Topic root of category `id`, found by walking `parent_id` links.
///
/// `None` when `id` is unknown, a link dangles, the chain loops, or the
/// top-most ancestor is not one of the topic roots.
pub fn topic_root_of(categories: &[Category], id: i64) -> Option<TopicRoot> {
    let by_id: HashMap<i64, &Category> = categories.iter().map(|c| (c.id, c)).collect();
    let mut seen = HashSet::new();
    let mut current = *by_id.get(&id)?;

    while let Some(parent) = current.parent_id {
        if !seen.insert(current.id) {
            return None;
        }
        current = *by_id.get(&parent)?;
    }
    current.topic()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(id: i64, slug: &str, parent_id: Option<i64>) -> Category {
        Category {
            id,
            name: slug.to_owned(),
            slug: slug.to_owned(),
            parent_id,
            description: None,
            image_url: None,
            position: None,
            active: true,
        }
    }

    #[test]
    fn walks_to_topic_root() {
        let tree = vec![
            cat(1, "parts", None),
            cat(2, "wheels", Some(1)),
            cat(3, "alloy-wheels", Some(2)),
            cat(4, "tools", None),
        ];
        assert_eq!(topic_root_of(&tree, 3), Some(TopicRoot::Parts));
        assert_eq!(topic_root_of(&tree, 1), Some(TopicRoot::Parts));
        assert_eq!(topic_root_of(&tree, 4), Some(TopicRoot::Tools));
    }

    #[test]
    fn non_topic_root_dangling_and_unknown() {
        let tree = vec![
            cat(1, "clearance", None),
            cat(2, "misc", Some(1)),
            cat(3, "orphan", Some(99)),
        ];
        assert_eq!(topic_root_of(&tree, 2), None);
        assert_eq!(topic_root_of(&tree, 3), None);
        assert_eq!(topic_root_of(&tree, 42), None);
    }

    #[test]
    fn cycle_terminates() {
        let tree = vec![cat(1, "a", Some(2)), cat(2, "b", Some(1))];
        assert_eq!(topic_root_of(&tree, 1), None);
    }

    #[test]
    fn topic_slugs() {
        assert_eq!(TopicRoot::from_slug("cars"), Some(TopicRoot::Cars));
        assert_eq!(TopicRoot::from_slug("wheels"), None);
        assert_eq!(TopicRoot::Custom.slug(), "custom");
        assert!(cat(1, "tools", None).is_topic_root());
        assert!(!cat(5, "tools", Some(1)).is_topic_root());
    }
}
