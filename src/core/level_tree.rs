//! Hierarchical level configuration keyed by colon-separated logger names
//!
//! A tree node holds a `base` level that applies to itself and every
//! descendant without an override, plus named children that are either a
//! plain level or another tree:
//!
//! ```
//! use reggol::LevelTree;
//!
//! let mut tree = LevelTree::new(2);
//! tree.set("app:db", 3);
//! assert_eq!(tree.get("app:db"), 3);
//! assert_eq!(tree.get("app:http"), 2);
//! assert_eq!(tree.get("other"), 2);
//! ```
//!
//! `base` is reserved as a key in the JSON form. A logger segment literally
//! named `base` still resolves in memory, but such a tree cannot be
//! serialized.
//!
//! Concurrent writers racing to materialize the same intermediate node are
//! serialized by the owning factory's lock; the tree itself has no internal
//! synchronization.

use super::error::{LoggerError, Result};
use super::log_type::{Level, INFO};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const BASE_KEY: &str = "base";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LevelNode {
    Level(Level),
    Tree(LevelTree),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTree {
    base: Level,
    #[serde(flatten)]
    children: BTreeMap<String, LevelNode>,
}

impl LevelTree {
    pub fn new(base: Level) -> Self {
        Self {
            base,
            children: BTreeMap::new(),
        }
    }

    /// Parse a tree from its JSON form, e.g. `{"base": 2, "app": {"base": 3}}`
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to JSON. Fails if a child segment is named `base`, which
    /// the JSON form cannot tell apart from the node's own base.
    pub fn to_json(&self) -> Result<String> {
        if self.has_reserved_segment() {
            return Err(LoggerError::config(
                "LevelTree",
                format!("segment `{}` is reserved", BASE_KEY),
            ));
        }
        Ok(serde_json::to_string(self)?)
    }

    fn has_reserved_segment(&self) -> bool {
        self.children.iter().any(|(key, node)| {
            key == BASE_KEY || matches!(node, LevelNode::Tree(tree) if tree.has_reserved_segment())
        })
    }

    pub fn base(&self) -> Level {
        self.base
    }

    pub fn set_base(&mut self, base: Level) {
        self.base = base;
    }

    pub fn child(&self, key: &str) -> Option<&LevelNode> {
        self.children.get(key)
    }

    pub fn children(&self) -> &BTreeMap<String, LevelNode> {
        &self.children
    }

    /// Resolve the effective level of `name`.
    ///
    /// Walks the path segments while they name sub-trees. A plain level ends
    /// the walk immediately; a missing segment falls back to the base of the
    /// deepest node reached.
    pub fn get(&self, name: &str) -> Level {
        let mut node = self;
        for segment in name.split(':') {
            match node.children.get(segment) {
                Some(LevelNode::Tree(tree)) => node = tree,
                Some(LevelNode::Level(level)) => return *level,
                None => return node.base,
            }
        }
        node.base
    }

    /// Level of `name` as configured by an explicit entry on its path.
    ///
    /// Unlike [`LevelTree::get`], the root base is not consulted, so `None`
    /// means this tree has nothing to say about `name`.
    pub fn lookup(&self, name: &str) -> Option<Level> {
        let mut node = self;
        let mut found = None;
        for segment in name.split(':') {
            match node.children.get(segment) {
                Some(LevelNode::Tree(tree)) => {
                    found = Some(tree.base);
                    node = tree;
                }
                Some(LevelNode::Level(level)) => return Some(*level),
                None => return found,
            }
        }
        found
    }

    /// Set the level of `name`, creating intermediate nodes as needed.
    ///
    /// An intermediate segment holding a plain level becomes a sub-tree whose
    /// base is that level. If the final segment already names a sub-tree, its
    /// base is replaced and its descendants keep their overrides.
    pub fn set(&mut self, name: &str, level: Level) {
        let mut segments: Vec<&str> = name.split(':').collect();
        let last = segments.pop().unwrap_or_default();

        let mut node = self;
        for segment in segments {
            let inherited = node.base;
            let entry = node
                .children
                .entry(segment.to_string())
                .or_insert(LevelNode::Tree(LevelTree::new(inherited)));
            if let LevelNode::Level(previous) = *entry {
                *entry = LevelNode::Tree(LevelTree::new(previous));
            }
            let LevelNode::Tree(tree) = entry else {
                return;
            };
            node = tree;
        }

        match node.children.get_mut(last) {
            Some(LevelNode::Tree(tree)) => tree.base = level,
            _ => {
                node.children.insert(last.to_string(), LevelNode::Level(level));
            }
        }
    }

    /// Drop the override for `name`, returning whether one existed
    pub fn remove(&mut self, name: &str) -> bool {
        let mut segments: Vec<&str> = name.split(':').collect();
        let last = segments.pop().unwrap_or_default();

        let mut node = self;
        for segment in segments {
            match node.children.get_mut(segment) {
                Some(LevelNode::Tree(tree)) => node = tree,
                _ => return false,
            }
        }
        node.children.remove(last).is_some()
    }
}

impl Default for LevelTree {
    fn default() -> Self {
        Self::new(INFO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_type::{DEBUG, SILENT};

    #[test]
    fn test_default_base() {
        let tree = LevelTree::default();
        assert_eq!(tree.get("anything"), INFO);
        assert_eq!(tree.get("a:b:c"), INFO);
        assert_eq!(tree.get(""), INFO);
    }

    #[test]
    fn test_set_then_get() {
        let mut tree = LevelTree::default();
        tree.set("test", DEBUG);
        assert_eq!(tree.get("test"), DEBUG);
        assert_eq!(tree.get("test:child"), DEBUG);
        assert_eq!(tree.get("other"), INFO);
    }

    #[test]
    fn test_scalar_promoted_to_base() {
        let mut tree = LevelTree::default();
        tree.set("app", SILENT);
        tree.set("app:db", DEBUG);

        assert_eq!(tree.get("app"), SILENT);
        assert_eq!(tree.get("app:db"), DEBUG);
        assert_eq!(tree.get("app:http"), SILENT);
        assert!(matches!(tree.child("app"), Some(LevelNode::Tree(t)) if t.base() == SILENT));
    }

    #[test]
    fn test_intermediate_inherits_parent_base() {
        let mut tree = LevelTree::new(1);
        tree.set("a:b:c", 3);
        assert_eq!(tree.get("a"), 1);
        assert_eq!(tree.get("a:b"), 1);
        assert_eq!(tree.get("a:b:c"), 3);
    }

    #[test]
    fn test_set_on_subtree_keeps_descendants() {
        let mut tree = LevelTree::default();
        tree.set("app:db", DEBUG);
        tree.set("app", SILENT);

        assert_eq!(tree.get("app"), SILENT);
        assert_eq!(tree.get("app:db"), DEBUG);
        assert_eq!(tree.get("app:cache"), SILENT);
    }

    #[test]
    fn test_lookup_ignores_root_base() {
        let mut tree = LevelTree::new(DEBUG);
        assert_eq!(tree.lookup("app"), None);

        tree.set("app", SILENT);
        tree.set("net:http", 1);
        assert_eq!(tree.lookup("app"), Some(SILENT));
        assert_eq!(tree.lookup("app:db"), Some(SILENT));
        assert_eq!(tree.lookup("net"), Some(DEBUG));
        assert_eq!(tree.lookup("net:http:client"), Some(1));
        assert_eq!(tree.lookup("other"), None);
    }

    #[test]
    fn test_remove() {
        let mut tree = LevelTree::default();
        tree.set("app:db", DEBUG);
        assert!(tree.remove("app:db"));
        assert!(!tree.remove("app:db"));
        assert!(!tree.remove("missing:path"));
        assert_eq!(tree.get("app:db"), INFO);
    }

    #[test]
    fn test_json_shape() {
        let tree = LevelTree::from_json(r#"{"base": 2, "app": {"base": 3, "db": 1}, "net": 0}"#)
            .unwrap();
        assert_eq!(tree.get("app"), 3);
        assert_eq!(tree.get("app:db"), 1);
        assert_eq!(tree.get("net:socket"), 0);
        assert_eq!(tree.get("misc"), 2);

        let json = tree.to_json().unwrap();
        assert_eq!(LevelTree::from_json(&json).unwrap(), tree);
    }

    #[test]
    fn test_base_segment_resolves_but_does_not_serialize() {
        let mut tree = LevelTree::default();
        tree.set("base", DEBUG);
        tree.set("app:base", SILENT);
        assert_eq!(tree.get("base"), DEBUG);
        assert_eq!(tree.get("app:base"), SILENT);
        assert_eq!(tree.base(), INFO);
        assert!(matches!(
            tree.to_json(),
            Err(LoggerError::InvalidConfiguration { .. })
        ));

        assert!(tree.remove("base"));
        assert!(tree.to_json().is_err());
        assert!(tree.remove("app:base"));
        let parsed = LevelTree::from_json(&tree.to_json().unwrap()).unwrap();
        assert_eq!(parsed, tree);
    }

    #[test]
    fn test_json_nested_tree_requires_base() {
        assert!(LevelTree::from_json(r#"{"base": 2, "app": {"db": 1}}"#).is_err());
        assert!(LevelTree::from_json(r#"{"app": 1}"#).is_err());
    }
}
