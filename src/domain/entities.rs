//! Domain entities: hierarchy descriptions

use serde::{Deserialize, Serialize};

use crate::domain::builder::HierarchyBuilder;
use crate::domain::error::HierarchyResult;

/// TOML description of a hierarchy of named nodes.
///
/// ```toml
/// [[node]]
/// name = "root"
///
/// [[node]]
/// name = "child"
/// parent = "root"
/// ```
///
/// Nodes are registered in file order, so a parent must appear before its
/// children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyFile {
    #[serde(default, rename = "node")]
    pub nodes: Vec<NodeEntry>,
}

/// One `[[node]]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeEntry {
    pub name: String,
    /// Parent name, absent for first-level nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

/// Error parsing a hierarchy file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyFileParseError {
    pub message: String,
}

impl HierarchyFile {
    /// Parse hierarchy file content.
    pub fn parse(content: &str) -> Result<Self, HierarchyFileParseError> {
        toml::from_str(content).map_err(|e| HierarchyFileParseError {
            message: e.to_string(),
        })
    }

    /// Register every node, in file order, on a fresh builder.
    pub fn to_builder(&self) -> HierarchyResult<HierarchyBuilder<String>, String> {
        let mut builder = HierarchyBuilder::new();
        for node in &self.nodes {
            match &node.parent {
                Some(parent) => builder.add_child(parent.clone(), node.name.clone())?,
                None => builder.add_root(node.name.clone())?,
            };
        }
        Ok(builder)
    }
}
