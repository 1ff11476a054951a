//! Hierarchy loading service
//!
//! Reads TOML hierarchy descriptions and freezes them into `Hierarchy<String>`.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Hierarchy, HierarchyFile};
use crate::infrastructure::traits::FileSystem;

/// Headline numbers for a loaded hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchySummary {
    pub elements: usize,
    pub first_level: usize,
    pub depth: usize,
    pub leaves: usize,
}

/// Service for loading hierarchies from description files.
pub struct HierarchyService {
    fs: Arc<dyn FileSystem>,
}

impl HierarchyService {
    /// Create a new hierarchy service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Load and freeze the hierarchy described by the file at `path`.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<Hierarchy<String>> {
        if !self.fs.is_file(path) && self.fs.exists(path) {
            return Err(ApplicationError::Parse {
                path: path.to_path_buf(),
                message: "not a file".to_string(),
            });
        }
        let content = self.read_source(path)?;
        self.parse(&content, path)
    }

    fn read_source(&self, path: &Path) -> ApplicationResult<String> {
        self.fs
            .read_to_string(path)
            .map_err(|e| ApplicationError::OperationFailed {
                context: format!("cannot read hierarchy file {}", path.display()),
                source: Box::new(e),
            })
    }

    /// Freeze the hierarchy described by `content`; `path` is used for error context.
    pub fn parse(&self, content: &str, path: &Path) -> ApplicationResult<Hierarchy<String>> {
        let file = HierarchyFile::parse(content).map_err(|e| ApplicationError::Parse {
            path: path.to_path_buf(),
            message: e.message,
        })?;
        debug!("parse: {} nodes in {}", file.nodes.len(), path.display());

        let hierarchy = file.to_builder()?.into_hierarchy()?;
        Ok(hierarchy)
    }

    pub fn summarize(&self, hierarchy: &Hierarchy<String>) -> HierarchySummary {
        HierarchySummary {
            elements: hierarchy.len(),
            first_level: hierarchy.first_level().len(),
            depth: hierarchy.depth(),
            leaves: hierarchy.leaves().len(),
        }
    }
}
