//! Directory layout and scorer settings for an aggregation run.

use crate::scorer::ScorerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Layout relative to the contest workspace root:
/// `in/<case>`, `out/<dir>/<case>`, and `tools/` for the scorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateConfig {
    pub root: PathBuf,
    pub scorer: ScorerConfig,
}

impl AggregateConfig {
    /// Default layout under `root`, scoring with `vis` from `root/tools`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let scorer = ScorerConfig::new(root.join("tools"));
        Self { root, scorer }
    }

    pub fn with_scorer(mut self, scorer: ScorerConfig) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn in_dir(&self) -> PathBuf {
        self.root.join("in")
    }

    pub fn out_dir(&self) -> PathBuf {
        self.root.join("out")
    }
}
