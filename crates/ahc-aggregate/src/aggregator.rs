//! Per-directory scan, score and report loop.
//!
//! [`Aggregator`] walks each target directory under `out/`, scores every
//! candidate output strictly one after another and writes `aggregate.txt`.
//! Directories that already contain a report are skipped, so re-running
//! over the same targets is safe.

use crate::config::AggregateConfig;
use crate::error::{AggregateError, Result};
use crate::record::{ScoreOutcome, ScoreRecord};
use crate::report::write_report;
use crate::result::AggregateResult;
use crate::scan::{has_report, list_candidates, resolve_target};
use crate::scorer::{CommandScorer, Scorer};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// What happened to one target directory.
#[derive(Debug, Clone)]
pub enum DirOutcome {
    /// A report already existed; nothing was scored.
    Skipped { dir: PathBuf },

    /// All candidates were scored and the report was written.
    Written {
        dir: PathBuf,
        report_path: PathBuf,
        result: AggregateResult,
    },
}

impl DirOutcome {
    pub fn dir(&self) -> &PathBuf {
        match self {
            DirOutcome::Skipped { dir } | DirOutcome::Written { dir, .. } => dir,
        }
    }
}

/// Drives aggregation over target directories with a given scorer.
pub struct Aggregator<S: Scorer> {
    config: AggregateConfig,
    scorer: S,
}

impl Aggregator<CommandScorer> {
    /// Aggregator that runs the configured external scorer command.
    pub fn from_config(config: AggregateConfig) -> Self {
        let scorer = CommandScorer::new(config.scorer.clone());
        Self::new(config, scorer)
    }
}

impl<S: Scorer> Aggregator<S> {
    pub fn new(config: AggregateConfig, scorer: S) -> Self {
        Self { config, scorer }
    }

    pub fn config(&self) -> &AggregateConfig {
        &self.config
    }

    /// Aggregate every named directory in order.
    ///
    /// Stops at the first fatal error (missing directory, failed write).
    pub async fn run<I, T>(&self, names: I) -> Result<Vec<DirOutcome>>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let names: Vec<T> = names.into_iter().collect();
        if names.is_empty() {
            return Err(AggregateError::NoTargets);
        }

        let mut outcomes = Vec::with_capacity(names.len());
        for name in &names {
            outcomes.push(self.aggregate_dir(name.as_ref()).await?);
        }
        Ok(outcomes)
    }

    /// Aggregate a single directory under `out/`.
    pub async fn aggregate_dir(&self, name: &str) -> Result<DirOutcome> {
        let dir = resolve_target(&self.config.out_dir(), name)?;
        let dir_name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if has_report(&dir) {
            info!(dir = %dir_name, "Report exists, skipping");
            return Ok(DirOutcome::Skipped { dir });
        }

        let candidates = list_candidates(&dir)?;
        info!(dir = %dir_name, files = candidates.len(), "Aggregating directory");

        let in_dir = self.config.in_dir();
        let mut result = AggregateResult::new(dir_name.clone());
        for file in candidates {
            let input = in_dir.join(&file);
            let output = dir.join(&file);

            debug!(file = %file, input = %input.display(), "Scoring");
            let outcome = self.scorer.score(&input, &output).await;
            match &outcome {
                ScoreOutcome::Accepted { score } => {
                    debug!(file = %file, score = *score, "Accepted")
                }
                ScoreOutcome::Rejected { message } => {
                    warn!(file = %file, message = %message, "Rejected")
                }
            }

            result.push(ScoreRecord {
                name: file,
                outcome,
            });
        }

        let report_path = write_report(&dir, &result)?;
        info!(
            dir = %dir_name,
            accepted = result.accepted_count(),
            rejected = result.rejected_count(),
            "Report written"
        );

        Ok(DirOutcome::Written {
            dir,
            report_path,
            result,
        })
    }
}
