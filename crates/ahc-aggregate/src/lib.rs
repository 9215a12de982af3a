//! Score aggregation for heuristic contest outputs.
//!
//! Scores every `NNNN.txt` in a directory under `out/` with an external
//! scorer, accumulates running statistics and writes `aggregate.txt`:
//! - [`scan`] resolves targets and finds candidate files
//! - [`scorer`] runs the scorer and parses its diagnostic line
//! - [`result`] accumulates outcomes, [`report`] renders them
//! - [`aggregator`] drives the whole loop

pub mod aggregator;
pub mod config;
pub mod error;
pub mod record;
pub mod report;
pub mod result;
pub mod scan;
pub mod scorer;
pub mod telemetry;

pub use aggregator::{Aggregator, DirOutcome};
pub use config::AggregateConfig;
pub use error::{AggregateError, Result};
pub use record::{ScoreOutcome, ScoreRecord};
pub use report::{render_report, write_report, REPORT_FILE_NAME};
pub use result::{AggregateResult, AggregateSummary, Extreme};
pub use scan::{has_report, is_candidate_name, list_candidates, resolve_target};
pub use scorer::{parse_diagnostic, CommandScorer, Scorer, ScorerConfig};
pub use telemetry::init_tracing;
