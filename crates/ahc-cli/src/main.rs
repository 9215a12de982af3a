//! `aggregate` - score contest outputs and write per-directory reports.
//!
//! ```text
//! aggregate run1 run2
//! ```
//!
//! scores every `out/<dir>/NNNN.txt` against `in/NNNN.txt` with the
//! visualizer from `tools/` and writes `out/<dir>/aggregate.txt`.
//! Directories that already have a report are skipped.

use ahc_aggregate::report::format_average;
use ahc_aggregate::{init_tracing, AggregateConfig, Aggregator, DirOutcome, ScorerConfig};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, Level};

#[derive(Parser, Debug)]
#[command(name = "aggregate")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Score contest outputs and summarize them per directory", long_about = None)]
struct Cli {
    /// Directory names under out/ to aggregate (only the last path component is used)
    #[arg(required = true, num_args = 1..)]
    dirs: Vec<String>,

    /// Contest workspace root containing in/, out/ and tools/
    #[arg(long, env = "AHC_ROOT", default_value = ".")]
    root: PathBuf,

    /// Scorer command; the input and output paths are appended
    #[arg(long, env = "AHC_SCORER", default_value = "cargo run --quiet --bin vis")]
    scorer: String,

    /// Working directory of the scorer (default: <root>/tools)
    #[arg(long, env = "AHC_TOOLS_DIR")]
    tools_dir: Option<PathBuf>,

    /// Per-file scorer timeout in seconds (0 disables the timeout)
    #[arg(long, env = "AHC_SCORER_TIMEOUT", default_value_t = 0)]
    timeout: u64,

    /// Print one JSON summary line per directory instead of text
    #[arg(long)]
    summary_json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn config(&self) -> AggregateConfig {
        let tools_dir = self
            .tools_dir
            .clone()
            .unwrap_or_else(|| self.root.join("tools"));
        let scorer = ScorerConfig::new(tools_dir)
            .with_command_line(&self.scorer)
            .with_timeout(self.timeout);
        AggregateConfig::new(self.root.clone()).with_scorer(scorer)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    init_tracing(cli.json, level);

    let config = cli.config();
    debug!(?config, "Resolved configuration");

    let aggregator = Aggregator::from_config(config);
    let outcomes = aggregator
        .run(&cli.dirs)
        .await
        .context("aggregation failed")?;

    for outcome in &outcomes {
        if cli.summary_json {
            if let DirOutcome::Written { result, .. } = outcome {
                println!("{}", serde_json::to_string(&result.summary())?);
            }
        } else {
            println!("{}", summary_line(outcome));
        }
    }

    Ok(())
}

fn summary_line(outcome: &DirOutcome) -> String {
    match outcome {
        DirOutcome::Skipped { dir } => {
            format!("skipped {} (report exists)", dir.display())
        }
        DirOutcome::Written { result, .. } => format!(
            "{}: AC {} / WA {}, avg {}",
            result.dir_name(),
            result.accepted_count(),
            result.rejected_count(),
            result
                .average()
                .map_or_else(|| "N/A".to_string(), format_average)
        ),
    }
}
