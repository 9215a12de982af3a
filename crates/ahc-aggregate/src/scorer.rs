//! External scorer invocation and diagnostic parsing.

use crate::record::ScoreOutcome;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Default scorer: the contest's visualizer binary built from `tools/`.
pub const DEFAULT_SCORER_COMMAND: &[&str] = &["cargo", "run", "--quiet", "--bin", "vis"];

/// Message recorded when the scorer printed nothing on stderr.
pub const NO_OUTPUT_MESSAGE: &str = "no diagnostic output";

/// How to run the external scorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorerConfig {
    /// Command prefix; the input and output paths are appended.
    pub command: Vec<String>,

    /// Working directory of the scorer process.
    pub working_dir: PathBuf,

    /// Timeout in seconds (0 = wait forever).
    pub timeout_secs: u64,
}

impl ScorerConfig {
    /// The default `vis` scorer run from `working_dir` without a timeout.
    pub fn new(working_dir: PathBuf) -> Self {
        Self {
            command: DEFAULT_SCORER_COMMAND.iter().map(|s| s.to_string()).collect(),
            working_dir,
            timeout_secs: 0,
        }
    }

    /// Replace the command with a whitespace-separated command line.
    pub fn with_command_line(mut self, line: &str) -> Self {
        self.command = line.split_whitespace().map(str::to_string).collect();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Scores one candidate output against its problem input.
///
/// Implementations never fail: anything that goes wrong is reported as
/// [`ScoreOutcome::Rejected`].
#[async_trait]
pub trait Scorer: Send + Sync {
    async fn score(&self, input: &Path, output: &Path) -> ScoreOutcome;
}

/// Runs the configured command as a child process per file.
#[derive(Debug, Clone)]
pub struct CommandScorer {
    config: ScorerConfig,
}

impl CommandScorer {
    pub fn new(config: ScorerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Run the scorer and return its full stderr.
    async fn run(&self, input: &Path, output: &Path) -> anyhow::Result<String> {
        let Some((exe, args)) = self.config.command.split_first() else {
            anyhow::bail!("scorer command is empty");
        };

        let child = Command::new(exe)
            .args(args)
            .arg(input)
            .arg(output)
            .current_dir(&self.config.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| anyhow::anyhow!("failed to spawn scorer {exe}: {e}"))?;

        let output = if self.config.timeout_secs > 0 {
            tokio::time::timeout(
                Duration::from_secs(self.config.timeout_secs),
                child.wait_with_output(),
            )
            .await
            .map_err(|_| {
                anyhow::anyhow!(
                    "scorer timed out after {} seconds",
                    self.config.timeout_secs
                )
            })??
        } else {
            child.wait_with_output().await?
        };

        debug!(exit_code = ?output.status.code(), "scorer exited");
        Ok(String::from_utf8_lossy(&output.stderr).into_owned())
    }
}

#[async_trait]
impl Scorer for CommandScorer {
    async fn score(&self, input: &Path, output: &Path) -> ScoreOutcome {
        match self.run(input, output).await {
            Ok(stderr) => parse_diagnostic(&stderr),
            Err(e) => ScoreOutcome::Rejected {
                message: e.to_string(),
            },
        }
    }
}

/// Interpret the scorer's stderr.
///
/// A successful run prints exactly `Score = <n>`. A failed run prints its
/// error followed by `Score = 0`, so for longer output the trailing three
/// tokens are dropped and the rest becomes the message. Shorter output that
/// is not a score is kept whole.
pub fn parse_diagnostic(stderr: &str) -> ScoreOutcome {
    let tokens: Vec<&str> = stderr.split_whitespace().collect();

    match tokens.len() {
        0 => ScoreOutcome::Rejected {
            message: NO_OUTPUT_MESSAGE.to_string(),
        },
        3 => match tokens[2].parse::<u64>() {
            Ok(score) => ScoreOutcome::Accepted { score },
            Err(_) => ScoreOutcome::Rejected {
                message: tokens.join(" "),
            },
        },
        n if n > 3 => ScoreOutcome::Rejected {
            message: tokens[..n - 3].join(" "),
        },
        _ => ScoreOutcome::Rejected {
            message: tokens.join(" "),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(message: &str) -> ScoreOutcome {
        ScoreOutcome::Rejected {
            message: message.to_string(),
        }
    }

    #[test]
    fn test_parse_three_tokens_is_accepted() {
        assert_eq!(
            parse_diagnostic("Score = 100\n"),
            ScoreOutcome::Accepted { score: 100 }
        );
        assert_eq!(
            parse_diagnostic("  Score =\t0  "),
            ScoreOutcome::Accepted { score: 0 }
        );
    }

    #[test]
    fn test_parse_drops_trailing_score_line_from_errors() {
        assert_eq!(
            parse_diagnostic("invalid move at step 5\nScore = 0\n"),
            rejected("invalid move at step 5")
        );
        assert_eq!(parse_diagnostic("invalid move at step 5"), rejected("invalid move"));
        assert_eq!(parse_diagnostic("a b c d"), rejected("a"));
    }

    #[test]
    fn test_parse_short_output_passes_through() {
        assert_eq!(parse_diagnostic(""), rejected(NO_OUTPUT_MESSAGE));
        assert_eq!(parse_diagnostic("  \n "), rejected(NO_OUTPUT_MESSAGE));
        assert_eq!(parse_diagnostic("panicked"), rejected("panicked"));
        assert_eq!(parse_diagnostic("no such"), rejected("no such"));
    }

    #[test]
    fn test_parse_three_tokens_without_integer_is_rejected() {
        assert_eq!(parse_diagnostic("no such file"), rejected("no such file"));
        assert_eq!(parse_diagnostic("Score = -5"), rejected("Score = -5"));
        assert_eq!(parse_diagnostic("Score = 1.5"), rejected("Score = 1.5"));
    }

    #[test]
    fn test_scorer_config_command_line() {
        let config = ScorerConfig::new(PathBuf::from("tools"))
            .with_command_line("  ./vis   --quiet ")
            .with_timeout(5);
        assert_eq!(config.command, vec!["./vis".to_string(), "--quiet".to_string()]);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.working_dir, PathBuf::from("tools"));
    }

    #[test]
    fn test_default_scorer_config() {
        let config = ScorerConfig::new(PathBuf::from("tools"));
        assert_eq!(config.command[0], "cargo");
        assert_eq!(config.command.last().map(String::as_str), Some("vis"));
        assert_eq!(config.timeout_secs, 0);
    }

    #[tokio::test]
    async fn test_empty_command_is_rejected() {
        let mut config = ScorerConfig::new(std::env::temp_dir());
        config.command.clear();
        let outcome = CommandScorer::new(config)
            .score(Path::new("in.txt"), Path::new("out.txt"))
            .await;
        assert_eq!(outcome, rejected("scorer command is empty"));
    }

    #[tokio::test]
    async fn test_missing_binary_is_rejected() {
        let config = ScorerConfig::new(std::env::temp_dir())
            .with_command_line("definitely-not-a-real-scorer-binary");
        let outcome = CommandScorer::new(config)
            .score(Path::new("in.txt"), Path::new("out.txt"))
            .await;
        match outcome {
            ScoreOutcome::Rejected { message } => {
                assert!(message.contains("failed to spawn scorer"), "{message}")
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[cfg(unix)]
    fn shell_scorer(script: &str) -> ScorerConfig {
        let mut config = ScorerConfig::new(std::env::temp_dir());
        config.command = vec![
            "sh".to_string(),
            "-c".to_string(),
            script.to_string(),
            "scorer".to_string(),
        ];
        config
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_scorer_reads_stderr() {
        // $# counts the appended input and output paths.
        let config = shell_scorer("echo \"Score = $#\" >&2");
        let outcome = CommandScorer::new(config)
            .score(Path::new("in.txt"), Path::new("out.txt"))
            .await;
        assert_eq!(outcome, ScoreOutcome::Accepted { score: 2 });
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_scorer_timeout_is_rejected() {
        let config = shell_scorer("sleep 5").with_timeout(1);
        let outcome = CommandScorer::new(config)
            .score(Path::new("in.txt"), Path::new("out.txt"))
            .await;
        match outcome {
            ScoreOutcome::Rejected { message } => assert!(message.contains("timed out")),
            other => panic!("expected rejection, got {other:?}"),
        }
    }
}
