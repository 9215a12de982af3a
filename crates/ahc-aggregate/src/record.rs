//! Per-file scoring outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of scoring a single candidate output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScoreOutcome {
    /// The scorer produced a valid score.
    Accepted { score: u64 },

    /// The scorer failed or its diagnostic could not be interpreted.
    Rejected { message: String },
}

impl fmt::Display for ScoreOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreOutcome::Accepted { score } => write!(f, "{score}"),
            ScoreOutcome::Rejected { message } => f.write_str(message),
        }
    }
}

/// One evaluated file and its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// File name of the candidate output, e.g. `0001.txt`.
    pub name: String,

    #[serde(flatten)]
    pub outcome: ScoreOutcome,
}

impl ScoreRecord {
    pub fn accepted(name: impl Into<String>, score: u64) -> Self {
        Self {
            name: name.into(),
            outcome: ScoreOutcome::Accepted { score },
        }
    }

    pub fn rejected(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: ScoreOutcome::Rejected {
                message: message.into(),
            },
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self.outcome, ScoreOutcome::Accepted { .. })
    }
}
