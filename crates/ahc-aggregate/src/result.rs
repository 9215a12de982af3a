//! Running statistics over the scored files of one directory.
//!
//! [`AggregateResult`] keeps every [`ScoreRecord`] in processing order and
//! updates its statistics as each accepted score arrives.

use crate::record::{ScoreOutcome, ScoreRecord};
use serde::{Deserialize, Serialize};

/// An extreme score and the first file that reached it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extreme {
    pub score: u64,
    pub name: String,
}

/// Accumulated outcomes for one target directory.
#[derive(Debug, Clone, Default)]
pub struct AggregateResult {
    dir_name: String,
    records: Vec<ScoreRecord>,
    accepted_count: usize,
    rejected_count: usize,
    sum: u128,
    average: Option<f64>,
    max: Option<Extreme>,
    min: Option<Extreme>,
}

impl AggregateResult {
    pub fn new(dir_name: impl Into<String>) -> Self {
        Self {
            dir_name: dir_name.into(),
            ..Self::default()
        }
    }

    /// Append an accepted score and fold it into the statistics.
    pub fn add_accepted(&mut self, name: impl Into<String>, score: u64) {
        let name = name.into();

        self.accepted_count += 1;
        self.sum += u128::from(score);
        self.average = Some(self.sum as f64 / self.accepted_count as f64);

        // Strict comparisons: ties keep the earliest file.
        if self.max.as_ref().map_or(true, |m| score > m.score) {
            self.max = Some(Extreme {
                score,
                name: name.clone(),
            });
        }
        if self.min.as_ref().map_or(true, |m| score < m.score) {
            self.min = Some(Extreme {
                score,
                name: name.clone(),
            });
        }

        self.records.push(ScoreRecord::accepted(name, score));
    }

    /// Append a rejected entry. Statistics are unaffected.
    pub fn add_rejected(&mut self, name: impl Into<String>, message: impl Into<String>) {
        self.rejected_count += 1;
        self.records.push(ScoreRecord::rejected(name, message));
    }

    /// Append a record, dispatching on its outcome.
    pub fn push(&mut self, record: ScoreRecord) {
        match record.outcome {
            ScoreOutcome::Accepted { score } => self.add_accepted(record.name, score),
            ScoreOutcome::Rejected { message } => self.add_rejected(record.name, message),
        }
    }

    pub fn dir_name(&self) -> &str {
        &self.dir_name
    }

    /// All records in processing order.
    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    pub fn accepted_count(&self) -> usize {
        self.accepted_count
    }

    pub fn rejected_count(&self) -> usize {
        self.rejected_count
    }

    pub fn sum(&self) -> u128 {
        self.sum
    }

    /// Mean of the accepted scores, `None` until one has been accepted.
    pub fn average(&self) -> Option<f64> {
        self.average
    }

    pub fn max(&self) -> Option<&Extreme> {
        self.max.as_ref()
    }

    pub fn min(&self) -> Option<&Extreme> {
        self.min.as_ref()
    }

    /// Serializable snapshot of the statistics (without the records).
    pub fn summary(&self) -> AggregateSummary {
        AggregateSummary {
            dir: self.dir_name.clone(),
            accepted: self.accepted_count,
            rejected: self.rejected_count,
            sum: self.sum,
            average: self.average,
            max: self.max.clone(),
            min: self.min.clone(),
        }
    }
}

/// Statistics of one directory, as emitted by `--summary-json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateSummary {
    pub dir: String,
    pub accepted: usize,
    pub rejected: usize,
    pub sum: u128,
    pub average: Option<f64>,
    pub max: Option<Extreme>,
    pub min: Option<Extreme>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result_has_no_statistics() {
        let result = AggregateResult::new("run1");
        assert_eq!(result.dir_name(), "run1");
        assert_eq!(result.accepted_count(), 0);
        assert_eq!(result.rejected_count(), 0);
        assert_eq!(result.sum(), 0);
        assert!(result.average().is_none());
        assert!(result.max().is_none());
        assert!(result.min().is_none());
    }

    #[test]
    fn test_running_statistics_after_each_insert() {
        let scores = [30u64, 10, 50, 20];
        let mut result = AggregateResult::new("run1");

        for (i, score) in scores.iter().enumerate() {
            result.add_accepted(format!("{:04}.txt", i), *score);

            let seen = &scores[..=i];
            let sum: u64 = seen.iter().sum();
            let expected_avg = sum as f64 / seen.len() as f64;
            assert_eq!(result.sum(), u128::from(sum));
            assert!((result.average().unwrap() - expected_avg).abs() < 1e-9);
            assert_eq!(result.max().unwrap().score, *seen.iter().max().unwrap());
            assert_eq!(result.min().unwrap().score, *seen.iter().min().unwrap());
        }

        assert_eq!(result.max().unwrap().name, "0002.txt");
        assert_eq!(result.min().unwrap().name, "0001.txt");
    }

    #[test]
    fn test_ties_keep_earliest_file() {
        let mut result = AggregateResult::new("run1");
        result.add_accepted("0000.txt", 5);
        result.add_accepted("0001.txt", 5);
        result.add_accepted("0002.txt", 5);

        assert_eq!(result.max().unwrap().name, "0000.txt");
        assert_eq!(result.min().unwrap().name, "0000.txt");
    }

    #[test]
    fn test_rejected_does_not_touch_statistics() {
        let mut result = AggregateResult::new("run1");
        result.add_accepted("0000.txt", 10);
        result.add_rejected("0001.txt", "wrong answer");
        result.add_accepted("0002.txt", 20);

        assert_eq!(result.accepted_count(), 2);
        assert_eq!(result.rejected_count(), 1);
        assert_eq!(
            result.accepted_count() + result.rejected_count(),
            result.records().len()
        );
        assert_eq!(result.average(), Some(15.0));
        assert_eq!(result.records()[1], ScoreRecord::rejected("0001.txt", "wrong answer"));
    }

    #[test]
    fn test_push_dispatches_on_outcome() {
        let mut result = AggregateResult::new("run1");
        result.push(ScoreRecord::accepted("0000.txt", 3));
        result.push(ScoreRecord::rejected("0001.txt", "crash"));

        assert_eq!(result.accepted_count(), 1);
        assert_eq!(result.rejected_count(), 1);
        assert_eq!(result.records()[0].name, "0000.txt");
    }

    #[test]
    fn test_sum_does_not_overflow() {
        let mut result = AggregateResult::new("run1");
        result.add_accepted("0000.txt", u64::MAX);
        result.add_accepted("0001.txt", u64::MAX);
        assert_eq!(result.sum(), u128::from(u64::MAX) * 2);
    }

    #[test]
    fn test_summary_of_empty_result_serializes_null_average() {
        let json = serde_json::to_value(AggregateResult::new("empty").summary()).unwrap();
        assert_eq!(json["dir"], "empty");
        assert_eq!(json["accepted"], 0);
        assert!(json["average"].is_null());
        assert!(json["max"].is_null());
    }
}
