//! Merge run metrics.
//!
//! - `Pipeline::run` for normal operation.
//! - `Pipeline::run_with_metrics` for profiling and for inspecting what each
//!   step did (the CLI report prints these).
//!
//! One timer and a few counters per step.

use std::time::Duration;

use crate::SentenceTree;

/// What one merge step did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Rule name.
    pub rule: &'static str,
    /// Elapsed time for the step, including the trigger scan.
    pub duration: Duration,
    /// The trigger scan ruled the step out; no candidates were searched.
    pub skipped: bool,
    /// Candidates proposed by the rule.
    pub candidates: usize,
    /// Spans merged after conflict resolution.
    pub accepted: usize,
    pub tokens_before: usize,
    pub tokens_after: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeMetrics {
    /// Total elapsed time for the run.
    pub total: Duration,
    pub steps: Vec<StepMetrics>,
}

impl MergeMetrics {
    /// Spans merged over all steps.
    pub fn merged_spans(&self) -> usize {
        self.steps.iter().map(|s| s.accepted).sum()
    }
}

/// Pipeline output bundled with timing information.
#[derive(Debug, Clone)]
pub struct MergeResult {
    pub tree: SentenceTree,
    pub metrics: MergeMetrics,
}
