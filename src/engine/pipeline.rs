//! Rule application.
//!
//! A [`Pipeline`] is an ordered list of [`MergeRule`]s. Running it applies the
//! rules one step at a time; each step works on the tree the previous step
//! produced:
//!
//! ```text
//! (0) trigger scan         -> labels + features of the current tree
//! (1) gate                 -> skip the rule if its requirements are absent
//! (2) find                 -> candidate spans
//! (3) resolve + retokenize -> next tree
//! ```
//!
//! The output is deterministic given the same tree and rules.

use std::fmt;
use std::time::Instant;

use tracing::{debug, trace};

use super::metrics::{MergeMetrics, MergeResult, StepMetrics};
use super::retokenize::retokenize;
use super::span::{Candidate, resolve_spans};
use super::trigger::{FeatureMask, TriggerInfo};
use crate::SentenceTree;
use crate::labels::DepSet;

pub type FindFn = Box<dyn Fn(&SentenceTree) -> Vec<Candidate> + Send + Sync>;

/// A merge rule: a name, gating requirements, and a function proposing
/// candidate spans for one tree. Build with the `merge_rule!` macro.
pub struct MergeRule {
    pub name: &'static str,
    /// The rule is tried only if the tree carries at least one of these
    /// labels. Empty means no label requirement.
    pub requires: DepSet,
    /// The rule is tried only if the tree has all of these features.
    pub features: FeatureMask,
    pub find: FindFn,
}

impl MergeRule {
    /// One step: gate, find, resolve, retokenize.
    pub fn apply(&self, tree: &SentenceTree) -> (SentenceTree, StepMetrics) {
        let started = Instant::now();
        let mut step = StepMetrics { rule: self.name, tokens_before: tree.len(), ..StepMetrics::default() };

        let trigger = TriggerInfo::scan(tree);
        if !trigger.admits(self.requires, self.features) {
            debug!(target: "deprewrite::engine", rule = self.name, "skipped by trigger scan");
            step.skipped = true;
            step.tokens_after = tree.len();
            step.duration = started.elapsed();
            return (tree.clone(), step);
        }

        let candidates = (self.find)(tree);
        step.candidates = candidates.len();
        let accepted = resolve_spans(candidates);
        step.accepted = accepted.len();
        for candidate in &accepted {
            trace!(
                target: "deprewrite::engine",
                rule = self.name,
                span = %candidate.span,
                text = %tree.surface(candidate.span.start, candidate.span.end),
                "merge"
            );
        }

        let next = retokenize(tree, &accepted);
        step.tokens_after = next.len();
        step.duration = started.elapsed();
        debug!(
            target: "deprewrite::engine",
            rule = self.name,
            candidates = step.candidates,
            accepted = step.accepted,
            tokens = next.len(),
            "merge step"
        );
        (next, step)
    }
}

impl fmt::Debug for MergeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MergeRule")
            .field("name", &self.name)
            .field("requires", &self.requires)
            .field("features", &self.features)
            .field("find", &"<function>")
            .finish()
    }
}

/// An ordered list of merge steps.
#[derive(Debug, Default)]
pub struct Pipeline {
    steps: Vec<MergeRule>,
}

impl Pipeline {
    pub fn new(steps: Vec<MergeRule>) -> Self {
        Pipeline { steps }
    }

    pub fn steps(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.steps.iter().map(|s| s.name)
    }

    pub fn run(&self, tree: &SentenceTree) -> SentenceTree {
        self.run_with_metrics(tree).tree
    }

    pub fn run_with_metrics(&self, tree: &SentenceTree) -> MergeResult {
        let started = Instant::now();
        let mut current = tree.clone();
        let mut metrics = MergeMetrics::default();
        for rule in &self.steps {
            let (next, step) = rule.apply(&current);
            metrics.steps.push(step);
            current = next;
        }
        metrics.total = started.elapsed();
        MergeResult { tree: current, metrics }
    }
}
