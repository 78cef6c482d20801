//! Merge engine.
//!
//! Rewrites a [`SentenceTree`](crate::SentenceTree) by collapsing spans of
//! tokens into single tokens. Rules never touch the tree directly: each rule
//! proposes [`Candidate`] spans, one resolver picks a non-overlapping subset,
//! and one retokenizer builds the new snapshot.
//!
//! ## How the parts work together
//!
//! ```text
//! rules (MergeRule) ──┐
//!                     │  Pipeline::new                  (pipeline.rs)
//!                     └──────────────┬──────────────
//!                                    │ for each step, on the current tree:
//! tree ── TriggerInfo::scan ─────────┼─ skip rules whose labels/features are absent
//!         (trigger.rs)               │
//!                                    v
//!                          MergeRule::find  -> Vec<Candidate>
//!                                    │
//!                                    v
//!                          resolve_spans                  (span.rs)
//!                            - drop degenerate spans
//!                            - longer first, then left-most
//!                                    │
//!                                    v
//!                          retokenize                     (retokenize.rs)
//!                            - merged token per span
//!                            - renumber + remap heads
//!                                    │
//!                                    v
//!                          new SentenceTree (+ StepMetrics)
//! ```
//!
//! Every step re-derives its candidates from the tree the previous step
//! produced, so a rule listed twice (prepositions in `merge_all`) sees the
//! merges of its first application.
//!
//! ## Responsibilities by module
//!
//! - `span.rs`: `Span`/`Candidate` and the span-conflict resolver.
//! - `retokenize.rs`: applies accepted spans, choosing each merged token's
//!   structural head and attribute source.
//! - `trigger.rs`: one pre-scan of a tree for rule gating.
//! - `pipeline.rs`: `MergeRule`, `Pipeline`, and the per-step loop.
//! - `metrics.rs`: per-step timing and counts.
//!
//! ## Debugging
//!
//! Steps log at `debug` level under the `deprewrite::engine` target; accepted
//! spans are logged at `trace`.

#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/pipeline.rs"]
mod pipeline;
#[path = "engine/retokenize.rs"]
mod retokenize;
#[path = "engine/span.rs"]
mod span;
#[path = "engine/trigger.rs"]
mod trigger;

pub use metrics::{MergeMetrics, MergeResult, StepMetrics};
pub use pipeline::{MergeRule, Pipeline};
pub use span::{Candidate, Span};
pub use trigger::{FeatureMask, MATH_MARKER};
