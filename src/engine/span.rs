//! Merge candidates and the span-conflict resolver.
//!
//! Rules may propose overlapping or duplicated spans; merging two overlapping
//! spans would be ambiguous, so exactly one resolver decides what is merged:
//!
//! ```text
//! candidates ── drop start >= end ── drop single tokens ── dedup by span
//!            ── sort (len desc, start asc) ── greedy accept if no overlap
//! ```
//!
//! The result is sorted by `start`.

use std::collections::HashSet;
use std::fmt;

/// Half-open token range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Smallest span covering every position in `positions`.
    pub fn covering(positions: impl IntoIterator<Item = usize>) -> Option<Self> {
        let mut it = positions.into_iter();
        let first = it.next()?;
        let (lo, hi) = it.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Span { start: lo, end: hi + 1 })
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, position: usize) -> bool {
        self.start <= position && position < self.end
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// A span proposed by a rule, with an optional token whose POS, tag, lemma
/// and entity type the merged token should take instead of the span head's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub span: Span,
    pub attrs_from: Option<usize>,
}

impl Candidate {
    pub fn new(span: Span) -> Self {
        Candidate { span, attrs_from: None }
    }

    pub fn with_attrs_from(mut self, position: usize) -> Self {
        self.attrs_from = Some(position);
        self
    }
}

impl From<Span> for Candidate {
    fn from(span: Span) -> Self {
        Candidate::new(span)
    }
}

/// Pick a non-overlapping subset of `candidates`: longer spans win, equal
/// lengths go to the left-most. Degenerate spans (`start >= end`) and
/// single-token spans (a merge of one token is a no-op) are dropped. For
/// duplicated spans the first candidate is kept.
pub fn resolve_spans(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    let mut pool: Vec<Candidate> =
        candidates.into_iter().filter(|c| c.span.len() >= 2).filter(|c| seen.insert(c.span)).collect();
    pool.sort_by(|a, b| b.span.len().cmp(&a.span.len()).then(a.span.start.cmp(&b.span.start)));

    let mut accepted: Vec<Candidate> = Vec::with_capacity(pool.len());
    for candidate in pool {
        if accepted.iter().all(|a| !a.span.overlaps(&candidate.span)) {
            accepted.push(candidate);
        }
    }
    accepted.sort_by_key(|c| c.span.start);
    accepted
}
