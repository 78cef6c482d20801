use crate::SentenceTree;
use crate::engine::Span;
use crate::labels::{Dep, DepSet};
use crate::navigate;
use crate::rules::merge::predicates::{NOUN_PHRASE_LABELS, ends_compound, is_compound, is_math_marker, is_nominal, is_punct};
use crate::tree::TokenRef;

/// A base noun phrase: the span from the head's left edge to the head, plus
/// the head position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NounChunk {
    pub span: Span,
    pub head: usize,
}

/// Noun chunks in sentence order, never nested.
///
/// A NOUN/PROPN token heads a chunk if its label is a noun-phrase label, or if
/// it is a conjunct whose coordination chain leads back to one. The chunk runs
/// from the head's left edge up to and including the head.
pub fn noun_chunks(tree: &SentenceTree) -> Vec<NounChunk> {
    let mut chunks = Vec::new();
    let mut prev_end: Option<usize> = None;
    for word in tree.iter().filter(|t| is_nominal(*t)) {
        let left = word.left_edge();
        if prev_end.is_some_and(|end| left <= end) {
            continue;
        }
        let heads_chunk = if NOUN_PHRASE_LABELS.has(word.dep()) {
            true
        } else if word.dep() == Dep::Conj {
            let mut head = word.head();
            while head.dep() == Dep::Conj && head.head().i() < head.i() {
                head = head.head();
            }
            NOUN_PHRASE_LABELS.has(head.dep())
        } else {
            false
        };
        if heads_chunk {
            prev_end = Some(word.i());
            chunks.push(NounChunk { span: Span::new(left, word.i() + 1), head: word.i() });
        }
    }
    chunks
}

/// Tokens coordinated with `token`, excluding `token` itself: walk up the
/// `conj` chain to its first member, then collect `conj` children to the
/// right, breadth first.
pub fn conjuncts(token: TokenRef<'_>) -> Vec<TokenRef<'_>> {
    let mut start = token;
    while !start.is_root() && start.dep() == Dep::Conj {
        start = start.head();
    }
    let mut queue = vec![start];
    let mut n = 0;
    while n < queue.len() {
        let word = queue[n];
        queue.extend(word.children().filter(|c| c.i() > word.i() && c.dep() == Dep::Conj));
        n += 1;
    }
    queue.into_iter().filter(|w| *w != token).collect()
}

/// Maximal runs of `compound` tokens followed by a token that ends the run.
pub fn compound_runs(tree: &SentenceTree) -> Vec<Span> {
    let mut runs = Vec::new();
    let mut i = 0;
    while i < tree.len() {
        if !is_compound(tree.at(i)) {
            i += 1;
            continue;
        }
        let start = i;
        while i < tree.len() && is_compound(tree.at(i)) {
            i += 1;
        }
        if i < tree.len() && ends_compound(tree.at(i)) {
            runs.push(Span::new(start, i + 1));
        }
    }
    runs
}

/// Each non-punctuation word followed by a run of punctuation: the span
/// covering the word and the run, plus the word's position.
pub fn punct_runs(tree: &SentenceTree) -> Vec<(Span, usize)> {
    let mut runs = Vec::new();
    for word in tree.iter() {
        if is_punct(word) || !tree.get(word.i() + 1).is_some_and(is_punct) {
            continue;
        }
        let mut end = word.i() + 1;
        while tree.get(end).is_some_and(is_punct) {
            end += 1;
        }
        runs.push((Span::new(word.i(), end), word.i()));
    }
    runs
}

/// Spans from an opening math marker to its closing marker, inclusive. An
/// unpaired trailing marker is ignored.
pub fn math_spans(tree: &SentenceTree) -> Vec<Span> {
    let markers: Vec<usize> = tree.iter().filter(|t| is_math_marker(*t)).map(|t| t.i()).collect();
    markers.chunks_exact(2).map(|pair| Span::new(pair[0], pair[1] + 1)).collect()
}

/// Span merged for an appositive. It starts at the last token of the
/// subtrees of the head's non-punctuation children left of the appositive
/// (or at the head when it is nominal and has none) and runs through the
/// first punctuation sibling after the appositive.
///
/// `None` when nothing separates that start from the appositive's first word:
/// the appositive already carries its separator from an earlier merge.
pub fn appositive_span(appositive: TokenRef<'_>) -> Option<Span> {
    let head = appositive.head();
    let preceding = head
        .children()
        .filter(|c| c.i() < appositive.i() && !is_punct(*c))
        .flat_map(|c| navigate::descendants_and_self(c, DepSet::empty()))
        .map(|t| t.i())
        .max();
    if let Some(bound) = preceding {
        let first_word = navigate::descendants_and_self(appositive, DepSet::empty())
            .into_iter()
            .filter(|t| !is_punct(*t))
            .map(|t| t.i())
            .min()
            .unwrap_or(appositive.i());
        if bound + 1 >= first_word {
            return None;
        }
    }
    let start = preceding.unwrap_or(if is_nominal(head) { head.i() } else { appositive.i() });
    let end = head.children().filter(|c| c.i() > appositive.i() && is_punct(*c)).map(|c| c.i() + 1).min();
    Some(Span::new(start, end.unwrap_or(appositive.i() + 1)))
}
