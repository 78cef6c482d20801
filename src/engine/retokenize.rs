//! Applying accepted spans to a tree.
//!
//! Each span becomes one token. Its structural head is the span token closest
//! to ROOT (minimum depth, left-most on ties); that token supplies the merged
//! token's label and head, so the head of a merged token always lies outside
//! its span. POS, tag, lemma, entity type and the math payload come from the
//! candidate's `attrs_from` token when given, else from the structural head.
//!
//! ```text
//! before:  The  apple  of  the  apple  tree  has  been  fallen  .
//!               [1 ----------------------- 6)
//! after:   The  apple of the apple tree  has  been  fallen  .
//!          0    1                        2    3     4       5
//! ```
//!
//! Acyclicity holds after the merge: the structural head has the minimum depth
//! in its span, so none of its ancestors lies in the same span, and two spans
//! cannot each contain an ancestor of the other's head.

use crate::SentenceTree;
use crate::tree::Token;

use super::span::Candidate;

/// Merge every span in `accepted` (non-overlapping, sorted by start).
pub(crate) fn retokenize(tree: &SentenceTree, accepted: &[Candidate]) -> SentenceTree {
    if accepted.is_empty() {
        return tree.clone();
    }
    let n = tree.len();

    // old position -> new position, plus the span (if any) each new token comes from.
    let mut remap = vec![0usize; n];
    let mut groups: Vec<(usize, usize, Option<Candidate>)> = Vec::with_capacity(n);
    let mut spans = accepted.iter().peekable();
    let mut old = 0;
    while old < n {
        let new = groups.len();
        match spans.peek() {
            Some(candidate) if candidate.span.start == old => {
                let end = candidate.span.end.min(n);
                remap[old..end].iter_mut().for_each(|slot| *slot = new);
                groups.push((old, end, Some(**candidate)));
                old = end;
                spans.next();
            }
            _ => {
                remap[old] = new;
                groups.push((old, old + 1, None));
                old += 1;
            }
        }
    }

    let tokens: Vec<Token> = groups
        .iter()
        .enumerate()
        .map(|(position, (start, end, candidate))| {
            let structural = span_head(tree, *start, *end);
            let source = candidate.and_then(|c| c.attrs_from).filter(|p| *p < n).unwrap_or(structural);
            let head_token = &tree.tokens()[structural];
            let attrs = &tree.tokens()[source];
            let head = if head_token.head == structural { position } else { remap[head_token.head] };

            Token {
                position,
                text: tree.surface(*start, *end),
                lemma: attrs.lemma.clone(),
                tag: attrs.tag.clone(),
                pos: attrs.pos,
                dep: head_token.dep,
                head,
                ent_type: attrs.ent_type.clone(),
                whitespace: tree.tokens()[end - 1].whitespace,
                is_math: attrs.is_math,
                math: attrs.math.clone(),
            }
        })
        .collect();

    SentenceTree::rebuild(tokens)
}

/// Span token closest to ROOT; left-most on ties.
pub(crate) fn span_head(tree: &SentenceTree, start: usize, end: usize) -> usize {
    (start..end).min_by_key(|p| (tree.at(*p).depth(), *p)).unwrap_or(start)
}
