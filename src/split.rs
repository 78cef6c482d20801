//! Splitting one sentence into several.
//!
//! Two families live here. Span splitters ([`split_sentences`],
//! [`split_at_commas`]) only cut the token sequence. Clause splitters render
//! new sentence text from parts of the tree and hand it to a [`Parse`]
//! collaborator for a fresh, consistent tree:
//!
//! ```text
//! Tom plays tennis and Jo plays socker
//!     A: left(ROOT) ROOT right(ROOT)     minus the conj branch, cc, punct
//!     B: subtree(conj)                   prefixed with ROOT's subject if it has none
//!  -> parse("Tom plays tennis. Jo plays socker.")
//! ```
//!
//! [`decompose_into_clauses`] produces one fragment per verb. A fragment whose
//! subject was already said by an earlier clause starts with the mask token;
//! [`fill_placeholders`] asks a [`Complete`] collaborator to fill it, one
//! request per fragment, in clause order.

use std::time::Instant;

use tracing::{debug, warn};

use crate::collab::{Complete, Parse};
use crate::config::SplitConfig;
use crate::engine::Span;
use crate::extract::first_by_label;
use crate::labels::{Dep, DepSet};
use crate::navigate;
use crate::render::{left_text, right_text, to_text};
use crate::tree::{SentenceTree, TokenRef};
use crate::{CollaboratorError, merge_noun_conjs};

/// Token texts that end a sentence when tagged as punctuation.
pub const SENTENCE_TERMINATORS: [&str; 4] = [".", "?", "!", ";"];

/// Labels that count as a clause's own subject.
pub const CLAUSE_SUBJECT: DepSet = DepSet::NSUBJ.union(DepSet::NSUBJPASS);

/// A ROOT child with more tokens than this is broken up by [`split_up`].
pub const SPLIT_UP_LIMIT: usize = 10;

/// Spans ending at each sentence terminator, plus the unterminated remainder
/// if there is one.
pub fn split_sentences(tree: &SentenceTree) -> Sentences<'_> {
    Sentences { tree, start: 0 }
}

#[derive(Debug, Clone)]
pub struct Sentences<'t> {
    tree: &'t SentenceTree,
    start: usize,
}

impl Iterator for Sentences<'_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        if self.start >= self.tree.len() {
            return None;
        }
        let end = self
            .tree
            .iter()
            .skip(self.start)
            .find(|t| t.is_punct() && SENTENCE_TERMINATORS.contains(&t.text()))
            .map_or(self.tree.len(), |t| t.i() + 1);
        let span = Span::new(self.start, end);
        self.start = end;
        Some(span)
    }
}

impl std::iter::FusedIterator for Sentences<'_> {}

/// Non-empty spans between `","` tokens; the commas belong to no span.
pub fn split_at_commas(tree: &SentenceTree) -> CommaSegments<'_> {
    CommaSegments { tree, start: 0 }
}

#[derive(Debug, Clone)]
pub struct CommaSegments<'t> {
    tree: &'t SentenceTree,
    start: usize,
}

impl Iterator for CommaSegments<'_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        while self.start < self.tree.len() {
            let end = self.tree.iter().skip(self.start).find(|t| t.text() == ",").map_or(self.tree.len(), |t| t.i());
            let span = Span::new(self.start, end);
            self.start = end + 1;
            if !span.is_empty() {
                return Some(span);
            }
        }
        None
    }
}

impl std::iter::FusedIterator for CommaSegments<'_> {}

/// Text of the two sentences [`split_at_conjunction`] would parse, or `None`
/// when ROOT has no child labeled `label`. The last such child is used.
///
/// A conjunct without an `nsubj`/`nsubjpass` child of its own is prefixed
/// with ROOT's subject phrase, punctuation pruned.
pub fn split_at_conjunction_text(tree: &SentenceTree, label: Dep) -> Option<String> {
    let root = tree.root();
    let conj = root.children().filter(|c| c.dep() == label).last()?;

    let text_a = main_clause(root, label).replace(" ,", ",");
    let own_subject = first_by_label(conj.children(), CLAUSE_SUBJECT);
    let borrowed = match own_subject {
        Some(_) => String::new(),
        None => root.children().filter(|c| CLAUSE_SUBJECT.has(c.dep())).last().map(phrase).unwrap_or_default(),
    };
    let text_b = sentence(&[&borrowed, &to_text(&navigate::descendants_and_self(conj, DepSet::PUNCT))]);
    Some(format!("{text_a} {text_b}"))
}

/// Splits off ROOT's `label` child (normally `conj`) as a sentence of its
/// own and reparses. Without such a child the tree comes back unchanged.
pub fn split_at_conjunction<P: Parse + ?Sized>(
    tree: &SentenceTree,
    label: Dep,
    parser: &P,
) -> Result<SentenceTree, CollaboratorError> {
    match split_at_conjunction_text(tree, label) {
        Some(text) => reparse(parser, &text),
        None => Ok(tree.clone()),
    }
}

/// Text of the two sentences [`split_at_dependency`] would parse, or `None`
/// when ROOT has no child labeled `label`. The first such child is used.
pub fn split_at_dependency_text(tree: &SentenceTree, label: Dep, placeholder: &str) -> Option<String> {
    let root = tree.root();
    let clause = first_by_label(root.children(), label.into())?;

    let text_a = main_clause(root, label);
    let text_b = match first_by_label(clause.children(), CLAUSE_SUBJECT) {
        Some(_) => sentence(&[&to_text(&navigate::descendants_and_self(clause, DepSet::PUNCT))]),
        None => {
            let body = navigate::descendants_and_self(clause, DepSet::PUNCT | CLAUSE_SUBJECT);
            sentence(&[placeholder, &to_text(&body)])
        }
    };
    Some(format!("{text_a} {text_b}"))
}

/// Carves ROOT's `label` child (`ccomp`, `xcomp`, ...) into a sentence of
/// its own and reparses. A clause without a subject gets
/// `config.subject_placeholder` in its place.
pub fn split_at_dependency<P: Parse + ?Sized>(
    tree: &SentenceTree,
    label: Dep,
    parser: &P,
    config: &SplitConfig,
) -> Result<SentenceTree, CollaboratorError> {
    match split_at_dependency_text(tree, label, &config.subject_placeholder) {
        Some(text) => reparse(parser, &text),
        None => Ok(tree.clone()),
    }
}

/// One fragment per VERB/AUX token that has children, in position order.
///
/// Noun conjunctions are merged first so that "the soldier and the teacher"
/// stays one subject. A verb without its own subject reuses its left context,
/// unless an earlier clause already said a subject, in which case the
/// fragment starts with `config.mask_token`. Empty parts are left out of the
/// fragment: "which was closed.", not "which was closed .".
pub fn decompose_into_clauses(tree: &SentenceTree, config: &SplitConfig) -> Vec<String> {
    let merged = merge_noun_conjs(tree);
    let left_avoid = DepSet::CONJ | DepSet::RELCL;
    let right_avoid = DepSet::CONJ | DepSet::RELCL | DepSet::CC | DepSet::PUNCT;

    let mut subject_said = false;
    let mut fragments = Vec::new();
    for verb in merged.iter().filter(|t| t.pos().is_verbal() && t.children().len() > 0) {
        let has_subject = first_by_label(verb.children(), CLAUSE_SUBJECT).is_some();
        let prefix = if !has_subject && subject_said {
            config.mask_token.clone()
        } else {
            subject_said |= has_subject;
            left_text(verb, left_avoid)
        };
        fragments.push(sentence(&[&prefix, verb.text(), &right_text(verb, right_avoid)]));
    }
    debug!(target: "deprewrite::split", clauses = fragments.len(), "decomposed");
    fragments
}

/// Fills the mask in every fragment that carries one, using the first
/// fragment as context. Stops at the first collaborator failure.
pub fn fill_placeholders<C: Complete + ?Sized>(
    fragments: &[String],
    completer: &C,
    config: &SplitConfig,
) -> Result<Vec<String>, CollaboratorError> {
    let Some(context) = fragments.first() else {
        return Ok(Vec::new());
    };
    fragments
        .iter()
        .map(|fragment| {
            if fragment.contains(&config.mask_token) {
                fill_placeholder(context, fragment, completer, config)
            } else {
                Ok(fragment.clone())
            }
        })
        .collect()
}

/// Asks for `"{context} and {fragment}"` and keeps what the top-ranked
/// sequence says after the context and the joining "and", capitalized.
pub fn fill_placeholder<C: Complete + ?Sized>(
    context: &str,
    fragment: &str,
    completer: &C,
    config: &SplitConfig,
) -> Result<String, CollaboratorError> {
    let masked = format!("{context} and {fragment}");
    let limit = config.completion_timeout;
    debug!(target: "deprewrite::split", %masked, "completion request");

    let started = Instant::now();
    let ranked = completer.complete(&masked, limit).inspect_err(|e| {
        warn!(target: "deprewrite::split", error = %e, "completion failed");
    })?;
    if started.elapsed() > limit {
        warn!(target: "deprewrite::split", ?limit, "completion answered too late");
        return Err(CollaboratorError::Timeout { limit });
    }

    let top = ranked.into_iter().next().ok_or_else(|| CollaboratorError::Malformed("no completion candidates".into()))?;
    let rest = top.sequence.strip_prefix(context).unwrap_or(&top.sequence).trim();
    let rest = rest.strip_prefix("and ").unwrap_or(rest).trim_start();
    if rest.is_empty() {
        return Err(CollaboratorError::Malformed(format!("completion '{}' adds nothing to the context", top.sequence)));
    }
    Ok(capitalize(rest))
}

/// Decomposes `tree` into clauses, fills placeholders when a completer is
/// given, and parses the joined fragments.
pub fn simplify<P: Parse + ?Sized>(
    tree: &SentenceTree,
    parser: &P,
    completer: Option<&dyn Complete>,
    config: &SplitConfig,
) -> Result<SentenceTree, CollaboratorError> {
    let fragments = decompose_into_clauses(tree, config);
    let fragments = match completer {
        Some(completer) => fill_placeholders(&fragments, completer, config)?,
        None => fragments,
    };
    reparse(parser, &fragments.join(" "))
}

/// ROOT's children as groups of tokens: a child's subtree, or, for a child
/// with more than [`SPLIT_UP_LIMIT`] tokens, each grandchild's subtree (the
/// first one together with the child itself).
pub fn split_up(tree: &SentenceTree) -> Vec<Vec<TokenRef<'_>>> {
    let mut groups = Vec::new();
    for child in tree.root().children() {
        let subtree = navigate::descendants_and_self(child, DepSet::empty());
        if subtree.len() <= SPLIT_UP_LIMIT {
            groups.push(subtree);
            continue;
        }
        for (n, grandchild) in child.children().enumerate() {
            let mut group = navigate::descendants_and_self(grandchild, DepSet::empty());
            if n == 0 {
                group.push(child);
                group.sort_by_key(|t| t.i());
            }
            groups.push(group);
        }
    }
    groups
}

/// ROOT with its left and right context, minus the `label` branch; the right
/// side also drops `cc` and punctuation.
fn main_clause(root: TokenRef<'_>, label: Dep) -> String {
    let split: DepSet = label.into();
    sentence(&[&left_text(root, split), root.text(), &right_text(root, split | DepSet::CC | DepSet::PUNCT)])
}

fn phrase(token: TokenRef<'_>) -> String {
    to_text(&navigate::descendants_and_self(token, DepSet::PUNCT))
}

/// Non-empty parts joined by one space, with a full stop.
fn sentence(parts: &[&str]) -> String {
    let mut text = parts.iter().filter(|p| !p.is_empty()).copied().collect::<Vec<_>>().join(" ");
    text.push('.');
    text
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn reparse<P: Parse + ?Sized>(parser: &P, text: &str) -> Result<SentenceTree, CollaboratorError> {
    debug!(target: "deprewrite::split", %text, "reparse");
    parser.parse(text).inspect_err(|e| {
        warn!(target: "deprewrite::split", error = %e, "reparse failed");
    })
}
