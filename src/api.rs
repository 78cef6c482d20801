use std::num::NonZeroUsize;

use once_cell::sync::Lazy;
use tracing::{debug, warn};

use crate::collab::Parse;
use crate::config::MergeConfig;
use crate::engine::{MATH_MARKER, MergeResult, Pipeline};
use crate::labels::{DepSet, Pos, PosSet};
use crate::rules::merge::rules;
use crate::tree::{SentenceTree, Token};
use crate::{CollaboratorError, engine};

static DEFAULT_PIPELINE: Lazy<Pipeline> = Lazy::new(|| rules::get(&MergeConfig::default()));

/// Stands in for a merged math expression in text sent to the parser.
pub const MATH_PLACEHOLDER: &str = "MATH";

/// Compound runs: "the apple tree" becomes "the", "apple tree".
///
/// # Example
/// ```
/// use deprewrite::{Dep, Pos, SentenceTree, Token, merge_compound_nouns};
///
/// let tree = SentenceTree::new(vec![
///     Token::new(0, "apple", Pos::Noun, Dep::Compound, 1),
///     Token::new(1, "trees", Pos::Noun, Dep::Nsubj, 2),
///     Token::new(2, "grow", Pos::Verb, Dep::Root, 2),
/// ])
/// .unwrap();
/// let merged = merge_compound_nouns(&tree);
/// assert_eq!(merged.at(0).text(), "apple trees");
/// assert_eq!(merged.len(), 2);
/// ```
pub fn merge_compound_nouns(tree: &SentenceTree) -> SentenceTree {
    single(rules::rule_compound_nouns(), tree)
}

/// Noun chunks. A chunk whose first token has a POS in `avoid` is merged
/// without it ("the apple tree" with `avoid = DET` gives "the", "apple tree").
pub fn merge_phrases(tree: &SentenceTree, avoid: PosSet) -> SentenceTree {
    single(rules::rule_phrases(avoid), tree)
}

/// "apple of the apple tree": nouns with their "of" phrases.
pub fn merge_prepositions(tree: &SentenceTree) -> SentenceTree {
    single(rules::rule_prepositions(), tree)
}

/// Glues punctuation onto the word before it, keeping the word's attributes.
pub fn merge_punct(tree: &SentenceTree) -> SentenceTree {
    single(rules::rule_punct(), tree)
}

/// Nominal conjunctions: "the soldier and the teacher".
pub fn merge_noun_conjs(tree: &SentenceTree) -> SentenceTree {
    single(rules::rule_noun_conjs(), tree)
}

/// Appositives together with what separates them from their head, for
/// tokens labeled with one of `labels`.
pub fn merge_appos(tree: &SentenceTree, labels: DepSet) -> SentenceTree {
    single(rules::rule_appos(labels), tree)
}

/// A verb with its adjective children and the ADJ/AUX/ADV children before it.
pub fn merge_verbs(tree: &SentenceTree) -> SentenceTree {
    single(rules::rule_verbs(), tree)
}

/// "03 11 2024": two two-digit tokens followed by a four-digit one.
pub fn merge_dates(tree: &SentenceTree) -> SentenceTree {
    single(rules::rule_dates(), tree)
}

/// Collapses every `¦ ... ¦` pair into one PROPN token carrying the math
/// payload (`is_math`, and `math` = the expression without markers).
pub fn merge_math_markers(tree: &SentenceTree) -> SentenceTree {
    let merged = single(rules::rule_math_markers(), tree);
    let mut tokens = merged.into_tokens();
    for token in tokens.iter_mut().filter(|t| is_marked_math(&t.text)) {
        token.math = token.text.trim_matches(|c: char| c.is_whitespace() || MATH_MARKER.contains(c)).to_string();
        token.is_math = true;
        token.pos = Pos::Propn;
        token.tag = "NN".to_string();
    }
    SentenceTree::rebuild(tokens)
}

/// [`merge_math_markers`], then reparses the sentence with [`MATH_PLACEHOLDER`]
/// in place of each expression and puts the payloads back on the placeholder
/// tokens of the new tree, in order.
pub fn merge_math<P: Parse + ?Sized>(tree: &SentenceTree, parser: &P) -> Result<SentenceTree, CollaboratorError> {
    let merged = merge_math_markers(tree);
    let payloads: Vec<String> = merged.tokens().iter().filter(|t| t.is_math).map(|t| t.math.clone()).collect();
    if payloads.is_empty() {
        return Ok(merged);
    }

    let text = placeholder_text(merged.tokens());
    debug!(target: "deprewrite::merge", %text, expressions = payloads.len(), "reparsing math");
    let reparsed = parser.parse(&text)?;

    let mut tokens = reparsed.into_tokens();
    let mut slots = tokens.iter_mut().filter(|t| t.text == MATH_PLACEHOLDER);
    let mut filled = 0;
    for (math, slot) in payloads.iter().zip(slots.by_ref()) {
        slot.is_math = true;
        slot.math = math.clone();
        filled += 1;
    }
    if filled != payloads.len() || slots.next().is_some() {
        warn!(target: "deprewrite::merge", expressions = payloads.len(), filled, "placeholder count changed on reparse");
    }
    Ok(SentenceTree::rebuild(tokens))
}

/// Full merge pass: compound, phrase, preposition (twice), punctuation,
/// conjunction, appositive, each only if enabled in `config.steps`.
///
/// # Example
/// ```
/// use deprewrite::{Dep, MergeConfig, Pos, SentenceTree, Token, merge_all};
///
/// let tree = SentenceTree::new(vec![
///     Token::new(0, "The", Pos::Det, Dep::Det, 2),
///     Token::new(1, "old", Pos::Adj, Dep::Amod, 2),
///     Token::new(2, "man", Pos::Noun, Dep::Nsubj, 3),
///     Token::new(3, "sleeps", Pos::Verb, Dep::Root, 3),
/// ])
/// .unwrap();
/// let merged = merge_all(&tree, &MergeConfig::default());
/// assert_eq!(merged.at(0).text(), "The old man");
/// ```
pub fn merge_all(tree: &SentenceTree, config: &MergeConfig) -> SentenceTree {
    with_pipeline(config, |pipeline| pipeline.run(tree))
}

/// [`merge_all`] with per-step timing and counts.
pub fn merge_all_with_metrics(tree: &SentenceTree, config: &MergeConfig) -> MergeResult {
    with_pipeline(config, |pipeline| pipeline.run_with_metrics(tree))
}

/// Depth of every token (ROOT is 0), by position.
pub fn annotate_depth(tree: &SentenceTree) -> Vec<usize> {
    tree.iter().map(|t| t.depth()).collect()
}

/// Applies `f` to every item on parallel workers and returns the results in
/// input order.
pub fn process_batch<T, R, F>(items: &[T], f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync,
{
    let workers = std::thread::available_parallelism().map_or(1, NonZeroUsize::get);
    let chunk = items.len().div_ceil(workers).max(1);
    if items.len() <= chunk {
        return items.iter().map(&f).collect();
    }

    let f = &f;
    std::thread::scope(|scope| {
        let handles: Vec<_> =
            items.chunks(chunk).map(|part| scope.spawn(move || part.iter().map(f).collect::<Vec<R>>())).collect();
        handles
            .into_iter()
            .flat_map(|handle| match handle.join() {
                Ok(results) => results,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    })
}

fn single(rule: engine::MergeRule, tree: &SentenceTree) -> SentenceTree {
    rule.apply(tree).0
}

fn with_pipeline<R>(config: &MergeConfig, run: impl FnOnce(&Pipeline) -> R) -> R {
    if *config == MergeConfig::default() {
        run(&DEFAULT_PIPELINE)
    } else {
        run(&rules::get(config))
    }
}

fn is_marked_math(text: &str) -> bool {
    text.len() > MATH_MARKER.len() && text.starts_with(MATH_MARKER) && text.ends_with(MATH_MARKER)
}

fn placeholder_text(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        out.push_str(if token.is_math { MATH_PLACEHOLDER } else { &token.text });
        if token.whitespace {
            out.push(' ');
        }
    }
    out.truncate(out.trim_end().len());
    out
}
