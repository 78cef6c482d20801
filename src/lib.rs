//! Rewriting and decomposition of dependency-parsed sentences.
//!
//! A [`SentenceTree`] is built once from a parser's output and never mutated.
//! Every operation is a function from a tree to a new tree, to text, or to
//! triples:
//!
//! ```text
//! parser output ──> SentenceTree ──> merge_all ──> merged SentenceTree ──┬─> extract::get_triples
//!                   (validated)      (engine)                           └─> split::*  ──> Parse (reparse)
//!                                                                                       └─> Complete (fill masks)
//! ```
//!
//! - [`navigate`]: ancestors, descendants, siblings, pruned walks.
//! - [`render`]: token sets to text.
//! - merges: `merge_*` functions and [`merge_all`].
//! - [`extract`]: subject-predicate-object triples.
//! - [`split`]: sentence, comma, conjunction, dependency and clause splits.
//! - [`collab`]: the parser and completion collaborators.
//!
//! Logging goes through `tracing`; the library never installs a subscriber.

#[macro_use]
mod macros;

mod api;
mod engine;
mod error;
mod rules;
mod tree;

pub mod collab;
pub mod config;
pub mod extract;
pub mod labels;
pub mod navigate;
pub mod render;
pub mod split;

#[cfg(test)]
mod fixtures;

pub use api::{
    MATH_PLACEHOLDER, annotate_depth, merge_all, merge_all_with_metrics, merge_appos, merge_compound_nouns,
    merge_dates, merge_math, merge_math_markers, merge_noun_conjs, merge_phrases, merge_prepositions, merge_punct,
    merge_verbs, process_batch,
};
pub use collab::{Complete, Completion, Parse};
pub use config::{MergeConfig, MergeSteps, Options, SplitConfig};
pub use engine::{MATH_MARKER, MergeMetrics, MergeResult, Span, StepMetrics};
pub use error::{CollaboratorError, Error, Result, TreeError};
pub use labels::{Category, Dep, DepSet, Pos, PosSet};
pub use tree::{SentenceTree, Token, TokenRef};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn trees_cross_threads() {
        assert_send_sync::<SentenceTree>();
        assert_send_sync::<MergeResult>();
        assert_send_sync::<Options>();
    }

    #[test]
    fn tree_from_json_through_merge_and_triples() {
        let input = r#"{"tokens": [
            {"text": "The", "pos": "DET", "dep": "det", "head": 2},
            {"text": "old", "pos": "ADJ", "dep": "amod", "head": 2},
            {"text": "man", "pos": "NOUN", "dep": "nsubj", "head": 3},
            {"text": "reads", "pos": "VERB", "dep": "ROOT", "head": 3},
            {"text": "books", "pos": "NOUN", "dep": "dobj", "head": 3, "ws": false},
            {"text": ".", "pos": "PUNCT", "dep": "punct", "head": 3, "ws": false}
        ]}"#;
        let tree = SentenceTree::from_json(input).unwrap();
        assert_eq!(tree.text(), "The old man reads books.");
        assert_eq!(extract::get_phrases_text(&tree, &MergeConfig::default()), ["The old man reads books"]);
    }
}
