//! Hand-built parse trees and fake collaborators for tests.
//!
//! Trees are written the way a dependency parser would produce them for the
//! sentence in each function's doc line. A token is followed by a space unless
//! the next token is sentence punctuation (`, . ; : ! ?`).

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::CollaboratorError;
use crate::collab::{Complete, Completion, Parse};
use crate::labels::{Dep, Pos};
use crate::tree::{SentenceTree, Token};

use crate::labels::Dep::*;

type Word = (&'static str, Pos, Dep, usize);

fn glued(text: &str) -> bool {
    matches!(text, "," | "." | ";" | ":" | "!" | "?")
}

pub fn build(words: &[Word]) -> SentenceTree {
    let tokens = words
        .iter()
        .enumerate()
        .map(|(i, (text, pos, dep, head))| {
            let spaced = words.get(i + 1).is_some_and(|next| !glued(next.0));
            Token::new(i, *text, *pos, *dep, *head).with_whitespace(spaced)
        })
        .collect();
    SentenceTree::new(tokens).unwrap()
}

/// The blue, red apple of the apple tree has been fallen.
pub fn apple_tree() -> SentenceTree {
    build(&[
        ("The", Pos::Det, Det, 4),
        ("blue", Pos::Adj, Amod, 4),
        (",", Pos::Punct, Punct, 4),
        ("red", Pos::Adj, Amod, 4),
        ("apple", Pos::Noun, Nsubjpass, 11),
        ("of", Pos::Adp, Prep, 4),
        ("the", Pos::Det, Det, 8),
        ("apple", Pos::Noun, Compound, 8),
        ("tree", Pos::Noun, Pobj, 5),
        ("has", Pos::Aux, Aux, 11),
        ("been", Pos::Aux, Auxpass, 11),
        ("fallen", Pos::Verb, Root, 11),
        (".", Pos::Punct, Punct, 11),
    ])
}

/// The blue, red apple of the apple tree, Martas tree, has been fallen.
pub fn apple_tree_appos() -> SentenceTree {
    build(&[
        ("The", Pos::Det, Det, 4),
        ("blue", Pos::Adj, Amod, 4),
        (",", Pos::Punct, Punct, 4),
        ("red", Pos::Adj, Amod, 4),
        ("apple", Pos::Noun, Nsubjpass, 15),
        ("of", Pos::Adp, Prep, 4),
        ("the", Pos::Det, Det, 8),
        ("apple", Pos::Noun, Compound, 8),
        ("tree", Pos::Noun, Pobj, 5),
        (",", Pos::Punct, Punct, 11),
        ("Martas", Pos::Propn, Poss, 11),
        ("tree", Pos::Noun, Appos, 4),
        (",", Pos::Punct, Punct, 4),
        ("has", Pos::Aux, Aux, 15),
        ("been", Pos::Aux, Auxpass, 15),
        ("fallen", Pos::Verb, Root, 15),
        (".", Pos::Punct, Punct, 15),
    ])
}

/// Tom plays tennis and Jo plays socker
pub fn tom_tennis() -> SentenceTree {
    build(&[
        ("Tom", Pos::Propn, Nsubj, 1),
        ("plays", Pos::Verb, Root, 1),
        ("tennis", Pos::Noun, Dobj, 1),
        ("and", Pos::Cconj, Cc, 1),
        ("Jo", Pos::Propn, Nsubj, 5),
        ("plays", Pos::Verb, Conj, 1),
        ("socker", Pos::Noun, Dobj, 5),
    ])
}

/// The Industrial Revolution, also known as the First Industrial Revolution,
/// was a period of global transition of human economy towards more
/// widespread, efficient and stable manufacturing processes that succeeded
/// the Agricultural Revolution, starting from Great Britain and continental
/// Europe and the United States, that occurred during the period from around
/// 1760 to about 1820–1840.
pub fn industrial_revolution() -> SentenceTree {
    build(&[
        ("The", Pos::Det, Det, 2),
        ("Industrial", Pos::Propn, Compound, 2),
        ("Revolution", Pos::Propn, Nsubj, 12),
        (",", Pos::Punct, Punct, 2),
        ("also", Pos::Adv, Advmod, 5),
        ("known", Pos::Verb, Acl, 2),
        ("as", Pos::Adp, Prep, 5),
        ("the", Pos::Det, Det, 10),
        ("First", Pos::Propn, Compound, 10),
        ("Industrial", Pos::Propn, Compound, 10),
        ("Revolution", Pos::Propn, Pobj, 6),
        (",", Pos::Punct, Punct, 2),
        ("was", Pos::Aux, Root, 12),
        ("a", Pos::Det, Det, 14),
        ("period", Pos::Noun, Attr, 12),
        ("of", Pos::Adp, Prep, 14),
        ("global", Pos::Adj, Amod, 17),
        ("transition", Pos::Noun, Pobj, 15),
        ("of", Pos::Adp, Prep, 17),
        ("human", Pos::Adj, Amod, 20),
        ("economy", Pos::Noun, Pobj, 18),
        ("towards", Pos::Adp, Prep, 14),
        ("more", Pos::Adv, Advmod, 23),
        ("widespread", Pos::Adj, Amod, 29),
        (",", Pos::Punct, Punct, 23),
        ("efficient", Pos::Adj, Conj, 23),
        ("and", Pos::Cconj, Cc, 25),
        ("stable", Pos::Adj, Conj, 25),
        ("manufacturing", Pos::Noun, Compound, 29),
        ("processes", Pos::Noun, Pobj, 21),
        ("that", Pos::Pron, Nsubj, 31),
        ("succeeded", Pos::Verb, Relcl, 29),
        ("the", Pos::Det, Det, 34),
        ("Agricultural", Pos::Propn, Compound, 34),
        ("Revolution", Pos::Propn, Dobj, 31),
        (",", Pos::Punct, Punct, 14),
        ("starting", Pos::Verb, Acl, 14),
        ("from", Pos::Adp, Prep, 36),
        ("Great", Pos::Propn, Compound, 39),
        ("Britain", Pos::Propn, Pobj, 37),
        ("and", Pos::Cconj, Cc, 39),
        ("continental", Pos::Propn, Compound, 42),
        ("Europe", Pos::Propn, Conj, 39),
        ("and", Pos::Cconj, Cc, 42),
        ("the", Pos::Det, Det, 46),
        ("United", Pos::Propn, Compound, 46),
        ("States", Pos::Propn, Conj, 42),
        (",", Pos::Punct, Punct, 12),
        ("that", Pos::Pron, Nsubj, 49),
        ("occurred", Pos::Verb, Ccomp, 12),
        ("during", Pos::Adp, Prep, 49),
        ("the", Pos::Det, Det, 52),
        ("period", Pos::Noun, Pobj, 50),
        ("from", Pos::Adp, Prep, 52),
        ("around", Pos::Adp, Prep, 53),
        ("1760", Pos::Num, Pobj, 54),
        ("to", Pos::Adp, Prep, 49),
        ("about", Pos::Adp, Advmod, 58),
        ("1820–1840", Pos::Num, Pobj, 56),
        (".", Pos::Punct, Punct, 12),
    ])
}

/// The soldier and the teacher from Manchester, walk home and take supper and
/// drink wine.
pub fn soldier_from_manchester() -> SentenceTree {
    build(&[
        ("The", Pos::Det, Det, 1),
        ("soldier", Pos::Noun, Nsubj, 8),
        ("and", Pos::Cconj, Cc, 1),
        ("the", Pos::Det, Det, 4),
        ("teacher", Pos::Noun, Conj, 1),
        ("from", Pos::Adp, Prep, 4),
        ("Manchester", Pos::Propn, Pobj, 5),
        (",", Pos::Punct, Punct, 1),
        ("walk", Pos::Verb, Root, 8),
        ("home", Pos::Adv, Advmod, 8),
        ("and", Pos::Cconj, Cc, 8),
        ("take", Pos::Verb, Conj, 8),
        ("supper", Pos::Noun, Dobj, 11),
        ("and", Pos::Cconj, Cc, 11),
        ("drink", Pos::Verb, Conj, 11),
        ("wine", Pos::Noun, Dobj, 14),
        (".", Pos::Punct, Punct, 8),
    ])
}

/// The soldier and the teacher walk home and take supper and drink wine.
pub fn soldier_walk() -> SentenceTree {
    build(&[
        ("The", Pos::Det, Det, 1),
        ("soldier", Pos::Noun, Nsubj, 5),
        ("and", Pos::Cconj, Cc, 1),
        ("the", Pos::Det, Det, 4),
        ("teacher", Pos::Noun, Conj, 1),
        ("walk", Pos::Verb, Root, 5),
        ("home", Pos::Adv, Advmod, 5),
        ("and", Pos::Cconj, Cc, 5),
        ("take", Pos::Verb, Conj, 5),
        ("supper", Pos::Noun, Dobj, 8),
        ("and", Pos::Cconj, Cc, 8),
        ("drink", Pos::Verb, Conj, 8),
        ("wine", Pos::Noun, Dobj, 11),
        (".", Pos::Punct, Punct, 5),
    ])
}

/// The soldier and the teacher walk to the pub, which was closed.
pub fn soldier_pub() -> SentenceTree {
    build(&[
        ("The", Pos::Det, Det, 1),
        ("soldier", Pos::Noun, Nsubj, 5),
        ("and", Pos::Cconj, Cc, 1),
        ("the", Pos::Det, Det, 4),
        ("teacher", Pos::Noun, Conj, 1),
        ("walk", Pos::Verb, Root, 5),
        ("to", Pos::Adp, Prep, 5),
        ("the", Pos::Det, Det, 8),
        ("pub", Pos::Noun, Pobj, 6),
        (",", Pos::Punct, Punct, 8),
        ("which", Pos::Pron, Nsubjpass, 12),
        ("was", Pos::Aux, Auxpass, 12),
        ("closed", Pos::Verb, Relcl, 8),
        (".", Pos::Punct, Punct, 5),
    ])
}

/// I think you should go.
pub fn think_go() -> SentenceTree {
    build(&[
        ("I", Pos::Pron, Nsubj, 1),
        ("think", Pos::Verb, Root, 1),
        ("you", Pos::Pron, Nsubj, 4),
        ("should", Pos::Aux, Aux, 4),
        ("go", Pos::Verb, Ccomp, 1),
        (".", Pos::Punct, Punct, 1),
    ])
}

/// She wants to leave.
pub fn wants_to_leave() -> SentenceTree {
    build(&[
        ("She", Pos::Pron, Nsubj, 1),
        ("wants", Pos::Verb, Root, 1),
        ("to", Pos::Part, Aux, 3),
        ("leave", Pos::Verb, Xcomp, 1),
        (".", Pos::Punct, Punct, 1),
    ])
}

/// He arrived on 03 11 2024.
pub fn dated() -> SentenceTree {
    build(&[
        ("He", Pos::Pron, Nsubj, 1),
        ("arrived", Pos::Verb, Root, 1),
        ("on", Pos::Adp, Prep, 1),
        ("03", Pos::Num, Nummod, 5),
        ("11", Pos::Num, Nummod, 5),
        ("2024", Pos::Num, Pobj, 2),
        (".", Pos::Punct, Punct, 1),
    ])
}

/// Let ¦ x + y ¦ be positive.
pub fn marked_math() -> SentenceTree {
    build(&[
        ("Let", Pos::Verb, Root, 0),
        ("¦", Pos::Punct, Punct, 2),
        ("x", Pos::Propn, Nsubj, 6),
        ("+", Pos::Sym, Cc, 2),
        ("y", Pos::Propn, Conj, 2),
        ("¦", Pos::Punct, Punct, 2),
        ("be", Pos::Aux, Ccomp, 0),
        ("positive", Pos::Adj, Acomp, 6),
        (".", Pos::Punct, Punct, 0),
    ])
}

/// Let MATH be positive.
pub fn math_placeholder() -> SentenceTree {
    build(&[
        ("Let", Pos::Verb, Root, 0),
        ("MATH", Pos::Propn, Nsubj, 2),
        ("be", Pos::Aux, Ccomp, 0),
        ("positive", Pos::Adj, Acomp, 2),
        (".", Pos::Punct, Punct, 0),
    ])
}

/// Parser returning canned trees for known sentences and a flat tree (first
/// word as ROOT, every other word attached to it) for anything else.
#[derive(Default)]
pub struct FakeParser {
    known: HashMap<String, SentenceTree>,
    seen: Mutex<Vec<String>>,
}

impl FakeParser {
    pub fn with(mut self, text: &str, tree: SentenceTree) -> Self {
        self.known.insert(text.to_string(), tree);
        self
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl Parse for FakeParser {
    fn parse(&self, text: &str) -> Result<SentenceTree, CollaboratorError> {
        self.seen.lock().unwrap().push(text.to_string());
        if let Some(tree) = self.known.get(text) {
            return Ok(tree.clone());
        }
        let tokens: Vec<Token> = text
            .split_whitespace()
            .enumerate()
            .map(|(i, word)| if i == 0 { Token::new(0, word, Pos::X, Root, 0) } else { Token::new(i, word, Pos::X, Dep::Dep, 0) })
            .collect();
        SentenceTree::new(tokens).map_err(|e| CollaboratorError::Malformed(e.to_string()))
    }
}

/// Parser that is always down.
pub struct DownParser;

impl Parse for DownParser {
    fn parse(&self, _text: &str) -> Result<SentenceTree, CollaboratorError> {
        Err(CollaboratorError::Unavailable("connection refused".into()))
    }
}

/// Completer answering each request with the next scripted result.
pub struct ScriptedCompleter {
    answers: Mutex<Vec<Result<Vec<Completion>, CollaboratorError>>>,
    requests: Mutex<Vec<String>>,
    pub delay: Duration,
}

impl ScriptedCompleter {
    pub fn new(answers: Vec<Result<Vec<Completion>, CollaboratorError>>) -> Self {
        ScriptedCompleter { answers: Mutex::new(answers), requests: Mutex::new(Vec::new()), delay: Duration::ZERO }
    }

    /// One successful answer with a single top sequence per entry.
    pub fn answering(sequences: &[&str]) -> Self {
        Self::new(sequences.iter().map(|s| Ok(vec![Completion { sequence: s.to_string(), score: 0.9 }])).collect())
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Complete for ScriptedCompleter {
    fn complete(&self, masked: &str, _timeout: Duration) -> Result<Vec<Completion>, CollaboratorError> {
        self.requests.lock().unwrap().push(masked.to_string());
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        let mut answers = self.answers.lock().unwrap();
        if answers.is_empty() {
            return Err(CollaboratorError::Unavailable("no scripted answer left".into()));
        }
        answers.remove(0)
    }
}
