//! Subject-predicate-object triples.
//!
//! Selectors pick the first token of a list whose label is in a fixed set;
//! list helpers filter by POS or label. [`get_triples`] emits one [`Triple`]
//! per VERB/AUX token:
//!
//! ```text
//! Tom plays tennis and Jo plays socker
//!
//! +--plays|VERB (ROOT|1)          (Tom, plays, [tennis])
//!     +--Tom|PROPN (nsubj|0)      (Jo,  plays, [socker])
//!     +--tennis|NOUN (dobj|2)
//!     +--and|CCONJ (cc|3)
//!     +--plays|VERB (conj|5)
//!         +--Jo|PROPN (nsubj|4)
//!         +--socker|NOUN (dobj|6)
//! ```
//!
//! A verb without a subject child borrows one from the verbs above it: the
//! last `nsubj`/`nsubjpass`/`attr` child found walking from ROOT down to the
//! verb. Triples are most readable on a merged tree, see [`get_phrases`].

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::MergeConfig;
use crate::labels::{Dep, DepSet, NOMINAL_POS, Pos, VERBAL_POS};
use crate::navigate;
use crate::render::to_text;
use crate::tree::{SentenceTree, TokenRef};

pub const ROOT_SELECTOR: DepSet = DepSet::ROOT;
pub const SUBJECT_SELECTOR: DepSet = DepSet::NSUBJ.union(DepSet::NSUBJPASS).union(DepSet::EXPL);
pub const OBJECT_SELECTOR: DepSet = DepSet::DOBJ.union(DepSet::ATTR);
pub const ATTRIBUTE_SELECTOR: DepSet = DepSet::ATTR;
pub const PREPOSITION_SELECTOR: DepSet = DepSet::PREP;
pub const PASSIVE_AUX_SELECTOR: DepSet = DepSet::AUXPASS;

/// Labels collected from governing verbs when a verb has no subject child.
pub const INHERITED_SUBJECT_LABELS: DepSet = DepSet::NSUBJ.union(DepSet::NSUBJPASS).union(DepSet::ATTR);

/// Branches left out of objects and prepositional phrases.
pub const TRIPLE_PRUNE: DepSet = DepSet::RELCL.union(DepSet::ACL).union(DepSet::APPOS).union(DepSet::PUNCT);

/// First token whose label is in `labels`.
pub fn first_by_label<'t>(tokens: impl IntoIterator<Item = TokenRef<'t>>, labels: DepSet) -> Option<TokenRef<'t>> {
    tokens.into_iter().find(|t| labels.has(t.dep()))
}

pub fn root<'t>(tokens: impl IntoIterator<Item = TokenRef<'t>>) -> Option<TokenRef<'t>> {
    first_by_label(tokens, ROOT_SELECTOR)
}

/// First `nsubj`, `nsubjpass` or `expl`.
pub fn subject<'t>(tokens: impl IntoIterator<Item = TokenRef<'t>>) -> Option<TokenRef<'t>> {
    first_by_label(tokens, SUBJECT_SELECTOR)
}

/// First `dobj` or `attr`.
pub fn object<'t>(tokens: impl IntoIterator<Item = TokenRef<'t>>) -> Option<TokenRef<'t>> {
    first_by_label(tokens, OBJECT_SELECTOR)
}

pub fn attribute<'t>(tokens: impl IntoIterator<Item = TokenRef<'t>>) -> Option<TokenRef<'t>> {
    first_by_label(tokens, ATTRIBUTE_SELECTOR)
}

pub fn preposition<'t>(tokens: impl IntoIterator<Item = TokenRef<'t>>) -> Option<TokenRef<'t>> {
    first_by_label(tokens, PREPOSITION_SELECTOR)
}

pub fn passive_aux<'t>(tokens: impl IntoIterator<Item = TokenRef<'t>>) -> Option<TokenRef<'t>> {
    first_by_label(tokens, PASSIVE_AUX_SELECTOR)
}

/// Every `prep` token.
pub fn preps<'t>(tokens: impl IntoIterator<Item = TokenRef<'t>>) -> Vec<TokenRef<'t>> {
    tokens.into_iter().filter(|t| PREPOSITION_SELECTOR.has(t.dep())).collect()
}

/// Every VERB or AUX token.
pub fn verbs<'t>(tokens: impl IntoIterator<Item = TokenRef<'t>>) -> Vec<TokenRef<'t>> {
    tokens.into_iter().filter(|t| VERBAL_POS.has(t.pos())).collect()
}

/// Every NOUN or PROPN token.
pub fn nouns_and_propns<'t>(tokens: impl IntoIterator<Item = TokenRef<'t>>) -> Vec<TokenRef<'t>> {
    tokens.into_iter().filter(|t| NOMINAL_POS.has(t.pos())).collect()
}

/// The `prep` children of `token` with their pruned subtrees, by position.
pub fn preps_descendants(token: TokenRef<'_>, skip: DepSet) -> Vec<TokenRef<'_>> {
    let mut out: Vec<_> =
        preps(token.children()).into_iter().flat_map(|p| navigate::descendants_and_self(p, skip)).collect();
    out.sort_by_key(|t| t.i());
    out
}

/// The first object child of `token` with its pruned subtree.
pub fn object_descendants(token: TokenRef<'_>, skip: DepSet) -> Vec<TokenRef<'_>> {
    object(token.children()).map(|o| navigate::descendants_and_self(o, skip)).unwrap_or_default()
}

/// Each VERB token together with its pruned subtree, by position.
pub fn verb_descendants(tree: &SentenceTree, skip: DepSet) -> Vec<Vec<TokenRef<'_>>> {
    tree.iter().filter(|t| t.pos() == Pos::Verb).map(|verb| navigate::descendants_and_self(verb, skip)).collect()
}

/// VERB/AUX tokens from ROOT down to `token`, `token` included.
pub fn verb_ancestors(token: TokenRef<'_>) -> Vec<TokenRef<'_>> {
    verbs(navigate::path_to_root(token))
}

/// Subject-like children of [`verb_ancestors`], ROOT side first.
pub fn verb_subject_ancestors(token: TokenRef<'_>) -> Vec<TokenRef<'_>> {
    verb_ancestors(token)
        .into_iter()
        .flat_map(|verb| verb.children().filter(|c| INHERITED_SUBJECT_LABELS.has(c.dep())))
        .collect()
}

/// One subject-predicate-object reading of a verb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple<'t> {
    /// `None` when neither the verb nor any verb above it has a subject.
    pub subject: Option<TokenRef<'t>>,
    pub predicate: TokenRef<'t>,
    /// The object's tokens followed by the prepositional phrases' tokens.
    pub objects: Vec<TokenRef<'t>>,
}

impl<'t> Triple<'t> {
    /// Reading of `verb`, which need not be VERB/AUX.
    pub fn of(verb: TokenRef<'t>) -> Self {
        let subject = subject(verb.children()).or_else(|| verb_subject_ancestors(verb).last().copied());
        let mut objects = object_descendants(verb, TRIPLE_PRUNE);
        objects.extend(preps_descendants(verb, TRIPLE_PRUNE));
        Triple { subject, predicate: verb, objects }
    }

    pub fn to_record(&self) -> TripleRecord {
        TripleRecord {
            subject: self.subject.map(|s| s.text().to_string()),
            predicate: self.predicate.text().to_string(),
            objects: self.objects.iter().map(|o| o.text().to_string()).collect(),
            text: self.to_string(),
        }
    }
}

impl fmt::Display for Triple<'_> {
    /// `"{subject} {verb} {objects}"`; the objects are rendered in sentence
    /// order and may be empty, which leaves a trailing space.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(subject) = self.subject {
            write!(f, "{} ", subject.text())?;
        }
        write!(f, "{} {}", self.predicate.text(), to_text(&self.objects))
    }
}

/// Owned form of a [`Triple`], detached from its tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripleRecord {
    pub subject: Option<String>,
    pub predicate: String,
    pub objects: Vec<String>,
    pub text: String,
}

/// One triple per VERB/AUX token, in position order.
pub fn get_triples(tree: &SentenceTree) -> Vec<Triple<'_>> {
    let triples: Vec<_> = verbs(tree.iter()).into_iter().map(Triple::of).collect();
    debug!(target: "deprewrite::extract", verbs = triples.len(), "triples");
    triples
}

/// [`Triple`]'s text for each triple.
pub fn triples_text(triples: &[Triple<'_>]) -> Vec<String> {
    triples.iter().map(|t| t.to_string()).collect()
}

/// Merges `tree` with `config` and reads its triples.
pub fn get_phrases(tree: &SentenceTree, config: &MergeConfig) -> Vec<TripleRecord> {
    let merged = crate::merge_all(tree, config);
    get_triples(&merged).iter().map(Triple::to_record).collect()
}

/// [`get_phrases`] as text.
pub fn get_phrases_text(tree: &SentenceTree, config: &MergeConfig) -> Vec<String> {
    get_phrases(tree, config).into_iter().map(|record| record.text).collect()
}

/// Tokens grouped by label, labels in declaration order.
pub fn by_label(tree: &SentenceTree) -> Vec<(Dep, Vec<TokenRef<'_>>)> {
    let mut groups: Vec<(Dep, Vec<TokenRef<'_>>)> = Vec::new();
    for token in tree.iter() {
        match groups.iter_mut().find(|(dep, _)| *dep == token.dep()) {
            Some((_, members)) => members.push(token),
            None => groups.push((token.dep(), vec![token])),
        }
    }
    groups.sort_by_key(|(dep, _)| *dep);
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn texts(tokens: &[TokenRef<'_>]) -> Vec<String> {
        tokens.iter().map(|t| t.text().to_string()).collect()
    }

    #[test]
    fn selectors_take_the_first_match() {
        let tree = fixtures::apple_tree();
        let fallen = tree.root();
        assert_eq!(root(tree.iter()), Some(fallen));
        assert_eq!(subject(fallen.children()).map(|t| t.text()), Some("apple"));
        assert_eq!(passive_aux(fallen.children()).map(|t| t.text()), Some("been"));
        assert_eq!(object(fallen.children()), None);
        assert_eq!(preposition(tree.iter()).map(|t| t.i()), Some(5));
        assert_eq!(attribute(tree.iter()), None);
    }

    #[test]
    fn list_helpers() {
        let tree = fixtures::apple_tree();
        assert_eq!(texts(&verbs(tree.iter())), ["has", "been", "fallen"]);
        assert_eq!(texts(&nouns_and_propns(tree.iter())), ["apple", "apple", "tree"]);
        assert_eq!(texts(&preps(tree.iter())), ["of"]);
        assert_eq!(texts(&preps_descendants(tree.at(4), TRIPLE_PRUNE)), ["of", "the", "apple", "tree"]);
    }

    #[test]
    fn verbs_with_their_subtrees() {
        let tree = fixtures::soldier_walk();
        let groups: Vec<_> = verb_descendants(&tree, DepSet::CONJ).iter().map(|g| to_text(g)).collect();
        assert_eq!(groups, ["The soldier and walk home and .", "take supper and", "drink wine"]);
    }

    #[test]
    fn coordinated_clauses_give_one_triple_each() {
        let tree = fixtures::tom_tennis();
        let triples = get_triples(&tree);
        assert_eq!(triples_text(&triples), ["Tom plays tennis", "Jo plays socker"]);
        assert_eq!(triples[1].subject.map(|s| s.i()), Some(4));
    }

    #[test]
    fn subjects_are_inherited_from_governing_verbs() {
        let tree = fixtures::soldier_walk();
        let take = tree.at(8);
        assert_eq!(texts(&verb_ancestors(take)), ["walk", "take"]);
        assert_eq!(texts(&verb_subject_ancestors(take)), ["soldier"]);

        let triples = get_triples(&tree);
        assert_eq!(triples_text(&triples), ["soldier walk ", "soldier take supper", "soldier drink wine"]);
    }

    #[test]
    fn no_subject_anywhere() {
        let tree = fixtures::math_placeholder();
        let let_ = get_triples(&tree).into_iter().next().unwrap();
        assert_eq!(let_.subject, None);
        assert_eq!(let_.to_string(), "Let ");
    }

    #[test]
    fn phrases_of_a_merged_sentence() {
        let tree = fixtures::industrial_revolution();
        let records = get_phrases(&tree, &MergeConfig::default());
        let period = "a period of global transition of human economy";
        let seen: Vec<_> = records.iter().map(|r| (r.subject.as_deref(), r.predicate.as_str(), r.objects.clone())).collect();
        assert_eq!(
            seen,
            vec![
                (Some(period), "known", vec!["as".to_string(), "the First Industrial Revolution".to_string()]),
                (
                    Some("The Industrial Revolution"),
                    "was",
                    vec![
                        period.to_string(),
                        "towards".to_string(),
                        "more widespread, efficient and stable manufacturing processes".to_string()
                    ]
                ),
                (Some("that"), "succeeded", vec!["the Agricultural Revolution".to_string()]),
                (
                    Some(period),
                    "starting",
                    ["from", "Great Britain", "and", "continental Europe", "and", "the United States"]
                        .map(String::from)
                        .to_vec()
                ),
                (
                    Some("that"),
                    "occurred",
                    ["during", "the period", "from", "around", "1760", "to", "about", "1820–1840"].map(String::from).to_vec()
                ),
            ]
        );
        assert_eq!(records[2].text, "that succeeded the Agricultural Revolution");
    }

    #[test]
    fn groups_by_label() {
        let tree = fixtures::tom_tennis();
        let groups: Vec<_> = by_label(&tree).into_iter().map(|(dep, ts)| (dep, texts(&ts))).collect();
        assert_eq!(groups[0], (Dep::Root, vec!["plays".to_string()]));
        assert!(groups.contains(&(Dep::Nsubj, vec!["Tom".to_string(), "Jo".to_string()])));
    }
}
