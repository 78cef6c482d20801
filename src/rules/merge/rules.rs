//! Merge rules.
//!
//! Each function returns one [`MergeRule`]. Rules only propose spans; the
//! engine resolves conflicts and merges.

use crate::config::{MergeConfig, MergeSteps};
use crate::engine::{Candidate, FeatureMask, MergeRule, Pipeline, Span};
use crate::labels::{DepSet, Pos, PosSet};
use crate::rules::merge::helpers::{appositive_span, compound_runs, conjuncts, math_spans, noun_chunks, punct_runs};
use crate::rules::merge::predicates::{
    is_four_digits, is_noun_conjunct, is_of_preposition, is_two_digits, is_verb_modifier,
};

/// "apple tree", "First Industrial Revolution"
pub fn rule_compound_nouns() -> MergeRule {
    merge_rule! {
        name: "compound nouns",
        requires: DepSet::COMPOUND,
        find: |tree| {
            compound_runs(tree).into_iter().map(Candidate::from).collect()
        },
    }
}

/// Noun chunks, optionally without a leading token whose POS is in `avoid`.
pub fn rule_phrases(avoid: PosSet) -> MergeRule {
    merge_rule! {
        name: "noun phrases",
        features: FeatureMask::HAS_NOMINAL,
        find: |tree| {
            noun_chunks(tree)
                .into_iter()
                .map(|chunk| {
                    let mut span = chunk.span;
                    if avoid.has(tree.at(span.start).pos()) {
                        span.start += 1;
                    }
                    Candidate::new(span).with_attrs_from(chunk.head)
                })
                .collect()
        },
    }
}

/// "apple of the apple tree": a noun, its "of" and the preposition's children.
pub fn rule_prepositions() -> MergeRule {
    merge_rule! {
        name: "of prepositions",
        requires: DepSet::PREP,
        features: FeatureMask::HAS_OF | FeatureMask::HAS_NOMINAL,
        find: |tree| {
            tree.iter()
                .filter(|t| is_of_preposition(*t))
                .filter_map(|prep| {
                    let positions = [prep.head().i(), prep.i()].into_iter().chain(prep.children().map(|c| c.i()));
                    Span::covering(positions).map(Candidate::from)
                })
                .collect()
        },
    }
}

/// "fallen ." -> "fallen.", keeping the word's attributes.
pub fn rule_punct() -> MergeRule {
    merge_rule! {
        name: "punctuation",
        features: FeatureMask::HAS_PUNCT,
        find: |tree| {
            punct_runs(tree).into_iter().map(|(span, word)| Candidate::new(span).with_attrs_from(word)).collect()
        },
    }
}

/// "the soldier and the teacher"
pub fn rule_noun_conjs() -> MergeRule {
    merge_rule! {
        name: "noun conjunctions",
        requires: DepSet::CONJ,
        features: FeatureMask::HAS_NOMINAL,
        find: |tree| {
            tree.iter()
                .filter(|t| is_noun_conjunct(*t))
                .filter_map(|t| {
                    let positions = std::iter::once(t.i()).chain(conjuncts(t).into_iter().map(|c| c.i()));
                    Span::covering(positions).map(Candidate::from)
                })
                .collect()
        },
    }
}

/// "tree, Martas tree,"
pub fn rule_appos(labels: DepSet) -> MergeRule {
    merge_rule! {
        name: "appositives",
        requires: labels,
        find: |tree| {
            if labels.is_empty() {
                return Vec::new();
            }
            tree.iter().filter(|t| labels.has(t.dep())).filter_map(appositive_span).map(Candidate::from).collect()
        },
    }
}

/// A verb with its ADJ children and the ADJ/AUX/ADV children to its left:
/// "has been fallen".
pub fn rule_verbs() -> MergeRule {
    merge_rule! {
        name: "verb groups",
        features: FeatureMask::HAS_VERB,
        find: |tree| {
            tree.iter()
                .filter(|t| t.pos() == Pos::Verb)
                .filter_map(|verb| {
                    let modifiers = verb.children().filter(|c| is_verb_modifier(verb, *c)).map(|c| c.i());
                    Span::covering(std::iter::once(verb.i()).chain(modifiers)).map(Candidate::from)
                })
                .collect()
        },
    }
}

/// "03 11 2024"
pub fn rule_dates() -> MergeRule {
    merge_rule! {
        name: "dates",
        features: FeatureMask::HAS_DIGITS,
        find: |tree| {
            (0..tree.len().saturating_sub(2))
                .filter(|i| is_two_digits(tree.at(*i)) && is_two_digits(tree.at(i + 1)) && is_four_digits(tree.at(i + 2)))
                .map(|i| Candidate::new(Span::new(i, i + 3)))
                .collect()
        },
    }
}

/// "¦ x + y ¦": a marked math expression, markers included.
pub fn rule_math_markers() -> MergeRule {
    merge_rule! {
        name: "math markers",
        features: FeatureMask::HAS_MATH_MARKER,
        find: |tree| {
            math_spans(tree).into_iter().map(Candidate::from).collect()
        },
    }
}

/// Steps of a full pass in their fixed order: compound, phrase,
/// preposition (twice), punctuation, conjunction, appositive.
pub fn get(config: &MergeConfig) -> Pipeline {
    let steps = config.steps;
    let mut rules = Vec::new();
    if steps.contains(MergeSteps::COMPOUND) {
        rules.push(rule_compound_nouns());
    }
    if steps.contains(MergeSteps::PHRASE) {
        rules.push(rule_phrases(config.phrase_avoid));
    }
    if steps.contains(MergeSteps::PREPOSITION) {
        rules.push(rule_prepositions());
        rules.push(rule_prepositions());
    }
    if steps.contains(MergeSteps::PUNCT) {
        rules.push(rule_punct());
    }
    if steps.contains(MergeSteps::CONJUNCTION) {
        rules.push(rule_noun_conjs());
    }
    if steps.contains(MergeSteps::APPOSITIVE) {
        rules.push(rule_appos(config.appos_labels));
    }
    Pipeline::new(rules)
}
