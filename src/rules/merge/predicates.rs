use crate::engine::MATH_MARKER;
use crate::labels::{Dep, DepSet, Pos};
use crate::tree::TokenRef;

/// Labels a noun chunk head may carry.
pub const NOUN_PHRASE_LABELS: DepSet = DepSet::OPRD
    .union(DepSet::NSUBJ)
    .union(DepSet::DOBJ)
    .union(DepSet::NSUBJPASS)
    .union(DepSet::PCOMP)
    .union(DepSet::POBJ)
    .union(DepSet::DATIVE)
    .union(DepSet::APPOS)
    .union(DepSet::ATTR)
    .union(DepSet::ROOT);

/// NOUN or PROPN.
pub fn is_nominal(t: TokenRef<'_>) -> bool {
    t.pos().is_nominal()
}

pub fn is_punct(t: TokenRef<'_>) -> bool {
    t.pos() == Pos::Punct
}

pub fn is_compound(t: TokenRef<'_>) -> bool {
    t.dep() == Dep::Compound
}

/// May follow a compound run: anything but punctuation or another compound.
pub fn ends_compound(t: TokenRef<'_>) -> bool {
    !matches!(t.dep(), Dep::Punct | Dep::Compound)
}

/// An "of" preposition hanging under a noun.
pub fn is_of_preposition(t: TokenRef<'_>) -> bool {
    t.dep() == Dep::Prep && t.text() == "of" && is_nominal(t.head())
}

/// A nominal conjunct, as in "the soldier and the *teacher*".
pub fn is_noun_conjunct(t: TokenRef<'_>) -> bool {
    t.dep() == Dep::Conj && is_nominal(t)
}

pub fn is_math_marker(t: TokenRef<'_>) -> bool {
    t.text() == MATH_MARKER
}

/// Day or month part of a date ("03"). Unanchored, like a token-level search.
pub fn is_two_digits(t: TokenRef<'_>) -> bool {
    regex!(r"\d\d").is_match(t.text())
}

/// Year part of a date ("2024").
pub fn is_four_digits(t: TokenRef<'_>) -> bool {
    regex!(r"\d\d\d\d").is_match(t.text())
}

/// Modifiers that fold into a verb: any ADJ child, and ADJ/AUX/ADV children
/// to its left.
pub fn is_verb_modifier(verb: TokenRef<'_>, child: TokenRef<'_>) -> bool {
    match child.pos() {
        Pos::Adj => true,
        Pos::Aux | Pos::Adv => child.i() < verb.i(),
        _ => false,
    }
}
