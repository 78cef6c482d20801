//! Closed tag sets: coarse part-of-speech tags, dependency labels, and the
//! dependency-label category table.
//!
//! The category table and the derived label sets (`SUBJECT_LABELS`,
//! `OBJECT_LABELS`, ...) are configuration data: triple extraction and the
//! splitters rely on their exact membership, so they are spelled out here
//! rather than computed from the parse.

use std::collections::HashMap;

use once_cell::sync::Lazy;

tag_set! {
    kind: "pos", enum Pos, set PosSet: u32,
    Noun / NOUN => "NOUN",
    Propn / PROPN => "PROPN",
    Verb / VERB => "VERB",
    Aux / AUX => "AUX",
    Adj / ADJ => "ADJ",
    Adv / ADV => "ADV",
    Adp / ADP => "ADP",
    Det / DET => "DET",
    Pron / PRON => "PRON",
    Cconj / CCONJ => "CCONJ",
    Sconj / SCONJ => "SCONJ",
    Part / PART => "PART",
    Punct / PUNCT => "PUNCT",
    Num / NUM => "NUM",
    Intj / INTJ => "INTJ",
    Sym / SYM => "SYM",
    X / X => "X",
    Space / SPACE => "SPACE",
}

tag_set! {
    kind: "dependency", enum Dep, set DepSet: u64,
    Root / ROOT => "ROOT",
    Acl / ACL => "acl",
    Acomp / ACOMP => "acomp",
    Advcl / ADVCL => "advcl",
    Advmod / ADVMOD => "advmod",
    Agent / AGENT => "agent",
    Amod / AMOD => "amod",
    Appos / APPOS => "appos",
    Attr / ATTR => "attr",
    Aux / AUX => "aux",
    Auxpass / AUXPASS => "auxpass",
    Case / CASE => "case",
    Cc / CC => "cc",
    Ccomp / CCOMP => "ccomp",
    Compound / COMPOUND => "compound",
    Conj / CONJ => "conj",
    Cop / COP => "cop",
    Csubj / CSUBJ => "csubj",
    Csubjpass / CSUBJPASS => "csubjpass",
    Dative / DATIVE => "dative",
    Dep / DEP => "dep",
    Det / DET => "det",
    Dobj / DOBJ => "dobj",
    Expl / EXPL => "expl",
    Intj / INTJ => "intj",
    Mark / MARK => "mark",
    Meta / META => "meta",
    Neg / NEG => "neg",
    Nmod / NMOD => "nmod",
    Npadvmod / NPADVMOD => "npadvmod",
    Npmod / NPMOD => "npmod",
    Nsubj / NSUBJ => "nsubj",
    Nsubjpass / NSUBJPASS => "nsubjpass",
    Nummod / NUMMOD => "nummod",
    Oprd / OPRD => "oprd",
    Parataxis / PARATAXIS => "parataxis",
    Pcomp / PCOMP => "pcomp",
    Pobj / POBJ => "pobj",
    Poss / POSS => "poss",
    Preconj / PRECONJ => "preconj",
    Predet / PREDET => "predet",
    Prep / PREP => "prep",
    Prt / PRT => "prt",
    Punct / PUNCT => "punct",
    Quantmod / QUANTMOD => "quantmod",
    Relcl / RELCL => "relcl",
    Xcomp / XCOMP => "xcomp",
}

impl Pos {
    /// NOUN or PROPN.
    pub fn is_nominal(self) -> bool {
        NOMINAL_POS.has(self)
    }

    /// VERB or AUX.
    pub fn is_verbal(self) -> bool {
        VERBAL_POS.has(self)
    }
}

impl Dep {
    /// Category of this label in [`LABEL_TABLE`]; `None` for `ROOT` and for
    /// labels that only appear in the derived sets (`npmod`).
    pub fn category(self) -> Option<Category> {
        LABEL_INDEX.get(&self).map(|entry| entry.category)
    }

    /// Short description from [`LABEL_TABLE`].
    pub fn description(self) -> Option<&'static str> {
        LABEL_INDEX.get(&self).map(|entry| entry.description)
    }
}

pub const NOMINAL_POS: PosSet = PosSet::NOUN.union(PosSet::PROPN);
pub const VERBAL_POS: PosSet = PosSet::VERB.union(PosSet::AUX);

/// Syntactic category a dependency label belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Prep,
    Neg,
    Conj,
    Det,
    Entity,
    Clausal,
    Comp,
    Pretag,
    Cond,
    Adj,
    Num,
}

impl Category {
    pub const ALL: &'static [Category] = &[
        Category::Prep,
        Category::Neg,
        Category::Conj,
        Category::Det,
        Category::Entity,
        Category::Clausal,
        Category::Comp,
        Category::Pretag,
        Category::Cond,
        Category::Adj,
        Category::Num,
    ];

    /// All labels of this category. `Neg` is a declared category with no
    /// members: `neg` itself is filed under `Pretag`.
    pub fn labels(self) -> DepSet {
        BY_CATEGORY.get(&self).copied().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LabelInfo {
    pub dep: Dep,
    pub description: &'static str,
    pub category: Category,
}

const fn info(dep: Dep, description: &'static str, category: Category) -> LabelInfo {
    LabelInfo { dep, description, category }
}

/// English dependency labels with their category.
pub static LABEL_TABLE: &[LabelInfo] = &[
    info(Dep::Acl, "clausal modifier of noun", Category::Clausal),
    info(Dep::Acomp, "adjectival complement", Category::Comp),
    info(Dep::Advcl, "adverbial clausal modifier", Category::Clausal),
    info(Dep::Advmod, "adverbial modifier", Category::Pretag),
    info(Dep::Agent, "agent", Category::Prep),
    info(Dep::Amod, "adjectival modifier", Category::Adj),
    info(Dep::Appos, "appositional modifier", Category::Comp),
    info(Dep::Attr, "attribute", Category::Entity),
    info(Dep::Aux, "auxiliary", Category::Pretag),
    info(Dep::Auxpass, "passive auxiliary", Category::Pretag),
    info(Dep::Case, "case marking", Category::Cond),
    info(Dep::Cc, "coordinating conjunction", Category::Pretag),
    info(Dep::Ccomp, "clausal complement", Category::Clausal),
    info(Dep::Compound, "compound", Category::Comp),
    info(Dep::Conj, "conjunct", Category::Conj),
    info(Dep::Cop, "copula", Category::Cond),
    info(Dep::Csubj, "clausal subject", Category::Clausal),
    info(Dep::Csubjpass, "clausal passive subject", Category::Clausal),
    info(Dep::Dative, "dative", Category::Entity),
    info(Dep::Dep, "dependent", Category::Cond),
    info(Dep::Det, "determiner", Category::Det),
    info(Dep::Dobj, "direct object", Category::Entity),
    info(Dep::Expl, "expletive", Category::Cond),
    info(Dep::Intj, "interjection", Category::Cond),
    info(Dep::Mark, "marker", Category::Pretag),
    info(Dep::Meta, "meta modifier", Category::Cond),
    info(Dep::Neg, "negation modifier", Category::Pretag),
    info(Dep::Nmod, "nominal modifier", Category::Cond),
    info(Dep::Npadvmod, "noun phrase as adverbial modifier", Category::Cond),
    info(Dep::Nsubj, "nominal subject", Category::Entity),
    info(Dep::Nsubjpass, "passive nominal subject", Category::Entity),
    info(Dep::Nummod, "numeric modifier", Category::Num),
    info(Dep::Oprd, "object predicate", Category::Cond),
    info(Dep::Parataxis, "parataxal clausal side by side", Category::Clausal),
    info(Dep::Pcomp, "prepositional clausal complement", Category::Clausal),
    info(Dep::Pobj, "object of preposition", Category::Entity),
    info(Dep::Poss, "possession modifier", Category::Adj),
    info(Dep::Preconj, "pre-correlative conjunction", Category::Det),
    info(Dep::Predet, "predeterminer", Category::Det),
    info(Dep::Prep, "prepositional modifier", Category::Prep),
    info(Dep::Prt, "particle", Category::Pretag),
    info(Dep::Punct, "punctuation", Category::Cond),
    info(Dep::Quantmod, "quantifier modifier", Category::Cond),
    info(Dep::Relcl, "relative clausal modifier", Category::Clausal),
    info(Dep::Xcomp, "open clausal complement", Category::Clausal),
];

static LABEL_INDEX: Lazy<HashMap<Dep, LabelInfo>> =
    Lazy::new(|| LABEL_TABLE.iter().map(|entry| (entry.dep, *entry)).collect());

static BY_CATEGORY: Lazy<HashMap<Category, DepSet>> = Lazy::new(|| {
    let mut map: HashMap<Category, DepSet> = Category::ALL.iter().map(|c| (*c, DepSet::empty())).collect();
    for entry in LABEL_TABLE {
        *map.entry(entry.category).or_default() |= entry.dep.set();
    }
    map
});

// Alternative grouping into subject / object / indirect object / supplementary.

pub const SUBJECT_LABELS: DepSet = DepSet::NSUBJ
    .union(DepSet::NSUBJPASS)
    .union(DepSet::CSUBJ)
    .union(DepSet::CSUBJPASS)
    .union(DepSet::EXPL);

pub const OBJECT_LABELS: DepSet = DepSet::DOBJ
    .union(DepSet::POBJ)
    .union(DepSet::ATTR)
    .union(DepSet::CCOMP)
    .union(DepSet::ACOMP)
    .union(DepSet::XCOMP)
    .union(DepSet::OPRD);

pub const INDIRECT_OBJECT_LABELS: DepSet = DepSet::DATIVE.union(DepSet::NPADVMOD);

pub const SUPPLEMENTARY_LABELS: DepSet = DepSet::ACL
    .union(DepSet::ADVCL)
    .union(DepSet::ADVMOD)
    .union(DepSet::AGENT)
    .union(DepSet::AMOD)
    .union(DepSet::APPOS)
    .union(DepSet::ATTR)
    .union(DepSet::AUX)
    .union(DepSet::AUXPASS)
    .union(DepSet::CASE)
    .union(DepSet::CC)
    .union(DepSet::CCOMP)
    .union(DepSet::COMPOUND)
    .union(DepSet::CONJ)
    .union(DepSet::COP)
    .union(DepSet::DATIVE)
    .union(DepSet::DEP)
    .union(DepSet::DET)
    .union(DepSet::EXPL)
    .union(DepSet::INTJ)
    .union(DepSet::MARK)
    .union(DepSet::META)
    .union(DepSet::NEG)
    .union(DepSet::NMOD)
    .union(DepSet::NPMOD)
    .union(DepSet::NUMMOD)
    .union(DepSet::OPRD)
    .union(DepSet::PARATAXIS)
    .union(DepSet::PCOMP)
    .union(DepSet::POSS)
    .union(DepSet::PRECONJ)
    .union(DepSet::PREDET)
    .union(DepSet::PREP)
    .union(DepSet::PRT)
    .union(DepSet::PUNCT)
    .union(DepSet::QUANTMOD)
    .union(DepSet::RELCL)
    .union(DepSet::XCOMP);
