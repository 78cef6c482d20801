//! Trigger scanning (tree pre-classification).
//!
//! Before a merge step runs, the current tree is scanned once for coarse
//! signals that let the pipeline skip rules that cannot match:
//!
//! - **Labels** (`DepSet`): every dependency label present in the tree.
//!   Matched against `MergeRule::requires` (any of them must be present).
//! - **Features** (`FeatureMask`): booleans such as "has a token with
//!   digits" or "has a `¦` math marker". Matched against
//!   `MergeRule::features` (all of them must be present).
//!
//! False positives are fine: a rule that passes the gate still has to find
//! its pattern. False negatives are not, so keep each feature a plain
//! superset of what the rules using it look for.

use crate::SentenceTree;
use crate::labels::{DepSet, Pos};

bitflags::bitflags! {
    /// Coarse features of a tree used for rule gating.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FeatureMask: u32 {
        const HAS_DIGITS       = 1 << 0;
        const HAS_MATH_MARKER  = 1 << 1;
        const HAS_PUNCT        = 1 << 2;
        const HAS_NOMINAL      = 1 << 3;
        const HAS_VERB         = 1 << 4;
        const HAS_OF           = 1 << 5;
    }
}

/// Marker that opens and closes an inline math expression.
pub const MATH_MARKER: &str = "¦";

/// Signals detected on one tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerInfo {
    pub features: FeatureMask,
    pub labels: DepSet,
}

impl TriggerInfo {
    pub fn scan(tree: &SentenceTree) -> Self {
        let mut features = FeatureMask::empty();
        let mut labels = DepSet::empty();

        for token in tree.tokens() {
            labels |= token.dep.set();
            if token.text.bytes().any(|b| b.is_ascii_digit()) {
                features |= FeatureMask::HAS_DIGITS;
            }
            if token.text.contains(MATH_MARKER) {
                features |= FeatureMask::HAS_MATH_MARKER;
            }
            match token.pos {
                Pos::Punct => features |= FeatureMask::HAS_PUNCT,
                Pos::Noun | Pos::Propn => features |= FeatureMask::HAS_NOMINAL,
                Pos::Verb => features |= FeatureMask::HAS_VERB,
                _ => {}
            }
            if token.text == "of" {
                features |= FeatureMask::HAS_OF;
            }
        }

        TriggerInfo { features, labels }
    }

    /// Whether a rule with these requirements may produce candidates.
    pub fn admits(&self, requires: DepSet, features: FeatureMask) -> bool {
        (requires.is_empty() || self.labels.intersects(requires)) && self.features.contains(features)
    }
}
