//! Read-only traversal primitives over a [`SentenceTree`](crate::SentenceTree).
//!
//! Every function takes a [`TokenRef`] and, where it makes sense, a `skip` set
//! of dependency labels. Skipping *prunes*: a child whose label is in `skip`
//! is dropped together with its whole subtree. Results are ordered by
//! position unless a function says otherwise.
//!
//! ```text
//! +--was|AUX (ROOT|12)
//!     +--Revolution|PROPN (nsubj|2)        ancestors(processes)   = [was, period, towards]
//!     +--period|NOUN (attr|14)             left_siblings(towards) = [a, of]
//!     |   +--a|DET (det|13)                precedings(towards)    = [a, period, of, ..., economy]
//!     |   +--of|ADP (prep|15) ...
//!     |   +--towards|ADP (prep|21)
//!     |       +--processes|NOUN (pobj|29)
//! ```

use crate::labels::DepSet;
use crate::tree::TokenRef;

/// ROOT of the tree `token` belongs to.
pub fn root(token: TokenRef<'_>) -> TokenRef<'_> {
    token.tree().root()
}

/// Head, grand-head, ... up to ROOT, in ascending position. Empty for ROOT.
pub fn ancestors(token: TokenRef<'_>) -> Vec<TokenRef<'_>> {
    let mut out = Vec::new();
    let mut current = token;
    while !current.is_root() {
        current = current.head();
        out.push(current);
    }
    out.sort_by_key(|t| t.i());
    out
}

pub fn ancestors_and_self(token: TokenRef<'_>) -> Vec<TokenRef<'_>> {
    let mut out = ancestors(token);
    out.push(token);
    out.sort_by_key(|t| t.i());
    out
}

/// ROOT down to `token` (inclusive), in head-chain order.
pub fn path_to_root(token: TokenRef<'_>) -> Vec<TokenRef<'_>> {
    let mut out = vec![token];
    let mut current = token;
    while !current.is_root() {
        current = current.head();
        out.push(current);
    }
    out.reverse();
    out
}

/// Direct children whose label is not in `skip`.
pub fn children(token: TokenRef<'_>, skip: DepSet) -> Vec<TokenRef<'_>> {
    token.children().filter(|c| !skip.has(c.dep())).collect()
}

/// Every token under `token`, pruning subtrees whose label is in `skip`.
pub fn descendants(token: TokenRef<'_>, skip: DepSet) -> Vec<TokenRef<'_>> {
    let mut out: Vec<_> = walk(token, None, skip).skip(1).collect();
    out.sort_by_key(|t| t.i());
    out
}

pub fn descendants_and_self(token: TokenRef<'_>, skip: DepSet) -> Vec<TokenRef<'_>> {
    let mut out: Vec<_> = walk(token, None, skip).collect();
    out.sort_by_key(|t| t.i());
    out
}

pub fn left_descendants(token: TokenRef<'_>, skip: DepSet) -> Vec<TokenRef<'_>> {
    descendants(token, skip).into_iter().filter(|d| d.i() < token.i()).collect()
}

pub fn right_descendants(token: TokenRef<'_>, skip: DepSet) -> Vec<TokenRef<'_>> {
    descendants(token, skip).into_iter().filter(|d| d.i() > token.i()).collect()
}

/// Children of `token`'s head positioned before `token`. Empty for ROOT.
pub fn left_siblings(token: TokenRef<'_>, skip: DepSet) -> Vec<TokenRef<'_>> {
    if token.is_root() {
        return Vec::new();
    }
    children(token.head(), skip).into_iter().filter(|s| s.i() < token.i()).collect()
}

/// Children of `token`'s head positioned after `token`. Empty for ROOT.
pub fn right_siblings(token: TokenRef<'_>, skip: DepSet) -> Vec<TokenRef<'_>> {
    if token.is_root() {
        return Vec::new();
    }
    children(token.head(), skip).into_iter().filter(|s| s.i() > token.i()).collect()
}

/// The pruned subtrees of `token`'s left siblings plus its head. Empty for
/// ROOT.
pub fn precedings(token: TokenRef<'_>, skip: DepSet) -> Vec<TokenRef<'_>> {
    if token.is_root() {
        return Vec::new();
    }
    let mut out: Vec<_> =
        left_siblings(token, skip).into_iter().flat_map(|sibling| descendants_and_self(sibling, skip)).collect();
    out.push(token.head());
    out.sort_by_key(|t| t.i());
    out
}

/// Tokens reached by a pruned pre-order walk from ROOT that sit before
/// `token` in the sentence.
pub fn root_precedings(token: TokenRef<'_>, skip: DepSet) -> Vec<TokenRef<'_>> {
    let mut out: Vec<_> = walk(root(token), Some(token), skip).filter(|t| t.i() < token.i()).collect();
    out.sort_by_key(|t| t.i());
    out
}

/// Lazy pre-order walk from `start`, children in position order, pruning
/// labels in `skip` below `start`. The walk ends for good when it reaches
/// `stop` (which is not yielded). Call [`walk`] again for a fresh pass.
pub fn walk<'t>(start: TokenRef<'t>, stop: Option<TokenRef<'t>>, skip: DepSet) -> Walk<'t> {
    Walk { stack: vec![start], stop, skip }
}

#[derive(Debug, Clone)]
pub struct Walk<'t> {
    stack: Vec<TokenRef<'t>>,
    stop: Option<TokenRef<'t>>,
    skip: DepSet,
}

impl<'t> Iterator for Walk<'t> {
    type Item = TokenRef<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.stack.pop()?;
        if self.stop == Some(token) {
            self.stack.clear();
            return None;
        }
        let skip = self.skip;
        self.stack.extend(token.children().rev().filter(|c| !skip.has(c.dep())));
        Some(token)
    }
}

impl std::iter::FusedIterator for Walk<'_> {}
