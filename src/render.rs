//! Token sets to text.
//!
//! Rendering always goes by position, never by the order tokens were
//! collected in. Words are joined with one space; the surface spacing of the
//! sentence is only used by [`SentenceTree::surface`](crate::SentenceTree::surface).

use crate::labels::DepSet;
use crate::navigate;
use crate::tree::TokenRef;

/// Sort by position and join the token texts with a single space.
pub fn to_text(tokens: &[TokenRef<'_>]) -> String {
    let mut sorted = tokens.to_vec();
    sorted.sort_by_key(|t| t.i());
    sorted.iter().map(|t| t.text()).collect::<Vec<_>>().join(" ")
}

/// [`to_text`] for each group.
pub fn to_texts(groups: &[Vec<TokenRef<'_>>]) -> Vec<String> {
    groups.iter().map(|group| to_text(group)).collect()
}

/// Descendants of `token` (not `token` itself), pruning labels in `avoid`.
pub fn subtree_text(token: TokenRef<'_>, avoid: DepSet) -> String {
    to_text(&navigate::descendants(token, avoid))
}

/// The part of [`subtree_text`] left of `token`.
pub fn left_text(token: TokenRef<'_>, avoid: DepSet) -> String {
    to_text(&navigate::left_descendants(token, avoid))
}

/// The part of [`subtree_text`] right of `token`.
pub fn right_text(token: TokenRef<'_>, avoid: DepSet) -> String {
    to_text(&navigate::right_descendants(token, avoid))
}
