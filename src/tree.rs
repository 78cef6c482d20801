//! Sentence tree: an arena of tokens indexed by position.
//!
//! Every token stores only its `head` index. The `children` lists and the
//! per-token depth are derived once when a snapshot is built and cached on it;
//! a published `SentenceTree` is never mutated. Transformations (merges,
//! payload updates) assemble a new token vector and build a new snapshot.
//!
//! ## Invariants
//!
//! Checked by [`SentenceTree::new`] and preserved by every transformation:
//!
//! 1. exactly one token is labeled `ROOT`, and it is its own head;
//! 2. following `head` from any token reaches ROOT (no cycles);
//! 3. positions are contiguous `0..n` in surface order;
//! 4. `children` of every token are sorted by position.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::TreeError;
use crate::labels::{Dep, DepSet, Pos};

/// One word of a sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub position: usize,
    pub text: String,
    pub lemma: String,
    /// Fine-grained tag (e.g. `NN`), may be empty.
    pub tag: String,
    pub pos: Pos,
    pub dep: Dep,
    /// Position of the head token; ROOT points at itself.
    pub head: usize,
    /// Named-entity type, may be empty.
    pub ent_type: String,
    /// Whether the token is followed by a space in the surface text.
    pub whitespace: bool,
    /// The token stands in for a marked math expression.
    pub is_math: bool,
    /// Original text of the math expression when `is_math` is set.
    pub math: String,
}

impl Token {
    pub fn new(position: usize, text: impl Into<String>, pos: Pos, dep: Dep, head: usize) -> Self {
        let text = text.into();
        Token {
            position,
            lemma: text.clone(),
            text,
            tag: String::new(),
            pos,
            dep,
            head,
            ent_type: String::new(),
            whitespace: true,
            is_math: false,
            math: String::new(),
        }
    }

    pub fn with_whitespace(mut self, whitespace: bool) -> Self {
        self.whitespace = whitespace;
        self
    }

    pub fn with_lemma(mut self, lemma: impl Into<String>) -> Self {
        self.lemma = lemma.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }
}

/// An immutable, validated dependency tree over one sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceTree {
    tokens: Vec<Token>,
    children: Vec<Vec<usize>>,
    depths: Vec<usize>,
    root: usize,
}

impl SentenceTree {
    /// Validate `tokens` and build a tree snapshot.
    pub fn new(tokens: Vec<Token>) -> Result<Self, TreeError> {
        let root = check_shape(&tokens)?;
        let (children, depths) = derive_index(&tokens, root);
        if let Some(position) = depths.iter().position(|d| d.is_none()) {
            return Err(TreeError::Cycle { position });
        }
        let depths = depths.into_iter().map(|d| d.unwrap_or_default()).collect();
        Ok(SentenceTree { tokens, children, depths, root })
    }

    /// Build a snapshot from tokens produced by a tree-preserving
    /// transformation. Skips validation outside debug builds.
    pub(crate) fn rebuild(tokens: Vec<Token>) -> Self {
        debug_assert!(check_shape(&tokens).is_ok(), "transformation broke the tree shape");
        let root = tokens.iter().position(|t| t.head == t.position).unwrap_or_default();
        let (children, depths) = derive_index(&tokens, root);
        debug_assert!(depths.iter().all(Option::is_some), "transformation introduced a head cycle");
        let depths = depths.into_iter().map(|d| d.unwrap_or_default()).collect();
        SentenceTree { tokens, children, depths, root }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always false for a validated tree; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    pub fn get(&self, position: usize) -> Option<TokenRef<'_>> {
        (position < self.tokens.len()).then_some(TokenRef { tree: self, index: position })
    }

    /// Token at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position >= self.len()`, like slice indexing.
    pub fn at(&self, position: usize) -> TokenRef<'_> {
        assert!(position < self.tokens.len(), "position {position} out of bounds for a {}-token tree", self.len());
        TokenRef { tree: self, index: position }
    }

    pub fn root(&self) -> TokenRef<'_> {
        TokenRef { tree: self, index: self.root }
    }

    /// All tokens in sentence order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = TokenRef<'_>> + ExactSizeIterator {
        (0..self.tokens.len()).map(move |index| TokenRef { tree: self, index })
    }

    /// Labels that occur anywhere in the tree.
    pub fn labels(&self) -> DepSet {
        self.tokens.iter().map(|t| t.dep).collect()
    }

    /// Surface text of the whole sentence, honoring each token's whitespace.
    pub fn text(&self) -> String {
        self.surface(0, self.tokens.len())
    }

    /// Surface text of `[start, end)`; the trailing whitespace of the last
    /// token is dropped. Out-of-range bounds are clamped.
    pub fn surface(&self, start: usize, end: usize) -> String {
        let end = end.min(self.tokens.len());
        let mut out = String::new();
        for (offset, token) in self.tokens[start.min(end)..end].iter().enumerate() {
            out.push_str(&token.text);
            if token.whitespace && start + offset + 1 < end {
                out.push(' ');
            }
        }
        out
    }

    /// Indented ASCII rendering, one token per line:
    ///
    /// ```text
    /// +--fallen|VERB (ROOT|7)
    ///     +--apple of the apple tree|NOUN (nsubjpass|4)
    ///     |   +--The|DET (det|0)
    /// ```
    pub fn tree_view(&self) -> String {
        let mut out = String::new();
        self.write_branch(self.root, "", true, &mut out);
        out
    }

    fn write_branch(&self, index: usize, prefix: &str, last: bool, out: &mut String) {
        let token = &self.tokens[index];
        out.push_str(&format!("{prefix}+--{}|{} ({}|{})\n", token.text, token.pos, token.dep, token.position));
        let prefix = format!("{prefix}{}   ", if last { " " } else { "|" });
        let kids = &self.children[index];
        for (n, child) in kids.iter().enumerate() {
            self.write_branch(*child, &prefix, n + 1 == kids.len(), out);
        }
    }

    /// Decode a tree from JSON: either an array of token records or an object
    /// with a `tokens` array. Each record carries `text`, `pos`, `dep` and
    /// `head`, and optionally `i`, `lemma`, `tag`, `ws`, `ent_type`,
    /// `is_math`, `math`.
    pub fn from_json(input: &str) -> Result<Self, TreeError> {
        let value: serde_json::Value = serde_json::from_str(input).map_err(|e| TreeError::Json(e.to_string()))?;
        let records = match value {
            serde_json::Value::Object(mut map) => map.remove("tokens").unwrap_or(serde_json::Value::Null),
            other => other,
        };
        let records: Vec<TokenRecord> =
            serde_json::from_value(records).map_err(|e| TreeError::Json(e.to_string()))?;

        let mut tokens = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            if let Some(position) = record.i.filter(|i| *i != index) {
                return Err(TreeError::NonContiguous { index, position });
            }
            tokens.push(record.into_token(index));
        }
        SentenceTree::new(tokens)
    }

    /// Encode as `{"text": ..., "tokens": [...]}`.
    pub fn to_json(&self) -> String {
        let doc = DocumentOut { text: self.text(), tokens: self.tokens.iter().map(TokenRecord::from).collect() };
        serde_json::to_string(&doc).unwrap_or_default()
    }

    pub(crate) fn children_of(&self, index: usize) -> &[usize] {
        &self.children[index]
    }

    pub(crate) fn depth_of(&self, index: usize) -> usize {
        self.depths[index]
    }
}

impl fmt::Display for SentenceTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Returns the ROOT index if the flat shape (positions, heads, root) is sound.
fn check_shape(tokens: &[Token]) -> Result<usize, TreeError> {
    if tokens.is_empty() {
        return Err(TreeError::Empty);
    }
    let n = tokens.len();
    let mut roots = Vec::new();
    for (index, token) in tokens.iter().enumerate() {
        if token.position != index {
            return Err(TreeError::NonContiguous { index, position: token.position });
        }
        if token.head >= n {
            return Err(TreeError::DanglingHead { position: index, head: token.head });
        }
        match (token.head == index, token.dep == Dep::Root) {
            (true, true) => roots.push(index),
            (true, false) => {
                return Err(TreeError::SelfHeadedNonRoot { position: index, label: token.dep.to_string() });
            }
            (false, true) => return Err(TreeError::HeadedRoot { position: index, head: token.head }),
            (false, false) => {}
        }
    }
    match roots.as_slice() {
        [] => Err(TreeError::NoRoot),
        [root] => Ok(*root),
        _ => Err(TreeError::MultipleRoots { positions: roots }),
    }
}

/// Children lists (sorted, since tokens are visited in order) and depths from
/// a breadth-first pass over ROOT. Tokens on a head cycle are never reached
/// and keep `None`.
fn derive_index(tokens: &[Token], root: usize) -> (Vec<Vec<usize>>, Vec<Option<usize>>) {
    let mut children = vec![Vec::new(); tokens.len()];
    for token in tokens {
        if token.position != root && token.head < tokens.len() {
            children[token.head].push(token.position);
        }
    }

    let mut depths = vec![None; tokens.len()];
    let mut queue = VecDeque::from([(root, 0usize)]);
    while let Some((index, depth)) = queue.pop_front() {
        if depths[index].is_some() {
            continue;
        }
        depths[index] = Some(depth);
        queue.extend(children[index].iter().map(|c| (*c, depth + 1)));
    }
    (children, depths)
}

/// A borrowed handle to one token of a tree, used by every traversal.
#[derive(Clone, Copy)]
pub struct TokenRef<'t> {
    tree: &'t SentenceTree,
    index: usize,
}

impl<'t> TokenRef<'t> {
    /// Position in the sentence.
    pub fn i(self) -> usize {
        self.index
    }

    pub fn tree(self) -> &'t SentenceTree {
        self.tree
    }

    pub fn token(self) -> &'t Token {
        &self.tree.tokens[self.index]
    }

    pub fn text(self) -> &'t str {
        &self.token().text
    }

    pub fn pos(self) -> Pos {
        self.token().pos
    }

    pub fn dep(self) -> Dep {
        self.token().dep
    }

    pub fn head(self) -> TokenRef<'t> {
        TokenRef { tree: self.tree, index: self.token().head }
    }

    pub fn is_root(self) -> bool {
        self.index == self.tree.root
    }

    pub fn is_punct(self) -> bool {
        self.pos() == Pos::Punct
    }

    /// Number of head steps to ROOT.
    pub fn depth(self) -> usize {
        self.tree.depth_of(self.index)
    }

    /// Children in sentence order.
    pub fn children(self) -> impl DoubleEndedIterator<Item = TokenRef<'t>> + ExactSizeIterator {
        let tree = self.tree;
        tree.children_of(self.index).iter().map(move |c| TokenRef { tree, index: *c })
    }

    /// Lowest position in the subtree rooted here.
    pub fn left_edge(self) -> usize {
        self.subtree_bounds().0
    }

    /// Highest position in the subtree rooted here.
    pub fn right_edge(self) -> usize {
        self.subtree_bounds().1
    }

    fn subtree_bounds(self) -> (usize, usize) {
        let mut bounds = (self.index, self.index);
        let mut stack = vec![self.index];
        while let Some(index) = stack.pop() {
            bounds.0 = bounds.0.min(index);
            bounds.1 = bounds.1.max(index);
            stack.extend_from_slice(self.tree.children_of(index));
        }
        bounds
    }
}

impl PartialEq for TokenRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl Eq for TokenRef<'_> {}

impl fmt::Debug for TokenRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.text(), self.index)
    }
}

impl fmt::Display for TokenRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

// --- JSON records -------------------------------------------------------------

fn default_ws() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize)]
struct TokenRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    i: Option<usize>,
    text: String,
    #[serde(default)]
    lemma: String,
    pos: Pos,
    #[serde(default)]
    tag: String,
    dep: Dep,
    head: usize,
    #[serde(default = "default_ws")]
    ws: bool,
    #[serde(default)]
    ent_type: String,
    #[serde(default)]
    is_math: bool,
    #[serde(default)]
    math: String,
}

impl TokenRecord {
    fn into_token(self, position: usize) -> Token {
        let lemma = if self.lemma.is_empty() { self.text.clone() } else { self.lemma };
        Token {
            position,
            text: self.text,
            lemma,
            tag: self.tag,
            pos: self.pos,
            dep: self.dep,
            head: self.head,
            ent_type: self.ent_type,
            whitespace: self.ws,
            is_math: self.is_math,
            math: self.math,
        }
    }
}

impl From<&Token> for TokenRecord {
    fn from(token: &Token) -> Self {
        TokenRecord {
            i: Some(token.position),
            text: token.text.clone(),
            lemma: token.lemma.clone(),
            pos: token.pos,
            tag: token.tag.clone(),
            dep: token.dep,
            head: token.head,
            ws: token.whitespace,
            ent_type: token.ent_type.clone(),
            is_math: token.is_math,
            math: token.math.clone(),
        }
    }
}

#[derive(Serialize)]
struct DocumentOut {
    text: String,
    tokens: Vec<TokenRecord>,
}
