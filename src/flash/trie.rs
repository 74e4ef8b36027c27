use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Index of a node inside [`TokenTrie`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TrieNode {
    children: HashMap<Box<str>, NodeId>,
    /// set when the path to this node spells a complete keyword
    clean_name: Option<Box<str>>,
}

/// Trie over token sequences, stored as a node arena
/// Nodes are only ever appended, so a `NodeId` stays valid for the lifetime of
/// the trie and cloning the trie is a flat copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenTrie {
    nodes: Vec<TrieNode>,
    terms: usize,
}

impl Default for TokenTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenTrie {
    pub const ROOT: NodeId = NodeId(0);

    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            terms: 0,
        }
    }

    fn alloc(&mut self) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(TrieNode::default());
        id
    }

    /// Insert a keyword path
    /// Returns false if the path is empty or already a keyword, in which case
    /// the existing clean name is kept.
    pub fn insert<T>(&mut self, tokens: &[T], clean_name: &str) -> bool
    where
        T: AsRef<str>,
    {
        if tokens.is_empty() {
            return false;
        }
        let mut node = Self::ROOT;
        for token in tokens {
            let token = token.as_ref();
            node = match self.child(node, token) {
                Some(child) => child,
                None => {
                    let child = self.alloc();
                    self.nodes[node.index()].children.insert(token.into(), child);
                    child
                }
            };
        }
        let slot = &mut self.nodes[node.index()].clean_name;
        if slot.is_some() {
            return false;
        }
        *slot = Some(clean_name.into());
        self.terms += 1;
        true
    }

    #[inline]
    pub fn child(&self, node: NodeId, token: &str) -> Option<NodeId> {
        self.nodes[node.index()].children.get(token).copied()
    }

    #[inline]
    pub fn clean_name(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.index()].clean_name.as_deref()
    }

    /// Whether the token path is a complete keyword
    pub fn contains<T>(&self, tokens: &[T]) -> bool
    where
        T: AsRef<str>,
    {
        let mut node = Self::ROOT;
        for token in tokens {
            match self.child(node, token.as_ref()) {
                Some(child) => node = child,
                None => return false,
            }
        }
        !tokens.is_empty() && self.clean_name(node).is_some()
    }

    /// Longest keyword that is a prefix of `tokens`
    ///
    /// # Returns
    /// * `Option<(usize, &str)>` - tokens consumed and the keyword's clean name
    pub fn longest_match<'a, I>(&self, tokens: I) -> Option<(usize, &str)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut node = Self::ROOT;
        let mut longest = None;
        for (depth, token) in tokens.into_iter().enumerate() {
            match self.child(node, token) {
                Some(child) => node = child,
                None => break,
            }
            if let Some(name) = self.clean_name(node) {
                longest = Some((depth + 1, name));
            }
        }
        longest
    }

    /// Number of keywords
    #[inline]
    pub fn len(&self) -> usize {
        self.terms
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms == 0
    }
}
