use std::collections::HashMap;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Append-only mapping from token to column index
/// Indices are dense, start at 0 and follow first insertion order.
/// A token's index never changes once assigned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vocabulary {
    tokens: IndexSet<Box<str>>,
}

impl Vocabulary {
    /// Create a new empty vocabulary
    pub fn new() -> Self {
        Self::default()
    }

    /// Column index of a token, assigning the next one if unseen
    #[inline]
    pub fn get_or_insert(&mut self, token: &str) -> usize {
        match self.tokens.get_index_of(token) {
            Some(index) => index,
            None => self.tokens.insert_full(token.into()).0,
        }
    }

    /// Column index of a token
    #[inline]
    pub fn get(&self, token: &str) -> Option<usize> {
        self.tokens.get_index_of(token)
    }

    /// Token at a column index
    #[inline]
    pub fn token(&self, index: usize) -> Option<&str> {
        self.tokens.get_index(index).map(|token| &**token)
    }

    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    /// Number of columns
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate `(token, index)` in index order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.tokens
            .iter()
            .enumerate()
            .map(|(index, token)| (&**token, index))
    }

    /// Snapshot as an unordered map
    pub fn to_hashmap(&self) -> HashMap<String, usize> {
        self.iter()
            .map(|(token, index)| (token.to_string(), index))
            .collect()
    }

    /// Forget every token
    pub fn clear(&mut self) {
        self.tokens.clear();
    }
}
