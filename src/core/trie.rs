// --- File: src/core/trie.rs
use crate::core::types::GlyphId;
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct TrieNode {
    children: HashMap<u8, usize>,
    glyph_id: Option<GlyphId>,
}

impl TrieNode {
    fn new() -> Self {
        Self { children: HashMap::new(), glyph_id: None }
    }
}

/// A byte-keyed trie over glyph symbols, stored as a flat node arena.
/// Built once by the index builder and only read afterwards.
#[derive(Debug, Clone)]
pub struct GlyphTrie {
    nodes: Vec<TrieNode>,
}

impl Default for GlyphTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphTrie {
    pub fn new() -> Self {
        Self { nodes: vec![TrieNode::new()] }
    }

    /// Maps `key` to `glyph_id`, replacing any previous id for the same key.
    /// O(k) where k is the key length in bytes.
    pub fn insert(&mut self, key: &str, glyph_id: GlyphId) {
        let mut node_idx = 0;
        for &byte in key.as_bytes() {
            node_idx = match self.nodes[node_idx].children.get(&byte) {
                Some(&next) => next,
                None => {
                    let new_node_id = self.nodes.len();
                    self.nodes.push(TrieNode::new());
                    self.nodes[node_idx].children.insert(byte, new_node_id);
                    new_node_id
                }
            };
        }
        self.nodes[node_idx].glyph_id = Some(glyph_id);
    }

    /// The longest inserted key that is a prefix of `input`, as
    /// `(glyph_id, key length in bytes)`.
    ///
    /// Keys are whole strings, so the returned length always lands on a
    /// char boundary of `input`.
    pub fn longest_prefix(&self, input: &str) -> Option<(GlyphId, usize)> {
        let mut node_idx = 0;
        let mut best = None;
        for (depth, &byte) in input.as_bytes().iter().enumerate() {
            match self.nodes[node_idx].children.get(&byte) {
                Some(&next) => node_idx = next,
                None => break,
            }
            if let Some(id) = self.nodes[node_idx].glyph_id {
                best = Some((id, depth + 1));
            }
        }
        best
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
