//! Prefix trie for title autocompletion
//!
//! Stores lower-cased strings and answers "which stored strings extend this
//! prefix". The trie carries no payload - callers re-resolve returned titles
//! against the catalog. There is no delete operation: the catalog rebuilds a
//! fresh trie on every mutation instead of removing stale entries.

use std::collections::HashMap;

/// One node of the trie: children keyed by character, plus a marker for
/// paths that form a complete stored word.
#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<char, TrieNode>,
    terminal: bool,
}

/// Prefix tree over lower-cased strings
#[derive(Debug, Default)]
pub struct PrefixTrie {
    root: TrieNode,
}

impl PrefixTrie {
    /// Create an empty trie
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a word, lower-casing it first.
    ///
    /// Duplicate inserts are a no-op beyond re-marking the terminal node.
    /// Empty input is ignored (the empty prefix stays navigable, but `""`
    /// is never reported as a stored word).
    pub fn insert(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }

        let mut node = &mut self.root;
        for c in word.to_lowercase().chars() {
            node = node.children.entry(c).or_default();
        }
        node.terminal = true;
    }

    /// All stored words that start with `prefix` (case-insensitive).
    ///
    /// Returns an empty vec when no stored word extends the prefix. The
    /// prefix itself is included when it was inserted as a whole word.
    /// Result order follows child iteration order and is unspecified;
    /// callers must not rely on it.
    pub fn search_by_prefix(&self, prefix: &str) -> Vec<String> {
        let lowered = prefix.to_lowercase();

        let mut node = &self.root;
        for c in lowered.chars() {
            match node.children.get(&c) {
                Some(child) => node = child,
                None => return Vec::new(),
            }
        }

        let mut results = Vec::new();
        let mut buffer = lowered;
        collect_words(node, &mut buffer, &mut results);
        results
    }
}

/// Depth-first walk below `node`, pushing every terminal path into `results`
fn collect_words(node: &TrieNode, buffer: &mut String, results: &mut Vec<String>) {
    if node.terminal {
        results.push(buffer.clone());
    }

    for (c, child) in &node.children {
        buffer.push(*c);
        collect_words(child, buffer, results);
        buffer.pop();
    }
}
