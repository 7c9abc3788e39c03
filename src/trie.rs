//! trie.rs – prefix tree over the registered pattern set.
//!
//! One node per matched prefix; terminal nodes carry the replacement text
//! for the pattern ending there. Built once, read-only afterwards: the
//! `Rewriter` only ever calls [`PatternTrie::step`] and
//! [`PatternTrie::replacement`] during a scan.

use std::collections::HashMap;
use std::fmt;

/// Handle to a node inside a [`PatternTrie`] arena.
///
/// Only meaningful for the trie that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

#[derive(Debug, Default, Clone)]
struct Node {
    children: HashMap<char, NodeId>,
    replacement: Option<Box<str>>,
}

/// Prefix tree mapping pattern strings to their replacement text.
///
/// Nodes live in a flat arena indexed by [`NodeId`]; the root is the empty
/// prefix and is never a match site. Registering the same pattern twice
/// keeps the later replacement (last write wins). An empty pattern sets the
/// replacement on the root itself, which the scanner never commits at, so
/// it is accepted but has no observable effect on rewriting.
#[derive(Debug, Clone)]
pub struct PatternTrie {
    nodes: Vec<Node>,
    patterns: usize,
}

impl PatternTrie {
    /// The empty-prefix node every scan starts from.
    pub const ROOT: NodeId = NodeId(0);

    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            patterns: 0,
        }
    }

    /// Build a trie from an ordered sequence of `(pattern, replacement)`
    /// pairs. Later entries overwrite earlier ones for identical patterns.
    pub fn from_pairs<I, P, R>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (P, R)>,
        P: AsRef<str>,
        R: AsRef<str>,
    {
        let mut trie = Self::new();
        for (old, new) in pairs {
            trie.insert(old.as_ref(), new.as_ref());
        }
        trie
    }

    /// Register one pattern, walking/creating a node per char.
    pub fn insert(&mut self, pattern: &str, replacement: &str) {
        let mut current = Self::ROOT;
        for c in pattern.chars() {
            let existing = self.nodes[current.0 as usize].children.get(&c).copied();
            current = match existing {
                Some(child) => child,
                None => {
                    let child = NodeId(self.nodes.len() as u32);
                    self.nodes.push(Node::default());
                    self.nodes[current.0 as usize].children.insert(c, child);
                    child
                }
            };
        }
        let node = &mut self.nodes[current.0 as usize];
        if node.replacement.is_none() {
            self.patterns += 1;
        }
        node.replacement = Some(replacement.into());
    }

    /// Follow the edge for one text unit, if it exists.
    #[inline]
    pub fn step(&self, from: NodeId, unit: char) -> Option<NodeId> {
        self.nodes[from.0 as usize].children.get(&unit).copied()
    }

    /// Replacement text if `node` terminates a registered pattern.
    #[inline]
    pub fn replacement(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.0 as usize].replacement.as_deref()
    }

    /// Number of distinct registered patterns (duplicates counted once).
    pub fn pattern_count(&self) -> usize {
        self.patterns
    }

    /// True when no pattern can ever match (root has no outgoing edges).
    /// A registered empty pattern still leaves this true.
    pub fn is_inert(&self) -> bool {
        self.nodes[Self::ROOT.0 as usize].children.is_empty()
    }

    /// Edge labels leaving the root — the set of chars any match can start
    /// with. Used by the prefilter.
    pub(crate) fn root_edges(&self) -> impl Iterator<Item = char> + '_ {
        self.nodes[Self::ROOT.0 as usize].children.keys().copied()
    }

    fn fmt_node(&self, node: NodeId, depth: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut edges: Vec<_> = self.nodes[node.0 as usize].children.iter().collect();
        edges.sort_by_key(|(c, _)| **c);
        for (c, &child) in edges {
            for _ in 0..depth {
                f.write_str("  ")?;
            }
            match self.replacement(child) {
                Some(rep) => writeln!(f, "{c}: {rep}")?,
                None => writeln!(f, "{c}")?,
            }
            self.fmt_node(child, depth + 1, f)?;
        }
        Ok(())
    }
}

impl Default for PatternTrie {
    fn default() -> Self {
        Self::new()
    }
}

/// Indented debug dump: one edge per line, terminal edges annotated with
/// their replacement.
impl fmt::Display for PatternTrie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(Self::ROOT, 0, f)
    }
}
