//! prefilter.rs – byte-level skip ahead for the scan loop.
//!
//! While the cursor sits at the trie root, no match can start before the
//! next char whose first UTF-8 byte belongs to a root edge label. When the
//! root edges collapse to at most three distinct first bytes we can jump
//! there with memchr instead of stepping char by char. Candidate positions
//! are a superset of real match starts (distinct chars may share a first
//! byte), so the walk itself still decides — this is purely a fast path.

use memchr::{memchr, memchr2, memchr3};

use crate::trie::PatternTrie;

#[derive(Debug, Clone, Copy)]
pub(crate) enum Prefilter {
    One(u8),
    Two(u8, u8),
    Three(u8, u8, u8),
}

impl Prefilter {
    /// Derive a prefilter from the trie's root edges, if they are narrow
    /// enough to be worth it.
    pub(crate) fn for_trie(trie: &PatternTrie) -> Option<Self> {
        let mut bytes: Vec<u8> = Vec::with_capacity(4);
        for c in trie.root_edges() {
            let mut buf = [0u8; 4];
            let first = c.encode_utf8(&mut buf).as_bytes()[0];
            if !bytes.contains(&first) {
                if bytes.len() == 3 {
                    return None;
                }
                bytes.push(first);
            }
        }
        match bytes.as_slice() {
            [a] => Some(Self::One(*a)),
            [a, b] => Some(Self::Two(*a, *b)),
            [a, b, c] => Some(Self::Three(*a, *b, *c)),
            _ => None,
        }
    }

    /// Offset of the next candidate byte in `haystack`, if any.
    #[inline]
    pub(crate) fn find(&self, haystack: &[u8]) -> Option<usize> {
        match *self {
            Self::One(a) => memchr(a, haystack),
            Self::Two(a, b) => memchr2(a, b, haystack),
            Self::Three(a, b, c) => memchr3(a, b, c, haystack),
        }
    }
}
