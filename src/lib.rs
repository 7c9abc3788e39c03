//! Single-pass multi-pattern string replacement driven by a prefix trie.
//!
//! Build a [`PatternTrie`] (or a [`Rewriter`] directly) from a set of
//! `(pattern, replacement)` pairs, then rewrite any number of texts. All
//! patterns are matched in one left-to-right scan over the input, so no
//! earlier replacement's output is ever rescanned for later patterns, and
//! behavior stays well-defined when patterns are prefixes of one another
//! (the shorter pattern on a shared path wins — see [`rewriter`]).
//!
//! ```
//! use retrie::Rewriter;
//!
//! let rw = Rewriter::builder()
//!     .rule("interpreted", "magical")
//!     .rule("interactive", "amazing")
//!     .build();
//! let out = rw.rewrite("an interpreted, interactive language");
//! assert_eq!(out, "an magical, amazing language");
//! ```
//!
//! For one-off use there is [`rewrite_all`]:
//!
//! ```
//! assert_eq!(retrie::rewrite_all("ac", [("a", "b"), ("c", "d")]), "bd");
//! ```

mod prefilter;
pub mod rewriter;
pub mod trie;

pub use rewriter::{Rewriter, RewriterBuilder, RuleError, rewrite_all};
pub use trie::{NodeId, PatternTrie};
