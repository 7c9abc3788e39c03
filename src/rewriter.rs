//! rewriter.rs – the single-pass replacement scan.
//!
//! Walks the source text char by char while following edges in a
//! [`PatternTrie`]. A match commits at the *first* terminal node reached,
//! so among patterns sharing a prefix the shorter one wins — there is no
//! lookahead for a longer alternative. A dead prefix is abandoned wholesale:
//! scanning resumes after the unit that failed, never from the interior of
//! the attempt. Committed spans and replacement text are never rescanned.
//!
//! Output is accumulated as ordered segments (verbatim source slices
//! interleaved with replacement slices) and concatenated once, so the
//! borrowed input is returned untouched whenever nothing matched.

use std::borrow::Cow;

use smallvec::SmallVec;
use thiserror::Error;

use crate::prefilter::Prefilter;
use crate::trie::PatternTrie;

/// Rejected rule in the strict builder path.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    /// An empty pattern never matches anything; the lenient [`RewriterBuilder::build`]
    /// accepts it as a silent no-op, the strict path refuses it outright.
    #[error("empty pattern string can never match")]
    EmptyPattern,
}

/// Reusable multi-pattern replacer.
///
/// Owns an immutable [`PatternTrie`] plus a byte prefilter derived from its
/// root edges. One `Rewriter` can serve any number of concurrent
/// [`rewrite`](Self::rewrite) calls; no state survives a call.
///
/// ```
/// use retrie::Rewriter;
///
/// let rw = Rewriter::from_pairs([("Hello", "Goodbye"), ("world", "friend")]);
/// assert_eq!(rw.rewrite("Hello, world!"), "Goodbye, friend!");
/// ```
#[derive(Debug, Clone)]
pub struct Rewriter {
    trie: PatternTrie,
    prefilter: Option<Prefilter>,
}

impl Rewriter {
    pub fn new(trie: PatternTrie) -> Self {
        let prefilter = Prefilter::for_trie(&trie);
        Self { trie, prefilter }
    }

    /// Build directly from `(pattern, replacement)` pairs; later duplicates
    /// overwrite earlier ones.
    pub fn from_pairs<I, P, R>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (P, R)>,
        P: AsRef<str>,
        R: AsRef<str>,
    {
        Self::new(PatternTrie::from_pairs(pairs))
    }

    pub fn builder() -> RewriterBuilder {
        RewriterBuilder::default()
    }

    pub fn trie(&self) -> &PatternTrie {
        &self.trie
    }

    /// Replace every non-overlapping leftmost match in one pass.
    ///
    /// Returns `Cow::Borrowed(source)` when no match commits — empty rule
    /// set, no occurrence, or only a trailing partial match.
    pub fn rewrite<'a>(&self, source: &'a str) -> Cow<'a, str> {
        scan(&self.trie, self.prefilter, source)
    }
}

fn scan<'a>(trie: &PatternTrie, prefilter: Option<Prefilter>, source: &'a str) -> Cow<'a, str> {
    if trie.is_inert() {
        return Cow::Borrowed(source);
    }

    let bytes = source.as_bytes();
    let mut segments: SmallVec<[&str; 16]> = SmallVec::new();
    let mut segments_len = 0usize;
    // Trie cursor and the byte offset where the pending attempt began.
    let mut node = PatternTrie::ROOT;
    let mut match_start = 0usize;
    // Everything before `copied` has already been pushed as a segment.
    let mut copied = 0usize;
    let mut i = 0usize;

    while i < bytes.len() {
        if node == PatternTrie::ROOT {
            if let Some(pf) = prefilter {
                // Root-edge first bytes are never UTF-8 continuation bytes,
                // so a hit is always a char boundary.
                match pf.find(&bytes[i..]) {
                    Some(skip) => i += skip,
                    None => break,
                }
            }
            match_start = i;
        }
        let Some(c) = source[i..].chars().next() else {
            break;
        };
        let width = c.len_utf8();
        match trie.step(node, c) {
            Some(child) => match trie.replacement(child) {
                Some(rep) => {
                    // Commit: splice [match_start, i + width) out of the
                    // output and resume strictly after it.
                    let verbatim = &source[copied..match_start];
                    segments.push(verbatim);
                    segments.push(rep);
                    segments_len += verbatim.len() + rep.len();
                    copied = i + width;
                    node = PatternTrie::ROOT;
                }
                None => node = child,
            },
            // Dead prefix: abandon the whole attempt. The failed unit is
            // skipped too, not retried at the root.
            None => node = PatternTrie::ROOT,
        }
        i += width;
    }

    if copied == 0 {
        return Cow::Borrowed(source);
    }
    // Trailing partial match (if any) stays verbatim.
    let tail = &source[copied..];
    let mut out = String::with_capacity(segments_len + tail.len());
    for seg in &segments {
        out.push_str(seg);
    }
    out.push_str(tail);
    Cow::Owned(out)
}

/// One-shot convenience: build the trie and rewrite in a single call.
///
/// Prefer building a [`Rewriter`] once when the same rule set is applied to
/// many texts.
pub fn rewrite_all<'a, I, P, R>(source: &'a str, pairs: I) -> Cow<'a, str>
where
    I: IntoIterator<Item = (P, R)>,
    P: AsRef<str>,
    R: AsRef<str>,
{
    Rewriter::from_pairs(pairs).rewrite(source)
}

/// Fluent construction of a [`Rewriter`].
#[derive(Debug, Default)]
pub struct RewriterBuilder {
    rules: Vec<(String, String)>,
}

impl RewriterBuilder {
    pub fn rule(mut self, pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.rules.push((pattern.into(), replacement.into()));
        self
    }

    pub fn rules<I, P, R>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (P, R)>,
        P: Into<String>,
        R: Into<String>,
    {
        self.rules
            .extend(pairs.into_iter().map(|(p, r)| (p.into(), r.into())));
        self
    }

    /// Lenient build: accepts every rule, including the empty-pattern
    /// no-op.
    pub fn build(self) -> Rewriter {
        Rewriter::from_pairs(self.rules)
    }

    /// Strict build: rejects empty pattern strings instead of silently
    /// registering a rule that can never match.
    pub fn build_strict(self) -> Result<Rewriter, RuleError> {
        if self.rules.iter().any(|(p, _)| p.is_empty()) {
            return Err(RuleError::EmptyPattern);
        }
        Ok(Rewriter::from_pairs(self.rules))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorter_pattern_on_shared_path_wins() {
        let rw = Rewriter::from_pairs([("a", "1"), ("ab", "2")]);
        // "a" terminates first along the shared path; no lookahead for "ab".
        assert_eq!(rw.rewrite("ab"), "1b");
        assert_eq!(rw.rewrite("aab"), "11b");
    }

    #[test]
    fn failed_partial_match_is_abandoned() {
        let rw = Rewriter::from_pairs([("ab", "x")]);
        // The leading "a" consumes the second "a" as a failed attempt, so
        // the real occurrence starting there is never seen.
        assert_eq!(rw.rewrite("aab"), "aab");
        assert_eq!(rw.rewrite("ab ab"), "x x");
    }

    #[test]
    fn failed_unit_is_not_retried_at_root() {
        let rw = Rewriter::from_pairs([("ab", "x"), ("ca", "y")]);
        // 'c' kills the "a…" attempt and is skipped, so "ca" at offset 1 is
        // never attempted.
        assert_eq!(rw.rewrite("aca"), "aca");
        assert_eq!(rw.rewrite("ca"), "y");
    }

    #[test]
    fn replacement_text_is_never_rescanned() {
        let rw = Rewriter::from_pairs([("a", "ab"), ("b", "c")]);
        // The 'b' produced by the first rule is output, not input.
        assert_eq!(rw.rewrite("a"), "ab");
        // A 'b' from the *source* still matches after a commit.
        assert_eq!(rw.rewrite("ab"), "abc");
    }

    #[test]
    fn trailing_partial_match_stays_verbatim() {
        let rw = Rewriter::from_pairs([("abc", "x")]);
        assert_eq!(rw.rewrite("abcab"), "xab");
        assert_eq!(rw.rewrite("ab"), "ab");
    }

    #[test]
    fn zero_copy_when_nothing_matches() {
        let rw = Rewriter::from_pairs([("xyz", "1")]);
        let input = "no occurrence here";
        let result = rw.rewrite(input);
        assert!(matches!(result, Cow::Borrowed(s) if s.as_ptr() == input.as_ptr()));

        let empty = Rewriter::new(PatternTrie::new());
        let result = empty.rewrite(input);
        assert!(matches!(result, Cow::Borrowed(s) if s.as_ptr() == input.as_ptr()));
    }

    #[test]
    fn empty_pattern_is_a_no_op() {
        let rw = Rewriter::from_pairs([("", "x")]);
        let input = "abc";
        let result = rw.rewrite(input);
        assert!(matches!(result, Cow::Borrowed(s) if s.as_ptr() == input.as_ptr()));
    }

    #[test]
    fn strict_build_rejects_empty_pattern() {
        let err = Rewriter::builder()
            .rule("ok", "fine")
            .rule("", "nope")
            .build_strict()
            .unwrap_err();
        assert_eq!(err, RuleError::EmptyPattern);

        let rw = Rewriter::builder()
            .rule("ok", "fine")
            .build_strict()
            .unwrap();
        assert_eq!(rw.rewrite("ok"), "fine");
    }

    #[test]
    fn builder_rules_and_duplicates() {
        let rw = Rewriter::builder()
            .rules([("a", "old"), ("c", "d")])
            .rule("a", "b")
            .build();
        assert_eq!(rw.rewrite("ac"), "bd");
        assert_eq!(rw.trie().pattern_count(), 2);
    }

    #[test]
    fn one_shot_helper() {
        assert_eq!(rewrite_all("aaa", [("aa", "b")]), "ba");
    }

    #[test]
    fn wide_root_scans_without_prefilter() {
        // Four distinct root bytes disable the memchr fast path; semantics
        // must be identical.
        let rw = Rewriter::from_pairs([("a", "1"), ("b", "2"), ("c", "3"), ("d", "4")]);
        assert_eq!(rw.rewrite("dcba"), "4321");
        assert_eq!(rw.rewrite("xyz"), "xyz");
    }

    #[test]
    fn rewriter_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Rewriter>();
        assert_send_sync::<PatternTrie>();
    }
}
