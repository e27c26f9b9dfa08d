//! Name bookkeeping for one naming scope.
//!
//! - NameSet records names already handed out (one set per naming or move pass).
//! - uniquify() picks the first free "name(n)" variant without recording it.
//! - prefix() cuts a filename down to its first N characters (not bytes).

use std::collections::HashSet;
use std::ffi::{OsStr, OsString};

/// Names already assigned within a single scope.
///
/// Callers own the scope: create one per naming pass or per destination
/// directory, and insert every name returned by [`uniquify`] before asking
/// for the next one.
#[derive(Debug, Default, Clone)]
pub struct NameSet {
    seen: HashSet<OsString>,
}

impl NameSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a name as used. Returns false if it was already present.
    pub fn insert(&mut self, name: impl Into<OsString>) -> bool {
        self.seen.insert(name.into())
    }

    pub fn contains(&self, name: &OsStr) -> bool {
        self.seen.contains(name)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Return `candidate` if unused, else the first of `candidate(1)`, `candidate(2)`, ...
/// that is not in `seen`. Does not insert the result.
pub fn uniquify(candidate: &OsStr, seen: &NameSet) -> OsString {
    if !seen.contains(candidate) {
        return candidate.to_os_string();
    }

    let mut n: u64 = 1;
    loop {
        let mut name = candidate.to_os_string();
        name.push(format!("({n})"));
        if !seen.contains(&name) {
            return name;
        }
        n += 1;
    }
}

/// First `len` characters of `name`, or the whole name when it is shorter.
///
/// Non-UTF-8 names are decoded lossily first; invalid sequences count as one
/// replacement character each.
pub fn prefix(name: &OsStr, len: usize) -> String {
    name.to_string_lossy().chars().take(len).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniquify_empty_set_returns_candidate() {
        let seen = NameSet::new();
        assert_eq!(uniquify(OsStr::new("a"), &seen), OsString::from("a"));
    }

    #[test]
    fn uniquify_one_collision() {
        let mut seen = NameSet::new();
        seen.insert("a");
        assert_eq!(uniquify(OsStr::new("a"), &seen), OsString::from("a(1)"));
    }

    #[test]
    fn uniquify_skips_taken_suffixes() {
        let mut seen = NameSet::new();
        seen.insert("a");
        seen.insert("a(1)");
        seen.insert("a(2)");
        assert_eq!(uniquify(OsStr::new("a"), &seen), OsString::from("a(3)"));
    }

    #[test]
    fn uniquify_does_not_insert() {
        let mut seen = NameSet::new();
        seen.insert("x");
        let first = uniquify(OsStr::new("x"), &seen);
        let second = uniquify(OsStr::new("x"), &seen);
        assert_eq!(first, second);
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn uniquify_suffix_goes_after_extension() {
        let mut seen = NameSet::new();
        seen.insert("movie.mkv");
        assert_eq!(
            uniquify(OsStr::new("movie.mkv"), &seen),
            OsString::from("movie.mkv(1)")
        );
    }

    #[test]
    fn prefix_bounds() {
        assert_eq!(prefix(OsStr::new("ab"), 0), "");
        assert_eq!(prefix(OsStr::new("ab"), 1), "a");
        assert_eq!(prefix(OsStr::new("ab"), 2), "ab");
        assert_eq!(prefix(OsStr::new("ab"), 3), "ab");
    }

    #[test]
    fn prefix_counts_characters_not_bytes() {
        assert_eq!(prefix(OsStr::new("äöü.txt"), 2), "äö");
        assert_eq!(prefix(OsStr::new("日本語"), 1), "日");
    }

    #[test]
    fn name_set_insert_then_contains() {
        let mut seen = NameSet::new();
        assert!(seen.is_empty());
        assert!(seen.insert("a"));
        assert!(!seen.insert("a"));
        assert!(seen.contains(OsStr::new("a")));
        assert!(!seen.contains(OsStr::new("b")));
    }
}
