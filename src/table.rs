use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::sais;

/// A text of 31-bit code points together with its suffix array.
///
/// This stores *only* the suffix indices alongside the text. It has no
/// "enhanced" information like the inverse suffix array or least-common-
/// prefix lengths (LCP array), which limits what you can do (and how
/// fast), but keeps the footprint at 4 bytes per character on top of the
/// text itself.
///
/// # Construction
///
/// Construction runs the SA-IS engine in `O(n)` time; see [`suffix_array`]
/// for the algorithm. Queries are double binary searches in `O(m log n)`
/// time, where `m` is the pattern length.
///
/// [`suffix_array`]: crate::suffix_array
#[derive(Clone, Deserialize, Eq, PartialEq, Serialize)]
pub struct SuffixArray {
    text: Box<[i32]>,
    table: Box<[i32]>,
}

impl SuffixArray {
    /// Creates a new suffix array for `text` in `O(n)` time and space.
    pub fn new<S>(text: S) -> SuffixArray
    where
        S: Into<Box<[i32]>>,
    {
        let text = text.into();
        let table = sais::suffix_array(&text).into_boxed_slice();
        SuffixArray { text, table }
    }

    /// Creates a suffix array from an existing list of lexicographically
    /// sorted suffix indices.
    ///
    /// Note that the invariant that `table` must be the suffix array of
    /// `text` is not checked! If it isn't, other operations will fail in
    /// weird ways. This fails if the lengths differ.
    pub fn from_parts<S, T>(text: S, table: T) -> SuffixArray
    where
        S: Into<Box<[i32]>>,
        T: Into<Box<[i32]>>,
    {
        let (text, table) = (text.into(), table.into());
        assert_eq!(text.len(), table.len());
        SuffixArray { text, table }
    }

    /// Extracts the parts of a suffix array.
    ///
    /// This is useful to avoid copying when the suffix array is part of an
    /// intermediate computation.
    pub fn into_parts(self) -> (Box<[i32]>, Box<[i32]>) {
        (self.text, self.table)
    }

    /// Returns the suffix array table.
    #[inline]
    pub fn table(&self) -> &[i32] {
        &self.table
    }

    /// Returns the text.
    #[inline]
    pub fn text(&self) -> &[i32] {
        &self.text
    }

    /// Returns the number of suffixes, which equals the text length.
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` iff `self.len() == 0`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the suffix of rank `i`.
    #[inline]
    pub fn suffix(&self, i: usize) -> &[i32] {
        &self.text[self.table[i] as usize..]
    }

    /// Returns true if and only if a non-empty `pattern` occurs in the
    /// text.
    ///
    /// Prefer this over [`lookup`](Self::lookup) when you only need to
    /// test existence, because it is a single binary search.
    pub fn contains(&self, pattern: &[i32]) -> bool {
        !pattern.is_empty()
            && self
                .table
                .binary_search_by(|&sufi| {
                    self.text[sufi as usize..]
                        .iter()
                        .take(pattern.len())
                        .cmp(pattern.iter())
                })
                .is_ok()
    }

    /// Returns the sub-slice of the table holding every position whose
    /// suffix starts with `pattern`, in lexicographic order of those
    /// suffixes.
    ///
    /// An empty pattern matches everywhere and returns the whole table; an
    /// empty text returns the empty slice.
    pub fn lookup(&self, pattern: &[i32]) -> &[i32] {
        lookup(&self.text, &self.table, pattern)
    }

    /// Returns every position whose suffix starts with `pattern`, sorted
    /// ascending by position.
    pub fn lookup_text_order(&self, pattern: &[i32]) -> Vec<i32> {
        lookup_text_order(&self.text, &self.table, pattern)
    }

    /// [`lookup_text_order`](Self::lookup_text_order) for a batch of
    /// patterns, run in parallel.
    pub fn batch_lookup_text_order(&self, patterns: &[Vec<i32>]) -> Vec<Vec<i32>> {
        patterns
            .par_iter()
            .map(|pattern| self.lookup_text_order(pattern))
            .collect()
    }

    /// Returns the position at which `suffix` ends the text.
    ///
    /// The empty suffix occurs at the end of the string, so it yields the
    /// text length. A match yields its start position `len - suffix.len()`;
    /// no match (including a needle longer than the text) yields -1.
    pub fn lookup_suffix(&self, suffix: &[i32]) -> i32 {
        if suffix.is_empty() {
            return self.table.len() as i32;
        }
        if self.table.is_empty() || suffix.len() > self.text.len() {
            return -1;
        }
        let start = self.text.len() - suffix.len();
        if self.text[start..] == *suffix {
            start as i32
        } else {
            -1
        }
    }

    /// Returns 0 when the text starts with `prefix`.
    ///
    /// The empty prefix precedes the first character and yields -1; no
    /// match (including a needle longer than the text) yields -2.
    pub fn lookup_prefix(&self, prefix: &[i32]) -> i32 {
        if prefix.is_empty() {
            return -1;
        }
        if self.table.is_empty() || prefix.len() > self.text.len() {
            return -2;
        }
        if self.text[..prefix.len()] == *prefix {
            0
        } else {
            -2
        }
    }
}

impl fmt::Debug for SuffixArray {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "\n-----------------------------------------")?;
        writeln!(f, "SUFFIX ARRAY")?;
        for (rank, &sufstart) in self.table.iter().enumerate() {
            writeln!(f, "suffix[{}] {}", rank, sufstart)?;
        }
        writeln!(f, "-----------------------------------------")
    }
}

/// Compares a suffix against a pattern over their shared length. A suffix
/// that runs out before the pattern compares less; one that merely starts
/// with the pattern compares equal.
fn compare_pattern(suffix: &[i32], pattern: &[i32]) -> Ordering {
    let shared = suffix.len().min(pattern.len());
    match suffix[..shared].cmp(&pattern[..shared]) {
        Ordering::Equal if suffix.len() < pattern.len() => Ordering::Less,
        ordering => ordering,
    }
}

/// The range of `table` whose suffixes start with `pattern`, found with
/// two binary searches: the first suffix `>=` the pattern and, from there,
/// the first suffix `>` it.
pub(crate) fn lookup<'t>(text: &[i32], table: &'t [i32], pattern: &[i32]) -> &'t [i32] {
    if pattern.is_empty() {
        return table;
    }
    if table.is_empty() {
        return &[];
    }
    let start = binary_search(table, |&sufi| {
        compare_pattern(&text[sufi as usize..], pattern) != Ordering::Less
    });
    let end = start
        + binary_search(&table[start..], |&sufi| {
            compare_pattern(&text[sufi as usize..], pattern) == Ordering::Greater
        });
    &table[start..end]
}

pub(crate) fn lookup_text_order(text: &[i32], table: &[i32], pattern: &[i32]) -> Vec<i32> {
    let mut positions = lookup(text, table, pattern).to_vec();
    positions.sort_unstable();
    positions
}

/// Binary search to find the first element such that `pred(T) == true`.
///
/// Assumes that if `pred(xs[i]) == true` then `pred(xs[i+1]) == true`.
///
/// If all elements yield `pred(T) == false`, then `xs.len()` is returned.
fn binary_search<T, F>(xs: &[T], mut pred: F) -> usize
where
    F: FnMut(&T) -> bool,
{
    let (mut left, mut right) = (0, xs.len());
    while left < right {
        let mid = (left + right) / 2;
        if pred(&xs[mid]) {
            right = mid;
        } else {
            left = mid + 1;
        }
    }
    left
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_comparison_tie_breaks() {
        assert_eq!(compare_pattern(&[1, 2], &[1, 2, 3]), Ordering::Less);
        assert_eq!(compare_pattern(&[1, 2, 3], &[1, 2]), Ordering::Equal);
        assert_eq!(compare_pattern(&[1, 2], &[1, 2]), Ordering::Equal);
        assert_eq!(compare_pattern(&[1, 3], &[1, 2, 3]), Ordering::Greater);
        assert_eq!(compare_pattern(&[], &[0]), Ordering::Less);
    }

    #[test]
    fn binary_search_finds_first_true() {
        let xs = [1, 2, 3, 4, 5];
        assert_eq!(binary_search(&xs, |&x| x >= 3), 2);
        assert_eq!(binary_search(&xs, |&x| x >= 9), 5);
        assert_eq!(binary_search(&xs, |&x| x >= 0), 0);
    }
}
