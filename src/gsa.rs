use serde::{Deserialize, Serialize};

use crate::sais;
use crate::table;

/// Code point reserved to separate source strings in the concatenated
/// text. It lies in the Unicode Private Use Area, so it cannot collide
/// with valid text; callers indexing raw integer streams must keep it out
/// of their inputs.
pub const SEPARATOR: i32 = 0xE000;

/// The occurrences of one query inside one source string: ascending local
/// offsets, paired with the string's id.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct StringMatches {
    pub string_id: i32,
    pub positions: Vec<i32>,
}

/// A generalized suffix array over a collection of strings.
///
/// The strings are concatenated as `sep · T_0 · sep · T_1 · … · T_{m-1} ·
/// sep` and a single suffix array is built over the concatenation. Every
/// position carries its originating string id, so query results can be
/// demultiplexed back into per-string local offsets. The reserved
/// separator also anchors exact-prefix and exact-suffix queries: a pattern
/// wrapped in separators can only match at a string boundary.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GeneralizedSuffixArray {
    /// Concatenated text, separators included.
    text: Vec<i32>,
    table: Vec<i32>,
    /// Originating string id per text position.
    string_ids: Vec<i32>,
    /// Position of each string's first character in `text`.
    offsets: Vec<i32>,
    lengths: Vec<i32>,
}

impl GeneralizedSuffixArray {
    /// Builds a generalized suffix array over `src`. Returns `None` for an
    /// empty collection.
    pub fn new(src: &[Vec<i32>]) -> Option<GeneralizedSuffixArray> {
        if src.is_empty() {
            return None;
        }
        let total: usize = src.iter().map(|s| s.len()).sum();
        let text_len = total + src.len() + 1;
        let mut text = Vec::with_capacity(text_len);
        let mut string_ids = vec![0; text_len];
        let mut offsets = Vec::with_capacity(src.len());
        let mut lengths = Vec::with_capacity(src.len());

        text.push(SEPARATOR);
        for (id, s) in src.iter().enumerate() {
            offsets.push(text.len() as i32);
            lengths.push(s.len() as i32);
            for &c in s {
                string_ids[text.len()] = id as i32;
                text.push(c);
            }
            string_ids[text.len()] = id as i32;
            text.push(SEPARATOR);
        }

        let table = sais::suffix_array(&text);
        Some(GeneralizedSuffixArray {
            text,
            table,
            string_ids,
            offsets,
            lengths,
        })
    }

    /// Builds a generalized suffix array over UTF-8 strings, mapping each
    /// `char` to its code point.
    pub fn from_strs(src: &[&str]) -> Option<GeneralizedSuffixArray> {
        let src: Vec<Vec<i32>> = src
            .iter()
            .map(|s| s.chars().map(|c| c as i32).collect())
            .collect();
        GeneralizedSuffixArray::new(&src)
    }

    /// Returns the number of source strings.
    pub fn num_strings(&self) -> usize {
        self.lengths.len()
    }

    /// Finds every occurrence of `pattern`, grouped per source string with
    /// local offsets in ascending text order. Strings without occurrences
    /// are absent from the result.
    pub fn lookup_text_order(&self, pattern: &[i32]) -> Vec<StringMatches> {
        let positions = table::lookup_text_order(&self.text, &self.table, pattern);
        self.demux(&positions)
    }

    /// Finds the strings that end with `suffix`, reporting the match's
    /// local start offset per string.
    ///
    /// The empty suffix occurs at the end of every string, yielding
    /// `{i, [len(T_i)]}` for every string.
    pub fn lookup_suffix(&self, suffix: &[i32]) -> Vec<StringMatches> {
        if suffix.is_empty() {
            return self
                .lengths
                .iter()
                .enumerate()
                .map(|(id, &len)| StringMatches {
                    string_id: id as i32,
                    positions: vec![len],
                })
                .collect();
        }
        // Appending the separator pins the match to a string end.
        let mut needle = Vec::with_capacity(suffix.len() + 1);
        needle.extend_from_slice(suffix);
        needle.push(SEPARATOR);
        let positions = table::lookup_text_order(&self.text, &self.table, &needle);
        self.demux(&positions)
    }

    /// Finds the strings that start with `prefix`, reporting offset 0 per
    /// matched string.
    ///
    /// The empty prefix precedes the first character and yields
    /// `{i, [-1]}` for every string.
    pub fn lookup_prefix(&self, prefix: &[i32]) -> Vec<StringMatches> {
        if prefix.is_empty() {
            return (0..self.lengths.len())
                .map(|id| StringMatches {
                    string_id: id as i32,
                    positions: vec![-1],
                })
                .collect();
        }
        // Prepending the separator pins the match to a string start.
        let mut needle = Vec::with_capacity(prefix.len() + 1);
        needle.push(SEPARATOR);
        needle.extend_from_slice(prefix);
        let positions = table::lookup_text_order(&self.text, &self.table, &needle);
        self.demux(&positions)
    }

    /// Groups ascending concatenation positions into per-string local
    /// offsets.
    ///
    /// A position landing exactly on a separator stands for the boundary
    /// match just before the following character and is forwarded by one;
    /// the trailing separator ends the iteration. Forwarding can collide
    /// with a direct hit on the same position, so consecutive duplicates
    /// are dropped.
    fn demux(&self, positions: &[i32]) -> Vec<StringMatches> {
        let mut matches: Vec<StringMatches> = Vec::new();
        let mut prev = 0;
        for &pos in positions {
            let mut j = pos;
            if self.text[j as usize] == SEPARATOR {
                if j as usize == self.text.len() - 1 {
                    break;
                }
                j += 1;
            }
            if j == prev {
                continue;
            }
            prev = j;
            let id = self.string_ids[j as usize];
            let local = j - self.offsets[id as usize];
            match matches.last_mut() {
                Some(last) if last.string_id == id => last.positions.push(local),
                _ => matches.push(StringMatches {
                    string_id: id,
                    positions: vec![local],
                }),
            }
        }
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concatenation_layout() {
        let gsa = GeneralizedSuffixArray::new(&[vec![10, 11], vec![12]]).unwrap();
        assert_eq!(
            gsa.text,
            vec![SEPARATOR, 10, 11, SEPARATOR, 12, SEPARATOR]
        );
        assert_eq!(gsa.string_ids, vec![0, 0, 0, 0, 1, 1]);
        assert_eq!(gsa.offsets, vec![1, 4]);
        assert_eq!(gsa.lengths, vec![2, 1]);
    }

    #[test]
    fn empty_collection_has_no_gsa() {
        assert!(GeneralizedSuffixArray::new(&[]).is_none());
        assert!(GeneralizedSuffixArray::from_strs(&[]).is_none());
    }
}
