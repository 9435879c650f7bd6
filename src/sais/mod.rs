//! Linear-time suffix array construction by induced sorting (SA-IS).
//!
//! The algorithm classifies text positions into S- and L-types, sorts the
//! LMS substrings with two induced passes, names them to form a reduced
//! text, recurses while names collide, and finally induces the full suffix
//! array from the sorted LMS suffixes. See (Nong et al., 2009) for the
//! underlying technique.
//!
//! Two specializations share the induction machinery: a contiguous
//! frequency/bucket-array layer for small alphabets ([`bucket`]) and a
//! bucket-map layer for sparse alphabets ([`sparse`]), selected per
//! recursion level.

mod bucket;
mod sparse;
mod summary;

/// Largest character range served by the contiguous bucket arrays.
const SMALL_ALPHABET_MAX: i64 = 256;

/// Builds the suffix array of `text` in `O(n)` time.
///
/// The result is the permutation of `0..text.len()` that orders the
/// suffixes of `text` lexicographically, where a suffix that is a proper
/// prefix of another sorts first.
///
/// Code points and the text length must fit in 31-bit signed values.
///
/// # Example
///
/// ```rust
/// use tokensuffix::suffix_array;
///
/// let text: Vec<i32> = "banana".chars().map(|c| c as i32).collect();
/// assert_eq!(suffix_array(&text), vec![5, 3, 1, 0, 4, 2]);
/// ```
pub fn suffix_array(text: &[i32]) -> Vec<i32> {
    match text.len() {
        0 => Vec::new(),
        1 => vec![0],
        _ => {
            let mut sa = vec![0; text.len()];
            let mut data = Vec::new();
            construct(text, &mut sa, &mut data, 0);
            sa
        }
    }
}

/// Recursive core shared by both specializations.
///
/// `sa` is the output buffer for this level; its tail doubles as scratch
/// for the reduced text and its head as the reduced suffix array. `data`
/// is the frequency/bucket scratch threaded through every small-alphabet
/// level. `src_alpha_size` bounds the character range `data` was sized
/// for; 0 marks the top-level call, which adopts the scanned range.
pub(crate) fn construct(text: &[i32], sa: &mut [i32], data: &mut Vec<i32>, src_alpha_size: i64) {
    let (min_char, max_char, num_lms) = classify(text);
    let curr_alpha_size = max_char as i64 - min_char as i64 + 1;
    let src_alpha_size = if src_alpha_size == 0 {
        curr_alpha_size
    } else {
        src_alpha_size
    };
    // Reduced texts are named from 1 upward and can outgrow the range the
    // parent's scratch was sized for; such levels take the map-based path.
    if curr_alpha_size > SMALL_ALPHABET_MAX || curr_alpha_size > src_alpha_size {
        sparse::induce_sort(text, sa, data, num_lms);
    } else {
        bucket::induce_sort(
            text,
            sa,
            data,
            min_char,
            num_lms,
            src_alpha_size as usize,
            curr_alpha_size as usize,
        );
    }
}

/// Scans `text` right to left, returning the character extremes and the
/// number of LMS suffixes.
///
/// A position is S-type when its character is smaller than its successor's
/// (ties inherit the successor's type); an S-type position preceded by an
/// L-type one is LMS. The last position compares equal to itself, so it is
/// never S-type and the scan needs no lookahead state.
fn classify(text: &[i32]) -> (i32, i32, i32) {
    let mut min_char = text[0];
    let mut max_char = text[0];
    let mut num_lms = 0;
    let mut s_type = false;
    let mut r = text[text.len() - 1];
    for &l in text.iter().rev() {
        if l < min_char {
            min_char = l;
        }
        if l > max_char {
            max_char = l;
        }
        if l < r {
            s_type = true;
        } else if l > r && s_type {
            s_type = false;
            num_lms += 1;
        }
        r = l;
    }
    (min_char, max_char, num_lms)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(s: &str) -> Vec<i32> {
        s.chars().map(|c| c as i32).collect()
    }

    #[test]
    fn classify_banana() {
        // LMS positions of "banana" are 1 and 3.
        let (min_char, max_char, num_lms) = classify(&codes("banana"));
        assert_eq!(min_char, 'a' as i32);
        assert_eq!(max_char, 'n' as i32);
        assert_eq!(num_lms, 2);
    }

    #[test]
    fn classify_run_of_equal_characters() {
        let (min_char, max_char, num_lms) = classify(&codes("aaaaaaa"));
        assert_eq!(min_char, 'a' as i32);
        assert_eq!(max_char, 'a' as i32);
        assert_eq!(num_lms, 0);
    }

    #[test]
    fn classify_counts_match_a_two_pass_reference() {
        // Reference: compute S-types with explicit lookahead, then count
        // S-positions with an L-type predecessor.
        fn reference(text: &[i32]) -> i32 {
            let n = text.len();
            let mut s_type = vec![false; n];
            for i in (0..n - 1).rev() {
                s_type[i] = text[i] < text[i + 1] || (text[i] == text[i + 1] && s_type[i + 1]);
            }
            (1..n).filter(|&i| s_type[i] && !s_type[i - 1]).count() as i32
        }

        for text in [
            codes("abracadabra"),
            codes("mississippi"),
            codes("ACGTGCCTAGCCTACCGTGCC"),
            vec![1, 2, 1, 2, 1, 2, 1, 2],
            vec![5, 4, 3, 2, 1],
            vec![0, 0, 0, 1, 1, 1],
        ] {
            let (_, _, num_lms) = classify(&text);
            assert_eq!(num_lms, reference(&text), "text: {text:?}");
        }
    }

    #[test]
    fn trivial_inputs() {
        assert_eq!(suffix_array(&[]), Vec::<i32>::new());
        assert_eq!(suffix_array(&[100]), vec![0]);
    }
}
