//! Small-alphabet specialization: frequency counts and bucket cursors live
//! in two contiguous arrays carved out of the shared scratch buffer.
//!
//! Entries in the suffix array multiplex three states: 0 is empty, a
//! positive index is pending induction, and a negated index is already
//! placed. Position 0 is never stored negated; every negatable write is of
//! `k = j - 1` with `j >= 2`.

use super::summary;

/// Runs the full induced sort for a character range of at most 256 codes.
///
/// `data` holds the frequency array at `[..curr]` and the bucket cursors at
/// `[src..src + curr]`; it is grown to `2 * src` on entry and reused by
/// every recursion level below this one.
pub(super) fn induce_sort(
    text: &[i32],
    sa: &mut [i32],
    data: &mut Vec<i32>,
    min_char: i32,
    num_lms: i32,
    src: usize,
    curr: usize,
) {
    if data.len() < src * 2 {
        data.resize(src * 2, 0);
    }
    {
        let (freq, bucket) = freq_and_buckets(data, src, curr);
        frequency(text, freq, min_char);
        insert_lms(text, sa, freq, bucket, min_char);
        if num_lms > 1 {
            induce_sub_l(text, sa, freq, bucket, min_char);
            induce_sub_s(text, sa, freq, bucket, min_char);
        }
    }
    if num_lms > 1 {
        let max_name = summary::summarise(text, sa, num_lms);
        let num_lms = num_lms as usize;
        let split = sa.len() - num_lms;
        let (head, reduced) = sa.split_at_mut(split);
        if max_name < num_lms as i32 {
            super::construct(reduced, &mut head[..num_lms], data, curr as i64);
            summary::unmap(text, &mut head[..num_lms], reduced);
        } else {
            // Every LMS substring got a unique name, so the summary is its
            // own suffix array.
            head[..num_lms].copy_from_slice(reduced);
            head[num_lms..].fill(0);
            reduced.fill(0);
        }
        let (freq, bucket) = freq_and_buckets(data, src, curr);
        expand(text, sa, num_lms, freq, bucket, min_char);
        induce_l(text, sa, freq, bucket, min_char);
        induce_s(text, sa, freq, bucket, min_char);
    } else {
        let (freq, bucket) = freq_and_buckets(data, src, curr);
        induce_l(text, sa, freq, bucket, min_char);
        induce_s(text, sa, freq, bucket, min_char);
    }
}

fn freq_and_buckets(data: &mut [i32], src: usize, curr: usize) -> (&mut [i32], &mut [i32]) {
    let (freq, bucket) = data.split_at_mut(src);
    (&mut freq[..curr], &mut bucket[..curr])
}

fn frequency(text: &[i32], freq: &mut [i32], min_char: i32) {
    freq.fill(0);
    for &v in text {
        freq[(v - min_char) as usize] += 1;
    }
}

/// Writes each bucket's left edge. Zero-frequency slots are skipped and
/// must never be indexed by consumers.
fn bucket_start(freq: &[i32], bucket: &mut [i32]) {
    let mut offset = 0;
    for (i, &n) in freq.iter().enumerate() {
        if n > 0 {
            bucket[i] = offset;
            offset += n;
        }
    }
}

/// Writes each bucket's right edge (inclusive). Zero-frequency slots are
/// skipped.
fn bucket_end(freq: &[i32], bucket: &mut [i32]) {
    let mut offset = 0;
    for (i, &n) in freq.iter().enumerate() {
        if n > 0 {
            offset += n;
            bucket[i] = offset - 1;
        }
    }
}

/// Places every LMS suffix at the end of its first character's bucket.
///
/// The scan runs right to left, so the final write is the leftmost LMS;
/// its slot is cleared again when more than one LMS exists, leaving the
/// single gap the sub-induction passes rely on.
fn insert_lms(text: &[i32], sa: &mut [i32], freq: &[i32], bucket: &mut [i32], min_char: i32) {
    bucket_end(freq, bucket);
    let mut s_type = false;
    let mut num_lms = 0;
    let mut last_lms = 0;
    let mut r = text[text.len() - 1];
    for (i, &l) in text.iter().enumerate().rev() {
        if l < r {
            s_type = true;
        } else if l > r && s_type {
            s_type = false;
            let c = (r - min_char) as usize;
            let b = bucket[c];
            bucket[c] = b - 1;
            sa[b as usize] = (i + 1) as i32;
            last_lms = b as usize;
            num_lms += 1;
        }
        r = l;
    }
    if num_lms > 1 {
        sa[last_lms] = 0;
    }
}

/// Left-to-right pass placing the L-type prefixes of the LMS suffixes.
///
/// Consumed entries are zeroed; a placed index is negated when its own
/// predecessor must not be induced from it.
fn induce_sub_l(text: &[i32], sa: &mut [i32], freq: &[i32], bucket: &mut [i32], min_char: i32) {
    bucket_start(freq, bucket);
    let n = text.len();
    let mut k = (n - 1) as i32;
    if text[n - 2] < text[n - 1] {
        k = -k;
    }
    let c = (text[n - 1] - min_char) as usize;
    let b = bucket[c];
    bucket[c] = b + 1;
    sa[b as usize] = k;

    for i in 0..n {
        let j = sa[i];
        if j == 0 {
            continue;
        }
        if j < 0 {
            sa[i] = -j;
            continue;
        }
        sa[i] = 0;
        let mut k = j - 1;
        let (l, r) = (text[(k - 1) as usize], text[k as usize]);
        if l < r {
            k = -k;
        }
        let c = (r - min_char) as usize;
        let b = bucket[c];
        bucket[c] = b + 1;
        sa[b as usize] = k;
    }
}

/// Right-to-left pass placing the S-type prefixes. Finished entries are
/// migrated to the top of `sa`, which afterwards holds the LMS positions
/// sorted by LMS substring.
fn induce_sub_s(text: &[i32], sa: &mut [i32], freq: &[i32], bucket: &mut [i32], min_char: i32) {
    bucket_end(freq, bucket);
    let mut top = sa.len();
    for i in (0..sa.len()).rev() {
        let j = sa[i];
        if j == 0 {
            continue;
        }
        sa[i] = 0;
        if j < 0 {
            top -= 1;
            sa[top] = -j;
            continue;
        }
        let mut k = j - 1;
        let (l, r) = (text[(k - 1) as usize], text[k as usize]);
        if l > r {
            k = -k;
        }
        let c = (r - min_char) as usize;
        let b = bucket[c];
        bucket[c] = b - 1;
        sa[b as usize] = k;
    }
}

/// Seeds each bucket end with its LMS suffixes, consuming the reduced
/// suffix array in reverse so every index lands at or right of its source
/// slot.
fn expand(
    text: &[i32],
    sa: &mut [i32],
    num_lms: usize,
    freq: &mut [i32],
    bucket: &mut [i32],
    min_char: i32,
) {
    frequency(text, freq, min_char);
    bucket_end(freq, bucket);
    for i in (0..num_lms).rev() {
        let lms_idx = sa[i];
        sa[i] = 0;
        let c = (text[lms_idx as usize] - min_char) as usize;
        let b = bucket[c];
        bucket[c] = b - 1;
        sa[b as usize] = lms_idx;
    }
}

/// Final left-to-right pass. Unlike [`induce_sub_l`] it keeps every entry:
/// positive cells are final, negative cells are work for [`induce_s`].
fn induce_l(text: &[i32], sa: &mut [i32], freq: &[i32], bucket: &mut [i32], min_char: i32) {
    bucket_start(freq, bucket);
    let n = text.len();
    let mut k = (n - 1) as i32;
    if text[n - 2] < text[n - 1] {
        k = -k;
    }
    let c = (text[n - 1] - min_char) as usize;
    let b = bucket[c];
    bucket[c] = b + 1;
    sa[b as usize] = k;

    for i in 0..n {
        let j = sa[i];
        if j <= 0 {
            continue;
        }
        let mut k = j - 1;
        let r = text[k as usize];
        if k > 0 && text[(k - 1) as usize] < r {
            k = -k;
        }
        let c = (r - min_char) as usize;
        let b = bucket[c];
        bucket[c] = b + 1;
        sa[b as usize] = k;
    }
}

/// Final right-to-left pass; restores the negated cells left by
/// [`induce_l`] and induces their S-type predecessors.
fn induce_s(text: &[i32], sa: &mut [i32], freq: &[i32], bucket: &mut [i32], min_char: i32) {
    bucket_end(freq, bucket);
    for i in (0..sa.len()).rev() {
        let j = sa[i];
        if j >= 0 {
            continue;
        }
        let j = -j;
        sa[i] = j;
        let mut k = j - 1;
        let r = text[k as usize];
        if k > 0 && text[(k - 1) as usize] <= r {
            k = -k;
        }
        let c = (r - min_char) as usize;
        let b = bucket[c];
        bucket[c] = b - 1;
        sa[b as usize] = k;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_edges_skip_absent_characters() {
        let freq = [3, 0, 2, 1];
        let mut starts = [-7; 4];
        let mut ends = [-7; 4];
        bucket_start(&freq, &mut starts);
        bucket_end(&freq, &mut ends);
        assert_eq!(starts, [0, -7, 3, 5]);
        assert_eq!(ends, [2, -7, 4, 5]);
    }

    #[test]
    fn lms_insertion_leaves_one_gap() {
        // "banana": LMS suffixes start at 1 and 3, both in the 'a' bucket.
        // The leftmost write is cleared again, leaving only position 3.
        let text: Vec<i32> = "banana".chars().map(|c| c as i32).collect();
        let mut sa = vec![0; text.len()];
        let mut freq = vec![0; 14];
        let mut bucket = vec![0; 14];
        frequency(&text, &mut freq, 'a' as i32);
        insert_lms(&text, &mut sa, &freq, &mut bucket, 'a' as i32);
        assert_eq!(sa, vec![0, 0, 3, 0, 0, 0]);
    }
}
