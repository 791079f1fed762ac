/// Counts occurrences of every alphabet index in `indices`.
pub fn histogram(indices: &[usize], alphabet_len: usize) -> Vec<u64> {
    let mut res = vec![0; alphabet_len];
    for &idx in indices {
        res[idx] += 1;
    }
    res
}

/// Counts adjacent pairs: `res[ctx][sym]` is how often `sym` follows `ctx`.
pub fn pair_histogram(indices: &[usize], alphabet_len: usize) -> Vec<Vec<u64>> {
    let mut res = vec![vec![0; alphabet_len]; alphabet_len];
    for pair in indices.windows(2) {
        res[pair[0]][pair[1]] += 1;
    }
    res
}

/// `-p * log2(p)` with the `0 * log2(0) = 0` convention.
#[inline]
pub fn plogp(p: f64) -> f64 {
    if p > 0.0 {
        -p * p.log2()
    } else {
        0.0
    }
}
