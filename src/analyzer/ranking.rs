// Competition ("RANK()") ranking over one group of values.

/// Ranks values highest first. Each value's rank is one more than the number of
/// values strictly greater than it, so ties share a rank and the next distinct
/// value skips past them.
pub fn rank_descending(values: &[i64]) -> Vec<u32> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    values
        .iter()
        .map(|v| 1 + sorted.partition_point(|other| other > v) as u32)
        .collect()
}

/// Ranks values lowest first: one more than the number of values strictly smaller.
pub fn rank_ascending(values: &[i64]) -> Vec<u32> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    values
        .iter()
        .map(|v| 1 + sorted.partition_point(|other| other < v) as u32)
        .collect()
}
