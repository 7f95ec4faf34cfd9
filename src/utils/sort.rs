use std::cmp::Ordering;

/// Stable sort by an integer count, descending.
/// - Equal counts keep their incoming order
/// - Feed items in first-occurrence order to get first-occurrence tie-breaks
///
/// Small inputs use insertion sort, larger ones the std stable merge sort.
#[inline]
pub fn sort_by_count_desc<T, F>(items: &mut [T], count: F)
where
    F: Fn(&T) -> u64,
{
    if items.len() <= 32 {
        insertion_sort_by(items, |a, b| count(b).cmp(&count(a)));
        return;
    }
    items.sort_by(|a, b| count(b).cmp(&count(a)));
}

/// Stable sort by a float score, descending.
/// NaN scores sort last via `total_cmp`.
#[inline]
pub fn sort_by_score_desc<T, F>(items: &mut [T], score: F)
where
    F: Fn(&T) -> f64,
{
    items.sort_by(|a, b| {
        let (sa, sb) = (score(a), score(b));
        match (sa.is_nan(), sb.is_nan()) {
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            _ => sb.total_cmp(&sa),
        }
    });
}

/// Rank by count descending, then keep the first `k`.
#[inline]
pub fn top_k_by_count<T, F>(mut items: Vec<T>, k: usize, count: F) -> Vec<T>
where
    F: Fn(&T) -> u64,
{
    sort_by_count_desc(&mut items, count);
    items.truncate(k);
    items
}

/// Tiny stable insertion sort.
/// Only swaps on strict `Less`, so equal elements never pass each other.
#[inline(always)]
fn insertion_sort_by<T, F>(items: &mut [T], cmp: F)
where
    F: Fn(&T, &T) -> Ordering,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && cmp(&items[j], &items[j - 1]) == Ordering::Less {
            items.swap(j, j - 1);
            j -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// stable baseline: sort by (count desc, original_index)
    fn baseline(items: &[(u64, usize)]) -> Vec<(u64, usize)> {
        let mut out = items.to_vec();
        out.sort_unstable_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        out
    }

    /// tiny deterministic PRNG (xorshift32)
    struct Rng(u32);
    impl Rng {
        fn next_u32(&mut self) -> u32 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            self.0 = x;
            x
        }
    }

    #[test]
    fn handles_empty_and_single() {
        let mut items: Vec<(u64, usize)> = vec![];
        sort_by_count_desc(&mut items, |x| x.0);
        assert!(items.is_empty());

        let mut items = vec![(7u64, 0usize)];
        sort_by_count_desc(&mut items, |x| x.0);
        assert_eq!(items, vec![(7, 0)]);
    }

    #[test]
    fn ties_keep_incoming_order() {
        let mut items: Vec<(u64, usize)> = vec![(1, 0), (3, 1), (1, 2), (3, 3), (2, 4)];
        sort_by_count_desc(&mut items, |x| x.0);
        assert_eq!(items, vec![(3, 1), (3, 3), (2, 4), (1, 0), (1, 2)]);
    }

    #[test]
    fn matches_baseline_many_sizes() {
        let mut rng = Rng(0x1234_5678);
        // both sides of the insertion-sort threshold
        for &n in &[0usize, 1, 2, 7, 31, 32, 33, 64, 129, 1024] {
            let items: Vec<(u64, usize)> = (0..n)
                .map(|i| ((rng.next_u32() & 0x0F) as u64, i))
                .collect();
            let expected = baseline(&items);
            let mut got = items.clone();
            sort_by_count_desc(&mut got, |x| x.0);
            assert_eq!(got, expected, "mismatch at n={n}");
        }
    }

    #[test]
    fn score_sort_is_stable_and_puts_nan_last() {
        let mut items = vec![("a", 0.5), ("b", f64::NAN), ("c", 0.9), ("d", 0.5)];
        sort_by_score_desc(&mut items, |x| x.1);
        let order: Vec<&str> = items.iter().map(|x| x.0).collect();
        assert_eq!(order, vec!["c", "a", "d", "b"]);
    }

    #[test]
    fn top_k_truncates_after_ranking() {
        let items = vec![("x", 1u64), ("y", 4), ("z", 4), ("w", 2)];
        let top = top_k_by_count(items, 3, |x| x.1);
        assert_eq!(top, vec![("y", 4), ("z", 4), ("w", 2)]);
    }
}
