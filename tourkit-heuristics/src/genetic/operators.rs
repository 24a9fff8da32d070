//! Permutation-preserving crossover and mutation operators.
//!
//! Parents are permutations of the same cities; every operator returns (or
//! leaves behind) a permutation of those cities.

use std::collections::{HashMap, HashSet};

use rand::Rng;
use tourkit_core::CityId;

use super::{CrossoverMethod, MutationMethod};

/// Recombine `first` and `second` into one child.
pub(super) fn crossover<R: Rng + ?Sized>(
    method: CrossoverMethod,
    first: &[CityId],
    second: &[CityId],
    rng: &mut R,
) -> Vec<CityId> {
    match method {
        CrossoverMethod::Order => {
            let (lo, hi) = cut_points(first.len(), rng);
            order_crossover(first, second, lo, hi)
        }
        CrossoverMethod::PartiallyMapped => {
            let (lo, hi) = cut_points(first.len(), rng);
            partially_mapped_crossover(first, second, lo, hi)
        }
        CrossoverMethod::Cycle => cycle_crossover(first, second),
    }
}

/// Apply `method` to `tour` in place.
pub(super) fn mutate<R: Rng + ?Sized>(method: MutationMethod, tour: &mut Vec<CityId>, rng: &mut R) {
    let n = tour.len();
    if n < 2 {
        return;
    }
    match method {
        MutationMethod::Swap => {
            let (i, j) = distinct_positions(n, rng);
            tour.swap(i, j);
        }
        MutationMethod::Insert => {
            let (from, to) = distinct_positions(n, rng);
            let city = tour.remove(from);
            tour.insert(to, city);
        }
        MutationMethod::Inversion => {
            let (lo, hi) = cut_points(n, rng);
            if let Some(segment) = tour.get_mut(lo..=hi) {
                segment.reverse();
            }
        }
    }
}

/// Two inclusive slice bounds with `lo <= hi < n`.
fn cut_points<R: Rng + ?Sized>(n: usize, rng: &mut R) -> (usize, usize) {
    if n == 0 {
        return (0, 0);
    }
    let a = rng.gen_range(0..n);
    let b = rng.gen_range(0..n);
    (a.min(b), a.max(b))
}

/// Two different positions below `n`; requires `n >= 2`.
fn distinct_positions<R: Rng + ?Sized>(n: usize, rng: &mut R) -> (usize, usize) {
    let i = rng.gen_range(0..n);
    let j = rng.gen_range(0..n - 1);
    (i, if j >= i { j + 1 } else { j })
}

/// Keep `first[lo..=hi]` in place and fill the remaining positions, starting
/// after `hi` and wrapping, with the other cities in the order `second`
/// visits them from `hi + 1`.
pub(super) fn order_crossover(first: &[CityId], second: &[CityId], lo: usize, hi: usize) -> Vec<CityId> {
    let n = first.len();
    let kept = first.get(lo..=hi).unwrap_or_default();
    let in_slice: HashSet<CityId> = kept.iter().copied().collect();
    let fillers: Vec<CityId> = second
        .iter()
        .cycle()
        .skip(hi + 1)
        .take(n)
        .filter(|city| !in_slice.contains(city))
        .copied()
        .collect();
    let (after, before) = fillers.split_at(n.saturating_sub(hi + 1).min(fillers.len()));
    before.iter().chain(kept).chain(after).copied().collect()
}

/// Keep `first[lo..=hi]` in place; every other position takes the city from
/// `second`, chased through the slice mapping until it is not already kept.
pub(super) fn partially_mapped_crossover(
    first: &[CityId],
    second: &[CityId],
    lo: usize,
    hi: usize,
) -> Vec<CityId> {
    let mapping: HashMap<CityId, CityId> = first
        .iter()
        .zip(second)
        .skip(lo)
        .take(hi.saturating_sub(lo) + 1)
        .map(|(&a, &b)| (a, b))
        .collect();
    first
        .iter()
        .zip(second)
        .enumerate()
        .map(|(position, (&kept, &offered))| {
            if (lo..=hi).contains(&position) {
                return kept;
            }
            let mut city = offered;
            while let Some(&mapped) = mapping.get(&city) {
                city = mapped;
            }
            city
        })
        .collect()
}

/// Alternate position cycles between the parents, starting with `first`.
#[expect(
    clippy::indexing_slicing,
    reason = "cycle positions come from a lookup over the same permutation"
)]
pub(super) fn cycle_crossover(first: &[CityId], second: &[CityId]) -> Vec<CityId> {
    let position_in_first: HashMap<CityId, usize> = first
        .iter()
        .enumerate()
        .map(|(position, &city)| (city, position))
        .collect();
    let mut child = first.to_vec();
    let mut assigned = vec![false; first.len()];
    let mut from_second = false;
    for start in 0..first.len() {
        if assigned[start] {
            continue;
        }
        let mut position = start;
        while !assigned[position] {
            assigned[position] = true;
            if from_second {
                child[position] = second[position];
            }
            let Some(&next) = position_in_first.get(&second[position]) else {
                break;
            };
            position = next;
        }
        from_second = !from_second;
    }
    child
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::rstest;

    fn is_permutation(tour: &[CityId], n: usize) -> bool {
        let mut sorted = tour.to_vec();
        sorted.sort_unstable();
        sorted == (1..=n).collect::<Vec<_>>()
    }

    const FIRST: [CityId; 8] = [1, 2, 3, 4, 5, 6, 7, 8];
    const SECOND: [CityId; 8] = [3, 7, 5, 1, 6, 8, 2, 4];

    #[rstest]
    fn order_crossover_keeps_slice_and_second_parent_order() {
        let child = order_crossover(&FIRST, &SECOND, 2, 4);
        // Slice [3, 4, 5]; SECOND from position 5 without the slice: 8 2 7 1 6.
        assert_eq!(child, vec![1, 6, 3, 4, 5, 8, 2, 7]);
    }

    #[rstest]
    fn partially_mapped_crossover_repairs_duplicates() {
        let child = partially_mapped_crossover(&FIRST, &SECOND, 2, 4);
        // Mapping 3->5, 4->1, 5->6; SECOND[0] = 3 maps through 5 to 6.
        assert_eq!(child, vec![6, 7, 3, 4, 5, 8, 2, 1]);
    }

    #[rstest]
    fn cycle_crossover_alternates_cycles() {
        let child = cycle_crossover(&FIRST, &SECOND);
        // Cycle from position 0 covers positions {0, 2, 4, 5, 7, 3}.
        assert_eq!(child, vec![1, 7, 3, 4, 5, 6, 2, 8]);
    }

    #[rstest]
    fn every_operator_preserves_the_permutation(
        #[values(CrossoverMethod::Order, CrossoverMethod::PartiallyMapped, CrossoverMethod::Cycle)]
        crossover_method: CrossoverMethod,
        #[values(MutationMethod::Swap, MutationMethod::Insert, MutationMethod::Inversion)]
        mutation_method: MutationMethod,
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..50 {
            let mut child = crossover(crossover_method, &FIRST, &SECOND, &mut rng);
            assert!(is_permutation(&child, 8), "{child:?}");
            mutate(mutation_method, &mut child, &mut rng);
            assert!(is_permutation(&child, 8), "{child:?}");
        }
    }

    #[rstest]
    fn swap_always_changes_the_tour() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..20 {
            let mut tour = vec![1, 2];
            mutate(MutationMethod::Swap, &mut tour, &mut rng);
            assert_eq!(tour, vec![2, 1]);
        }
    }

    #[rstest]
    fn tiny_tours_survive_every_operator() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for method in CrossoverMethod::ALL {
            assert_eq!(crossover(method, &[1], &[1], &mut rng), vec![1]);
        }
        for method in MutationMethod::ALL {
            let mut tour = vec![1];
            mutate(method, &mut tour, &mut rng);
            assert_eq!(tour, vec![1]);
        }
    }
}
