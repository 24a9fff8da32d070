//! Property-based tests for the local search neighbourhoods.
//!
//! # Invariants tested
//!
//! - **Monotone lengths:** every recorded move shortens the tour.
//! - **Fixed point:** rerunning a neighbourhood on its own final tour
//!   records only the starting snapshot.
//! - **Permutation:** every snapshot visits each city exactly once.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tourkit_core::test_support::points_instance;
use tourkit_core::{Instance, Tour, Trace};
use tourkit_heuristics::{LocalSearch, LocalSearchConfig, Neighbourhood};

fn points_strategy() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((0.0..100.0_f64, 0.0..100.0_f64), 4..=12)
}

fn neighbourhood_strategy() -> impl Strategy<Value = Neighbourhood> {
    prop::sample::select(Neighbourhood::ALL.to_vec())
}

#[expect(
    clippy::expect_used,
    reason = "default configuration and generated tours are valid"
)]
fn improve(neighbourhood: Neighbourhood, instance: &Instance, start: &[usize]) -> Trace {
    LocalSearch::new(neighbourhood, LocalSearchConfig::default())
        .expect("default config is valid")
        .improve(instance, start)
        .expect("start tour is a permutation")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn lengths_strictly_decrease(
        neighbourhood in neighbourhood_strategy(),
        points in points_strategy(),
        seed in any::<u64>(),
    ) {
        let instance = points_instance(&points);
        let start = instance.random_tour(&mut ChaCha8Rng::seed_from_u64(seed));
        let trace = improve(neighbourhood, &instance, start.cities());

        for pair in trace.lengths().windows(2) {
            if let [before, after] = pair {
                prop_assert!(after < before, "{pair:?}");
            }
        }
        for tour in trace.tours() {
            prop_assert!(Tour::new(tour.clone()).validate(instance.dimension()).is_ok());
        }
    }

    #[test]
    fn final_tour_is_a_fixed_point(
        neighbourhood in neighbourhood_strategy(),
        points in points_strategy(),
        seed in any::<u64>(),
    ) {
        let instance = points_instance(&points);
        let start = instance.random_tour(&mut ChaCha8Rng::seed_from_u64(seed));
        let first = improve(neighbourhood, &instance, start.cities());
        let last = first.last_tour().map(<[_]>::to_vec).unwrap_or_default();

        let again = improve(neighbourhood, &instance, &last);
        prop_assert_eq!(again.len(), 1);
        prop_assert_eq!(again.last_tour(), Some(last.as_slice()));
    }
}
