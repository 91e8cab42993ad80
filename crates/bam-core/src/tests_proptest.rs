use proptest::prelude::*;

/// Property-based checks of the engine's algebraic invariants

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correction::corrupt;
    use crate::crosstalk::crosstalk;
    use crate::pattern::PatternSet;
    use crate::recall::{run_step_from_inputs, run_step_from_outputs, RecallState};
    use crate::vector::{activate, BipolarVector};
    use crate::weights::build_weights;
    use nalgebra::DVector;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bipolar(len: usize) -> impl Strategy<Value = BipolarVector> {
        prop::collection::vec(any::<bool>(), len).prop_map(|bits| {
            let components = bits.into_iter().map(|b| if b { 1.0 } else { -1.0 }).collect();
            BipolarVector::new(components).unwrap()
        })
    }

    fn pairs(
        m: usize,
        k: usize,
        max: usize,
    ) -> impl Strategy<Value = Vec<(BipolarVector, BipolarVector)>> {
        prop::collection::vec((bipolar(m), bipolar(k)), 0..max)
    }

    fn to_set(m: usize, k: usize, pairs: Vec<(BipolarVector, BipolarVector)>) -> PatternSet {
        let mut set = PatternSet::new(m, k);
        for (i, o) in pairs {
            set.push(i, o).unwrap();
        }
        set
    }

    // =========================================================================
    // Test 1: Outer-product additivity
    // =========================================================================
    proptest! {
        #[test]
        fn test_weights_are_additive(
            (m, k, a, b) in (1usize..8, 1usize..6).prop_flat_map(|(m, k)| {
                (Just(m), Just(k), pairs(m, k, 5), pairs(m, k, 5))
            })
        ) {
            let set_a = to_set(m, k, a);
            let set_b = to_set(m, k, b);
            let mut union = set_a.clone();
            union.extend_from(&set_b).unwrap();

            let summed = &build_weights(&set_a) + &build_weights(&set_b);
            prop_assert_eq!(build_weights(&union), summed);
        }

        #[test]
        fn test_weights_ignore_insertion_order(
            (m, k, p) in (1usize..8, 1usize..6).prop_flat_map(|(m, k)| {
                (Just(m), Just(k), pairs(m, k, 6))
            })
        ) {
            let forward = to_set(m, k, p.clone());
            let reversed = to_set(m, k, p.into_iter().rev().collect());
            prop_assert_eq!(build_weights(&forward), build_weights(&reversed));
        }
    }

    // =========================================================================
    // Test 2: Activation idempotence
    // =========================================================================
    proptest! {
        #[test]
        fn test_activation_idempotent(raw in prop::collection::vec(-100.0f32..100.0f32, 1..32)) {
            let once = activate(&DVector::from_vec(raw));
            let twice = activate(once.as_dvector());
            prop_assert!(once.iter().all(|x| x == 1.0 || x == -1.0));
            prop_assert_eq!(once, twice);
        }
    }

    // =========================================================================
    // Test 3: Ping-pong determinism
    // =========================================================================
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn test_step_deterministic(
            (p, x, y) in (1usize..8, 1usize..6).prop_flat_map(|(m, k)| {
                (pairs(m, k, 5).prop_map(move |p| (m, k, p)), bipolar(m), bipolar(k))
            })
        ) {
            let (m, k, p) = p;
            let weights = build_weights(&to_set(m, k, p));
            let state = RecallState::new(x, y);

            let a = run_step_from_inputs(&weights, &state).unwrap();
            let b = run_step_from_inputs(&weights, &state).unwrap();
            prop_assert_eq!(a, b);

            let c = run_step_from_outputs(&weights, &state).unwrap();
            let d = run_step_from_outputs(&weights, &state).unwrap();
            prop_assert_eq!(c, d);
        }
    }

    // =========================================================================
    // Test 4: Crosstalk of a lone pattern
    // =========================================================================
    proptest! {
        #[test]
        fn test_single_pattern_crosstalk_zero(
            (x, y) in (1usize..16, 1usize..16).prop_flat_map(|(m, k)| (bipolar(m), bipolar(k)))
        ) {
            let set = to_set(x.len(), y.len(), vec![(x, y)]);
            let report = crosstalk(&set);
            prop_assert_eq!(report.entries.len(), 1);
            prop_assert_eq!(report.total, 0.0);
        }
    }

    // =========================================================================
    // Test 5: Corruption distance
    // =========================================================================
    proptest! {
        #[test]
        fn test_corrupt_distance_equals_flips(
            (v, flips) in (1usize..32).prop_flat_map(|n| (bipolar(n), 0..=n)),
            seed in any::<u64>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let c = corrupt(&v, flips, &mut rng).unwrap();
            prop_assert_eq!(v.hamming_distance(&c).unwrap(), flips);
        }
    }
}
