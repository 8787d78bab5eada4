#![cfg(feature = "parallel")]

use pwl_dp::{
    solvers::{bottom_up::fill_table, Exhaustive},
    Algorithm, GridPoint, PwlInstance, PwlSolver, Sample,
};
use proptest::prelude::*;

/// Sequential reference: every feasible sequence, first strict minimum wins.
fn sequential_exhaustive(instance: &PwlInstance) -> f64 {
    fn walk(instance: &PwlInstance, seq: &mut Vec<GridPoint>, best: &mut f64) {
        if seq.len() == instance.breakpoints() {
            if instance.is_feasible(seq) {
                *best = best.min(instance.total_error(seq));
            }
            return;
        }
        let start = seq.last().map_or(0, |p| p.i + 1);
        for i in start..instance.columns() {
            for j in 0..instance.rows() {
                seq.push(GridPoint::new(i, j));
                walk(instance, seq, best);
                seq.pop();
            }
        }
    }
    let mut best = f64::INFINITY;
    walk(instance, &mut Vec::new(), &mut best);
    best
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn parallel_engines_match_sequential_search(
        ys in prop::collection::vec(-4.0f64..4.0, 3..16),
        m1 in 3usize..=6,
        m2 in 1usize..=4,
    ) {
        let samples: Vec<Sample> = ys
            .iter()
            .enumerate()
            .map(|(k, &y)| Sample::new(k as f64, y))
            .collect();
        let instance = PwlInstance::new(samples, 3, m1, m2).unwrap();
        let expected = sequential_exhaustive(&instance);

        let parallel = Exhaustive.solve(&instance).unwrap();
        prop_assert_eq!(parallel.error.to_bits(), expected.to_bits());

        let bottom_up = Algorithm::BottomUp.solve(&instance).unwrap();
        prop_assert!((bottom_up.error - expected).abs() <= 1e-9 * expected.abs().max(1.0));
    }
}

#[test]
fn parallel_table_fill_is_deterministic() {
    let samples: Vec<Sample> = (0..80)
        .map(|k| Sample::new(k as f64, ((k * 37) % 11) as f64))
        .collect();
    let instance = PwlInstance::new(samples, 5, 16, 8).unwrap();
    let first = fill_table(&instance);
    for _ in 0..4 {
        assert_eq!(fill_table(&instance), first);
    }
}
