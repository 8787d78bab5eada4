#![cfg(feature = "serde")]

use pwl_dp::{regression::RegressionBaseline, Algorithm, PwlEngineBuilder, Solution};

#[test]
fn solution_survives_json() {
    let engine = PwlEngineBuilder::new(vec![(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)])
        .with_breakpoints(3)
        .with_columns(3)
        .with_rows(3)
        .build()
        .unwrap();
    let sol = engine.run().unwrap();
    let json = serde_json::to_string(&sol).unwrap();
    assert!(json.contains("\"breakpoints\""));
    let back: Solution = serde_json::from_str(&json).unwrap();
    assert_eq!(back, sol);

    let fit = engine.baseline().unwrap();
    let back: RegressionBaseline =
        serde_json::from_str(&serde_json::to_string(&fit).unwrap()).unwrap();
    assert_eq!(back, fit);
}

#[test]
fn algorithm_serializes_as_variant_name() {
    let json = serde_json::to_string(&Algorithm::BottomUp).unwrap();
    assert_eq!(json, "\"BottomUp\"");
    let back: Algorithm = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Algorithm::BottomUp);
}
