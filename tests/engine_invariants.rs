use pwl_dp::{Algorithm, Grid, PwlEngine, PwlEngineBuilder, PwlError, PwlInstance, Sample};

fn wave() -> Vec<Sample> {
    (0..25)
        .map(|k| {
            let x = k as f64 * 0.25;
            Sample::new(x, (x * 1.3).cos() + 0.1 * x)
        })
        .collect()
}

#[test]
fn repeated_runs_are_identical() {
    let instance = PwlInstance::new(wave(), 4, 6, 4).unwrap();
    for algorithm in Algorithm::ALL {
        let engine = PwlEngine::new(instance.clone(), algorithm);
        let first = engine.run().unwrap();
        let second = engine.run().unwrap();
        assert_eq!(first, second, "{algorithm}");
    }
}

#[test]
fn reported_error_matches_recomputation() {
    let instance = PwlInstance::new(wave(), 4, 6, 4).unwrap();
    for algorithm in Algorithm::ALL {
        let sol = algorithm.solve(&instance).unwrap();
        let recomputed = instance.total_error(&sol.breakpoints);
        assert!((sol.error - recomputed).abs() < 1e-9, "{algorithm}");
        for (p, (&x, &y)) in sol.breakpoints.iter().zip(sol.x.iter().zip(&sol.y)) {
            assert_eq!(instance.grid().coords(*p), (x, y));
        }
    }
}

#[test]
fn endpoints_sit_on_outer_columns() {
    let instance = PwlInstance::new(wave(), 3, 8, 3).unwrap();
    for algorithm in Algorithm::ALL {
        let sol = algorithm.solve(&instance).unwrap();
        assert_eq!(sol.breakpoints.first().map(|p| p.i), Some(0));
        assert_eq!(sol.breakpoints.last().map(|p| p.i), Some(7));
        assert_eq!(sol.x[0], instance.grid().xs()[0]);
        assert_eq!(sol.x[2], instance.grid().xs()[7]);
    }
}

#[test]
fn input_is_left_untouched() {
    let samples = wave();
    let instance = PwlInstance::new(samples.clone(), 3, 5, 4).unwrap();
    let grid_before = instance.grid().clone();
    for algorithm in Algorithm::ALL {
        algorithm.solve(&instance).unwrap();
    }
    assert_eq!(instance.samples(), samples.as_slice());
    assert_eq!(instance.grid(), &grid_before);
}

#[test]
fn invalid_inputs_are_rejected_before_solving() {
    let err = PwlEngineBuilder::new(vec![(0.0, 1.0), (0.0, 2.0)])
        .build()
        .unwrap_err();
    assert!(matches!(err, PwlError::InvalidInput(_)));

    let err = PwlEngineBuilder::new(vec![(0.0, f64::NAN), (1.0, 2.0)])
        .build()
        .unwrap_err();
    assert!(matches!(err, PwlError::InvalidInput(_)));

    let err = PwlEngineBuilder::new(vec![(1.0, 0.0), (0.0, 2.0)])
        .build()
        .unwrap_err();
    assert!(matches!(err, PwlError::InvalidInput(_)));

    let err = PwlEngineBuilder::new(wave()).with_rows(0).build().unwrap_err();
    assert!(matches!(err, PwlError::InvalidConfig(_)));

    let err = PwlInstance::from_xy(&[0.0, 1.0], &[0.0], 2, 3, 3).unwrap_err();
    assert!(matches!(err, PwlError::InvalidInput(_)));
}

#[test]
fn unknown_selector_is_an_error() {
    let err = "greedy".parse::<Algorithm>().unwrap_err();
    assert_eq!(err, PwlError::UnknownAlgorithm("greedy".into()));
    assert!(err.to_string().contains("greedy"));
}

#[test]
fn explicit_grid_restricts_candidates() {
    let grid = Grid::new(vec![0.0, 3.0, 6.0], vec![-1.0, 0.0, 1.0]).unwrap();
    let engine = PwlEngineBuilder::new(wave())
        .with_grid(grid)
        .with_algorithm(Algorithm::BottomUp)
        .build()
        .unwrap();
    let sol = engine.run().unwrap();
    assert_eq!(sol.x, vec![0.0, 3.0, 6.0]);
    assert!(sol.y.iter().all(|y| [-1.0, 0.0, 1.0].contains(y)));
}
