//! Determinism tests - ensure the same task produces identical outputs

use rxnsim_core::tests::test_helpers::{fixture_path, run_task_file, trajectories_approx_equal};

#[test]
fn test_isomerization_determinism() {
    let path = fixture_path(&["integration", "data", "isomerization.rxn"]);
    let first = run_task_file(&path).expect("Failed to run task");
    let second = run_task_file(&path).expect("Failed to run task");

    assert_eq!(first.model, second.model);
    assert_eq!(first.listing, second.listing);
    assert!(trajectories_approx_equal(&first.trajectory, &second.trajectory, 0.0));
}

#[test]
fn test_enzyme_determinism() {
    let path = fixture_path(&["integration", "data", "enzyme.rxn"]);
    let results: Vec<_> = (0..3)
        .map(|_| run_task_file(&path).expect("Failed to run task"))
        .collect();

    for other in &results[1..] {
        assert_eq!(results[0].model, other.model);
        assert_eq!(results[0].trajectory, other.trajectory);
    }
}
