//! Integration tests over task files

use approx::assert_relative_eq;
use rxnsim_core::tests::test_helpers::{fixture_path, run_task_file, total_concentration};

#[test]
fn test_isomerization() {
    let result = run_task_file(&fixture_path(&["integration", "data", "isomerization.rxn"]))
        .expect("Failed to run task");

    assert_eq!(result.model.species_ids(), vec!["A", "B"]);
    assert_eq!(result.units.time, "s");
    assert_eq!(result.units.concentration, "mM");

    let trajectory = &result.trajectory;
    assert_eq!(*trajectory.time.last().unwrap(), 100.0);

    // A relaxes toward 60 from above, B from below
    let a = trajectory.series("A").unwrap();
    let b = trajectory.series("B").unwrap();
    assert!(a.windows(2).all(|w| w[1] <= w[0]));
    assert!(b.windows(2).all(|w| w[1] >= w[0]));
    assert!(*a.last().unwrap() > 60.0);
    assert_relative_eq!(*a.last().unwrap(), 60.0, epsilon = 1e-3);

    let last = trajectory.len() - 1;
    assert_relative_eq!(total_concentration(trajectory, last), 120.0, epsilon = 1e-9);
}

#[test]
fn test_decay() {
    let result = run_task_file(&fixture_path(&["integration", "data", "decay.rxn"]))
        .expect("Failed to run task");

    assert!(result.model.reactions[0].products.is_empty());
    let a = result.trajectory.series("A").unwrap();
    assert!(a.iter().all(|&c| c >= 0.0));
    assert!(a.windows(2).all(|w| w[1] <= w[0]));
}

#[test]
fn test_dimerization() {
    let result = run_task_file(&fixture_path(&["integration", "data", "dimerization.rxn"]))
        .expect("Failed to run task");

    let state = result.trajectory.final_state().unwrap();
    // species sorted: A, A2; equilibrium k1 [A]^2 = k2 [A2]
    let (a, a2) = (state[0], state[1]);
    assert_relative_eq!(0.02 * a * a, 0.5 * a2, epsilon = 1e-6);
    assert_relative_eq!(a + 2.0 * a2, 10.0, epsilon = 1e-9);
}

#[test]
fn test_enzyme_kinetics() {
    let result = run_task_file(&fixture_path(&["integration", "data", "enzyme.rxn"]))
        .expect("Failed to run task");

    assert_eq!(
        result.model.species_ids(),
        vec!["E", "ES", "Inhibitor", "P", "S"]
    );
    assert_eq!(result.model.reactions.len(), 3);
    assert_eq!(result.units.time, "min");

    let trajectory = &result.trajectory;
    let e = trajectory.series("E").unwrap();
    let es = trajectory.series("ES").unwrap();
    let s = trajectory.series("S").unwrap();
    let p = trajectory.series("P").unwrap();
    for i in (0..trajectory.len()).step_by(500) {
        // enzyme and substrate totals are conserved
        assert_relative_eq!(e[i] + es[i], 1.0, epsilon = 1e-9);
        assert_relative_eq!(s[i] + es[i] + p[i], 10.0, epsilon = 1e-9);
    }
    assert!(p.windows(2).all(|w| w[1] >= w[0]));

    let inhibitor = trajectory.series("Inhibitor").unwrap();
    assert!(inhibitor.iter().all(|&c| c == 2.0));

    assert!(result
        .diagnostics
        .warnings()
        .any(|d| d.message.contains("'Inhibitor' takes part in no reaction")));
}
