//! Tests for the capacitated assignment backends.

use staffplan_core::StaffplanError;
use staffplan_test::{brute_force_best, random_instance};

use super::*;

const TOLERANCE: f64 = 1e-6;

fn backends() -> [Box<dyn AssignmentBackend>; 3] {
    [
        backend_for(BackendKind::Hungarian),
        backend_for(BackendKind::MinCostFlow),
        backend_for(BackendKind::LinearProgram),
    ]
}

fn run(backend: &dyn AssignmentBackend, problem: &CapacitatedProblem) -> Result<Vec<usize>> {
    backend.solve(problem, &Deadline::unlimited(), &mut SolveStats::default())
}

fn dense(weights: &[&[f64]], capacities: Vec<u32>) -> CapacitatedProblem {
    CapacitatedProblem::from_fn(weights.len(), capacities, |r, c| Some(weights[r][c])).unwrap()
}

#[test]
fn test_square_permutation() {
    let problem = dense(
        &[&[1.0, 5.0, 3.0], &[4.0, 6.0, 2.0], &[3.0, 1.0, 9.0]],
        vec![1, 1, 1],
    );
    for backend in backends() {
        let columns = run(backend.as_ref(), &problem).unwrap();
        assert_eq!(columns, vec![1, 0, 2], "{}", backend.name());
        assert_eq!(problem.verify(&columns).unwrap(), 18.0);
    }
}

#[test]
fn test_greedy_is_not_optimal_here() {
    // Row 0 prefers column 0, but giving it to row 1 is worth more.
    let problem = dense(&[&[10.0, 9.0], &[10.0, 1.0]], vec![1, 1]);
    for backend in backends() {
        let columns = run(backend.as_ref(), &problem).unwrap();
        assert_eq!(columns, vec![1, 0], "{}", backend.name());
    }
}

#[test]
fn test_capacity_expansion() {
    let problem = dense(&[&[4.0, 1.0], &[3.0, 0.0], &[5.0, 3.0]], vec![2, 1]);
    for backend in backends() {
        let columns = run(backend.as_ref(), &problem).unwrap();
        assert_eq!(problem.verify(&columns).unwrap(), 10.0, "{}", backend.name());
        assert_eq!(columns.iter().filter(|&&c| c == 0).count(), 2);
    }
}

#[test]
fn test_negative_weights() {
    let problem = dense(&[&[-1.0, -5.0], &[-2.0, -3.0]], vec![1, 1]);
    for backend in backends() {
        let columns = run(backend.as_ref(), &problem).unwrap();
        assert_eq!(problem.verify(&columns).unwrap(), -4.0, "{}", backend.name());
    }
}

#[test]
fn test_inadmissible_pairs_avoided() {
    let mut problem = CapacitatedProblem::new(2, vec![1, 1]);
    problem.set_weight(0, 0, 100.0).unwrap();
    problem.set_weight(0, 1, 0.0).unwrap();
    problem.set_weight(1, 0, 1.0).unwrap();
    for backend in backends() {
        let columns = run(backend.as_ref(), &problem).unwrap();
        assert_eq!(columns, vec![1, 0], "{}", backend.name());
    }
}

#[test]
fn test_total_capacity_short() {
    let row: &[f64] = &[1.0, 1.0];
    let problem = dense(&[row; 5], vec![2, 2]);
    for backend in backends() {
        let err = run(backend.as_ref(), &problem).unwrap_err();
        assert!(matches!(err, StaffplanError::Infeasible(_)), "{}", backend.name());
    }
}

#[test]
fn test_hall_violation_is_infeasible() {
    // Enough capacity overall, but rows 0 and 1 both only fit column 0.
    let problem = CapacitatedProblem::from_fn(3, vec![1, 5], |r, c| {
        if r < 2 && c == 1 {
            None
        } else {
            Some(1.0)
        }
    })
    .unwrap();
    assert!(problem.check_feasible().is_ok());
    for backend in backends() {
        let err = run(backend.as_ref(), &problem).unwrap_err();
        assert!(matches!(err, StaffplanError::Infeasible(_)), "{}", backend.name());
    }
}

#[test]
fn test_empty_problem() {
    let problem = CapacitatedProblem::new(0, vec![1, 1]);
    for backend in backends() {
        assert!(run(backend.as_ref(), &problem).unwrap().is_empty());
    }
}

#[test]
fn test_zero_time_limit() {
    let problem = dense(&[&[1.0]], vec![1]);
    for backend in backends() {
        let err = backend
            .solve(&problem, &Deadline::millis(0), &mut SolveStats::default())
            .unwrap_err();
        assert!(matches!(err, StaffplanError::Timeout { .. }), "{}", backend.name());
    }
}

#[test]
fn test_stats_count_augmentations() {
    let problem = dense(&[&[1.0, 2.0], &[3.0, 4.0]], vec![1, 1]);
    for backend in backends() {
        let mut stats = SolveStats::default();
        backend.solve(&problem, &Deadline::unlimited(), &mut stats).unwrap();
        assert_eq!(stats.augmentations, 2);
        assert!(stats.relaxations > 0);
    }
}

#[test]
fn test_set_weight_validation() {
    let mut problem = CapacitatedProblem::new(1, vec![1]);
    assert!(problem.set_weight(1, 0, 1.0).is_err());
    assert!(problem.set_weight(0, 1, 1.0).is_err());
    assert!(problem.set_weight(0, 0, f64::NAN).is_err());
    assert_eq!(problem.admissible_edges(), 0);
}

#[test]
fn test_verify_catches_violations() {
    let problem = dense(&[&[1.0, 2.0], &[3.0, 4.0]], vec![1, 1]);
    for bad in [vec![0], vec![0, 0], vec![0, 2]] {
        assert!(matches!(
            problem.verify(&bad),
            Err(StaffplanError::SolverFailure(_))
        ));
    }
}

#[test]
fn test_matches_brute_force_on_random_instances() {
    for seed in 0..40 {
        let instance = random_instance(seed, 5, 3);
        let index = |id: &staffplan_core::EmployeeId| {
            instance.employees.iter().position(|e| e == id).unwrap()
        };
        let capacities: Vec<u32> = instance.positions.iter().map(|p| p.capacity).collect();
        let mut problem = CapacitatedProblem::new(instance.employees.len(), capacities.clone());
        for r in &instance.records {
            problem.set_weight(index(&r.employee), r.position.index(), r.score).unwrap();
        }

        let expected = brute_force_best(problem.rows(), &capacities, |r, c| problem.weight(r, c));
        for backend in backends() {
            match (&expected, run(backend.as_ref(), &problem)) {
                (Some(best), Ok(columns)) => {
                    let total = problem.verify(&columns).unwrap();
                    assert!(
                        (total - best.total).abs() < TOLERANCE,
                        "seed {seed} {}: {total} vs {}",
                        backend.name(),
                        best.total
                    );
                }
                (None, Err(StaffplanError::Infeasible(_))) => {}
                (expected, got) => panic!(
                    "seed {seed} {}: expected {:?}, got {:?}",
                    backend.name(),
                    expected,
                    got
                ),
            }
        }
    }
}

#[test]
fn test_backends_agree_on_larger_instances() {
    for seed in 100..110 {
        let instance = random_instance(seed, 12, 6);
        let capacities: Vec<u32> = instance.positions.iter().map(|p| p.capacity + 1).collect();
        let mut problem = CapacitatedProblem::new(instance.employees.len(), capacities);
        for r in &instance.records {
            let row = instance.employees.iter().position(|e| *e == r.employee).unwrap();
            problem.set_weight(row, r.position.index(), r.score).unwrap();
        }

        let hungarian = run(&Hungarian, &problem).map(|c| problem.verify(&c).unwrap());
        for other in [&MinCostFlow as &dyn AssignmentBackend, &LinearProgram] {
            let total = run(other, &problem).map(|c| problem.verify(&c).unwrap());
            match (&hungarian, total) {
                (Ok(a), Ok(b)) => {
                    assert!((a - b).abs() < TOLERANCE, "seed {seed} {}: {a} vs {b}", other.name())
                }
                (Err(a), Err(b)) => {
                    assert!(matches!(a, StaffplanError::Infeasible(_)));
                    assert!(matches!(b, StaffplanError::Infeasible(_)));
                }
                (a, b) => panic!("seed {seed} {}: backends disagree: {:?} vs {:?}", other.name(), a, b),
            }
        }
    }
}

#[test]
fn test_linear_program_respects_capacity_and_inadmissible_pairs() {
    // Column 1 seats two, column 0 one; row 2 may only sit in column 1.
    let problem = CapacitatedProblem::from_fn(3, vec![1, 2], |r, c| match (r, c) {
        (2, 0) => None,
        (_, 0) => Some(8.0),
        (_, _) => Some(1.0),
    })
    .unwrap();
    let mut stats = SolveStats::default();
    let columns = LinearProgram
        .solve(&problem, &Deadline::unlimited(), &mut stats)
        .unwrap();
    assert_eq!(columns[2], 1);
    assert_eq!(problem.verify(&columns).unwrap(), 10.0);
    assert_eq!(stats.augmentations, 3);
}

#[test]
fn test_backend_names_follow_config() {
    for kind in [BackendKind::Hungarian, BackendKind::MinCostFlow, BackendKind::LinearProgram] {
        assert_eq!(backend_for(kind).name(), kind.name());
    }
}
