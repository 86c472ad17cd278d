use boreal_sat::{
    config::Config,
    reports::Report,
    solver::Solver,
    structures::literal::CLiteral,
};

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Builds a solver over `atoms` fresh atoms and the given clauses, in
/// 1-based DIMACS-style integer form.
fn solver_over(atoms: u32, clauses: &[Vec<i32>]) -> (Solver, bool) {
    let mut solver = Solver::from_config(Config::default());
    for _ in 0..atoms {
        solver.fresh_atom().unwrap();
    }

    let mut consistent = true;
    for ints in clauses {
        let clause: Vec<CLiteral> = ints
            .iter()
            .map(|int| CLiteral::new(int.unsigned_abs() - 1, int.is_positive()))
            .collect();
        if solver.add_clause(clause).is_err() {
            consistent = false;
        }
    }
    (solver, consistent)
}

/// True if `model` satisfies every clause.
fn satisfies(model: &[Option<bool>], clauses: &[Vec<i32>]) -> bool {
    clauses.iter().all(|clause| {
        clause
            .iter()
            .any(|int| model[(int.unsigned_abs() - 1) as usize] == Some(int.is_positive()))
    })
}

/// A reference satisfiability check by branching on the first unassigned
/// atom, for small instances.
fn reference_satisfiable(atoms: u32, clauses: &[Vec<i32>], assignment: &mut Vec<Option<bool>>) -> bool {
    let mut unit = None;
    for clause in clauses {
        let mut satisfied = false;
        let mut unassigned = None;
        let mut unassigned_count = 0;
        for int in clause {
            match assignment[(int.unsigned_abs() - 1) as usize] {
                None => {
                    unassigned = Some(*int);
                    unassigned_count += 1;
                }
                Some(value) => {
                    if value == int.is_positive() {
                        satisfied = true;
                        break;
                    }
                }
            }
        }
        if satisfied {
            continue;
        }
        match unassigned_count {
            0 => return false,
            1 => {
                unit = unassigned;
                break;
            }
            _ => {}
        }
    }

    let branch = match unit {
        Some(int) => int,
        None => {
            let Some(atom) = (0..atoms).find(|atom| assignment[*atom as usize].is_none()) else {
                return true;
            };
            (atom + 1) as i32
        }
    };

    let atom = (branch.unsigned_abs() - 1) as usize;
    let first = branch.is_positive();
    for value in [first, !first] {
        assignment[atom] = Some(value);
        if reference_satisfiable(atoms, clauses, assignment) {
            return true;
        }
        // A unit branch admits one value only.
        if unit.is_some() {
            break;
        }
    }
    assignment[atom] = None;
    false
}

/// Pigeonhole clauses: `pigeons` pigeons into `pigeons - 1` holes.
fn pigeonhole(pigeons: u32) -> (u32, Vec<Vec<i32>>) {
    let holes = pigeons - 1;
    let var = |pigeon: u32, hole: u32| (pigeon * holes + hole + 1) as i32;

    let mut clauses = Vec::new();
    for pigeon in 0..pigeons {
        clauses.push((0..holes).map(|hole| var(pigeon, hole)).collect());
    }
    for hole in 0..holes {
        for pigeon in 0..pigeons {
            for other in pigeon + 1..pigeons {
                clauses.push(vec![-var(pigeon, hole), -var(other, hole)]);
            }
        }
    }
    (pigeons * holes, clauses)
}

/// Random 3-SAT clauses over `atoms` atoms.
fn random_3sat(rng: &mut impl Rng, atoms: u32, count: usize) -> Vec<Vec<i32>> {
    let mut clauses = Vec::with_capacity(count);
    while clauses.len() < count {
        let mut clause = Vec::with_capacity(3);
        while clause.len() < 3 {
            let atom = rng.random_range(1..=atoms) as i32;
            if clause.iter().all(|l: &i32| l.unsigned_abs() != atom as u32) {
                let negate = rng.random_bool(0.5);
                clause.push(if negate { -atom } else { atom });
            }
        }
        clauses.push(clause);
    }
    clauses
}

mod solving {
    use super::*;

    #[test]
    fn pigeonhole_four_is_unsatisfiable() {
        let (atoms, clauses) = pigeonhole(4);
        let (mut solver, consistent) = solver_over(atoms, &clauses);
        assert!(consistent);

        assert_eq!(solver.solve(), Report::Unsatisfiable);
    }

    #[test]
    fn pigeonhole_three_into_three_is_satisfiable() {
        // Three pigeons into three holes: drop the fourth pigeon's clauses.
        let holes = 3;
        let var = |pigeon: u32, hole: u32| (pigeon * holes + hole + 1) as i32;

        let mut clauses: Vec<Vec<i32>> = Vec::new();
        for pigeon in 0..3 {
            clauses.push((0..holes).map(|hole| var(pigeon, hole)).collect());
        }
        for hole in 0..holes {
            for pigeon in 0..3 {
                for other in pigeon + 1..3 {
                    clauses.push(vec![-var(pigeon, hole), -var(other, hole)]);
                }
            }
        }

        let (mut solver, consistent) = solver_over(3 * holes, &clauses);
        assert!(consistent);
        assert_eq!(solver.solve(), Report::Satisfiable);
        assert!(satisfies(solver.model(), &clauses));
    }

    #[test]
    fn random_3sat_agrees_with_reference() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1377);

        for round in 0..60 {
            let atoms = 6 + (round % 12);
            let count = (atoms as f64 * 4.2).round() as usize;
            let clauses = random_3sat(&mut rng, atoms, count);

            let (mut solver, consistent) = solver_over(atoms, &clauses);
            let report = match consistent {
                true => solver.solve(),
                false => Report::Unsatisfiable,
            };

            let mut assignment = vec![None; atoms as usize];
            let expected = match reference_satisfiable(atoms, &clauses, &mut assignment) {
                true => Report::Satisfiable,
                false => Report::Unsatisfiable,
            };

            assert_eq!(report, expected, "Disagreement on round {round}");

            if report == Report::Satisfiable {
                assert!(
                    satisfies(solver.model(), &clauses),
                    "Model fails a clause on round {round}",
                );
            }
        }
    }

    #[test]
    fn larger_random_models_satisfy() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(550);

        for round in 0..10 {
            let atoms = 80;
            // Below the phase transition, so mostly satisfiable.
            let clauses = random_3sat(&mut rng, atoms, 280);
            let (mut solver, consistent) = solver_over(atoms, &clauses);
            if !consistent {
                continue;
            }

            if solver.solve() == Report::Satisfiable {
                assert!(
                    satisfies(solver.model(), &clauses),
                    "Model fails a clause on round {round}",
                );
            }
        }
    }

    #[test]
    fn replay_is_deterministic() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7529);
        let atoms = 50;
        let clauses = random_3sat(&mut rng, atoms, 210);

        let (mut first, first_ok) = solver_over(atoms, &clauses);
        let (mut second, second_ok) = solver_over(atoms, &clauses);
        assert_eq!(first_ok, second_ok);
        if !first_ok {
            return;
        }

        assert_eq!(first.solve(), second.solve());
        assert_eq!(first.model(), second.model());
        assert_eq!(
            first.counters().conflicts,
            second.counters().conflicts
        );
        assert_eq!(
            first.counters().decisions,
            second.counters().decisions
        );
    }

    #[test]
    fn budget_exhaustion_leaves_solver_usable() {
        let (atoms, clauses) = pigeonhole(5);
        let (mut solver, consistent) = solver_over(atoms, &clauses);
        assert!(consistent);

        // Budgets are polled at restart boundaries, so the first search
        // segment may settle the question regardless.
        solver.set_conflict_budget(Some(1));
        let budgeted = solver.solve();
        assert_ne!(budgeted, Report::Satisfiable);

        solver.set_conflict_budget(None);
        assert_eq!(solver.solve(), Report::Unsatisfiable);
    }

    #[test]
    fn interrupt_flag_is_polled() {
        let (atoms, clauses) = pigeonhole(5);
        let (mut solver, _) = solver_over(atoms, &clauses);

        let interrupt = solver.interrupt_handle();
        interrupt.store(true, std::sync::atomic::Ordering::Relaxed);

        // The flag is polled at restart boundaries only, so an answer from
        // the first search segment stands.
        let report = solver.solve();
        assert_ne!(report, Report::Satisfiable);

        interrupt.store(false, std::sync::atomic::Ordering::Relaxed);
        assert_eq!(solver.solve(), Report::Unsatisfiable);
    }
}
