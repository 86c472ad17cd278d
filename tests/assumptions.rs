use boreal_sat::{config::Config, reports::Report, solver::Solver};

mod assumptions {
    use super::*;

    #[test]
    fn conflicting_assumptions() {
        let mut solver = Solver::from_config(Config::default());
        let p = solver.fresh_literal().unwrap();
        let q = solver.fresh_literal().unwrap();

        assert!(solver.add_clause(vec![p, q]).is_ok());

        assert_eq!(solver.solve_with(vec![-p, -q]), Report::Unsatisfiable);

        // The conflict holds the negations of the assumptions responsible.
        let mut conflict = solver.conflict().to_vec();
        conflict.sort_unstable();
        assert_eq!(conflict, vec![p, q]);

        // Unsatisfiability was relative to the assumptions.
        assert!(solver.consistent());
        assert_eq!(solver.solve(), Report::Satisfiable);
    }

    #[test]
    fn assumption_narrows_models() {
        let mut solver = Solver::from_config(Config::default());
        let p = solver.fresh_literal().unwrap();
        let q = solver.fresh_literal().unwrap();

        assert!(solver.add_clause(vec![p, q]).is_ok());

        assert_eq!(solver.solve_with(vec![-p]), Report::Satisfiable);
        assert_eq!(solver.model()[p.atom() as usize], Some(false));
        assert_eq!(solver.model()[q.atom() as usize], Some(true));
    }

    #[test]
    fn assumption_of_proven_literal() {
        let mut solver = Solver::from_config(Config::default());
        let p = solver.fresh_literal().unwrap();

        assert!(solver.add_clause(p).is_ok());

        // Assuming a root-level consequence is a no-op.
        assert_eq!(solver.solve_with(vec![p]), Report::Satisfiable);

        // Assuming its negation conflicts immediately.
        assert_eq!(solver.solve_with(vec![-p]), Report::Unsatisfiable);
        assert_eq!(solver.conflict(), &[p]);
        assert!(solver.consistent());
    }

    #[test]
    fn assumption_subset_in_conflict() {
        let mut solver = Solver::from_config(Config::default());
        let p = solver.fresh_literal().unwrap();
        let q = solver.fresh_literal().unwrap();
        let r = solver.fresh_literal().unwrap();

        assert!(solver.add_clause(vec![-p, -q]).is_ok());

        // r is irrelevant to the conflict of p and q.
        assert_eq!(solver.solve_with(vec![r, p, q]), Report::Unsatisfiable);
        assert!(!solver.conflict().is_empty());
        assert!(!solver.conflict().contains(&r));
        assert!(!solver.conflict().contains(&-r));
    }

    #[test]
    fn stacked_solves() {
        let mut solver = Solver::from_config(Config::default());
        let p = solver.fresh_literal().unwrap();
        let q = solver.fresh_literal().unwrap();
        let r = solver.fresh_literal().unwrap();

        assert!(solver.add_clause(vec![p, q, r]).is_ok());

        assert_eq!(solver.solve_with(vec![-p]), Report::Satisfiable);
        assert_eq!(solver.solve_with(vec![-p, -q]), Report::Satisfiable);
        assert_eq!(solver.model()[r.atom() as usize], Some(true));
        assert_eq!(
            solver.solve_with(vec![-p, -q, -r]),
            Report::Unsatisfiable
        );
        assert_eq!(solver.solve(), Report::Satisfiable);
    }
}
