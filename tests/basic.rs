use boreal_sat::{
    builder::ClauseOk,
    config::Config,
    reports::Report,
    solver::Solver,
    structures::{literal::CLiteral, valuation::Valuation},
    types::err,
};

mod basic {
    use super::*;

    #[test]
    fn empty_input() {
        let mut solver = Solver::from_config(Config::default());

        assert_eq!(solver.solve(), Report::Satisfiable);
        assert!(solver.model().is_empty());
    }

    #[test]
    fn one_literal() {
        let mut solver = Solver::from_config(Config::default());
        let p = solver.fresh_literal().unwrap();

        assert_eq!(solver.add_clause(p), Ok(ClauseOk::Added));
        assert_eq!(solver.solve(), Report::Satisfiable);
        assert_eq!(solver.model()[p.atom() as usize], Some(true));
    }

    #[test]
    fn contradiction() {
        let mut solver = Solver::from_config(Config::default());
        let p = solver.fresh_literal().unwrap();

        assert!(solver.add_clause(p).is_ok());
        assert_eq!(
            solver.add_clause(-p),
            Err(err::BuildError::Unsatisfiable)
        );

        assert!(!solver.consistent());
        assert_eq!(solver.solve(), Report::Unsatisfiable);
    }

    #[test]
    fn unit_conjunct() {
        let mut solver = Solver::from_config(Config::default());
        let p = solver.fresh_literal().unwrap();
        let q = solver.fresh_literal().unwrap();

        assert_eq!(solver.add_clause(vec![p, q]), Ok(ClauseOk::Added));
        assert!(solver.add_clause(-p).is_ok());

        assert_eq!(solver.solve(), Report::Satisfiable);
        assert_eq!(solver.value_of(p.atom()), Some(false));
        assert_eq!(solver.value_of(q.atom()), Some(true));
    }

    #[test]
    fn conflict() {
        let mut solver = Solver::from_config(Config::default());
        let p = solver.fresh_literal().unwrap();
        let q = solver.fresh_literal().unwrap();

        assert!(solver.add_clause(vec![p, q]).is_ok());
        assert!(solver.add_clause(vec![-p, -q]).is_ok());
        assert!(solver.add_clause(vec![p, -q]).is_ok());
        assert!(solver.add_clause(vec![-p, q]).is_ok());

        assert_eq!(solver.solve(), Report::Unsatisfiable);

        // An unsatisfiable solve without assumptions is final.
        assert!(!solver.consistent());
        assert_eq!(solver.solve(), Report::Unsatisfiable);
    }

    #[test]
    fn tautology_skip() {
        let mut solver = Solver::from_config(Config::default());
        let p = solver.fresh_literal().unwrap();
        let q = solver.fresh_literal().unwrap();

        assert_eq!(
            solver.add_clause(vec![p, -q, -p]),
            Ok(ClauseOk::Skipped)
        );
        assert_eq!(solver.solve(), Report::Satisfiable);
    }

    #[test]
    fn duplicate_literals() {
        let mut solver = Solver::from_config(Config::default());
        let p = solver.fresh_literal().unwrap();
        let q = solver.fresh_literal().unwrap();

        assert_eq!(solver.add_clause(vec![p, p, q, q]), Ok(ClauseOk::Added));
        assert_eq!(solver.solve(), Report::Satisfiable);

        let model = solver.model();
        assert!(model[p.atom() as usize] == Some(true) || model[q.atom() as usize] == Some(true));
    }

    #[test]
    fn satisfied_clause_skipped() {
        let mut solver = Solver::from_config(Config::default());
        let p = solver.fresh_literal().unwrap();
        let q = solver.fresh_literal().unwrap();

        assert!(solver.add_clause(p).is_ok());
        assert_eq!(solver.add_clause(vec![p, q]), Ok(ClauseOk::Skipped));
    }

    #[test]
    fn model_satisfies_chain() {
        // A chain of implications from a unit.
        let mut solver = Solver::from_config(Config::default());
        let literals: Vec<CLiteral> = (0..8).map(|_| solver.fresh_literal().unwrap()).collect();

        assert!(solver.add_clause(literals[0]).is_ok());
        for pair in literals.windows(2) {
            assert!(solver.add_clause(vec![-pair[0], pair[1]]).is_ok());
        }

        assert_eq!(solver.solve(), Report::Satisfiable);
        for literal in &literals {
            assert_eq!(solver.model().value_of(literal.atom()), Some(true));
        }
    }
}
