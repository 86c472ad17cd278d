use std::sync::Arc;

use boreal_sat::{
    config::Config,
    exchange::SharedExchange,
    reports::Report,
    solver::Solver,
    structures::literal::CLiteral,
};

/// Pigeonhole clauses, a reliable source of learnt clauses.
fn pigeonhole_clauses(pigeons: u32) -> (u32, Vec<Vec<i32>>) {
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

fn worker_over(
    atoms: u32,
    clauses: &[Vec<i32>],
    exchange: &Arc<SharedExchange>,
    worker: usize,
) -> Solver {
    let mut config = Config::default();
    config.random_seed += worker as u64;

    let mut solver = Solver::from_config(config);
    solver.attach_exchange(exchange.clone(), worker);

    for _ in 0..atoms {
        solver.fresh_atom().unwrap();
    }
    for ints in clauses {
        let clause: Vec<CLiteral> = ints
            .iter()
            .map(|int| CLiteral::new(int.unsigned_abs() - 1, int.is_positive()))
            .collect();
        solver.add_clause(clause).unwrap();
    }
    solver
}

mod exchange {
    use super::*;

    #[test]
    fn published_clauses_reach_every_worker() {
        let workers = 4;
        let exchange = Arc::new(SharedExchange::new(workers));
        let (atoms, clauses) = pigeonhole_clauses(4);

        let mut fleet: Vec<Solver> = (0..workers)
            .map(|worker| worker_over(atoms, &clauses, &exchange, worker))
            .collect();

        // Worker zero learns, and publishes, while the others are idle.
        assert_eq!(fleet[0].solve(), Report::Unsatisfiable);
        let published = fleet[0].counters().exported_clauses;
        assert!(published > 0, "No clauses were published");

        // Every other worker consumes exactly the published clauses.
        for worker in 1..workers {
            fleet[worker].import_clauses();
            assert_eq!(fleet[worker].counters().imported_clauses, published);
        }

        // With all consumers past them, the producer reclaims its nodes ---
        // bar the tail, whose count settles only once the list grows.
        exchange.clean(0);
        assert!(exchange.node_count(0) <= 1);
    }

    #[test]
    fn imports_do_not_change_answers() {
        let workers = 3;
        let exchange = Arc::new(SharedExchange::new(workers));
        let (atoms, clauses) = pigeonhole_clauses(4);

        let mut fleet: Vec<Solver> = (0..workers)
            .map(|worker| worker_over(atoms, &clauses, &exchange, worker))
            .collect();

        assert_eq!(fleet[0].solve(), Report::Unsatisfiable);

        // Later workers adopt clauses from earlier ones and still agree.
        for solver in fleet.iter_mut().skip(1) {
            solver.import_clauses();
            assert_eq!(solver.solve(), Report::Unsatisfiable);
        }
    }

    #[test]
    fn threaded_fleet_agrees() {
        let workers = 4;
        let exchange = Arc::new(SharedExchange::new(workers));
        let (atoms, clauses) = pigeonhole_clauses(5);

        let mut fleet: Vec<Solver> = (0..workers)
            .map(|worker| worker_over(atoms, &clauses, &exchange, worker))
            .collect();

        let reports = std::thread::scope(|scope| {
            let handles: Vec<_> = fleet
                .iter_mut()
                .map(|solver| scope.spawn(move || solver.solve()))
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect::<Vec<_>>()
        });

        for report in reports {
            assert_eq!(report, Report::Unsatisfiable);
        }
    }

    #[test]
    fn threaded_fleet_on_satisfiable_formula() {
        let workers = 4;
        let exchange = Arc::new(SharedExchange::new(workers));

        // A satisfiable ring of implications with a few forced atoms.
        let atoms = 30;
        let mut clauses: Vec<Vec<i32>> = Vec::new();
        clauses.push(vec![1]);
        for atom in 1..atoms {
            clauses.push(vec![-(atom as i32), atom as i32 + 1]);
        }

        let mut fleet: Vec<Solver> = (0..workers)
            .map(|worker| worker_over(atoms, &clauses, &exchange, worker))
            .collect();

        let reports = std::thread::scope(|scope| {
            let handles: Vec<_> = fleet
                .iter_mut()
                .map(|solver| scope.spawn(move || solver.solve()))
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect::<Vec<_>>()
        });

        for report in reports {
            assert_eq!(report, Report::Satisfiable);
        }
    }
}
