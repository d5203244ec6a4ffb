#[cfg(test)]
mod tests {
    use std::num::NonZero;
    use std::time::Duration;

    use itertools::Itertools;
    use unordered_pair::UnorderedPair;

    use crate::builder::PuzzleBuilder;
    use crate::cancel::CancellationToken;
    use crate::cell::{Color, EdgeKind, NodeKind};
    use crate::error::{InvalidPuzzle, SolverFailure};
    use crate::location::Location;
    use crate::path::Path;
    use crate::search::{Solver, SolverConfig};
    use crate::step::EdgeId;
    use crate::validate::verify_path;

    fn grid(w: usize, h: usize) -> PuzzleBuilder {
        PuzzleBuilder::with_dims((NonZero::new(w).unwrap(), NonZero::new(h).unwrap()))
    }

    fn walks(path: &Path, a: Location, b: Location) -> bool {
        path.edges().contains(&UnorderedPair(a, b))
    }

    #[test]
    fn open_grid() {
        let puzzle = grid(3, 3)
            .set_node(Location(0, 0), NodeKind::Start)
            .set_node(Location(2, 2), NodeKind::Exit)
            .build()
            .unwrap();

        assert_eq!(format!("{}", puzzle), "S-.-.
| | |
.-.-.
| | |
.-.-E
");

        let path = puzzle.solve().unwrap();
        assert!(path.len() >= 5);
        assert_eq!(path.first(), Some(Location(0, 0)));
        assert_eq!(path.last(), Some(Location(2, 2)));
        assert_eq!(verify_path(&puzzle, &path), Ok(()));
    }

    #[test]
    fn routes_around_obstacle() {
        let puzzle = grid(3, 3)
            .set_node(Location(0, 0), NodeKind::Start)
            .set_node(Location(2, 2), NodeKind::Exit)
            .set_edge(EdgeId::vertical(1, 0), EdgeKind::Obstacle)
            .build()
            .unwrap();

        let path = puzzle.solve().unwrap();
        assert!(!walks(&path, Location(1, 0), Location(1, 1)));
        assert_eq!(verify_path(&puzzle, &path), Ok(()));
    }

    #[test]
    fn walled_in_start() {
        let puzzle = grid(3, 3)
            .set_node(Location(0, 0), NodeKind::Start)
            .set_node(Location(2, 2), NodeKind::Exit)
            .disconnect(UnorderedPair(Location(0, 0), Location(1, 0)))
            .disconnect(UnorderedPair(Location(0, 0), Location(0, 1)))
            .build()
            .unwrap();

        assert_eq!(puzzle.solve(), Err(SolverFailure::NoSolution));
    }

    #[test]
    fn black_and_white_must_be_split() {
        let puzzle = grid(3, 3)
            .set_node(Location(0, 0), NodeKind::Start)
            .set_node(Location(2, 2), NodeKind::Exit)
            .set_square(Location(0, 0), Color::Black)
            .set_square(Location(1, 0), Color::White)
            .build()
            .unwrap();

        let mut solver = Solver::new(&puzzle, SolverConfig::default());
        assert!(solver.requirements().is_required(Location(1, 0)));
        assert!(solver.requirements().is_required(Location(1, 1)));

        let path = solver.solve().unwrap();
        assert!(path.contains(Location(1, 0)));
        assert!(path.contains(Location(1, 1)));
        assert!(walks(&path, Location(1, 0), Location(1, 1)));
        assert_eq!(verify_path(&puzzle, &path), Ok(()));
    }

    #[test]
    fn colors_that_cannot_be_split() {
        // the only edge between the two squares is missing
        let puzzle = grid(3, 2)
            .set_node(Location(0, 0), NodeKind::Start)
            .set_node(Location(2, 1), NodeKind::Exit)
            .set_square(Location(0, 0), Color::Black)
            .set_square(Location(1, 0), Color::White)
            .set_edge(EdgeId::vertical(1, 0), EdgeKind::Obstacle)
            .build()
            .unwrap();

        assert_eq!(puzzle.solve(), Err(SolverFailure::NoSolution));

        let open = grid(3, 2)
            .set_node(Location(0, 0), NodeKind::Start)
            .set_node(Location(2, 1), NodeKind::Exit)
            .set_square(Location(0, 0), Color::Black)
            .set_square(Location(1, 0), Color::White)
            .build()
            .unwrap();

        let path = open.solve().unwrap();
        assert_eq!(verify_path(&open, &path), Ok(()));
    }

    #[test]
    fn monominoes() {
        let puzzle = grid(3, 2)
            .set_node(Location(0, 0), NodeKind::Start)
            .set_node(Location(2, 0), NodeKind::Exit)
            .set_polyomino(Location(0, 0), &[(0, 0)], false)
            .set_polyomino(Location(1, 0), &[(3, 3)], false)
            .build()
            .unwrap();

        let path = puzzle.solve().unwrap();
        assert_eq!(path.nodes(), &[Location(0, 0), Location(1, 0), Location(2, 0)]);
        assert_eq!(puzzle.render_with_path(&path), "S***E
|p|p|
.-.-.
");
    }

    #[test]
    fn swamp() {
        // a horizontal four and two vertical threes around a walled-off middle
        let puzzle = grid(5, 5)
            .set_edge(EdgeId::vertical(2, 1), EdgeKind::Obstacle)
            .set_node(Location(0, 4), NodeKind::Start)
            .set_node(Location(4, 0), NodeKind::Exit)
            .set_polyomino(Location(0, 1), &[(0, 0), (1, 0), (2, 0), (3, 0)], false)
            .set_polyomino(Location(1, 3), &[(0, 0), (0, 1), (0, 2)], false)
            .set_polyomino(Location(2, 3), &[(0, 0), (0, 1), (0, 2)], false)
            .build()
            .unwrap();

        assert_eq!(format!("{}", puzzle), ".-.-.-.-E
| | | | |
.-.-.-.-.
|p|   | |
.-.-.-.-.
| | | | |
.-.-.-.-.
| |p|p| |
S-.-.-.-.
");

        // up the left side, then around the three middle columns
        let known = Path::from(vec![
            Location(0, 4), Location(0, 3), Location(0, 2), Location(0, 1), Location(0, 0),
            Location(1, 0), Location(1, 1), Location(1, 2), Location(1, 3),
            Location(2, 3), Location(3, 3), Location(3, 2), Location(3, 1), Location(3, 0),
            Location(4, 0),
        ]);
        assert_eq!(verify_path(&puzzle, &known), Ok(()));

        let path = puzzle.solve().unwrap();
        assert_eq!(verify_path(&puzzle, &path), Ok(()));
    }

    #[test]
    fn no_exits() {
        let puzzle = grid(3, 3)
            .set_node(Location(0, 0), NodeKind::Start)
            .build()
            .unwrap();

        let mut solver = Solver::new(&puzzle, SolverConfig::default());
        assert_eq!(solver.solve(), Err(SolverFailure::NoSolution));
        assert_eq!(solver.stats().extensions, 0);
    }

    #[test]
    fn malformed_puzzles_are_not_searched() {
        let no_start = grid(3, 3)
            .set_node(Location(2, 2), NodeKind::Exit)
            .build()
            .unwrap();
        assert_eq!(no_start.solve(), Err(SolverFailure::InvalidPuzzle(InvalidPuzzle::NoStart)));

        let inner_exit = grid(3, 3)
            .set_node(Location(0, 0), NodeKind::Start)
            .set_node(Location(1, 1), NodeKind::Exit)
            .build()
            .unwrap();
        let mut solver = Solver::new(&inner_exit, SolverConfig::default());
        assert_eq!(solver.solve(), Err(SolverFailure::InvalidPuzzle(InvalidPuzzle::ExitNotOnBoundary(Location(1, 1)))));
        assert_eq!(solver.stats().extensions, 0);
    }

    #[test]
    fn required_features_are_covered() {
        let puzzle = grid(4, 4)
            .set_node(Location(0, 0), NodeKind::Start)
            .set_node(Location(3, 3), NodeKind::Exit)
            .set_node(Location(2, 1), NodeKind::Required)
            .set_edge(EdgeId::vertical(0, 2), EdgeKind::Required)
            .build()
            .unwrap();

        let path = puzzle.solve().unwrap();
        assert!(path.contains(Location(2, 1)));
        assert!(walks(&path, Location(0, 2), Location(0, 3)));
        assert_eq!(path.nodes().iter().unique().count(), path.len());
        assert_eq!(verify_path(&puzzle, &path), Ok(()));
    }

    #[test]
    fn passes_through_a_rejected_exit() {
        // reaching the first exit too early is not fatal while another exit remains
        let puzzle = grid(3, 3)
            .set_node(Location(0, 0), NodeKind::Start)
            .set_node(Location(1, 0), NodeKind::Exit)
            .set_node(Location(2, 2), NodeKind::Exit)
            .set_node(Location(2, 0), NodeKind::Required)
            .build()
            .unwrap();

        let mut solver = Solver::new(&puzzle, SolverConfig::default());
        let path = solver.solve().unwrap();
        assert_eq!(&path.nodes()[..3], &[Location(0, 0), Location(1, 0), Location(2, 0)]);
        assert_eq!(path.last(), Some(Location(2, 2)));
        assert!(solver.stats().exits_rejected >= 1);
    }

    #[test]
    fn exit_budget_is_per_branch() {
        // one exit: a branch that reaches it too early dies, but its siblings keep searching
        let puzzle = grid(3, 3)
            .set_node(Location(0, 0), NodeKind::Start)
            .set_node(Location(1, 0), NodeKind::Exit)
            .set_node(Location(2, 0), NodeKind::Required)
            .build()
            .unwrap();

        let mut solver = Solver::new(&puzzle, SolverConfig::default());
        let path = solver.solve().unwrap();
        assert_eq!(path.nodes()[path.len() - 2..], [Location(2, 0), Location(1, 0)]);
        assert!(solver.stats().exits_rejected >= 1);

        // the required node is only reachable through the exit
        let blocked = grid(3, 3)
            .set_node(Location(0, 0), NodeKind::Start)
            .set_node(Location(1, 0), NodeKind::Exit)
            .set_node(Location(2, 0), NodeKind::Required)
            .set_edge(EdgeId::vertical(2, 0), EdgeKind::Obstacle)
            .build()
            .unwrap();
        assert_eq!(blocked.solve(), Err(SolverFailure::NoSolution));
    }

    #[test]
    fn cancelled_before_start() {
        let puzzle = grid(3, 3)
            .set_node(Location(0, 0), NodeKind::Start)
            .set_node(Location(2, 2), NodeKind::Exit)
            .build()
            .unwrap();

        let token = CancellationToken::new();
        token.cancel();
        let config = SolverConfig::default().with_cancellation(token);
        assert_eq!(Solver::new(&puzzle, config).solve(), Err(SolverFailure::Aborted));

        let config = SolverConfig::default().with_time_limit(Duration::ZERO);
        assert_eq!(Solver::new(&puzzle, config).solve(), Err(SolverFailure::Aborted));

        let config = SolverConfig::default().with_time_limit(Duration::from_secs(60));
        assert!(Solver::new(&puzzle, config).solve().is_ok());
    }

    // an isolated required node: every walk to the exit fails, but only once it gets there
    fn unreachable_requirement() -> crate::puzzle::Puzzle {
        grid(7, 7)
            .set_node(Location(0, 0), NodeKind::Start)
            .set_node(Location(6, 6), NodeKind::Exit)
            .set_node(Location(3, 3), NodeKind::Required)
            .disconnect(UnorderedPair(Location(3, 3), Location(2, 3)))
            .disconnect(UnorderedPair(Location(3, 3), Location(4, 3)))
            .disconnect(UnorderedPair(Location(3, 3), Location(3, 2)))
            .disconnect(UnorderedPair(Location(3, 3), Location(3, 4)))
            .build()
            .unwrap()
    }

    #[test]
    fn time_limit_aborts_a_running_search() {
        let puzzle = unreachable_requirement();

        let config = SolverConfig::default().with_time_limit(Duration::from_millis(50));
        let mut solver = Solver::new(&puzzle, config);
        assert_eq!(solver.solve(), Err(SolverFailure::Aborted));
        assert!(solver.stats().extensions > 1);
    }

    #[test]
    fn cancelled_from_another_thread() {
        let puzzle = unreachable_requirement();
        let token = CancellationToken::new();

        let canceller = {
            let token = token.clone();
            std::thread::spawn(move || {
                std::thread::sleep(Duration::from_millis(50));
                token.cancel();
            })
        };

        let mut solver = Solver::new(&puzzle, SolverConfig::default().with_cancellation(token));
        assert_eq!(solver.solve(), Err(SolverFailure::Aborted));
        assert!(solver.stats().extensions > 1);
        canceller.join().unwrap();
    }

    #[test]
    fn hint_reveals_a_prefix() {
        let puzzle = grid(3, 3)
            .set_node(Location(0, 0), NodeKind::Start)
            .set_node(Location(2, 2), NodeKind::Exit)
            .build()
            .unwrap();

        let path = puzzle.solve().unwrap();
        let hint = path.hint(0.5);
        assert_eq!(hint.len(), (path.len() + 1) / 2);
        assert_eq!(hint, &path.nodes()[..hint.len()]);
    }
}
