//! The backtracking search for a path satisfying every constraint of a [`Puzzle`].

use std::collections::HashSet;
use std::time::{Duration, Instant};

use itertools::Itertools;
use strum::VariantArray;
use tracing::{debug, trace};

use crate::area::Partition;
use crate::cancel::CancellationToken;
use crate::cell::NodeKind;
use crate::error::SolverFailure;
use crate::location::Location;
use crate::path::Path;
use crate::puzzle::Puzzle;
use crate::requirements::Requirements;
use crate::step::SquareStep;
use crate::validate::AreaViolation;

/// Knobs for a single [`Solver`].
#[derive(Clone, Debug)]
pub struct SolverConfig {
    /// Try required nodes before other neighbors. Changes which solution is found first, never whether one is.
    pub prefer_required: bool,
    /// Give up with [`SolverFailure::Aborted`] once this much time has passed since [`Solver::solve`] was called.
    pub time_limit: Option<Duration>,
    /// Give up with [`SolverFailure::Aborted`] once this token is cancelled.
    pub cancellation: Option<CancellationToken>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            prefer_required: true,
            time_limit: None,
            cancellation: None,
        }
    }
}

impl SolverConfig {
    /// Set [`Self::prefer_required`].
    pub fn with_prefer_required(mut self, prefer_required: bool) -> Self {
        self.prefer_required = prefer_required;
        self
    }

    /// Set [`Self::time_limit`].
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Set [`Self::cancellation`].
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}

const AREA_VIOLATIONS: usize = AreaViolation::VARIANTS.len();

/// Counters describing how much of the search tree a solve explored.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SearchStats {
    /// Partial paths visited, including each starting node.
    pub extensions: u64,
    /// Times a path reached an exit but failed a final check there.
    pub exits_rejected: u64,
    areas_rejected: [u64; AREA_VIOLATIONS],
}

impl SearchStats {
    /// How many partial paths were pruned because an area broke `violation`.
    pub fn areas_rejected(&self, violation: AreaViolation) -> u64 {
        self.areas_rejected[violation as usize]
    }

    fn reject_area(&mut self, violation: AreaViolation) {
        self.areas_rejected[violation as usize] += 1;
    }
}

/// Search state for one puzzle. The puzzle itself is only read, so any number of solvers may share it.
#[derive(Debug)]
pub struct Solver<'a> {
    puzzle: &'a Puzzle,
    config: SolverConfig,
    requirements: Requirements,
    deadline: Option<Instant>,
    stats: SearchStats,
}

impl<'a> Solver<'a> {
    /// Prepare a search over `puzzle`, deriving its requirements up front.
    pub fn new(puzzle: &'a Puzzle, config: SolverConfig) -> Self {
        Self {
            puzzle,
            config,
            requirements: Requirements::derive(puzzle),
            deadline: None,
            stats: SearchStats::default(),
        }
    }

    /// The requirements derived for this puzzle.
    pub fn requirements(&self) -> &Requirements {
        &self.requirements
    }

    /// Counters from the most recent [`Self::solve`].
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Search for a path from some start node to some exit that satisfies every constraint.
    ///
    /// Start nodes are tried in row-major order and the first satisfying path found is returned.
    /// Returns [`SolverFailure::InvalidPuzzle`] without searching if the puzzle is malformed,
    /// [`SolverFailure::Aborted`] if the time limit passes or the cancellation token fires,
    /// and [`SolverFailure::NoSolution`] if no path works.
    pub fn solve(&mut self) -> Result<Path, SolverFailure> {
        self.puzzle.validate()?;

        let began = Instant::now();
        self.deadline = self.config.time_limit.map(|limit| began + limit);
        self.stats = SearchStats::default();

        let starts = self.puzzle.nodes_of_kind(NodeKind::Start);
        let exits = self.puzzle.nodes_of_kind(NodeKind::Exit).len();
        debug!(
            width = self.puzzle.width(),
            height = self.puzzle.height(),
            starts = starts.len(),
            exits,
            required_nodes = self.requirements.nodes.len(),
            required_edges = self.requirements.edges.len(),
            "solve started"
        );

        let result = self.search(&starts, exits);

        debug!(
            solved = result.is_ok(),
            failure = ?result.as_ref().err(),
            elapsed_ms = began.elapsed().as_millis() as u64,
            extensions = self.stats.extensions,
            exits_rejected = self.stats.exits_rejected,
            "solve finished"
        );

        result
    }

    fn search(&mut self, starts: &[Location], exits: usize) -> Result<Path, SolverFailure> {
        if exits == 0 {
            return Err(SolverFailure::NoSolution);
        }

        let root = Partition::new(self.puzzle);
        for start in starts {
            let mut path = vec![*start];
            let mut visited = HashSet::from([*start]);

            if self.extend(&mut path, &mut visited, exits, &root)? {
                return Ok(Path(path));
            }
        }

        Err(SolverFailure::NoSolution)
    }

    fn aborted(&self) -> bool {
        self.config.cancellation.as_ref().is_some_and(CancellationToken::is_cancelled)
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    // `path` ends on the node just stepped onto; `partition` has not seen that step yet.
    // Returns Ok(true) with `path` left holding the solution.
    fn extend(
        &mut self,
        path: &mut Vec<Location>,
        visited: &mut HashSet<Location>,
        mut exits_remaining: usize,
        partition: &Partition,
    ) -> Result<bool, SolverFailure> {
        if self.aborted() {
            return Err(SolverFailure::Aborted);
        }
        self.stats.extensions += 1;

        let Some(&current) = path.last() else {
            return Ok(false);
        };
        let previous = path.len().checked_sub(2).map(|i| path[i]);

        let mut partition = partition.clone();
        if let Some(previous) = previous {
            if let Err(violation) = partition.advance(self.puzzle, previous, current) {
                trace!(at = %current, ?violation, "area rejected");
                self.stats.reject_area(violation);
                return Ok(false);
            }
        }

        if self.puzzle.node(current) == Some(NodeKind::Exit) {
            if self.accepts_at_exit(path, &partition, previous, current) {
                return Ok(true);
            }

            self.stats.exits_rejected += 1;
            exits_remaining = exits_remaining.saturating_sub(1);
        }

        if exits_remaining == 0 {
            return Ok(false);
        }

        for next in self.candidates(current, visited) {
            path.push(next);
            visited.insert(next);

            let found = self.extend(path, visited, exits_remaining, &partition);
            if let Ok(true) = found {
                return found;
            }

            path.pop();
            visited.remove(&next);
            found?;
        }

        Ok(false)
    }

    fn accepts_at_exit(&mut self, path: &[Location], partition: &Partition, previous: Option<Location>, exit: Location) -> bool {
        if !self.requirements.satisfied_by(path) {
            return false;
        }

        match partition.clone().close(self.puzzle, previous, exit) {
            Ok(()) => true,
            Err(violation) => {
                trace!(at = %exit, ?violation, "last area rejected");
                self.stats.reject_area(violation);
                false
            }
        }
    }

    // unvisited neighbors over traversable edges, required ones first when configured
    fn candidates(&self, current: Location, visited: &HashSet<Location>) -> Vec<Location> {
        let neighbors = SquareStep::VARIANTS.iter()
            .map(|step| step.attempt_from(current))
            .filter(|next| !visited.contains(next) && self.puzzle.is_traversable(current, *next));

        if self.config.prefer_required {
            neighbors.sorted_by_key(|next| !self.requirements.is_required(*next)).collect_vec()
        } else {
            neighbors.collect_vec()
        }
    }
}
