//! Step-wise A* search over a [`Grid`].
//!
//! The search owns all of its bookkeeping (scores, parents, frontier) and
//! borrows the grid only for the duration of a single step, so a frame loop
//! can render and poll input between iterations.

use crate::cell::{CellPos, CellState};
use crate::grid::Grid;
use log::{debug, trace, warn};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

/// Terminal result of a search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Path from start to end, excluding the start cell and including the end cell
    Found(Vec<CellPos>),
    NotFound,
    /// Stopped between iterations; grid marks applied so far are kept
    Cancelled,
}

impl Outcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Outcome::Found(_))
    }

    pub fn label(&self) -> String {
        match self {
            Outcome::Found(path) => format!("path found ({} steps)", path.len()),
            Outcome::NotFound => "no path".to_string(),
            Outcome::Cancelled => "cancelled".to_string(),
        }
    }
}

/// Receives the incremental state of a running search.
///
/// Every callback runs synchronously inside the iteration that caused it,
/// after the grid has been updated.
pub trait SearchObserver {
    /// A cell entered the frontier
    fn on_explore(&mut self, _grid: &Grid, _cell: CellPos) {}

    /// A cell was expanded and will not be revisited
    fn on_close(&mut self, _grid: &Grid, _cell: CellPos) {}

    /// A cell was marked as part of the final path, walking from end to start
    fn on_path(&mut self, _grid: &Grid, _cell: CellPos) {}

    /// End of an iteration that did not finish the search
    fn on_step(&mut self, _grid: &Grid) {}

    /// Polled before every iteration
    fn is_cancelled(&mut self) -> bool {
        false
    }
}

/// Observer that ignores everything
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Result of a single iteration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Continue,
    Done(Outcome),
}

/// An entry in the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrontierEntry {
    f_score: u32,
    /// Insertion order, breaks ties between equal f scores first-in-first-out
    seq: u64,
    pos: CellPos,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .f_score
            .cmp(&self.f_score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* search with Manhattan heuristic and unit step cost
pub struct PathSearch {
    start: CellPos,
    end: CellPos,
    came_from: HashMap<CellPos, CellPos>,
    g_score: HashMap<CellPos, u32>,
    f_score: HashMap<CellPos, u32>,
    frontier: BinaryHeap<FrontierEntry>,
    /// Cells currently queued in `frontier`
    frontier_members: HashSet<CellPos>,
    counter: u64,
    iterations: usize,
    outcome: Option<Outcome>,
}

/// Manhattan distance heuristic
pub fn heuristic(a: CellPos, b: CellPos) -> u32 {
    a.manhattan(&b)
}

impl PathSearch {
    /// Prepare a search from `start` to `end`. Nothing on the grid changes until the first step.
    pub fn new(grid: &Grid, start: CellPos, end: CellPos) -> Self {
        let mut search = PathSearch {
            start,
            end,
            came_from: HashMap::new(),
            g_score: HashMap::new(),
            f_score: HashMap::new(),
            frontier: BinaryHeap::new(),
            frontier_members: HashSet::new(),
            counter: 0,
            iterations: 0,
            outcome: None,
        };

        if !grid.contains(start) || !grid.contains(end) {
            warn!(
                "[search] endpoints ({},{}) -> ({},{}) outside {}x{} grid",
                start.row,
                start.col,
                end.row,
                end.col,
                grid.rows(),
                grid.rows()
            );
            return search;
        }

        let h = heuristic(start, end);
        search.g_score.insert(start, 0);
        search.f_score.insert(start, h);
        search.frontier.push(FrontierEntry {
            f_score: h,
            seq: search.counter,
            pos: start,
        });
        search.frontier_members.insert(start);
        search
    }

    /// Run a complete search, polling `observer.is_cancelled()` between iterations
    pub fn run<O: SearchObserver>(
        grid: &mut Grid,
        start: CellPos,
        end: CellPos,
        observer: &mut O,
    ) -> Outcome {
        let mut search = PathSearch::new(grid, start, end);
        search.run_to_end(grid, observer)
    }

    /// Keep stepping until the search finishes or the observer cancels it
    pub fn run_to_end<O: SearchObserver>(&mut self, grid: &mut Grid, observer: &mut O) -> Outcome {
        loop {
            if self.outcome.is_none() && observer.is_cancelled() {
                return self.cancel();
            }
            if let Step::Done(outcome) = self.step(grid, observer) {
                return outcome;
            }
        }
    }

    pub fn start(&self) -> CellPos {
        self.start
    }

    pub fn end(&self) -> CellPos {
        self.end
    }

    /// Number of frontier pops so far
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier_members.len()
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Stop the search. Returns the earlier outcome if it had already finished.
    pub fn cancel(&mut self) -> Outcome {
        if self.outcome.is_none() {
            debug!("[search] cancelled after {} iterations", self.iterations);
            self.outcome = Some(Outcome::Cancelled);
        }
        self.outcome.clone().unwrap_or(Outcome::Cancelled)
    }

    /// Pop one cell off the frontier and expand it
    pub fn step<O: SearchObserver>(&mut self, grid: &mut Grid, observer: &mut O) -> Step {
        if let Some(outcome) = &self.outcome {
            return Step::Done(outcome.clone());
        }

        let current = match self.frontier.pop() {
            Some(entry) => entry.pos,
            None => return self.finish(Outcome::NotFound),
        };
        self.frontier_members.remove(&current);
        self.iterations += 1;

        trace!(
            "[search] iteration {}: expanding ({},{}) g={}",
            self.iterations,
            current.row,
            current.col,
            self.g(current)
        );

        if current == self.end {
            let path = self.reconstruct_path(grid, observer);
            return self.finish(Outcome::Found(path));
        }

        let tentative_g = self.g(current).saturating_add(1);
        let neighbors = grid.neighbors_of(current).to_vec();
        for neighbor in neighbors {
            if tentative_g >= self.g(neighbor) {
                continue;
            }

            let f = tentative_g + heuristic(neighbor, self.end);
            self.came_from.insert(neighbor, current);
            self.g_score.insert(neighbor, tentative_g);
            self.f_score.insert(neighbor, f);

            if !self.frontier_members.contains(&neighbor) {
                self.counter += 1;
                self.frontier.push(FrontierEntry {
                    f_score: f,
                    seq: self.counter,
                    pos: neighbor,
                });
                self.frontier_members.insert(neighbor);
                self.paint(grid, neighbor, CellState::Frontier);
                observer.on_explore(grid, neighbor);
            }
        }

        if current != self.start {
            self.paint(grid, current, CellState::Visited);
            observer.on_close(grid, current);
        }

        observer.on_step(grid);
        Step::Continue
    }

    fn g(&self, pos: CellPos) -> u32 {
        self.g_score.get(&pos).copied().unwrap_or(u32::MAX)
    }

    /// Search marks never overwrite the endpoints
    fn paint(&self, grid: &mut Grid, pos: CellPos, state: CellState) {
        if pos == self.start || pos == self.end {
            return;
        }
        if grid.state(pos).map_or(true, CellState::is_endpoint) {
            return;
        }
        grid.mark(pos, state);
    }

    /// Walk `came_from` back from the end, marking every intermediate cell
    fn reconstruct_path<O: SearchObserver>(&self, grid: &mut Grid, observer: &mut O) -> Vec<CellPos> {
        let mut path = Vec::new();
        let mut current = self.end;

        while let Some(&prev) = self.came_from.get(&current) {
            path.push(current);
            if prev != self.start {
                self.paint(grid, prev, CellState::Path);
                observer.on_path(grid, prev);
            }
            current = prev;
        }

        path.reverse();
        path
    }

    fn finish(&mut self, outcome: Outcome) -> Step {
        debug!(
            "[search] ({},{}) -> ({},{}): {} after {} iterations",
            self.start.row,
            self.start.col,
            self.end.row,
            self.end.col,
            outcome.label(),
            self.iterations
        );
        self.outcome = Some(outcome.clone());
        Step::Done(outcome)
    }
}
