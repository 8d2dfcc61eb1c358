#![allow(dead_code)]

use astarviz::search::SearchObserver;
use astarviz::{CellPos, CellState, Grid, InteractionController, PaintMode};
use astarviz::input::KeyBindings;

/// Pixels per cell used by the test grids
pub const CELL_PIXELS: u32 = 10;

/// Parse a text layout into a grid.
/// Format (one line per row):
/// - S: start cell
/// - E: end cell
/// - #: obstacle
/// - .: free cell
pub fn parse_layout(layout: &str) -> (Grid, Option<CellPos>, Option<CellPos>) {
    let lines: Vec<&str> = layout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let rows = lines.len();
    let mut grid = Grid::new(rows, rows as u32 * CELL_PIXELS);
    let mut start = None;
    let mut end = None;

    for (row, line) in lines.iter().enumerate() {
        assert_eq!(line.chars().count(), rows, "layout must be square (row {})", row);
        for (col, ch) in line.chars().enumerate() {
            let pos = CellPos::new(row, col);
            match CellState::from_symbol(ch) {
                Some(CellState::Start) => {
                    grid.set_start(pos);
                    start = Some(pos);
                }
                Some(CellState::End) => {
                    grid.set_end(pos);
                    end = Some(pos);
                }
                Some(CellState::Obstacle) => grid.set_obstacle(pos),
                Some(CellState::Free) => {}
                other => panic!("unexpected symbol {:?} at ({},{})", other, row, col),
            }
        }
    }

    (grid, start, end)
}

/// Build a controller whose grid matches the layout, painted through the public API
pub fn controller_from_layout(layout: &str) -> InteractionController {
    let (grid, start, end) = parse_layout(layout);
    let mut controller = InteractionController::new(grid.rows(), grid.width(), KeyBindings::default());

    for cell in grid.cells() {
        if cell.is_obstacle() {
            controller.paint(cell.pos(), PaintMode::Obstacle).unwrap();
        }
    }
    if let Some(start) = start {
        controller.paint(start, PaintMode::Start).unwrap();
    }
    if let Some(end) = end {
        controller.paint(end, PaintMode::End).unwrap();
    }

    controller
}

/// Snapshot of every cell state in row-major order
pub fn states(grid: &Grid) -> Vec<CellState> {
    grid.cells().iter().map(|cell| cell.state).collect()
}

/// Cells reachable from `from` through non-obstacle cells, `from` included
pub fn reachable_count(grid: &Grid, from: CellPos) -> usize {
    let mut seen = vec![from];
    let mut queue = vec![from];
    while let Some(pos) = queue.pop() {
        for &next in grid.neighbors_of(pos) {
            if !seen.contains(&next) {
                seen.push(next);
                queue.push(next);
            }
        }
    }
    seen.len()
}

/// Observer recording every callback, optionally cancelling after a number of iterations
#[derive(Default)]
pub struct RecordingObserver {
    pub explored: Vec<CellPos>,
    pub closed: Vec<CellPos>,
    pub path: Vec<CellPos>,
    pub steps: usize,
    pub cancel_after: Option<usize>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancelling_after(iterations: usize) -> Self {
        RecordingObserver {
            cancel_after: Some(iterations),
            ..Self::default()
        }
    }
}

impl SearchObserver for RecordingObserver {
    fn on_explore(&mut self, _grid: &Grid, cell: CellPos) {
        self.explored.push(cell);
    }

    fn on_close(&mut self, _grid: &Grid, cell: CellPos) {
        self.closed.push(cell);
    }

    fn on_path(&mut self, _grid: &Grid, cell: CellPos) {
        self.path.push(cell);
    }

    fn on_step(&mut self, _grid: &Grid) {
        self.steps += 1;
    }

    fn is_cancelled(&mut self) -> bool {
        self.cancel_after.map_or(false, |limit| self.steps >= limit)
    }
}

pub fn pos(row: usize, col: usize) -> CellPos {
    CellPos::new(row, col)
}

/// Shortest step count between two cells by breadth-first search
pub fn bfs_distance(grid: &Grid, from: CellPos, to: CellPos) -> Option<usize> {
    let mut distance = vec![usize::MAX; grid.rows() * grid.rows()];
    let index = |p: CellPos| p.row * grid.rows() + p.col;
    let mut queue = std::collections::VecDeque::new();
    distance[index(from)] = 0;
    queue.push_back(from);

    while let Some(current) = queue.pop_front() {
        if current == to {
            return Some(distance[index(current)]);
        }
        for &next in grid.neighbors_of(current) {
            if distance[index(next)] == usize::MAX {
                distance[index(next)] = distance[index(current)] + 1;
                queue.push_back(next);
            }
        }
    }
    None
}

/// Path cells follow each other orthogonally, start with a neighbor of `start` and avoid obstacles
pub fn assert_valid_path(grid: &Grid, start: CellPos, path: &[CellPos]) {
    let mut previous = start;
    for &cell in path {
        assert_eq!(previous.manhattan(&cell), 1, "({:?} -> {:?}) is not a single step", previous, cell);
        assert!(!grid.is_obstacle(cell), "path crosses obstacle at {:?}", cell);
        previous = cell;
    }
}
