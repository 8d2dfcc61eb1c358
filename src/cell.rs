use serde::{Deserialize, Serialize};

/// Position of a cell on the grid, also used as the cell's identity during a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub fn new(row: usize, col: usize) -> Self {
        CellPos { row, col }
    }

    /// Manhattan distance, the A* heuristic on a 4-connected unit-cost grid
    pub fn manhattan(&self, other: &CellPos) -> u32 {
        (self.row.abs_diff(other.row) + self.col.abs_diff(other.col)) as u32
    }
}

/// State tag of a cell. Exactly one tag at a time; setting a new one overwrites the old.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Free,
    Obstacle,
    Start,
    End,
    /// Queued in the search frontier
    Frontier,
    /// Expanded by the search
    Visited,
    /// Part of the reconstructed path
    Path,
}

impl CellState {
    /// Marks left behind by a search run
    pub fn is_search_mark(self) -> bool {
        matches!(self, CellState::Frontier | CellState::Visited | CellState::Path)
    }

    pub fn is_endpoint(self) -> bool {
        matches!(self, CellState::Start | CellState::End)
    }

    /// Single character used by the text layout
    pub fn symbol(self) -> char {
        match self {
            CellState::Free => '.',
            CellState::Obstacle => '#',
            CellState::Start => 'S',
            CellState::End => 'E',
            CellState::Frontier => 'o',
            CellState::Visited => 'x',
            CellState::Path => '*',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<CellState> {
        match symbol {
            '.' => Some(CellState::Free),
            '#' => Some(CellState::Obstacle),
            'S' => Some(CellState::Start),
            'E' => Some(CellState::End),
            'o' => Some(CellState::Frontier),
            'x' => Some(CellState::Visited),
            '*' => Some(CellState::Path),
            _ => None,
        }
    }
}

/// A single node of the grid graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub state: CellState,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Cell {
            row,
            col,
            state: CellState::Free,
        }
    }

    pub fn pos(&self) -> CellPos {
        CellPos::new(self.row, self.col)
    }

    pub fn is_obstacle(&self) -> bool {
        self.state == CellState::Obstacle
    }
}
