use crate::cell::{Cell, CellPos, CellState};

/// Square grid of cells with a cached adjacency view.
///
/// Cell `(row, col)` is drawn at pixel `(row * gap, col * gap)`, so rows run
/// along the horizontal axis of the drawing surface.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    width: u32,
    gap: u32,
    cells: Vec<Cell>,
    /// Walkable neighbors of each cell, in {down, up, right, left} order
    neighbors: Vec<Vec<CellPos>>,
    /// Revision number - incremented whenever a cell state changes
    revision: u64,
}

impl Grid {
    /// Create a `rows` x `rows` grid of free cells on a surface `width` pixels wide
    pub fn new(rows: usize, width: u32) -> Self {
        let gap = if rows == 0 { 0 } else { width / rows as u32 };
        let mut cells = Vec::with_capacity(rows * rows);
        for row in 0..rows {
            for col in 0..rows {
                cells.push(Cell::new(row, col));
            }
        }

        let mut grid = Grid {
            rows,
            width,
            gap,
            cells,
            neighbors: vec![Vec::new(); rows * rows],
            revision: 0,
        };
        grid.update_neighbors();
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Side length of one cell in pixels
    pub fn gap(&self) -> u32 {
        self.gap
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn contains(&self, pos: CellPos) -> bool {
        pos.row < self.rows && pos.col < self.rows
    }

    fn index(&self, pos: CellPos) -> usize {
        pos.row * self.rows + pos.col
    }

    pub fn cell(&self, pos: CellPos) -> Option<&Cell> {
        if self.contains(pos) {
            Some(&self.cells[self.index(pos)])
        } else {
            None
        }
    }

    /// State of the cell at `pos`; `None` when out of bounds
    pub fn state(&self, pos: CellPos) -> Option<CellState> {
        self.cell(pos).map(|cell| cell.state)
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|cell| cell.state == state).count()
    }

    pub fn is_obstacle(&self, pos: CellPos) -> bool {
        self.state(pos) == Some(CellState::Obstacle)
    }

    /// Cached walkable neighbors of `pos`: down, up, right, left.
    /// Out of bounds positions have no neighbors.
    pub fn neighbors_of(&self, pos: CellPos) -> &[CellPos] {
        if self.contains(pos) {
            &self.neighbors[self.index(pos)]
        } else {
            &[]
        }
    }

    /// Rebuild every neighbor list from the current obstacle layout
    pub fn update_neighbors(&mut self) {
        for row in 0..self.rows {
            for col in 0..self.rows {
                let pos = CellPos::new(row, col);
                let idx = self.index(pos);
                self.neighbors[idx] = self.compute_neighbors(pos);
            }
        }
    }

    fn compute_neighbors(&self, pos: CellPos) -> Vec<CellPos> {
        let mut result = Vec::with_capacity(4);
        let CellPos { row, col } = pos;

        // Down
        if row + 1 < self.rows && !self.is_obstacle(CellPos::new(row + 1, col)) {
            result.push(CellPos::new(row + 1, col));
        }
        // Up
        if row > 0 && !self.is_obstacle(CellPos::new(row - 1, col)) {
            result.push(CellPos::new(row - 1, col));
        }
        // Right
        if col + 1 < self.rows && !self.is_obstacle(CellPos::new(row, col + 1)) {
            result.push(CellPos::new(row, col + 1));
        }
        // Left
        if col > 0 && !self.is_obstacle(CellPos::new(row, col - 1)) {
            result.push(CellPos::new(row, col - 1));
        }

        result
    }

    /// Only the lists of the cells adjacent to `pos` can mention it
    fn refresh_neighbors_around(&mut self, pos: CellPos) {
        let mut affected = vec![pos];
        affected.extend(self.adjacent(pos));
        for p in affected {
            let idx = self.index(p);
            self.neighbors[idx] = self.compute_neighbors(p);
        }
    }

    /// In-bounds orthogonal cells around `pos`, regardless of their state
    fn adjacent(&self, pos: CellPos) -> Vec<CellPos> {
        let mut result = Vec::with_capacity(4);
        if pos.row + 1 < self.rows {
            result.push(CellPos::new(pos.row + 1, pos.col));
        }
        if pos.row > 0 {
            result.push(CellPos::new(pos.row - 1, pos.col));
        }
        if pos.col + 1 < self.rows {
            result.push(CellPos::new(pos.row, pos.col + 1));
        }
        if pos.col > 0 {
            result.push(CellPos::new(pos.row, pos.col - 1));
        }
        result
    }

    /// Set the state of the cell at `pos`. Out of bounds positions are ignored.
    pub fn mark(&mut self, pos: CellPos, state: CellState) {
        if !self.contains(pos) {
            return;
        }

        let idx = self.index(pos);
        let old_state = self.cells[idx].state;
        if old_state == state {
            return;
        }

        self.cells[idx].state = state;
        self.revision += 1;

        if (old_state == CellState::Obstacle) != (state == CellState::Obstacle) {
            self.refresh_neighbors_around(pos);
        }
    }

    pub fn set_obstacle(&mut self, pos: CellPos) {
        self.mark(pos, CellState::Obstacle);
    }

    /// Uniqueness of the start cell is up to the caller
    pub fn set_start(&mut self, pos: CellPos) {
        self.mark(pos, CellState::Start);
    }

    /// Uniqueness of the end cell is up to the caller
    pub fn set_end(&mut self, pos: CellPos) {
        self.mark(pos, CellState::End);
    }

    pub fn clear_cell(&mut self, pos: CellPos) {
        self.mark(pos, CellState::Free);
    }

    /// Restore every cell to free
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.state = CellState::Free;
        }
        self.revision += 1;
        self.update_neighbors();
    }

    /// Turn frontier, visited and path marks back into free cells
    pub fn clear_search_marks(&mut self) {
        let mut changed = false;
        for cell in &mut self.cells {
            if cell.state.is_search_mark() {
                cell.state = CellState::Free;
                changed = true;
            }
        }
        if changed {
            self.revision += 1;
        }
    }

    /// Map a pixel on the drawing surface to the cell under it
    pub fn cell_at_pixel(&self, x: f32, y: f32) -> Option<CellPos> {
        if self.gap == 0 || x < 0.0 || y < 0.0 {
            return None;
        }
        let row = (x as u32 / self.gap) as usize;
        let col = (y as u32 / self.gap) as usize;
        let pos = CellPos::new(row, col);
        if self.contains(pos) {
            Some(pos)
        } else {
            None
        }
    }

    /// Pixel rectangle `(x, y, size)` of the cell at `pos`
    pub fn cell_rect(&self, pos: CellPos) -> (f32, f32, f32) {
        let gap = self.gap as f32;
        (pos.row as f32 * gap, pos.col as f32 * gap, gap)
    }
}
