use crate::cell::CellPos;
use crate::grid::Grid;
use crate::search::SearchObserver;

/// Draws the whole grid every time it is called
pub trait Renderer {
    fn render(&mut self, grid: &Grid);
}

/// Text layout of a grid, one line per row, one symbol per cell
pub fn grid_to_string(grid: &Grid) -> String {
    let mut result = String::with_capacity(grid.rows() * (grid.rows() + 1));
    for row in 0..grid.rows() {
        for col in 0..grid.rows() {
            let symbol = grid
                .state(CellPos::new(row, col))
                .map(|state| state.symbol())
                .unwrap_or(' ');
            result.push(symbol);
        }
        result.push('\n');
    }
    result
}

/// Renderer that keeps every frame as text
#[derive(Debug, Default)]
pub struct TextRenderer {
    pub frames: Vec<String>,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> Option<&str> {
        self.frames.last().map(String::as_str)
    }
}

impl Renderer for TextRenderer {
    fn render(&mut self, grid: &Grid) {
        self.frames.push(grid_to_string(grid));
    }
}

/// Wires search callbacks to a renderer: redraw after every iteration and every path cell
pub struct RenderObserver<'a, R: Renderer, F: FnMut() -> bool> {
    renderer: &'a mut R,
    is_cancelled: F,
}

impl<'a, R: Renderer, F: FnMut() -> bool> RenderObserver<'a, R, F> {
    pub fn new(renderer: &'a mut R, is_cancelled: F) -> Self {
        RenderObserver {
            renderer,
            is_cancelled,
        }
    }
}

impl<'a, R: Renderer, F: FnMut() -> bool> SearchObserver for RenderObserver<'a, R, F> {
    fn on_path(&mut self, grid: &Grid, _cell: CellPos) {
        self.renderer.render(grid);
    }

    fn on_step(&mut self, grid: &Grid) {
        self.renderer.render(grid);
    }

    fn is_cancelled(&mut self) -> bool {
        (self.is_cancelled)()
    }
}
