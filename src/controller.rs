//! Maps user intents onto the grid and the search, and keeps the grid
//! consistent: at most one start and one end, and no edits while a search runs.

use crate::action_log::{Action, ActionLog};
use crate::cell::CellPos;
use crate::config::{Config, ConfigError};
use crate::grid::Grid;
use crate::input::{Command, InputEvent, KeyBindings, PointerButton};
use crate::render::{grid_to_string, RenderObserver, Renderer};
use crate::search::{Outcome, PathSearch, SearchObserver, Step};
use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What a paint request turns a cell into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaintMode {
    Start,
    End,
    Obstacle,
}

/// Requests refused in the current state. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    #[error("a search is running")]
    SearchActive,

    #[error("start and end must both be set before searching")]
    MissingEndpoints,

    #[error("cell ({row},{col}) is outside the grid")]
    OutOfBounds { row: usize, col: usize },

    #[error("cell ({row},{col}) holds the start or the end")]
    OccupiedEndpoint { row: usize, col: usize },

    #[error("no search is running")]
    NoActiveSearch,
}

/// What the event loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    Continue,
    /// Put the text layout on the clipboard
    CopyGrid,
    Quit,
}

pub struct InteractionController {
    grid: Grid,
    rows: usize,
    width: u32,
    start: Option<CellPos>,
    end: Option<CellPos>,
    search: Option<PathSearch>,
    last_outcome: Option<Outcome>,
    bindings: KeyBindings,
    log: ActionLog,
}

impl InteractionController {
    pub fn new(rows: usize, width: u32, bindings: KeyBindings) -> Self {
        InteractionController {
            grid: Grid::new(rows, width),
            rows,
            width,
            start: None,
            end: None,
            search: None,
            last_outcome: None,
            bindings,
            log: ActionLog::new(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config.grid.rows, config.grid.width, config.key_bindings()?))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Option<CellPos> {
        self.start
    }

    pub fn end(&self) -> Option<CellPos> {
        self.end
    }

    pub fn is_running(&self) -> bool {
        self.search.is_some()
    }

    /// Iterations done by the running search
    pub fn search_iterations(&self) -> Option<usize> {
        self.search.as_ref().map(PathSearch::iterations)
    }

    pub fn last_outcome(&self) -> Option<&Outcome> {
        self.last_outcome.as_ref()
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn action_log(&self) -> &ActionLog {
        &self.log
    }

    /// Text layout of the current grid
    pub fn layout(&self) -> String {
        grid_to_string(&self.grid)
    }

    /// Paint a cell, moving the start or end role if it was held elsewhere
    pub fn paint(&mut self, pos: CellPos, mode: PaintMode) -> Result<(), ControlError> {
        self.ensure_idle("paint")?;
        self.ensure_in_bounds("paint", pos)?;

        let revision = self.grid.revision();
        match mode {
            PaintMode::Start => {
                if let Some(old) = self.start.filter(|&old| old != pos) {
                    self.grid.clear_cell(old);
                }
                if self.end == Some(pos) {
                    self.end = None;
                }
                self.grid.set_start(pos);
                self.start = Some(pos);
            }
            PaintMode::End => {
                if let Some(old) = self.end.filter(|&old| old != pos) {
                    self.grid.clear_cell(old);
                }
                if self.start == Some(pos) {
                    self.start = None;
                }
                self.grid.set_end(pos);
                self.end = Some(pos);
            }
            PaintMode::Obstacle => {
                if self.start == Some(pos) || self.end == Some(pos) {
                    return self.reject(
                        "paint",
                        ControlError::OccupiedEndpoint {
                            row: pos.row,
                            col: pos.col,
                        },
                    );
                }
                self.grid.set_obstacle(pos);
            }
        }

        if self.grid.revision() != revision {
            self.log.log(Action::Paint {
                row: pos.row,
                col: pos.col,
                mode,
            });
        }
        Ok(())
    }

    /// Primary-button painting: start first, then end, then obstacles.
    /// Returns the mode applied, `None` when the cell holds an endpoint already.
    pub fn paint_auto(&mut self, pos: CellPos) -> Result<Option<PaintMode>, ControlError> {
        let mode = if self.start.is_none() && self.end != Some(pos) {
            PaintMode::Start
        } else if self.end.is_none() && self.start != Some(pos) {
            PaintMode::End
        } else if self.start != Some(pos) && self.end != Some(pos) {
            PaintMode::Obstacle
        } else {
            return Ok(None);
        };

        self.paint(pos, mode)?;
        Ok(Some(mode))
    }

    /// Restore a cell to free, dropping the start or end role it held
    pub fn erase(&mut self, pos: CellPos) -> Result<(), ControlError> {
        self.ensure_idle("erase")?;
        self.ensure_in_bounds("erase", pos)?;

        let revision = self.grid.revision();
        self.grid.clear_cell(pos);
        if self.start == Some(pos) {
            self.start = None;
        } else if self.end == Some(pos) {
            self.end = None;
        }

        if self.grid.revision() != revision {
            self.log.log(Action::Erase {
                row: pos.row,
                col: pos.col,
            });
        }
        Ok(())
    }

    /// Begin a search between the current start and end.
    /// Marks of a previous search are cleared and neighbor lists rebuilt.
    pub fn request_run(&mut self) -> Result<(), ControlError> {
        self.ensure_idle("run")?;
        let (start, end) = match (self.start, self.end) {
            (Some(start), Some(end)) => (start, end),
            _ => return self.reject("run", ControlError::MissingEndpoints),
        };

        self.grid.clear_search_marks();
        self.grid.update_neighbors();
        self.search = Some(PathSearch::new(&self.grid, start, end));
        self.last_outcome = None;

        info!(
            "Search started ({},{}) -> ({},{})",
            start.row, start.col, end.row, end.col
        );
        self.log.log(Action::RunSearch { start, end });
        Ok(())
    }

    /// Advance the running search by one iteration.
    /// Returns the outcome once the search has finished.
    pub fn step_search<O: SearchObserver>(
        &mut self,
        observer: &mut O,
    ) -> Result<Option<Outcome>, ControlError> {
        let step = match self.search.as_mut() {
            Some(search) => search.step(&mut self.grid, observer),
            None => return Err(ControlError::NoActiveSearch),
        };

        match step {
            Step::Continue => Ok(None),
            Step::Done(outcome) => {
                self.finish_search(outcome.clone());
                Ok(Some(outcome))
            }
        }
    }

    /// Start a search and run it to the end, redrawing through `renderer`
    /// after every iteration. `is_cancelled` is polled between iterations.
    pub fn run_search<R, F>(&mut self, renderer: &mut R, is_cancelled: F) -> Result<Outcome, ControlError>
    where
        R: Renderer,
        F: FnMut() -> bool,
    {
        self.request_run()?;
        renderer.render(&self.grid);

        let mut observer = RenderObserver::new(renderer, is_cancelled);
        let outcome = match self.search.as_mut() {
            Some(search) => search.run_to_end(&mut self.grid, &mut observer),
            None => return Err(ControlError::NoActiveSearch),
        };

        self.finish_search(outcome.clone());
        Ok(outcome)
    }

    /// Stop the running search; the grid keeps its marks
    pub fn cancel_search(&mut self) -> Result<Outcome, ControlError> {
        let outcome = match self.search.as_mut() {
            Some(search) => search.cancel(),
            None => return Err(ControlError::NoActiveSearch),
        };
        self.finish_search(outcome.clone());
        Ok(outcome)
    }

    /// Drop the endpoints and start over with a fresh grid
    pub fn request_reset(&mut self) -> Result<(), ControlError> {
        self.ensure_idle("reset")?;

        self.grid = Grid::new(self.rows, self.width);
        self.start = None;
        self.end = None;
        self.last_outcome = None;

        info!("Grid reset ({}x{})", self.rows, self.rows);
        self.log.log(Action::Reset { rows: self.rows });
        Ok(())
    }

    /// Apply one input event
    pub fn handle_event(&mut self, event: InputEvent) -> EventResponse {
        match event {
            InputEvent::Quit => self.quit(),
            InputEvent::PointerDown { button, x, y } => {
                if self.is_running() {
                    trace!("Pointer ignored while searching");
                    return EventResponse::Continue;
                }
                let pos = match self.grid.cell_at_pixel(x, y) {
                    Some(pos) => pos,
                    None => return EventResponse::Continue,
                };
                // Rejections are already logged
                let _ = match button {
                    PointerButton::Primary => self.paint_auto(pos).map(|_| ()),
                    PointerButton::Secondary => self.erase(pos),
                };
                EventResponse::Continue
            }
            InputEvent::KeyPress(key) => match self.bindings.command_for(key) {
                Some(Command::Quit) => self.quit(),
                Some(Command::StartSearch) => {
                    let _ = self.request_run();
                    EventResponse::Continue
                }
                Some(Command::Reset) => {
                    let _ = self.request_reset();
                    EventResponse::Continue
                }
                Some(Command::CopyGrid) => {
                    self.log.log(Action::CopyGrid);
                    EventResponse::CopyGrid
                }
                None => {
                    debug!("Unbound key {}", key);
                    EventResponse::Continue
                }
            },
        }
    }

    fn quit(&mut self) -> EventResponse {
        if self.is_running() {
            let _ = self.cancel_search();
        }
        EventResponse::Quit
    }

    fn finish_search(&mut self, outcome: Outcome) {
        let iterations = self
            .search
            .take()
            .map_or(0, |search| search.iterations());
        let path_len = match &outcome {
            Outcome::Found(path) => path.len(),
            _ => 0,
        };

        info!("Search finished: {} after {} iterations", outcome.label(), iterations);
        self.log.log(Action::SearchFinished {
            outcome: outcome.label(),
            iterations,
            path_len,
        });
        self.last_outcome = Some(outcome);
    }

    fn ensure_idle(&mut self, request: &str) -> Result<(), ControlError> {
        if self.is_running() {
            return self.reject(request, ControlError::SearchActive);
        }
        Ok(())
    }

    fn ensure_in_bounds(&mut self, request: &str, pos: CellPos) -> Result<(), ControlError> {
        if !self.grid.contains(pos) {
            return self.reject(
                request,
                ControlError::OutOfBounds {
                    row: pos.row,
                    col: pos.col,
                },
            );
        }
        Ok(())
    }

    fn reject<T>(&mut self, request: &str, err: ControlError) -> Result<T, ControlError> {
        warn!("Rejected {} request: {}", request, err);
        self.log.log(Action::Rejected {
            request: request.to_string(),
            reason: err.to_string(),
        });
        Err(err)
    }
}
