pub mod action_log;
pub mod cell;
pub mod config;
pub mod controller;
pub mod grid;
pub mod input;
pub mod render;
pub mod search;

pub use cell::{Cell, CellPos, CellState};
pub use controller::{ControlError, EventResponse, InteractionController, PaintMode};
pub use grid::Grid;
pub use search::{Outcome, PathSearch, SearchObserver};
