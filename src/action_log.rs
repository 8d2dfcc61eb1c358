use crate::cell::CellPos;
use crate::controller::PaintMode;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// User requests and their results, as seen by the controller
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Cell painted as start, end or obstacle
    Paint { row: usize, col: usize, mode: PaintMode },
    /// Cell restored to free
    Erase { row: usize, col: usize },
    /// Search started between two cells
    RunSearch { start: CellPos, end: CellPos },
    /// Search reached a terminal outcome
    SearchFinished { outcome: String, iterations: usize, path_len: usize },
    /// Grid recreated
    Reset { rows: usize },
    /// Text layout copied to the clipboard
    CopyGrid,
    /// Request refused in the current state
    Rejected { request: String, reason: String },
}

/// Logged action with timestamp
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedAction {
    /// Milliseconds since start
    pub timestamp_ms: u64,
    pub action: Action,
}

/// Action logger
pub struct ActionLog {
    start_time: Instant,
    actions: Vec<LoggedAction>,
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionLog {
    pub fn new() -> Self {
        ActionLog {
            start_time: Instant::now(),
            actions: Vec::new(),
        }
    }

    /// Log an action with current timestamp
    pub fn log(&mut self, action: Action) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;
        self.actions.push(LoggedAction {
            timestamp_ms,
            action,
        });
    }

    pub fn get_actions(&self) -> &[LoggedAction] {
        &self.actions
    }

    pub fn last(&self) -> Option<&Action> {
        self.actions.last().map(|logged| &logged.action)
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(&self.actions)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut paints = 0;
        let mut erases = 0;
        let mut runs = 0;
        let mut found = 0;
        let mut resets = 0;
        let mut rejected = 0;
        let mut total_iterations = 0;

        for logged in &self.actions {
            match &logged.action {
                Action::Paint { .. } => paints += 1,
                Action::Erase { .. } => erases += 1,
                Action::RunSearch { .. } => runs += 1,
                Action::SearchFinished { iterations, path_len, outcome } => {
                    total_iterations += iterations;
                    if *path_len > 0 || outcome.starts_with("path found") {
                        found += 1;
                    }
                }
                Action::Reset { .. } => resets += 1,
                Action::Rejected { .. } => rejected += 1,
                Action::CopyGrid => {}
            }
        }

        let duration = self.actions.last().map_or(0, |last| last.timestamp_ms);

        format!(
            "Session Duration: {}ms\n\
             Total Events: {}\n\
             Grid Edits: {} painted, {} erased, {} resets\n\
             Searches: {} started, {} found a path, {} iterations in total\n\
             Rejected Requests: {}",
            duration,
            self.actions.len(),
            paints,
            erases,
            resets,
            runs,
            found,
            total_iterations,
            rejected
        )
    }
}
