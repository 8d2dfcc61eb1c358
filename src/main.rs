use arboard::Clipboard;
use astarviz::config::Config;
use astarviz::input::{InputEvent, Key, PointerButton};
use astarviz::render::Renderer;
use astarviz::search::NoopObserver;
use astarviz::{CellState, EventResponse, Grid, InteractionController};
use log::{error, info, LevelFilter};
use macroquad::prelude::*;
use std::sync::OnceLock;

/// Height of the status line below the grid
const STATUS_HEIGHT: f32 = 24.0;

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Logging comes up before the config is read so that loading is reported.
/// `RUST_LOG` wins over `[logging] level`.
fn app_config() -> &'static Config {
    CONFIG.get_or_init(|| {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("trace")).init();
        let config = Config::load();
        if std::env::var_os("RUST_LOG").is_none() {
            match config.logging.level.parse::<LevelFilter>() {
                Ok(level) => log::set_max_level(level),
                Err(_) => {
                    log::set_max_level(LevelFilter::Info);
                    error!("Unknown log level '{}', using info", config.logging.level);
                }
            }
        }
        config
    })
}

fn window_conf() -> Conf {
    let config = app_config();
    Conf {
        window_title: config.visual.window_title.clone(),
        window_width: config.grid.width as i32,
        window_height: config.grid.width as i32 + STATUS_HEIGHT as i32,
        window_resizable: false,
        ..Default::default()
    }
}

fn state_color(state: CellState) -> Color {
    match state {
        CellState::Free => WHITE,
        CellState::Obstacle => BLACK,
        CellState::Start => Color::from_rgba(255, 165, 0, 255),
        CellState::End => Color::from_rgba(64, 224, 208, 255),
        CellState::Frontier => Color::from_rgba(0, 255, 0, 255),
        CellState::Visited => Color::from_rgba(255, 0, 0, 255),
        CellState::Path => Color::from_rgba(128, 0, 128, 255),
    }
}

/// Draws the grid as filled squares with optional grid lines
struct WindowRenderer {
    show_grid_lines: bool,
}

impl Renderer for WindowRenderer {
    fn render(&mut self, grid: &Grid) {
        clear_background(WHITE);

        for cell in grid.cells() {
            let (x, y, size) = grid.cell_rect(cell.pos());
            draw_rectangle(x, y, size, size, state_color(cell.state));
        }

        if self.show_grid_lines {
            let line_color = Color::from_rgba(128, 128, 128, 255);
            let width = grid.width() as f32;
            let gap = grid.gap() as f32;
            for i in 0..grid.rows() {
                let offset = i as f32 * gap;
                draw_line(0.0, offset, width, offset, 1.0, line_color);
                draw_line(offset, 0.0, offset, width, 1.0, line_color);
            }
        }
    }
}

/// macroquad's `KeyCode` debug names ("Space", "C", "Key7") match our key names
fn key_from_code(code: KeyCode) -> Option<Key> {
    format!("{:?}", code).parse().ok()
}

/// Events for this frame. Buttons report every frame they are held, which gives drag painting.
fn poll_events() -> Vec<InputEvent> {
    let mut events = Vec::new();

    if is_quit_requested() {
        events.push(InputEvent::Quit);
    }

    if let Some(key) = get_last_key_pressed().and_then(key_from_code) {
        events.push(InputEvent::KeyPress(key));
    }

    let (x, y) = mouse_position();
    if is_mouse_button_down(MouseButton::Left) {
        events.push(InputEvent::PointerDown {
            button: PointerButton::Primary,
            x,
            y,
        });
    } else if is_mouse_button_down(MouseButton::Right) {
        events.push(InputEvent::PointerDown {
            button: PointerButton::Secondary,
            x,
            y,
        });
    }

    events
}

fn copy_to_clipboard(layout: &str) {
    match Clipboard::new() {
        Ok(mut clipboard) => {
            if let Err(e) = clipboard.set_text(layout) {
                error!("Failed to copy to clipboard: {}", e);
            } else {
                info!("Grid layout copied to clipboard");
                // Keep clipboard alive for a moment to ensure clipboard managers can capture it
                std::thread::sleep(std::time::Duration::from_millis(100));
            }
        }
        Err(e) => {
            error!("Failed to access clipboard: {}", e);
        }
    }
}

fn status_line(controller: &InteractionController) -> String {
    let state = match (controller.search_iterations(), controller.last_outcome()) {
        (Some(iterations), _) => format!("searching... {} iterations", iterations),
        (None, Some(outcome)) => outcome.label(),
        (None, None) => "ready".to_string(),
    };
    let bindings = controller.bindings();
    format!(
        "{}x{} | {} | {}: search  {}: reset  {}: copy  {}: quit",
        controller.grid().rows(),
        controller.grid().rows(),
        state,
        bindings.start_search,
        bindings.reset,
        bindings.copy_grid,
        bindings.quit
    )
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = app_config();
    let mut controller = match InteractionController::from_config(config) {
        Ok(controller) => controller,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };
    let mut renderer = WindowRenderer {
        show_grid_lines: config.visual.show_grid_lines,
    };

    prevent_quit();

    'frames: loop {
        for event in poll_events() {
            match controller.handle_event(event) {
                EventResponse::Quit => break 'frames,
                EventResponse::CopyGrid => copy_to_clipboard(&controller.layout()),
                EventResponse::Continue => {}
            }
        }

        // One frontier pop per step, rendered between frames
        if controller.is_running() {
            for _ in 0..config.visual.steps_per_frame {
                match controller.step_search(&mut NoopObserver) {
                    Ok(None) => {}
                    Ok(Some(_)) | Err(_) => break,
                }
            }
        }

        renderer.render(controller.grid());
        draw_text(
            &status_line(&controller),
            8.0,
            controller.grid().width() as f32 + STATUS_HEIGHT - 7.0,
            20.0,
            BLACK,
        );

        next_frame().await
    }

    info!("Session summary:\n{}", controller.action_log().summary());
    if config.logging.enable_action_log {
        let path = &config.logging.action_log_path;
        match controller.action_log().save_to_file(path) {
            Ok(()) => info!("Action log saved to {}", path),
            Err(e) => error!("Failed to save action log to {}: {}", path, e),
        }
    }
}
