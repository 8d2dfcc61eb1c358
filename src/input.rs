use std::fmt;
use std::str::FromStr;

/// Keys the controller can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Enter,
    Escape,
    Backspace,
    Tab,
    /// Letter or digit, letters stored uppercase
    Char(char),
}

impl FromStr for Key {
    type Err = String;

    /// Accepts names like `Space`, `escape`, `C`, `7` and the `Key7` form
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let trimmed = name.trim();
        let key = match trimmed.to_ascii_lowercase().as_str() {
            "space" => Key::Space,
            "enter" | "return" => Key::Enter,
            "escape" | "esc" => Key::Escape,
            "backspace" => Key::Backspace,
            "tab" => Key::Tab,
            lower => {
                let digits = lower.strip_prefix("key").unwrap_or(lower);
                let mut chars = digits.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphanumeric() => Key::Char(c.to_ascii_uppercase()),
                    _ => return Err(format!("unknown key name '{}'", trimmed)),
                }
            }
        };
        Ok(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Space => write!(f, "Space"),
            Key::Enter => write!(f, "Enter"),
            Key::Escape => write!(f, "Escape"),
            Key::Backspace => write!(f, "Backspace"),
            Key::Tab => write!(f, "Tab"),
            Key::Char(c) => write!(f, "{}", c),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Paints start, end, then obstacles
    Primary,
    /// Erases
    Secondary,
}

/// Discrete events produced by the input source
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Button held at pixel `(x, y)` of the drawing surface
    PointerDown { button: PointerButton, x: f32, y: f32 },
    KeyPress(Key),
    /// Window close request
    Quit,
}

/// What a key press means to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    StartSearch,
    Reset,
    Quit,
    CopyGrid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    pub start_search: Key,
    pub reset: Key,
    pub quit: Key,
    pub copy_grid: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            start_search: Key::Space,
            reset: Key::Char('C'),
            quit: Key::Escape,
            copy_grid: Key::Char('P'),
        }
    }
}

impl KeyBindings {
    pub fn command_for(&self, key: Key) -> Option<Command> {
        if key == self.quit {
            Some(Command::Quit)
        } else if key == self.start_search {
            Some(Command::StartSearch)
        } else if key == self.reset {
            Some(Command::Reset)
        } else if key == self.copy_grid {
            Some(Command::CopyGrid)
        } else {
            None
        }
    }
}
