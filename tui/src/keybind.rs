//! Keybinding configuration and parsing.
//!
//! The optional bindings file holds one `key = command` pair per line, e.g.
//! `<C-f> = finish` or `x = delete-exercise`. Lines starting with `#` are
//! comments. Anything unparseable is skipped and the default stays in place.

use crate::command::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Maps key events to commands.
pub struct KeyBindings {
    bindings: HashMap<KeySpec, Command>,
}

/// A normalized key specification for lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct KeySpec {
    code: KeyCode,
    ctrl: bool,
    alt: bool,
}

impl From<KeyEvent> for KeySpec {
    fn from(event: KeyEvent) -> Self {
        // Shift is already folded into the character for printable keys.
        Self {
            code: event.code,
            ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
            alt: event.modifiers.contains(KeyModifiers::ALT),
        }
    }
}

impl KeyBindings {
    /// Create default keybindings.
    pub fn defaults() -> Self {
        let mut bindings = HashMap::new();

        // Quit
        bindings.insert(key(KeyCode::Char('q')), Command::Quit);
        bindings.insert(ctrl(KeyCode::Char('c')), Command::Quit);

        // Cursor
        bindings.insert(key(KeyCode::Up), Command::Up);
        bindings.insert(key(KeyCode::Char('k')), Command::Up);
        bindings.insert(key(KeyCode::Down), Command::Down);
        bindings.insert(key(KeyCode::Char('j')), Command::Down);
        bindings.insert(key(KeyCode::Left), Command::Left);
        bindings.insert(key(KeyCode::Char('h')), Command::Left);
        bindings.insert(key(KeyCode::Right), Command::Right);
        bindings.insert(key(KeyCode::Char('l')), Command::Right);
        bindings.insert(key(KeyCode::Tab), Command::ToggleField);
        bindings.insert(key(KeyCode::BackTab), Command::ToggleField);
        bindings.insert(key(KeyCode::Enter), Command::Select);

        // Templates
        bindings.insert(key(KeyCode::Char('n')), Command::StartEmpty);
        bindings.insert(key(KeyCode::Char('c')), Command::NewTemplate);
        bindings.insert(key(KeyCode::Char('e')), Command::Edit);
        bindings.insert(key(KeyCode::Char('d')), Command::Delete);

        // Workout
        bindings.insert(key(KeyCode::Char('a')), Command::AddExercises);
        bindings.insert(key(KeyCode::Char('s')), Command::AddSet);
        bindings.insert(key(KeyCode::Char('X')), Command::DeleteExercise);
        bindings.insert(key(KeyCode::Char(' ')), Command::ToggleComplete);
        bindings.insert(key(KeyCode::Char('t')), Command::CycleSetType);
        bindings.insert(key(KeyCode::Char('+')), Command::RestUp);
        bindings.insert(key(KeyCode::Char('=')), Command::RestUp);
        bindings.insert(key(KeyCode::Char('-')), Command::RestDown);
        bindings.insert(key(KeyCode::Char(']')), Command::DefaultRestUp);
        bindings.insert(key(KeyCode::Char('[')), Command::DefaultRestDown);
        bindings.insert(key(KeyCode::Char('u')), Command::ToggleUnit);
        bindings.insert(key(KeyCode::Char('r')), Command::Rename);
        bindings.insert(key(KeyCode::Char('T')), Command::SaveTemplate);
        bindings.insert(key(KeyCode::Char('f')), Command::Finish);
        bindings.insert(key(KeyCode::Char('x')), Command::CancelWorkout);

        // Editing
        bindings.insert(key(KeyCode::Backspace), Command::Backspace);

        Self { bindings }
    }

    /// Load keybindings from a config file, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "could not read keybindings");
                return Self::defaults();
            }
        };
        Self::parse(&content)
    }

    /// Default bindings overridden by the pairs found in `content`.
    pub fn parse(content: &str) -> Self {
        let mut bindings = Self::defaults();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key_str, cmd_str)) = line.rsplit_once('=') else {
                warn!(line, "ignoring keybinding without '='");
                continue;
            };
            match (parse_key_spec(key_str), cmd_str.trim().parse()) {
                (Some(spec), Ok(cmd)) => {
                    bindings.bindings.insert(spec, cmd);
                }
                _ => warn!(line, "ignoring unknown keybinding"),
            }
        }

        bindings
    }

    /// Look up a command for a key event. Digits are handled specially.
    pub fn get(&self, event: KeyEvent) -> Option<Command> {
        // Digits carry data and cannot be rebound
        if let KeyCode::Char(ch) = event.code
            && (ch.is_ascii_digit() || ch == '.')
        {
            return Some(Command::Digit(ch));
        }

        self.bindings.get(&KeySpec::from(event)).copied()
    }
}

fn key(code: KeyCode) -> KeySpec {
    KeySpec {
        code,
        ctrl: false,
        alt: false,
    }
}

fn ctrl(code: KeyCode) -> KeySpec {
    KeySpec {
        code,
        ctrl: true,
        alt: false,
    }
}

/// Parse a key specification string like "<C-x>", "<Esc>", "<space>", "n".
fn parse_key_spec(s: &str) -> Option<KeySpec> {
    let s = s.trim();

    if s.len() > 2 && s.starts_with('<') && s.ends_with('>') {
        parse_bracketed_key(&s[1..s.len() - 1])
    } else {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Some(key(KeyCode::Char(ch))),
            _ => None,
        }
    }
}

fn parse_bracketed_key(s: &str) -> Option<KeySpec> {
    let mut spec = key(KeyCode::Null);

    let parts: Vec<&str> = s.split('-').collect();
    let key_part = parts.last()?;

    for &part in &parts[..parts.len().saturating_sub(1)] {
        match part {
            "C" => spec.ctrl = true,
            "A" => spec.alt = true,
            _ => return None,
        }
    }

    spec.code = match key_part.to_lowercase().as_str() {
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "enter" | "return" => KeyCode::Enter,
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "space" => KeyCode::Char(' '),
        "minus" => KeyCode::Char('-'),
        _ => {
            let mut chars = key_part.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => KeyCode::Char(ch),
                _ => return None,
            }
        }
    };

    Some(spec)
}
