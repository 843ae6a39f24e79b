//! Workout session TUI.

mod command;
mod keybind;
mod settings;
mod state;
mod ui;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use keybind::KeyBindings;
use settings::AppConfig;
use spotter_core::{ExerciseCatalog, WorkoutStore};
use state::{App, Overlay};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

const TICK_RATE: Duration = Duration::from_millis(250);

#[derive(Debug, Parser)]
#[command(name = "spotter", version, about = "Track a workout session from the terminal")]
struct Args {
    /// Config file (defaults to $XDG_CONFIG_HOME/spotter/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write logs
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let config = AppConfig::load(args.config.as_deref())?;
    let log_path = args.log_file.clone().unwrap_or_else(|| config.log_path());
    settings::init_tracing(&log_path)?;

    let catalog = match &config.catalog_path {
        Some(path) => ExerciseCatalog::load(path)
            .wrap_err_with(|| format!("failed to load exercises from {}", path.display()))?,
        None => ExerciseCatalog::builtin(),
    };
    let bindings = match &config.keybindings_path {
        Some(path) => KeyBindings::load(path),
        None => KeyBindings::defaults(),
    };
    info!(exercises = catalog.len(), "starting");

    let mut app = App::new(WorkoutStore::new(config.session, catalog));

    let mut terminal = ratatui::init();
    let result = run(&mut app, &bindings, &mut terminal);
    ratatui::restore();

    result
}

fn run(
    app: &mut App,
    bindings: &KeyBindings,
    terminal: &mut ratatui::DefaultTerminal,
) -> color_eyre::Result<()> {
    while app.running {
        // Redraw on every tick so the elapsed clock moves.
        terminal.draw(|f| ui::render(app, f))?;

        if event::poll(TICK_RATE)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            handle_key(app, bindings, key);
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, bindings: &KeyBindings, key: KeyEvent) {
    use KeyCode::*;

    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.running = false;
        return;
    }

    // The front alert blocks everything else until answered.
    if app.alert().is_some() {
        match key.code {
            Char('y') | Enter => app.respond(true),
            Char('n') | Esc => app.respond(false),
            _ => {}
        }
        return;
    }

    match app.overlay {
        Some(Overlay::Picker(_)) => match key.code {
            Esc => app.close_overlay(),
            Enter => app.overlay_submit(),
            Tab => app.picker_toggle(),
            Up => app.picker_move(-1),
            Down => app.picker_move(1),
            Backspace => app.overlay_backspace(),
            Char(ch) if !ch.is_control() => app.overlay_input(ch),
            _ => {}
        },
        Some(Overlay::Prompt(_)) => match key.code {
            Esc => app.close_overlay(),
            Enter => app.overlay_submit(),
            Backspace => app.overlay_backspace(),
            Char(ch) if !ch.is_control() => app.overlay_input(ch),
            _ => {}
        },
        None => {
            if let Some(cmd) = bindings.get(key) {
                app.dispatch(cmd);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, &KeyBindings::defaults(), KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn args_accept_config_and_log_file() {
        let args = Args::try_parse_from(["spotter", "--config", "a.toml", "--log-file", "b.log"])
            .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("a.toml")));
        assert_eq!(args.log_file, Some(PathBuf::from("b.log")));
    }

    #[test]
    fn alert_swallows_keys_until_answered() {
        let mut app = App::new(WorkoutStore::default());
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Char('f'));
        assert!(app.alert().is_some());

        press(&mut app, KeyCode::Char('a'));
        assert!(app.overlay.is_none());

        press(&mut app, KeyCode::Char('y'));
        assert!(app.alert().is_none());
        assert!(!app.store().is_active());
    }

    #[test]
    fn picker_takes_letters_as_query() {
        let mut app = App::new(WorkoutStore::default());
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Char('a'));
        for ch in "plank".chars() {
            press(&mut app, KeyCode::Char(ch));
        }
        assert!(app.running);
        press(&mut app, KeyCode::Enter);

        let workout = app.store().workout();
        assert_eq!(workout.exercises.len(), 1);
        assert_eq!(workout.exercises[0].exercise.name, "Plank");
    }

    #[test]
    fn escape_closes_prompt_without_saving() {
        let mut app = App::new(WorkoutStore::default());
        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Esc);
        assert!(app.overlay.is_none());
        assert!(app.store().templates().is_empty());
    }
}
