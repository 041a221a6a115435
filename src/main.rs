mod app;
mod cli;
mod domain;
mod infra;
mod ui;

use crate::app::{AppCommand, AppError, AppEvent, AppModel};
use crate::cli::CliInvocation;
use crate::domain::Route;
use crate::infra::{
    CONFIG_ENV, LOG_ENV, default_log_path, init_logging, load_config, resolve_config_path,
};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::terminal::size as terminal_size;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::{ExecutableCommand, execute};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::{self, Stdout, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
enum MainError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error(transparent)]
    Cli(#[from] crate::cli::CliRunError),
}

fn main() {
    if let Err(error) = run_main() {
        let mut err = io::stderr().lock();
        let _ = writeln!(err, "{error}");
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), MainError> {
    let args = std::env::args().collect::<Vec<_>>();
    let invocation = match crate::cli::parse_invocation(&args) {
        Ok(invocation) => invocation,
        Err(error) => {
            let mut err = io::stderr().lock();
            let _ = writeln!(err, "{error}");
            let _ = writeln!(err);
            print_help();
            std::process::exit(2);
        }
    };

    match invocation {
        CliInvocation::PrintHelp => {
            print_help();
            Ok(())
        }
        CliInvocation::PrintVersion => {
            let mut out = io::stdout().lock();
            let _ = writeln!(out, "{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        CliInvocation::Tui { config, route } => Ok(run_tui(config, route)?),
        CliInvocation::Command(command) => {
            crate::cli::run(command)?;
            Ok(())
        }
    }
}

fn print_help() {
    let text = format!(
        "{name} - analytics dashboard with a contextual filter bar\n\nUSAGE:\n  {name} [--config PATH] [--route PATH]   Start the TUI\n  {name} routes                           List route paths, sections and hotkeys\n  {name} filters ROUTE [--sorting V] [--range V] [--interval V]\n      [--<dimension>-type V] [--json]\n                                           Print the filter bar for ROUTE\n  {name} --help | --version\n\nFILTER VALUES:\n  --sorting         top|new|recent (default: top)\n  --range           24h|7d|30d|6mo (default: 7d)\n  --interval        daily|monthly|yearly (default: daily)\n  --views-type      unique|total\n  --referrers-type  with_source|no_source|only_source\n  --systems-type    with_version|no_version\n  --devices-type    with_model|no_model\n  --browsers-type   with_version|no_version\n  --sizes-type      browser_resolution|browser_width|browser_height|\n                    screen_resolution|screen_width|screen_height\n\nOUTPUT:\n  routes: path<TAB>section<TAB>hotkey\n\nENV:\n  {config_env}   Config file (default: ~/.insightbar/config.json)\n  {log_env}      Log filter directives (default: info)\n",
        name = env!("CARGO_PKG_NAME"),
        config_env = CONFIG_ENV,
        log_env = LOG_ENV,
    );
    let mut out = io::stdout().lock();
    let _ = write!(out, "{text}");
}

fn run_tui(config_arg: Option<PathBuf>, route_arg: Option<Route>) -> Result<(), AppError> {
    let config_path = resolve_config_path(config_arg.as_deref())?;
    let config = load_config(&config_path)?;

    let mut notices: Vec<String> = Vec::new();
    let log_path = match config.log_file.clone() {
        Some(path) => Ok(path),
        None => default_log_path(),
    };
    let logging = match log_path {
        Ok(path) => init_logging(&path).map_err(|error| error.to_string()),
        Err(error) => Err(error.to_string()),
    };
    if let Err(error) = logging {
        notices.push(format!("Logging disabled: {error}"));
    }

    let route = match route_arg {
        Some(route) => route,
        None => match Route::parse(&config.initial_route) {
            Some(route) => route,
            None => {
                tracing::warn!(initial_route = %config.initial_route, "unknown initial route");
                notices.push(format!(
                    "Unknown initial route {:?}; showing overview",
                    config.initial_route
                ));
                Route::Overview
            }
        },
    };

    let notice = (!notices.is_empty()).then(|| notices.join("  "));
    let mut model = AppModel::new(route, config.domains)
        .with_menu_padding(config.menu_padding)
        .with_notice(notice);
    tracing::info!(
        config = %config_path.display(),
        domains = model.domains.len(),
        route = %model.route.path(),
        "dashboard started"
    );

    let mut terminal = setup_terminal()?;
    if let Ok((width, height)) = terminal_size() {
        model = model.with_terminal_size(width, height);
    }
    let result = run(&mut terminal, &mut model, &config_path);
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, AppError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let _ = stdout.execute(EnableMouseCapture);
    let keyboard_flags = KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES;
    let _ = stdout.execute(PushKeyboardEnhancementFlags(keyboard_flags));
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<(), AppError> {
    disable_raw_mode()?;
    let _ = execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        PopKeyboardEnhancementFlags
    );
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    model: &mut AppModel,
    config_path: &Path,
) -> Result<(), AppError> {
    loop {
        terminal.draw(|frame| ui::render(frame, model))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                let (next, command) = app::update(model.clone(), AppEvent::Key(key));
                *model = next;
                match command {
                    AppCommand::None => {}
                    AppCommand::Quit => {
                        tracing::info!("dashboard closed");
                        return Ok(());
                    }
                    AppCommand::ReloadConfig => reload_config(model, config_path),
                }
            }
            Event::Mouse(mouse) => {
                let (next, _command) = app::update(model.clone(), AppEvent::Mouse(mouse));
                *model = next;
            }
            Event::Resize(width, height) => {
                *model = model.clone().with_terminal_size(width, height);
            }
            _ => {}
        }
    }
}

/// Re-reads the domain list; the rest of the config only applies at startup.
fn reload_config(model: &mut AppModel, config_path: &Path) {
    match load_config(config_path) {
        Ok(config) => {
            let count = config.domains.len();
            model.set_domains(config.domains);
            let bound = model.hotkeys.bound_domains();
            tracing::info!(domains = count, digit_hotkeys = bound, "config reloaded");
            model.notice = Some(format!("Reloaded {count} domains ({bound} on digit keys)"));
        }
        Err(error) => {
            tracing::warn!(%error, "config reload failed");
            model.notice = Some(format!("Reload failed: {error}"));
        }
    }
}
