mod app;
mod components;
mod config;
mod error;
mod event;
mod fs;
mod handler;
mod theme;
mod tui;
mod ui;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::app::App;
use crate::error::{AppError, Result};
use crate::event::{Event, EventSource};
use crate::tui::{install_panic_hook, Tui};

/// A terminal tree-view directory browser.
#[derive(Parser, Debug)]
#[command(name = "treenav", version, about)]
struct Cli {
    /// Directory to browse (defaults to the current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Explicit config file (skips config discovery)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Force ASCII row indicators
    #[arg(long)]
    ascii: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("tn: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let path = cli
        .path
        .canonicalize()
        .map_err(|_| AppError::InvalidPath(format!("{} does not exist", cli.path.display())))?;
    if !path.is_dir() {
        return Err(AppError::InvalidPath(format!(
            "{} is not a directory",
            path.display()
        )));
    }

    let config = config::load(cli.config.as_deref());
    let theme = theme::resolve_theme(&config.theme);
    let use_icons = !cli.ascii && config.tree.use_icons.unwrap_or(true);

    // Build the initial tree before touching the terminal so startup errors
    // print cleanly to stderr.
    let mut app = App::new(&path, theme, use_icons)?;

    install_panic_hook();
    let mut tui = Tui::new()?;
    let mut events = EventSource::new();

    let result = run_loop(&mut tui, &mut app, &mut events);
    let restored = tui.restore();
    result.and(restored)
}

fn run_loop(tui: &mut Tui, app: &mut App, events: &mut EventSource) -> Result<()> {
    loop {
        tui.terminal_mut().draw(|frame| {
            ui::render(app, frame);
        })?;

        match events.next()? {
            Event::Key(key) => handler::handle_key_event(app, key),
            Event::Resize(_, _) => {}
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
