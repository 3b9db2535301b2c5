//! quickhelp - a terminal quick access palette.

use std::io::{self, Stdout, Write};
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use quickhelp::app::{build_registry, App};
use quickhelp::config::{config_path, Settings};
use quickhelp::error::{AppError, Result};
use quickhelp::events::EventHandler;
use quickhelp::logging;
use quickhelp::nls::Messages;
use quickhelp::quickaccess::{build_grouped_list, PickerEntry, ProviderSource};

/// Quick access palette with a grouped help listing.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Configuration file (defaults to the platform config directory).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Value to open the palette with, e.g. `?` or `>`.
    #[arg(short, long)]
    prefix: Option<String>,

    /// Print the help listing and exit.
    #[arg(short, long)]
    list: bool,

    /// Write the effective configuration to the config file and exit.
    #[arg(long)]
    write_config: bool,

    /// Directory for log files.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

/// Restores the terminal when dropped, including on early returns.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()
            .map_err(|e| AppError::terminal(format!("failed to enable raw mode: {e}")))?;
        Self::setup().map_err(|e| {
            // Nothing owns the raw mode yet, undo it here
            let _ = disable_raw_mode();
            AppError::terminal(format!("failed to set up the screen: {e}"))
        })
    }

    fn setup() -> io::Result<Self> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(e) => {
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                Err(e)
            }
        }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

fn print_listing(entries: &[PickerEntry]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    for entry in entries {
        match entry {
            PickerEntry::Separator { label } => writeln!(out, "-- {} --", label)?,
            PickerEntry::Item(item) => writeln!(
                out,
                "{:<8} {}",
                item.label,
                item.description.as_deref().unwrap_or_default()
            )?,
        }
    }
    Ok(())
}

/// Save `settings` to `path`, or to the default configuration file.
fn write_config(settings: &Settings, path: Option<PathBuf>) -> Result<PathBuf> {
    let path = match path {
        Some(path) => path,
        None => config_path()?,
    };
    settings.save_to(&path)?;
    Ok(path)
}

fn user_error(error: AppError) -> anyhow::Error {
    anyhow::anyhow!(error.user_message())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.log_dir.clone()) {
        eprintln!("warning: logging disabled: {e:#}");
    }

    let loaded = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };

    if cli.write_config {
        // Never overwrite a file that failed to load with defaults
        let settings = loaded.map_err(|e| user_error(e.into()))?;
        let path = write_config(&settings, cli.config.clone()).map_err(user_error)?;
        println!("Wrote {}", path.display());
        logging::shutdown();
        return Ok(());
    }

    let settings = loaded.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        eprintln!("warning: {e}");
        Settings::default()
    });

    let messages = Rc::new(Messages::with_overrides(settings.messages.clone()));
    let registry = build_registry(&settings, Rc::clone(&messages));

    if cli.list {
        let entries = build_grouped_list(&registry.list_providers(), &messages);
        print_listing(&entries)?;
        logging::shutdown();
        return Ok(());
    }

    let value = cli.prefix.unwrap_or_else(|| settings.default_value.clone());
    let mut app = App::new(registry);
    app.show(&value);

    let result = {
        let mut guard = TerminalGuard::enter().map_err(user_error)?;
        app.run(&mut guard.terminal, &EventHandler::new())
    };
    result.map_err(user_error)?;

    if let Some(item) = app.accepted() {
        println!("{}", item.label);
    }

    logging::shutdown();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_config_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quickhelp").join("config.toml");
        let settings = Settings {
            default_value: ">".to_string(),
            ..Settings::default()
        };

        let written = write_config(&settings, Some(path.clone())).unwrap();

        assert_eq!(written, path);
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }
}
