//! LazyTable - a terminal data table.
//!
//! Search, select, reorder and act on rows of evaluation data from the
//! terminal.
//!
//! Usage:
//!   lazytable                     # start with the demo rows
//!   lazytable --empty             # start with an empty table
//!   lazytable --view expanded     # three lines per row
//!   lazytable --config ./lt.toml  # use a specific config file

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::error;

use lazytable::config::{self, Settings};
use lazytable::events::EventHandler;
use lazytable::logging;
use lazytable::terminal::TerminalSession;
use lazytable::ui::ViewMode;
use lazytable::App;

/// Row density selectable on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ViewArg {
    /// One line per row.
    Compact,
    /// Three lines per row.
    Expanded,
}

impl From<ViewArg> for ViewMode {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::Compact => ViewMode::Compact,
            ViewArg::Expanded => ViewMode::Expanded,
        }
    }
}

/// A terminal data table with search, selection and drag-to-reorder.
#[derive(Debug, Parser)]
#[command(name = "lazytable", version, about)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Start without the demo rows.
    #[arg(long)]
    empty: bool,

    /// Event loop tick rate in milliseconds.
    #[arg(long, value_name = "MS")]
    tick_rate: Option<u64>,

    /// Initial row density.
    #[arg(long, value_enum)]
    view: Option<ViewArg>,
}

impl Cli {
    /// Load settings from the config file and apply command line overrides.
    fn settings(&self) -> anyhow::Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => config::load_from(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => config::load().context("Failed to load config")?,
        };

        if self.empty {
            settings.load_fixtures = false;
        }
        if let Some(tick_rate) = self.tick_rate {
            settings.tick_rate_ms = tick_rate;
        }
        if let Some(view) = self.view {
            settings.view = view.into();
        }

        settings.validate().context("Invalid settings")?;
        Ok(settings)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging failures are not fatal; the UI still works without a log file.
    if let Err(e) = logging::init() {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    let result = run(&cli);
    if let Err(e) = &result {
        error!(error = %format!("{:#}", e), "LazyTable exited with an error");
        if let Some(dir) = logging::log_directory() {
            eprintln!("Logs: {}", dir.display());
        }
    }
    logging::shutdown(result.is_ok());
    result
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let settings = cli.settings()?;
    logging::log_startup(&settings);

    let mut app = App::with_settings(&settings).context("Failed to create application")?;
    let events = EventHandler::with_tick_rate(settings.tick_rate_ms);

    let mut session = TerminalSession::start().context("Failed to initialize terminal")?;

    while !app.should_quit() {
        session
            .terminal()
            .draw(|frame| app.view(frame))
            .context("Failed to draw frame")?;

        let event = events.next().context("Failed to read terminal event")?;
        app.update(event);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "lazytable",
            "--empty",
            "--tick-rate",
            "250",
            "--view",
            "expanded",
        ])
        .unwrap();
        assert!(cli.empty);
        assert_eq!(cli.tick_rate, Some(250));
        assert!(matches!(cli.view, Some(ViewArg::Expanded)));
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_unknown_view_rejected() {
        assert!(Cli::try_parse_from(["lazytable", "--view", "wide"]).is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "tick_rate_ms = 40\nview = \"compact\"\nauto_save = false\n").unwrap();

        let cli = Cli::try_parse_from([
            "lazytable",
            "--config",
            path.to_str().unwrap(),
            "--empty",
            "--view",
            "expanded",
        ])
        .unwrap();
        let settings = cli.settings().unwrap();

        assert_eq!(settings.tick_rate_ms, 40);
        assert!(!settings.auto_save);
        assert!(!settings.load_fixtures);
        assert_eq!(settings.view, ViewMode::Expanded);
    }

    #[test]
    fn test_zero_tick_rate_flag_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");
        let cli = Cli::try_parse_from([
            "lazytable",
            "--config",
            path.to_str().unwrap(),
            "--tick-rate",
            "0",
        ])
        .unwrap();
        assert!(cli.settings().is_err());
    }
}
