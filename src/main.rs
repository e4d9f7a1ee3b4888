mod app;
mod editor;
mod error;
mod logging;
mod model;
mod services;
mod theme;
mod ui;
mod widgets;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "profile-tui", version, about = "Inline editor for profile detail forms")]
struct Cli {
    /// Profile YAML (defaults to $PROFILE_TUI_CONFIG, ./profile.yaml or .tui/profile.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Directory for log files
    #[arg(long)]
    log_dir: Option<PathBuf>,
    /// Start with every field editable
    #[arg(long)]
    edit_mode: bool,
    /// Render into an off-screen buffer instead of the terminal
    #[arg(long)]
    headless: bool,
    /// Frames to render in headless mode
    #[arg(long, default_value_t = 10)]
    ticks: u64,
    /// Headless: print the committed profile as JSON on exit
    #[arg(long)]
    summary: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_dir = cli.log_dir.clone().unwrap_or_else(logging::default_log_dir);
    let _guard = logging::init(&log_dir);
    ui::run(ui::RunOptions {
        config: cli.config,
        edit_mode: cli.edit_mode,
        headless: cli.headless,
        ticks: cli.ticks,
        summary: cli.summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_parses_headless_flags() {
        let cli = Cli::parse_from(["profile-tui", "--headless", "--ticks", "3", "-c", "p.yaml"]);
        assert!(cli.headless);
        assert_eq!(cli.ticks, 3);
        assert_eq!(cli.config, Some(PathBuf::from("p.yaml")));
        assert!(!cli.edit_mode);
    }
}
