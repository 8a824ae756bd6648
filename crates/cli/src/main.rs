use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};

use greencheck_core::{Config, Player, ScriptLibrary, init_logging};
use greencheck_ui::{App, AppState};

/// GreenCheck - a scripted fact-check chatbot for the terminal
#[derive(Parser, Debug)]
#[command(name = "greencheck")]
#[command(about = "A scripted fact-check chatbot demo for the terminal", long_about = None)]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to greencheck.toml (default: ./greencheck.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the interactive chatbot session
    Start,
    /// List the compiled-in script library
    Scripts,
    /// Show the resolved configuration
    Status,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(|| PathBuf::from("greencheck.toml"));
    let config = load_or_create_config(&config_path, cli.verbose)?;

    match cli.command {
        Commands::Start => cmd_start(config)?,
        Commands::Scripts => cmd_scripts(),
        Commands::Status => cmd_status(&config_path, &config),
    }

    Ok(())
}

/// Load config from file or create from example
fn load_or_create_config(path: &Path, verbose: bool) -> Result<Config> {
    if path.exists() {
        if verbose {
            println!("{} Loading config from {}", "Info:".blue().bold(), path.display());
        }
        Config::from_file(path).with_context(|| format!("failed to load config from {}", path.display()))
    } else {
        println!(
            "{} No config at {}, creating one from the example",
            "Info:".blue().bold(),
            path.display()
        );

        std::fs::write(path, Config::example())
            .with_context(|| format!("failed to create config at {}", path.display()))?;

        Config::from_toml_str(Config::example()).context("example config failed to parse")
    }
}

/// Start the interactive chatbot session
fn cmd_start(config: Config) -> Result<()> {
    init_logging(&config.logging, true).context("failed to initialize logging")?;

    let player = Player::new(ScriptLibrary::builtin()).with_typing_delay(config.typing_delay());
    let mut app = App::new(AppState::new(player));

    let runtime = tokio::runtime::Runtime::new().context("failed to start runtime")?;
    runtime
        .block_on(greencheck_ui::app::event_loop::run(&mut app))
        .context("TUI session failed")?;

    Ok(())
}

/// List the compiled-in script library
fn cmd_scripts() {
    let library = ScriptLibrary::builtin();

    println!("{}", "GreenCheck script library".green().bold().underline());
    println!();

    for (idx, script) in library.scripts().iter().enumerate() {
        println!(
            "{} {} ({} {})",
            format!("{}.", idx + 1).green().bold(),
            script.title.bold(),
            script.len(),
            if script.len() == 1 { "turno" } else { "turnos" },
        );
        println!("   {} {}", "claim:".blue(), script.opening_prompt());
        println!("   {} {}", "fonte:".blue(), script.source_url.cyan());
        println!();
    }
}

/// Show the resolved configuration
fn cmd_status(config_path: &Path, config: &Config) {
    println!("{}", "GreenCheck Status".green().bold().underline());
    println!();

    println!("{} Configuration", "Info:".blue().bold());
    println!(
        "  Config file: {}",
        if config_path.exists() { config_path.display().to_string() } else { "(defaults)".to_string() }.cyan()
    );
    println!("  Typing delay: {} ms", config.typing_delay_ms.to_string().cyan());
    println!("  Log level: {}", config.logging.level.cyan());
    println!("  Log format: {}", config.logging.format.cyan());
    println!(
        "  File logging: {}",
        if config.logging.file.enabled { "enabled" } else { "disabled" }.cyan()
    );
    println!("  Scripts: {}", ScriptLibrary::builtin().len().to_string().cyan());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::try_parse_from(["greencheck", "status"]).unwrap();
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_with_config() {
        let cli = Cli::try_parse_from(["greencheck", "--config", "/path/to/greencheck.toml", "status"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/greencheck.toml")));
    }

    #[test]
    fn test_cli_subcommands() {
        assert!(matches!(
            Cli::try_parse_from(["greencheck", "start"]).unwrap().command,
            Commands::Start
        ));
        assert!(matches!(
            Cli::try_parse_from(["greencheck", "scripts"]).unwrap().command,
            Commands::Scripts
        ));
        assert!(matches!(
            Cli::try_parse_from(["greencheck", "status"]).unwrap().command,
            Commands::Status
        ));
    }

    #[test]
    fn test_load_or_create_config_writes_example() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("greencheck.toml");

        let config = load_or_create_config(&path, false).unwrap();
        assert_eq!(config.typing_delay_ms, 1000);

        // The example lands on disk and round-trips on the next run.
        assert_eq!(std::fs::read_to_string(&path).unwrap(), Config::example());
        let reloaded = load_or_create_config(&path, false).unwrap();
        assert_eq!(reloaded.typing_delay_ms, config.typing_delay_ms);
    }

    #[test]
    fn test_load_or_create_config_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("greencheck.toml");
        std::fs::write(&path, "typing_delay_ms = 50").unwrap();

        let config = load_or_create_config(&path, false).unwrap();
        assert_eq!(config.typing_delay_ms, 50);
    }

    #[test]
    fn test_load_or_create_config_invalid() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("greencheck.toml");
        std::fs::write(&path, "not valid toml").unwrap();

        assert!(load_or_create_config(&path, false).is_err());
    }

    #[test]
    fn test_cmd_scripts_runs() {
        cmd_scripts();
    }

    #[test]
    fn test_cmd_status_runs() {
        cmd_status(Path::new("greencheck.toml"), &Config::default());
    }
}
