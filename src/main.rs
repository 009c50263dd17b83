//! CLI entry point for tally

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use tally::{DEFAULT_CONFIG_FILE, load_or_report, logger, print_summary, scan};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "tally")]
#[command(about = "Count non-blank lines and matching files in the directory named by config.json")]
#[command(version)]
struct Args {
    /// Configuration file with `Directory` and `FileTypes`
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Log each pruned directory and counted file to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = logger::init(args.verbose) {
        eprintln!("tally: {}", e);
    }

    let Some(config) = load_or_report(&args.config) else {
        process::exit(1);
    };

    let summary = scan(&config);

    if let Err(e) = print_summary(&summary, should_use_color(args.color)) {
        eprintln!("tally: error writing output: {}", e);
        process::exit(1);
    }
}
