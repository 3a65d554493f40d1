//! Pycompat CLI - Python version compatibility checker.

use anyhow::Result;
use clap::Parser;
use pycompat_cli::{check_file, formatters};
use pycompat_core::Version;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pycompat")]
#[command(
    about = "Report Python syntax features newer than a target interpreter version",
    long_about = None
)]
struct Cli {
    /// Path to the Python file to check
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Target Python version to check compatibility against
    #[arg(short = 't', long = "target", value_name = "VERSION", default_value = "3.7")]
    target: String,

    /// Output format
    #[arg(short, long = "output", value_enum, default_value = "human")]
    format: OutputFormat,

    /// Verbose output
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Human,
    Json,
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let target = Version::parse(&cli.target)?;
    let issues = check_file(&cli.file, &target)?;

    match cli.format {
        OutputFormat::Human => formatters::human::print_issues(&issues),
        OutputFormat::Json => formatters::json::print_json(&cli.file, &target, &issues),
    }

    // Issues are advisory: finding some is still a successful run. Only an
    // unreadable/unparsable file or a malformed target exits non-zero.
    Ok(())
}
