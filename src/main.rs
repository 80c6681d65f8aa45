use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use offset_sync::{resolve_workspace, sync_workspace, DiskFs, SyncConfig, SyncReport};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "offset-sync")]
#[command(about = "Update offsets in Rust sources from the offsets table", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace root (defaults to the current directory)
    #[arg(value_name = "WORKSPACE")]
    path: Option<PathBuf>,

    /// Same as the positional WORKSPACE argument
    #[arg(short, long, value_name = "WORKSPACE", conflicts_with = "path")]
    workspace: Option<PathBuf>,
}

fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();
    match run(cli) {
        Ok(report) => {
            print_report(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            // Error messages already carry their cause
            eprintln!("{} {}", "ERROR:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("offset_sync=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<SyncReport> {
    let workspace = resolve_workspace(cli.workspace.or(cli.path))?;
    tracing::debug!(workspace = %workspace.display(), "resolved workspace");

    let config = SyncConfig::new(workspace);
    Ok(sync_workspace(&config, &DiskFs)?)
}

fn print_report(report: &SyncReport) {
    if report.has_changes() {
        println!("{}", "Updated:".bold());
        for path in &report.updated {
            println!(" - {}", path.display().to_string().green());
        }
    } else {
        println!("No changes required. All offsets are up to date.");
    }
}
