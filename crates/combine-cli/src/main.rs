//! yaml-combine CLI
//!
//! Combines YAML files, expands `$xref` references and prints the result.

mod cli;
mod error;

use std::io::Write;

use clap::Parser;
use colored::Colorize;
use combine_core::{Combiner, ResolveOptions, emit};
use combine_fs::{NormalizedPath, io};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::Cli;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let combiner = Combiner::new(cli.base_dir.as_path(), cli.files.iter().cloned())
        .with_options(ResolveOptions {
            max_depth: cli.max_depth,
        });
    let outcome = combiner.combine()?;

    for skipped in &outcome.skipped {
        eprintln!(
            "{}: skipped {}: {}",
            "warning".yellow().bold(),
            skipped.file,
            skipped.message
        );
    }

    let rendered = if cli.json {
        emit::to_json_string(&outcome.document)?
    } else {
        emit::to_yaml_string(&outcome.document)?
    };

    match &cli.output {
        Some(path) => {
            let path = NormalizedPath::new(path);
            io::write_text(&path, &rendered)?;
            tracing::debug!(path = %path, "Wrote combined document");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

/// Log to stderr; stdout carries the combined document.
///
/// `RUST_LOG` takes precedence over the `-v` count when set.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose > 0)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("{}: could not install logger: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!("Verbose mode enabled");
}
