//! Cloudwidget CLI: inspect upload widget payloads and option sets offline.
//!
//! `normalize` turns a captured widget callback into the completion event the
//! wrapper would publish. `options` prints the option object the wrapper would
//! hand to the widget, seeded from CLOUDINARY_* variables with `--from-env`.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use cloudwidget_cli::{apply_assignments, init_tracing, read_json, split_callback};
use cloudwidget_core::{CompletionEvent, UploadOptions, WidgetConfig};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "cloudwidget", about = "Upload widget payload tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a captured widget callback payload
    Normalize {
        /// JSON file with the callback's `result` argument
        #[arg(long)]
        result: Option<PathBuf>,
        /// JSON file with the callback's `error` argument
        #[arg(long)]
        error: Option<PathBuf>,
        /// JSON file shaped as {"error": ..., "result": ...}
        #[arg(long, conflicts_with_all = ["result", "error"])]
        callback: Option<PathBuf>,
    },
    /// Print the widget options object
    Options {
        /// Seed options from CLOUDINARY_* environment variables
        #[arg(long)]
        from_env: bool,
        /// Option assignment, key=value (value parsed as JSON when possible)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Normalize {
            result,
            error,
            callback,
        } => {
            let (raw_error, raw_result) = match callback {
                Some(path) => split_callback(read_json(&path)?)?,
                None => (
                    error.as_deref().map(read_json).transpose()?,
                    result.as_deref().map(read_json).transpose()?,
                ),
            };
            let event = CompletionEvent::from_callback(raw_error, raw_result);
            tracing::info!(
                records = event.records().len(),
                is_error = event.is_error(),
                "Normalized callback payload"
            );
            print_json(&event)?;
        }
        Commands::Options { from_env, set } => {
            let mut options = if from_env {
                WidgetConfig::from_env()
                    .context("Failed to load widget configuration from environment")?
                    .to_options()
            } else {
                UploadOptions::new()
            };
            apply_assignments(&mut options, &set)?;
            print_json(&options.to_value())?;
        }
    }

    Ok(())
}
