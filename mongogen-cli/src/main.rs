//! Command-line front end for the script generator.
//!
//! Stands in for the original form UI: it reads a request file describing
//! the script to build, runs the condition compiler where needed, and
//! delivers the result to stdout or a `.js` file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod request;

use request::ScriptFile;

#[derive(Parser)]
#[command(
    name = "mongogen",
    about = "Generate MongoDB shell scripts from structured requests",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a shell script from a JSON request file
    Generate {
        /// Path to the request file
        request: PathBuf,
        /// Write the script here instead of a timestamped default
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print the script to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,
    },
    /// List the dotted field paths found in a JSON schema sample
    Fields {
        /// Path to the sample file
        sample: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate { request, output, stdout } => run_generate(&request, output, stdout),
        Commands::Fields { sample } => run_fields(&sample),
    }
}

fn run_generate(path: &Path, output: Option<PathBuf>, stdout: bool) -> Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read request file {}", path.display()))?;
    let file: ScriptFile = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse request file {}", path.display()))?;
    let request = file.into_request();

    if let Some(document) = request.document_text.as_deref() {
        if serde_json::from_str::<serde_json::Value>(document).is_err() {
            log::warn!("document body is not valid JSON; embedding it verbatim");
        }
    }

    let script = mongogen_core::generate(&request)?;

    if stdout {
        println!("{script}");
        return Ok(());
    }

    let target = output.unwrap_or_else(default_output_path);
    fs::write(&target, &script)
        .with_context(|| format!("failed to write script to {}", target.display()))?;
    log::info!("script saved to {}", target.display());
    println!("{}", target.display());
    Ok(())
}

fn run_fields(path: &Path) -> Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read sample file {}", path.display()))?;
    let fields = mongogen_core::schema::extract_fields(&text)?;

    for field in fields {
        println!("{}: {}", field.path, field.sample);
    }
    Ok(())
}

fn default_output_path() -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from(format!("mongodb_query_{stamp}.js"))
}
