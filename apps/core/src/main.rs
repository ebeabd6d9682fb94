// reqclass - FR/NFR classifier for user stories
// Reads stories from a file or stdin and prints the classification report.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::info;

use reqclass_core::engine::{PatternBank, RequirementAnalyzer};
use reqclass_core::{logging, render, text_extract};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(version, about = "Classify user stories into functional and non-functional requirements")]
struct Cli {
    /// Story file (.txt, .md or .csv); reads stdin when omitted
    file: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, env = "REQCLASS_FORMAT", default_value = "text")]
    format: OutputFormat,

    /// Also write the report to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pattern bank JSON replacing the built-in one
    #[arg(short, long, env = "REQCLASS_BANK")]
    bank: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Bunyan JSON log lines on stderr
    #[arg(long)]
    log_json: bool,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.log_json).context("Failed to initialize logging")?;

    // Bank problems are fatal at startup
    let custom_bank = cli
        .bank
        .as_ref()
        .map(|path| {
            PatternBank::from_path(path)
                .with_context(|| format!("Failed to load pattern bank {}", path.display()))
        })
        .transpose()?;
    let bank = match &custom_bank {
        Some(bank) => bank,
        // Report a broken built-in bank instead of panicking in the shared LazyLock
        None => PatternBank::builtin()
            .map(|_| PatternBank::shared())
            .context("Built-in pattern bank is invalid")?,
    };

    let text = match &cli.file {
        Some(path) => {
            info!("Processing file: {}", path.display());
            text_extract::extract_text_from_path(path)
                .with_context(|| format!("Failed to read {}", path.display()))?
        }
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            buffer
        }
    };

    if text.trim().is_empty() {
        eprintln!("No input provided. Nothing to classify.");
        return Ok(());
    }

    let report = RequirementAnalyzer::new(bank).analyze(&text);
    let rendered = match cli.format {
        OutputFormat::Text => render::render_text(&report),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            json.push('\n');
            json
        }
    };

    io::stdout()
        .write_all(rendered.as_bytes())
        .context("Failed to write report")?;

    if let Some(path) = &cli.output {
        std::fs::write(path, &rendered)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Results saved to {}", path.display());
    }

    Ok(())
}
