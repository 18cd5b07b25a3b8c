use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::{Path, PathBuf};
use tallyline_export::{CsvSink, discover_documents, extract_document, run_batch};
use tallyline_ingest::parsers::{SectionStatus, StatementExtract};
use tallyline_ingest::StatementParser;

mod config;

#[derive(Parser, Debug)]
#[command(
    name = "tallyline",
    version = env!("TALLYLINE_VERSION"),
    about = "Extract statement transactions into CSV"
)]
struct Cli {
    /// Config file (default: ~/.tallyline/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging (RUST_LOG still wins when set)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract every statement in a folder and append the rows to a CSV file
    Extract {
        /// Statement folder (default: $STATEMENT_FOLDER, then input.folder)
        #[arg(long)]
        folder: Option<PathBuf>,

        /// Output CSV, appended to (default: output.path)
        #[arg(long)]
        out: Option<PathBuf>,

        /// File extension to pick up, e.g. pdf or txt (default: input.extension)
        #[arg(long)]
        extension: Option<String>,

        /// Parse everything but write nothing
        #[arg(long)]
        dry_run: bool,
    },

    /// Parse one statement and print layout, subtotals and rows
    Inspect {
        file: PathBuf,

        /// Print the extract as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,

    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let config_file = config::config_path(cli.config.as_deref())?;

    match cli.command {
        Command::Extract {
            folder,
            out,
            extension,
            dry_run,
        } => {
            let cfg = config::load_config(&config_file)?;
            let folder = config::resolve_folder(
                folder,
                std::env::var(config::FOLDER_ENV).ok(),
                &cfg,
                &config_file,
            )?;
            let out = out.unwrap_or_else(|| cfg.output.path.clone());
            let extension = extension.unwrap_or_else(|| cfg.input.extension.clone());
            let parser = StatementParser::new(cfg.layout)?;

            extract(&parser, &folder, &out, &extension, dry_run)?;
        }

        Command::Inspect { file, json } => {
            let cfg = config::load_config(&config_file)?;
            let parser = StatementParser::new(cfg.layout)?;
            let extract = extract_document(&parser, &file)
                .with_context(|| format!("extracting {}", file.display()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&extract)?);
            } else {
                print_extract(&extract);
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(&config_file)?,
            ConfigCommand::Show => {
                let cfg = config::load_config(&config_file)?;
                println!("# {}\n", config_file.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn init_logger(verbose: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.try_init().ok();
}

/// Per-document failures are logged, never returned: the batch always completes.
fn extract(
    parser: &StatementParser,
    folder: &Path,
    out: &Path,
    extension: &str,
    dry_run: bool,
) -> Result<()> {
    let docs = discover_documents(folder, extension)?;
    if docs.is_empty() {
        println!("No .{} files found in {}", extension, folder.display());
        return Ok(());
    }

    let mut sink = if dry_run {
        None
    } else {
        Some(CsvSink::open_append(out)?)
    };
    let report = run_batch(&docs, parser, sink.as_mut());

    println!("\n{report}");
    if dry_run {
        println!("\nDry run: {} rows not written", report.total_rows());
    } else {
        println!("\n{} rows appended to {}", report.total_rows(), out.display());
    }

    Ok(())
}

fn print_extract(extract: &StatementExtract) {
    println!("# {}\n", extract.document);
    println!("Layout: {:?}", extract.layout);
    println!("Transaction {}\n", extract.layout.range());

    println!("## Sections\n");
    for (subtotal, outcome) in extract.subtotals.iter().zip(&extract.sections) {
        let printed = subtotal.amount.as_deref().unwrap_or("(not printed)");
        match &outcome.status {
            SectionStatus::Skipped => {
                println!("- {} | subtotal {} | skipped", outcome.section, printed);
            }
            SectionStatus::Scanned {
                records,
                reconciliation,
                ..
            } => {
                let check = if reconciliation.is_balanced() {
                    "balanced".to_string()
                } else {
                    format!(
                        "off by {} cents",
                        reconciliation.delta_cents().unwrap_or_default()
                    )
                };
                println!(
                    "- {} | subtotal {} | {} record(s) | {}",
                    outcome.section, printed, records, check
                );
            }
        }
    }

    println!("\n## Rows\n");
    for row in &extract.rows {
        println!(
            "{} | {} | {}",
            row.record.date, row.record.description, row.record.amount
        );
    }
}
