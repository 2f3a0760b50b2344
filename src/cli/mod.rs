//! CLI commands implementation.
//!
//! Parses arguments, wires the pipeline together, and renders progress for
//! the batch command.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;

use docsift::analysis::DocumentAnalyzer;
use docsift::batch::{BatchEvent, BatchOrchestrator};
use docsift::capabilities::{CapabilitySet, TesseractOcr};
use docsift::compare::DocumentComparator;
use docsift::config::Settings;
use docsift::extract::DocumentExtractor;

#[derive(Parser)]
#[command(name = "docsift")]
#[command(about = "Multi-document analysis and comparison system")]
#[command(version)]
pub struct Cli {
    /// Config file path (TOML, all fields optional)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a canonical text record from one document
    Extract {
        /// Document path
        path: PathBuf,
    },

    /// Extract and analyze one document
    Analyze {
        /// Document path
        path: PathBuf,
    },

    /// Compare two documents
    Compare {
        /// First document path
        path_a: PathBuf,
        /// Second document path
        path_b: PathBuf,
    },

    /// Run the full pipeline over a list of documents
    Batch {
        /// Document paths, in order
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Worker count (overrides config)
        #[arg(short, long)]
        workers: Option<usize>,
        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Report capability and external tool availability
    Tools,
}

/// Everything the commands need, built once from settings.
struct Pipeline {
    extractor: Arc<DocumentExtractor>,
    analyzer: Arc<DocumentAnalyzer>,
    comparator: Arc<DocumentComparator>,
    capabilities: Arc<CapabilitySet>,
    settings: Settings,
}

fn build_pipeline(settings: Settings) -> Pipeline {
    let capabilities = Arc::new(
        CapabilitySet::default()
            .with_ocr(Box::new(TesseractOcr::new().with_language(&settings.ocr_language))),
    );
    let extractor = Arc::new(DocumentExtractor::new(capabilities.clone(), &settings));
    let analyzer = Arc::new(DocumentAnalyzer::new(capabilities.clone(), settings.clone()));
    let comparator = Arc::new(DocumentComparator::new(settings.clone()));

    Pipeline {
        extractor,
        analyzer,
        comparator,
        capabilities,
        settings,
    }
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    match cli.command {
        Commands::Extract { path } => {
            let pipeline = build_pipeline(settings);
            let record = pipeline.extractor.extract(&path)?;
            println!("{}", serde_json::to_string_pretty(&*record)?);
        }

        Commands::Analyze { path } => {
            let pipeline = build_pipeline(settings);
            let record = pipeline.extractor.extract(&path)?;
            let analysis = pipeline.analyzer.analyze(&record);
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }

        Commands::Compare { path_a, path_b } => {
            let pipeline = build_pipeline(settings);
            let record_a = pipeline.extractor.extract(&path_a)?;
            let record_b = pipeline.extractor.extract(&path_b)?;
            let analysis_a = pipeline.analyzer.analyze(&record_a);
            let analysis_b = pipeline.analyzer.analyze(&record_b);
            let comparison = pipeline
                .comparator
                .compare(&record_a, &analysis_a, &record_b, &analysis_b);
            println!("{}", serde_json::to_string_pretty(&comparison)?);
        }

        Commands::Batch {
            paths,
            workers,
            quiet,
        } => {
            let mut settings = settings;
            if let Some(workers) = workers {
                settings.workers = workers;
            }
            let pipeline = build_pipeline(settings);

            let orchestrator = Arc::new(BatchOrchestrator::new(
                pipeline.extractor.clone(),
                pipeline.analyzer.clone(),
                pipeline.comparator.clone(),
                pipeline.settings.clone(),
            ));

            let (event_tx, event_rx) = mpsc::channel(64);
            let runner = {
                let orchestrator = orchestrator.clone();
                let paths = paths.clone();
                tokio::spawn(async move { orchestrator.analyze_batch(&paths, event_tx).await })
            };

            consume_events(event_rx, quiet).await;

            let result = runner.await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Tools => {
            let pipeline = build_pipeline(settings);
            report_tools(&pipeline.capabilities);
        }
    }

    Ok(())
}

/// Render batch progress from the event stream.
async fn consume_events(mut event_rx: mpsc::Receiver<BatchEvent>, quiet: bool) {
    let mut bar: Option<ProgressBar> = None;

    while let Some(event) = event_rx.recv().await {
        if quiet {
            continue;
        }
        match event {
            BatchEvent::BatchStarted { total_documents } => {
                eprintln!(
                    "  {} Analyzing {} documents",
                    style("→").cyan(),
                    total_documents
                );
                bar = Some(progress_bar(total_documents as u64));
            }
            BatchEvent::DocumentCompleted { .. } | BatchEvent::DocumentFailed { .. } => {
                if let Some(bar) = &bar {
                    bar.inc(1);
                }
            }
            BatchEvent::AnalysisPhaseComplete { succeeded, failed } => {
                if let Some(bar) = bar.take() {
                    bar.finish_and_clear();
                }
                eprintln!(
                    "  {} Analysis complete: {} succeeded, {} failed",
                    style("✓").green(),
                    succeeded,
                    failed
                );
            }
            BatchEvent::ComparisonPhaseStarted { total_pairs } => {
                eprintln!(
                    "  {} Comparing {} document pairs",
                    style("→").cyan(),
                    total_pairs
                );
                bar = Some(progress_bar(total_pairs as u64));
            }
            BatchEvent::PairCompared { .. } => {
                if let Some(bar) = &bar {
                    bar.inc(1);
                }
            }
            BatchEvent::BatchCompleted { elapsed_ms } => {
                if let Some(bar) = bar.take() {
                    bar.finish_and_clear();
                }
                eprintln!("  {} Batch finished in {}ms", style("✓").green(), elapsed_ms);
            }
            _ => {}
        }
    }
}

fn progress_bar(len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::with_template("  [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}

/// Print capability slots and their availability.
fn report_tools(capabilities: &CapabilitySet) {
    println!("Capability status:");
    for status in capabilities.status() {
        let mark = if status.available {
            style("✓").green()
        } else {
            style("✗").red()
        };
        let engine = status.engine.as_deref().unwrap_or("(none registered)");
        print!("  {} {:<10} {}", mark, status.slot, engine);
        if !status.available {
            if let Some(hint) = &status.hint {
                print!("  — {}", hint);
            }
        }
        println!();
    }
}
