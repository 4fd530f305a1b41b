//! stampscan - record the timestamp, size and checksum of every file in a tree.
//!
//! Usage:
//!   stampscan <FOLDER>                    Write timestamp_<FOLDER>.csv
//!   stampscan <FOLDER> --hash             Also compute MD5 of every file
//!   stampscan <FOLDER> -o report.jsonl -f jsonl
//!   stampscan --help                      Show help

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Context, Result, bail};
use tracing_subscriber::EnvFilter;

use stampscan_report::ReportFormat;
use stampscan_scan::{ChannelProgress, ScanEngine, ScanRequest, ScanSummary};

#[derive(Parser)]
#[command(
    name = "stampscan",
    version,
    about = "Record timestamps, sizes and checksums of every file under a folder",
    long_about = "stampscan walks a folder recursively and writes one report row per \
                  entry: relative path, extension (DIR / LINK for directories and links), \
                  size in bytes, modification time and, with --hash, the MD5 of each \
                  regular file."
)]
struct Cli {
    /// Folder to scan
    root: PathBuf,

    /// Report file (defaults to timestamp_<FOLDER>.<ext> in the current directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Compute the MD5 hash of every regular file
    #[arg(long)]
    hash: bool,

    /// Report format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Do not print progress
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Csv,
    Jsonl,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Csv => ReportFormat::Csv,
            OutputFormat::Jsonl => ReportFormat::JsonLines,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let cli = Cli::parse();
    validate_root(&cli.root)?;

    let format = ReportFormat::from(cli.format);
    let output = cli
        .output
        .unwrap_or_else(|| default_output(&cli.root, format));

    let request = ScanRequest::builder()
        .root(cli.root)
        .output(output)
        .compute_hash(cli.hash)
        .build()
        .context("Invalid scan request")?;

    eprintln!("Scanning {}...", request.root.display());
    let summary = run_scan(request.clone(), format, cli.quiet).await?;

    println!();
    println!("{}", "─".repeat(60));
    println!(" Done: {}", request.output.display());
    println!(
        " {} entries, {} without metadata",
        summary.rows_written, summary.partial_rows
    );
    if request.compute_hash {
        println!(
            " {} files hashed, {} unreadable",
            summary.digests_computed, summary.digests_failed
        );
    }
    println!(" {} total", format_size(summary.total_bytes));
    println!(" Scanned in {:.2}s", summary.elapsed.as_secs_f64());
    println!("{}", "─".repeat(60));

    if summary.walk_errors > 0 {
        println!();
        println!("{} folder(s) could not be listed", summary.walk_errors);
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default: warnings only).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the engine on a blocking thread and render its progress here.
async fn run_scan(request: ScanRequest, format: ReportFormat, quiet: bool) -> Result<ScanSummary> {
    let (mut progress, mut progress_rx) = ChannelProgress::channel();

    let scan = tokio::task::spawn_blocking(move || {
        let mut reporter = format.reporter();
        ScanEngine::new().run(&request, &mut reporter, &mut progress)
    });

    // Ends once the engine drops its sender.
    while let Some(percent) = progress_rx.recv().await {
        if !quiet {
            eprint!("\r {percent:>3}%");
        }
    }
    if !quiet {
        eprintln!();
    }

    let outcome = scan.await.context("Scan task panicked")?;
    let summary = outcome.context("Scan failed")?;
    Ok(summary)
}

/// Reject anything that is not an existing directory before scanning.
fn validate_root(root: &Path) -> Result<()> {
    if root.as_os_str().is_empty() || !root.is_dir() {
        bail!("Select a base folder: {} is not a directory", root.display());
    }
    Ok(())
}

/// `timestamp_<folder name>.<ext>` in the current directory.
fn default_output(root: &Path, format: ReportFormat) -> PathBuf {
    let resolved = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    let stem = resolved
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    PathBuf::from(format!("timestamp_{stem}.{}", format.extension()))
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}
