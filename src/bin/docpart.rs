//! CLI binary for edgequake-docpart.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `PartitionConfig` and prints the elements.

use anyhow::{Context, Result};
use clap::Parser;
use edgequake_docpart::{
    partition_doc, partition_doc_to_file, DocumentInput, OutputFormat, PartitionConfig,
    PartitionError, PartitionProgressCallback, ProgressCallback,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal spinner that follows the partition stages.
struct CliProgressCallback {
    bar: ProgressBar,
    started: Instant,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        bar.set_prefix("Preparing");
        bar.set_message("Reading input…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            started: Instant::now(),
        })
    }
}

impl PartitionProgressCallback for CliProgressCallback {
    fn on_input_resolved(&self, path: &Path) {
        self.bar.set_message(path.display().to_string());
    }

    fn on_conversion_start(&self, _source: &Path) {
        self.bar.set_prefix("Converting");
        self.bar.set_message("soffice --convert-to docx…");
    }

    fn on_conversion_complete(&self, _artifact: &Path, elapsed_ms: u64) {
        self.bar.println(format!(
            "  {} Converted to DOCX  {}",
            green("✓"),
            dim(&format!("{:.1}s", elapsed_ms as f64 / 1000.0)),
        ));
        self.bar.set_prefix("Parsing");
        self.bar.set_message("DOCX structure…");
    }

    fn on_parse_complete(&self, element_count: usize) {
        self.bar.finish_and_clear();
        eprintln!(
            "{} {} elements  {}",
            green("✔"),
            bold(&element_count.to_string()),
            dim(&format!("{:.1}s", self.started.elapsed().as_secs_f64())),
        );
    }

    fn on_partition_error(&self, error: &PartitionError) {
        self.bar.finish_and_clear();
        eprintln!("{} {:?} error", red("✘"), error.kind());
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Elements as JSON (stdout)
  docpart memo.doc

  # Plain text to a file
  docpart memo.doc --format text -o memo.txt

  # Read the document from stdin, label it for provenance
  cat memo.doc | docpart - --metadata-filename memo.doc

  # Use a specific LibreOffice build
  docpart --soffice /opt/libreoffice7.6/program/soffice memo.doc

  # Check that a converter is available
  docpart --check

ENVIRONMENT VARIABLES:
  SOFFICE_PATH     Path to the soffice executable; skips discovery
  DOCPART_*        Every flag, e.g. DOCPART_FORMAT=text, DOCPART_TEMP_DIR=/scratch
  RUST_LOG         Log filter, overrides -v / -q

SETUP:
  LibreOffice must be installed. It is found on PATH (soffice / libreoffice)
  or in the standard install locations; otherwise set SOFFICE_PATH.
"#;

/// Partition legacy Word documents into structured elements.
#[derive(Parser, Debug)]
#[command(
    name = "docpart",
    version,
    about = "Partition legacy Word (.doc) documents into structured elements",
    long_about = "Convert a legacy Word .doc to DOCX with headless LibreOffice and split it \
into titles, narrative text, list items and tables. Elements keep the original filename as \
provenance even though parsing happens on a temporary converted copy.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to a .doc file, or `-` to read it from stdin.
    #[arg(required_unless_present = "check")]
    input: Option<String>,

    /// Write elements to this file instead of stdout.
    #[arg(short, long, env = "DOCPART_OUTPUT")]
    output: Option<PathBuf>,

    /// Output format: json or text.
    #[arg(long, env = "DOCPART_FORMAT", value_enum, default_value = "json")]
    format: FormatArg,

    /// LibreOffice executable (default: discovered).
    #[arg(long, env = "DOCPART_SOFFICE")]
    soffice: Option<PathBuf>,

    /// Share the default LibreOffice user profile instead of a private one.
    #[arg(long, env = "DOCPART_NO_ISOLATE_PROFILE")]
    no_isolate_profile: bool,

    /// Directory for temporary files (default: OS temp dir).
    #[arg(long, env = "DOCPART_TEMP_DIR")]
    temp_dir: Option<PathBuf>,

    /// Keep the temp copy made of stdin input.
    #[arg(long, env = "DOCPART_KEEP_TEMP")]
    keep_temp: bool,

    /// Filename recorded in element metadata.
    #[arg(long, env = "DOCPART_METADATA_FILENAME")]
    metadata_filename: Option<String>,

    /// Report the LibreOffice executable and version, then exit.
    #[arg(long)]
    check: bool,

    /// Disable progress spinner.
    #[arg(long, env = "DOCPART_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "DOCPART_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "DOCPART_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Json,
    Text,
}

impl From<FormatArg> for OutputFormat {
    fn from(v: FormatArg) -> Self {
        match v {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Text => OutputFormat::Text,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs while the spinner is active.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.check;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Check mode ───────────────────────────────────────────────────────
    if cli.check {
        return check_converter(cli.soffice.as_deref());
    }

    let Some(ref input_arg) = cli.input else {
        anyhow::bail!("missing INPUT (a .doc path or `-` for stdin)");
    };

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn PartitionProgressCallback>)
    } else {
        None
    };
    let config = build_config(&cli, progress_cb)?;

    let input = if input_arg == "-" {
        DocumentInput::stream(tokio::io::stdin())
    } else {
        DocumentInput::path(input_arg)
    };

    // ── Run partition ────────────────────────────────────────────────────
    let start = Instant::now();
    if let Some(ref output_path) = cli.output {
        let count = partition_doc_to_file(input, output_path, cli.format.into(), &config)
            .await
            .context("Partition failed")?;

        if !cli.quiet {
            eprintln!(
                "{}  {} elements  {}ms  →  {}",
                green("✔"),
                count,
                start.elapsed().as_millis(),
                bold(&output_path.display().to_string()),
            );
        }
    } else {
        let elements = partition_doc(input, &config)
            .await
            .context("Partition failed")?;

        let format: OutputFormat = cli.format.into();
        let body = format.render(&elements).context("Failed to render output")?;

        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(body.as_bytes())
            .context("Failed to write to stdout")?;
        if !body.ends_with('\n') {
            handle
                .write_all(b"\n")
                .context("Failed to write to stdout")?;
        }

        if !cli.quiet && !show_progress {
            eprintln!(
                "Partitioned {} elements in {}ms",
                elements.len(),
                start.elapsed().as_millis()
            );
        }
    }

    Ok(())
}

/// Map CLI args to `PartitionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<PartitionConfig> {
    let mut builder = PartitionConfig::builder()
        .isolate_profile(!cli.no_isolate_profile)
        .keep_stream_temp_file(cli.keep_temp);

    if let Some(ref program) = cli.soffice {
        builder = builder.soffice_program(program);
    }
    if let Some(ref dir) = cli.temp_dir {
        builder = builder.temp_root(dir);
    }
    if let Some(ref name) = cli.metadata_filename {
        builder = builder.metadata_filename(name);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// Print where `soffice` is and which version it reports.
fn check_converter(explicit: Option<&Path>) -> Result<()> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => soffice_locate::locate_soffice().context("LibreOffice not found")?,
    };
    let version = soffice_locate::soffice_version(&path)
        .with_context(|| format!("Failed to query {}", path.display()))?;

    println!("soffice:  {}", path.display());
    println!("version:  {}", version);
    Ok(())
}
