//! capture-archive CLI - inspect `.opt` containers and export captures.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use capture_archive::archive::{grid_factory, ArchiveFactory, ArchiveOption, ArchiveSourceType, FormatRegistry};
use capture_archive::document::CaptureDocument;
use capture_archive::export::MemoryWorkbookProvider;
use capture_archive::ArchiveSettings;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("CAPTURE_ARCHIVE_BUILD_DATE"), ")");

/// Extension the in-memory workbook backend is registered under.
const WORKBOOK_EXTENSION: &str = ".grid";

#[derive(Parser)]
#[command(
    name = "capture-archive",
    version,
    long_version = LONG_VERSION,
    about = "Inspect profiler capture containers and export captures",
    after_help = "\
EXAMPLES:
    capture-archive info session.opt                          Header and record count
    capture-archive export capture.json tree.csv --type node  Flatten the document's node
    capture-archive pack capture.json session.opt             Write frames to a container"
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Settings file (defaults to the per-user config location)
    #[arg(long, global = true, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// List registered archive formats
    Formats,
    /// Show container header and record statistics
    Info { file: PathBuf },
    /// List every record in a container
    Records { file: PathBuf },
    /// Export a JSON capture document through the archive engine
    Export {
        input: PathBuf,
        output: PathBuf,
        #[arg(long = "type", value_enum, default_value = "frame")]
        source_type: SourceTypeArg,
    },
    /// Write the frames of a JSON capture document to an .opt container
    Pack { input: PathBuf, output: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
enum SourceTypeArg {
    Node,
    Frame,
    Group,
    View,
    Tag,
}

impl From<SourceTypeArg> for ArchiveSourceType {
    fn from(arg: SourceTypeArg) -> Self {
        match arg {
            SourceTypeArg::Node => ArchiveSourceType::Node,
            SourceTypeArg::Frame => ArchiveSourceType::Frame,
            SourceTypeArg::Group => ArchiveSourceType::Group,
            SourceTypeArg::View => ArchiveSourceType::View,
            SourceTypeArg::Tag => ArchiveSourceType::Tag,
        }
    }
}

fn main() {
    let args = Args::parse();
    init_tracing(&args);

    if let Err(e) = run(args) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn init_tracing(args: &Args) {
    let default = if args.verbose {
        "debug"
    } else if args.quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_env("CAPTURE_ARCHIVE_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(path: Option<&Path>) -> Result<ArchiveSettings> {
    match path {
        Some(p) => ArchiveSettings::load_from(p).with_context(|| format!("loading settings from {}", p.display())),
        None => Ok(ArchiveSettings::load()),
    }
}

fn build_factory(settings: ArchiveSettings) -> ArchiveFactory {
    let registry = FormatRegistry::with_defaults();
    registry.register(
        WORKBOOK_EXTENSION,
        "Cell-grid Workbook (*.grid)|*.grid",
        grid_factory(Arc::new(MemoryWorkbookProvider)),
    );
    ArchiveFactory::new(registry, settings)
}

fn run(args: Args) -> Result<()> {
    let settings = load_settings(args.settings.as_deref())?;
    debug!(?settings, "settings loaded");
    let factory = build_factory(settings);

    match args.command {
        Command::Formats => cmd_formats(&factory),
        Command::Info { file } => cmd_info(&factory, &file),
        Command::Records { file } => cmd_records(&factory, &file),
        Command::Export {
            input,
            output,
            source_type,
        } => cmd_export(&factory, &input, &output, source_type.into()),
        Command::Pack { input, output } => {
            if !output.to_string_lossy().to_ascii_lowercase().ends_with(".opt") {
                bail!("pack writes .opt containers, got {}", output.display());
            }
            cmd_export(&factory, &input, &output, ArchiveSourceType::Frame)
        }
    }
}

fn cmd_formats(factory: &ArchiveFactory) -> Result<()> {
    for (ext, description) in factory.registry().describe_filters() {
        let label = description.split('|').next().unwrap_or(&description);
        println!("{:<12} {}", ext, label);
    }
    Ok(())
}

fn open_records(factory: &ArchiveFactory, file: &Path) -> Result<ArchiveOption> {
    info!("Opening capture: {}", file.display());
    let mut option = ArchiveOption::open(file);
    factory
        .open(&mut option)
        .with_context(|| format!("opening {}", file.display()))?;
    Ok(option)
}

fn cmd_info(factory: &ArchiveFactory, file: &Path) -> Result<()> {
    let mut option = open_records(factory, file)?;
    let header = option.header.context("backend reported no container header")?;
    let records = option.take_records().context("backend returned no payload stream")?;

    let mut count = 0usize;
    let mut bytes = 0u64;
    for record in records {
        let record = record.context("reading records")?;
        count += 1;
        bytes += record.serialized_len() as u64;
    }

    println!("File:        {}", file.display());
    println!("Version:     {}", header.version);
    println!("Compressed:  {}", header.is_compressed);
    println!("Records:     {}", count);
    println!("Payload:     {} bytes", bytes);
    Ok(())
}

fn cmd_records(factory: &ArchiveFactory, file: &Path) -> Result<()> {
    let mut option = open_records(factory, file)?;
    let records = option.take_records().context("backend returned no payload stream")?;

    for (i, record) in records.enumerate() {
        let record = record.with_context(|| format!("reading record {i}"))?;
        println!(
            "{:>6}  type={:<5} app={:<3} version={:<3} size={}",
            i,
            record.response_type,
            record.application_id,
            record.version,
            record.payload.len()
        );
    }
    Ok(())
}

fn cmd_export(factory: &ArchiveFactory, input: &Path, output: &Path, source_type: ArchiveSourceType) -> Result<()> {
    info!("Exporting {} as {} -> {}", input.display(), source_type, output.display());
    let document = CaptureDocument::load(input).with_context(|| format!("reading {}", input.display()))?;
    let sources = document.sources(source_type)?;

    let mut option = ArchiveOption::save(output, source_type, sources);
    factory
        .save(&mut option)
        .with_context(|| format!("saving {}", output.display()))?;
    println!("{}", output.display());
    Ok(())
}
