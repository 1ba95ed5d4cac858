use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};

use depmap::audit::AuditBuilder;
use depmap::config::Config;
use depmap::core::DependencyAnalyzer;
use depmap::formatters::{
    AuditMarkdownFormatter, DotFormatter, InventoryJsonFormatter, JsonCompactFormatter,
};

const DEFAULT_CONFIG: &str = "depmap.toml";

#[derive(Debug, Clone, Parser)]
#[command(
    name = "depmap",
    version,
    author = "depmap developers",
    about = "Regex-driven file dependency maps and function audits"
)]
struct Cli {
    /// Config file (defaults to ./depmap.toml when present)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Base directory for configured paths
    #[arg(short, long, value_name = "DIR", global = true)]
    root: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Build the file dependency graph
    Graph(GraphArgs),
    /// Write the function inventory as JSON
    Inventory(OutputArgs),
    /// Write the Markdown function audit
    Audit(OutputArgs),
}

#[derive(Debug, Clone, Args)]
struct GraphArgs {
    /// Input file, in processing order; repeat to add more (appended to config files)
    #[arg(long = "file", value_name = "PATH")]
    files: Vec<PathBuf>,

    /// Output file path (stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format: dot, json-compact
    #[arg(short, long, value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Dot)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Args)]
struct OutputArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum OutputFormat {
    Dot,
    JsonCompact,
}

impl OutputFormat {
    fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Dot => "dot",
            OutputFormat::JsonCompact => "json-compact",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Ok(Config::from_file(path)?),
        None if Path::new(DEFAULT_CONFIG).is_file() => {
            info!(path = DEFAULT_CONFIG, "using default config");
            Ok(Config::from_file(Path::new(DEFAULT_CONFIG))?)
        }
        None => Ok(Config::default()),
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        config,
        root,
        verbose: _,
        command,
    } = cli;

    let start_time = Instant::now();
    let config = load_config(config.as_deref())?;

    match command {
        Command::Graph(args) => {
            let config = config.with_overrides(root, args.files);
            run_graph(&config, args.output.as_deref(), args.format)?;
        }
        Command::Inventory(args) => {
            let config = config.with_overrides(root, Vec::new());
            let output = args
                .output
                .unwrap_or_else(|| PathBuf::from("function_inventory.json"));
            run_inventory(&config, &output)?;
        }
        Command::Audit(args) => {
            let config = config.with_overrides(root, Vec::new());
            let output = args
                .output
                .unwrap_or_else(|| PathBuf::from("AUDIT_APPENDIX.md"));
            run_audit(&config, &output)?;
        }
    }

    info!(elapsed_secs = start_time.elapsed().as_secs_f64(), "done");
    Ok(())
}

fn run_graph(config: &Config, output: Option<&Path>, format: OutputFormat) -> Result<()> {
    info!(format = format.as_str(), "building dependency map");
    let analyzer = DependencyAnalyzer::from_config(config)?;
    let analysis = analyzer.analyze_config(config)?;

    if !analysis.failures.is_empty() {
        warn!(
            failed = analysis.failures.len(),
            "some files could not be read; their dependencies are missing from the graph"
        );
    }

    let rendered = match format {
        OutputFormat::Dot => DotFormatter::new().format_graph(&analysis.graph),
        OutputFormat::JsonCompact => JsonCompactFormatter::new()
            .with_status()
            .format_graph(&analysis.graph)?,
    };

    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(output = %path.display(), "graph written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .context("failed to write graph to stdout")?;
        }
    }
    Ok(())
}

fn run_inventory(config: &Config, output: &Path) -> Result<()> {
    let builder = AuditBuilder::new(config.audit.clone())?;
    let corpus = builder.load(&config.root, &config.audit_root())?;
    InventoryJsonFormatter::new().format_to_file(&corpus.inventory, output)?;

    let total: usize = corpus.inventory.values().map(Vec::len).sum();
    println!("Total functions extracted: {total}");
    println!("Files processed: {}", corpus.inventory.len());
    println!("Output written to: {}", output.display());
    Ok(())
}

fn run_audit(config: &Config, output: &Path) -> Result<()> {
    let builder = AuditBuilder::new(config.audit.clone())?;
    let corpus = builder.load(&config.root, &config.audit_root())?;
    let report = builder.build(&config.root, corpus)?;
    AuditMarkdownFormatter::new().format_to_file(&report, output)?;

    println!("Audit report generated: {}", output.display());
    println!("Total functions: {}", report.summary.total_functions);
    println!("Orphaned: {}", report.summary.orphaned);
    println!("Flagged: {}", report.summary.flagged);
    Ok(())
}
