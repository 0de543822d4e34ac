#![forbid(unsafe_code)]

mod cmd;
mod output;
mod source;

use clap::{Parser, Subcommand};
use hpo_graph_core::config::load_config;
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use source::{SourceArgs, load_ontology};
use std::env;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "hpog: query the HPO phenotypic-abnormality graph",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Output format (overrides --json and FORMAT).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    #[command(flatten)]
    source: SourceArgs,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Summarize the extracted subtree",
        after_help = "EXAMPLES:\n    # Stats for a local release\n    hpog --obo hp.obo stats\n\n    # Emit machine-readable output\n    hpog --obo hp.obo stats --json"
    )]
    Stats,

    #[command(
        about = "Shortest is_a distance from a term up to the root",
        after_help = "EXAMPLES:\n    # Depth of Seizure\n    hpog --obo hp.obo depth HP:0001250"
    )]
    Depth(cmd::distance::DepthArgs),

    #[command(
        about = "Shortest path length between two terms",
        after_help = "EXAMPLES:\n    # Directed: walk from the specific term towards the general one\n    hpog --obo hp.obo distance HP:0001250 HP:0000118\n\n    # Ignore edge direction\n    hpog --obo hp.obo distance HP:0001250 HP:0002011 --undirected"
    )]
    Distance(cmd::distance::DistanceArgs),

    #[command(
        about = "List related terms of a term",
        after_help = "EXAMPLES:\n    # Everything below Seizure, Seizure included\n    hpog --obo hp.obo lineage HP:0001250\n\n    # Direct parents only\n    hpog --obo hp.obo lineage HP:0001250 --relation parents --no-self"
    )]
    Lineage(cmd::lineage::LineageArgs),

    #[command(
        about = "Write the all-pairs undirected distance matrix",
        after_help = "EXAMPLES:\n    # Use every available core\n    hpog --obo hp.obo matrix --out dist.u16\n\n    # Four worker threads\n    hpog --obo hp.obo matrix --out dist.u16 --workers 4"
    )]
    Matrix(cmd::matrix::MatrixArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("HPO_GRAPH_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "hpo_graph=debug,hpog=debug,info"
        } else {
            "hpo_graph=info,hpog=info,warn"
        })
    });

    let format = env::var("HPO_GRAPH_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(cli: &Cli, output: OutputMode) -> anyhow::Result<()> {
    let project_root = env::current_dir()?;
    let config = load_config(&project_root, cli.source.config.as_deref())?;
    let config = cli.source.apply(config);
    debug!(?config, "configuration resolved");

    let source = cli.source.resolve(&config);
    let onto = load_ontology(&source, &config)?;

    match &cli.command {
        Commands::Stats => cmd::stats::run_stats(&onto, output),
        Commands::Depth(args) => cmd::distance::run_depth(args, &onto, output),
        Commands::Distance(args) => cmd::distance::run_distance(args, &onto, output),
        Commands::Lineage(args) => cmd::lineage::run_lineage(args, &onto, output),
        Commands::Matrix(args) => cmd::matrix::run_matrix(args, &onto, &config, output),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output = cli.output_mode();
    match run(&cli, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Err(render_err) = render_error(output, &CliError::from_anyhow(&err)) {
                eprintln!("error: {err:#} ({render_err})");
            }
            ExitCode::FAILURE
        }
    }
}
