//! ppi-network CLI - Protein Interaction Network Explorer
//!
//! Starts the browser UI, or renders one protein list straight to figure
//! JSON.
//!
//! Usage:
//!   ppi-network [OPTIONS]
//!   ppi-network --proteins "TP53, BRCA1, EGFR" [-o FILE]

use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use ppi_network::{
    Outcome, Pipeline, PpiConfig, load_config, load_config_file,
    web::{ServerConfig, start_server},
};

/// ppi-network - Explore STRING protein-protein interaction networks
#[derive(Parser, Debug)]
#[command(name = "ppi-network")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Comma-separated protein names; renders figure JSON instead of serving the UI
    #[arg(short, long)]
    proteins: Option<String>,

    /// Output file for the figure JSON (default: stdout)
    #[arg(short, long, requires = "proteins")]
    output: Option<PathBuf>,

    /// Config file path (default: search for .ppi-network.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Give up on STRING after this many seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Seed for the force-directed layout
    #[arg(long)]
    seed: Option<u64>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    // === Web UI options ===
    /// Port for web server (default: 3000)
    #[arg(long)]
    port: Option<u16>,

    /// Don't open browser automatically when starting web server
    #[arg(long)]
    no_open: bool,

    /// API endpoint URL for frontend (useful for separate deployments)
    #[arg(long)]
    api_endpoint: Option<String>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load(args: &Args) -> Result<PpiConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => load_config_file(path)?,
        None => load_config(&std::env::current_dir()?)?,
    };

    // CLI args override config, which overrides defaults
    if let Some(timeout) = args.timeout {
        config.string_db.timeout_secs = Some(timeout);
    }
    if let Some(seed) = args.seed {
        config.layout.seed = seed;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate()?;

    Ok(config)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load(&args)?;
    let pipeline = Pipeline::from_config(&config)?;
    let rt = tokio::runtime::Runtime::new()?;

    let Some(proteins) = &args.proteins else {
        let server_config = ServerConfig {
            port: config.server.port,
            open_browser: !args.no_open,
            api_endpoint: args.api_endpoint.clone(),
            default_proteins: config.server.default_proteins.clone(),
        };

        rt.block_on(start_server(pipeline, server_config))
            .map_err(|e| -> Box<dyn std::error::Error> { e })?;

        return Ok(());
    };

    let start = Instant::now();
    let outcome = rt.block_on(pipeline.generate(proteins))?;

    let (figure, stats) = match outcome {
        Outcome::Rendered { figure, stats } => (figure, stats),
        other => {
            eprintln!("{}", other.message().unwrap_or_default());
            return Ok(());
        }
    };

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(stdout()),
    };
    serde_json::to_writer_pretty(&mut writer, &figure)?;
    writeln!(writer)?;
    writer.flush()?;

    eprintln!(
        "Network: {} proteins, {} interactions (took {:.2?})",
        stats.nodes,
        stats.edges,
        start.elapsed()
    );
    if let Some(path) = &args.output {
        eprintln!("Figure written to: {}", path.display());
    }

    Ok(())
}
