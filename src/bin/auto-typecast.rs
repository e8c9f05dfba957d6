//! auto-typecast CLI - typecast NDJSON records from a file or stdin
//!
//! Reads one JSON record per line, converts numeric, boolean and null
//! looking strings into typed values and writes the records to stdout.

use auto_typecast::{classify, NdjsonReader, NdjsonWriter, TypecastConfig, Typecaster};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "auto-typecast")]
#[command(version, about = "Convert numeric, boolean and null looking strings in records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Typecast NDJSON records and write them to stdout
    Filter {
        /// Path to a YAML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Container levels to descend into (0 = unlimited); overrides the config file
        #[arg(short, long)]
        max_depth: Option<usize>,

        /// Descend without a depth bound; overrides the config file
        #[arg(short, long, conflicts_with = "max_depth")]
        deep_dive: bool,

        /// Regex of keys to leave unconverted; overrides the config file
        #[arg(short, long)]
        ignore_key_pattern: Option<String>,

        /// NDJSON input file (default: stdin)
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Print how each argument would be classified
    Classify {
        /// Text values to classify
        #[arg(required = true)]
        values: Vec<String>,
    },

    /// Validate a config file without processing records
    Validate {
        /// Path to a YAML config file
        #[arg(short, long, default_value = "auto_typecast.yaml")]
        config: PathBuf,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

fn main() {
    // RUST_LOG may come from a .env file
    dotenv::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Filter { config, max_depth, deep_dive, ignore_key_pattern, input } => {
            build_typecaster(config, max_depth, deep_dive, ignore_key_pattern)
                .and_then(|caster| filter_records(&caster, input))
        }
        Commands::Classify { values } => {
            classify_values(&values);
            Ok(())
        }
        Commands::Validate { config } => validate_config(config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Merge the config file with command line overrides
fn build_typecaster(
    config_path: Option<PathBuf>,
    max_depth: Option<usize>,
    deep_dive: bool,
    ignore_key_pattern: Option<String>,
) -> Result<Typecaster, String> {
    let config = match &config_path {
        Some(path) => TypecastConfig::load_from_file(path).map_err(|e| e.to_string())?,
        None => TypecastConfig::default(),
    }
    .with_overrides(max_depth, deep_dive, ignore_key_pattern);

    let caster = config.build().map_err(|e| e.to_string())?;

    tracing::info!(
        max_depth = caster.max_depth(),
        ignore_key_pattern = caster.ignore_key_pattern().unwrap_or(""),
        "typecaster configured"
    );

    Ok(caster)
}

fn filter_records(caster: &Typecaster, input: Option<PathBuf>) -> Result<(), String> {
    let reader: Box<dyn BufRead> = match &input {
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| format!("Failed to open input file {}: {}", path.display(), e))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };

    let stdout = io::stdout();
    let mut writer = NdjsonWriter::new(stdout.lock());

    let mut records = 0usize;
    let mut converted = 0usize;

    for record in NdjsonReader::new(reader) {
        let mut record = record.map_err(|e| e.to_string())?;
        converted += caster.apply(&mut record);
        writer.write(&record).map_err(|e| e.to_string())?;
        records += 1;
    }

    writer.flush().map_err(|e| e.to_string())?;

    tracing::info!(records, converted, "typecast complete");
    Ok(())
}

fn classify_values(values: &[String]) {
    for value in values {
        println!("{:?}\t{}", value, classify(value));
    }
}

fn validate_config(config: PathBuf) -> Result<(), String> {
    let caster = TypecastConfig::load_from_file(&config)
        .and_then(|c| c.build())
        .map_err(|e| e.to_string())?;

    let depth = match caster.max_depth() {
        0 => "unlimited".to_string(),
        n => n.to_string(),
    };

    println!("✓ {} is valid", config.display());
    println!("  maxdepth: {}", depth);
    println!(
        "  ignore_key_regexp: {}",
        caster.ignore_key_pattern().unwrap_or("(none)")
    );
    Ok(())
}
