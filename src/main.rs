//! Tempo Especial - special-period evaluator
//!
//! A CLI tool that reads exposure periods, judges each one against the
//! regulation in force at the time and prints the draft reasoning.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (unreadable input, invalid request, bad config, etc.)
//!   2 - No special sub-period found and --fail-if-none-special was set

mod cli;
mod config;

use anyhow::{Context, Result};
use cli::{Args, OutputFormat};
use config::{Config, CONFIG_FILE_NAME};
use std::io::Read;
use std::path::Path;
use tempo_especial::analysis::Evaluator;
use tempo_especial::input::parse_request;
use tempo_especial::report::{
    generate_json_report, generate_markdown_report, write_output, Report, ReportMetadata,
};
use tempo_especial::rules::RuleTable;
use tracing::{debug, error, info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args)?;

    info!("Tempo Especial v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(args) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            error!("Evaluation failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default configuration file.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml()?;
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    Ok(())
}

/// Initialize logging on stderr. `RUST_LOG` overrides the verbosity flags.
fn init_logging(args: &Args) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(args.log_level()).into())
        .from_env_lossy();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(())
}

/// Evaluate the request and emit the report. Returns the exit code (0 or 2).
fn run(args: Args) -> Result<i32> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let payload = read_input(&args)?;
    let claims = parse_request(&payload).context("Invalid request")?;
    info!("Evaluating {} period(s)", claims.len());

    let table = RuleTable::standard();
    let outcomes = Evaluator::new(&table).process_all(&claims);
    let report = Report::new(ReportMetadata::now(), outcomes);

    info!(
        "{} sub-period(s), {} special",
        report.summary.sub_periods, report.summary.special
    );

    let mut rendered = match config.report.format {
        OutputFormat::Markdown => {
            generate_markdown_report(&report, config.report.include_results)
        }
        OutputFormat::Json => generate_json_report(&report, config.report.pretty_json)?,
        OutputFormat::Text => report.minuta.clone(),
    };
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }

    match config.general.output {
        Some(ref output) => {
            let path = Path::new(output);
            write_output(&rendered, path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!("Report saved to: {}", path.display());
        }
        None => print!("{}", rendered),
    }

    if args.fail_if_none_special && report.summary.special == 0 {
        warn!("No sub-period recognized as special. Failing (exit code 2).");
        return Ok(2);
    }

    Ok(0)
}

/// Read the request payload from the input file or stdin.
fn read_input(args: &Args) -> Result<String> {
    if args.reads_stdin() {
        let mut payload = String::new();
        std::io::stdin()
            .read_to_string(&mut payload)
            .context("Failed to read request from stdin")?;
        return Ok(payload);
    }

    let path = args.input.as_deref().context("No input file given")?;
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read request file: {}", path.display()))
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE_NAME);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}
