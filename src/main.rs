//! Journal Lens - AI analysis for journal entries
//!
//! A terminal client that sends journal text to the AI journal backend and
//! shows the returned summary, sentiment and insights.
//!
//! Exit codes:
//!   0 - Success (every requested analysis completed)
//!   1 - Runtime error (empty entry, config, unreachable health check, etc.)
//!   2 - One or more analyses failed

mod cli;
mod client;
mod config;
mod models;
mod orchestrator;
mod progress;
mod render;
mod screen;

use anyhow::{Context, Result};
use cli::{Args, OutputFormat};
use client::HttpBackend;
use config::Config;
use orchestrator::{validate_text, AnalysisError, AnalysisOrchestrator};
use progress::BusyIndicator;
use render::ResultsDocument;
use screen::Screen;
use std::io::{IsTerminal, Read};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("Journal Lens v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(args).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Run failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .journal-lens.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(config::CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            config::CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", config::CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", config::CONFIG_FILE_NAME);
    println!("   Edit it to choose the backend target and output format.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// `RUST_LOG` takes precedence over the flags when set.
fn init_logging(args: &Args) {
    let level = args.log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Dispatch to the selected mode. Returns the exit code.
async fn run(args: Args) -> Result<i32> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let base_url = config.api.base_url().to_string();
    info!("Using AI backend at {}", base_url);
    let backend = HttpBackend::new(&base_url).context("Failed to create HTTP client")?;

    if args.health {
        return handle_health(&backend).await;
    }

    let interactive =
        args.interactive || (!args.has_text_source() && std::io::stdin().is_terminal());

    if interactive {
        let mut indicator = BusyIndicator::new(!args.quiet);
        let orchestrator = AnalysisOrchestrator::new(backend)
            .with_busy_observer(move |state| indicator.update(state));
        let mut screen = Screen::new(orchestrator, config.output.show_metadata);
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let mut stdout = std::io::stdout();
        screen.run(stdin, &mut stdout).await?;
        return Ok(0);
    }

    let text = read_entry(&args)?;
    run_once(&args, &config, backend, &text).await
}

/// Handle --health: query the backend and report its status.
async fn handle_health(backend: &HttpBackend) -> Result<i32> {
    println!("🩺 Checking AI backend at {}", backend.base_url());

    match backend.check_health().await {
        Ok(health) if health.is_healthy() => {
            println!("✅ AI service is healthy");
            if let Some(service) = health.service {
                println!("   Service: {}", service);
            }
            if let Some(environment) = health.environment {
                println!("   Environment: {}", environment);
            }
            Ok(0)
        }
        Ok(health) => {
            eprintln!("⚠️  AI service reports status '{}'", health.status);
            Ok(1)
        }
        Err(e) => {
            warn!("Health check failed: {}", e);
            eprintln!("❌ {}: {}", e.user_message(), e);
            Ok(1)
        }
    }
}

/// Run the requested analyses once and print or save the results.
async fn run_once(args: &Args, config: &Config, backend: HttpBackend, text: &str) -> Result<i32> {
    if let Err(e) = validate_text(text) {
        eprintln!("⛔ Input Required: {}", e);
        return Ok(1);
    }

    let kinds = args.requested_kinds();
    let base_url = backend.base_url().to_string();
    let show_progress = !args.quiet && config.output.format == OutputFormat::Text;
    let mut indicator = BusyIndicator::new(show_progress);
    let mut orchestrator = AnalysisOrchestrator::new(backend)
        .with_busy_observer(move |state| indicator.update(state));

    let failures: Vec<AnalysisError> = match kinds.as_slice() {
        [kind] => orchestrator.analyze(text, *kind).await.err().into_iter().collect(),
        _ => {
            let report = orchestrator.analyze_all(text).await?;
            if report.all_succeeded() {
                debug!("Every analysis completed");
            }
            report
                .settlements
                .into_iter()
                .filter_map(|s| s.outcome.err())
                .collect()
        }
    };

    for failure in &failures {
        eprintln!("⚠️  {}", failure);
    }

    let results = orchestrator.state().results();
    let output = match config.output.format {
        OutputFormat::Text => render::render_results(results, config.output.show_metadata),
        OutputFormat::Json => {
            let failure_refs: Vec<&AnalysisError> = failures.iter().collect();
            let document = ResultsDocument::new(&base_url, results, &failure_refs);
            render::generate_json_results(&document)?
        }
    };

    match args.output {
        Some(ref path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write results to {}", path.display()))?;
            println!("✅ Results saved to: {}", path.display());
        }
        None => println!("{}", output),
    }

    if failures.is_empty() {
        Ok(0)
    } else {
        Ok(2)
    }
}

/// Read the journal entry from --text, --file or stdin.
fn read_entry(args: &Args) -> Result<String> {
    if let Some(ref text) = args.text {
        return Ok(text.clone());
    }

    if let Some(ref path) = args.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read journal file: {}", path.display()));
    }

    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read journal entry from stdin")?;
    Ok(text)
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", config::CONFIG_FILE_NAME);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
