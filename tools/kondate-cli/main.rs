use clap::Parser;
use kondate::build::{TaxonomyWatcher, build_once, run_watch, synthesize_with};
use kondate::config::BuildConfig;
use kondate::highlight::Highlighter;
use kondate::taxonomy;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Compiles the recipe language's token taxonomy into a TextMate grammar
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Keep running and rebuild whenever the taxonomy file changes
    #[arg(short, long)]
    watch: bool,

    /// Path to the taxonomy JSON file [default: grammar/tokens.json]
    #[arg(short, long)]
    taxonomy: Option<PathBuf>,

    /// Where to write the generated grammar [default: syntaxes/food.tmLanguage.json]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Build config file [default: ./kondate.json if present]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Polling interval for watch mode, in milliseconds
    #[arg(long)]
    poll_ms: Option<u64>,

    /// Print how the grammar classifies a recipe file instead of writing it
    #[arg(long, value_name = "FILE")]
    preview: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli);

    if let Some(recipe) = &cli.preview {
        run_preview(&config, recipe);
    } else if cli.watch {
        run_watch_mode(&config);
    } else {
        run_once(&config);
    }
}

/// Loads the config file and layers the command line flags on top of it.
fn resolve_config(cli: &Cli) -> BuildConfig {
    let mut config = BuildConfig::resolve(cli.config.as_deref(), Path::new("."))
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e)));

    if let Some(path) = &cli.taxonomy {
        config.taxonomy = path.clone();
    }
    if let Some(path) = &cli.output {
        config.output = path.clone();
    }
    if let Some(ms) = cli.poll_ms {
        config.poll_interval_ms = ms;
    }
    config
}

fn run_once(config: &BuildConfig) {
    let summary = build_once(&config.to_options())
        .unwrap_or_else(|e| exit_with_error(&format!("Grammar build failed: {}", e)));

    for warning in &summary.warnings {
        warn!("{}", warning);
    }

    println!("\n--- Grammar Summary ---");
    println!("Keywords:      {}", summary.stats.keywords);
    println!("Constructors:  {}", summary.stats.constructors);
    println!("Builtins:      {}", summary.stats.builtins);
    println!("Actions:       {}", summary.stats.actions);
    println!("Rules:         {}", summary.rules);
    println!(
        "Written:       {} ({} bytes)",
        summary.output_path.display(),
        summary.bytes
    );
}

fn run_watch_mode(config: &BuildConfig) {
    let options = config.to_options();
    let interval: Duration = config.poll_interval();
    let (handle, events) = TaxonomyWatcher::spawn(&options.taxonomy_path, interval);

    info!(
        interval_ms = interval.as_millis() as u64,
        "Press Ctrl+C to stop"
    );
    let report = run_watch(&options, &events);
    handle.stop();

    if report.failures > 0 {
        error!(failures = report.failures, "Some rebuilds failed");
    }
}

fn run_preview(config: &BuildConfig, recipe: &Path) {
    let taxonomy = taxonomy::load(&config.taxonomy)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load taxonomy: {}", e)));

    let grammar = synthesize_with(&config.to_options(), &taxonomy).grammar;

    let highlighter = Highlighter::new(&grammar)
        .unwrap_or_else(|e| exit_with_error(&format!("Grammar cannot be previewed: {}", e)));
    let source = fs::read_to_string(recipe).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read recipe file '{}': {}",
            recipe.display(),
            e
        ))
    });

    for token in highlighter.highlight(&source) {
        println!("{}", token);
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
