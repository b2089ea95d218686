//! # reactive-props
//!
//! Generates change-notifying accessors for `[ReactiveProperty]` fields
//! from exported program models.
//!
//! ## Usage
//!
//! ```bash
//! # Generate from models under the current directory
//! reactive-props generate
//!
//! # Generate to a specific output directory
//! reactive-props generate --input ./obj/models --output ./obj/generated
//!
//! # Watch mode for development
//! reactive-props generate --watch
//!
//! # Preview changes without writing files
//! reactive-props generate --dry-run
//!
//! # Report diagnostics only, as JSON
//! reactive-props check --format json
//!
//! # Fail the build when generated files are stale
//! reactive-props validate --path ./obj/generated
//!
//! # Initialize configuration
//! reactive-props init
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use reactive_props_cli::{
    config::{CliArgs, Config, ConfigManager, OutputFormat, CONFIG_FILENAME},
    error::{CliError, CliResult, LoadError, WatchError},
    generator::{BuildStep, GenerationPlan},
    loader::ModelLoader,
    report::{self, Report},
    scanner::ModelScanner,
    watcher::FileWatcher,
    writer::{FileWriter, WriteResult},
};
use reactive_props_generator::Program;

#[derive(Parser)]
#[command(name = "reactive-props")]
#[command(author, version, about = "Generate reactive property accessors from program models", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate accessor files from program models
    Generate {
        /// Input directory containing model files
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory for generated files
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Watch for model changes and regenerate
        #[arg(short, long)]
        watch: bool,

        /// Preview changes without writing files
        #[arg(long)]
        dry_run: bool,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Filter model files by relative path pattern (glob)
        #[arg(long)]
        filter: Option<String>,

        /// Report format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Run the generator and report diagnostics without writing files
    Check {
        /// Input directory containing model files
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Filter model files by relative path pattern (glob)
        #[arg(long)]
        filter: Option<String>,

        /// Report format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Validate that generated files are up-to-date
    Validate {
        /// Directory holding the generated files
        #[arg(short, long)]
        path: PathBuf,

        /// Input directory containing model files
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Initialize a new reactive-props configuration file
    Init {
        /// Output path for configuration file
        #[arg(short, long, default_value = CONFIG_FILENAME)]
        output: PathBuf,

        /// Overwrite existing configuration file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            ExitCode::from(e.exit_code())
        }
    }
}

/// Install the log subscriber. `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Commands::Generate {
            input,
            output,
            watch,
            dry_run,
            config,
            filter,
            format,
        } => {
            let config = load_config(
                config,
                CliArgs {
                    input,
                    output,
                    filter,
                    format,
                },
            )?;
            if watch {
                run_watch_mode(&config, dry_run)
            } else {
                let mut step = build_step(&config);
                run_generate(&mut step, &config, dry_run)
            }
        }

        Commands::Check {
            input,
            config,
            filter,
            format,
        } => {
            let config = load_config(
                config,
                CliArgs {
                    input,
                    filter,
                    format,
                    ..Default::default()
                },
            )?;
            cmd_check(&config)
        }

        Commands::Validate {
            path,
            input,
            config,
        } => {
            let config = load_config(
                config,
                CliArgs {
                    input,
                    output: Some(path),
                    ..Default::default()
                },
            )?;
            cmd_validate(&config)
        }

        Commands::Init { output, force } => cmd_init(output, force),
    }
}

fn load_config(path: Option<PathBuf>, args: CliArgs) -> CliResult<Config> {
    let config = ConfigManager::load(path.as_deref())?;
    let config = ConfigManager::merge_cli_args(config, &args);
    config.validate()?;
    Ok(config)
}

fn build_step(config: &Config) -> BuildStep {
    BuildStep::new(&config.output.dir, config.render.to_render_config())
}

fn is_human(config: &Config) -> bool {
    config.diagnostics.format == OutputFormat::Human
}

/// Scan and load every model file under the configured input directory.
fn load_program(config: &Config) -> CliResult<Option<(Program, Vec<LoadError>)>> {
    let human = is_human(config);
    if human {
        println!("{}", "Scanning for model files...".cyan());
    }

    let mut scanner = ModelScanner::new(&config.input.dir)
        .with_extension(&config.input.extension)
        .with_gitignore(config.input.respect_gitignore);
    if let Some(pattern) = &config.input.filter {
        scanner = scanner.with_filter(pattern)?;
    }

    let files = scanner.scan_allow_empty()?;
    if files.is_empty() {
        if human {
            println!("{}", "No model files found.".yellow());
        }
        return Ok(None);
    }

    if human {
        println!("  Found {} model file(s)", files.len().to_string().green());
    }

    let (program, errors) = ModelLoader::new().load_files(&files);
    if human {
        report::print_load_errors(&errors);
    }

    Ok(Some((program, errors)))
}

/// Print the diagnostics of a plan and decide whether the run failed.
///
/// Model files that failed to load always fail the run, since their types
/// are missing from the plan.
fn finish_run(plan: &GenerationPlan, load_errors: Vec<LoadError>, config: &Config) -> CliResult<()> {
    if is_human(config) {
        report::print_diagnostics(&plan.output.diagnostics);
    } else {
        println!("{}", Report::new(plan, &load_errors).to_json()?);
    }

    if !load_errors.is_empty() {
        return Err(LoadError::Multiple(load_errors).into());
    }

    let count = plan.output.error_count();
    if count > 0 && config.diagnostics.fail_on_error {
        return Err(CliError::Diagnostics { count });
    }

    Ok(())
}

/// Run generation once.
fn run_generate(step: &mut BuildStep, config: &Config, dry_run: bool) -> CliResult<()> {
    let human = is_human(config);
    let Some((program, load_errors)) = load_program(config)? else {
        return Ok(());
    };

    if human {
        println!("{}", "Generating accessors...".cyan());
    }
    let plan = step.plan(&program)?;

    let writer = FileWriter::new(dry_run);
    let mut written = 0;
    let mut unchanged = 0;

    for file in &plan.files {
        let result = writer.write(&file.path, file.content())?;
        if human {
            print_write_result(&result);
        }
        match result {
            WriteResult::Unchanged { .. } => unchanged += 1,
            _ => written += 1,
        }
    }

    if load_errors.is_empty() {
        for orphan in step.compare(&plan)?.orphaned {
            let result = writer.remove(&orphan)?;
            if human {
                print_write_result(&result);
            }
        }
    } else {
        tracing::warn!(
            failed = load_errors.len(),
            "Keeping orphaned files until every model file loads"
        );
    }

    if human {
        println!(
            "  Generated {} file(s), {} unchanged, {} diagnostic(s)",
            written.to_string().green(),
            unchanged,
            plan.output.diagnostics.len()
        );
    }

    finish_run(&plan, load_errors, config)
}

fn print_write_result(result: &WriteResult) {
    match result {
        WriteResult::Written { path, bytes } => {
            println!("{} Written {} bytes to {}", "✓".green(), bytes, path.display());
        }
        WriteResult::Unchanged { path } => {
            tracing::debug!(path = %path.display(), "Unchanged");
        }
        WriteResult::Removed { path } => {
            println!("{} Removed {}", "✓".green(), path.display());
        }
        WriteResult::DryRun { content, path } => {
            println!("{} Would write to {}:", "[dry-run]".yellow(), path.display());
            println!("{}", "─".repeat(60).dimmed());
            println!("{}", content);
            println!("{}", "─".repeat(60).dimmed());
        }
        WriteResult::DryRunRemove { path } => {
            println!("{} Would remove {}", "[dry-run]".yellow(), path.display());
        }
    }
}

/// Run in watch mode. One build step serves every run so unchanged groups
/// are not regenerated.
fn run_watch_mode(config: &Config, dry_run: bool) -> CliResult<()> {
    println!("{}", "Starting watch mode...".cyan());
    println!("  Watching: {}", config.input.dir.display());
    println!("  Press Ctrl+C to stop\n");

    let mut step = build_step(config);
    if let Err(e) = run_generate(&mut step, config, dry_run) {
        print_error(&e);
    }

    let watcher = FileWatcher::new(&config.input.dir).with_extension(&config.input.extension);
    let (_debouncer, rx) = watcher.watch()?;

    println!("\n{}", "Watching for changes...".cyan());

    while let Ok(event) = rx.recv() {
        if let Some(message) = event.error_message() {
            print_error(&WatchError::Notify(message.to_string()).into());
            continue;
        }

        if let Some(path) = event.path() {
            println!("\n{} {}", "File changed:".cyan(), path.display());
        }

        if let Err(e) = run_generate(&mut step, config, dry_run) {
            println!("{} {}", "Generation error:".red(), e);
        }

        println!("\n{}", "Watching for changes...".cyan());
    }

    Ok(())
}

/// Check command implementation.
fn cmd_check(config: &Config) -> CliResult<()> {
    let Some((program, load_errors)) = load_program(config)? else {
        return Ok(());
    };

    let plan = build_step(config).plan(&program)?;

    if is_human(config) {
        println!(
            "  {} type(s) with reactive properties, {} diagnostic(s)",
            plan.files.len().to_string().green(),
            plan.output.diagnostics.len()
        );
    }

    finish_run(&plan, load_errors, config)
}

/// Validate command implementation.
fn cmd_validate(config: &Config) -> CliResult<()> {
    println!("{}", "Validating generated files...".cyan());

    let (program, load_errors) = load_program(config)?.unwrap_or_default();
    if !load_errors.is_empty() {
        return Err(LoadError::Multiple(load_errors).into());
    }

    let mut step = build_step(config);
    let plan = step.plan(&program)?;
    let staleness = step.compare(&plan)?;

    if staleness.is_up_to_date() {
        println!("{} Generated files are up-to-date", "✓".green());
        Ok(())
    } else {
        println!("{} Generated files are out of date", "✗".red());
        report::print_staleness(&staleness);
        println!("  Run 'reactive-props generate' to update");
        Err(CliError::Validation(format!(
            "{} generated file(s) are out of date",
            staleness.len()
        )))
    }
}

/// Init command implementation.
fn cmd_init(output: PathBuf, force: bool) -> CliResult<()> {
    if output.exists() && !force {
        println!(
            "{} Configuration file already exists: {}",
            "Error:".red(),
            output.display()
        );
        println!("  Use --force to overwrite");
        return Err(CliError::Validation(
            "Configuration file already exists".to_string(),
        ));
    }

    std::fs::write(&output, ConfigManager::default_config_content())?;

    println!(
        "{} Created configuration file: {}",
        "✓".green(),
        output.display()
    );

    Ok(())
}

/// Print an error with formatting.
fn print_error(error: &CliError) {
    eprintln!("{} {}", "Error:".red().bold(), error);
}
