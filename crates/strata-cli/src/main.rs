//! strata — architecture analysis CLI.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use strata_analysis::layout::{plan, LayoutOptions};
use strata_core::errors::{ConfigError, PipelineError};
use strata_core::ProjectConfig;
use strata_render::{create_emitter, diff::DiagramCache, RenderError};

#[derive(Parser)]
#[command(name = "strata", version, about = "Architecture visualization and dependency health analysis")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a project and emit architecture diagrams.
    Analyze {
        /// Project root to analyze.
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Configuration file (default: <root>/strata.toml when present).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output formats; repeatable. Overrides the config.
        #[arg(long = "format", value_name = "FORMAT")]
        formats: Vec<String>,

        /// Output directory. Overrides the config.
        #[arg(long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Run the crossing-minimization layout pass.
        #[arg(long)]
        minimize_crossings: bool,

        /// Debug-level logging.
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Command::Analyze {
            root,
            config,
            formats,
            output,
            minimize_crossings,
            verbose,
        } => {
            init_tracing(verbose);
            match run_analyze(&root, config.as_deref(), &formats, output.as_deref(), minimize_crossings)
            {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("error: {e}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_target(false)
        .init();
}

fn run_analyze(
    root: &Path,
    config_path: Option<&Path>,
    format_override: &[String],
    output_override: Option<&Path>,
    minimize_crossings: bool,
) -> Result<(), CliError> {
    let config = load_config(root, config_path)?;

    let result = strata_analysis::analyze(root, &config)?;
    let layout = plan(
        &result.graph,
        &result.layers,
        LayoutOptions { minimize_crossings },
    );

    let formats: Vec<String> = if format_override.is_empty() {
        config.output.formats.clone()
    } else {
        format_override.to_vec()
    };
    let output_dir = output_override
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.output.directory));

    std::fs::create_dir_all(&output_dir).map_err(|source| CliError::Write {
        path: output_dir.display().to_string(),
        source,
    })?;

    for format in &formats {
        let emitter = create_emitter(format)?;
        let content = emitter.emit(&result, &layout)?;

        let file = output_dir
            .join(&config.output.filename)
            .with_extension(emitter.extension());

        if emitter.name() == "drawio" {
            let cache = DiagramCache::new(&output_dir.join(".strata").join("diagram.drawio"));
            if !cache.is_changed(&content) {
                tracing::info!(path = %file.display(), "diagram unchanged since last run");
            }
            cache.store(&content)?;
        }

        std::fs::write(&file, &content).map_err(|source| CliError::Write {
            path: file.display().to_string(),
            source,
        })?;
        println!("wrote {}", file.display());
    }

    print_summary(&result);
    Ok(())
}

fn load_config(root: &Path, explicit: Option<&Path>) -> Result<ProjectConfig, CliError> {
    if let Some(path) = explicit {
        return Ok(ProjectConfig::load(path)?);
    }
    let default_path = root.join("strata.toml");
    if default_path.exists() {
        return Ok(ProjectConfig::load(&default_path)?);
    }
    let mut config = ProjectConfig::default();
    config.normalize();
    Ok(config)
}

fn print_summary(result: &strata_analysis::AnalysisResult) {
    let health = &result.health;
    println!();
    println!(
        "{} modules, {} dependencies, {} layers",
        result.total_files,
        result.total_edges,
        result.layers.len()
    );
    println!(
        "health: {} ({}/100) — {} cycles, {} layer violations, {} orphans",
        health.grade,
        health.score,
        health.circular_dependency_count,
        health.layer_violations,
        health.orphan_count
    );
    if !result.parse_errors.is_empty() {
        println!(
            "{} file(s) had parse problems; see --verbose for details",
            result.parse_errors.len()
        );
    }
}
