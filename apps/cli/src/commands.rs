//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use tagguide_core::pipeline::{self, BuildResult};
use tagguide_shared::{AppConfig, BuildConfig, init_config, load_config, load_config_from};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// tagguide: assemble a tagging guide from schema files.
#[derive(Parser)]
#[command(
    name = "tagguide",
    version,
    about = "Assemble a Markdown tagging guide from YAML schema files and Markdown appendices.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ./tagguide.toml when present).
    #[arg(long, global = true, env = "TAGGUIDE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Generate the guide and write it to the output file.
    Build {
        #[command(flatten)]
        paths: PathArgs,
    },

    /// Fail if the output file is not what `build` would write.
    Check {
        #[command(flatten)]
        paths: PathArgs,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Overrides for the configured source and output locations.
#[derive(clap::Args)]
pub(crate) struct PathArgs {
    /// Directory holding schema and appendix files.
    #[arg(short, long)]
    pub source_dir: Option<PathBuf>,

    /// Path of the generated document.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Write a tagguide.toml with defaults to the current directory.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "tagguide=info",
        1 => "tagguide=debug",
        _ => "tagguide=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(cli.config.as_deref())?;

    match cli.command {
        Command::Build { paths } => cmd_build(&config, &paths),
        Command::Check { paths } => cmd_check(&config, &paths),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(&config),
        },
    }
}

fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    Ok(config)
}

/// Merge config file values with CLI overrides.
fn build_config(config: &AppConfig, paths: &PathArgs) -> BuildConfig {
    let mut build = BuildConfig::from(config);
    if let Some(dir) = &paths.source_dir {
        build.source_dir = dir.clone();
    }
    if let Some(output) = &paths.output {
        build.output = output.clone();
    }
    build
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_build(config: &AppConfig, paths: &PathArgs) -> Result<()> {
    let build = build_config(config, paths);
    info!(
        source_dir = %build.source_dir.display(),
        output = %build.output.display(),
        "building guide"
    );

    let result = pipeline::build(&build)?;
    print_summary("Guide written", &result);
    Ok(())
}

fn cmd_check(config: &AppConfig, paths: &PathArgs) -> Result<()> {
    let build = build_config(config, paths);
    let result = pipeline::check(&build)?;
    print_summary("Guide is up to date", &result);
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let cwd = std::env::current_dir()
        .map_err(|e| eyre!("cannot determine working directory: {e}"))?;
    let path = init_config(&cwd)?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{toml_str}");
    Ok(())
}

fn print_summary(headline: &str, result: &BuildResult) {
    println!();
    println!("  {headline}");
    println!("  Schemas:    {}", result.schema_count);
    println!("  Appendices: {}", result.appendix_count);
    println!("  Size:       {} bytes", result.bytes);
    println!("  Path:       {}", result.output.display());
    println!("  Time:       {:.1}ms", result.elapsed.as_secs_f64() * 1000.0);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn overrides_replace_config_paths() {
        let cli = Cli::try_parse_from([
            "tagguide",
            "build",
            "--source-dir",
            "data",
            "-o",
            "docs/GUIDE.md",
        ])
        .unwrap();
        let Command::Build { paths } = cli.command else {
            panic!("expected build");
        };

        let build = build_config(&AppConfig::default(), &paths);
        assert_eq!(build.source_dir, PathBuf::from("data"));
        assert_eq!(build.output, PathBuf::from("docs/GUIDE.md"));
        assert_eq!(build.title, "OSM Bike Ottawa Tagging Guide");
    }

    #[test]
    fn defaults_without_overrides() {
        let cli = Cli::try_parse_from(["tagguide", "-vv", "check"]).unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::Check { paths } = cli.command else {
            panic!("expected check");
        };

        let build = build_config(&AppConfig::default(), &paths);
        assert_eq!(build.source_dir, PathBuf::from("schema"));
        assert_eq!(build.output, PathBuf::from("README.md"));
    }
}
