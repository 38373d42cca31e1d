//! # settings-codegen-cli
//!
//! CLI tool for generating the C++ runtime settings subsystem from a
//! declarative settings schema.
//!
//! ## Usage
//!
//! ```bash
//! # Generate settings code from a schema
//! settings-codegen generate --schema ./settings.json
//!
//! # Generate into a specific output directory
//! settings-codegen generate --schema ./settings.json --output ./icd/settings
//!
//! # Dry run to preview the generated files
//! settings-codegen generate --schema ./settings.json --dry-run
//!
//! # Initialize configuration
//! settings-codegen init
//!
//! # Validate generated files are up-to-date
//! settings-codegen validate --schema ./settings.json
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use settings_codegen::SettingsGenerator;
use settings_codegen_cli::{
    config::{CliArgs, Config, ConfigManager},
    error::CliError,
    loader::SchemaLoader,
    writer::{artifacts_up_to_date, FileWriter, WriteResult},
};

#[derive(Parser)]
#[command(name = "settings-codegen")]
#[command(author, version, about = "Generate C++ runtime settings code from a settings schema", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the C++ header/source pair from a settings schema
    Generate {
        /// Path to the settings schema JSON file
        #[arg(short, long)]
        schema: PathBuf,

        /// Output directory for generated C++ files
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Namespace wrapping the generated declarations
        #[arg(long)]
        namespace: Option<String>,

        /// Loader class whose member functions are generated
        #[arg(long)]
        class_name: Option<String>,

        /// Preview generated files without writing them
        #[arg(long)]
        dry_run: bool,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Initialize a new settings-codegen configuration file
    Init {
        /// Output path for configuration file
        #[arg(short, long, default_value = "settings-codegen.toml")]
        output: PathBuf,

        /// Overwrite existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Validate that generated files are up-to-date with the schema
    Validate {
        /// Path to the settings schema JSON file
        #[arg(short, long)]
        schema: PathBuf,

        /// Directory holding the previously generated files
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            ExitCode::from(exit_status(&e))
        }
    }
}

/// Exit status for a failed run. Status 2 is reserved for a validate
/// mismatch so build scripts can tell "stale artifacts" from other failures.
fn exit_status(error: &CliError) -> u8 {
    match error {
        CliError::Validation(_) => 2,
        _ => 1,
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Generate {
            schema,
            output,
            namespace,
            class_name,
            dry_run,
            config,
        } => cmd_generate(schema, output, namespace, class_name, dry_run, config),

        Commands::Init { output, force } => cmd_init(output, force),

        Commands::Validate {
            schema,
            output,
            config,
        } => cmd_validate(schema, output, config),
    }
}

/// Generate command implementation.
fn cmd_generate(
    schema_path: PathBuf,
    output: Option<PathBuf>,
    namespace: Option<String>,
    class_name: Option<String>,
    dry_run: bool,
    config_path: Option<PathBuf>,
) -> Result<(), CliError> {
    let config = ConfigManager::load(config_path.as_deref())?;
    let config = ConfigManager::merge_cli_args(
        config,
        &CliArgs {
            output,
            namespace,
            class_name,
            ..Default::default()
        },
    );

    let artifacts = run_generation(&schema_path, &config)?;

    let writer = FileWriter::new(dry_run);
    let header_path = config.output.dir.join(&config.output.header);
    let source_path = config.output.dir.join(&config.output.source);

    let results = writer.write_pair(
        &header_path,
        &artifacts.header,
        &source_path,
        &artifacts.source,
    )?;
    for result in &results {
        report_write(result);
    }

    Ok(())
}

/// Load the schema and run one generation pass.
fn run_generation(
    schema_path: &Path,
    config: &Config,
) -> Result<settings_codegen::GeneratedArtifacts, CliError> {
    println!("{}", "Loading settings schema...".cyan());
    let schema = SchemaLoader::load(schema_path)?;

    let setting_count = count_settings(&schema.settings);
    println!(
        "  Component {} with {} setting(s)",
        schema.component.green(),
        setting_count.to_string().green()
    );

    println!("{}", "Generating settings code...".cyan());
    let generator = SettingsGenerator::new(config.codegen_options()?);
    Ok(generator.generate(&schema)?)
}

fn count_settings(nodes: &[settings_codegen::SettingNode]) -> usize {
    nodes
        .iter()
        .map(|n| match n {
            settings_codegen::SettingNode::Group(g) => count_settings(&g.children),
            settings_codegen::SettingNode::Entry(_) => 1,
        })
        .sum()
}

/// Print the outcome of one file write.
fn report_write(result: &WriteResult) {
    match result {
        WriteResult::Written { path, bytes } => {
            println!(
                "{} Written {} bytes to {}",
                "✓".green(),
                bytes,
                path.display()
            );
        }
        WriteResult::DryRun { content, path } => {
            println!(
                "{} Would write to {}:",
                "[dry-run]".yellow(),
                path.display()
            );
            println!("{}", "─".repeat(60).dimmed());
            println!("{}", content);
            println!("{}", "─".repeat(60).dimmed());
        }
    }
}

/// Init command implementation.
fn cmd_init(output: PathBuf, force: bool) -> Result<(), CliError> {
    if output.exists() && !force {
        println!(
            "{} Configuration file already exists: {}",
            "Error:".red(),
            output.display()
        );
        println!("  Use --force to overwrite");
        return Err(CliError::AlreadyExists(format!(
            "Configuration file already exists: {}",
            output.display()
        )));
    }

    let content = ConfigManager::default_config_content();
    std::fs::write(&output, content)?;

    println!(
        "{} Created configuration file: {}",
        "✓".green(),
        output.display()
    );

    Ok(())
}

/// Validate command implementation.
fn cmd_validate(
    schema_path: PathBuf,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<(), CliError> {
    println!("{}", "Validating generated files...".cyan());

    let config = ConfigManager::load(config_path.as_deref())?;
    let config = ConfigManager::merge_cli_args(
        config,
        &CliArgs {
            output,
            ..Default::default()
        },
    );

    let header_path = config.output.dir.join(&config.output.header);
    let source_path = config.output.dir.join(&config.output.source);

    for path in [&header_path, &source_path] {
        if !path.exists() {
            return Err(CliError::Validation(format!(
                "Generated file not found: {}",
                path.display()
            )));
        }
    }

    let artifacts = run_generation(&schema_path, &config)?;

    // Byte-exact comparison: even trailing-whitespace drift means the
    // checked-in pair no longer matches the schema.
    if artifacts_up_to_date(
        &header_path,
        &source_path,
        &artifacts.header,
        &artifacts.source,
    )? {
        println!("{} Generated files are up-to-date", "✓".green());
        Ok(())
    } else {
        println!("{} Generated files are out of date", "✗".red());
        println!("  Run 'settings-codegen generate' to update");
        Err(CliError::Validation(
            "Generated files are out of date".to_string(),
        ))
    }
}

/// Print an error with formatting.
fn print_error(error: &CliError) {
    eprintln!("{} {}", "Error:".red().bold(), error);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_2_only_for_validate_mismatch() {
        let mismatch = CliError::Validation("Generated files are out of date".to_string());
        assert_eq!(exit_status(&mismatch), 2);

        let existing = CliError::AlreadyExists("Configuration file already exists".to_string());
        assert_eq!(exit_status(&existing), 1);

        let io = CliError::Io(std::io::Error::other("disk gone"));
        assert_eq!(exit_status(&io), 1);
    }
}
