//! Configuration management for the CLI.
//!
//! This module handles loading configuration from `settings-codegen.toml`
//! files and merging with command-line arguments.

use crate::error::{CliResult, ConfigError};
use serde::Deserialize;
use settings_codegen::CodegenOptions;
use std::path::{Path, PathBuf};

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "settings-codegen.toml";

/// Main configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output configuration.
    pub output: OutputConfig,

    /// Generated-name configuration.
    pub codegen: CodegenConfig,

    /// Settings-blob metadata.
    pub blob: BlobConfig,
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory for generated files.
    pub dir: PathBuf,

    /// Generated header filename.
    pub header: String,

    /// Generated source filename.
    pub source: String,
}

/// Names and expressions substituted into the generated code.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CodegenConfig {
    /// Namespace wrapping the generated declarations.
    pub namespace: String,

    /// Loader class whose member functions are generated.
    pub class_name: String,

    /// Name of the settings aggregate struct.
    pub struct_name: String,

    /// Receiver expression for OS-level setting reads.
    pub reader: String,

    /// Preprocessor macro compared by interface-version guards.
    pub version_macro: String,

    /// Copyright notice file prepended to both artifacts.
    pub copyright_file: Option<PathBuf>,
}

/// Settings-blob header metadata.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct BlobConfig {
    /// Whether the embedded blob is encoded.
    pub encoded: bool,

    /// Magic-buffer identifier recorded in the descriptor.
    pub magic_buffer_id: u32,

    /// Magic-buffer offset recorded in the descriptor.
    pub magic_buffer_offset: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./generated"),
            header: "g_settings.h".to_string(),
            source: "g_settings.cpp".to_string(),
        }
    }
}

impl Default for CodegenConfig {
    fn default() -> Self {
        let defaults = CodegenOptions::default();
        Self {
            namespace: defaults.namespace,
            class_name: defaults.class_name,
            struct_name: defaults.struct_name,
            reader: defaults.reader,
            version_macro: defaults.version_macro,
            copyright_file: None,
        }
    }
}

impl Config {
    /// Build the generator options described by this configuration.
    pub fn codegen_options(&self) -> CliResult<CodegenOptions> {
        let mut options = CodegenOptions::default()
            .with_namespace(&self.codegen.namespace)
            .with_class_name(&self.codegen.class_name)
            .with_struct_name(&self.codegen.struct_name)
            .with_header_file_name(&self.output.header)
            .with_reader(&self.codegen.reader)
            .with_version_macro(&self.codegen.version_macro)
            .with_encoded(self.blob.encoded)
            .with_magic_buffer(self.blob.magic_buffer_id, self.blob.magic_buffer_offset);

        if let Some(ref path) = self.codegen.copyright_file {
            let notice = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;
            options = options.with_copyright(notice);
        }

        Ok(options)
    }
}

/// Configuration manager for loading and merging configs.
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from a file path.
    ///
    /// If the path is None, attempts to load from the default location.
    /// If no config file exists, returns default configuration.
    pub fn load(path: Option<&Path>) -> CliResult<Config> {
        let config_path = path
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::invalid_toml(config_path, e.to_string()))?;

        Ok(config)
    }

    /// Merge CLI arguments into configuration.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn merge_cli_args(mut config: Config, args: &CliArgs) -> Config {
        if let Some(ref output) = args.output {
            config.output.dir = output.clone();
        }

        if let Some(ref header) = args.header {
            config.output.header = header.clone();
        }

        if let Some(ref source) = args.source {
            config.output.source = source.clone();
        }

        if let Some(ref namespace) = args.namespace {
            config.codegen.namespace = namespace.clone();
        }

        if let Some(ref class_name) = args.class_name {
            config.codegen.class_name = class_name.clone();
        }

        config
    }

    /// Generate default configuration file content with comments.
    pub fn default_config_content() -> &'static str {
        r#"# settings-codegen configuration file

[output]
# Output directory for generated C++ files
dir = "./generated"

# Generated header file name
header = "g_settings.h"

# Generated source file name
source = "g_settings.cpp"

[codegen]
# Namespace wrapping the generated declarations
namespace = "vk"

# Loader class whose member functions are generated
class_name = "SettingsLoader"

# Name of the settings aggregate struct
struct_name = "RuntimeSettings"

# Receiver expression used for every OS-level setting read
reader = "static_cast<Pal::IDevice*>(m_pDevice)"

# Preprocessor macro compared by interface-version guards
version_macro = "PAL_CLIENT_INTERFACE_MAJOR_VERSION"

# Optional path to a copyright notice prepended to both artifacts
# copyright_file = "./copyright.txt"

[blob]
# Whether the embedded settings blob is encoded
encoded = false

# Magic-buffer location recorded in the registration descriptor
magic_buffer_id = 0
magic_buffer_offset = 0
"#
    }
}

/// CLI arguments that can override configuration.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Output directory override.
    pub output: Option<PathBuf>,

    /// Header filename override.
    pub header: Option<String>,

    /// Source filename override.
    pub source: Option<String>,

    /// Namespace override.
    pub namespace: Option<String>,

    /// Loader class override.
    pub class_name: Option<String>,
}
