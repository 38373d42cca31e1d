//! Artifact generation.
//!
//! [`SettingsGenerator`] drives one generation run: resolve the schema into
//! its ordered setting sequence, emit the header and source artifacts from
//! that one sequence, then validate the assembled text. Nothing is handed
//! back unless both artifacts are fully consistent.

mod emitter;
mod preamble;
mod validate;

pub use validate::validate_artifact;

use crate::error::GenerateResult;
use crate::ir::SettingsSchema;
use crate::resolve::resolve;

use emitter::SettingsEmitter;

/// Options controlling names and substitutable expressions in the output.
#[derive(Debug, Clone)]
pub struct CodegenOptions {
    /// Namespace wrapping all emitted declarations.
    pub namespace: String,

    /// Owning loader class whose member functions are generated.
    pub class_name: String,

    /// Name of the settings aggregate struct.
    pub struct_name: String,

    /// Header file name, used in the generated doxygen block.
    pub header_file_name: String,

    /// Receiver expression for the current settings source; every read call
    /// routes through this single substitutable expression.
    pub reader: String,

    /// Preprocessor macro compared by interface-version guards.
    pub version_macro: String,

    /// Copyright notice prepended to both artifacts; `None` uses a built-in
    /// placeholder notice.
    pub copyright: Option<String>,

    /// Encoding flag recorded in the blob header of the descriptor.
    pub is_encoded: bool,

    /// Magic-buffer location metadata recorded in the descriptor.
    pub magic_buffer_id: u32,
    pub magic_buffer_offset: u32,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            namespace: "vk".to_string(),
            class_name: "SettingsLoader".to_string(),
            struct_name: "RuntimeSettings".to_string(),
            header_file_name: "g_settings.h".to_string(),
            reader: "static_cast<Pal::IDevice*>(m_pDevice)".to_string(),
            version_macro: "PAL_CLIENT_INTERFACE_MAJOR_VERSION".to_string(),
            copyright: None,
            is_encoded: false,
            magic_buffer_id: 0,
            magic_buffer_offset: 0,
        }
    }
}

impl CodegenOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the loader class name.
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    /// Set the settings struct name.
    pub fn with_struct_name(mut self, struct_name: impl Into<String>) -> Self {
        self.struct_name = struct_name.into();
        self
    }

    /// Set the header file name used in the doxygen block.
    pub fn with_header_file_name(mut self, name: impl Into<String>) -> Self {
        self.header_file_name = name.into();
        self
    }

    /// Set the settings-source receiver expression.
    pub fn with_reader(mut self, reader: impl Into<String>) -> Self {
        self.reader = reader.into();
        self
    }

    /// Set the interface-version guard macro.
    pub fn with_version_macro(mut self, version_macro: impl Into<String>) -> Self {
        self.version_macro = version_macro.into();
        self
    }

    /// Set the copyright notice text.
    pub fn with_copyright(mut self, copyright: impl Into<String>) -> Self {
        self.copyright = Some(copyright.into());
        self
    }

    /// Set the blob encoding flag.
    pub fn with_encoded(mut self, encoded: bool) -> Self {
        self.is_encoded = encoded;
        self
    }

    /// Set the magic-buffer location metadata.
    pub fn with_magic_buffer(mut self, id: u32, offset: u32) -> Self {
        self.magic_buffer_id = id;
        self.magic_buffer_offset = offset;
        self
    }
}

/// The two generated artifacts of one run.
#[derive(Debug, Clone)]
pub struct GeneratedArtifacts {
    /// Header text: settings aggregate, enums, name-string constants.
    pub header: String,

    /// Source text: defaults, read, info-init, hash table, blob,
    /// registration.
    pub source: String,
}

/// Settings artifact generator.
#[derive(Debug, Clone, Default)]
pub struct SettingsGenerator {
    options: CodegenOptions,
}

impl SettingsGenerator {
    /// Create a generator with the given options.
    pub fn new(options: CodegenOptions) -> Self {
        Self { options }
    }

    /// Access the options.
    pub fn options(&self) -> &CodegenOptions {
        &self.options
    }

    /// Run one generation pass over the schema.
    ///
    /// Fails without producing anything if the schema is inconsistent or the
    /// assembled text does not validate.
    pub fn generate(&self, schema: &SettingsSchema) -> GenerateResult<GeneratedArtifacts> {
        let resolved = resolve(schema)?;
        let emitter = SettingsEmitter::new(schema, &resolved, &self.options);

        let header = emitter.emit_header()?;
        let source = emitter.emit_source()?;

        validate_artifact("header", &header)?;
        validate_artifact("source", &source)?;

        Ok(GeneratedArtifacts { header, source })
    }
}
