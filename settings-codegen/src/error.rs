//! Error types for settings code generation.
//!
//! Every variant is build-breaking: generation either produces a fully
//! self-consistent artifact set or it produces nothing.

use thiserror::Error;

/// Result type alias for generation operations.
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Error raised while resolving a schema or emitting artifacts.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Two settings hash to the same registry key.
    #[error("name hash collision: '{first}' and '{second}' both hash to {hash:#010x}")]
    DuplicateHash {
        first: String,
        second: String,
        hash: u32,
    },

    /// Two settings derive the same generated identifier.
    ///
    /// Distinct registry names can still collapse to one member name or one
    /// string constant after case conversion; emitting both would produce
    /// duplicate C++ declarations.
    #[error("settings '{first}' and '{second}' derive the same generated name '{derived}'")]
    DerivedNameCollision {
        first: String,
        second: String,
        derived: String,
    },

    /// An enum-typed setting references an enum that is not declared.
    #[error("setting '{setting}' references undeclared enum '{enum_name}'")]
    UnknownEnum {
        setting: String,
        enum_name: String,
    },

    /// A string default does not fit the declared field width.
    #[error(
        "string default for '{setting}' is {actual} bytes but the field holds at most {max} \
         (including the terminator)"
    )]
    StringDefaultTooLong {
        setting: String,
        actual: usize,
        max: usize,
    },

    /// An array default has the wrong element count.
    #[error("array default for '{setting}' has {actual} elements, declared length is {declared}")]
    ArrayLengthMismatch {
        setting: String,
        actual: usize,
        declared: usize,
    },

    /// A default literal cannot be rendered for the declared type.
    #[error("default value for '{setting}' does not match its declared type: {message}")]
    DefaultTypeMismatch { setting: String, message: String },

    /// A nested guard is not a subset of its parent guard.
    #[error("guard on '{name}' conflicts with an enclosing group guard: {message}")]
    GuardConflict { name: String, message: String },

    /// An unresolved substitution marker survived into emitted text.
    #[error("unresolved placeholder '{marker}' in generated {artifact}")]
    UnresolvedPlaceholder { artifact: String, marker: String },

    /// A preprocessor guard was opened without a matching close.
    #[error("unbalanced preprocessor guards in generated {artifact}: {opens} #if, {closes} #endif")]
    UnbalancedGuards {
        artifact: String,
        opens: usize,
        closes: usize,
    },

    /// The declared hash-table count disagrees with the emitted entries.
    #[error("hash table declares {declared} settings but {emitted} entries were emitted")]
    CountMismatch { declared: usize, emitted: usize },

    /// Failed to serialize the schema into the embedded JSON blob.
    #[error("failed to serialize settings schema to JSON: {0}")]
    BlobSerialize(#[from] serde_json::Error),
}

impl GenerateError {
    /// Create a guard conflict error.
    pub fn guard_conflict(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::GuardConflict {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a default-type mismatch error.
    pub fn default_mismatch(setting: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DefaultTypeMismatch {
            setting: setting.into(),
            message: message.into(),
        }
    }
}
