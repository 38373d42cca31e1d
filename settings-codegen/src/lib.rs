//! Driver runtime-settings code generator.
//!
//! Turns a declarative settings schema (named, typed, grouped, array-valued,
//! platform/version-scoped settings with defaults) into a C++ header/source
//! pair: the settings aggregate struct and enums, registry-key name strings,
//! the defaults and OS-read member functions, the hashed name-lookup table,
//! the settings-info map initializer, the embedded JSON schema blob, and the
//! developer-driver registration function.
//!
//! # Example
//!
//! ```
//! use settings_codegen::{
//!     CodegenOptions, DefaultValue, SettingEntry, SettingNode, SettingType,
//!     SettingsGenerator, SettingsSchema,
//! };
//!
//! let schema = SettingsSchema::new("Vulkan").with_settings(vec![SettingNode::Entry(
//!     SettingEntry::new("TexFilterQuality", SettingType::Uint32, DefaultValue::Uint(4)),
//! )]);
//!
//! let generator = SettingsGenerator::new(CodegenOptions::default());
//! let artifacts = generator.generate(&schema)?;
//! assert!(artifacts.header.contains("texFilterQuality"));
//! # Ok::<(), settings_codegen::GenerateError>(())
//! ```

pub mod error;
pub mod fragments;
pub mod generator;
pub mod ir;
pub mod resolve;

pub use error::{GenerateError, GenerateResult};
pub use generator::{CodegenOptions, GeneratedArtifacts, SettingsGenerator};
pub use ir::{
    DefaultValue, EnumDef, EnumValue, Platform, ScalarType, SettingEntry, SettingGroup,
    SettingNode, SettingScope, SettingType, SettingsSchema,
};
pub use resolve::{resolve, GuardSet, RenderedDefault, ResolvedSetting};
