//! Settings schema IR.
//!
//! This module defines the deserialized form of the declarative settings
//! schema: a tree of named, typed settings (possibly grouped, array-valued,
//! or platform/version scoped), each with a default value. The schema file
//! format itself is a contract owned by the driver build; this module only
//! gives it a typed shape.

use serde::{Deserialize, Serialize};

/// Root of a settings schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsSchema {
    /// Component name published to the settings service (e.g. "Vulkan").
    pub component: String,

    /// Enum declarations referenced by enum-typed settings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enums: Vec<EnumDef>,

    /// Settings tree in declaration order.
    pub settings: Vec<SettingNode>,
}

impl SettingsSchema {
    /// Create an empty schema for the given component.
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            enums: Vec::new(),
            settings: Vec::new(),
        }
    }

    /// Add enum declarations.
    pub fn with_enums(mut self, enums: Vec<EnumDef>) -> Self {
        self.enums = enums;
        self
    }

    /// Add settings nodes.
    pub fn with_settings(mut self, settings: Vec<SettingNode>) -> Self {
        self.settings = settings;
        self
    }

    /// Look up a declared enum by name.
    pub fn find_enum(&self, name: &str) -> Option<&EnumDef> {
        self.enums.iter().find(|e| e.name == name)
    }
}

/// One node of the settings tree: a leaf entry or a nested group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingNode {
    /// A named nesting of further nodes.
    Group(SettingGroup),

    /// A leaf setting.
    Entry(SettingEntry),
}

/// A named nesting of settings, mapped to a nested aggregate field.
///
/// Purely structural: a group carries no value of its own, only an optional
/// guard that scopes everything beneath it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingGroup {
    /// Group name (PascalCase in the schema).
    #[serde(rename = "group")]
    pub name: String,

    /// Child nodes in declaration order.
    pub children: Vec<SettingNode>,

    /// Platform restriction inherited by all children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,

    /// Minimum interface version (inclusive) inherited by all children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_version: Option<u32>,

    /// Maximum interface version (inclusive) inherited by all children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_version: Option<u32>,
}

impl SettingGroup {
    /// Create a new group with the given children.
    pub fn new(name: impl Into<String>, children: Vec<SettingNode>) -> Self {
        Self {
            name: name.into(),
            children,
            platform: None,
            min_version: None,
            max_version: None,
        }
    }

    /// Restrict the group to one platform.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Restrict the group to an interface-version bracket.
    pub fn with_versions(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.min_version = min;
        self.max_version = max;
        self
    }
}

/// One schema item: a named, typed setting with a default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingEntry {
    /// Setting name, unique within its owning scope (PascalCase).
    pub name: String,

    /// C-level type tag.
    #[serde(flatten)]
    pub ty: SettingType,

    /// Default value literal matching the type.
    pub default: DefaultValue,

    /// Human-readable description carried into the schema blob.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Registry scope the OS-level read pulls from.
    #[serde(default)]
    pub scope: SettingScope,

    /// Platform restriction (none = all platforms).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,

    /// Minimum interface version (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_version: Option<u32>,

    /// Maximum interface version (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_version: Option<u32>,
}

impl SettingEntry {
    /// Create a new entry with the given name, type, and default.
    pub fn new(name: impl Into<String>, ty: SettingType, default: DefaultValue) -> Self {
        Self {
            name: name.into(),
            ty,
            default,
            description: None,
            scope: SettingScope::default(),
            platform: None,
            min_version: None,
            max_version: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the registry scope.
    pub fn with_scope(mut self, scope: SettingScope) -> Self {
        self.scope = scope;
        self
    }

    /// Restrict the entry to one platform.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Restrict the entry to an interface-version bracket.
    pub fn with_versions(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.min_version = min;
        self.max_version = max;
        self
    }
}

/// C-level type tag of a setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SettingType {
    Bool,
    Int32,
    Uint32,
    Uint64,
    Gpusize,
    Float,

    /// Reference to a declared [`EnumDef`].
    ///
    /// The field is `enumName` in the schema file so it cannot collide with
    /// the entry's own `name` key once the type tag is flattened in.
    Enum {
        #[serde(rename = "enumName")]
        name: String,
    },

    /// Fixed-length character buffer; `max_length` includes the terminator.
    #[serde(rename_all = "camelCase")]
    String { max_length: usize },

    /// Fixed-length array of a scalar element type.
    #[serde(rename_all = "camelCase")]
    Array { element: ScalarType, length: usize },
}

impl SettingType {
    /// C++ type of the struct field (element type for arrays, `char` for
    /// strings; the declarator suffix is [`Self::array_suffix`]).
    pub fn cpp_type(&self) -> String {
        match self {
            SettingType::Enum { name } => name.clone(),
            SettingType::String { .. } => "char".to_string(),
            SettingType::Array { element, .. } => element.cpp_type().to_string(),
            _ => self
                .as_scalar()
                .map(|s| s.cpp_type().to_string())
                .unwrap_or_default(),
        }
    }

    /// `[N]` declarator suffix for string and array fields.
    pub fn array_suffix(&self) -> Option<String> {
        match self {
            SettingType::String { max_length } => Some(format!("[{}]", max_length)),
            SettingType::Array { length, .. } => Some(format!("[{}]", length)),
            _ => None,
        }
    }

    /// Registry value type passed to the OS-level read call.
    pub fn registry_type(&self) -> &'static str {
        match self {
            SettingType::Enum { .. } => ScalarType::Uint32.registry_type(),
            SettingType::String { .. } => "Util::ValueType::Str",
            SettingType::Array { element, .. } => element.registry_type(),
            _ => self
                .as_scalar()
                .map(|s| s.registry_type())
                .unwrap_or("Util::ValueType::Uint"),
        }
    }

    /// Value type recorded in the developer-driver settings descriptor.
    pub fn descriptor_type(&self) -> &'static str {
        match self {
            SettingType::Enum { .. } => ScalarType::Uint32.descriptor_type(),
            SettingType::String { .. } => "SettingType::String",
            SettingType::Array { element, .. } => element.descriptor_type(),
            _ => self
                .as_scalar()
                .map(|s| s.descriptor_type())
                .unwrap_or("SettingType::Uint"),
        }
    }

    /// Total byte size of the field.
    pub fn byte_size(&self) -> usize {
        match self {
            SettingType::Enum { .. } => 4,
            SettingType::String { max_length } => *max_length,
            SettingType::Array { element, length } => element.byte_size() * length,
            _ => self.as_scalar().map(|s| s.byte_size()).unwrap_or(4),
        }
    }

    /// Whether this type uses the sized variants of the default-setter and
    /// read fragments.
    pub fn is_sized(&self) -> bool {
        matches!(
            self,
            SettingType::String { .. } | SettingType::Array { .. }
        )
    }

    fn as_scalar(&self) -> Option<ScalarType> {
        match self {
            SettingType::Bool => Some(ScalarType::Bool),
            SettingType::Int32 => Some(ScalarType::Int32),
            SettingType::Uint32 => Some(ScalarType::Uint32),
            SettingType::Uint64 => Some(ScalarType::Uint64),
            SettingType::Gpusize => Some(ScalarType::Gpusize),
            SettingType::Float => Some(ScalarType::Float),
            _ => None,
        }
    }
}

/// Scalar element types, also usable as enum underlying types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScalarType {
    Bool,
    Int32,
    Uint32,
    Uint64,
    Gpusize,
    Float,
}

impl ScalarType {
    /// C++ spelling of the type.
    pub fn cpp_type(&self) -> &'static str {
        match self {
            ScalarType::Bool => "bool",
            ScalarType::Int32 => "int32",
            ScalarType::Uint32 => "uint32",
            ScalarType::Uint64 => "uint64",
            ScalarType::Gpusize => "gpusize",
            ScalarType::Float => "float",
        }
    }

    /// Registry value type for the OS-level read call.
    pub fn registry_type(&self) -> &'static str {
        match self {
            ScalarType::Bool => "Util::ValueType::Boolean",
            ScalarType::Int32 => "Util::ValueType::Int",
            ScalarType::Uint32 => "Util::ValueType::Uint",
            ScalarType::Uint64 | ScalarType::Gpusize => "Util::ValueType::Uint64",
            ScalarType::Float => "Util::ValueType::Float",
        }
    }

    /// Value type recorded in the developer-driver settings descriptor.
    pub fn descriptor_type(&self) -> &'static str {
        match self {
            ScalarType::Bool => "SettingType::Boolean",
            ScalarType::Int32 => "SettingType::Int",
            ScalarType::Uint32 => "SettingType::Uint",
            ScalarType::Uint64 | ScalarType::Gpusize => "SettingType::Uint64",
            ScalarType::Float => "SettingType::Float",
        }
    }

    /// Byte size of one element.
    pub fn byte_size(&self) -> usize {
        match self {
            ScalarType::Bool => 1,
            ScalarType::Int32 | ScalarType::Uint32 | ScalarType::Float => 4,
            ScalarType::Uint64 | ScalarType::Gpusize => 8,
        }
    }
}

/// Default value literal for a setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Bool(bool),
    Uint(u64),
    Int(i64),
    Float(f64),
    /// Verbatim C++ expression for scalars (hex literals, enumerator names),
    /// or the default text of a string setting.
    Text(String),
    /// Element defaults for array settings.
    List(Vec<DefaultValue>),
}

/// Registry scope the OS-level read pulls a setting from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingScope {
    /// Private per-driver key store.
    #[default]
    Driver,

    /// Public key store shared with control-panel tooling.
    Public,
}

impl SettingScope {
    /// C++ scope expression passed to the read call.
    pub fn cpp_expr(&self) -> &'static str {
        match self {
            SettingScope::Driver => "Pal::SettingScope::PrivateDriverKey",
            SettingScope::Public => "Pal::SettingScope::PublicCatalystKey",
        }
    }
}

/// OS targets a setting can be scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    Linux,
    Android,
}

impl Platform {
    /// Preprocessor condition selecting this platform.
    pub fn ifdef_expr(&self) -> &'static str {
        match self {
            Platform::Windows => "defined(_WIN32)",
            Platform::Linux => "defined(__unix__)",
            Platform::Android => "defined(__ANDROID__)",
        }
    }
}

/// Enum declaration emitted into the generated header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumDef {
    /// Enum type name.
    pub name: String,

    /// Underlying type.
    #[serde(default = "default_enum_type")]
    pub data_type: ScalarType,

    /// Enumerators in declaration order.
    pub values: Vec<EnumValue>,
}

fn default_enum_type() -> ScalarType {
    ScalarType::Uint32
}

/// One enumerator of an [`EnumDef`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValue {
    pub name: String,
    pub value: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
