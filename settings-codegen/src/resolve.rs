//! Schema resolution.
//!
//! Resolves the settings tree into a single ordered sequence
//! (schema-declaration order, depth-first over nested groups). Every artifact
//! builder consumes this one sequence, so the struct layout, defaults
//! function, read function, info map, and hash table cannot drift apart.
//!
//! All schema-level validation happens here: name-hash collisions, collisions
//! between the case-converted identifiers derived from distinct registry
//! names, undeclared enums, defaults that do not fit their declared type or
//! width, and nested guards that are not a subset of their enclosing group's
//! guard.

use std::collections::HashMap;

use convert_case::{Case, Casing};

use crate::error::{GenerateError, GenerateResult};
use crate::fragments::quote_c_string;
use crate::ir::hash::name_hash;
use crate::ir::{
    DefaultValue, Platform, ScalarType, SettingEntry, SettingNode, SettingType, SettingsSchema,
};

/// Effective platform/version guard on a resolved setting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuardSet {
    pub platform: Option<Platform>,
    pub min_version: Option<u32>,
    pub max_version: Option<u32>,
}

impl GuardSet {
    /// Guard taken directly from an entry's or group's own attributes.
    pub fn from_attrs(
        platform: Option<Platform>,
        min_version: Option<u32>,
        max_version: Option<u32>,
    ) -> Self {
        Self {
            platform,
            min_version,
            max_version,
        }
    }

    /// True when nothing is guarded.
    pub fn is_empty(&self) -> bool {
        self.platform.is_none() && self.min_version.is_none() && self.max_version.is_none()
    }

    /// Whether a version guard is present.
    pub fn has_version(&self) -> bool {
        self.min_version.is_some() || self.max_version.is_some()
    }

    /// Merge a child guard under this one, enforcing the subset rule: a
    /// child may only narrow, never contradict, the enclosing guard.
    pub fn merge_child(&self, child: &GuardSet, name: &str) -> GenerateResult<GuardSet> {
        let platform = match (self.platform, child.platform) {
            (Some(p), Some(c)) if p != c => {
                return Err(GenerateError::guard_conflict(
                    name,
                    format!("platform {:?} inside a group scoped to {:?}", c, p),
                ));
            }
            (p, c) => p.or(c),
        };

        let min_version = match (self.min_version, child.min_version) {
            (Some(p), Some(c)) if c < p => {
                return Err(GenerateError::guard_conflict(
                    name,
                    format!("minVersion {} widens the group minimum {}", c, p),
                ));
            }
            (p, c) => c.or(p),
        };

        let max_version = match (self.max_version, child.max_version) {
            (Some(p), Some(c)) if c > p => {
                return Err(GenerateError::guard_conflict(
                    name,
                    format!("maxVersion {} widens the group maximum {}", c, p),
                ));
            }
            (p, c) => c.or(p),
        };

        if let (Some(min), Some(max)) = (min_version, max_version) {
            if min > max {
                return Err(GenerateError::guard_conflict(
                    name,
                    format!("empty version bracket {}..{}", min, max),
                ));
            }
        }

        Ok(GuardSet {
            platform,
            min_version,
            max_version,
        })
    }
}

/// A default value pre-rendered as C++ text.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedDefault {
    /// Direct assignment expression for a scalar setting.
    Scalar(String),
    /// Quoted C string literal for a string setting.
    Text(String),
    /// Brace-enclosed initializer for an array setting.
    List(String),
}

/// One leaf setting with every derived name resolved.
#[derive(Debug, Clone)]
pub struct ResolvedSetting {
    /// The schema entry itself.
    pub entry: SettingEntry,

    /// Dotted qualified name used as the registry key (`Debug.LogLevel`).
    pub registry_name: String,

    /// Member access path below the aggregate (`debug.logLevel`).
    pub access_path: String,

    /// Name of the string constant holding the registry key.
    pub str_name: String,

    /// 32-bit hash of the registry name.
    pub name_hash: u32,

    /// Effective guard, merged through enclosing groups.
    pub guard: GuardSet,

    /// Default value rendered for emission.
    pub default: RenderedDefault,
}

/// Names already claimed by earlier settings, keyed back to the registry
/// name that claimed them. The derived maps catch registry names that are
/// distinct but collapse to the same identifier after case conversion.
#[derive(Default)]
struct SeenNames {
    hashes: HashMap<u32, String>,
    access_paths: HashMap<String, String>,
    str_names: HashMap<String, String>,
}

/// Resolve the schema into its single ordered setting sequence.
pub fn resolve(schema: &SettingsSchema) -> GenerateResult<Vec<ResolvedSetting>> {
    let mut out = Vec::new();
    let mut seen = SeenNames::default();

    walk(
        schema,
        &schema.settings,
        &[],
        &GuardSet::default(),
        &mut seen,
        &mut out,
    )?;

    Ok(out)
}

fn walk(
    schema: &SettingsSchema,
    nodes: &[SettingNode],
    group_path: &[String],
    guard: &GuardSet,
    seen: &mut SeenNames,
    out: &mut Vec<ResolvedSetting>,
) -> GenerateResult<()> {
    for node in nodes {
        match node {
            SettingNode::Group(group) => {
                let own = GuardSet::from_attrs(group.platform, group.min_version, group.max_version);
                let merged = guard.merge_child(&own, &group.name)?;
                let mut path = group_path.to_vec();
                path.push(group.name.clone());
                walk(schema, &group.children, &path, &merged, seen, out)?;
            }
            SettingNode::Entry(entry) => {
                let own =
                    GuardSet::from_attrs(entry.platform, entry.min_version, entry.max_version);
                let merged = guard.merge_child(&own, &entry.name)?;
                out.push(resolve_entry(schema, entry, group_path, merged, seen)?);
            }
        }
    }
    Ok(())
}

fn resolve_entry(
    schema: &SettingsSchema,
    entry: &SettingEntry,
    group_path: &[String],
    guard: GuardSet,
    seen: &mut SeenNames,
) -> GenerateResult<ResolvedSetting> {
    if let SettingType::Enum { name } = &entry.ty {
        if schema.find_enum(name).is_none() {
            return Err(GenerateError::UnknownEnum {
                setting: entry.name.clone(),
                enum_name: name.clone(),
            });
        }
    }

    let registry_name = group_path
        .iter()
        .cloned()
        .chain(std::iter::once(entry.name.clone()))
        .collect::<Vec<_>>()
        .join(".");

    let access_path = group_path
        .iter()
        .map(|g| g.to_case(Case::Camel))
        .chain(std::iter::once(entry.name.to_case(Case::Camel)))
        .collect::<Vec<_>>()
        .join(".");

    let str_name = format!(
        "p{}Str",
        group_path
            .iter()
            .chain(std::iter::once(&entry.name))
            .map(|part| part.to_case(Case::Pascal))
            .collect::<String>()
    );

    let hash = name_hash(&registry_name);
    if let Some(previous) = seen.hashes.insert(hash, registry_name.clone()) {
        return Err(GenerateError::DuplicateHash {
            first: previous,
            second: registry_name,
            hash,
        });
    }

    if let Some(previous) = seen
        .access_paths
        .insert(access_path.clone(), registry_name.clone())
    {
        return Err(GenerateError::DerivedNameCollision {
            first: previous,
            second: registry_name,
            derived: access_path,
        });
    }

    if let Some(previous) = seen
        .str_names
        .insert(str_name.clone(), registry_name.clone())
    {
        return Err(GenerateError::DerivedNameCollision {
            first: previous,
            second: registry_name,
            derived: str_name,
        });
    }

    let default = render_default(entry)?;

    Ok(ResolvedSetting {
        entry: entry.clone(),
        registry_name,
        access_path,
        str_name,
        name_hash: hash,
        guard,
        default,
    })
}

fn render_default(entry: &SettingEntry) -> GenerateResult<RenderedDefault> {
    match &entry.ty {
        SettingType::String { max_length } => match &entry.default {
            DefaultValue::Text(text) => {
                let needed = text.len() + 1;
                if needed > *max_length {
                    Err(GenerateError::StringDefaultTooLong {
                        setting: entry.name.clone(),
                        actual: needed,
                        max: *max_length,
                    })
                } else {
                    Ok(RenderedDefault::Text(quote_c_string(text)))
                }
            }
            other => Err(GenerateError::default_mismatch(
                &entry.name,
                format!("string setting needs a text default, got {:?}", other),
            )),
        },

        SettingType::Array { element, length } => match &entry.default {
            DefaultValue::List(elems) => {
                if elems.len() != *length {
                    return Err(GenerateError::ArrayLengthMismatch {
                        setting: entry.name.clone(),
                        actual: elems.len(),
                        declared: *length,
                    });
                }
                let rendered = elems
                    .iter()
                    .map(|e| render_scalar(entry, e, Some(*element)))
                    .collect::<GenerateResult<Vec<_>>>()?;
                Ok(RenderedDefault::List(format!(
                    "{{ {} }}",
                    rendered.join(", ")
                )))
            }
            other => Err(GenerateError::default_mismatch(
                &entry.name,
                format!("array setting needs a list default, got {:?}", other),
            )),
        },

        _ => Ok(RenderedDefault::Scalar(render_scalar(
            entry,
            &entry.default,
            scalar_of(&entry.ty),
        )?)),
    }
}

fn scalar_of(ty: &SettingType) -> Option<ScalarType> {
    match ty {
        SettingType::Bool => Some(ScalarType::Bool),
        SettingType::Int32 => Some(ScalarType::Int32),
        SettingType::Uint32 => Some(ScalarType::Uint32),
        SettingType::Uint64 => Some(ScalarType::Uint64),
        SettingType::Gpusize => Some(ScalarType::Gpusize),
        SettingType::Float => Some(ScalarType::Float),
        _ => None,
    }
}

fn render_scalar(
    entry: &SettingEntry,
    value: &DefaultValue,
    scalar: Option<ScalarType>,
) -> GenerateResult<String> {
    match (value, scalar) {
        // Verbatim expression: hex literals, enumerator names, macros.
        (DefaultValue::Text(expr), _) => Ok(expr.clone()),

        (DefaultValue::Bool(b), Some(ScalarType::Bool)) => Ok(b.to_string()),
        (DefaultValue::Bool(_), _) => Err(GenerateError::default_mismatch(
            &entry.name,
            "boolean default on a non-bool setting",
        )),

        (DefaultValue::Float(f), Some(ScalarType::Float)) => Ok(render_float(*f)),
        (DefaultValue::Uint(n), Some(ScalarType::Float)) => Ok(format!("{}.0f", n)),
        (DefaultValue::Int(n), Some(ScalarType::Float)) => Ok(format!("{}.0f", n)),

        (DefaultValue::Float(f), _) if f.fract() == 0.0 => Ok(format!("{}", *f as i64)),
        (DefaultValue::Float(_), _) => Err(GenerateError::default_mismatch(
            &entry.name,
            "fractional default on an integer setting",
        )),

        (DefaultValue::Uint(n), Some(ScalarType::Bool)) if *n <= 1 => Ok((*n == 1).to_string()),
        (DefaultValue::Int(n), Some(ScalarType::Bool)) if (0..=1).contains(n) => {
            Ok((*n == 1).to_string())
        }
        (DefaultValue::Uint(_) | DefaultValue::Int(_), Some(ScalarType::Bool)) => Err(
            GenerateError::default_mismatch(&entry.name, "bool setting needs a 0/1 or boolean default"),
        ),
        (DefaultValue::Uint(n), _) => Ok(n.to_string()),
        (DefaultValue::Int(n), _) => Ok(n.to_string()),

        (DefaultValue::List(_), _) => Err(GenerateError::default_mismatch(
            &entry.name,
            "list default on a scalar setting",
        )),
    }
}

fn render_float(f: f64) -> String {
    if f.fract() == 0.0 {
        format!("{:.1}f", f)
    } else {
        format!("{}f", f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{SettingGroup, SettingsSchema};

    fn scalar(name: &str, default: u64) -> SettingNode {
        SettingNode::Entry(SettingEntry::new(
            name,
            SettingType::Uint32,
            DefaultValue::Uint(default),
        ))
    }

    #[test]
    fn test_resolve_preserves_declaration_order() {
        let schema = SettingsSchema::new("Vulkan").with_settings(vec![
            scalar("First", 1),
            SettingNode::Group(SettingGroup::new("Debug", vec![scalar("Inner", 2)])),
            scalar("Last", 3),
        ]);

        let resolved = resolve(&schema).unwrap();
        let names: Vec<_> = resolved.iter().map(|r| r.registry_name.as_str()).collect();
        assert_eq!(names, vec!["First", "Debug.Inner", "Last"]);
    }

    #[test]
    fn test_resolve_derives_names() {
        let schema = SettingsSchema::new("Vulkan").with_settings(vec![SettingNode::Group(
            SettingGroup::new("Debug", vec![scalar("LogLevel", 0)]),
        )]);

        let resolved = resolve(&schema).unwrap();
        assert_eq!(resolved[0].registry_name, "Debug.LogLevel");
        assert_eq!(resolved[0].access_path, "debug.logLevel");
        assert_eq!(resolved[0].str_name, "pDebugLogLevelStr");
        assert_eq!(
            resolved[0].name_hash,
            crate::ir::hash::name_hash("Debug.LogLevel")
        );
    }

    #[test]
    fn test_same_leaf_name_in_two_groups_is_allowed() {
        let schema = SettingsSchema::new("Vulkan").with_settings(vec![
            SettingNode::Group(SettingGroup::new("A", vec![scalar("Level", 0)])),
            SettingNode::Group(SettingGroup::new("B", vec![scalar("Level", 0)])),
        ]);
        assert_eq!(resolve(&schema).unwrap().len(), 2);
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let schema =
            SettingsSchema::new("Vulkan").with_settings(vec![scalar("Same", 0), scalar("Same", 1)]);
        match resolve(&schema) {
            Err(GenerateError::DuplicateHash { first, second, .. }) => {
                assert_eq!(first, "Same");
                assert_eq!(second, "Same");
            }
            other => panic!("expected duplicate hash error, got {:?}", other),
        }
    }

    #[test]
    fn test_casing_variants_collapsing_to_one_member_are_rejected() {
        // Distinct registry names, distinct hashes, but both case-convert to
        // the member name `httpServer` and the constant `pHttpServerStr`.
        let schema = SettingsSchema::new("Vulkan")
            .with_settings(vec![scalar("HTTPServer", 0), scalar("HttpServer", 1)]);
        match resolve(&schema) {
            Err(GenerateError::DerivedNameCollision { first, second, derived }) => {
                assert_eq!(first, "HTTPServer");
                assert_eq!(second, "HttpServer");
                assert_eq!(derived, "httpServer");
            }
            other => panic!("expected derived-name collision, got {:?}", other),
        }
    }

    #[test]
    fn test_cross_group_str_name_collision_is_rejected() {
        // "AlphaBeta.Gamma" and "Alpha.BetaGamma" have distinct member paths
        // but concatenate to the same `pAlphaBetaGammaStr` constant.
        let schema = SettingsSchema::new("Vulkan").with_settings(vec![
            SettingNode::Group(SettingGroup::new("AlphaBeta", vec![scalar("Gamma", 0)])),
            SettingNode::Group(SettingGroup::new("Alpha", vec![scalar("BetaGamma", 0)])),
        ]);
        match resolve(&schema) {
            Err(GenerateError::DerivedNameCollision { derived, .. }) => {
                assert_eq!(derived, "pAlphaBetaGammaStr");
            }
            other => panic!("expected derived-name collision, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_enum_is_rejected() {
        let schema = SettingsSchema::new("Vulkan").with_settings(vec![SettingNode::Entry(
            SettingEntry::new(
                "CacheMode",
                SettingType::Enum {
                    name: "Missing".to_string(),
                },
                DefaultValue::Uint(0),
            ),
        )]);
        assert!(matches!(
            resolve(&schema),
            Err(GenerateError::UnknownEnum { .. })
        ));
    }

    #[test]
    fn test_guard_inheritance() {
        let schema = SettingsSchema::new("Vulkan").with_settings(vec![SettingNode::Group(
            SettingGroup::new("Win", vec![scalar("Flag", 0)]).with_platform(Platform::Windows),
        )]);
        let resolved = resolve(&schema).unwrap();
        assert_eq!(resolved[0].guard.platform, Some(Platform::Windows));
    }

    #[test]
    fn test_child_may_narrow_version_bracket() {
        let schema = SettingsSchema::new("Vulkan").with_settings(vec![SettingNode::Group(
            SettingGroup::new(
                "Versioned",
                vec![SettingNode::Entry(
                    SettingEntry::new("Narrow", SettingType::Uint32, DefaultValue::Uint(0))
                        .with_versions(Some(45), None),
                )],
            )
            .with_versions(Some(42), Some(50)),
        )]);
        let resolved = resolve(&schema).unwrap();
        assert_eq!(resolved[0].guard.min_version, Some(45));
        assert_eq!(resolved[0].guard.max_version, Some(50));
    }

    #[test]
    fn test_child_may_not_widen_version_bracket() {
        let schema = SettingsSchema::new("Vulkan").with_settings(vec![SettingNode::Group(
            SettingGroup::new(
                "Versioned",
                vec![SettingNode::Entry(
                    SettingEntry::new("Wide", SettingType::Uint32, DefaultValue::Uint(0))
                        .with_versions(Some(30), None),
                )],
            )
            .with_versions(Some(42), None),
        )]);
        assert!(matches!(
            resolve(&schema),
            Err(GenerateError::GuardConflict { .. })
        ));
    }

    #[test]
    fn test_child_platform_must_match_parent() {
        let schema = SettingsSchema::new("Vulkan").with_settings(vec![SettingNode::Group(
            SettingGroup::new(
                "Win",
                vec![SettingNode::Entry(
                    SettingEntry::new("Mixed", SettingType::Uint32, DefaultValue::Uint(0))
                        .with_platform(Platform::Linux),
                )],
            )
            .with_platform(Platform::Windows),
        )]);
        assert!(matches!(
            resolve(&schema),
            Err(GenerateError::GuardConflict { .. })
        ));
    }

    #[test]
    fn test_string_default_must_fit_declared_width() {
        let schema = SettingsSchema::new("Vulkan").with_settings(vec![SettingNode::Entry(
            SettingEntry::new(
                "Dir",
                SettingType::String { max_length: 4 },
                DefaultValue::Text("toolong".to_string()),
            ),
        )]);
        assert!(matches!(
            resolve(&schema),
            Err(GenerateError::StringDefaultTooLong { .. })
        ));
    }

    #[test]
    fn test_array_default_length_must_match() {
        let schema = SettingsSchema::new("Vulkan").with_settings(vec![SettingNode::Entry(
            SettingEntry::new(
                "Mask",
                SettingType::Array {
                    element: ScalarType::Uint32,
                    length: 4,
                },
                DefaultValue::List(vec![DefaultValue::Uint(0); 3]),
            ),
        )]);
        assert!(matches!(
            resolve(&schema),
            Err(GenerateError::ArrayLengthMismatch { .. })
        ));
    }

    #[test]
    fn test_default_rendering() {
        let schema = SettingsSchema::new("Vulkan").with_settings(vec![
            SettingNode::Entry(SettingEntry::new(
                "Quality",
                SettingType::Uint32,
                DefaultValue::Uint(4),
            )),
            SettingNode::Entry(SettingEntry::new(
                "Enable",
                SettingType::Bool,
                DefaultValue::Bool(true),
            )),
            SettingNode::Entry(SettingEntry::new(
                "Scale",
                SettingType::Float,
                DefaultValue::Float(1.5),
            )),
            SettingNode::Entry(SettingEntry::new(
                "Bias",
                SettingType::Float,
                DefaultValue::Uint(2),
            )),
            SettingNode::Entry(SettingEntry::new(
                "Flags",
                SettingType::Uint32,
                DefaultValue::Text("0x3".to_string()),
            )),
            SettingNode::Entry(SettingEntry::new(
                "Dir",
                SettingType::String { max_length: 64 },
                DefaultValue::Text("none".to_string()),
            )),
            SettingNode::Entry(SettingEntry::new(
                "Mask",
                SettingType::Array {
                    element: ScalarType::Uint32,
                    length: 2,
                },
                DefaultValue::List(vec![DefaultValue::Uint(1), DefaultValue::Uint(2)]),
            )),
        ]);

        let resolved = resolve(&schema).unwrap();
        assert_eq!(resolved[0].default, RenderedDefault::Scalar("4".into()));
        assert_eq!(resolved[1].default, RenderedDefault::Scalar("true".into()));
        assert_eq!(resolved[2].default, RenderedDefault::Scalar("1.5f".into()));
        assert_eq!(resolved[3].default, RenderedDefault::Scalar("2.0f".into()));
        assert_eq!(resolved[4].default, RenderedDefault::Scalar("0x3".into()));
        assert_eq!(
            resolved[5].default,
            RenderedDefault::Text("\"none\"".into())
        );
        assert_eq!(
            resolved[6].default,
            RenderedDefault::List("{ 1, 2 }".into())
        );
    }
}
