//! Artifact emitters.
//!
//! Builds each generated artifact section from the one resolved setting
//! sequence, so the struct layout, defaults function, read function, info
//! map, and hash table enumerate settings in the same order.

use convert_case::{Case, Casing};

use crate::error::{GenerateError, GenerateResult};
use crate::fragments::{
    self, ArrayDefault, EnumDecl, HashListDecl, HashListEntry, JsonDataArray, MemberFunction,
    ReadSetting, RegisterFunction, ScalarDefault, SettingInfoEntry, SettingNameStr,
    SizedReadSetting, StringDefault, StructDecl, StructField, StructGroup,
};
use crate::ir::hash::blob_hash;
use crate::ir::{SettingNode, SettingType, SettingsSchema};
use crate::resolve::{GuardSet, RenderedDefault, ResolvedSetting};

use super::preamble;
use super::CodegenOptions;

const STRUCT_BASE_CLASS: &str = "Pal::DriverSettings";

pub(super) struct SettingsEmitter<'a> {
    schema: &'a SettingsSchema,
    resolved: &'a [ResolvedSetting],
    options: &'a CodegenOptions,
}

impl<'a> SettingsEmitter<'a> {
    pub(super) fn new(
        schema: &'a SettingsSchema,
        resolved: &'a [ResolvedSetting],
        options: &'a CodegenOptions,
    ) -> Self {
        Self {
            schema,
            resolved,
            options,
        }
    }

    // =========================================================================
    // Header artifact
    // =========================================================================

    pub(super) fn emit_header(&self) -> GenerateResult<String> {
        let mut out = preamble::header_preamble(self.options);

        for enum_def in &self.schema.enums {
            let body: Vec<String> = enum_def
                .values
                .iter()
                .map(|v| format!("    {} = {},", v.name, v.value))
                .collect();
            out.push_str(
                &EnumDecl {
                    name: &enum_def.name,
                    data_type: enum_def.data_type.cpp_type(),
                    body: &body.join("\n"),
                }
                .emit(),
            );
        }

        out.push_str(
            &StructDecl {
                struct_name: &self.options.struct_name,
                base_class: STRUCT_BASE_CLASS,
                fields: &self.struct_fields(&self.schema.settings, 0),
            }
            .emit(),
        );

        out.push('\n');
        for setting in self.resolved {
            let quoted = fragments::quote_c_string(&setting.registry_name);
            let line = SettingNameStr {
                str_name: &setting.str_name,
                value: &quoted,
            }
            .emit();
            out.push_str(&self.guarded(&setting.guard, &line));
        }

        out.push_str(&preamble::namespace_close(self.options));
        Ok(out)
    }

    /// Field lines of the settings aggregate, depth-first over groups.
    ///
    /// Group guards wrap the whole nested block; entry guards wrap the single
    /// field line. Guard subsetting was already validated during resolution.
    fn struct_fields(&self, nodes: &[SettingNode], depth: usize) -> String {
        let mut out = String::new();
        for node in nodes {
            match node {
                SettingNode::Group(group) => {
                    let inner = self.struct_fields(&group.children, depth + 1);
                    let block = indent_block(
                        &StructGroup {
                            var_name: &group.name.to_case(Case::Camel),
                            fields: &inner,
                        }
                        .emit(),
                        depth,
                    );
                    let guard =
                        GuardSet::from_attrs(group.platform, group.min_version, group.max_version);
                    out.push_str(&self.guarded(&guard, &block));
                }
                SettingNode::Entry(entry) => {
                    let field = indent_block(
                        &StructField {
                            setting_type: &entry.ty.cpp_type(),
                            var_name: &entry.name.to_case(Case::Camel),
                            array_suffix: entry.ty.array_suffix().as_deref().unwrap_or(""),
                        }
                        .emit(),
                        depth,
                    );
                    let guard =
                        GuardSet::from_attrs(entry.platform, entry.min_version, entry.max_version);
                    out.push_str(&self.guarded(&guard, &field));
                }
            }
        }
        out
    }

    // =========================================================================
    // Source artifact
    // =========================================================================

    pub(super) fn emit_source(&self) -> GenerateResult<String> {
        let blob = serde_json::to_vec_pretty(self.schema)?;
        let json_name = self.json_array_name();

        let mut out = preamble::source_preamble(self.options);
        out.push_str(&self.emit_defaults_fn());
        out.push_str(&self.emit_read_fn());
        out.push_str(&self.emit_hash_list()?);
        out.push_str(&self.emit_info_init_fn());
        out.push_str(
            &JsonDataArray {
                array_name: &json_name,
                data: &blob,
            }
            .emit(),
        );
        out.push_str(
            &RegisterFunction {
                class_name: &self.options.class_name,
                list_name: &self.hash_list_name(),
                num_settings_name: &self.num_settings_name(),
                json_array_name: &json_name,
                data_hash: blob_hash(&blob),
                is_encoded: self.options.is_encoded,
                magic_buffer_id: self.options.magic_buffer_id,
                magic_buffer_offset: self.options.magic_buffer_offset,
            }
            .emit(),
        );
        out.push_str(&preamble::namespace_close(self.options));
        Ok(out)
    }

    fn emit_defaults_fn(&self) -> String {
        let mut body = String::from("    // set setting variables to their default values...\n");
        for setting in self.resolved {
            let block = match (&setting.default, &setting.entry.ty) {
                (RenderedDefault::Text(value), SettingType::String { max_length }) => {
                    StringDefault {
                        access_path: &setting.access_path,
                        value,
                        max_length: *max_length,
                    }
                    .emit()
                }
                (RenderedDefault::List(init), SettingType::Array { element, .. }) => ArrayDefault {
                    access_path: &setting.access_path,
                    default_name: &self.default_array_name(setting),
                    element_type: element.cpp_type(),
                    length: setting.entry.ty.byte_size() / element.byte_size(),
                    init,
                    byte_size: setting.entry.ty.byte_size(),
                }
                .emit(),
                (RenderedDefault::Scalar(value), _) => ScalarDefault {
                    access_path: &setting.access_path,
                    value,
                }
                .emit(),
                // Resolution guarantees the rendered default matches the type.
                _ => String::new(),
            };
            body.push_str(&self.guarded(&setting.guard, &block));
        }

        MemberFunction {
            class_name: &self.options.class_name,
            fn_name: "SetupDefaults",
            doc: "Initializes the settings structure to default values.",
            body: &body,
        }
        .emit()
    }

    fn emit_read_fn(&self) -> String {
        let mut body = String::from("    // read from the OS adapter for each individual setting\n");
        for setting in self.resolved {
            let value_type = setting.entry.ty.registry_type();
            let scope = setting.entry.scope.cpp_expr();
            let block = if setting.entry.ty.is_sized() {
                SizedReadSetting {
                    reader: &self.options.reader,
                    str_name: &setting.str_name,
                    scope,
                    value_type,
                    access_path: &setting.access_path,
                    byte_size: setting.entry.ty.byte_size(),
                }
                .emit()
            } else {
                ReadSetting {
                    reader: &self.options.reader,
                    str_name: &setting.str_name,
                    scope,
                    value_type,
                    access_path: &setting.access_path,
                }
                .emit()
            };
            body.push_str(&self.guarded(&setting.guard, &block));
        }

        MemberFunction {
            class_name: &self.options.class_name,
            fn_name: "ReadSettings",
            doc: "Reads each setting from the OS-level key/value store.",
            body: &body,
        }
        .emit()
    }

    fn emit_hash_list(&self) -> GenerateResult<String> {
        let mut entries = String::new();
        for setting in self.resolved {
            let line = HashListEntry {
                hash: setting.name_hash,
            }
            .emit();
            entries.push_str(&self.guarded(&setting.guard, &line));
        }

        // Re-count from the emitted text: every entry line ends with a comma,
        // guard lines never do.
        let emitted = entries
            .lines()
            .filter(|line| line.trim_end().ends_with(','))
            .count();
        if emitted != self.resolved.len() {
            return Err(GenerateError::CountMismatch {
                declared: self.resolved.len(),
                emitted,
            });
        }

        Ok(HashListDecl {
            num_settings_name: &self.num_settings_name(),
            list_name: &self.hash_list_name(),
            count: self.resolved.len(),
            entries: &entries,
        }
        .emit())
    }

    fn emit_info_init_fn(&self) -> String {
        let mut body = String::from("    SettingInfo info = {};\n");
        for setting in self.resolved {
            let block = SettingInfoEntry {
                descriptor_type: setting.entry.ty.descriptor_type(),
                access_path: &setting.access_path,
                hash: setting.name_hash,
            }
            .emit();
            body.push_str(&self.guarded(&setting.guard, &block));
        }

        MemberFunction {
            class_name: &self.options.class_name,
            fn_name: "InitSettingsInfo",
            doc: "Initializes the SettingInfo hash map and array of setting hashes.",
            body: &body,
        }
        .emit()
    }

    // =========================================================================
    // Derived names
    // =========================================================================

    fn lower_component(&self) -> String {
        self.schema.component.to_case(Case::Camel)
    }

    fn hash_list_name(&self) -> String {
        format!("g_{}SettingHashList", self.lower_component())
    }

    fn num_settings_name(&self) -> String {
        format!("g_{}NumSettings", self.lower_component())
    }

    fn json_array_name(&self) -> String {
        format!("g_{}JsonData", self.lower_component())
    }

    fn default_array_name(&self, setting: &ResolvedSetting) -> String {
        let pascal: String = setting
            .registry_name
            .split('.')
            .map(|part| part.to_case(Case::Pascal))
            .collect();
        format!("default{}", pascal)
    }

    fn guarded(&self, guard: &GuardSet, block: &str) -> String {
        fragments::wrap_guard(guard, &self.options.version_macro, block)
    }
}

/// Indent every code line of a block by one struct-nesting level per depth.
/// Preprocessor lines stay in column zero.
fn indent_block(block: &str, depth: usize) -> String {
    if depth == 0 {
        return block.to_string();
    }
    let pad = "    ".repeat(depth);
    let mut out = String::with_capacity(block.len());
    for line in block.split_inclusive('\n') {
        if line.starts_with('#') || line.trim().is_empty() {
            out.push_str(line);
        } else {
            out.push_str(&pad);
            out.push_str(line);
        }
    }
    out
}
