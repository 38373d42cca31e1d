//! Fragment catalogue.
//!
//! One typed fragment per generated artifact kind. Each fragment is a struct
//! of required fields with an `emit()` method: bind, substitute, emit text,
//! nothing else. Required fields are enforced at construction, so a fragment
//! can never be emitted partially filled.
//!
//! The emitted shapes are a fixed contract with the consuming C++ runtime
//! (`Pal::DriverSettings`, `ISettingsLoader`, and the developer-driver
//! settings service); callers supply names and values but cannot reorder the
//! registration descriptor fields or drop the sized-copy bounds.

use crate::resolve::GuardSet;

const SECTION_RULE: &str = "// =====================================================================================================================";

/// Typed enumeration declaration.
#[derive(Debug, Clone, Copy)]
pub struct EnumDecl<'a> {
    pub name: &'a str,
    pub data_type: &'a str,
    /// Pre-joined enumerator lines, one per enumerator.
    pub body: &'a str,
}

impl EnumDecl<'_> {
    pub fn emit(&self) -> String {
        format!(
            "\nenum {} : {}\n{{\n{}\n}};\n",
            self.name, self.data_type, self.body
        )
    }
}

/// One field declaration line of the settings aggregate.
#[derive(Debug, Clone, Copy)]
pub struct StructField<'a> {
    pub setting_type: &'a str,
    pub var_name: &'a str,
    /// Empty for scalars, `[N]` for strings and arrays.
    pub array_suffix: &'a str,
}

impl StructField<'_> {
    pub fn emit(&self) -> String {
        format!(
            "    {}    {}{};\n",
            self.setting_type, self.var_name, self.array_suffix
        )
    }
}

/// Nested anonymous-struct block for a settings group.
#[derive(Debug, Clone, Copy)]
pub struct StructGroup<'a> {
    pub var_name: &'a str,
    /// Pre-indented field lines of the group body.
    pub fields: &'a str,
}

impl StructGroup<'_> {
    pub fn emit(&self) -> String {
        format!("    struct {{\n{}    }} {};\n", self.fields, self.var_name)
    }
}

/// The settings aggregate declaration.
#[derive(Debug, Clone, Copy)]
pub struct StructDecl<'a> {
    pub struct_name: &'a str,
    pub base_class: &'a str,
    pub fields: &'a str,
}

impl StructDecl<'_> {
    pub fn emit(&self) -> String {
        format!(
            "\n/// Auto-generated settings struct\nstruct {} : public {}\n{{\n{}}};\n",
            self.struct_name, self.base_class, self.fields
        )
    }
}

/// Registry-key string constant for one setting.
#[derive(Debug, Clone, Copy)]
pub struct SettingNameStr<'a> {
    pub str_name: &'a str,
    /// Already-quoted C string literal.
    pub value: &'a str,
}

impl SettingNameStr<'_> {
    pub fn emit(&self) -> String {
        format!("static const char* {} = {};\n", self.str_name, self.value)
    }
}

/// Direct assignment of a scalar default.
#[derive(Debug, Clone, Copy)]
pub struct ScalarDefault<'a> {
    pub access_path: &'a str,
    pub value: &'a str,
}

impl ScalarDefault<'_> {
    pub fn emit(&self) -> String {
        format!("    m_settings.{} = {};\n", self.access_path, self.value)
    }
}

/// Zero-fill plus bounded copy of a string default.
///
/// The copy is bounded by the declared maximum length, never the runtime
/// length of the default literal.
#[derive(Debug, Clone, Copy)]
pub struct StringDefault<'a> {
    pub access_path: &'a str,
    /// Already-quoted C string literal.
    pub value: &'a str,
    pub max_length: usize,
}

impl StringDefault<'_> {
    pub fn emit(&self) -> String {
        format!(
            "    memset(m_settings.{path}, 0, {len});\n    strncpy(m_settings.{path}, {value}, {len});\n",
            path = self.access_path,
            value = self.value,
            len = self.max_length
        )
    }
}

/// Zero-fill plus bounded raw copy of an array default.
///
/// C++ cannot copy from a brace literal, so the fragment names a local
/// constexpr default array and copies the declared byte size from it.
#[derive(Debug, Clone, Copy)]
pub struct ArrayDefault<'a> {
    pub access_path: &'a str,
    /// Name of the local default array (`defaultPeerMask`).
    pub default_name: &'a str,
    pub element_type: &'a str,
    pub length: usize,
    /// Brace-enclosed initializer.
    pub init: &'a str,
    pub byte_size: usize,
}

impl ArrayDefault<'_> {
    pub fn emit(&self) -> String {
        format!(
            "    constexpr {elem} {name}[{len}] = {init};\n    memset(m_settings.{path}, 0, {size});\n    memcpy(m_settings.{path}, {name}, {size});\n",
            elem = self.element_type,
            name = self.default_name,
            len = self.length,
            init = self.init,
            path = self.access_path,
            size = self.byte_size
        )
    }
}

/// OS-level read of a scalar setting through the settings-source receiver.
#[derive(Debug, Clone, Copy)]
pub struct ReadSetting<'a> {
    /// Receiver expression for the current settings source.
    pub reader: &'a str,
    pub str_name: &'a str,
    pub scope: &'a str,
    pub value_type: &'a str,
    pub access_path: &'a str,
}

impl ReadSetting<'_> {
    pub fn emit(&self) -> String {
        format!(
            "    {}->ReadSetting({},\n                           {},\n                           {},\n                           &m_settings.{});\n\n",
            self.reader, self.str_name, self.scope, self.value_type, self.access_path
        )
    }
}

/// OS-level read of a string or array setting, carrying an explicit size.
#[derive(Debug, Clone, Copy)]
pub struct SizedReadSetting<'a> {
    pub reader: &'a str,
    pub str_name: &'a str,
    pub scope: &'a str,
    pub value_type: &'a str,
    pub access_path: &'a str,
    pub byte_size: usize,
}

impl SizedReadSetting<'_> {
    pub fn emit(&self) -> String {
        format!(
            "    {}->ReadSetting({},\n                           {},\n                           {},\n                           &m_settings.{},\n                           {});\n\n",
            self.reader, self.str_name, self.scope, self.value_type, self.access_path, self.byte_size
        )
    }
}

/// A generated member-function definition with its section banner.
#[derive(Debug, Clone, Copy)]
pub struct MemberFunction<'a> {
    pub class_name: &'a str,
    pub fn_name: &'a str,
    pub doc: &'a str,
    pub body: &'a str,
}

impl MemberFunction<'_> {
    pub fn emit(&self) -> String {
        format!(
            "\n{rule}\n// {doc}\nvoid {class}::{name}()\n{{\n{body}}}\n",
            rule = SECTION_RULE,
            doc = self.doc,
            class = self.class_name,
            name = self.fn_name,
            body = self.body
        )
    }
}

/// One line of the hashed name-lookup table.
#[derive(Debug, Clone, Copy)]
pub struct HashListEntry {
    pub hash: u32,
}

impl HashListEntry {
    pub fn emit(&self) -> String {
        format!("    {},\n", self.hash)
    }
}

/// Hash-table declaration with its fixed count.
///
/// The count must equal the number of entry lines; the emitter derives both
/// from the same resolved sequence.
#[derive(Debug, Clone, Copy)]
pub struct HashListDecl<'a> {
    pub num_settings_name: &'a str,
    pub list_name: &'a str,
    pub count: usize,
    pub entries: &'a str,
}

impl HashListDecl<'_> {
    pub fn emit(&self) -> String {
        format!(
            "\nstatic const uint32 {num} = {count};\nstatic const Pal::SettingNameHash {list}[] = {{\n{entries}}};\n",
            num = self.num_settings_name,
            count = self.count,
            list = self.list_name,
            entries = self.entries
        )
    }
}

/// One descriptor insert of the settings-info map.
#[derive(Debug, Clone, Copy)]
pub struct SettingInfoEntry<'a> {
    pub descriptor_type: &'a str,
    pub access_path: &'a str,
    pub hash: u32,
}

impl SettingInfoEntry<'_> {
    pub fn emit(&self) -> String {
        format!(
            "\n    info.type      = {ty};\n    info.pValuePtr = &m_settings.{path};\n    info.valueSize = sizeof(m_settings.{path});\n    m_settingsInfoMap.Insert({hash}u, info);\n",
            ty = self.descriptor_type,
            path = self.access_path,
            hash = self.hash
        )
    }
}

/// Embedded schema blob as a byte-array declaration.
#[derive(Debug, Clone, Copy)]
pub struct JsonDataArray<'a> {
    pub array_name: &'a str,
    pub data: &'a [u8],
}

impl JsonDataArray<'_> {
    pub fn emit(&self) -> String {
        let mut body = String::new();
        for chunk in self.data.chunks(12) {
            body.push_str("    ");
            let line: Vec<String> = chunk.iter().map(|b| format!("{:#04x}", b)).collect();
            body.push_str(&line.join(", "));
            body.push_str(",\n");
        }
        format!(
            "\nstatic const uint8 {name}[] = {{\n{body}}};  // {name}[]\n",
            name = self.array_name,
            body = body
        )
    }
}

/// Registration-function body publishing the settings schema.
///
/// The descriptor is a fixed-layout record shared with the settings service;
/// the emission order of its fields is part of that contract and must not be
/// rearranged.
#[derive(Debug, Clone, Copy)]
pub struct RegisterFunction<'a> {
    pub class_name: &'a str,
    pub list_name: &'a str,
    pub num_settings_name: &'a str,
    pub json_array_name: &'a str,
    pub data_hash: u64,
    pub is_encoded: bool,
    pub magic_buffer_id: u32,
    pub magic_buffer_offset: u32,
}

impl RegisterFunction<'_> {
    pub fn emit(&self) -> String {
        format!(
            "\n{rule}\n\
             // Registers the settings with the Developer Driver settings service.\n\
             void {class}::DevDriverRegister()\n\
             {{\n\
             \x20   auto* pDevDriverServer = static_cast<Pal::IPlatform*>(m_pPlatform)->GetDevDriverServer();\n\
             \x20   if (pDevDriverServer != nullptr)\n\
             \x20   {{\n\
             \x20       auto* pSettingsService = pDevDriverServer->GetSettingsService();\n\
             \x20       if (pSettingsService != nullptr)\n\
             \x20       {{\n\
             \x20           RegisteredComponent component = {{}};\n\
             \x20           strncpy(&component.componentName[0], m_pComponentName, kMaxComponentNameStrLen);\n\
             \x20           component.pPrivateData = static_cast<void*>(this);\n\
             \x20           component.pSettingsHashes = &{list}[0];\n\
             \x20           component.numSettings = {num};\n\
             \x20           component.pfnGetValue = ISettingsLoader::GetValue;\n\
             \x20           component.pfnSetValue = ISettingsLoader::SetValue;\n\
             \x20           component.pSettingsData = &{json}[0];\n\
             \x20           component.settingsDataSize = sizeof({json});\n\
             \x20           component.settingsDataHash = {hash:#018x};\n\
             \x20           component.settingsDataHeader.isEncoded = {encoded};\n\
             \x20           component.settingsDataHeader.magicBufferId = {magic_id};\n\
             \x20           component.settingsDataHeader.magicBufferOffset = {magic_offset};\n\
             \n\
             \x20           pSettingsService->RegisterComponent(component);\n\
             \x20       }}\n\
             \x20   }}\n\
             }}\n",
            rule = SECTION_RULE,
            class = self.class_name,
            list = self.list_name,
            num = self.num_settings_name,
            json = self.json_array_name,
            hash = self.data_hash,
            encoded = self.is_encoded,
            magic_id = self.magic_buffer_id,
            magic_offset = self.magic_buffer_offset
        )
    }
}

/// Quote text as a C string literal, escaping the characters that can appear
/// in registry names and defaults.
pub fn quote_c_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

// Guard fragments. Guards are only applied through `wrap_guard`, which emits
// the opening line(s) together with the matching `#endif` line(s), so an
// unmatched guard cannot be produced.

/// Opening `#if` line(s) for a guard: version guard outermost, then platform.
pub fn guard_open(guard: &GuardSet, version_macro: &str) -> String {
    let mut out = String::new();
    match (guard.min_version, guard.max_version) {
        (Some(min), Some(max)) => out.push_str(&format!(
            "#if {mac} >= {min} && {mac} <= {max}\n",
            mac = version_macro,
            min = min,
            max = max
        )),
        (Some(min), None) => {
            out.push_str(&format!("#if {} >= {}\n", version_macro, min));
        }
        (None, Some(max)) => {
            out.push_str(&format!("#if {} <= {}\n", version_macro, max));
        }
        (None, None) => {}
    }
    if let Some(platform) = guard.platform {
        out.push_str(&format!("#if {}\n", platform.ifdef_expr()));
    }
    out
}

/// Matching `#endif` line(s) for a guard.
pub fn guard_close(guard: &GuardSet) -> String {
    let mut pairs = 0;
    if guard.has_version() {
        pairs += 1;
    }
    if guard.platform.is_some() {
        pairs += 1;
    }
    "#endif\n".repeat(pairs)
}

/// Wrap a block of generated lines in the guard's open/close pair.
pub fn wrap_guard(guard: &GuardSet, version_macro: &str, block: &str) -> String {
    if guard.is_empty() {
        block.to_string()
    } else {
        format!(
            "{}{}{}",
            guard_open(guard, version_macro),
            block,
            guard_close(guard)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Platform;

    const MACRO: &str = "PAL_CLIENT_INTERFACE_MAJOR_VERSION";

    #[test]
    fn test_enum_decl() {
        let text = EnumDecl {
            name: "CacheMode",
            data_type: "uint32",
            body: "    CacheDisabled = 0,\n    CacheEnabled = 1,",
        }
        .emit();
        assert!(text.contains("enum CacheMode : uint32"));
        assert!(text.contains("CacheDisabled = 0,"));
        assert!(text.trim_end().ends_with("};"));
    }

    #[test]
    fn test_struct_field() {
        assert_eq!(
            StructField {
                setting_type: "uint32",
                var_name: "texFilterQuality",
                array_suffix: ""
            }
            .emit(),
            "    uint32    texFilterQuality;\n"
        );
        assert_eq!(
            StructField {
                setting_type: "char",
                var_name: "cacheDir",
                array_suffix: "[64]"
            }
            .emit(),
            "    char    cacheDir[64];\n"
        );
    }

    #[test]
    fn test_string_default_uses_declared_length() {
        let text = StringDefault {
            access_path: "cacheDir",
            value: "\"none\"",
            max_length: 64,
        }
        .emit();
        assert!(text.contains("memset(m_settings.cacheDir, 0, 64);"));
        assert!(text.contains("strncpy(m_settings.cacheDir, \"none\", 64);"));
        // The literal's own length never appears as a bound.
        assert!(!text.contains(", 4)"));
    }

    #[test]
    fn test_array_default_bounded_copy() {
        let text = ArrayDefault {
            access_path: "peerMask",
            default_name: "defaultPeerMask",
            element_type: "uint32",
            length: 4,
            init: "{ 0, 0, 0, 0 }",
            byte_size: 16,
        }
        .emit();
        assert!(text.contains("constexpr uint32 defaultPeerMask[4] = { 0, 0, 0, 0 };"));
        assert!(text.contains("memset(m_settings.peerMask, 0, 16);"));
        assert!(text.contains("memcpy(m_settings.peerMask, defaultPeerMask, 16);"));
    }

    #[test]
    fn test_read_setting_receiver_is_substitutable() {
        let text = ReadSetting {
            reader: "static_cast<Pal::IDevice*>(m_pDevice)",
            str_name: "pTexFilterQualityStr",
            scope: "Pal::SettingScope::PrivateDriverKey",
            value_type: "Util::ValueType::Uint",
            access_path: "texFilterQuality",
        }
        .emit();
        assert!(text.starts_with("    static_cast<Pal::IDevice*>(m_pDevice)->ReadSetting("));
        assert!(text.contains("&m_settings.texFilterQuality);"));
    }

    #[test]
    fn test_sized_read_setting_carries_size() {
        let text = SizedReadSetting {
            reader: "static_cast<Pal::IDevice*>(m_pDevice)",
            str_name: "pCacheDirStr",
            scope: "Pal::SettingScope::PrivateDriverKey",
            value_type: "Util::ValueType::Str",
            access_path: "cacheDir",
            byte_size: 64,
        }
        .emit();
        assert!(text.contains("&m_settings.cacheDir,\n                           64);"));
    }

    #[test]
    fn test_hash_list_decl_count_and_entries() {
        let entries =
            HashListEntry { hash: 11 }.emit() + &HashListEntry { hash: 22 }.emit();
        let text = HashListDecl {
            num_settings_name: "g_vulkanNumSettings",
            list_name: "g_vulkanSettingHashList",
            count: 2,
            entries: &entries,
        }
        .emit();
        assert!(text.contains("static const uint32 g_vulkanNumSettings = 2;"));
        assert_eq!(text.matches(",\n").count(), 2);
    }

    #[test]
    fn test_json_data_array_wraps_lines() {
        let data: Vec<u8> = (0..30).collect();
        let text = JsonDataArray {
            array_name: "g_vulkanJsonData",
            data: &data,
        }
        .emit();
        assert!(text.contains("static const uint8 g_vulkanJsonData[] = {"));
        assert!(text.contains("0x00, 0x01"));
        assert!(text.trim_end().ends_with("};  // g_vulkanJsonData[]"));
        // 30 bytes at 12 per line: 3 data lines.
        assert_eq!(text.matches("    0x").count(), 3);
    }

    #[test]
    fn test_register_function_field_order() {
        let text = RegisterFunction {
            class_name: "SettingsLoader",
            list_name: "g_vulkanSettingHashList",
            num_settings_name: "g_vulkanNumSettings",
            json_array_name: "g_vulkanJsonData",
            data_hash: 0xdead_beef_dead_beef,
            is_encoded: false,
            magic_buffer_id: 0,
            magic_buffer_offset: 0,
        }
        .emit();

        let order = [
            "componentName",
            "pPrivateData",
            "pSettingsHashes",
            "numSettings",
            "pfnGetValue",
            "pfnSetValue",
            "pSettingsData",
            "settingsDataSize",
            "settingsDataHash",
            "isEncoded",
            "magicBufferId",
            "magicBufferOffset",
        ];
        let mut last = 0;
        for field in order {
            let pos = text.find(field).unwrap_or_else(|| panic!("missing {}", field));
            assert!(pos > last, "descriptor field {} out of order", field);
            last = pos;
        }
        assert!(text.contains("settingsDataHash = 0xdeadbeefdeadbeef;"));
    }

    #[test]
    fn test_guard_variants() {
        let both = GuardSet::from_attrs(None, Some(42), Some(50));
        assert_eq!(
            guard_open(&both, MACRO),
            format!("#if {m} >= 42 && {m} <= 50\n", m = MACRO)
        );
        let min = GuardSet::from_attrs(None, Some(42), None);
        assert_eq!(guard_open(&min, MACRO), format!("#if {} >= 42\n", MACRO));
        let max = GuardSet::from_attrs(None, None, Some(50));
        assert_eq!(guard_open(&max, MACRO), format!("#if {} <= 50\n", MACRO));
        let win = GuardSet::from_attrs(Some(Platform::Windows), None, None);
        assert_eq!(guard_open(&win, MACRO), "#if defined(_WIN32)\n");
    }

    #[test]
    fn test_wrap_guard_is_paired() {
        let guard = GuardSet::from_attrs(Some(Platform::Linux), Some(42), None);
        let text = wrap_guard(&guard, MACRO, "    line;\n");
        assert_eq!(text.matches("#if").count(), 2);
        assert_eq!(text.matches("#endif").count(), 2);
        assert!(text.starts_with(&format!("#if {} >= 42\n#if defined(__unix__)\n", MACRO)));
        assert!(text.ends_with("#endif\n#endif\n"));
    }

    #[test]
    fn test_wrap_guard_empty_is_identity() {
        let text = wrap_guard(&GuardSet::default(), MACRO, "    line;\n");
        assert_eq!(text, "    line;\n");
    }
}
