//! Fixed preamble/postamble wrapping for both artifacts.
//!
//! Identical for every generation run apart from the target file name: legal
//! notice, auto-generation warning banner, doxygen block, includes, and the
//! namespace scope.

use super::CodegenOptions;

const DEFAULT_COPYRIGHT: &str = "\
/*\n\
 * Copyright (c) 2026 Driver Tools Team. All rights reserved.\n\
 * Licensed under the MIT license.\n\
 */\n";

const WARNING_BANNER: &str = "\
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////\n\
//\n\
// WARNING!  WARNING!  WARNING!  WARNING!  WARNING!  WARNING!  WARNING!  WARNING!  WARNING!  WARNING!  WARNING!\n\
//\n\
// This code has been generated automatically. Do not hand-modify this code.\n\
//\n\
// When changes are needed, modify the settings schema and rerun the generator.\n\
//\n\
// WARNING!  WARNING!  WARNING!  WARNING!  WARNING!  WARNING!  WARNING!  WARNING!  WARNING!  WARNING!  WARNING!\n\
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////\n\
\n";

const HEADER_INCLUDES: &str = "\
\n\
#include \"pal.h\"\n\
#include \"palUtil.h\"\n\
#include \"palSettingsLoader.h\"\n\
\n\
typedef Util::uint64 uint64;\n\
typedef Util::uint32 uint32;\n\
typedef Util::uint8 uint8;\n\
typedef Pal::gpusize gpusize;\n";

const CPP_INCLUDES: &str = "\
#include \"settings.h\"\n\
#include \"palDevice.h\"\n";

const DEVDRIVER_INCLUDES: &str = "\
\n\
#include \"devDriverServer.h\"\n\
#include \"protocols/ddSettingsService.h\"\n\
\n\
using namespace DevDriver::SettingsURIService;\n";

fn copyright_and_warning(options: &CodegenOptions) -> String {
    let copyright = options.copyright.as_deref().unwrap_or(DEFAULT_COPYRIGHT);
    format!("{}{}", copyright, WARNING_BANNER)
}

fn doxygen_block(options: &CodegenOptions) -> String {
    format!(
        "/**\n\
         ***************************************************************************************************\n\
         * @file  {}\n\
         * @brief auto-generated file.\n\
         *        Contains the definition for the settings struct and enums for initialization.\n\
         ***************************************************************************************************\n\
         */\n\
         #pragma once\n",
        options.header_file_name
    )
}

/// Everything above the first generated declaration in the header.
pub fn header_preamble(options: &CodegenOptions) -> String {
    format!(
        "{}{}{}{}",
        copyright_and_warning(options),
        doxygen_block(options),
        HEADER_INCLUDES,
        namespace_open(options)
    )
}

/// Everything above the first generated definition in the source file.
pub fn source_preamble(options: &CodegenOptions) -> String {
    format!(
        "{}{}{}{}",
        copyright_and_warning(options),
        CPP_INCLUDES,
        DEVDRIVER_INCLUDES,
        namespace_open(options)
    )
}

pub fn namespace_open(options: &CodegenOptions) -> String {
    format!("\nnamespace {}\n{{\n", options.namespace)
}

pub fn namespace_close(options: &CodegenOptions) -> String {
    format!("\n}} // {}\n", options.namespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_preamble_contents() {
        let options = CodegenOptions::default();
        let text = header_preamble(&options);
        assert!(text.contains("Do not hand-modify"));
        assert!(text.contains("@file  g_settings.h"));
        assert!(text.contains("#pragma once"));
        assert!(text.contains("#include \"palSettingsLoader.h\""));
        assert!(text.contains("namespace vk"));
    }

    #[test]
    fn test_source_preamble_contents() {
        let options = CodegenOptions::default();
        let text = source_preamble(&options);
        assert!(text.contains("#include \"settings.h\""));
        assert!(text.contains("protocols/ddSettingsService.h"));
        assert!(text.contains("using namespace DevDriver::SettingsURIService;"));
    }

    #[test]
    fn test_custom_copyright_replaces_default() {
        let options = CodegenOptions::default().with_copyright("/* custom */\n");
        let text = header_preamble(&options);
        assert!(text.starts_with("/* custom */\n"));
        assert!(!text.contains("Driver Tools Team"));
    }

    #[test]
    fn test_namespace_wrapping() {
        let options = CodegenOptions::default().with_namespace("drv");
        assert_eq!(namespace_open(&options), "\nnamespace drv\n{\n");
        assert_eq!(namespace_close(&options), "\n} // drv\n");
    }
}
