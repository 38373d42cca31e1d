//! Settings schema loading.
//!
//! Reads a declarative settings schema from a JSON file and deserializes it
//! into the generator's schema IR, attaching the file path to every failure.

use crate::error::{CliResult, SchemaError};
use settings_codegen::SettingsSchema;
use std::path::Path;

/// Loader for settings schema files.
pub struct SchemaLoader;

impl SchemaLoader {
    /// Load and deserialize a schema file.
    pub fn load(path: &Path) -> CliResult<SettingsSchema> {
        if !path.exists() {
            return Err(SchemaError::not_found(path.to_path_buf()).into());
        }

        let content = std::fs::read_to_string(path).map_err(|e| SchemaError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let schema: SettingsSchema = serde_json::from_str(&content)
            .map_err(|e| SchemaError::invalid(path.to_path_buf(), e.to_string()))?;

        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_schema() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "component": "Vulkan",
                "settings": [
                    {{ "name": "TexFilterQuality", "type": "uint32", "default": 4 }}
                ]
            }}"#
        )
        .unwrap();

        let schema = SchemaLoader::load(file.path()).unwrap();
        assert_eq!(schema.component, "Vulkan");
        assert_eq!(schema.settings.len(), 1);
    }

    #[test]
    fn test_missing_file_is_reported_with_path() {
        let err = SchemaLoader::load(Path::new("/nonexistent/schema.json")).unwrap_err();
        match err {
            CliError::Schema(SchemaError::NotFound { path }) => {
                assert!(path.ends_with("schema.json"));
            }
            other => panic!("expected not-found error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_json_is_reported_with_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = SchemaLoader::load(file.path()).unwrap_err();
        assert!(matches!(
            err,
            CliError::Schema(SchemaError::Invalid { .. })
        ));
    }
}
