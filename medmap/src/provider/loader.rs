//! Loading provider collections from JSON files.

use std::path::Path;

use thiserror::Error;

use super::types::ProviderEntity;

/// Errors loading a provider file.
#[derive(Debug, Error)]
pub enum ProviderLoadError {
    #[error("Failed to read provider file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid provider JSON in '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Load a JSON array of providers.
pub fn load_providers_json(path: &Path) -> Result<Vec<ProviderEntity>, ProviderLoadError> {
    let display = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|source| ProviderLoadError::Io {
        path: display.clone(),
        source,
    })?;
    parse_providers_json(&content).map_err(|source| ProviderLoadError::Parse {
        path: display,
        source,
    })
}

/// Parse a JSON array of providers from a string.
pub fn parse_providers_json(content: &str) -> Result<Vec<ProviderEntity>, serde_json::Error> {
    serde_json::from_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"a","type":"pharmacy","coordinates":{{"latitude":1.0,"longitude":2.0}},"display_name":"A"}}]"#
        )
        .unwrap();

        let providers = load_providers_json(file.path()).unwrap();
        assert_eq!(providers.len(), 1);
        assert_eq!(providers[0].id, "a");
    }

    #[test]
    fn test_missing_file() {
        let err = load_providers_json(Path::new("/nonexistent/providers.json")).unwrap_err();
        assert!(matches!(err, ProviderLoadError::Io { .. }));
    }

    #[test]
    fn test_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        let err = load_providers_json(file.path()).unwrap_err();
        assert!(matches!(err, ProviderLoadError::Parse { .. }));
        assert!(err.to_string().contains("Invalid provider JSON"));
    }
}
