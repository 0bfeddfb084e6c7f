//! # Document Input
//!
//! Loads a document file into the value model. The format is chosen by
//! extension: `.yaml`/`.yml` as YAML, anything else as JSON.

use std::path::Path;

use apidecl_core::{ApiDeclError, Value};

/// Read and parse the document at `path`.
///
/// # Errors
///
/// Returns [`ApiDeclError::Io`] if the file cannot be read,
/// [`ApiDeclError::Serialization`] if it does not parse, and
/// [`ApiDeclError::ValueConversion`] if a YAML tree has no value-model form.
pub fn load_document(path: &Path) -> Result<Value, ApiDeclError> {
    let content = std::fs::read_to_string(path)?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext {
        "yaml" | "yml" => Value::from_yaml_str(&content),
        _ => Value::from_json_str(&content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_yaml_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(file, "swaggerVersion: \"1.2\"\napis: []").unwrap();
        let doc = load_document(file.path()).unwrap();
        assert_eq!(doc.get_str("swaggerVersion"), Some("1.2"));
    }

    #[test]
    fn test_other_extensions_parse_as_json() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "apis: []").unwrap();
        let err = load_document(file.path()).unwrap_err();
        assert!(matches!(err, ApiDeclError::Serialization(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_document(Path::new("/nonexistent/api-docs.json")).unwrap_err();
        assert!(matches!(err, ApiDeclError::Io(_)));
    }
}
