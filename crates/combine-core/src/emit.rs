//! Output serialization for resolved documents

use serde_yaml::Value;

use crate::error::{Error, Result};

/// Serialize a document as a YAML stream with an explicit document-start marker.
///
/// Mappings are written in block style with keys in declaration order.
/// Multi-line strings use literal block style, single-line strings are
/// plain unless they would otherwise read back as a different scalar.
pub fn to_yaml_string(document: &Value) -> Result<String> {
    let body = serde_yaml::to_string(document).map_err(|e| Error::emit("YAML", e.to_string()))?;
    Ok(format!("---\n{}", body))
}

/// Serialize a document as pretty-printed JSON followed by a newline.
pub fn to_json_string(document: &Value) -> Result<String> {
    let mut body =
        serde_json::to_string_pretty(document).map_err(|e| Error::emit("JSON", e.to_string()))?;
    body.push('\n');
    Ok(body)
}
