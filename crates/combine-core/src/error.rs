//! Error types for combine-core

use std::path::PathBuf;

use crate::node::NodeKind;

/// Result type for combine-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while combining and resolving documents
///
/// Every variant is fatal to the current `combine` call.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A referenced or input file could not be read
    #[error(transparent)]
    Io(#[from] combine_fs::Error),

    /// A file's contents are not valid YAML
    #[error("Invalid YAML file '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    /// Two top-level documents disagree on a key's value type
    #[error("Could not merge {source_label}#{path} ({from_kind}) into merged object ({into_kind})")]
    MergeTypeConflict {
        source_label: String,
        path: String,
        from_kind: NodeKind,
        into_kind: NodeKind,
    },

    /// A reference string has no `#` separator or no file part
    #[error("Unparseable $xref '{reference}'")]
    UnparseableReference { reference: String },

    /// A pointer segment could not be located or resolved to null
    #[error("Could not find '{segment}' of '{pointer}' in contents of {file}")]
    PointerNotFound {
        file: String,
        pointer: String,
        segment: String,
    },

    /// A reference points back to itself, directly or transitively
    #[error("$xref cycle detected: {}", .chain.join(" -> "))]
    Cycle { chain: Vec<String> },

    /// An `$xref` with sibling keys resolved to something other than a mapping
    #[error("Inconsistent $xref types within object: '{reference}' resolved to {kind}, which cannot be merged with sibling keys")]
    InconsistentXrefType { reference: String, kind: NodeKind },

    /// Reference nesting exceeded the configured depth limit
    #[error("$xref nesting exceeds maximum depth {max_depth}: {}", .chain.join(" -> "))]
    DepthExceeded { max_depth: usize, chain: Vec<String> },

    /// The resolved document could not be serialized
    #[error("Failed to emit {format} output: {message}")]
    Emit { format: String, message: String },
}

impl Error {
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn unparseable(reference: impl Into<String>) -> Self {
        Self::UnparseableReference {
            reference: reference.into(),
        }
    }

    pub fn emit(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Emit {
            format: format.into(),
            message: message.into(),
        }
    }
}
