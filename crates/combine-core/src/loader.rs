//! Document loading with a per-run cache

use std::collections::HashMap;
use std::rc::Rc;

use combine_fs::{NormalizedPath, io};
use serde_yaml::Value;

use crate::error::{Error, Result};

/// Loads YAML documents relative to a base directory.
///
/// Referenced files are cached by the filename exactly as written in the
/// reference. Entries are created on first use, never mutated, and live as
/// long as the loader, which is one `combine` call.
#[derive(Debug)]
pub struct DocumentLoader {
    base_dir: NormalizedPath,
    cache: HashMap<String, Rc<Value>>,
}

impl DocumentLoader {
    pub fn new(base_dir: impl Into<NormalizedPath>) -> Self {
        Self {
            base_dir: base_dir.into(),
            cache: HashMap::new(),
        }
    }

    pub fn base_dir(&self) -> &NormalizedPath {
        &self.base_dir
    }

    /// Load a referenced document, reading it at most once per loader.
    ///
    /// The returned handle shares the cached tree, so callers may keep
    /// borrowing into it while loading further files.
    pub fn load(&mut self, file: &str) -> Result<Rc<Value>> {
        if let Some(document) = self.cache.get(file) {
            tracing::trace!(file, "Document cache hit");
            return Ok(Rc::clone(document));
        }

        let document = Rc::new(self.load_uncached(file)?);
        self.cache.insert(file.to_string(), Rc::clone(&document));
        Ok(document)
    }

    /// Read and parse a document without consulting or filling the cache.
    pub fn load_uncached(&self, file: &str) -> Result<Value> {
        let path = self.base_dir.join(file);
        tracing::debug!(path = %path, "Loading document");
        let content = io::read_text(&path)?;
        parse_document(&path, &content)
    }

    /// Whether `file` has already been loaded through [`load`](Self::load)
    pub fn is_cached(&self, file: &str) -> bool {
        self.cache.contains_key(file)
    }
}

/// Parse YAML source into a document tree. Blank input is an empty (null) document.
pub fn parse_document(path: &NormalizedPath, content: &str) -> Result<Value> {
    if content.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_yaml::from_str(content).map_err(|e| Error::parse(path.to_native(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_caches_by_filename() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("defs.yaml"), "a: 1\n").unwrap();

        let mut loader = DocumentLoader::new(temp.path());
        let first = loader.load("defs.yaml").unwrap();
        assert!(loader.is_cached("defs.yaml"));

        // A cached document is never re-read
        fs::write(temp.path().join("defs.yaml"), "a: 2\n").unwrap();
        let second = loader.load("defs.yaml").unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(second["a"], Value::from(1));
    }

    #[test]
    fn load_uncached_leaves_cache_empty() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("input.yaml"), "a: 1\n").unwrap();

        let loader = DocumentLoader::new(temp.path());
        loader.load_uncached("input.yaml").unwrap();
        assert!(!loader.is_cached("input.yaml"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let mut loader = DocumentLoader::new(temp.path());
        assert!(matches!(loader.load("nope.yaml"), Err(Error::Io(_))));
        assert!(!loader.is_cached("nope.yaml"));
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("bad.yaml"), "a: [1, 2\n").unwrap();

        let mut loader = DocumentLoader::new(temp.path());
        let err = loader.load("bad.yaml").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
        assert!(err.to_string().contains("bad.yaml"));
    }

    #[test]
    fn blank_file_is_null_document() {
        let path = NormalizedPath::new("empty.yaml");
        assert_eq!(parse_document(&path, "\n  \n").unwrap(), Value::Null);
    }
}
