//! Reference parsing and pointer traversal
//!
//! A reference has the form `<file>#<fragment>`. The fragment is a JSON
//! pointer (RFC 6901) with two conveniences for hand-written references:
//!
//! - Segments are URL-decoded before unescaping, so `%2Fauthenticate` works
//!   the same as `~1authenticate`.
//! - Each literal `#` inside the fragment toggles an escape mode in which
//!   `/` and `~` are written as `~1` and `~0`. That lets a raw path key be
//!   typed verbatim: `api.yaml#/paths/#/authenticate` addresses the key
//!   `/authenticate` under `paths`.
//!
//! # Examples
//!
//! ```
//! use combine_core::pointer::Reference;
//!
//! let reference = Reference::parse("api.yaml#/paths/#/authenticate").unwrap();
//! assert_eq!(reference.file(), "api.yaml");
//! assert_eq!(reference.pointer(), Some("paths/~1authenticate"));
//! assert_eq!(reference.segments(), vec!["paths", "/authenticate"]);
//! ```

use std::fmt;

use serde_yaml::Value;

use crate::error::{Error, Result};
use crate::node::render_key;

/// A parsed `file#/pointer` reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    file: String,
    pointer: Option<String>,
}

impl Reference {
    /// Parse a reference string.
    ///
    /// Fails if there is no `#` or the file part is empty. An empty fragment
    /// (`api.yaml#`) references the whole file. Otherwise the reassembled
    /// reference is split on `#/`: exactly two parts give the file and the
    /// pointer, anything else leaves the whole string as the file name so a
    /// malformed fragment fails to load instead of inlining the file.
    pub fn parse(raw: &str) -> Result<Self> {
        let (file, fragment) = raw.split_once('#').ok_or_else(|| Error::unparseable(raw))?;
        if file.is_empty() {
            return Err(Error::unparseable(raw));
        }
        if fragment.is_empty() {
            return Ok(Self {
                file: file.to_string(),
                pointer: None,
            });
        }

        let normalized = format!("{}#{}", file, escape_fragment(fragment));
        let parts: Vec<&str> = normalized.split("#/").collect();
        let (file, pointer) = match parts.as_slice() {
            [file, pointer] => ((*file).to_string(), Some((*pointer).to_string())),
            _ => (parts[0].to_string(), None),
        };

        Ok(Self { file, pointer })
    }

    /// The referenced file, relative to the base directory
    pub fn file(&self) -> &str {
        &self.file
    }

    /// The escaped pointer path without its leading `/`
    pub fn pointer(&self) -> Option<&str> {
        self.pointer.as_deref()
    }

    /// The decoded pointer segments, empty when the whole file is referenced
    pub fn segments(&self) -> Vec<String> {
        match &self.pointer {
            Some(pointer) => pointer.split('/').map(unescape_segment).collect(),
            None => Vec::new(),
        }
    }

    /// Locate the referenced node inside the loaded document for `file`.
    pub fn lookup<'a>(&self, document: &'a Value) -> Result<&'a Value> {
        let Some(pointer) = &self.pointer else {
            return Ok(document);
        };

        let mut node = document;
        for raw in pointer.split('/') {
            let segment = unescape_segment(raw);
            node = match step(node, &segment) {
                Some(next) if !next.is_null() => next,
                _ => {
                    return Err(Error::PointerNotFound {
                        file: self.file.clone(),
                        pointer: pointer.clone(),
                        segment,
                    });
                }
            };
        }
        Ok(node)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.pointer {
            Some(pointer) => write!(f, "{}#/{}", self.file, pointer),
            None if self.file.contains('#') => f.write_str(&self.file),
            None => write!(f, "{}#", self.file),
        }
    }
}

/// Apply the `#` escape toggle to a fragment.
///
/// Starts in pointer mode where characters are copied verbatim. Each `#`
/// flips the mode and is dropped; in escape mode `/` becomes `~1` and `~`
/// becomes `~0`.
pub fn escape_fragment(fragment: &str) -> String {
    let mut result = String::with_capacity(fragment.len());
    let mut as_pointer = true;

    for ch in fragment.chars() {
        match ch {
            '#' => as_pointer = !as_pointer,
            _ if as_pointer => result.push(ch),
            '/' => result.push_str("~1"),
            '~' => result.push_str("~0"),
            _ => result.push(ch),
        }
    }

    result
}

/// Decode one pointer segment: URL-decode, then `~1` -> `/`, then `~0` -> `~`.
pub fn unescape_segment(segment: &str) -> String {
    let decoded = urlencoding::decode_binary(segment.as_bytes());
    String::from_utf8_lossy(&decoded)
        .replace("~1", "/")
        .replace("~0", "~")
}

/// Descend one level by key or index.
fn step<'a>(node: &'a Value, segment: &str) -> Option<&'a Value> {
    match node {
        Value::Mapping(map) => map.get(segment).or_else(|| {
            map.iter()
                .find(|(key, _)| !key.is_string() && render_key(key).as_deref() == Some(segment))
                .map(|(_, value)| value)
        }),
        Value::Sequence(seq) => segment.parse::<usize>().ok().and_then(|idx| seq.get(idx)),
        Value::Tagged(tagged) => step(&tagged.value, segment),
        _ => None,
    }
}
