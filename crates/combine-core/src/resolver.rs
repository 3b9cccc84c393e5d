//! `$xref` resolution
//!
//! The resolver rewrites a document tree into a new one in which every
//! mapping carrying an `$xref` key has been replaced by the structure the
//! reference points to:
//!
//! - `{$xref: R}` becomes the resolved target of `R`, whatever its kind.
//! - `{a: 1, $xref: R, d: 4}` becomes a layered mapping: keys declared
//!   before `$xref`, then the resolved target's keys, then keys declared
//!   after `$xref`, each layer overriding same-named keys of the previous
//!   one. The target must be a mapping in this form.
//!
//! Targets are resolved recursively before they are substituted or merged,
//! so references inside referenced documents are expanded as well.
//!
//! # Example
//!
//! ```no_run
//! use combine_core::loader::DocumentLoader;
//! use combine_core::resolver::{ResolveOptions, Resolver};
//!
//! let mut loader = DocumentLoader::new("specs");
//! let document = loader.load_uncached("api.yaml")?;
//! let resolved = Resolver::new(&mut loader, ResolveOptions::default()).resolve(&document)?;
//! # Ok::<(), combine_core::Error>(())
//! ```

use serde_yaml::value::TaggedValue;
use serde_yaml::{Mapping, Value};

use combine_fs::NormalizedPath;

use crate::cycle::{DEFAULT_MAX_DEPTH, ResolutionStack};
use crate::error::{Error, Result};
use crate::loader::DocumentLoader;
use crate::node::{NodeKind, XREF_KEY};
use crate::pointer::Reference;

/// Tuning for a resolution run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Maximum number of nested `$xref` expansions
    pub max_depth: usize,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Per-run resolution context.
///
/// Holds the document cache (through the borrowed loader) and the active
/// reference chain. Create one per top-level resolution; nothing is shared
/// between runs.
pub struct Resolver<'a> {
    loader: &'a mut DocumentLoader,
    stack: ResolutionStack,
}

impl<'a> Resolver<'a> {
    pub fn new(loader: &'a mut DocumentLoader, options: ResolveOptions) -> Self {
        Self {
            loader,
            stack: ResolutionStack::new(options.max_depth),
        }
    }

    /// Resolve `node` into a new, reference-free tree.
    pub fn resolve(&mut self, node: &Value) -> Result<Value> {
        match node {
            Value::Mapping(map) if map.contains_key(XREF_KEY) => self.resolve_xref(map),
            Value::Mapping(map) => self.resolve_mapping(map).map(Value::Mapping),
            Value::Sequence(seq) => seq
                .iter()
                .map(|item| self.resolve(item))
                .collect::<Result<Vec<_>>>()
                .map(Value::Sequence),
            Value::Tagged(tagged) => Ok(Value::Tagged(Box::new(TaggedValue {
                tag: tagged.tag.clone(),
                value: self.resolve(&tagged.value)?,
            }))),
            scalar => Ok(scalar.clone()),
        }
    }

    /// Number of references currently being expanded
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    fn resolve_mapping(&mut self, map: &Mapping) -> Result<Mapping> {
        let mut resolved = Mapping::with_capacity(map.len());
        for (key, value) in map {
            resolved.insert(key.clone(), self.resolve(value)?);
        }
        Ok(resolved)
    }

    fn resolve_xref(&mut self, map: &Mapping) -> Result<Value> {
        let raw = match map.get(XREF_KEY) {
            Some(Value::String(raw)) => raw.as_str(),
            Some(other) => {
                let rendered = serde_yaml::to_string(other).unwrap_or_default();
                return Err(Error::unparseable(rendered.trim_end()));
            }
            None => return self.resolve_mapping(map).map(Value::Mapping),
        };
        let reference = Reference::parse(raw)?;
        let target = self.expand(&reference)?;

        if map.len() == 1 {
            return Ok(target);
        }

        let target = match target {
            Value::Mapping(target) => target,
            other => {
                return Err(Error::InconsistentXrefType {
                    reference: reference.to_string(),
                    kind: NodeKind::of(&other),
                });
            }
        };

        // previous keys < target keys < subsequent keys
        let mut target = Some(target);
        let mut layered = Mapping::with_capacity(map.len() + target.as_ref().map_or(0, Mapping::len));
        for (key, value) in map {
            if key.as_str() == Some(XREF_KEY) {
                for (target_key, target_value) in target.take().into_iter().flatten() {
                    layered.insert(target_key, target_value);
                }
                continue;
            }
            tracing::trace!(key = ?key, reference = %reference, "Layering sibling key");
            layered.insert(key.clone(), self.resolve(value)?);
        }
        Ok(Value::Mapping(layered))
    }

    /// Resolve the target of `reference` with it pushed on the chain.
    fn expand(&mut self, reference: &Reference) -> Result<Value> {
        let key = reference.to_string();
        self.stack.enter(&key)?;
        tracing::debug!(reference = %key, depth = self.stack.depth(), "Expanding $xref");

        let result = self.resolve_target(reference);

        self.stack.exit();
        result
    }

    fn resolve_target(&mut self, reference: &Reference) -> Result<Value> {
        let document = self.loader.load(reference.file())?;
        let target = reference.lookup(&document)?;
        self.resolve(target)
    }
}

/// Resolve a document against `base_dir` with a fresh cache and chain.
pub fn resolve_document(document: &Value, base_dir: impl Into<NormalizedPath>) -> Result<Value> {
    let mut loader = DocumentLoader::new(base_dir);
    Resolver::new(&mut loader, ResolveOptions::default()).resolve(document)
}
