//! Document merging and `$xref` resolution for yaml-combine
//!
//! Combines several YAML documents into one and expands `$xref` references
//! of the form `file.yaml#/json/pointer` into the structures they point to.
//!
//! The pipeline is:
//!
//! 1. [`Combiner`] sorts the input filenames and folds them together with
//!    [`merge::merge_documents`].
//! 2. A [`Resolver`] walks the merged tree once, loading referenced files
//!    through a per-run [`DocumentLoader`] cache and guarding against
//!    reference cycles.
//! 3. [`emit`] serializes the reference-free result.

pub mod combiner;
pub mod cycle;
pub mod emit;
pub mod error;
pub mod loader;
pub mod merge;
pub mod node;
pub mod pointer;
pub mod resolver;

pub use combiner::{CombineOutcome, Combiner, SkippedInput};
pub use cycle::ResolutionStack;
pub use error::{Error, Result};
pub use loader::DocumentLoader;
pub use node::{NodeKind, XREF_KEY};
pub use pointer::Reference;
pub use resolver::{ResolveOptions, Resolver, resolve_document};
