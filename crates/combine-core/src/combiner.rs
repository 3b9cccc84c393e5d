//! The combine driver: merge the inputs, then resolve references once

use std::io::Write;

use combine_fs::NormalizedPath;
use serde_yaml::Value;

use crate::emit;
use crate::error::{Error, Result};
use crate::loader::DocumentLoader;
use crate::merge::merge_documents;
use crate::resolver::{ResolveOptions, Resolver};

/// A top-level input that was skipped because it is not valid YAML
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedInput {
    pub file: String,
    pub message: String,
}

/// The result of a successful `combine` run
#[derive(Debug, Clone, PartialEq)]
pub struct CombineOutcome {
    /// The merged, fully resolved document
    pub document: Value,
    /// Inputs dropped during the merge phase
    pub skipped: Vec<SkippedInput>,
}

/// Combines a set of YAML files into one resolved document.
///
/// The combiner itself holds only configuration. Each call to
/// [`combine`](Self::combine) builds its own loader cache and reference
/// chain, so one instance can be reused freely.
#[derive(Debug, Clone)]
pub struct Combiner {
    base_dir: NormalizedPath,
    files: Vec<String>,
    options: ResolveOptions,
}

impl Combiner {
    /// Create a combiner for `files`, all relative to `base_dir`.
    pub fn new<I, S>(base_dir: impl Into<NormalizedPath>, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            base_dir: base_dir.into(),
            files: files.into_iter().map(Into::into).collect(),
            options: ResolveOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }

    pub fn base_dir(&self) -> &NormalizedPath {
        &self.base_dir
    }

    /// Input files in processing (lexicographic) order
    pub fn sorted_files(&self) -> Vec<String> {
        let mut files = self.files.clone();
        files.sort();
        files
    }

    /// Merge and resolve all inputs.
    ///
    /// An input that fails to parse is logged, recorded in
    /// [`CombineOutcome::skipped`] and left out of the merge. Every other
    /// failure, including parse failures of referenced files, aborts.
    pub fn combine(&self) -> Result<CombineOutcome> {
        let mut loader = DocumentLoader::new(self.base_dir.clone());
        let (merged, skipped) = self.merge_inputs(&loader)?;

        tracing::debug!(base_dir = %self.base_dir, "Resolving $xref references");
        let document = Resolver::new(&mut loader, self.options).resolve(&merged)?;

        Ok(CombineOutcome { document, skipped })
    }

    /// Combine and write the result as YAML to `writer`.
    pub fn combine_to_writer<W: Write>(&self, mut writer: W) -> Result<CombineOutcome> {
        let outcome = self.combine()?;
        let output = emit::to_yaml_string(&outcome.document)?;
        writer
            .write_all(output.as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|e| Error::emit("YAML", e.to_string()))?;
        Ok(outcome)
    }

    fn merge_inputs(&self, loader: &DocumentLoader) -> Result<(Value, Vec<SkippedInput>)> {
        let mut merged = Value::Null;
        let mut skipped = Vec::new();

        for file in self.sorted_files() {
            let document = match loader.load_uncached(&file) {
                Ok(document) => document,
                Err(Error::Parse { message, .. }) => {
                    tracing::warn!(file = %file, error = %message, "Skipping input that is not valid YAML");
                    skipped.push(SkippedInput { file, message });
                    continue;
                }
                Err(e) => return Err(e),
            };
            tracing::debug!(file = %file, "Merging input");
            merge_documents(&mut merged, document, &file)?;
        }

        Ok((merged, skipped))
    }
}
