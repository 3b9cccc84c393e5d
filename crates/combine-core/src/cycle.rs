//! Cycle detection for reference expansion

use crate::error::{Error, Result};

/// Default limit on nested `$xref` expansion
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// The chain of references currently being expanded.
///
/// Owned by a single resolution run. Every successful [`enter`](Self::enter)
/// must be paired with an [`exit`](Self::exit) whether or not the expansion
/// in between succeeded, so the stack is empty again once a top-level
/// resolution returns.
#[derive(Debug, Clone)]
pub struct ResolutionStack {
    entries: Vec<String>,
    max_depth: usize,
}

impl Default for ResolutionStack {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl ResolutionStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_depth,
        }
    }

    /// Push `reference`, failing if it is already being expanded or the
    /// depth limit is reached. Nothing is pushed on failure.
    pub fn enter(&mut self, reference: &str) -> Result<()> {
        if self.entries.iter().any(|entry| entry == reference) {
            return Err(Error::Cycle {
                chain: self.chain_with(reference),
            });
        }
        if self.entries.len() >= self.max_depth {
            return Err(Error::DepthExceeded {
                max_depth: self.max_depth,
                chain: self.chain_with(reference),
            });
        }
        self.entries.push(reference.to_string());
        Ok(())
    }

    /// Pop the most recently entered reference.
    pub fn exit(&mut self) {
        self.entries.pop();
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The references being expanded, outermost first
    pub fn chain(&self) -> &[String] {
        &self.entries
    }

    fn chain_with(&self, reference: &str) -> Vec<String> {
        let mut chain = self.entries.clone();
        chain.push(reference.to_string());
        chain
    }
}
