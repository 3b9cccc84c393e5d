//! Error types for combine-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from combine-core
    #[error(transparent)]
    Core(#[from] combine_core::Error),

    /// Error from combine-fs
    #[error(transparent)]
    Fs(#[from] combine_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
