//! Filesystem boundary for yaml-combine
//!
//! Provides slash-normalized path handling and the small set of read/write
//! operations the combiner needs.

pub mod error;
pub mod io;
pub mod path;

pub use error::{Error, Result};
pub use path::NormalizedPath;
