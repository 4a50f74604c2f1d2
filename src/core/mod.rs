// Public modules
pub mod columns;
pub mod defaults;
pub mod error;
pub mod launcher;
pub mod tty;

// Internal modules - not part of public API
pub(crate) mod paths;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
