/* 📖 # Why have crosspath_base as a core library?
crosspath_base provides the foundational error handling, tracing setup and platform abstraction
used across all crates. This ensures consistency in error handling and prevents circular
dependencies between the path model and the filesystems built on it.
*/

pub mod error;
pub mod pal;
pub mod tracing;

// Re-export commonly used types for convenience
pub use error::{CrosspathError, CrosspathResult, ErrorKind, ResultExt};
pub use pal::{MockPal, Pal, PalHandle, Platform, RealPal};
