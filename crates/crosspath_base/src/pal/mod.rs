/* 📖 # What is the Platform Abstraction Layer?

The PAL provides a trait-based abstraction over the parts of the process environment that path
handling depends on: the platform family and the working directory.
Key benefits:
- Testability: MockPal allows deterministic `abs()` results without touching the process cwd
- Flexibility: Switch between the real environment and in-memory implementations
- Consistency: All environment lookups use the same error handling
*/

pub mod mock;
mod platform;
pub mod real_pal;
mod traits;

pub use mock::MockPal;
pub use platform::Platform;
pub use real_pal::RealPal;
pub use traits::{Pal, PalHandle};
