use std::sync::Arc;

use crate::CrosspathResult;

use super::platform::Platform;

/* 📖 # Why is Pal a trait instead of a struct?

Path resolution needs a working directory, and the right default separator depends on the
platform. Asking the operating system directly would make every `abs()` test depend on where the
test runner was started. Using a trait enables two key benefits:
1. **Testability**: MockPal answers with fixed, mutable in-memory values
2. **Flexibility**: Code depends on the abstraction, not the concrete implementation
*/

/// Platform Abstraction Layer (PAL) trait providing the process environment a path provider
/// consults.
///
/// Two implementations are provided:
/// - `RealPal`: Asks the operating system via `std::env`
/// - `MockPal`: In-memory implementation for testing
pub trait Pal: std::fmt::Debug + Send + Sync + 'static {
    /// The platform paths should be shaped for.
    fn platform(&self) -> Platform;

    /// The current working directory as a raw path string.
    fn working_directory(&self) -> CrosspathResult<String>;

    /// Change the current working directory.
    fn change_directory(&self, path: &str) -> CrosspathResult<()>;

    /// The home directory of the current user.
    fn home_directory(&self) -> CrosspathResult<String>;
}

/* 📖 # Why use Arc<dyn Pal> with PalHandle?

Arc enables cheap cloning of the entire PAL implementation, allowing it to be
shared between a Provider and the filesystems built on it.
PalHandle wraps this for ergonomic Deref access and Clone support.
*/

/// Handle to a PAL implementation, enabling shared ownership.
///
/// # Examples
///
/// ```
/// use crosspath_base::{MockPal, PalHandle, Platform};
///
/// let pal = PalHandle::new(MockPal::new().with_platform(Platform::Linux));
/// let pal_clone = pal.clone(); // Cheap clone, shares the same implementation
/// assert_eq!(pal_clone.working_directory().unwrap(), "/working");
/// ```
#[derive(Debug, Clone)]
pub struct PalHandle(Arc<dyn Pal>);

impl PalHandle {
    /// Create a new PalHandle from a Pal implementation.
    pub fn new(pal: impl Pal + 'static) -> Self {
        Self(Arc::new(pal))
    }
}

impl std::ops::Deref for PalHandle {
    type Target = dyn Pal;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pal::mock::MockPal;

    #[test]
    fn test_pal_handle_clone_shares_state() {
        let pal = PalHandle::new(MockPal::new().with_platform(Platform::Linux));
        let pal_clone = pal.clone();
        pal.change_directory("/tmp").unwrap();
        assert_eq!(pal_clone.working_directory().unwrap(), "/tmp");
    }
}
