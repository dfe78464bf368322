use std::sync::Arc;

use parking_lot::Mutex;

use crate::CrosspathResult;

use super::platform::Platform;
use super::traits::Pal;

pub const FAKE_WINDOWS_WORKING_DIRECTORY: &str = r"c:\working";
pub const FAKE_WINDOWS_HOME_DIRECTORY: &str = r"c:\users\fake";
pub const FAKE_UNIX_WORKING_DIRECTORY: &str = "/working";
pub const FAKE_UNIX_HOME_DIRECTORY: &str = "/home/fake";

/* 📖 # Why keep MockPal state behind Arc<Mutex<T>>?

MockPal is handed to a Provider inside a PalHandle while the test keeps its own copy:
1. **Shared**: clones observe `change_directory` calls made through any other clone
2. **Deterministic**: directories are fixed fake values, not the test runner's cwd
3. **Thread-safe**: the Pal trait requires Send + Sync
*/

/// In-memory PAL implementation for testing.
///
/// Directories default to fake values shaped for the chosen platform (`/working` and
/// `/home/fake`, or `c:\working` and `c:\users\fake` on Windows). Setting the platform
/// after an explicit directory keeps the explicit directory.
///
/// # Examples
///
/// ```
/// use crosspath_base::{MockPal, Pal, Platform};
///
/// let pal = MockPal::new().with_platform(Platform::Windows);
/// assert_eq!(pal.working_directory().unwrap(), r"c:\working");
/// pal.change_directory(r"d:\projects").unwrap();
/// assert_eq!(pal.working_directory().unwrap(), r"d:\projects");
/// ```
#[derive(Debug, Clone)]
pub struct MockPal {
    platform: Platform,
    working_directory: Arc<Mutex<Option<String>>>,
    home_directory: Option<String>,
}

impl MockPal {
    /// Create a MockPal for the platform of the running process.
    pub fn new() -> Self {
        Self {
            platform: Platform::current(),
            working_directory: Arc::new(Mutex::new(None)),
            home_directory: None,
        }
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_working_directory(self, working_directory: impl Into<String>) -> Self {
        *self.working_directory.lock() = Some(working_directory.into());
        self
    }

    pub fn with_home_directory(mut self, home_directory: impl Into<String>) -> Self {
        self.home_directory = Some(home_directory.into());
        self
    }
}

impl Default for MockPal {
    fn default() -> Self {
        Self::new()
    }
}

impl Pal for MockPal {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn working_directory(&self) -> CrosspathResult<String> {
        let working_directory = self.working_directory.lock();
        Ok(match working_directory.as_ref() {
            Some(dir) => dir.clone(),
            None if self.platform.is_windows() => FAKE_WINDOWS_WORKING_DIRECTORY.to_string(),
            None => FAKE_UNIX_WORKING_DIRECTORY.to_string(),
        })
    }

    fn change_directory(&self, path: &str) -> CrosspathResult<()> {
        *self.working_directory.lock() = Some(path.to_string());
        Ok(())
    }

    fn home_directory(&self) -> CrosspathResult<String> {
        Ok(match &self.home_directory {
            Some(dir) => dir.clone(),
            None if self.platform.is_windows() => FAKE_WINDOWS_HOME_DIRECTORY.to_string(),
            None => FAKE_UNIX_HOME_DIRECTORY.to_string(),
        })
    }
}
