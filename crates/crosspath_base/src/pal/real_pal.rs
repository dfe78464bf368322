use std::env;
use std::path::PathBuf;

use tracing::{debug, instrument};

use crate::CrosspathError;
use crate::CrosspathResult;

use super::platform::Platform;
use super::traits::Pal;

/// Concrete PAL implementation asking the operating system via `std::env`.
#[derive(Debug, Default)]
pub struct RealPal;

impl RealPal {
    pub fn new() -> Self {
        Self
    }
}

fn path_to_string(path: PathBuf) -> CrosspathResult<String> {
    path.into_os_string().into_string().map_err(|raw| {
        Box::new(CrosspathError::parse(
            raw.to_string_lossy().into_owned(),
            "path is not valid UTF-8",
        ))
    })
}

impl Pal for RealPal {
    fn platform(&self) -> Platform {
        Platform::current()
    }

    #[instrument(skip(self))]
    fn working_directory(&self) -> CrosspathResult<String> {
        let dir = env::current_dir().map_err(|e| {
            debug!(error = %e, "failed to read current directory");
            Box::new(CrosspathError::file_error("<current_dir>", e))
        })?;
        path_to_string(dir)
    }

    #[instrument(skip(self))]
    fn change_directory(&self, path: &str) -> CrosspathResult<()> {
        env::set_current_dir(path).map_err(|e| {
            debug!(error = %e, "failed to change directory");
            Box::new(CrosspathError::file_error(path, e))
        })
    }

    #[instrument(skip(self))]
    fn home_directory(&self) -> CrosspathResult<String> {
        let key = if self.platform().is_windows() {
            "USERPROFILE"
        } else {
            "HOME"
        };
        let home = env::var_os(key)
            .ok_or_else(|| crate::err!("Environment variable {} is not set", key))?;
        path_to_string(PathBuf::from(home))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_matches_host() {
        assert_eq!(RealPal::new().platform(), Platform::current());
    }

    #[test]
    fn test_working_directory_is_absolute() {
        let wd = RealPal::new().working_directory().unwrap();
        assert!(std::path::Path::new(&wd).is_absolute());
    }
}
