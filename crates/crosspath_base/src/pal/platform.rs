use std::fmt;

use serde::Deserialize;

/// Operating system family a path provider is shaped for.
///
/// Only used to pick defaults (separator, comparison, parser style); the names follow the
/// values of `std::env::consts::OS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Aix,
    Android,
    Darwin,
    Dragonfly,
    FreeBsd,
    Illumos,
    Ios,
    Linux,
    NetBsd,
    OpenBsd,
    Solaris,
    Windows,
    Unknown,
}

const ALL: [Platform; 13] = [
    Platform::Aix,
    Platform::Android,
    Platform::Darwin,
    Platform::Dragonfly,
    Platform::FreeBsd,
    Platform::Illumos,
    Platform::Ios,
    Platform::Linux,
    Platform::NetBsd,
    Platform::OpenBsd,
    Platform::Solaris,
    Platform::Windows,
    Platform::Unknown,
];

impl Platform {
    /// Platform of the running process.
    pub fn current() -> Self {
        Self::parse(std::env::consts::OS)
    }

    /// Parse an OS name; `macos` is accepted as an alias of `darwin`.
    /// Unrecognized names map to [`Platform::Unknown`].
    pub fn parse(name: &str) -> Self {
        let name = name.trim().to_ascii_lowercase();
        if name == "macos" {
            return Platform::Darwin;
        }
        ALL.into_iter()
            .find(|platform| platform.as_str() == name)
            .unwrap_or(Platform::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Aix => "aix",
            Platform::Android => "android",
            Platform::Darwin => "darwin",
            Platform::Dragonfly => "dragonfly",
            Platform::FreeBsd => "freebsd",
            Platform::Illumos => "illumos",
            Platform::Ios => "ios",
            Platform::Linux => "linux",
            Platform::NetBsd => "netbsd",
            Platform::OpenBsd => "openbsd",
            Platform::Solaris => "solaris",
            Platform::Windows => "windows",
            Platform::Unknown => "unknown",
        }
    }

    pub fn is_windows(&self) -> bool {
        *self == Platform::Windows
    }

    pub fn is_posix(&self) -> bool {
        !matches!(self, Platform::Windows | Platform::Unknown)
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
