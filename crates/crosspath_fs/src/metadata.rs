use std::fmt;
use std::time::SystemTime;

/// Permission bits plus a directory flag, in the POSIX layout.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FileMode(u32);

impl FileMode {
    pub const DIR: u32 = 1 << 31;
    pub const PERM: u32 = 0o777;

    /// Mode of a freshly created file.
    pub const DEFAULT_FILE: FileMode = FileMode(0o666);
    /// Mode of a freshly created directory.
    pub const DEFAULT_DIR: FileMode = FileMode(Self::DIR | 0o777);

    pub const fn new(bits: u32) -> Self {
        Self(bits & (Self::DIR | Self::PERM))
    }

    /// A directory mode with the given permission bits.
    pub const fn dir(perm: u32) -> Self {
        Self(Self::DIR | (perm & Self::PERM))
    }

    pub const fn bits(&self) -> u32 {
        self.0
    }

    pub const fn perm(&self) -> u32 {
        self.0 & Self::PERM
    }

    pub const fn is_dir(&self) -> bool {
        self.0 & Self::DIR != 0
    }

    /// Replaces the permission bits, keeping the directory flag.
    pub const fn with_perm(&self, perm: u32) -> Self {
        Self((self.0 & Self::DIR) | (perm & Self::PERM))
    }

    /// The same permissions without the directory flag.
    pub const fn as_file(&self) -> Self {
        Self(self.0 & Self::PERM)
    }
}

impl From<u32> for FileMode {
    fn from(bits: u32) -> Self {
        Self::new(bits)
    }
}

/// `ls -l` style rendering, e.g. `drwxr-x---`.
impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rendered = String::with_capacity(10);
        rendered.push(if self.is_dir() { 'd' } else { '-' });
        for shift in [6, 3, 0] {
            let bits = (self.0 >> shift) & 0o7;
            rendered.push(if bits & 0o4 != 0 { 'r' } else { '-' });
            rendered.push(if bits & 0o2 != 0 { 'w' } else { '-' });
            rendered.push(if bits & 0o1 != 0 { 'x' } else { '-' });
        }
        f.write_str(&rendered)
    }
}

impl fmt::Debug for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileMode({} {:o})", self, self.perm())
    }
}

/// Metadata of a file or directory as returned by `stat` and `read_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    name: String,
    size: u64,
    mode: FileMode,
    modified: SystemTime,
}

impl FileInfo {
    pub fn new(name: impl Into<String>, size: u64, mode: FileMode, modified: SystemTime) -> Self {
        Self {
            name: name.into(),
            size,
            mode,
            modified,
        }
    }

    /// Base name of the entry.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn mode(&self) -> FileMode {
        self.mode
    }

    pub fn modified(&self) -> SystemTime {
        self.modified
    }

    pub fn is_dir(&self) -> bool {
        self.mode.is_dir()
    }
}
