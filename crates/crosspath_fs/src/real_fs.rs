use std::fs;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::time::SystemTime;

use globset::GlobBuilder;
use tracing::{debug, instrument};
use walkdir::WalkDir;

use crosspath_base::{CrosspathError, CrosspathResult};
use crosspath_path::{FilePath, PathStyle, Provider};

use crate::metadata::{FileInfo, FileMode};
use crate::options::OpenOptions;
use crate::scope::Scope;
use crate::traits::{FileHandle, FileSystem};

/* 📖 # Why std::fs for the disk-backed filesystem?

Every operation is synchronous and maps onto a single std::fs call, so there is nothing to gain
from an async runtime. The Provider is only consulted where the operating system offers no
equivalent: naming entries and expanding glob patterns.
*/

/// FileSystem backed by the operating system.
///
/// Paths are handed to std::fs as given, relative paths resolve against the process working
/// directory. A view returned by `sub` joins every path onto its root directory first.
#[derive(Debug, Clone)]
pub struct RealFs {
    provider: Provider,
    scope: Option<Scope>,
}

impl RealFs {
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            scope: None,
        }
    }

    /// A RealFs using the path conventions of the host.
    pub fn from_os() -> Self {
        Self::new(Provider::from_os())
    }

    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    /// A RealFs rooted at the directory `dir`.
    #[instrument(skip(self))]
    pub fn scoped(&self, dir: &str) -> CrosspathResult<RealFs> {
        let root = match &self.scope {
            Some(scope) => scope.enter(&self.provider, "sub", dir)?,
            None => self.provider.clean_path(&self.provider.parse(dir)?),
        };
        let os_root = self.provider.render(&root);
        let metadata = fs::metadata(&os_root).map_err(|e| file_error(&os_root, e))?;
        if !metadata.is_dir() {
            return Err(Box::new(CrosspathError::invalid_operation(
                "sub",
                dir,
                "not a directory",
            )));
        }
        debug!(root = %os_root, "Created sub view");
        Ok(RealFs {
            provider: self.provider.clone(),
            scope: Some(Scope::new(root)),
        })
    }

    /// The path handed to the operating system for a caller path.
    fn resolve(&self, op: &'static str, path: &str) -> CrosspathResult<String> {
        match &self.scope {
            Some(scope) => Ok(self.provider.render(&scope.enter(&self.provider, op, path)?)),
            None => Ok(path.to_string()),
        }
    }

    fn info(&self, path: &str, metadata: &fs::Metadata) -> CrosspathResult<FileInfo> {
        Ok(FileInfo::new(
            self.provider.base(path)?,
            metadata.len(),
            mode_from_metadata(metadata),
            metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
        ))
    }

    fn glob_subject(&self, path: &str) -> String {
        match self.provider.style() {
            PathStyle::Windows => path.replace('\\', "/"),
            PathStyle::Posix => path.to_string(),
        }
    }
}

fn file_error(path: &str, error: io::Error) -> Box<CrosspathError> {
    debug!(path, error = %error, "Filesystem operation failed");
    Box::new(CrosspathError::file_error(path, error))
}

fn is_glob_segment(segment: &str) -> bool {
    segment.contains(['*', '?', '[', '{'])
}

#[cfg(unix)]
fn mode_from_metadata(metadata: &fs::Metadata) -> FileMode {
    use std::os::unix::fs::PermissionsExt;
    let perm = metadata.permissions().mode();
    if metadata.is_dir() {
        FileMode::dir(perm)
    } else {
        FileMode::new(perm & FileMode::PERM)
    }
}

#[cfg(not(unix))]
fn mode_from_metadata(metadata: &fs::Metadata) -> FileMode {
    let perm = if metadata.permissions().readonly() {
        0o444
    } else {
        0o666
    };
    if metadata.is_dir() {
        FileMode::dir(perm | 0o111)
    } else {
        FileMode::new(perm)
    }
}

#[cfg(unix)]
fn apply_create_mode(options: &mut fs::OpenOptions, perm: FileMode) {
    use std::os::unix::fs::OpenOptionsExt;
    options.mode(perm.perm());
}

#[cfg(not(unix))]
fn apply_create_mode(_options: &mut fs::OpenOptions, _perm: FileMode) {}

#[cfg(unix)]
fn dir_builder(perm: FileMode) -> fs::DirBuilder {
    use std::os::unix::fs::DirBuilderExt;
    let mut builder = fs::DirBuilder::new();
    builder.mode(perm.perm());
    builder
}

#[cfg(not(unix))]
fn dir_builder(_perm: FileMode) -> fs::DirBuilder {
    fs::DirBuilder::new()
}

#[cfg(unix)]
fn permissions_for(_current: fs::Permissions, mode: FileMode) -> fs::Permissions {
    use std::os::unix::fs::PermissionsExt;
    fs::Permissions::from_mode(mode.perm())
}

#[cfg(not(unix))]
fn permissions_for(mut current: fs::Permissions, mode: FileMode) -> fs::Permissions {
    current.set_readonly(mode.perm() & 0o222 == 0);
    current
}

/// Handle on a file opened through a RealFs.
#[derive(Debug)]
pub struct RealFile {
    path: String,
    name: String,
    file: Option<fs::File>,
}

impl RealFile {
    fn new(path: &str, name: String, file: fs::File) -> Self {
        Self {
            path: path.to_string(),
            name,
            file: Some(file),
        }
    }

    fn parts(&mut self, op: &'static str) -> CrosspathResult<(&str, &mut fs::File)> {
        match self.file.as_mut() {
            Some(file) => Ok((&self.path, file)),
            None => Err(Box::new(CrosspathError::invalid_operation(
                op,
                self.path.clone(),
                "file is closed",
            ))),
        }
    }
}

impl FileHandle for RealFile {
    fn path(&self) -> &str {
        &self.path
    }

    fn read(&mut self, buf: &mut [u8]) -> CrosspathResult<usize> {
        let (path, file) = self.parts("read")?;
        file.read(buf).map_err(|e| file_error(path, e))
    }

    fn read_at(&mut self, buf: &mut [u8], offset: u64) -> CrosspathResult<usize> {
        let (path, file) = self.parts("read_at")?;
        let length = file.metadata().map_err(|e| file_error(path, e))?.len();
        if offset > length {
            return Err(Box::new(CrosspathError::invalid_operation(
                "read_at",
                path,
                "offset beyond end of file",
            )));
        }
        let cursor = file.stream_position().map_err(|e| file_error(path, e))?;
        file.seek(SeekFrom::Start(offset))
            .map_err(|e| file_error(path, e))?;
        let mut filled = 0;
        while filled < buf.len() {
            let count = file.read(&mut buf[filled..]).map_err(|e| file_error(path, e))?;
            if count == 0 {
                break;
            }
            filled += count;
        }
        file.seek(SeekFrom::Start(cursor))
            .map_err(|e| file_error(path, e))?;
        Ok(filled)
    }

    fn write(&mut self, data: &[u8]) -> CrosspathResult<usize> {
        let (path, file) = self.parts("write")?;
        file.write_all(data).map_err(|e| file_error(path, e))?;
        Ok(data.len())
    }

    fn write_at(&mut self, data: &[u8], offset: u64) -> CrosspathResult<usize> {
        let (path, file) = self.parts("write_at")?;
        let cursor = file.stream_position().map_err(|e| file_error(path, e))?;
        file.seek(SeekFrom::Start(offset))
            .map_err(|e| file_error(path, e))?;
        file.write_all(data).map_err(|e| file_error(path, e))?;
        file.seek(SeekFrom::Start(cursor))
            .map_err(|e| file_error(path, e))?;
        Ok(data.len())
    }

    fn seek(&mut self, position: SeekFrom) -> CrosspathResult<u64> {
        let (path, file) = self.parts("seek")?;
        let length = file.metadata().map_err(|e| file_error(path, e))?.len() as i128;
        let current = file.stream_position().map_err(|e| file_error(path, e))? as i128;
        let target = match position {
            SeekFrom::Start(offset) => offset as i128,
            SeekFrom::Current(delta) => current + delta as i128,
            SeekFrom::End(delta) => length + delta as i128,
        };
        if target < 0 || target > length {
            return Err(Box::new(CrosspathError::invalid_operation(
                "seek",
                path,
                "position out of range",
            )));
        }
        file.seek(SeekFrom::Start(target as u64))
            .map_err(|e| file_error(path, e))
    }

    fn stat(&self) -> CrosspathResult<FileInfo> {
        let Some(file) = self.file.as_ref() else {
            return Err(Box::new(CrosspathError::invalid_operation(
                "stat",
                self.path.clone(),
                "file is closed",
            )));
        };
        let metadata = file.metadata().map_err(|e| file_error(&self.path, e))?;
        Ok(FileInfo::new(
            self.name.clone(),
            metadata.len(),
            mode_from_metadata(&metadata),
            metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
        ))
    }

    fn close(&mut self) -> CrosspathResult<()> {
        let (path, file) = self.parts("close")?;
        file.flush().map_err(|e| file_error(path, e))?;
        self.file = None;
        Ok(())
    }
}

impl FileSystem for RealFs {
    #[instrument(skip(self))]
    fn create(&mut self, path: &str) -> CrosspathResult<Box<dyn FileHandle>> {
        let os_path = self.resolve("create", path)?;
        let file = fs::File::options()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&os_path)
            .map_err(|e| file_error(&os_path, e))?;
        debug!("Created file");
        Ok(Box::new(RealFile::new(path, self.provider.base(&os_path)?, file)))
    }

    #[instrument(skip(self))]
    fn open(&self, path: &str) -> CrosspathResult<Box<dyn FileHandle>> {
        let os_path = self.resolve("open", path)?;
        let file = fs::File::open(&os_path).map_err(|e| file_error(&os_path, e))?;
        Ok(Box::new(RealFile::new(path, self.provider.base(&os_path)?, file)))
    }

    #[instrument(skip(self, options))]
    fn open_file(
        &mut self,
        path: &str,
        options: &OpenOptions,
        perm: FileMode,
    ) -> CrosspathResult<Box<dyn FileHandle>> {
        let os_path = self.resolve("open_file", path)?;
        let writes = options.allows_write();
        let mut std_options = fs::File::options();
        std_options
            .read(options.allows_read())
            .write(writes && !options.is_append())
            .append(options.is_append())
            .truncate(options.is_truncate())
            .create(writes);
        apply_create_mode(&mut std_options, perm);
        let file = std_options.open(&os_path).map_err(|e| file_error(&os_path, e))?;
        Ok(Box::new(RealFile::new(path, self.provider.base(&os_path)?, file)))
    }

    #[instrument(skip(self))]
    fn read_file(&self, path: &str) -> CrosspathResult<Vec<u8>> {
        let os_path = self.resolve("read_file", path)?;
        fs::read(&os_path).map_err(|e| file_error(&os_path, e))
    }

    #[instrument(skip(self, data), fields(bytes = data.len()))]
    fn write_file(&mut self, path: &str, data: &[u8], perm: FileMode) -> CrosspathResult<()> {
        let os_path = self.resolve("write_file", path)?;
        let mut std_options = fs::File::options();
        std_options.write(true).create(true).truncate(true);
        apply_create_mode(&mut std_options, perm);
        let mut file = std_options.open(&os_path).map_err(|e| file_error(&os_path, e))?;
        file.write_all(data).map_err(|e| file_error(&os_path, e))
    }

    #[instrument(skip(self))]
    fn mkdir(&mut self, path: &str, perm: FileMode) -> CrosspathResult<()> {
        let os_path = self.resolve("mkdir", path)?;
        dir_builder(perm)
            .create(&os_path)
            .map_err(|e| file_error(&os_path, e))
    }

    #[instrument(skip(self))]
    fn mkdir_all(&mut self, path: &str, perm: FileMode) -> CrosspathResult<()> {
        let os_path = self.resolve("mkdir_all", path)?;
        dir_builder(perm)
            .recursive(true)
            .create(&os_path)
            .map_err(|e| file_error(&os_path, e))
    }

    #[instrument(skip(self))]
    fn read_dir(&self, path: &str) -> CrosspathResult<Vec<FileInfo>> {
        let os_path = self.resolve("read_dir", path)?;
        let mut entries = Vec::new();
        for entry in fs::read_dir(&os_path).map_err(|e| file_error(&os_path, e))? {
            let entry = entry.map_err(|e| file_error(&os_path, e))?;
            let metadata = entry.metadata().map_err(|e| file_error(&os_path, e))?;
            entries.push(FileInfo::new(
                entry.file_name().to_string_lossy().into_owned(),
                metadata.len(),
                mode_from_metadata(&metadata),
                metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            ));
        }
        entries.sort_by(|a, b| a.name().cmp(b.name()));
        debug!(count = entries.len(), "Listed directory");
        Ok(entries)
    }

    #[instrument(skip(self))]
    fn rename(&mut self, from: &str, to: &str) -> CrosspathResult<()> {
        let os_from = self.resolve("rename", from)?;
        let os_to = self.resolve("rename", to)?;
        fs::rename(&os_from, &os_to).map_err(|e| file_error(&os_from, e))
    }

    #[instrument(skip(self))]
    fn remove(&mut self, path: &str) -> CrosspathResult<()> {
        let os_path = self.resolve("remove", path)?;
        let metadata = fs::symlink_metadata(&os_path).map_err(|e| file_error(&os_path, e))?;
        if metadata.is_dir() {
            fs::remove_dir(&os_path).map_err(|e| file_error(&os_path, e))
        } else {
            fs::remove_file(&os_path).map_err(|e| file_error(&os_path, e))
        }
    }

    #[instrument(skip(self))]
    fn remove_all(&mut self, path: &str) -> CrosspathResult<()> {
        let os_path = self.resolve("remove_all", path)?;
        let metadata = match fs::symlink_metadata(&os_path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Nothing to remove");
                return Ok(());
            }
            Err(e) => return Err(file_error(&os_path, e)),
        };
        if metadata.is_dir() {
            fs::remove_dir_all(&os_path).map_err(|e| file_error(&os_path, e))
        } else {
            fs::remove_file(&os_path).map_err(|e| file_error(&os_path, e))
        }
    }

    fn exists(&self, path: &str) -> CrosspathResult<bool> {
        let os_path = self.resolve("exists", path)?;
        Path::new(&os_path)
            .try_exists()
            .map_err(|e| file_error(&os_path, e))
    }

    fn stat(&self, path: &str) -> CrosspathResult<FileInfo> {
        let os_path = self.resolve("stat", path)?;
        let metadata = fs::metadata(&os_path).map_err(|e| file_error(&os_path, e))?;
        self.info(&os_path, &metadata)
    }

    #[instrument(skip(self))]
    fn chmod(&mut self, path: &str, mode: FileMode) -> CrosspathResult<()> {
        let os_path = self.resolve("chmod", path)?;
        let current = fs::metadata(&os_path)
            .map_err(|e| file_error(&os_path, e))?
            .permissions();
        fs::set_permissions(&os_path, permissions_for(current, mode))
            .map_err(|e| file_error(&os_path, e))
    }

    /// Walks from the longest literal prefix of the pattern and matches every entry below it.
    #[instrument(skip(self))]
    fn glob(&self, pattern: &str) -> CrosspathResult<Vec<String>> {
        let parsed = self.provider.parse(pattern)?;
        let literal: Vec<String> = parsed
            .segments()
            .iter()
            .take_while(|segment| !is_glob_segment(segment))
            .cloned()
            .collect();
        let remaining = parsed.segments().len() - literal.len();
        let prefix = self.provider.render(&FilePath::new(
            parsed.volume().clone(),
            parsed.is_abs(),
            literal,
        ));
        let walk_root = match &self.scope {
            Some(_) => self.resolve("glob", &prefix)?,
            None if prefix.is_empty() => ".".to_string(),
            None => prefix.clone(),
        };

        let matcher = GlobBuilder::new(&self.glob_subject(pattern))
            .literal_separator(true)
            .build()
            .map_err(|e| {
                debug!(pattern, error = %e, "Failed to compile glob pattern");
                Box::new(CrosspathError::message(format!(
                    "Invalid glob pattern '{}': {}",
                    pattern, e
                )))
            })?
            .compile_matcher();

        let mut walker = WalkDir::new(&walk_root);
        if !pattern.contains("**") {
            walker = walker.max_depth(remaining);
        }
        let mut matches = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.io_error().map(io::Error::kind) == Some(io::ErrorKind::NotFound) => {
                    continue;
                }
                Err(e) => {
                    return Err(Box::new(CrosspathError::message(format!(
                        "Failed to walk '{}': {}",
                        walk_root, e
                    ))));
                }
            };
            let Ok(relative) = entry.path().strip_prefix(&walk_root) else {
                continue;
            };
            let relative = relative.to_string_lossy();
            let candidate = self.provider.join(&[prefix.as_str(), &*relative])?;
            if !candidate.is_empty() && matcher.is_match(self.glob_subject(&candidate)) {
                matches.push(candidate);
            }
        }
        matches.sort();
        debug!(count = matches.len(), "Glob matched");
        Ok(matches)
    }

    fn sub(&self, dir: &str) -> CrosspathResult<Box<dyn FileSystem>> {
        Ok(Box::new(self.scoped(dir)?))
    }
}
