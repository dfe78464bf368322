use std::cell::{Ref, RefCell, RefMut};
use std::collections::BTreeMap;
use std::rc::Rc;

use globset::GlobBuilder;
use tracing::{debug, instrument};

use crosspath_base::{CrosspathError, CrosspathResult, ResultExt};
use crosspath_path::{FilePath, PathStyle, Provider};

use crate::file::{FileRecord, MemoryFile, SharedRecord};
use crate::metadata::{FileInfo, FileMode};
use crate::options::OpenOptions;
use crate::scope::Scope;
use crate::traits::{FileHandle, FileSystem};

/* 📖 # Why key the MemoryFs by normalized path strings?

Every path goes through Provider::normalize before it touches the map, so `C:\Data\a.txt`,
`c:/data/a.txt` and `c:\data\.\a.txt` all land on the same record under a Windows provider,
while a POSIX provider keeps `/Data` and `/data` apart. Parent and child relationships are
recomputed from the keys with the same provider, which keeps the map flat.

Records live behind Rc<RefCell<..>> because open handles keep using a record after the map
has moved on. The map itself is shared the same way with every sub view. The filesystem is
single-threaded; share it across threads behind a lock of your own if needed.
*/

type RecordMap = BTreeMap<String, SharedRecord>;

/// In-memory filesystem for a given path style.
///
/// ```
/// use crosspath_base::{MockPal, PalHandle, Platform};
/// use crosspath_fs::{FileMode, FileSystem, MemoryFs};
/// use crosspath_path::Provider;
///
/// let provider = Provider::new(PalHandle::new(MockPal::new().with_platform(Platform::Windows)));
/// let mut fs = MemoryFs::new(provider);
/// fs.mkdir_all(r"C:\Data", FileMode::DEFAULT_DIR).unwrap();
/// fs.write_file(r"C:\Data\Notes.txt", b"hi", FileMode::DEFAULT_FILE).unwrap();
/// assert!(fs.exists("c:/data/notes.txt").unwrap());
/// ```
#[derive(Debug)]
pub struct MemoryFs {
    provider: Provider,
    records: Rc<RefCell<RecordMap>>,
    scope: Option<Scope>,
}

impl MemoryFs {
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            records: Rc::new(RefCell::new(BTreeMap::new())),
            scope: None,
        }
    }

    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    /// Every key currently stored, in sorted order.
    ///
    /// Sub views share their parent's storage, so they report the parent's keys.
    pub fn keys(&self) -> Vec<String> {
        self.records().keys().cloned().collect()
    }

    /// A view of the directory `dir`, addressing the same records as this filesystem.
    ///
    /// ```
    /// use crosspath_base::{MockPal, PalHandle, Platform};
    /// use crosspath_fs::{FileMode, FileSystem, MemoryFs};
    /// use crosspath_path::Provider;
    ///
    /// let provider = Provider::new(PalHandle::new(MockPal::new().with_platform(Platform::Linux)));
    /// let mut fs = MemoryFs::new(provider);
    /// fs.mkdir_all("/srv/www", FileMode::DEFAULT_DIR).unwrap();
    /// let mut www = fs.scoped("/srv/www").unwrap();
    /// www.write_file("index.html", b"<html>", FileMode::DEFAULT_FILE).unwrap();
    /// assert!(fs.exists("/srv/www/index.html").unwrap());
    /// ```
    #[instrument(skip(self))]
    pub fn scoped(&self, dir: &str) -> CrosspathResult<MemoryFs> {
        let (root, _, record) = self.lookup("sub", dir)?;
        if !record.borrow().mode.is_dir() {
            return Err(Box::new(CrosspathError::invalid_operation(
                "sub",
                dir,
                "not a directory",
            )));
        }
        debug!(root = %self.provider.render(&root), "Created sub view");
        Ok(MemoryFs {
            provider: self.provider.clone(),
            records: self.records.clone(),
            scope: Some(Scope::new(root)),
        })
    }

    fn records(&self) -> Ref<'_, RecordMap> {
        self.records.borrow()
    }

    fn records_mut(&self) -> RefMut<'_, RecordMap> {
        self.records.borrow_mut()
    }

    fn get(&self, key: &str) -> Option<SharedRecord> {
        self.records().get(key).cloned()
    }

    fn contains(&self, key: &str) -> bool {
        self.records().contains_key(key)
    }

    /// Parses and cleans a path, returning it with its lookup key.
    fn resolve(&self, op: &'static str, path: &str) -> CrosspathResult<(FilePath, String)> {
        let cleaned = match &self.scope {
            Some(scope) => scope.enter(&self.provider, op, path)?,
            None => self.provider.clean_path(&self.provider.parse(path)?),
        };
        let key = self.provider.normalize_path(&cleaned);
        Ok((cleaned, key))
    }

    fn key(&self, op: &'static str, path: &str) -> CrosspathResult<String> {
        Ok(self.resolve(op, path)?.1)
    }

    fn display_name(&self, path: &FilePath) -> String {
        self.provider.render(&path.base())
    }

    /// Renders a resolved path the way the caller of this view would write it.
    fn display_path(&self, path: &FilePath) -> String {
        let visible = self
            .scope
            .as_ref()
            .and_then(|scope| scope.leave(&self.provider, path))
            .unwrap_or_else(|| self.provider.clean_path(path));
        self.provider.render(&visible)
    }

    fn lookup(
        &self,
        op: &'static str,
        path: &str,
    ) -> CrosspathResult<(FilePath, String, SharedRecord)> {
        let (cleaned, key) = self.resolve(op, path)?;
        match self.get(&key) {
            Some(record) => Ok((cleaned, key, record)),
            None => {
                debug!(op, path, key, "Path not found");
                Err(Box::new(CrosspathError::not_found(path)))
            }
        }
    }

    /// Key of the parent directory of `key`.
    fn parent_key(&self, key: &str) -> CrosspathResult<String> {
        let parsed = self.provider.parse(key)?;
        Ok(self.provider.normalize_path(&parsed.dir()))
    }

    /// Whether `key` is `prefix` itself or lies below it.
    fn is_within(&self, key: &str, prefix: &str) -> bool {
        if key == prefix {
            return true;
        }
        let separator = self.provider.separator();
        match key.strip_prefix(prefix) {
            Some(rest) => prefix.ends_with(separator) || rest.starts_with(separator),
            None => false,
        }
    }

    /// Keys of all records strictly below `key`.
    fn descendants(&self, key: &str) -> Vec<String> {
        self.records()
            .keys()
            .filter(|candidate| candidate.as_str() != key && self.is_within(candidate, key))
            .cloned()
            .collect()
    }

    /// Walks from the root of `path` through each ancestor, calling `visit` with the ancestor
    /// path and its key. The path itself is visited last when `include_self` is set.
    fn for_each_ancestor<F>(&self, path: &FilePath, include_self: bool, mut visit: F) -> CrosspathResult<()>
    where
        F: FnMut(&FilePath, String) -> CrosspathResult<()>,
    {
        let mut accumulated = path.root();
        let segments = path.segments();
        let count = if include_self {
            segments.len() + 1
        } else {
            segments.len()
        };
        for index in 0..count {
            let key = self.provider.normalize_path(&accumulated);
            visit(&accumulated, key)?;
            if let Some(segment) = segments.get(index) {
                accumulated = accumulated.join(&FilePath::relative([segment.as_str()]));
            }
        }
        Ok(())
    }

    fn insert_record(&self, key: String, record: FileRecord) -> SharedRecord {
        let shared = Rc::new(RefCell::new(record));
        self.records_mut().insert(key, shared.clone());
        shared
    }

    fn glob_subject(&self, key: &str) -> String {
        match self.provider.style() {
            PathStyle::Windows => key.replace('\\', "/"),
            PathStyle::Posix => key.to_string(),
        }
    }

    /// Paths visible through this view, in the normalized form used for keys.
    ///
    /// A sub view lists the entries below its root relative to it, without the root itself.
    fn visible_keys(&self) -> CrosspathResult<Vec<String>> {
        let keys = self.keys();
        let Some(scope) = &self.scope else {
            return Ok(keys);
        };
        let here = FilePath::current_directory();
        let mut visible = Vec::new();
        for key in keys {
            let parsed = self.provider.parse(&key)?;
            if let Some(relative) = scope.leave(&self.provider, &parsed) {
                if !relative.equals(&here, self.provider.comparison()) {
                    visible.push(self.provider.normalize_path(&relative));
                }
            }
        }
        Ok(visible)
    }
}

impl FileSystem for MemoryFs {
    #[instrument(skip(self))]
    fn create(&mut self, path: &str) -> CrosspathResult<Box<dyn FileHandle>> {
        let (cleaned, key) = self.resolve("create", path)?;
        let record = match self.get(&key) {
            Some(existing) => {
                let mut record = existing.borrow_mut();
                if record.mode.is_dir() {
                    return Err(Box::new(CrosspathError::invalid_operation(
                        "create",
                        path,
                        "is a directory",
                    )));
                }
                record.data.clear();
                record.mode = FileMode::DEFAULT_FILE;
                drop(record);
                existing
            }
            None => {
                let name = self.display_name(&cleaned);
                self.insert_record(key, FileRecord::file(name, FileMode::DEFAULT_FILE))
            }
        };
        debug!("Created file");
        let options = OpenOptions::new().read(true).write(true).create(true).truncate(true);
        Ok(Box::new(MemoryFile::new(path, record, &options)))
    }

    #[instrument(skip(self))]
    fn open(&self, path: &str) -> CrosspathResult<Box<dyn FileHandle>> {
        let (_, _, record) = self.lookup("open", path)?;
        Ok(Box::new(MemoryFile::new(path, record, &OpenOptions::read_only())))
    }

    #[instrument(skip(self, options))]
    fn open_file(
        &mut self,
        path: &str,
        options: &OpenOptions,
        perm: FileMode,
    ) -> CrosspathResult<Box<dyn FileHandle>> {
        let (cleaned, key) = self.resolve("open_file", path)?;
        let record = match self.get(&key) {
            Some(existing) => existing,
            None if options.is_read_only() => {
                debug!(key, "Read-only open of missing path");
                return Err(Box::new(CrosspathError::not_found(path)));
            }
            None => {
                let name = self.display_name(&cleaned);
                debug!(key, "Creating file on open");
                self.insert_record(key, FileRecord::file(name, perm))
            }
        };
        if options.is_truncate() {
            let mut truncated = record.borrow_mut();
            if truncated.mode.is_dir() {
                return Err(Box::new(CrosspathError::invalid_operation(
                    "open_file",
                    path,
                    "is a directory",
                )));
            }
            truncated.data.clear();
        }
        Ok(Box::new(MemoryFile::new(path, record, options)))
    }

    fn read_file(&self, path: &str) -> CrosspathResult<Vec<u8>> {
        let mut file = self.open(path)?;
        let size = file.stat()?.size() as usize;
        let mut data = vec![0u8; size];
        let mut filled = 0;
        while filled < size {
            let count = file.read(&mut data[filled..])?;
            if count == 0 {
                break;
            }
            filled += count;
        }
        data.truncate(filled);
        file.close()?;
        Ok(data)
    }

    #[instrument(skip(self, data), fields(bytes = data.len()))]
    fn write_file(&mut self, path: &str, data: &[u8], perm: FileMode) -> CrosspathResult<()> {
        let (cleaned, key) = self.resolve("write_file", path)?;
        match self.get(&key) {
            Some(existing) => {
                let mut record = existing.borrow_mut();
                if record.mode.is_dir() {
                    return Err(Box::new(CrosspathError::invalid_operation(
                        "write_file",
                        path,
                        "is a directory",
                    )));
                }
                record.data = data.to_vec();
                record.mode = perm.as_file();
                record.modified = std::time::SystemTime::now();
            }
            None => {
                let mut record = FileRecord::file(self.display_name(&cleaned), perm);
                record.data = data.to_vec();
                self.insert_record(key, record);
            }
        }
        Ok(())
    }

    #[instrument(skip(self))]
    fn mkdir(&mut self, path: &str, perm: FileMode) -> CrosspathResult<()> {
        let (cleaned, key) = self.resolve("mkdir", path)?;
        self.for_each_ancestor(&cleaned, false, |ancestor, ancestor_key| {
            if self.contains(&ancestor_key) {
                Ok(())
            } else {
                debug!(parent = %ancestor_key, "Parent directory missing");
                Err(Box::new(CrosspathError::parent_missing(
                    path,
                    self.display_path(ancestor),
                )))
            }
        })?;
        if self.contains(&key) {
            return Err(Box::new(CrosspathError::invalid_operation(
                "mkdir",
                path,
                "already exists",
            )));
        }
        let name = self.display_name(&cleaned);
        self.insert_record(key, FileRecord::directory(name, perm));
        debug!("Created directory");
        Ok(())
    }

    #[instrument(skip(self))]
    fn mkdir_all(&mut self, path: &str, perm: FileMode) -> CrosspathResult<()> {
        let (cleaned, _) = self.resolve("mkdir_all", path)?;
        let mut missing = Vec::new();
        self.for_each_ancestor(&cleaned, true, |ancestor, key| match self.get(&key) {
            Some(record) if !record.borrow().mode.is_dir() => {
                Err(Box::new(CrosspathError::invalid_operation(
                    "mkdir_all",
                    self.display_path(ancestor),
                    "not a directory",
                )))
            }
            Some(_) => Ok(()),
            None => {
                missing.push((key, self.display_name(ancestor)));
                Ok(())
            }
        })?;
        debug!(created = missing.len(), "Creating missing directories");
        for (key, name) in missing {
            self.insert_record(key, FileRecord::directory(name, perm));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    fn read_dir(&self, path: &str) -> CrosspathResult<Vec<FileInfo>> {
        let (_, key, record) = self.lookup("read_dir", path)?;
        if !record.borrow().mode.is_dir() {
            return Err(Box::new(CrosspathError::invalid_operation(
                "read_dir",
                path,
                "not a directory",
            )));
        }
        let mut entries = Vec::new();
        for (candidate, child) in self.records().iter() {
            if *candidate == key {
                continue;
            }
            let parent = self
                .parent_key(candidate)
                .with_context(|| format!("Failed to compute parent of '{}'", candidate))?;
            if parent == key {
                entries.push(child.borrow().info());
            }
        }
        entries.sort_by(|a, b| a.name().cmp(b.name()));
        debug!(count = entries.len(), "Listed directory");
        Ok(entries)
    }

    #[instrument(skip(self))]
    fn rename(&mut self, from: &str, to: &str) -> CrosspathResult<()> {
        let from_key = self.key("rename", from)?;
        let (to_cleaned, to_key) = self.resolve("rename", to)?;
        if !self.contains(&from_key) {
            return Err(Box::new(CrosspathError::not_found(from)));
        }
        if to_key != from_key && self.is_within(&to_key, &from_key) {
            debug!(from_key, to_key, "Rename target lies below its source");
            return Err(Box::new(CrosspathError::invalid_operation(
                "rename",
                from,
                "cannot move a directory into itself",
            )));
        }
        let children = self.descendants(&from_key);
        let mut records = self.records_mut();
        let Some(record) = records.remove(&from_key) else {
            return Err(Box::new(CrosspathError::not_found(from)));
        };
        record.borrow_mut().name = self.display_name(&to_cleaned);
        for child_key in children {
            if let Some(child) = records.remove(&child_key) {
                let moved = format!("{}{}", to_key, &child_key[from_key.len()..]);
                records.insert(moved, child);
            }
        }
        records.insert(to_key, record);
        Ok(())
    }

    #[instrument(skip(self))]
    fn remove(&mut self, path: &str) -> CrosspathResult<()> {
        let (_, key, record) = self.lookup("remove", path)?;
        if record.borrow().mode.is_dir() && !self.descendants(&key).is_empty() {
            return Err(Box::new(CrosspathError::invalid_operation(
                "remove",
                path,
                "directory not empty",
            )));
        }
        self.records_mut().remove(&key);
        Ok(())
    }

    #[instrument(skip(self))]
    fn remove_all(&mut self, path: &str) -> CrosspathResult<()> {
        let key = self.key("remove_all", path)?;
        let doomed: Vec<String> = self
            .records()
            .keys()
            .filter(|candidate| self.is_within(candidate, &key))
            .cloned()
            .collect();
        debug!(count = doomed.len(), "Removing records");
        let mut records = self.records_mut();
        for candidate in doomed {
            records.remove(&candidate);
        }
        Ok(())
    }

    fn exists(&self, path: &str) -> CrosspathResult<bool> {
        Ok(self.contains(&self.key("exists", path)?))
    }

    fn stat(&self, path: &str) -> CrosspathResult<FileInfo> {
        let mut file = self.open(path)?;
        let info = file.stat()?;
        file.close()?;
        Ok(info)
    }

    #[instrument(skip(self))]
    fn chmod(&mut self, path: &str, mode: FileMode) -> CrosspathResult<()> {
        let (_, _, record) = self.lookup("chmod", path)?;
        let mut record = record.borrow_mut();
        record.mode = record.mode.with_perm(mode.perm());
        Ok(())
    }

    #[instrument(skip(self))]
    fn glob(&self, pattern: &str) -> CrosspathResult<Vec<String>> {
        let folded = self.provider.comparison().fold(pattern);
        let glob_pattern = self.glob_subject(&folded);
        let matcher = GlobBuilder::new(&glob_pattern)
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
        let mut matches: Vec<String> = self
            .visible_keys()?
            .into_iter()
            .filter(|visible| matcher.is_match(self.glob_subject(visible)))
            .collect();
        matches.sort();
        debug!(count = matches.len(), "Glob matched");
        Ok(matches)
    }

    fn sub(&self, dir: &str) -> CrosspathResult<Box<dyn FileSystem>> {
        Ok(Box::new(self.scoped(dir)?))
    }
}
