/// Flags for [`FileSystem::open_file`](crate::FileSystem::open_file), modeled on
/// `std::fs::OpenOptions`.
///
/// ```
/// use crosspath_fs::OpenOptions;
///
/// let options = OpenOptions::new().read(true).write(true).create(true);
/// assert!(!options.is_read_only());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpenOptions {
    read: bool,
    write: bool,
    append: bool,
    truncate: bool,
    create: bool,
}

impl OpenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(mut self, read: bool) -> Self {
        self.read = read;
        self
    }

    pub fn write(mut self, write: bool) -> Self {
        self.write = write;
        self
    }

    /// Start the cursor at the end of the existing data.
    pub fn append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    /// Discard existing data on open.
    pub fn truncate(mut self, truncate: bool) -> Self {
        self.truncate = truncate;
        self
    }

    pub fn create(mut self, create: bool) -> Self {
        self.create = create;
        self
    }

    /// Options for reading an existing file.
    pub fn read_only() -> Self {
        Self::new().read(true)
    }

    /// Options for replacing a file's content, creating it when missing.
    pub fn write_truncate() -> Self {
        Self::new().write(true).create(true).truncate(true)
    }

    pub fn is_read(&self) -> bool {
        self.read
    }

    pub fn is_write(&self) -> bool {
        self.write
    }

    pub fn is_append(&self) -> bool {
        self.append
    }

    pub fn is_truncate(&self) -> bool {
        self.truncate
    }

    pub fn is_create(&self) -> bool {
        self.create
    }

    /// True when no flag expresses an intent to modify the file.
    ///
    /// Opening a missing file read-only fails; any other combination creates it.
    pub fn is_read_only(&self) -> bool {
        !(self.write || self.append || self.truncate || self.create)
    }

    /// Whether a handle opened with these options may read.
    pub fn allows_read(&self) -> bool {
        self.read || self.is_read_only()
    }

    /// Whether a handle opened with these options may write.
    pub fn allows_write(&self) -> bool {
        !self.is_read_only()
    }
}
