use std::fmt::Debug;
use std::io::{self, Read, Seek, SeekFrom, Write};

use crosspath_base::CrosspathResult;

use crate::metadata::{FileInfo, FileMode};
use crate::options::OpenOptions;

/* 📖 # Why one FileSystem trait for memory and disk?

Code that manipulates files takes `&mut dyn FileSystem` and never learns whether it talks to the
disk or to a MemoryFs. Tests run against MemoryFs with either path style, while production code
passes a RealFs. The conformance suite runs the same scenarios against both to keep them honest.
*/

/// An open file.
///
/// Every operation on a closed handle fails. Handles of a MemoryFs share their record with the
/// filesystem, so writes are visible to every other handle on the same path right away.
pub trait FileHandle: Debug {
    /// The path the handle was opened with.
    fn path(&self) -> &str;

    /// Reads from the cursor and advances it; returns 0 at the end of the data.
    fn read(&mut self, buf: &mut [u8]) -> CrosspathResult<usize>;

    /// Reads at an absolute offset without moving the cursor.
    ///
    /// Returns fewer bytes than requested when the data ends first.
    fn read_at(&mut self, buf: &mut [u8], offset: u64) -> CrosspathResult<usize>;

    /// Writes at the cursor and advances it.
    fn write(&mut self, data: &[u8]) -> CrosspathResult<usize>;

    /// Writes at an absolute offset without moving the cursor, growing the file when needed.
    fn write_at(&mut self, data: &[u8], offset: u64) -> CrosspathResult<usize>;

    /// Moves the cursor; returns the new position.
    fn seek(&mut self, position: SeekFrom) -> CrosspathResult<u64>;

    fn stat(&self) -> CrosspathResult<FileInfo>;

    fn close(&mut self) -> CrosspathResult<()>;
}

impl Read for dyn FileHandle + '_ {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        FileHandle::read(self, buf).map_err(io::Error::from)
    }
}

impl Write for dyn FileHandle + '_ {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        FileHandle::write(self, buf).map_err(io::Error::from)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for dyn FileHandle + '_ {
    fn seek(&mut self, position: SeekFrom) -> io::Result<u64> {
        FileHandle::seek(self, position).map_err(io::Error::from)
    }
}

/// Filesystem operations addressed by path strings.
///
/// Paths are interpreted by the implementation; MemoryFs normalizes them with its Provider.
pub trait FileSystem: Debug {
    /// Creates or truncates a file and opens it for reading and writing.
    fn create(&mut self, path: &str) -> CrosspathResult<Box<dyn FileHandle>>;

    /// Opens an existing file read-only.
    fn open(&self, path: &str) -> CrosspathResult<Box<dyn FileHandle>>;

    /// Opens a file with explicit options; missing files are created unless the options are
    /// read-only.
    fn open_file(
        &mut self,
        path: &str,
        options: &OpenOptions,
        perm: FileMode,
    ) -> CrosspathResult<Box<dyn FileHandle>>;

    fn read_file(&self, path: &str) -> CrosspathResult<Vec<u8>>;

    /// Replaces the content of a file, creating it when missing.
    fn write_file(&mut self, path: &str, data: &[u8], perm: FileMode) -> CrosspathResult<()>;

    /// Creates one directory; its parent must already exist.
    fn mkdir(&mut self, path: &str, perm: FileMode) -> CrosspathResult<()>;

    /// Creates a directory and every missing ancestor.
    fn mkdir_all(&mut self, path: &str, perm: FileMode) -> CrosspathResult<()>;

    /// Lists the direct children of a directory, sorted by name.
    fn read_dir(&self, path: &str) -> CrosspathResult<Vec<FileInfo>>;

    fn rename(&mut self, from: &str, to: &str) -> CrosspathResult<()>;

    /// Removes a file or an empty directory.
    fn remove(&mut self, path: &str) -> CrosspathResult<()>;

    /// Removes a path and everything below it; a missing path is not an error.
    fn remove_all(&mut self, path: &str) -> CrosspathResult<()>;

    fn exists(&self, path: &str) -> CrosspathResult<bool>;

    fn stat(&self, path: &str) -> CrosspathResult<FileInfo>;

    /// Replaces the permission bits; the directory flag is kept.
    fn chmod(&mut self, path: &str, mode: FileMode) -> CrosspathResult<()>;

    /// Returns the paths matching a glob pattern, sorted.
    fn glob(&self, pattern: &str) -> CrosspathResult<Vec<String>>;

    /// Returns a view rooted at the directory `dir`.
    ///
    /// The view shares storage with this filesystem. Its paths are relative to `dir`, and paths
    /// that climb above it with `..` are rejected.
    fn sub(&self, dir: &str) -> CrosspathResult<Box<dyn FileSystem>>;
}
