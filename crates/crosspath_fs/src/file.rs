use std::cell::RefCell;
use std::io::SeekFrom;
use std::rc::Rc;
use std::time::SystemTime;

use tracing::trace;

use crosspath_base::{CrosspathError, CrosspathResult};

use crate::metadata::{FileInfo, FileMode};
use crate::options::OpenOptions;
use crate::traits::FileHandle;

/// One entry of a MemoryFs: a file or a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FileRecord {
    /// Base name as first written by the caller, before case folding.
    pub(crate) name: String,
    pub(crate) data: Vec<u8>,
    pub(crate) mode: FileMode,
    pub(crate) modified: SystemTime,
}

impl FileRecord {
    pub(crate) fn file(name: impl Into<String>, mode: FileMode) -> Self {
        Self {
            name: name.into(),
            data: Vec::new(),
            mode: mode.as_file(),
            modified: SystemTime::now(),
        }
    }

    pub(crate) fn directory(name: impl Into<String>, perm: FileMode) -> Self {
        Self {
            name: name.into(),
            data: Vec::new(),
            mode: FileMode::dir(perm.perm()),
            modified: SystemTime::now(),
        }
    }

    pub(crate) fn info(&self) -> FileInfo {
        FileInfo::new(
            self.name.clone(),
            self.data.len() as u64,
            self.mode,
            self.modified,
        )
    }

    /// Writes `data` at `offset`, zero-filling any gap past the current end.
    ///
    /// Fails without touching the data when the end of the write overflows or the grown buffer
    /// cannot be allocated.
    pub(crate) fn write_at(&mut self, data: &[u8], offset: usize) -> Result<(), &'static str> {
        let end = offset
            .checked_add(data.len())
            .ok_or("offset out of range")?;
        if self.data.len() < end {
            self.data
                .try_reserve_exact(end - self.data.len())
                .map_err(|_| "offset out of range")?;
            self.data.resize(end, 0);
        }
        self.data[offset..end].copy_from_slice(data);
        self.modified = SystemTime::now();
        Ok(())
    }
}

pub(crate) type SharedRecord = Rc<RefCell<FileRecord>>;

/// Handle on a MemoryFs record.
///
/// The handle holds the record itself, not a copy: renaming or removing the path does not affect
/// an open handle, and writes through any handle are seen by all others.
#[derive(Debug)]
pub struct MemoryFile {
    path: String,
    record: SharedRecord,
    offset: u64,
    readable: bool,
    writable: bool,
    closed: bool,
}

impl MemoryFile {
    pub(crate) fn new(path: impl Into<String>, record: SharedRecord, options: &OpenOptions) -> Self {
        let offset = if options.is_append() {
            record.borrow().data.len() as u64
        } else {
            0
        };
        Self {
            path: path.into(),
            record,
            offset,
            readable: options.allows_read(),
            writable: options.allows_write(),
            closed: false,
        }
    }

    fn invalid(&self, op: &'static str, reason: &str) -> Box<CrosspathError> {
        Box::new(CrosspathError::invalid_operation(op, self.path.clone(), reason))
    }

    fn check_open(&self, op: &'static str) -> CrosspathResult<()> {
        if self.closed {
            return Err(self.invalid(op, "file is closed"));
        }
        Ok(())
    }

    fn check_readable(&self, op: &'static str) -> CrosspathResult<()> {
        self.check_open(op)?;
        if !self.readable {
            return Err(self.invalid(op, "file is not open for reading"));
        }
        if self.record.borrow().mode.is_dir() {
            return Err(self.invalid(op, "is a directory"));
        }
        Ok(())
    }

    fn check_writable(&self, op: &'static str) -> CrosspathResult<()> {
        self.check_open(op)?;
        if !self.writable {
            return Err(self.invalid(op, "file is not open for writing"));
        }
        if self.record.borrow().mode.is_dir() {
            return Err(self.invalid(op, "is a directory"));
        }
        Ok(())
    }

    fn offset_to_index(&self, op: &'static str, offset: u64) -> CrosspathResult<usize> {
        usize::try_from(offset).map_err(|_| self.invalid(op, "offset out of range"))
    }
}

impl FileHandle for MemoryFile {
    fn path(&self) -> &str {
        &self.path
    }

    fn read(&mut self, buf: &mut [u8]) -> CrosspathResult<usize> {
        self.check_readable("read")?;
        let start = self.offset_to_index("read", self.offset)?;
        let record = self.record.borrow();
        if start >= record.data.len() {
            return Ok(0);
        }
        let count = buf.len().min(record.data.len() - start);
        buf[..count].copy_from_slice(&record.data[start..start + count]);
        drop(record);
        self.offset += count as u64;
        Ok(count)
    }

    fn read_at(&mut self, buf: &mut [u8], offset: u64) -> CrosspathResult<usize> {
        self.check_readable("read_at")?;
        let start = self.offset_to_index("read_at", offset)?;
        let record = self.record.borrow();
        if start > record.data.len() {
            return Err(self.invalid("read_at", "offset beyond end of file"));
        }
        let count = buf.len().min(record.data.len() - start);
        buf[..count].copy_from_slice(&record.data[start..start + count]);
        Ok(count)
    }

    fn write(&mut self, data: &[u8]) -> CrosspathResult<usize> {
        self.check_writable("write")?;
        let start = self.offset_to_index("write", self.offset)?;
        self.record
            .borrow_mut()
            .write_at(data, start)
            .map_err(|reason| self.invalid("write", reason))?;
        self.offset += data.len() as u64;
        trace!(path = %self.path, bytes = data.len(), offset = self.offset, "Wrote to memory file");
        Ok(data.len())
    }

    fn write_at(&mut self, data: &[u8], offset: u64) -> CrosspathResult<usize> {
        self.check_writable("write_at")?;
        let start = self.offset_to_index("write_at", offset)?;
        self.record
            .borrow_mut()
            .write_at(data, start)
            .map_err(|reason| self.invalid("write_at", reason))?;
        Ok(data.len())
    }

    fn seek(&mut self, position: SeekFrom) -> CrosspathResult<u64> {
        self.check_open("seek")?;
        let length = self.record.borrow().data.len() as i128;
        let target = match position {
            SeekFrom::Start(offset) => offset as i128,
            SeekFrom::Current(delta) => self.offset as i128 + delta as i128,
            SeekFrom::End(delta) => length + delta as i128,
        };
        if target < 0 {
            return Err(self.invalid("seek", "negative position"));
        }
        if target > length {
            return Err(self.invalid("seek", "position beyond end of file"));
        }
        self.offset = target as u64;
        Ok(self.offset)
    }

    fn stat(&self) -> CrosspathResult<FileInfo> {
        self.check_open("stat")?;
        Ok(self.record.borrow().info())
    }

    fn close(&mut self) -> CrosspathResult<()> {
        self.check_open("close")?;
        self.closed = true;
        Ok(())
    }
}
