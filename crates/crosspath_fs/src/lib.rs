/* 📖 # Why a separate crosspath_fs crate?
The path model is pure string manipulation and has no business touching files. The filesystems
sit on top of it: MemoryFs uses a Provider to decide which paths name the same entry, RealFs hands
paths to the operating system. Both implement the same FileSystem trait so callers and tests can
swap one for the other.
*/

mod file;
mod memory;
mod metadata;
mod options;
mod real_fs;
mod scope;
mod traits;


pub use file::MemoryFile;
pub use memory::MemoryFs;
pub use metadata::{FileInfo, FileMode};
pub use options::OpenOptions;
pub use real_fs::{RealFile, RealFs};
pub use traits::{FileHandle, FileSystem};
