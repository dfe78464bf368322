use crosspath_base::{CrosspathError, CrosspathResult};
use crosspath_path::{FilePath, Provider};

/* 📖 # Why do sub views rewrite paths instead of copying entries?

A view returned by `FileSystem::sub` addresses the same storage as its parent: a MemoryFs view
shares the record map, a RealFs view points at the same directory on disk. Every caller path is
therefore mapped onto the parent's namespace by appending its segments to the view's root, and
every path handed back to the caller is mapped the other way.

Caller paths are taken as relative to the root. A leading separator or volume is ignored, and a
path whose `..` segments climb above the root is rejected.
*/

/// Root of a sub view, already cleaned.
#[derive(Debug, Clone)]
pub(crate) struct Scope {
    root: FilePath,
}

impl Scope {
    pub(crate) fn new(root: FilePath) -> Self {
        Self { root }
    }

    /// Maps a caller path below the root.
    pub(crate) fn enter(
        &self,
        provider: &Provider,
        op: &'static str,
        path: &str,
    ) -> CrosspathResult<FilePath> {
        let parsed = provider.parse(path)?;
        let inner = provider.clean_path(&FilePath::relative(parsed.segments().iter().cloned()));
        if inner.segments().first().is_some_and(|segment| segment == "..") {
            return Err(Box::new(CrosspathError::invalid_operation(
                op,
                path,
                "path escapes the sub filesystem",
            )));
        }
        Ok(provider.clean_path(&self.root.join(&inner)))
    }

    /// Maps a path of the parent namespace back to one relative to the root.
    ///
    /// Returns `None` for paths outside the root. The root itself maps to `.`.
    pub(crate) fn leave(&self, provider: &Provider, path: &FilePath) -> Option<FilePath> {
        let relative = self.root.rel(path, provider.comparison()).ok()?;
        if relative.segments().first().is_some_and(|segment| segment == "..") {
            return None;
        }
        Some(relative)
    }
}
