use std::fmt;

use crosspath_base::{CrosspathError, CrosspathResult};

use crate::comparison::Comparison;
use crate::volume::Volume;

/* 📖 # Why a structured FilePath instead of strings?

Paths arrive in three shapes (POSIX, drive letter and UNC) and are rendered with whichever
separator the caller wants. Keeping volume, absoluteness and segments apart lets clean, join,
dir, base and rel work the same way for every shape. Only parsing and rendering deal with
separators and prefixes.

FilePath is a pure value: no method touches the filesystem and every operation returns a new
path.
*/

pub const CURRENT_DIRECTORY: &str = ".";
pub const PARENT_DIRECTORY: &str = "..";
pub const EMPTY_SEGMENT: &str = "";

/// A parsed path: optional volume, absolute flag and the segments between separators.
///
/// Empty segments are significant: `a/` has the segments `["a", ""]` which is how a trailing
/// separator survives until the path is cleaned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilePath {
    volume: Volume,
    absolute: bool,
    segments: Vec<String>,
}

impl FilePath {
    pub fn new(volume: Volume, absolute: bool, segments: Vec<String>) -> Self {
        Self {
            volume,
            absolute,
            segments,
        }
    }

    /// A relative path without volume.
    pub fn relative<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            Volume::none(),
            false,
            segments.into_iter().map(Into::into).collect(),
        )
    }

    /// An absolute path without volume.
    pub fn absolute<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            Volume::none(),
            true,
            segments.into_iter().map(Into::into).collect(),
        )
    }

    /// The relative path `.`.
    pub fn current_directory() -> Self {
        Self::relative([CURRENT_DIRECTORY])
    }

    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_abs(&self) -> bool {
        self.absolute
    }

    pub fn is_rel(&self) -> bool {
        !self.absolute
    }

    /// The same volume and absoluteness without any segments.
    pub fn root(&self) -> FilePath {
        Self::new(self.volume.clone(), self.absolute, Vec::new())
    }

    /// Appends the segments of `other`; the volume and absoluteness of `other` are ignored.
    pub fn join(&self, other: &FilePath) -> FilePath {
        let mut joined = self.clone();
        joined.segments.extend(other.segments.iter().cloned());
        joined
    }

    /// Removes `.` and empty segments and resolves `..` lexically.
    ///
    /// `..` directly below an absolute root is dropped, leading `..` of a relative path are kept.
    /// A relative path that cleans down to nothing becomes `.`.
    pub fn clean(&self) -> FilePath {
        let mut cleaned = self.resolve_segments();
        if cleaned.segments.is_empty() && cleaned.is_rel() {
            cleaned.segments.push(CURRENT_DIRECTORY.to_string());
        }
        cleaned
    }

    fn resolve_segments(&self) -> FilePath {
        if self.segments.is_empty() {
            return self.clone();
        }
        // `\\host\share\` is already in its shortest form
        if self.volume.is_unc() && self.segments.len() == 1 && self.segments[0].is_empty() {
            return self.clone();
        }
        let mut resolved: Vec<String> = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match segment.as_str() {
                EMPTY_SEGMENT | CURRENT_DIRECTORY => {}
                PARENT_DIRECTORY => match resolved.last().map(String::as_str) {
                    Some(PARENT_DIRECTORY) => resolved.push(PARENT_DIRECTORY.to_string()),
                    Some(_) => {
                        resolved.pop();
                    }
                    None if self.absolute => {}
                    None => resolved.push(PARENT_DIRECTORY.to_string()),
                },
                _ => resolved.push(segment.clone()),
            }
        }
        Self::new(self.volume.clone(), self.absolute, resolved)
    }

    /// Computes the relative path that leads from `self` to `target`.
    ///
    /// Both paths are cleaned first. Fails when the paths do not share volume and absoluteness,
    /// or when reaching the target would require knowing the name of a directory that `self`
    /// only reaches through `..`.
    pub fn rel(&self, target: &FilePath, cmp: Comparison) -> CrosspathResult<FilePath> {
        let mut source = self.clean();
        let mut destination = target.clean();
        if source.equals(&destination, cmp) {
            return Ok(Self::current_directory());
        }
        source.drop_current_directory();
        destination.drop_current_directory();
        if source.absolute != destination.absolute
            || !source.volume.equals(&destination.volume, cmp)
        {
            return Err(Box::new(CrosspathError::cross_volume(
                self.to_string(),
                target.to_string(),
            )));
        }
        let common = source
            .segments
            .iter()
            .zip(destination.segments.iter())
            .take_while(|(from, to)| cmp.equals(from, to))
            .count();
        if source
            .segments
            .get(common)
            .is_some_and(|segment| segment == PARENT_DIRECTORY)
        {
            return Err(Box::new(CrosspathError::unresolvable_parent(
                self.to_string(),
                target.to_string(),
            )));
        }
        let mut segments: Vec<String> =
            vec![PARENT_DIRECTORY.to_string(); source.segments.len() - common];
        segments.extend(destination.segments[common..].iter().cloned());
        Ok(Self::new(Volume::none(), false, segments))
    }

    /// The parent of the last segment, cleaned.
    pub fn dir(&self) -> FilePath {
        let mut dir = self.clone();
        if let Some(last) = dir.segments.last_mut() {
            last.clear();
        }
        dir.clean()
    }

    /// The last non-empty segment as a relative path.
    ///
    /// An empty relative path, or one made only of empty segments, yields `.`; an absolute path
    /// without non-empty segments yields the bare root.
    pub fn base(&self) -> FilePath {
        match self.segments.iter().rev().find(|segment| !segment.is_empty()) {
            Some(last) => Self::relative([last.clone()]),
            None if self.is_rel() => Self::current_directory(),
            None => Self::absolute(Vec::<String>::new()),
        }
    }

    /// The suffix of the last segment starting at its final `.`.
    ///
    /// A dot in the first position marks a hidden file, not an extension.
    pub fn ext(&self) -> &str {
        let Some(last) = self.segments.last() else {
            return "";
        };
        match last.rfind('.') {
            None | Some(0) => "",
            Some(index) => &last[index..],
        }
    }

    /// The rendered volume prefix: `c:`, `<sep><sep>host<sep>share` or an empty string.
    pub fn volume_name(&self, separator: char) -> String {
        if let Some(drive) = self.volume.drive_letter() {
            return drive.to_string();
        }
        let mut name = String::new();
        if let Some(host) = self.volume.host() {
            name.push(separator);
            name.push(separator);
            name.push_str(host);
            if let Some(share) = self.volume.share() {
                name.push(separator);
                name.push_str(share);
            }
        }
        name
    }

    /// Renders the path with the given separator.
    pub fn render(&self, separator: char) -> String {
        let mut rendered = self.volume_name(separator);
        // A bare UNC root has no trailing separator
        if self.absolute && (!self.volume.is_unc() || !self.segments.is_empty()) {
            rendered.push(separator);
        }
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                rendered.push(separator);
            }
            rendered.push_str(segment);
        }
        rendered
    }

    /// Segment-by-segment equality under the given comparison.
    pub fn equals(&self, other: &FilePath, cmp: Comparison) -> bool {
        self.absolute == other.absolute
            && self.volume.equals(&other.volume, cmp)
            && self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(other.segments.iter())
                .all(|(first, second)| cmp.equals(first, second))
    }

    fn drop_current_directory(&mut self) {
        if self.segments.len() == 1 && self.segments[0] == CURRENT_DIRECTORY {
            self.segments.clear();
        }
    }
}

/// Renders with `/`; use [`FilePath::render`] for any other separator.
impl fmt::Display for FilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render('/'))
    }
}
