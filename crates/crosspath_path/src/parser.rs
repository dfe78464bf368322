use serde::Deserialize;
use tracing::trace;

use crosspath_base::{CrosspathError, CrosspathResult, Platform, ResultExt};

use crate::file_path::FilePath;
use crate::volume::Volume;

pub const FORWARD_SLASH: char = '/';
pub const BACKWARD_SLASH: char = '\\';
pub const COLON: char = ':';
pub const SEMICOLON: char = ';';

/// Which path grammar the parser accepts.
///
/// Only the Windows style recognizes drive letters and UNC prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathStyle {
    Posix,
    Windows,
}

impl PathStyle {
    pub fn for_platform(platform: Platform) -> Self {
        if platform.is_windows() {
            PathStyle::Windows
        } else {
            PathStyle::Posix
        }
    }

    /// The separator used when rendering paths.
    pub fn default_separator(&self) -> char {
        match self {
            PathStyle::Posix => FORWARD_SLASH,
            PathStyle::Windows => BACKWARD_SLASH,
        }
    }

    /// Every separator accepted when parsing.
    pub fn default_separators(&self) -> Vec<char> {
        match self {
            PathStyle::Posix => vec![FORWARD_SLASH],
            PathStyle::Windows => vec![BACKWARD_SLASH, FORWARD_SLASH],
        }
    }

    pub fn default_list_separator(&self) -> char {
        match self {
            PathStyle::Posix => COLON,
            PathStyle::Windows => SEMICOLON,
        }
    }
}

/// Turns path strings into [`FilePath`] values.
///
/// ```
/// use crosspath_path::{Parser, PathStyle};
///
/// let parser = Parser::new(PathStyle::Windows);
/// let path = parser.parse(r"\\host\share\dir").unwrap();
/// assert_eq!(path.volume().host(), Some("host"));
/// assert_eq!(path.segments(), ["dir"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parser {
    style: PathStyle,
    list_separator: char,
    separators: Vec<char>,
}

impl Parser {
    pub fn new(style: PathStyle) -> Self {
        Self {
            style,
            list_separator: style.default_list_separator(),
            separators: style.default_separators(),
        }
    }

    pub fn for_platform(platform: Platform) -> Self {
        Self::new(PathStyle::for_platform(platform))
    }

    pub fn with_list_separator(mut self, list_separator: char) -> Self {
        self.list_separator = list_separator;
        self
    }

    pub fn with_separators(mut self, separators: impl IntoIterator<Item = char>) -> Self {
        self.separators = separators.into_iter().collect();
        self
    }

    pub fn style(&self) -> PathStyle {
        self.style
    }

    pub fn list_separator(&self) -> char {
        self.list_separator
    }

    pub fn separators(&self) -> &[char] {
        &self.separators
    }

    /// Parses a single path.
    ///
    /// Parsing is total for every string without a NUL character: anything that is not a UNC
    /// or drive path is read as a plain POSIX-shaped path.
    pub fn parse(&self, path: &str) -> CrosspathResult<FilePath> {
        if path.contains('\0') {
            return Err(Box::new(CrosspathError::parse(
                path,
                "path contains a NUL character",
            )));
        }
        let parsed = if let Some(rest) = self.unc_remainder(path) {
            trace!(path, form = "unc", "Parsing path");
            self.parse_unc(rest)
        } else if self.has_drive(path) {
            trace!(path, form = "drive", "Parsing path");
            self.parse_drive(path)
        } else {
            trace!(path, form = "plain", "Parsing path");
            self.parse_plain(path)
        };
        Ok(parsed)
    }

    /// Splits a path list at the list separator and parses every entry.
    ///
    /// Empty entries are kept as empty relative paths, so `a::b` yields three paths.
    pub fn parse_list(&self, list: &str) -> CrosspathResult<Vec<FilePath>> {
        list.split(self.list_separator)
            .enumerate()
            .map(|(index, entry)| {
                self.parse(entry)
                    .with_context(|| format!("Failed to parse entry {} of path list", index))
            })
            .collect()
    }

    fn is_separator(&self, c: char) -> bool {
        self.separators.contains(&c)
    }

    /// Splits at every separator, keeping the empty segments between adjacent separators.
    fn split(&self, path: &str) -> Vec<String> {
        if path.is_empty() {
            return Vec::new();
        }
        path.split(|c| self.is_separator(c))
            .map(str::to_string)
            .collect()
    }

    /// Returns what follows the two leading separators of a UNC path.
    fn unc_remainder<'a>(&self, path: &'a str) -> Option<&'a str> {
        if self.style != PathStyle::Windows {
            return None;
        }
        let mut chars = path.char_indices();
        match (chars.next(), chars.next(), chars.next()) {
            (Some((_, first)), Some((_, second)), Some((rest, _)))
                if self.is_separator(first) && self.is_separator(second) =>
            {
                Some(&path[rest..])
            }
            _ => None,
        }
    }

    /// True when the path starts with a drive letter and colon (Windows style only).
    pub(crate) fn has_drive(&self, path: &str) -> bool {
        let bytes = path.as_bytes();
        self.style == PathStyle::Windows
            && bytes.len() >= 2
            && bytes[0].is_ascii_alphabetic()
            && bytes[1] == COLON as u8
    }

    fn parse_unc(&self, rest: &str) -> FilePath {
        let mut segments = self.split(rest).into_iter();
        let host = segments.next().unwrap_or_default();
        let share = segments.next();
        FilePath::new(Volume::unc(host, share), true, segments.collect())
    }

    fn parse_drive(&self, path: &str) -> FilePath {
        let (drive, rest) = path.split_at(2);
        let absolute = rest.chars().next().is_some_and(|c| self.is_separator(c));
        let mut segments = self.split(rest);
        if segments.len() > 1 && segments[0].is_empty() {
            segments.remove(0);
        }
        FilePath::new(Volume::drive(drive), absolute, segments)
    }

    fn parse_plain(&self, path: &str) -> FilePath {
        let absolute = path.chars().next().is_some_and(|c| self.is_separator(c));
        let mut segments = self.split(path);
        if absolute {
            segments.remove(0);
            // the bare root
            if segments.len() == 1 && segments[0].is_empty() {
                segments.clear();
            }
        }
        FilePath::new(Volume::none(), absolute, segments)
    }
}
