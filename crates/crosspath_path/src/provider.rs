use tracing::{debug, instrument};

use crosspath_base::{CrosspathError, CrosspathResult, PalHandle, Platform, ResultExt, bail};

use crate::comparison::Comparison;
use crate::config::ProviderConfig;
use crate::file_path::{CURRENT_DIRECTORY, FilePath};
use crate::parser::{Parser, PathStyle};

/* 📖 # Why a Provider facade over FilePath?

Callers hold path strings, not FilePath values. The provider bundles the parser, the render
separator and the comparison mode of one platform so string-in/string-out operations behave
like the native path library of that platform, even when the process runs somewhere else.

The working directory for `abs` comes from the PAL, which keeps the provider testable with
MockPal.
*/

/// String-level path operations for one platform.
///
/// ```
/// use crosspath_base::{MockPal, PalHandle, Platform};
/// use crosspath_path::Provider;
///
/// let provider = Provider::new(PalHandle::new(MockPal::new().with_platform(Platform::Windows)));
/// assert_eq!(provider.join(&["c:/", "Users", "..", "tmp"]).unwrap(), r"c:\tmp");
/// ```
#[derive(Debug, Clone)]
pub struct Provider {
    pal: PalHandle,
    parser: Parser,
    separator: char,
    comparison: Comparison,
}

impl Provider {
    /// A provider using the defaults of the platform reported by the PAL.
    pub fn new(pal: PalHandle) -> Self {
        let platform = pal.platform();
        let style = PathStyle::for_platform(platform);
        Self {
            pal,
            parser: Parser::new(style),
            separator: style.default_separator(),
            comparison: Comparison::for_platform(platform),
        }
    }

    /// A provider for the platform of the running process.
    pub fn from_os() -> Self {
        Self::new(PalHandle::new(crosspath_base::RealPal::new()))
    }

    /// Applies configuration overrides on top of the platform defaults.
    pub fn from_config(pal: PalHandle, config: &ProviderConfig) -> CrosspathResult<Self> {
        let platform = config.platform.unwrap_or_else(|| pal.platform());
        let style = PathStyle::for_platform(platform);
        let mut parser = Parser::new(style);
        if let Some(list_separator) = config.list_separator {
            parser = parser.with_list_separator(list_separator);
        }
        if parser.separators().contains(&parser.list_separator()) {
            bail!(
                "List separator '{}' is also a path separator",
                parser.list_separator()
            );
        }
        let separator = config.separator.unwrap_or(style.default_separator());
        if !parser.separators().contains(&separator) {
            bail!(
                "Separator '{}' is not accepted by the {:?} parser",
                separator,
                style
            );
        }
        debug!(%platform, ?style, %separator, "Configured path provider");
        Ok(Self {
            pal,
            parser,
            separator,
            comparison: config
                .comparison
                .unwrap_or_else(|| Comparison::for_platform(platform)),
        })
    }

    pub fn with_parser(mut self, parser: Parser) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_comparison(mut self, comparison: Comparison) -> Self {
        self.comparison = comparison;
        self
    }

    pub fn pal(&self) -> &PalHandle {
        &self.pal
    }

    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn comparison(&self) -> Comparison {
        self.comparison
    }

    pub fn style(&self) -> PathStyle {
        self.parser.style()
    }

    pub fn platform(&self) -> Platform {
        self.pal.platform()
    }

    pub fn parse(&self, path: &str) -> CrosspathResult<FilePath> {
        self.parser.parse(path)
    }

    pub fn parse_list(&self, list: &str) -> CrosspathResult<Vec<FilePath>> {
        self.parser.parse_list(list)
    }

    pub fn render(&self, path: &FilePath) -> String {
        path.render(self.separator)
    }

    /// Cleans a path; a Windows relative result whose first segment looks like a drive gets a
    /// `.` prefix so it cannot be read back as a drive path.
    pub fn clean_path(&self, path: &FilePath) -> FilePath {
        let cleaned = path.clean();
        if self.style() == PathStyle::Windows
            && cleaned.is_rel()
            && cleaned.volume().is_empty()
            && cleaned
                .segments()
                .first()
                .is_some_and(|segment| self.parser.has_drive(segment))
        {
            let mut segments = vec![CURRENT_DIRECTORY.to_string()];
            segments.extend(cleaned.segments().iter().cloned());
            return FilePath::relative(segments);
        }
        cleaned
    }

    pub fn clean(&self, path: &str) -> CrosspathResult<String> {
        let parsed = self.parse(path)?;
        Ok(self.render(&self.clean_path(&parsed)))
    }

    /// Joins the non-empty elements and cleans the result.
    ///
    /// Every element is parsed before failing; several parse failures are reported together.
    #[instrument(level = "trace", skip(self, elements))]
    pub fn join<S: AsRef<str>>(&self, elements: &[S]) -> CrosspathResult<String> {
        let mut errors = Vec::new();
        let mut joined: Option<FilePath> = None;
        for element in elements.iter().map(AsRef::as_ref) {
            if element.is_empty() {
                continue;
            }
            match self.parse(element) {
                Ok(next) => {
                    joined = Some(match joined {
                        Some(accumulated) => accumulated.join(&next),
                        None => next,
                    })
                }
                Err(error) => errors.push(*error),
            }
        }
        match errors.len() {
            0 => {}
            1 => return Err(Box::new(errors.remove(0))),
            _ => return Err(Box::new(CrosspathError::multiple(errors))),
        }
        Ok(joined
            .map(|path| self.render(&self.clean_path(&path)))
            .unwrap_or_default())
    }

    /// The shortest relative path from `source` to `target`.
    #[instrument(level = "trace", skip(self))]
    pub fn rel(&self, source: &str, target: &str) -> CrosspathResult<String> {
        let from = self.parse(source)?;
        let to = self.parse(target)?;
        match from.rel(&to, self.comparison) {
            Ok(relative) => Ok(self.render(&relative)),
            Err(error) => {
                debug!(source, target, "Cannot compute relative path");
                Err(error)
            }
        }
    }

    /// Makes a path absolute against the PAL working directory, then cleans it.
    #[instrument(level = "trace", skip(self))]
    pub fn abs(&self, path: &str) -> CrosspathResult<String> {
        let parsed = self.parse(path)?;
        if parsed.is_abs() {
            return Ok(self.render(&parsed.clean()));
        }
        let working_directory = self.pal.working_directory()?;
        let base = self
            .parse(&working_directory)
            .with_context(|| format!("Invalid working directory '{}'", working_directory))?;
        Ok(self.render(&self.clean_path(&base.join(&parsed))))
    }

    pub fn root(&self, path: &str) -> CrosspathResult<String> {
        Ok(self.render(&self.parse(path)?.root()))
    }

    pub fn dir(&self, path: &str) -> CrosspathResult<String> {
        Ok(self.render(&self.parse(path)?.dir()))
    }

    pub fn base(&self, path: &str) -> CrosspathResult<String> {
        Ok(self.render(&self.parse(path)?.base()))
    }

    pub fn ext(&self, path: &str) -> CrosspathResult<String> {
        Ok(self.parse(path)?.ext().to_string())
    }

    pub fn volume_name(&self, path: &str) -> CrosspathResult<String> {
        Ok(self.parse(path)?.volume_name(self.separator))
    }

    pub fn is_abs(&self, path: &str) -> CrosspathResult<bool> {
        Ok(self.parse(path)?.is_abs())
    }

    /// Splits a path into its directory (with trailing separator) and its final element.
    pub fn split(&self, path: &str) -> CrosspathResult<(String, String)> {
        let parsed = self.parse(path)?;
        let file = match parsed.segments().last() {
            Some(last) => last.clone(),
            None => return Ok((self.render(&parsed), String::new())),
        };
        let mut directory = self.render(&parsed);
        directory.truncate(directory.len() - file.len());
        Ok((directory, file))
    }

    /// A canonical key: the cleaned rendering, case-folded when comparisons ignore case.
    ///
    /// Two paths naming the same entry under this provider normalize to the same string.
    pub fn normalize(&self, path: &str) -> CrosspathResult<String> {
        let parsed = self.parse(path)?;
        Ok(self
            .comparison
            .fold(&self.render(&self.clean_path(&parsed))))
    }

    /// Normalizes an already parsed path.
    pub fn normalize_path(&self, path: &FilePath) -> String {
        self.comparison.fold(&self.render(&self.clean_path(path)))
    }

    pub fn equals(&self, first: &str, second: &str) -> CrosspathResult<bool> {
        let first = self.clean_path(&self.parse(first)?);
        let second = self.clean_path(&self.parse(second)?);
        Ok(first.equals(&second, self.comparison))
    }
}
