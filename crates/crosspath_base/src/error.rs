use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;

use tracing_error::{SpanTrace, SpanTraceStatus};

/* 📖 # Why a custom error type and not use anyhow/eyre/thiserror etc?

- Better control over error handling
- No dependencies to compile and integrate
- More transparency into error handling logic
- Path operations need structured variants (cross-volume, unresolvable parent, ...) that callers
  match on, not just a message
 */

/// What went wrong while parsing, relating or storing a path.
#[derive(Debug)]
pub enum ErrorKind {
    /// A raw path string could not be parsed
    Parse { path: String, reason: String },

    /// A virtual filesystem lookup missed
    NotFound { path: String },

    /// The operation is not valid for the target (reading a directory, negative seek, closed handle)
    InvalidOperation {
        op: &'static str,
        path: String,
        reason: String,
    },

    /// Relative path requested between paths that do not share a root
    CrossVolume { source: String, target: String },

    /// Relative path requested where a `..` in the source cannot be resolved lexically
    UnresolvableParent { source: String, target: String },

    /// Directory creation without an existing ancestor
    ParentMissing { path: String, parent: String },

    /// File system operation on the real disk failed
    FileError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Several independent failures, e.g. more than one element of a join failed to parse
    Multiple {
        errors: Vec<CrosspathError>,
        count: usize,
    },

    /// Configuration and other failures described by a message
    Message { message: String },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Parse { path, reason } => {
                write!(f, "Invalid path '{}': {}", path.escape_debug(), reason)
            }
            ErrorKind::NotFound { path } => write!(f, "Path not found: {}", path),
            ErrorKind::InvalidOperation { op, path, reason } => {
                write!(f, "Invalid operation '{}' on {}: {}", op, path, reason)
            }
            ErrorKind::CrossVolume { source, target } => write!(
                f,
                "Cannot make '{}' relative to '{}': paths do not share a root",
                target, source
            ),
            ErrorKind::UnresolvableParent { source, target } => write!(
                f,
                "Cannot make '{}' relative to '{}': parent reference cannot be resolved lexically",
                target, source
            ),
            ErrorKind::ParentMissing { path, parent } => write!(
                f,
                "Cannot create '{}': parent '{}' does not exist",
                path, parent
            ),
            ErrorKind::FileError { path, source } => {
                write!(f, "File error at {}: {}", path.display(), source)
            }
            ErrorKind::Multiple { errors, count } => match errors.first() {
                Some(first) => write!(f, "Multiple errors occurred ({} total): {}", count, first),
                None => write!(f, "Multiple errors occurred ({} total)", count),
            },
            ErrorKind::Message { message } => write!(f, "{}", message),
        }
    }
}

/* 📖 # Why separate ErrorKind and CrosspathError?
This two-layer design provides a clear separation of concerns:
- ErrorKind: structural variants with specific contexts (paths, operations, ...)
- CrosspathError: wraps ErrorKind with runtime context strings, an optional cause and the span
  trace active when the error was created

Users can pattern match on ErrorKind for specific handling, while CrosspathError provides
ergonomic context attachment for propagation.
*/

/// An ErrorKind plus the contexts and cause collected while it propagated.
/// CrosspathError implements the standard Error trait and supports context attachment.
pub struct CrosspathError {
    kind: ErrorKind,
    context: Vec<String>,
    cause: Option<Box<CrosspathError>>,
    span_trace: SpanTrace,
}

impl CrosspathError {
    /// Creates a new error from an ErrorKind, capturing the current span trace.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: vec![],
            cause: None,
            span_trace: SpanTrace::capture(),
        }
    }

    /// Creates a catch-all error with a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Message {
            message: message.into(),
        })
    }

    pub fn parse(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::Parse {
            path: path.into(),
            reason: reason.into(),
        })
    }

    pub fn not_found(path: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound { path: path.into() })
    }

    pub fn invalid_operation(
        op: &'static str,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::InvalidOperation {
            op,
            path: path.into(),
            reason: reason.into(),
        })
    }

    pub fn cross_volume(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(ErrorKind::CrossVolume {
            source: source.into(),
            target: target.into(),
        })
    }

    pub fn unresolvable_parent(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnresolvableParent {
            source: source.into(),
            target: target.into(),
        })
    }

    pub fn parent_missing(path: impl Into<String>, parent: impl Into<String>) -> Self {
        Self::new(ErrorKind::ParentMissing {
            path: path.into(),
            parent: parent.into(),
        })
    }

    pub fn file_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::new(ErrorKind::FileError {
            path: path.into(),
            source,
        })
    }

    /// Bundles several errors into one, keeping the total count.
    pub fn multiple(errors: Vec<CrosspathError>) -> Self {
        let count = errors.len();
        Self::new(ErrorKind::Multiple { errors, count })
    }

    /// Pushes a context line, usually naming the operation that was running.
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Like `context`, with the line built by a closure.
    pub fn with_context<F>(mut self, f: F) -> Self
    where
        F: FnOnce() -> String,
    {
        self.context.push(f());
        self
    }

    /// Records the error that led to this one.
    pub fn caused_by(mut self, cause: CrosspathError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// The kind, for matching on specific failures such as `CrossVolume`.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the context strings in the order they were attached.
    pub fn get_context(&self) -> &[String] {
        &self.context
    }

    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    pub fn is_not_found(&self) -> bool {
        match &self.kind {
            ErrorKind::NotFound { .. } => true,
            ErrorKind::FileError { source, .. } => source.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }

    /// Follows `source()` to the innermost error; for disk failures this is the io::Error.
    pub fn root_cause(&self) -> &(dyn StdError + 'static) {
        let mut current: &(dyn StdError + 'static) = self;
        while let Some(next) = current.source() {
            current = next;
        }
        current
    }

    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: &str) -> fmt::Result {
        let entries = self.context.len() + usize::from(self.cause.is_some());
        for (i, ctx) in self.context.iter().enumerate() {
            let branch = if i + 1 == entries { "└─" } else { "├─" };
            writeln!(f, "{}{} {}", indent, branch, ctx)?;
        }
        if let Some(cause) = &self.cause {
            writeln!(f, "{}└─ cause: {}", indent, cause.kind)?;
            cause.fmt_tree(f, &format!("{}   ", indent))?;
        }
        Ok(())
    }
}

impl From<ErrorKind> for CrosspathError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl StdError for CrosspathError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        if let Some(cause) = &self.cause {
            return Some(cause.as_ref());
        }
        match &self.kind {
            ErrorKind::FileError { source, .. } => Some(source),
            ErrorKind::Multiple { errors, .. } => errors.first().and_then(|e| e.source()),
            _ => None,
        }
    }
}

impl fmt::Display for CrosspathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display context first if present
        for (i, ctx) in self.context.iter().enumerate() {
            if i == 0 {
                write!(f, "{}", ctx)?;
            } else {
                write!(f, ": {}", ctx)?;
            }
        }

        // Add a separator if we have context
        if !self.context.is_empty() {
            write!(f, ": ")?;
        }

        write!(f, "{}", self.kind)
    }
}

/* 📖 # Why a hand-written Debug implementation?

The derived Debug output of nested kinds, contexts and span traces is unreadable in test
failures. The tree layout shows the message first, then its contexts and causes, then the spans
that were active when the error was created.
*/
impl fmt::Debug for CrosspathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.kind)?;
        self.fmt_tree(f, "")?;
        if self.span_trace.status() == SpanTraceStatus::CAPTURED {
            writeln!(f, "Trace: {}", self.span_trace)?;
        }
        Ok(())
    }
}

impl From<Box<CrosspathError>> for io::Error {
    fn from(error: Box<CrosspathError>) -> Self {
        let kind = match error.kind() {
            ErrorKind::NotFound { .. } => io::ErrorKind::NotFound,
            ErrorKind::FileError { source, .. } => source.kind(),
            ErrorKind::Parse { .. } | ErrorKind::InvalidOperation { .. } => {
                io::ErrorKind::InvalidInput
            }
            _ => io::ErrorKind::Other,
        };
        io::Error::new(kind, error)
    }
}

/* 📖 # Why use Box<CrosspathError> in the result type?

Boxing the error reduces the size of the result type, making it more efficient to return in the common case.

*/

/// Standard result type for crosspath operations.
pub type CrosspathResult<T> = std::result::Result<T, Box<CrosspathError>>;

/// Adds context to a failing CrosspathResult on its way up.
pub trait ResultExt<T> {
    /// Adds a fixed context line to the error, if any.
    fn context(self, context: impl Into<String>) -> CrosspathResult<T>;

    /// Adds a context line built only when the result is an error.
    fn with_context<F>(self, f: F) -> CrosspathResult<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for CrosspathResult<T> {
    fn context(self, context: impl Into<String>) -> CrosspathResult<T> {
        self.map_err(|err| Box::new(err.context(context)))
    }

    fn with_context<F>(self, f: F) -> CrosspathResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|err| Box::new(err.with_context(f)))
    }
}

/// Creates a boxed message error from format arguments.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        Box::new($crate::CrosspathError::message(format!($($arg)*)))
    };
}

/// Returns early with a boxed message error.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::err!($($arg)*))
    };
}
