use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for fabrik-parse operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Bundles the source content and filename so error construction sites
/// don't have to thread both around.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a syntax error without a span.
    pub fn syntax_error(&self, message: impl Into<String>) -> Box<Error> {
        Box::new(Error::Syntax {
            src: self.named_source(),
            span: None,
            message: message.into(),
        })
    }

    /// Create a syntax error with a span.
    pub fn syntax_error_at(
        &self,
        message: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Syntax {
            src: self.named_source(),
            span: Some(span.into()),
            message: message.into(),
        })
    }

    /// Create a field error with a span.
    pub fn field_error_at(
        &self,
        decl: impl Into<String>,
        message: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Field {
            src: self.named_source(),
            span: Some(span.into()),
            decl: decl.into(),
            message: message.into(),
        })
    }

    /// Create a duplicate declaration error.
    pub fn duplicate_error(
        &self,
        name: impl Into<String>,
        first_source: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::DuplicateDeclaration {
            src: self.named_source(),
            span,
            name: name.into(),
            first_source: first_source.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("check that the path exists and points to a Go source file"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(fabrik::syntax_error))]
    Syntax {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("invalid field in declaration '{decl}': {message}")]
    #[diagnostic(code(fabrik::field_error))]
    Field {
        #[source_code]
        src: NamedSource<String>,
        #[label("cannot parse this field")]
        span: Option<SourceSpan>,
        decl: String,
        message: String,
    },

    #[error("declaration '{name}' defined more than once")]
    #[diagnostic(
        code(fabrik::duplicate_declaration),
        help("the first definition came from '{first_source}'; builder names are keyed by declaration name, so each name must be unique across the batch")
    )]
    DuplicateDeclaration {
        #[source_code]
        src: NamedSource<String>,
        #[label("second definition here")]
        span: Option<SourceSpan>,
        name: String,
        first_source: String,
    },
}

impl Error {
    /// Create an I/O error for a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.into(),
            source,
        })
    }
}
