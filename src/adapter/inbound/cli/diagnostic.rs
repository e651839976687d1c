//! Miette-based error diagnostics for CLI error presentation.
//!
//! Configuration parse errors are rendered with the offending file content
//! and a label pointing at the bad span.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::error::{ConfigError, Error};

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(waterfill::config))]
pub struct ConfigDiagnostic {
    /// Human-readable error message.
    pub message: String,

    /// Configuration file content.
    #[source_code]
    pub src: NamedSource<String>,

    /// Byte offset and length of the problematic region.
    #[label("here")]
    pub span: SourceSpan,

    /// Optional help text with suggestions for fixing the error.
    #[help]
    pub help: Option<String>,
}

impl ConfigDiagnostic {
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        name: impl AsRef<str>,
        src: impl Into<String>,
        offset: usize,
        len: usize,
    ) -> Self {
        Self {
            message: message.into(),
            src: NamedSource::new(name, src.into()),
            span: (offset, len).into(),
            help: None,
        }
    }

    /// Add a help suggestion to the error.
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Build a source-annotated diagnostic for a TOML parse error, if the error
/// carries a location.
#[must_use]
pub fn from_config_error(err: &Error, name: &str, content: &str) -> Option<ConfigDiagnostic> {
    let Error::Config(ConfigError::Parse(parse)) = err else {
        return None;
    };
    let span = parse.span()?;
    Some(
        ConfigDiagnostic::new(
            parse.message(),
            name,
            content,
            span.start,
            span.end.saturating_sub(span.start),
        )
        .with_help("see `waterfill config init` for a documented template"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::settings::Config;

    #[test]
    fn test_parse_errors_get_a_span() {
        let content = "[solver]\ntolerance = = 1\n";
        let err = Config::parse_toml(content).unwrap_err();

        let diagnostic = from_config_error(&err, "waterfill.toml", content).unwrap();

        assert!(diagnostic.span.offset() >= "[solver]\n".len());
        assert!(diagnostic.help.is_some());
    }

    #[test]
    fn test_validation_errors_have_no_span() {
        let content = "[solver]\nmax_iterations = 0\n";
        let err = Config::parse_toml(content).unwrap_err();
        assert!(from_config_error(&err, "waterfill.toml", content).is_none());
    }
}
