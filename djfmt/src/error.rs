use std::{error::Error, fmt};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
/// Error from the pattern engine.
///
/// Patterns that fail to compile are never stored in a [`PatternCache`](crate::pattern::PatternCache).
pub enum PatternError {
    #[error("invalid pattern `{pattern}`: {message}")]
    Compile { pattern: String, message: String },
    #[error("failed to run pattern `{pattern}`: {message}")]
    Execution { pattern: String, message: String },
}

impl PatternError {
    pub(crate) fn compile(pattern: &str, error: fancy_regex::Error) -> Self {
        PatternError::Compile {
            pattern: pattern.to_owned(),
            message: error.to_string(),
        }
    }

    pub(crate) fn execution(pattern: &str, error: fancy_regex::Error) -> Self {
        PatternError::Execution {
            pattern: pattern.to_owned(),
            message: error.to_string(),
        }
    }

    /// Source text of the pattern that failed.
    pub fn pattern(&self) -> &str {
        match self {
            PatternError::Compile { pattern, .. } | PatternError::Execution { pattern, .. } => {
                pattern
            }
        }
    }
}

#[derive(Debug)]
/// The error type for djfmt.
pub enum FormatError<E> {
    /// A pattern failed to compile or to run.
    Pattern(PatternError),
    /// Error from the external beautifier, together with the code it was given.
    External(E, String),
}

impl<E> From<PatternError> for FormatError<E> {
    fn from(error: PatternError) -> Self {
        FormatError::Pattern(error)
    }
}

impl<E> fmt::Display for FormatError<E>
where
    E: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::Pattern(e) => e.fmt(f),
            FormatError::External(e, code) => write!(
                f,
                "failed to format code with external beautifier: `{code}`:\n{e}"
            ),
        }
    }
}

impl<E> Error for FormatError<E>
where
    E: Error + 'static,
{
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FormatError::Pattern(e) => Some(e),
            FormatError::External(e, _) => Some(e),
        }
    }
}
