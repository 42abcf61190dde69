use std::fmt;

/// Represents errors that can occur when compiling a route pattern.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum PatternError {
    /// Parameters must be registered with a name (`:name` or `:name+`).
    UnnamedParam,
    /// Catch-all parameters are only allowed as the final segment.
    InvalidCatchAll,
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnnamedParam => write!(f, "parameters must be registered with a name"),
            Self::InvalidCatchAll => write!(
                f,
                "catch-all parameters are only allowed at the end of a pattern"
            ),
        }
    }
}

impl std::error::Error for PatternError {}
