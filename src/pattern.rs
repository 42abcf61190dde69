use crate::error::PatternError;
use crate::params::{ParamValue, Params};

/// A single compiled pattern segment.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// A literal segment, matched byte-for-byte.
    Literal(String),
    /// `:name` — captures exactly one path component.
    Param(String),
    /// `:name+` — captures one or more trailing components.
    CatchAll(String),
}

/// A compiled route pattern.
///
/// Patterns are `/`-separated. A segment starting with `:` is a named
/// parameter; a `+` suffix turns it into a catch-all that consumes the
/// rest of the path. Everything else is matched literally.
///
/// ```rust
/// use mimir_router::Pattern;
///
/// let pattern = Pattern::parse("view/:path+").unwrap();
///
/// assert!(pattern.matches("view/docs/guide.mimir").is_some());
/// assert!(pattern.matches("view").is_none());
/// assert!(pattern.matches("edit/docs").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Pattern {
    raw: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Compiles a pattern string.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let parts: Vec<&str> = pattern.split('/').collect();
        let mut segments = Vec::with_capacity(parts.len());

        for (i, part) in parts.iter().enumerate() {
            let segment = match part.strip_prefix(':') {
                Some(param) => match param.strip_suffix('+') {
                    Some(name) => {
                        if name.is_empty() {
                            return Err(PatternError::UnnamedParam);
                        }
                        if i != parts.len() - 1 {
                            return Err(PatternError::InvalidCatchAll);
                        }
                        Segment::CatchAll(name.to_string())
                    }
                    None => {
                        if param.is_empty() {
                            return Err(PatternError::UnnamedParam);
                        }
                        Segment::Param(param.to_string())
                    }
                },
                None => Segment::Literal(part.to_string()),
            };
            segments.push(segment);
        }

        Ok(Pattern {
            raw: pattern.to_string(),
            segments,
        })
    }

    /// Returns the pattern string this was compiled from.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Matches a URL against the pattern, returning the extracted
    /// parameters on success.
    ///
    /// Matching is exact: every component of the URL must be consumed by a
    /// segment, and every segment must consume a component. Captured
    /// components are percent-decoded; a malformed escape sequence fails
    /// the match instead of panicking. Literal segments compare against the
    /// raw, undecoded component.
    pub fn matches(&self, url: &str) -> Option<Params> {
        let components: Vec<&str> = url.split('/').collect();
        let mut params = Params::new();
        let mut i = 0;

        for segment in &self.segments {
            match segment {
                Segment::Literal(literal) => {
                    let component = components.get(i).copied()?;
                    if component != literal.as_str() {
                        return None;
                    }
                    i += 1;
                }
                Segment::Param(name) => {
                    let component = components.get(i).copied()?;
                    if component.is_empty() {
                        return None;
                    }
                    params.push(name, ParamValue::Single(decode(component)?));
                    i += 1;
                }
                Segment::CatchAll(name) => {
                    if i >= components.len() {
                        return None;
                    }
                    let mut rest = Vec::with_capacity(components.len() - i);
                    for component in &components[i..] {
                        if component.is_empty() {
                            return None;
                        }
                        rest.push(decode(component)?);
                    }
                    i = components.len();
                    params.push(name, ParamValue::Many(rest));
                }
            }
        }

        if i != components.len() {
            return None;
        }

        Some(params)
    }
}

// Percent-decodes a single path component. The decoder passes malformed
// escapes through untouched, so reject them up front; a decode to invalid
// UTF-8 also fails.
fn decode(component: &str) -> Option<String> {
    let bytes = component.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            match (bytes.get(i + 1), bytes.get(i + 2)) {
                (Some(hi), Some(lo)) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => i += 3,
                _ => return None,
            }
        } else {
            i += 1;
        }
    }

    urlencoding::decode(component)
        .ok()
        .map(|decoded| decoded.into_owned())
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Pattern {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unnamed_param() {
        assert_eq!(Pattern::parse(":"), Err(PatternError::UnnamedParam));
        assert_eq!(Pattern::parse("edit/:"), Err(PatternError::UnnamedParam));
        assert_eq!(Pattern::parse(":+"), Err(PatternError::UnnamedParam));
    }

    #[test]
    fn catch_all_must_be_last() {
        assert_eq!(
            Pattern::parse("edit/:path+/extra"),
            Err(PatternError::InvalidCatchAll)
        );
        assert_eq!(
            Pattern::parse(":path+/x"),
            Err(PatternError::InvalidCatchAll)
        );
    }

    #[test]
    fn raw_round_trip() {
        let pattern = Pattern::parse("edit/:path+").unwrap();
        assert_eq!(pattern.as_str(), "edit/:path+");
    }
}
