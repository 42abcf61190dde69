use std::fmt;
use std::slice;

/// The value captured by a single route parameter.
///
/// A `:name` segment captures exactly one path component; a `:name+`
/// catch-all captures every remaining component, in path order.
#[derive(Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// A single path component, URL-decoded.
    Single(String),
    /// One or more trailing path components, each URL-decoded.
    Many(Vec<String>),
}

impl ParamValue {
    /// Returns the component for a single-segment parameter.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Single(value) => Some(value),
            ParamValue::Many(_) => None,
        }
    }

    /// Returns the captured components for a catch-all parameter.
    pub fn as_many(&self) -> Option<&[String]> {
        match self {
            ParamValue::Single(_) => None,
            ParamValue::Many(values) => Some(values),
        }
    }
}

impl fmt::Debug for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Single(value) => fmt::Debug::fmt(value, f),
            ParamValue::Many(values) => f.debug_list().entries(values).finish(),
        }
    }
}

/// The parameters extracted by a route match.
///
/// The list is ordered: the first parameter in the pattern is also the
/// first entry here.
///
/// ```rust
/// # fn main() -> Result<(), mimir_router::PatternError> {
/// let pattern = mimir_router::Pattern::parse("edit/:path+")?;
/// let params = pattern.matches("edit/docs/a.mimir").unwrap();
///
/// assert_eq!(
///     params.get_many("path"),
///     Some(&["docs".to_string(), "a.mimir".to_string()][..]),
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Params {
    inner: Vec<(String, ParamValue)>,
}

impl Params {
    pub(crate) fn new() -> Self {
        Params { inner: Vec::new() }
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if no parameters were captured.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the component captured by the single-segment parameter
    /// registered under the given name.
    pub fn get(&self, name: impl AsRef<str>) -> Option<&str> {
        self.value(name).and_then(ParamValue::as_str)
    }

    /// Returns the components captured by the catch-all parameter
    /// registered under the given name.
    pub fn get_many(&self, name: impl AsRef<str>) -> Option<&[String]> {
        self.value(name).and_then(ParamValue::as_many)
    }

    /// Returns the raw value of the first parameter with the given name.
    pub fn value(&self, name: impl AsRef<str>) -> Option<&ParamValue> {
        let name = name.as_ref();
        self.inner
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Returns an iterator over the parameters, in pattern order.
    pub fn iter(&self) -> ParamsIter<'_> {
        ParamsIter {
            inner: self.inner.iter(),
        }
    }

    pub(crate) fn push(&mut self, name: &str, value: ParamValue) {
        self.inner.push((name.to_string(), value));
    }
}

impl fmt::Debug for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.inner.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

/// An iterator over the names and values of a route's [parameters](Params).
pub struct ParamsIter<'p> {
    inner: slice::Iter<'p, (String, ParamValue)>,
}

impl<'p> Iterator for ParamsIter<'p> {
    type Item = (&'p str, &'p ParamValue);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| (key.as_str(), value))
    }
}

impl ExactSizeIterator for ParamsIter<'_> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}
