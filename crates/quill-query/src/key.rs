//! Structured cache keys.
//!
//! A key is an ordered list of scalar segments, e.g. `["abTests", "ab-42"]`.
//! Prefix matching is segment-wise: `["abTests"]` matches `["abTests"]` and
//! `["abTests", "ab-42"]`, but not `["abTestsArchive"]`.

use std::fmt;

/// One scalar segment of a [`QueryKey`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeySegment {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl fmt::Display for KeySegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for KeySegment {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for KeySegment {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for KeySegment {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<i64> for KeySegment {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for KeySegment {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for KeySegment {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<bool> for KeySegment {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Identity of a cached query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<KeySegment>);

impl QueryKey {
    /// Key with a single root segment, usually the resource name.
    pub fn new(root: impl Into<KeySegment>) -> Self {
        Self(vec![root.into()])
    }

    #[must_use]
    pub const fn from_segments(segments: Vec<KeySegment>) -> Self {
        Self(segments)
    }

    /// Append a segment.
    #[must_use]
    pub fn with(mut self, segment: impl Into<KeySegment>) -> Self {
        self.0.push(segment.into());
        self
    }

    #[must_use]
    pub fn segments(&self) -> &[KeySegment] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Segment-wise prefix test. The empty key is a prefix of every key.
    #[must_use]
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{segment}")?;
        }
        f.write_str("]")
    }
}

/// Build a [`QueryKey`] from heterogeneous scalar segments.
///
/// ```
/// use quill_query::query_key;
///
/// let key = query_key!["abTests", "ab-42"];
/// assert!(key.starts_with(&query_key!["abTests"]));
/// ```
#[macro_export]
macro_rules! query_key {
    ($($segment:expr),+ $(,)?) => {
        $crate::QueryKey::from_segments(vec![$($crate::KeySegment::from($segment)),+])
    };
}
