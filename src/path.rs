//! Document locations for validation errors.
//!
//! This module provides [`JsonPath`] and [`PathSegment`] for tracking where in
//! an instance document a violation occurred. Paths render two ways: the
//! human-readable dotted form (`users[0].email`) through `Display`, and the
//! RFC 6901 JSON pointer form (`/users/0/email`) through [`JsonPath::to_pointer`].

use std::fmt::{self, Display};

/// A segment of a document path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object member (e.g., `user`, `email`)
    Field(String),
    /// An array element (e.g., `[0]`, `[42]`)
    Index(usize),
}

impl PathSegment {
    /// Creates a new field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }

    fn write_pointer_token(&self, out: &mut String) {
        match self {
            PathSegment::Field(name) => {
                for ch in name.chars() {
                    match ch {
                        '~' => out.push_str("~0"),
                        '/' => out.push_str("~1"),
                        other => out.push(other),
                    }
                }
            }
            PathSegment::Index(idx) => out.push_str(&idx.to_string()),
        }
    }
}

/// A path to a value in an instance document.
///
/// Paths are immutable; `push_field` and `push_index` return extended copies
/// so the validator can hand each child its own location without bookkeeping.
///
/// # Example
///
/// ```rust
/// use addendum::JsonPath;
///
/// let path = JsonPath::root()
///     .push_field("users")
///     .push_index(0)
///     .push_field("email");
///
/// assert_eq!(path.to_string(), "users[0].email");
/// assert_eq!(path.to_pointer(), "/users/0/email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// Creates an empty path representing the document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with a field segment appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the last segment, or None if this is root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Renders the path as an RFC 6901 JSON pointer.
    ///
    /// The root renders as the empty string. `~` and `/` inside field names
    /// are escaped as `~0` and `~1`.
    ///
    /// ```rust
    /// use addendum::JsonPath;
    ///
    /// assert_eq!(JsonPath::root().to_pointer(), "");
    /// assert_eq!(JsonPath::root().push_field("a/b").to_pointer(), "/a~1b");
    /// ```
    pub fn to_pointer(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            out.push('/');
            segment.write_pointer_token(&mut out);
        }
        out
    }
}

impl Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}
