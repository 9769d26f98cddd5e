//! Key paths addressing values inside a structured model.

use std::fmt;

/// Separator between segments in the textual form of a key path.
pub const SEPARATOR: char = '.';

/// Errors related to key path parsing and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyPathError {
    /// A segment is empty or contains a forbidden character.
    InvalidSegment {
        segment: String,
        position: usize,
        message: String,
    },
    /// The key path has no segments.
    Empty,
}

impl fmt::Display for KeyPathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPathError::InvalidSegment {
                segment,
                position,
                message,
            } => {
                write!(
                    f,
                    "invalid key segment '{}' at position {}: {}",
                    segment, position, message
                )
            }
            KeyPathError::Empty => write!(f, "key path must have at least one segment"),
        }
    }
}

impl std::error::Error for KeyPathError {}

/// An ordered, non-empty sequence of segments identifying one value.
///
/// Segments are arbitrary non-empty strings without the `.` separator and
/// without control characters. Ordering is lexicographic by segment, which
/// is the enumeration order of [`TreeModel`](crate::TreeModel).
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// Parse a dotted key path.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistence_core::KeyPath;
    ///
    /// let key = KeyPath::parse("players.notch.home").unwrap();
    /// assert_eq!(key.len(), 3);
    /// assert_eq!(key.to_string(), "players.notch.home");
    ///
    /// assert!(KeyPath::parse("").is_err());
    /// assert!(KeyPath::parse("a..b").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, KeyPathError> {
        Self::try_from_segments(s.split(SEPARATOR).map(str::to_string).collect())
    }

    /// Try to create a key path from segments, validating each.
    pub fn try_from_segments(segments: Vec<String>) -> Result<Self, KeyPathError> {
        if segments.is_empty() {
            return Err(KeyPathError::Empty);
        }
        for (i, segment) in segments.iter().enumerate() {
            Self::validate_segment(segment, i)?;
        }
        Ok(KeyPath { segments })
    }

    fn validate_segment(segment: &str, position: usize) -> Result<(), KeyPathError> {
        let invalid = |message: &str| KeyPathError::InvalidSegment {
            segment: segment.to_string(),
            position,
            message: message.to_string(),
        };

        if segment.is_empty() {
            return Err(invalid("empty segment"));
        }
        if segment.contains(SEPARATOR) {
            return Err(invalid("segment contains the '.' separator"));
        }
        if segment.chars().any(char::is_control) {
            return Err(invalid("segment contains a control character"));
        }
        Ok(())
    }

    /// Number of segments. Never zero.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.segments.iter()
    }

    /// Append a validated segment.
    pub fn child(&self, segment: &str) -> Result<KeyPath, KeyPathError> {
        Self::validate_segment(segment, self.segments.len())?;
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Ok(KeyPath { segments })
    }

    /// Check if this key path starts with `prefix`.
    pub fn has_prefix(&self, prefix: &KeyPath) -> bool {
        prefix.segments.len() <= self.segments.len()
            && prefix.segments == self.segments[..prefix.segments.len()]
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl std::str::FromStr for KeyPath {
    type Err = KeyPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyPath::parse(s)
    }
}

impl std::ops::Index<usize> for KeyPath {
    type Output = String;

    fn index(&self, i: usize) -> &Self::Output {
        &self.segments[i]
    }
}

/// Macro for creating key paths from literals.
///
/// # Example
///
/// ```rust
/// use persistence_core::key;
///
/// let k = key!("server.motd");
/// assert_eq!(k.len(), 2);
/// ```
#[macro_export]
macro_rules! key {
    ($s:expr) => {
        $crate::KeyPath::parse($s).expect("invalid key path literal")
    };
}
