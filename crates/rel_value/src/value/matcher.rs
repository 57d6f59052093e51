use std::fmt;
use std::hash::{Hash, Hasher};

use regex::Regex;

use crate::errors::DecodeError;

/// Compiled regular expression of a regexp value.
///
/// Two matchers are equal when their source patterns are equal.
#[derive(Clone)]
pub struct Matcher(Regex);

impl Matcher {
    /// Compile `pattern`.
    pub fn new(pattern: &str) -> Result<Self, DecodeError> {
        Regex::new(pattern)
            .map(Matcher)
            .map_err(|source| DecodeError::InvalidRegexp {
                pattern: pattern.to_owned(),
                source,
            })
    }

    /// Source pattern.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether the pattern matches anywhere in `text`.
    #[inline]
    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }
}

impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Matcher {}

impl Hash for Matcher {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Matcher").field(&self.as_str()).finish()
    }
}
