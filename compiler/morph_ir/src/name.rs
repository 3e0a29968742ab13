//! Owned identifier for capture names, composite keys, rule names and
//! declared shapes.

use std::borrow::Borrow;
use std::fmt;

/// Identifier used for capture names, composite keys, application heads,
/// rule names and declared shapes.
///
/// Names are compared by content. `Name` borrows as `str`, so maps keyed by
/// `Name` can be queried with a plain `&str`.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Name(Box<str>);

impl Name {
    /// Create a name from anything string-like.
    #[inline]
    pub fn new(name: impl Into<Box<str>>) -> Self {
        Name(name.into())
    }

    /// View the name as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Name {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Name {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Name {
    #[inline]
    fn from(name: &str) -> Self {
        Name(name.into())
    }
}

impl From<String> for Name {
    #[inline]
    fn from(name: String) -> Self {
        Name(name.into_boxed_str())
    }
}

impl From<&Name> for Name {
    #[inline]
    fn from(name: &Name) -> Self {
        name.clone()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({:?})", &*self.0)
    }
}
