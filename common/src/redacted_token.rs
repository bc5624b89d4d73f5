//! Bearer token handling with redacted Debug output.

use crate::{ErrorLocation, RedactError};

use std::fmt;
use std::panic::Location;

use serde::ser::Error;
use zeroize::Zeroize;

const ELLIPSIS: &str = "...";

/// A bearer token that never exposes its full value in logs or debug output.
#[derive(Clone)]
pub struct RedactedToken {
    inner: String,
}

impl RedactedToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            inner: token.into(),
        }
    }

    /// Get the actual token value for transmission.
    ///
    /// # Security Note
    /// Only call this when sending the token to the server or when the
    /// user explicitly asked to see it.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Token length in bytes (safe to log).
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// First `chars` characters followed by `...`, for display next to a
    /// result. Returns the whole token when it is not longer than `chars`.
    pub fn prefix(&self, chars: usize) -> String {
        let mut iter = self.inner.chars();
        let head: String = iter.by_ref().take(chars).collect();
        if iter.next().is_some() {
            format!("{head}{ELLIPSIS}")
        } else {
            head
        }
    }
}

impl PartialEq for RedactedToken {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for RedactedToken {}

impl fmt::Debug for RedactedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RedactedToken([REDACTED; {} bytes])", self.inner.len())
    }
}

impl fmt::Display for RedactedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED TOKEN]")
    }
}

impl Drop for RedactedToken {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

// Prevent accidental serialization
impl serde::Serialize for RedactedToken {
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(S::Error::custom(RedactError::Serialization {
            message: String::from("RedactedToken cannot be serialized - use as_str() explicitly"),
            location: ErrorLocation::from(Location::caller()),
        }))
    }
}
