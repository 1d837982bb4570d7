//! Error types for Tether.

use alloc::string::String;
use core::fmt;

/// Result type alias for Tether operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for observation and binding operations.
///
/// Internal invariant violations (an entry receiving an event of the wrong
/// type, which would indicate an identity collision inside the registry)
/// are programmer errors and panic instead of surfacing here.
#[derive(Debug)]
pub enum Error {
    /// The backing store rejected a read or write.
    Store {
        key: String,
        message: String,
    },
    /// The operation requires a container that has already been dropped.
    Detached {
        what: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Store { key, message } => {
                write!(f, "Store failure for key {}: {}", key, message)
            }
            Error::Detached { what } => {
                write!(f, "Container already dropped: {}", what)
            }
        }
    }
}

impl Error {
    /// Creates a store failure error.
    pub fn store(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Store {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Creates a detached container error.
    pub fn detached(what: impl Into<String>) -> Self {
        Error::Detached { what: what.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_error_display() {
        let err = Error::store("window.frame", "disk full");
        assert!(err.to_string().contains("window.frame"));
        assert!(err.to_string().contains("disk full"));

        let err = Error::detached("weak proxy set");
        assert!(err.to_string().contains("weak proxy set"));
    }

    #[test]
    fn test_error_constructors() {
        match Error::store("k", "m") {
            Error::Store { key, .. } => assert_eq!(key, "k"),
            _ => panic!("Wrong error type"),
        }
    }
}
