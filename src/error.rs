use std::{error, fmt, result};

/// Error variants that can be returned by this package's API.
///
/// Each variant carries a prefix, typically identifying the
/// error location, and a message.
#[derive(Clone, PartialEq)]
pub enum Error {
    /// Requested key is not present in the index.
    KeyNotFound(String, String),
    /// Fatal case, breaking one of the red-black rules, or the sort order,
    /// or the parent/child links of the tree.
    Fatal(String, String),
    InvalidInput(String, String),
    IOError(String, String),
    FailConvert(String, String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        use Error::*;

        match self {
            KeyNotFound(p, msg) => write!(f, "{} KeyNotFound: {}", p, msg),
            Fatal(p, msg) => write!(f, "{} Fatal: {}", p, msg),
            InvalidInput(p, msg) => write!(f, "{} InvalidInput: {}", p, msg),
            IOError(p, msg) => write!(f, "{} IOError: {}", p, msg),
            FailConvert(p, msg) => write!(f, "{} FailConvert: {}", p, msg),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        write!(f, "{}", self)
    }
}

impl error::Error for Error {}

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;
