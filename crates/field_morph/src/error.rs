//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias.
//! Variants cover a bad persisted-field signature, stream IO failures, renderer
//! lifecycle misuse, and backend compile/link failures.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("bad field signature: {0}")]
    Format(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid renderer state: {0}")]
    State(String),

    #[error("render backend error: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert_transparently() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "short read");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn backend_errors_carry_diagnostics() {
        let err = Error::Backend("0:3(2): error: syntax error".into());
        assert!(err.to_string().contains("syntax error"));
    }
}
