//! Boundary errors. Line analysis itself never fails.

/// Errors raised before any line is looked at.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Session text is not valid UTF-8 (first bad byte at offset {valid_up_to})")]
    NotText { valid_up_to: usize },
}

impl From<std::str::Utf8Error> for ParseError {
    fn from(err: std::str::Utf8Error) -> Self {
        ParseError::NotText {
            valid_up_to: err.valid_up_to(),
        }
    }
}
