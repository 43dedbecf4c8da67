//! Error type shared by the caret engine and its host adapters.

use std::io;

use thiserror::Error;

/// Errors produced while configuring or driving the overlay caret.
///
/// None of these reach the user as a visible failure: the update pipeline
/// logs them and skips the tick, which looks the same as an unfocused input.
#[derive(Debug, Error)]
pub enum CaretError {
    /// A length string was not a pixel length (`"2px"`, `"-1.5px"`, `"0"`).
    #[error("invalid length `{0}`: expected a pixel value such as `2px`")]
    InvalidLength(String),

    /// The input type is not a single-line text-like type.
    #[error("unsupported input type `{0}`: expected text, search, url, tel or password")]
    UnsupportedInputType(String),

    /// The layout engine could not produce geometry for an element.
    #[error("layout failed: {0}")]
    Layout(String),

    /// Writing to the terminal failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<taffy::TaffyError> for CaretError {
    fn from(err: taffy::TaffyError) -> Self {
        CaretError::Layout(err.to_string())
    }
}
