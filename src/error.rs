//! Error type shared by the picker and its registry.
//!
//! Malformed anchor text is never an error: it silently falls back to the
//! default time. The only fatal case is a face identifier that no factory is
//! registered for, which aborts construction.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PickerError {
    #[error("no clock face registered for id {0:?}")]
    UnknownFace(String),
    #[error("terminal i/o error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, PickerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_face_message_names_the_id() {
        let err = PickerError::UnknownFace("13".to_string());
        assert_eq!(err.to_string(), "no clock face registered for id \"13\"");
    }

    #[test]
    fn io_errors_convert() {
        let err: PickerError = io::Error::other("boom").into();
        assert!(matches!(err, PickerError::Io(_)));
    }
}
