//! Icon transform error types.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = IconError> = std::result::Result<T, E>;

/// Failures reported by the matte, canvas and pack transforms.
#[derive(Debug, Error)]
pub enum IconError {
    #[error("cannot decode image")]
    Decode(#[source] image::ImageError),

    #[error("invalid parameter: {0}")]
    Validation(String),

    #[error("cannot encode {format}: {reason}")]
    Encode {
        format: &'static str,
        reason: String,
    },

    #[error("IO error on `{0}`")]
    Io(PathBuf, #[source] std::io::Error),
}

impl IconError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn encode(format: &'static str, reason: impl ToString) -> Self {
        Self::Encode {
            format,
            reason: reason.to_string(),
        }
    }

    /// True for caller mistakes, as opposed to bad input bytes or IO.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
