// Error types for the PDS capture decoder

use std::collections::TryReserveError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Unknown capture tag: {0:02X?}")]
    UnknownTag([u8; 3]),

    #[error("Unknown waveform variant: {0:#04x}")]
    UnknownVariant(u8),

    #[error("Timebase index out of range: {0} (expected 0-31)")]
    TimebaseIndex(u32),

    #[error("Sensitivity index out of range: {0} (expected 0-20)")]
    SensitivityIndex(u32),

    #[error("Attenuation index too large: {0}")]
    AttenuationIndex(u32),

    #[error("Truncated capture: need {needed} bytes at offset {offset}, only {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Failed to allocate capture memory: {0}")]
    Allocation(#[from] TryReserveError),

    #[error("Image error: {0}")]
    Image(String),

    #[error("Wrong capture kind: expected {0}")]
    WrongCaptureKind(&'static str),
}

/// Coarse classification of a [`PdsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The buffer is not a capture this decoder understands.
    Format,
    /// Memory for samples or pixels could not be allocated.
    Resource,
    /// The underlying stream failed or ended early.
    Transport,
    /// Writing a decoded capture out failed.
    Output,
}

impl PdsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PdsError::UnknownTag(_)
            | PdsError::UnknownVariant(_)
            | PdsError::TimebaseIndex(_)
            | PdsError::SensitivityIndex(_)
            | PdsError::AttenuationIndex(_)
            | PdsError::Truncated { .. } => ErrorKind::Format,
            PdsError::Allocation(_) => ErrorKind::Resource,
            PdsError::Io(_) => ErrorKind::Transport,
            PdsError::Image(_) | PdsError::WrongCaptureKind(_) => ErrorKind::Output,
        }
    }
}

impl From<image::ImageError> for PdsError {
    fn from(value: image::ImageError) -> Self {
        match value {
            image::ImageError::IoError(e) => PdsError::Io(e),
            other => PdsError::Image(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, PdsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(PdsError::UnknownTag(*b"XYZ").kind(), ErrorKind::Format);
        assert_eq!(PdsError::TimebaseIndex(32).kind(), ErrorKind::Format);
        assert_eq!(
            PdsError::Truncated { offset: 0, needed: 4, available: 2 }.kind(),
            ErrorKind::Format
        );
        let io_err = io::Error::new(io::ErrorKind::UnexpectedEof, "short read");
        assert_eq!(PdsError::from(io_err).kind(), ErrorKind::Transport);
        assert_eq!(PdsError::WrongCaptureKind("bitmap").kind(), ErrorKind::Output);
    }

    #[test]
    fn test_allocation_is_resource_error() {
        let mut v: Vec<f64> = Vec::new();
        let err = v.try_reserve_exact(usize::MAX).unwrap_err();
        assert_eq!(PdsError::from(err).kind(), ErrorKind::Resource);
    }

    #[test]
    fn test_messages() {
        let err = PdsError::SensitivityIndex(21);
        assert_eq!(err.to_string(), "Sensitivity index out of range: 21 (expected 0-20)");
    }
}
