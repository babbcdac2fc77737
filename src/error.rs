// Typed errors with thiserror. Playback and fullscreen failures are non-fatal and only logged;
// the remaining variants surface at construction/mount time.

use thiserror::Error;

/// Slideshow error types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SlideshowError {
    #[error("Autoplay blocked: {0}")]
    PlaybackBlocked(String),

    #[error("Fullscreen error: {0}")]
    FullscreenDenied(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Missing element: {0}")]
    MissingElement(String),

    #[error("DOM error: {0}")]
    Dom(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for SlideshowError {
    fn from(err: serde_json::Error) -> Self {
        SlideshowError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SlideshowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SlideshowError::InvalidConfig("slide_count must be at least 1".to_string());
        assert!(err.to_string().contains("slide_count"));

        let err = SlideshowError::PlaybackBlocked("NotAllowedError".to_string());
        assert_eq!(err.to_string(), "Autoplay blocked: NotAllowedError");
    }

    #[test]
    fn json_errors_convert() {
        let err: SlideshowError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, SlideshowError::Serialization(_)));
    }
}
