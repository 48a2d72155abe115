use thiserror::Error;

/// Failures raised by the pattern pipeline. Every variant is a caller input
/// problem; nothing here is retried.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("Export error: {0}")]
    Export(String),
}

impl From<image::ImageError> for PatternError {
    fn from(e: image::ImageError) -> Self {
        PatternError::InvalidImage(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PatternError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_the_kind() {
        let err = PatternError::InvalidParameter("aida_count must be > 0".to_string());
        assert_eq!(err.to_string(), "Invalid parameter: aida_count must be > 0");

        let err = PatternError::LimitExceeded("too many pixels".to_string());
        assert!(err.to_string().starts_with("Limit exceeded"));
    }
}
