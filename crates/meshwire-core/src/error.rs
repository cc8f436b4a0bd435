/// Core error types for Meshwire.
use std::path::PathBuf;

/// A specialized Result type for Meshwire operations.
pub type MeshwireResult<T> = Result<T, MeshwireError>;

/// Top-level error type shared by every Meshwire crate.
#[derive(Debug, thiserror::Error)]
pub enum MeshwireError {
    #[error("conflicting arguments: {0}")]
    ConflictingArguments(String),

    #[error("invalid path segment {segment:?}: {reason}")]
    InvalidSegment { segment: String, reason: String },

    #[error("output already exists: {} (pass overwrite to replace it)", .0.display())]
    OutputAlreadyExists(PathBuf),

    #[error("{tool} failed with status {status}: {stderr}")]
    ExternalToolFailure {
        tool: String,
        status: String,
        stderr: String,
    },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MeshwireError {
    /// Create an invalid path segment error.
    pub fn invalid_segment(segment: impl Into<String>, reason: impl Into<String>) -> Self {
        MeshwireError::InvalidSegment {
            segment: segment.into(),
            reason: reason.into(),
        }
    }

    /// Create an error for an external process that exited unsuccessfully.
    pub fn external_tool(
        tool: impl Into<String>,
        status: impl std::fmt::Display,
        stderr: impl Into<String>,
    ) -> Self {
        MeshwireError::ExternalToolFailure {
            tool: tool.into(),
            status: status.to_string(),
            stderr: stderr.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_segment_display() {
        let err = MeshwireError::invalid_segment("a/b", "contains '/'");
        assert_eq!(
            err.to_string(),
            "invalid path segment \"a/b\": contains '/'"
        );
    }

    #[test]
    fn test_output_exists_display() {
        let err = MeshwireError::OutputAlreadyExists(PathBuf::from("/tmp/out.mp4"));
        assert!(err.to_string().contains("/tmp/out.mp4"));
    }

    #[test]
    fn test_external_tool_display() {
        let err = MeshwireError::external_tool("ffmpeg", "exit status: 1", "boom");
        assert_eq!(err.to_string(), "ffmpeg failed with status exit status: 1: boom");
    }
}
