use std::fmt;

/// Result type for widenet operations
pub type Result<T> = std::result::Result<T, WidenetError>;

/// Main error type for the widenet library
#[derive(Debug, Clone)]
pub enum WidenetError {
    /// Invalid dimensions for operations
    DimensionMismatch {
        expected: String,
        actual: String,
    },

    /// Invalid parameter value
    InvalidParameter {
        name: String,
        reason: String,
    },

    /// IO errors (file operations, checkpoint streams)
    IoError(String),

    /// Serialization/deserialization errors
    SerializationError(String),

    /// Unknown serialization-type tag in a checkpoint stream
    InvalidSerializationType(i32),
}

impl fmt::Display for WidenetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidenetError::DimensionMismatch { expected, actual } => {
                write!(f, "Dimension mismatch: expected {}, got {}", expected, actual)
            }
            WidenetError::InvalidParameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
            WidenetError::IoError(msg) => write!(f, "IO error: {}", msg),
            WidenetError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            WidenetError::InvalidSerializationType(value) => {
                write!(f, "Invalid serialization type: {}", value)
            }
        }
    }
}

impl std::error::Error for WidenetError {}

// Conversion from std::io::Error
impl From<std::io::Error> for WidenetError {
    fn from(err: std::io::Error) -> Self {
        WidenetError::IoError(err.to_string())
    }
}

// Conversion from bincode::Error
impl From<bincode::Error> for WidenetError {
    fn from(err: bincode::Error) -> Self {
        WidenetError::SerializationError(err.to_string())
    }
}

// Helper functions for common error patterns
impl WidenetError {
    pub fn dimension_mismatch<S: Into<String>>(expected: S, actual: S) -> Self {
        WidenetError::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn invalid_parameter<S: Into<String>>(name: S, reason: S) -> Self {
        WidenetError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
