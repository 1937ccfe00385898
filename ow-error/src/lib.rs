//! Unified error handling for owneo
//!
//! This crate provides a single error type used across all owneo components.
//! It uses thiserror for ergonomic error definitions with proper Display and Error trait impls.

use std::io;

/// Result type alias using OwError
pub type Result<T> = std::result::Result<T, OwError>;

/// Unified error type for all owneo operations
#[derive(thiserror::Error, Debug)]
pub enum OwError {
    // ============================================================================
    // Sensor Network Errors
    // ============================================================================
    #[error("Cannot connect to sensor network at {address}: {reason}")]
    Connection {
        address: String,
        reason: String,
    },

    #[error("Device enumeration failed: {0}")]
    Enumeration(String),

    #[error("Failed to read property {path}: {reason}")]
    PropertyRead {
        path: String,
        reason: String,
    },

    #[error("Failed to write property {path}: {reason}")]
    PropertyWrite {
        path: String,
        reason: String,
    },

    #[error("Property is read-only: {0}")]
    NotWritable(String),

    #[error("Sensor not found: {0}")]
    SensorNotFound(String),

    #[error("Property {name} not found on sensor {sensor}")]
    PropertyNotFound {
        sensor: String,
        name: String,
    },

    // ============================================================================
    // Feature Table Errors
    // ============================================================================
    #[error("Invalid pattern {pattern:?} for feature {feature}: {reason}")]
    PatternCompilation {
        feature: String,
        pattern: String,
        reason: String,
    },

    #[error("Unknown feature: {0}")]
    UnknownFeature(String),

    // ============================================================================
    // I/O and Configuration Errors
    // ============================================================================
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidConfig {
        field: String,
        reason: String,
    },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Generic(String),
}

impl OwError {
    /// Create a config error from a string
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a connection error
    pub fn connection(address: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Connection {
            address: address.into(),
            reason: reason.into(),
        }
    }

    /// Create a property read error
    pub fn property_read(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PropertyRead {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a property write error
    pub fn property_write(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PropertyWrite {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// Allow converting from String to OwError
impl From<String> for OwError {
    fn from(s: String) -> Self {
        Self::Generic(s)
    }
}

// Allow converting from &str to OwError
impl From<&str> for OwError {
    fn from(s: &str) -> Self {
        Self::Generic(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_message() {
        let err = OwError::connection("/mnt/1wire", "not a directory");
        assert_eq!(
            err.to_string(),
            "Cannot connect to sensor network at /mnt/1wire: not a directory"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err: OwError = io_err.into();
        assert!(matches!(err, OwError::Io(_)));
    }

    #[test]
    fn test_from_str() {
        let err: OwError = "boom".into();
        assert_eq!(err.to_string(), "boom");
    }
}
