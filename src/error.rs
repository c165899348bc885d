//! Error types for configuration generation.
//!
//! Nothing here is retried: a bad parameter or a corrupt token is reported to
//! the caller as is.

use std::fmt;
use std::num::{ParseFloatError, ParseIntError};

use crate::sim::units::Float;

/// A request the generator cannot honour.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum InvalidParameterError {
    /// The body count must be positive.
    BodyCount(usize),
    /// The radius scale must be positive and finite.
    Radius(Float),
    /// No generator exists for this model name.
    Model(String),
}

impl fmt::Display for InvalidParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidParameterError::BodyCount(n) => {
                write!(f, "Number of bodies must be positive, got {}", n)
            }
            InvalidParameterError::Radius(r) => {
                write!(f, "Radius must be positive and finite, got {}", r)
            }
            InvalidParameterError::Model(name) => write!(f, "Unrecognized model: {}", name),
        }
    }
}

impl std::error::Error for InvalidParameterError {}

/// A token that does not decode to a float.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MalformedTokenError {
    pub(crate) token: String,
    pub(crate) source: ParseIntError,
}

impl fmt::Display for MalformedTokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Malformed token '{}': {}", self.token, self.source)
    }
}

impl std::error::Error for MalformedTokenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Errors that abort reading a configuration file.
#[derive(Debug)]
pub(crate) enum ConfigurationError {
    /// Failed to read or write the file.
    Io(std::io::Error),
    /// A header line is missing or has the wrong key.
    Header { line: usize, expected: &'static str },
    /// The version is not a float.
    Version { line: usize, source: ParseFloatError },
    /// The iteration counter is not an integer.
    Iteration { line: usize, source: ParseIntError },
    /// A value could not be decoded.
    Token {
        line: usize,
        source: MalformedTokenError,
    },
    /// A body line does not have exactly seven fields.
    FieldCount { line: usize, found: usize },
    /// The file ended before the `End` line.
    MissingEnd,
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::Io(e) => write!(f, "Failed to access configuration: {}", e),
            ConfigurationError::Header { line, expected } => {
                write!(f, "Line {}: expected '{}=' header", line, expected)
            }
            ConfigurationError::Version { line, source } => {
                write!(f, "Line {}: invalid version: {}", line, source)
            }
            ConfigurationError::Iteration { line, source } => {
                write!(f, "Line {}: invalid iteration: {}", line, source)
            }
            ConfigurationError::Token { line, source } => write!(f, "Line {}: {}", line, source),
            ConfigurationError::FieldCount { line, found } => {
                write!(f, "Line {}: expected 7 fields, found {}", line, found)
            }
            ConfigurationError::MissingEnd => write!(f, "Configuration has no 'End' line"),
        }
    }
}

impl std::error::Error for ConfigurationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigurationError::Io(e) => Some(e),
            ConfigurationError::Version { source, .. } => Some(source),
            ConfigurationError::Iteration { source, .. } => Some(source),
            ConfigurationError::Token { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigurationError {
    fn from(e: std::io::Error) -> Self {
        ConfigurationError::Io(e)
    }
}

/// Errors that can occur while building a composite system.
#[derive(Debug)]
pub(crate) enum CompositeError {
    /// Failed to read the description file.
    Io(std::io::Error),
    /// The description is not valid YAML of the expected shape.
    Parse(serde_yaml::Error),
    /// The description names an unknown model or an empty subsystem.
    Parameter(InvalidParameterError),
}

impl fmt::Display for CompositeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompositeError::Io(e) => write!(f, "Failed to read composite description: {}", e),
            CompositeError::Parse(e) => write!(f, "Failed to parse composite description: {}", e),
            CompositeError::Parameter(e) => write!(f, "Invalid composite description: {}", e),
        }
    }
}

impl std::error::Error for CompositeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompositeError::Io(e) => Some(e),
            CompositeError::Parse(e) => Some(e),
            CompositeError::Parameter(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for CompositeError {
    fn from(e: std::io::Error) -> Self {
        CompositeError::Io(e)
    }
}

impl From<serde_yaml::Error> for CompositeError {
    fn from(e: serde_yaml::Error) -> Self {
        CompositeError::Parse(e)
    }
}

impl From<InvalidParameterError> for CompositeError {
    fn from(e: InvalidParameterError) -> Self {
        CompositeError::Parameter(e)
    }
}
