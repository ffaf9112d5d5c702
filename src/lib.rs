//! Annual Calendar Library
//!
//! A Rust library for turning German-language astronomical almanac exports
//! (fixed-width ephemeris tables) into structured records that an annual
//! calendar renderer can plot against a date axis.
//!
//! This library provides tools for:
//! - Recognising metadata lines, object blocks and header layouts with a
//!   composable regular-expression grammar
//! - Locating fixed-width columns from each object's header line and slicing
//!   every data row accordingly
//! - Converting locale-specific numeric, time and angle tokens into typed values
//! - Resolving German display names to the known celestial objects
//! - Per-block error reporting with a configurable skip-or-abort policy

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod ephemeris_parser;
        pub mod object_registry;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{EphemerisRow, Metadata, ObjectDataset, ObservableObject, RowValues};
pub use app::services::ephemeris_parser::EphemerisParser;
pub use app::services::object_registry::{CelestialBody, resolve_alias};
pub use config::{BlockErrorPolicy, Config, Flags};

/// Result type alias for the annual calendar parser
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for ephemeris parsing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// A time correction was given in a unit the parser cannot convert
    #[error("The unit '{unit}' is not supported")]
    UnsupportedUnit { unit: String },

    /// No known object carries the requested alias
    #[error("The alias '{alias}' is not set for any observable object")]
    AliasNotAssigned { alias: String },

    /// Header line cannot be turned into a usable column layout
    #[error("Header layout error: {message} (header: '{header}')")]
    HeaderLayout { header: String, message: String },

    /// First line does not follow the metadata grammar
    #[error("Malformed metadata line: '{line}'")]
    MalformedMetadata { line: String },

    /// Text where an object block was expected does not form one
    #[error("Malformed object block: {message} ('{text}')")]
    MalformedBlock { text: String, message: String },

    /// A sliced row value has the wrong shape or cannot be converted
    #[error("Invalid value for '{field}': '{value}' ({message})")]
    InvalidField {
        field: String,
        value: String,
        message: String,
    },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// Pattern compilation error
    #[error("Pattern error: {message}")]
    Pattern {
        message: String,
        #[source]
        source: regex::Error,
    },

    /// Date/time parsing error
    #[error("Date/time parsing error: {message}")]
    DateTimeParsing {
        message: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Failure inside one object block, with the block's context attached
    #[error("Object block '{object}'{}: {source}", .row.map(|r| format!(" row {}", r)).unwrap_or_default())]
    Block {
        object: String,
        row: Option<usize>,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an unsupported unit error
    pub fn unsupported_unit(unit: impl Into<String>) -> Self {
        Self::UnsupportedUnit { unit: unit.into() }
    }

    /// Create an alias not assigned error
    pub fn alias_not_assigned(alias: impl Into<String>) -> Self {
        Self::AliasNotAssigned {
            alias: alias.into(),
        }
    }

    /// Create a header layout error
    pub fn header_layout(header: impl Into<String>, message: impl Into<String>) -> Self {
        Self::HeaderLayout {
            header: header.into(),
            message: message.into(),
        }
    }

    /// Create a header layout error for two overlapping columns
    pub fn column_overlap(header: impl Into<String>, first: &str, second: &str) -> Self {
        Self::header_layout(
            header,
            format!("columns '{}' and '{}' overlap", first, second),
        )
    }

    /// Create a header layout error for a required column whose label is missing
    pub fn missing_column(header: impl Into<String>, column: &str) -> Self {
        Self::header_layout(header, format!("required column '{}' not found", column))
    }

    /// Create a malformed metadata error
    pub fn malformed_metadata(line: impl Into<String>) -> Self {
        Self::MalformedMetadata { line: line.into() }
    }

    /// Create a malformed block error
    pub fn malformed_block(text: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedBlock {
            text: text.into(),
            message: message.into(),
        }
    }

    /// Create an invalid field error
    pub fn invalid_field(
        field: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            field: field.into(),
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a pattern compilation error
    pub fn pattern(message: impl Into<String>, source: regex::Error) -> Self {
        Self::Pattern {
            message: message.into(),
            source,
        }
    }

    /// Create a date/time parsing error
    pub fn datetime_parsing(message: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Wrap an error with the object block (and optionally row) it occurred in
    pub fn in_block(self, object: impl Into<String>, row: Option<usize>) -> Self {
        Self::Block {
            object: object.into(),
            row,
            source: Box::new(self),
        }
    }

    /// The innermost error, looking through block context
    pub fn root(&self) -> &Error {
        match self {
            Self::Block { source, .. } => source.root(),
            other => other,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(error: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: "Date/time parsing failed".to_string(),
            source: error,
        }
    }
}

impl From<regex::Error> for Error {
    fn from(error: regex::Error) -> Self {
        Self::Pattern {
            message: "Pattern compilation failed".to_string(),
            source: error,
        }
    }
}
