//! Error types

use crate::types::Location;

/// Main error type for mstyle operations.
#[derive(Debug, thiserror::Error)]
pub enum MStyleError {
    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A rule's own parameters failed validation
    #[error("rule error in {rule}: {message}")]
    RuleError {
        /// Offending rule name
        rule: String,
        /// Error message
        message: String,
    },

    /// Lexical error; analysis stops after Stage 1/2 have already emitted
    #[error("{location}: lex error: {message}")]
    LexError {
        /// Where the lexer gave up
        location: Box<Location>,
        /// Error message
        message: String,
    },

    /// Parse error; `ast_link` stays `None` for the whole file and Stage 3
    /// degrades gracefully rather than failing
    #[error("{location}: parse error: {message}")]
    ParseError {
        /// Where the parser gave up
        location: Box<Location>,
        /// Error message
        message: String,
    },

    /// Internal consistency failure (uncategorizable rule, broken
    /// invariant). Always a bug; never expected in normal operation.
    #[error("internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Config file not found
    #[error("file not found: {0}")]
    FileNotFound(String),

    /// Async runtime error
    #[cfg(feature = "async")]
    #[error("async runtime error: {0}")]
    AsyncRuntime(String),
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.col_start)
    }
}

/// Result type alias for mstyle operations
pub type Result<T> = std::result::Result<T, MStyleError>;
