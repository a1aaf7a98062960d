use itertools::Itertools;
use std::path::PathBuf;
use thiserror::Error;

/// A single problem found by the graph validation pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphIssue {
    #[error("Node '{from}' transitions to '{target}', which is neither a node nor the terminal")]
    DanglingTransition { from: String, target: String },

    #[error("Intent override '{name}' points to missing node '{target}'")]
    DanglingOverride { name: String, target: String },

    #[error("Start node '{0}' is not defined")]
    MissingStart(String),

    #[error("Intent override '{name}' has no keywords and would match every reply")]
    EmptyOverride { name: String },
}

/// Errors that can occur while building a dialogue graph.
#[derive(Error, Debug, Clone)]
pub enum GraphError {
    #[error("Node '{0}' is defined more than once")]
    DuplicateNode(String),

    #[error("Node id '{0}' is reserved for the conversation terminal")]
    ReservedId(String),

    #[error("Dialogue graph failed validation:\n  {}", .0.iter().join("\n  "))]
    Invalid(Vec<GraphIssue>),
}

/// Errors that can occur when loading, converting or compiling a dialogue script.
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Failed to parse script JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Node '{node_id}' uses unknown profile field '{field}'")]
    UnknownField { node_id: String, field: String },

    #[error("Node '{node_id}' has an invalid message template: {message}")]
    InvalidTemplate { node_id: String, message: String },

    #[error("Could not access artifact '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Artifact serialization failed: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("Artifact deserialization failed: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    #[error(transparent)]
    Conversion(#[from] ScriptConversionError),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Errors that can occur when converting a custom format into a `ScriptDefinition`.
#[derive(Error, Debug, Clone)]
pub enum ScriptConversionError {
    #[error("Invalid custom data: {0}")]
    ValidationError(String),
}

/// Errors that can occur while loading the engine configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

/// Errors raised when a profile is not complete enough to hand off to a collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandoffError {
    #[error("Profile is missing required field '{0}'")]
    Missing(&'static str),

    #[error("Quantity '{0}' does not contain a number of leads")]
    InvalidQuantity(String),
}
