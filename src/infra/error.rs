//! Structural parse failures shared by the YAML and Markdown parsers.

use thiserror::Error;

/// A file's structure could not be parsed. Fatal for that file only.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed YAML: {0}")]
    Syntax(#[from] yaml_rust2::scanner::ScanError),

    #[error("invalid note metadata: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("missing closing front matter delimiter '---'")]
    MissingClosingDelimiter,

    /// A note mapping expands, through aliases or nesting, past a fixed limit.
    #[error("note exceeds the YAML {0} limit")]
    ExpansionLimit(&'static str),
}
