use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to parse config file: {0}")]
    Parse(String),

    #[error("cannot map section '{section}': {reason}")]
    Mapping { section: String, reason: String },

    #[error("no [default] section to clone for new profile(s): {0}")]
    NoDefaultSection(String),

    #[error("failed to write config file: {0}")]
    Write(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("AWS SDK error: {0}")]
    AwsSdk(String),

    #[error("no valid SSO token; run: aws sso login --sso-session {0}")]
    TokenExpired(String),

    #[error("cache error: {0}")]
    Cache(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProfError>;
