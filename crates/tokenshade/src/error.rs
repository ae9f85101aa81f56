use std::path::PathBuf;

use thiserror::Error;
use tokenshade_style::ColorParseError;

pub type Result<T> = std::result::Result<T, TokenError>;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("path does not exist: {path}")]
    MissingPath { path: PathBuf },

    #[error("{message}")]
    InvalidArgument { message: String },

    #[error("token group not found: {path}")]
    MissingGroup { path: String },

    #[error("token {token} references unknown token {reference}")]
    UnknownReference { token: String, reference: String },

    #[error("reference cycle: {chain}")]
    ReferenceCycle { chain: String },

    #[error("token {token} is not a color (type = {kind})")]
    NotAColor { token: String, kind: String },

    #[error("token {token} is malformed: {message}")]
    InvalidToken { token: String, message: String },

    #[error("token {token} has an invalid color: {source}")]
    InvalidColor {
        token: String,
        #[source]
        source: ColorParseError,
    },

    #[error("no {level} variant of {color} (token {token}) reaches contrast against {background}")]
    NoCompliantColor {
        token: String,
        color: String,
        background: String,
        level: String,
    },

    #[error("{count} light token(s) have no dark counterpart")]
    Incomplete { count: usize },
}

impl TokenError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. } => 2,
            Self::Incomplete { .. } => 3,
            _ => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
