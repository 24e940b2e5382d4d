// ABOUTME: Error types for the bespoke-deck application
// ABOUTME: Provides structured error handling for each stage of deck composition

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Failed to read file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to fetch remote asset: {0}")]
    FetchError(#[from] reqwest::Error),

    #[error("Invalid asset path: {0}")]
    InvalidAssetPath(String),

    #[error("Markup error: {0}")]
    MarkupError(String),

    #[error("Invalid bullet selector '{selector}': {message}")]
    SelectorError { selector: String, message: String },

    #[error("Deck has no slides matching '{0}'")]
    NoSlidesError(String),

    #[error("Input validation error: {0}")]
    ValidationError(String),

    #[error("Path not found: {0}")]
    PathNotFoundError(PathBuf),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown error: {0}")]
    UnknownError(String),
}

impl From<anyhow::Error> for DeckError {
    fn from(err: anyhow::Error) -> Self {
        DeckError::UnknownError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DeckError>;
