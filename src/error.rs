//! wbk error types.

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WbkError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("unexpected status code: {0}")]
    UnexpectedStatus(u16),
    #[error("failed to decode CDX response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("failed to read domains: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, WbkError>;
