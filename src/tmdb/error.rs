//! Errors raised by the TMDb client.

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No API key was supplied when building the client.
    #[error("Missing TMDb API key config")]
    MissingApiKey,

    /// The request could not be built or sent, or the body could not be read.
    #[error("TMDb request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// TMDb answered with a non-success status.
    #[error("Failed to fetch from TMDb: {status}")]
    Status { status: StatusCode, body: String },

    /// The body was not the JSON shape we expected.
    #[error("TMDb parse error: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
