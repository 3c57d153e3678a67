//! System URI launcher
//!
//! Hands `mailto:` links to the platform's default handler through `open`.

use std::io;

use thiserror::Error;

/// Errors from launching a URI
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("No URI handler found: {0}")]
    NotFound(String),
    #[error("Failed to open URI: {0}")]
    Failed(io::Error),
    #[error("URI launcher task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<io::Error> for LaunchError {
    fn from(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::NotFound {
            LaunchError::NotFound(e.to_string())
        } else {
            LaunchError::Failed(e)
        }
    }
}

/// Open `uri` with the system handler.
///
/// `open::that` waits for the platform launcher to exit, so it runs on the
/// blocking pool.
pub async fn open_uri(uri: &str) -> Result<(), LaunchError> {
    tracing::info!(scheme = uri.split(':').next().unwrap_or_default(), "opening uri");
    let uri = uri.to_string();
    tokio::task::spawn_blocking(move || open::that(&uri)).await??;
    Ok(())
}
