use std::path::PathBuf;

use thiserror::Error;

/// Errors from the I/O edges of the editor: configuration and image files.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode image {path:?}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to parse configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Could not determine the configuration directory")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, Error>;
