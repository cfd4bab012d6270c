pub mod json_store;
pub mod models;

use std::path::PathBuf;
use thiserror::Error;

pub use json_store::{load, save, JsonStore};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("store file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode store document: {0}")]
    Encode(#[source] serde_json::Error),
}
