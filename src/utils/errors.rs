// src/utils/errors.rs

use std::{io, path::PathBuf};
use thiserror::Error;

/// Every way a keygen run can fail. All of them are fatal for the process.
#[derive(Debug, Error)]
pub enum KeygenError {
    #[error("libsodium init failed")]
    Init,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("chmod {}: {source}", .path.display())]
    Permissions {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("missing private key at {}", .0.display())]
    MissingPrivateKey(PathBuf),

    #[error("key at {} has invalid length {len}", .path.display())]
    InvalidKey { path: PathBuf, len: usize },

    #[error("public key at {} does not match the private key", .0.display())]
    KeyMismatch(PathBuf),
}
