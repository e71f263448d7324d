use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {message}")]
    Load { path: String, message: String },

    #[error("missing {key} in [{section}]")]
    MissingValue {
        section: &'static str,
        key: &'static str,
    },

    #[error("unknown profile image storage backend {0:?} (available: filesystem, memory)")]
    UnknownBackend(String),

    #[error("unknown profile image name hash {0:?} (available: md5, sha1, sha256)")]
    UnknownNameHash(String),

    #[error("invalid profile image sizes: {0}")]
    InvalidSizes(String),

    #[error("invalid profile image base URL {base_url:?}: {source}")]
    InvalidBaseUrl {
        base_url: String,
        source: url::ParseError,
    },

    #[error("profile image URL path {0:?} must start with / when a domain is set")]
    InvalidUrlPath(String),

    #[error("invalid default profile image filename {0:?}")]
    InvalidDefaultFilename(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access profile image {name}: {source}")]
    Io { name: String, source: io::Error },
}
