use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{ConfigError, StorageError};
use crate::settings::ProfileImageSettings;

/// Where profile image files physically live, and how clients reach them.
pub trait ProfileImageStorage: Send + Sync {
    fn url(&self, name: &str) -> String;
    fn exists(&self, name: &str) -> Result<bool, StorageError>;
    /// Deleting a file that does not exist is not an error.
    fn delete(&self, name: &str) -> Result<(), StorageError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    FileSystem,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "filesystem" => Ok(StorageBackend::FileSystem),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(ConfigError::UnknownBackend(s.to_string())),
        }
    }
}

fn join_url(base_url: &str, name: &str) -> String {
    format!("{base_url}{}", name.trim_start_matches('/'))
}

fn with_trailing_slash(mut base_url: String) -> String {
    if !base_url.ends_with('/') {
        base_url.push('/');
    }
    base_url
}

pub struct FileSystemStorage {
    location: PathBuf,
    base_url: String,
}

impl FileSystemStorage {
    pub fn new(location: impl Into<PathBuf>, base_url: impl Into<String>) -> FileSystemStorage {
        FileSystemStorage {
            location: location.into(),
            base_url: with_trailing_slash(base_url.into()),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.location.join(name.trim_start_matches('/'))
    }
}

impl ProfileImageStorage for FileSystemStorage {
    fn url(&self, name: &str) -> String {
        join_url(&self.base_url, name)
    }

    fn exists(&self, name: &str) -> Result<bool, StorageError> {
        self.path(name)
            .try_exists()
            .map_err(|source| StorageError::Io {
                name: name.to_string(),
                source,
            })
    }

    fn delete(&self, name: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path(name)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                name: name.to_string(),
                source,
            }),
        }
    }
}

/// Process-local storage that starts empty.  Nothing outside tests writes to
/// it, so a `memory` deployment serves URLs only: every user reports no
/// uploaded image and removal has nothing to delete.
pub struct MemoryStorage {
    base_url: String,
    files: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new(base_url: impl Into<String>) -> MemoryStorage {
        MemoryStorage {
            base_url: with_trailing_slash(base_url.into()),
            files: Mutex::new(HashMap::new()),
        }
    }

    #[cfg(test)]
    pub fn save(&self, name: &str, data: impl Into<Vec<u8>>) {
        self.files().insert(name.to_string(), data.into());
    }

    fn files(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        // The map is never left half-updated, so a poisoned lock is still usable.
        self.files.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ProfileImageStorage for MemoryStorage {
    fn url(&self, name: &str) -> String {
        join_url(&self.base_url, name)
    }

    fn exists(&self, name: &str) -> Result<bool, StorageError> {
        Ok(self.files().contains_key(name))
    }

    fn delete(&self, name: &str) -> Result<(), StorageError> {
        self.files().remove(name);
        Ok(())
    }
}

pub fn get_profile_image_storage(
    settings: &ProfileImageSettings,
) -> Result<Box<dyn ProfileImageStorage>, ConfigError> {
    let base_url = settings.base_url()?;
    tracing::debug!(
        "profile image storage: {:?} at {base_url}",
        settings.backend
    );
    match settings.backend {
        StorageBackend::FileSystem => {
            let location = settings
                .location
                .clone()
                .ok_or(ConfigError::MissingValue {
                    section: "profile_images",
                    key: "location",
                })?;
            Ok(Box::new(FileSystemStorage::new(location, base_url)))
        }
        StorageBackend::Memory => Ok(Box::new(MemoryStorage::new(base_url))),
    }
}
