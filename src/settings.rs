use std::path::{Path, PathBuf};

use configparser::ini::Ini;
use url::Url;

use crate::error::ConfigError;
use crate::name_hash::NameHash;
use crate::sizes::ProfileImageSizes;
use crate::storage::StorageBackend;

const SECTION: &str = "profile_images";

#[derive(Clone, Debug)]
pub struct ProfileImageSettings {
    pub backend: StorageBackend,
    /// Scheme and host, e.g. `http://example-storage.com`.  Empty for
    /// root-relative URLs.
    pub domain: String,
    pub url_path: String,
    pub location: Option<PathBuf>,
    pub default_filename: String,
    pub sizes: ProfileImageSizes,
    pub name_hash: NameHash,
}

fn get(config: &Ini, key: &str) -> Option<String> {
    config.get(SECTION, key).map(|value| value.trim().to_string())
}

fn required(config: &Ini, key: &'static str) -> Result<String, ConfigError> {
    get(config, key)
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::MissingValue {
            section: SECTION,
            key,
        })
}

impl ProfileImageSettings {
    pub fn load(settings_file: impl AsRef<Path>) -> Result<ProfileImageSettings, ConfigError> {
        let settings_file = settings_file.as_ref();
        let mut config = Ini::new();
        config
            .load(settings_file)
            .map_err(|message| ConfigError::Load {
                path: settings_file.display().to_string(),
                message,
            })?;
        ProfileImageSettings::from_ini(&config)
    }

    pub fn from_ini(config: &Ini) -> Result<ProfileImageSettings, ConfigError> {
        let settings = ProfileImageSettings {
            backend: required(config, "backend")?.parse()?,
            domain: get(config, "domain").ok_or(ConfigError::MissingValue {
                section: SECTION,
                key: "domain",
            })?,
            url_path: required(config, "url_path")?,
            location: get(config, "location")
                .filter(|location| !location.is_empty())
                .map(PathBuf::from),
            default_filename: required(config, "default_filename")?,
            sizes: match get(config, "sizes").filter(|sizes| !sizes.is_empty()) {
                Some(sizes) => sizes.parse()?,
                None => ProfileImageSizes::default(),
            },
            name_hash: match get(config, "name_hash").filter(|hash| !hash.is_empty()) {
                Some(hash) => hash.parse()?,
                None => NameHash::default(),
            },
        };
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        // The default name is used verbatim as a filename prefix.
        if self.default_filename.contains("..")
            || !self
                .default_filename
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
        {
            return Err(ConfigError::InvalidDefaultFilename(
                self.default_filename.clone(),
            ));
        }
        self.base_url()?;
        Ok(())
    }

    /// Domain plus URL path, always ending in `/`.
    pub fn base_url(&self) -> Result<String, ConfigError> {
        // Without a leading slash the path would run into the host name.
        if !self.domain.is_empty() && !self.url_path.starts_with('/') {
            return Err(ConfigError::InvalidUrlPath(self.url_path.clone()));
        }
        let mut base_url = format!("{}{}", self.domain.trim_end_matches('/'), self.url_path);
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        if !self.domain.is_empty() {
            Url::parse(&base_url).map_err(|source| ConfigError::InvalidBaseUrl {
                base_url: base_url.clone(),
                source,
            })?;
        }
        Ok(base_url)
    }
}
