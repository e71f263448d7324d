use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::error::{ConfigError, StorageError};
use crate::name_hash::{make_name, profile_image_filename, NameHash};
use crate::secrets::Secrets;
use crate::settings::ProfileImageSettings;
use crate::sizes::ProfileImageSizes;
use crate::storage::{get_profile_image_storage, ProfileImageStorage};
use crate::types::{ProfileImageNames, ProfileImageUrls, User};

pub const PROFILE_IMAGE_KEY_PREFIX: &str = "image_url";

/// Profile image metadata as exposed on a user account.
#[derive(Debug, PartialEq, Serialize)]
pub struct ProfileImage {
    pub has_image: bool,
    /// `image_url_<label>` for each configured size.
    #[serde(flatten)]
    pub image_urls: BTreeMap<String, String>,
}

pub fn profile_image_names(name: &str, sizes: &ProfileImageSizes) -> ProfileImageNames {
    sizes
        .iter()
        .map(|(label, pixels)| (label.to_string(), profile_image_filename(name, pixels)))
        .collect()
}

pub fn profile_image_urls(
    storage: &dyn ProfileImageStorage,
    name: &str,
    sizes: &ProfileImageSizes,
) -> ProfileImageUrls {
    sizes
        .iter()
        .map(|(label, pixels)| {
            (
                label.to_string(),
                storage.url(&profile_image_filename(name, pixels)),
            )
        })
        .collect()
}

pub struct ProfileImages {
    storage: Arc<dyn ProfileImageStorage>,
    secret_key: String,
    name_hash: NameHash,
    default_filename: String,
    sizes: ProfileImageSizes,
}

impl ProfileImages {
    pub fn new(
        settings: &ProfileImageSettings,
        secrets: &Secrets,
    ) -> Result<ProfileImages, ConfigError> {
        let storage = get_profile_image_storage(settings)?;
        Ok(ProfileImages::with_storage(
            Arc::from(storage),
            settings,
            secrets.profile_image_secret_key.clone(),
        ))
    }

    pub fn with_storage(
        storage: Arc<dyn ProfileImageStorage>,
        settings: &ProfileImageSettings,
        secret_key: String,
    ) -> ProfileImages {
        ProfileImages {
            storage,
            secret_key,
            name_hash: settings.name_hash,
            default_filename: settings.default_filename.clone(),
            sizes: settings.sizes.clone(),
        }
    }

    pub fn make_name(&self, username: &str) -> String {
        make_name(&self.secret_key, username, self.name_hash)
    }

    pub fn get_profile_image_names(&self, username: &str) -> ProfileImageNames {
        profile_image_names(&self.make_name(username), &self.sizes)
    }

    /// URLs may be root-relative, depending on the configured domain.
    pub fn get_profile_image_urls(&self, user: &User) -> ProfileImageUrls {
        profile_image_urls(
            self.storage.as_ref(),
            &self.make_name(&user.username),
            &self.sizes,
        )
    }

    pub fn get_default_profile_image_urls(&self) -> ProfileImageUrls {
        profile_image_urls(self.storage.as_ref(), &self.default_filename, &self.sizes)
    }

    pub fn get_profile_image(&self, user: &User, has_image: bool) -> ProfileImage {
        let urls = if has_image {
            self.get_profile_image_urls(user)
        } else {
            self.get_default_profile_image_urls()
        };
        ProfileImage {
            has_image,
            image_urls: urls
                .into_iter()
                .map(|(label, url)| (format!("{PROFILE_IMAGE_KEY_PREFIX}_{label}"), url))
                .collect(),
        }
    }

    /// A user has a profile image once every size is in storage.
    pub fn has_profile_image(&self, username: &str) -> Result<bool, StorageError> {
        for name in self.get_profile_image_names(username).values() {
            if !self.storage.exists(name)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub fn remove_profile_images(&self, username: &str) -> Result<(), StorageError> {
        for name in self.get_profile_image_names(username).values() {
            tracing::debug!("removing profile image {name}");
            self.storage.delete(name)?;
        }
        Ok(())
    }
}
