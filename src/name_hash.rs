use std::str::FromStr;

use sha1::{Digest, Sha1};
use sha2::Sha256;

use crate::error::ConfigError;
use crate::types::PixelSize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NameHash {
    #[default]
    Md5,
    Sha1,
    Sha256,
}

impl FromStr for NameHash {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "md5" => Ok(NameHash::Md5),
            "sha1" => Ok(NameHash::Sha1),
            "sha256" => Ok(NameHash::Sha256),
            _ => Err(ConfigError::UnknownNameHash(s.to_string())),
        }
    }
}

pub fn make_name(secret_key: &str, username: &str, hash: NameHash) -> String {
    // WARNING: Every stored profile image is named after this value.  Changing
    // the algorithm or the concatenation orphans all existing uploads unless
    // they are renamed in storage first.
    //
    // This only keeps filenames from being guessed from the username; it is
    // not meant to resist anyone who knows the secret key.
    match hash {
        NameHash::Md5 => {
            let mut context = md5::Context::new();
            context.consume(secret_key);
            context.consume(username);
            format!("{:x}", context.compute())
        }
        NameHash::Sha1 => {
            let mut hasher = Sha1::new();
            hasher.update(secret_key);
            hasher.update(username);
            format!("{:x}", hasher.finalize())
        }
        NameHash::Sha256 => {
            let mut hasher = Sha256::new();
            hasher.update(secret_key);
            hasher.update(username);
            format!("{:x}", hasher.finalize())
        }
    }
}

pub fn profile_image_filename(name: &str, size: PixelSize) -> String {
    format!("{name}_{size}.jpg")
}
