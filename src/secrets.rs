use std::path::Path;

use configparser::ini::Ini;

use crate::error::ConfigError;

pub struct Secrets {
    pub profile_image_secret_key: String,
}

impl Secrets {
    pub fn load(secrets_file: impl AsRef<Path>) -> Result<Secrets, ConfigError> {
        let secrets_file = secrets_file.as_ref();
        let mut secrets_config = Ini::new();
        secrets_config
            .load(secrets_file)
            .map_err(|message| ConfigError::Load {
                path: secrets_file.display().to_string(),
                message,
            })?;
        Secrets::from_ini(&secrets_config)
    }

    pub fn from_ini(secrets_config: &Ini) -> Result<Secrets, ConfigError> {
        Ok(Secrets {
            profile_image_secret_key: secrets_config
                .get("secrets", "profile_image_secret_key")
                .filter(|key| !key.is_empty())
                .ok_or(ConfigError::MissingValue {
                    section: "secrets",
                    key: "profile_image_secret_key",
                })?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_secret_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secrets.ini");
        std::fs::write(&path, "[secrets]\nprofile_image_secret_key = secret\n").unwrap();
        let secrets = Secrets::load(&path).unwrap();
        assert_eq!(secrets.profile_image_secret_key, "secret");
    }

    #[test]
    fn missing_secret_key() {
        let mut config = Ini::new();
        config
            .read("[secrets]\nsecret_key = unrelated\n".to_string())
            .unwrap();
        assert!(matches!(
            Secrets::from_ini(&config),
            Err(ConfigError::MissingValue {
                key: "profile_image_secret_key",
                ..
            })
        ));
    }
}
