use std::collections::HashSet;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::types::{PixelSize, SizeLabel};

/// Ordered set of profile image variants, keyed by friendly label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileImageSizes(Vec<(SizeLabel, PixelSize)>);

impl ProfileImageSizes {
    pub fn new<L: Into<SizeLabel>>(
        sizes: impl IntoIterator<Item = (L, PixelSize)>,
    ) -> Result<ProfileImageSizes, ConfigError> {
        let sizes: Vec<(SizeLabel, PixelSize)> = sizes
            .into_iter()
            .map(|(label, pixels)| (label.into(), pixels))
            .collect();
        if sizes.is_empty() {
            return Err(ConfigError::InvalidSizes("no sizes configured".to_string()));
        }
        let mut seen = HashSet::new();
        for (label, pixels) in &sizes {
            if label.is_empty()
                || !label
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
            {
                return Err(ConfigError::InvalidSizes(format!("bad label {label:?}")));
            }
            if *pixels == 0 {
                return Err(ConfigError::InvalidSizes(format!(
                    "{label} must be at least 1 pixel"
                )));
            }
            if !seen.insert(label.as_str()) {
                return Err(ConfigError::InvalidSizes(format!("duplicate label {label}")));
            }
        }
        Ok(ProfileImageSizes(sizes))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, PixelSize)> {
        self.0.iter().map(|(label, pixels)| (label.as_str(), *pixels))
    }
}

impl Default for ProfileImageSizes {
    fn default() -> Self {
        ProfileImageSizes(vec![
            ("full".to_string(), 500),
            ("large".to_string(), 120),
            ("medium".to_string(), 50),
            ("small".to_string(), 30),
        ])
    }
}

impl FromStr for ProfileImageSizes {
    type Err = ConfigError;

    /// Parses `label:pixels` pairs separated by commas, e.g. `full:500, small:30`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let sizes = s
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                let (label, pixels) = entry.split_once(':').ok_or_else(|| {
                    ConfigError::InvalidSizes(format!("expected label:pixels, got {entry:?}"))
                })?;
                let pixels = pixels
                    .trim()
                    .parse::<PixelSize>()
                    .map_err(|err| ConfigError::InvalidSizes(format!("{entry:?}: {err}")))?;
                Ok((label.trim().to_string(), pixels))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        ProfileImageSizes::new(sizes)
    }
}
