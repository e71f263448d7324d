use std::collections::BTreeMap;

pub type SizeLabel = String;
pub type PixelSize = u32;
pub type ProfileImageNames = BTreeMap<SizeLabel, String>;
pub type ProfileImageUrls = BTreeMap<SizeLabel, String>;

#[derive(Clone, Debug)]
pub struct User {
    pub username: String,
}

impl User {
    pub fn new(username: impl Into<String>) -> User {
        User {
            username: username.into(),
        }
    }
}
