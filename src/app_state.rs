use crate::profile_image::ProfileImages;

pub struct AppState {
    pub profile_images: ProfileImages,
}
