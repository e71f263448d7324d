use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::app_error::AppError;
use crate::app_state::AppState;
use crate::profile_image::ProfileImage;
use crate::response::{json_success, JsonSuccess};
use crate::types::{ProfileImageNames, ProfileImageUrls, User};

type JsonResult<T> = Result<Json<JsonSuccess<T>>, AppError>;

#[derive(Debug, Serialize)]
pub struct ProfileImageResponse {
    profile_image: ProfileImage,
}

#[derive(Debug, Serialize)]
pub struct ProfileImageNamesResponse {
    names: ProfileImageNames,
}

#[derive(Debug, Serialize)]
pub struct ProfileImageUrlsResponse {
    profile_image_urls: ProfileImageUrls,
}

pub async fn get_profile_image(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> JsonResult<ProfileImageResponse> {
    let has_image = {
        let state = Arc::clone(&state);
        let username = username.clone();
        tokio::task::spawn_blocking(move || state.profile_images.has_profile_image(&username))
            .await??
    };
    let profile_image = state
        .profile_images
        .get_profile_image(&User::new(username), has_image);
    Ok(json_success(ProfileImageResponse { profile_image }))
}

pub async fn get_profile_image_names(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> JsonResult<ProfileImageNamesResponse> {
    let names = state.profile_images.get_profile_image_names(&username);
    Ok(json_success(ProfileImageNamesResponse { names }))
}

pub async fn post_remove_profile_images(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<StatusCode, AppError> {
    tokio::task::spawn_blocking(move || state.profile_images.remove_profile_images(&username))
        .await??;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_default_profile_image_urls(
    State(state): State<Arc<AppState>>,
) -> JsonResult<ProfileImageUrlsResponse> {
    let profile_image_urls = state.profile_images.get_default_profile_image_urls();
    Ok(json_success(ProfileImageUrlsResponse { profile_image_urls }))
}
