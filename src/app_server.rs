use anyhow::Result;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::app_state::AppState;
use crate::debug::log_request_response;
use crate::handlers;

pub struct AppServer {
    listener: TcpListener,
    app: Router,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/profile_images/v1/default",
            get(handlers::get_default_profile_image_urls),
        )
        .route(
            "/api/profile_images/v1/users/:username",
            get(handlers::get_profile_image),
        )
        .route(
            "/api/profile_images/v1/users/:username/names",
            get(handlers::get_profile_image_names),
        )
        .route(
            "/api/profile_images/v1/users/:username/remove",
            post(handlers::post_remove_profile_images),
        )
        .with_state(state)
        .layer(middleware::from_fn(log_request_response))
}

impl AppServer {
    pub fn new(address: &SocketAddr, state: Arc<AppState>) -> Result<AppServer> {
        let listener = std::net::TcpListener::bind(address)?;
        listener.set_nonblocking(true)?;
        let listener = TcpListener::from_std(listener)?;
        tracing::info!("listening on {address}", address = listener.local_addr()?);
        Ok(AppServer {
            listener,
            app: router(state),
        })
    }

    pub async fn run(self) -> Result<()> {
        axum::serve(self.listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for Ctrl-C: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use std::io;
    use tower::ServiceExt;

    use crate::error::StorageError;
    use crate::profile_image::tests::test_profile_images;
    use crate::profile_image::ProfileImages;
    use crate::settings::tests::test_settings;
    use crate::storage::ProfileImageStorage;

    const BOB_NAME: &str = "21f3163f8f86fa10bdefbfbd502a8f06";

    struct UnreadableStorage;

    impl ProfileImageStorage for UnreadableStorage {
        fn url(&self, name: &str) -> String {
            format!("/unreadable/{name}")
        }

        fn exists(&self, name: &str) -> Result<bool, StorageError> {
            Err(StorageError::Io {
                name: name.to_string(),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            })
        }

        fn delete(&self, name: &str) -> Result<(), StorageError> {
            Err(StorageError::Io {
                name: name.to_string(),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            })
        }
    }

    async fn send(state: Arc<AppState>, method: &str, uri: &str) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        router(state).oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn user_routes_capture_username() {
        let (profile_images, storage) = test_profile_images();
        let state = Arc::new(AppState { profile_images });

        let response = send(state.clone(), "GET", "/api/profile_images/v1/users/bob").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["result"], json!("success"));
        assert_eq!(body["profile_image"]["has_image"], json!(false));

        let response = send(
            state.clone(),
            "GET",
            "/api/profile_images/v1/users/bob/names",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await["names"]["full"],
            json!(format!("{BOB_NAME}_50.jpg"))
        );

        storage.save(&format!("{BOB_NAME}_50.jpg"), b"full".to_vec());
        storage.save(&format!("{BOB_NAME}_10.jpg"), b"small".to_vec());
        let response = send(state.clone(), "GET", "/api/profile_images/v1/users/bob").await;
        assert_eq!(
            json_body(response).await["profile_image"]["image_url_full"],
            json!(format!(
                "http://example-storage.com/profile_images/{BOB_NAME}_50.jpg"
            ))
        );

        let response = send(
            state.clone(),
            "POST",
            "/api/profile_images/v1/users/bob/remove",
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(!storage.exists(&format!("{BOB_NAME}_50.jpg")).unwrap());
    }

    #[tokio::test]
    async fn default_route_and_unknown_routes() {
        let (profile_images, _) = test_profile_images();
        let state = Arc::new(AppState { profile_images });

        let response = send(state.clone(), "GET", "/api/profile_images/v1/default").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await["profile_image_urls"],
            json!({
                "full": "http://example-storage.com/profile_images/default_50.jpg",
                "small": "http://example-storage.com/profile_images/default_10.jpg",
            })
        );

        let response = send(
            state.clone(),
            "GET",
            "/api/profile_images/v1/users/bob/remove",
        )
        .await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        let response = send(state, "GET", "/api/profile_images/v1/users").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn storage_failures_are_json_errors() {
        let profile_images = ProfileImages::with_storage(
            Arc::new(UnreadableStorage),
            &test_settings(),
            "secret".to_string(),
        );
        let state = Arc::new(AppState { profile_images });

        let response = send(state.clone(), "GET", "/api/profile_images/v1/users/bob").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["result"], json!("error"));
        assert_eq!(body["code"], json!("STORAGE_ERROR"));

        let response = send(state, "POST", "/api/profile_images/v1/users/bob/remove").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["code"], json!("STORAGE_ERROR"));
    }
}
