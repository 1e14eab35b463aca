// =============================================================================
// Jarvis Backend - API Server Entry Point
// =============================================================================
// Table of Contents:
// 1. Imports
// 2. Application State
// 3. Main Entry Point
// 4. Router Setup
// =============================================================================

mod config;
mod error;
mod handlers;
mod vision;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use jarvis_scene::{CaptionMapper, SceneGenerator};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::vision::{Captioner, RemoteCaptioner};

// -----------------------------------------------------------------------------
// 2. Application State
// -----------------------------------------------------------------------------

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub generator: SceneGenerator,
    pub mapper: CaptionMapper,
    /// Absent when no captioning service is configured
    pub captioner: Option<Arc<dyn Captioner>>,
}

impl AppState {
    pub fn new(config: Config, captioner: Option<Arc<dyn Captioner>>) -> Self {
        Self {
            generator: SceneGenerator::new(config.keyword_profile),
            mapper: CaptionMapper::new(),
            config: Arc::new(config),
            captioner,
        }
    }
}

// -----------------------------------------------------------------------------
// 3. Main Entry Point
// -----------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Try current directory first, then crates/backend/
    if dotenvy::dotenv().is_err() {
        let _ = dotenvy::from_filename("crates/backend/.env");
    }

    let config = Config::load()?;
    let bind_addr = config.bind_address.clone();

    let captioner = build_captioner(&config);
    let state = AppState::new(config, captioner);

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Jarvis API Server running on http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Captioner from config, or none. A broken vision setup disables image
/// captioning rather than stopping the server.
fn build_captioner(config: &Config) -> Option<Arc<dyn Captioner>> {
    if !config.vision.is_enabled() {
        tracing::warn!("Vision API not configured; image uploads fall back to filename matching");
        return None;
    }

    match RemoteCaptioner::new(config.vision.clone()) {
        Ok(captioner) => {
            tracing::info!(model = %config.vision.model, "Vision captioning enabled");
            Some(Arc::new(captioner))
        }
        Err(e) => {
            tracing::error!("Failed to initialize vision client: {}", e);
            None
        }
    }
}

// -----------------------------------------------------------------------------
// 4. Router Setup
// -----------------------------------------------------------------------------

fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(handlers::root))
        .route("/api/health", get(handlers::health_check))
        .route("/api/process-text", post(handlers::process_text))
        .route("/api/process-image", post(handlers::process_image))
        // Middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vision::VisionError;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use jarvis_scene::KeywordProfile;
    use tower::ServiceExt;

    const BOUNDARY: &str = "jarvis-test-boundary";

    /// Captioner returning a fixed caption, or failing when none is set
    struct StubCaptioner(Option<&'static str>);

    #[async_trait]
    impl Captioner for StubCaptioner {
        fn name(&self) -> &str {
            "stub"
        }

        async fn caption(&self, _image: &[u8], _mime: &str) -> Result<String, VisionError> {
            self.0
                .map(str::to_string)
                .ok_or_else(|| VisionError::Api("stub failure".into()))
        }
    }

    fn app(captioner: Option<Arc<dyn Captioner>>) -> Router {
        create_router(AppState::new(Config::default(), captioner))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn text_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/process-text")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn image_request(field: &str, filename: &str) -> Request<Body> {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
             Content-Type: image/jpeg\r\n\r\n\
             not really a jpeg\r\n\
             --{BOUNDARY}--\r\n"
        );
        Request::builder()
            .method("POST")
            .uri("/api/process-image")
            .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_root_info() {
        let request = Request::get("/").body(Body::empty()).unwrap();
        let (status, json) = send(app(None), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "online");
        assert_eq!(json["endpoints"]["health"], "/api/health");
    }

    #[tokio::test]
    async fn test_health_reports_vision() {
        let request = || Request::get("/api/health").body(Body::empty()).unwrap();

        let (_, json) = send(app(None), request()).await;
        assert_eq!(json["vision_available"], false);
        assert_eq!(json["keyword_profile"], "extended");

        let (_, json) = send(app(Some(Arc::new(StubCaptioner(None)))), request()).await;
        assert_eq!(json["vision_available"], true);
    }

    #[tokio::test]
    async fn test_process_text_returns_scene_data() {
        let (status, json) = send(
            app(None),
            text_request(r#"{"text": "a large red sphere on the left and a small blue cube on the right"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let objects = json["sceneData"]["objects"].as_array().unwrap();
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0]["type"], "cube");
        assert_eq!(objects[1]["type"], "sphere");
        assert_eq!(objects[1]["position"], serde_json::json!([-4.0, 1.0, 0.0]));
        assert_eq!(json["sceneData"]["lighting"]["type"], "ambient");
        assert_eq!(json["sceneData"]["environment"], "default");
    }

    #[tokio::test]
    async fn test_process_text_honors_profile() {
        let config = Config {
            keyword_profile: KeywordProfile::Primitives,
            ..Config::default()
        };
        let router = create_router(AppState::new(config, None));

        let (_, json) = send(router, text_request(r#"{"text": "a robot"}"#)).await;
        assert_eq!(json["sceneData"]["objects"][0]["type"], "cube");
    }

    #[tokio::test]
    async fn test_process_text_rejects_missing_text() {
        for body in [r#"{}"#, r#"{"text": ""}"#, r#"{"text": 42}"#] {
            let (status, json) = send(app(None), text_request(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
            assert_eq!(json["error"], "No text provided");
        }
    }

    #[tokio::test]
    async fn test_process_text_rejects_malformed_json() {
        let (status, json) = send(app(None), text_request("{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_process_image_uses_caption() {
        let captioner: Arc<dyn Captioner> = Arc::new(StubCaptioner(Some("a red car driving")));
        let (status, json) = send(app(Some(captioner)), image_request("image", "upload.jpg")).await;

        assert_eq!(status, StatusCode::OK);
        let object = &json["objects"][0];
        assert_eq!(object["type"], "car");
        assert_eq!(object["model"], "car");
        assert_eq!(object["scale"], 2.0);
        assert_eq!(object["color"], "#ff0000");
        assert_eq!(object["source"], "image_upload");
        assert_eq!(object["description"], "a red car driving");
        assert_eq!(json["lighting"]["intensity"], 1.0);
        assert_eq!(json["environment"], "default");
    }

    #[tokio::test]
    async fn test_process_image_without_captioner_uses_filename() {
        let (status, json) = send(app(None), image_request("image", "my_robot_photo.jpg")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["objects"][0]["type"], "robot");
    }

    #[tokio::test]
    async fn test_process_image_caption_failure_falls_back() {
        let captioner: Arc<dyn Captioner> = Arc::new(StubCaptioner(None));
        let (status, json) = send(app(Some(captioner)), image_request("image", "holiday.png")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["objects"][0]["type"], "custom");
        assert_eq!(json["objects"][0]["description"], "Uploaded image");
    }

    #[tokio::test]
    async fn test_process_image_rejects_non_multipart_body() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/process-image")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap();
        let (status, json) = send(app(None), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "No image provided");
    }

    #[tokio::test]
    async fn test_process_image_requires_image_field() {
        let (status, json) = send(app(None), image_request("photo", "car.jpg")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "No image provided");
    }
}
