// =============================================================================
// Jarvis Backend - Scene API
// =============================================================================
// Endpoints turning text and uploaded images into scene descriptors
// =============================================================================

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
        Multipart, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use jarvis_scene::SceneDescriptor;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::vision::detect_mime;
use crate::AppState;

// =============================================================================
// Request/Response Types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ProcessTextRequest {
    #[serde(default)]
    pub text: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct ProcessTextResponse {
    #[serde(rename = "sceneData")]
    pub scene_data: SceneDescriptor,
}

/// Image field pulled out of the multipart body
struct UploadedImage {
    bytes: Vec<u8>,
    filename: Option<String>,
    content_type: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET / - API information
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Jarvis AI Backend API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/api/health",
            "process_text": "/api/process-text (POST)",
            "process_image": "/api/process-image (POST)"
        },
        "status": "online"
    }))
}

/// GET /api/health - Liveness plus which optional collaborators are wired in
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({
        "status": "online",
        "vision_available": state.captioner.is_some(),
        "keyword_profile": state.generator.profile().as_str(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}

/// POST /api/process-text - Generate a scene from a description
pub async fn process_text(
    State(state): State<AppState>,
    payload: Result<Json<ProcessTextRequest>, JsonRejection>,
) -> Result<Json<ProcessTextResponse>, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let text = match req.text {
        Some(serde_json::Value::String(text)) if !text.is_empty() => text,
        _ => return Err(ApiError::BadRequest("No text provided".into())),
    };

    let scene = state.generator.generate_scene(&text);
    tracing::info!(
        objects = scene.objects().len(),
        environment = %scene.environment(),
        "Generated scene from text"
    );

    Ok(Json(ProcessTextResponse { scene_data: scene }))
}

/// POST /api/process-image - Caption an uploaded image and map it to an object
pub async fn process_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SceneDescriptor>, ApiError> {
    let multipart = multipart.map_err(|e| {
        tracing::debug!("Rejected image upload: {}", e.body_text());
        ApiError::BadRequest("No image provided".into())
    })?;
    let image = read_image_field(multipart)
        .await?
        .ok_or_else(|| ApiError::BadRequest("No image provided".into()))?;

    let caption = caption_image(&state, &image).await;
    let scene = state
        .mapper
        .image_scene(caption.as_deref(), image.filename.as_deref());

    tracing::info!(
        captioned = caption.is_some(),
        filename = image.filename.as_deref().unwrap_or(""),
        object = %scene.objects()[0].kind,
        "Mapped image to scene object"
    );

    Ok(Json(scene))
}

// =============================================================================
// Helpers
// =============================================================================

async fn read_image_field(mut multipart: Multipart) -> Result<Option<UploadedImage>, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("image") {
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;

        return Ok(Some(UploadedImage {
            bytes: bytes.to_vec(),
            filename,
            content_type,
        }));
    }
    Ok(None)
}

fn multipart_error(err: MultipartError) -> ApiError {
    let status = err.status();
    let message = err.body_text();
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(message)
    } else if status.is_client_error() {
        ApiError::BadRequest(message)
    } else {
        ApiError::Internal(message)
    }
}

/// Ask the captioner, if any. Failures count as "no caption".
async fn caption_image(state: &AppState, image: &UploadedImage) -> Option<String> {
    let captioner = state.captioner.as_ref()?;
    let mime = detect_mime(&image.bytes, image.content_type.as_deref());

    match captioner.caption(&image.bytes, &mime).await {
        Ok(caption) => {
            tracing::debug!(captioner = captioner.name(), %caption, "Image captioned");
            Some(caption)
        }
        Err(e) => {
            tracing::warn!(captioner = captioner.name(), "Captioning failed, using fallback: {}", e);
            None
        }
    }
}
