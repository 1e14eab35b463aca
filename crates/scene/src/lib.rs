//! # Jarvis Scene Engine
//!
//! Deterministic mapping from natural language to a renderable 3D scene.
//!
//! ## Features
//!
//! - **Text Scene Generation**: keyword tables turn a description into
//!   typed objects with color, scale and position, plus lighting and
//!   environment settings
//! - **Image Caption Mapping**: a caption produced by an external vision
//!   service (or the upload's filename) becomes a single modeled object
//! - **Well-formed Output**: colors and scales are validated types, and a
//!   scene always holds at least one object
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Scene Engine                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Tables (static, ordered)                                   │
//! │  ├── Shape keywords per KeywordProfile                      │
//! │  ├── Colors / Sizes                                         │
//! │  └── Object-to-model metadata                               │
//! ├─────────────────────────────────────────────────────────────┤
//! │  SceneGenerator: text → SceneDescriptor                     │
//! │  CaptionMapper:  caption / filename → SceneObject           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Shared: extract_position, infer_lighting, infer_environment│
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use jarvis_scene::prelude::*;
//!
//! let scene = SceneGenerator::default().generate_scene("a small red cube on the left");
//! assert_eq!(scene.objects()[0].kind, "cube");
//!
//! let object = CaptionMapper::new().map_caption(None, Some("my_robot_photo.jpg"));
//! assert_eq!(object.kind, "robot");
//! ```

pub mod atmosphere;
pub mod caption;
pub mod error;
pub mod generator;
pub mod position;
pub mod tables;
pub mod types;

pub use atmosphere::{infer_environment, infer_lighting};
pub use caption::{CaptionMapper, IMAGE_UPLOAD_SOURCE, UNKNOWN_IMAGE_DESCRIPTION};
pub use error::{Result, SceneError};
pub use generator::SceneGenerator;
pub use position::extract_position;
pub use tables::KeywordProfile;
pub use types::{
    Environment, HexColor, Lighting, LightingKind, Position, Scale, SceneDescriptor, SceneObject,
};

// ============================================================================
// Prelude
// ============================================================================

/// Convenient re-exports for common scene types.
pub mod prelude {
    pub use super::caption::CaptionMapper;
    pub use super::error::SceneError;
    pub use super::generator::SceneGenerator;
    pub use super::tables::KeywordProfile;
    pub use super::types::{Environment, HexColor, Lighting, Scale, SceneDescriptor, SceneObject};
}
