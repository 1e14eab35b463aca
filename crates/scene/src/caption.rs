//! Image Caption Mapper - caption (or filename) to a single scene object
//!
//! ## Table of Contents
//! 1. CaptionMapper - table lookup with filename and default fallbacks
//! 2. Helpers
//! 3. Tests

use crate::tables::{find_model, ModelEntry};
use crate::types::{SceneDescriptor, SceneObject};
use std::path::Path;

/// Source tag stamped on every object produced from an upload
pub const IMAGE_UPLOAD_SOURCE: &str = "image_upload";

/// Description used when neither caption nor filename are available
pub const UNKNOWN_IMAGE_DESCRIPTION: &str = "Uploaded image";

/// Which input produced a match
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MatchSource {
    Caption,
    Filename,
}

/// Maps an externally produced caption onto renderer metadata.
///
/// Always returns an object: an absent or unrecognized caption falls back
/// to the upload's filename and then to a generic "custom" object.
#[derive(Clone, Copy, Debug, Default)]
pub struct CaptionMapper;

impl CaptionMapper {
    /// Create a mapper
    pub fn new() -> Self {
        Self
    }

    /// Map a caption, using `filename` as a secondary source
    pub fn map_caption(&self, caption: Option<&str>, filename: Option<&str>) -> SceneObject {
        let caption = caption.map(str::trim).filter(|c| !c.is_empty());
        let filename = filename.map(str::trim).filter(|f| !f.is_empty());

        let matched = caption
            .and_then(|c| find_model(&c.to_lowercase()).map(|entry| (entry, MatchSource::Caption)))
            .or_else(|| {
                filename.and_then(|f| {
                    find_model(&filename_text(f)).map(|entry| (entry, MatchSource::Filename))
                })
            });

        match matched {
            Some((entry, source)) => {
                tracing::debug!(key = entry.key, tag = entry.tag, ?source, "Image mapped to model");
                // Caption is the better description; the filename is all we have otherwise
                let description = caption.or(filename).unwrap_or(UNKNOWN_IMAGE_DESCRIPTION);
                object_from_entry(entry, description)
            }
            None => {
                tracing::debug!(has_caption = caption.is_some(), "No model matched, using custom object");
                SceneObject::new("custom")
                    .with_model("custom")
                    .with_source(IMAGE_UPLOAD_SOURCE)
                    .with_description(caption.unwrap_or(UNKNOWN_IMAGE_DESCRIPTION))
            }
        }
    }

    /// Map and wrap in a scene with default lighting and environment
    pub fn image_scene(&self, caption: Option<&str>, filename: Option<&str>) -> SceneDescriptor {
        SceneDescriptor::single(self.map_caption(caption, filename))
    }
}

// ============================================================================
// 2. Helpers
// ============================================================================

fn object_from_entry(entry: &ModelEntry, description: &str) -> SceneObject {
    SceneObject::new(entry.tag)
        .with_model(entry.model)
        .with_color(entry.color)
        .with_scale(entry.scale)
        .with_source(IMAGE_UPLOAD_SOURCE)
        .with_description(description)
}

/// Lowercase file stem with separators turned into spaces.
///
/// `Iron_Man-poster.PNG` becomes `iron man poster`.
fn filename_text(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);

    stem.to_lowercase()
        .chars()
        .map(|c| if matches!(c, '_' | '-' | '.') { ' ' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Environment, Lighting};

    #[test]
    fn test_caption_match() {
        let object = CaptionMapper::new().map_caption(Some("a red car driving"), None);

        assert_eq!(object.kind, "car");
        assert_eq!(object.model(), "car");
        assert_eq!(object.scale.get(), 2.0);
        assert_eq!(object.color.to_string(), "#ff0000");
        assert_eq!(object.position, [0.0, 1.0, 0.0]);
        assert_eq!(object.source.as_deref(), Some(IMAGE_UPLOAD_SOURCE));
        assert_eq!(object.description.as_deref(), Some("a red car driving"));
    }

    #[test]
    fn test_caption_is_case_insensitive() {
        let object = CaptionMapper::new().map_caption(Some("Iron Man flying over a city"), None);
        assert_eq!(object.kind, "suit");
        assert_eq!(object.model(), "ironman");
        assert_eq!(object.scale.get(), 1.5);
    }

    #[test]
    fn test_absent_caption_falls_back_to_filename() {
        let object = CaptionMapper::new().map_caption(None, Some("my_robot_photo.jpg"));

        assert_eq!(object.kind, "robot");
        assert_eq!(object.color.to_string(), "#808080");
        assert_eq!(object.description.as_deref(), Some("my_robot_photo.jpg"));
    }

    #[test]
    fn test_unmatched_caption_falls_back_to_filename() {
        let object = CaptionMapper::new().map_caption(Some("something shiny"), Some("Iron_Man.png"));

        assert_eq!(object.kind, "suit");
        assert_eq!(object.description.as_deref(), Some("something shiny"));
    }

    #[test]
    fn test_blank_caption_counts_as_absent() {
        let object = CaptionMapper::new().map_caption(Some("   "), Some("jet-fighter.webp"));
        assert_eq!(object.kind, "airplane");
        assert_eq!(object.model(), "jet");
    }

    #[test]
    fn test_unrecognized_caption_yields_custom() {
        let object = CaptionMapper::new().map_caption(Some("a strange unrecognized blob"), None);

        assert_eq!(object.kind, "custom");
        assert_eq!(object.model(), "custom");
        assert_eq!(object.scale.get(), 1.0);
        assert_eq!(object.color.to_string(), "#00ffff");
        assert_eq!(object.description.as_deref(), Some("a strange unrecognized blob"));
    }

    #[test]
    fn test_nothing_at_all_yields_placeholder() {
        let object = CaptionMapper::new().map_caption(None, None);
        assert_eq!(object.kind, "custom");
        assert_eq!(object.description.as_deref(), Some(UNKNOWN_IMAGE_DESCRIPTION));
    }

    #[test]
    fn test_filename_text() {
        assert_eq!(filename_text("Iron_Man-poster.PNG"), "iron man poster");
        assert_eq!(filename_text("photos/my.robot.jpeg"), "my robot");
        assert_eq!(filename_text("noext"), "noext");
    }

    #[test]
    fn test_image_scene_uses_defaults() {
        let scene = CaptionMapper::new().image_scene(Some("a ball"), None);

        assert_eq!(scene.objects().len(), 1);
        assert_eq!(scene.objects()[0].kind, "sphere");
        assert_eq!(scene.lighting(), Lighting::default());
        assert_eq!(scene.environment(), Environment::Default);
    }
}
