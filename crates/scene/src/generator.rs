//! Text Scene Generator - natural language to scene descriptor
//!
//! ## Table of Contents
//! 1. SceneGenerator - keyword-driven object extraction
//! 2. Tests

use crate::atmosphere::{infer_environment, infer_lighting};
use crate::position::position_for;
use crate::tables::{find_color, find_size, KeywordProfile, ShapeEntry};
use crate::types::{SceneDescriptor, SceneObject};

/// Turns a free-form description into a scene.
///
/// Matching is plain substring search over the lowercase text. Shape types
/// are tried in table order and each type produces at most one object, so
/// "a box and a cube" yields a single cube.
#[derive(Clone, Copy, Debug, Default)]
pub struct SceneGenerator {
    profile: KeywordProfile,
}

impl SceneGenerator {
    /// Create a generator scanning the given profile's shape table
    pub fn new(profile: KeywordProfile) -> Self {
        Self { profile }
    }

    /// Active keyword profile
    pub fn profile(&self) -> KeywordProfile {
        self.profile
    }

    /// Generate the full scene: objects, lighting and environment
    pub fn generate_scene(&self, text: &str) -> SceneDescriptor {
        let text = text.to_lowercase();
        let objects = self.detect(&text);

        SceneDescriptor::from_objects(objects, infer_lighting(&text), infer_environment(&text))
    }

    /// Objects mentioned in `text`, in table order.
    ///
    /// Never empty: with no shape keyword the default cube is returned.
    pub fn extract_objects(&self, text: &str) -> Vec<SceneObject> {
        let mut objects = self.detect(&text.to_lowercase());
        if objects.is_empty() {
            objects.push(SceneObject::default_cube());
        }
        objects
    }

    fn detect(&self, text: &str) -> Vec<SceneObject> {
        let mut objects = Vec::new();

        for shape in self.profile.shapes() {
            let Some(keyword) = shape.matched_keyword(text) else {
                continue;
            };
            tracing::debug!(tag = shape.tag, keyword, index = objects.len(), "Shape matched");

            let object = build_object(shape, text, objects.len());
            objects.push(object);
        }

        if objects.is_empty() {
            tracing::debug!("No shape keyword found, using default cube");
        }
        objects
    }
}

fn build_object(shape: &ShapeEntry, text: &str, index: usize) -> SceneObject {
    let color = find_color(text).map_or(shape.default_color, |(_, color)| color);
    let scale = find_size(text).map_or(shape.default_scale, |(_, scale)| scale);

    SceneObject::new(shape.tag)
        .with_color(color)
        .with_scale(scale)
        .at(position_for(text, index))
}
