//! Scene types - what the renderer receives
//!
//! ## Table of Contents
//! 1. HexColor - `#rrggbb` color
//! 2. Scale - strictly positive scale factor
//! 3. SceneObject - one placed object
//! 4. Lighting / Environment - ambient settings
//! 5. SceneDescriptor - the complete scene

use crate::error::{Result, SceneError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Position of an object in world space [x, y, z]
pub type Position = [f64; 3];

/// Where every object starts before positional hints are applied
pub const BASE_POSITION: Position = [0.0, 1.0, 0.0];

// ============================================================================
// 1. HexColor
// ============================================================================

/// RGB color, written on the wire as `#rrggbb`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    r: u8,
    g: u8,
    b: u8,
}

impl HexColor {
    /// Fallback color for objects without a type-specific default
    pub const CYAN: HexColor = HexColor::from_rgb(0x00, 0xff, 0xff);

    /// Create from channel values
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel values as (r, g, b)
    pub const fn rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self::CYAN
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || SceneError::InvalidColor(s.to_string());

        let digits = s.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::from_rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for HexColor {
    type Error = SceneError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

// ============================================================================
// 2. Scale
// ============================================================================

/// Uniform scale factor. Always finite and greater than zero.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Scale(f64);

impl Scale {
    /// Unit scale
    pub const ONE: Scale = Scale(1.0);

    /// Create a scale, rejecting zero, negative and non-finite values
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(SceneError::InvalidScale(value))
        }
    }

    /// Only for the static tables; their values are covered by tests.
    pub(crate) const fn from_table(value: f64) -> Self {
        Self(value)
    }

    /// Raw factor
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for Scale {
    type Error = SceneError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Scale> for f64 {
    fn from(scale: Scale) -> Self {
        scale.0
    }
}

// ============================================================================
// 3. SceneObject
// ============================================================================

/// A single placed object
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    /// Type tag (e.g. "cube", "car")
    #[serde(rename = "type")]
    pub kind: String,
    /// Model tag, when it differs from the type tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// World position
    pub position: Position,
    /// Surface color
    pub color: HexColor,
    /// Uniform scale
    pub scale: Scale,
    /// Where the object came from (e.g. "image_upload")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Free-form description, such as the caption an image produced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SceneObject {
    /// Create an object of the given type at the base position
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            model: None,
            position: BASE_POSITION,
            color: HexColor::CYAN,
            scale: Scale::ONE,
            source: None,
            description: None,
        }
    }

    /// The cyan unit cube used when nothing else was recognized
    pub fn default_cube() -> Self {
        Self::new("cube")
    }

    /// Set model tag
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set position
    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Set color
    pub fn with_color(mut self, color: HexColor) -> Self {
        self.color = color;
        self
    }

    /// Set scale
    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    /// Set source tag
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Model tag, falling back to the type tag
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(&self.kind)
    }
}

// ============================================================================
// 4. Lighting / Environment
// ============================================================================

/// Kind of scene light
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightingKind {
    /// Uniform ambient light
    #[default]
    Ambient,
}

/// Scene lighting
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lighting {
    /// Light kind
    #[serde(rename = "type")]
    pub kind: LightingKind,
    /// Intensity multiplier
    pub intensity: f64,
}

impl Lighting {
    /// Intensity for dark scenes
    pub const DIM: f64 = 0.5;
    /// Intensity with no lighting hints
    pub const NORMAL: f64 = 1.0;
    /// Intensity for bright or sunny scenes
    pub const BRIGHT: f64 = 1.5;

    /// Ambient light at the given intensity
    pub const fn ambient(intensity: f64) -> Self {
        Self {
            kind: LightingKind::Ambient,
            intensity,
        }
    }
}

impl Default for Lighting {
    fn default() -> Self {
        Self::ambient(Self::NORMAL)
    }
}

/// Backdrop the renderer draws behind the objects
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Default,
    Forest,
    Sunset,
    Night,
}

impl Environment {
    /// Wire name
    pub const fn as_str(self) -> &'static str {
        match self {
            Environment::Default => "default",
            Environment::Forest => "forest",
            Environment::Sunset => "sunset",
            Environment::Night => "night",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// 5. SceneDescriptor
// ============================================================================

/// Complete scene: objects in detection order plus lighting and environment.
///
/// Never empty. Constructors substitute the default cube for an empty
/// object list, and decoding rejects one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScene")]
pub struct SceneDescriptor {
    objects: Vec<SceneObject>,
    lighting: Lighting,
    environment: Environment,
}

impl SceneDescriptor {
    /// Build a scene; an empty object list becomes the default cube
    pub fn from_objects(
        mut objects: Vec<SceneObject>,
        lighting: Lighting,
        environment: Environment,
    ) -> Self {
        if objects.is_empty() {
            objects.push(SceneObject::default_cube());
        }
        Self {
            objects,
            lighting,
            environment,
        }
    }

    /// One object with default lighting and environment
    pub fn single(object: SceneObject) -> Self {
        Self {
            objects: vec![object],
            lighting: Lighting::default(),
            environment: Environment::default(),
        }
    }

    /// Objects in detection order
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Scene lighting
    pub fn lighting(&self) -> Lighting {
        self.lighting
    }

    /// Scene environment
    pub fn environment(&self) -> Environment {
        self.environment
    }
}

#[derive(Deserialize)]
struct RawScene {
    objects: Vec<SceneObject>,
    #[serde(default)]
    lighting: Lighting,
    #[serde(default)]
    environment: Environment,
}

impl TryFrom<RawScene> for SceneDescriptor {
    type Error = SceneError;

    fn try_from(raw: RawScene) -> Result<Self> {
        if raw.objects.is_empty() {
            return Err(SceneError::EmptyScene);
        }
        Ok(Self {
            objects: raw.objects,
            lighting: raw.lighting,
            environment: raw.environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_parse_and_display() {
        let color: HexColor = "#FF8800".parse().unwrap();
        assert_eq!(color.rgb(), (0xff, 0x88, 0x00));
        assert_eq!(color.to_string(), "#ff8800");
    }

    #[test]
    fn test_hex_color_rejects_malformed() {
        for bad in ["ff0000", "#ff00", "#ff00000", "#gg0000", "", "#"] {
            assert_eq!(
                bad.parse::<HexColor>(),
                Err(SceneError::InvalidColor(bad.to_string())),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn test_scale_rejects_non_positive() {
        assert!(Scale::new(0.5).is_ok());
        assert_eq!(Scale::new(0.0), Err(SceneError::InvalidScale(0.0)));
        assert_eq!(Scale::new(-1.0), Err(SceneError::InvalidScale(-1.0)));
        assert!(Scale::new(f64::NAN).is_err());
        assert!(Scale::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_model_falls_back_to_type() {
        let plain = SceneObject::new("sphere");
        assert_eq!(plain.model(), "sphere");

        let modeled = SceneObject::new("suit").with_model("ironman");
        assert_eq!(modeled.model(), "ironman");
    }

    #[test]
    fn test_object_wire_format() {
        let object = SceneObject::new("car")
            .with_color(HexColor::from_rgb(0xff, 0, 0))
            .with_scale(Scale::new(2.0).unwrap());

        let json = serde_json::to_value(&object).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "car",
                "position": [0.0, 1.0, 0.0],
                "color": "#ff0000",
                "scale": 2.0
            })
        );
    }

    #[test]
    fn test_object_decode_rejects_bad_values() {
        let bad_color = r##"{"type":"cube","position":[0,1,0],"color":"red","scale":1.0}"##;
        assert!(serde_json::from_str::<SceneObject>(bad_color).is_err());

        let bad_scale = r##"{"type":"cube","position":[0,1,0],"color":"#ff0000","scale":-2}"##;
        assert!(serde_json::from_str::<SceneObject>(bad_scale).is_err());
    }

    #[test]
    fn test_empty_object_list_becomes_default_cube() {
        let scene = SceneDescriptor::from_objects(Vec::new(), Lighting::default(), Environment::Night);
        assert_eq!(scene.objects(), &[SceneObject::default_cube()]);
        assert_eq!(scene.environment(), Environment::Night);
    }

    #[test]
    fn test_scene_decode_rejects_empty_objects() {
        let json = r#"{"objects":[],"lighting":{"type":"ambient","intensity":1.0},"environment":"default"}"#;
        assert!(serde_json::from_str::<SceneDescriptor>(json).is_err());
    }

    #[test]
    fn test_scene_wire_format() {
        let scene = SceneDescriptor::single(SceneObject::default_cube());
        let json = serde_json::to_value(&scene).unwrap();

        assert_eq!(json["lighting"], serde_json::json!({"type": "ambient", "intensity": 1.0}));
        assert_eq!(json["environment"], "default");
        assert_eq!(json["objects"][0]["color"], "#00ffff");

        let decoded: SceneDescriptor = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, scene);
    }
}
