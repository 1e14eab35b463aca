//! Keyword Tables - static lookup tables driving scene generation
//!
//! Every table is a slice, and its declaration order is part of the
//! behavior: lookups return the first entry whose keyword occurs in the
//! text, so earlier entries win ties.
//!
//! ## Table of Contents
//! 1. Shape tables and KeywordProfile
//! 2. Color table
//! 3. Size table
//! 4. Object-to-model table (image captions)
//! 5. Lookup helpers

use crate::error::SceneError;
use crate::types::{HexColor, Scale};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const RED: HexColor = HexColor::from_rgb(0xff, 0x00, 0x00);
const WHITE: HexColor = HexColor::from_rgb(0xff, 0xff, 0xff);
const GRAY: HexColor = HexColor::from_rgb(0x80, 0x80, 0x80);
const CYAN: HexColor = HexColor::CYAN;

const UNIT: Scale = Scale::ONE;
const VEHICLE: Scale = Scale::from_table(2.0);
const FIGURE: Scale = Scale::from_table(1.5);

// ============================================================================
// 1. Shape tables
// ============================================================================

/// A type tag, the words that trigger it and its renderer defaults
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeEntry {
    /// Canonical type tag
    pub tag: &'static str,
    /// Trigger words and phrases, checked in order
    pub keywords: &'static [&'static str],
    /// Color used when the text names none
    pub default_color: HexColor,
    /// Scale used when the text names no size
    pub default_scale: Scale,
}

impl ShapeEntry {
    /// First keyword of this entry found in `text`
    pub fn matched_keyword(&self, text: &str) -> Option<&'static str> {
        self.keywords.iter().copied().find(|keyword| text.contains(keyword))
    }
}

const CUBE: ShapeEntry = ShapeEntry {
    tag: "cube",
    keywords: &["cube", "box", "square"],
    default_color: CYAN,
    default_scale: UNIT,
};

const SPHERE: ShapeEntry = ShapeEntry {
    tag: "sphere",
    keywords: &["sphere", "ball", "orb", "globe"],
    default_color: CYAN,
    default_scale: UNIT,
};

const CYLINDER: ShapeEntry = ShapeEntry {
    tag: "cylinder",
    keywords: &["cylinder", "tube", "pipe"],
    default_color: CYAN,
    default_scale: UNIT,
};

const CONE: ShapeEntry = ShapeEntry {
    tag: "cone",
    keywords: &["cone", "pyramid"],
    default_color: CYAN,
    default_scale: UNIT,
};

const CAR: ShapeEntry = ShapeEntry {
    tag: "car",
    keywords: &["car", "vehicle", "truck", "automobile"],
    default_color: RED,
    default_scale: VEHICLE,
};

const AIRPLANE: ShapeEntry = ShapeEntry {
    tag: "airplane",
    keywords: &["airplane", "aeroplane", "aircraft", "plane", "jet"],
    default_color: WHITE,
    default_scale: VEHICLE,
};

const ROBOT: ShapeEntry = ShapeEntry {
    tag: "robot",
    keywords: &["robot", "android", "droid"],
    default_color: GRAY,
    default_scale: FIGURE,
};

const SUIT: ShapeEntry = ShapeEntry {
    tag: "suit",
    keywords: &["iron man", "ironman", "armor", "armour", "suit"],
    default_color: RED,
    default_scale: FIGURE,
};

/// Geometric primitives only
pub static PRIMITIVE_SHAPES: &[ShapeEntry] = &[CUBE, SPHERE, CYLINDER, CONE];

/// Primitives followed by vehicles, aircraft, robots and armored suits.
///
/// Keywords match anywhere in the text, inside longer words too: "scary"
/// contains `car` and "planet" contains `plane`.
pub static EXTENDED_SHAPES: &[ShapeEntry] =
    &[CUBE, SPHERE, CYLINDER, CONE, CAR, AIRPLANE, ROBOT, SUIT];

/// Which shape table the generator scans
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordProfile {
    /// Cube, sphere, cylinder and cone
    Primitives,
    /// Primitives plus car, airplane, robot and suit
    #[default]
    Extended,
}

impl KeywordProfile {
    /// The shape table for this profile
    pub fn shapes(self) -> &'static [ShapeEntry] {
        match self {
            KeywordProfile::Primitives => PRIMITIVE_SHAPES,
            KeywordProfile::Extended => EXTENDED_SHAPES,
        }
    }

    /// Config/wire name
    pub const fn as_str(self) -> &'static str {
        match self {
            KeywordProfile::Primitives => "primitives",
            KeywordProfile::Extended => "extended",
        }
    }
}

impl fmt::Display for KeywordProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeywordProfile {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "primitives" => Ok(KeywordProfile::Primitives),
            "extended" => Ok(KeywordProfile::Extended),
            other => Err(SceneError::UnknownProfile(other.to_string())),
        }
    }
}

// ============================================================================
// 2. Color table
// ============================================================================

/// Color names and their values
pub static COLORS: &[(&str, HexColor)] = &[
    ("red", RED),
    ("blue", HexColor::from_rgb(0x00, 0x00, 0xff)),
    ("green", HexColor::from_rgb(0x00, 0xff, 0x00)),
    ("yellow", HexColor::from_rgb(0xff, 0xff, 0x00)),
    ("orange", HexColor::from_rgb(0xff, 0x88, 0x00)),
    ("purple", HexColor::from_rgb(0x88, 0x00, 0xff)),
    ("pink", HexColor::from_rgb(0xff, 0x00, 0xff)),
    ("white", WHITE),
    ("black", HexColor::from_rgb(0x00, 0x00, 0x00)),
    ("cyan", CYAN),
    ("magenta", HexColor::from_rgb(0xff, 0x00, 0xff)),
    ("gray", GRAY),
    ("grey", GRAY),
    ("silver", HexColor::from_rgb(0xc0, 0xc0, 0xc0)),
    ("gold", HexColor::from_rgb(0xff, 0xd7, 0x00)),
];

// ============================================================================
// 3. Size table
// ============================================================================

/// Size adjectives and their scale multipliers
pub static SIZES: &[(&str, Scale)] = &[
    ("small", Scale::from_table(0.5)),
    ("tiny", Scale::from_table(0.3)),
    ("large", Scale::from_table(2.0)),
    ("big", Scale::from_table(2.0)),
    ("huge", Scale::from_table(3.0)),
    ("medium", Scale::from_table(1.0)),
];

// ============================================================================
// 4. Object-to-model table
// ============================================================================

/// Renderer metadata for a noun found in an image caption
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelEntry {
    /// Noun or phrase looked for in the caption
    pub key: &'static str,
    /// Type tag
    pub tag: &'static str,
    /// Model tag
    pub model: &'static str,
    /// Default scale
    pub scale: Scale,
    /// Default color
    pub color: HexColor,
}

const fn entry(
    key: &'static str,
    tag: &'static str,
    model: &'static str,
    scale: Scale,
    color: HexColor,
) -> ModelEntry {
    ModelEntry {
        key,
        tag,
        model,
        scale,
        color,
    }
}

/// Caption nouns, most specific first
pub static OBJECT_MODELS: &[ModelEntry] = &[
    entry("iron man", "suit", "ironman", FIGURE, RED),
    entry("ironman", "suit", "ironman", FIGURE, RED),
    entry("armor", "suit", "ironman", FIGURE, RED),
    entry("robot", "robot", "robot", FIGURE, GRAY),
    entry("android", "robot", "robot", FIGURE, GRAY),
    entry("car", "car", "car", VEHICLE, RED),
    entry("truck", "car", "truck", VEHICLE, RED),
    entry("vehicle", "car", "car", VEHICLE, RED),
    entry("airplane", "airplane", "airplane", VEHICLE, WHITE),
    entry("aircraft", "airplane", "airplane", VEHICLE, WHITE),
    entry("plane", "airplane", "airplane", VEHICLE, WHITE),
    entry("jet", "airplane", "jet", VEHICLE, WHITE),
    entry("cube", "cube", "cube", UNIT, CYAN),
    entry("box", "cube", "cube", UNIT, CYAN),
    entry("sphere", "sphere", "sphere", UNIT, CYAN),
    entry("ball", "sphere", "sphere", UNIT, CYAN),
    entry("cylinder", "cylinder", "cylinder", UNIT, CYAN),
    entry("cone", "cone", "cone", UNIT, CYAN),
    entry("pyramid", "cone", "cone", UNIT, CYAN),
];

// ============================================================================
// 5. Lookup helpers
// ============================================================================

/// First color whose name occurs in `text`
pub fn find_color(text: &str) -> Option<(&'static str, HexColor)> {
    COLORS.iter().copied().find(|(name, _)| text.contains(name))
}

/// First size adjective occurring in `text`
pub fn find_size(text: &str) -> Option<(&'static str, Scale)> {
    SIZES.iter().copied().find(|(word, _)| text.contains(word))
}

/// First model entry whose key occurs in `text`
pub fn find_model(text: &str) -> Option<&'static ModelEntry> {
    OBJECT_MODELS.iter().find(|entry| text.contains(entry.key))
}
