//! Positional heuristic - places objects from spatial words in the text.
//!
//! No geometry is involved. Each object is offset by its detection index so
//! objects mentioned one after another do not land on the same spot.

use crate::types::{Position, BASE_POSITION};

/// Position for the object at `index` (0-based, detection order).
///
/// Matching is case-insensitive. Rules apply in order and later rules
/// overwrite earlier ones on the same axis:
///
/// 1. `left` → x = -2(index+1), else `right` → x = 2(index+1)
/// 2. `next to` / `beside` → x = 2·index, z = 0;
///    else `behind` → z = -2(index+1), else `front` → z = 2(index+1)
/// 3. `above` / `top` → y = 3, else `ground` / `floor` → y = 0.5
pub fn extract_position(text: &str, index: usize) -> Position {
    position_for(&text.to_lowercase(), index)
}

/// Same as [`extract_position`] for text that is already lowercase.
pub(crate) fn position_for(text: &str, index: usize) -> Position {
    let [mut x, mut y, mut z] = BASE_POSITION;
    let step = 2.0 * (index as f64 + 1.0);

    if text.contains("left") {
        x = -step;
    } else if text.contains("right") {
        x = step;
    }

    if text.contains("next to") || text.contains("beside") {
        x = 2.0 * index as f64;
        z = 0.0;
    } else if text.contains("behind") {
        z = -step;
    } else if text.contains("front") {
        z = step;
    }

    if text.contains("above") || text.contains("top") {
        y = 3.0;
    } else if text.contains("ground") || text.contains("floor") {
        y = 0.5;
    }

    [x, y, z]
}
