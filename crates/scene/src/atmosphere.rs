//! Lighting and environment inference.
//!
//! Both checks run on the lowercase text independently of object
//! detection. Within each category the first matching branch wins.

use crate::types::{Environment, Lighting};

/// `dark` dims the light; otherwise `bright` or `sunny` brightens it.
pub fn infer_lighting(text: &str) -> Lighting {
    if text.contains("dark") {
        Lighting::ambient(Lighting::DIM)
    } else if text.contains("bright") || text.contains("sunny") {
        Lighting::ambient(Lighting::BRIGHT)
    } else {
        Lighting::default()
    }
}

/// `forest`, then `sunset`/`evening`, then `night`.
pub fn infer_environment(text: &str) -> Environment {
    if text.contains("forest") {
        Environment::Forest
    } else if text.contains("sunset") || text.contains("evening") {
        Environment::Sunset
    } else if text.contains("night") {
        Environment::Night
    } else {
        Environment::Default
    }
}
