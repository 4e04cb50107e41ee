//! Optional third-party animation library hook
//!
//! Pages that ship a scroll-animation library expose it to the controller
//! through [`AnimationLibrary`]; the controller initializes it exactly once.

use serde::Deserialize;

/// Initialization options handed to the library
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnimationLibraryOptions {
    pub duration: u32,
    pub offset: u32,
    pub easing: String,
    /// Animate each element only the first time it scrolls into view
    pub once: bool,
}

impl Default for AnimationLibraryOptions {
    fn default() -> Self {
        Self {
            duration: 1000,
            offset: 100,
            easing: "ease-in-out".into(),
            once: true,
        }
    }
}

/// Host-provided animation library
pub trait AnimationLibrary {
    /// Library name, for logs
    fn name(&self) -> &str;

    /// Initialize with the page's options
    fn init(&mut self, options: &AnimationLibraryOptions);
}
