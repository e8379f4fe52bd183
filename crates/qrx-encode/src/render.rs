//! Contract with the QR rasterizer.
//!
//! Drawing modules is someone else's job. This crate hands over one fragment
//! and the frame geometry, and gets back whatever image type the renderer uses.

use serde::{Deserialize, Serialize};

use crate::part::Fragment;

/// Default background color for display frames (hex RGB).
pub const DEFAULT_BACKGROUND: &str = "bdbdbd";

/// Frame geometry for one rendered fragment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Quiet zone in modules.
    pub border: u32,
    /// Background color as hex RGB; `None` leaves the renderer's default.
    pub background: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 240,
            height: 240,
            border: 3,
            background: Some(DEFAULT_BACKGROUND.to_string()),
        }
    }
}

impl RenderOptions {
    /// Same geometry with no background override.
    #[must_use]
    pub fn without_background(&self) -> Self {
        Self {
            background: None,
            ..self.clone()
        }
    }
}

/// Turns a fragment into an image.
pub trait FragmentRenderer {
    /// Rendered image.
    type Image;
    /// Rendering failure.
    type Error: std::fmt::Display;

    /// Render `fragment` with `options`.
    ///
    /// # Errors
    /// Whatever the rasterizer reports.
    fn render(&self, fragment: &Fragment, options: &RenderOptions) -> Result<Self::Image, Self::Error>;
}
