//! QR code encoding
//!
//! Rendering is modeled as a capability so the export pipeline can be
//! exercised without producing real images.

mod encoder;

pub use encoder::QrEncoder;

use crate::error::Result;
use image::DynamicImage;

/// Capability for turning a string payload into a scannable image.
pub trait QrRenderer {
    /// Render the payload into an image ready to be persisted.
    fn render(&self, payload: &str) -> Result<DynamicImage>;
}
