//! Default QR encoder backed by the `qrcode` crate

use crate::error::{Error, Result};
use crate::qr::QrRenderer;
use image::{DynamicImage, Luma};
use qrcode::QrCode;

/// QR code encoder
pub struct QrEncoder {
    /// Error correction level
    ecc_level: qrcode::EcLevel,
}

impl QrEncoder {
    /// Create a new QR encoder with default settings (Medium ECC)
    pub fn new() -> Self {
        Self {
            ecc_level: qrcode::EcLevel::M,
        }
    }

    /// Create a new QR encoder with a specific error correction level
    pub fn with_ecc_level(ecc_level: qrcode::EcLevel) -> Self {
        Self { ecc_level }
    }
}

impl QrRenderer for QrEncoder {
    fn render(&self, payload: &str) -> Result<DynamicImage> {
        let code = QrCode::with_error_correction_level(payload.as_bytes(), self.ecc_level)
            .map_err(|e| Error::QrEncode(format!("Failed to create QR code: {}", e)))?;

        let image = code
            .render::<Luma<u8>>()
            .min_dimensions(400, 400) // Minimum size for reliable scanning
            .build();

        Ok(DynamicImage::ImageLuma8(image))
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new()
    }
}
