//! Persistence of export artifacts: QR images and the aggregated link file

use crate::error::Result;
use crate::qr::QrRenderer;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes one QR image per service under the output directory.
pub struct QrEmitter<'a> {
    renderer: &'a dyn QrRenderer,
    output_dir: PathBuf,
}

impl<'a> QrEmitter<'a> {
    /// Create an emitter, ensuring the output directory exists.
    ///
    /// Intermediate directories are created as needed; an existing directory
    /// is not an error.
    pub fn new(renderer: &'a dyn QrRenderer, output_dir: &Path) -> Result<Self> {
        fs::create_dir_all(output_dir)?;
        Ok(Self {
            renderer,
            output_dir: output_dir.to_path_buf(),
        })
    }

    /// Render the payload and persist it as `{output_dir}/{stem}.png`.
    ///
    /// An existing file of the same name is overwritten.
    pub fn emit(&self, payload: &str, stem: &str) -> Result<PathBuf> {
        let path = self.output_dir.join(format!("{stem}.png"));
        let image = self.renderer.render(payload)?;
        image.save(&path)?;
        Ok(path)
    }
}

/// Write the accumulated links newline-joined to `path`, overwriting any
/// existing file. No trailing newline beyond the join.
pub fn write_links(links: &[String], path: &Path) -> Result<()> {
    fs::write(path, links.join("\n"))?;
    Ok(())
}

/// Outcome of a completed export run
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    /// Number of services converted
    pub services: usize,
    /// Directory holding the generated QR images
    pub qr_dir: PathBuf,
    /// Path of the aggregated link file
    pub links_file: PathBuf,
}

impl ExportSummary {
    /// Human-readable lines for terminal presentation
    pub fn human_lines(&self) -> Vec<String> {
        vec![
            format!("Converted {} service(s)", self.services),
            format!("QR codes saved in {}", self.qr_dir.display()),
            format!("TOTP links saved in {}", self.links_file.display()),
        ]
    }
}
