//! otplink - convert 2FA authenticator backups into scannable QR codes
//!
//! This library turns a JSON authenticator backup (schema version 4) into
//! one `otpauth://` enrollment URI per service, persisted both as scannable
//! QR images and as a plain-text link list for re-enrolling accounts in a
//! new authenticator app.
//!
//! # Features
//!
//! - **Typed backup model**: strict schema-version gate, tolerant of
//!   missing optional fields
//! - **Faithful URI construction**: form-style percent-encoding with fixed
//!   query field order
//! - **Pluggable QR rendering**: the encoder sits behind a trait so the
//!   pipeline is testable without image generation
//!
//! # Example
//!
//! ```no_run
//! use otplink::config::OutputOptions;
//! use otplink::Exporter;
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let exporter = Exporter::new(&OutputOptions::default());
//!     let summary = exporter.export_file(Path::new("backup.json"))?;
//!
//!     println!("Converted {} services", summary.services);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod backup;
pub mod config;
pub mod error;
pub mod logging;
pub mod otpauth;
pub mod output;
pub mod qr;

// Re-exports for convenience
pub use error::{Error, Result};

pub use backup::{Backup, OtpParams, ServiceEntry};
pub use config::{LogRotation, LoggingOptions, OtplinkConfig, OutputOptions};
pub use output::ExportSummary;
pub use qr::{QrEncoder, QrRenderer};

use output::QrEmitter;
use std::path::{Path, PathBuf};

/// High-level pipeline turning a backup into QR images plus a link file
pub struct Exporter {
    renderer: Box<dyn QrRenderer>,
    qr_dir: PathBuf,
    links_file: PathBuf,
}

impl Exporter {
    /// Create an exporter using the default QR encoder.
    pub fn new(output: &OutputOptions) -> Self {
        Self::with_renderer(Box::new(QrEncoder::new()), output)
    }

    /// Create an exporter with an injected QR renderer.
    pub fn with_renderer(renderer: Box<dyn QrRenderer>, output: &OutputOptions) -> Self {
        Self {
            renderer,
            qr_dir: output.qr_dir.clone(),
            links_file: output.links_file.clone(),
        }
    }

    /// Load the backup at `path` and export it.
    pub fn export_file(&self, path: &Path) -> Result<ExportSummary> {
        let backup = Backup::load(path)?;
        tracing::info!(services = backup.services.len(), "Loaded backup");
        self.run(&backup)
    }

    /// Export an already-loaded backup.
    ///
    /// Services are processed strictly in input order. The link file is
    /// written only after every QR image has been persisted, so a mid-run
    /// failure leaves it absent while already-written images remain.
    pub fn run(&self, backup: &Backup) -> Result<ExportSummary> {
        let emitter = QrEmitter::new(self.renderer.as_ref(), &self.qr_dir)?;

        let mut links = Vec::with_capacity(backup.services.len());
        for service in &backup.services {
            let link = otpauth::totp_uri(service);
            let stem = otpauth::qr_filename(service);
            let path = emitter.emit(&link, &stem)?;
            tracing::debug!(service = %service.name, path = %path.display(), "Wrote QR image");
            links.push(link);
        }

        output::write_links(&links, &self.links_file)?;

        Ok(ExportSummary {
            services: links.len(),
            qr_dir: self.qr_dir.clone(),
            links_file: self.links_file.clone(),
        })
    }
}
