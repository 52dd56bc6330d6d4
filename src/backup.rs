//! Typed model of the 2FA backup file and its loader

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Backup schema version this tool understands
pub const SUPPORTED_SCHEMA_VERSION: u32 = 4;

/// A parsed authenticator backup
///
/// Unknown fields in the export are ignored; everything is read-only after
/// load and each run derives fresh output from it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    /// Structural version marker of the export format
    pub schema_version: Option<u32>,
    /// Enrolled services, in export order
    pub services: Vec<ServiceEntry>,
}

/// One enrolled service in the backup
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceEntry {
    /// Display name of the service
    pub name: String,
    /// Base32 shared key, passed through unvalidated
    pub secret: String,
    /// OTP enrollment parameters
    pub otp: OtpParams,
}

/// OTP enrollment parameters for a service
#[derive(Debug, Clone, Deserialize)]
pub struct OtpParams {
    /// Account label, absent in some exports
    pub account: Option<String>,
    /// Issuer label, absent in some exports
    pub issuer: Option<String>,
    /// Digest algorithm name (e.g. `SHA1`)
    pub algorithm: String,
    /// Number of code digits
    pub digits: u32,
    /// Code validity period in seconds
    pub period: u32,
}

impl Backup {
    /// Load and validate a backup file.
    ///
    /// Fails on unreadable or malformed input, and on any schema version
    /// other than [`SUPPORTED_SCHEMA_VERSION`]. No output is produced for a
    /// rejected backup.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Other(format!("Failed to read {}: {e}", path.display())))?;

        let backup: Backup = serde_json::from_str(&contents).map_err(|e| Error::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        backup.check_schema_version()?;
        Ok(backup)
    }

    fn check_schema_version(&self) -> Result<()> {
        match self.schema_version {
            Some(SUPPORTED_SCHEMA_VERSION) => Ok(()),
            Some(other) => Err(Error::SchemaVersion {
                found: other.to_string(),
                expected: SUPPORTED_SCHEMA_VERSION,
            }),
            None => Err(Error::SchemaVersion {
                found: "absent".to_string(),
                expected: SUPPORTED_SCHEMA_VERSION,
            }),
        }
    }
}
