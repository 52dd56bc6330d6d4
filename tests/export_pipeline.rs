//! End-to-end pipeline tests over fixture backups

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use otplink::config::OutputOptions;
use otplink::{Error, Exporter};
use serde_json::json;

fn service(
    name: &str,
    secret: &str,
    account: Option<&str>,
    issuer: Option<&str>,
) -> serde_json::Value {
    let mut otp = json!({ "algorithm": "SHA1", "digits": 6, "period": 30 });
    if let Some(account) = account {
        otp["account"] = json!(account);
    }
    if let Some(issuer) = issuer {
        otp["issuer"] = json!(issuer);
    }
    json!({ "name": name, "secret": secret, "otp": otp })
}

fn write_fixture(dir: &Path, backup: &serde_json::Value) -> Result<PathBuf> {
    let path = dir.join("backup.json");
    fs::write(&path, serde_json::to_string_pretty(backup)?)?;
    Ok(path)
}

fn output_options(dir: &Path) -> OutputOptions {
    OutputOptions {
        qr_dir: dir.join("qrcodes"),
        links_file: dir.join("links.txt"),
    }
}

fn png_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("read output dir")
        .map(|entry| entry.expect("dir entry").file_name().into_string().unwrap())
        .filter(|name| name.ends_with(".png"))
        .collect();
    names.sort();
    names
}

#[test]
fn exports_one_qr_and_one_link_per_service_in_order() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let backup = json!({
        "schemaVersion": 4,
        "services": [
            service("Alpha", "AAAAAAAA", Some("a@example.com"), Some("AlphaCo")),
            service("Beta", "BBBBBBBB", Some("b@example.com"), Some("BetaCo")),
            service("Gamma", "CCCCCCCC", Some("c@example.com"), Some("GammaCo")),
        ],
    });
    let backup_path = write_fixture(dir.path(), &backup)?;

    let output = output_options(dir.path());
    let summary = Exporter::new(&output).export_file(&backup_path)?;

    assert_eq!(summary.services, 3);
    assert_eq!(png_files(&output.qr_dir).len(), 3);

    let links = fs::read_to_string(&output.links_file)?;
    let lines: Vec<&str> = links.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("secret=AAAAAAAA"));
    assert!(lines[1].contains("secret=BBBBBBBB"));
    assert!(lines[2].contains("secret=CCCCCCCC"));

    Ok(())
}

#[test]
fn link_and_filename_are_exact_for_known_service() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let backup = json!({
        "schemaVersion": 4,
        "services": [
            service("My Service", "JBSWY3DPEHPK3PXP", Some("bob@example.com"), Some("MyIssuer")),
        ],
    });
    let backup_path = write_fixture(dir.path(), &backup)?;

    let output = output_options(dir.path());
    Exporter::new(&output).export_file(&backup_path)?;

    let links = fs::read_to_string(&output.links_file)?;
    assert_eq!(
        links,
        "otpauth://totp/My+Service:bob%40example.com?secret=JBSWY3DPEHPK3PXP&issuer=MyIssuer&algorithm=SHA1&digits=6&period=30"
    );

    // Filename stem is derived from the encoded account/issuer.
    assert_eq!(
        png_files(&output.qr_dir),
        vec!["MyServicebob40examplecomMyIssuer.png".to_string()]
    );

    Ok(())
}

#[test]
fn missing_optional_fields_substitute_markers() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let backup = json!({
        "schemaVersion": 4,
        "services": [service("Plain", "JBSWY3DPEHPK3PXP", None, None)],
    });
    let backup_path = write_fixture(dir.path(), &backup)?;

    let output = output_options(dir.path());
    Exporter::new(&output).export_file(&backup_path)?;

    let links = fs::read_to_string(&output.links_file)?;
    assert_eq!(
        links,
        "otpauth://totp/Plain:?secret=JBSWY3DPEHPK3PXP&issuer=&algorithm=SHA1&digits=6&period=30"
    );
    assert_eq!(
        png_files(&output.qr_dir),
        vec!["Plainnoaccountnoissuer.png".to_string()]
    );

    Ok(())
}

#[test]
fn rejects_wrong_schema_version_before_writing_anything() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let backup = json!({
        "schemaVersion": 3,
        "services": [service("Old", "EEEEEEEE", None, None)],
    });
    let backup_path = write_fixture(dir.path(), &backup)?;

    let output = output_options(dir.path());
    let err = Exporter::new(&output)
        .export_file(&backup_path)
        .unwrap_err();

    assert!(matches!(err, Error::SchemaVersion { .. }));
    assert!(!output.qr_dir.exists());
    assert!(!output.links_file.exists());

    Ok(())
}

#[test]
fn second_run_overwrites_with_identical_content() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let backup = json!({
        "schemaVersion": 4,
        "services": [
            service("Alpha", "AAAAAAAA", Some("a@example.com"), None),
            service("Beta", "BBBBBBBB", None, Some("BetaCo")),
        ],
    });
    let backup_path = write_fixture(dir.path(), &backup)?;

    let output = output_options(dir.path());
    let exporter = Exporter::new(&output);

    exporter.export_file(&backup_path)?;
    let first_links = fs::read_to_string(&output.links_file)?;
    let first_files = png_files(&output.qr_dir);

    exporter.export_file(&backup_path)?;
    let second_links = fs::read_to_string(&output.links_file)?;
    let second_files = png_files(&output.qr_dir);

    assert_eq!(first_links, second_links);
    assert_eq!(first_files, second_files);

    Ok(())
}

#[test]
fn colliding_stems_silently_overwrite() -> Result<()> {
    let dir = tempfile::tempdir()?;
    // "AB_C" and "ABC_" sanitize to the same stem; the later entry wins.
    let backup = json!({
        "schemaVersion": 4,
        "services": [
            service("AB_C", "AAAAAAAA", None, None),
            service("ABC_", "BBBBBBBB", None, None),
        ],
    });
    let backup_path = write_fixture(dir.path(), &backup)?;

    let output = output_options(dir.path());
    let summary = Exporter::new(&output).export_file(&backup_path)?;

    assert_eq!(summary.services, 2);
    assert_eq!(png_files(&output.qr_dir).len(), 1);
    assert_eq!(fs::read_to_string(&output.links_file)?.lines().count(), 2);

    Ok(())
}
