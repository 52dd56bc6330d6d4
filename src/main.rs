//! otplink CLI entrypoint

use clap::Parser;
use clap::error::ErrorKind;
use otplink::{Error, Exporter, OtplinkConfig, Result, logging};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "otplink",
    version,
    about = "Convert 2FA authenticator backups into scannable otpauth:// QR codes"
)]
struct Cli {
    /// Path to the backup file (JSON, schema version 4)
    #[arg(value_name = "BACKUP")]
    backup: PathBuf,

    /// Optional configuration file (toml/yaml). Defaults to otplink.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the directory QR images are written to
    #[arg(long, value_name = "PATH")]
    output_dir: Option<PathBuf>,

    /// Override the path of the aggregated link file
    #[arg(long, value_name = "PATH")]
    links_file: Option<PathBuf>,

    /// Output the run summary as formatted JSON instead of human-readable text
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::Usage(message)) => {
            // Usage problems go to stdout, exit status 1.
            println!("{message}");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(Error::Usage(err.to_string())),
    };

    let mut config = OtplinkConfig::load(cli.config.as_deref())?;

    if let Some(dir) = cli.output_dir {
        config.output.qr_dir = dir;
    }

    if let Some(path) = cli.links_file {
        config.output.links_file = path;
    }

    logging::init(&config.logging)?;

    let exporter = Exporter::new(&config.output);
    let summary = exporter.export_file(&cli.backup)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for line in summary.human_lines() {
            println!("{line}");
        }
    }

    Ok(())
}
