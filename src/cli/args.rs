//! Command line argument parsing and validation.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};

use crate::options::SigningMode;

/// AppGallery package generator for progressive web apps
#[derive(Parser, Debug)]
#[command(
    name = "agpack",
    version,
    about = "Generate and publish AppGallery app packages from a web-app manifest",
    long_about = "Generates a native AppGallery/Android package from a web-app manifest \
by resolving package options locally and submitting them to the remote build service.

Usage:
  agpack generate --manifest manifest.json --manifest-url https://example.com/manifest.json \\
      --app-url https://example.com/ --output ./example.apk
  agpack publish --client-id ID --client-key KEY --app-id APP --apk ./example.apk

Exit code 0 = artifact guaranteed to exist at the output path."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a package from a web-app manifest
    Generate(GenerateArgs),
    /// Publish an already-built package to the gallery
    Publish(PublishArgs),
}

/// Arguments for `agpack generate`.
#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Path to the web-app manifest JSON document
    #[arg(short, long, value_name = "FILE")]
    pub manifest: PathBuf,

    /// URL the manifest was served from (or a data: URI for inline manifests)
    #[arg(long, value_name = "URL")]
    pub manifest_url: String,

    /// URL of the web app itself
    #[arg(long, value_name = "URL")]
    pub app_url: String,

    /// Output path for the generated package
    ///
    /// Parent directories are created if they don't exist.
    /// Exit code 0 guarantees the artifact exists at this path.
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: PathBuf,

    /// JSON file holding a full set of option overrides
    ///
    /// Discrete flags below win over values from this file.
    #[arg(long, value_name = "FILE")]
    pub overrides: Option<PathBuf>,

    /// Reverse-domain package identifier
    #[arg(long, value_name = "ID")]
    pub package_id: Option<String>,

    /// Application name
    #[arg(long, value_name = "NAME")]
    pub app_name: Option<String>,

    /// Four-part version string (e.g. 1.2.0.0)
    #[arg(long, value_name = "VERSION")]
    pub app_version: Option<String>,

    /// Integer version code
    #[arg(long, value_name = "CODE")]
    pub app_version_code: Option<u32>,

    /// Theme color (CSS color string)
    #[arg(long, value_name = "COLOR")]
    pub theme_color: Option<String>,

    /// Background color (CSS color string)
    #[arg(long, value_name = "COLOR")]
    pub background_color: Option<String>,

    /// Signing mode: new, mine, none
    #[arg(long, value_name = "MODE")]
    pub signing_mode: Option<String>,

    /// Existing signing keystore, required with --signing-mode mine
    #[arg(long, value_name = "FILE")]
    pub signing_key: Option<PathBuf>,
}

/// Arguments for `agpack publish`.
#[derive(clap::Args, Debug)]
pub struct PublishArgs {
    /// Destination-service client id
    #[arg(long, value_name = "ID")]
    pub client_id: String,

    /// Destination-service client secret
    #[arg(long, value_name = "KEY", env = "AGPACK_CLIENT_KEY")]
    pub client_key: String,

    /// Target application id in the gallery
    #[arg(long, value_name = "ID")]
    pub app_id: String,

    /// Package to publish
    #[arg(long, value_name = "FILE")]
    pub apk: PathBuf,

    /// Where to write the service's response body, if anywhere
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        match &self.command {
            Command::Generate(args) => args.validate(),
            Command::Publish(_) => Ok(()),
        }
    }
}

impl GenerateArgs {
    fn validate(&self) -> Result<(), String> {
        let mode = match self.signing_mode.as_deref() {
            Some(mode) => Some(SigningMode::from_str(mode)?),
            None => None,
        };

        if mode == Some(SigningMode::Mine) && self.signing_key.is_none() {
            return Err("--signing-key is required with --signing-mode mine".to_owned());
        }
        if mode != Some(SigningMode::Mine) && self.signing_key.is_some() {
            return Err("--signing-key only makes sense with --signing-mode mine".to_owned());
        }

        Ok(())
    }
}
