//! Command execution: wire CLI arguments to the resolver and client.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use base64::Engine;
use log::info;

use crate::cli::args::{GenerateArgs, PublishArgs};
use crate::client::{BuildClient, PublishApk};
use crate::config::Endpoints;
use crate::error::{CliError, Result};
use crate::manifest::{Manifest, ManifestContext};
use crate::options::{self, PackageOverrides, SigningMode};

/// Run `agpack generate`.
pub async fn generate(args: &GenerateArgs) -> Result<i32> {
    let manifest = Manifest::from_json(&fs::read_to_string(&args.manifest)?)?;
    let ctx = ManifestContext::new(&args.manifest_url, &args.app_url)?;
    let overrides = build_overrides(args)?;

    let options = options::resolve(&manifest, &ctx, &overrides)?;
    let client = BuildClient::new(Endpoints::default())?;
    let artifact = client.generate(&options).await?;

    write_artifact(&args.output, &artifact)?;
    info!(
        "wrote {} bytes to {}",
        artifact.len(),
        args.output.display()
    );
    Ok(0)
}

/// Run `agpack publish`.
pub async fn publish(args: &PublishArgs) -> Result<i32> {
    let apk = fs::read(&args.apk)?;
    let payload = PublishApk {
        client_id: args.client_id.clone(),
        client_key: args.client_key.clone(),
        app_id: args.app_id.clone(),
        apk: base64::engine::general_purpose::STANDARD.encode(&apk),
    };

    let client = BuildClient::new(Endpoints::default())?;
    match client.publish(&payload).await? {
        Some(body) => {
            if let Some(output) = &args.output {
                write_artifact(output, &body)?;
            }
            info!("app {} published", args.app_id);
            Ok(0)
        }
        None => Err(CliError::InvalidArguments {
            reason: "client id, client key, and app id must not be empty".to_owned(),
        }
        .into()),
    }
}

/// Merge the overrides file (if any) with the discrete flags; flags win.
fn build_overrides(args: &GenerateArgs) -> Result<PackageOverrides> {
    let mut overrides = match &args.overrides {
        Some(path) => PackageOverrides::from_json(&fs::read_to_string(path)?)?,
        None => PackageOverrides::default(),
    };

    if let Some(package_id) = &args.package_id {
        overrides.package_id = Some(package_id.clone());
    }
    if let Some(app_name) = &args.app_name {
        overrides.app_name = Some(app_name.clone());
    }
    if let Some(app_version) = &args.app_version {
        overrides.app_version = Some(app_version.clone());
    }
    if let Some(code) = args.app_version_code {
        overrides.app_version_code = Some(code);
    }
    if let Some(theme_color) = &args.theme_color {
        overrides.theme_color = Some(theme_color.clone());
    }
    if let Some(background_color) = &args.background_color {
        overrides.background_color = Some(background_color.clone());
    }
    if let Some(mode) = args.signing_mode.as_deref() {
        // Args::validate already vetted the mode string.
        overrides.signing_mode =
            Some(SigningMode::from_str(mode).map_err(|reason| CliError::InvalidArguments {
                reason,
            })?);
    }
    if let Some(key_path) = &args.signing_key {
        let keystore = fs::read(key_path)?;
        overrides.signing_key_file =
            Some(base64::engine::general_purpose::STANDARD.encode(&keystore));
    }

    Ok(overrides)
}

fn write_artifact(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, bytes)?;
    Ok(())
}
