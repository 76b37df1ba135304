//! Package-options resolution.
//!
//! Merges three layers into one [`PackageOptions`] record: explicit user
//! overrides, manifest-derived values, and built-in defaults, in that
//! order. Resolution is pure: the same manifest, context, and overrides
//! always produce the same record, and nothing is fetched.

use url::Url;

use crate::error::{AgpackError, Result};
use crate::manifest::{
    find_best_app_icon, find_maskable_icon, find_monochrome_icon, Manifest, ManifestContext,
};
use crate::options::overrides::PackageOverrides;
use crate::options::package::{AdSlotId, DisplayMode, FeatureToggle, Features, PackageOptions};
use crate::options::signing::{SigningMode, SigningOptions};

const DEFAULT_APP_VERSION: &str = "1.0.0.0";
const DEFAULT_APP_VERSION_CODE: u32 = 1;
const DEFAULT_LIGHT_COLOR: &str = "#FFFFFF";
const DEFAULT_DARK_COLOR: &str = "#000000";
const DEFAULT_FALLBACK_TYPE: &str = "customtabs";
const DEFAULT_SPLASH_FADE_OUT_MS: u32 = 300;
const DEFAULT_KEY_ALIAS: &str = "my-key-alias";
const DEFAULT_ORGANIZATIONAL_UNIT: &str = "Engineering";
const DEFAULT_COUNTRY_CODE: &str = "US";
const DEFAULT_ORIENTATION: &str = "default";

/// Trailing segment appended to derived package identifiers.
const PACKAGE_ID_SUFFIX: &str = "app";

/// Resolve a validated-ready [`PackageOptions`] from a manifest, its URL
/// context, and an optional set of user overrides.
///
/// Every optional field resolves override → manifest → constant. Icon
/// URLs and the start URL are made absolute against the manifest URL
/// (or the page URL for inline data-URI manifests).
///
/// # Errors
///
/// - [`AgpackError::Manifest`] when the manifest declares neither a
///   `name` nor a `short_name`.
/// - [`AgpackError::NoSuitableIcon`] when no override icon is given and
///   the manifest has no square PNG of at least 192x192.
/// - [`AgpackError::Url`] when a URL field cannot be resolved.
pub fn resolve(
    manifest: &Manifest,
    ctx: &ManifestContext,
    overrides: &PackageOverrides,
) -> Result<PackageOptions> {
    if manifest.name.is_none() && manifest.short_name.is_none() {
        return Err(AgpackError::Manifest(
            "the manifest must declare a name or a short_name".to_owned(),
        ));
    }

    let base = ctx.resolution_base();

    // Short name is preferred for anything shown under the icon.
    let app_name = overrides
        .app_name
        .clone()
        .or_else(|| manifest.short_name.clone())
        .or_else(|| manifest.name.clone())
        .unwrap_or_default();
    let name = overrides
        .app_name
        .clone()
        .or_else(|| manifest.name.clone())
        .unwrap_or_else(|| app_name.clone());
    let launcher_name = overrides
        .launcher_name
        .clone()
        .or_else(|| manifest.short_name.clone())
        .unwrap_or_else(|| app_name.clone());

    let host = overrides
        .host
        .clone()
        .unwrap_or_else(|| ctx.page_url().to_string());
    let package_id = overrides
        .package_id
        .clone()
        .unwrap_or_else(|| generate_package_id(ctx.page_url().host_str().unwrap_or_default()));

    let display = overrides
        .display
        .unwrap_or_else(|| DisplayMode::from_manifest(manifest.display.as_deref()));

    let theme_color = overrides
        .theme_color
        .clone()
        .or_else(|| manifest.theme_color.clone())
        .unwrap_or_else(|| DEFAULT_LIGHT_COLOR.to_owned());
    let background_color = overrides
        .background_color
        .clone()
        .or_else(|| manifest.background_color.clone())
        .or_else(|| manifest.theme_color.clone())
        .unwrap_or_else(|| DEFAULT_LIGHT_COLOR.to_owned());
    let navigation_fallback = manifest
        .theme_color
        .clone()
        .or_else(|| manifest.background_color.clone())
        .unwrap_or_else(|| DEFAULT_DARK_COLOR.to_owned());
    let navigation_color = overrides
        .navigation_color
        .clone()
        .unwrap_or_else(|| navigation_fallback.clone());
    let navigation_color_dark = overrides
        .navigation_color_dark
        .clone()
        .unwrap_or_else(|| navigation_fallback.clone());
    let navigation_divider_color = overrides
        .navigation_divider_color
        .clone()
        .unwrap_or_else(|| navigation_fallback.clone());
    let navigation_divider_color_dark = overrides
        .navigation_divider_color_dark
        .clone()
        .unwrap_or_else(|| navigation_fallback.clone());

    let icon_url = match overrides.icon_url.as_deref() {
        Some(url) => absolute_url(Some(url), base)?,
        None => match find_best_app_icon(&manifest.icons) {
            Some(icon) => absolute_url(Some(&icon.src), base)?,
            None => return Err(AgpackError::NoSuitableIcon),
        },
    };
    let maskable_icon_url = match overrides.maskable_icon_url.as_deref() {
        Some(url) => absolute_url(Some(url), base)?,
        None => absolute_url(
            find_maskable_icon(&manifest.icons).map(|icon| icon.src.as_str()),
            base,
        )?,
    };
    let monochrome_icon_url = match overrides.monochrome_icon_url.as_deref() {
        Some(url) => absolute_url(Some(url), base)?,
        None => absolute_url(
            find_monochrome_icon(&manifest.icons).map(|icon| icon.src.as_str()),
            base,
        )?,
    };

    let start_url = start_url_relative_to_host(
        overrides
            .start_url
            .as_deref()
            .or(manifest.start_url.as_deref()),
        base,
    )?;
    let web_manifest_url = overrides
        .web_manifest_url
        .clone()
        .unwrap_or_else(|| ctx.manifest_url().to_owned());

    let signing_mode = overrides.signing_mode.unwrap_or_default();
    let signing = match signing_mode {
        // Unsigned packages carry an empty signing block.
        SigningMode::None => SigningOptions::default(),
        SigningMode::New | SigningMode::Mine => SigningOptions {
            file: overrides.signing_key_file.clone(),
            alias: overrides
                .key_alias
                .clone()
                .unwrap_or_else(|| DEFAULT_KEY_ALIAS.to_owned()),
            full_name: overrides
                .key_full_name
                .clone()
                .unwrap_or_else(|| format!("{app_name} Admin")),
            organization: overrides
                .key_organization
                .clone()
                .or_else(|| manifest.name.clone())
                .unwrap_or_else(|| app_name.clone()),
            organizational_unit: overrides
                .key_organizational_unit
                .clone()
                .unwrap_or_else(|| DEFAULT_ORGANIZATIONAL_UNIT.to_owned()),
            country_code: overrides
                .key_country_code
                .clone()
                .unwrap_or_else(|| DEFAULT_COUNTRY_CODE.to_owned()),
            // Empty passwords mean the build service generates them.
            key_password: overrides.key_password.clone().unwrap_or_default(),
            store_password: overrides.store_password.clone().unwrap_or_default(),
        },
    };

    Ok(PackageOptions {
        app_version: overrides
            .app_version
            .clone()
            .unwrap_or_else(|| DEFAULT_APP_VERSION.to_owned()),
        app_version_code: overrides
            .app_version_code
            .unwrap_or(DEFAULT_APP_VERSION_CODE),
        background_color,
        display,
        enable_notifications: overrides.enable_notifications.unwrap_or(true),
        enable_site_settings_shortcut: overrides.enable_site_settings_shortcut.unwrap_or(true),
        fallback_type: overrides
            .fallback_type
            .clone()
            .unwrap_or_else(|| DEFAULT_FALLBACK_TYPE.to_owned()),
        features: Features {
            location_delegation: FeatureToggle {
                enabled: overrides.location_delegation.unwrap_or(true),
            },
            play_billing: FeatureToggle { enabled: false },
        },
        host,
        icon_url,
        include_source_code: overrides.include_source_code.unwrap_or(false),
        is_chromeos_only: overrides.is_chromeos_only.unwrap_or(false),
        launcher_name,
        maskable_icon_url,
        monochrome_icon_url,
        name,
        navigation_color,
        navigation_color_dark,
        navigation_divider_color,
        navigation_divider_color_dark,
        orientation: manifest
            .orientation
            .clone()
            .unwrap_or_else(|| DEFAULT_ORIENTATION.to_owned()),
        package_id,
        shortcuts: manifest.shortcuts.clone(),
        signing,
        signing_mode,
        splash_screen_fade_out_duration: overrides
            .splash_screen_fade_out_duration
            .unwrap_or(DEFAULT_SPLASH_FADE_OUT_MS),
        start_url,
        theme_color,
        share_target: manifest.share_target.clone(),
        web_manifest_url,
        hms_kits: overrides.hms_kits(),
        agcs: overrides.agcs.clone().unwrap_or_default(),
        ag_connect_services_json: overrides.ag_connect_services_json.clone().unwrap_or_default(),
        ads_id: vec![
            AdSlotId::Splash(overrides.ads_splash_id.clone().unwrap_or_default()),
            AdSlotId::TopBanner(overrides.ads_top_banner_id.clone().unwrap_or_default()),
            AdSlotId::BottomBanner(overrides.ads_bottom_banner_id.clone().unwrap_or_default()),
        ],
        whitelist: overrides.whitelist.clone().unwrap_or_default(),
    })
}

/// Derive a reverse-domain package identifier from a hostname.
///
/// `example.com` becomes `com.example.app`. Segments are lowercased and
/// stripped to letters and digits; a segment left starting with a digit
/// is prefixed so it stays a legal package segment.
pub fn generate_package_id(host: &str) -> String {
    let mut segments: Vec<String> = host
        .split('.')
        .rev()
        .map(sanitize_segment)
        .filter(|segment| !segment.is_empty())
        .collect();
    segments.push(PACKAGE_ID_SUFFIX.to_owned());
    segments.join(".")
}

fn sanitize_segment(segment: &str) -> String {
    let cleaned: String = segment
        .trim()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if cleaned.starts_with(|c: char| c.is_ascii_digit()) {
        format!("{PACKAGE_ID_SUFFIX}{cleaned}")
    } else {
        cleaned
    }
}

/// Resolve `relative` against `base`, returning the absolute URL as a
/// string, or an empty string when `relative` is absent or empty.
pub fn absolute_url(relative: Option<&str>, base: &Url) -> Result<String> {
    match relative {
        None | Some("") => Ok(String::new()),
        Some(relative) => Ok(base.join(relative)?.to_string()),
    }
}

/// Resolve a start URL against `base` and re-express it relative to the
/// host: path plus query, no scheme or authority.
///
/// `./index.html?foo=1` against `https://www.foo.com/subpath/manifest.json`
/// yields `/subpath/index.html?foo=1`.
pub fn start_url_relative_to_host(start_url: Option<&str>, base: &Url) -> Result<String> {
    let start_url = start_url.filter(|s| !s.is_empty()).unwrap_or("/");
    let absolute = base.join(start_url)?;
    let mut relative = absolute.path().to_owned();
    if let Some(query) = absolute.query() {
        relative.push('?');
        relative.push_str(query);
    }
    Ok(relative)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_id_reverses_and_suffixes_host() {
        assert_eq!(generate_package_id("example.com"), "com.example.app");
        assert_eq!(generate_package_id("www.foo.com"), "com.foo.www.app");
    }

    #[test]
    fn package_id_sanitizes_segments() {
        assert_eq!(generate_package_id("My-App.Example.COM"), "com.example.myapp.app");
        // A numeric label would not be a legal package segment on its own.
        assert_eq!(generate_package_id("3d.example.com"), "com.example.app3d.app");
        // Empty labels disappear entirely.
        assert_eq!(generate_package_id("..example..com"), "com.example.app");
    }

    #[test]
    fn start_url_defaults_to_root() {
        let base = Url::parse("https://www.foo.com/subpath/manifest.json").unwrap();
        assert_eq!(start_url_relative_to_host(None, &base).unwrap(), "/");
        assert_eq!(start_url_relative_to_host(Some(""), &base).unwrap(), "/");
    }

    #[test]
    fn absolute_url_of_nothing_is_empty() {
        let base = Url::parse("https://www.foo.com/manifest.json").unwrap();
        assert_eq!(absolute_url(None, &base).unwrap(), "");
        assert_eq!(absolute_url(Some(""), &base).unwrap(), "");
    }
}
