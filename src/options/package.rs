//! Resolved package options.
//!
//! [`PackageOptions`] is the record the build service consumes. Field
//! names on the wire follow the service's contract: camelCase for most
//! fields plus a handful of literal names (`HMSKits`, `ads_id`, `agcs`,
//! `aGConnectServicesJSON`, `whitelist`). The record is constructed once
//! by the resolver and never mutated; the safe-URL retry works on a
//! rewritten clone.

use serde::{Deserialize, Serialize};

use crate::manifest::{ShareTarget, ShortcutItem};
use crate::options::signing::{SigningMode, SigningOptions};

/// Display mode sent to the build service.
///
/// The service only distinguishes fullscreen from everything else, so
/// any manifest value other than `fullscreen` collapses to `standalone`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Standalone app window.
    #[default]
    Standalone,
    /// Fullscreen, no system UI.
    Fullscreen,
}

impl DisplayMode {
    /// Collapse a manifest `display` value to the supported pair.
    pub fn from_manifest(display: Option<&str>) -> Self {
        match display {
            Some("fullscreen") => Self::Fullscreen,
            _ => Self::Standalone,
        }
    }
}

/// A single feature toggle block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureToggle {
    /// Whether the feature is enabled.
    pub enabled: bool,
}

/// Optional platform features of the generated package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Features {
    /// Delegate geolocation permission prompts to the native layer.
    pub location_delegation: FeatureToggle,
    /// In-app billing integration.
    pub play_billing: FeatureToggle,
}

/// An advertising slot id.
///
/// Serializes externally tagged, so a list renders as
/// `[{"splash": ".."}, {"topBanner": ".."}, {"bottomBanner": ".."}]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdSlotId {
    #[serde(rename = "splash")]
    Splash(String),
    #[serde(rename = "topBanner")]
    TopBanner(String),
    #[serde(rename = "bottomBanner")]
    BottomBanner(String),
}

/// Fully resolved, platform-specific package configuration.
///
/// Produced by [`crate::options::resolve`], validated by
/// [`crate::options::validate`], and submitted by
/// [`crate::client::BuildClient`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageOptions {
    /// Four-part version string shown to users (e.g. `1.0.0.0`).
    pub app_version: String,

    /// Monotonically increasing integer version code.
    pub app_version_code: u32,

    /// Splash/background color.
    pub background_color: String,

    /// Display mode of the generated app.
    pub display: DisplayMode,

    /// Forward push notifications to the app.
    pub enable_notifications: bool,

    /// Add a launcher shortcut into the app's site settings.
    pub enable_site_settings_shortcut: bool,

    /// Behavior when the trusted-web-activity path is unavailable.
    pub fallback_type: String,

    /// Optional platform feature toggles.
    pub features: Features,

    /// Full URL of the PWA the package wraps.
    pub host: String,

    /// Absolute URL of the primary launcher icon.
    pub icon_url: String,

    /// Include a source bundle alongside the package.
    pub include_source_code: bool,

    /// Restrict the package to ChromeOS devices.
    #[serde(rename = "isChromeOSOnly")]
    pub is_chromeos_only: bool,

    /// Label under the launcher icon (30 characters max).
    pub launcher_name: String,

    /// Absolute URL of the maskable icon, or empty when absent.
    pub maskable_icon_url: String,

    /// Absolute URL of the monochrome icon, or empty when absent.
    pub monochrome_icon_url: String,

    /// Full application name.
    pub name: String,

    /// Navigation bar color.
    pub navigation_color: String,

    /// Navigation bar color in dark mode.
    pub navigation_color_dark: String,

    /// Navigation bar divider color.
    pub navigation_divider_color: String,

    /// Navigation bar divider color in dark mode.
    pub navigation_divider_color_dark: String,

    /// Screen orientation constraint.
    pub orientation: String,

    /// Reverse-domain package identifier.
    pub package_id: String,

    /// Manifest shortcuts, passed through verbatim.
    pub shortcuts: Vec<ShortcutItem>,

    /// Signing key material and distinguished-name fields.
    pub signing: SigningOptions,

    /// How the package should be signed.
    pub signing_mode: SigningMode,

    /// Splash screen fade-out duration in milliseconds.
    pub splash_screen_fade_out_duration: u32,

    /// Start path relative to the host (path + query only).
    pub start_url: String,

    /// Theme color.
    pub theme_color: String,

    /// Web Share Target declaration, when the manifest has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_target: Option<ShareTarget>,

    /// URL of the web manifest itself.
    pub web_manifest_url: String,

    /// HMS kit identifiers to bundle (`analytics`, `push`, `ads`).
    #[serde(rename = "HMSKits")]
    pub hms_kits: Vec<String>,

    /// AppGallery Connect configuration reference.
    pub agcs: String,

    /// Contents of `agconnect-services.json`, when supplied.
    #[serde(rename = "aGConnectServicesJSON")]
    pub ag_connect_services_json: String,

    /// Advertising slot ids for the bundled ads kit.
    #[serde(rename = "ads_id")]
    pub ads_id: Vec<AdSlotId>,

    /// Origin allowlist for in-scope navigation.
    pub whitelist: String,
}

impl PackageOptions {
    /// Absolute URL fields that reference externally hosted resources.
    ///
    /// These are the fields rewritten to the safe-URL relay when the
    /// build service cannot fetch the originals directly.
    pub(crate) fn external_url_fields_mut(&mut self) -> [&mut String; 4] {
        [
            &mut self.icon_url,
            &mut self.maskable_icon_url,
            &mut self.monochrome_icon_url,
            &mut self.web_manifest_url,
        ]
    }
}
