//! User-supplied option overrides.
//!
//! Every overridable field is an independent `Option`; an absent field
//! falls through to the manifest-derived value and then to the built-in
//! default. The whole set can be loaded from a JSON document, with
//! individual fields layered on top from discrete inputs.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::options::package::DisplayMode;
use crate::options::signing::SigningMode;

/// Optional per-field overrides applied during options resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PackageOverrides {
    /// Application name.
    pub app_name: Option<String>,

    /// Launcher label.
    pub launcher_name: Option<String>,

    /// Reverse-domain package identifier; used verbatim when present.
    pub package_id: Option<String>,

    /// Four-part version string.
    pub app_version: Option<String>,

    /// Integer version code.
    pub app_version_code: Option<u32>,

    /// Display mode; wins over the manifest-derived value.
    pub display: Option<DisplayMode>,

    /// Theme color.
    pub theme_color: Option<String>,

    /// Background color.
    pub background_color: Option<String>,

    /// Navigation bar color.
    pub navigation_color: Option<String>,

    /// Navigation bar color, dark mode.
    pub navigation_color_dark: Option<String>,

    /// Navigation divider color.
    pub navigation_divider_color: Option<String>,

    /// Navigation divider color, dark mode.
    pub navigation_divider_color_dark: Option<String>,

    /// Full URL of the PWA; defaults to the page URL.
    pub host: Option<String>,

    /// Primary icon URL, resolved against the manifest URL.
    pub icon_url: Option<String>,

    /// Maskable icon URL, resolved against the manifest URL.
    pub maskable_icon_url: Option<String>,

    /// Monochrome icon URL, resolved against the manifest URL.
    pub monochrome_icon_url: Option<String>,

    /// Start URL, resolved and re-expressed relative to the host.
    pub start_url: Option<String>,

    /// Manifest URL recorded in the package.
    pub web_manifest_url: Option<String>,

    /// Fallback behavior (`customtabs`, `webview`).
    pub fallback_type: Option<String>,

    /// Splash screen fade-out duration in milliseconds.
    pub splash_screen_fade_out_duration: Option<u32>,

    /// Forward push notifications.
    pub enable_notifications: Option<bool>,

    /// Site-settings launcher shortcut.
    pub enable_site_settings_shortcut: Option<bool>,

    /// Geolocation delegation feature toggle.
    pub location_delegation: Option<bool>,

    /// Ship a source bundle with the package.
    pub include_source_code: Option<bool>,

    /// Restrict the package to ChromeOS.
    #[serde(rename = "isChromeOSOnly")]
    pub is_chromeos_only: Option<bool>,

    /// Signing mode.
    pub signing_mode: Option<SigningMode>,

    /// Base64-encoded keystore for [`SigningMode::Mine`].
    pub signing_key_file: Option<String>,

    /// Signing key alias.
    pub key_alias: Option<String>,

    /// Certificate subject full name.
    pub key_full_name: Option<String>,

    /// Certificate subject organization.
    pub key_organization: Option<String>,

    /// Certificate subject organizational unit.
    pub key_organizational_unit: Option<String>,

    /// Certificate subject country code.
    pub key_country_code: Option<String>,

    /// Key password; empty means the service generates one.
    pub key_password: Option<String>,

    /// Keystore password; empty means the service generates one.
    pub store_password: Option<String>,

    /// Bundle the HMS analytics kit.
    pub hms_analytics: Option<bool>,

    /// Bundle the HMS push kit.
    pub hms_push: Option<bool>,

    /// Bundle the HMS ads kit.
    pub hms_ads: Option<bool>,

    /// Splash advertising slot id.
    pub ads_splash_id: Option<String>,

    /// Top-banner advertising slot id.
    pub ads_top_banner_id: Option<String>,

    /// Bottom-banner advertising slot id.
    pub ads_bottom_banner_id: Option<String>,

    /// AppGallery Connect configuration reference.
    pub agcs: Option<String>,

    /// Contents of `agconnect-services.json`.
    #[serde(rename = "aGConnectServicesJSON")]
    pub ag_connect_services_json: Option<String>,

    /// Origin allowlist.
    pub whitelist: Option<String>,
}

impl PackageOverrides {
    /// Parse an override set from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The HMS kit list derived from the individual kit toggles.
    pub(crate) fn hms_kits(&self) -> Vec<String> {
        let mut kits = Vec::new();
        if self.hms_analytics.unwrap_or(false) {
            kits.push("analytics".to_owned());
        }
        if self.hms_push.unwrap_or(false) {
            kits.push("push".to_owned());
        }
        if self.hms_ads.unwrap_or(false) {
            kits.push("ads".to_owned());
        }
        kits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_all_defaults() {
        let overrides = PackageOverrides::from_json("{}").unwrap();
        assert_eq!(overrides, PackageOverrides::default());
    }

    #[test]
    fn kit_toggles_fold_into_list() {
        let overrides = PackageOverrides {
            hms_analytics: Some(true),
            hms_ads: Some(true),
            ..Default::default()
        };
        assert_eq!(overrides.hms_kits(), ["analytics", "ads"]);
    }

    #[test]
    fn wire_field_names_deserialize() {
        let overrides = PackageOverrides::from_json(
            r#"{"packageId":"com.example.app","isChromeOSOnly":true,"signingMode":"none"}"#,
        )
        .unwrap();
        assert_eq!(overrides.package_id.as_deref(), Some("com.example.app"));
        assert_eq!(overrides.is_chromeos_only, Some(true));
        assert_eq!(overrides.signing_mode, Some(SigningMode::None));
    }
}
