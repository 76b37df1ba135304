//! Options resolution against manifests, overrides, and defaults.

use agpack::manifest::{Manifest, ManifestContext};
use agpack::options::{resolve, AdSlotId, DisplayMode, PackageOverrides, SigningMode};
use agpack::AgpackError;

const MANIFEST_URL: &str = "https://www.foo.com/subpath/manifest.json";
const PAGE_URL: &str = "https://www.foo.com/";

fn manifest(json: &str) -> Manifest {
    Manifest::from_json(json).unwrap()
}

fn sample_manifest() -> Manifest {
    manifest(
        r##"{
            "name": "Foo Reader",
            "short_name": "Foo",
            "start_url": "./index.html?foo=1",
            "display": "browser",
            "theme_color": "#123456",
            "background_color": "#654321",
            "icons": [
                {"src": "icons/icon-192.png", "sizes": "192x192", "type": "image/png"},
                {"src": "icons/icon-512.png", "sizes": "512x512", "type": "image/png"}
            ]
        }"##,
    )
}

fn ctx() -> ManifestContext {
    ManifestContext::new(MANIFEST_URL, PAGE_URL).unwrap()
}

fn no_overrides() -> PackageOverrides {
    PackageOverrides::default()
}

#[test]
fn start_url_is_relative_to_host() {
    let options = resolve(&sample_manifest(), &ctx(), &no_overrides()).unwrap();
    assert_eq!(options.start_url, "/subpath/index.html?foo=1");
}

#[test]
fn missing_start_url_resolves_to_root() {
    let mut m = sample_manifest();
    m.start_url = None;
    let options = resolve(&m, &ctx(), &no_overrides()).unwrap();
    assert_eq!(options.start_url, "/");
}

#[test]
fn display_collapses_to_standalone_unless_fullscreen() {
    for (declared, expected) in [
        (Some("fullscreen"), DisplayMode::Fullscreen),
        (Some("standalone"), DisplayMode::Standalone),
        (Some("browser"), DisplayMode::Standalone),
        (Some("minimal-ui"), DisplayMode::Standalone),
        (None, DisplayMode::Standalone),
    ] {
        let mut m = sample_manifest();
        m.display = declared.map(str::to_owned);
        let options = resolve(&m, &ctx(), &no_overrides()).unwrap();
        assert_eq!(options.display, expected, "declared {declared:?}");
    }
}

#[test]
fn override_beats_manifest_beats_default() {
    // Override layer wins.
    let overrides = PackageOverrides {
        theme_color: Some("#ABCDEF".to_owned()),
        ..Default::default()
    };
    let options = resolve(&sample_manifest(), &ctx(), &overrides).unwrap();
    assert_eq!(options.theme_color, "#ABCDEF");

    // Manifest layer next.
    let options = resolve(&sample_manifest(), &ctx(), &no_overrides()).unwrap();
    assert_eq!(options.theme_color, "#123456");

    // Constant default last.
    let mut m = sample_manifest();
    m.theme_color = None;
    let options = resolve(&m, &ctx(), &no_overrides()).unwrap();
    assert_eq!(options.theme_color, "#FFFFFF");
}

#[test]
fn background_color_falls_back_to_theme_color() {
    let mut m = sample_manifest();
    m.background_color = None;
    let options = resolve(&m, &ctx(), &no_overrides()).unwrap();
    assert_eq!(options.background_color, "#123456");
}

#[test]
fn navigation_colors_share_the_manifest_fallback() {
    let options = resolve(&sample_manifest(), &ctx(), &no_overrides()).unwrap();
    assert_eq!(options.navigation_color, "#123456");
    assert_eq!(options.navigation_color_dark, "#123456");
    assert_eq!(options.navigation_divider_color, "#123456");
    assert_eq!(options.navigation_divider_color_dark, "#123456");

    let mut m = sample_manifest();
    m.theme_color = None;
    m.background_color = None;
    let options = resolve(&m, &ctx(), &no_overrides()).unwrap();
    assert_eq!(options.navigation_color, "#000000");
}

#[test]
fn package_id_derives_from_page_host() {
    let options = resolve(&sample_manifest(), &ctx(), &no_overrides()).unwrap();
    assert_eq!(options.package_id, "com.foo.www.app");

    let overrides = PackageOverrides {
        package_id: Some("com.custom.id".to_owned()),
        ..Default::default()
    };
    let options = resolve(&sample_manifest(), &ctx(), &overrides).unwrap();
    assert_eq!(options.package_id, "com.custom.id");
}

#[test]
fn resolution_is_idempotent() {
    let m = sample_manifest();
    let c = ctx();
    let overrides = PackageOverrides {
        app_name: Some("Pinned".to_owned()),
        hms_push: Some(true),
        ..Default::default()
    };
    let first = resolve(&m, &c, &overrides).unwrap();
    let second = resolve(&m, &c, &overrides).unwrap();
    assert_eq!(first, second);
}

#[test]
fn icon_urls_resolve_against_manifest_url() {
    let options = resolve(&sample_manifest(), &ctx(), &no_overrides()).unwrap();
    assert_eq!(
        options.icon_url,
        "https://www.foo.com/subpath/icons/icon-512.png"
    );
    // No maskable or monochrome icons declared.
    assert_eq!(options.maskable_icon_url, "");
    assert_eq!(options.monochrome_icon_url, "");
}

#[test]
fn purpose_tagged_icons_are_selected_separately() {
    let m = manifest(
        r#"{
            "name": "Foo",
            "icons": [
                {"src": "any.png", "sizes": "512x512", "type": "image/png"},
                {"src": "mask.png", "sizes": "512x512", "type": "image/png", "purpose": "maskable"},
                {"src": "mono.png", "sizes": "192x192", "type": "image/png", "purpose": "monochrome"}
            ]
        }"#,
    );
    let options = resolve(&m, &ctx(), &no_overrides()).unwrap();
    assert_eq!(options.icon_url, "https://www.foo.com/subpath/any.png");
    assert_eq!(
        options.maskable_icon_url,
        "https://www.foo.com/subpath/mask.png"
    );
    assert_eq!(
        options.monochrome_icon_url,
        "https://www.foo.com/subpath/mono.png"
    );
}

#[test]
fn unusable_icons_fail_resolution() {
    let m = manifest(
        r#"{
            "name": "Foo",
            "icons": [
                {"src": "small.png", "sizes": "96x96", "type": "image/png"},
                {"src": "big.svg", "sizes": "512x512", "type": "image/svg+xml"}
            ]
        }"#,
    );
    let err = resolve(&m, &ctx(), &no_overrides()).unwrap_err();
    assert!(matches!(err, AgpackError::NoSuitableIcon));
}

#[test]
fn icon_override_skips_manifest_selection() {
    let m = manifest(r#"{"name": "Foo", "icons": []}"#);
    let overrides = PackageOverrides {
        icon_url: Some("custom/icon.png".to_owned()),
        ..Default::default()
    };
    let options = resolve(&m, &ctx(), &overrides).unwrap();
    assert_eq!(
        options.icon_url,
        "https://www.foo.com/subpath/custom/icon.png"
    );
}

#[test]
fn inline_manifest_resolves_against_page_url() {
    let inline_url = "data:application/manifest+json,%7B%7D";
    let ctx = ManifestContext::new(inline_url, "https://www.foo.com/app/").unwrap();
    let m = manifest(
        r#"{
            "name": "Foo",
            "start_url": "./home",
            "icons": [{"src": "icon.png", "sizes": "512x512", "type": "image/png"}]
        }"#,
    );
    let options = resolve(&m, &ctx, &no_overrides()).unwrap();
    assert_eq!(options.start_url, "/app/home");
    assert_eq!(options.icon_url, "https://www.foo.com/app/icon.png");
    // The recorded manifest URL stays the inline one.
    assert_eq!(options.web_manifest_url, inline_url);
}

#[test]
fn new_signing_key_gets_generated_subject_defaults() {
    let options = resolve(&sample_manifest(), &ctx(), &no_overrides()).unwrap();
    assert_eq!(options.signing_mode, SigningMode::New);
    assert_eq!(options.signing.alias, "my-key-alias");
    assert_eq!(options.signing.full_name, "Foo Admin");
    assert_eq!(options.signing.organization, "Foo Reader");
    assert_eq!(options.signing.organizational_unit, "Engineering");
    assert_eq!(options.signing.country_code, "US");
    // Empty passwords are filled in by the build service.
    assert_eq!(options.signing.key_password, "");
    assert_eq!(options.signing.store_password, "");
}

#[test]
fn unsigned_packages_carry_an_empty_signing_block() {
    let overrides = PackageOverrides {
        signing_mode: Some(SigningMode::None),
        // Ignored in unsigned mode.
        key_alias: Some("stray".to_owned()),
        ..Default::default()
    };
    let options = resolve(&sample_manifest(), &ctx(), &overrides).unwrap();
    assert!(options.signing.is_empty());
}

#[test]
fn hms_kits_and_ad_slots_come_from_overrides() {
    let overrides = PackageOverrides {
        hms_analytics: Some(true),
        hms_ads: Some(true),
        ads_splash_id: Some("slot-1".to_owned()),
        ..Default::default()
    };
    let options = resolve(&sample_manifest(), &ctx(), &overrides).unwrap();
    assert_eq!(options.hms_kits, ["analytics", "ads"]);
    assert_eq!(
        options.ads_id,
        vec![
            AdSlotId::Splash("slot-1".to_owned()),
            AdSlotId::TopBanner(String::new()),
            AdSlotId::BottomBanner(String::new()),
        ]
    );
}

#[test]
fn nameless_manifest_is_rejected() {
    let m = manifest(r#"{"icons": [{"src": "icon.png", "sizes": "512x512"}]}"#);
    let err = resolve(&m, &ctx(), &no_overrides()).unwrap_err();
    assert!(matches!(err, AgpackError::Manifest(_)));
}

#[test]
fn launcher_name_prefers_short_name() {
    let options = resolve(&sample_manifest(), &ctx(), &no_overrides()).unwrap();
    assert_eq!(options.launcher_name, "Foo");
    assert_eq!(options.name, "Foo Reader");

    let mut m = sample_manifest();
    m.short_name = None;
    let options = resolve(&m, &ctx(), &no_overrides()).unwrap();
    assert_eq!(options.launcher_name, "Foo Reader");
}

#[test]
fn orientation_defaults_when_absent() {
    let options = resolve(&sample_manifest(), &ctx(), &no_overrides()).unwrap();
    assert_eq!(options.orientation, "default");

    let mut m = sample_manifest();
    m.orientation = Some("landscape".to_owned());
    let options = resolve(&m, &ctx(), &no_overrides()).unwrap();
    assert_eq!(options.orientation, "landscape");
}

#[test]
fn wire_serialization_uses_service_field_names() {
    let overrides = PackageOverrides {
        hms_push: Some(true),
        ..Default::default()
    };
    let options = resolve(&sample_manifest(), &ctx(), &overrides).unwrap();
    let wire: serde_json::Value = serde_json::to_value(&options).unwrap();

    assert_eq!(wire["packageId"], "com.foo.www.app");
    assert_eq!(wire["appVersion"], "1.0.0.0");
    assert_eq!(wire["appVersionCode"], 1);
    assert_eq!(wire["display"], "standalone");
    assert_eq!(wire["fallbackType"], "customtabs");
    assert_eq!(wire["isChromeOSOnly"], false);
    assert_eq!(wire["splashScreenFadeOutDuration"], 300);
    assert_eq!(wire["HMSKits"][0], "push");
    assert_eq!(wire["ads_id"][0]["splash"], "");
    assert_eq!(wire["ads_id"][1]["topBanner"], "");
    assert_eq!(wire["aGConnectServicesJSON"], "");
    assert_eq!(wire["signing"]["fullName"], "Foo Admin");
    assert_eq!(wire["signingMode"], "new");
    assert_eq!(wire["features"]["locationDelegation"]["enabled"], true);
    assert_eq!(wire["features"]["playBilling"]["enabled"], false);
    // No share target declared: the key is omitted entirely.
    assert!(wire.get("shareTarget").is_none());
}
