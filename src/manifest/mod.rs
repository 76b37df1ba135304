//! Web-app manifest data model.
//!
//! The manifest arrives already fetched, together with the URL it was
//! served from and the URL of the page that referenced it. This module
//! provides the deserialized form of that input plus the URL-resolution
//! context the options resolver works against.

pub mod icons;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Result;

pub use icons::{find_best_app_icon, find_maskable_icon, find_monochrome_icon, ManifestIcon};

/// Prefix of inline manifests delivered as a data URI instead of a
/// fetchable document.
pub const INLINE_MANIFEST_PREFIX: &str = "data:application/manifest+json,";

/// A web-app manifest.
///
/// Only the fields the package pipeline consumes are modeled; unknown
/// fields are ignored on deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Full application name.
    pub name: Option<String>,

    /// Short name, preferred for launcher labels.
    pub short_name: Option<String>,

    /// Start URL, relative to the manifest's own URL.
    pub start_url: Option<String>,

    /// Requested display mode (`standalone`, `fullscreen`, `browser`, ...).
    pub display: Option<String>,

    /// Requested screen orientation.
    pub orientation: Option<String>,

    /// Theme color as a CSS color string.
    pub theme_color: Option<String>,

    /// Background color as a CSS color string.
    pub background_color: Option<String>,

    /// Declared application icons.
    #[serde(default)]
    pub icons: Vec<ManifestIcon>,

    /// Application shortcuts, passed through to the package verbatim.
    #[serde(default)]
    pub shortcuts: Vec<ShortcutItem>,

    /// Web Share Target declaration, passed through verbatim.
    pub share_target: Option<ShareTarget>,
}

impl Manifest {
    /// Parse a manifest from its JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A manifest shortcut entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortcutItem {
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub icons: Vec<ManifestIcon>,
}

/// A Web Share Target declaration.
///
/// The `params` shape varies between manifests, so it is carried as raw
/// JSON rather than a fixed struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareTarget {
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enctype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
}

/// URL context the manifest was loaded in.
///
/// Relative asset and start URLs resolve against the manifest's own URL.
/// Inline data-URI manifests cannot serve as a URL base, so those resolve
/// against the page URL instead.
#[derive(Debug, Clone)]
pub struct ManifestContext {
    manifest_url: String,
    page_url: Url,
    resolution_base: Url,
}

impl ManifestContext {
    /// Build a context from the manifest URL (possibly a data URI) and
    /// the page URL.
    ///
    /// # Errors
    ///
    /// Returns a URL parse error when `page_url` is invalid, or when
    /// `manifest_url` is neither a data URI nor a parseable URL.
    pub fn new(manifest_url: &str, page_url: &str) -> Result<Self> {
        let page_url = Url::parse(page_url)?;
        let resolution_base = if manifest_url.starts_with(INLINE_MANIFEST_PREFIX) {
            page_url.clone()
        } else {
            Url::parse(manifest_url)?
        };

        Ok(Self {
            manifest_url: manifest_url.to_owned(),
            page_url,
            resolution_base,
        })
    }

    /// The URL the manifest was served from, exactly as supplied.
    pub fn manifest_url(&self) -> &str {
        &self.manifest_url
    }

    /// The URL of the page that linked the manifest.
    pub fn page_url(&self) -> &Url {
        &self.page_url
    }

    /// The base URL relative references resolve against.
    pub fn resolution_base(&self) -> &Url {
        &self.resolution_base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_resolves_against_manifest_url() {
        let ctx = ManifestContext::new(
            "https://www.foo.com/subpath/manifest.json",
            "https://www.foo.com/",
        )
        .unwrap();
        assert_eq!(
            ctx.resolution_base().as_str(),
            "https://www.foo.com/subpath/manifest.json"
        );
    }

    #[test]
    fn context_falls_back_to_page_url_for_inline_manifest() {
        let inline = format!("{INLINE_MANIFEST_PREFIX}%7B%22name%22%3A%22x%22%7D");
        let ctx = ManifestContext::new(&inline, "https://www.foo.com/app/").unwrap();
        assert_eq!(ctx.resolution_base().as_str(), "https://www.foo.com/app/");
        assert_eq!(ctx.manifest_url(), inline);
    }

    #[test]
    fn manifest_ignores_unknown_fields() {
        let manifest =
            Manifest::from_json(r#"{"name":"App","unknown_field":42,"display":"standalone"}"#)
                .unwrap();
        assert_eq!(manifest.name.as_deref(), Some("App"));
        assert_eq!(manifest.display.as_deref(), Some("standalone"));
    }
}
