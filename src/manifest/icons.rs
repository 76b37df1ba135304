//! Icon selection from manifest declarations.
//!
//! The package needs up to three icons: a primary launcher icon plus
//! optional maskable and monochrome variants. Selection prefers large
//! square PNGs (512x512 or better), falling back to 192x192, and for the
//! purpose-tagged variants finally to 192x192 in any format.

use serde::{Deserialize, Serialize};

/// Minimum side length of a preferred icon.
pub const PREFERRED_ICON_SIDE: u32 = 512;

/// Minimum side length an icon must declare to be usable at all.
pub const MINIMUM_ICON_SIDE: u32 = 192;

const PNG_MIME: &str = "image/png";

/// An icon entry as declared in the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestIcon {
    /// Icon location, possibly relative to the manifest URL.
    pub src: String,

    /// Space-separated `WxH` size list, or `any`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<String>,

    /// Declared MIME type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    /// Space-separated purpose list (`any`, `maskable`, `monochrome`).
    /// Absent means `any`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

impl ManifestIcon {
    /// Largest declared square side, if any size token is square.
    ///
    /// A declared size of `any` is treated as unbounded.
    fn largest_square_side(&self) -> Option<u32> {
        let sizes = self.sizes.as_deref()?;
        let mut best: Option<u32> = None;
        for token in sizes.split_whitespace() {
            if token.eq_ignore_ascii_case("any") {
                return Some(u32::MAX);
            }
            let token = token.to_ascii_lowercase();
            let Some((w, h)) = token.split_once('x') else {
                continue;
            };
            match (w.parse::<u32>(), h.parse::<u32>()) {
                (Ok(w), Ok(h)) if w == h => best = best.max(Some(w)),
                _ => {}
            }
        }
        best
    }

    fn has_purpose(&self, purpose: IconPurpose) -> bool {
        match self.purpose.as_deref() {
            // No declared purpose means "any".
            None => purpose == IconPurpose::Any,
            Some(list) => list
                .split_whitespace()
                .any(|p| p.eq_ignore_ascii_case(purpose.keyword())),
        }
    }

    fn matches_mime(&self, mime: Option<&str>) -> bool {
        let Some(mime) = mime else {
            return true;
        };
        match self.mime_type.as_deref() {
            Some(declared) => declared.eq_ignore_ascii_case(mime),
            // Undeclared type: trust the file extension for PNGs.
            None => mime == PNG_MIME && self.src.to_ascii_lowercase().ends_with(".png"),
        }
    }
}

/// Icon purpose categories used for selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconPurpose {
    /// General-purpose launcher icon.
    Any,
    /// Safe-zone icon for adaptive masking.
    Maskable,
    /// Single-color notification/status icon.
    Monochrome,
}

impl IconPurpose {
    fn keyword(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Maskable => "maskable",
            Self::Monochrome => "monochrome",
        }
    }
}

/// Select the largest square icon matching `purpose`, `min_side`, and
/// (when given) `mime`.
pub fn find_suitable_icon<'a>(
    icons: &'a [ManifestIcon],
    purpose: IconPurpose,
    min_side: u32,
    mime: Option<&str>,
) -> Option<&'a ManifestIcon> {
    icons
        .iter()
        .filter(|icon| !icon.src.is_empty())
        .filter(|icon| icon.has_purpose(purpose))
        .filter(|icon| icon.matches_mime(mime))
        .filter_map(|icon| icon.largest_square_side().map(|side| (icon, side)))
        .filter(|(_, side)| *side >= min_side)
        .max_by_key(|(_, side)| *side)
        .map(|(icon, _)| icon)
}

/// Select the primary launcher icon: a square PNG of 512x512 or better,
/// falling back to 192x192.
pub fn find_best_app_icon(icons: &[ManifestIcon]) -> Option<&ManifestIcon> {
    find_suitable_icon(icons, IconPurpose::Any, PREFERRED_ICON_SIDE, Some(PNG_MIME)).or_else(
        || {
            find_suitable_icon(icons, IconPurpose::Any, MINIMUM_ICON_SIDE, Some(PNG_MIME))
        },
    )
}

/// Select a maskable-purpose icon using the standard preference order.
pub fn find_maskable_icon(icons: &[ManifestIcon]) -> Option<&ManifestIcon> {
    find_purpose_icon(icons, IconPurpose::Maskable)
}

/// Select a monochrome-purpose icon using the standard preference order.
pub fn find_monochrome_icon(icons: &[ManifestIcon]) -> Option<&ManifestIcon> {
    find_purpose_icon(icons, IconPurpose::Monochrome)
}

fn find_purpose_icon(icons: &[ManifestIcon], purpose: IconPurpose) -> Option<&ManifestIcon> {
    find_suitable_icon(icons, purpose, PREFERRED_ICON_SIDE, Some(PNG_MIME))
        .or_else(|| find_suitable_icon(icons, purpose, MINIMUM_ICON_SIDE, Some(PNG_MIME)))
        .or_else(|| find_suitable_icon(icons, purpose, MINIMUM_ICON_SIDE, None))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn icon(src: &str, sizes: &str, mime: Option<&str>, purpose: Option<&str>) -> ManifestIcon {
        ManifestIcon {
            src: src.to_owned(),
            sizes: Some(sizes.to_owned()),
            mime_type: mime.map(str::to_owned),
            purpose: purpose.map(str::to_owned),
        }
    }

    #[test]
    fn picks_largest_square_png() {
        let icons = vec![
            icon("a.png", "512x512", Some("image/png"), None),
            icon("b.png", "1024x1024", Some("image/png"), None),
            icon("c.png", "192x192", Some("image/png"), None),
        ];
        let best = find_best_app_icon(&icons).unwrap();
        assert_eq!(best.src, "b.png");
    }

    #[test]
    fn falls_back_to_192() {
        let icons = vec![icon("small.png", "192x192", Some("image/png"), None)];
        assert_eq!(find_best_app_icon(&icons).unwrap().src, "small.png");
    }

    #[test]
    fn rejects_non_square_and_undersized() {
        let icons = vec![
            icon("wide.png", "512x256", Some("image/png"), None),
            icon("tiny.png", "96x96", Some("image/png"), None),
        ];
        assert!(find_best_app_icon(&icons).is_none());
    }

    #[test]
    fn rejects_non_png_primary() {
        let icons = vec![icon("a.svg", "512x512", Some("image/svg+xml"), None)];
        assert!(find_best_app_icon(&icons).is_none());
    }

    #[test]
    fn missing_type_falls_back_to_extension() {
        let icons = vec![icon("a.png", "512x512", None, None)];
        assert_eq!(find_best_app_icon(&icons).unwrap().src, "a.png");
    }

    #[test]
    fn purpose_list_is_matched_per_token() {
        let icons = vec![
            icon("mask.png", "512x512", Some("image/png"), Some("any maskable")),
            icon("plain.png", "512x512", Some("image/png"), None),
        ];
        assert_eq!(find_maskable_icon(&icons).unwrap().src, "mask.png");
    }

    #[test]
    fn maskable_falls_back_to_any_format() {
        let icons = vec![icon(
            "mask.webp",
            "192x192",
            Some("image/webp"),
            Some("maskable"),
        )];
        assert_eq!(find_maskable_icon(&icons).unwrap().src, "mask.webp");
    }

    #[test]
    fn multi_token_sizes_use_largest_square() {
        let icons = vec![icon("multi.png", "48x48 512x512 96x96", Some("image/png"), None)];
        assert_eq!(find_best_app_icon(&icons).unwrap().src, "multi.png");
    }
}
