//! Package signing configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the generated package should be signed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SigningMode {
    /// The build service creates a fresh signing key.
    #[default]
    New,
    /// The caller supplies an existing keystore.
    Mine,
    /// The package is left unsigned.
    None,
}

impl SigningMode {
    /// All accepted mode names, in wire form.
    pub const NAMES: [&'static str; 3] = ["new", "mine", "none"];
}

impl fmt::Display for SigningMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::New => "new",
            Self::Mine => "mine",
            Self::None => "none",
        };
        f.write_str(name)
    }
}

impl FromStr for SigningMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "mine" => Ok(Self::Mine),
            "none" => Ok(Self::None),
            other => Err(format!(
                "invalid signing mode: {other}. Valid modes: {}",
                Self::NAMES.join(", ")
            )),
        }
    }
}

/// Signing key material and certificate distinguished-name fields.
///
/// With [`SigningMode::New`] the passwords may be left empty; the build
/// service generates them. With [`SigningMode::None`] every field must be
/// empty and `file` must be `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningOptions {
    /// Base64-encoded keystore, or `None` when the service generates one
    /// (or the package is unsigned).
    pub file: Option<String>,

    /// Key alias inside the keystore.
    pub alias: String,

    /// Certificate subject full name.
    pub full_name: String,

    /// Certificate subject organization.
    pub organization: String,

    /// Certificate subject organizational unit.
    pub organizational_unit: String,

    /// Two-letter certificate subject country code.
    pub country_code: String,

    /// Password protecting the key.
    pub key_password: String,

    /// Password protecting the keystore.
    pub store_password: String,
}

impl SigningOptions {
    /// True when no field carries a value.
    pub fn is_empty(&self) -> bool {
        self.file.is_none()
            && self.alias.is_empty()
            && self.full_name.is_empty()
            && self.organization.is_empty()
            && self.organizational_unit.is_empty()
            && self.country_code.is_empty()
            && self.key_password.is_empty()
            && self.store_password.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_round_trips_through_str() {
        for name in SigningMode::NAMES {
            let mode: SigningMode = name.parse().unwrap();
            assert_eq!(mode.to_string(), name);
        }
        assert!("sideload".parse::<SigningMode>().is_err());
    }

    #[test]
    fn default_options_are_empty() {
        assert!(SigningOptions::default().is_empty());
    }
}
