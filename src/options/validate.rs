//! Pre-submission validation of package options.
//!
//! Validation collects every problem instead of stopping at the first,
//! so the caller can surface the complete list. Generation must not
//! proceed while the list is non-empty.

use base64::Engine;
use url::Url;

use crate::error::ValidationError;
use crate::options::package::PackageOptions;
use crate::options::signing::SigningMode;

/// Largest accepted version code.
pub const MAX_APP_VERSION_CODE: u32 = 2_100_000_000;

/// Longest accepted launcher label.
pub const MAX_LAUNCHER_NAME_CHARS: usize = 30;

/// Largest accepted signing keystore, decoded (2 MiB).
pub const MAX_KEY_FILE_BYTES: usize = 2_097_152;

/// Validate `options` for submission to the build service.
///
/// Returns an empty list when the options are submittable.
pub fn validate(options: &PackageOptions) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if options.package_id.is_empty() {
        errors.push(ValidationError::new("packageId", "must not be empty"));
    } else if !is_valid_package_id(&options.package_id) {
        errors.push(ValidationError::new(
            "packageId",
            "must be a dotted identifier; segments start with a letter and \
             contain only letters, digits, and underscores",
        ));
    }

    if options.name.is_empty() {
        errors.push(ValidationError::new("name", "must not be empty"));
    }

    if options.launcher_name.is_empty() {
        errors.push(ValidationError::new("launcherName", "must not be empty"));
    } else if options.launcher_name.chars().count() > MAX_LAUNCHER_NAME_CHARS {
        errors.push(ValidationError::new(
            "launcherName",
            format!("must be at most {MAX_LAUNCHER_NAME_CHARS} characters"),
        ));
    }

    if options.app_version.is_empty() {
        errors.push(ValidationError::new("appVersion", "must not be empty"));
    }

    if options.app_version_code == 0 || options.app_version_code > MAX_APP_VERSION_CODE {
        errors.push(ValidationError::new(
            "appVersionCode",
            format!("must be between 1 and {MAX_APP_VERSION_CODE}"),
        ));
    }

    if options.host.is_empty() {
        errors.push(ValidationError::new("host", "must not be empty"));
    } else if Url::parse(&options.host).is_err() {
        errors.push(ValidationError::new("host", "must be a valid URL"));
    }

    if options.icon_url.is_empty() {
        errors.push(ValidationError::new("iconUrl", "must not be empty"));
    }

    validate_signing(options, &mut errors);

    errors
}

fn validate_signing(options: &PackageOptions, errors: &mut Vec<ValidationError>) {
    let signing = &options.signing;

    match options.signing_mode {
        SigningMode::New => {
            for (field, value) in [
                ("signing.alias", &signing.alias),
                ("signing.fullName", &signing.full_name),
                ("signing.organization", &signing.organization),
                ("signing.organizationalUnit", &signing.organizational_unit),
                ("signing.countryCode", &signing.country_code),
            ] {
                if value.is_empty() {
                    errors.push(ValidationError::new(
                        field,
                        "is required when a new signing key is generated",
                    ));
                }
            }
        }
        SigningMode::Mine => {
            if signing.file.as_deref().map_or(true, str::is_empty) {
                errors.push(ValidationError::new(
                    "signing.file",
                    "an existing keystore is required when signing with your own key",
                ));
            }
            for (field, value) in [
                ("signing.alias", &signing.alias),
                ("signing.keyPassword", &signing.key_password),
                ("signing.storePassword", &signing.store_password),
            ] {
                if value.is_empty() {
                    errors.push(ValidationError::new(
                        field,
                        "is required when signing with an existing key",
                    ));
                }
            }
        }
        SigningMode::None => {
            if !signing.is_empty() {
                errors.push(ValidationError::new(
                    "signing",
                    "must be empty when the package is unsigned",
                ));
            }
        }
    }

    if let Some(file) = signing.file.as_deref() {
        if !file.is_empty() {
            match base64::engine::general_purpose::STANDARD.decode(file) {
                Ok(decoded) if decoded.len() > MAX_KEY_FILE_BYTES => {
                    errors.push(ValidationError::new(
                        "signing.file",
                        format!("keystore exceeds the {MAX_KEY_FILE_BYTES}-byte limit"),
                    ));
                }
                Ok(_) => {}
                Err(_) => {
                    errors.push(ValidationError::new(
                        "signing.file",
                        "keystore must be valid base64",
                    ));
                }
            }
        }
    }
}

fn is_valid_package_id(package_id: &str) -> bool {
    let mut segments = 0;
    for segment in package_id.split('.') {
        segments += 1;
        let mut chars = segment.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() => {}
            _ => return false,
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return false;
        }
    }
    segments >= 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_id_shapes() {
        assert!(is_valid_package_id("com.example.app"));
        assert!(is_valid_package_id("com.example_2.app"));
        assert!(!is_valid_package_id("app"));
        assert!(!is_valid_package_id("com..app"));
        assert!(!is_valid_package_id("com.2fast.app"));
        assert!(!is_valid_package_id("com.ex ample.app"));
    }
}
