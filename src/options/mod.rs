//! Package configuration: the resolved options record, user overrides,
//! the resolver that merges them with the manifest, and the validation
//! pass that gates submission.

mod overrides;
mod package;
mod resolver;
mod signing;
mod validate;

// Re-export all public types
pub use overrides::PackageOverrides;
pub use package::{AdSlotId, DisplayMode, FeatureToggle, Features, PackageOptions};
pub use resolver::{absolute_url, generate_package_id, resolve, start_url_relative_to_host};
pub use signing::{SigningMode, SigningOptions};
pub use validate::{
    validate, MAX_APP_VERSION_CODE, MAX_KEY_FILE_BYTES, MAX_LAUNCHER_NAME_CHARS,
};
