//! Remote service endpoints.
//!
//! The toolkit talks to a fixed, named set of services: the package
//! generator (which also hosts the publish route) and the safe-URL
//! fetcher used as a fallback relay for externally hosted assets.

/// Production package generator base URL.
pub const PACKAGE_GENERATOR_URL: &str = "https://api.agpack.dev";

/// Production safe-URL fetcher base URL.
///
/// Assets are relayed as `{base}?url=<percent-encoded original>`.
pub const SAFE_URL_FETCHER_URL: &str = "https://safe-url.agpack.dev/api/getsafeurl";

/// Base URLs of the remote services the client talks to.
///
/// [`Endpoints::default`] points at the production services; tests and
/// alternative deployments construct their own set with [`Endpoints::new`].
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Package generator base URL; `/build_apk` and `/publish_apk` hang off it.
    pub package_generator: String,

    /// Safe-URL fetcher used to relay blocked asset fetches.
    pub safe_url_fetcher: String,
}

impl Endpoints {
    /// Create an endpoint set from explicit base URLs.
    pub fn new(package_generator: impl Into<String>, safe_url_fetcher: impl Into<String>) -> Self {
        Self {
            package_generator: package_generator.into(),
            safe_url_fetcher: safe_url_fetcher.into(),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(PACKAGE_GENERATOR_URL, SAFE_URL_FETCHER_URL)
    }
}
