//! Asset URL resolver.
//!
//! The backend stores media references as backend-relative paths
//! (`static/abc.jpg`); older rows and external images are absolute URLs.
//! The resolver rewrites everything to absolute form, and keeps the
//! `ngrok-skip-browser-warning` query parameter workaround for tunnel-dev
//! backends served through `*.ngrok-free.app`.

use url::Url;

use crate::api::types::Product;

const NGROK_SUFFIX: &str = "ngrok-free.app";
const NGROK_BYPASS_PARAM: &str = "ngrok-skip-browser-warning";

/// Rewrites media references to absolute URLs against a fixed base.
#[derive(Debug, Clone)]
pub struct MediaResolver {
    base: Url,
}

impl MediaResolver {
    /// Create a resolver rooted at the backend base URL.
    #[must_use]
    pub const fn new(base: Url) -> Self {
        Self { base }
    }

    /// Resolve a single media reference to an absolute URL.
    ///
    /// Absolute inputs pass through untouched (apart from the ngrok
    /// bypass); relative inputs are joined onto the base. Inputs that
    /// cannot be parsed are returned as-is rather than dropped.
    #[must_use]
    pub fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return match Url::parse(path) {
                Ok(url) => append_ngrok_bypass(url).into(),
                Err(_) => path.to_string(),
            };
        }
        match self.base.join(path.trim_start_matches('/')) {
            Ok(url) => append_ngrok_bypass(url).into(),
            Err(_) => path.to_string(),
        }
    }

    /// Rewrite a product's primary image and gallery in place.
    pub fn normalize_product(&self, product: &mut Product) {
        if let Some(image_url) = &product.image_url {
            product.image_url = Some(self.resolve(image_url));
        }
        for image in &mut product.gallery {
            *image = self.resolve(image);
        }
    }
}

/// Append the ngrok bypass parameter to `*.ngrok-free.app` hosts.
///
/// Without it, ngrok's free tier serves an interstitial HTML page instead
/// of the image. No-op for other hosts and when the parameter is present.
fn append_ngrok_bypass(mut url: Url) -> Url {
    let is_ngrok = url.host_str().is_some_and(|h| h.ends_with(NGROK_SUFFIX));
    if !is_ngrok {
        return url;
    }
    let already_present = url.query_pairs().any(|(key, _)| key == NGROK_BYPASS_PARAM);
    if already_present {
        return url;
    }
    url.query_pairs_mut().append_pair(NGROK_BYPASS_PARAM, "true");
    url
}
