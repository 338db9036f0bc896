//! Photo URL resolution policy.
//!
//! Decides what URL the browser should actually request for an ambassador
//! photo: the stored URL as-is, a generated placeholder avatar, or the
//! internal proxy path. Resolution is idempotent, so feeding a resolved URL
//! back in returns it unchanged and the placeholder fallback can never loop.

/// Host of the external avatar-generation service.
pub const PLACEHOLDER_HOST: &str = "ui-avatars.com";

/// Internal route that fetches external images server-side.
pub const PROXY_PATH: &str = "/api/proxy-image";

/// Name rendered into the placeholder when the display name is empty.
const PLACEHOLDER_DEFAULT_NAME: &str = "User";

const PLACEHOLDER_BACKGROUND: &str = "A31D45";
const PLACEHOLDER_COLOR: &str = "ffffff";
const PLACEHOLDER_SIZE: u32 = 512;

/// Build the generated placeholder avatar URL for a display name.
pub fn placeholder_url(name: &str) -> String {
    let name = if name.trim().is_empty() {
        PLACEHOLDER_DEFAULT_NAME
    } else {
        name
    };
    let encoded: String = url::form_urlencoded::byte_serialize(name.as_bytes()).collect();
    format!(
        "https://{}/api/?name={}&background={}&color={}&size={}",
        PLACEHOLDER_HOST, encoded, PLACEHOLDER_BACKGROUND, PLACEHOLDER_COLOR, PLACEHOLDER_SIZE
    )
}

/// Resolve a stored photo URL into the URL the browser should load.
///
/// Empty or missing input yields the placeholder. Local paths (uploads,
/// proxy paths) and placeholder-service URLs pass through unchanged.
/// Anything else is an external link and gets wrapped in the proxy path
/// with the original URL percent-encoded; decoding the `url` parameter
/// reproduces the original byte-for-byte.
pub fn resolve_photo_url(stored: Option<&str>, name: &str) -> String {
    let Some(stored) = stored.filter(|u| !u.trim().is_empty()) else {
        return placeholder_url(name);
    };

    if stored.starts_with('/') || stored.contains(PLACEHOLDER_HOST) {
        return stored.to_string();
    }

    let encoded: String = url::form_urlencoded::byte_serialize(stored.as_bytes()).collect();
    format!("{}?url={}", PROXY_PATH, encoded)
}
