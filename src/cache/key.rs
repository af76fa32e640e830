//! Cache key derivation for tag requests.

use sha2::{Digest, Sha256};

/// Derive the cache key for a tag request.
///
/// The websites are sorted, comma-joined and appended to the text; the key
/// is the lowercase hex SHA-256 of the result. Website order in the request
/// does not affect the key. The layout matches keys already written by
/// earlier deployments, so existing Redis entries stay valid.
pub fn cache_key(text: &str, reference_websites: &[String]) -> String {
    let mut sorted: Vec<&str> = reference_websites.iter().map(String::as_str).collect();
    sorted.sort_unstable();

    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hasher.update(sorted.join(",").as_bytes());
    format!("{:x}", hasher.finalize())
}
