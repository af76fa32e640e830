//! Build metadata embedded by `build.rs`.

/// Package version from Cargo.toml.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

const GIT_BRANCH: Option<&str> = option_env!("VERGEN_GIT_BRANCH");
const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");
const GIT_DIRTY: Option<&str> = option_env!("VERGEN_GIT_DIRTY");
const BUILD_TIMESTAMP: Option<&str> = option_env!("VERGEN_BUILD_TIMESTAMP");

/// `User-Agent` sent to the completion and translation APIs.
pub const USER_AGENT: &str = concat!("rtags/", env!("CARGO_PKG_VERSION"));

/// Version with git metadata, e.g. `0.1.0+main.abc1234.dirty`.
///
/// Outside a git checkout only the package version is returned.
pub fn version_string() -> String {
    let (Some(branch), Some(sha)) = (GIT_BRANCH, GIT_SHA) else {
        return PKG_VERSION.to_string();
    };
    let short: String = sha.chars().take(7).collect();
    let dirty = if GIT_DIRTY == Some("true") { ".dirty" } else { "" };
    format!("{PKG_VERSION}+{branch}.{short}{dirty}")
}

/// Build timestamp, if recorded.
pub fn build_timestamp() -> Option<&'static str> {
    BUILD_TIMESTAMP
}
