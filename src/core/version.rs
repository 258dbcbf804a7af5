/// Revision component of the build identity. Cargo versions carry three
/// components, the on-disk stamp carries four.
const REVISION: &str = "0";

/// Build identity of the running binary, taken from Cargo.toml at compile
/// time. This exact string is stamped onto the settings document on every
/// write.
pub fn build_identity() -> String {
    format!(
        "{}.{}.{}.{}",
        env!("CARGO_PKG_VERSION_MAJOR"),
        env!("CARGO_PKG_VERSION_MINOR"),
        env!("CARGO_PKG_VERSION_PATCH"),
        REVISION
    )
}

/// Whether a stamp found on a document was written by this build.
pub fn matches_current(stamp: &str) -> bool {
    normalize_version(stamp) == normalize_version(&build_identity())
}

/// Normalize versions for comparison
fn normalize_version(version: &str) -> String {
    version
        .trim()
        .trim_start_matches(['v', 'V'])
        .chars()
        .filter(|c| c.is_ascii())
        .collect::<String>()
        .to_ascii_lowercase()
}
