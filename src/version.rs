//! Package version information.

/// Returns the full version of the package (e.g. `1.0.0` or `1.0.0-3-gabc1234-dirty`).
pub fn full_version() -> &'static str {
    env!("HIGHSPOT_VERSION")
}

/// Returns the `major.minor` portion of the package version.
pub fn major_minor_version() -> String {
    major_minor(full_version())
}

/// Value sent in the `User-Agent` header.
pub fn user_agent() -> String {
    format!("highspot-rs/{}", full_version())
}

fn major_minor(version: &str) -> String {
    version.split('.').take(2).collect::<Vec<_>>().join(".")
}
