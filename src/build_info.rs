//! Compile-time build information.

pub const BUILD_COMMIT: &str = env!("MANOR_BUILD_COMMIT");
pub const BUILD_DATE: &str = env!("MANOR_BUILD_DATE");

/// Version string shown by `manor --version` and the title screen.
pub fn version_line() -> String {
    format!(
        "manor {} ({}, {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_info_not_empty() {
        assert!(!BUILD_COMMIT.is_empty());
        assert!(!BUILD_DATE.is_empty());
    }

    #[test]
    fn test_version_line_mentions_package_version() {
        let line = version_line();
        assert!(line.starts_with("manor "));
        assert!(line.contains(env!("CARGO_PKG_VERSION")));
        assert!(line.contains(BUILD_COMMIT));
    }
}
