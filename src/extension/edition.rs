//! Edition and version identification.

/// Product name of the solver.
pub const SOLVER_NAME: &str = "U-Metaheur Solver";

/// Edition label of the community tier.
pub const COMMUNITY_NAME: &str = "Community Edition";

/// Crate coordinates of the community tier.
pub const COMMUNITY_COORDINATES: &str = "u-metaheur-ext";

/// Version marker used when the build carries no version metadata.
pub const DEVELOPMENT_SNAPSHOT: &str = "Development Snapshot";

/// Returns `"<edition> <version>"`, e.g. `"Community Edition v0.1.0"`.
///
/// The version is the one embedded by the build, or
/// [`DEVELOPMENT_SNAPSHOT`] when the crate was compiled without package
/// metadata.
///
/// # Examples
///
/// ```
/// use u_metaheur_ext::extension::{identify_solver_version, COMMUNITY_NAME};
///
/// assert!(identify_solver_version().starts_with(COMMUNITY_NAME));
/// ```
pub fn identify_solver_version() -> String {
    format!("{COMMUNITY_NAME} {}", version_string(embedded_version()))
}

/// Formats a version token: `v<version>`, or the development marker.
pub fn version_string(version: Option<&str>) -> String {
    match version {
        Some(version) => format!("v{version}"),
        None => DEVELOPMENT_SNAPSHOT.to_owned(),
    }
}

fn embedded_version() -> Option<&'static str> {
    option_env!("CARGO_PKG_VERSION").filter(|version| !version.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_string() {
        assert_eq!(version_string(Some("1.4.0")), "v1.4.0");
        assert_eq!(version_string(None), DEVELOPMENT_SNAPSHOT);
    }

    #[test]
    fn test_identify_solver_version_shape() {
        let identity = identify_solver_version();
        let marker = identity
            .strip_prefix(COMMUNITY_NAME)
            .and_then(|rest| rest.strip_prefix(' '))
            .unwrap_or_default();
        let is_release = marker.strip_prefix('v').is_some_and(|v| !v.is_empty());
        assert!(
            is_release || marker == DEVELOPMENT_SNAPSHOT,
            "unexpected identity {identity:?}"
        );
    }

    #[test]
    fn test_built_by_cargo_embeds_version() {
        assert_eq!(
            identify_solver_version(),
            format!("{COMMUNITY_NAME} v{}", env!("CARGO_PKG_VERSION"))
        );
    }
}
