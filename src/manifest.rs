use serde::Serialize;

/// Registration record the host plugin loader consumes at startup.
///
/// Field set and values are dictated by the host, this crate only carries
/// them. `release_date` stays an opaque `YYYY-MM-DD` string for the same
/// reason.
#[derive(Debug, Clone, Serialize)]
pub struct PluginManifest {
    pub name: &'static str,
    pub description: &'static str,
    pub author: &'static str,
    pub version: &'static str,
    /// Minimum host application version this plugin runs against.
    pub compatible_version: &'static str,
    /// URL routing slug under which the host mounts the plugin.
    pub route: &'static str,
    pub release_date: &'static str,
    pub permissions: &'static [&'static str],
}

pub const MANIFEST: PluginManifest = PluginManifest {
    name: "Galette Fullcard",
    description: "Full member card as PDF",
    author: "Johan Cwiklinski",
    version: "2.0.0",
    compatible_version: "1.1.0",
    route: "fullcard",
    release_date: "2023-12-07",
    permissions: &[],
};
