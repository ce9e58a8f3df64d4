/// Name of the source database when a configuration doesn't give one.
pub const DEFAULT_SOURCE: &str = "IMGT/GENE-DB";

/// Configurations bundled with germdb, looked up by database name.
pub const PRESETS: &[(&str, &str)] = &[(
    "vrc01mouse",
    include_str!("../presets/vrc01mouse.toml"),
)];
