//! Constants and configuration values for owneo
//!
//! Centralizes paths, identity property names and the sentinel family code.

/// System paths
pub mod paths {
    /// Default mount point of the owfs FUSE filesystem
    pub const DEFAULT_OWFS_MOUNT: &str = "/mnt/1wire";

    /// Configuration directory used when no user directory can be found
    pub const SYSTEM_CONFIG_DIR: &str = "/etc/owneo";

    /// Configuration file name
    pub const CONFIG_FILE: &str = "config.json";

    /// Separator between path segments on the sensor network
    pub const SEPARATOR: char = '/';
}

/// Device family constants
pub mod family {
    /// Family code of the "unknown family" sentinel
    pub const UNKNOWN_CODE: &str = "FF";

    /// Description of the "unknown family" sentinel
    pub const UNKNOWN_DESCRIPTION: &str = "Unknown Family Code";

    /// Separator between the family code and the serial number in a device id
    pub const CODE_SEPARATOR: char = '.';
}

/// Property selection constants
pub mod properties {
    /// Identity properties, always selected when a device exposes them
    pub const IDENTITY: &[&str] = &["id", "family", "type", "alias"];
}

/// Polling defaults
pub mod polling {
    /// Default interval between refresh cycles in seconds
    pub const DEFAULT_INTERVAL_SECS: u64 = 30;

    /// Smallest accepted interval in seconds
    pub const MIN_INTERVAL_SECS: u64 = 1;
}

/// Report layout
pub mod report {
    /// Width of the horizontal rule under the report header
    pub const RULE_WIDTH: usize = 80;
}
