//! Application-wide constants
//!
//! This module contains the magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// Kernel driver device nodes
pub mod device {
    /// Character device for animated (dynamic) lighting modes
    pub const DYNAMIC_NODE: &str = "/dev/acer-gkbbl-0";

    /// Character device for per-zone static lighting
    pub const STATIC_NODE: &str = "/dev/acer-gkbbl-static-0";
}

/// External control tool discovery and invocation
pub mod tool {
    /// Locations probed for the control tool, in order
    pub const CANDIDATES: [&str; 4] = [
        "./facer_rgb.py",
        "../facer_rgb.py",
        "/usr/local/bin/facer_rgb.py",
        "/usr/bin/facer_rgb.py",
    ];

    /// Bounded wait for the tool to exit before it is killed
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

    /// Interval between child exit-status polls
    pub const POLL_INTERVAL_MS: u64 = 25;
}

/// Declared bounds for lighting parameters
pub mod limits {
    /// Lowest addressable lighting zone
    pub const ZONE_MIN: u8 = 1;

    /// Highest addressable lighting zone
    pub const ZONE_MAX: u8 = 4;

    /// Slowest animation speed
    pub const SPEED_MIN: u8 = 1;

    /// Fastest animation speed
    pub const SPEED_MAX: u8 = 9;

    /// Speed used when a request leaves it unset
    pub const SPEED_DEFAULT: u8 = 5;

    /// Brightness is a percentage; 0 turns lighting off
    pub const BRIGHTNESS_MAX: u8 = 100;

    /// Brightness used when a request leaves it unset
    pub const BRIGHTNESS_DEFAULT: u8 = 100;
}

/// On-disk layout under the user config directory
pub mod storage {
    /// Application directory name (shared with the desktop GUI's profiles)
    pub const APP_DIR: &str = "predator";

    /// Subdirectory holding one record per named profile
    pub const PROFILE_DIR: &str = "saved profiles";

    /// Extension of profile records
    pub const PROFILE_EXT: &str = "json";

    /// Record of the last successfully applied configuration
    pub const STATE_FILE: &str = "state.json";

    /// Upper bound on profile name length, in bytes
    pub const MAX_PROFILE_NAME_LEN: usize = 64;
}
