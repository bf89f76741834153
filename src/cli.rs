// CLI definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::types::Direction;

#[derive(Parser)]
#[command(name = "predator-rgb")]
#[command(author, version, about = "Acer Predator RGB keyboard control")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the facer_rgb control tool (default: probe known locations)
    #[arg(long, global = true, value_name = "PATH")]
    pub tool: Option<PathBuf>,

    /// Bounded wait for the control tool, in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    // === Lighting modes ===
    /// Fixed color per zone
    #[command(visible_alias = "st")]
    Static {
        /// Zone to color (1-4); repeat for several zones
        #[arg(short = 'z', long = "zone", value_name = "ZONE")]
        zones: Vec<u8>,

        /// RRGGBB color for the matching --zone; a single color covers
        /// every selected zone
        #[arg(short = 'c', long = "color", value_name = "RRGGBB")]
        colors: Vec<String>,

        /// Color all four zones instead of naming them
        #[arg(long, conflicts_with = "zones")]
        all: bool,

        /// Brightness percent, 0-100 (default: 100)
        #[arg(short = 'b', long, value_name = "PCT")]
        brightness: Option<u8>,
    },

    /// Pulsing single color
    #[command(visible_alias = "br")]
    Breath {
        /// RRGGBB color
        #[arg(short = 'c', long, value_name = "RRGGBB")]
        color: String,

        /// Animation speed, 1-9 (default: 5)
        #[arg(short = 's', long, value_name = "SPEED")]
        speed: Option<u8>,

        /// Brightness percent, 0-100 (default: 100)
        #[arg(short = 'b', long, value_name = "PCT")]
        brightness: Option<u8>,
    },

    /// Color cycle across the spectrum
    Neon {
        /// Animation speed, 1-9 (default: 5)
        #[arg(short = 's', long, value_name = "SPEED")]
        speed: Option<u8>,

        /// Brightness percent, 0-100 (default: 100)
        #[arg(short = 'b', long, value_name = "PCT")]
        brightness: Option<u8>,
    },

    /// Rainbow wave rolling over the keyboard
    Wave {
        /// Animation speed, 1-9 (default: 5)
        #[arg(short = 's', long, value_name = "SPEED")]
        speed: Option<u8>,

        /// Animation direction (default: left-to-right)
        #[arg(short = 'd', long, value_name = "DIR")]
        direction: Option<DirectionArg>,

        /// Brightness percent, 0-100 (default: 100)
        #[arg(short = 'b', long, value_name = "PCT")]
        brightness: Option<u8>,
    },

    /// Color blocks shifting sideways
    #[command(visible_alias = "sh")]
    Shifting {
        /// RRGGBB color
        #[arg(short = 'c', long, value_name = "RRGGBB")]
        color: String,

        /// Animation speed, 1-9 (default: 5)
        #[arg(short = 's', long, value_name = "SPEED")]
        speed: Option<u8>,

        /// Animation direction (default: left-to-right)
        #[arg(short = 'd', long, value_name = "DIR")]
        direction: Option<DirectionArg>,

        /// Brightness percent, 0-100 (default: 100)
        #[arg(short = 'b', long, value_name = "PCT")]
        brightness: Option<u8>,
    },

    /// Color zooming out from the center
    Zoom {
        /// RRGGBB color
        #[arg(short = 'c', long, value_name = "RRGGBB")]
        color: String,

        /// Animation speed, 1-9 (default: 5)
        #[arg(short = 's', long, value_name = "SPEED")]
        speed: Option<u8>,

        /// Brightness percent, 0-100 (default: 100)
        #[arg(short = 'b', long, value_name = "PCT")]
        brightness: Option<u8>,
    },

    // === Everything else ===
    /// Turn the backlight off (last configuration at brightness 0)
    Off,

    /// List the lighting modes and their parameters
    Modes,

    /// Show device, tool, and last-applied status
    #[command(visible_alias = "info")]
    Status,

    /// Apply a built-in preset, or list them when no name is given
    Preset {
        /// Preset name (see `preset` without arguments)
        name: Option<String>,
    },

    /// Manage saved profiles
    #[command(subcommand, visible_alias = "prof")]
    Profile(ProfileCommands),
}

/// Profile commands
#[derive(Subcommand)]
pub enum ProfileCommands {
    /// List saved profile names
    #[command(visible_alias = "ls")]
    List,

    /// Show a saved profile without applying it
    Show {
        /// Profile name
        name: String,
    },

    /// Save the last applied configuration under a name
    Save {
        /// Profile name (created or overwritten)
        name: String,
    },

    /// Apply a saved profile
    Load {
        /// Profile name
        name: String,
    },

    /// Delete a saved profile
    #[command(visible_aliases = ["rm", "del"])]
    Delete {
        /// Profile name
        name: String,
    },
}

/// Direction as spelled on the command line
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    /// Animate from left to right
    #[value(alias = "ltr")]
    LeftToRight,
    /// Animate from right to left
    #[value(alias = "rtl")]
    RightToLeft,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Direction {
        match arg {
            DirectionArg::LeftToRight => Direction::LeftToRight,
            DirectionArg::RightToLeft => Direction::RightToLeft,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_static_multi_zone() {
        let cli = Cli::try_parse_from([
            "predator-rgb", "static", "-z", "1", "-c", "83b81a", "-z", "2", "-c", "ff0000",
        ])
        .unwrap();
        match cli.command {
            Commands::Static { zones, colors, all, .. } => {
                assert_eq!(zones, vec![1, 2]);
                assert_eq!(colors, vec!["83b81a", "ff0000"]);
                assert!(!all);
            }
            _ => panic!("parsed into the wrong command"),
        }
    }

    #[test]
    fn test_parse_wave_direction_alias() {
        let cli =
            Cli::try_parse_from(["predator-rgb", "wave", "-s", "5", "-d", "rtl"]).unwrap();
        match cli.command {
            Commands::Wave { speed, direction, .. } => {
                assert_eq!(speed, Some(5));
                assert_eq!(direction, Some(DirectionArg::RightToLeft));
            }
            _ => panic!("parsed into the wrong command"),
        }
    }

    #[test]
    fn test_all_conflicts_with_zone() {
        assert!(
            Cli::try_parse_from([
                "predator-rgb", "static", "--all", "-z", "1", "-c", "ffffff",
            ])
            .is_err()
        );
    }

    #[test]
    fn test_global_tool_flag_after_subcommand() {
        let cli =
            Cli::try_parse_from(["predator-rgb", "neon", "--tool", "/opt/facer_rgb.py"]).unwrap();
        assert_eq!(cli.tool.unwrap(), PathBuf::from("/opt/facer_rgb.py"));
    }
}
