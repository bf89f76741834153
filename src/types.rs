//! Bounded value types for lighting parameters
//!
//! Every type here enforces its declared range at construction, so a value
//! that exists is a value the device accepts. Serialized forms match the
//! profile records the desktop GUI writes: colors as RRGGBB hex strings,
//! everything else as plain integers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::limits;
use crate::error::Error;

/// RGB triple, one byte per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// The Predator chassis green, (131, 184, 26)
    pub const ACER_GREEN: Color = Color { r: 131, g: 184, b: 26 };
}

impl FromStr for Color {
    type Err = Error;

    /// Parses `RRGGBB`, with an optional `#` prefix, case-insensitive
    fn from_str(s: &str) -> Result<Self, Error> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::invalid(
                "color",
                format!("'{s}' is not an RRGGBB hex value"),
            ));
        }
        // Length and digit checks above make these infallible
        let channel = |i| u8::from_str_radix(&hex[i..i + 2], 16).unwrap();
        Ok(Color {
            r: channel(0),
            g: channel(2),
            b: channel(4),
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> String {
        c.to_string()
    }
}

/// One of the four physical lighting regions, 1-4
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Zone(u8);

impl Zone {
    pub fn new(zone: u8) -> Result<Self, Error> {
        if (limits::ZONE_MIN..=limits::ZONE_MAX).contains(&zone) {
            Ok(Zone(zone))
        } else {
            Err(Error::OutOfRange {
                field: "zone",
                value: zone.into(),
                min: limits::ZONE_MIN.into(),
                max: limits::ZONE_MAX.into(),
            })
        }
    }

    /// Every zone, in ascending order
    pub fn all() -> impl Iterator<Item = Zone> {
        (limits::ZONE_MIN..=limits::ZONE_MAX).map(Zone)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Zone {
    type Error = Error;

    fn try_from(zone: u8) -> Result<Self, Error> {
        Zone::new(zone)
    }
}

impl From<Zone> for u8 {
    fn from(zone: Zone) -> u8 {
        zone.0
    }
}

/// Animation speed for the dynamic modes, 1 (slowest) to 9
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Speed(u8);

impl Speed {
    pub fn new(speed: u8) -> Result<Self, Error> {
        if (limits::SPEED_MIN..=limits::SPEED_MAX).contains(&speed) {
            Ok(Speed(speed))
        } else {
            Err(Error::OutOfRange {
                field: "speed",
                value: speed.into(),
                min: limits::SPEED_MIN.into(),
                max: limits::SPEED_MAX.into(),
            })
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Speed {
    fn default() -> Self {
        Speed(limits::SPEED_DEFAULT)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Speed {
    type Error = Error;

    fn try_from(speed: u8) -> Result<Self, Error> {
        Speed::new(speed)
    }
}

impl From<Speed> for u8 {
    fn from(speed: Speed) -> u8 {
        speed.0
    }
}

/// Lighting brightness percentage; 0 turns the backlight off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Brightness(u8);

impl Brightness {
    pub const OFF: Brightness = Brightness(0);

    pub fn new(brightness: u8) -> Result<Self, Error> {
        if brightness <= limits::BRIGHTNESS_MAX {
            Ok(Brightness(brightness))
        } else {
            Err(Error::OutOfRange {
                field: "brightness",
                value: brightness.into(),
                min: 0,
                max: limits::BRIGHTNESS_MAX.into(),
            })
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Brightness(limits::BRIGHTNESS_DEFAULT)
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Brightness {
    type Error = Error;

    fn try_from(brightness: u8) -> Result<Self, Error> {
        Brightness::new(brightness)
    }
}

impl From<Brightness> for u8 {
    fn from(brightness: Brightness) -> u8 {
        brightness.0
    }
}

/// Animation direction for the wave and shifting modes
///
/// Discriminants are the wire values the external tool accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Direction {
    RightToLeft = 1,
    LeftToRight = 2,
}

impl Direction {
    pub fn from_wire(value: u8) -> Result<Self, Error> {
        match value {
            1 => Ok(Direction::RightToLeft),
            2 => Ok(Direction::LeftToRight),
            other => Err(Error::OutOfRange {
                field: "direction",
                value: other.into(),
                min: 1,
                max: 2,
            }),
        }
    }

    pub fn wire(self) -> u8 {
        self as u8
    }
}

impl Default for Direction {
    fn default() -> Self {
        Direction::LeftToRight
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::RightToLeft => write!(f, "right-to-left"),
            Direction::LeftToRight => write!(f, "left-to-right"),
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Error> {
        Direction::from_wire(value)
    }
}

impl From<Direction> for u8 {
    fn from(direction: Direction) -> u8 {
        direction.wire()
    }
}
