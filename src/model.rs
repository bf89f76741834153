//! Lighting modes, raw requests, and validation
//!
//! A [`ModeRequest`] is the loose record shape: a mode plus whatever
//! parameters the caller (CLI, profile file) happened to supply, unchecked.
//! [`validate`] turns it into a [`Configuration`], a tagged variant carrying
//! exactly the fields its mode declares, each within range. Code past the
//! validation boundary never sees an inapplicable or out-of-range value.
//!
//! Policy for fields a mode does not declare: strict reject, never silently
//! drop. A request that says `neon` but carries a color is a mistake worth
//! reporting, not ignoring.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{Brightness, Color, Direction, Speed, Zone};

/// The closed set of lighting behaviors the keyboard supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Static,
    Breath,
    Neon,
    Wave,
    Shifting,
    Zoom,
}

impl Mode {
    pub const ALL: [Mode; 6] = [
        Mode::Static,
        Mode::Breath,
        Mode::Neon,
        Mode::Wave,
        Mode::Shifting,
        Mode::Zoom,
    ];

    /// Mode index in the external tool's numbering
    pub fn wire_id(self) -> u8 {
        match self {
            Mode::Static => 0,
            Mode::Breath => 1,
            Mode::Neon => 2,
            Mode::Wave => 3,
            Mode::Shifting => 4,
            Mode::Zoom => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Static => "static",
            Mode::Breath => "breath",
            Mode::Neon => "neon",
            Mode::Wave => "wave",
            Mode::Shifting => "shifting",
            Mode::Zoom => "zoom",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Mode::Static => "Fixed color per zone",
            Mode::Breath => "Pulsing single color",
            Mode::Neon => "Color cycle across the spectrum",
            Mode::Wave => "Rainbow wave rolling over the keyboard",
            Mode::Shifting => "Color blocks shifting sideways",
            Mode::Zoom => "Color zooming out from the center",
        }
    }

    pub fn supports_zone(self) -> bool {
        matches!(self, Mode::Static)
    }

    pub fn supports_color(self) -> bool {
        matches!(self, Mode::Static | Mode::Breath | Mode::Shifting | Mode::Zoom)
    }

    pub fn supports_speed(self) -> bool {
        !matches!(self, Mode::Static)
    }

    pub fn supports_direction(self) -> bool {
        matches!(self, Mode::Wave | Mode::Shifting)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One per-zone color assignment in a static request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZoneColorEntry {
    pub zone: u8,
    pub color: String,
}

/// A lighting request as received: a mode plus raw, unchecked parameters
///
/// This is also the persisted record shape for profiles and applied state;
/// unknown fields in a stored record are a decode error, matching the
/// strict-reject validation policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModeRequest {
    pub mode: Option<Mode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub zones: Vec<ZoneColorEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brightness: Option<u8>,
}

/// A validated lighting configuration
///
/// One case per mode, each carrying only the fields that mode declares, so
/// an invalid combination cannot be expressed past this point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Configuration {
    Static {
        zones: Vec<(Zone, Color)>,
        brightness: Brightness,
    },
    Breath {
        color: Color,
        speed: Speed,
        brightness: Brightness,
    },
    Neon {
        speed: Speed,
        brightness: Brightness,
    },
    Wave {
        speed: Speed,
        direction: Direction,
        brightness: Brightness,
    },
    Shifting {
        color: Color,
        speed: Speed,
        direction: Direction,
        brightness: Brightness,
    },
    Zoom {
        color: Color,
        speed: Speed,
        brightness: Brightness,
    },
}

impl Configuration {
    pub fn mode(&self) -> Mode {
        match self {
            Configuration::Static { .. } => Mode::Static,
            Configuration::Breath { .. } => Mode::Breath,
            Configuration::Neon { .. } => Mode::Neon,
            Configuration::Wave { .. } => Mode::Wave,
            Configuration::Shifting { .. } => Mode::Shifting,
            Configuration::Zoom { .. } => Mode::Zoom,
        }
    }

    pub fn brightness(&self) -> Brightness {
        match self {
            Configuration::Static { brightness, .. }
            | Configuration::Breath { brightness, .. }
            | Configuration::Neon { brightness, .. }
            | Configuration::Wave { brightness, .. }
            | Configuration::Shifting { brightness, .. }
            | Configuration::Zoom { brightness, .. } => *brightness,
        }
    }

    /// Same configuration at a different brightness (used by `off`)
    pub fn with_brightness(mut self, value: Brightness) -> Self {
        match &mut self {
            Configuration::Static { brightness, .. }
            | Configuration::Breath { brightness, .. }
            | Configuration::Neon { brightness, .. }
            | Configuration::Wave { brightness, .. }
            | Configuration::Shifting { brightness, .. }
            | Configuration::Zoom { brightness, .. } => *brightness = value,
        }
        self
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Configuration::Static { zones, brightness } => {
                write!(f, "static")?;
                for (zone, color) in zones {
                    write!(f, " zone {zone}={color}")?;
                }
                write!(f, " brightness={brightness}")
            }
            Configuration::Breath {
                color,
                speed,
                brightness,
            } => write!(f, "breath color={color} speed={speed} brightness={brightness}"),
            Configuration::Neon { speed, brightness } => {
                write!(f, "neon speed={speed} brightness={brightness}")
            }
            Configuration::Wave {
                speed,
                direction,
                brightness,
            } => write!(f, "wave speed={speed} direction={direction} brightness={brightness}"),
            Configuration::Shifting {
                color,
                speed,
                direction,
                brightness,
            } => write!(
                f,
                "shifting color={color} speed={speed} direction={direction} brightness={brightness}"
            ),
            Configuration::Zoom {
                color,
                speed,
                brightness,
            } => write!(f, "zoom color={color} speed={speed} brightness={brightness}"),
        }
    }
}

impl From<&Configuration> for ModeRequest {
    /// The record shape a configuration is persisted as
    fn from(config: &Configuration) -> ModeRequest {
        let base = ModeRequest {
            mode: Some(config.mode()),
            brightness: Some(config.brightness().get()),
            ..ModeRequest::default()
        };
        match config {
            Configuration::Static { zones, .. } => ModeRequest {
                zones: zones
                    .iter()
                    .map(|(zone, color)| ZoneColorEntry {
                        zone: zone.get(),
                        color: color.to_string(),
                    })
                    .collect(),
                ..base
            },
            Configuration::Breath { color, speed, .. } => ModeRequest {
                color: Some(color.to_string()),
                speed: Some(speed.get()),
                ..base
            },
            Configuration::Neon { speed, .. } => ModeRequest {
                speed: Some(speed.get()),
                ..base
            },
            Configuration::Wave {
                speed, direction, ..
            } => ModeRequest {
                speed: Some(speed.get()),
                direction: Some(direction.wire()),
                ..base
            },
            Configuration::Shifting {
                color,
                speed,
                direction,
                ..
            } => ModeRequest {
                color: Some(color.to_string()),
                speed: Some(speed.get()),
                direction: Some(direction.wire()),
                ..base
            },
            Configuration::Zoom { color, speed, .. } => ModeRequest {
                color: Some(color.to_string()),
                speed: Some(speed.get()),
                ..base
            },
        }
    }
}

/// Validates a raw request into a well-formed configuration
///
/// Fields outside the mode's declared set are rejected with
/// `InvalidParameter`; values outside their bounds with `OutOfRange`.
/// Omitted speed, direction, and brightness are normalized to their
/// defaults (5, left-to-right, 100).
pub fn validate(request: &ModeRequest) -> Result<Configuration> {
    let mode = request
        .mode
        .ok_or_else(|| Error::invalid("mode", "no mode given"))?;

    if !mode.supports_zone() && !request.zones.is_empty() {
        return Err(not_applicable("zone", mode));
    }
    if !mode.supports_color() && request.color.is_some() {
        return Err(not_applicable("color", mode));
    }
    if !mode.supports_speed() && request.speed.is_some() {
        return Err(not_applicable("speed", mode));
    }
    if !mode.supports_direction() && request.direction.is_some() {
        return Err(not_applicable("direction", mode));
    }
    // Static takes its colors through the per-zone entries
    if mode == Mode::Static && request.color.is_some() {
        return Err(Error::invalid(
            "color",
            "static mode takes per-zone colors; use zone entries",
        ));
    }

    let brightness = match request.brightness {
        Some(value) => Brightness::new(value)?,
        None => Brightness::default(),
    };

    match mode {
        Mode::Static => {
            if request.zones.is_empty() {
                return Err(Error::invalid("zone", "static mode needs at least one zone"));
            }
            let mut zones = Vec::with_capacity(request.zones.len());
            for entry in &request.zones {
                let zone = Zone::new(entry.zone)?;
                if zones.iter().any(|(seen, _)| *seen == zone) {
                    return Err(Error::invalid(
                        "zone",
                        format!("zone {zone} given more than once"),
                    ));
                }
                zones.push((zone, entry.color.parse::<Color>()?));
            }
            Ok(Configuration::Static { zones, brightness })
        }
        Mode::Breath => Ok(Configuration::Breath {
            color: required_color(request, mode)?,
            speed: optional_speed(request)?,
            brightness,
        }),
        Mode::Neon => Ok(Configuration::Neon {
            speed: optional_speed(request)?,
            brightness,
        }),
        Mode::Wave => Ok(Configuration::Wave {
            speed: optional_speed(request)?,
            direction: optional_direction(request)?,
            brightness,
        }),
        Mode::Shifting => Ok(Configuration::Shifting {
            color: required_color(request, mode)?,
            speed: optional_speed(request)?,
            direction: optional_direction(request)?,
            brightness,
        }),
        Mode::Zoom => Ok(Configuration::Zoom {
            color: required_color(request, mode)?,
            speed: optional_speed(request)?,
            brightness,
        }),
    }
}

fn not_applicable(field: &'static str, mode: Mode) -> Error {
    Error::invalid(field, format!("not applicable to {mode} mode"))
}

fn required_color(request: &ModeRequest, mode: Mode) -> Result<Color> {
    match &request.color {
        Some(color) => color.parse(),
        None => Err(Error::invalid(
            "color",
            format!("{mode} mode needs a color"),
        )),
    }
}

fn optional_speed(request: &ModeRequest) -> Result<Speed> {
    match request.speed {
        Some(value) => Speed::new(value),
        None => Ok(Speed::default()),
    }
}

fn optional_direction(request: &ModeRequest) -> Result<Direction> {
    match request.direction {
        Some(value) => Direction::from_wire(value),
        None => Ok(Direction::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(mode: Mode) -> ModeRequest {
        ModeRequest {
            mode: Some(mode),
            ..ModeRequest::default()
        }
    }

    fn zone_entry(zone: u8, color: &str) -> ZoneColorEntry {
        ZoneColorEntry {
            zone,
            color: color.to_string(),
        }
    }

    #[test]
    fn test_static_accepts_zone_color() {
        let req = ModeRequest {
            zones: vec![zone_entry(1, "83b81a")],
            ..request(Mode::Static)
        };
        let config = validate(&req).unwrap();
        assert_eq!(
            config,
            Configuration::Static {
                zones: vec![(Zone::new(1).unwrap(), Color::ACER_GREEN)],
                brightness: Brightness::default(),
            }
        );
    }

    #[test]
    fn test_static_rejects_speed() {
        let req = ModeRequest {
            zones: vec![zone_entry(1, "83b81a")],
            speed: Some(5),
            ..request(Mode::Static)
        };
        assert!(matches!(
            validate(&req),
            Err(Error::InvalidParameter { field: "speed", .. })
        ));
    }

    #[test]
    fn test_static_rejects_bare_color() {
        let req = ModeRequest {
            zones: vec![zone_entry(1, "83b81a")],
            color: Some("ff0000".to_string()),
            ..request(Mode::Static)
        };
        assert!(matches!(
            validate(&req),
            Err(Error::InvalidParameter { field: "color", .. })
        ));
    }

    #[test]
    fn test_static_rejects_empty_zones() {
        assert!(matches!(
            validate(&request(Mode::Static)),
            Err(Error::InvalidParameter { field: "zone", .. })
        ));
    }

    #[test]
    fn test_static_rejects_duplicate_zone() {
        let req = ModeRequest {
            zones: vec![zone_entry(2, "ff0000"), zone_entry(2, "00ff00")],
            ..request(Mode::Static)
        };
        assert!(matches!(
            validate(&req),
            Err(Error::InvalidParameter { field: "zone", .. })
        ));
    }

    #[test]
    fn test_static_zone_boundaries() {
        for zone in [1, 4] {
            let req = ModeRequest {
                zones: vec![zone_entry(zone, "ffffff")],
                ..request(Mode::Static)
            };
            assert!(validate(&req).is_ok(), "zone {zone} should be accepted");
        }
        for zone in [0, 5] {
            let req = ModeRequest {
                zones: vec![zone_entry(zone, "ffffff")],
                ..request(Mode::Static)
            };
            assert!(
                matches!(validate(&req), Err(Error::OutOfRange { field: "zone", .. })),
                "zone {zone} should be out of range"
            );
        }
    }

    #[test]
    fn test_breath_accepts_color_and_speed() {
        let req = ModeRequest {
            color: Some("ff0000".to_string()),
            speed: Some(9),
            brightness: Some(80),
            ..request(Mode::Breath)
        };
        let config = validate(&req).unwrap();
        assert_eq!(config.mode(), Mode::Breath);
        assert_eq!(config.brightness().get(), 80);
    }

    #[test]
    fn test_breath_requires_color() {
        assert!(matches!(
            validate(&request(Mode::Breath)),
            Err(Error::InvalidParameter { field: "color", .. })
        ));
    }

    #[test]
    fn test_breath_rejects_zone_and_direction() {
        let req = ModeRequest {
            color: Some("ff0000".to_string()),
            zones: vec![zone_entry(1, "ff0000")],
            ..request(Mode::Breath)
        };
        assert!(matches!(
            validate(&req),
            Err(Error::InvalidParameter { field: "zone", .. })
        ));

        let req = ModeRequest {
            color: Some("ff0000".to_string()),
            direction: Some(1),
            ..request(Mode::Breath)
        };
        assert!(matches!(
            validate(&req),
            Err(Error::InvalidParameter { field: "direction", .. })
        ));
    }

    #[test]
    fn test_neon_rejects_color() {
        let req = ModeRequest {
            color: Some("ff0000".to_string()),
            ..request(Mode::Neon)
        };
        assert!(matches!(
            validate(&req),
            Err(Error::InvalidParameter { field: "color", .. })
        ));
    }

    #[test]
    fn test_neon_normalizes_defaults() {
        let config = validate(&request(Mode::Neon)).unwrap();
        assert_eq!(
            config,
            Configuration::Neon {
                speed: Speed::default(),
                brightness: Brightness::default(),
            }
        );
    }

    #[test]
    fn test_wave_accepts_direction_without_color() {
        let req = ModeRequest {
            speed: Some(5),
            direction: Some(1),
            ..request(Mode::Wave)
        };
        let config = validate(&req).unwrap();
        assert_eq!(
            config,
            Configuration::Wave {
                speed: Speed::new(5).unwrap(),
                direction: Direction::RightToLeft,
                brightness: Brightness::default(),
            }
        );
    }

    #[test]
    fn test_wave_rejects_color() {
        let req = ModeRequest {
            color: Some("ff0000".to_string()),
            ..request(Mode::Wave)
        };
        assert!(matches!(
            validate(&req),
            Err(Error::InvalidParameter { field: "color", .. })
        ));
    }

    #[test]
    fn test_shifting_accepts_full_parameter_set() {
        let req = ModeRequest {
            color: Some("8000ff".to_string()),
            speed: Some(3),
            direction: Some(2),
            brightness: Some(90),
            ..request(Mode::Shifting)
        };
        assert!(validate(&req).is_ok());
    }

    #[test]
    fn test_shifting_rejects_zone_entries() {
        let req = ModeRequest {
            color: Some("8000ff".to_string()),
            zones: vec![zone_entry(1, "8000ff")],
            ..request(Mode::Shifting)
        };
        assert!(matches!(
            validate(&req),
            Err(Error::InvalidParameter { field: "zone", .. })
        ));
    }

    #[test]
    fn test_zoom_rejects_direction() {
        let req = ModeRequest {
            color: Some("8000ff".to_string()),
            direction: Some(1),
            ..request(Mode::Zoom)
        };
        assert!(matches!(
            validate(&req),
            Err(Error::InvalidParameter { field: "direction", .. })
        ));
    }

    #[test]
    fn test_speed_boundaries() {
        for (speed, ok) in [(0, false), (1, true), (9, true), (10, false)] {
            let req = ModeRequest {
                speed: Some(speed),
                ..request(Mode::Neon)
            };
            assert_eq!(validate(&req).is_ok(), ok, "speed {speed}");
        }
    }

    #[test]
    fn test_brightness_boundary() {
        let req = ModeRequest {
            brightness: Some(101),
            ..request(Mode::Neon)
        };
        assert!(matches!(
            validate(&req),
            Err(Error::OutOfRange { field: "brightness", .. })
        ));
    }

    #[test]
    fn test_missing_mode_rejected() {
        assert!(matches!(
            validate(&ModeRequest::default()),
            Err(Error::InvalidParameter { field: "mode", .. })
        ));
    }

    #[test]
    fn test_record_round_trip_every_mode() {
        let configs = [
            Configuration::Static {
                zones: vec![
                    (Zone::new(1).unwrap(), Color::ACER_GREEN),
                    (Zone::new(3).unwrap(), "ff00ff".parse().unwrap()),
                ],
                brightness: Brightness::new(70).unwrap(),
            },
            Configuration::Breath {
                color: "ff0000".parse().unwrap(),
                speed: Speed::new(2).unwrap(),
                brightness: Brightness::default(),
            },
            Configuration::Neon {
                speed: Speed::new(6).unwrap(),
                brightness: Brightness::default(),
            },
            Configuration::Wave {
                speed: Speed::new(7).unwrap(),
                direction: Direction::RightToLeft,
                brightness: Brightness::new(90).unwrap(),
            },
            Configuration::Shifting {
                color: "123456".parse().unwrap(),
                speed: Speed::new(4).unwrap(),
                direction: Direction::LeftToRight,
                brightness: Brightness::default(),
            },
            Configuration::Zoom {
                color: "8000ff".parse().unwrap(),
                speed: Speed::new(4).unwrap(),
                brightness: Brightness::new(85).unwrap(),
            },
        ];
        for config in configs {
            let record = ModeRequest::from(&config);
            assert_eq!(validate(&record).unwrap(), config);
        }
    }

    #[test]
    fn test_record_decode_rejects_unknown_field() {
        let json = r#"{"mode": "neon", "speed": 5, "sparkle": true}"#;
        assert!(serde_json::from_str::<ModeRequest>(json).is_err());
    }

    #[test]
    fn test_mode_support_table() {
        // One row per mode, mirroring the parameter applicability table
        let rows = [
            (Mode::Static, true, true, false, false),
            (Mode::Breath, false, true, true, false),
            (Mode::Neon, false, false, true, false),
            (Mode::Wave, false, false, true, true),
            (Mode::Shifting, false, true, true, true),
            (Mode::Zoom, false, true, true, false),
        ];
        for (mode, zone, color, speed, direction) in rows {
            assert_eq!(mode.supports_zone(), zone, "{mode} zone");
            assert_eq!(mode.supports_color(), color, "{mode} color");
            assert_eq!(mode.supports_speed(), speed, "{mode} speed");
            assert_eq!(mode.supports_direction(), direction, "{mode} direction");
        }
    }

    #[test]
    fn test_wire_ids_match_tool_numbering() {
        let ids: Vec<u8> = Mode::ALL.iter().map(|m| m.wire_id()).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);
    }
}
