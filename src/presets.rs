//! Built-in quick presets
//!
//! The handful of one-shot looks the desktop front end offers, expressed
//! as ready-made configurations.

use crate::model::Configuration;
use crate::types::{Brightness, Color, Direction, Speed, Zone};

/// A named, ready-to-apply configuration
pub struct Preset {
    pub name: &'static str,
    pub summary: &'static str,
    build: fn() -> Configuration,
}

impl Preset {
    pub fn config(&self) -> Configuration {
        (self.build)()
    }
}

pub const PRESETS: [Preset; 5] = [
    Preset {
        name: "acer-green-breath",
        summary: "Acer green, breathing",
        build: || Configuration::Breath {
            color: Color::ACER_GREEN,
            speed: speed(5),
            brightness: brightness(100),
        },
    },
    Preset {
        name: "gaming-wave",
        summary: "Fast rainbow wave",
        build: || Configuration::Wave {
            speed: speed(7),
            direction: Direction::LeftToRight,
            brightness: brightness(90),
        },
    },
    Preset {
        name: "cool-blue",
        summary: "Static blue across all zones",
        build: || Configuration::Static {
            zones: Zone::all()
                .map(|zone| (zone, Color { r: 0, g: 100, b: 255 }))
                .collect(),
            brightness: brightness(80),
        },
    },
    Preset {
        name: "rainbow-neon",
        summary: "Full-spectrum neon cycle",
        build: || Configuration::Neon {
            speed: speed(6),
            brightness: brightness(100),
        },
    },
    Preset {
        name: "purple-zoom",
        summary: "Purple zoom pulses",
        build: || Configuration::Zoom {
            color: Color { r: 128, g: 0, b: 255 },
            speed: speed(4),
            brightness: brightness(85),
        },
    },
];

pub fn find(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|preset| preset.name == name)
}

// Preset values are fixed and in range; the fallback never fires
fn speed(value: u8) -> Speed {
    Speed::new(value).unwrap_or_default()
}

fn brightness(value: u8) -> Brightness {
    Brightness::new(value).unwrap_or_default()
}
