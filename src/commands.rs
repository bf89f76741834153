//! Command handlers for the CLI application
//!
//! Each handler is one synchronous round trip: build or fetch a request,
//! validate it, hand it to the dispatcher or the profile store, report the
//! outcome on stdout. Errors bubble to `main`, which exits nonzero.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use tracing::warn;

use crate::dispatch::{Dispatcher, default_device_nodes};
use crate::error::Error;
use crate::model::{self, Configuration, Mode, ModeRequest, ZoneColorEntry};
use crate::presets;
use crate::state::StateFile;
use crate::store::ProfileStore;
use crate::types::{Brightness, Color, Speed};

/// Global CLI options every dispatching handler needs
pub struct Options {
    pub tool: Option<PathBuf>,
    pub timeout: Option<u64>,
}

fn dispatcher(opts: &Options) -> Result<Dispatcher> {
    let tool = Dispatcher::locate_tool(opts.tool.as_deref())?;
    let mut dispatcher = Dispatcher::new(tool);
    if let Some(secs) = opts.timeout {
        dispatcher = dispatcher.with_timeout(Duration::from_secs(secs));
    }
    Ok(dispatcher)
}

/// Validate and apply a lighting request, recording it as the applied state
pub fn apply(opts: &Options, request: ModeRequest) -> Result<()> {
    let config = model::validate(&request)?;
    apply_config(opts, &config)
}

fn apply_config(opts: &Options, config: &Configuration) -> Result<()> {
    dispatcher(opts)?.apply(config)?;
    // A failed state write must not fail a lighting change that already
    // happened
    if let Err(e) = StateFile::open_default().save(config) {
        warn!(error = %e, "could not record applied state");
    }
    println!("Applied: {config}");
    Ok(())
}

/// Assemble the static-mode request from repeated --zone/--color pairs
///
/// A single color fans out over every selected zone; otherwise colors are
/// paired with zones positionally and the counts must match.
pub fn static_request(
    zones: &[u8],
    colors: &[String],
    all: bool,
    brightness: Option<u8>,
) -> Result<ModeRequest> {
    let zones: Vec<u8> = if all {
        default_zone_ids()
    } else {
        zones.to_vec()
    };
    if colors.is_empty() {
        return Err(Error::invalid("color", "static mode needs a color").into());
    }
    let entries = if colors.len() == 1 {
        zones
            .iter()
            .map(|&zone| ZoneColorEntry {
                zone,
                color: colors[0].clone(),
            })
            .collect()
    } else if colors.len() == zones.len() {
        zones
            .iter()
            .zip(colors)
            .map(|(&zone, color)| ZoneColorEntry {
                zone,
                color: color.clone(),
            })
            .collect()
    } else {
        return Err(Error::invalid(
            "color",
            format!("{} colors given for {} zones", colors.len(), zones.len()),
        )
        .into());
    };
    Ok(ModeRequest {
        mode: Some(Mode::Static),
        zones: entries,
        brightness,
        ..ModeRequest::default()
    })
}

fn default_zone_ids() -> Vec<u8> {
    crate::types::Zone::all().map(|zone| zone.get()).collect()
}

/// Turn the backlight off: the last applied configuration at brightness 0,
/// or a default breath when nothing was ever applied
pub fn off(opts: &Options) -> Result<()> {
    let config = match StateFile::open_default().load().map(|r| model::validate(&r)) {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            warn!(error = %e, "stale applied state, using default for off");
            default_config()
        }
        None => default_config(),
    };
    apply_config(opts, &config.with_brightness(Brightness::OFF))
}

fn default_config() -> Configuration {
    Configuration::Breath {
        color: Color::ACER_GREEN,
        speed: Speed::default(),
        brightness: Brightness::default(),
    }
}

/// List the lighting modes and the parameters each one takes
pub fn modes() {
    println!(
        "{:<10} {:<6} {:<10} {:<6} {:<10} Description",
        "Mode", "Zone", "Color", "Speed", "Direction"
    );
    println!("{}", "-".repeat(70));
    for mode in Mode::ALL {
        let color = if mode == Mode::Static {
            "per-zone"
        } else if mode.supports_color() {
            "yes"
        } else {
            "-"
        };
        println!(
            "{:<10} {:<6} {:<10} {:<6} {:<10} {}",
            mode.name(),
            flag(mode.supports_zone()),
            color,
            flag(mode.supports_speed()),
            flag(mode.supports_direction()),
            mode.description()
        );
    }
}

fn flag(supported: bool) -> &'static str {
    if supported { "yes" } else { "-" }
}

/// Report device readiness, tool location, and the last applied configuration
pub fn status(opts: &Options) {
    println!("Device nodes:");
    for node in default_device_nodes() {
        let state = if node.exists() { "present" } else { "missing" };
        println!("  {:<28} {}", node.display(), state);
    }

    match Dispatcher::locate_tool(opts.tool.as_deref()) {
        Ok(path) => println!("Control tool: {}", path.display()),
        Err(e) => println!("Control tool: {e}"),
    }

    match StateFile::open_default().load() {
        Some(record) => match model::validate(&record) {
            Ok(config) => println!("Last applied: {config}"),
            Err(_) => println!("Last applied: unreadable record"),
        },
        None => println!("Last applied: nothing yet"),
    }
}

/// Apply a named preset, or list the presets when no name is given
pub fn preset(opts: &Options, name: Option<&str>) -> Result<()> {
    let Some(name) = name else {
        println!("{:<20} Summary", "Preset");
        println!("{}", "-".repeat(50));
        for preset in &presets::PRESETS {
            println!("{:<20} {}", preset.name, preset.summary);
        }
        return Ok(());
    };
    let Some(preset) = presets::find(name) else {
        bail!("unknown preset '{name}' (run `preset` with no name to list them)");
    };
    apply_config(opts, &preset.config())
}

pub fn profile_list() -> Result<()> {
    let names = ProfileStore::open_default().list()?;
    if names.is_empty() {
        println!("No saved profiles.");
        return Ok(());
    }
    for name in names {
        println!("{name}");
    }
    Ok(())
}

pub fn profile_show(name: &str) -> Result<()> {
    let record = ProfileStore::open_default().get(name)?;
    let config = model::validate(&record)
        .with_context(|| format!("profile '{name}' holds an invalid configuration"))?;
    println!("{config}");
    Ok(())
}

/// Snapshot the last applied configuration under a profile name
pub fn profile_save(name: &str) -> Result<()> {
    let record = StateFile::open_default()
        .load()
        .context("nothing has been applied yet; set a mode first")?;
    let config = model::validate(&record).context("applied state is unreadable")?;
    ProfileStore::open_default().put(name, &config)?;
    println!("Saved profile '{name}': {config}");
    Ok(())
}

pub fn profile_load(opts: &Options, name: &str) -> Result<()> {
    let record = ProfileStore::open_default().get(name)?;
    let config = model::validate(&record)
        .with_context(|| format!("profile '{name}' holds an invalid configuration"))?;
    apply_config(opts, &config)
}

pub fn profile_delete(name: &str) -> Result<()> {
    ProfileStore::open_default().delete(name)?;
    println!("Deleted profile '{name}'.");
    Ok(())
}
