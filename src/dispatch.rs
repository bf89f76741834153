//! Invocation of the external control tool
//!
//! The tool (`facer_rgb.py`) owns the actual device protocol; this module
//! owns its command line. The argument grammar is the tool's versioned
//! contract (`-m` mode index, `-z` zone, `-cR`/`-cG`/`-cB` color channels,
//! `-s` speed, `-d` direction, `-b` brightness) and is produced in exactly
//! one place per mode, so a change on the tool's side touches one function.
//!
//! Before anything is spawned the device nodes are checked; a machine
//! without the facer kernel module fails fast with `DeviceNotFound` instead
//! of surfacing the tool's own error output.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::constants::{device, tool};
use crate::error::{Error, Result};
use crate::model::{Configuration, Mode};
use crate::types::{Brightness, Color, Direction, Speed, Zone};

/// The device nodes the kernel driver exposes
pub fn default_device_nodes() -> Vec<PathBuf> {
    vec![
        PathBuf::from(device::DYNAMIC_NODE),
        PathBuf::from(device::STATIC_NODE),
    ]
}

/// Synchronous dispatcher for one external tool invocation per command line
pub struct Dispatcher {
    tool: PathBuf,
    device_nodes: Vec<PathBuf>,
    timeout: Duration,
}

impl Dispatcher {
    pub fn new(tool: PathBuf) -> Self {
        Dispatcher {
            tool,
            device_nodes: default_device_nodes(),
            timeout: Duration::from_secs(tool::DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Resolve the control tool: an explicit path wins, otherwise the
    /// well-known install locations are probed in order
    pub fn locate_tool(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(path.to_path_buf());
            }
            return Err(Error::ToolNotFound(format!(
                "{} does not exist",
                path.display()
            )));
        }
        for candidate in tool::CANDIDATES {
            let path = PathBuf::from(candidate);
            if path.exists() {
                debug!(path = %path.display(), "found control tool");
                return Ok(path);
            }
        }
        Err(Error::ToolNotFound(format!(
            "looked in {}",
            tool::CANDIDATES.join(", ")
        )))
    }

    pub fn with_device_nodes(mut self, nodes: Vec<PathBuf>) -> Self {
        self.device_nodes = nodes;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn tool(&self) -> &Path {
        &self.tool
    }

    /// True when at least one device node exists
    pub fn device_present(&self) -> bool {
        self.device_nodes.iter().any(|node| node.exists())
    }

    /// Apply a validated configuration to the keyboard
    ///
    /// Static configurations issue one tool invocation per zone entry,
    /// sequentially, failing fast; every other mode is a single invocation.
    pub fn apply(&self, config: &Configuration) -> Result<()> {
        if !self.device_present() {
            return Err(Error::DeviceNotFound);
        }
        for args in command_lines(config) {
            self.run_tool(&args)?;
        }
        info!(config = %config, "applied configuration");
        Ok(())
    }

    /// Run the tool once with a bounded wait, mapping exit status to a result
    fn run_tool(&self, args: &[String]) -> Result<()> {
        debug!(tool = %self.tool.display(), args = ?args, "invoking control tool");
        let mut child = Command::new(&self.tool)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    Error::ToolNotFound(self.tool.display().to_string())
                }
                _ => Error::Device {
                    stderr: format!("failed to launch {}: {e}", self.tool.display()),
                },
            })?;

        let deadline = Instant::now() + self.timeout;
        loop {
            match child.try_wait() {
                Ok(Some(_)) => break,
                Ok(None) if Instant::now() >= deadline => {
                    warn!(timeout_secs = self.timeout.as_secs(), "control tool hung, killing it");
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(Error::Timeout {
                        seconds: self.timeout.as_secs(),
                    });
                }
                Ok(None) => thread::sleep(Duration::from_millis(tool::POLL_INTERVAL_MS)),
                Err(e) => {
                    return Err(Error::Device {
                        stderr: format!("failed waiting for tool: {e}"),
                    });
                }
            }
        }

        // The child has exited; this only drains the pipes and reads the
        // cached status
        let output = child.wait_with_output().map_err(|e| Error::Device {
            stderr: format!("failed collecting tool output: {e}"),
        })?;
        if output.status.success() {
            return Ok(());
        }
        let mut diagnostic = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if diagnostic.is_empty() {
            diagnostic = String::from_utf8_lossy(&output.stdout).trim().to_string();
        }
        if diagnostic.is_empty() {
            diagnostic = format!("exited with {}", output.status);
        }
        Err(Error::Device { stderr: diagnostic })
    }
}

/// The tool command lines a configuration translates to, in dispatch order
fn command_lines(config: &Configuration) -> Vec<Vec<String>> {
    match config {
        Configuration::Static { zones, brightness } => zones
            .iter()
            .map(|(zone, color)| static_args(*zone, *color, *brightness))
            .collect(),
        Configuration::Breath {
            color,
            speed,
            brightness,
        } => vec![breath_args(*color, *speed, *brightness)],
        Configuration::Neon { speed, brightness } => vec![neon_args(*speed, *brightness)],
        Configuration::Wave {
            speed,
            direction,
            brightness,
        } => vec![wave_args(*speed, *direction, *brightness)],
        Configuration::Shifting {
            color,
            speed,
            direction,
            brightness,
        } => vec![shifting_args(*color, *speed, *direction, *brightness)],
        Configuration::Zoom {
            color,
            speed,
            brightness,
        } => vec![zoom_args(*color, *speed, *brightness)],
    }
}

fn static_args(zone: Zone, color: Color, brightness: Brightness) -> Vec<String> {
    let mut args = vec![
        "-m".into(),
        Mode::Static.wire_id().to_string(),
        "-z".into(),
        zone.get().to_string(),
    ];
    args.extend(color_args(color));
    args.extend(brightness_args(brightness));
    args
}

fn breath_args(color: Color, speed: Speed, brightness: Brightness) -> Vec<String> {
    let mut args = vec![
        "-m".into(),
        Mode::Breath.wire_id().to_string(),
        "-s".into(),
        speed.get().to_string(),
    ];
    args.extend(color_args(color));
    args.extend(brightness_args(brightness));
    args
}

fn neon_args(speed: Speed, brightness: Brightness) -> Vec<String> {
    let mut args = vec![
        "-m".into(),
        Mode::Neon.wire_id().to_string(),
        "-s".into(),
        speed.get().to_string(),
    ];
    args.extend(brightness_args(brightness));
    args
}

fn wave_args(speed: Speed, direction: Direction, brightness: Brightness) -> Vec<String> {
    let mut args = vec![
        "-m".into(),
        Mode::Wave.wire_id().to_string(),
        "-s".into(),
        speed.get().to_string(),
        "-d".into(),
        direction.wire().to_string(),
    ];
    args.extend(brightness_args(brightness));
    args
}

fn shifting_args(
    color: Color,
    speed: Speed,
    direction: Direction,
    brightness: Brightness,
) -> Vec<String> {
    let mut args = vec![
        "-m".into(),
        Mode::Shifting.wire_id().to_string(),
        "-s".into(),
        speed.get().to_string(),
        "-d".into(),
        direction.wire().to_string(),
    ];
    args.extend(color_args(color));
    args.extend(brightness_args(brightness));
    args
}

fn zoom_args(color: Color, speed: Speed, brightness: Brightness) -> Vec<String> {
    let mut args = vec![
        "-m".into(),
        Mode::Zoom.wire_id().to_string(),
        "-s".into(),
        speed.get().to_string(),
    ];
    args.extend(color_args(color));
    args.extend(brightness_args(brightness));
    args
}

fn color_args(color: Color) -> Vec<String> {
    vec![
        "-cR".into(),
        color.r.to_string(),
        "-cG".into(),
        color.g.to_string(),
        "-cB".into(),
        color.b.to_string(),
    ]
}

fn brightness_args(brightness: Brightness) -> Vec<String> {
    vec!["-b".into(), brightness.get().to_string()]
}
