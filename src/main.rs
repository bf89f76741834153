#![forbid(unsafe_code)]

mod cli;
mod commands;
mod constants;
mod dispatch;
mod error;
mod model;
mod presets;
mod state;
mod store;
mod types;

use clap::Parser;
use tracing::Level as TraceLevel;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands, ProfileCommands};
use commands::Options;
use model::{Mode, ModeRequest};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Parse log level from environment variable; default quiet so command
    // output stays clean
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "warn".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "info" => TraceLevel::INFO,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let opts = Options {
        tool: cli.tool.clone(),
        timeout: cli.timeout,
    };

    match cli.command {
        Commands::Static {
            zones,
            colors,
            all,
            brightness,
        } => {
            let request = commands::static_request(&zones, &colors, all, brightness)?;
            commands::apply(&opts, request)?;
        }
        Commands::Breath {
            color,
            speed,
            brightness,
        } => {
            commands::apply(
                &opts,
                ModeRequest {
                    mode: Some(Mode::Breath),
                    color: Some(color),
                    speed,
                    brightness,
                    ..ModeRequest::default()
                },
            )?;
        }
        Commands::Neon { speed, brightness } => {
            commands::apply(
                &opts,
                ModeRequest {
                    mode: Some(Mode::Neon),
                    speed,
                    brightness,
                    ..ModeRequest::default()
                },
            )?;
        }
        Commands::Wave {
            speed,
            direction,
            brightness,
        } => {
            commands::apply(
                &opts,
                ModeRequest {
                    mode: Some(Mode::Wave),
                    speed,
                    direction: direction.map(|d| types::Direction::from(d).wire()),
                    brightness,
                    ..ModeRequest::default()
                },
            )?;
        }
        Commands::Shifting {
            color,
            speed,
            direction,
            brightness,
        } => {
            commands::apply(
                &opts,
                ModeRequest {
                    mode: Some(Mode::Shifting),
                    color: Some(color),
                    speed,
                    direction: direction.map(|d| types::Direction::from(d).wire()),
                    brightness,
                    ..ModeRequest::default()
                },
            )?;
        }
        Commands::Zoom {
            color,
            speed,
            brightness,
        } => {
            commands::apply(
                &opts,
                ModeRequest {
                    mode: Some(Mode::Zoom),
                    color: Some(color),
                    speed,
                    brightness,
                    ..ModeRequest::default()
                },
            )?;
        }
        Commands::Off => commands::off(&opts)?,
        Commands::Modes => commands::modes(),
        Commands::Status => commands::status(&opts),
        Commands::Preset { name } => commands::preset(&opts, name.as_deref())?,
        Commands::Profile(profile_command) => match profile_command {
            ProfileCommands::List => commands::profile_list()?,
            ProfileCommands::Show { name } => commands::profile_show(&name)?,
            ProfileCommands::Save { name } => commands::profile_save(&name)?,
            ProfileCommands::Load { name } => commands::profile_load(&opts, &name)?,
            ProfileCommands::Delete { name } => commands::profile_delete(&name)?,
        },
    }

    Ok(())
}
