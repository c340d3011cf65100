//! e1-gen - Electra One instrument definition and preset generator
//!
//! Reads a TOML mapping file and writes the JSON documents the Electra One
//! controller loads.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use electra_one::{
    validate_instrument_json, InstrumentDefinitionBuilder, Mapping, MidiChannel, Synth,
};

#[derive(Parser)]
#[command(name = "e1-gen")]
#[command(author, version, about = "Electra One instrument and preset generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the instrument definition for a mapping
    Instrument {
        /// Mapping file (TOML)
        mapping: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// MIDI channel of the synth (1-16), overrides the mapping
        #[arg(long)]
        channel: Option<u8>,
    },
    /// Generate the preset for a mapping
    Preset {
        /// Mapping file (TOML)
        mapping: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// MIDI channel of the device (1-16), overrides the mapping
        #[arg(long)]
        channel: Option<u8>,

        /// Do not attach overlay ids to control values
        #[arg(long)]
        no_overlay_links: bool,
    },
    /// Validate an instrument definition file against the bundled schema
    Validate {
        /// Instrument definition (JSON)
        file: PathBuf,
    },
    /// Create a sample mapping file
    Init {
        /// Where to write the mapping
        #[arg(default_value = "mapping.toml")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Instrument {
            mapping,
            output,
            channel,
        } => {
            let mapping = load_mapping(&mapping)?;
            let bindings = mapping.bindings().context("Failed to resolve controls")?;
            let channel = resolve_channel(&mapping, channel)?;

            log::info!(
                "Generating instrument definition for {} ({} controls, {})",
                mapping.synth.identity.name,
                bindings.len(),
                channel
            );
            let json = InstrumentDefinitionBuilder::new(mapping.identity())
                .build(&bindings, channel)
                .context("Failed to generate instrument definition")?;
            write_output(output.as_deref(), &json)
        }
        Commands::Preset {
            mapping,
            output,
            channel,
            no_overlay_links,
        } => {
            let mapping = load_mapping(&mapping)?;
            let bindings = mapping.bindings().context("Failed to resolve controls")?;
            let channel = resolve_channel(&mapping, channel)?;

            let builder = mapping.preset_builder().link_overlays(!no_overlay_links);
            log::info!(
                "Generating preset '{}' ({} controls, {})",
                builder.name(),
                bindings.len(),
                channel
            );
            let json = builder
                .build(&bindings, channel)
                .context("Failed to generate preset")?;
            write_output(output.as_deref(), &json)
        }
        Commands::Validate { file } => {
            let json = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            validate_instrument_json(&json)
                .with_context(|| format!("{} is not a valid instrument definition", file.display()))?;
            println!("{} is valid", file.display());
            Ok(())
        }
        Commands::Init { path } => {
            if path.exists() {
                anyhow::bail!("{} already exists", path.display());
            }
            Mapping::write_sample(&path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Created sample mapping at: {}", path.display());
            Ok(())
        }
    }
}

fn load_mapping(path: &Path) -> Result<Mapping> {
    Mapping::load(path).with_context(|| format!("Failed to load mapping {}", path.display()))
}

/// Channel from the command line, else from the mapping.
fn resolve_channel(mapping: &Mapping, channel: Option<u8>) -> Result<MidiChannel> {
    match channel {
        Some(channel) => MidiChannel::from_one_based(channel)
            .with_context(|| format!("Invalid --channel {}", channel)),
        None => Ok(mapping.midi_channel()?),
    }
}

fn write_output(output: Option<&Path>, json: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
