//! Mapping files: a synth's parameters and the controls bound to them, in TOML.
//!
//! ```toml
//! [synth]
//! id = "dw8000"
//! name = "Korg DW8000"
//! manufacturer = "Korg"
//! manufacturer_id = "Korg"
//! channel = 1
//!
//! [preset]
//! name = "DW8000"
//! project_id = "dw8000"
//!
//! [[parameters]]
//! name = "Cutoff"
//! sysex_index = 15
//! min = 0
//! max = 63
//!
//! [[controls]]
//! kind = "encoder"
//! name = "Cutoff"
//! encoder = 1
//! color = "blue"
//! parameter = "Cutoff"
//! ```

use crate::binding::{ControlKind, ControllerBinding};
use crate::color::Color;
use crate::error::{Error, Result};
use crate::midi::MidiChannel;
use crate::parameter::{Parameter, SynthParameter};
use crate::preset::PresetBuilder;
use crate::synth::{Synth, SynthIdentity};
use crate::value::MAX_DATA_BYTE;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// A complete mapping file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Mapping {
    /// Synth identity and channel
    pub synth: SynthSettings,
    /// Preset naming
    pub preset: PresetSettings,
    /// Parameters of the synth
    pub parameters: Vec<ParameterSpec>,
    /// Controls, in device order
    pub controls: Vec<ControlSpec>,
}

/// Synth settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthSettings {
    #[serde(flatten)]
    pub identity: SynthIdentity,
    /// MIDI channel (1-16) the synth listens on
    pub channel: Option<u8>,
}

/// Preset settings. Empty fields fall back to the synth name and id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PresetSettings {
    pub name: String,
    pub project_id: String,
}

/// A synth parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    pub sysex_index: u8,
    pub min: Option<i32>,
    pub max: Option<i32>,
    /// Value labels; a non-empty list makes this a lookup parameter
    #[serde(default)]
    pub labels: Vec<String>,
}

impl ParameterSpec {
    pub fn to_parameter(&self) -> Result<Parameter> {
        if self.sysex_index > MAX_DATA_BYTE {
            return Err(Error::Config(format!(
                "Parameter '{}' has sysex index {}, must be 0-{}",
                self.name, self.sysex_index, MAX_DATA_BYTE
            )));
        }
        let parameter = match (self.min, self.max) {
            (Some(min), Some(max)) => {
                if min > max {
                    return Err(Error::Config(format!(
                        "Parameter '{}' has min {} above max {}",
                        self.name, min, max
                    )));
                }
                Parameter::new(&self.name, self.sysex_index, min, max)
            }
            (None, None) => Parameter::without_range(&self.name, self.sysex_index),
            _ => {
                return Err(Error::Config(format!(
                    "Parameter '{}' needs both min and max, or neither",
                    self.name
                )))
            }
        };
        Ok(parameter.with_labels(self.labels.iter().cloned()))
    }
}

/// A physical control bound to a parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlSpec {
    #[serde(default)]
    pub kind: ControlKind,
    pub name: String,
    /// Physical encoder/pod number on the device
    pub encoder: u16,
    #[serde(default)]
    pub color: Color,
    /// Name of the bound parameter
    pub parameter: String,
}

impl Mapping {
    /// Load a mapping file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse a mapping from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mapping: Mapping = toml::from_str(content)?;
        if let Some(channel) = mapping.synth.channel {
            MidiChannel::from_one_based(channel)?;
        }
        mapping.synth.identity.validate()?;
        Ok(mapping)
    }

    /// Write the annotated sample mapping to `path`
    pub fn write_sample(path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, SAMPLE_MAPPING)?;
        Ok(())
    }

    /// The synth's channel, or the first channel if none is configured
    pub fn midi_channel(&self) -> Result<MidiChannel> {
        match self.synth.channel {
            Some(channel) => MidiChannel::from_one_based(channel),
            None => Ok(MidiChannel::default()),
        }
    }

    /// Resolve the controls into bindings, in file order.
    ///
    /// Controls referring to the same parameter share one parameter object,
    /// so they share one overlay.
    pub fn bindings(&self) -> Result<Vec<ControllerBinding>> {
        let mut parameters: HashMap<&str, Arc<dyn SynthParameter>> = HashMap::new();
        for spec in &self.parameters {
            let parameter: Arc<dyn SynthParameter> = Arc::new(spec.to_parameter()?);
            if parameters.insert(spec.name.as_str(), parameter).is_some() {
                return Err(Error::Config(format!(
                    "Parameter '{}' is declared more than once",
                    spec.name
                )));
            }
        }

        self.controls
            .iter()
            .map(|control| {
                let parameter = parameters.get(control.parameter.as_str()).ok_or_else(|| {
                    Error::UnknownParameter {
                        control: control.name.clone(),
                        parameter: control.parameter.clone(),
                    }
                })?;
                Ok(ControllerBinding::new(
                    control.kind,
                    &control.name,
                    control.encoder,
                    control.color,
                    parameter.clone(),
                ))
            })
            .collect()
    }

    /// Preset builder named after the preset settings, or the synth
    pub fn preset_builder(&self) -> PresetBuilder {
        let name = if self.preset.name.is_empty() {
            &self.synth.identity.name
        } else {
            &self.preset.name
        };
        let project_id = if self.preset.project_id.is_empty() {
            &self.synth.identity.id
        } else {
            &self.preset.project_id
        };
        PresetBuilder::new(name.as_str(), project_id.as_str())
    }
}

impl Synth for Mapping {
    fn identity(&self) -> SynthIdentity {
        self.synth.identity.clone()
    }

    fn channel(&self) -> Option<MidiChannel> {
        let channel = self.synth.channel?;
        match MidiChannel::from_one_based(channel) {
            Ok(channel) => Some(channel),
            Err(e) => {
                log::warn!("Ignoring synth channel: {}", e);
                None
            }
        }
    }
}

/// Annotated sample mapping for a Korg DW8000
pub const SAMPLE_MAPPING: &str = r#"# e1-gen mapping file
#
# Describes a synth's parameters and how they are laid out on the
# Electra One. Generate the device files with:
#
#   e1-gen instrument mapping.toml -o instrument.json
#   e1-gen preset mapping.toml -o preset.json

[synth]
id = "dw8000"
name = "Korg DW8000"
manufacturer = "Korg"
manufacturer_id = "Korg"

# MIDI channel the synth listens on (1-16)
channel = 1

[preset]
name = "DW8000"
project_id = "dw8000"

# Parameters: name, sysex parameter number and value range.
# A list of labels turns the parameter into a lookup (overlay).

[[parameters]]
name = "Osc 1 Octave"
sysex_index = 0
min = 0
max = 2
labels = ["16'", "8'", "4'"]

[[parameters]]
name = "Osc 1 Waveform"
sysex_index = 1
min = 0
max = 15

[[parameters]]
name = "Cutoff"
sysex_index = 15
min = 0
max = 63

[[parameters]]
name = "Resonance"
sysex_index = 16
min = 0
max = 31

[[parameters]]
name = "Keyboard Tracking"
sysex_index = 17
min = 0
max = 3
labels = ["0", "1/4", "1/2", "Full"]

# Controls: kind ("encoder" or "button"), label, physical encoder number,
# color (white, red, orange, blue, green, pink) and the bound parameter.

[[controls]]
kind = "encoder"
name = "Octave"
encoder = 1
color = "orange"
parameter = "Osc 1 Octave"

[[controls]]
kind = "encoder"
name = "Wave"
encoder = 2
color = "orange"
parameter = "Osc 1 Waveform"

[[controls]]
kind = "encoder"
name = "Cutoff"
encoder = 3
color = "blue"
parameter = "Cutoff"

[[controls]]
kind = "encoder"
name = "Resonance"
encoder = 4
color = "blue"
parameter = "Resonance"

[[controls]]
kind = "encoder"
name = "KBD Track"
encoder = 5
color = "green"
parameter = "Keyboard Tracking"
"#;
