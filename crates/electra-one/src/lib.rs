//! electra-one - Electra One instrument definitions and presets from synth models
//!
//! Turns a list of controller bindings (a physical control on the Electra One
//! wired to a synth parameter) into the two JSON documents the controller
//! loads:
//!
//! - the instrument definition: parameters, value ranges, lookup overlays and
//!   the sysex message template that changes each parameter
//! - the preset: the on-device layout of controls bound to those parameters
//!
//! # Usage as a Library
//!
//! ```no_run
//! use electra_one::{InstrumentDefinitionBuilder, Mapping};
//!
//! let mapping = Mapping::load("dw8000.toml")?;
//! let bindings = mapping.bindings()?;
//!
//! let instrument = InstrumentDefinitionBuilder::build_for_synth(&mapping, &bindings)?;
//! let preset = mapping.preset_builder().build(&bindings, mapping.midi_channel()?)?;
//! # Ok::<(), electra_one::Error>(())
//! ```

pub mod binding;
pub mod color;
pub mod error;
pub mod instrument;
pub mod mapping;
pub mod midi;
pub mod overlay;
pub mod parameter;
pub mod preset;
pub mod schema;
pub mod synth;
pub mod value;

// Re-export main types
pub use binding::{ControlKind, ControllerBinding};
pub use color::Color;
pub use error::{Error, Result};
pub use instrument::{validate_instrument_json, InstrumentDefinition, InstrumentDefinitionBuilder};
pub use mapping::Mapping;
pub use midi::MidiChannel;
pub use overlay::{Overlay, OverlayCatalog};
pub use parameter::{Capabilities, IntRange, Parameter, SynthParameter, ValueLookup};
pub use preset::{Preset, PresetBuilder, MAX_CONTROLS};
pub use schema::InstrumentSchema;
pub use synth::{Synth, SynthIdentity};
pub use value::{build_values, ValueDescriptor};
