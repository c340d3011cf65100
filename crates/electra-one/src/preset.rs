//! Preset generation.
//!
//! A preset is the on-device layout: one control per binding, placed on the
//! first page, wired to its physical pod and carrying the same value
//! descriptor the instrument definition uses.

use crate::binding::ControllerBinding;
use crate::error::{Error, Result};
use crate::midi::MidiChannel;
use crate::overlay::OverlayCatalog;
use crate::value::{build_values, ValueDescriptor, DEVICE_ID};
use serde::Serialize;
use std::collections::HashSet;

/// Preset file format version
pub const PRESET_VERSION: u32 = 2;

/// Highest control id the device accepts
pub const MAX_CONTROLS: usize = 432;

/// Grid cell width and height
pub const GRID_X: u32 = 170;
pub const GRID_Y: u32 = 88;

/// Size of a fader control
pub const CONTROL_WIDTH: u32 = 146;
pub const CONTROL_HEIGHT: u32 = 56;

/// Cell of the on-screen layout grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridCell {
    pub column: u32,
    pub row: u32,
}

impl GridCell {
    pub const ORIGIN: GridCell = GridCell { column: 0, row: 0 };

    /// Bounds `[x, y, width, height]` of a fader placed in this cell.
    pub fn bounds(self) -> [u32; 4] {
        [self.column * GRID_X, self.row * GRID_Y, CONTROL_WIDTH, CONTROL_HEIGHT]
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: u8,
    pub name: String,
    #[serde(rename = "instrumentID")]
    pub instrument_id: String,
    pub port: u8,
    pub channel: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlType {
    Fader,
}

/// Wires a physical pod to a value slot
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub pod_id: u16,
    pub value_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Control {
    pub id: u32,
    pub name: String,
    pub color: String,
    pub page_id: u32,
    pub control_set_id: u32,
    #[serde(rename = "type")]
    pub kind: ControlType,
    pub bounds: [u32; 4],
    pub values: Vec<ValueDescriptor>,
    pub inputs: Vec<Input>,
}

/// The preset document
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub version: u32,
    pub name: String,
    pub project_id: String,
    pub pages: Vec<serde_json::Value>,
    pub devices: Vec<Device>,
    pub overlays: Vec<serde_json::Value>,
    pub groups: Vec<serde_json::Value>,
    pub controls: Vec<Control>,
}

/// Builds presets with a given name and project id.
#[derive(Debug, Clone)]
pub struct PresetBuilder {
    name: String,
    project_id: String,
    link_overlays: bool,
}

impl PresetBuilder {
    pub fn new(name: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            project_id: project_id.into(),
            link_overlays: true,
        }
    }

    /// Whether control values carry the overlay ids the instrument
    /// definition assigns for the same bindings (on by default).
    pub fn link_overlays(mut self, link: bool) -> Self {
        self.link_overlays = link;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Build the document without serializing it.
    pub fn preset(&self, bindings: &[ControllerBinding], channel: MidiChannel) -> Result<Preset> {
        if bindings.len() > MAX_CONTROLS {
            return Err(Error::TooManyControls {
                count: bindings.len(),
                max: MAX_CONTROLS,
            });
        }

        let catalog = if self.link_overlays {
            OverlayCatalog::collect(bindings)
        } else {
            OverlayCatalog::empty()
        };

        let mut pods = HashSet::new();
        let mut controls = Vec::with_capacity(bindings.len());
        for (control_id, binding) in (1u32..).zip(bindings) {
            if !pods.insert(binding.physical_index()) {
                log::warn!(
                    "Pod {} is bound more than once (control '{}')",
                    binding.physical_index(),
                    binding.name()
                );
            }

            // Preset messages always address the first channel
            let values = build_values(binding, MidiChannel::default(), &catalog)?;
            let inputs = values
                .first()
                .map(|value| Input {
                    pod_id: binding.physical_index(),
                    value_id: value.id.clone(),
                })
                .into_iter()
                .collect();

            controls.push(Control {
                id: control_id,
                name: binding.name().to_string(),
                color: binding.color().hex().to_string(),
                page_id: 1,
                control_set_id: 1,
                kind: ControlType::Fader,
                // TODO: derive the grid cell from the control index once the page layout is settled
                bounds: GridCell::ORIGIN.bounds(),
                values,
                inputs,
            });
        }

        Ok(Preset {
            version: PRESET_VERSION,
            name: self.name.clone(),
            project_id: self.project_id.clone(),
            pages: Vec::new(),
            devices: vec![Device {
                id: DEVICE_ID,
                name: self.name.clone(),
                instrument_id: self.project_id.clone(),
                port: 1,
                channel: channel.one_based(),
            }],
            overlays: Vec::new(),
            groups: Vec::new(),
            controls,
        })
    }

    /// Build the preset JSON (indented by four spaces) for `bindings`, with
    /// the device listening on `channel`.
    pub fn build(&self, bindings: &[ControllerBinding], channel: MidiChannel) -> Result<String> {
        let preset = self.preset(bindings, channel)?;

        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        preset.serialize(&mut serializer)?;

        String::from_utf8(out)
            .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }
}
