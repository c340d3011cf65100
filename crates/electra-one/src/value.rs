//! Value descriptors and their sysex message templates.
//!
//! Both the instrument definition and the preset describe a parameter value
//! the same way, so this module is the only place that knows the shape of a
//! value entry and of the parameter change message sent when it moves.
//!
//! The message is a template: the device substitutes the current value into
//! the placeholder byte whenever the control is turned.

use crate::binding::ControllerBinding;
use crate::error::{Error, Result};
use crate::midi::MidiChannel;
use crate::overlay::OverlayCatalog;
use serde::Serialize;

/// Start of system exclusive
pub const SYSEX_START: u8 = 0xF0;
/// End of system exclusive
pub const SYSEX_END: u8 = 0xF7;
/// Korg manufacturer id
pub const KORG_ID: u8 = 0x42;
/// Format byte, low nibble carries the channel
pub const FORMAT_STATUS: u8 = 0x30;
/// DW8000 model id
pub const MODEL_ID: u8 = 0x03;
/// Parameter change function
pub const PARAMETER_CHANGE: u8 = 0x41;

/// Highest value a byte inside a sysex body may carry
pub const MAX_DATA_BYTE: u8 = 0x7F;

/// Device id of the synth in the preset's device list
pub const DEVICE_ID: u8 = 1;

/// Marker for the byte the device replaces with the live value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Placeholder {
    Value,
}

/// One entry of a sysex template: a literal byte or a placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DataByte {
    Byte(u8),
    Placeholder(Placeholder),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Sysex,
}

/// Message sent to the synth when the value changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub device_id: u8,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub parameter_number: u8,
    pub min: i32,
    pub max: i32,
    pub data: Vec<DataByte>,
}

/// A value slot of a parameter or control
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueDescriptor {
    pub id: String,
    pub min: i32,
    pub max: i32,
    pub default_value: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay_id: Option<u32>,
    pub message: Message,
}

/// Sysex template for a parameter change on `channel`.
pub fn parameter_change_template(channel: MidiChannel, parameter_number: u8) -> Vec<DataByte> {
    vec![
        DataByte::Byte(SYSEX_START),
        DataByte::Byte(KORG_ID),
        DataByte::Byte(FORMAT_STATUS | channel.zero_based()),
        DataByte::Byte(MODEL_ID),
        DataByte::Byte(PARAMETER_CHANGE),
        DataByte::Byte(parameter_number),
        DataByte::Placeholder(Placeholder::Value),
        DataByte::Byte(SYSEX_END),
    ]
}

/// Build the value descriptors for `binding`.
///
/// The parameter must have an integer range. If it is a lookup parameter and
/// `overlays` has an overlay for it, the overlay id is attached; otherwise the
/// value simply has none.
pub fn build_values(
    binding: &ControllerBinding,
    channel: MidiChannel,
    overlays: &OverlayCatalog,
) -> Result<Vec<ValueDescriptor>> {
    let parameter = binding.parameter();
    let caps = binding.capabilities();
    let range = caps.range.ok_or_else(|| Error::MissingRange {
        parameter: parameter.name().to_string(),
    })?;
    if parameter.sysex_index() > MAX_DATA_BYTE {
        return Err(Error::Config(format!(
            "Parameter '{}' has sysex index {}, above {}",
            parameter.name(),
            parameter.sysex_index(),
            MAX_DATA_BYTE
        )));
    }

    let overlay_id = if caps.lookup {
        overlays.overlay_id(binding)
    } else {
        None
    };

    let value = ValueDescriptor {
        id: parameter.name().to_string(),
        min: range.min,
        max: range.max,
        default_value: 0,
        overlay_id,
        message: Message {
            device_id: DEVICE_ID,
            kind: MessageKind::Sysex,
            parameter_number: parameter.sysex_index(),
            min: range.min,
            max: range.max,
            data: parameter_change_template(channel, parameter.sysex_index()),
        },
    };

    Ok(vec![value])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::parameter::{Parameter, SynthParameter};
    use serde_json::json;
    use std::sync::Arc;

    fn binding(parameter: Parameter) -> ControllerBinding {
        let parameter: Arc<dyn SynthParameter> = Arc::new(parameter);
        ControllerBinding::encoder("Control", 1, Color::White, parameter)
    }

    #[test]
    fn test_value_json_shape() {
        let cutoff = binding(Parameter::new("Cutoff", 15, 0, 63));
        let channel = MidiChannel::from_zero_based(2).unwrap();
        let values = build_values(&cutoff, channel, &OverlayCatalog::empty()).unwrap();

        let json = serde_json::to_value(&values).unwrap();
        assert_eq!(
            json,
            json!([{
                "id": "Cutoff",
                "min": 0,
                "max": 63,
                "defaultValue": 0,
                "message": {
                    "deviceId": 1,
                    "type": "sysex",
                    "parameterNumber": 15,
                    "min": 0,
                    "max": 63,
                    "data": [240, 66, 50, 3, 65, 15, {"type": "value"}, 247]
                }
            }])
        );
    }

    #[test]
    fn test_channel_byte_for_all_channels() {
        for ch in 0..16u8 {
            let channel = MidiChannel::from_zero_based(ch).unwrap();
            let data = parameter_change_template(channel, 7);
            assert_eq!(data[2], DataByte::Byte(0x30 | ch));
        }
    }

    #[test]
    fn test_overlay_id_attached_for_lookup() {
        let wave = binding(Parameter::new("Waveform", 3, 0, 3).with_labels(["Saw", "Square", "Tri", "Sine"]));
        let bindings = vec![wave];
        let catalog = OverlayCatalog::collect(&bindings);

        let values = build_values(&bindings[0], MidiChannel::default(), &catalog).unwrap();
        assert_eq!(values[0].overlay_id, Some(1));
    }

    #[test]
    fn test_lookup_missing_from_catalog_is_not_an_error() {
        let wave = binding(Parameter::new("Waveform", 3, 0, 3).with_labels(["Saw", "Square", "Tri", "Sine"]));
        let values = build_values(&wave, MidiChannel::default(), &OverlayCatalog::empty()).unwrap();
        assert_eq!(values[0].overlay_id, None);

        let json = serde_json::to_value(&values[0]).unwrap();
        assert!(json.get("overlayId").is_none());
    }

    #[test]
    fn test_missing_range_is_rejected() {
        let broken = binding(Parameter::without_range("Broken", 1));
        let result = build_values(&broken, MidiChannel::default(), &OverlayCatalog::empty());
        assert!(matches!(result, Err(Error::MissingRange { ref parameter }) if parameter == "Broken"));
    }

    #[test]
    fn test_sysex_index_must_fit_in_data_byte() {
        let high = binding(Parameter::new("High", 200, 0, 7));
        let result = build_values(&high, MidiChannel::default(), &OverlayCatalog::empty());
        assert!(matches!(result, Err(Error::Config(_))));

        let edge = binding(Parameter::new("Edge", 127, 0, 7));
        assert!(build_values(&edge, MidiChannel::default(), &OverlayCatalog::empty()).is_ok());
    }
}
