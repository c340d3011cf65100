//! Controller bindings: a physical control on the device wired to a synth
//! parameter.

use crate::color::Color;
use crate::parameter::{Capabilities, SynthParameter};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Kind of physical control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    /// Rotary encoder (a fader on screen)
    #[default]
    Encoder,
    /// Touch button
    Button,
}

/// Identity of a parameter object, used to deduplicate overlays.
///
/// Two bindings share a key only if they point at the same parameter object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParameterKey(usize);

/// One physical control bound to one synth parameter.
#[derive(Clone)]
pub struct ControllerBinding {
    kind: ControlKind,
    name: String,
    physical_index: u16,
    color: Color,
    parameter: Arc<dyn SynthParameter>,
    capabilities: Capabilities,
}

impl ControllerBinding {
    /// Bind a physical control to `parameter`. The parameter's capabilities
    /// are resolved here, once.
    pub fn new(
        kind: ControlKind,
        name: impl Into<String>,
        physical_index: u16,
        color: Color,
        parameter: Arc<dyn SynthParameter>,
    ) -> Self {
        let capabilities = Capabilities::of(parameter.as_ref());
        Self {
            kind,
            name: name.into(),
            physical_index,
            color,
            parameter,
            capabilities,
        }
    }

    /// Shorthand for an encoder binding.
    pub fn encoder(
        name: impl Into<String>,
        physical_index: u16,
        color: Color,
        parameter: Arc<dyn SynthParameter>,
    ) -> Self {
        Self::new(ControlKind::Encoder, name, physical_index, color, parameter)
    }

    pub fn kind(&self) -> ControlKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Device-side control slot (the "pod" the control is wired to)
    pub fn physical_index(&self) -> u16 {
        self.physical_index
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn parameter(&self) -> &dyn SynthParameter {
        self.parameter.as_ref()
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn parameter_key(&self) -> ParameterKey {
        ParameterKey(Arc::as_ptr(&self.parameter) as *const () as usize)
    }
}

impl fmt::Debug for ControllerBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerBinding")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("physical_index", &self.physical_index)
            .field("color", &self.color)
            .field("parameter", &self.parameter.name())
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::Parameter;

    #[test]
    fn test_binding_snapshots_capabilities() {
        let wave: Arc<dyn SynthParameter> =
            Arc::new(Parameter::new("Waveform", 3, 0, 3).with_labels(["Saw", "Square", "Tri", "Sine"]));
        let binding = ControllerBinding::encoder("Wave", 2, Color::Red, wave);
        assert!(binding.capabilities().supports_overlay());
        assert_eq!(binding.parameter().name(), "Waveform");
        assert_eq!(binding.name(), "Wave");
        assert_eq!(binding.kind(), ControlKind::Encoder);
    }

    #[test]
    fn test_parameter_key_is_object_identity() {
        let shared: Arc<dyn SynthParameter> = Arc::new(Parameter::new("Cutoff", 15, 0, 127));
        let twin: Arc<dyn SynthParameter> = Arc::new(Parameter::new("Cutoff", 15, 0, 127));

        let a = ControllerBinding::encoder("A", 1, Color::Blue, shared.clone());
        let b = ControllerBinding::encoder("B", 2, Color::Blue, shared);
        let c = ControllerBinding::encoder("C", 3, Color::Blue, twin);

        assert_eq!(a.parameter_key(), b.parameter_key());
        assert_ne!(a.parameter_key(), c.parameter_key());
    }
}
