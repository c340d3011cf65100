//! Parameter capabilities.
//!
//! The generator never owns a synth's parameter model. It only asks each
//! parameter what it can do:
//!
//! - every parameter has a name and a sysex parameter number
//! - most parameters have an integer value range
//! - some parameters are lookups, mapping each value to a display label
//!
//! [`Capabilities`] takes a snapshot of these facets once, when a binding is
//! created, so the builders can branch on plain data afterwards.

/// Inclusive integer value range of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntRange {
    pub min: i32,
    pub max: i32,
}

impl IntRange {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }
}

/// Lookup capability: renders a parameter value as a label.
pub trait ValueLookup {
    /// Display text for `value`.
    fn value_as_text(&self, value: i32) -> String;
}

/// A synth parameter as seen by the generator.
pub trait SynthParameter {
    /// Parameter name, used as the value slot id on the device
    fn name(&self) -> &str;

    /// Parameter number addressed by the sysex parameter change message
    fn sysex_index(&self) -> u8;

    /// Integer value range, if the parameter has one
    fn int_range(&self) -> Option<IntRange>;

    /// Lookup capability, if the parameter's values are enumerated
    fn lookup(&self) -> Option<&dyn ValueLookup> {
        None
    }
}

/// Snapshot of which capability facets a parameter exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub range: Option<IntRange>,
    pub lookup: bool,
}

impl Capabilities {
    /// Query the capability facets of `parameter`.
    pub fn of(parameter: &dyn SynthParameter) -> Self {
        Self {
            range: parameter.int_range(),
            lookup: parameter.lookup().is_some(),
        }
    }

    /// Whether an overlay can be generated: needs both lookup and range.
    pub fn supports_overlay(&self) -> bool {
        self.lookup && self.range.is_some()
    }
}

/// In-memory parameter definition.
///
/// A parameter with a non-empty label list is a lookup parameter. Values
/// without a label render as their number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    name: String,
    sysex_index: u8,
    range: Option<IntRange>,
    labels: Vec<String>,
}

impl Parameter {
    /// Create a ranged parameter.
    pub fn new(name: impl Into<String>, sysex_index: u8, min: i32, max: i32) -> Self {
        Self {
            name: name.into(),
            sysex_index,
            range: Some(IntRange::new(min, max)),
            labels: Vec::new(),
        }
    }

    /// Create a parameter that has no integer range.
    pub fn without_range(name: impl Into<String>, sysex_index: u8) -> Self {
        Self {
            name: name.into(),
            sysex_index,
            range: None,
            labels: Vec::new(),
        }
    }

    /// Turn this into a lookup parameter with the given labels.
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl ValueLookup for Parameter {
    fn value_as_text(&self, value: i32) -> String {
        usize::try_from(value)
            .ok()
            .and_then(|index| self.labels.get(index))
            .cloned()
            .unwrap_or_else(|| value.to_string())
    }
}

impl SynthParameter for Parameter {
    fn name(&self) -> &str {
        &self.name
    }

    fn sysex_index(&self) -> u8 {
        self.sysex_index
    }

    fn int_range(&self) -> Option<IntRange> {
        self.range
    }

    fn lookup(&self) -> Option<&dyn ValueLookup> {
        if self.labels.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities_of_plain_parameter() {
        let cutoff = Parameter::new("Cutoff", 15, 0, 127);
        let caps = Capabilities::of(&cutoff);
        assert_eq!(caps.range, Some(IntRange::new(0, 127)));
        assert!(!caps.lookup);
        assert!(!caps.supports_overlay());
    }

    #[test]
    fn test_capabilities_of_lookup_parameter() {
        let wave = Parameter::new("Waveform", 3, 0, 3).with_labels(["Saw", "Square", "Tri", "Sine"]);
        let caps = Capabilities::of(&wave);
        assert!(caps.lookup);
        assert!(caps.supports_overlay());
    }

    #[test]
    fn test_lookup_without_range_cannot_overlay() {
        let broken = Parameter::without_range("Broken", 1).with_labels(["A", "B"]);
        let caps = Capabilities::of(&broken);
        assert!(caps.lookup);
        assert!(!caps.supports_overlay());
    }

    #[test]
    fn test_value_as_text_falls_back_to_number() {
        let wave = Parameter::new("Waveform", 3, 0, 3).with_labels(["Saw", "Square"]);
        assert_eq!(wave.value_as_text(1), "Square");
        assert_eq!(wave.value_as_text(3), "3");
        assert_eq!(wave.value_as_text(-1), "-1");
    }
}
