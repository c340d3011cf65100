//! Synth identity and location.

use crate::error::{Error, Result};
use crate::midi::MidiChannel;
use serde::{Deserialize, Serialize};

/// Identity fields written into an instrument definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthIdentity {
    /// Stable instrument id
    pub id: String,
    /// Display name of the instrument
    pub name: String,
    /// Manufacturer display name
    pub manufacturer: String,
    /// Manufacturer id as understood by the device
    pub manufacturer_id: String,
}

impl Default for SynthIdentity {
    fn default() -> Self {
        Self {
            id: "testid".to_string(),
            name: "Korg DW8000".to_string(),
            manufacturer: "Korg".to_string(),
            manufacturer_id: "Korg".to_string(),
        }
    }
}

impl SynthIdentity {
    /// Check the fields the device requires to be non-empty.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::Config("Synth id must not be empty".to_string()));
        }
        if self.name.trim().is_empty() {
            return Err(Error::Config("Synth name must not be empty".to_string()));
        }
        Ok(())
    }
}

/// A synth the generator can describe.
pub trait Synth {
    /// Identity used for the instrument definition header
    fn identity(&self) -> SynthIdentity;

    /// MIDI channel the synth listens on, if it is known
    fn channel(&self) -> Option<MidiChannel> {
        None
    }
}

/// Channel for value change messages: the synth's own, or the first channel.
pub fn operating_channel(synth: &dyn Synth) -> MidiChannel {
    synth.channel().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unlocated;

    impl Synth for Unlocated {
        fn identity(&self) -> SynthIdentity {
            SynthIdentity::default()
        }
    }

    struct Located(MidiChannel);

    impl Synth for Located {
        fn identity(&self) -> SynthIdentity {
            SynthIdentity::default()
        }

        fn channel(&self) -> Option<MidiChannel> {
            Some(self.0)
        }
    }

    #[test]
    fn test_identity_validation() {
        assert!(SynthIdentity::default().validate().is_ok());

        let no_id = SynthIdentity {
            id: String::new(),
            ..SynthIdentity::default()
        };
        assert!(matches!(no_id.validate(), Err(Error::Config(_))));

        let blank_name = SynthIdentity {
            name: "  ".to_string(),
            ..SynthIdentity::default()
        };
        assert!(matches!(blank_name.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_operating_channel_fallback() {
        assert_eq!(operating_channel(&Unlocated).zero_based(), 0);
    }

    #[test]
    fn test_operating_channel_from_location() {
        let channel = MidiChannel::from_one_based(5).unwrap();
        assert_eq!(operating_channel(&Located(channel)), channel);
    }
}
