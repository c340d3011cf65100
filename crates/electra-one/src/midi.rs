//! MIDI channel representation.
//!
//! Channels are stored zero-based (0-15) and shown to users one-based (1-16),
//! the same way the device itself numbers them.

use crate::error::{Error, Result};
use std::fmt;

/// Number of MIDI channels.
pub const MIDI_CHANNELS: u8 = 16;

/// A MIDI channel, stored zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MidiChannel(u8);

impl MidiChannel {
    /// Create a channel from a zero-based value (0-15).
    pub fn from_zero_based(channel: u8) -> Result<Self> {
        if channel < MIDI_CHANNELS {
            Ok(Self(channel))
        } else {
            Err(Error::InvalidChannel(channel))
        }
    }

    /// Create a channel from a one-based value (1-16).
    pub fn from_one_based(channel: u8) -> Result<Self> {
        match channel.checked_sub(1) {
            Some(zero_based) => Self::from_zero_based(zero_based),
            None => Err(Error::InvalidChannel(channel)),
        }
    }

    /// Zero-based channel number, as encoded in status bytes.
    pub fn zero_based(self) -> u8 {
        self.0
    }

    /// One-based channel number, as shown on devices.
    pub fn one_based(self) -> u8 {
        self.0 + 1
    }
}

impl fmt::Display for MidiChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "channel {}", self.one_based())
    }
}
