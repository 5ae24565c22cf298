use crate::error::ParseError;
use std::str::FromStr;

/// One addressable output of the device: a single pin of port A, or the
/// whole port at once.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutputTarget {
    /// A single output pin, always in 0..=7.
    Pin(u8),
    All,
}

impl OutputTarget {
    /// The bitmask driven onto the port for this target.
    pub fn mask(self) -> u8 {
        match self {
            OutputTarget::Pin(pin) => 1 << pin,
            OutputTarget::All => 0xFF,
        }
    }
}

impl FromStr for OutputTarget {
    type Err = ParseError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        if key.eq_ignore_ascii_case("all") {
            return Ok(OutputTarget::All);
        }

        // The shift below is only defined for 0..=7, reject everything else.
        match key.parse::<u8>() {
            Ok(pin) if pin < 8 => Ok(OutputTarget::Pin(pin)),
            _ => Err(ParseError::InvalidBit(key.to_string())),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SwitchState {
    On,
    Off,
}

impl FromStr for SwitchState {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.eq_ignore_ascii_case("on") {
            Ok(SwitchState::On)
        } else if value.eq_ignore_ascii_case("off") {
            Ok(SwitchState::Off)
        } else {
            Err(ParseError::InvalidState(value.to_string()))
        }
    }
}
