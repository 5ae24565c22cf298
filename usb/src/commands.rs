use crate::outputs::SwitchState;

/// Every command frame is exactly this long, padded with zeroes.
pub const FRAME_LEN: usize = 8;

// Report ids understood by the U401 firmware.
const REPORT_CONFIGURE_PORT: u8 = 0x09;
const REPORT_SET_OUTPUT: u8 = 0x03;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Declare the direction of a port's pins (bit set = output).
    ConfigurePort { direction: u8, mask: u8 },

    /// Drive the bits selected by `mask` on or off.
    SetOutput { mask: u8, state: SwitchState },
}

impl Command {
    /// Encode into the fixed 8-byte report frame.
    ///
    /// The on/off layouts are asymmetric: "on" carries the mask in byte 2
    /// with byte 1 held at 0xFF, "off" carries the complemented mask in
    /// byte 1 with byte 2 zero. The device requires this byte-for-byte.
    pub fn encode(&self) -> [u8; FRAME_LEN] {
        let mut frame = [0; FRAME_LEN];
        match *self {
            Command::ConfigurePort { direction, mask } => {
                frame[0] = REPORT_CONFIGURE_PORT;
                frame[1] = direction;
                frame[2] = mask;
            }
            Command::SetOutput {
                mask,
                state: SwitchState::On,
            } => {
                frame[0] = REPORT_SET_OUTPUT;
                frame[1] = 0xFF;
                frame[2] = mask;
            }
            Command::SetOutput {
                mask,
                state: SwitchState::Off,
            } => {
                frame[0] = REPORT_SET_OUTPUT;
                frame[1] = !mask;
            }
        }
        frame
    }

    /// Recover the operation and its parameter bytes from a frame.
    ///
    /// Only structural: a set-output frame with byte 1 == 0xFF reads back
    /// as "on", which is unambiguous for every non-zero mask.
    pub fn decode(frame: &[u8; FRAME_LEN]) -> Option<Command> {
        match frame[0] {
            REPORT_CONFIGURE_PORT => Some(Command::ConfigurePort {
                direction: frame[1],
                mask: frame[2],
            }),
            REPORT_SET_OUTPUT if frame[1] == 0xFF => Some(Command::SetOutput {
                mask: frame[2],
                state: SwitchState::On,
            }),
            REPORT_SET_OUTPUT => Some(Command::SetOutput {
                mask: !frame[1],
                state: SwitchState::Off,
            }),
            _ => None,
        }
    }

    /// Number of bulk response bytes the device sends back. The output
    /// commands used here are write-only.
    pub fn response_len(&self) -> usize {
        match self {
            Command::ConfigurePort { .. } | Command::SetOutput { .. } => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configure_port_frame_layout() {
        let command = Command::ConfigurePort {
            direction: 0xFF,
            mask: 0xFF,
        };
        assert_eq!(command.encode(), [0x09, 0xFF, 0xFF, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn on_frame_carries_mask_in_byte_two() {
        for pin in 0..8u8 {
            let mask = 1 << pin;
            let frame = Command::SetOutput {
                mask,
                state: SwitchState::On,
            }
            .encode();
            assert_eq!(frame[0], 0x03);
            assert_eq!(frame[1], 0xFF);
            assert_eq!(frame[2], mask);
            assert_eq!(frame[3..], [0, 0, 0, 0, 0]);
        }
    }

    #[test]
    fn off_frame_carries_complement_in_byte_one() {
        for mask in [0x01u8, 0x10, 0x80, 0xFF] {
            let frame = Command::SetOutput {
                mask,
                state: SwitchState::Off,
            }
            .encode();
            assert_eq!(frame[0], 0x03);
            assert_eq!(frame[1], !mask);
            assert_eq!(frame[2], 0x00);
            assert_eq!(frame[3..], [0, 0, 0, 0, 0]);
        }
    }

    #[test]
    fn all_off_zeroes_byte_one() {
        let frame = Command::SetOutput {
            mask: 0xFF,
            state: SwitchState::Off,
        }
        .encode();
        assert_eq!(frame[1], 0x00);
    }

    #[test]
    fn encoding_is_deterministic() {
        let command = Command::SetOutput {
            mask: 0x42,
            state: SwitchState::On,
        };
        assert_eq!(command.encode(), command.encode());
    }

    #[test]
    fn structural_round_trip() {
        let mut commands = vec![Command::ConfigurePort {
            direction: 0xFF,
            mask: 0xFF,
        }];
        for pin in 0..8u8 {
            for state in [SwitchState::On, SwitchState::Off] {
                commands.push(Command::SetOutput {
                    mask: 1 << pin,
                    state,
                });
            }
        }
        commands.push(Command::SetOutput {
            mask: 0xFF,
            state: SwitchState::Off,
        });

        for command in commands {
            assert_eq!(Command::decode(&command.encode()), Some(command));
        }
    }

    #[test]
    fn unknown_report_does_not_decode() {
        assert_eq!(Command::decode(&[0x7F, 0, 0, 0, 0, 0, 0, 0]), None);
    }
}
