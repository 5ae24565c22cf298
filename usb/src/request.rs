use crate::commands::Command;
use crate::error::ParseError;
use crate::outputs::{OutputTarget, SwitchState};

/// Upper bound on one command line argument.
pub const MAX_REQUEST_LEN: usize = 1024;

/// One parsed `KEY=VALUE` argument: switch a target on or off.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SwitchRequest {
    pub target: OutputTarget,
    pub state: SwitchState,
}

impl SwitchRequest {
    /// Parse one raw argument. Each call owns its own state, so repeated
    /// parses are fully independent.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        if raw.len() > MAX_REQUEST_LEN {
            return Err(ParseError::TooLong);
        }

        let (key, value) = split_key_value(raw)?;
        Ok(Self {
            target: key.parse()?,
            state: value.parse()?,
        })
    }

    /// The device command this request translates to.
    pub fn command(&self) -> Command {
        Command::SetOutput {
            mask: self.target.mask(),
            state: self.state,
        }
    }
}

/// Split on the first `=` or ASCII whitespace. Runs of delimiters between
/// the two tokens are skipped, and the value ends at the next delimiter.
fn split_key_value(raw: &str) -> Result<(&str, &str), ParseError> {
    let delimiter = |c: char| c == '=' || c.is_ascii_whitespace();

    let split = raw.find(delimiter).ok_or(ParseError::MissingDelimiter)?;
    let key = &raw[..split];
    let rest = raw[split..].trim_start_matches(delimiter);
    let value = match rest.find(delimiter) {
        Some(end) => &rest[..end],
        None => rest,
    };

    if key.is_empty() || value.is_empty() {
        return Err(ParseError::EmptyToken);
    }
    Ok((key, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_key_equals_value() {
        let request = SwitchRequest::parse("0=on").unwrap();
        assert_eq!(request.target, OutputTarget::Pin(0));
        assert_eq!(request.state, SwitchState::On);
    }

    #[test]
    fn parses_whitespace_delimiter() {
        let request = SwitchRequest::parse("3 off").unwrap();
        assert_eq!(request.target, OutputTarget::Pin(3));
        assert_eq!(request.state, SwitchState::Off);
    }

    #[test]
    fn skips_delimiter_runs_between_tokens() {
        let request = SwitchRequest::parse("5= on").unwrap();
        assert_eq!(request.target, OutputTarget::Pin(5));
        assert_eq!(request.state, SwitchState::On);
    }

    #[test]
    fn first_delimiter_wins() {
        let request = SwitchRequest::parse("all=off=on").unwrap();
        assert_eq!(request.target, OutputTarget::All);
        assert_eq!(request.state, SwitchState::Off);
    }

    #[test]
    fn missing_delimiter_is_an_error() {
        assert_eq!(
            SwitchRequest::parse("0on"),
            Err(ParseError::MissingDelimiter)
        );
    }

    #[test]
    fn empty_tokens_are_errors() {
        assert_eq!(SwitchRequest::parse("=on"), Err(ParseError::EmptyToken));
        assert_eq!(SwitchRequest::parse("0="), Err(ParseError::EmptyToken));
        assert_eq!(SwitchRequest::parse("0= "), Err(ParseError::EmptyToken));
    }

    #[test]
    fn oversized_arguments_are_rejected() {
        let raw = format!("{}=on", "0".repeat(MAX_REQUEST_LEN));
        assert_eq!(SwitchRequest::parse(&raw), Err(ParseError::TooLong));
    }

    #[test]
    fn bad_keys_and_values_surface_their_errors() {
        assert_eq!(
            SwitchRequest::parse("9=on"),
            Err(ParseError::InvalidBit("9".to_string()))
        );
        assert_eq!(
            SwitchRequest::parse("0=blink"),
            Err(ParseError::InvalidState("blink".to_string()))
        );
    }

    #[test]
    fn repeated_parses_are_independent() {
        assert!(SwitchRequest::parse("0=zzz").is_err());
        let request = SwitchRequest::parse("0=on").unwrap();
        assert_eq!(request.command().encode()[2], 0x01);
    }
}
