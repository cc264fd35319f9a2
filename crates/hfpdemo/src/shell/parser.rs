//! Command line tokenizer

use crate::config::MAX_NUM_OF_PARAMETERS;
use crate::error::ShellError;
use std::fmt;

/// One positional parameter of a command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    text: String,
    value: u32,
}

impl Parameter {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            value: leading_number(text),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Best-effort value: the first run of digits, or zero when there is
    /// none. A parse failure and a literal zero look the same here.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// The whole parameter as a decimal or `0x` hexadecimal number
    pub fn number(&self) -> Option<u32> {
        let (digits, radix) = match self
            .text
            .strip_prefix("0x")
            .or_else(|| self.text.strip_prefix("0X"))
        {
            Some(hex) => (hex, 16),
            None => (self.text.as_str(), 10),
        };
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return None;
        }
        u32::from_str_radix(digits, radix).ok()
    }
}

/// A tokenized command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    name: String,
    parameters: Vec<Parameter>,
}

impl Command {
    /// Command name as typed; case folding happens at lookup
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for parameter in &self.parameters {
            write!(f, " {}", parameter.text)?;
        }
        Ok(())
    }
}

/// Split `line` into a command name and its parameters
pub fn parse_command(line: &str) -> Result<Command, ShellError> {
    let mut tokens = line.split_whitespace();
    let name = tokens.next().ok_or(ShellError::NoCommand)?;

    let parameters: Vec<Parameter> = tokens.map(Parameter::new).collect();
    if parameters.len() > MAX_NUM_OF_PARAMETERS {
        return Err(ShellError::TooManyParameters);
    }

    Ok(Command {
        name: name.to_string(),
        parameters,
    })
}

fn leading_number(text: &str) -> u32 {
    let (digits, radix) = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) if text.len() > 2 => (hex, 16),
        _ => (text, 10),
    };

    digits
        .chars()
        .skip_while(|c| !c.is_digit(radix))
        .map_while(|c| c.to_digit(radix))
        .fold(0u32, |acc, d| acc.wrapping_mul(radix).wrapping_add(d))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_and_parameters() {
        let command = parse_command("pair 3 1\r\n").unwrap();
        assert_eq!(command.name(), "pair");
        assert_eq!(command.parameters().len(), 2);
        assert_eq!(command.parameters()[0].number(), Some(3));
        assert_eq!(command.parameters()[1].text(), "1");
    }

    #[test]
    fn test_parse_rejects_empty_line() {
        assert_eq!(parse_command(""), Err(ShellError::NoCommand));
        assert_eq!(parse_command("  \r\n"), Err(ShellError::NoCommand));
    }

    #[test]
    fn test_parse_rejects_too_many_parameters() {
        assert!(parse_command("CMD 1 2 3 4 5 6").is_ok());
        assert_eq!(
            parse_command("CMD 1 2 3 4 5 6 7"),
            Err(ShellError::TooManyParameters)
        );
    }

    #[test]
    fn test_rejoined_line_keeps_tokens() {
        let command = parse_command("  SetLocalName   MyDevice\t0x10 ").unwrap();
        assert_eq!(command.to_string(), "SetLocalName MyDevice 0x10");
        assert_eq!(parse_command(&command.to_string()).unwrap(), command);
    }

    #[test]
    fn test_strict_number() {
        assert_eq!(Parameter::new("1234").number(), Some(1234));
        assert_eq!(Parameter::new("0x1F").number(), Some(0x1F));
        assert_eq!(Parameter::new("0XaB").number(), Some(0xAB));
        assert_eq!(Parameter::new("0").number(), Some(0));
        assert_eq!(Parameter::new("12ab").number(), None);
        assert_eq!(Parameter::new("abc").number(), None);
        assert_eq!(Parameter::new("0x").number(), None);
        assert_eq!(Parameter::new("-1").number(), None);
        assert_eq!(Parameter::new("99999999999").number(), None);
    }

    #[test]
    fn test_best_effort_value() {
        assert_eq!(Parameter::new("42").value(), 42);
        assert_eq!(Parameter::new("12ab").value(), 12);
        assert_eq!(Parameter::new("0x1Fzz").value(), 0x1F);
        assert_eq!(Parameter::new("abc").value(), 0);
        assert_eq!(Parameter::new("0x").value(), 0);
    }
}
