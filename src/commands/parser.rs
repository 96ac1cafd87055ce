//! Command line parsing for the interactive session.
//!
//! Lines are whitespace-tokenized: the first token is the command name,
//! tokens starting with `-` introduce options, everything else is
//! positional. An option token followed by a non-option token consumes it
//! as its value; otherwise it is a bare flag. Paths containing whitespace
//! are not supported by this grammar.

use crate::error::command::CommandError;
use std::collections::HashMap;

/// Multipliers for human size suffixes, in ascending 1024 steps.
const SIZE_SUFFIXES: [&str; 6] = ["b", "kb", "mb", "gb", "tb", "pb"];

/// A tokenized command line.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ParsedCommand {
    /// The command name, first token of the line
    pub name: String,

    /// Positional arguments in order of appearance
    pub positionals: Vec<String>,

    /// `-key value` options; the key is stored without the dash
    pub options: HashMap<String, String>,

    /// Bare `-flag` switches; the flag is stored without the dash
    pub flags: Vec<String>,
}

impl ParsedCommand {
    /// Returns the positional at `index`, or a missing-argument error
    /// naming `argument`.
    pub fn require_positional(&self, index: usize, argument: &str) -> Result<&str, CommandError> {
        self.positionals
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| CommandError::MissingArgument {
                command: self.name.clone(),
                argument: argument.to_string(),
            })
    }

    /// Returns the value of option `key`, if present.
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    /// Returns whether bare flag `key` was given.
    pub fn flag(&self, key: &str) -> bool {
        self.flags.iter().any(|flag| flag == key)
    }
}

/// Tokenizes a command line.
///
/// Returns `None` for blank input. Never fails: unknown names and options
/// are the dispatcher's concern.
pub fn parse_line(line: &str) -> Option<ParsedCommand> {
    let mut tokens = line.split_whitespace().peekable();
    let name = tokens.next()?.to_string();

    let mut parsed = ParsedCommand {
        name,
        ..Default::default()
    };

    while let Some(token) = tokens.next() {
        if let Some(key) = token.strip_prefix('-') {
            match tokens.peek() {
                Some(next) if !next.starts_with('-') => {
                    let value = tokens.next().unwrap_or_default();
                    parsed.options.insert(key.to_string(), value.to_string());
                }
                _ => parsed.flags.push(key.to_string()),
            }
        } else {
            parsed.positionals.push(token.to_string());
        }
    }

    Some(parsed)
}

/// Parses a size argument with optional binary suffix.
///
/// Accepts raw byte counts (`200`), suffixed integers (`64KB`) and
/// suffixed decimals (`1.5MB`), case-insensitive. The result is rounded
/// to whole bytes.
pub fn parse_size(what: &str, value: &str) -> Result<u64, CommandError> {
    let lowered = value.to_ascii_lowercase();

    let (number_part, multiplier) = split_suffix(&lowered);
    let number: f64 = number_part.parse().map_err(|_| CommandError::InvalidArgument {
        what: what.to_string(),
        value: value.to_string(),
        message: "expected a number with optional B/KB/MB/GB/TB/PB suffix".to_string(),
    })?;

    if number < 0.0 {
        return Err(CommandError::InvalidArgument {
            what: what.to_string(),
            value: value.to_string(),
            message: "size cannot be negative".to_string(),
        });
    }

    Ok((number * multiplier as f64).round() as u64)
}

fn split_suffix(lowered: &str) -> (&str, u64) {
    // Longest suffix first so "kb" is not read as a bare "b".
    for (index, suffix) in SIZE_SUFFIXES.iter().enumerate().rev() {
        if let Some(number_part) = lowered.strip_suffix(suffix) {
            return (number_part, 1024_u64.pow(index as u32));
        }
    }
    (lowered, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_parse_blank_line() {
        assert!(parse_line("").is_none());
        assert!(parse_line("   ").is_none());
    }

    #[test]
    fn test_parse_positionals() {
        let parsed = parse_line("add dataset").unwrap();
        assert_eq!(parsed.name, "add");
        assert_eq!(parsed.positionals, vec!["dataset"]);
        assert!(parsed.options.is_empty());
        assert!(parsed.flags.is_empty());
    }

    #[test]
    fn test_parse_options_and_flags() {
        let parsed = parse_line("view dataset -sort size -r").unwrap();
        assert_eq!(parsed.name, "view");
        assert_eq!(parsed.positionals, vec!["dataset"]);
        assert_eq!(parsed.option("sort"), Some("size"));
        assert!(parsed.flag("r"));
        assert!(!parsed.flag("sort"));
    }

    #[test]
    fn test_parse_adjacent_flags() {
        let parsed = parse_line("filter data -r -ftype image").unwrap();
        assert!(parsed.flag("r"));
        assert_eq!(parsed.option("ftype"), Some("image"));
    }

    #[test]
    fn test_require_positional_error() {
        let parsed = parse_line("add").unwrap();
        let err = parsed.require_positional(0, "directory").unwrap_err();
        assert!(matches!(err, CommandError::MissingArgument { .. }));
    }

    #[test_case("200", 200; "raw bytes")]
    #[test_case("200b", 200; "explicit byte suffix")]
    #[test_case("64KB", 64 * 1024; "kilobytes")]
    #[test_case("1.5mb", 1_572_864; "fractional megabytes")]
    #[test_case("2GB", 2 * 1024 * 1024 * 1024; "gigabytes")]
    fn test_parse_size(value: &str, expected: u64) {
        assert_eq!(parse_size("size", value).unwrap(), expected);
    }

    #[test]
    fn test_parse_size_rejects_garbage() {
        assert!(parse_size("gt", "huge").is_err());
        assert!(parse_size("gt", "-5KB").is_err());
        assert!(parse_size("gt", "").is_err());
    }
}
