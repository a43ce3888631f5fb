//! Command codec
//!
//! Parses command lines into `Command`s and renders them back to text.
//!
//! ## Line Format
//! ```text
//! function <id> { <script text> }
//! ls | ll | pwd
//! cat <id> | rm <id>
//! peep [<start> <end>]
//! cd <e|r...>
//! cp <id|*>
//! ```
//! Arguments are positional and whitespace separated. Numbers are decimal or
//! `0x`-prefixed hex.

use crate::error::{AvpError, Result};
use crate::region::Backend;

use super::{Command, CopyTarget};

/// Longest accepted function name
pub const MAX_ID_LEN: usize = 12;

// =============================================================================
// Parsing
// =============================================================================

/// Parse one command line
///
/// Returns `Ok(None)` for a blank line.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.find(char::is_whitespace) {
        Some(split) => (&line[..split], line[split..].trim_start()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    let command = match verb {
        "function" => parse_function(rest)?,
        "ls" => no_args(verb, &args, Command::Ls)?,
        "ll" => no_args(verb, &args, Command::Ll)?,
        "pwd" => no_args(verb, &args, Command::Pwd)?,
        "cat" => Command::Cat {
            id: single_id(verb, &args)?,
        },
        "rm" => Command::Rm {
            id: single_id(verb, &args)?,
        },
        "peep" => parse_peep(&args)?,
        "cd" => parse_cd(&args)?,
        "cp" => parse_cp(&args)?,
        other => {
            return Err(AvpError::InvalidArgument(format!(
                "unknown command: {}",
                other
            )))
        }
    };

    Ok(Some(command))
}

/// `<id> { <body> }`, with everything after `function`
fn parse_function(rest: &str) -> Result<Command> {
    let id_len = rest
        .find(|c: char| c.is_whitespace() || c == '{')
        .unwrap_or(rest.len());
    let id = &rest[..id_len];
    validate_identifier(id)?;

    let after_id = rest[id_len..].trim_start();
    let body = after_id
        .strip_prefix('{')
        .ok_or_else(|| AvpError::InvalidArgument("expected '{'".to_string()))?;

    // The body runs to the last closing brace on the line
    let close = body
        .rfind('}')
        .ok_or_else(|| AvpError::InvalidArgument("expected '}'".to_string()))?;

    Ok(Command::Function {
        id: id.to_string(),
        body: body[..close].trim().to_string(),
    })
}

fn parse_peep(args: &[&str]) -> Result<Command> {
    match args {
        [] => Ok(Command::Peep { range: None }),
        [start, end] => Ok(Command::Peep {
            range: Some((parse_number(start)?, parse_number(end)?)),
        }),
        _ => Err(AvpError::InvalidArgument(
            "peep takes no arguments or <start> <end>".to_string(),
        )),
    }
}

fn parse_cd(args: &[&str]) -> Result<Command> {
    let arg = match args {
        [arg] => *arg,
        _ => {
            return Err(AvpError::InvalidArgument(
                "cd takes one argument: eeprom or ram".to_string(),
            ))
        }
    };

    Backend::from_arg(arg)
        .map(|backend| Command::Cd { backend })
        .ok_or_else(|| AvpError::InvalidArgument(format!("unknown drive: {}", arg)))
}

fn parse_cp(args: &[&str]) -> Result<Command> {
    match args {
        ["*"] => Ok(Command::Cp {
            target: CopyTarget::All,
        }),
        _ => Ok(Command::Cp {
            target: CopyTarget::One(single_id("cp", args)?),
        }),
    }
}

fn no_args(verb: &str, args: &[&str], command: Command) -> Result<Command> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(AvpError::InvalidArgument(format!(
            "{} takes no arguments",
            verb
        )))
    }
}

fn single_id(verb: &str, args: &[&str]) -> Result<String> {
    match args {
        [id] => {
            validate_identifier(id)?;
            Ok(id.to_string())
        }
        _ => Err(AvpError::InvalidArgument(format!(
            "{} takes one function name",
            verb
        ))),
    }
}

/// Decimal or `0x` hex
pub fn parse_number(text: &str) -> Result<usize> {
    let parsed = match text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => text.parse(),
    };
    parsed.map_err(|_| AvpError::InvalidArgument(format!("not a number: {}", text)))
}

/// Function names: a letter or `_`, then letters, digits or `_`, at most
/// `MAX_ID_LEN` characters
pub fn validate_identifier(id: &str) -> Result<()> {
    let mut chars = id.chars();
    let first_ok = chars
        .next()
        .map_or(false, |c| c.is_ascii_alphabetic() || c == '_');
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if first_ok && rest_ok && id.len() <= MAX_ID_LEN {
        Ok(())
    } else {
        Err(AvpError::InvalidIdentifier(id.to_string()))
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Render a command back to a line `parse_command` accepts
pub fn encode_command(command: &Command) -> String {
    match command {
        Command::Function { id, body } => definition(id, body),
        Command::Ls => "ls".to_string(),
        Command::Ll => "ll".to_string(),
        Command::Pwd => "pwd".to_string(),
        Command::Cat { id } => format!("cat {}", id),
        Command::Rm { id } => format!("rm {}", id),
        Command::Peep { range: None } => "peep".to_string(),
        Command::Peep {
            range: Some((start, end)),
        } => format!("peep {} {}", start, end),
        Command::Cd { backend } => format!("cd {}", backend.name().to_lowercase()),
        Command::Cp {
            target: CopyTarget::All,
        } => "cp *".to_string(),
        Command::Cp {
            target: CopyTarget::One(id),
        } => format!("cp {}", id),
    }
}

/// `function <id> { <body> }`
pub fn definition(id: &str, body: &str) -> String {
    if body.is_empty() {
        format!("function {} {{}}", id)
    } else {
        format!("function {} {{ {} }}", id, body)
    }
}
