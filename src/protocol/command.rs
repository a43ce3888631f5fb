//! Command definitions
//!
//! Represents commands from the command dispatcher.

use crate::region::Backend;

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Function,
    Ls,
    Ll,
    Cat,
    Peep,
    Cd,
    Pwd,
    Cp,
    Rm,
}

impl CommandType {
    /// The verb typed at the prompt
    pub fn verb(self) -> &'static str {
        match self {
            CommandType::Function => "function",
            CommandType::Ls => "ls",
            CommandType::Ll => "ll",
            CommandType::Cat => "cat",
            CommandType::Peep => "peep",
            CommandType::Cd => "cd",
            CommandType::Pwd => "pwd",
            CommandType::Cp => "cp",
            CommandType::Rm => "rm",
        }
    }

    /// Commands only available in extended mode
    pub fn is_extended_only(self) -> bool {
        matches!(self, CommandType::Ll | CommandType::Cat | CommandType::Cp)
    }
}

/// What `cp` copies
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyTarget {
    /// A single function
    One(String),

    /// Every function (`cp *`)
    All,
}

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Define or overwrite a function
    Function { id: String, body: String },

    /// List function names (or definitions in compact mode)
    Ls,

    /// Long listing with sizes and holes
    Ll,

    /// Print one definition
    Cat { id: String },

    /// Raw byte dump; `range` is `(start, end)` with `end` inclusive
    Peep { range: Option<(usize, usize)> },

    /// Switch the active backend
    Cd { backend: Backend },

    /// Print the active backend
    Pwd,

    /// Copy to the other backend
    Cp { target: CopyTarget },

    /// Erase a function
    Rm { id: String },
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Function { .. } => CommandType::Function,
            Command::Ls => CommandType::Ls,
            Command::Ll => CommandType::Ll,
            Command::Cat { .. } => CommandType::Cat,
            Command::Peep { .. } => CommandType::Peep,
            Command::Cd { .. } => CommandType::Cd,
            Command::Pwd => CommandType::Pwd,
            Command::Cp { .. } => CommandType::Cp,
            Command::Rm { .. } => CommandType::Rm,
        }
    }
}
