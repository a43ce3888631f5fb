//! Protocol Module
//!
//! The text command surface exposed to the interpreter's command dispatcher.
//!
//! ## Commands
//! - `function <id> { <text> }` - define or overwrite a function
//! - `ls`                       - list functions
//! - `ll`                       - list with sizes and holes (extended)
//! - `cat <id>`                 - print a definition (extended)
//! - `rm <id>`                  - erase a function
//! - `peep [start end]`         - raw byte dump
//! - `cd <e|r>`                 - switch drive
//! - `pwd`                      - print the active drive
//! - `cp <id|*>`                - copy to the other drive (extended)
//!
//! ## Dump Markers
//! - `$`: terminator (0x00)
//! - `.`: empty (0xFF)
//! - `^`: other control byte

mod codec;
mod command;
mod response;

pub use codec::{
    definition, encode_command, parse_command, parse_number, validate_identifier, MAX_ID_LEN,
};
pub use command::{Command, CommandType, CopyTarget};
pub use response::Response;
