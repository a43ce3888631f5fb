//! Response definitions
//!
//! Represents command results and renders them as shell text.

use std::borrow::Cow;
use std::fmt;

use crate::region::Backend;
use crate::storage::{DumpCell, ListEntry, ListingSummary};

use super::codec::definition;

/// Column width for names in `ls` / `ll`
const NAME_WIDTH: usize = 16;

/// Names per row in extended `ls`
const NAMES_PER_ROW: usize = 4;

/// A command result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Function stored
    Saved,

    /// Compact `ls`: every definition, one per line
    Definitions(Vec<(String, String)>),

    /// Extended `ls`: names only
    Names(Vec<String>),

    /// `ll`
    LongListing {
        entries: Vec<ListEntry>,
        summary: ListingSummary,
    },

    /// `cat`
    Definition { id: String, body: String },

    /// `peep`; `width` bytes per line
    Dump { cells: Vec<DumpCell>, width: usize },

    /// `cd` (`changed`) or `pwd`
    Drive { backend: Backend, changed: bool },

    /// `cp`
    Copied { count: usize, to: Backend },

    /// `rm`
    Removed { id: String },
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Saved => f.write_str("saved"),
            Response::Definitions(defs) => {
                let lines: Vec<String> = defs
                    .iter()
                    .map(|(id, body)| definition(id, body))
                    .collect();
                f.write_str(&lines.join("\n"))
            }
            Response::Names(names) => write_names(f, names),
            Response::LongListing { entries, summary } => write_long(f, entries, summary),
            Response::Definition { id, body } => f.write_str(&definition(id, body)),
            Response::Dump { cells, width } => write_dump(f, cells, *width),
            Response::Drive {
                backend,
                changed: true,
            } => write!(f, "Drive is {}", backend),
            Response::Drive {
                backend,
                changed: false,
            } => write!(f, "{}", backend),
            Response::Copied { count, to } => {
                write!(f, "copied {} function(s) to {}", count, to)
            }
            Response::Removed { id } => write!(f, "removed {}", id),
        }
    }
}

fn write_names(f: &mut fmt::Formatter<'_>, names: &[String]) -> fmt::Result {
    for (i, name) in names.iter().enumerate() {
        let last_in_row = (i + 1) % NAMES_PER_ROW == 0 || i + 1 == names.len();
        if last_in_row {
            f.write_str(name)?;
            if i + 1 != names.len() {
                f.write_str("\n")?;
            }
        } else {
            write!(f, "{:<width$}", name, width = NAME_WIDTH)?;
        }
    }
    Ok(())
}

fn write_long(
    f: &mut fmt::Formatter<'_>,
    entries: &[ListEntry],
    summary: &ListingSummary,
) -> fmt::Result {
    // Two entries per row
    for (i, entry) in entries.iter().enumerate() {
        let label = match entry {
            ListEntry::Hole { .. } => Cow::Borrowed("hole"),
            ListEntry::Record { name, .. } => String::from_utf8_lossy(name),
        };
        write!(f, "{:<width$}{:>5}", label, entry.size(), width = NAME_WIDTH)?;

        if i % 2 == 0 && i + 1 != entries.len() {
            f.write_str("     |     ")?;
        } else {
            f.write_str("\n")?;
        }
    }

    writeln!(
        f,
        "{:>6} hole(s) for a size of {} bytes",
        summary.holes, summary.hole_bytes
    )?;
    write!(
        f,
        "{:>6} file(s) for a size of {} bytes",
        summary.records, summary.record_bytes
    )
}

fn write_dump(f: &mut fmt::Formatter<'_>, cells: &[DumpCell], width: usize) -> fmt::Result {
    for (i, cell) in cells.iter().enumerate() {
        if i == 0 || cell.addr % width == 0 {
            if i != 0 {
                f.write_str("\n")?;
            }
            write!(f, "{:04X}:", cell.addr)?;
        }
        if cell.addr % 8 == 0 {
            f.write_str(" ")?;
        }
        if cell.addr % 4 == 0 {
            f.write_str(" ")?;
        }
        write!(f, "{}", cell.class.marker())?;
    }
    Ok(())
}
