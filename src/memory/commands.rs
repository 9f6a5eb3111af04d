//! Command console over a string-to-string [`ProbeTable`]
//!
//! Each input line is one command word followed by whitespace-separated
//! arguments. Missing arguments read as the empty string, so `add k` stores
//! `k = ""`.

use crate::memory::ProbeTable;
use std::fmt;

/// Table driven by the console
pub type StringTable = ProbeTable<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Hash(String),
    Index(String),
    Size,
    Capacity,
    Contains(String),
    Find(String),
    Add(String, String),
    Remove(String),
    Print,
    Clear,
    Exit,
}

/// The command word was not recognised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidCommand(pub String);

impl fmt::Display for InvalidCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid command: {}", self.0)
    }
}

impl std::error::Error for InvalidCommand {}

impl Command {
    pub fn parse(line: &str) -> Result<Command, InvalidCommand> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or("");
        let mut arg = || words.next().unwrap_or("").to_string();

        Ok(match command {
            "hash" => Command::Hash(arg()),
            "index" => Command::Index(arg()),
            "size" => Command::Size,
            "capacity" => Command::Capacity,
            "contains" => Command::Contains(arg()),
            "find" => Command::Find(arg()),
            "add" | "insert" => {
                let key = arg();
                Command::Add(key, arg())
            }
            "delete" | "remove" => Command::Remove(arg()),
            "print" => Command::Print,
            "clear" => Command::Clear,
            "end" | "exit" | "quit" => Command::Exit,
            other => return Err(InvalidCommand(other.to_string())),
        })
    }

    /// Run the command, returning the lines it prints
    pub fn apply(self, table: &mut StringTable) -> Vec<String> {
        match self {
            Command::Hash(key) => vec![table.hash(key.as_str()).to_string()],
            Command::Index(key) => vec![table.home_slot(key.as_str()).to_string()],
            Command::Size => vec![table.size().to_string()],
            Command::Capacity => vec![table.capacity().to_string()],
            Command::Contains(key) => vec![table.contains(key.as_str()).to_string()],
            Command::Find(key) => vec![table
                .find(key.as_str())
                .cloned()
                .unwrap_or_else(|| "null".to_string())],
            Command::Add(key, value) => {
                table.add(key, value);
                Vec::new()
            }
            Command::Remove(key) => {
                table.remove(key.as_str());
                Vec::new()
            }
            Command::Print => print_slots(table),
            Command::Clear => {
                *table = StringTable::new();
                Vec::new()
            }
            Command::Exit => Vec::new(),
        }
    }
}

fn print_slots(table: &StringTable) -> Vec<String> {
    table
        .slots()
        .map(|slot| match slot.entry {
            Some((key, value)) => format!("{}: {} = {}", slot.index, key, value),
            None => format!("{}: ", slot.index),
        })
        .collect()
}
