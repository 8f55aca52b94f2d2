// File: src/parser.rs
//! Turns one raw input line into a `ParsedCommand`.
//!
//! Parsing is pure: every grammar or date problem is reported here, before the task
//! list is touched.
use crate::model::{InvalidDateTime, Timestamp};
use strum::{Display, EnumIter, EnumString};
use thiserror::Error;

/// The fixed set of command keywords. Matching is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum CommandKeyword {
    Bye,
    Todo,
    Deadline,
    Event,
    List,
    Done,
    Find,
    Delete,
}

impl CommandKeyword {
    /// Expected grammar, shown back to the user on a format error.
    pub fn usage(&self) -> &'static str {
        match self {
            CommandKeyword::Bye => "bye",
            CommandKeyword::Todo => "todo <description>",
            CommandKeyword::Deadline => "deadline <description> /by <dd/mm/yy hhmm>",
            CommandKeyword::Event => "event <description> /at <dd/mm/yy hhmm>",
            CommandKeyword::List => "list",
            CommandKeyword::Done => "done <number>",
            CommandKeyword::Find => "find <text>",
            CommandKeyword::Delete => "delete <number>",
        }
    }

    /// Marker separating description and date, for dated kinds.
    pub fn marker(&self) -> Option<&'static str> {
        match self {
            CommandKeyword::Deadline => Some("/by"),
            CommandKeyword::Event => Some("/at"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    Todo {
        description: String,
    },
    Deadline {
        description: String,
        by: Timestamp,
    },
    Event {
        description: String,
        at: Timestamp,
    },
    Done {
        index: usize,
    },
    Delete {
        index: usize,
    },
    List,
    Find {
        query: String,
    },
    Bye,
    Unknown {
        keyword: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("the description of a {command} cannot be empty")]
    EmptyDescription { command: CommandKeyword },

    #[error("{command} needs a '{marker}' before the date")]
    MissingMarker {
        command: CommandKeyword,
        marker: &'static str,
    },

    #[error("{command}: {source}")]
    InvalidDateTime {
        command: CommandKeyword,
        #[source]
        source: InvalidDateTime,
    },

    #[error("{command} expects a positive task number, got '{input}'")]
    NotANumber {
        command: CommandKeyword,
        input: String,
    },

    #[error("find needs some text to search for")]
    EmptySearch,
}

impl ParseError {
    /// The command whose grammar was violated.
    pub fn command(&self) -> CommandKeyword {
        match self {
            ParseError::EmptyDescription { command }
            | ParseError::MissingMarker { command, .. }
            | ParseError::InvalidDateTime { command, .. }
            | ParseError::NotANumber { command, .. } => *command,
            ParseError::EmptySearch => CommandKeyword::Find,
        }
    }
}

pub fn parse(line: &str) -> Result<ParsedCommand, ParseError> {
    let line = line.trim();
    let (word, remainder) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let Ok(keyword) = word.parse::<CommandKeyword>() else {
        return Ok(ParsedCommand::Unknown {
            keyword: word.to_string(),
        });
    };

    let command = match keyword {
        CommandKeyword::Todo => {
            if remainder.is_empty() {
                return Err(ParseError::EmptyDescription { command: keyword });
            }
            ParsedCommand::Todo {
                description: remainder.to_string(),
            }
        }
        CommandKeyword::Deadline => {
            let (description, by) = parse_dated(keyword, remainder)?;
            ParsedCommand::Deadline { description, by }
        }
        CommandKeyword::Event => {
            let (description, at) = parse_dated(keyword, remainder)?;
            ParsedCommand::Event { description, at }
        }
        CommandKeyword::Done => ParsedCommand::Done {
            index: parse_index(keyword, remainder)?,
        },
        CommandKeyword::Delete => ParsedCommand::Delete {
            index: parse_index(keyword, remainder)?,
        },
        CommandKeyword::Find => {
            if remainder.is_empty() {
                return Err(ParseError::EmptySearch);
            }
            ParsedCommand::Find {
                query: remainder.to_string(),
            }
        }
        CommandKeyword::List => ParsedCommand::List,
        CommandKeyword::Bye => ParsedCommand::Bye,
    };

    Ok(command)
}

/// Splits `<description> <marker> <date>` on the first occurrence of the marker.
fn parse_dated(
    command: CommandKeyword,
    remainder: &str,
) -> Result<(String, Timestamp), ParseError> {
    let marker = command.marker().unwrap_or_default();
    let (description, date) = remainder
        .split_once(marker)
        .ok_or(ParseError::MissingMarker { command, marker })?;

    let description = description.trim();
    if description.is_empty() {
        return Err(ParseError::EmptyDescription { command });
    }

    let ts = date
        .trim()
        .parse::<Timestamp>()
        .map_err(|source| ParseError::InvalidDateTime { command, source })?;

    Ok((description.to_string(), ts))
}

fn parse_index(command: CommandKeyword, remainder: &str) -> Result<usize, ParseError> {
    remainder
        .parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| ParseError::NotANumber {
            command,
            input: remainder.to_string(),
        })
}
