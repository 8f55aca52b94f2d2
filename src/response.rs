// File: ./src/response.rs
//! Structured results handed to whatever renders the conversation.
//!
//! Nothing in the core prints. A `Response` carries the data; `lines()` produces the
//! plain text a console or chat bubble would show.
use crate::help;
use crate::model::{DATE_TIME_PATTERN, Task};
use crate::parser::{CommandKeyword, ParseError};
use crate::store::Listing;

const FORMAT_HINT: &str = "Ugh! The command should be in this format:";
const INDEX_NOTE: &str = "Note: number is based on the number from command 'list'";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Greeting,
    Farewell,
    /// Tasks from a previous session were read back.
    Loaded {
        count: usize,
    },
    LoadFailed {
        reason: String,
    },
    /// A stored record that could not be read and was left out.
    Skipped {
        record: String,
        reason: String,
    },
    SaveFailed {
        reason: String,
    },
    /// Shown on the very first run, before anything was ever saved.
    Welcome {
        help: Vec<String>,
    },
    TaskAdded {
        task: Task,
        count: usize,
    },
    MarkedDone {
        task: Task,
    },
    AlreadyDone {
        task: Task,
    },
    DeleteSuccess {
        task: Task,
        count: usize,
    },
    OutOfRange {
        command: CommandKeyword,
    },
    ListResult(Listing),
    FindResult(Vec<String>),
    UnrecognizedCommand {
        help: Vec<String>,
    },
    FormatError {
        command: CommandKeyword,
        expected: &'static str,
    },
    InvalidDateTime {
        pattern: &'static str,
    },
}

impl Response {
    pub fn format_error(command: CommandKeyword) -> Self {
        Response::FormatError {
            command,
            expected: command.usage(),
        }
    }

    pub fn unrecognized() -> Self {
        Response::UnrecognizedCommand {
            help: help::command_lines(),
        }
    }

    /// True for the outcomes that changed the task list.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Response::TaskAdded { .. } | Response::MarkedDone { .. } | Response::DeleteSuccess { .. }
        )
    }

    /// True for outcomes that report a problem rather than a result.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Response::LoadFailed { .. }
                | Response::Skipped { .. }
                | Response::SaveFailed { .. }
                | Response::AlreadyDone { .. }
                | Response::OutOfRange { .. }
                | Response::UnrecognizedCommand { .. }
                | Response::FormatError { .. }
                | Response::InvalidDateTime { .. }
        )
    }

    pub fn lines(&self) -> Vec<String> {
        match self {
            Response::Greeting => vec![
                "Good day there! I'm DUKE".to_string(),
                "What can I do for you?".to_string(),
            ],
            Response::Farewell => vec!["Farewell! Hope to see you again.".to_string()],
            Response::Loaded { count } => vec![format!(
                "I have loaded in {} task(s) saved from our previous interactions.",
                count
            )],
            Response::LoadFailed { reason } => vec![
                "I could not load your saved tasks, starting with an empty list.".to_string(),
                reason.clone(),
            ],
            Response::Skipped { record, reason } => {
                vec![
                    format!("Can't import '{}' ({})", record, reason),
                    "The line is kept in the task file as it is.".to_string(),
                ]
            }
            Response::SaveFailed { reason } => {
                vec!["Unable to save tasks.".to_string(), reason.clone()]
            }
            Response::Welcome { help } => {
                with_header("These are the commands that I recognise:", help)
            }
            Response::TaskAdded { task, count } => vec![
                "Got it. I've added this task:".to_string(),
                format!("  {}", task),
                count_line(*count),
            ],
            Response::MarkedDone { task } => vec![
                "Nice! I've marked this task as done:".to_string(),
                format!("  {}", task),
            ],
            Response::AlreadyDone { task } => vec![
                "Ugh! This task was already done:".to_string(),
                format!("  {}", task),
            ],
            Response::DeleteSuccess { task, count } => vec![
                "Noted. I've removed this task:".to_string(),
                format!("  {}", task),
                count_line(*count),
            ],
            Response::OutOfRange { command } => vec![
                FORMAT_HINT.to_string(),
                command.usage().to_string(),
                INDEX_NOTE.to_string(),
            ],
            Response::ListResult(Listing::Empty) => vec!["You have no task.".to_string()],
            Response::ListResult(Listing::Tasks(lines)) => {
                with_header("Here are the tasks in your list:", lines)
            }
            Response::FindResult(lines) if lines.is_empty() => {
                vec!["There are no matching tasks found.".to_string()]
            }
            Response::FindResult(lines) => {
                with_header("Here are the matching task(s) in your list:", lines)
            }
            Response::UnrecognizedCommand { help } => {
                with_header("Ugh! Only the following commands are recognised:", help)
            }
            Response::FormatError { expected, .. } => {
                vec![FORMAT_HINT.to_string(), expected.to_string()]
            }
            Response::InvalidDateTime { pattern } => vec![
                "Date/Time format is wrong. Ensure that it is in this format:".to_string(),
                format!("{} (24hrs format)", pattern),
            ],
        }
    }
}

impl From<&ParseError> for Response {
    fn from(err: &ParseError) -> Self {
        match err {
            ParseError::InvalidDateTime { .. } => Response::InvalidDateTime {
                pattern: DATE_TIME_PATTERN,
            },
            other => Response::format_error(other.command()),
        }
    }
}

fn count_line(count: usize) -> String {
    format!("Now you have {} task(s) in the list.", count)
}

fn with_header(header: &str, lines: &[String]) -> Vec<String> {
    std::iter::once(header.to_string())
        .chain(lines.iter().cloned())
        .collect()
}
