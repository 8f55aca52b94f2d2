// File: ./src/model/item.rs
use crate::model::date::Timestamp;
use std::fmt;

/// Separator between the fields of a stored record.
pub const RECORD_SEPARATOR: &str = " | ";

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TaskStatus {
    Pending,
    Done,
}

impl TaskStatus {
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    fn icon(&self) -> char {
        match self {
            Self::Pending => ' ',
            Self::Done => 'X',
        }
    }

    fn flag(&self) -> &'static str {
        match self {
            Self::Pending => "0",
            Self::Done => "1",
        }
    }
}

// --- TASK KINDS ---

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum TaskKind {
    Todo,
    Deadline { by: Timestamp },
    Event { at: Timestamp },
}

impl TaskKind {
    /// Single-letter tag used both on screen and in records.
    pub fn code(&self) -> char {
        match self {
            TaskKind::Todo => 'T',
            TaskKind::Deadline { .. } => 'D',
            TaskKind::Event { .. } => 'E',
        }
    }

    pub fn timestamp(&self) -> Option<&Timestamp> {
        match self {
            TaskKind::Todo => None,
            TaskKind::Deadline { by } => Some(by),
            TaskKind::Event { at } => Some(at),
        }
    }

    fn suffix(&self) -> Option<String> {
        match self {
            TaskKind::Todo => None,
            TaskKind::Deadline { by } => Some(format!("(by: {})", by.display())),
            TaskKind::Event { at } => Some(format!("(at: {})", at.display())),
        }
    }
}

/// A single entry in the task list.
///
/// Fields are private: the kind never changes after construction and the status
/// only moves to `Done` through the task list's mark operation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Task {
    description: String,
    status: TaskStatus,
    kind: TaskKind,
}

impl Task {
    pub(crate) fn new(description: &str, kind: TaskKind) -> Self {
        Self {
            description: description.trim().to_string(),
            status: TaskStatus::Pending,
            kind,
        }
    }

    pub(crate) fn todo(description: &str) -> Self {
        Self::new(description, TaskKind::Todo)
    }

    pub(crate) fn deadline(description: &str, by: Timestamp) -> Self {
        Self::new(description, TaskKind::Deadline { by })
    }

    pub(crate) fn event(description: &str, at: Timestamp) -> Self {
        Self::new(description, TaskKind::Event { at })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    pub fn is_done(&self) -> bool {
        self.status.is_done()
    }

    pub(crate) fn mark_done(&mut self) {
        self.status = TaskStatus::Done;
    }

    /// The line shown to the user, e.g. `[D][ ] Submit report (by: Dec 01 2023, 18:00)`.
    pub fn render(&self) -> String {
        let mut s = format!(
            "[{}][{}] {}",
            self.kind.code(),
            self.status.icon(),
            self.description
        );
        if let Some(suffix) = self.kind.suffix() {
            s.push(' ');
            s.push_str(&suffix);
        }
        s
    }

    // --- RECORD LOGIC ---

    /// Encodes the task as `KIND | done | description[ | dd/mm/yy hhmm]`.
    pub fn to_record(&self) -> String {
        let mut fields = vec![
            self.kind.code().to_string(),
            self.status.flag().to_string(),
            self.description.clone(),
        ];
        if let Some(ts) = self.kind.timestamp() {
            fields.push(ts.to_string());
        }
        fields.join(RECORD_SEPARATOR)
    }

    /// Decodes a record written by `to_record`.
    ///
    /// The description is the only free-text field, so it is taken as everything between
    /// the done flag and (for dated kinds) the last separator.
    pub fn from_record(record: &str) -> Result<Self, String> {
        let mut parts = record.splitn(3, RECORD_SEPARATOR);
        let code = parts.next().unwrap_or_default();
        let flag = parts.next().ok_or("missing done flag")?;
        let rest = parts.next().ok_or("missing description")?;

        let status = match flag {
            "0" => TaskStatus::Pending,
            "1" => TaskStatus::Done,
            other => return Err(format!("invalid done flag '{}'", other)),
        };

        let mut task = match code {
            "T" => Task::todo(rest),
            "D" | "E" => {
                let (description, date) = rest
                    .rsplit_once(RECORD_SEPARATOR)
                    .ok_or("missing date field")?;
                let ts = date.parse::<Timestamp>().map_err(|e| e.to_string())?;
                if code == "D" {
                    Task::deadline(description, ts)
                } else {
                    Task::event(description, ts)
                }
            }
            other => return Err(format!("unknown task kind '{}'", other)),
        };

        if task.description.is_empty() {
            return Err("empty description".to_string());
        }
        task.status = status;
        Ok(task)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
