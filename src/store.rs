// File: src/store.rs
//! The ordered task list and every operation that reads or mutates it.
//!
//! User-facing indices are 1-based and always validated against the current size
//! before anything is touched.
use crate::model::{Task, Timestamp};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskListError {
    #[error("task number {index} is out of range (the list has {size} task(s))")]
    IndexOutOfRange { index: usize, size: usize },

    #[error("task is already done: {0}")]
    AlreadyDone(Task),

    #[error("a task description cannot be empty")]
    EmptyDescription,

    #[error("corrupt record on line {line} ({reason}): '{record}'")]
    CorruptRecord {
        line: usize,
        record: String,
        reason: String,
    },
}

/// Result of `TaskList::list`. An empty list is its own outcome so callers can show
/// a dedicated message instead of nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Empty,
    Tasks(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Looks up a task by its 1-based position.
    pub fn get(&self, index: usize) -> Option<&Task> {
        index.checked_sub(1).and_then(|i| self.tasks.get(i))
    }

    // --- ADD ---

    pub fn add_todo(&mut self, description: &str) -> Result<(Task, usize), TaskListError> {
        self.push(Task::todo(description))
    }

    pub fn add_deadline(
        &mut self,
        description: &str,
        by: Timestamp,
    ) -> Result<(Task, usize), TaskListError> {
        self.push(Task::deadline(description, by))
    }

    pub fn add_event(
        &mut self,
        description: &str,
        at: Timestamp,
    ) -> Result<(Task, usize), TaskListError> {
        self.push(Task::event(description, at))
    }

    fn push(&mut self, task: Task) -> Result<(Task, usize), TaskListError> {
        if task.description().is_empty() {
            return Err(TaskListError::EmptyDescription);
        }
        self.tasks.push(task.clone());
        log::debug!("Added task #{}: {}", self.tasks.len(), task);
        Ok((task, self.tasks.len()))
    }

    // --- MARK / DELETE ---

    /// Marks the task at `index` as done.
    ///
    /// A task that is already done is left untouched and reported as `AlreadyDone`.
    pub fn mark_done(&mut self, index: usize) -> Result<&Task, TaskListError> {
        let slot = self.slot(index)?;
        let task = &mut self.tasks[slot];
        if task.is_done() {
            return Err(TaskListError::AlreadyDone(task.clone()));
        }
        task.mark_done();
        Ok(task)
    }

    /// Removes the task at `index`; later tasks move up by one.
    /// Returns the removed task and the remaining count.
    pub fn delete(&mut self, index: usize) -> Result<(Task, usize), TaskListError> {
        let slot = self.slot(index)?;
        let task = self.tasks.remove(slot);
        log::debug!("Deleted task #{}: {}", index, task);
        Ok((task, self.tasks.len()))
    }

    fn slot(&self, index: usize) -> Result<usize, TaskListError> {
        if index == 0 || index > self.tasks.len() {
            return Err(TaskListError::IndexOutOfRange {
                index,
                size: self.tasks.len(),
            });
        }
        Ok(index - 1)
    }

    // --- QUERIES ---

    pub fn list(&self) -> Listing {
        if self.tasks.is_empty() {
            return Listing::Empty;
        }
        Listing::Tasks(
            self.tasks
                .iter()
                .enumerate()
                .map(|(i, t)| numbered(i, t))
                .collect(),
        )
    }

    /// Case-sensitive substring search on descriptions, in list order.
    /// Each line keeps the task's position in the full list.
    pub fn find(&self, query: &str) -> Vec<String> {
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.description().contains(query))
            .map(|(i, t)| numbered(i, t))
            .collect()
    }

    // --- RECORDS ---

    pub fn serialize(&self) -> Vec<String> {
        self.tasks.iter().map(Task::to_record).collect()
    }

    /// Rebuilds a list from records. The first bad record fails the whole load.
    pub fn deserialize<I, S>(records: I) -> Result<Self, TaskListError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (list, rejected) = Self::import(records);
        match rejected.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(list),
        }
    }

    /// Lenient variant of `deserialize`: good records are kept, every bad one is
    /// returned as a `CorruptRecord` error. Blank lines are ignored.
    pub fn import<I, S>(records: I) -> (Self, Vec<TaskListError>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::new();
        let mut rejected = Vec::new();

        for (i, record) in records.into_iter().enumerate() {
            let record = record.as_ref();
            if record.trim().is_empty() {
                continue;
            }
            match Task::from_record(record) {
                Ok(task) => list.tasks.push(task),
                Err(reason) => {
                    log::warn!("Skipping record on line {}: {}", i + 1, reason);
                    rejected.push(TaskListError::CorruptRecord {
                        line: i + 1,
                        record: record.to_string(),
                        reason,
                    });
                }
            }
        }

        (list, rejected)
    }
}

fn numbered(i: usize, task: &Task) -> String {
    format!("{}. {}", i + 1, task)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    fn sample() -> TaskList {
        let mut list = TaskList::new();
        list.add_todo("Buy milk").unwrap();
        list.add_deadline("Submit report", ts("01/12/23 1800")).unwrap();
        list.add_event("Team dinner", ts("05/12/23 1930")).unwrap();
        list
    }

    #[test]
    fn test_add_returns_task_and_count() {
        let mut list = TaskList::new();
        let (task, count) = list.add_todo("Buy milk").unwrap();
        assert_eq!(task.render(), "[T][ ] Buy milk");
        assert_eq!(count, 1);

        let (_, count) = list.add_event("Party", ts("24/12/23 2000")).unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_add_rejects_blank_description() {
        let mut list = TaskList::new();
        assert_eq!(
            list.add_todo("   ").unwrap_err(),
            TaskListError::EmptyDescription
        );
        assert!(list.is_empty());
    }

    #[test]
    fn test_mark_done_bounds() {
        let mut list = sample();
        for index in [0, 4, 100] {
            assert_eq!(
                list.mark_done(index).unwrap_err(),
                TaskListError::IndexOutOfRange { index, size: 3 }
            );
        }
        assert!(list.mark_done(3).unwrap().is_done());
    }

    #[test]
    fn test_mark_done_twice_reports_without_mutation() {
        let mut list = sample();
        list.mark_done(1).unwrap();
        let before = list.clone();

        match list.mark_done(1) {
            Err(TaskListError::AlreadyDone(task)) => assert_eq!(task.description(), "Buy milk"),
            other => panic!("expected AlreadyDone, got {:?}", other),
        }
        assert_eq!(list, before);
    }

    #[test]
    fn test_delete_shifts_indices() {
        let mut list = sample();
        let (removed, count) = list.delete(1).unwrap();
        assert_eq!(removed.description(), "Buy milk");
        assert_eq!(count, 2);
        assert_eq!(list.get(1).unwrap().description(), "Submit report");

        list.delete(2).unwrap();
        assert!(matches!(
            list.delete(2),
            Err(TaskListError::IndexOutOfRange { index: 2, size: 1 })
        ));
    }

    #[test]
    fn test_list_empty_and_numbered() {
        assert_eq!(TaskList::new().list(), Listing::Empty);

        let Listing::Tasks(lines) = sample().list() else {
            panic!("expected tasks");
        };
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "1. [T][ ] Buy milk");
        assert!(lines[2].starts_with("3. [E][ ] Team dinner"));
    }

    #[test]
    fn test_find_is_case_sensitive_and_keeps_positions() {
        let list = sample();
        assert_eq!(
            list.find("dinner"),
            vec!["3. [E][ ] Team dinner (at: Dec 05 2023, 19:30)"]
        );
        assert!(list.find("DINNER").is_empty());
        assert_eq!(list.find("e").len(), 2);
    }

    #[test]
    fn test_serialize_roundtrip() {
        let mut list = sample();
        list.mark_done(2).unwrap();
        let records = list.serialize();
        assert_eq!(records[1], "D | 1 | Submit report | 01/12/23 1800");
        assert_eq!(TaskList::deserialize(&records).unwrap(), list);
    }

    #[test]
    fn test_deserialize_reports_first_bad_line() {
        let records = ["T | 0 | ok", "", "Z | 0 | bad", "T | 9 | worse"];
        match TaskList::deserialize(records) {
            Err(TaskListError::CorruptRecord { line, record, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(record, "Z | 0 | bad");
            }
            other => panic!("expected CorruptRecord, got {:?}", other),
        }

        let (list, rejected) = TaskList::import(records);
        assert_eq!(list.len(), 1);
        assert_eq!(rejected.len(), 2);
    }
}
