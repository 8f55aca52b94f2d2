// File: src/controller.rs
//! Command dispatch and the session around it.
//!
//! `Dispatcher` is the state machine that maps parsed commands onto the task list and
//! answers with a `Response`. `Session` adds persistence: it loads the list at start,
//! saves after changes and once more on shutdown.
use crate::config::Config;
use crate::help;
use crate::model::Task;
use crate::parser::{self, CommandKeyword, ParsedCommand};
use crate::response::Response;
use crate::storage::TaskStorage;
use crate::store::{TaskList, TaskListError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatcherState {
    #[default]
    Running,
    Terminated,
}

/// Owns the task list for the lifetime of a session.
#[derive(Debug, Default)]
pub struct Dispatcher {
    tasks: TaskList,
    state: DispatcherState,
}

impl Dispatcher {
    pub fn new(tasks: TaskList) -> Self {
        Self {
            tasks,
            state: DispatcherState::Running,
        }
    }

    pub fn state(&self) -> DispatcherState {
        self.state
    }

    pub fn is_terminated(&self) -> bool {
        self.state == DispatcherState::Terminated
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// Parses and dispatches one input line.
    pub fn handle_line(&mut self, line: &str) -> Response {
        if self.is_terminated() {
            log::warn!("Input after bye ignored: {:?}", line);
            return Response::Farewell;
        }
        match parser::parse(line) {
            Ok(command) => self.dispatch(command),
            Err(e) => {
                log::info!("Rejected input {:?}: {}", line, e);
                Response::from(&e)
            }
        }
    }

    pub fn dispatch(&mut self, command: ParsedCommand) -> Response {
        if self.is_terminated() {
            return Response::Farewell;
        }

        match command {
            ParsedCommand::Todo { description } => added(
                CommandKeyword::Todo,
                self.tasks.add_todo(&description),
            ),
            ParsedCommand::Deadline { description, by } => added(
                CommandKeyword::Deadline,
                self.tasks.add_deadline(&description, by),
            ),
            ParsedCommand::Event { description, at } => added(
                CommandKeyword::Event,
                self.tasks.add_event(&description, at),
            ),
            ParsedCommand::Done { index } => match self.tasks.mark_done(index) {
                Ok(task) => Response::MarkedDone { task: task.clone() },
                Err(e) => failure(CommandKeyword::Done, e),
            },
            ParsedCommand::Delete { index } => match self.tasks.delete(index) {
                Ok((task, count)) => Response::DeleteSuccess { task, count },
                Err(e) => failure(CommandKeyword::Delete, e),
            },
            ParsedCommand::List => Response::ListResult(self.tasks.list()),
            ParsedCommand::Find { query } => Response::FindResult(self.tasks.find(&query)),
            ParsedCommand::Bye => {
                self.state = DispatcherState::Terminated;
                log::info!("Session terminated by user");
                Response::Farewell
            }
            ParsedCommand::Unknown { keyword } => {
                log::debug!("Unknown keyword {:?}", keyword);
                Response::unrecognized()
            }
        }
    }
}

fn added(
    command: CommandKeyword,
    result: Result<(Task, usize), TaskListError>,
) -> Response {
    match result {
        Ok((task, count)) => Response::TaskAdded { task, count },
        Err(e) => failure(command, e),
    }
}

fn failure(command: CommandKeyword, err: TaskListError) -> Response {
    log::info!("{} failed: {}", command, err);
    match err {
        TaskListError::IndexOutOfRange { .. } => Response::OutOfRange { command },
        TaskListError::AlreadyDone(task) => Response::AlreadyDone { task },
        TaskListError::EmptyDescription | TaskListError::CorruptRecord { .. } => {
            Response::format_error(command)
        }
    }
}

// --- SESSION ---

/// A dispatcher wired to storage and configuration.
pub struct Session {
    dispatcher: Dispatcher,
    storage: Box<dyn TaskStorage>,
    config: Config,
    dirty: bool,
    /// Set when stored tasks could not be read; saving would overwrite them.
    save_blocked: Option<String>,
    /// Records skipped by a lenient load. They are written back untouched on every save.
    unreadable: Vec<String>,
}

impl Session {
    /// Loads the stored tasks and returns the opening responses (greeting, load report,
    /// first-run help).
    pub fn start(storage: Box<dyn TaskStorage>, config: Config) -> (Self, Vec<Response>) {
        let mut responses = vec![Response::Greeting];
        let mut save_blocked = None;
        let mut unreadable = Vec::new();

        let tasks = if !storage.exists() {
            log::info!("No saved tasks found, first run");
            if config.show_help_on_first_run {
                responses.push(Response::Welcome {
                    help: help::command_lines(),
                });
            }
            TaskList::new()
        } else {
            match Self::load_tasks(storage.as_ref(), &config, &mut responses, &mut unreadable) {
                Ok(tasks) => tasks,
                Err(reason) => {
                    log::error!("Failed to load tasks: {}", reason);
                    responses.push(Response::LoadFailed {
                        reason: reason.clone(),
                    });
                    save_blocked = Some(reason);
                    TaskList::new()
                }
            }
        };

        if !tasks.is_empty() {
            responses.push(Response::Loaded { count: tasks.len() });
        }

        let session = Self {
            dispatcher: Dispatcher::new(tasks),
            storage,
            config,
            dirty: false,
            save_blocked,
            unreadable,
        };
        (session, responses)
    }

    fn load_tasks(
        storage: &dyn TaskStorage,
        config: &Config,
        responses: &mut Vec<Response>,
        unreadable: &mut Vec<String>,
    ) -> Result<TaskList, String> {
        let records = storage.load().map_err(|e| format!("{:#}", e))?;

        if config.strict_load {
            return TaskList::deserialize(&records).map_err(|e| e.to_string());
        }

        let (tasks, rejected) = TaskList::import(&records);
        for err in rejected {
            if let TaskListError::CorruptRecord { record, reason, .. } = err {
                unreadable.push(record.clone());
                responses.push(Response::Skipped { record, reason });
            }
        }
        Ok(tasks)
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn storage(&self) -> &dyn TaskStorage {
        self.storage.as_ref()
    }

    pub fn is_terminated(&self) -> bool {
        self.dispatcher.is_terminated()
    }

    /// Handles one input line. A failed autosave is reported after the command's own
    /// response; the in-memory list stays as it is.
    pub fn handle(&mut self, line: &str) -> Vec<Response> {
        let response = self.dispatcher.handle_line(line);
        let changed = response.is_mutation();
        let mut responses = vec![response];

        if changed {
            self.dirty = true;
            if self.config.autosave
                && let Some(err) = self.persist()
            {
                responses.push(err);
            }
        }
        responses
    }

    /// Writes any unsaved changes. Returns `SaveFailed` if that did not work.
    pub fn shutdown(&mut self) -> Option<Response> {
        if !self.dirty {
            return None;
        }
        self.persist()
    }

    fn persist(&mut self) -> Option<Response> {
        if let Some(reason) = &self.save_blocked {
            log::warn!("Save skipped, stored tasks were not loaded: {}", reason);
            return Some(Response::SaveFailed {
                reason: format!(
                    "Saved tasks could not be read earlier, refusing to overwrite them ({})",
                    reason
                ),
            });
        }

        let mut records = self.dispatcher.tasks().serialize();
        records.extend(self.unreadable.iter().cloned());
        match self.storage.save(&records) {
            Ok(()) => {
                self.dirty = false;
                None
            }
            Err(e) => {
                log::error!("Failed to save tasks: {:#}", e);
                Some(Response::SaveFailed {
                    reason: format!("{:#}", e),
                })
            }
        }
    }
}
