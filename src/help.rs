// File: ./src/help.rs
//! Help content for the recognised commands.
//!
//! Built from `CommandKeyword` so the list can never drift from what the parser accepts.
use crate::parser::CommandKeyword;
use strum::IntoEnumIterator;

#[derive(Clone, Debug)]
pub struct HelpItem {
    pub usage: &'static str,
    pub desc: &'static str,
}

fn describe(keyword: CommandKeyword) -> &'static str {
    match keyword {
        CommandKeyword::Bye => "Ends the chat session.",
        CommandKeyword::Todo => "Adds a new todo to the task list.",
        CommandKeyword::Deadline => "Adds a new deadline to the task list.",
        CommandKeyword::Event => "Adds a new event to the task list.",
        CommandKeyword::List => "Lists all the tasks.",
        CommandKeyword::Done => "Marks the task as done.",
        CommandKeyword::Find => "Finds tasks whose description contains the text.",
        CommandKeyword::Delete => "Deletes the task.",
    }
}

pub fn get_command_help() -> Vec<HelpItem> {
    CommandKeyword::iter()
        .map(|k| HelpItem {
            usage: k.usage(),
            desc: describe(k),
        })
        .collect()
}

/// One line per command, e.g. `done <number> - Marks the task as done.`
pub fn command_lines() -> Vec<String> {
    get_command_help()
        .into_iter()
        .map(|item| format!("{} - {}", item.usage, item.desc))
        .collect()
}
