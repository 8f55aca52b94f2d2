// Regression tests for command line parsing.
use duke::parser::{CommandKeyword, ParseError, ParsedCommand, parse};

#[test]
fn test_inner_whitespace_is_kept() {
    assert_eq!(
        parse("todo    spaced   out  ").unwrap(),
        ParsedCommand::Todo {
            description: "spaced   out".to_string()
        }
    );
}

#[test]
fn test_tab_separates_keyword() {
    assert_eq!(
        parse("todo\tread").unwrap(),
        ParsedCommand::Todo {
            description: "read".to_string()
        }
    );
}

#[test]
fn test_surrounding_whitespace_ignored() {
    assert_eq!(parse("  list  ").unwrap(), ParsedCommand::List);
    assert_eq!(parse("delete 2\r").unwrap(), ParsedCommand::Delete { index: 2 });
}

#[test]
fn test_only_first_marker_splits() {
    // Everything after the first marker must be the date.
    let err = parse("deadline a /by b /by 01/12/23 1800").unwrap_err();
    assert!(matches!(err, ParseError::InvalidDateTime { .. }));
    assert_eq!(err.command(), CommandKeyword::Deadline);
}

#[test]
fn test_marker_without_spaces() {
    let cmd = parse("event Party/at24/12/23 2000").unwrap();
    assert_eq!(
        cmd,
        ParsedCommand::Event {
            description: "Party".to_string(),
            at: "24/12/23 2000".parse().unwrap(),
        }
    );
}

#[test]
fn test_find_keeps_raw_text() {
    assert_eq!(
        parse("find  two words ").unwrap(),
        ParsedCommand::Find {
            query: "two words".to_string()
        }
    );
}

#[test]
fn test_huge_index_is_not_a_number() {
    let err = parse("done 99999999999999999999999999").unwrap_err();
    assert!(matches!(
        err,
        ParseError::NotANumber {
            command: CommandKeyword::Done,
            ..
        }
    ));
}

#[test]
fn test_error_messages_are_readable() {
    assert_eq!(
        parse("todo").unwrap_err().to_string(),
        "the description of a todo cannot be empty"
    );
    assert_eq!(
        parse("event x").unwrap_err().to_string(),
        "event needs a '/at' before the date"
    );
}
