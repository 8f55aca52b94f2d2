// End-to-end command scenarios through the dispatcher.
use duke::controller::Dispatcher;
use duke::parser::CommandKeyword;
use duke::response::Response;
use duke::store::Listing;

#[test]
fn test_basic_conversation() {
    let mut d = Dispatcher::default();

    match d.handle_line("todo Buy milk") {
        Response::TaskAdded { task, count } => {
            assert_eq!(task.description(), "Buy milk");
            assert!(!task.is_done());
            assert_eq!(task.kind().code(), 'T');
            assert_eq!(count, 1);
        }
        other => panic!("unexpected {:?}", other),
    }

    match d.handle_line("deadline Submit report /by 01/12/23 1800") {
        Response::TaskAdded { task, count } => {
            assert_eq!(task.kind().code(), 'D');
            assert_eq!(task.kind().timestamp().unwrap().to_string(), "01/12/23 1800");
            assert_eq!(count, 2);
        }
        other => panic!("unexpected {:?}", other),
    }

    match d.handle_line("done 1") {
        Response::MarkedDone { task } => {
            assert_eq!(task.description(), "Buy milk");
            assert!(task.is_done());
        }
        other => panic!("unexpected {:?}", other),
    }

    match d.handle_line("delete 1") {
        Response::DeleteSuccess { task, count } => {
            assert_eq!(task.render(), "[T][X] Buy milk");
            assert_eq!(count, 1);
        }
        other => panic!("unexpected {:?}", other),
    }

    assert_eq!(
        d.handle_line("list"),
        Response::ListResult(Listing::Tasks(vec![
            "1. [D][ ] Submit report (by: Dec 01 2023, 18:00)".to_string()
        ]))
    );

    match d.handle_line("find Submit") {
        Response::FindResult(lines) => assert_eq!(lines.len(), 1),
        other => panic!("unexpected {:?}", other),
    }

    assert_eq!(
        d.handle_line("done 5"),
        Response::OutOfRange {
            command: CommandKeyword::Done
        }
    );

    assert_eq!(d.handle_line("bye"), Response::Farewell);
    assert!(d.is_terminated());
}

#[test]
fn test_list_length_tracks_adds_and_deletes() {
    let mut d = Dispatcher::default();
    let mut expected: usize = 0;

    let script = [
        "todo one",
        "todo two",
        "event three /at 01/01/24 1000",
        "delete 2",
        "deadline four /by 02/01/24 0800",
        "delete 9",
        "todo",
        "delete 1",
        "event bad /at 32/01/24 1000",
    ];
    for line in script {
        match d.handle_line(line) {
            Response::TaskAdded { count, .. } => {
                expected += 1;
                assert_eq!(count, expected);
            }
            Response::DeleteSuccess { count, .. } => {
                expected -= 1;
                assert_eq!(count, expected);
            }
            _ => {}
        }
    }

    assert_eq!(expected, 2);
    assert_eq!(d.tasks().len(), expected);
}

#[test]
fn test_repeated_delete_never_reads_past_the_end() {
    let mut d = Dispatcher::default();
    for line in ["todo a", "todo b", "todo c"] {
        d.handle_line(line);
    }

    match d.handle_line("delete 2") {
        Response::DeleteSuccess { task, .. } => assert_eq!(task.description(), "b"),
        other => panic!("unexpected {:?}", other),
    }
    match d.handle_line("delete 2") {
        Response::DeleteSuccess { task, .. } => assert_eq!(task.description(), "c"),
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(
        d.handle_line("delete 2"),
        Response::OutOfRange {
            command: CommandKeyword::Delete
        }
    );
    assert_eq!(d.tasks().len(), 1);
}

#[test]
fn test_done_on_done_task_is_reported_and_harmless() {
    let mut d = Dispatcher::default();
    d.handle_line("event Party /at 24/12/23 2000");
    d.handle_line("done 1");
    let before = d.tasks().clone();

    for _ in 0..3 {
        match d.handle_line("done 1") {
            Response::AlreadyDone { task } => assert_eq!(task.description(), "Party"),
            other => panic!("unexpected {:?}", other),
        }
    }
    assert_eq!(d.tasks(), &before);
}

#[test]
fn test_blank_find_is_a_format_error() {
    let mut d = Dispatcher::default();
    d.handle_line("todo a");
    assert_eq!(
        d.handle_line("find"),
        Response::FormatError {
            command: CommandKeyword::Find,
            expected: "find <text>",
        }
    );
}

#[test]
fn test_find_with_no_match_is_empty_result() {
    let mut d = Dispatcher::default();
    d.handle_line("todo read book");
    assert_eq!(d.handle_line("find Book"), Response::FindResult(vec![]));
}
