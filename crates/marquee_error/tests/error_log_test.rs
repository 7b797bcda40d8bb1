//! Tests for the bounded error log.

use marquee_error::{ClassifiedError, ErrorKind, ErrorLog};

fn err(message: &str) -> ClassifiedError {
    ClassifiedError::new(ErrorKind::ApiServerError, message)
}

#[test]
fn test_log_evicts_oldest_beyond_capacity() {
    let log = ErrorLog::with_capacity(5);
    for i in 0..8 {
        log.record(err(&format!("failure {i}")));
    }

    assert_eq!(log.len(), 5);

    let recent = log.recent(5);
    assert_eq!(recent.len(), 5);
    // Most-recent-first iteration order.
    let messages: Vec<&str> = recent.iter().map(|e| e.error.message.as_str()).collect();
    assert_eq!(
        messages,
        vec!["failure 7", "failure 6", "failure 5", "failure 4", "failure 3"]
    );
    // The oldest three entries are gone.
    assert!(!messages.contains(&"failure 0"));
    assert!(!messages.contains(&"failure 1"));
    assert!(!messages.contains(&"failure 2"));
}

#[test]
fn test_recent_with_fewer_entries_than_requested() {
    let log = ErrorLog::with_capacity(10);
    log.record(err("only one"));

    let recent = log.recent(10);
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].error.message, "only one");
}

#[test]
fn test_reads_do_not_mutate() {
    let log = ErrorLog::with_capacity(3);
    log.record(err("a"));
    log.record(err("b"));

    let first = log.recent(3);
    let second = log.recent(3);
    assert_eq!(first.len(), second.len());
    assert_eq!(log.len(), 2);
}

#[test]
fn test_clear_resets_to_empty() {
    let log = ErrorLog::with_capacity(3);
    log.record(err("a"));
    log.record(err("b"));
    assert_eq!(log.len(), 2);

    log.clear();
    assert!(log.is_empty());
    assert!(log.recent(3).is_empty());
}

#[test]
fn test_sequence_numbers_keep_increasing_across_eviction() {
    let log = ErrorLog::with_capacity(2);
    for i in 0..4 {
        log.record(err(&format!("failure {i}")));
    }

    let recent = log.recent(2);
    assert_eq!(recent[0].seq, 3);
    assert_eq!(recent[1].seq, 2);
}

#[test]
fn test_default_capacity_is_one_hundred() {
    let log = ErrorLog::new();
    for i in 0..150 {
        log.record(err(&format!("failure {i}")));
    }
    assert_eq!(log.len(), 100);
    assert_eq!(log.recent(1)[0].error.message, "failure 149");
}

#[test]
fn test_shared_handle_sees_the_same_buffer() {
    let log = ErrorLog::with_capacity(4);
    let clone = log.clone();
    clone.record(err("recorded through a clone"));
    assert_eq!(log.len(), 1);
}
