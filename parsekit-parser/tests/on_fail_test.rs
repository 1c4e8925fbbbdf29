//! Failure hooks: observation, suppression and the cases that bypass them.

use parsekit_parser::{ConfigError, Node, ParseError, Token};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Word,
}

fn tok(value: &str, column: usize) -> Token<Kind> {
    Token::at(Kind::Word, value, 1, column)
}

fn skip(value: &str) -> Node<Kind> {
    Node::token(Kind::Word).expected(value)
}

fn recorder() -> (Arc<Mutex<Vec<ParseError<Kind>>>>, impl Fn(&ParseError<Kind>) + Send + Sync) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let hook = move |error: &ParseError<Kind>| {
        sink.lock().unwrap().push(error.clone());
    };
    (seen, hook)
}

fn counter() -> (Arc<AtomicUsize>, impl Fn(&ParseError<Kind>) + Send + Sync) {
    let calls = Arc::new(AtomicUsize::new(0));
    let sink = Arc::clone(&calls);
    (calls, move |_: &ParseError<Kind>| {
        sink.fetch_add(1, Ordering::SeqCst);
    })
}

#[test]
fn test_match_hook_suppresses_failure() {
    let (seen, hook) = recorder();
    let input = [tok("B", 1)];
    let (result, rest) = skip("A").on_fail(hook).parse("B", &input).unwrap();

    assert!(result.is_empty());
    assert_eq!(rest, &input[..]);
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].is_recoverable());
}

#[test]
fn test_match_hook_on_empty_tokens() {
    let (seen, hook) = recorder();
    let (result, rest) = skip("A").on_fail(hook).parse("", &[]).unwrap();
    assert!(result.is_empty());
    assert!(rest.is_empty());
    assert_eq!(seen.lock().unwrap()[0].to_string(), "tokens is empty");
}

#[test]
fn test_sequence_hook_returns_original_tokens() {
    let (seen, hook) = recorder();
    let input = [tok("A", 1), tok("X", 3)];
    let grammar = (skip("A") + skip("B")).on_fail(hook);

    let (result, rest) = grammar.parse("A X", &input).unwrap();
    assert!(result.is_empty());
    assert_eq!(rest, &input[..]);
    assert_eq!(seen.lock().unwrap()[0].token(), Some(&input[1]));
}

#[test]
fn test_pack_hook_returns_original_tokens() {
    let (seen, hook) = recorder();
    let input = [tok("B", 1)];
    let (result, rest) = skip("A").pack().on_fail(hook).parse("B", &input).unwrap();
    assert!(result.is_empty());
    assert_eq!(rest, &input[..]);
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[test]
fn test_repeat_hook_returns_original_tokens() {
    let (seen, hook) = recorder();
    let input = [tok("A", 1), tok("X", 3)];
    let grammar = skip("A").repeat(2, None).on_fail(hook);

    let (result, rest) = grammar.parse("A X", &input).unwrap();
    assert!(result.is_empty());
    assert_eq!(rest, &input[..]);
    assert!(seen.lock().unwrap()[0]
        .to_string()
        .contains("Expected at least 2 matches at 1:3"));
}

#[test]
fn test_choice_hook_sees_each_failed_alternative() {
    let (seen, hook) = recorder();
    let input = [tok("X", 1)];
    let grammar = (skip("A") | skip("B")).on_fail(hook);

    let (result, rest) = grammar.parse("X", &input).unwrap();
    assert!(result.is_empty());
    assert_eq!(rest, &input[..]);
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 3);
    assert!(seen[0].to_string().ends_with("^Expected A"));
    assert!(seen[1].to_string().ends_with("^Expected B"));
    assert!(seen[2].to_string().contains("no alternative matched"));
}

#[test]
fn test_choice_hook_sees_failed_first_alternative_on_success() {
    let (seen, hook) = recorder();
    let input = [tok("B", 1)];
    let grammar = (skip("A") | skip("B").gather(true)).on_fail(hook);

    let (result, rest) = grammar.parse("B", &input).unwrap();
    assert_eq!(result.len(), 1);
    assert!(rest.is_empty());
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].to_string().ends_with("^Expected A"));
}

#[test]
fn test_choice_hook_beneath_fatal_still_sees_alternatives() {
    let (calls, hook) = counter();
    let input = [tok("X", 1)];
    let grammar = (skip("A") | skip("B")).on_fail(hook).fatal();

    let err = grammar.parse("X", &input).unwrap_err();
    assert!(err.is_fatal());
    assert!(err.to_string().contains("no alternative matched"));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_suppressed_alternative_counts_as_success() {
    let (calls, hook) = counter();
    let input = [tok("B", 1)];
    let grammar = skip("A").on_fail(hook) | skip("B").gather(true);

    let (result, rest) = grammar.parse("B", &input).unwrap();
    assert!(result.is_empty());
    assert_eq!(rest.len(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_hook_beneath_fatal_observes_but_cannot_suppress() {
    let (calls, hook) = counter();
    let input = [tok("X", 1)];
    let grammar = skip("A").on_fail(hook).fatal();

    let err = grammar.parse("X", &input).unwrap_err();
    assert!(err.is_fatal());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_fatal_errors_bypass_hooks() {
    let (calls, hook) = counter();
    let input = [tok("A", 1), tok("X", 3)];
    let grammar = (skip("A") + skip("B").fatal()).on_fail(hook);

    let err = grammar.parse("A X", &input).unwrap_err();
    assert!(err.is_fatal());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_config_errors_bypass_hooks() {
    let (calls, hook) = counter();
    let input = [tok("A", 1)];

    let err = Node::<Kind>::default().on_fail(hook).parse("A", &input).unwrap_err();
    assert_eq!(err, ParseError::Config(ConfigError::MissingTokenKind));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_successful_parse_never_calls_hook() {
    let (calls, hook) = counter();
    let input = [tok("A", 1)];
    skip("A").on_fail(hook).parse("A", &input).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
