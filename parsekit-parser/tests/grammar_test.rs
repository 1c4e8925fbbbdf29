//! Whole grammars over tokenizer output, shared across threads.

use parsekit_lexer::{tokenize, SpecSet, TokenSpec};
use parsekit_parser::{flatten, Node, Token};
use std::thread;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Number,
    Op,
    LParen,
    RParen,
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn specs() -> SpecSet<Kind> {
    SpecSet::new(vec![
        TokenSpec::token("NUMBER", Kind::Number, r"\d+"),
        TokenSpec::token("OP", Kind::Op, r"[+\-*/]"),
        TokenSpec::token("LPAREN", Kind::LParen, r"\("),
        TokenSpec::token("RPAREN", Kind::RParen, r"\)"),
        TokenSpec::skip("WS", r"\s+"),
    ])
    .unwrap()
}

fn lex(text: &str) -> Vec<Token<Kind>> {
    tokenize(text, &specs()).into_tokens().unwrap()
}

fn values(result: &[parsekit_parser::Element<Kind>]) -> Vec<&str> {
    flatten(result).into_iter().map(Token::value).collect()
}

fn expression() -> Node<Kind> {
    let term = (Node::token(Kind::LParen).expected("(")
        + Node::token(Kind::Number)
        + Node::token(Kind::RParen).expected(")").fatal())
    .pack()
        | Node::token(Kind::Number);
    term.clone() + (Node::token(Kind::Op) + term).repeat(0, None)
}

#[test]
fn test_end_to_end_sum() {
    init_logger();
    let text = "12 + 34";
    let tokens = lex(text);
    let grammar = Node::token(Kind::Number) + Node::token(Kind::Op).expected("+") + Node::token(Kind::Number);

    let (result, rest) = grammar.parse(text, &tokens).unwrap();
    assert_eq!(values(&result), vec!["12", "34"]);
    assert!(rest.is_empty());
}

#[test]
fn test_expression_groups_parentheses() {
    init_logger();
    let text = "1 + (2) * 3";
    let tokens = lex(text);

    let (result, rest) = expression().parse(text, &tokens).unwrap();
    assert!(rest.is_empty());
    assert_eq!(values(&result), vec!["1", "+", "2", "*", "3"]);
    assert_eq!(
        result[2].as_group().map(|group| values(group)),
        Some(vec!["2"])
    );
}

#[test]
fn test_unclosed_parenthesis_is_fatal_with_source_pointer() {
    let text = "1 +\n(2 3";
    let tokens = lex(text);

    let err = expression().parse(text, &tokens).unwrap_err();
    assert!(err.is_fatal());
    let token = err.token().unwrap();
    assert_eq!((token.line(), token.column()), (2, 4));
    assert_eq!(err.failure().unwrap().message(), "\n(2 3\n   ^Expected RParen");
}

#[test]
fn test_expression_stops_before_unparsable_suffix() {
    let text = "1 + 2 3";
    let tokens = lex(text);
    let (result, rest) = expression().parse(text, &tokens).unwrap();
    assert_eq!(values(&result), vec!["1", "+", "2"]);
    assert_eq!(rest, &tokens[3..]);
}

#[test]
fn test_shared_grammar_parses_concurrently() {
    let grammar = expression();
    assert!(grammar.validate().is_ok());
    let inputs = ["1 + 2", "(3) * 4 - 5", "6", "(7) / (8) + 9 * 10"];
    let expected: Vec<Vec<String>> = inputs
        .iter()
        .map(|text| {
            let tokens = lex(text);
            let (result, _) = grammar.parse(text, &tokens).unwrap();
            values(&result).into_iter().map(str::to_string).collect()
        })
        .collect();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let grammar = &grammar;
                let text = inputs[i % inputs.len()];
                scope.spawn(move || {
                    let tokens = lex(text);
                    let (result, rest) = grammar.parse(text, &tokens).unwrap();
                    assert!(rest.is_empty());
                    (i, values(&result).into_iter().map(str::to_string).collect::<Vec<_>>())
                })
            })
            .collect();

        for handle in handles {
            let (i, values) = handle.join().unwrap();
            assert_eq!(values, expected[i % inputs.len()]);
        }
    });
}
