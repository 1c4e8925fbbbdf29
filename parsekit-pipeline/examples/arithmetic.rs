//! Parses parenthesized arithmetic and prints the grouped result.

use parsekit_lexer::{SpecSet, TokenSpec};
use parsekit_parser::{Element, Node};
use parsekit_pipeline::{Pipeline, PipelineError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Number,
    Operator,
    LParen,
    RParen,
}

fn expression() -> Node<Kind> {
    let group = Node::token(Kind::LParen).expected("(")
        + Node::token(Kind::Number)
        + (Node::token(Kind::Operator) + Node::token(Kind::Number)).repeat(0, None)
        + Node::token(Kind::RParen).expected(")").fatal();
    let term = group.pack() | Node::token(Kind::Number);
    term.clone() + (Node::token(Kind::Operator) + term).repeat(0, None)
}

fn render(elements: &[Element<Kind>]) -> String {
    let parts: Vec<String> = elements
        .iter()
        .map(|element| match element {
            Element::Token(token) => token.value().to_string(),
            Element::Group(items) => format!("[{}]", render(items)),
        })
        .collect();
    parts.join(" ")
}

fn main() -> Result<(), PipelineError<Kind>> {
    let _ = env_logger::try_init();

    let specs = SpecSet::new(vec![
        TokenSpec::skip("WS", r"\s+"),
        TokenSpec::token("NUMBER", Kind::Number, r"\d+"),
        TokenSpec::token("OP", Kind::Operator, r"[+\-*/]"),
        TokenSpec::token("LPAREN", Kind::LParen, r"\("),
        TokenSpec::token("RPAREN", Kind::RParen, r"\)"),
    ])?;
    let pipeline = Pipeline::new(specs, expression())?;

    for text in ["1 + 2", "(1 + 2) * 3", "4 * (5 - 6) / 7", "(8 9", "1 2"] {
        match pipeline.run_complete(text) {
            Ok(result) => println!("{text:>16}  =>  {}", render(&result)),
            Err(err) => println!("{text:>16}  =>  error: {err}"),
        }
    }
    Ok(())
}
