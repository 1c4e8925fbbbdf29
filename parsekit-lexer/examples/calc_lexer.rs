//! Calculator lexer example.
//! Defines calculator-style token specifications and prints what they produce.

use parsekit_lexer::{tokenize, SpecSet, TokenSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcKind {
    Number,
    Plus,
    Minus,
    Multiply,
    Divide,
    Power,
    LeftParen,
    RightParen,
}

fn calc_specs() -> Result<SpecSet<CalcKind>, parsekit_lexer::LexError> {
    SpecSet::new(vec![
        TokenSpec::skip("WS", r"\s+"),
        TokenSpec::token("NUMBER", CalcKind::Number, r"\d+(?:\.\d+)?"),
        TokenSpec::token("PLUS", CalcKind::Plus, r"\+"),
        TokenSpec::token("MINUS", CalcKind::Minus, r"-"),
        TokenSpec::token("MULTIPLY", CalcKind::Multiply, r"\*"),
        TokenSpec::token("DIVIDE", CalcKind::Divide, r"/"),
        TokenSpec::token("POWER", CalcKind::Power, r"\^"),
        TokenSpec::token("LPAREN", CalcKind::LeftParen, r"\("),
        TokenSpec::token("RPAREN", CalcKind::RightParen, r"\)"),
    ])
}

fn main() -> Result<(), parsekit_lexer::LexError> {
    let specs = calc_specs()?;
    let expressions = ["3 + 4", "2 * 3.14", "(1 + 2) * 3", "2 ^ 8", "10 / 2.5", "4 % 2"];

    for expr in expressions {
        println!("Expression: {}", expr);
        println!("Tokens:");
        for item in tokenize(expr, &specs) {
            match item {
                Ok(Some(token)) => println!("  {:?}", token),
                // Skip whitespace
                Ok(None) => continue,
                Err(err) => println!("  error: {}", err),
            }
        }
        println!();
    }
    Ok(())
}
