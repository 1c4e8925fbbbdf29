use crate::error::ParseError;
use parsekit_lexer::Token;

/// One entry of a parse result: a gathered token, or a group produced by
/// [`Node::pack`](crate::Node::pack).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element<K> {
    Token(Token<K>),
    Group(Vec<Element<K>>),
}

impl<K> Element<K> {
    /// Returns the token if this element is one.
    pub fn as_token(&self) -> Option<&Token<K>> {
        match self {
            Element::Token(token) => Some(token),
            Element::Group(_) => None,
        }
    }

    /// Returns the nested elements if this element is a group.
    pub fn as_group(&self) -> Option<&[Element<K>]> {
        match self {
            Element::Token(_) => None,
            Element::Group(items) => Some(items),
        }
    }
}

/// Gathered tokens and groups, in source order.
pub type ParseResult<K> = Vec<Element<K>>;

/// A successful parse: the result and the tokens left over.
///
/// The remainder is always a suffix of the slice that was parsed.
pub type ParseReturn<'t, K> = (ParseResult<K>, &'t [Token<K>]);

/// What every node's `parse` returns.
pub type ParseOutcome<'t, K> = Result<ParseReturn<'t, K>, ParseError<K>>;

/// Collects every token in `result`, descending into groups, in order.
pub fn flatten<K>(result: &[Element<K>]) -> Vec<&Token<K>> {
    let mut out = Vec::new();
    collect(result, &mut out);
    out
}

fn collect<'a, K>(elements: &'a [Element<K>], out: &mut Vec<&'a Token<K>>) {
    for element in elements {
        match element {
            Element::Token(token) => out.push(token),
            Element::Group(items) => collect(items, out),
        }
    }
}
