use crate::error::LexError;
use crate::token::{Token, TokenKind};
use parsekit_common::Position;
use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Builds the value emitted for one match: the matched text and where it
/// starts.
///
/// Returning `None` emits the inert "skip" value, which is how whitespace
/// and comments are usually dropped. The tokenizer forwards the result
/// unchanged either way.
pub type Constructor<K> = Arc<dyn Fn(&str, Position) -> Option<Token<K>> + Send + Sync>;

/// One named token pattern and the constructor for its matches.
pub struct TokenSpec<K> {
    name: String,
    pattern: String,
    constructor: Constructor<K>,
}

impl<K: TokenKind> TokenSpec<K> {
    /// Creates a specification with a custom constructor.
    pub fn new<N, P, F>(name: N, pattern: P, constructor: F) -> Self
    where
        N: Into<String>,
        P: Into<String>,
        F: Fn(&str, Position) -> Option<Token<K>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            constructor: Arc::new(constructor),
        }
    }

    /// Creates a specification whose matches become tokens of `kind`.
    pub fn token<N: Into<String>, P: Into<String>>(name: N, kind: K, pattern: P) -> Self {
        Self::new(name, pattern, move |value, position| {
            Some(Token::new(kind, value, position))
        })
    }

    /// Creates a specification whose matches are emitted as skip values.
    pub fn skip<N: Into<String>, P: Into<String>>(name: N, pattern: P) -> Self {
        Self::new(name, pattern, |_, _| None)
    }
}

impl<K> TokenSpec<K> {
    /// Returns the specification's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the regular expression source.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub(crate) fn construct(&self, value: &str, position: Position) -> Option<Token<K>> {
        (self.constructor)(value, position)
    }
}

impl<K> Clone for TokenSpec<K> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            pattern: self.pattern.clone(),
            constructor: Arc::clone(&self.constructor),
        }
    }
}

impl<K> fmt::Debug for TokenSpec<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSpec")
            .field("name", &self.name)
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

/// An ordered, compiled set of token specifications.
///
/// All patterns are joined into a single alternation, in the order given.
/// When several patterns match at the same position the earliest one wins,
/// even if a later one would match more text.
#[derive(Clone)]
pub struct SpecSet<K> {
    specs: Vec<TokenSpec<K>>,
    regex: Regex,
    /// Capture group name of each spec inside `regex`.
    groups: Vec<String>,
}

impl<K> SpecSet<K> {
    /// Validates and compiles `specs`.
    ///
    /// Fails on an empty list, duplicate names, invalid patterns, and
    /// patterns that accept the empty string.
    pub fn new(specs: Vec<TokenSpec<K>>) -> Result<Self, LexError> {
        if specs.is_empty() {
            return Err(LexError::NoSpecs);
        }

        let mut seen = HashSet::new();
        for spec in &specs {
            if !seen.insert(spec.name.as_str()) {
                return Err(LexError::DuplicateName(spec.name.clone()));
            }
            let whole = Regex::new(&format!("^(?:{})$", spec.pattern)).map_err(|source| {
                LexError::InvalidPattern {
                    name: spec.name.clone(),
                    source,
                }
            })?;
            if whole.is_match("") {
                return Err(LexError::EmptyPattern {
                    name: spec.name.clone(),
                });
            }
        }

        let parts: Vec<String> = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| format!("(?P<{}>{})", group_name(i), spec.pattern))
            .collect();
        let regex = Regex::new(&format!("(?s){}", parts.join("|"))).map_err(LexError::Composite)?;

        let groups = (0..specs.len()).map(group_name).collect();

        log::debug!("compiled {} token specifications", specs.len());

        Ok(Self {
            specs,
            regex,
            groups,
        })
    }

    /// Returns the specifications in priority order.
    pub fn specs(&self) -> &[TokenSpec<K>] {
        &self.specs
    }

    /// Returns the number of specifications.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Always false: a compiled set has at least one specification.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub(crate) fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Returns the first specification whose group took part in `caps`.
    pub(crate) fn matched(&self, caps: &regex::Captures<'_>) -> Option<&TokenSpec<K>> {
        self.specs
            .iter()
            .zip(&self.groups)
            .find(|(_, group)| caps.name(group).is_some())
            .map(|(spec, _)| spec)
    }
}

impl<K> fmt::Debug for SpecSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpecSet")
            .field("specs", &self.specs)
            .finish_non_exhaustive()
    }
}

fn group_name(index: usize) -> String {
    format!("__parsekit_{index}")
}
