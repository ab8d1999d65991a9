use crate::collections::Sequence;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum TokenKind {
    Colony,
    Building,
    Request,
}

/// Opaque identifier of first-class entities.
///
/// Tokens only support equality, ordering and hashing. Values issued by one
/// [`TokenFactory`] are monotonic, so a token is never reused within the
/// factory lifetime even after its entity is destroyed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Token {
    kind: TokenKind,
    value: usize,
}

impl Token {
    /// Rebuilds a token from parts received from outside, e.g. a typed colony id.
    pub fn from_raw(kind: TokenKind, value: usize) -> Self {
        Self { kind, value }
    }

    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    #[inline]
    pub fn value(&self) -> usize {
        self.value
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            TokenKind::Colony => "colony",
            TokenKind::Building => "building",
            TokenKind::Request => "request",
        };
        write!(f, "{}:{}", kind, self.value)
    }
}

#[derive(Debug, Default)]
pub struct TokenFactory {
    sequence: Sequence,
}

impl TokenFactory {
    pub fn next(&mut self, kind: TokenKind) -> Token {
        self.sequence.one(|value| Token { kind, value })
    }

    #[inline]
    pub fn watermark(&self) -> usize {
        self.sequence.value()
    }

    pub fn restore(&mut self, watermark: usize) {
        self.sequence.register(watermark);
    }

    pub fn register(&mut self, token: Token) {
        self.sequence.register(token.value);
    }
}
