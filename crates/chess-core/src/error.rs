//! Decode error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed destination square {square:?}")]
    MalformedSquare { square: String },

    #[error("token {token:?} at move index {index}: {source}")]
    MalformedToken {
        token: String,
        index: usize,
        #[source]
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    pub fn at_token(self, token: &str, index: usize) -> Self {
        DecodeError::MalformedToken {
            token: token.to_string(),
            index,
            source: Box::new(self),
        }
    }

    /// The offending token and its index, when known.
    pub fn token(&self) -> Option<(&str, usize)> {
        match self {
            DecodeError::MalformedToken { token, index, .. } => Some((token, *index)),
            DecodeError::MalformedSquare { .. } => None,
        }
    }
}
