//! Contains the [`Syntax`] node handed to the macro expander and the handoff conversion from
//! flat token sequences.
//!
//! This is the sole contract boundary between the reader and the expander: the shapes here are
//! enforced statically by the type system, plus one runtime check at the handoff for the
//! constraints types cannot express.

use crate::{
    error::{Error, ShapeViolation},
    token::{Token, TokenNode},
};

/// The sentinel context name for syntax with no expander-assigned hygiene context yet.
pub const DEFAULT_CONTEXT_NAME: &str = "<dot>";

/// Is a hygiene-context tag distinguishing otherwise-identical identifiers during macro
/// expansion.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Context {
    /// The hygiene-context name.
    pub name: String,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            name: DEFAULT_CONTEXT_NAME.to_string(),
        }
    }
}

/// Is a located token paired with its hygiene context; immutable after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Syntax {
    /// The located token the syntax wraps.
    pub node: TokenNode,

    /// The hygiene context tag.
    pub context: Context,
}

/// Wraps a flat sequence of located tokens into syntax nodes tagged with the default context.
///
/// The transformation is pure, order-preserving, and 1:1; re-running it over the extracted nodes
/// of its own output yields an identical sequence.
///
/// # Errors
/// [`Error::ShapeViolation`] when a node violates the structural contract; this signals a
/// programming error in a readtable entry's action, and no partial output is returned.
pub fn tokens_to_syntax(nodes: Vec<TokenNode>) -> Result<Vec<Syntax>, Error> {
    for node in &nodes {
        validate_token(&node.token)?;
    }

    Ok(nodes
        .into_iter()
        .map(|node| Syntax {
            node,
            context: Context::default(),
        })
        .collect())
}

/// Checks the constraints the type system cannot express on its own.
fn validate_token(token: &Token) -> Result<(), Error> {
    match token {
        Token::Identifier(identifier) => {
            if identifier.value.is_empty() {
                return Err(shape_violation("identifier token with an empty value"));
            }

            Ok(())
        }
        Token::Numeric(numeric) => {
            if !numeric.value.is_finite() {
                return Err(shape_violation("numeric token with a non-finite value"));
            }

            Ok(())
        }
        Token::Delimited(delimited) => {
            if delimited.line_number.is_some() != delimited.line_start.is_some() {
                return Err(shape_violation(
                    "delimited token with unpaired line metadata",
                ));
            }

            for inner in &delimited.inner {
                validate_token(inner)?;
            }

            Ok(())
        }
        Token::Punctuator(_) | Token::StringLiteral(_) => Ok(()),
    }
}

fn shape_violation(description: &str) -> Error {
    ShapeViolation {
        description: description.to_string(),
    }
    .into()
}
