//! Reading a [`Tree`] back from its printable form.
//!
//! A tree prints as its values in ascending order between brackets, e.g. `[ 5 10 15 ]`. Parsing
//! that text gives back a tree with the same values. Because the printable form says nothing
//! about shape, the parsed tree is built balanced: the middle value becomes the root and each
//! half is filled the same way.
//!
//! # Examples
//!
//! ```
//! use ordered_bst::ordered::Tree;
//! use ordered_bst::parse::ParseTreeError;
//!
//! let chain: Tree<i32> = (1..=7).collect();
//! assert_eq!(chain.height(), 7);
//!
//! let parsed: Tree<i32> = chain.to_string().parse().unwrap();
//! assert_eq!(parsed, chain);
//! assert_eq!(parsed.height(), 3);
//!
//! assert_eq!(
//!     "[ 1 3 2 ]".parse::<Tree<i32>>(),
//!     Err(ParseTreeError::NotAscending { index: 2 })
//! );
//! ```

use std::str::FromStr;

use thiserror::Error;

use crate::ordered::Tree;

/// Ways the printable form of a tree can be malformed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseTreeError {
    /// The text doesn't start with `[`.
    #[error("expected `[` at the start of the tree")]
    MissingOpen,

    /// The text doesn't end with `]`.
    #[error("expected `]` at the end of the tree")]
    MissingClose,

    /// A value couldn't be parsed.
    #[error("value {index} (`{token}`) could not be parsed")]
    Element {
        /// Position of the value among the values, starting at 0.
        index: usize,
        /// The text that failed to parse.
        token: String,
    },

    /// A value wasn't greater than the one before it. The printable form is always strictly
    /// ascending.
    #[error("value {index} is not greater than the value before it")]
    NotAscending {
        /// Position of the out of order value, starting at 0.
        index: usize,
    },
}

impl<T> FromStr for Tree<T>
where
    T: FromStr + Ord,
{
    type Err = ParseTreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_values(s)
            .map(|values| {
                let mut slots: Vec<Option<T>> = values.into_iter().map(Some).collect();
                let mut tree = Tree::new();
                fill_balanced_tree(&mut tree, &mut slots);
                tracing::debug!(len = tree.len(), height = tree.height(), "parsed tree");
                tree
            })
            .inspect_err(|error| tracing::debug!(%error, "rejected tree text"))
    }
}

/// Splits the bracketed text into values, checking they're strictly ascending.
fn parse_values<T>(s: &str) -> Result<Vec<T>, ParseTreeError>
where
    T: FromStr + Ord,
{
    let inner = s
        .trim()
        .strip_prefix('[')
        .ok_or(ParseTreeError::MissingOpen)?
        .strip_suffix(']')
        .ok_or(ParseTreeError::MissingClose)?;

    let values = inner
        .split_whitespace()
        .enumerate()
        .map(|(index, token)| {
            token.parse().map_err(|_| ParseTreeError::Element {
                index,
                token: token.to_owned(),
            })
        })
        .collect::<Result<Vec<T>, _>>()?;

    match values.windows(2).position(|pair| pair[0] >= pair[1]) {
        Some(before) => Err(ParseTreeError::NotAscending { index: before + 1 }),
        None => Ok(values),
    }
}

/// Inserts sorted values so the tree comes out balanced: the middle value first, then each half
/// recursively. Each slot is taken exactly once.
fn fill_balanced_tree<T>(tree: &mut Tree<T>, xs: &mut [Option<T>])
where
    T: Ord,
{
    if xs.is_empty() {
        return;
    }

    let mid = xs.len() / 2;
    let (lower, rest) = xs.split_at_mut(mid);
    let (middle, upper) = rest.split_at_mut(1);
    if let Some(value) = middle[0].take() {
        tree.insert(value);
    }
    fill_balanced_tree(tree, lower);
    fill_balanced_tree(tree, upper);
}
