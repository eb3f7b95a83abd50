//! Text notation for actions.
//!
//! ```text
//! (4,1)    pawn move to x=4, y=1
//! V(3,3)   vertical fence anchored at (3,3)
//! H(5,2)   horizontal fence anchored at (5,2)
//! ```
//!
//! A game record is the notations joined by spaces, in play order.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::{Action, Coord, Orientation};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("empty notation")]
    Empty,
    #[error("unknown prefix {0:?}, expected V, H or a coordinate")]
    UnknownPrefix(char),
    #[error("expected (x,y), got {0:?}")]
    BadCoord(String),
    #[error("invalid number {0:?}")]
    BadNumber(String),
}

fn parse_coord(s: &str) -> Result<Coord, NotationError> {
    let inner = s
        .trim()
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| NotationError::BadCoord(s.to_string()))?;

    let parts: Vec<&str> = inner.split(',').collect();
    let [x, y] = parts.as_slice() else {
        return Err(NotationError::BadCoord(s.to_string()));
    };
    let number = |part: &str| {
        part.trim()
            .parse::<i32>()
            .map_err(|_| NotationError::BadNumber(part.trim().to_string()))
    };
    Ok(Coord::new(number(*x)?, number(*y)?))
}

impl FromStr for Action {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let first = s.chars().next().ok_or(NotationError::Empty)?;
        let orientation = match first.to_ascii_uppercase() {
            '(' => return Ok(Action::Move { to: parse_coord(s)? }),
            'V' => Orientation::Vertical,
            'H' => Orientation::Horizontal,
            other => return Err(NotationError::UnknownPrefix(other)),
        };
        Ok(Action::Fence {
            orientation,
            anchor: parse_coord(&s[1..])?,
        })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move { to } => write!(f, "{}", to),
            Action::Fence { orientation: Orientation::Vertical, anchor } => write!(f, "V{}", anchor),
            Action::Fence { orientation: Orientation::Horizontal, anchor } => write!(f, "H{}", anchor),
        }
    }
}

/// Parse a space-separated game record.
pub fn parse_record(record: &str) -> Result<Vec<Action>, NotationError> {
    record.split_whitespace().map(str::parse).collect()
}

pub fn format_record(actions: &[Action]) -> String {
    actions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
