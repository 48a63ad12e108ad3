//! Option enumerations.
//!
//! Every enumeration parses from the single-letter codes used by calling
//! scripts (`C`/`P`, `E`/`A`, `I`/`O`) and rejects anything else with
//! [`Error::Configuration`].

use crate::errors::{Error, Result};
use crate::Real;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parse a one-character code out of a string slice.
fn single_char(s: &str, what: &str) -> Result<char> {
    let mut chars = s.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(Error::Configuration(format!(
            "{what} code must be a single character, got {s:?}"
        ))),
    }
}

// ─── OptionType ───────────────────────────────────────────────────────────────

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OptionType {
    /// A call option (right to buy).
    Call,
    /// A put option (right to sell).
    Put,
}

impl OptionType {
    /// +1 for Call, −1 for Put.
    pub fn sign(self) -> Real {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// Intrinsic value `max(φ(S − K), 0)` at underlying price `spot`.
    pub fn intrinsic(self, spot: Real, strike: Real) -> Real {
        (self.sign() * (spot - strike)).max(0.0)
    }

    /// Single-letter code (`'C'` or `'P'`).
    pub fn code(self) -> char {
        match self {
            OptionType::Call => 'C',
            OptionType::Put => 'P',
        }
    }
}

impl TryFrom<char> for OptionType {
    type Error = Error;

    fn try_from(c: char) -> Result<Self> {
        match c {
            'C' => Ok(OptionType::Call),
            'P' => Ok(OptionType::Put),
            other => Err(Error::Configuration(format!(
                "option type must be 'C' or 'P', got {other:?}"
            ))),
        }
    }
}

impl FromStr for OptionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        single_char(s, "option type")?.try_into()
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "Call"),
            OptionType::Put => write!(f, "Put"),
        }
    }
}

// ─── ExerciseStyle ────────────────────────────────────────────────────────────

/// When the option may be exercised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExerciseStyle {
    /// Exercisable only at maturity.
    European,
    /// Exercisable at any node up to maturity.
    American,
}

impl ExerciseStyle {
    /// The other exercise style.
    pub fn other(self) -> Self {
        match self {
            ExerciseStyle::European => ExerciseStyle::American,
            ExerciseStyle::American => ExerciseStyle::European,
        }
    }

    /// Single-letter code (`'E'` or `'A'`).
    pub fn code(self) -> char {
        match self {
            ExerciseStyle::European => 'E',
            ExerciseStyle::American => 'A',
        }
    }
}

impl TryFrom<char> for ExerciseStyle {
    type Error = Error;

    fn try_from(c: char) -> Result<Self> {
        match c {
            'E' => Ok(ExerciseStyle::European),
            'A' => Ok(ExerciseStyle::American),
            other => Err(Error::Configuration(format!(
                "option style must be 'E' or 'A', got {other:?}"
            ))),
        }
    }
}

impl FromStr for ExerciseStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        single_char(s, "option style")?.try_into()
    }
}

impl fmt::Display for ExerciseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseStyle::European => write!(f, "European"),
            ExerciseStyle::American => write!(f, "American"),
        }
    }
}

// ─── Barrier enumerations ─────────────────────────────────────────────────────

/// Whether crossing the barrier activates or voids the option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BarrierKind {
    /// Knock-in: the option exists only once the barrier is breached.
    In,
    /// Knock-out: the option is voided once the barrier is breached.
    Out,
}

impl TryFrom<char> for BarrierKind {
    type Error = Error;

    fn try_from(c: char) -> Result<Self> {
        match c {
            'I' => Ok(BarrierKind::In),
            'O' => Ok(BarrierKind::Out),
            other => Err(Error::Configuration(format!(
                "barrier type must be 'I' or 'O', got {other:?}"
            ))),
        }
    }
}

impl FromStr for BarrierKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        single_char(s, "barrier type")?.try_into()
    }
}

/// Side of the current price on which the barrier sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BarrierDirection {
    /// Barrier above the current price.
    Up,
    /// Barrier at or below the current price.
    Down,
}

impl BarrierDirection {
    /// `Up` if the barrier lies strictly above `current`, `Down` otherwise.
    pub fn infer(current: Real, barrier: Real) -> Self {
        if barrier > current {
            BarrierDirection::Up
        } else {
            BarrierDirection::Down
        }
    }
}

/// Full barrier classification (direction × kind).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BarrierType {
    /// Down-and-in: becomes active when price drops to the barrier.
    DownIn,
    /// Up-and-in: becomes active when price rises to the barrier.
    UpIn,
    /// Down-and-out: expires when price drops to the barrier.
    DownOut,
    /// Up-and-out: expires when price rises to the barrier.
    UpOut,
}

impl BarrierType {
    /// Combine a direction and a kind.
    pub fn new(direction: BarrierDirection, kind: BarrierKind) -> Self {
        match (direction, kind) {
            (BarrierDirection::Down, BarrierKind::In) => BarrierType::DownIn,
            (BarrierDirection::Up, BarrierKind::In) => BarrierType::UpIn,
            (BarrierDirection::Down, BarrierKind::Out) => BarrierType::DownOut,
            (BarrierDirection::Up, BarrierKind::Out) => BarrierType::UpOut,
        }
    }

    /// Direction component.
    pub fn direction(self) -> BarrierDirection {
        match self {
            BarrierType::DownIn | BarrierType::DownOut => BarrierDirection::Down,
            BarrierType::UpIn | BarrierType::UpOut => BarrierDirection::Up,
        }
    }

    /// Kind component.
    pub fn kind(self) -> BarrierKind {
        match self {
            BarrierType::DownIn | BarrierType::UpIn => BarrierKind::In,
            BarrierType::DownOut | BarrierType::UpOut => BarrierKind::Out,
        }
    }

    /// Barrier indicator: `true` when a node at `price` contributes to the
    /// option value.
    ///
    /// | type | condition |
    /// |---|---|
    /// | down-and-out | `price > H` |
    /// | down-and-in | `price <= H` |
    /// | up-and-out | `price < H` |
    /// | up-and-in | `price >= H` |
    pub fn indicator(self, price: Real, barrier: Real) -> bool {
        match self {
            BarrierType::DownOut => price > barrier,
            BarrierType::DownIn => price <= barrier,
            BarrierType::UpOut => price < barrier,
            BarrierType::UpIn => price >= barrier,
        }
    }
}

impl fmt::Display for BarrierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BarrierType::DownIn => write!(f, "Down-and-in"),
            BarrierType::UpIn => write!(f, "Up-and-in"),
            BarrierType::DownOut => write!(f, "Down-and-out"),
            BarrierType::UpOut => write!(f, "Up-and-out"),
        }
    }
}
