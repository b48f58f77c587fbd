//! This module contains a representation of concrete word values that can be
//! known and manipulated statically during constraint simplification.

use std::{
    fmt::{Display, Formatter},
    ops::{Add, Div, Mul, Sub},
};

use ethnum::U256;

/// The type of data whose value is concretely known to the constraint core.
///
/// # Representation
///
/// At the level at which this core works, all concrete values are bags of
/// bits in a 256-bit word. Logical truth is represented numerically: zero is
/// false and any non-zero word is true.
///
/// # Semantics
///
/// Arithmetic on words is wrapping, matching the modular semantics of the
/// machine integers the symbolic engine models. Division by zero produces
/// zero rather than trapping, so that constant folding remains total.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Word {
    value: U256,
}

impl Word {
    /// Creates a word representing zero.
    #[must_use]
    pub fn zero() -> Self {
        Self { value: U256::ZERO }
    }

    /// Constructs a word representing the provided boolean, using the
    /// numeric truth encoding.
    #[must_use]
    pub fn from_bool(value: bool) -> Self {
        Self {
            value: U256::from(u8::from(value)),
        }
    }

    /// Gets the underlying 256-bit value of the word.
    #[must_use]
    pub fn value(&self) -> U256 {
        self.value
    }

    /// Checks whether this word is logically true (non-zero).
    #[must_use]
    pub fn is_true(&self) -> bool {
        self.value != U256::ZERO
    }
}

impl Default for Word {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<u8> for Word {
    fn from(value: u8) -> Self {
        Self {
            value: U256::from(value),
        }
    }
}

impl From<u32> for Word {
    fn from(value: u32) -> Self {
        Self {
            value: U256::from(value),
        }
    }
}

impl From<u64> for Word {
    fn from(value: u64) -> Self {
        Self {
            value: U256::from(value),
        }
    }
}

impl From<u128> for Word {
    fn from(value: u128) -> Self {
        Self {
            value: U256::from(value),
        }
    }
}

impl From<U256> for Word {
    fn from(value: U256) -> Self {
        Self { value }
    }
}

/// Wrapping addition of words.
impl Add for Word {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            value: self.value.wrapping_add(rhs.value),
        }
    }
}

/// Wrapping subtraction of words.
impl Sub for Word {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            value: self.value.wrapping_sub(rhs.value),
        }
    }
}

/// Wrapping multiplication of words.
impl Mul for Word {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            value: self.value.wrapping_mul(rhs.value),
        }
    }
}

/// Division of words, where division by zero produces zero.
impl Div for Word {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        let value = self.value.checked_div(rhs.value).unwrap_or(U256::ZERO);
        Self { value }
    }
}

impl Display for Word {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}
