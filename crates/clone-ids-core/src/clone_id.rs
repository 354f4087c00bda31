//! Identifier handed out to sprite clones.
//!
//! IDs are small positive integers so scripts can store them in variables and
//! lists, compare them, and pass them back into reporter blocks. Zero is never
//! a valid ID; it is the "no ID" sentinel on the script surface.

use std::fmt;
use std::num::NonZeroU32;

/// Identifier of a live clone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CloneId(NonZeroU32);

impl CloneId {
    /// The first ID a fresh session hands out.
    pub const FIRST: CloneId = CloneId(NonZeroU32::MIN);

    /// Returns `None` for zero.
    #[inline]
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// The ID after this one, used by the pool's fresh counter.
    #[inline]
    pub(crate) fn successor(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    /// Converts a numeric block argument into an ID.
    ///
    /// Only finite, integral, strictly positive values that fit in `u32`
    /// name an ID. Everything else is treated as an unknown ID by callers.
    pub fn from_number(value: f64) -> Option<Self> {
        if !value.is_finite() || value.fract() != 0.0 {
            return None;
        }
        if value < 1.0 || value > f64::from(u32::MAX) {
            return None;
        }
        // Range and integrality were checked above.
        Self::new(value as u32)
    }

    /// Converts a textual block argument (`"3"`, `" 3 "`, `"3.0"`) into an ID.
    pub fn from_text(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        trimmed.parse::<f64>().ok().and_then(Self::from_number)
    }
}

/// A block argument that may name a clone ID.
///
/// Engines hand reporter values around as numbers or text, so ID slots
/// accept either.
pub trait IdArgument {
    fn to_clone_id(&self) -> Option<CloneId>;
}

impl IdArgument for CloneId {
    fn to_clone_id(&self) -> Option<CloneId> {
        Some(*self)
    }
}

impl IdArgument for f64 {
    fn to_clone_id(&self) -> Option<CloneId> {
        CloneId::from_number(*self)
    }
}

impl IdArgument for &str {
    fn to_clone_id(&self) -> Option<CloneId> {
        CloneId::from_text(self)
    }
}

impl IdArgument for String {
    fn to_clone_id(&self) -> Option<CloneId> {
        CloneId::from_text(self)
    }
}

impl fmt::Display for CloneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<CloneId> for u32 {
    fn from(id: CloneId) -> Self {
        id.get()
    }
}
