use crate::consts::{FULL, LONG, MEDIUM, NONE, RELATIVE, SHORT};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;

/// A formatting detail level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Full,
    Long,
    Medium,
    Short,
}

impl Style {
    pub const ALL: [Self; 4] = [Self::Full, Self::Long, Self::Medium, Self::Short];

    /// Position in locale pattern tables
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Plain integer code, `FULL..=SHORT`
    pub const fn code(self) -> i32 {
        match self {
            Self::Full => FULL,
            Self::Long => LONG,
            Self::Medium => MEDIUM,
            Self::Short => SHORT,
        }
    }

    /// Decodes a plain style code. `NONE` maps to `Ok(None)`.
    pub const fn from_code(code: i32) -> Result<Option<Self>, i32> {
        match code {
            NONE => Ok(None),
            FULL => Ok(Some(Self::Full)),
            LONG => Ok(Some(Self::Long)),
            MEDIUM => Ok(Some(Self::Medium)),
            SHORT => Ok(Some(Self::Short)),
            other => Err(other),
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Full => "full",
            Self::Long => "long",
            Self::Medium => "medium",
            Self::Short => "short",
        })
    }
}

/// Which halves of a date-time a formatter renders. Never empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StylePair {
    Date(Style),
    Time(Style),
    DateTime(Style, Style),
}

impl StylePair {
    /// Combines optional halves; `None` when both are absent
    pub const fn new(date: Option<Style>, time: Option<Style>) -> Option<Self> {
        match (date, time) {
            (Some(date), Some(time)) => Some(Self::DateTime(date, time)),
            (Some(date), None) => Some(Self::Date(date)),
            (None, Some(time)) => Some(Self::Time(time)),
            (None, None) => None,
        }
    }

    pub const fn date(self) -> Option<Style> {
        match self {
            Self::Date(date) | Self::DateTime(date, _) => Some(date),
            Self::Time(_) => None,
        }
    }

    pub const fn time(self) -> Option<Style> {
        match self {
            Self::Time(time) | Self::DateTime(_, time) => Some(time),
            Self::Date(_) => None,
        }
    }
}

/// A raw style code as callers pass it: `NONE`, `FULL..=SHORT`, optionally
/// OR'ed with `RELATIVE`.
///
/// Arbitrary integers are representable; validation happens at resolution.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, From, Into, Serialize, Deserialize,
)]
#[display(fmt = "{}", _0)]
#[serde(transparent)]
pub struct StyleCode(i32);

impl StyleCode {
    pub const NONE: Self = Self(NONE);
    pub const FULL: Self = Self(FULL);
    pub const LONG: Self = Self(LONG);
    pub const MEDIUM: Self = Self(MEDIUM);
    pub const SHORT: Self = Self(SHORT);
    pub const RELATIVE: Self = Self(RELATIVE);

    pub const fn new(code: i32) -> Self {
        Self(code)
    }

    pub const fn code(self) -> i32 {
        self.0
    }

    /// Whether the relative bit is set. `NONE` is never relative even though
    /// all of its bits are set.
    pub const fn is_relative(self) -> bool {
        self.0 != NONE && self.0 & RELATIVE != 0
    }

    /// The code with the relative bit cleared
    pub const fn masked(self) -> Self {
        if self.0 == NONE { self } else { Self(self.0 & !RELATIVE) }
    }

    /// Decodes a non-relative code.
    ///
    /// # Errors
    /// Returns the raw code if it is not `NONE` or `FULL..=SHORT`.
    pub const fn level(self) -> Result<Option<Style>, i32> {
        Style::from_code(self.0)
    }
}

impl From<Style> for StyleCode {
    fn from(style: Style) -> Self {
        Self(style.code())
    }
}

impl From<Option<Style>> for StyleCode {
    fn from(style: Option<Style>) -> Self {
        style.map_or(Self::NONE, Self::from)
    }
}

impl BitOr for StyleCode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOr<StyleCode> for Style {
    type Output = StyleCode;

    fn bitor(self, rhs: StyleCode) -> StyleCode {
        StyleCode::from(self) | rhs
    }
}

/// Which half of a style pair a code was given for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum StyleKind {
    #[display(fmt = "date")]
    Date,
    #[display(fmt = "time")]
    Time,
}

/// Error type for style resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StyleError {
    /// A code outside `NONE` and `FULL..=SHORT` on the non-relative path.
    #[error("Illegal {kind} style: {value}")]
    IllegalStyle { kind: StyleKind, value: i32 },

    /// Both halves were `NONE`.
    #[error("Neither a date nor a time style was requested")]
    NoStyle,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_relative_bit() {
        assert!(StyleCode::new(RELATIVE_FULL).is_relative());
        assert!((Style::Short | StyleCode::RELATIVE).is_relative());
        assert!(!StyleCode::NONE.is_relative());
        assert!(!StyleCode::SHORT.is_relative());
        assert_eq!(StyleCode::new(RELATIVE_MEDIUM).masked(), StyleCode::MEDIUM);
        assert_eq!(StyleCode::NONE.masked(), StyleCode::NONE);
    }

    #[test]
    fn test_from_code() {
        assert_eq!(Style::from_code(NONE), Ok(None));
        assert_eq!(Style::from_code(SHORT), Ok(Some(Style::Short)));
        assert_eq!(Style::from_code(4), Err(4));
        assert_eq!(Style::from_code(-2), Err(-2));
        for style in Style::ALL {
            assert_eq!(Style::from_code(style.code()), Ok(Some(style)));
        }
    }

    #[test]
    fn test_style_pair() {
        assert_eq!(StylePair::new(None, None), None);
        let pair = StylePair::new(Some(Style::Long), None).unwrap();
        assert_eq!(pair, StylePair::Date(Style::Long));
        assert_eq!(pair.time(), None);
        let pair = StylePair::new(Some(Style::Full), Some(Style::Short)).unwrap();
        assert_eq!(pair.date(), Some(Style::Full));
        assert_eq!(pair.time(), Some(Style::Short));
    }

    #[test]
    fn test_error_messages() {
        let err = StyleError::IllegalStyle {
            kind:  StyleKind::Time,
            value: 4,
        };
        assert_eq!(err.to_string(), "Illegal time style: 4");
    }
}
