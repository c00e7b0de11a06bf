//! Stable numeric identities of the format fields a pattern can contain.

use crate::consts::{FIELD_COUNT, PATTERN_CHARS};
use crate::field::{self, Field, FieldError};
use serde::{Deserialize, Serialize};

/// One of the 34 format fields, identified by a stable id in `0..FIELD_COUNT`.
///
/// Discriminants are part of the wire contract and match the `*_FIELD`
/// constants in [`crate::consts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
#[repr(u8)]
pub enum DateField {
    Era = 0,
    Year = 1,
    Month = 2,
    Date = 3,
    HourOfDay1 = 4,
    HourOfDay0 = 5,
    Minute = 6,
    Second = 7,
    FractionalSecond = 8,
    DayOfWeek = 9,
    DayOfYear = 10,
    DayOfWeekInMonth = 11,
    WeekOfYear = 12,
    WeekOfMonth = 13,
    AmPm = 14,
    Hour1 = 15,
    Hour0 = 16,
    Timezone = 17,
    YearWoy = 18,
    DowLocal = 19,
    ExtendedYear = 20,
    JulianDay = 21,
    MillisecondsInDay = 22,
    TimezoneRfc = 23,
    TimezoneGeneric = 24,
    StandaloneDay = 25,
    StandaloneMonth = 26,
    Quarter = 27,
    StandaloneQuarter = 28,
    TimezoneSpecial = 29,
    YearName = 30,
    TimezoneLocalizedGmtOffset = 31,
    TimezoneIso = 32,
    TimezoneIsoLocal = 33,
}

impl DateField {
    /// Every field, in id order
    pub const ALL: [Self; FIELD_COUNT] = [
        Self::Era,
        Self::Year,
        Self::Month,
        Self::Date,
        Self::HourOfDay1,
        Self::HourOfDay0,
        Self::Minute,
        Self::Second,
        Self::FractionalSecond,
        Self::DayOfWeek,
        Self::DayOfYear,
        Self::DayOfWeekInMonth,
        Self::WeekOfYear,
        Self::WeekOfMonth,
        Self::AmPm,
        Self::Hour1,
        Self::Hour0,
        Self::Timezone,
        Self::YearWoy,
        Self::DowLocal,
        Self::ExtendedYear,
        Self::JulianDay,
        Self::MillisecondsInDay,
        Self::TimezoneRfc,
        Self::TimezoneGeneric,
        Self::StandaloneDay,
        Self::StandaloneMonth,
        Self::Quarter,
        Self::StandaloneQuarter,
        Self::TimezoneSpecial,
        Self::YearName,
        Self::TimezoneLocalizedGmtOffset,
        Self::TimezoneIso,
        Self::TimezoneIsoLocal,
    ];

    /// Stable numeric id
    #[inline]
    pub const fn id(self) -> i32 {
        self as i32
    }

    /// Pattern letter for this field, e.g. `y` for [`DateField::Year`]
    pub fn pattern_char(self) -> char {
        char::from(PATTERN_CHARS.as_bytes()[self as usize])
    }

    /// Looks up the field a pattern letter stands for
    pub fn from_pattern_char(c: char) -> Option<Self> {
        let index = PATTERN_CHARS.find(c)?;
        Self::ALL.get(index).copied()
    }

    /// The attribute this field is reported as in rich-text output.
    ///
    /// Several ids share an attribute: every zone letter reports as
    /// `time zone`, stand-alone variants report as their base field.
    pub fn attribute(self) -> &'static Field {
        match self {
            Self::Era => &field::ERA,
            Self::Year | Self::YearName => &field::YEAR,
            Self::Month | Self::StandaloneMonth => &field::MONTH,
            Self::Date => &field::DAY_OF_MONTH,
            Self::HourOfDay1 => &field::HOUR_OF_DAY1,
            Self::HourOfDay0 => &field::HOUR_OF_DAY0,
            Self::Minute => &field::MINUTE,
            Self::Second => &field::SECOND,
            Self::FractionalSecond => &field::MILLISECOND,
            Self::DayOfWeek | Self::StandaloneDay => &field::DAY_OF_WEEK,
            Self::DayOfYear => &field::DAY_OF_YEAR,
            Self::DayOfWeekInMonth => &field::DAY_OF_WEEK_IN_MONTH,
            Self::WeekOfYear => &field::WEEK_OF_YEAR,
            Self::WeekOfMonth => &field::WEEK_OF_MONTH,
            Self::AmPm => &field::AM_PM,
            Self::Hour1 => &field::HOUR1,
            Self::Hour0 => &field::HOUR0,
            Self::Timezone
            | Self::TimezoneRfc
            | Self::TimezoneGeneric
            | Self::TimezoneSpecial
            | Self::TimezoneLocalizedGmtOffset
            | Self::TimezoneIso
            | Self::TimezoneIsoLocal => &field::TIME_ZONE,
            Self::YearWoy => &field::YEAR_WOY,
            Self::DowLocal => &field::DOW_LOCAL,
            Self::ExtendedYear => &field::EXTENDED_YEAR,
            Self::JulianDay => &field::JULIAN_DAY,
            Self::MillisecondsInDay => &field::MILLISECONDS_IN_DAY,
            Self::Quarter | Self::StandaloneQuarter => &field::QUARTER,
        }
    }

    /// Whether a run of `count` letters of this field renders as a number
    pub const fn is_numeric(self, count: usize) -> bool {
        match self {
            Self::Month | Self::StandaloneMonth | Self::Quarter | Self::StandaloneQuarter => {
                count <= 2
            }
            Self::DowLocal | Self::StandaloneDay => count <= 2,
            Self::Era
            | Self::DayOfWeek
            | Self::AmPm
            | Self::Timezone
            | Self::TimezoneRfc
            | Self::TimezoneGeneric
            | Self::TimezoneSpecial
            | Self::TimezoneLocalizedGmtOffset
            | Self::TimezoneIso
            | Self::TimezoneIsoLocal => false,
            _ => true,
        }
    }
}

impl TryFrom<i32> for DateField {
    type Error = FieldError;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        usize::try_from(id)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or(FieldError::InvalidFieldId(id))
    }
}

impl From<DateField> for i32 {
    fn from(field: DateField) -> Self {
        field.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_field_count_matches_pattern_chars() {
        assert_eq!(PATTERN_CHARS.chars().count(), FIELD_COUNT);
        assert_eq!(DateField::ALL.len(), FIELD_COUNT);
    }

    #[test]
    fn test_ids_are_stable() {
        assert_eq!(DateField::Era.id(), ERA_FIELD);
        assert_eq!(DateField::HourOfDay1.id(), HOUR_OF_DAY1_FIELD);
        assert_eq!(DateField::FractionalSecond.id(), MILLISECOND_FIELD);
        assert_eq!(DateField::Timezone.id(), TIMEZONE_FIELD);
        assert_eq!(DateField::MillisecondsInDay.id(), MILLISECONDS_IN_DAY_FIELD);
        assert_eq!(DateField::StandaloneQuarter.id(), STANDALONE_QUARTER_FIELD);
        assert_eq!(DateField::TimezoneIsoLocal.id(), TIMEZONE_ISO_LOCAL_FIELD);
        for (index, field) in DateField::ALL.iter().enumerate() {
            assert_eq!(usize::try_from(field.id()).unwrap(), index);
        }
    }

    #[test]
    fn test_pattern_chars() {
        assert_eq!(DateField::Year.pattern_char(), 'y');
        assert_eq!(DateField::Hour0.pattern_char(), 'K');
        assert_eq!(DateField::TimezoneIsoLocal.pattern_char(), 'x');
        for field in DateField::ALL {
            assert_eq!(DateField::from_pattern_char(field.pattern_char()), Some(field));
        }
        assert_eq!(DateField::from_pattern_char('b'), None);
    }

    #[test]
    fn test_try_from_rejects_out_of_range() {
        assert!(matches!(DateField::try_from(-1), Err(FieldError::InvalidFieldId(-1))));
        assert!(matches!(DateField::try_from(34), Err(FieldError::InvalidFieldId(34))));
        assert_eq!(DateField::try_from(33).unwrap(), DateField::TimezoneIsoLocal);
    }

    #[test]
    fn test_attribute_sharing() {
        assert!(std::ptr::eq(DateField::TimezoneRfc.attribute(), &field::TIME_ZONE));
        assert!(std::ptr::eq(
            DateField::StandaloneMonth.attribute(),
            DateField::Month.attribute()
        ));
        assert_eq!(DateField::Date.attribute().name(), "day of month");
    }

    #[test]
    fn test_serde_as_id() {
        let json = serde_json::to_string(&DateField::Minute).unwrap();
        assert_eq!(json, "6");
        let parsed: DateField = serde_json::from_str("27").unwrap();
        assert_eq!(parsed, DateField::Quarter);
        assert!(serde_json::from_str::<DateField>("99").is_err());
    }
}
