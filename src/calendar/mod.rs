//! The calendar collaborator: field storage, time resolution and the
//! calendar-system double dispatch that picks style patterns.

mod solar;
mod system;

pub use solar::SolarCalendar;
pub use system::{BUDDHIST, Buddhist, CalendarSystem, GREGORIAN, Gregorian};

use crate::data::{DateSymbols, LocaleDataError, StylePatterns};
use crate::format::{DateFormat, PatternFormat};
use crate::style::StylePair;
use crate::types::{Locale, LocaleKind, TimeZone, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar's own field numbering.
///
/// This is the numbering [`crate::Field::calendar_field`] refers to; it is
/// distinct from the format field ids of [`crate::DateField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
#[repr(u8)]
pub enum CalendarField {
    Era = 0,
    Year = 1,
    Month = 2,
    WeekOfYear = 3,
    WeekOfMonth = 4,
    Date = 5,
    DayOfYear = 6,
    DayOfWeek = 7,
    DayOfWeekInMonth = 8,
    AmPm = 9,
    Hour = 10,
    HourOfDay = 11,
    Minute = 12,
    Second = 13,
    Millisecond = 14,
    ZoneOffset = 15,
    DstOffset = 16,
    YearWoy = 17,
    DowLocal = 18,
    ExtendedYear = 19,
    JulianDay = 20,
    MillisecondsInDay = 21,
    IsLeapMonth = 22,
}

impl CalendarField {
    pub const COUNT: usize = 23;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Era,
        Self::Year,
        Self::Month,
        Self::WeekOfYear,
        Self::WeekOfMonth,
        Self::Date,
        Self::DayOfYear,
        Self::DayOfWeek,
        Self::DayOfWeekInMonth,
        Self::AmPm,
        Self::Hour,
        Self::HourOfDay,
        Self::Minute,
        Self::Second,
        Self::Millisecond,
        Self::ZoneOffset,
        Self::DstOffset,
        Self::YearWoy,
        Self::DowLocal,
        Self::ExtendedYear,
        Self::JulianDay,
        Self::MillisecondsInDay,
        Self::IsLeapMonth,
    ];

    #[inline]
    pub const fn id(self) -> i32 {
        self as i32
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Era => "ERA",
            Self::Year => "YEAR",
            Self::Month => "MONTH",
            Self::WeekOfYear => "WEEK_OF_YEAR",
            Self::WeekOfMonth => "WEEK_OF_MONTH",
            Self::Date => "DATE",
            Self::DayOfYear => "DAY_OF_YEAR",
            Self::DayOfWeek => "DAY_OF_WEEK",
            Self::DayOfWeekInMonth => "DAY_OF_WEEK_IN_MONTH",
            Self::AmPm => "AM_PM",
            Self::Hour => "HOUR",
            Self::HourOfDay => "HOUR_OF_DAY",
            Self::Minute => "MINUTE",
            Self::Second => "SECOND",
            Self::Millisecond => "MILLISECOND",
            Self::ZoneOffset => "ZONE_OFFSET",
            Self::DstOffset => "DST_OFFSET",
            Self::YearWoy => "YEAR_WOY",
            Self::DowLocal => "DOW_LOCAL",
            Self::ExtendedYear => "EXTENDED_YEAR",
            Self::JulianDay => "JULIAN_DAY",
            Self::MillisecondsInDay => "MILLISECONDS_IN_DAY",
            Self::IsLeapMonth => "IS_LEAP_MONTH",
        }
    }
}

impl fmt::Display for CalendarField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<i32> for CalendarField {
    type Error = crate::field::FieldError;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        usize::try_from(id)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or(crate::field::FieldError::OutOfRange(id))
    }
}

impl From<CalendarField> for i32 {
    fn from(field: CalendarField) -> Self {
        field.id()
    }
}

/// Field count of the reference (Gregorian) calendar, which sizes the
/// field registry's id table.
pub fn reference_field_count() -> usize {
    SolarCalendar::gregorian(&Locale::root()).field_count()
}

/// Error type for calendar time resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// A field holds a value outside its range and the calendar is not lenient.
    #[error("Calendar field {field} is out of range: {value}")]
    FieldOutOfRange { field: CalendarField, value: i32 },

    /// The resolved instant does not fit a timestamp.
    #[error("Resolved time overflows the supported range")]
    Overflow,
}

/// Field storage and time resolution for one calendar system.
///
/// A calendar holds either an instant, with every field derived from it, or
/// a set of user-assigned fields that [`Calendar::time`] resolves.
pub trait Calendar: fmt::Debug + Send + Sync {
    /// Calendar system name, e.g. `"gregorian"`
    fn calendar_type(&self) -> &'static str;

    fn set_time_zone(&mut self, zone: TimeZone);
    fn time_zone(&self) -> &TimeZone;

    fn set_lenient(&mut self, lenient: bool);
    fn is_lenient(&self) -> bool;

    /// Unsets every field and forgets the instant
    fn clear(&mut self);

    fn set_time(&mut self, time: Timestamp);

    /// Resolves the instant the fields describe.
    ///
    /// # Errors
    /// Returns `CalendarError::FieldOutOfRange` if a set field is out of range
    /// and the calendar is not lenient.
    fn time(&self) -> Result<Timestamp, CalendarError>;

    /// Value of `field`, resolving the other set fields when needed. Never
    /// mutates the calendar.
    fn get(&self, field: CalendarField) -> i32;

    /// Every field value, resolved once
    fn fields(&self) -> [i32; CalendarField::COUNT] {
        CalendarField::ALL.map(|field| self.get(field))
    }

    fn set(&mut self, field: CalendarField, value: i32);
    fn is_set(&self, field: CalendarField) -> bool;

    fn field_count(&self) -> usize {
        CalendarField::COUNT
    }

    /// First day of the week, 1 = Sunday
    fn first_day_of_week(&self) -> i32;
    fn minimal_days_in_first_week(&self) -> i32;

    fn locale(&self, kind: LocaleKind) -> Option<&Locale>;

    /// This calendar system's style pattern table for `locale`.
    ///
    /// # Errors
    /// Returns `LocaleDataError::Missing` if no locale in the chain has data.
    fn date_time_patterns(&self, locale: &Locale) -> Result<StylePatterns, LocaleDataError>;

    /// Names used when rendering this calendar's fields in `locale`.
    ///
    /// # Errors
    /// Returns `LocaleDataError::Missing` if no locale in the chain has data.
    fn date_symbols(&self, locale: &Locale) -> Result<DateSymbols, LocaleDataError>;

    /// Builds the formatter this calendar system considers right for `styles`.
    ///
    /// # Errors
    /// Returns `LocaleDataError` if the locale data is missing or unusable.
    fn date_time_format(
        &self,
        styles: StylePair,
        locale: &Locale,
    ) -> Result<DateFormat, LocaleDataError> {
        let pattern = self.date_time_patterns(locale)?.compose(styles);
        let symbols = self.date_symbols(locale)?;
        let format = PatternFormat::new(&pattern, symbols).map_err(|source| {
            LocaleDataError::Malformed {
                locale: locale.to_string(),
                source,
            }
        })?;
        Ok(DateFormat::new(Box::new(format), self.box_clone()))
    }

    /// Same system configuration: type, leniency, zone and week rules.
    /// Field values are not compared.
    fn is_equivalent_to(&self, other: &dyn Calendar) -> bool {
        self.calendar_type() == other.calendar_type()
            && self.is_lenient() == other.is_lenient()
            && self.time_zone() == other.time_zone()
            && self.first_day_of_week() == other.first_day_of_week()
            && self.minimal_days_in_first_week() == other.minimal_days_in_first_week()
    }

    fn box_clone(&self) -> Box<dyn Calendar>;
}

impl Clone for Box<dyn Calendar> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

/// The calendar a locale asks for.
///
/// An explicit `calendar` keyword wins; Thai regions default to Buddhist;
/// everything else is Gregorian.
pub fn for_locale(locale: &Locale) -> Box<dyn Calendar> {
    Box::new(SolarCalendar::new(system_for_locale(locale), locale))
}

/// The calendar system [`for_locale`] would pick
pub fn system_for_locale(locale: &Locale) -> &'static dyn CalendarSystem {
    match (locale.calendar_keyword(), locale.region()) {
        (Some("buddhist"), _) => &BUDDHIST,
        (Some(_), _) => &GREGORIAN,
        (None, Some("TH")) => &BUDDHIST,
        (None, _) => &GREGORIAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendar_field_numbering() {
        assert_eq!(CalendarField::COUNT, CalendarField::ALL.len());
        for (index, field) in CalendarField::ALL.iter().enumerate() {
            assert_eq!(field.index(), index);
        }
        assert_eq!(CalendarField::Date.id(), 5);
        assert_eq!(CalendarField::IsLeapMonth.id(), 22);
        assert_eq!(CalendarField::try_from(15).unwrap(), CalendarField::ZoneOffset);
        assert!(CalendarField::try_from(23).is_err());
        assert!(CalendarField::try_from(-1).is_err());
    }

    #[test]
    fn test_reference_field_count() {
        assert_eq!(reference_field_count(), 23);
    }

    #[test]
    fn test_for_locale_picks_system() {
        assert_eq!(for_locale(&Locale::from("en_US")).calendar_type(), "gregorian");
        assert_eq!(for_locale(&Locale::from("th_TH")).calendar_type(), "buddhist");
        assert_eq!(
            for_locale(&Locale::from("th_TH@calendar=gregorian")).calendar_type(),
            "gregorian"
        );
        assert_eq!(
            for_locale(&Locale::from("ja-JP-u-ca-buddhist")).calendar_type(),
            "buddhist"
        );
    }

    #[test]
    fn test_box_clone_is_independent() {
        let mut original = for_locale(&Locale::from("en_US"));
        let copy = original.clone();
        original.set_time_zone(TimeZone::from_offset(3_600_000));
        assert_eq!(copy.time_zone(), &TimeZone::utc());
        assert!(!copy.is_equivalent_to(original.as_ref()));
    }

    #[test]
    fn test_date_time_format_uses_calendar_patterns() {
        let calendar = for_locale(&Locale::from("en_US"));
        let format = calendar
            .date_time_format(StylePair::Date(crate::Style::Short), &Locale::from("en_US"))
            .unwrap();
        assert_eq!(format.pattern(), "M/d/yy");

        let calendar = for_locale(&Locale::from("th_TH"));
        let format = calendar
            .date_time_format(StylePair::Date(crate::Style::Medium), &Locale::from("en"))
            .unwrap();
        assert_eq!(format.pattern(), "MMM d, y G");
    }
}
